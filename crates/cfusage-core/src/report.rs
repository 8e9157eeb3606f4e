// ── Report orchestration ──

use tracing::{debug, info};

use crate::aggregate::aggregate_orgs;
use crate::cache::{ReferenceCache, ReferenceSource};
use crate::error::CoreError;
use crate::model::Report;
use crate::overview::build_service_overview;
use crate::tree::{OrgTreeSource, ReportFilter, fetch_org_tree};

/// Build a complete report: reference cache, service overview, org tree,
/// then aggregation. The first failing fetch aborts the report.
pub async fn generate_report<S>(source: &S, filter: &ReportFilter) -> Result<Report, CoreError>
where
    S: ReferenceSource + OrgTreeSource + ?Sized,
{
    info!("fetching reference collections");
    let cache = ReferenceCache::build(source).await?;

    let service_instances = build_service_overview(&cache);
    debug!(records = service_instances.len(), "service overview built");

    info!(org = ?filter.org, space = ?filter.space, "fetching org tree");
    let raw_orgs = fetch_org_tree(source, filter).await?;

    let orgs = aggregate_orgs(&cache, raw_orgs);
    info!(orgs = orgs.len(), "report ready");

    Ok(Report {
        orgs,
        service_instances,
    })
}

/// Build the per-instance summary: reference cache and service overview
/// only, restricted to the filter, with `orgs` rebuilt from the records.
/// The org tree is never fetched; an org filter naming no cached org
/// fails with [`CoreError::OrgNotFound`].
pub async fn generate_service_summary<S>(
    source: &S,
    filter: &ReportFilter,
) -> Result<Report, CoreError>
where
    S: ReferenceSource + ?Sized,
{
    info!("fetching reference collections");
    let cache = ReferenceCache::build(source).await?;

    if let Some(ref name) = filter.org {
        if !cache.collections().orgs.values().any(|o| o.name == *name) {
            return Err(CoreError::OrgNotFound { name: name.clone() });
        }
    }

    let mut service_instances = build_service_overview(&cache);
    service_instances.retain(|record| filter.keeps_record(record));
    debug!(records = service_instances.len(), "service overview built");

    let mut report = Report {
        orgs: Vec::new(),
        service_instances,
    };
    report.rebuild_orgs_from_services();
    Ok(report)
}
