// ── Org tree fetch ──
//
// Walks org → space → app through per-org and per-space endpoints,
// optionally narrowed to one org and/or one space name. Sequential: each
// request completes before the next is issued.

use tracing::debug;

use crate::error::CoreError;
use crate::model::{OrgRef, RawApp, RawOrg, RawSpace, ServiceUsageRecord, SpaceRef};

/// Reads the org hierarchy.
#[allow(async_fn_in_trait)]
pub trait OrgTreeSource {
    async fn list_orgs(&self) -> Result<Vec<OrgRef>, CoreError>;
    /// Single org by exact name. Missing ⇒ [`CoreError::OrgNotFound`].
    async fn find_org(&self, name: &str) -> Result<OrgRef, CoreError>;
    /// Memory in use by the org, in MB.
    async fn org_memory_usage(&self, org: &OrgRef) -> Result<i64, CoreError>;
    /// Memory limit of the org's quota definition, in MB.
    async fn quota_memory_limit(&self, org: &OrgRef) -> Result<i64, CoreError>;
    async fn org_spaces(&self, org: &OrgRef) -> Result<Vec<SpaceRef>, CoreError>;
    async fn space_apps(&self, space: &SpaceRef) -> Result<Vec<RawApp>, CoreError>;
}

/// Optional org and space name filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportFilter {
    pub org: Option<String>,
    pub space: Option<String>,
}

impl ReportFilter {
    pub fn new(org: Option<String>, space: Option<String>) -> Self {
        Self { org, space }
    }

    fn keeps_space(&self, name: &str) -> bool {
        self.space.as_deref().is_none_or(|wanted| wanted == name)
    }

    /// Whether a usage record falls inside the org and space filters.
    pub fn keeps_record(&self, record: &ServiceUsageRecord) -> bool {
        self.org.as_deref().is_none_or(|wanted| wanted == record.org_name)
            && self.keeps_space(&record.space_name)
    }
}

/// Fetch the raw tree. Any failure aborts the whole walk.
pub async fn fetch_org_tree<S: OrgTreeSource + ?Sized>(
    source: &S,
    filter: &ReportFilter,
) -> Result<Vec<RawOrg>, CoreError> {
    let handles = match filter.org.as_deref() {
        Some(name) => vec![source.find_org(name).await?],
        None => source.list_orgs().await?,
    };

    let mut orgs = Vec::with_capacity(handles.len());
    for handle in &handles {
        orgs.push(fetch_org(source, handle, filter).await?);
    }
    Ok(orgs)
}

async fn fetch_org<S: OrgTreeSource + ?Sized>(
    source: &S,
    handle: &OrgRef,
    filter: &ReportFilter,
) -> Result<RawOrg, CoreError> {
    let memory_usage = source.org_memory_usage(handle).await?;
    let memory_quota = source.quota_memory_limit(handle).await?;
    let space_refs = source.org_spaces(handle).await?;

    let mut spaces = Vec::new();
    for space in space_refs.iter().filter(|s| filter.keeps_space(&s.name)) {
        let apps = source.space_apps(space).await?;
        debug!(org = %handle.name, space = %space.name, apps = apps.len(), "space fetched");
        spaces.push(RawSpace {
            name: space.name.clone(),
            apps,
        });
    }

    Ok(RawOrg {
        name: handle.name.clone(),
        memory_quota,
        memory_usage,
        spaces,
    })
}
