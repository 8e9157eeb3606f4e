// ── Service usage overview ──
//
// Denormalizes every service instance with the names of its space, org,
// plan and service, plus the apps bound to it. The org → space skeleton
// used by the per-instance summary is rebuilt from these records.

use std::collections::HashSet;

use indexmap::{IndexMap, IndexSet};

use crate::cache::ReferenceCache;
use crate::model::{Guid, Org, ServiceUsageRecord, Space};

/// One record per distinct service instance *name*.
///
/// The cache's instance map has no defined order, so when two instances
/// share a name which one survives is unspecified. Unresolvable space,
/// org, plan or service links leave the matching field empty.
pub fn build_service_overview(cache: &ReferenceCache) -> Vec<ServiceUsageRecord> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut records = Vec::new();

    for si in cache.service_instances() {
        if !seen.insert(si.name.as_str()) {
            continue;
        }

        let space = cache.space(si.space_guid.as_str());
        let org_name = space
            .and_then(|s| cache.org(s.org_guid.as_str()))
            .map(|o| o.name.clone())
            .unwrap_or_default();

        let plan = cache.service_plan(si.service_plan_guid.as_str());
        let service_name = plan
            .and_then(|p| cache.service(p.service_guid.as_str()))
            .map(|s| s.label.clone())
            .unwrap_or_default();

        let app_guids: Vec<Guid> = cache
            .bindings()
            .iter()
            .filter(|b| b.service_instance_guid == si.guid)
            .map(|b| b.app_guid.clone())
            .collect();

        records.push(ServiceUsageRecord {
            service_instance_guid: si.guid.clone(),
            service_instance_name: si.name.clone(),
            service_instance_type: si.instance_type.clone(),
            space_name: space.map(|s| s.name.clone()).unwrap_or_default(),
            org_name,
            service_plan_name: plan.map(|p| p.name.clone()).unwrap_or_default(),
            service_name,
            app_guids,
        });
    }

    records
}

/// Name-only org → space tree from usage records.
///
/// Each org name appears once with each of its distinct space names once.
/// Quotas and usage are zero, spaces carry no apps. Orgs and spaces come
/// out in first-seen order.
pub fn rebuild_hierarchy(records: &[ServiceUsageRecord]) -> Vec<Org> {
    let mut tree: IndexMap<&str, IndexSet<&str>> = IndexMap::new();
    for record in records {
        tree.entry(record.org_name.as_str())
            .or_default()
            .insert(record.space_name.as_str());
    }

    tree.into_iter()
        .map(|(org, spaces)| Org {
            spaces: spaces.into_iter().map(Space::named).collect(),
            ..Org::named(org)
        })
        .collect()
}
