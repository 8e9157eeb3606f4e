// ── Binding classification ──
//
// Resolves the service instances bound to an app through the reference
// cache. Unknown GUIDs, missing plans and missing services are not
// errors: they simply fail to qualify for a category.

use crate::cache::ReferenceCache;
use crate::model::{BindingCounts, Classification};

/// Whether an instance resolves to a `p-` service via instance → plan →
/// service. Any missing link yields `false`. The managed-type check is
/// left to the caller.
pub fn is_platform_instance(cache: &ReferenceCache, instance_guid: &str) -> bool {
    cache
        .service_instance(instance_guid)
        .and_then(|si| cache.service_plan(si.service_plan_guid.as_str()))
        .and_then(|plan| cache.service(plan.service_guid.as_str()))
        .is_some_and(|svc| svc.is_platform())
}

/// Category of one bound instance GUID.
///
/// An instance known to the service-instance collection is never
/// user-provided, even if the user-provided collection also lists it.
pub fn classify_instance(cache: &ReferenceCache, instance_guid: &str) -> Classification {
    if let Some(si) = cache.service_instance(instance_guid) {
        if si.is_managed() && is_platform_instance(cache, instance_guid) {
            Classification::Platform
        } else {
            Classification::ThirdParty
        }
    } else if cache.user_provided_service(instance_guid).is_some() {
        Classification::UserProvided
    } else {
        Classification::ThirdParty
    }
}

/// Binding counts for an app. Apps without bindings get all zeros.
pub fn classify(cache: &ReferenceCache, app_guid: &str) -> BindingCounts {
    let mut counts = BindingCounts::default();
    for guid in cache.bound_instances(app_guid) {
        counts.record(classify_instance(cache, guid.as_str()));
    }
    counts
}
