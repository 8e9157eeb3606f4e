//! Join and aggregation engine between `cfusage-api` and the CLI.
//!
//! The crate turns independently paginated, flat Cloud Controller
//! collections into a hierarchical usage report:
//!
//! - **[`ReferenceCache`]**: built once per report by
//!   [`ReferenceCache::build`], which calls each of the seven
//!   [`ReferenceSource`] fetches exactly once and indexes service bindings
//!   by app GUID. Immutable afterwards and passed by reference.
//!
//! - **Classification** ([`classify`]): resolves an app's bound service
//!   instances through the cache into platform-managed (`p-` label),
//!   user-provided and third-party counts.
//!
//! - **Tree walk**: [`fetch_org_tree`] reads the org → space → app tree
//!   through an [`OrgTreeSource`] and [`aggregate_orgs`] annotates it with
//!   binding counts.
//!
//! - **Service overview**: [`build_service_overview`] denormalizes service
//!   instances with their space, org, plan and service names plus consuming
//!   apps; [`rebuild_hierarchy`] derives an org → space skeleton from it.
//!
//! Cross-reference misses never fail: they degrade to empty names or zero
//! counts. Fetch failures abort and propagate unchanged.

pub mod aggregate;
pub mod cache;
pub mod classify;
pub mod config;
pub mod convert;
pub mod error;
pub mod model;
pub mod overview;
pub mod report;
pub mod source;
pub mod tree;

#[cfg(test)]
pub(crate) mod testing;

// ── Primary re-exports ──────────────────────────────────────────────
pub use aggregate::aggregate_orgs;
pub use cache::{ReferenceCache, ReferenceCollections, ReferenceSource};
pub use classify::{classify, classify_instance, is_platform_instance};
pub use config::{ApiConfig, TlsVerification};
pub use error::CoreError;
pub use overview::{build_service_overview, rebuild_hierarchy};
pub use report::{generate_report, generate_service_summary};
pub use source::CfSource;
pub use tree::{OrgTreeSource, ReportFilter, fetch_org_tree};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    // Report tree
    App,
    BindingCounts,
    Classification,
    // Identity
    Guid,
    Org,
    // Reference data
    OrgDetails,
    // Raw tree
    OrgRef,
    RawApp,
    RawOrg,
    RawSpace,
    Report,
    Service,
    ServiceBinding,
    ServiceInstance,
    ServicePlan,
    ServiceUsageRecord,
    Space,
    SpaceDetails,
    SpaceRef,
    UserProvidedService,
};
