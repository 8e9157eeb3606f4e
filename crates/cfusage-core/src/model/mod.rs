// ── Domain model ──
//
// Reference entities (flat, GUID-keyed), the raw org tree as fetched and
// the derived report tree. All types are plain data: no I/O, no interior
// mutability.

pub mod guid;
pub mod reference;
pub mod report;
pub mod tree;

pub use guid::Guid;
pub use reference::{
    MANAGED_SERVICE_INSTANCE, OrgDetails, PLATFORM_LABEL_PREFIX, Service, ServiceBinding,
    ServiceInstance, ServicePlan, SpaceDetails, UserProvidedService,
};
pub use report::{App, BindingCounts, Classification, Org, Report, ServiceUsageRecord, Space};
pub use tree::{OrgRef, RawApp, RawOrg, RawSpace, SpaceRef};
