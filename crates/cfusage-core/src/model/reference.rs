// ── Reference entities ──
//
// Flat collections fetched once per report and joined by GUID. Links to
// other entities are stored as GUIDs and may dangle: a plan whose service
// was deleted, an instance whose space is gone. Lookups treat a dangling
// link as "unknown", never as an error.

use serde::{Deserialize, Serialize};

use super::guid::Guid;

/// `type` value of a marketplace (broker-managed) service instance.
pub const MANAGED_SERVICE_INSTANCE: &str = "managed_service_instance";

/// Service labels starting with this prefix are platform-provided.
pub const PLATFORM_LABEL_PREFIX: &str = "p-";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInstance {
    pub guid: Guid,
    pub name: String,
    /// `managed_service_instance`, `user_provided_service_instance`, ...
    pub instance_type: String,
    /// Empty for instances without a plan.
    pub service_plan_guid: Guid,
    pub space_guid: Guid,
}

impl ServiceInstance {
    pub fn is_managed(&self) -> bool {
        self.instance_type == MANAGED_SERVICE_INSTANCE
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServicePlan {
    pub guid: Guid,
    pub name: String,
    pub service_guid: Guid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub guid: Guid,
    /// Marketplace name, e.g. `p-mysql`.
    pub label: String,
}

impl Service {
    pub fn is_platform(&self) -> bool {
        self.label.starts_with(PLATFORM_LABEL_PREFIX)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProvidedService {
    pub guid: Guid,
    pub name: String,
    pub instance_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceDetails {
    pub guid: Guid,
    pub name: String,
    pub org_guid: Guid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgDetails {
    pub guid: Guid,
    pub name: String,
}

/// An (app, service instance) pair. The pair is its only identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServiceBinding {
    pub app_guid: Guid,
    pub service_instance_guid: Guid,
}

impl ServiceBinding {
    pub fn new(app_guid: impl Into<Guid>, service_instance_guid: impl Into<Guid>) -> Self {
        Self {
            app_guid: app_guid.into(),
            service_instance_guid: service_instance_guid.into(),
        }
    }
}
