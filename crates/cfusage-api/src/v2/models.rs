// Cloud Controller v2 response types
//
// Every list endpoint returns a `Page<E>` of `Resource<E>` items, each
// split into `metadata` (identity) and `entity` (attributes). Fields use
// `#[serde(default)]` where the API omits or nulls them depending on the
// resource state.

use serde::{Deserialize, Serialize};

// ── Envelope ─────────────────────────────────────────────────────────

/// Pagination envelope shared by all `/v2/` list endpoints.
///
/// ```json
/// { "total_results": 2, "total_pages": 1, "prev_url": null,
///   "next_url": null, "resources": [...] }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<E> {
    #[serde(default)]
    pub total_results: u64,
    #[serde(default)]
    pub total_pages: u64,
    #[serde(default)]
    pub prev_url: Option<String>,
    /// Relative URL of the next page, `null` on the last one.
    #[serde(default)]
    pub next_url: Option<String>,
    pub resources: Vec<Resource<E>>,
}

/// A single resource: identity in `metadata`, attributes in `entity`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource<E> {
    pub metadata: Metadata,
    pub entity: E,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub guid: String,
    /// Relative URL of the resource itself (e.g. `/v2/organizations/{guid}`).
    pub url: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

// ── Organizations & spaces ───────────────────────────────────────────

/// Entity of `GET /v2/organizations`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganizationEntity {
    pub name: String,
    #[serde(default)]
    pub status: Option<String>,
    pub quota_definition_url: String,
    pub spaces_url: String,
}

/// Entity of `GET /v2/quota_definitions/{guid}`. Limits are in MB.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotaDefinitionEntity {
    #[serde(default)]
    pub name: String,
    pub memory_limit: i64,
    #[serde(default)]
    pub instance_memory_limit: Option<i64>,
}

/// Body of `GET /v2/organizations/{guid}/memory_usage`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryUsage {
    pub memory_usage_in_mb: i64,
}

/// Entity of `GET /v2/spaces` and `GET /v2/organizations/{guid}/spaces`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpaceEntity {
    pub name: String,
    pub organization_guid: String,
    #[serde(default)]
    pub apps_url: String,
}

// ── Apps ─────────────────────────────────────────────────────────────

/// Entity of `GET /v2/spaces/{guid}/apps`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppEntity {
    pub name: String,
    #[serde(default)]
    pub instances: u32,
    /// Per-instance memory in MB.
    #[serde(default)]
    pub memory: u64,
    /// `STARTED` or `STOPPED`.
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub service_bindings_url: Option<String>,
}

impl AppEntity {
    pub fn is_started(&self) -> bool {
        self.state == "STARTED"
    }
}

// ── Services ─────────────────────────────────────────────────────────

/// Entity of `GET /v2/service_instances`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceInstanceEntity {
    pub name: String,
    /// `managed_service_instance` or `user_provided_service_instance`.
    #[serde(rename = "type", default)]
    pub instance_type: String,
    #[serde(default)]
    pub service_plan_guid: Option<String>,
    pub space_guid: String,
}

/// Entity of `GET /v2/service_plans`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServicePlanEntity {
    pub name: String,
    pub service_guid: String,
}

/// Entity of `GET /v2/services`. `label` is the marketplace name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceEntity {
    pub label: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Entity of `GET /v2/user_provided_service_instances`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProvidedServiceEntity {
    pub name: String,
    #[serde(rename = "type", default)]
    pub instance_type: String,
    #[serde(default)]
    pub space_guid: Option<String>,
}

/// Entity of `GET /v2/service_bindings`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceBindingEntity {
    pub app_guid: String,
    pub service_instance_guid: String,
}
