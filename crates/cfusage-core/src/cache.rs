// ── Global reference cache ──
//
// Seven foundation-wide collections fetched exactly once per report and
// indexed for GUID lookups. Built by `ReferenceCache::build`, immutable
// afterwards, passed by reference to classification and the overview.

use std::collections::HashMap;

use tracing::debug;

use crate::error::CoreError;
use crate::model::{
    Guid, OrgDetails, Service, ServiceBinding, ServiceInstance, ServicePlan, SpaceDetails,
    UserProvidedService,
};

// ── Source trait ────────────────────────────────────────────────────

/// Fetches the flat reference collections.
///
/// Implemented by [`CfSource`](crate::CfSource) against a live Cloud
/// Controller, and by in-memory fakes in tests.
#[allow(async_fn_in_trait)]
pub trait ReferenceSource {
    async fn service_instances(&self) -> Result<HashMap<Guid, ServiceInstance>, CoreError>;
    async fn service_plans(&self) -> Result<HashMap<Guid, ServicePlan>, CoreError>;
    async fn services(&self) -> Result<HashMap<Guid, Service>, CoreError>;
    async fn user_provided_services(
        &self,
    ) -> Result<HashMap<Guid, UserProvidedService>, CoreError>;
    async fn spaces(&self) -> Result<HashMap<Guid, SpaceDetails>, CoreError>;
    async fn orgs(&self) -> Result<HashMap<Guid, OrgDetails>, CoreError>;
    async fn service_bindings(&self) -> Result<Vec<ServiceBinding>, CoreError>;
}

// ── Materialized collections ────────────────────────────────────────

/// The seven collections, already fetched.
#[derive(Debug, Clone, Default)]
pub struct ReferenceCollections {
    pub service_instances: HashMap<Guid, ServiceInstance>,
    pub service_plans: HashMap<Guid, ServicePlan>,
    pub services: HashMap<Guid, Service>,
    pub user_provided_services: HashMap<Guid, UserProvidedService>,
    pub spaces: HashMap<Guid, SpaceDetails>,
    pub orgs: HashMap<Guid, OrgDetails>,
    pub bindings: Vec<ServiceBinding>,
}

// ── Cache ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct ReferenceCache {
    collections: ReferenceCollections,
    /// app GUID → bound instance GUIDs, in binding-list order.
    by_app: HashMap<Guid, Vec<Guid>>,
}

impl ReferenceCache {
    /// Fetch every collection once, in a fixed order, and index bindings.
    ///
    /// The first failing fetch aborts the build and its error is returned
    /// as-is; fetches after it are never issued.
    pub async fn build<S: ReferenceSource + ?Sized>(source: &S) -> Result<Self, CoreError> {
        let service_instances = source.service_instances().await?;
        let service_plans = source.service_plans().await?;
        let services = source.services().await?;
        let user_provided_services = source.user_provided_services().await?;
        let spaces = source.spaces().await?;
        let orgs = source.orgs().await?;
        let bindings = source.service_bindings().await?;

        debug!(
            service_instances = service_instances.len(),
            service_plans = service_plans.len(),
            services = services.len(),
            user_provided_services = user_provided_services.len(),
            spaces = spaces.len(),
            orgs = orgs.len(),
            bindings = bindings.len(),
            "reference collections fetched"
        );

        Ok(Self::from_parts(ReferenceCollections {
            service_instances,
            service_plans,
            services,
            user_provided_services,
            spaces,
            orgs,
            bindings,
        }))
    }

    /// Build from collections that are already in memory.
    pub fn from_parts(collections: ReferenceCollections) -> Self {
        let mut by_app: HashMap<Guid, Vec<Guid>> = HashMap::new();
        for binding in &collections.bindings {
            by_app
                .entry(binding.app_guid.clone())
                .or_default()
                .push(binding.service_instance_guid.clone());
        }
        Self {
            collections,
            by_app,
        }
    }

    // ── Lookups ──────────────────────────────────────────────────────

    pub fn service_instance(&self, guid: &str) -> Option<&ServiceInstance> {
        self.collections.service_instances.get(guid)
    }

    pub fn service_plan(&self, guid: &str) -> Option<&ServicePlan> {
        self.collections.service_plans.get(guid)
    }

    pub fn service(&self, guid: &str) -> Option<&Service> {
        self.collections.services.get(guid)
    }

    pub fn user_provided_service(&self, guid: &str) -> Option<&UserProvidedService> {
        self.collections.user_provided_services.get(guid)
    }

    pub fn space(&self, guid: &str) -> Option<&SpaceDetails> {
        self.collections.spaces.get(guid)
    }

    pub fn org(&self, guid: &str) -> Option<&OrgDetails> {
        self.collections.orgs.get(guid)
    }

    /// Instance GUIDs bound to an app. Empty for apps without bindings.
    pub fn bound_instances(&self, app_guid: &str) -> &[Guid] {
        self.by_app.get(app_guid).map(Vec::as_slice).unwrap_or_default()
    }

    // ── Whole collections ────────────────────────────────────────────

    pub fn service_instances(&self) -> impl Iterator<Item = &ServiceInstance> {
        self.collections.service_instances.values()
    }

    /// The raw binding list, in the order it was fetched.
    pub fn bindings(&self) -> &[ServiceBinding] {
        &self.collections.bindings
    }

    pub fn collections(&self) -> &ReferenceCollections {
        &self.collections
    }
}
