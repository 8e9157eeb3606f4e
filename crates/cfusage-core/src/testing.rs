// In-memory sources for unit tests. Records every fetch so tests can
// assert on call order, and fails on demand at a chosen fetch.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::cache::{ReferenceCollections, ReferenceSource};
use crate::error::CoreError;
use crate::model::{
    Guid, OrgDetails, OrgRef, RawApp, Service, ServiceBinding, ServiceInstance, ServicePlan,
    SpaceDetails, SpaceRef, UserProvidedService,
};
use crate::tree::OrgTreeSource;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Fetch {
    ServiceInstances,
    ServicePlans,
    Services,
    UserProvidedServices,
    Spaces,
    Orgs,
    ServiceBindings,
    ListOrgs,
    FindOrg(String),
    OrgMemoryUsage(String),
    QuotaMemoryLimit(String),
    OrgSpaces(String),
    SpaceApps(String),
}

impl Fetch {
    fn label(&self) -> String {
        match self {
            Self::ServiceInstances => "service instances".into(),
            Self::ServicePlans => "service plans".into(),
            Self::Services => "services".into(),
            Self::UserProvidedServices => "user-provided services".into(),
            Self::Spaces => "spaces".into(),
            Self::Orgs => "orgs".into(),
            Self::ServiceBindings => "service bindings".into(),
            Self::ListOrgs => "org list".into(),
            Self::FindOrg(name) => format!("find org {name}"),
            Self::OrgMemoryUsage(name) => format!("memory usage of {name}"),
            Self::QuotaMemoryLimit(name) => format!("quota of {name}"),
            Self::OrgSpaces(name) => format!("spaces of {name}"),
            Self::SpaceApps(name) => format!("apps of {name}"),
        }
    }
}

#[derive(Debug, Clone)]
struct FakeOrg {
    handle: OrgRef,
    memory_usage: i64,
    memory_quota: i64,
    spaces: Vec<(SpaceRef, Vec<RawApp>)>,
}

#[derive(Debug, Default)]
pub(crate) struct FakeSource {
    pub(crate) collections: ReferenceCollections,
    orgs: Vec<FakeOrg>,
    fail_at: Option<Fetch>,
    calls: RefCell<Vec<Fetch>>,
}

impl FakeSource {
    pub(crate) fn with_collections(collections: ReferenceCollections) -> Self {
        Self {
            collections,
            ..Self::default()
        }
    }

    pub(crate) fn failing_at(mut self, fetch: Fetch) -> Self {
        self.fail_at = Some(fetch);
        self
    }

    pub(crate) fn with_org(mut self, name: &str, memory_usage: i64, memory_quota: i64) -> Self {
        self.orgs.push(FakeOrg {
            handle: OrgRef {
                guid: Guid::from(format!("{name}-guid")),
                name: name.into(),
                url: format!("/v2/organizations/{name}-guid"),
                quota_url: format!("/v2/quota_definitions/{name}-quota"),
                spaces_url: format!("/v2/organizations/{name}-guid/spaces"),
            },
            memory_usage,
            memory_quota,
            spaces: Vec::new(),
        });
        self
    }

    /// Adds a space to the most recently added org with this name.
    pub(crate) fn with_space(mut self, org: &str, space: &str, apps: Vec<RawApp>) -> Self {
        if let Some(fake) = self.orgs.iter_mut().rev().find(|o| o.handle.name == org) {
            let guid = format!("{org}-{space}-guid");
            fake.spaces.push((
                SpaceRef {
                    guid: Guid::from(guid.as_str()),
                    name: space.into(),
                    apps_url: format!("/v2/spaces/{guid}/apps"),
                },
                apps,
            ));
        }
        self
    }

    pub(crate) fn calls(&self) -> Vec<Fetch> {
        self.calls.borrow().clone()
    }

    fn record(&self, fetch: Fetch) -> Result<(), CoreError> {
        self.calls.borrow_mut().push(fetch.clone());
        if self.fail_at.as_ref() == Some(&fetch) {
            return Err(CoreError::Api {
                message: format!("{} failed", fetch.label()),
                code: None,
                status: Some(500),
            });
        }
        Ok(())
    }

    fn org(&self, handle: &OrgRef) -> Option<&FakeOrg> {
        self.orgs.iter().find(|o| o.handle.guid == handle.guid)
    }
}

impl ReferenceSource for FakeSource {
    async fn service_instances(&self) -> Result<HashMap<Guid, ServiceInstance>, CoreError> {
        self.record(Fetch::ServiceInstances)?;
        Ok(self.collections.service_instances.clone())
    }

    async fn service_plans(&self) -> Result<HashMap<Guid, ServicePlan>, CoreError> {
        self.record(Fetch::ServicePlans)?;
        Ok(self.collections.service_plans.clone())
    }

    async fn services(&self) -> Result<HashMap<Guid, Service>, CoreError> {
        self.record(Fetch::Services)?;
        Ok(self.collections.services.clone())
    }

    async fn user_provided_services(
        &self,
    ) -> Result<HashMap<Guid, UserProvidedService>, CoreError> {
        self.record(Fetch::UserProvidedServices)?;
        Ok(self.collections.user_provided_services.clone())
    }

    async fn spaces(&self) -> Result<HashMap<Guid, SpaceDetails>, CoreError> {
        self.record(Fetch::Spaces)?;
        Ok(self.collections.spaces.clone())
    }

    async fn orgs(&self) -> Result<HashMap<Guid, OrgDetails>, CoreError> {
        self.record(Fetch::Orgs)?;
        Ok(self.collections.orgs.clone())
    }

    async fn service_bindings(&self) -> Result<Vec<ServiceBinding>, CoreError> {
        self.record(Fetch::ServiceBindings)?;
        Ok(self.collections.bindings.clone())
    }
}

impl OrgTreeSource for FakeSource {
    async fn list_orgs(&self) -> Result<Vec<OrgRef>, CoreError> {
        self.record(Fetch::ListOrgs)?;
        Ok(self.orgs.iter().map(|o| o.handle.clone()).collect())
    }

    async fn find_org(&self, name: &str) -> Result<OrgRef, CoreError> {
        self.record(Fetch::FindOrg(name.into()))?;
        self.orgs
            .iter()
            .find(|o| o.handle.name == name)
            .map(|o| o.handle.clone())
            .ok_or_else(|| CoreError::OrgNotFound { name: name.into() })
    }

    async fn org_memory_usage(&self, org: &OrgRef) -> Result<i64, CoreError> {
        self.record(Fetch::OrgMemoryUsage(org.name.clone()))?;
        Ok(self.org(org).map_or(0, |o| o.memory_usage))
    }

    async fn quota_memory_limit(&self, org: &OrgRef) -> Result<i64, CoreError> {
        self.record(Fetch::QuotaMemoryLimit(org.name.clone()))?;
        Ok(self.org(org).map_or(0, |o| o.memory_quota))
    }

    async fn org_spaces(&self, org: &OrgRef) -> Result<Vec<SpaceRef>, CoreError> {
        self.record(Fetch::OrgSpaces(org.name.clone()))?;
        Ok(self
            .org(org)
            .map(|o| o.spaces.iter().map(|(s, _)| s.clone()).collect())
            .unwrap_or_default())
    }

    async fn space_apps(&self, space: &SpaceRef) -> Result<Vec<RawApp>, CoreError> {
        self.record(Fetch::SpaceApps(space.name.clone()))?;
        Ok(self
            .orgs
            .iter()
            .flat_map(|o| o.spaces.iter())
            .find(|(s, _)| s.guid == space.guid)
            .map(|(_, apps)| apps.clone())
            .unwrap_or_default())
    }
}

// ── Fixture helpers ─────────────────────────────────────────────────

pub(crate) fn raw_app(guid: &str, name: &str, instances: u32, ram: u64, running: bool) -> RawApp {
    RawApp {
        guid: Guid::from(guid),
        name: name.into(),
        instances,
        ram,
        running,
    }
}

pub(crate) fn instance(
    guid: &str,
    name: &str,
    kind: &str,
    plan: &str,
    space: &str,
) -> ServiceInstance {
    ServiceInstance {
        guid: Guid::from(guid),
        name: name.into(),
        instance_type: kind.into(),
        service_plan_guid: Guid::from(plan),
        space_guid: Guid::from(space),
    }
}

pub(crate) fn plan(guid: &str, name: &str, service: &str) -> ServicePlan {
    ServicePlan {
        guid: Guid::from(guid),
        name: name.into(),
        service_guid: Guid::from(service),
    }
}

pub(crate) fn service(guid: &str, label: &str) -> Service {
    Service {
        guid: Guid::from(guid),
        label: label.into(),
    }
}

pub(crate) fn user_provided(guid: &str, name: &str) -> UserProvidedService {
    UserProvidedService {
        guid: Guid::from(guid),
        name: name.into(),
        instance_type: "user_provided_service_instance".into(),
    }
}

pub(crate) fn space_details(guid: &str, name: &str, org: &str) -> SpaceDetails {
    SpaceDetails {
        guid: Guid::from(guid),
        name: name.into(),
        org_guid: Guid::from(org),
    }
}

pub(crate) fn org_details(guid: &str, name: &str) -> OrgDetails {
    OrgDetails {
        guid: Guid::from(guid),
        name: name.into(),
    }
}

/// Collect keyed entities into a GUID map.
pub(crate) fn by_guid<T>(
    items: impl IntoIterator<Item = T>,
    key: impl Fn(&T) -> &Guid,
) -> HashMap<Guid, T> {
    items
        .into_iter()
        .map(|item| (key(&item).clone(), item))
        .collect()
}
