// ── API-to-domain type conversions ──
//
// Bridges `cfusage_api::v2_models` resources into `cfusage_core::model`
// types. Identity comes from `metadata.guid`, attributes from `entity`.
// Missing optional links become empty GUIDs so lookups miss silently.

use cfusage_api::v2_models::{
    AppEntity, OrganizationEntity, Resource, ServiceBindingEntity, ServiceEntity,
    ServiceInstanceEntity, ServicePlanEntity, SpaceEntity, UserProvidedServiceEntity,
};

use crate::model::{
    Guid, OrgDetails, OrgRef, RawApp, Service, ServiceBinding, ServiceInstance, ServicePlan,
    SpaceDetails, SpaceRef, UserProvidedService,
};

// ── Reference collections ──────────────────────────────────────────

impl From<Resource<ServiceInstanceEntity>> for ServiceInstance {
    fn from(r: Resource<ServiceInstanceEntity>) -> Self {
        Self {
            guid: r.metadata.guid.into(),
            name: r.entity.name,
            instance_type: r.entity.instance_type,
            service_plan_guid: r.entity.service_plan_guid.map(Guid::from).unwrap_or_default(),
            space_guid: r.entity.space_guid.into(),
        }
    }
}

impl From<Resource<ServicePlanEntity>> for ServicePlan {
    fn from(r: Resource<ServicePlanEntity>) -> Self {
        Self {
            guid: r.metadata.guid.into(),
            name: r.entity.name,
            service_guid: r.entity.service_guid.into(),
        }
    }
}

impl From<Resource<ServiceEntity>> for Service {
    fn from(r: Resource<ServiceEntity>) -> Self {
        Self {
            guid: r.metadata.guid.into(),
            label: r.entity.label,
        }
    }
}

impl From<Resource<UserProvidedServiceEntity>> for UserProvidedService {
    fn from(r: Resource<UserProvidedServiceEntity>) -> Self {
        Self {
            guid: r.metadata.guid.into(),
            name: r.entity.name,
            instance_type: r.entity.instance_type,
        }
    }
}

impl From<Resource<SpaceEntity>> for SpaceDetails {
    fn from(r: Resource<SpaceEntity>) -> Self {
        Self {
            guid: r.metadata.guid.into(),
            name: r.entity.name,
            org_guid: r.entity.organization_guid.into(),
        }
    }
}

impl From<Resource<OrganizationEntity>> for OrgDetails {
    fn from(r: Resource<OrganizationEntity>) -> Self {
        Self {
            guid: r.metadata.guid.into(),
            name: r.entity.name,
        }
    }
}

impl From<Resource<ServiceBindingEntity>> for ServiceBinding {
    fn from(r: Resource<ServiceBindingEntity>) -> Self {
        ServiceBinding::new(r.entity.app_guid, r.entity.service_instance_guid)
    }
}

// ── Tree handles ───────────────────────────────────────────────────

impl From<Resource<OrganizationEntity>> for OrgRef {
    fn from(r: Resource<OrganizationEntity>) -> Self {
        Self {
            guid: r.metadata.guid.into(),
            name: r.entity.name,
            url: r.metadata.url,
            quota_url: r.entity.quota_definition_url,
            spaces_url: r.entity.spaces_url,
        }
    }
}

impl From<Resource<SpaceEntity>> for SpaceRef {
    fn from(r: Resource<SpaceEntity>) -> Self {
        Self {
            guid: r.metadata.guid.into(),
            name: r.entity.name,
            apps_url: r.entity.apps_url,
        }
    }
}

impl From<Resource<AppEntity>> for RawApp {
    fn from(r: Resource<AppEntity>) -> Self {
        let running = r.entity.is_started();
        Self {
            guid: r.metadata.guid.into(),
            name: r.entity.name,
            instances: r.entity.instances,
            ram: r.entity.memory,
            running,
        }
    }
}
