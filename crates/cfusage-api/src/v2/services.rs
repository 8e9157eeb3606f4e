// Service catalog and binding endpoints
//
// Flat, foundation-wide collections. Each is fetched once per report and
// joined in memory by `cfusage-core`.

use tracing::debug;

use crate::error::Error;
use crate::v2::client::CfClient;
use crate::v2::models::{
    Resource, ServiceBindingEntity, ServiceEntity, ServiceInstanceEntity, ServicePlanEntity,
    UserProvidedServiceEntity,
};

impl CfClient {
    /// `GET /v2/service_instances` (all pages)
    pub async fn list_service_instances(
        &self,
    ) -> Result<Vec<Resource<ServiceInstanceEntity>>, Error> {
        debug!("listing service instances");
        self.paginate_all("/v2/service_instances").await
    }

    /// `GET /v2/service_plans` (all pages)
    pub async fn list_service_plans(&self) -> Result<Vec<Resource<ServicePlanEntity>>, Error> {
        debug!("listing service plans");
        self.paginate_all("/v2/service_plans").await
    }

    /// `GET /v2/services` (all pages)
    pub async fn list_services(&self) -> Result<Vec<Resource<ServiceEntity>>, Error> {
        debug!("listing services");
        self.paginate_all("/v2/services").await
    }

    /// `GET /v2/user_provided_service_instances` (all pages)
    pub async fn list_user_provided_service_instances(
        &self,
    ) -> Result<Vec<Resource<UserProvidedServiceEntity>>, Error> {
        debug!("listing user-provided service instances");
        self.paginate_all("/v2/user_provided_service_instances")
            .await
    }

    /// `GET /v2/service_bindings` (all pages)
    ///
    /// Bindings come back in API order; callers that care about
    /// "first seen" rely on it.
    pub async fn list_service_bindings(
        &self,
    ) -> Result<Vec<Resource<ServiceBindingEntity>>, Error> {
        debug!("listing service bindings");
        self.paginate_all("/v2/service_bindings").await
    }
}
