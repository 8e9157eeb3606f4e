// ── Live Cloud Controller source ──
//
// Implements both fetch traits on top of `CfClient`, converting API
// resources into model types at the boundary. Every method is a single
// paginated call; no caching happens here.

use std::collections::HashMap;
use std::time::Duration;

use cfusage_api::{CfClient, TlsMode, TransportConfig};
use tracing::debug;

use crate::cache::ReferenceSource;
use crate::config::{ApiConfig, TlsVerification};
use crate::error::CoreError;
use crate::model::{
    Guid, OrgDetails, OrgRef, RawApp, Service, ServiceBinding, ServiceInstance, ServicePlan,
    SpaceDetails, SpaceRef, UserProvidedService,
};
use crate::tree::OrgTreeSource;

pub struct CfSource {
    client: CfClient,
    timeout: Duration,
}

impl CfSource {
    /// Build an authenticated client from connection settings.
    pub fn connect(config: &ApiConfig) -> Result<Self, CoreError> {
        let transport = build_transport(config);
        let client = CfClient::new(config.url.as_str(), &config.token, &transport)?
            .with_page_size(config.page_size);
        debug!(api = %config.url, "Cloud Controller client ready");
        Ok(Self {
            client,
            timeout: config.timeout,
        })
    }

    /// Wrap an already configured client.
    pub fn from_client(client: CfClient) -> Self {
        Self {
            client,
            timeout: TransportConfig::default().timeout,
        }
    }

    pub fn client(&self) -> &CfClient {
        &self.client
    }

    /// Translate an API error, filling in the configured timeout.
    fn map_err(&self, err: cfusage_api::Error) -> CoreError {
        match CoreError::from(err) {
            CoreError::Timeout { .. } => CoreError::Timeout {
                timeout_secs: self.timeout.as_secs(),
            },
            other => other,
        }
    }
}

fn build_transport(config: &ApiConfig) -> TransportConfig {
    TransportConfig {
        tls: tls_to_transport(&config.tls),
        timeout: config.timeout,
    }
}

fn tls_to_transport(tls: &TlsVerification) -> TlsMode {
    match tls {
        TlsVerification::SystemDefaults => TlsMode::System,
        TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
    }
}

/// Convert resources and key them by GUID.
fn index<R, T>(resources: Vec<R>, guid: impl Fn(&T) -> &Guid) -> HashMap<Guid, T>
where
    T: From<R>,
{
    resources
        .into_iter()
        .map(T::from)
        .map(|item| (guid(&item).clone(), item))
        .collect()
}

// ── Reference collections ───────────────────────────────────────────

impl ReferenceSource for CfSource {
    async fn service_instances(&self) -> Result<HashMap<Guid, ServiceInstance>, CoreError> {
        let raw = self
            .client
            .list_service_instances()
            .await
            .map_err(|e| self.map_err(e))?;
        Ok(index(raw, |si: &ServiceInstance| &si.guid))
    }

    async fn service_plans(&self) -> Result<HashMap<Guid, ServicePlan>, CoreError> {
        let raw = self
            .client
            .list_service_plans()
            .await
            .map_err(|e| self.map_err(e))?;
        Ok(index(raw, |p: &ServicePlan| &p.guid))
    }

    async fn services(&self) -> Result<HashMap<Guid, Service>, CoreError> {
        let raw = self
            .client
            .list_services()
            .await
            .map_err(|e| self.map_err(e))?;
        Ok(index(raw, |s: &Service| &s.guid))
    }

    async fn user_provided_services(
        &self,
    ) -> Result<HashMap<Guid, UserProvidedService>, CoreError> {
        let raw = self
            .client
            .list_user_provided_service_instances()
            .await
            .map_err(|e| self.map_err(e))?;
        Ok(index(raw, |u: &UserProvidedService| &u.guid))
    }

    async fn spaces(&self) -> Result<HashMap<Guid, SpaceDetails>, CoreError> {
        let raw = self
            .client
            .list_spaces()
            .await
            .map_err(|e| self.map_err(e))?;
        Ok(index(raw, |s: &SpaceDetails| &s.guid))
    }

    async fn orgs(&self) -> Result<HashMap<Guid, OrgDetails>, CoreError> {
        let raw = self
            .client
            .list_organizations()
            .await
            .map_err(|e| self.map_err(e))?;
        Ok(index(raw, |o: &OrgDetails| &o.guid))
    }

    async fn service_bindings(&self) -> Result<Vec<ServiceBinding>, CoreError> {
        let raw = self
            .client
            .list_service_bindings()
            .await
            .map_err(|e| self.map_err(e))?;
        Ok(raw.into_iter().map(ServiceBinding::from).collect())
    }
}

// ── Org tree ────────────────────────────────────────────────────────

impl OrgTreeSource for CfSource {
    async fn list_orgs(&self) -> Result<Vec<OrgRef>, CoreError> {
        let raw = self
            .client
            .list_organizations()
            .await
            .map_err(|e| self.map_err(e))?;
        Ok(raw.into_iter().map(OrgRef::from).collect())
    }

    async fn find_org(&self, name: &str) -> Result<OrgRef, CoreError> {
        let raw = self
            .client
            .find_organization(name)
            .await
            .map_err(|e| self.map_err(e))?;
        Ok(OrgRef::from(raw))
    }

    async fn org_memory_usage(&self, org: &OrgRef) -> Result<i64, CoreError> {
        let usage = self
            .client
            .get_memory_usage(&org.url)
            .await
            .map_err(|e| self.map_err(e))?;
        Ok(usage.memory_usage_in_mb)
    }

    async fn quota_memory_limit(&self, org: &OrgRef) -> Result<i64, CoreError> {
        let quota = self
            .client
            .get_quota_definition(&org.quota_url)
            .await
            .map_err(|e| self.map_err(e))?;
        Ok(quota.entity.memory_limit)
    }

    async fn org_spaces(&self, org: &OrgRef) -> Result<Vec<SpaceRef>, CoreError> {
        let raw = self
            .client
            .list_spaces_at(&org.spaces_url)
            .await
            .map_err(|e| self.map_err(e))?;
        Ok(raw.into_iter().map(SpaceRef::from).collect())
    }

    async fn space_apps(&self, space: &SpaceRef) -> Result<Vec<RawApp>, CoreError> {
        let raw = self
            .client
            .list_apps_at(&space.apps_url)
            .await
            .map_err(|e| self.map_err(e))?;
        Ok(raw.into_iter().map(RawApp::from).collect())
    }
}
