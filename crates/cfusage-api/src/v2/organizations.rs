// Organization, quota, space and app endpoints
//
// The org tree is reached by following the relative URLs each resource
// reports (`spaces_url`, `apps_url`, `quota_definition_url`) rather than
// rebuilding paths from GUIDs.

use tracing::debug;

use crate::error::Error;
use crate::v2::client::CfClient;
use crate::v2::models::{
    AppEntity, MemoryUsage, OrganizationEntity, Page, QuotaDefinitionEntity, Resource,
    SpaceEntity,
};

impl CfClient {
    /// List every organization visible to the token.
    ///
    /// `GET /v2/organizations` (all pages)
    pub async fn list_organizations(&self) -> Result<Vec<Resource<OrganizationEntity>>, Error> {
        debug!("listing organizations");
        self.paginate_all("/v2/organizations").await
    }

    /// Look up a single organization by exact name.
    ///
    /// `GET /v2/organizations?q=name:{name}`. Zero matches is
    /// [`Error::OrgNotFound`].
    pub async fn find_organization(
        &self,
        name: &str,
    ) -> Result<Resource<OrganizationEntity>, Error> {
        debug!(name, "looking up organization");
        let mut url = self.url("/v2/organizations")?;
        url.query_pairs_mut()
            .append_pair("q", &format!("name:{name}"))
            .append_pair("inline-relations-depth", "1");

        let page: Page<OrganizationEntity> = self.get_url(url).await?;
        page.resources
            .into_iter()
            .next()
            .ok_or_else(|| Error::OrgNotFound { name: name.into() })
    }

    /// Fetch the quota definition an organization points at.
    ///
    /// `GET {quota_definition_url}`
    pub async fn get_quota_definition(
        &self,
        quota_url: &str,
    ) -> Result<Resource<QuotaDefinitionEntity>, Error> {
        self.get(quota_url).await
    }

    /// Memory currently consumed by an organization, in MB.
    ///
    /// `GET {org url}/memory_usage`
    pub async fn get_memory_usage(&self, org_url: &str) -> Result<MemoryUsage, Error> {
        let path = format!("{}/memory_usage", org_url.trim_end_matches('/'));
        self.get(&path).await
    }

    /// List the spaces behind an organization's `spaces_url`.
    pub async fn list_spaces_at(
        &self,
        spaces_url: &str,
    ) -> Result<Vec<Resource<SpaceEntity>>, Error> {
        self.paginate_all(spaces_url).await
    }

    /// List every space on the foundation.
    ///
    /// `GET /v2/spaces` (all pages)
    pub async fn list_spaces(&self) -> Result<Vec<Resource<SpaceEntity>>, Error> {
        debug!("listing spaces");
        self.paginate_all("/v2/spaces").await
    }

    /// List the apps behind a space's `apps_url`.
    pub async fn list_apps_at(&self, apps_url: &str) -> Result<Vec<Resource<AppEntity>>, Error> {
        self.paginate_all(apps_url).await
    }
}
