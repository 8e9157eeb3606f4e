// Cloud Controller v2 HTTP client
//
// Wraps `reqwest::Client` with base-URL joining, error-body parsing and
// `next_url` pagination. Endpoint methods live in sibling modules so this
// file stays focused on transport mechanics.

use secrecy::SecretString;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;
use crate::v2::models::{Page, Resource};

/// Maximum page size accepted by the Cloud Controller.
pub const MAX_PAGE_SIZE: u32 = 100;

// ── Error response shape from the Cloud Controller ───────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    error_code: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the Cloud Controller v2 API.
///
/// Every request carries the bearer token injected by
/// [`TransportConfig::build_client_with_token`]. Relative URLs reported by
/// the API (`spaces_url`, `next_url`, ...) are resolved against `base_url`.
pub struct CfClient {
    http: reqwest::Client,
    base_url: Url,
    page_size: u32,
}

impl CfClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from the API endpoint (e.g. `https://api.sys.example.com`),
    /// a bearer token and transport settings.
    pub fn new(
        base_url: &str,
        token: &SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client_with_token(token)?;
        Self::from_reqwest(base_url, http)
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Url::parse(base_url)?;
        Ok(Self {
            http,
            base_url,
            page_size: MAX_PAGE_SIZE,
        })
    }

    /// Override the `results-per-page` sent on the first page of each list.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        self
    }

    /// The API endpoint this client talks to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Resolve an API path or API-reported relative URL
    /// (`/v2/spaces?page=2`) against the base URL.
    pub(crate) fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// GET a path and decode the body.
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        self.get_url(url).await
    }

    /// GET a fully built URL and decode the body.
    pub(crate) async fn get_url<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        self.handle_response(resp).await
    }

    // ── Pagination ───────────────────────────────────────────────────

    /// Collect every page of a list endpoint by following `next_url`.
    ///
    /// The first request carries `results-per-page`; later requests use
    /// `next_url` verbatim, which already encodes the page size.
    pub async fn paginate_all<E: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Vec<Resource<E>>, Error> {
        let mut url = self.url(path)?;
        url.query_pairs_mut()
            .append_pair("results-per-page", &self.page_size.to_string());

        let mut all = Vec::new();
        loop {
            let page: Page<E> = self.get_url(url).await?;
            let received = page.resources.len();
            all.extend(page.resources);
            trace!(received, total = page.total_results, "page collected");

            match page.next_url {
                Some(next) if received > 0 => url = self.url(&next)?,
                _ => break,
            }
        }

        Ok(all)
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if !status.is_success() {
            return Err(Self::parse_error(status, resp).await);
        }

        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body,
            }
        })
    }

    async fn parse_error(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        let raw = resp.text().await.unwrap_or_default();
        let parsed = serde_json::from_str::<ErrorResponse>(&raw).ok();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Error::Authentication {
                message: parsed
                    .and_then(|e| e.description)
                    .unwrap_or_else(|| "token expired or invalid".into()),
            };
        }

        match parsed {
            Some(err) => Error::Api {
                status: status.as_u16(),
                message: err.description.unwrap_or_else(|| status.to_string()),
                code: err.error_code,
            },
            None => Error::Api {
                status: status.as_u16(),
                message: if raw.is_empty() {
                    status.to_string()
                } else {
                    raw
                },
                code: None,
            },
        }
    }
}
