// ── Runtime connection configuration ──
//
// These types describe *how* to reach the Cloud Controller. They carry
// the bearer token and connection tuning, but never touch disk. The CLI
// constructs an `ApiConfig` and hands it in.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification (`cf api --skip-ssl-validation`).
    DangerAcceptInvalid,
}

/// Configuration for talking to a single Cloud Controller.
///
/// Built by the CLI, passed to [`CfSource::connect`](crate::CfSource::connect).
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// API endpoint (e.g., `https://api.sys.example.com`).
    pub url: Url,
    /// OAuth bearer token, with or without the `bearer ` prefix.
    pub token: SecretString,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Per-request timeout.
    pub timeout: Duration,
    /// `results-per-page` for list endpoints (1-100).
    pub page_size: u32,
}

impl ApiConfig {
    pub fn new(url: Url, token: SecretString) -> Self {
        Self {
            url,
            token,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            page_size: cfusage_api::v2::client::MAX_PAGE_SIZE,
        }
    }
}
