// ── Core error types ──
//
// Report-level errors from cfusage-core. Consumers never see HTTP status
// codes or JSON parse failures directly: the `From<cfusage_api::Error>`
// impl translates transport-layer errors into these variants.
//
// Only fetch failures become errors. Cross-reference misses inside the
// cache (unknown plan, service, space or org GUIDs) are not errors.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to Cloud Controller at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Cloud Controller request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Organization not found: {name}")]
    OrgNotFound { name: String },

    #[error("Entity not found: {entity_type} {identifier}")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// Cloud Controller error code (e.g. `CF-NotAuthorized`).
        code: Option<String>,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<cfusage_api::Error> for CoreError {
    fn from(err: cfusage_api::Error) -> Self {
        match err {
            cfusage_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            cfusage_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout { timeout_secs: 0 }
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        code: None,
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            cfusage_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            cfusage_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            cfusage_api::Error::Api {
                message,
                code,
                status: 404,
            } => CoreError::NotFound {
                entity_type: code.unwrap_or_else(|| "resource".into()),
                identifier: message,
            },
            cfusage_api::Error::Api {
                message,
                code,
                status,
            } => CoreError::Api {
                message,
                code,
                status: Some(status),
            },
            cfusage_api::Error::OrgNotFound { name } => CoreError::OrgNotFound { name },
            cfusage_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}
