//! Shared configuration for the cfusage CLI.
//!
//! TOML profiles, bearer-token resolution (env + keyring + CF CLI
//! `config.json` + plaintext), and translation to
//! `cfusage_core::ApiConfig`. The CLI adds flag-aware wrappers on top.

pub mod cf_cli;

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use cfusage_core::{ApiConfig, TlsVerification};

pub use cf_cli::CfCliConfig;

/// Keyring service name under which tokens are stored.
pub const KEYRING_SERVICE: &str = "cfusage";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no token configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("profile '{name}' not found in config")]
    UnknownProfile { name: String },

    #[error("no Cloud Controller endpoint configured")]
    NoEndpoint,

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named Cloud Controller profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

impl Config {
    /// The named profile, or the default one when `name` is `None`.
    pub fn profile(&self, name: Option<&str>) -> Option<(&str, &Profile)> {
        let name = name.or(self.default_profile.as_deref())?;
        self.profiles
            .get_key_value(name)
            .map(|(k, v)| (k.as_str(), v))
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default)]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            insecure: false,
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "text".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named Cloud Controller profile.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Profile {
    /// API endpoint (e.g., "https://api.sys.example.com").
    pub api: String,

    /// Bearer token (plaintext, prefer keyring or env var).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Environment variable name containing the bearer token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_env: Option<String>,

    /// Path to custom CA certificate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<PathBuf>,

    /// Override insecure TLS setting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insecure: Option<bool>,

    /// Override timeout (seconds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "cfusage", "cfusage").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("cfusage");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file, with `CFUSAGE_` env vars layered on top.
///
/// Nested keys use a double underscore: `CFUSAGE_DEFAULTS__TIMEOUT=60`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("CFUSAGE_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Token resolution (without CLI flags) ────────────────────────────

fn keyring_entry(profile_name: &str) -> Result<keyring::Entry, keyring::Error> {
    keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/token"))
}

/// Resolve a bearer token from the chain (no CLI flag step):
/// profile `token_env` → keyring → CF CLI `config.json` → plaintext.
pub fn resolve_token(
    profile: &Profile,
    profile_name: &str,
    cf_cli: Option<&CfCliConfig>,
) -> Result<SecretString, ConfigError> {
    // 1. Profile's token_env → env var lookup
    if let Some(ref env_name) = profile.token_env {
        if let Ok(val) = std::env::var(env_name) {
            debug!(env = %env_name, "token from environment");
            return Ok(SecretString::from(val));
        }
    }

    // 2. System keyring
    if let Ok(entry) = keyring_entry(profile_name) {
        if let Ok(secret) = entry.get_password() {
            debug!(profile = profile_name, "token from keyring");
            return Ok(SecretString::from(secret));
        }
    }

    // 3. CF CLI login
    if let Some(token) = cf_cli.and_then(CfCliConfig::access_token) {
        debug!("token from CF CLI config");
        return Ok(token);
    }

    // 4. Plaintext in config
    if let Some(ref token) = profile.token {
        return Ok(SecretString::from(token.clone()));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

/// Store a token in the system keyring for a profile.
pub fn store_token(profile_name: &str, token: &str) -> Result<(), ConfigError> {
    keyring_entry(profile_name)?.set_password(token)?;
    Ok(())
}

// ── ApiConfig construction ──────────────────────────────────────────

pub fn parse_api_url(raw: &str) -> Result<url::Url, ConfigError> {
    raw.parse().map_err(|_| ConfigError::Validation {
        field: "api".into(),
        reason: format!("invalid URL: {raw}"),
    })
}

/// Per-invocation settings that win over the profile (CLI flags, env).
#[derive(Debug, Default)]
pub struct ApiOverrides {
    pub api: Option<String>,
    pub token: Option<SecretString>,
    pub insecure: bool,
    pub timeout: Option<u64>,
}

/// Build an `ApiConfig` from a profile.
///
/// Precedence per setting: override, then profile, then `[defaults]`.
/// Without a token override the profile's token chain is walked.
pub fn profile_to_api_config(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
    overrides: ApiOverrides,
    cf_cli: Option<&CfCliConfig>,
) -> Result<ApiConfig, ConfigError> {
    let url = parse_api_url(overrides.api.as_deref().unwrap_or(&profile.api))?;
    let token = match overrides.token {
        Some(token) => token,
        None => resolve_token(profile, profile_name, cf_cli)?,
    };

    let tls = if overrides.insecure || profile.insecure.unwrap_or(defaults.insecure) {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };

    let timeout = overrides
        .timeout
        .or(profile.timeout)
        .unwrap_or(defaults.timeout);

    Ok(ApiConfig {
        tls,
        timeout: Duration::from_secs(timeout),
        ..ApiConfig::new(url, token)
    })
}

/// Build an `ApiConfig` without a profile: overrides first, then the
/// CF CLI login (`Target`, `AccessToken`, `SSLDisabled`).
pub fn cf_cli_to_api_config(
    cf_cli: Option<&CfCliConfig>,
    profile_name: &str,
    defaults: &Defaults,
    overrides: ApiOverrides,
) -> Result<ApiConfig, ConfigError> {
    let target = overrides
        .api
        .as_deref()
        .or_else(|| cf_cli.and_then(|c| c.target.as_deref()))
        .ok_or(ConfigError::NoEndpoint)?;
    let url = parse_api_url(target)?;

    let token = match overrides.token {
        Some(token) => token,
        None => cf_cli
            .and_then(CfCliConfig::access_token)
            .ok_or_else(|| ConfigError::NoCredentials {
                profile: profile_name.into(),
            })?,
    };

    let insecure =
        overrides.insecure || defaults.insecure || cf_cli.is_some_and(|c| c.ssl_disabled);

    Ok(ApiConfig {
        tls: if insecure {
            TlsVerification::DangerAcceptInvalid
        } else {
            TlsVerification::SystemDefaults
        },
        timeout: Duration::from_secs(overrides.timeout.unwrap_or(defaults.timeout)),
        ..ApiConfig::new(url, token)
    })
}
