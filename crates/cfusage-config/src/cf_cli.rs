// Reader for the CF CLI's own `config.json`.
//
// After `cf login` the CLI stores the API endpoint and a bearer token in
// `$CF_HOME/.cf/config.json` (or `~/.cf/config.json`). Only the fields
// needed to reach the Cloud Controller are read; everything else in the
// file is ignored.

use std::path::{Path, PathBuf};

use secrecy::SecretString;
use serde::Deserialize;

use crate::ConfigError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CfCliConfig {
    /// API endpoint, e.g. `https://api.sys.example.com`.
    #[serde(default)]
    pub target: Option<String>,

    /// `bearer eyJ...`, exactly as the CF CLI stores it.
    #[serde(default)]
    access_token: Option<String>,

    /// Set by `cf api --skip-ssl-validation`.
    #[serde(rename = "SSLDisabled", default)]
    pub ssl_disabled: bool,
}

impl CfCliConfig {
    /// Default location: `$CF_HOME/.cf/config.json`, falling back to the
    /// user's home directory.
    pub fn default_path() -> Option<PathBuf> {
        let home = std::env::var_os("CF_HOME")
            .map(PathBuf::from)
            .or_else(|| directories::BaseDirs::new().map(|d| d.home_dir().to_path_buf()))?;
        Some(home.join(".cf").join("config.json"))
    }

    /// Read from the default location. A missing file is `Ok(None)`.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(None),
        }
    }

    /// Read from an explicit path. A missing file is `Ok(None)`.
    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let parsed = serde_json::from_str(&raw).map_err(|e| ConfigError::Validation {
            field: path.display().to_string(),
            reason: format!("not a CF CLI config file: {e}"),
        })?;
        Ok(Some(parsed))
    }

    /// The stored token, if the CLI is logged in.
    pub fn access_token(&self) -> Option<SecretString> {
        self.access_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(|t| SecretString::from(t.to_owned()))
    }
}
