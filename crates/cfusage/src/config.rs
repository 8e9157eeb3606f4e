//! CLI configuration: thin wrapper around `cfusage_config` shared types.
//!
//! Turns `GlobalOpts` flag overrides (--api, --token, --insecure,
//! --timeout, --output) into `cfusage-config` inputs.

use clap::ValueEnum;
use secrecy::SecretString;
use tracing::{debug, warn};

use cfusage_config::{ApiOverrides, CfCliConfig};
use cfusage_core::ApiConfig;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use cfusage_config::{
    Config, Profile, config_path, load_config_or_default, save_config, store_token,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Output format: flag > env > config default > text.
pub fn output_format(global: &GlobalOpts, config: &Config) -> OutputFormat {
    global.output.unwrap_or_else(|| {
        OutputFormat::from_str(&config.defaults.output, true).unwrap_or(OutputFormat::Text)
    })
}

/// CF CLI login state, if any. An unreadable file is logged and ignored.
fn cf_cli_config() -> Option<CfCliConfig> {
    match CfCliConfig::load() {
        Ok(found) => found,
        Err(e) => {
            warn!(error = %e, "ignoring unreadable CF CLI config");
            None
        }
    }
}

/// Flag and env overrides as seen by `cfusage-config`.
fn overrides(global: &GlobalOpts) -> ApiOverrides {
    ApiOverrides {
        api: global.api.clone(),
        token: global.token.clone().map(SecretString::from),
        insecure: global.insecure,
        timeout: global.timeout,
    }
}

/// Build an `ApiConfig` from the config file, profile, CF CLI login and
/// CLI overrides.
pub fn build_api_config(global: &GlobalOpts, cfg: &Config) -> Result<ApiConfig, CliError> {
    let cf_cli = cf_cli_config();

    if let Some((name, profile)) = cfg.profile(global.profile.as_deref()) {
        debug!(profile = %name, "using config profile");
        return Ok(cfusage_config::profile_to_api_config(
            profile,
            name,
            &cfg.defaults,
            overrides(global),
            cf_cli.as_ref(),
        )?);
    }

    // A profile was asked for by name but does not exist.
    if let Some(ref name) = global.profile {
        let mut available: Vec<_> = cfg.profiles.keys().cloned().collect();
        available.sort();
        return Err(CliError::ProfileNotFound {
            name: name.clone(),
            available: if available.is_empty() {
                "(none)".into()
            } else {
                available.join(", ")
            },
        });
    }

    // No profile: flags, env and the CF CLI login.
    Ok(cfusage_config::cf_cli_to_api_config(
        cf_cli.as_ref(),
        &active_profile_name(global, cfg),
        &cfg.defaults,
        overrides(global),
    )?)
}
