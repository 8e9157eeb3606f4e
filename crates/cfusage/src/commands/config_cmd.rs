//! Config subcommand handlers.

use dialoguer::{Input, Select};
use serde::Serialize;
use tabled::Tabled;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::config::{self, Config, Profile};
use crate::error::CliError;
use crate::output::{self, CsvRecord};

const REDACTED: &str = "********";

// ── Helpers ─────────────────────────────────────────────────────────

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

fn prompt_token() -> Result<String, CliError> {
    let token = rpassword::prompt_password("Bearer token (cf oauth-token): ").map_err(prompt_err)?;
    let token = token.trim().to_owned();
    if token.is_empty() {
        return Err(CliError::Validation {
            field: "token".into(),
            reason: "token cannot be empty".into(),
        });
    }
    Ok(token)
}

// ── Show view ───────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ConfigView {
    path: String,
    default_profile: Option<String>,
    output: String,
    insecure: bool,
    timeout: u64,
    profiles: Vec<ProfileView>,
}

#[derive(Debug, Clone, Serialize, Tabled)]
struct ProfileView {
    #[tabled(rename = "Profile")]
    name: String,
    #[tabled(rename = "API")]
    api: String,
    #[tabled(rename = "Token")]
    token: String,
    #[tabled(rename = "Insecure")]
    insecure: bool,
    #[tabled(rename = "Timeout")]
    timeout: u64,
}

impl CsvRecord for ProfileView {
    const HEADERS: &'static [&'static str] = &["Profile", "API", "Token", "Insecure", "Timeout"];
}

/// Where a profile's token comes from, never the token itself.
fn token_source(profile: &Profile) -> String {
    match (&profile.token_env, &profile.token) {
        (Some(env), _) => format!("env:{env}"),
        (None, Some(_)) => REDACTED.into(),
        (None, None) => "keyring / cf cli".into(),
    }
}

impl ConfigView {
    fn new(cfg: &Config) -> Self {
        let mut profiles: Vec<ProfileView> = cfg
            .profiles
            .iter()
            .map(|(name, p)| ProfileView {
                name: name.clone(),
                api: p.api.clone(),
                token: token_source(p),
                insecure: p.insecure.unwrap_or(cfg.defaults.insecure),
                timeout: p.timeout.unwrap_or(cfg.defaults.timeout),
            })
            .collect();
        profiles.sort_by(|a, b| a.name.cmp(&b.name));

        Self {
            path: config::config_path().display().to_string(),
            default_profile: cfg.default_profile.clone(),
            output: cfg.defaults.output.clone(),
            insecure: cfg.defaults.insecure,
            timeout: cfg.defaults.timeout,
            profiles,
        }
    }
}

fn render_show_text(view: &ConfigView) -> String {
    use std::fmt::Write;
    let mut out = String::new();
    let _ = writeln!(out, "Config file: {}", view.path);
    let _ = writeln!(
        out,
        "Default profile: {}",
        view.default_profile.as_deref().unwrap_or("(none)")
    );
    let _ = writeln!(
        out,
        "Defaults: output={} insecure={} timeout={}s",
        view.output, view.insecure, view.timeout
    );
    if view.profiles.is_empty() {
        let _ = writeln!(out, "No profiles configured.");
    }
    for p in &view.profiles {
        let _ = writeln!(out, "\n[{}]", p.name);
        let _ = writeln!(out, "  api      = {}", p.api);
        let _ = writeln!(out, "  token    = {}", p.token);
        let _ = writeln!(out, "  insecure = {}", p.insecure);
        let _ = writeln!(out, "  timeout  = {}s", p.timeout);
    }
    out
}

// ── Init: interactive wizard ────────────────────────────────────────

fn init(color: bool) -> Result<(), CliError> {
    let mut cfg = config::load_config_or_default();
    eprintln!("cfusage configuration wizard");
    eprintln!("   Config path: {}\n", config::config_path().display());

    // 1. Profile name
    let profile_name: String = Input::new()
        .with_prompt("Profile name")
        .default("default".into())
        .interact_text()
        .map_err(prompt_err)?;

    // 2. API endpoint
    let api: String = Input::new()
        .with_prompt("Cloud Controller API URL")
        .default("https://api.sys.example.com".into())
        .interact_text()
        .map_err(prompt_err)?;
    cfusage_config::parse_api_url(&api)?;

    // 3. Token storage
    let choices = &[
        "Store token in system keyring (recommended)",
        "Read token from an environment variable",
        "Use the CF CLI login (cf login)",
        "Save token to config file (plaintext)",
    ];
    let selection = Select::new()
        .with_prompt("How should cfusage get a bearer token?")
        .items(choices)
        .default(0)
        .interact()
        .map_err(prompt_err)?;

    let mut profile = Profile {
        api,
        ..Profile::default()
    };
    match selection {
        0 => {
            let token = prompt_token()?;
            config::store_token(&profile_name, &token)?;
            output::status("Token stored in system keyring", color);
        }
        1 => {
            let env: String = Input::new()
                .with_prompt("Environment variable name")
                .default("CF_TOKEN".into())
                .interact_text()
                .map_err(prompt_err)?;
            profile.token_env = Some(env);
        }
        2 => {}
        _ => profile.token = Some(prompt_token()?),
    }

    // 4. Write config
    cfg.profiles.insert(profile_name.clone(), profile);
    cfg.default_profile = Some(profile_name.clone());
    let path = config::save_config(&cfg)?;

    output::status(
        &format!("Configuration written to {}", path.display()),
        color,
    );
    eprintln!("  Active profile: {profile_name}");
    eprintln!("\n  Test it: cfusage report");
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(
    args: ConfigArgs,
    global: &GlobalOpts,
    format: OutputFormat,
) -> Result<(), CliError> {
    let color = output::should_color(global.color);

    match args.command {
        ConfigCommand::Init => init(color),

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = config::load_config_or_default();
            let view = ConfigView::new(&cfg);
            let out = output::render(
                format,
                &view,
                |v| v.profiles.clone(),
                render_show_text,
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Set token ───────────────────────────────────────────────
        ConfigCommand::SetToken { profile } => {
            let cfg = config::load_config_or_default();
            let profile_name = profile.unwrap_or_else(|| config::active_profile_name(global, &cfg));
            let token = prompt_token()?;
            config::store_token(&profile_name, &token)?;
            output::status(
                &format!("Token stored in system keyring for profile '{profile_name}'"),
                color,
            );
            Ok(())
        }
    }
}
