//! Clap derive structures for the `cfusage` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// cfusage -- usage reports for Cloud Foundry foundations
#[derive(Debug, Parser)]
#[command(
    name = "cfusage",
    version,
    about = "Report memory, instance and service usage of Cloud Foundry orgs and spaces",
    long_about = "Reads orgs, spaces, apps and service bindings from the Cloud Controller\n\
        v2 API and reports memory consumption against org quotas, app instance\n\
        counts, and how apps use platform, user-provided and third-party services.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Configuration profile to use
    #[arg(long, short = 'p', env = "CFUSAGE_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Cloud Controller API endpoint (overrides profile)
    #[arg(long, short = 'a', env = "CFUSAGE_API", global = true)]
    pub api: Option<String>,

    /// OAuth bearer token (as printed by `cf oauth-token`)
    #[arg(long, env = "CFUSAGE_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// Output format [default: from config, else text]
    #[arg(long, short = 'o', env = "CFUSAGE_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip TLS certificate verification
    #[arg(long, short = 'k', env = "CFUSAGE_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds [default: from profile, else 30]
    #[arg(long, env = "CFUSAGE_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report
    Text,
    /// Pretty table
    Table,
    /// Comma-separated values with a header row
    Csv,
    /// Pretty-printed JSON
    Json,
    /// YAML
    Yaml,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Memory and instance usage per org and space
    #[command(alias = "r")]
    Report(FilterArgs),

    /// Service bindings per app: platform, user-provided, third-party
    #[command(alias = "apps")]
    Services(FilterArgs),

    /// Service instances per space with the apps bound to them
    #[command(alias = "si")]
    Summary(FilterArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Org and space filters shared by the report commands.
#[derive(Debug, Clone, Args)]
pub struct FilterArgs {
    /// Only report this org
    #[arg(long = "org", short = 'O')]
    pub org: Option<String>,

    /// Only report spaces with this name
    #[arg(long = "space", short = 'S')]
    pub space: Option<String>,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current configuration (tokens masked)
    Show,

    /// Store a bearer token in the system keyring
    SetToken {
        /// Profile to store the token for (defaults to the active profile)
        #[arg(long)]
        profile: Option<String>,
    },
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
