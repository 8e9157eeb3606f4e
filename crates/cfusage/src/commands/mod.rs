//! Command dispatch: bridges CLI args -> core report builders -> output formatting.

pub mod config_cmd;
pub mod report;
pub mod services;
pub mod summary;

use cfusage_core::{CfSource, ReportFilter};

use crate::cli::{Command, FilterArgs, GlobalOpts, OutputFormat};
use crate::error::CliError;

impl From<FilterArgs> for ReportFilter {
    fn from(args: FilterArgs) -> Self {
        ReportFilter::new(args.org, args.space)
    }
}

/// Route a reporting command to its handler.
pub async fn dispatch(
    cmd: Command,
    source: &CfSource,
    global: &GlobalOpts,
    format: OutputFormat,
) -> Result<(), CliError> {
    match cmd {
        Command::Report(args) => report::handle(source, &args.into(), global, format).await,
        Command::Services(args) => services::handle(source, &args.into(), global, format).await,
        Command::Summary(args) => summary::handle(source, &args.into(), global, format).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
