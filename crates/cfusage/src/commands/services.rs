//! `services`: per-app service binding counts.

use serde::Serialize;
use tabled::Tabled;

use cfusage_core::{CfSource, Report, ReportFilter, generate_report};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output::{self, CsvRecord};

// ── View ────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub(crate) struct BindingsView {
    pub orgs: Vec<OrgBindings>,
}

#[derive(Debug, Serialize)]
pub(crate) struct OrgBindings {
    pub name: String,
    pub spaces: Vec<SpaceBindings>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SpaceBindings {
    pub name: String,
    pub apps: Vec<AppBindings>,
}

#[derive(Debug, Serialize)]
pub(crate) struct AppBindings {
    pub guid: String,
    pub name: String,
    pub instances: u32,
    pub bound: usize,
    pub platform: usize,
    pub user_provided: usize,
    pub third_party: i64,
}

impl From<&Report> for BindingsView {
    fn from(report: &Report) -> Self {
        let orgs = report
            .orgs
            .iter()
            .map(|org| OrgBindings {
                name: org.name.clone(),
                spaces: org
                    .spaces
                    .iter()
                    .map(|space| SpaceBindings {
                        name: space.name.clone(),
                        apps: space
                            .apps
                            .iter()
                            .map(|app| AppBindings {
                                guid: app.guid.to_string(),
                                name: app.name.clone(),
                                instances: app.instances,
                                bound: app.bindings.total,
                                platform: app.bindings.platform_managed,
                                user_provided: app.bindings.user_provided,
                                third_party: app.bindings.third_party(),
                            })
                            .collect(),
                    })
                    .collect(),
            })
            .collect();
        Self { orgs }
    }
}

// ── Table / CSV row ─────────────────────────────────────────────────

#[derive(Serialize, Tabled)]
struct AppRow {
    #[tabled(rename = "Org")]
    org: String,
    #[tabled(rename = "Space")]
    space: String,
    #[tabled(rename = "App")]
    app: String,
    #[tabled(rename = "Instances")]
    instances: u32,
    #[tabled(rename = "Bound")]
    bound: usize,
    #[tabled(rename = "Platform")]
    platform: usize,
    #[tabled(rename = "User-provided")]
    user_provided: usize,
    #[tabled(rename = "3rd party")]
    third_party: i64,
}

impl CsvRecord for AppRow {
    const HEADERS: &'static [&'static str] = &[
        "OrgName",
        "SpaceName",
        "AppName",
        "AppInstances",
        "BoundServiceInstances",
        "BoundPCFServices",
        "BoundUserProvidedServices",
        "Bound3rdPartyServices",
    ];
}

fn rows(view: &BindingsView) -> Vec<AppRow> {
    let mut rows = Vec::new();
    for org in &view.orgs {
        for space in &org.spaces {
            for app in &space.apps {
                rows.push(AppRow {
                    org: org.name.clone(),
                    space: space.name.clone(),
                    app: app.name.clone(),
                    instances: app.instances,
                    bound: app.bound,
                    platform: app.platform,
                    user_provided: app.user_provided,
                    third_party: app.third_party,
                });
            }
        }
    }
    rows
}

// ── Text ────────────────────────────────────────────────────────────

pub(crate) fn render_text(view: &BindingsView) -> String {
    use std::fmt::Write;
    let mut out = String::new();

    for org in &view.orgs {
        let _ = writeln!(out, "Org {}", org.name);
        for space in &org.spaces {
            let _ = writeln!(out, "\tSpace {}", space.name);
            for app in &space.apps {
                let _ = writeln!(
                    out,
                    "\t\tApp {} has {} instances in total.",
                    app.name, app.instances
                );
                let _ = writeln!(
                    out,
                    "\t\tIt has {} service instances bound in total.",
                    app.bound
                );
                let _ = writeln!(
                    out,
                    "\t\tFrom that there are {} PCF service instances, {} user provided service instances,",
                    app.platform, app.user_provided
                );
                let _ = writeln!(
                    out,
                    "\t\tand {} 3rd party instances bound.\n",
                    app.third_party
                );
            }
        }
    }
    out
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    source: &CfSource,
    filter: &ReportFilter,
    global: &GlobalOpts,
    format: OutputFormat,
) -> Result<(), CliError> {
    let report = generate_report(source, filter).await?;
    let view = BindingsView::from(&report);
    let out = output::render(format, &view, rows, render_text)?;
    output::print_output(&out, global.quiet);
    Ok(())
}
