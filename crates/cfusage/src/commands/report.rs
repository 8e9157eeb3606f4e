//! `report`: memory and instance usage per org and space.

use serde::Serialize;
use tabled::Tabled;

use cfusage_core::{CfSource, Org, Report, ReportFilter, Space, generate_report};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output::{self, CsvRecord};

// ── View ────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub(crate) struct UsageView {
    pub orgs: Vec<OrgUsage>,
    pub total_apps: usize,
    pub total_instances: u64,
}

#[derive(Debug, Serialize)]
pub(crate) struct OrgUsage {
    pub name: String,
    pub memory_quota: i64,
    pub memory_usage: i64,
    pub spaces: Vec<SpaceUsage>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SpaceUsage {
    pub name: String,
    pub memory_used: u64,
    pub quota_percent: i64,
    pub apps_deployed: usize,
    pub apps_running: usize,
    pub instances_deployed: u64,
    pub instances_running: u64,
}

impl SpaceUsage {
    fn new(org: &Org, space: &Space) -> Self {
        Self {
            name: space.name.clone(),
            memory_used: space.consumed_memory(),
            quota_percent: org.space_quota_percent(space),
            apps_deployed: space.apps_count(),
            apps_running: space.running_apps_count(),
            instances_deployed: space.instances_count(),
            instances_running: space.running_instances_count(),
        }
    }
}

impl From<&Report> for UsageView {
    fn from(report: &Report) -> Self {
        Self {
            orgs: report
                .orgs
                .iter()
                .map(|org| OrgUsage {
                    name: org.name.clone(),
                    memory_quota: org.memory_quota,
                    memory_usage: org.memory_usage,
                    spaces: org.spaces.iter().map(|s| SpaceUsage::new(org, s)).collect(),
                })
                .collect(),
            total_apps: report.total_apps(),
            total_instances: report.total_instances(),
        }
    }
}

// ── Table / CSV row ─────────────────────────────────────────────────

#[derive(Serialize, Tabled)]
struct SpaceRow {
    #[tabled(rename = "Org")]
    org: String,
    #[tabled(rename = "Space")]
    space: String,
    #[tabled(rename = "Memory (MB)")]
    memory_used: u64,
    #[tabled(rename = "Org quota (MB)")]
    org_quota: i64,
    #[tabled(rename = "Apps")]
    apps: usize,
    #[tabled(rename = "Running")]
    apps_running: usize,
    #[tabled(rename = "Instances")]
    instances: u64,
    #[tabled(rename = "Running")]
    instances_running: u64,
}

impl CsvRecord for SpaceRow {
    const HEADERS: &'static [&'static str] = &[
        "OrgName",
        "SpaceName",
        "SpaceMemoryUsed",
        "OrgMemoryQuota",
        "AppsDeployed",
        "AppsRunning",
        "AppInstancesDeployed",
        "AppInstancesRunning",
    ];
}

fn rows(view: &UsageView) -> Vec<SpaceRow> {
    view.orgs
        .iter()
        .flat_map(|org| {
            org.spaces.iter().map(move |s| SpaceRow {
                org: org.name.clone(),
                space: s.name.clone(),
                memory_used: s.memory_used,
                org_quota: org.memory_quota,
                apps: s.apps_deployed,
                apps_running: s.apps_running,
                instances: s.instances_deployed,
                instances_running: s.instances_running,
            })
        })
        .collect()
}

// ── Text ────────────────────────────────────────────────────────────

pub(crate) fn render_text(view: &UsageView) -> String {
    use std::fmt::Write;
    let mut out = String::new();

    for org in &view.orgs {
        let _ = writeln!(
            out,
            "Org {} is consuming {} MB of {} MB.",
            org.name, org.memory_usage, org.memory_quota
        );
        for s in &org.spaces {
            let _ = writeln!(
                out,
                "\tSpace {} is consuming {} MB memory ({}%) of org quota.",
                s.name, s.memory_used, s.quota_percent
            );
            let _ = writeln!(
                out,
                "\t\t{} apps: {} running {} stopped",
                s.apps_deployed,
                s.apps_running,
                s.apps_deployed - s.apps_running
            );
            let _ = writeln!(
                out,
                "\t\t{} instances: {} running, {} stopped",
                s.instances_deployed,
                s.instances_running,
                s.instances_deployed - s.instances_running
            );
        }
    }

    let _ = writeln!(
        out,
        "You are running {} apps in {} org(s), with a total of {} instances.",
        view.total_apps,
        view.orgs.len(),
        view.total_instances
    );
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
    let view = UsageView::from(&report);
    let out = output::render(format, &view, rows, render_text)?;
    output::print_output(&out, global.quiet);
    Ok(())
}
