//! `summary`: service instances per space with their consuming apps.

use serde::Serialize;
use tabled::Tabled;

use cfusage_core::{CfSource, Report, ReportFilter, ServiceUsageRecord, generate_service_summary};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output::{self, CsvRecord};

// ── View ────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub(crate) struct SummaryView {
    pub orgs: Vec<OrgSummary>,
}

#[derive(Debug, Serialize)]
pub(crate) struct OrgSummary {
    pub name: String,
    pub spaces: Vec<SpaceSummary>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SpaceSummary {
    pub name: String,
    pub service_instances: Vec<InstanceSummary>,
}

#[derive(Debug, Serialize)]
pub(crate) struct InstanceSummary {
    pub guid: String,
    pub name: String,
    #[serde(rename = "type")]
    pub instance_type: String,
    pub service: String,
    pub plan: String,
    pub bound_apps: Vec<String>,
}

impl From<&ServiceUsageRecord> for InstanceSummary {
    fn from(record: &ServiceUsageRecord) -> Self {
        Self {
            guid: record.service_instance_guid.to_string(),
            name: record.service_instance_name.clone(),
            instance_type: record.service_instance_type.clone(),
            service: record.service_name.clone(),
            plan: record.service_plan_name.clone(),
            bound_apps: record.app_guids.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Walk the rebuilt org/space skeleton and attach each space's records.
impl From<&Report> for SummaryView {
    fn from(report: &Report) -> Self {
        let orgs = report
            .orgs
            .iter()
            .map(|org| OrgSummary {
                name: org.name.clone(),
                spaces: org
                    .spaces
                    .iter()
                    .map(|space| SpaceSummary {
                        name: space.name.clone(),
                        service_instances: report
                            .services_in(&org.name, &space.name)
                            .map(InstanceSummary::from)
                            .collect(),
                    })
                    .filter(|space| !space.service_instances.is_empty())
                    .collect(),
            })
            .filter(|org| !org.spaces.is_empty())
            .collect();
        Self { orgs }
    }
}

// ── Table / CSV row ─────────────────────────────────────────────────

#[derive(Serialize, Tabled)]
struct InstanceRow {
    #[tabled(rename = "Org")]
    org: String,
    #[tabled(rename = "Space")]
    space: String,
    #[tabled(rename = "Instance")]
    name: String,
    #[tabled(rename = "Type")]
    instance_type: String,
    #[tabled(rename = "Service")]
    service: String,
    #[tabled(rename = "Plan")]
    plan: String,
    #[tabled(rename = "Apps")]
    app_count: usize,
    #[tabled(rename = "Bound apps")]
    bound_apps: String,
}

impl CsvRecord for InstanceRow {
    const HEADERS: &'static [&'static str] = &[
        "OrgName",
        "SpaceName",
        "ServiceInstanceName",
        "ServiceInstanceType",
        "ServiceName",
        "ServicePlanName",
        "AmountOfBoundApps",
        "BoundApps",
    ];
}

fn rows(view: &SummaryView) -> Vec<InstanceRow> {
    let mut rows = Vec::new();
    for org in &view.orgs {
        for space in &org.spaces {
            for si in &space.service_instances {
                rows.push(InstanceRow {
                    org: org.name.clone(),
                    space: space.name.clone(),
                    name: si.name.clone(),
                    instance_type: si.instance_type.clone(),
                    service: si.service.clone(),
                    plan: si.plan.clone(),
                    app_count: si.bound_apps.len(),
                    bound_apps: si.bound_apps.join(" "),
                });
            }
        }
    }
    rows
}

// ── Text ────────────────────────────────────────────────────────────

pub(crate) fn render_text(view: &SummaryView) -> String {
    use std::fmt::Write;
    let mut out = String::new();

    for org in &view.orgs {
        let _ = writeln!(out, "Org {}", org.name);
        for space in &org.spaces {
            let _ = writeln!(out, "\tSpace {}", space.name);
            for si in &space.service_instances {
                let _ = writeln!(
                    out,
                    "\t\tService instance {} of type {} from service {} using service plan {}",
                    si.name, si.instance_type, si.service, si.plan
                );
                let _ = writeln!(
                    out,
                    "\t\tis used by {} applications ({})",
                    si.bound_apps.len(),
                    si.bound_apps.join(" ")
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
    let report = generate_service_summary(source, filter).await?;
    let view = SummaryView::from(&report);
    let out = output::render(format, &view, rows, render_text)?;
    output::print_output(&out, global.quiet);
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use cfusage_core::Guid;

    use super::*;

    fn record(name: &str, space: &str, apps: &[&str]) -> ServiceUsageRecord {
        ServiceUsageRecord {
            service_instance_guid: Guid::from(name),
            service_instance_name: name.into(),
            service_instance_type: "managed_service_instance".into(),
            space_name: space.into(),
            org_name: "acme".into(),
            service_plan_name: "small".into(),
            service_name: "p-mysql".into(),
            app_guids: apps.iter().copied().map(Guid::from).collect(),
        }
    }

    fn report() -> Report {
        let mut report = Report {
            orgs: Vec::new(),
            service_instances: vec![
                record("db", "dev", &["a1", "a2"]),
                record("cache", "prod", &[]),
            ],
        };
        report.rebuild_orgs_from_services();
        report
    }

    #[test]
    fn text_layout() {
        let text = render_text(&SummaryView::from(&report()));
        assert_eq!(
            text,
            "Org acme\n\
             \tSpace dev\n\
             \t\tService instance db of type managed_service_instance from service p-mysql using service plan small\n\
             \t\tis used by 2 applications (a1 a2)\n\
             \tSpace prod\n\
             \t\tService instance cache of type managed_service_instance from service p-mysql using service plan small\n\
             \t\tis used by 0 applications ()\n"
        );
    }

    #[test]
    fn csv_joins_app_guids_with_spaces() {
        let out = output::render_csv(&rows(&SummaryView::from(&report()))).unwrap();
        assert_eq!(
            out,
            "OrgName,SpaceName,ServiceInstanceName,ServiceInstanceType,ServiceName,ServicePlanName,AmountOfBoundApps,BoundApps\n\
             acme,dev,db,managed_service_instance,p-mysql,small,2,a1 a2\n\
             acme,prod,cache,managed_service_instance,p-mysql,small,0,\n"
        );
    }

    #[test]
    fn json_nests_instances_under_spaces() {
        let json = serde_json::to_value(SummaryView::from(&report())).unwrap();
        assert_eq!(json["orgs"][0]["spaces"][0]["service_instances"][0]["type"], "managed_service_instance");
        assert_eq!(json["orgs"][0]["spaces"][1]["name"], "prod");
    }
}
