// ── Report tree ──
//
// Org → Space → App, annotated with binding counts, plus the flat
// service usage list. Derived metrics are computed on demand from the
// stored fields; nothing here is cached.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::guid::Guid;

// ── Binding classification ──────────────────────────────────────────

/// Category of a single bound service instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Classification {
    /// Managed instance whose service label starts with `p-`.
    Platform,
    /// Present in the user-provided collection.
    UserProvided,
    /// Anything else, including GUIDs no collection knows about.
    ThirdParty,
}

/// Binding counts for one app.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingCounts {
    pub total: usize,
    pub platform_managed: usize,
    pub user_provided: usize,
}

impl BindingCounts {
    /// `total - platform_managed - user_provided`. Signed: it goes
    /// negative if a GUID was ever counted in both categories, and is
    /// reported as such rather than clamped.
    pub fn third_party(&self) -> i64 {
        to_i64(self.total) - to_i64(self.platform_managed) - to_i64(self.user_provided)
    }

    pub(crate) fn record(&mut self, class: Classification) {
        self.total += 1;
        match class {
            Classification::Platform => self.platform_managed += 1,
            Classification::UserProvided => self.user_provided += 1,
            Classification::ThirdParty => {}
        }
    }
}

fn to_i64(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

// ── Tree ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct App {
    pub guid: Guid,
    pub name: String,
    pub instances: u32,
    /// Per-instance memory in MB.
    pub ram: u64,
    pub running: bool,
    pub bindings: BindingCounts,
}

impl App {
    /// Memory held by this app right now: `instances × ram` when running.
    pub fn consumed_memory(&self) -> u64 {
        if self.running {
            u64::from(self.instances).saturating_mul(self.ram)
        } else {
            0
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Space {
    pub name: String,
    pub apps: Vec<App>,
}

impl Space {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            apps: Vec::new(),
        }
    }

    /// Memory in MB consumed by running apps.
    pub fn consumed_memory(&self) -> u64 {
        self.apps.iter().map(App::consumed_memory).sum()
    }

    pub fn apps_count(&self) -> usize {
        self.apps.len()
    }

    pub fn running_apps_count(&self) -> usize {
        self.apps.iter().filter(|a| a.running).count()
    }

    pub fn stopped_apps_count(&self) -> usize {
        self.apps_count() - self.running_apps_count()
    }

    pub fn instances_count(&self) -> u64 {
        self.apps.iter().map(|a| u64::from(a.instances)).sum()
    }

    pub fn running_instances_count(&self) -> u64 {
        self.apps
            .iter()
            .filter(|a| a.running)
            .map(|a| u64::from(a.instances))
            .sum()
    }

    pub fn stopped_instances_count(&self) -> u64 {
        self.instances_count() - self.running_instances_count()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Org {
    pub name: String,
    /// Org memory quota in MB. `-1` means unlimited on some foundations.
    pub memory_quota: i64,
    /// Memory reported in use by the Cloud Controller, in MB.
    pub memory_usage: i64,
    pub spaces: Vec<Space>,
}

impl Org {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn apps_count(&self) -> usize {
        self.spaces.iter().map(Space::apps_count).sum()
    }

    pub fn instances_count(&self) -> u64 {
        self.spaces.iter().map(Space::instances_count).sum()
    }

    /// Share of the org quota a space consumes, as a whole percentage
    /// (truncated). `0` when the org has no positive quota.
    pub fn space_quota_percent(&self, space: &Space) -> i64 {
        if self.memory_quota <= 0 {
            return 0;
        }
        let consumed = i64::try_from(space.consumed_memory()).unwrap_or(i64::MAX);
        consumed.saturating_mul(100) / self.memory_quota
    }
}

// ── Service usage ───────────────────────────────────────────────────

/// One service instance with its resolved names and consuming apps.
///
/// Names that could not be resolved through the cache are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceUsageRecord {
    pub service_instance_guid: Guid,
    pub service_instance_name: String,
    pub service_instance_type: String,
    pub space_name: String,
    pub org_name: String,
    pub service_plan_name: String,
    /// Label of the marketplace service.
    pub service_name: String,
    /// Apps bound to this instance, in binding-list order.
    pub app_guids: Vec<Guid>,
}

// ── Report ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub orgs: Vec<Org>,
    pub service_instances: Vec<ServiceUsageRecord>,
}

impl Report {
    pub fn total_apps(&self) -> usize {
        self.orgs.iter().map(Org::apps_count).sum()
    }

    pub fn total_instances(&self) -> u64 {
        self.orgs.iter().map(Org::instances_count).sum()
    }

    /// Usage records belonging to the named org and space.
    pub fn services_in<'a>(
        &'a self,
        org: &'a str,
        space: &'a str,
    ) -> impl Iterator<Item = &'a ServiceUsageRecord> + 'a {
        self.service_instances
            .iter()
            .filter(move |s| s.org_name == org && s.space_name == space)
    }

    /// Replace `orgs` with the name-only skeleton derived from
    /// `service_instances`. Quotas, usage and apps are dropped.
    pub fn rebuild_orgs_from_services(&mut self) {
        self.orgs = crate::overview::rebuild_hierarchy(&self.service_instances);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn app(instances: u32, ram: u64, running: bool) -> App {
        App {
            guid: Guid::from("a"),
            name: "app".into(),
            instances,
            ram,
            running,
            bindings: BindingCounts::default(),
        }
    }

    #[test]
    fn single_running_app_consumes_its_memory() {
        let space = Space {
            name: "dev".into(),
            apps: vec![app(1, 1024, true)],
        };
        assert_eq!(space.running_apps_count(), 1);
        assert_eq!(space.running_instances_count(), 1);
        assert_eq!(space.consumed_memory(), 1024);
    }

    #[test]
    fn stopped_apps_hold_no_memory() {
        let space = Space {
            name: "dev".into(),
            apps: vec![app(3, 512, false), app(2, 256, true)],
        };
        assert_eq!(space.consumed_memory(), 512);
        assert_eq!(space.instances_count(), 5);
        assert_eq!(space.running_instances_count(), 2);
        assert_eq!(space.stopped_instances_count(), 3);
        assert_eq!(space.stopped_apps_count(), 1);
    }

    #[test]
    fn quota_percent_truncates_and_guards_zero() {
        let space = Space {
            name: "dev".into(),
            apps: vec![app(1, 1000, true)],
        };
        let mut org = Org {
            name: "o".into(),
            memory_quota: 3000,
            memory_usage: 1000,
            spaces: vec![space.clone()],
        };
        assert_eq!(org.space_quota_percent(&space), 33);

        org.memory_quota = 0;
        assert_eq!(org.space_quota_percent(&space), 0);
        org.memory_quota = -1;
        assert_eq!(org.space_quota_percent(&space), 0);
    }

    #[test]
    fn third_party_may_go_negative() {
        let counts = BindingCounts {
            total: 1,
            platform_managed: 1,
            user_provided: 1,
        };
        assert_eq!(counts.third_party(), -1);
    }

    #[test]
    fn report_totals_span_orgs() {
        let report = Report {
            orgs: vec![
                Org {
                    spaces: vec![Space {
                        name: "a".into(),
                        apps: vec![app(2, 128, true), app(1, 128, false)],
                    }],
                    ..Org::named("one")
                },
                Org {
                    spaces: vec![Space {
                        name: "b".into(),
                        apps: vec![app(4, 64, true)],
                    }],
                    ..Org::named("two")
                },
            ],
            service_instances: Vec::new(),
        };
        assert_eq!(report.total_apps(), 3);
        assert_eq!(report.total_instances(), 7);
    }

    #[test]
    fn services_in_matches_both_names() {
        let record = |org: &str, space: &str, name: &str| ServiceUsageRecord {
            service_instance_name: name.into(),
            org_name: org.into(),
            space_name: space.into(),
            ..ServiceUsageRecord::default()
        };
        let report = Report {
            orgs: Vec::new(),
            service_instances: vec![
                record("o1", "dev", "db"),
                record("o2", "dev", "cache"),
                record("o1", "prod", "queue"),
            ],
        };
        let names: Vec<&str> = report
            .services_in("o1", "dev")
            .map(|s| s.service_instance_name.as_str())
            .collect();
        assert_eq!(names, vec!["db"]);
    }

    #[test]
    fn classification_display() {
        assert_eq!(Classification::Platform.to_string(), "platform");
        assert_eq!(Classification::UserProvided.to_string(), "user-provided");
        assert_eq!(
            "third-party".parse::<Classification>().unwrap(),
            Classification::ThirdParty
        );
    }
}
