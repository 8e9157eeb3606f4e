// ── Hierarchy aggregation ──
//
// Turns the raw org tree into report orgs, annotating every app with
// its binding counts from the reference cache. Upstream order is kept.

use crate::cache::ReferenceCache;
use crate::classify::classify;
use crate::model::{App, Org, RawApp, RawOrg, RawSpace, Space};

pub fn aggregate_orgs(cache: &ReferenceCache, raw_orgs: Vec<RawOrg>) -> Vec<Org> {
    raw_orgs
        .into_iter()
        .map(|org| Org {
            name: org.name,
            memory_quota: org.memory_quota,
            memory_usage: org.memory_usage,
            spaces: org
                .spaces
                .into_iter()
                .map(|space| aggregate_space(cache, space))
                .collect(),
        })
        .collect()
}

fn aggregate_space(cache: &ReferenceCache, space: RawSpace) -> Space {
    Space {
        name: space.name,
        apps: space
            .apps
            .into_iter()
            .map(|app| aggregate_app(cache, app))
            .collect(),
    }
}

fn aggregate_app(cache: &ReferenceCache, app: RawApp) -> App {
    let bindings = classify(cache, app.guid.as_str());
    App {
        guid: app.guid,
        name: app.name,
        instances: app.instances,
        ram: app.ram,
        running: app.running,
        bindings,
    }
}
