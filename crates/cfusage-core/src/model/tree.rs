// ── Raw org tree ──
//
// What the tree fetch produces before classification: quotas and app
// shapes straight from the Cloud Controller, no binding data yet.

use serde::{Deserialize, Serialize};

use super::guid::Guid;

/// Handle on an organization as listed, enough to walk into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrgRef {
    pub guid: Guid,
    pub name: String,
    /// The org's own resource URL (`/v2/organizations/{guid}`).
    pub url: String,
    pub quota_url: String,
    pub spaces_url: String,
}

/// Handle on a space as listed under an org.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpaceRef {
    pub guid: Guid,
    pub name: String,
    pub apps_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawOrg {
    pub name: String,
    pub memory_quota: i64,
    pub memory_usage: i64,
    pub spaces: Vec<RawSpace>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSpace {
    pub name: String,
    pub apps: Vec<RawApp>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawApp {
    pub guid: Guid,
    pub name: String,
    pub instances: u32,
    /// Per-instance memory in MB.
    pub ram: u64,
    pub running: bool,
}
