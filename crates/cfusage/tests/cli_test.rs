//! Integration tests for the `cfusage` CLI binary.
//!
//! Argument parsing, completions and error exits run without any network.
//! The end-to-end cases serve the Cloud Controller v2 API from wiremock.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

const NOWHERE: &str = "/tmp/cfusage-cli-test-nonexistent";

/// Build a [`Command`] for the `cfusage` binary with env isolation.
///
/// Clears all `CFUSAGE_*` env vars and points config directories (including
/// the CF CLI's `CF_HOME`) at a nonexistent path so tests never touch the
/// user's real configuration or login.
fn cfusage_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("cfusage");
    cmd.env("HOME", NOWHERE)
        .env("XDG_CONFIG_HOME", NOWHERE)
        .env("CF_HOME", NOWHERE)
        .env_remove("RUST_LOG")
        .env_remove("CFUSAGE_PROFILE")
        .env_remove("CFUSAGE_API")
        .env_remove("CFUSAGE_TOKEN")
        .env_remove("CFUSAGE_OUTPUT")
        .env_remove("CFUSAGE_INSECURE")
        .env_remove("CFUSAGE_TIMEOUT");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = cfusage_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    cfusage_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("Cloud Foundry")
            .and(predicate::str::contains("report"))
            .and(predicate::str::contains("services"))
            .and(predicate::str::contains("summary")),
    );
}

#[test]
fn test_version_flag() {
    cfusage_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("cfusage"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    cfusage_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    cfusage_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let output = cfusage_cmd().arg("foobar").output().unwrap();
    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(
        text.contains("unrecognized") || text.contains("foobar"),
        "Expected error mentioning invalid subcommand:\n{text}"
    );
}

#[test]
fn test_invalid_output_format() {
    cfusage_cmd()
        .args(["-o", "xml", "report"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("xml"));
}

#[test]
fn test_report_without_endpoint() {
    cfusage_cmd()
        .arg("report")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No Cloud Controller endpoint configured"));
}

#[test]
fn test_report_without_token() {
    cfusage_cmd()
        .args(["--api", "https://api.sys.example.com", "report"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("No token configured"));
}

#[test]
fn test_unknown_profile() {
    cfusage_cmd()
        .args(["--profile", "ghost", "summary"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Profile 'ghost' not found"));
}

#[test]
fn test_config_show_without_file() {
    cfusage_cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No profiles configured."));
}

#[cfg(target_os = "linux")]
#[test]
fn test_config_show_redacts_profile_token() {
    let dir = tempfile::tempdir().unwrap();
    let cfg_dir = dir.path().join("cfusage");
    std::fs::create_dir_all(&cfg_dir).unwrap();
    std::fs::write(
        cfg_dir.join("config.toml"),
        "default_profile = \"prod\"\n\n\
         [profiles.prod]\n\
         api = \"https://api.sys.example.com\"\n\
         token = \"super-secret\"\n",
    )
    .unwrap();

    let output = cfusage_cmd()
        .env("XDG_CONFIG_HOME", dir.path())
        .args(["config", "show"])
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", combined_output(&output));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Default profile: prod"), "{stdout}");
    assert!(stdout.contains("https://api.sys.example.com"));
    assert!(!stdout.contains("super-secret"));
}

// ── End-to-end against a mocked Cloud Controller ────────────────────

fn page(resources: Value) -> Value {
    let count = resources.as_array().map_or(0, Vec::len);
    json!({
        "total_results": count,
        "total_pages": 1,
        "prev_url": null,
        "next_url": null,
        "resources": resources,
    })
}

fn resource(guid: &str, url: &str, entity: Value) -> Value {
    json!({ "metadata": { "guid": guid, "url": url }, "entity": entity })
}

async fn mount_json(server: &MockServer, at: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// One org `acme` with space `dev` running app `web`, bound to a
/// platform-managed MySQL instance.
async fn foundation() -> MockServer {
    let server = MockServer::start().await;

    mount_json(
        &server,
        "/v2/service_instances",
        page(json!([resource(
            "si-1",
            "/v2/service_instances/si-1",
            json!({
                "name": "db",
                "type": "managed_service_instance",
                "service_plan_guid": "plan-1",
                "space_guid": "sp-1"
            })
        )])),
    )
    .await;
    mount_json(
        &server,
        "/v2/service_plans",
        page(json!([resource(
            "plan-1",
            "/v2/service_plans/plan-1",
            json!({ "name": "small", "service_guid": "svc-1" })
        )])),
    )
    .await;
    mount_json(
        &server,
        "/v2/services",
        page(json!([resource(
            "svc-1",
            "/v2/services/svc-1",
            json!({ "label": "p-mysql" })
        )])),
    )
    .await;
    mount_json(&server, "/v2/user_provided_service_instances", page(json!([]))).await;
    mount_json(
        &server,
        "/v2/spaces",
        page(json!([resource(
            "sp-1",
            "/v2/spaces/sp-1",
            json!({
                "name": "dev",
                "organization_guid": "o-1",
                "apps_url": "/v2/spaces/sp-1/apps"
            })
        )])),
    )
    .await;
    mount_json(
        &server,
        "/v2/organizations",
        page(json!([resource(
            "o-1",
            "/v2/organizations/o-1",
            json!({
                "name": "acme",
                "quota_definition_url": "/v2/quota_definitions/q-1",
                "spaces_url": "/v2/organizations/o-1/spaces"
            })
        )])),
    )
    .await;
    mount_json(
        &server,
        "/v2/service_bindings",
        page(json!([resource(
            "b-1",
            "/v2/service_bindings/b-1",
            json!({ "app_guid": "app-1", "service_instance_guid": "si-1" })
        )])),
    )
    .await;

    mount_json(
        &server,
        "/v2/organizations/o-1/memory_usage",
        json!({ "memory_usage_in_mb": 1024 }),
    )
    .await;
    mount_json(
        &server,
        "/v2/quota_definitions/q-1",
        resource(
            "q-1",
            "/v2/quota_definitions/q-1",
            json!({ "name": "default", "memory_limit": 10240 }),
        ),
    )
    .await;
    mount_json(
        &server,
        "/v2/organizations/o-1/spaces",
        page(json!([resource(
            "sp-1",
            "/v2/spaces/sp-1",
            json!({
                "name": "dev",
                "organization_guid": "o-1",
                "apps_url": "/v2/spaces/sp-1/apps"
            })
        )])),
    )
    .await;
    mount_json(
        &server,
        "/v2/spaces/sp-1/apps",
        page(json!([resource(
            "app-1",
            "/v2/apps/app-1",
            json!({ "name": "web", "instances": 1, "memory": 1024, "state": "STARTED" })
        )])),
    )
    .await;

    server
}

/// Run the binary off the async runtime so wiremock keeps serving.
async fn run_against(server: &MockServer, args: &[&str]) -> std::process::Output {
    let mut argv = vec![
        "--api".to_owned(),
        server.uri(),
        "--token".to_owned(),
        "test-token".to_owned(),
    ];
    argv.extend(args.iter().map(|a| (*a).to_owned()));

    tokio::task::spawn_blocking(move || cfusage_cmd().args(argv).output().unwrap())
        .await
        .unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_report_csv_end_to_end() {
    let server = foundation().await;
    let output = run_against(&server, &["report", "-o", "csv"]).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(
        stdout,
        "OrgName,SpaceName,SpaceMemoryUsed,OrgMemoryQuota,AppsDeployed,AppsRunning,AppInstancesDeployed,AppInstancesRunning\n\
         acme,dev,1024,10240,1,1,1,1\n"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_report_text_end_to_end() {
    let server = foundation().await;
    let output = run_against(&server, &["report"]).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Org acme is consuming 1024 MB of 10240 MB."));
    assert!(stdout.contains("Space dev is consuming 1024 MB memory (10%) of org quota."));
    assert!(stdout.contains("You are running 1 apps in 1 org(s), with a total of 1 instances."));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_services_csv_end_to_end() {
    let server = foundation().await;
    let output = run_against(&server, &["services", "-o", "csv"]).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.ends_with("acme,dev,web,1,1,1,0,0\n"), "{stdout}");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_summary_csv_end_to_end() {
    let server = foundation().await;
    let output = run_against(&server, &["summary", "-o", "csv"]).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(
        stdout.ends_with("acme,dev,db,managed_service_instance,p-mysql,small,1,app-1\n"),
        "{stdout}"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_summary_unknown_org_exits_not_found() {
    let server = foundation().await;
    let output = run_against(&server, &["summary", "--org", "ghost"]).await;

    assert_eq!(output.status.code(), Some(4), "{}", combined_output(&output));
    assert!(combined_output(&output).contains("org 'ghost' not found"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_report_json_has_metrics() {
    let server = foundation().await;
    let output = run_against(&server, &["report", "-o", "json"]).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["total_apps"], 1);
    assert_eq!(json["orgs"][0]["spaces"][0]["quota_percent"], 10);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_rejected_token_exits_with_auth_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/service_instances"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "code": 1000,
            "description": "Invalid Auth Token",
            "error_code": "CF-InvalidAuthToken"
        })))
        .mount(&server)
        .await;

    let output = run_against(&server, &["report"]).await;
    assert_eq!(output.status.code(), Some(3), "{}", combined_output(&output));
    assert!(combined_output(&output).contains("Invalid Auth Token"));
}
