use assert_cmd::cargo::cargo_bin_cmd;
use jig_test_utils::ConfigFileGuard;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn jig() -> assert_cmd::Command {
  let mut cmd = cargo_bin_cmd!("jig");
  cmd
    .env("NO_COLOR", "1")
    .env_remove("JIG_CONFIG")
    .env_remove("JIRA_URL")
    .env_remove("JIRA_USER")
    .env_remove("JIRA_API_TOKEN");
  cmd
}

#[test]
fn test_help_lists_commands() {
  jig()
    .arg("--help")
    .assert()
    .success()
    .stdout(predicate::str::contains("story"))
    .stdout(predicate::str::contains("epic"))
    .stdout(predicate::str::contains("sprint"))
    .stdout(predicate::str::contains("board"))
    .stdout(predicate::str::contains("project"));
}

#[test]
fn test_missing_config_exits_with_failure() {
  let dir = tempfile::tempdir().unwrap();
  let missing = dir.path().join("nope.json");

  jig()
    .args(["story", "show", "PROJ-1", "--config"])
    .arg(&missing)
    .assert()
    .code(1)
    .stderr(predicate::str::contains("jig config init"));
}

#[test]
fn test_invalid_issue_key_is_rejected_before_any_request() {
  let guard = ConfigFileGuard::new("http://127.0.0.1:9").unwrap();

  jig()
    .args(["story", "show", "not a key", "--config"])
    .arg(guard.path())
    .assert()
    .code(1);
}

#[test]
fn test_config_init_writes_file() {
  let dir = tempfile::tempdir().unwrap();
  let config_path = dir.path().join("jig").join("config.json");

  jig()
    .args([
      "config",
      "init",
      "--url",
      "example.atlassian.net/",
      "--user",
      "me@example.com",
      "--token",
      "secret-token-1234",
      "--config",
    ])
    .arg(&config_path)
    .assert()
    .success();

  let saved: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&config_path).unwrap()).unwrap();
  assert_eq!(saved["jira_url"], "https://example.atlassian.net");
  assert_eq!(saved["user"], "me@example.com");

  // A second init without --force refuses to overwrite
  jig()
    .args(["config", "init", "--url", "x.net", "--user", "a", "--token", "b", "--config"])
    .arg(&config_path)
    .assert()
    .code(1)
    .stderr(predicate::str::contains("--force"));

  jig()
    .args(["config", "show", "--config"])
    .arg(&config_path)
    .assert()
    .success()
    .stdout(predicate::str::contains("1234"))
    .stdout(predicate::str::contains("secret").not());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_story_status_moves_every_key_in_range() {
  let mock_server = MockServer::start().await;
  let guard = ConfigFileGuard::new(&mock_server.uri()).unwrap();

  let transitions = json!({
    "transitions": [
      { "id": "11", "name": "Start", "to": { "id": "3", "name": "In Progress" } },
      { "id": "31", "name": "Finish", "to": { "id": "5", "name": "Done" } }
    ]
  });

  for key in ["PROJ-1", "PROJ-2"] {
    let transitions_path = format!("/rest/api/2/issue/{key}/transitions");
    Mock::given(method("GET"))
      .and(path(transitions_path.as_str()))
      .respond_with(ResponseTemplate::new(200).set_body_json(&transitions))
      .mount(&mock_server)
      .await;
    Mock::given(method("POST"))
      .and(path(transitions_path.as_str()))
      .and(body_json(json!({ "transition": { "id": "31" } })))
      .respond_with(ResponseTemplate::new(204))
      .expect(1)
      .mount(&mock_server)
      .await;
  }

  jig()
    .args(["story", "status", "proj-1..proj-2", "--to", "Done", "--config"])
    .arg(guard.path())
    .assert()
    .success()
    .stdout(predicate::str::contains("PROJ-1"))
    .stdout(predicate::str::contains("PROJ-2"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_story_status_unknown_target_fails_without_posting() {
  let mock_server = MockServer::start().await;
  let guard = ConfigFileGuard::new(&mock_server.uri()).unwrap();

  Mock::given(method("GET"))
    .and(path("/rest/api/2/issue/PROJ-7/transitions"))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({
      "transitions": [{ "id": "11", "name": "Start", "to": { "name": "In Progress" } }]
    })))
    .mount(&mock_server)
    .await;
  Mock::given(method("POST"))
    .and(path("/rest/api/2/issue/PROJ-7/transitions"))
    .respond_with(ResponseTemplate::new(204))
    .expect(0)
    .mount(&mock_server)
    .await;

  jig()
    .args(["story", "status", "PROJ-7", "--to", "Done", "--config"])
    .arg(guard.path())
    .assert()
    .code(1)
    .stderr(predicate::str::contains("In Progress"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_project_list_renders_table() {
  let mock_server = MockServer::start().await;
  let guard = ConfigFileGuard::new(&mock_server.uri()).unwrap();

  Mock::given(method("GET"))
    .and(path("/rest/api/2/project"))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!([
      {
        "id": "10000",
        "key": "PROJ",
        "name": "Demo Project",
        "projectTypeKey": "software",
        "lead": { "accountId": "abc", "displayName": "Ada Lovelace", "active": true }
      }
    ])))
    .mount(&mock_server)
    .await;

  jig()
    .args(["project", "list", "--config"])
    .arg(guard.path())
    .assert()
    .success()
    .stdout(predicate::str::contains("Demo Project"))
    .stdout(predicate::str::contains("Ada Lovelace"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unauthorized_maps_to_failure() {
  let mock_server = MockServer::start().await;
  let guard = ConfigFileGuard::new(&mock_server.uri()).unwrap();

  Mock::given(method("GET"))
    .and(path("/rest/api/2/myself"))
    .respond_with(ResponseTemplate::new(401))
    .mount(&mock_server)
    .await;

  jig()
    .args(["config", "check", "--config"])
    .arg(guard.path())
    .assert()
    .code(1)
    .stderr(predicate::str::contains("Authentication failed"))
    .stderr(predicate::str::contains("Jira API error"));
}

#[test]
fn test_story_import_dry_run_sends_nothing() {
  // Nothing listens on the discard port, so any request would fail the command
  let guard = ConfigFileGuard::new("http://127.0.0.1:9").unwrap();
  let csv_path = guard.dir().join("stories.csv");
  std::fs::write(
    &csv_path,
    "Summary,Issue_Type,Assignee,Labels\n\
     Write release notes,Task,alice@example.com,docs;release\n\
     ,Story,,\n\
     Fix login redirect,,,\n",
  )
  .unwrap();

  jig()
    .args(["story", "import"])
    .arg(&csv_path)
    .args(["--project", "proj", "--dry-run", "--config"])
    .arg(guard.path())
    .assert()
    .success()
    .stdout(predicate::str::contains("Would create 2 issue(s)"))
    .stdout(predicate::str::contains("Write release notes"))
    .stdout(predicate::str::contains("Fix login redirect"))
    .stdout(predicate::str::contains("alice@example.com"))
    .stdout(predicate::str::contains("Row 2 skipped"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_story_create_reports_key_when_assignee_lookup_fails() {
  let mock_server = MockServer::start().await;
  let guard = ConfigFileGuard::new(&mock_server.uri()).unwrap();

  Mock::given(method("POST"))
    .and(path("/rest/api/2/issue"))
    .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": "10005", "key": "PROJ-5" })))
    .expect(1)
    .mount(&mock_server)
    .await;
  Mock::given(method("GET"))
    .and(path("/rest/api/2/user/search"))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
    .mount(&mock_server)
    .await;
  Mock::given(method("PUT"))
    .and(path("/rest/api/2/issue/PROJ-5/assignee"))
    .respond_with(ResponseTemplate::new(204))
    .expect(0)
    .mount(&mock_server)
    .await;

  jig()
    .args([
      "story",
      "create",
      "--project",
      "PROJ",
      "--summary",
      "Ship it",
      "--assignee",
      "ghost@example.com",
      "--config",
    ])
    .arg(guard.path())
    .assert()
    .code(1)
    .stderr(predicate::str::contains("PROJ-5 was created but could not be assigned"));
}
