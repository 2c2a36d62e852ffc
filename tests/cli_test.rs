// tests/cli_test.rs
mod common;

use std::process::Command;

use common::{git_ref_body, StubApi};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

fn action() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_git-tag-action"));
    for var in [
        "INPUT_TAG",
        "INPUT_TOKEN",
        "INPUT_REPOSITORY",
        "INPUT_MESSAGE",
        "INPUT_SHA",
        "INPUT_DELETE",
        "INPUT_REPLACE_TAG",
        "GITHUB_REPOSITORY",
        "GITHUB_OUTPUT",
        "GITHUB_API_URL",
        "HTTP_PROXY",
        "http_proxy",
        "HTTPS_PROXY",
        "https_proxy",
        "ALL_PROXY",
        "all_proxy",
    ] {
        command.env_remove(var);
    }
    command
}

#[test]
fn test_help() {
    let output = action().arg("--help").output().expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("git-tag-action"));
    assert!(stdout.contains("--replace-tag"));
}

#[test]
fn test_malformed_repository_reports_error_and_fails() {
    let output = action()
        .env("INPUT_TAG", "v1.0.0")
        .env("INPUT_TOKEN", "secret")
        .env("INPUT_SHA", "abc123")
        .env("INPUT_REPOSITORY", "not-a-repository")
        .env("GITHUB_API_URL", "http://127.0.0.1:9")
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("::group::Prepare"));
    assert!(stdout.contains("::error::Configuration error: Repository should be provided"));
}

#[test]
fn test_invalid_boolean_is_rejected() {
    let output = action()
        .env("INPUT_TAG", "v1.0.0")
        .env("INPUT_TOKEN", "secret")
        .env("INPUT_SHA", "abc123")
        .env("INPUT_DELETE", "yes")
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8(output.stdout).unwrap();
    let error_line = stdout
        .lines()
        .find(|l| l.starts_with("::error::"))
        .expect("error annotation");
    assert!(error_line.contains("YAML 1.2"));
    assert!(!error_line.contains('\n'));
}

#[test]
fn test_missing_sha_is_reported_as_error_annotation() {
    let output = action()
        .env("INPUT_TAG", "v1.0.0")
        .env("INPUT_TOKEN", "secret")
        .env("INPUT_REPOSITORY", "octocat/hello-world")
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("::error::"));
    assert!(stdout.contains("--sha"));
}

#[test]
fn test_creates_tag_and_reports_notice() {
    let api = StubApi::start();
    api.mount(
        Mock::given(method("GET"))
            .and(path("/repos/octocat/hello-world/git/ref/tags/v1.0.0"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not Found"}))),
    );
    api.mount(
        Mock::given(method("POST"))
            .and(path("/repos/octocat/hello-world/git/refs"))
            .respond_with(ResponseTemplate::new(201).set_body_json(git_ref_body("v1.0.0", "abc123"))),
    );
    let outputs = tempfile::NamedTempFile::new().unwrap();

    let output = action()
        .env("INPUT_TAG", "v1.0.0")
        .env("INPUT_TOKEN", "secret")
        .env("INPUT_SHA", "abc123")
        .env("INPUT_REPOSITORY", "octocat/hello-world")
        .env("INPUT_DELETE", "false")
        .env("GITHUB_API_URL", api.uri())
        .env("GITHUB_OUTPUT", outputs.path())
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(output.status.success(), "run failed:\n{}", stdout);
    assert!(stdout.contains("Didn't find tag v1.0.0"));
    assert!(stdout.contains("::group::Create tag"));
    assert!(stdout.contains("::notice::Created v1.0.0 at abc123"));
    assert_eq!(
        stdout.matches("::group::").count(),
        stdout.matches("::endgroup::").count()
    );

    assert_eq!(
        api.request_lines(),
        vec![
            "GET /repos/octocat/hello-world/git/ref/tags/v1.0.0",
            "POST /repos/octocat/hello-world/git/refs",
        ]
    );
    let requests = api.requests();
    let body: serde_json::Value = serde_json::from_slice(&requests[1].body).unwrap();
    assert_eq!(body, json!({"ref": "refs/tags/v1.0.0", "sha": "abc123"}));

    let written = std::fs::read_to_string(outputs.path()).unwrap();
    assert!(written.contains("tag<<ghadelimiter\nv1.0.0\nghadelimiter\n"));
    assert!(written.contains("sha<<ghadelimiter\nabc123\nghadelimiter\n"));
}

#[test]
fn test_missing_repository_fails() {
    let output = action()
        .env("INPUT_TAG", "v1.0.0")
        .env("INPUT_TOKEN", "secret")
        .env("INPUT_SHA", "abc123")
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("::error::"));
    assert!(stdout.contains("GITHUB_REPOSITORY"));
}
