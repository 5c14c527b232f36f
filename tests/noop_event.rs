use std::path::Path;
use std::process::Command;

/// Command with a clean slate for every variable the binary reads.
fn diffset_cmd() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_diffset"));
    for var in [
        "INPUT_TOKEN",
        "INPUT_PATH",
        "INPUT_PRETTY",
        "INPUT_DEBUG",
        "GITHUB_EVENT_NAME",
        "GITHUB_EVENT_PATH",
        "GITHUB_REPOSITORY",
        "GITHUB_OUTPUT",
        "GITHUB_API_URL",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

fn write_payload(dir: &Path, contents: &str) -> std::path::PathBuf {
    let path = dir.join("event.json");
    std::fs::write(&path, contents).unwrap();
    path
}

const EMPTY_JSON: &str = r#"{"all":[],"added":[],"modified":[],"removed":[],"renamed":[]}"#;

#[test]
fn unrecognized_event_publishes_empty_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let payload = write_payload(dir.path(), "{}");
    let github_output = dir.path().join("github_output");

    let output = diffset_cmd()
        .env("INPUT_TOKEN", "testtoken")
        .env("GITHUB_EVENT_NAME", "workflow_dispatch")
        .env("GITHUB_EVENT_PATH", &payload)
        .env("GITHUB_REPOSITORY", "org1/widgets")
        .env("GITHUB_OUTPUT", &github_output)
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "diffset failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let outputs = std::fs::read_to_string(&github_output).unwrap();
    assert!(outputs.contains(&format!("json={EMPTY_JSON}\n")));
    assert!(outputs.contains("all=[]\n"));
    assert!(outputs.contains("added=[]\n"));
    assert!(outputs.contains("modified=[]\n"));
    assert!(outputs.contains("removed=[]\n"));
    assert!(outputs.contains("renamed=[]\n"));
    assert!(outputs.contains("all-count=0\n"));
    assert!(outputs.contains("added-count=0\n"));
    assert!(outputs.contains("modified-count=0\n"));
    assert!(outputs.contains("removed-count=0\n"));
    assert!(outputs.contains("renamed-count=0\n"));
}

#[test]
fn push_event_without_shas_is_a_noop() {
    let dir = tempfile::tempdir().unwrap();
    let payload = write_payload(dir.path(), r#"{"ref": "refs/heads/main"}"#);
    let github_output = dir.path().join("github_output");

    let output = diffset_cmd()
        .env("INPUT_TOKEN", "testtoken")
        .env("GITHUB_EVENT_NAME", "push")
        .env("GITHUB_EVENT_PATH", &payload)
        .env("GITHUB_REPOSITORY", "org1/widgets")
        .env("GITHUB_OUTPUT", &github_output)
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "diffset failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let outputs = std::fs::read_to_string(&github_output).unwrap();
    assert!(outputs.contains("all-count=0\n"));
}

#[test]
fn pull_request_event_without_payload_fields_is_a_noop() {
    let dir = tempfile::tempdir().unwrap();
    let payload = write_payload(dir.path(), r#"{"action": "opened", "number": 1}"#);
    let github_output = dir.path().join("github_output");

    let output = diffset_cmd()
        .env("INPUT_TOKEN", "testtoken")
        .env("GITHUB_EVENT_NAME", "pull_request")
        .env("GITHUB_EVENT_PATH", &payload)
        .env("GITHUB_REPOSITORY", "org1/widgets")
        .env("GITHUB_OUTPUT", &github_output)
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "diffset failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let outputs = std::fs::read_to_string(&github_output).unwrap();
    assert!(outputs.contains(&format!("json={EMPTY_JSON}\n")));
}

#[test]
fn path_input_writes_the_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let payload = write_payload(dir.path(), "{}");
    let github_output = dir.path().join("github_output");
    let json_path = dir.path().join("nested/out/diff.json");

    let output = diffset_cmd()
        .env("INPUT_TOKEN", "testtoken")
        .env("INPUT_PATH", &json_path)
        .env("GITHUB_EVENT_NAME", "workflow_dispatch")
        .env("GITHUB_EVENT_PATH", &payload)
        .env("GITHUB_REPOSITORY", "org1/widgets")
        .env("GITHUB_OUTPUT", &github_output)
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "diffset failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(std::fs::read_to_string(&json_path).unwrap(), EMPTY_JSON);
}

#[test]
fn pretty_input_indents_json_and_file() {
    let dir = tempfile::tempdir().unwrap();
    let payload = write_payload(dir.path(), "{}");
    let github_output = dir.path().join("github_output");
    let json_path = dir.path().join("diff.json");

    let output = diffset_cmd()
        .env("INPUT_TOKEN", "testtoken")
        .env("INPUT_PATH", &json_path)
        .env("INPUT_PRETTY", "true")
        .env("GITHUB_EVENT_NAME", "workflow_dispatch")
        .env("GITHUB_EVENT_PATH", &payload)
        .env("GITHUB_REPOSITORY", "org1/widgets")
        .env("GITHUB_OUTPUT", &github_output)
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "diffset failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let written = std::fs::read_to_string(&json_path).unwrap();
    assert!(written.starts_with("{\n    \"all\": []"));

    let outputs = std::fs::read_to_string(&github_output).unwrap();
    assert!(outputs.contains("json<<ghadelimiter\n{\n    \"all\": []"));
    // Bucket outputs stay compact regardless of pretty.
    assert!(outputs.contains("all=[]\n"));
}

#[test]
fn legacy_set_output_is_used_without_github_output() {
    let dir = tempfile::tempdir().unwrap();
    let payload = write_payload(dir.path(), "{}");

    let output = diffset_cmd()
        .env("INPUT_TOKEN", "testtoken")
        .env("GITHUB_EVENT_NAME", "workflow_dispatch")
        .env("GITHUB_EVENT_PATH", &payload)
        .env("GITHUB_REPOSITORY", "org1/widgets")
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "diffset failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(&format!("::set-output name=json::{EMPTY_JSON}\n")));
    assert!(stdout.contains("::set-output name=all-count::0\n"));
}

#[test]
fn debug_input_logs_range_resolution() {
    let dir = tempfile::tempdir().unwrap();
    let payload = write_payload(dir.path(), "{}");
    let github_output = dir.path().join("github_output");

    let output = diffset_cmd()
        .env("INPUT_TOKEN", "testtoken")
        .env("INPUT_DEBUG", "true")
        .env("GITHUB_EVENT_NAME", "workflow_dispatch")
        .env("GITHUB_EVENT_PATH", &payload)
        .env("GITHUB_REPOSITORY", "org1/widgets")
        .env("GITHUB_OUTPUT", &github_output)
        .output()
        .unwrap();

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("does not resolve to a comparison range"));
}
