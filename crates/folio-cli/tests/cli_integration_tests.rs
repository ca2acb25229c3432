//! CLI integration tests
//!
//! Drive the compiled `folio` binary against a scratch store.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn folio(dir: &TempDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_folio"))
        .current_dir(dir.path())
        .env("FOLIO_LOG_PROFILE", "test")
        .env("FOLIO_STORE_PATH", dir.path().join("store.db"))
        .env("FOLIO_ADMIN_PASSWORD", "coral-tide")
        .env("FOLIO_API_BASE_URL", "http://127.0.0.1:9")
        .args(args)
        .output()
        .expect("Failed to execute CLI")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn assert_ok(output: &Output) {
    assert!(
        output.status.success(),
        "CLI command should succeed. Stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

fn write_json(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, body).unwrap();
    path
}

#[test]
fn test_diff_prints_field_labels() {
    let dir = TempDir::new().unwrap();
    let a = write_json(dir.path(), "a.json", r#"{"items": [1, 2]}"#);
    let b = write_json(dir.path(), "b.json", r#"{"items": [1, 2, 3]}"#);

    let output = folio(&dir, &["diff", a.to_str().unwrap(), b.to_str().unwrap()]);
    assert_ok(&output);
    assert_eq!(stdout(&output), "items (length changed)\nitems[2] (added)\n");
}

#[test]
fn test_diff_summary_line() {
    let dir = TempDir::new().unwrap();
    let a = write_json(dir.path(), "a.json", r#"{"about": {"title": "A"}}"#);
    let b = write_json(dir.path(), "b.json", r#"{"about": {"title": "B"}}"#);

    let output = folio(
        &dir,
        &["diff", "--summary", a.to_str().unwrap(), b.to_str().unwrap()],
    );
    assert_ok(&output);
    assert_eq!(stdout(&output).trim(), "Update About (about.title)");
}

#[test]
fn test_session_status_after_patch() {
    let dir = TempDir::new().unwrap();
    assert_ok(&folio(&dir, &["session", "start"]));
    assert_ok(&folio(
        &dir,
        &["store", "patch", "about", r#"{"title": "Something new"}"#],
    ));

    let output = folio(&dir, &["session", "status"]);
    assert_ok(&output);
    let text = stdout(&output);
    assert!(text.contains("About (about)"));
    assert!(text.contains("  - about.title"));
    assert!(text.contains("Suggested message: Update About (about.title)"));
}

#[test]
fn test_session_status_without_start_fails() {
    let dir = TempDir::new().unwrap();
    let output = folio(&dir, &["session", "status"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).starts_with("Error: No editing session"));
}

#[test]
fn test_font_set_then_resolve() {
    let dir = TempDir::new().unwrap();
    assert_ok(&folio(&dir, &["font", "set", "serif", "about.title"]));

    let output = folio(&dir, &["font", "resolve", "about.title"]);
    assert_ok(&output);
    assert_eq!(stdout(&output).trim(), "'Georgia', 'Times New Roman', serif");

    let fallback = folio(&dir, &["font", "resolve", "about.eyebrow", "--fallback", "sans"]);
    assert_ok(&fallback);
    assert_ne!(stdout(&fallback).trim(), "'Georgia', 'Times New Roman', serif");
}

#[test]
fn test_font_set_rejects_unknown_font() {
    let dir = TempDir::new().unwrap();
    let output = folio(&dir, &["font", "set", "comic", "about.title"]);
    assert!(!output.status.success());
}

#[test]
fn test_store_add_and_remove_collection() {
    let dir = TempDir::new().unwrap();
    let output = folio(
        &dir,
        &["store", "add", "collections", "--json", r#"{"title": "Night"}"#],
    );
    assert_ok(&output);
    let id = stdout(&output).trim().to_string();
    assert!(id.starts_with("collection-"));

    let title = folio(&dir, &["store", "get", &format!("collections.{id}.title")]);
    assert_ok(&title);
    assert_eq!(stdout(&title).trim(), "\"Night\"");

    assert_ok(&folio(&dir, &["store", "remove", "collections", &id]));
    let gone = folio(&dir, &["store", "get", &format!("collections.{id}")]);
    assert!(!gone.status.success());
}

#[test]
fn test_import_rejects_missing_section() {
    let dir = TempDir::new().unwrap();
    let file = write_json(dir.path(), "bad.json", r#"{"home": {}}"#);

    let output = folio(&dir, &["store", "import", file.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Missing top-level key"));
}

#[test]
fn test_export_writes_document() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("out.json");

    assert_ok(&folio(&dir, &["store", "export", file.to_str().unwrap()]));
    let text = fs::read_to_string(&file).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert!(value.get("projects").is_some_and(|p| p.is_array()));
}

#[test]
fn test_auth_checks_configured_password() {
    let dir = TempDir::new().unwrap();
    assert_ok(&folio(&dir, &["auth", "--password", "coral-tide"]));

    let wrong = folio(&dir, &["auth", "--password", "nope"]);
    assert!(!wrong.status.success());
    assert!(String::from_utf8_lossy(&wrong.stderr)
        .contains("Incorrect password. Please try again."));
}

#[test]
fn test_sync_commit_requires_message() {
    let dir = TempDir::new().unwrap();
    assert_ok(&folio(&dir, &["session", "start"]));

    let output = folio(&dir, &["sync", "commit", "--branch", "main"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr)
        .contains("Both a branch name and commit message are required"));
}

#[test]
fn test_unreachable_backend_is_logged_as_failed_attempt() {
    let dir = TempDir::new().unwrap();
    assert_ok(&folio(&dir, &["session", "start"]));
    assert_ok(&folio(
        &dir,
        &["store", "patch", "about", r#"{"title": "Offline edit"}"#],
    ));

    let commit = folio(&dir, &["sync", "commit", "--branch", "main"]);
    assert!(!commit.status.success());

    let history = folio(&dir, &["sync", "history"]);
    assert_ok(&history);
    let rows: Vec<String> = stdout(&history).lines().map(str::to_string).collect();
    assert_eq!(rows.len(), 1);
    assert!(rows[0].contains(" failed "));
    assert!(rows[0].contains("main \"Update About (about.title)\""));
}

#[test]
fn test_config_file_sets_store_path() {
    let dir = TempDir::new().unwrap();
    let config = write_json(dir.path(), "folio.toml", "store_path = \"custom/content.db\"\n");

    let output = Command::new(env!("CARGO_BIN_EXE_folio"))
        .current_dir(dir.path())
        .env("FOLIO_LOG_PROFILE", "test")
        .env_remove("FOLIO_STORE_PATH")
        .args(["--config", config.to_str().unwrap(), "store", "reset"])
        .output()
        .unwrap();
    assert_ok(&output);
    assert!(dir.path().join("custom/content.db").exists());
}
