//! CLI integration tests for migrationiq
//!
//! Each test writes a small Django project into a temporary directory and
//! drives the built binary against it.

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Path to the compiled migrationiq binary (resolved at compile time)
fn mq_bin() -> String {
    env!("CARGO_BIN_EXE_migrationiq").to_string()
}

const INITIAL: &str = r#"from django.db import migrations, models

class Migration(migrations.Migration):

    initial = True
    dependencies = []

    operations = [
        migrations.CreateModel(
            name='Order',
            fields=[('id', models.AutoField(primary_key=True))],
        ),
    ]
"#;

const ADD_STATUS: &str = r#"from django.db import migrations, models

class Migration(migrations.Migration):

    dependencies = [
        ('shop', '0001_initial'),
    ]

    operations = [
        migrations.AddField(
            model_name='Order',
            name='status',
            field=models.CharField(max_length=20, null=False),
        ),
    ]
"#;

const ADD_INDEX: &str = r#"from django.db import migrations

class Migration(migrations.Migration):

    dependencies = [
        ('shop', '0001_initial'),
    ]

    operations = [
        migrations.RunSQL('CREATE INDEX order_id_idx ON shop_order (id);'),
    ]
"#;

/// A project whose single app holds `files`
fn project(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    let migrations = dir.path().join("shop").join("migrations");
    std::fs::create_dir_all(&migrations).unwrap();
    std::fs::write(migrations.join("__init__.py"), "").unwrap();
    for (name, content) in files {
        std::fs::write(migrations.join(name), content).unwrap();
    }
    std::fs::write(dir.path().join("manage.py"), "# manage.py").unwrap();
    dir
}

fn run(dir: &Path, args: &[&str]) -> Output {
    Command::new(mq_bin())
        .args(args)
        .arg("--project-dir")
        .arg(dir)
        .output()
        .expect("Failed to run migrationiq")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// ── check ───────────────────────────────────────────────────────────────

#[test]
fn test_check_clean_project() {
    let dir = project(&[("0001_initial.py", INITIAL), ("0002_add_status.py", ADD_STATUS)]);
    let output = run(dir.path(), &["check"]);
    let out = stdout(&output);

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(out.contains("Discovered 2 migration(s)"), "{}", out);
    assert!(out.contains("Heads: shop.0002_add_status"), "{}", out);
    assert!(out.contains("no issues detected"), "{}", out);
}

#[test]
fn test_check_multiple_heads_fails() {
    let dir = project(&[
        ("0001_initial.py", INITIAL),
        ("0002_add_status.py", ADD_STATUS),
        ("0002_add_index.py", ADD_INDEX),
    ]);
    let output = run(dir.path(), &["check"]);
    let out = stdout(&output);

    assert_eq!(output.status.code(), Some(2));
    assert!(out.contains("multiple-heads"), "{}", out);
    assert!(out.contains("CRITICAL"), "{}", out);
}

#[test]
fn test_check_json_output() {
    let dir = project(&[("0001_initial.py", INITIAL), ("0002_add_status.py", ADD_STATUS)]);
    let output = run(dir.path(), &["check", "--output", "json"]);

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["heads"][0], "shop.0002_add_status");
    assert_eq!(json["roots"][0], "shop.0001_initial");
    assert_eq!(json["migrations"].as_array().unwrap().len(), 2);
    assert_eq!(json["graph_issues"].as_array().unwrap().len(), 0);
}

#[test]
fn test_framework_override() {
    let dir = project(&[("0001_initial.py", INITIAL)]);
    let output = run(dir.path(), &["check", "--framework", "alembic"]);
    assert!(stdout(&output).contains("Discovered 0 migration(s)"));
}

// ── lint ────────────────────────────────────────────────────────────────

#[test]
fn test_lint_reports_non_null_field() {
    let dir = project(&[("0001_initial.py", INITIAL), ("0002_add_status.py", ADD_STATUS)]);
    let output = run(dir.path(), &["lint"]);
    let out = stdout(&output);

    assert_eq!(output.status.code(), Some(1));
    assert!(out.contains("0002_add_status.py"), "{}", out);
    assert!(out.contains("Why risky:"), "{}", out);
    assert!(out.contains("Suggested fix:"), "{}", out);
    assert!(out.contains("Total: 1"), "{}", out);
}

#[test]
fn test_lint_clean_project() {
    let dir = project(&[("0001_initial.py", INITIAL), ("0002_add_index.py", ADD_INDEX)]);
    let output = run(dir.path(), &["lint"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("passed lint checks"));
}

#[test]
fn test_lint_respects_config() {
    let dir = project(&[("0001_initial.py", INITIAL), ("0002_add_status.py", ADD_STATUS)]);
    std::fs::write(
        dir.path().join("migrationiq.yaml"),
        "rules:\n  require_two_step_non_null: false\n",
    )
    .unwrap();

    let output = run(dir.path(), &["lint"]);
    assert_eq!(output.status.code(), Some(0), "{}", stdout(&output));
}

#[test]
fn test_lint_json_output() {
    let dir = project(&[("0001_initial.py", INITIAL), ("0002_add_status.py", ADD_STATUS)]);
    let output = run(dir.path(), &["lint", "-o", "json"]);

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let violation = &json["violations"][0];
    assert_eq!(violation["rule_id"], "non-null-without-default");
    assert_eq!(violation["severity"], "error");
}

// ── compare / ready / protect ───────────────────────────────────────────

#[test]
fn test_compare_outside_git_repository() {
    let dir = project(&[("0001_initial.py", INITIAL)]);
    let output = run(dir.path(), &["compare", "--target", "origin/main"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Comparison failed"), "{}", stderr(&output));
}

#[test]
fn test_ready_without_git_still_reports() {
    let dir = project(&[("0001_initial.py", INITIAL), ("0002_add_status.py", ADD_STATUS)]);
    let output = run(dir.path(), &["ready"]);
    let out = stdout(&output);

    assert_eq!(output.status.code(), Some(1));
    assert!(out.contains("Migrations discovered: 2"), "{}", out);
    assert!(out.contains("non_null_without_default"), "{}", out);
    assert!(out.contains("Risk score: 7 (HIGH)"), "{}", out);
}

#[test]
fn test_protect_within_threshold() {
    let dir = project(&[("0001_initial.py", INITIAL), ("0002_add_status.py", ADD_STATUS)]);
    let output = run(dir.path(), &["protect"]);
    let out = stdout(&output);

    assert_eq!(output.status.code(), Some(1));
    assert!(out.contains("PASSED"), "{}", out);
}

#[test]
fn test_protect_threshold_exceeded() {
    let dir = project(&[("0001_initial.py", INITIAL), ("0002_add_status.py", ADD_STATUS)]);
    let output = run(dir.path(), &["protect", "--threshold", "6"]);
    let out = stdout(&output);

    assert_eq!(output.status.code(), Some(2));
    assert!(out.contains("EXCEEDED"), "{}", out);
    assert!(out.contains("Merge blocked"), "{}", out);
}

#[test]
fn test_protect_json_output() {
    let dir = project(&[("0001_initial.py", INITIAL), ("0002_add_status.py", ADD_STATUS)]);
    let output = run(dir.path(), &["protect", "-T", "20", "-o", "json"]);

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["threshold"], 20);
    assert_eq!(json["risk"]["total_score"], 7);
    assert!(json["compare"].is_null());
    assert_eq!(output.status.code(), Some(1));
}

// ── errors ──────────────────────────────────────────────────────────────

#[test]
fn test_missing_project_dir() {
    let dir = TempDir::new().unwrap();
    let output = run(&dir.path().join("absent"), &["check"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("does not exist"));
}

#[test]
fn test_malformed_config() {
    let dir = project(&[("0001_initial.py", INITIAL)]);
    std::fs::write(dir.path().join("migrationiq.yaml"), "risk_threshold: [1, 2]\n").unwrap();
    let output = run(dir.path(), &["check"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Failed to load configuration"));
}
