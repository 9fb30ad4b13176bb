// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 Kintree Contributors
//! Integration tests for the kintree CLI commands

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Run kintree with the given data directory
fn kintree(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("kintree").expect("binary built");
    cmd.env("KINTREE_DATA_DIR", data_dir.path());
    cmd
}

/// Seed two parents and a child via the CLI
fn seed_small_family(data_dir: &TempDir) {
    for args in [
        vec!["person", "add", "Ada Lovelace", "--born", "1815-12-10"],
        vec!["person", "add", "Anne Milbanke", "--born", "1792-05-17"],
        vec!["person", "add", "George Byron", "--born", "1788-01-22"],
    ] {
        kintree(data_dir).args(&args).assert().success();
    }
    for (parent, child) in [("Anne", "Ada"), ("George", "Ada")] {
        kintree(data_dir)
            .args([
                "relate", "add", "--from", parent, "--to", child, "--rel", "parent",
            ])
            .assert()
            .success();
    }
    kintree(data_dir)
        .args([
            "relate", "add", "--from", "Anne", "--to", "George", "--rel", "spouse",
        ])
        .assert()
        .success();
}

#[test]
fn test_person_add_and_list() {
    let data_dir = TempDir::new().unwrap();

    kintree(&data_dir)
        .args(["person", "add", "Ada Lovelace", "--born", "1815-12-10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added Ada Lovelace"));

    kintree(&data_dir)
        .args(["person", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ada Lovelace"))
        .stdout(predicate::str::contains("1815-12-10"));
}

#[test]
fn test_person_add_requires_name() {
    let data_dir = TempDir::new().unwrap();
    kintree(&data_dir)
        .args(["person", "add"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("name is required"));
}

#[test]
fn test_person_add_rejects_bad_date() {
    let data_dir = TempDir::new().unwrap();
    kintree(&data_dir)
        .args(["person", "add", "Ada", "--born", "not-a-date"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid birth date"));
}

#[test]
fn test_person_show_lists_relatives() {
    let data_dir = TempDir::new().unwrap();
    seed_small_family(&data_dir);

    kintree(&data_dir)
        .args(["person", "show", "Ada"])
        .assert()
        .success()
        .stdout(predicate::str::contains("parents:"))
        .stdout(predicate::str::contains("Anne Milbanke"))
        .stdout(predicate::str::contains("George Byron"));
}

#[test]
fn test_person_remove_drops_relationships() {
    let data_dir = TempDir::new().unwrap();
    seed_small_family(&data_dir);

    kintree(&data_dir)
        .args(["person", "remove", "George"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed George Byron"));

    kintree(&data_dir)
        .args(["relate", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("George").not());
}

#[test]
fn test_classify_parent_and_child() {
    let data_dir = TempDir::new().unwrap();
    seed_small_family(&data_dir);

    kintree(&data_dir)
        .args(["classify", "Ada", "Anne"])
        .assert()
        .success()
        .stdout(predicate::str::contains("parent"));

    kintree(&data_dir)
        .args(["classify", "Anne", "Ada"])
        .assert()
        .success()
        .stdout(predicate::str::contains("child"));
}

#[test]
fn test_classify_spouse_symmetric() {
    let data_dir = TempDir::new().unwrap();
    seed_small_family(&data_dir);

    for (a, b) in [("Anne", "George"), ("George", "Anne")] {
        kintree(&data_dir)
            .args(["classify", a, b])
            .assert()
            .success()
            .stdout(predicate::str::contains("spouse"));
    }
}

#[test]
fn test_classify_json_output() {
    let data_dir = TempDir::new().unwrap();
    seed_small_family(&data_dir);

    let output = kintree(&data_dir)
        .args(["--json", "classify", "Ada", "Anne"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("valid JSON output");
    assert_eq!(parsed["kinship"], "parent");
    assert_eq!(parsed["priority"], 2);
}

#[test]
fn test_classify_unknown_person_fails() {
    let data_dir = TempDir::new().unwrap();
    seed_small_family(&data_dir);

    kintree(&data_dir)
        .args(["classify", "Ada", "Nobody"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No person found"));
}

#[test]
fn test_relate_rejects_unknown_kind() {
    let data_dir = TempDir::new().unwrap();
    seed_small_family(&data_dir);

    kintree(&data_dir)
        .args([
            "relate", "add", "--from", "Ada", "--to", "Anne", "--rel", "cousin",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown relation kind"));
}

#[test]
fn test_relate_rejects_self_relation() {
    let data_dir = TempDir::new().unwrap();
    seed_small_family(&data_dir);

    kintree(&data_dir)
        .args([
            "relate", "add", "--from", "Ada", "--to", "Ada", "--rel", "spouse",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("themself"));
}

#[test]
fn test_timeline_order_and_labels() {
    let data_dir = TempDir::new().unwrap();
    seed_small_family(&data_dir);

    let output = kintree(&data_dir)
        .args(["timeline", "Ada"])
        .env("NO_COLOR", "1")
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);

    // Chronological: George (1788) before Anne (1792) before Ada (1815)
    let george = stdout.find("George Byron").unwrap();
    let anne = stdout.find("Anne Milbanke").unwrap();
    let ada = stdout.find("Ada Lovelace").unwrap();
    assert!(george < anne && anne < ada, "order was: {stdout}");
    assert!(stdout.contains("[self]") || stdout.contains("self"));
}

#[test]
fn test_timeline_json_carries_priority() {
    let data_dir = TempDir::new().unwrap();
    seed_small_family(&data_dir);

    let output = kintree(&data_dir)
        .args(["--json", "timeline", "Ada"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let entries: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("valid JSON output");
    let entries = entries.as_array().unwrap();
    assert_eq!(entries.len(), 3);
    assert!(entries
        .iter()
        .any(|e| e["kinship"] == "self" && e["priority"] == 0));
    assert!(entries
        .iter()
        .all(|e| e["kinship"] != "unrelated"));
}

#[test]
fn test_timeline_only_filter() {
    let data_dir = TempDir::new().unwrap();
    seed_small_family(&data_dir);

    let output = kintree(&data_dir)
        .args(["--json", "timeline", "Ada", "--only", "parent"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let entries: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let entries = entries.as_array().unwrap();
    // both parents plus the self entry
    assert_eq!(entries.len(), 3);
    assert!(entries
        .iter()
        .all(|e| e["kinship"] == "parent" || e["kinship"] == "self"));
}

#[test]
fn test_export_dot_and_json() {
    let data_dir = TempDir::new().unwrap();
    seed_small_family(&data_dir);

    kintree(&data_dir)
        .args(["export", "--format", "dot"])
        .assert()
        .success()
        .stdout(predicate::str::contains("digraph family"))
        .stdout(predicate::str::contains("dir=none, style=dashed"));

    kintree(&data_dir)
        .args(["export", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"persons\""));

    kintree(&data_dir)
        .args(["export", "--format", "yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown export format"));
}

#[test]
fn test_export_to_file() {
    let data_dir = TempDir::new().unwrap();
    seed_small_family(&data_dir);

    let out_path = data_dir.path().join("family.dot");
    kintree(&data_dir)
        .args(["export", "--format", "dot", "--output"])
        .arg(&out_path)
        .assert()
        .success();

    let content = fs::read_to_string(&out_path).unwrap();
    assert!(content.contains("digraph family"));
}

#[test]
fn test_import_then_classify() {
    let data_dir = TempDir::new().unwrap();

    let snapshot = r#"{
        "persons": [
            {
                "kind": "Person",
                "id": "person:ada",
                "first_name": "Ada",
                "last_name": "Lovelace",
                "birth_date": "1815-12-10",
                "tags": [],
                "meta": { "created_by": "import", "created_at": "2026-01-01T00:00:00Z" }
            },
            {
                "kind": "Person",
                "id": "person:anne",
                "first_name": "Anne",
                "last_name": "Milbanke",
                "birth_date": "1792-05-17",
                "tags": [],
                "meta": { "created_by": "import", "created_at": "2026-01-01T00:00:00Z" }
            }
        ],
        "relationships": [
            {
                "kind": "Relationship",
                "id": "rel:deadbeef",
                "rel": "parent",
                "person_a": "person:anne",
                "person_b": "person:ada",
                "meta": { "created_by": "import", "created_at": "2026-01-01T00:00:00Z" }
            }
        ]
    }"#;
    let snapshot_path = data_dir.path().join("snapshot.json");
    fs::write(&snapshot_path, snapshot).unwrap();

    kintree(&data_dir)
        .arg("import")
        .arg(&snapshot_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 2 new person(s)"));

    kintree(&data_dir)
        .args(["classify", "person:ada", "person:anne"])
        .assert()
        .success()
        .stdout(predicate::str::contains("parent"));
}

#[test]
fn test_check_reports_dangling_and_cycles() {
    let data_dir = TempDir::new().unwrap();
    seed_small_family(&data_dir);

    kintree(&data_dir)
        .args(["check"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no issues found"));

    // Import a snapshot with a dangling endpoint and a self-parent
    let bad = r#"{
        "persons": [
            {
                "kind": "Person",
                "id": "person:ouroboros",
                "first_name": "Ouro",
                "last_name": null,
                "birth_date": null,
                "tags": [],
                "meta": { "created_by": "import", "created_at": "2026-01-01T00:00:00Z" }
            }
        ],
        "relationships": [
            {
                "kind": "Relationship",
                "id": "rel:11111111",
                "rel": "parent",
                "person_a": "person:ghost",
                "person_b": "person:ouroboros",
                "meta": { "created_by": "import", "created_at": "2026-01-01T00:00:00Z" }
            },
            {
                "kind": "Relationship",
                "id": "rel:22222222",
                "rel": "parent",
                "person_a": "person:ouroboros",
                "person_b": "person:ouroboros",
                "meta": { "created_by": "import", "created_at": "2026-01-01T00:00:00Z" }
            }
        ]
    }"#;
    let bad_path = data_dir.path().join("bad.json");
    fs::write(&bad_path, bad).unwrap();

    kintree(&data_dir).arg("import").arg(&bad_path).assert().success();

    kintree(&data_dir)
        .args(["check"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("dangling:"))
        .stdout(predicate::str::contains("own parent"))
        .stderr(predicate::str::contains("issue(s) found"));
}

#[test]
fn test_config_shows_data_dir() {
    let data_dir = TempDir::new().unwrap();

    kintree(&data_dir)
        .args(["config", "data_dir"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            data_dir.path().to_string_lossy().to_string(),
        ));
}

#[test]
fn test_completions_emit_script() {
    let data_dir = TempDir::new().unwrap();

    kintree(&data_dir)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("kintree"));
}
