use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

fn folio(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("folio").unwrap();
    cmd.env("FOLIO_HOME", home).env_remove("FOLIO_LOG");
    cmd
}

fn create(home: &Path, id: &str, name: &str) {
    folio(home)
        .args(["create", id, name])
        .assert()
        .success()
        .stdout(predicate::str::contains("Project created"));
}

#[test]
fn create_move_and_list() {
    let home = tempfile::tempdir().unwrap();
    create(home.path(), "villa", "Villa Sole");
    create(home.path(), "loft", "Loft");
    create(home.path(), "barn", "Barn");

    folio(home.path())
        .args(["move", "barn", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Moved barn to position 1"));

    let output = folio(home.path()).arg("list").output().unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    let barn = stdout.find("barn").unwrap();
    let villa = stdout.find("villa").unwrap();
    let loft = stdout.find("loft").unwrap();
    assert!(barn < villa && villa < loft, "unexpected order:\n{}", stdout);

    let stored = std::fs::read_to_string(home.path().join("projectsData.json")).unwrap();
    assert!(stored.contains("\"barn\""));
}

#[test]
fn cancel_reverts_to_last_save() {
    let home = tempfile::tempdir().unwrap();
    create(home.path(), "villa", "Villa Sole");
    folio(home.path()).arg("save").assert().success();

    folio(home.path())
        .args(["rename", "villa", "Renamed"])
        .assert()
        .success();
    folio(home.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 changed or new"));

    folio(home.path())
        .arg("cancel")
        .assert()
        .success()
        .stdout(predicate::str::contains("discarded"));
    folio(home.path())
        .args(["show", "villa"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Villa Sole"))
        .stdout(predicate::str::contains("Renamed").not());
}

#[test]
fn payload_then_transfer_is_idempotent() {
    let home = tempfile::tempdir().unwrap();
    create(home.path(), "villa", "Villa Sole");

    let output = folio(home.path())
        .args(["payload", "villa"])
        .output()
        .unwrap();
    let payload = String::from_utf8(output.stdout).unwrap();
    assert!(payload.contains("\"kind\":\"transfer\""));

    folio(home.path())
        .args(["transfer", "--payload", payload.trim()])
        .assert()
        .success()
        .stdout(predicate::str::contains("already on the carousel"));
}

#[test]
fn export_writes_manifest_and_pages() {
    let home = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    create(home.path(), "villa", "Villa Sole");

    folio(home.path())
        .arg("export")
        .arg(out.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported projects.json"));

    assert!(out.path().join("projects.json").exists());
    let page = std::fs::read_to_string(out.path().join("project-villa.html")).unwrap();
    assert!(page.contains("Villa Sole"));
}

#[test]
fn page_prints_html() {
    let home = tempfile::tempdir().unwrap();
    create(home.path(), "villa", "Villa Sole");
    folio(home.path())
        .args(["page", "villa"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<html"));
}

#[test]
fn config_set_and_get() {
    let home = tempfile::tempdir().unwrap();
    folio(home.path())
        .args(["config", "site_title", "Studio"])
        .assert()
        .success()
        .stdout(predicate::str::contains("site_title set to Studio"));
    folio(home.path())
        .args(["config", "site_title"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Studio"));
}

#[test]
fn bad_input_fails_cleanly() {
    let home = tempfile::tempdir().unwrap();
    folio(home.path())
        .args(["create", "bad id", "Name"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
    folio(home.path())
        .args(["move", "ghost", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Project not found"));
}
