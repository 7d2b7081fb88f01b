//! # ImgRS Container Command Integration Tests
//!
//! File: cli/tests/container.rs
//! Author: Christi Mahu
//!
//! Runs `imgrs container ...` against the fake runtime from `common.rs`.
//!
#![cfg(unix)]

mod common;
use common::*;
use predicates::prelude::*;

#[test]
fn test_container_ls_includes_stopped() {
    let fake = FakeRuntime::new();
    fake.cmd()
        .args(["container", "ls"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("ID:      {}", &CONTAINER_NEW[..12])))
        .stdout(predicate::str::contains("Ports:   80/tcp"))
        .stdout(predicate::str::contains("Status:  Exited (0) 2 days ago"))
        .stdout(predicate::str::contains("Found 2 container(s)."));
}

#[test]
fn test_container_ls_json_keeps_full_ids() {
    let fake = FakeRuntime::new();
    let output = fake.cmd().args(["c", "ls", "--json"]).output().unwrap();
    assert!(output.status.success());
    let containers: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(containers[0]["id"], CONTAINER_NEW);
    assert_eq!(containers[0]["command"], "\"sleep infinity\"");
    assert_eq!(containers[1]["names"], "web-old");
    assert_eq!(containers[1]["ports"], "");
}

#[test]
fn test_container_inspect_whole_document() {
    let fake = FakeRuntime::new();
    let output = fake.cmd().args(["container", "inspect", CONTAINER_OLD]).output().unwrap();
    assert!(output.status.success());
    let record: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(record["Image"], LOCAL_OLD);
    assert_eq!(record["State"]["Status"], "exited");
}

#[test]
fn test_container_inspect_string_field_prints_raw() {
    let fake = FakeRuntime::new();
    fake.cmd()
        .args(["container", "inspect", CONTAINER_NEW, "--field", "Image"])
        .assert()
        .success()
        .stdout(predicate::str::diff(format!("{}\n", LOCAL_NEW)));
}

#[test]
fn test_container_inspect_missing_field() {
    let fake = FakeRuntime::new();
    fake.cmd()
        .args(["container", "inspect", CONTAINER_NEW, "--field", "Mounts"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Inspection field 'Mounts' is missing"))
        .stderr(predicate::str::contains("available: Id, Image, Name, State"));
}

#[test]
fn test_container_digest_resolves_through_image_listing() {
    let fake = FakeRuntime::new();
    fake.cmd()
        .args(["container", "digest", CONTAINER_OLD])
        .assert()
        .success()
        .stdout(predicate::str::diff(format!("{}\n", DIGEST_OLD)));
    assert_eq!(
        fake.calls(),
        vec![
            format!("container inspect {}", CONTAINER_OLD),
            "images --digests --no-trunc".to_string(),
        ]
    );
}

#[test]
fn test_container_digest_unknown_container() {
    let fake = FakeRuntime::new();
    fake.cmd()
        .args(["container", "digest", "no-such-box"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No such container"));
}

#[test]
fn test_container_running_filters_by_digest() {
    let fake = FakeRuntime::new();
    fake.cmd()
        .args(["container", "running", DIGEST_NEW])
        .assert()
        .success()
        .stdout(predicate::str::contains("Names:   web-1"))
        .stdout(predicate::str::contains("web-old").not())
        .stdout(predicate::str::contains("Found 1 container(s)."));
}

#[test]
fn test_container_running_json_empty_for_unknown_digest() {
    let fake = FakeRuntime::new();
    fake.cmd()
        .args(["container", "running", DIGEST_UNKNOWN, "--json"])
        .assert()
        .success()
        .stdout("[]\n");
}

#[test]
fn test_runtime_from_environment_variable() {
    let fake = FakeRuntime::new();
    imgrs_cmd()
        .current_dir(fake.home.path())
        .env("HOME", fake.home.path())
        .env("XDG_CONFIG_HOME", fake.home.path().join(".config"))
        .env("IMGRS_RUNTIME", fake.script())
        .args(["container", "digest", CONTAINER_NEW])
        .assert()
        .success()
        .stdout(predicate::str::diff(format!("{}\n", DIGEST_NEW)));
}

#[test]
fn test_runtime_from_project_config() {
    let fake = FakeRuntime::new();
    fake.write_project_config(&format!("[runtime]\nbinary = \"{}\"\n", fake.script().display()));
    imgrs_cmd()
        .current_dir(fake.home.path())
        .env("HOME", fake.home.path())
        .env("XDG_CONFIG_HOME", fake.home.path().join(".config"))
        .env_remove("IMGRS_RUNTIME")
        .args(["container", "ls", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(CONTAINER_OLD));
}
