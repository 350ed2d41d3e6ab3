use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const MANIFEST: &str = r#"
[[gem]]
name = "mruby-print"

[[gem]]
name = "mruby-sprintf"

[[gem]]
name = "mruby-math"
deps = ["mruby-print"]

[[gem]]
name = "mruby-compiler"

[build.host]
bundle = ["mruby-math"]

[build.small]
bundle = "all"
drop = ["mruby-print"]
"#;

#[allow(deprecated)]
fn gemcut_cmd() -> Command {
    Command::cargo_bin("gemcut").unwrap()
}

fn project(manifest: &str) -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("Gemcut.toml"), manifest).unwrap();
    tmp
}

#[test]
fn test_resolve_without_manifest_fails() {
    let tmp = TempDir::new().unwrap();

    gemcut_cmd()
        .current_dir(tmp.path())
        .env_remove("GEMCUT_MANIFEST")
        .args(["resolve"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not find"));
}

#[test]
fn test_resolve_prints_every_build() {
    let tmp = project(MANIFEST);

    gemcut_cmd()
        .current_dir(tmp.path())
        .env_remove("GEMCUT_MANIFEST")
        .args(["resolve"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[build.host]"))
        .stdout(predicate::str::contains("pass:   mruby-print, mruby-math"))
        .stdout(predicate::str::contains("[build.small]"))
        .stdout(predicate::str::contains("pass:   mruby-sprintf, mruby-compiler"))
        .stdout(predicate::str::contains("drop:   mruby-print, mruby-math"));
}

#[test]
fn test_resolve_single_build_as_json() {
    let tmp = project(MANIFEST);

    let output = gemcut_cmd()
        .current_dir(tmp.path())
        .env_remove("GEMCUT_MANIFEST")
        .args(["resolve", "--build", "host", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        json["host"]["pass"],
        serde_json::json!(["mruby-print", "mruby-math"])
    );
    assert_eq!(json["host"]["bitmap"], serde_json::json!([5]));
    assert!(json.get("small").is_none());
}

#[test]
fn test_resolve_unknown_build_fails() {
    let tmp = project(MANIFEST);

    gemcut_cmd()
        .current_dir(tmp.path())
        .env_remove("GEMCUT_MANIFEST")
        .args(["resolve", "--build", "wasm"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No build named 'wasm'"));
}

#[test]
fn test_resolve_reports_conflict() {
    let tmp = project(
        r#"
[[gem]]
name = "mruby-print"

[[gem]]
name = "mruby-math"
deps = ["mruby-print"]

[build.host]
bundle = ["mruby-math"]
drop = ["mruby-print"]
"#,
    );

    gemcut_cmd()
        .current_dir(tmp.path())
        .env_remove("GEMCUT_MANIFEST")
        .args(["resolve"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("bundled and dropped"));
}

#[test]
fn test_unknown_bundle_gem_fails() {
    let tmp = project("[[gem]]\nname = \"mruby-print\"\n\n[build.host]\nbundle = [\"mruby-nope\"]\n");

    gemcut_cmd()
        .current_dir(tmp.path())
        .env_remove("GEMCUT_MANIFEST")
        .args(["resolve"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("mruby-nope"));
}

#[test]
fn test_unknown_drop_gem_only_warns() {
    let tmp = project(
        "[[gem]]\nname = \"mruby-print\"\n\n[build.host]\nbundle = \"all\"\ndrop = [\"mruby-nope\"]\n",
    );

    gemcut_cmd()
        .current_dir(tmp.path())
        .env_remove("GEMCUT_MANIFEST")
        .args(["resolve"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pass:   mruby-print"))
        .stderr(predicate::str::contains("unknown gem 'mruby-nope' in drop list"));
}

#[test]
fn test_manifest_flag_overrides_location() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("custom.toml");
    fs::write(&path, MANIFEST).unwrap();

    gemcut_cmd()
        .env_remove("GEMCUT_MANIFEST")
        .args(["resolve", "--manifest"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("[build.host]"));
}

#[test]
fn test_single_build_omits_other_builds_warnings() {
    let tmp = project(
        "[[gem]]\nname = \"mruby-print\"\n\n[build.host]\nbundle = \"all\"\n\n[build.other]\nbundle = \"all\"\ndrop = [\"mruby-nope\"]\n",
    );

    gemcut_cmd()
        .current_dir(tmp.path())
        .env_remove("GEMCUT_MANIFEST")
        .env_remove("RUST_LOG")
        .args(["resolve", "--build", "host"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[build.host]"))
        .stdout(predicate::str::contains("[build.other]").not())
        .stderr(predicate::str::contains("mruby-nope").not());

    gemcut_cmd()
        .current_dir(tmp.path())
        .env_remove("GEMCUT_MANIFEST")
        .args(["resolve", "--build", "other"])
        .assert()
        .success()
        .stderr(predicate::str::contains("unknown gem 'mruby-nope' in drop list"));
}

#[test]
fn test_verbose_applies_over_rust_log() {
    let tmp = project(MANIFEST);

    gemcut_cmd()
        .current_dir(tmp.path())
        .env_remove("GEMCUT_MANIFEST")
        .env("RUST_LOG", "error")
        .args(["resolve", "--verbose"])
        .assert()
        .success()
        .stderr(predicate::str::contains("dispatching command"));

    gemcut_cmd()
        .current_dir(tmp.path())
        .env_remove("GEMCUT_MANIFEST")
        .env("RUST_LOG", "error")
        .args(["resolve"])
        .assert()
        .success()
        .stderr(predicate::str::contains("dispatching command").not());
}
