#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::wildcard_imports,
    clippy::indexing_slicing
)]
//! Integration tests for the `remove` command.

mod common;

use std::sync::Arc;

use common::*;
use psycho_cli::cli::RemoveOpts;
use psycho_cli::commands::{self, remove};

const MANIFEST: &str = "[project]
name = \"demo\"
dependencies = [\"requests>=2\", \"Flask<3\", \"click\"]

[project.optional-dependencies]
dev = [\"pytest\"]
docs = [\"sphinx\", \"furo\"]
";

fn opts(packages: &[&str], optional: Option<&str>) -> RemoveOpts {
    RemoveOpts {
        packages: packages.iter().map(|p| (*p).to_string()).collect(),
        optional: optional.map(str::to_string),
    }
}

#[test]
fn remove_uninstalls_and_drops_entry() {
    let project = TestProject::with_manifest(MANIFEST);
    let exec = Arc::new(FakeExecutor::new());

    remove::run(&project.context(&exec), &opts(&["requests"], None)).unwrap();

    assert_eq!(exec.lines(), vec!["python3 -m pip uninstall -y requests"]);
    assert_eq!(project.dependencies(), vec!["Flask<3", "click"]);
}

#[test]
fn remove_matches_names_case_insensitively() {
    let project = TestProject::with_manifest(MANIFEST);
    let exec = Arc::new(FakeExecutor::new());

    remove::run(&project.context(&exec), &opts(&["flask"], None)).unwrap();

    assert_eq!(exec.lines(), vec!["python3 -m pip uninstall -y flask"]);
    assert_eq!(project.dependencies(), vec!["requests>=2", "click"]);
}

#[test]
fn remove_several_packages() {
    let project = TestProject::with_manifest(MANIFEST);
    let exec = Arc::new(FakeExecutor::new());

    remove::run(&project.context(&exec), &opts(&["click", "requests"], None)).unwrap();

    assert_eq!(exec.calls().len(), 2);
    assert_eq!(project.dependencies(), vec!["Flask<3"]);
}

#[test]
fn remove_unknown_package_changes_nothing() {
    let project = TestProject::with_manifest(MANIFEST);
    let exec = Arc::new(FakeExecutor::new());

    let err = remove::run(&project.context(&exec), &opts(&["click", "numpy"], None)).unwrap_err();

    assert!(format!("{err:#}").contains("'numpy' does not exist"), "got: {err:#}");
    assert!(exec.calls().is_empty());
    assert_eq!(project.manifest(), MANIFEST);
    assert_eq!(commands::exit_code(&err), 1);
}

#[test]
fn remove_from_optional_group() {
    let project = TestProject::with_manifest(MANIFEST);
    let exec = Arc::new(FakeExecutor::new());

    remove::run(&project.context(&exec), &opts(&["furo"], Some("docs"))).unwrap();

    assert_eq!(project.optional("docs"), vec!["sphinx"]);
    assert_eq!(project.dependencies().len(), 3);
}

#[test]
fn removing_last_entry_drops_the_group() {
    let project = TestProject::with_manifest(MANIFEST);
    let exec = Arc::new(FakeExecutor::new());

    remove::run(&project.context(&exec), &opts(&["pytest"], Some("dev"))).unwrap();

    let value = project.manifest_value();
    let groups = value["project"]["optional-dependencies"].as_table().unwrap();
    assert!(!groups.contains_key("dev"));
    assert!(groups.contains_key("docs"));
}

#[test]
fn missing_optional_group_is_reported() {
    let project = TestProject::with_manifest(MANIFEST);
    let exec = Arc::new(FakeExecutor::new());

    let err = remove::run(&project.context(&exec), &opts(&["pytest"], Some("test"))).unwrap_err();

    assert!(
        format!("{err:#}").contains("group 'test' does not exist"),
        "got: {err:#}"
    );
    assert!(exec.calls().is_empty());
}

#[test]
fn package_in_other_target_is_not_found() {
    let project = TestProject::with_manifest(MANIFEST);
    let exec = Arc::new(FakeExecutor::new());

    let err = remove::run(&project.context(&exec), &opts(&["pytest"], None)).unwrap_err();

    assert!(format!("{err:#}").contains("pytest"), "got: {err:#}");
    assert_eq!(project.optional("dev"), vec!["pytest"]);
}

#[test]
fn uninstall_failure_keeps_manifest_and_exit_code() {
    let project = TestProject::with_manifest(MANIFEST);
    let exec = Arc::new(FakeExecutor::new().failing_on("uninstall", 2));

    let err = remove::run(&project.context(&exec), &opts(&["click"], None)).unwrap_err();

    assert_eq!(commands::exit_code(&err), 2);
    assert_eq!(project.manifest(), MANIFEST);
}
