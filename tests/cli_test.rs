use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_lists_all_commands() {
    let mut cmd = Command::cargo_bin("wfbroker").unwrap();

    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("update-folio"))
        .stdout(predicate::str::contains("update-data-field"))
        .stdout(predicate::str::contains("list-data-fields"))
        .stdout(predicate::str::contains("update-xml-field"))
        .stdout(predicate::str::contains("package"))
        .stdout(predicate::str::contains("build-deploy"));
}

#[test]
fn test_no_arguments_shows_usage_and_fails() {
    let mut cmd = Command::cargo_bin("wfbroker").unwrap();

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_describe_prints_service_description() {
    let mut cmd = Command::cargo_bin("wfbroker").unwrap();

    cmd.arg("describe")
        .assert()
        .success()
        .stdout(predicate::str::contains("ProcessInstanceClient"))
        .stdout(predicate::str::contains("UpdateFolio"))
        .stdout(predicate::str::contains("ListDataFields"));
}

#[test]
fn test_update_folio_rejects_non_numeric_instance_id() {
    let mut cmd = Command::cargo_bin("wfbroker").unwrap();

    cmd.args(["update-folio", "not-a-number", "INV-0001"])
        .assert()
        .failure();
}
