//! Integration tests for argument parsing and configuration errors.

mod common;

use common::keystone_cmd;
use predicates::prelude::*;

#[test]
fn test_help_lists_resource_commands() {
    keystone_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("tenants")
            .and(predicate::str::contains("projects"))
            .and(predicate::str::contains("bootstrap"))
            .and(predicate::str::contains("--os-auth-url")),
    );
}

#[test]
fn test_subcommand_help() {
    keystone_cmd()
        .args(["tenants", "create", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--name").and(predicate::str::contains("--enabled")));
}

#[test]
fn test_missing_auth_source_exits_1() {
    keystone_cmd()
        .args(["tenants", "list"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to build configuration"));
}

#[test]
fn test_invalid_api_version_is_rejected() {
    keystone_cmd()
        .args(["--os-identity-api-version", "4", "tenants", "list"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unsupported identity API version"));
}

#[test]
fn test_bootstrap_requires_password() {
    keystone_cmd()
        .args(["bootstrap"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--pass"));
}

#[test]
fn test_invalid_output_format() {
    keystone_cmd()
        .args([
            "--os-token",
            "ADMIN",
            "--os-endpoint",
            "http://127.0.0.1:1/v2.0",
            "-o",
            "xml",
            "roles",
            "list",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid output format"));
}
