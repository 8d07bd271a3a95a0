mod common;
use common::{Sandbox, three_employees};
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

#[test]
fn test_list_shows_employees_and_summary() {
    let sb = Sandbox::new();
    sb.seed_snapshot(three_employees());

    sb.sl()
        .arg("list")
        .assert()
        .success()
        .stdout(contains("Ana Ruiz"))
        .stdout(contains("Luis Gil"))
        .stdout(contains("Total employees"))
        .stdout(contains("2025-09-01"))
        .stdout(contains("Distinct titles"));
}

#[test]
fn test_list_filters_by_title() {
    let sb = Sandbox::new();
    sb.seed_snapshot(three_employees());

    sb.sl()
        .args(["list", "--title", "manag"])
        .assert()
        .success()
        .stdout(contains("Luis Gil"))
        .stdout(contains("Ana Ruiz").not());
}

#[test]
fn test_list_reads_legacy_snapshot_columns() {
    let sb = Sandbox::new();
    sb.seed_snapshot(r#"[{"empleadoId": 41, "Nombre": "Marta Pons", "Cargo": "Auditora"}]"#);

    sb.sl()
        .args(["list", "--refresh"])
        .assert()
        .success()
        .stdout(contains("Marta Pons"))
        .stdout(contains("41"));
}

#[test]
fn test_list_without_snapshot_fails_soft() {
    let sb = Sandbox::new();

    sb.sl()
        .arg("list")
        .assert()
        .success()
        .stderr(contains("No employee data could be loaded"));
}

#[test]
fn test_list_with_broken_snapshot_fails_soft() {
    let sb = Sandbox::new();
    sb.seed_snapshot("{ truncated");

    sb.sl()
        .arg("list")
        .assert()
        .success()
        .stderr(contains("invalid snapshot JSON"));
}

#[test]
fn test_list_keeps_rows_with_null_cells() {
    let sb = Sandbox::new();
    sb.seed_snapshot(
        r#"[
            {"empleadoId": 5, "Nombre": "Ana Ruiz", "Cargo": "Analyst"},
            {"empleadoId": 6, "Nombre": "Luis Gil", "Cargo": null}
        ]"#,
    );

    sb.sl()
        .arg("list")
        .assert()
        .success()
        .stdout(contains("Luis Gil"))
        .stdout(contains("Total employees\x1b[0m: 2"));
}
