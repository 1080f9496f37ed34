//! CLI integration tests for the procship binary.
//!
//! Each test lays out a fixture project on a tempdir and drives the binary
//! through assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_fixture_project(root: &Path) {
    fs::write(
        root.join(".procship.yml"),
        r#"
snowflake:
  account: test_account
  user: test_user
  role: sysadmin
  warehouse: test_warehouse
procedures:
  "+database": default_database
  "+schema": default_schema
  "+language": javascript
  "+execute_as": owner
  "+returns": varchar
  admin:
    "+database": admin_db
    "+use_role": sysadmin
    create_database:
      args:
        - name: database_name
          type: varchar
    drop_database: {}
  useradmin:
    "+schema": user_schema
    "+use_role": useradmin
    create_user:
      grant_usage:
        role:
          - analyst
"#,
    )
    .unwrap();

    fs::create_dir_all(root.join("admin")).unwrap();
    fs::create_dir_all(root.join("useradmin")).unwrap();
    fs::write(
        root.join("admin/create_database.js"),
        "var databaseName = DATABASE_NAME;\nreturn databaseName;",
    )
    .unwrap();
    fs::write(
        root.join("admin/drop_database.js"),
        "/*\ncomment: Drops a database - overriding config in frontmatter\n*/\nreturn 1;",
    )
    .unwrap();
    fs::write(root.join("useradmin/create_user.js"), "return 1;").unwrap();
}

fn procship() -> Command {
    Command::cargo_bin("procship").unwrap()
}

#[test]
fn build_renders_every_procedure() {
    let temp = TempDir::new().unwrap();
    write_fixture_project(temp.path());

    procship()
        .args(["build", temp.path().to_str().unwrap(), "--target", "output"])
        .assert()
        .success()
        .stdout(predicate::str::contains("successfully built"));

    let output = temp.path().join("output");
    let mut sql_files: Vec<_> = fs::read_dir(&output)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    sql_files.sort();
    assert_eq!(
        sql_files,
        ["create_database.sql", "create_user.sql", "drop_database.sql"]
    );

    let create_db = fs::read_to_string(output.join("create_database.sql")).unwrap();
    assert!(create_db.contains("CREATE OR REPLACE PROCEDURE"));
    assert!(create_db.contains("admin_db.default_schema.create_database"));
    assert!(create_db.contains("\"DATABASE_NAME\" VARCHAR"));
}

#[test]
fn build_merges_sibling_directory_defaults() {
    let temp = TempDir::new().unwrap();
    write_fixture_project(temp.path());

    procship()
        .args(["build", temp.path().to_str().unwrap(), "--target", "output"])
        .assert()
        .success();

    let create_user =
        fs::read_to_string(temp.path().join("output/create_user.sql")).unwrap();
    // Root cascading default survives where useradmin does not override it...
    assert!(create_user.contains("default_database"));
    // ...and the sibling directory's own schema default applies.
    assert!(create_user.contains("user_schema"));
}

#[test]
fn build_applies_frontmatter_override() {
    let temp = TempDir::new().unwrap();
    write_fixture_project(temp.path());

    procship()
        .args(["build", temp.path().to_str().unwrap(), "--target", "output"])
        .assert()
        .success();

    let drop_db = fs::read_to_string(temp.path().join("output/drop_database.sql")).unwrap();
    assert!(drop_db.contains("Drops a database - overriding config in frontmatter"));
}

#[test]
fn build_only_selects_named_procedures() {
    let temp = TempDir::new().unwrap();
    write_fixture_project(temp.path());

    procship()
        .args([
            "build",
            temp.path().to_str().unwrap(),
            "--target",
            "output",
            "--only",
            "create_database",
            "--only",
            "drop_database",
        ])
        .assert()
        .success();

    let output = temp.path().join("output");
    assert!(output.join("create_database.sql").exists());
    assert!(output.join("drop_database.sql").exists());
    assert!(!output.join("create_user.sql").exists());
}

#[test]
fn build_warns_about_unknown_only_names() {
    let temp = TempDir::new().unwrap();
    write_fixture_project(temp.path());

    procship()
        .args([
            "build",
            temp.path().to_str().unwrap(),
            "--target",
            "output",
            "--only",
            "nonexistent",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Could not find procedure(s): nonexistent",
        ));
}

#[test]
fn build_without_config_file_fails() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("test.js"), "return 1;").unwrap();

    procship()
        .args(["build", temp.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration file not found"));
}

#[test]
fn build_with_ambiguous_declarations_aborts_the_run() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join(".procship.yml"),
        "procedures:\n  \"+db\": one\n  db: two\n",
    )
    .unwrap();
    fs::write(temp.path().join("test.js"), "return 1;").unwrap();

    procship()
        .args(["build", temp.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed declaration"));
}

#[test]
fn build_reports_failing_procedure_but_builds_the_rest() {
    let temp = TempDir::new().unwrap();
    write_fixture_project(temp.path());
    fs::write(temp.path().join("admin/broken.js"), "/*\nnever closed\n").unwrap();

    procship()
        .args(["build", temp.path().to_str().unwrap(), "--target", "output"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("could not be built"));

    // The healthy procedures were still built.
    assert!(temp.path().join("output/create_database.sql").exists());
}

#[test]
fn liftoff_writes_sequenced_deployment_script() {
    let temp = TempDir::new().unwrap();
    write_fixture_project(temp.path());

    procship()
        .args(["liftoff", temp.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("launched into schema"));

    let script =
        fs::read_to_string(temp.path().join("target/procship/liftoff.sql")).unwrap();
    assert!(script.contains("USE ROLE \"SYSADMIN\""));
    assert!(script.contains("USE ROLE \"USERADMIN\""));
    assert!(script.contains("CREATE OR REPLACE PROCEDURE"));
    assert!(script.contains(
        "GRANT USAGE ON PROCEDURE \"default_database\".\"user_schema\".\"create_user\"() \
         TO ROLE \"analyst\""
    ));
}
