//! End-to-end library test: declarations -> resolution -> validation ->
//! rendering -> deployment sequencing, without touching the CLI.

use serde_json::json;
use std::path::PathBuf;

use ship_config::{DeclarationTree, extract, resolve, to_segments};
use ship_deploy::{Deployer, SqlScript};
use ship_render::{Renderer, validate};

const DECLARATIONS: &str = r#"
"+database": analytics
"+schema": public
"+language": javascript
"+execute_as": owner
"+returns": varchar
admin:
  "+use_role": sysadmin
  rotate_keys:
    args:
      - name: key_name
        type: varchar
    grant_usage:
      role:
        - secops
"#;

#[test]
fn full_pipeline_produces_a_deployable_script() {
    let tree = DeclarationTree::parse(DECLARATIONS).unwrap();

    let root = PathBuf::from("/project");
    let path = root.join("admin/rotate_keys.js");
    let segments = to_segments(&path, &root).unwrap();

    let source = "/*\ncomment: Rotates service keys\n*/\nvar keyName = KEY_NAME;";
    let (overrides, body) = extract(source).unwrap();

    let mut config = resolve(&tree, &segments, &overrides);
    config.insert("name", json!("rotate_keys"));
    config.insert("path", json!(path.display().to_string()));

    validate(&config, "rotate_keys").unwrap();

    let renderer = Renderer::new().unwrap();
    let rendered = renderer.render(&config, body).unwrap();
    assert!(rendered.sql.contains("analytics.public.rotate_keys"));
    assert!(rendered.sql.contains("\"KEY_NAME\" VARCHAR"));
    assert!(rendered.sql.contains("COMMENT = 'Rotates service keys'"));
    assert!(rendered.sql.contains("var keyName = KEY_NAME;"));

    let mut script = SqlScript::new();
    Deployer::new(Some("accountadmin".to_string()))
        .deploy(&rendered, &mut script)
        .unwrap();

    let statements = script.statements();
    assert_eq!(statements.len(), 3);
    // Procedure-level use_role beats the profile default.
    assert_eq!(statements[0], "USE ROLE \"SYSADMIN\"");
    assert!(statements[1].starts_with("CREATE OR REPLACE PROCEDURE"));
    assert_eq!(
        statements[2],
        "GRANT USAGE ON PROCEDURE \"analytics\".\"public\".\"rotate_keys\"(varchar) \
         TO ROLE \"secops\""
    );
}

#[test]
fn undeclared_procedure_fails_validation_not_resolution() {
    let tree = DeclarationTree::parse("admin: {}\n").unwrap();
    let segments = vec!["admin".to_string(), "mystery".to_string()];

    // Resolution is total: no error, just an empty mapping.
    let config = resolve(&tree, &segments, &ship_config::Overrides::new());
    assert!(config.is_empty());

    // The caller's validation reports what is missing.
    let err = validate(&config, "mystery").unwrap_err();
    assert!(err.to_string().contains("Missing required configuration fields"));
    assert!(err.to_string().contains("database"));
}
