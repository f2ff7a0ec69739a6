use super::*;
use authschema_interface::FieldType;
use std::fs;
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_load_json_config() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "auth.config.json",
        r#"{
            "plugins": ["twoFactor", { "id": "audit", "schema": { "auditLog": { "fields": { "action": { "type": "string", "required": true } } } } }],
            "user": { "modelName": "users", "additionalFields": { "role": { "type": "string" } } },
            "session": { "storeSessionInDatabase": true, "modelName": "sessions" },
            "rateLimit": { "storage": "database" },
            "advanced": { "database": { "generateId": "uuid" } },
            "secondaryStorage": true,
            "schema": { "usePlural": true, "casing": "snake_case" },
            "database": { "dialect": "postgresql" }
        }"#,
    );

    let loaded = load_auth_config(&path, true).unwrap();
    let config = loaded.config;

    assert!(loaded.diagnostics.is_empty());
    assert_eq!(config.plugins.len(), 2);
    assert_eq!(config.plugins[0], PluginSpec::Named("twoFactor".to_string()));
    assert_eq!(config.plugins[1].id(), "audit");
    match &config.plugins[1] {
        PluginSpec::Custom { schema, .. } => {
            assert_eq!(schema["auditLog"].fields["action"].field_type, FieldType::String);
        }
        other => panic!("Expected custom plugin, got {:?}", other),
    }

    let user = config.user.as_ref().unwrap();
    assert_eq!(user.model_name.as_deref(), Some("users"));
    assert!(user.additional_fields.contains_key("role"));

    let session = config.session.as_ref().unwrap();
    assert!(session.store_session_in_database);
    assert_eq!(session.model.model_name.as_deref(), Some("sessions"));

    assert!(config.uses_uuid());
    assert_eq!(config.secondary_storage, Some(true));
    assert_eq!(
        config.schema.as_ref().unwrap().casing,
        Some(authschema_interface::Casing::SnakeCase)
    );
    assert_eq!(
        config.database.as_ref().unwrap().dialect.as_deref(),
        Some("postgresql")
    );
}

#[test]
fn test_load_toml_config() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "auth.toml",
        r#"
plugins = ["username", "admin"]

[schema]
usePlural = true

[database]
dialect = "mysql"
"#,
    );

    let config = load_auth_config(&path, true).unwrap().config;
    assert_eq!(config.plugins.len(), 2);
    assert_eq!(config.schema.unwrap().use_plural, Some(true));
    assert_eq!(config.database.unwrap().dialect.as_deref(), Some("mysql"));
}

#[test]
fn test_generate_id_other_than_uuid() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "a.json",
        r#"{ "advanced": { "database": { "generateId": false } } }"#,
    );
    assert!(!load_auth_config(&path, true).unwrap().config.uses_uuid());

    let path = write(
        &dir,
        "b.json",
        r#"{ "advanced": { "database": { "generateId": "serial" } } }"#,
    );
    assert!(!load_auth_config(&path, true).unwrap().config.uses_uuid());
}

#[test]
fn test_missing_file_strict_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing.json");

    let err = load_auth_config(&path, true).unwrap_err();
    match err {
        SchemaError::ConfigLoad { message, .. } => assert_eq!(message, "file not found"),
        other => panic!("Expected ConfigLoad, got {:?}", other),
    }
}

#[test]
fn test_missing_file_non_strict_warns_and_continues() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing.json");

    let loaded = load_auth_config(&path, false).unwrap();
    assert_eq!(loaded.config, AuthConfig::default());
    assert_eq!(loaded.diagnostics.len(), 1);
    assert_eq!(
        loaded.diagnostics[0].severity,
        authschema_interface::Severity::Warning
    );
    assert!(loaded.diagnostics[0].message.contains("file not found"));
}

#[test]
fn test_malformed_json() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "bad.json", "{ plugins: ");

    assert!(matches!(
        load_auth_config(&path, true),
        Err(SchemaError::ConfigLoad { .. })
    ));
    assert_eq!(load_auth_config(&path, false).unwrap().diagnostics.len(), 1);
}

#[test]
fn test_non_object_config_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "array.json", r#"["twoFactor"]"#);

    let err = load_auth_config(&path, true).unwrap_err();
    assert!(err.to_string().contains("expected an object"));
}

#[test]
fn test_wrong_section_type_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "wrong.json", r#"{ "plugins": "twoFactor" }"#);

    assert!(load_auth_config(&path, true).is_err());
}

#[test]
fn test_extends_layers_child_over_base() {
    let dir = TempDir::new().unwrap();
    write(
        &dir,
        "base.json",
        r#"{
            "plugins": ["twoFactor"],
            "schema": { "usePlural": true },
            "database": { "dialect": "sqlite" }
        }"#,
    );
    let path = write(
        &dir,
        "auth.json",
        r#"{
            "extends": "base.json",
            "plugins": ["username"],
            "database": { "dialect": "postgresql" }
        }"#,
    );

    let config = load_auth_config(&path, true).unwrap().config;
    let ids: Vec<&str> = config.plugins.iter().map(PluginSpec::id).collect();
    assert_eq!(ids, vec!["twoFactor", "username"]);
    assert_eq!(config.schema.unwrap().use_plural, Some(true));
    assert_eq!(config.database.unwrap().dialect.as_deref(), Some("postgresql"));
    assert_eq!(config.extends, None);
}

#[test]
fn test_extends_across_formats() {
    let dir = TempDir::new().unwrap();
    write(&dir, "base.toml", "plugins = [\"jwt\"]\n");
    let path = write(&dir, "auth.json", r#"{ "extends": "base.toml" }"#);

    let config = load_auth_config(&path, true).unwrap().config;
    assert_eq!(config.plugins, vec![PluginSpec::Named("jwt".to_string())]);
}

#[test]
fn test_extends_cycle_is_detected() {
    let dir = TempDir::new().unwrap();
    write(&dir, "a.json", r#"{ "extends": "b.json" }"#);
    let path = write(&dir, "b.json", r#"{ "extends": "a.json" }"#);

    let err = load_auth_config(&path, true).unwrap_err();
    assert!(err.to_string().contains("circular extends chain"));

    let loaded = load_auth_config(&path, false).unwrap();
    assert_eq!(loaded.config, AuthConfig::default());
    assert_eq!(loaded.diagnostics.len(), 1);
}

#[test]
fn test_self_extends_is_a_cycle() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "self.json", r#"{ "extends": "self.json" }"#);

    assert!(load_auth_config(&path, true).is_err());
}

#[test]
fn test_extends_depth_limit() {
    let dir = TempDir::new().unwrap();
    for i in 0..MAX_EXTENDS_DEPTH + 1 {
        write(
            &dir,
            &format!("c{}.json", i),
            &format!(r#"{{ "extends": "c{}.json" }}"#, i + 1),
        );
    }
    write(&dir, &format!("c{}.json", MAX_EXTENDS_DEPTH + 1), "{}");

    let err = load_auth_config(&dir.path().join("c0.json"), true).unwrap_err();
    assert!(err.to_string().contains("deeper than"));
}

#[test]
fn test_guard_is_balanced_after_load() {
    let dir = TempDir::new().unwrap();
    write(&dir, "base.json", "{}");
    let path = write(&dir, "auth.json", r#"{ "extends": "base.json" }"#);

    let mut guard = LoadGuard::new();
    load_layered(&path, &mut guard).unwrap();
    assert_eq!(guard.depth(), 0);

    // The same guard can load again
    load_layered(&path, &mut guard).unwrap();
    assert_eq!(guard.depth(), 0);
}

#[test]
fn test_layer_keeps_base_sections_absent_in_child() {
    let base = AuthConfig {
        secondary_storage: Some(true),
        rate_limit: Some(RateLimitOptions {
            enabled: Some(true),
            storage: Some("database".to_string()),
        }),
        ..Default::default()
    };
    let child = AuthConfig {
        secondary_storage: Some(false),
        ..Default::default()
    };

    let merged = base.layer(child);
    assert_eq!(merged.secondary_storage, Some(false));
    assert_eq!(
        merged.rate_limit.unwrap().storage.as_deref(),
        Some("database")
    );
}

#[test]
fn test_guard_is_balanced_after_failed_load() {
    let dir = TempDir::new().unwrap();
    let base = write(&dir, "base.json", "{ not json");
    let path = write(&dir, "auth.json", r#"{ "extends": "base.json" }"#);

    let mut guard = LoadGuard::new();
    assert!(load_layered(&path, &mut guard).is_err());
    assert_eq!(guard.depth(), 0);

    // Once the base is repaired the same guard loads cleanly
    fs::write(&base, "{}").unwrap();
    load_layered(&path, &mut guard).unwrap();
    assert_eq!(guard.depth(), 0);
}

#[test]
fn test_guard_is_balanced_after_cycle() {
    let dir = TempDir::new().unwrap();
    write(&dir, "a.json", r#"{ "extends": "b.json" }"#);
    let path = write(&dir, "b.json", r#"{ "extends": "a.json" }"#);

    let mut guard = LoadGuard::new();
    assert!(load_layered(&path, &mut guard).is_err());
    assert_eq!(guard.depth(), 0);
}
