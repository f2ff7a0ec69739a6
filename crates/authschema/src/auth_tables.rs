//! Assembly of the abstract table map from an auth config.
//!
//! The map is folded from the core tables, then every plugin fragment in
//! declaration order, then per-model options. Session storage is resolved
//! last so no later fragment can bring the table back.

use authschema_interface::{
    DefaultValue, Diagnostic, FieldAttribute, FieldType, OnDelete, SchemaOptions, TableMap,
    TableSchema, push_unique,
};

use crate::config_loader::{AuthConfig, ModelOptions, PluginSpec};
use crate::plugins::plugin_fragment;

const NOW: &str = "() => new Date()";

fn created_at() -> FieldAttribute {
    FieldAttribute::new(FieldType::Date).required().default_fn(NOW)
}

fn updated_at() -> FieldAttribute {
    created_at().on_update(NOW)
}

fn core_tables() -> TableMap {
    let mut tables = TableMap::new();

    tables.insert(
        "user".to_string(),
        TableSchema::new()
            .field("name", FieldAttribute::new(FieldType::String).required())
            .field("email", FieldAttribute::new(FieldType::String).required().unique())
            .field(
                "emailVerified",
                FieldAttribute::new(FieldType::Boolean)
                    .required()
                    .default_value(DefaultValue::Boolean(false)),
            )
            .field("image", FieldAttribute::new(FieldType::String))
            .field("createdAt", created_at())
            .field("updatedAt", updated_at()),
    );

    tables.insert(
        "session".to_string(),
        TableSchema::new()
            .field("expiresAt", FieldAttribute::new(FieldType::Date).required())
            .field("token", FieldAttribute::new(FieldType::String).required().unique())
            .field("createdAt", created_at())
            .field("updatedAt", updated_at())
            .field("ipAddress", FieldAttribute::new(FieldType::String))
            .field("userAgent", FieldAttribute::new(FieldType::String))
            .field("userId", user_reference()),
    );

    tables.insert(
        "account".to_string(),
        TableSchema::new()
            .field("accountId", FieldAttribute::new(FieldType::String).required())
            .field("providerId", FieldAttribute::new(FieldType::String).required())
            .field("userId", user_reference())
            .field("accessToken", FieldAttribute::new(FieldType::String))
            .field("refreshToken", FieldAttribute::new(FieldType::String))
            .field("idToken", FieldAttribute::new(FieldType::String))
            .field("accessTokenExpiresAt", FieldAttribute::new(FieldType::Date))
            .field("refreshTokenExpiresAt", FieldAttribute::new(FieldType::Date))
            .field("scope", FieldAttribute::new(FieldType::String))
            .field("password", FieldAttribute::new(FieldType::String))
            .field("createdAt", created_at())
            .field("updatedAt", updated_at()),
    );

    tables.insert(
        "verification".to_string(),
        TableSchema::new()
            .field("identifier", FieldAttribute::new(FieldType::String).required())
            .field("value", FieldAttribute::new(FieldType::String).required())
            .field("expiresAt", FieldAttribute::new(FieldType::Date).required())
            .field("createdAt", created_at())
            .field("updatedAt", updated_at()),
    );

    tables
}

fn user_reference() -> FieldAttribute {
    FieldAttribute::new(FieldType::String)
        .required()
        .references("user", "id", Some(OnDelete::Cascade))
}

fn rate_limit_table() -> TableSchema {
    TableSchema::new()
        .field("key", FieldAttribute::new(FieldType::String).required().unique())
        .field("count", FieldAttribute::new(FieldType::Number).required())
        .field("lastRequest", FieldAttribute::new(FieldType::Number).required())
}

/// The core tables, plus `rateLimit` when rate limits are stored in the database
pub fn base_tables(config: &AuthConfig) -> TableMap {
    let mut tables = core_tables();

    let stores_rate_limits = config
        .rate_limit
        .as_ref()
        .and_then(|rate_limit| rate_limit.storage.as_deref())
        == Some("database");
    if stores_rate_limits {
        tables.insert("rateLimit".to_string(), rate_limit_table());
    }

    tables
}

/// Fold one fragment into a table map.
///
/// Existing tables gain the fragment's fields, replacing same-named ones, and
/// adopt its `modelName` when set. New tables are appended.
pub fn merge_fragment(mut tables: TableMap, fragment: &TableMap) -> TableMap {
    for (key, table) in fragment {
        match tables.get_mut(key) {
            Some(existing) => {
                for (name, field) in &table.fields {
                    existing.fields.insert(name.clone(), field.clone());
                }
                if table.model_name.is_some() {
                    existing.model_name = table.model_name.clone();
                }
            }
            None => {
                tables.insert(key.clone(), table.clone());
            }
        }
    }
    tables
}

fn model_fragment(key: &str, options: &ModelOptions) -> TableMap {
    let mut fragment = TableMap::new();
    fragment.insert(
        key.to_string(),
        TableSchema {
            fields: options.additional_fields.clone(),
            model_name: options.model_name.clone(),
        },
    );
    fragment
}

/// Resolve the full table map for a config.
///
/// Unknown plugin ids are reported and otherwise ignored.
pub fn build_table_map(config: &AuthConfig) -> (TableMap, Vec<Diagnostic>) {
    let mut diagnostics = Vec::new();
    let mut tables = base_tables(config);

    for plugin in &config.plugins {
        match plugin {
            PluginSpec::Custom { schema, .. } => tables = merge_fragment(tables, schema),
            PluginSpec::Named(id) => match plugin_fragment(id) {
                Some(fragment) => tables = merge_fragment(tables, &fragment),
                None => push_unique(
                    &mut diagnostics,
                    Diagnostic::warning(format!("Unknown plugin '{}' contributes no tables", id)),
                ),
            },
        }
    }

    let model_options = [
        ("user", config.user.as_ref()),
        ("session", config.session.as_ref().map(|session| &session.model)),
        ("account", config.account.as_ref()),
        ("verification", config.verification.as_ref()),
    ];
    for (key, options) in model_options {
        if let Some(options) = options {
            tables = merge_fragment(tables, &model_fragment(key, options));
        }
    }

    if !stores_sessions(config) {
        tables.shift_remove("session");
    }

    (tables, diagnostics)
}

/// Sessions live in the database unless secondary storage takes them over
fn stores_sessions(config: &AuthConfig) -> bool {
    let secondary_storage = config.secondary_storage.unwrap_or(false);
    let store_in_database = config
        .session
        .as_ref()
        .is_some_and(|session| session.store_session_in_database);

    !secondary_storage || store_in_database
}

/// Generator options implied by a config
pub fn schema_options(config: &AuthConfig) -> SchemaOptions {
    let schema = config.schema.clone().unwrap_or_default();

    SchemaOptions {
        use_plural: schema.use_plural.unwrap_or(false),
        use_uuid: config.uses_uuid(),
        casing: schema.casing.unwrap_or_default(),
    }
}
