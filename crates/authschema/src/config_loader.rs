//! User auth config loading.
//!
//! A config file is plain data: JSON, or TOML when the file ends in `.toml`.
//! Loading never touches a database. In non-strict mode every load failure
//! degrades to a warning and an empty config so generation can continue
//! with the base tables.

use authschema_interface::{Casing, Diagnostic, FieldAttribute, TableMap};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::SchemaError;

/// Maximum `extends` chain length
const MAX_EXTENDS_DEPTH: usize = 8;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuthConfig {
    /// Path of a base config, relative to this file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,
    pub plugins: Vec<PluginSpec>,
    pub user: Option<ModelOptions>,
    pub session: Option<SessionOptions>,
    pub account: Option<ModelOptions>,
    pub verification: Option<ModelOptions>,
    pub rate_limit: Option<RateLimitOptions>,
    pub advanced: Option<AdvancedOptions>,
    pub secondary_storage: Option<bool>,
    pub schema: Option<SchemaSection>,
    pub database: Option<DatabaseSection>,
}

/// A plugin reference: a well-known id, or an inline plugin carrying its own tables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PluginSpec {
    Named(String),
    Custom {
        id: String,
        #[serde(default)]
        schema: TableMap,
    },
}

impl PluginSpec {
    pub fn id(&self) -> &str {
        match self {
            PluginSpec::Named(id) => id,
            PluginSpec::Custom { id, .. } => id,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModelOptions {
    pub model_name: Option<String>,
    pub additional_fields: IndexMap<String, FieldAttribute>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionOptions {
    #[serde(flatten)]
    pub model: ModelOptions,
    pub store_session_in_database: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RateLimitOptions {
    pub enabled: Option<bool>,
    /// `memory`, `database` or `secondary-storage`
    pub storage: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdvancedOptions {
    pub database: Option<AdvancedDatabaseOptions>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdvancedDatabaseOptions {
    pub generate_id: Option<GenerateId>,
}

/// `generateId`: `false` to leave ids to the database, or a named strategy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GenerateId {
    Enabled(bool),
    Strategy(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SchemaSection {
    pub use_plural: Option<bool>,
    pub casing: Option<Casing>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DatabaseSection {
    /// Default generation target
    pub dialect: Option<String>,
}

impl AuthConfig {
    /// Layer `child` over `self`: plugins concatenate base-first, sections
    /// set in the child replace the base's.
    pub fn layer(self, child: AuthConfig) -> AuthConfig {
        let mut plugins = self.plugins;
        plugins.extend(child.plugins);

        AuthConfig {
            extends: None,
            plugins,
            user: child.user.or(self.user),
            session: child.session.or(self.session),
            account: child.account.or(self.account),
            verification: child.verification.or(self.verification),
            rate_limit: child.rate_limit.or(self.rate_limit),
            advanced: child.advanced.or(self.advanced),
            secondary_storage: child.secondary_storage.or(self.secondary_storage),
            schema: child.schema.or(self.schema),
            database: child.database.or(self.database),
        }
    }

    pub fn uses_uuid(&self) -> bool {
        matches!(
            self.advanced
                .as_ref()
                .and_then(|advanced| advanced.database.as_ref())
                .and_then(|database| database.generate_id.as_ref()),
            Some(GenerateId::Strategy(strategy)) if strategy == "uuid"
        )
    }
}

/// A loaded config and the warnings raised while loading it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedConfig {
    pub config: AuthConfig,
    pub diagnostics: Vec<Diagnostic>,
}

/// Tracks the files on the current `extends` chain
#[derive(Debug, Default)]
pub struct LoadGuard {
    stack: Vec<PathBuf>,
}

impl LoadGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    fn enter(&mut self, path: &Path) -> Result<(), SchemaError> {
        if self.stack.iter().any(|loaded| loaded == path) {
            return Err(config_error(path, "circular extends chain"));
        }
        if self.stack.len() >= MAX_EXTENDS_DEPTH {
            return Err(config_error(
                path,
                &format!("extends chain deeper than {} files", MAX_EXTENDS_DEPTH),
            ));
        }
        self.stack.push(path.to_path_buf());
        Ok(())
    }

    fn leave(&mut self) {
        self.stack.pop();
    }
}

/// Load the auth config at `path`.
///
/// With `throw_on_error` any failure is returned. Otherwise it becomes a
/// warning and the config is empty.
pub fn load_auth_config(path: &Path, throw_on_error: bool) -> Result<LoadedConfig, SchemaError> {
    let mut guard = LoadGuard::new();

    match load_layered(path, &mut guard) {
        Ok(config) => Ok(LoadedConfig {
            config,
            diagnostics: Vec::new(),
        }),
        Err(err) if throw_on_error => Err(err),
        Err(err) => Ok(LoadedConfig {
            config: AuthConfig::default(),
            diagnostics: vec![Diagnostic::warning(format!(
                "{}. Generating base tables only.",
                err
            ))],
        }),
    }
}

/// Load one config file and every base it extends
pub fn load_layered(path: &Path, guard: &mut LoadGuard) -> Result<AuthConfig, SchemaError> {
    let canonical = path.canonicalize().map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => config_error(path, "file not found"),
        _ => config_error(path, &e.to_string()),
    })?;

    guard.enter(&canonical)?;
    // Left on success and failure alike
    let result = load_entered(&canonical, guard);
    guard.leave();
    result
}

fn load_entered(canonical: &Path, guard: &mut LoadGuard) -> Result<AuthConfig, SchemaError> {
    let mut config = parse_config_file(canonical)?;
    if let Some(extends) = config.extends.take() {
        let base_path = canonical
            .parent()
            .map(|dir| dir.join(&extends))
            .unwrap_or_else(|| PathBuf::from(&extends));
        let base = load_layered(&base_path, guard)?;
        config = base.layer(config);
    }
    Ok(config)
}

fn parse_config_file(path: &Path) -> Result<AuthConfig, SchemaError> {
    let source = std::fs::read_to_string(path).map_err(|e| config_error(path, &e.to_string()))?;

    let is_toml = path.extension().is_some_and(|ext| ext == "toml");
    if is_toml {
        // TOML documents are always tables at the top level
        toml::from_str(&source).map_err(|e| config_error(path, &e.to_string()))
    } else {
        let value: serde_json::Value =
            serde_json::from_str(&source).map_err(|e| config_error(path, &e.to_string()))?;
        if !value.is_object() {
            return Err(config_error(path, "expected an object at the top level"));
        }
        serde_json::from_value(value).map_err(|e| config_error(path, &e.to_string()))
    }
}

fn config_error(path: &Path, message: &str) -> SchemaError {
    SchemaError::ConfigLoad {
        path: path.to_path_buf(),
        message: message.to_string(),
    }
}

#[cfg(test)]
#[path = "config_loader/config_loader_tests.rs"]
mod config_loader_tests;
