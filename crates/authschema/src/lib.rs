mod artifacts;
mod auth_tables;
mod config_loader;
mod error;
mod generate;
mod plugins;

pub use artifacts::{artifact_files, mirror_dir, write_artifacts, MIRROR_DIR_NAME};
pub use auth_tables::{base_tables, build_table_map, merge_fragment, schema_options};
pub use config_loader::{
    load_auth_config, load_layered, AdvancedDatabaseOptions, AdvancedOptions, AuthConfig,
    DatabaseSection, GenerateId, LoadGuard, LoadedConfig, ModelOptions, PluginSpec,
    RateLimitOptions, SchemaSection, SessionOptions,
};
pub use error::SchemaError;
pub use generate::{generate, generate_targets, resolve_strict, GenerationReport, Target, TargetOutput};
pub use plugins::plugin_fragment;

pub use authschema_drizzle::Dialect;
pub use authschema_interface::{
    Casing, Diagnostic, DroppedReference, GeneratedSource, SchemaOptions, Severity, TableMap,
};
