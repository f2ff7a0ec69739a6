//! Drizzle ORM schema generation for the relational dialects.

mod build;
mod column_builder;
mod id_strategy;
mod type_mapper;

pub use build::build;
pub use column_builder::ColumnBuilder;
pub use id_strategy::{id_column, is_foreign_key_uuid, uuid_fallback_warning};
pub use type_mapper::{column_type, ColumnType, Dialect, UnsupportedDialect};
