use authschema_interface::naming::physical_field_name;
use authschema_interface::{Diagnostic, FieldAttribute, SchemaOptions, ID_FIELD};

use crate::column_builder::ColumnBuilder;
use crate::type_mapper::{ColumnType, Dialect};

/// Build the primary key column every table starts with.
///
/// SQLite always uses `text`, PostgreSQL switches to a generated `uuid` when
/// `use_uuid` is set, MySQL always uses `varchar(36)`.
pub fn id_column(dialect: Dialect, options: &SchemaOptions) -> ColumnBuilder {
    let column_name = physical_field_name(ID_FIELD, options);

    match dialect {
        Dialect::SQLite => ColumnBuilder::new(ID_FIELD, &column_name, ColumnType::plain("text")).primary_key(),
        Dialect::PostgreSQL if options.use_uuid => {
            ColumnBuilder::new(ID_FIELD, &column_name, ColumnType::plain("uuid"))
                .default_random()
                .primary_key()
        }
        Dialect::PostgreSQL => ColumnBuilder::new(ID_FIELD, &column_name, ColumnType::plain("text")).primary_key(),
        Dialect::MySQL => {
            ColumnBuilder::new(ID_FIELD, &column_name, ColumnType::uuid_string()).primary_key()
        }
    }
}

/// Whether a field is a foreign key to a UUID identifier column
pub fn is_foreign_key_uuid(field: &FieldAttribute, dialect: Dialect, use_uuid: bool) -> bool {
    use_uuid
        && dialect.supports_uuid()
        && field
            .references
            .as_ref()
            .is_some_and(|references| references.field == ID_FIELD)
}

/// The warning raised when UUID identifiers are requested on SQLite
pub fn uuid_fallback_warning(dialect: Dialect, use_uuid: bool) -> Option<Diagnostic> {
    if use_uuid && dialect == Dialect::SQLite {
        Some(Diagnostic::warning(
            "useUuid ignored for SQLite (no native uuid type). Using text.",
        ))
    } else {
        None
    }
}
