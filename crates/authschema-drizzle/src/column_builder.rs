use authschema_interface::naming::{property_access, property_key};
use authschema_interface::OnDelete;

use crate::type_mapper::ColumnType;

/// One chained call on a column constructor
#[derive(Debug, Clone, PartialEq)]
enum Modifier {
    NotNull,
    Unique,
    PrimaryKey,
    DefaultRandom,
    /// `.default(...)` with an already rendered literal
    Default(String),
    /// `.$defaultFn(...)` with the referenced function source
    DefaultFn(String),
    /// `.$onUpdate(...)` with the referenced function source
    OnUpdate(String),
    References {
        table: String,
        field: String,
        on_delete: Option<OnDelete>,
    },
}

/// Helper for building one Drizzle column declaration
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnBuilder {
    property: String,
    column_name: String,
    column_type: ColumnType,
    modifiers: Vec<Modifier>,
}

impl ColumnBuilder {
    /// Create a column for a schema property backed by a physical column
    pub fn new(property: &str, column_name: &str, column_type: ColumnType) -> Self {
        ColumnBuilder {
            property: property.to_string(),
            column_name: column_name.to_string(),
            column_type,
            modifiers: Vec::new(),
        }
    }

    /// Constructor symbol this column needs imported
    pub fn function(&self) -> &'static str {
        self.column_type.function
    }

    pub fn not_null(mut self) -> Self {
        self.modifiers.push(Modifier::NotNull);
        self
    }

    pub fn unique(mut self) -> Self {
        self.modifiers.push(Modifier::Unique);
        self
    }

    pub fn primary_key(mut self) -> Self {
        self.modifiers.push(Modifier::PrimaryKey);
        self
    }

    pub fn default_random(mut self) -> Self {
        self.modifiers.push(Modifier::DefaultRandom);
        self
    }

    /// Inline a string default, quoted
    pub fn string_default(mut self, value: &str) -> Self {
        self.modifiers
            .push(Modifier::Default(format!("'{}'", escape_string(value))));
        self
    }

    /// Inline a boolean or number default, bare
    pub fn raw_default(mut self, value: &str) -> Self {
        self.modifiers.push(Modifier::Default(value.to_string()));
        self
    }

    /// Reference a default generator without invoking it
    pub fn default_fn(mut self, source: &str) -> Self {
        self.modifiers.push(Modifier::DefaultFn(source.to_string()));
        self
    }

    /// Reference an update hook without invoking it
    pub fn on_update(mut self, source: &str) -> Self {
        self.modifiers.push(Modifier::OnUpdate(source.to_string()));
        self
    }

    /// Reference `field` on the table bound to `table`
    pub fn references(mut self, table: &str, field: &str, on_delete: Option<OnDelete>) -> Self {
        self.modifiers.push(Modifier::References {
            table: table.to_string(),
            field: field.to_string(),
            on_delete,
        });
        self
    }

    /// Build the `property: constructor(...).modifier()...` string
    pub fn build(&self) -> String {
        let mut result = format!(
            "{}: {}",
            property_key(&self.property),
            self.column_type.render(&self.column_name)
        );

        for modifier in &self.modifiers {
            match modifier {
                Modifier::NotNull => result.push_str(".notNull()"),
                Modifier::Unique => result.push_str(".unique()"),
                Modifier::PrimaryKey => result.push_str(".primaryKey()"),
                Modifier::DefaultRandom => result.push_str(".defaultRandom()"),
                Modifier::Default(value) => result.push_str(&format!(".default({})", value)),
                Modifier::DefaultFn(source) => result.push_str(&format!(".$defaultFn({})", source)),
                Modifier::OnUpdate(source) => result.push_str(&format!(".$onUpdate({})", source)),
                Modifier::References {
                    table,
                    field,
                    on_delete,
                } => {
                    let target = property_access(table, field);
                    match on_delete {
                        Some(action) => result.push_str(&format!(
                            ".references(() => {}, {{ onDelete: '{}' }})",
                            target,
                            action.as_str()
                        )),
                        None => result.push_str(&format!(".references(() => {})", target)),
                    }
                }
            }
        }

        result
    }
}

/// Escape special characters for a single-quoted TypeScript string literal
fn escape_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}
