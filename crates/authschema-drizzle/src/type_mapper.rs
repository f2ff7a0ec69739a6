use authschema_interface::FieldType;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    SQLite,
    PostgreSQL,
    MySQL,
}

impl Dialect {
    pub const ALL: [Dialect; 3] = [Dialect::SQLite, Dialect::PostgreSQL, Dialect::MySQL];

    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::SQLite => "sqlite",
            Dialect::PostgreSQL => "postgresql",
            Dialect::MySQL => "mysql",
        }
    }

    /// Drizzle table constructor for this dialect
    pub fn table_function(&self) -> &'static str {
        match self {
            Dialect::SQLite => "sqliteTable",
            Dialect::PostgreSQL => "pgTable",
            Dialect::MySQL => "mysqlTable",
        }
    }

    /// Module the column constructors are imported from
    pub fn import_path(&self) -> &'static str {
        match self {
            Dialect::SQLite => "drizzle-orm/sqlite-core",
            Dialect::PostgreSQL => "drizzle-orm/pg-core",
            Dialect::MySQL => "drizzle-orm/mysql-core",
        }
    }

    /// Whether foreign keys to UUID identifiers get a dedicated column type
    pub fn supports_uuid(&self) -> bool {
        matches!(self, Dialect::PostgreSQL | Dialect::MySQL)
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A dialect name outside the supported set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedDialect(pub String);

impl fmt::Display for UnsupportedDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unsupported database dialect: '{}' (expected sqlite, postgresql or mysql)",
            self.0
        )
    }
}

impl std::error::Error for UnsupportedDialect {}

impl FromStr for Dialect {
    type Err = UnsupportedDialect;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sqlite" => Ok(Dialect::SQLite),
            "postgresql" => Ok(Dialect::PostgreSQL),
            "mysql" => Ok(Dialect::MySQL),
            other => Err(UnsupportedDialect(other.to_string())),
        }
    }
}

/// A Drizzle column constructor with its static options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnType {
    /// Constructor name, also the symbol imported from the dialect module
    pub function: &'static str,
    /// SQLite storage mode (`boolean`, `timestamp`)
    pub mode: Option<&'static str>,
    /// Fixed length for `varchar`
    pub length: Option<u32>,
}

impl ColumnType {
    pub(crate) const fn plain(function: &'static str) -> Self {
        ColumnType {
            function,
            mode: None,
            length: None,
        }
    }

    const fn with_mode(function: &'static str, mode: &'static str) -> Self {
        ColumnType {
            function,
            mode: Some(mode),
            length: None,
        }
    }

    pub(crate) const fn uuid_string() -> Self {
        ColumnType {
            function: "varchar",
            mode: None,
            length: Some(36),
        }
    }

    /// Render the constructor call for a physical column name
    pub fn render(&self, column_name: &str) -> String {
        let mut options = Vec::new();
        if let Some(mode) = self.mode {
            options.push(format!("mode: '{}'", mode));
        }
        if let Some(length) = self.length {
            options.push(format!("length: {}", length));
        }

        if options.is_empty() {
            format!("{}('{}')", self.function, column_name)
        } else {
            format!(
                "{}('{}', {{ {} }})",
                self.function,
                column_name,
                options.join(", ")
            )
        }
    }
}

/// Map an abstract field type to the column constructor for a dialect.
///
/// Arrays and JSON are stored in their serialized form, so they share the
/// string mapping. `is_uuid_foreign_key` only has an effect on dialects with
/// a UUID column strategy; SQLite keeps `text`.
pub fn column_type(field_type: FieldType, dialect: Dialect, is_uuid_foreign_key: bool) -> ColumnType {
    if is_uuid_foreign_key {
        match dialect {
            Dialect::PostgreSQL => return ColumnType::plain("uuid"),
            Dialect::MySQL => return ColumnType::uuid_string(),
            Dialect::SQLite => {}
        }
    }

    match (field_type, dialect) {
        (FieldType::Boolean, Dialect::SQLite) => ColumnType::with_mode("integer", "boolean"),
        (FieldType::Boolean, _) => ColumnType::plain("boolean"),
        (FieldType::Date, Dialect::SQLite) => ColumnType::with_mode("integer", "timestamp"),
        (FieldType::Date, _) => ColumnType::plain("timestamp"),
        (FieldType::Number, Dialect::MySQL) => ColumnType::plain("int"),
        (FieldType::Number, _) => ColumnType::plain("integer"),
        (
            FieldType::String | FieldType::Json | FieldType::StringArray | FieldType::NumberArray,
            _,
        ) => ColumnType::plain("text"),
    }
}
