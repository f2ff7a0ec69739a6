use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod naming;

/// Name of the identifier field every table carries implicitly
pub const ID_FIELD: &str = "id";

/// Ordered map of logical table key to table schema.
///
/// Iteration order is insertion order, which is also emission order.
pub type TableMap = IndexMap<String, TableSchema>;

/// Casing applied to physical table and column names
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Casing {
    #[default]
    #[serde(rename = "camelCase")]
    CamelCase,
    #[serde(rename = "snake_case")]
    SnakeCase,
}

impl Casing {
    pub fn as_str(&self) -> &'static str {
        match self {
            Casing::CamelCase => "camelCase",
            Casing::SnakeCase => "snake_case",
        }
    }
}

/// Generation policy, fixed for one generation run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaOptions {
    #[serde(default)]
    pub use_plural: bool,
    #[serde(default)]
    pub use_uuid: bool,
    #[serde(default)]
    pub casing: Casing,
}

/// Utility functions for name transforms
pub struct Utils;

impl Utils {
    pub fn change_case(&self, input: &str, casing: Casing) -> String {
        match casing {
            Casing::CamelCase => input.to_string(),
            Casing::SnakeCase => to_snake_case(input),
        }
    }

    pub fn pluralize(&self, input: &str) -> String {
        if input.is_empty() {
            return String::new();
        }
        pluralizer::pluralize(input, 2, false)
    }
}

/// Convert camelCase to snake_case.
///
/// Acronym runs are split before the general pass, so `OAuthToken` becomes
/// `o_auth_token` and `HTTPServer` becomes `http_server`.
fn to_snake_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + 4);

    for (i, &ch) in chars.iter().enumerate() {
        if i > 0 && ch.is_ascii_uppercase() {
            let prev = chars[i - 1];
            let next = chars.get(i + 1).copied();

            // ACRONYMWord -> ACRONYM_Word
            let acronym_boundary =
                prev.is_ascii_uppercase() && next.is_some_and(|n| n.is_ascii_lowercase());
            // lowerUpper -> lower_Upper
            let word_boundary = prev.is_ascii_lowercase() || prev.is_ascii_digit();

            if acronym_boundary || word_boundary {
                result.push('_');
            }
        }
        result.push(ch);
    }

    result.to_lowercase()
}

/// Abstract field type, independent of any storage dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldType {
    #[serde(rename = "string")]
    String,
    #[serde(rename = "number")]
    Number,
    #[serde(rename = "boolean")]
    Boolean,
    #[serde(rename = "date")]
    Date,
    #[serde(rename = "json")]
    Json,
    #[serde(rename = "string[]")]
    StringArray,
    #[serde(rename = "number[]")]
    NumberArray,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
            FieldType::Date => "date",
            FieldType::Json => "json",
            FieldType::StringArray => "string[]",
            FieldType::NumberArray => "number[]",
        }
    }
}

/// A function-valued default or update hook.
///
/// The source text is emitted as a reference and never evaluated at
/// generation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeferredRef {
    #[serde(rename = "fn")]
    pub source: String,
}

impl DeferredRef {
    pub fn new(source: impl Into<String>) -> Self {
        DeferredRef {
            source: source.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefaultValue {
    Boolean(bool),
    Number(f64),
    String(String),
    Deferred(DeferredRef),
}

/// Referential action applied when the referenced row is deleted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OnDelete {
    #[serde(rename = "cascade")]
    Cascade,
    #[serde(rename = "restrict")]
    Restrict,
    #[serde(rename = "set null")]
    SetNull,
    #[serde(rename = "set default")]
    SetDefault,
    #[serde(rename = "no action")]
    NoAction,
}

impl OnDelete {
    pub fn as_str(&self) -> &'static str {
        match self {
            OnDelete::Cascade => "cascade",
            OnDelete::Restrict => "restrict",
            OnDelete::SetNull => "set null",
            OnDelete::SetDefault => "set default",
            OnDelete::NoAction => "no action",
        }
    }
}

/// Logical foreign key to a field of another table in the same map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct References {
    pub model: String,
    pub field: String,
    #[serde(default, rename = "onDelete", skip_serializing_if = "Option::is_none")]
    pub on_delete: Option<OnDelete>,
}

/// One column/property of one table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldAttribute {
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub unique: bool,
    #[serde(default)]
    pub sortable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<DefaultValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_update: Option<DeferredRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub references: Option<References>,
}

impl FieldAttribute {
    pub fn new(field_type: FieldType) -> Self {
        FieldAttribute {
            field_type,
            required: false,
            unique: false,
            sortable: false,
            default_value: None,
            on_update: None,
            references: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn default_value(mut self, value: DefaultValue) -> Self {
        self.default_value = Some(value);
        self
    }

    pub fn default_fn(self, source: &str) -> Self {
        self.default_value(DefaultValue::Deferred(DeferredRef::new(source)))
    }

    pub fn on_update(mut self, source: &str) -> Self {
        self.on_update = Some(DeferredRef::new(source));
        self
    }

    pub fn references(mut self, model: &str, field: &str, on_delete: Option<OnDelete>) -> Self {
        self.references = Some(References {
            model: model.to_string(),
            field: field.to_string(),
            on_delete,
        });
        self
    }
}

/// One logical table or collection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSchema {
    #[serde(default)]
    pub fields: IndexMap<String, FieldAttribute>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
}

impl TableSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model_name(mut self, model_name: &str) -> Self {
        self.model_name = Some(model_name.to_string());
        self
    }

    pub fn field(mut self, name: &str, attribute: FieldAttribute) -> Self {
        self.fields.insert(name.to_string(), attribute);
        self
    }

    /// The model name when it actually overrides the key
    pub fn model_name_override<'a>(&'a self, key: &str) -> Option<&'a str> {
        self.model_name.as_deref().filter(|name| *name != key)
    }
}

/// Diagnostic severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// A non-fatal condition raised while loading or generating
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
}

impl Diagnostic {
    pub fn warning(message: impl Into<String>) -> Self {
        Diagnostic {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Diagnostic {
            severity: Severity::Error,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {}", severity, self.message)
    }
}

/// Push a diagnostic unless an identical one was already recorded
pub fn push_unique(diagnostics: &mut Vec<Diagnostic>, diagnostic: Diagnostic) {
    if !diagnostics.contains(&diagnostic) {
        diagnostics.push(diagnostic);
    }
}

/// A foreign key left out of the output because its target table is absent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DroppedReference {
    pub table: String,
    pub field: String,
    pub model: String,
}

impl fmt::Display for DroppedReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{} references missing table '{}'",
            self.table, self.field, self.model
        )
    }
}

/// Output of one generator for one target
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedSource {
    pub code: String,
    pub diagnostics: Vec<Diagnostic>,
    pub dropped_references: Vec<DroppedReference>,
}
