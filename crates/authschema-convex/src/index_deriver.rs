//! Secondary index derivation for document tables.
//!
//! Each table's index set is the curated catalog entries for its key,
//! followed by single-field indexes for fields marked `unique`, `sortable`
//! or carrying a reference.

use authschema_interface::{push_unique, Diagnostic, FieldAttribute, TableMap, TableSchema, ID_FIELD};
use indexmap::IndexMap;
use std::collections::HashSet;

/// Index the upstream query patterns are known to need, by table key
const INDEX_CATALOG: &[(&str, &[&[&str]])] = &[
    (
        "account",
        &[&["accountId"], &["accountId", "providerId"], &["providerId", "userId"]],
    ),
    ("session", &[&["expiresAt"], &["expiresAt", "userId"]]),
    ("verification", &[&["expiresAt"], &["identifier"]]),
    ("user", &[&["email", "name"], &["name"], &["userId"]]),
    ("rateLimit", &[&["key"]]),
    ("passkey", &[&["credentialID"]]),
    ("twoFactor", &[&["userId"]]),
    ("jwks", &[&["createdAt"]]),
];

/// A secondary index over one or more document fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexSpec {
    Single(String),
    Compound(Vec<String>),
}

impl IndexSpec {
    fn from_fields(fields: Vec<String>) -> Self {
        match <[String; 1]>::try_from(fields) {
            Ok([field]) => IndexSpec::Single(field),
            Err(fields) => IndexSpec::Compound(fields),
        }
    }

    /// Fields in declared order, as passed to the index constructor
    pub fn fields(&self) -> &[String] {
        match self {
            IndexSpec::Single(field) => std::slice::from_ref(field),
            IndexSpec::Compound(fields) => fields,
        }
    }

    /// Canonical index name: the sorted field names joined with `_`.
    ///
    /// Only the name is sorted; `fields()` keeps the declared order.
    pub fn name(&self) -> String {
        let mut sorted: Vec<&str> = self.fields().iter().map(String::as_str).collect();
        sorted.sort_unstable();
        sorted.join("_")
    }
}

/// Physical document field name; only the identifier is renamed
pub fn document_field_name(name: &str) -> String {
    if name == ID_FIELD {
        "_id".to_string()
    } else {
        name.to_string()
    }
}

/// Derive the index set of every table, in table map order
pub fn derive_indexes(tables: &TableMap) -> IndexMap<String, Vec<IndexSpec>> {
    derive_indexes_with_diagnostics(tables).0
}

/// Derive indexes and report the ones that had to be left out.
///
/// Identical definitions collapse silently. The document store requires
/// index names to be unique per table, so a later definition whose name is
/// already taken by a different one is dropped with a warning.
pub fn derive_indexes_with_diagnostics(
    tables: &TableMap,
) -> (IndexMap<String, Vec<IndexSpec>>, Vec<Diagnostic>) {
    let mut diagnostics = Vec::new();
    let indexes = tables
        .iter()
        .map(|(key, table)| (key.clone(), table_indexes(key, table, &mut diagnostics)))
        .collect();
    (indexes, diagnostics)
}

fn table_indexes(key: &str, table: &TableSchema, diagnostics: &mut Vec<Diagnostic>) -> Vec<IndexSpec> {
    let catalog = catalog_indexes(key, table);

    let catalog_singles: HashSet<String> = catalog
        .iter()
        .filter_map(|index| match index {
            IndexSpec::Single(field) => Some(field.clone()),
            IndexSpec::Compound(_) => None,
        })
        .collect();

    let special = table
        .fields
        .iter()
        // The document store indexes its identifier natively
        .filter(|(name, field)| name.as_str() != ID_FIELD && is_special(field))
        .map(|(name, _)| document_field_name(name))
        .filter(|name| !catalog_singles.contains(name))
        .map(IndexSpec::Single);

    let mut result: Vec<IndexSpec> = Vec::new();
    for index in catalog.into_iter().chain(special) {
        let name = index.name();
        let Some(position) = result.iter().position(|existing| existing.name() == name) else {
            result.push(index);
            continue;
        };
        let existing = &result[position];
        if existing.fields() != index.fields() {
            push_unique(
                diagnostics,
                Diagnostic::warning(format!(
                    "Index '{}' on table '{}' over [{}] is dropped: the name is taken by [{}]",
                    name,
                    key,
                    index.fields().join(", "),
                    existing.fields().join(", ")
                )),
            );
        }
    }
    result
}

fn catalog_indexes(key: &str, table: &TableSchema) -> Vec<IndexSpec> {
    let Some((_, entries)) = INDEX_CATALOG.iter().find(|(table_key, _)| *table_key == key) else {
        return Vec::new();
    };

    entries
        .iter()
        // Skip entries naming fields this table does not declare
        .filter(|fields| fields.iter().all(|field| table.fields.contains_key(*field)))
        .map(|fields| {
            IndexSpec::from_fields(fields.iter().map(|field| document_field_name(field)).collect())
        })
        .collect()
}

fn is_special(field: &FieldAttribute) -> bool {
    field.unique || field.sortable || field.references.is_some()
}
