use authschema_interface::naming::property_key;
use authschema_interface::{push_unique, GeneratedSource, TableMap, TableSchema, ID_FIELD};

use crate::index_deriver::{derive_indexes_with_diagnostics, document_field_name, IndexSpec};
use crate::validator_mapper::{map_type_to_validator, wrap_optional};

/// A rendered-on-demand `<name>: defineTable({...}).index(...)` entry
#[derive(Debug)]
struct TableDefinition {
    name: String,
    fields: Vec<(String, String)>,
    indexes: Vec<IndexSpec>,
}

impl TableDefinition {
    fn render(&self) -> String {
        let mut result = format!("  {}: defineTable({{", property_key(&self.name));

        if self.fields.is_empty() {
            result.push('}');
        } else {
            result.push('\n');
            for (name, validator) in &self.fields {
                result.push_str(&format!("    {}: {},\n", property_key(name), validator));
            }
            result.push_str("  }");
        }
        result.push(')');

        for index in &self.indexes {
            let fields: Vec<String> = index.fields().iter().map(|f| format!("'{}'", f)).collect();
            result.push_str(&format!(".index('{}', [{}])", index.name(), fields.join(", ")));
        }

        result.push(',');
        result
    }
}

/// Generate the Convex table definitions module.
///
/// The identifier field is left to the document store. Each table carries
/// its derived indexes as trailing `.index(...)` calls.
pub fn build(tables: &TableMap) -> GeneratedSource {
    let mut output = GeneratedSource::default();
    if tables.is_empty() {
        return output;
    }

    let (mut indexes, diagnostics) = derive_indexes_with_diagnostics(tables);
    for diagnostic in diagnostics {
        push_unique(&mut output.diagnostics, diagnostic);
    }

    let definitions: Vec<TableDefinition> = tables
        .iter()
        .map(|(key, table)| generate_table(key, table, indexes.swap_remove(key).unwrap_or_default()))
        .collect();

    let mut code = String::from("import { defineTable } from 'convex/server'\n");
    if definitions.iter().any(|d| !d.fields.is_empty()) {
        code.push_str("import { v } from 'convex/values'\n");
    }

    code.push_str("\nexport const authTables = {\n");
    for definition in &definitions {
        code.push_str(&definition.render());
        code.push('\n');
    }
    code.push_str("}\n");

    output.code = code;
    output
}

fn generate_table(key: &str, table: &TableSchema, indexes: Vec<IndexSpec>) -> TableDefinition {
    let fields = table
        .fields
        .iter()
        .filter(|(name, _)| name.as_str() != ID_FIELD)
        .map(|(name, field)| {
            let validator = map_type_to_validator(field.field_type);
            (document_field_name(name), wrap_optional(validator, field.required))
        })
        .collect();

    TableDefinition {
        name: table.model_name_override(key).unwrap_or(key).to_string(),
        fields,
        indexes,
    }
}

#[cfg(test)]
#[path = "build/build_tests.rs"]
mod build_tests;
