use authschema_interface::naming::{binding_name, physical_field_name, physical_table_name};
use authschema_interface::{
    push_unique, DefaultValue, DroppedReference, FieldAttribute, FieldType, GeneratedSource,
    SchemaOptions, TableMap, TableSchema, ID_FIELD,
};
use std::collections::BTreeSet;

use crate::column_builder::ColumnBuilder;
use crate::id_strategy::{id_column, is_foreign_key_uuid, uuid_fallback_warning};
use crate::type_mapper::{column_type, Dialect};

/// Tracks the dialect module symbols the generated body uses
#[derive(Debug, Default)]
struct ImportCollector {
    symbols: BTreeSet<&'static str>,
}

impl ImportCollector {
    fn new() -> Self {
        Self::default()
    }

    fn add(&mut self, symbol: &'static str) {
        self.symbols.insert(symbol);
    }

    fn to_import_statement(&self, import_path: &str) -> String {
        let symbols: Vec<&str> = self.symbols.iter().copied().collect();
        format!("import {{ {} }} from '{}'", symbols.join(", "), import_path)
    }
}

/// A rendered-on-demand `export const <symbol> = <table>('<name>', {...})`
#[derive(Debug)]
struct TableDeclaration {
    symbol: String,
    table_function: &'static str,
    physical_name: String,
    columns: Vec<ColumnBuilder>,
}

impl TableDeclaration {
    fn render(&self) -> String {
        let mut result = format!(
            "export const {} = {}('{}', {{\n",
            self.symbol, self.table_function, self.physical_name
        );

        for column in &self.columns {
            result.push_str("  ");
            result.push_str(&column.build());
            result.push_str(",\n");
        }

        result.push_str("})");
        result
    }
}

/// Generate the Drizzle schema module for one dialect.
///
/// Tables are emitted in map order, each starting with its identifier
/// column. Foreign keys whose target table is missing from `tables` are left
/// out of the output and listed in `dropped_references`.
pub fn build(tables: &TableMap, dialect: Dialect, options: &SchemaOptions) -> GeneratedSource {
    let mut output = GeneratedSource::default();
    let mut imports = ImportCollector::new();

    if let Some(warning) = uuid_fallback_warning(dialect, options.use_uuid) {
        push_unique(&mut output.diagnostics, warning);
    }

    let mut declarations = Vec::with_capacity(tables.len());
    for (key, table) in tables {
        declarations.push(generate_table(
            key,
            table,
            dialect,
            tables,
            options,
            &mut imports,
            &mut output,
        ));
    }

    // An empty map is an empty module
    if declarations.is_empty() {
        return output;
    }

    let body: Vec<String> = declarations.iter().map(|d| d.render()).collect();

    output.code = format!(
        "{}\n\n{}\n",
        imports.to_import_statement(dialect.import_path()),
        body.join("\n\n")
    );
    output
}

fn generate_table(
    key: &str,
    table: &TableSchema,
    dialect: Dialect,
    all_tables: &TableMap,
    options: &SchemaOptions,
    imports: &mut ImportCollector,
    output: &mut GeneratedSource,
) -> TableDeclaration {
    imports.add(dialect.table_function());

    let physical_name = physical_table_name(key, table.model_name.as_deref(), options);

    let id = id_column(dialect, options);
    imports.add(id.function());

    let mut columns = vec![id];
    for (field_name, field) in &table.fields {
        // The identifier column always comes from the id strategy
        if field_name == ID_FIELD {
            continue;
        }

        let column = generate_column(key, field_name, field, dialect, all_tables, options, output);
        imports.add(column.function());
        columns.push(column);
    }

    TableDeclaration {
        symbol: binding_name(key),
        table_function: dialect.table_function(),
        physical_name,
        columns,
    }
}

fn generate_column(
    table_key: &str,
    field_name: &str,
    field: &FieldAttribute,
    dialect: Dialect,
    all_tables: &TableMap,
    options: &SchemaOptions,
    output: &mut GeneratedSource,
) -> ColumnBuilder {
    let column_name = physical_field_name(field_name, options);
    let uuid_fk = is_foreign_key_uuid(field, dialect, options.use_uuid);
    let mut column = ColumnBuilder::new(
        field_name,
        &column_name,
        column_type(field.field_type, dialect, uuid_fk),
    );

    if field.required && field.default_value.is_none() {
        column = column.not_null();
    }

    if field.unique {
        column = column.unique();
    }

    if let Some(default) = &field.default_value {
        column = match default {
            DefaultValue::Boolean(b) => column.raw_default(&b.to_string()),
            DefaultValue::Number(n) => column.raw_default(&n.to_string()),
            DefaultValue::String(s) => column.string_default(s),
            DefaultValue::Deferred(deferred) => column.default_fn(&deferred.source),
        };

        if field.required {
            column = column.not_null();
        }
    }

    if let Some(hook) = &field.on_update {
        if field.field_type == FieldType::Date {
            column = column.on_update(&hook.source);
        }
    }

    if let Some(references) = &field.references {
        if all_tables.contains_key(&references.model) {
            column = column.references(
                &binding_name(&references.model),
                &references.field,
                references.on_delete,
            );
        } else {
            output.dropped_references.push(DroppedReference {
                table: table_key.to_string(),
                field: field_name.to_string(),
                model: references.model.clone(),
            });
        }
    }

    column
}
