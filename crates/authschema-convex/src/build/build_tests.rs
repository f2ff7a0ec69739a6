use super::*;
use authschema_interface::{FieldAttribute, FieldType, OnDelete};
use pretty_assertions::assert_eq;

fn user_table() -> TableSchema {
    TableSchema::new()
        .field("id", FieldAttribute::new(FieldType::String).required())
        .field("name", FieldAttribute::new(FieldType::String).required())
        .field("email", FieldAttribute::new(FieldType::String).required().unique())
        .field("image", FieldAttribute::new(FieldType::String))
        .field("createdAt", FieldAttribute::new(FieldType::Date).required())
}

#[test]
fn test_build_user_table() {
    let mut tables = TableMap::new();
    tables.insert("user".to_string(), user_table());

    let output = build(&tables);

    let expected = "\
import { defineTable } from 'convex/server'
import { v } from 'convex/values'

export const authTables = {
  user: defineTable({
    name: v.string(),
    email: v.string(),
    image: v.optional(v.union(v.null(), v.string())),
    createdAt: v.number(),
  }).index('email_name', ['email', 'name']).index('name', ['name']).index('email', ['email']),
}
";
    assert_eq!(output.code, expected);
    assert!(output.diagnostics.is_empty());
}

#[test]
fn test_build_drops_identifier_field() {
    let mut tables = TableMap::new();
    tables.insert("user".to_string(), user_table());

    let output = build(&tables);
    assert!(!output.code.contains("    id:"));
    assert!(!output.code.contains("_id"));
}

#[test]
fn test_build_table_without_indexes_has_no_index_calls() {
    let mut tables = TableMap::new();
    tables.insert(
        "note".to_string(),
        TableSchema::new().field("body", FieldAttribute::new(FieldType::Json).required()),
    );

    let output = build(&tables);
    assert!(output.code.contains("  note: defineTable({\n    body: v.string(),\n  }),\n"));
    assert!(!output.code.contains(".index("));
}

#[test]
fn test_build_session_indexes_keep_declared_field_order() {
    let mut tables = TableMap::new();
    tables.insert(
        "session".to_string(),
        TableSchema::new()
            .field("expiresAt", FieldAttribute::new(FieldType::Date).required())
            .field(
                "userId",
                FieldAttribute::new(FieldType::String)
                    .required()
                    .references("user", "id", Some(OnDelete::Cascade)),
            ),
    );

    let output = build(&tables);
    assert!(output.code.contains(
        "}).index('expiresAt', ['expiresAt']).index('expiresAt_userId', ['expiresAt', 'userId']).index('userId', ['userId']),"
    ));
}

#[test]
fn test_build_array_validators() {
    let mut tables = TableMap::new();
    tables.insert(
        "passkey".to_string(),
        TableSchema::new()
            .field("transports", FieldAttribute::new(FieldType::StringArray))
            .field("counters", FieldAttribute::new(FieldType::NumberArray).required()),
    );

    let output = build(&tables);
    assert!(output.code.contains("transports: v.optional(v.union(v.null(), v.array(v.string()))),"));
    assert!(output.code.contains("counters: v.array(v.number()),"));
}

#[test]
fn test_build_uses_model_name_override() {
    let mut tables = TableMap::new();
    tables.insert(
        "user".to_string(),
        TableSchema::new()
            .with_model_name("members")
            .field("name", FieldAttribute::new(FieldType::String).required()),
    );

    let output = build(&tables);
    assert!(output.code.contains("  members: defineTable({"));
    assert!(!output.code.contains("  user: "));
}

#[test]
fn test_build_quotes_non_identifier_table_names() {
    let mut tables = TableMap::new();
    tables.insert(
        "user".to_string(),
        TableSchema::new()
            .with_model_name("auth-user")
            .field("name", FieldAttribute::new(FieldType::String).required()),
    );

    let output = build(&tables);
    assert!(output.code.contains("  'auth-user': defineTable({"));
}

#[test]
fn test_build_omits_values_import_without_fields() {
    let mut tables = TableMap::new();
    tables.insert("marker".to_string(), TableSchema::new());

    let output = build(&tables);
    assert_eq!(
        output.code,
        "import { defineTable } from 'convex/server'\n\nexport const authTables = {\n  marker: defineTable({}),\n}\n"
    );
}

#[test]
fn test_build_is_deterministic() {
    let mut tables = TableMap::new();
    tables.insert("user".to_string(), user_table());
    tables.insert(
        "verification".to_string(),
        TableSchema::new()
            .field("identifier", FieldAttribute::new(FieldType::String).required())
            .field("expiresAt", FieldAttribute::new(FieldType::Date).required()),
    );

    assert_eq!(build(&tables), build(&tables));
}

#[test]
fn test_build_empty_table_map() {
    assert_eq!(build(&TableMap::new()).code, "");
}

#[test]
fn test_build_reports_index_name_collisions() {
    let mut tables = TableMap::new();
    tables.insert(
        "verification".to_string(),
        TableSchema::new()
            .field("expiresAt", FieldAttribute::new(FieldType::Date).required())
            .field("identifier", FieldAttribute::new(FieldType::String).required())
            .field("identifier_x", FieldAttribute::new(FieldType::String).required()),
    );
    tables.insert(
        "account".to_string(),
        TableSchema::new()
            .field("accountId", FieldAttribute::new(FieldType::String).required())
            .field("providerId", FieldAttribute::new(FieldType::String).required())
            .field(
                "accountId_providerId",
                FieldAttribute::new(FieldType::String).sortable(),
            ),
    );

    let output = build(&tables);

    assert_eq!(output.code.matches(".index('accountId_providerId'").count(), 1);
    assert!(output.code.contains(".index('accountId_providerId', ['accountId', 'providerId'])"));
    assert_eq!(output.diagnostics.len(), 1);
}
