//! Table fragments contributed by well-known auth plugins.

use authschema_interface::{DefaultValue, FieldAttribute, FieldType, OnDelete, TableMap, TableSchema};

/// Plugins that add routes or flows but no storage
const SCHEMA_LESS_PLUGINS: &[&str] = &["magicLink", "emailOTP", "bearer", "multiSession"];

/// The fragment a well-known plugin merges into the table map.
///
/// Returns `None` for unknown ids.
pub fn plugin_fragment(id: &str) -> Option<TableMap> {
    let tables: Vec<(&str, TableSchema)> = match id {
        "twoFactor" => vec![
            (
                "user",
                TableSchema::new().field(
                    "twoFactorEnabled",
                    FieldAttribute::new(FieldType::Boolean)
                        .default_value(DefaultValue::Boolean(false)),
                ),
            ),
            (
                "twoFactor",
                TableSchema::new()
                    .field("secret", FieldAttribute::new(FieldType::String).required())
                    .field("backupCodes", FieldAttribute::new(FieldType::String).required())
                    .field("userId", user_reference()),
            ),
        ],
        "username" => vec![(
            "user",
            TableSchema::new()
                .field("username", FieldAttribute::new(FieldType::String).unique().sortable())
                .field("displayUsername", FieldAttribute::new(FieldType::String)),
        )],
        "admin" => vec![
            (
                "user",
                TableSchema::new()
                    .field("role", FieldAttribute::new(FieldType::String))
                    .field(
                        "banned",
                        FieldAttribute::new(FieldType::Boolean)
                            .default_value(DefaultValue::Boolean(false)),
                    )
                    .field("banReason", FieldAttribute::new(FieldType::String))
                    .field("banExpires", FieldAttribute::new(FieldType::Date)),
            ),
            (
                "session",
                TableSchema::new().field("impersonatedBy", FieldAttribute::new(FieldType::String)),
            ),
        ],
        "passkey" => vec![(
            "passkey",
            TableSchema::new()
                .field("name", FieldAttribute::new(FieldType::String))
                .field("publicKey", FieldAttribute::new(FieldType::String).required())
                .field("userId", user_reference())
                .field("credentialID", FieldAttribute::new(FieldType::String).required())
                .field("counter", FieldAttribute::new(FieldType::Number).required())
                .field("deviceType", FieldAttribute::new(FieldType::String).required())
                .field("backedUp", FieldAttribute::new(FieldType::Boolean).required())
                .field("transports", FieldAttribute::new(FieldType::String))
                .field("createdAt", FieldAttribute::new(FieldType::Date))
                .field("aaguid", FieldAttribute::new(FieldType::String)),
        )],
        "jwt" => vec![(
            "jwks",
            TableSchema::new()
                .field("publicKey", FieldAttribute::new(FieldType::String).required())
                .field("privateKey", FieldAttribute::new(FieldType::String).required())
                .field("createdAt", FieldAttribute::new(FieldType::Date).required()),
        )],
        "anonymous" => vec![(
            "user",
            TableSchema::new().field(
                "isAnonymous",
                FieldAttribute::new(FieldType::Boolean).default_value(DefaultValue::Boolean(false)),
            ),
        )],
        "phoneNumber" => vec![(
            "user",
            TableSchema::new()
                .field("phoneNumber", FieldAttribute::new(FieldType::String).unique().sortable())
                .field("phoneNumberVerified", FieldAttribute::new(FieldType::Boolean)),
        )],
        id if SCHEMA_LESS_PLUGINS.contains(&id) => Vec::new(),
        _ => return None,
    };

    Some(
        tables
            .into_iter()
            .map(|(key, table)| (key.to_string(), table))
            .collect(),
    )
}

fn user_reference() -> FieldAttribute {
    FieldAttribute::new(FieldType::String)
        .required()
        .references("user", "id", Some(OnDelete::Cascade))
}

#[cfg(test)]
#[path = "plugins/plugins_tests.rs"]
mod plugins_tests;
