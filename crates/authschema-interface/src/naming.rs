//! Physical name resolution for tables and fields.
//!
//! Names are resolved exactly once per generation; feeding an already
//! physical name back in is not guaranteed to be a no-op.

use crate::{SchemaOptions, Utils};

/// Resolve the physical table name for a logical table key.
///
/// A `model_name` that differs from `key` is returned untouched. A
/// `model_name` equal to `key` is not an override and the usual casing and
/// pluralization rules still apply.
pub fn physical_table_name(key: &str, model_name: Option<&str>, options: &SchemaOptions) -> String {
    if let Some(name) = model_name.filter(|name| *name != key) {
        return name.to_string();
    }

    let utils = Utils;
    let cased = utils.change_case(key, options.casing);

    if options.use_plural {
        utils.pluralize(&cased)
    } else {
        cased
    }
}

/// Resolve the physical column name for a logical field name.
///
/// Field names only receive the casing transform.
pub fn physical_field_name(name: &str, options: &SchemaOptions) -> String {
    Utils.change_case(name, options.casing)
}

/// Whether `name` can be written bare as a TypeScript identifier or key
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// An object literal key, single-quoted unless it is a plain identifier
pub fn property_key(name: &str) -> String {
    if is_identifier(name) {
        name.to_string()
    } else {
        format!("'{}'", name.replace('\\', "\\\\").replace('\'', "\\'"))
    }
}

/// Property access on `object`, bracketed unless `name` is an identifier
pub fn property_access(object: &str, name: &str) -> String {
    if is_identifier(name) {
        format!("{}.{}", object, name)
    } else {
        format!("{}[{}]", object, property_key(name))
    }
}

/// A binding name for a table key.
///
/// Characters outside the identifier set become `_`, and a leading digit
/// gets a `_` prefix.
pub fn binding_name(key: &str) -> String {
    let mut result: String = key
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '$' { c } else { '_' })
        .collect();
    if !result.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_' || c == '$') {
        result.insert(0, '_');
    }
    result
}
