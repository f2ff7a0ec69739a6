use authschema_interface::FieldType;

/// Maps an abstract field type to a Convex value validator
pub fn map_type_to_validator(field_type: FieldType) -> &'static str {
    match field_type {
        FieldType::String => "v.string()",
        FieldType::Boolean => "v.boolean()",
        // Dates are stored as epoch milliseconds
        FieldType::Number | FieldType::Date => "v.number()",
        // JSON is stored serialized
        FieldType::Json => "v.string()",
        FieldType::StringArray => "v.array(v.string())",
        FieldType::NumberArray => "v.array(v.number())",
    }
}

/// Optional fields accept both an absent value and an explicit null
pub fn wrap_optional(validator: &str, required: bool) -> String {
    if required {
        validator.to_string()
    } else {
        format!("v.optional(v.union(v.null(), {}))", validator)
    }
}
