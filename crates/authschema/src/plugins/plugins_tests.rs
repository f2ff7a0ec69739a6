use super::*;

#[test]
fn test_unknown_plugin() {
    assert_eq!(plugin_fragment("organization-ish"), None);
    // Ids are case sensitive
    assert_eq!(plugin_fragment("TwoFactor"), None);
}

#[test]
fn test_schema_less_plugins_contribute_nothing() {
    for id in SCHEMA_LESS_PLUGINS {
        assert_eq!(plugin_fragment(id), Some(TableMap::new()));
    }
}

#[test]
fn test_two_factor_fragment() {
    let fragment = plugin_fragment("twoFactor").unwrap();
    let keys: Vec<&String> = fragment.keys().collect();
    assert_eq!(keys, vec!["user", "twoFactor"]);

    let user_id = &fragment["twoFactor"].fields["userId"];
    let references = user_id.references.as_ref().unwrap();
    assert_eq!(references.model, "user");
    assert_eq!(references.field, "id");
    assert_eq!(references.on_delete, Some(OnDelete::Cascade));
}

#[test]
fn test_admin_fragment_extends_session() {
    let fragment = plugin_fragment("admin").unwrap();
    assert!(fragment["session"].fields.contains_key("impersonatedBy"));
    assert!(fragment["user"].fields.contains_key("banExpires"));
}

#[test]
fn test_every_known_plugin_has_a_fragment() {
    for id in ["twoFactor", "username", "admin", "passkey", "jwt", "anonymous", "phoneNumber"] {
        let fragment = plugin_fragment(id).unwrap();
        assert!(!fragment.is_empty(), "{} should contribute tables", id);
    }
}

#[test]
fn test_username_is_unique() {
    let fragment = plugin_fragment("username").unwrap();
    assert!(fragment["user"].fields["username"].unique);
}
