use super::*;
use std::error::Error;

#[test]
fn test_display_config_load() {
    let err = SchemaError::ConfigLoad {
        path: PathBuf::from("auth.config.json"),
        message: "file not found".to_string(),
    };
    let display = err.to_string();
    assert!(display.contains("auth.config.json"));
    assert!(display.contains("file not found"));
}

#[test]
fn test_display_unsupported_dialect() {
    let err: SchemaError = UnsupportedDialect("mssql".to_string()).into();
    assert!(err.to_string().contains("'mssql'"));
    assert!(err.source().is_some());
}

#[test]
fn test_from_io_error() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test error");
    let err: SchemaError = io_err.into();
    match err {
        SchemaError::Io(_) => (),
        _ => panic!("Expected Io variant"),
    }
    assert!(err.to_string().starts_with("I/O error"));
}

#[test]
fn test_from_json_error() {
    let json_err: Result<serde_json::Value, _> = serde_json::from_str("{ invalid json }");
    let err: SchemaError = json_err.unwrap_err().into();
    match err {
        SchemaError::Json(_) => (),
        _ => panic!("Expected Json variant"),
    }
}

#[test]
fn test_config_load_has_no_source() {
    let err = SchemaError::ConfigLoad {
        path: PathBuf::from("a.json"),
        message: "boom".to_string(),
    };
    assert!(err.source().is_none());
}
