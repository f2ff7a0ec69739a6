use authschema_drizzle::UnsupportedDialect;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum SchemaError {
    /// The auth config could not be read, parsed or layered
    ConfigLoad { path: PathBuf, message: String },
    UnsupportedDialect(UnsupportedDialect),
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaError::ConfigLoad { path, message } => {
                write!(f, "Failed to load auth config '{}': {}", path.display(), message)
            }
            SchemaError::UnsupportedDialect(e) => write!(f, "{}", e),
            SchemaError::Io(e) => write!(f, "I/O error: {}", e),
            SchemaError::Json(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl std::error::Error for SchemaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SchemaError::ConfigLoad { .. } => None,
            SchemaError::UnsupportedDialect(e) => Some(e),
            SchemaError::Io(e) => Some(e),
            SchemaError::Json(e) => Some(e),
        }
    }
}

impl From<UnsupportedDialect> for SchemaError {
    fn from(err: UnsupportedDialect) -> Self {
        SchemaError::UnsupportedDialect(err)
    }
}

impl From<std::io::Error> for SchemaError {
    fn from(err: std::io::Error) -> Self {
        SchemaError::Io(err)
    }
}

impl From<serde_json::Error> for SchemaError {
    fn from(err: serde_json::Error) -> Self {
        SchemaError::Json(err)
    }
}

#[cfg(test)]
#[path = "error/error_tests.rs"]
mod error_tests;
