mod build;
mod index_deriver;
mod validator_mapper;

pub use build::build;
pub use index_deriver::{derive_indexes, derive_indexes_with_diagnostics, document_field_name, IndexSpec};
pub use validator_mapper::{map_type_to_validator, wrap_optional};
