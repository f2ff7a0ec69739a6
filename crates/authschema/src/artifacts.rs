use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::error::SchemaError;
use crate::generate::{Target, TargetOutput};

/// Directory generated files are mirrored to, next to the project root
pub const MIRROR_DIR_NAME: &str = ".authschema";

/// File names written for a target
pub fn artifact_files(target: Target) -> Vec<String> {
    match target {
        Target::Relational(dialect) => vec![
            format!("schema.{}.ts", dialect),
            format!("schema.{}.mjs", dialect),
        ],
        Target::Document => vec!["auth-tables.convex.ts".to_string()],
    }
}

/// The mirror location for an output directory nested inside `node_modules`.
///
/// The project root is the directory holding the outermost `node_modules`.
pub fn mirror_dir(out_dir: &Path) -> Option<PathBuf> {
    let mut root = PathBuf::new();
    for component in out_dir.components() {
        if component == Component::Normal("node_modules".as_ref()) {
            return Some(root.join(MIRROR_DIR_NAME));
        }
        root.push(component);
    }
    None
}

/// Write every output under `out_dir`, and under the mirror directory when
/// there is one. Returns the written paths.
pub fn write_artifacts(out_dir: &Path, outputs: &[TargetOutput]) -> Result<Vec<PathBuf>, SchemaError> {
    let mut dirs = vec![out_dir.to_path_buf()];
    dirs.extend(mirror_dir(out_dir));

    let mut written = Vec::new();
    for dir in &dirs {
        fs::create_dir_all(dir)?;

        for output in outputs {
            for file_name in artifact_files(output.target) {
                let path = dir.join(file_name);
                fs::write(&path, &output.source.code)?;
                written.push(path);
            }
        }
    }

    Ok(written)
}
