use authschema_drizzle::{Dialect, UnsupportedDialect};
use authschema_interface::{push_unique, Diagnostic, GeneratedSource, SchemaOptions, TableMap};
use std::fmt;
use std::str::FromStr;
use std::thread;

use crate::error::SchemaError;

/// A generation back-end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    Relational(Dialect),
    /// The Convex document schema
    Document,
}

impl Target {
    pub fn parse(name: &str) -> Result<Self, UnsupportedDialect> {
        match name {
            "convex" => Ok(Target::Document),
            other => other.parse().map(Target::Relational),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Target::Relational(dialect) => dialect.as_str(),
            Target::Document => "convex",
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Target {
    type Err = UnsupportedDialect;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Target::parse(s)
    }
}

/// Run one generator
pub fn generate(tables: &TableMap, target: Target, options: &SchemaOptions) -> GeneratedSource {
    match target {
        Target::Relational(dialect) => authschema_drizzle::build(tables, dialect, options),
        Target::Document => authschema_convex::build(tables),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TargetOutput {
    pub target: Target,
    pub source: GeneratedSource,
}

/// Everything one generation run produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationReport {
    /// One output per distinct valid target, in request order
    pub outputs: Vec<TargetOutput>,
    /// Every diagnostic of the run, each reported once
    pub diagnostics: Vec<Diagnostic>,
}

/// Generate every named target.
///
/// Unsupported names are skipped with a warning, or fail the run when
/// `strict`. Targets are generated concurrently and share `tables`.
pub fn generate_targets(
    tables: &TableMap,
    names: &[String],
    options: &SchemaOptions,
    strict: bool,
) -> Result<GenerationReport, SchemaError> {
    let mut report = GenerationReport::default();
    let mut targets: Vec<Target> = Vec::new();

    for name in names {
        match Target::parse(name) {
            Ok(target) if targets.contains(&target) => {}
            Ok(target) => targets.push(target),
            Err(err) if strict => return Err(err.into()),
            Err(err) => push_unique(
                &mut report.diagnostics,
                Diagnostic::warning(format!("{}. Skipping.", err)),
            ),
        }
    }

    let sources: Vec<GeneratedSource> = thread::scope(|scope| {
        let handles: Vec<_> = targets
            .iter()
            .map(|&target| scope.spawn(move || generate(tables, target, options)))
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic)))
            .collect()
    });

    for (target, source) in targets.into_iter().zip(sources) {
        for diagnostic in &source.diagnostics {
            push_unique(&mut report.diagnostics, diagnostic.clone());
        }
        report.outputs.push(TargetOutput { target, source });
    }

    Ok(report)
}

/// Strict mode is requested explicitly or implied by a production build
pub fn resolve_strict(flag: bool, node_env: Option<&str>) -> bool {
    flag || node_env == Some("production")
}
