// src/main.rs

use anyhow::{Context, Result};
use authschema::{
    build_table_map, generate_targets, load_auth_config, resolve_strict, schema_options,
    write_artifacts, AuthConfig, Casing, Diagnostic, PluginSpec, Severity,
};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use colored::Colorize;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "authschema")]
#[command(about = "Generate Drizzle and Convex schemas for auth tables", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate schema files for one or more targets
    Generate {
        /// Auth config file (JSON or TOML)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// sqlite, postgresql, mysql or convex. Repeatable
        #[arg(short, long = "target", value_name = "TARGET")]
        targets: Vec<String>,

        /// Output directory
        #[arg(short, long, value_name = "DIR", default_value = "generated")]
        out_dir: PathBuf,

        /// Fail on config and target errors instead of warning
        #[arg(long)]
        strict: bool,

        /// Pluralize table names
        #[arg(long)]
        plural: bool,

        /// Use UUID identifiers
        #[arg(long)]
        uuid: bool,

        /// Physical name casing
        #[arg(long, value_enum)]
        casing: Option<CasingArg>,

        /// Enable a plugin by id. Repeatable
        #[arg(long = "plugin", value_name = "ID")]
        plugins: Vec<String>,

        /// Sessions are kept in secondary storage
        #[arg(long)]
        secondary_storage: bool,

        /// Print generated code instead of writing files
        #[arg(long)]
        stdout: bool,
    },
    /// Print the resolved table map as JSON
    Tables {
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        #[arg(long = "plugin", value_name = "ID")]
        plugins: Vec<String>,

        #[arg(long)]
        secondary_storage: bool,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum CasingArg {
    #[value(name = "camelCase")]
    CamelCase,
    #[value(name = "snake_case")]
    SnakeCase,
}

impl From<CasingArg> for Casing {
    fn from(arg: CasingArg) -> Self {
        match arg {
            CasingArg::CamelCase => Casing::CamelCase,
            CasingArg::SnakeCase => Casing::SnakeCase,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            config,
            targets,
            out_dir,
            strict,
            plural,
            uuid,
            casing,
            plugins,
            secondary_storage,
            stdout,
        } => {
            let strict = resolve_strict(strict, std::env::var("NODE_ENV").ok().as_deref());
            let config = resolve_config(config.as_deref(), plugins, secondary_storage, strict)?;

            let (tables, diagnostics) = build_table_map(&config);
            print_diagnostics(&diagnostics);

            let mut options = schema_options(&config);
            options.use_plural |= plural;
            options.use_uuid |= uuid;
            if let Some(casing) = casing {
                options.casing = casing.into();
            }

            let targets = if targets.is_empty() {
                vec![default_target(&config)]
            } else {
                targets
            };

            let report = generate_targets(&tables, &targets, &options, strict)
                .context("Schema generation failed")?;
            print_diagnostics(&report.diagnostics);

            for output in &report.outputs {
                for dropped in &output.source.dropped_references {
                    eprintln!(
                        "{} {} ({} output)",
                        "Warning:".yellow(),
                        dropped,
                        output.target
                    );
                }
            }

            if stdout {
                for output in &report.outputs {
                    print!("{}", output.source.code);
                }
            } else {
                let written = write_artifacts(&out_dir, &report.outputs)
                    .with_context(|| format!("Failed to write schema files to {}", out_dir.display()))?;
                for path in written {
                    println!("{} Generated {}", "==>".green(), path.display());
                }
            }
        }
        Commands::Tables {
            config,
            plugins,
            secondary_storage,
        } => {
            let strict = resolve_strict(false, std::env::var("NODE_ENV").ok().as_deref());
            let config = resolve_config(config.as_deref(), plugins, secondary_storage, strict)?;

            let (tables, diagnostics) = build_table_map(&config);
            print_diagnostics(&diagnostics);

            let json = serde_json::to_string_pretty(&tables).context("Failed to serialize tables")?;
            println!("{}", json);
        }
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "authschema", &mut std::io::stdout());
        }
    }

    Ok(())
}

/// Load the config file if any, then apply command line additions
fn resolve_config(
    path: Option<&Path>,
    plugins: Vec<String>,
    secondary_storage: bool,
    strict: bool,
) -> Result<AuthConfig> {
    let mut config = match path {
        Some(path) => {
            let loaded = load_auth_config(path, strict)?;
            print_diagnostics(&loaded.diagnostics);
            loaded.config
        }
        None => AuthConfig::default(),
    };

    config.plugins.extend(plugins.into_iter().map(PluginSpec::Named));
    if secondary_storage {
        config.secondary_storage = Some(true);
    }

    Ok(config)
}

fn default_target(config: &AuthConfig) -> String {
    config
        .database
        .as_ref()
        .and_then(|database| database.dialect.clone())
        .unwrap_or_else(|| "sqlite".to_string())
}

fn print_diagnostics(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        match diagnostic.severity {
            Severity::Warning => eprintln!("{} {}", "Warning:".yellow(), diagnostic.message),
            Severity::Error => eprintln!("{} {}", "error:".red(), diagnostic.message),
        }
    }
}
