//! cdpgen: generates typed DevTools protocol clients from protocol JSON.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cdp_compiler::config::OutputGranularity;
use cdp_compiler::{CodeGenerationSettings, Compiler, ProtocolDefinition};

mod ui;

#[derive(Parser)]
#[command(name = "cdpgen")]
#[command(about = "Generates typed protocol clients from DevTools protocol JSON")]
#[command(version)]
struct Cli {
    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Where the protocol schema comes from.
#[derive(clap::Args)]
struct SchemaArgs {
    /// Protocol JSON files, merged in order
    #[arg(short, long = "schema", value_name = "FILE")]
    schemas: Vec<PathBuf>,

    /// Directory of protocol JSON files
    #[arg(long, value_name = "DIR", conflicts_with = "schemas")]
    schema_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate code from protocol schemas
    Generate {
        #[command(flatten)]
        schema: SchemaArgs,

        /// Output directory for generated code
        #[arg(short, long, default_value = "generated")]
        output: PathBuf,

        /// Generation settings (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Target language, overrides the settings file
        #[arg(short, long)]
        language: Option<String>,

        /// Root namespace, overrides the settings file
        #[arg(long)]
        namespace: Option<String>,

        /// One file per domain instead of one per type
        #[arg(long)]
        per_domain: bool,
    },

    /// Validate protocol schemas without generating code
    Check {
        #[command(flatten)]
        schema: SchemaArgs,
    },
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Generate {
            schema,
            output,
            config,
            language,
            namespace,
            per_domain,
        } => {
            let mut settings = match config {
                Some(path) => CodeGenerationSettings::load(&path)?,
                None => CodeGenerationSettings::default(),
            };
            if let Some(language) = language {
                settings.language = language;
            }
            if let Some(namespace) = namespace {
                settings.root_namespace = namespace;
            }
            if per_domain {
                settings.granularity = OutputGranularity::PerDomain;
            }

            generate(&schema, &output, settings)?;
        }

        Commands::Check { schema } => {
            check(&schema)?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_protocol(schema: &SchemaArgs) -> miette::Result<ProtocolDefinition> {
    let protocol = match &schema.schema_dir {
        Some(dir) => ProtocolDefinition::load_dir(dir)?,
        None if schema.schemas.is_empty() => {
            return Err(miette::miette!(
                help = "Pass --schema <FILE> (repeatable) or --schema-dir <DIR>",
                "No protocol schema given"
            ));
        }
        None => ProtocolDefinition::load(&schema.schemas)?,
    };
    tracing::debug!(domains = protocol.domains().len(), "protocol loaded");
    Ok(protocol)
}

fn generate(schema: &SchemaArgs, output: &Path, settings: CodeGenerationSettings) -> miette::Result<()> {
    let start = Instant::now();
    ui::print_compact_header(env!("CARGO_PKG_VERSION"));
    println!();

    let protocol = load_protocol(schema)?;
    let spinner = ui::spinner("Generating protocol types...");
    let compiler = Compiler::new(settings);
    let result = compiler.compile(&protocol, output);
    spinner.finish_and_clear();

    let result = match result {
        Ok(result) => result,
        Err(e) => {
            ui::nope_header();
            return Err(e.into());
        }
    };

    ui::success(&format!(
        "{} artifacts {} {} files {} {} redirects",
        result.artifacts,
        ui::symbols::DOT,
        result.files,
        ui::symbols::DOT,
        result.aliases
    ));
    println!();

    ui::box_header("DOMAINS");
    ui::box_line("");
    let max = result.per_domain.iter().map(|(_, n)| *n).max().unwrap_or(1);
    for (domain, count) in &result.per_domain {
        ui::domain_line(domain, *count, max);
    }
    ui::box_line("");
    ui::box_footer();
    println!();

    for warning in &result.warnings {
        ui::warning(&warning.to_string());
    }
    if !result.warnings.is_empty() {
        println!();
    }

    ui::timing("Done", start.elapsed().as_millis());
    ui::dim(&format!("Output written to {}", output.display()));
    Ok(())
}

fn check(schema: &SchemaArgs) -> miette::Result<()> {
    let protocol = load_protocol(schema)?;
    let spinner = ui::spinner("Checking protocol...");
    let compiler = Compiler::new(CodeGenerationSettings::default());
    let result = compiler.check(&protocol);
    spinner.finish_and_clear();

    match result {
        Ok(warnings) => {
            ui::looking_good();
            println!();
            let domains = protocol.domains();
            println!(
                "    {} domains {} {} types {} {} commands {} {} events",
                domains.len(),
                ui::symbols::DOT,
                domains.iter().map(|d| d.types.len()).sum::<usize>(),
                ui::symbols::DOT,
                domains.iter().map(|d| d.commands.len()).sum::<usize>(),
                ui::symbols::DOT,
                domains.iter().map(|d| d.events.len()).sum::<usize>()
            );
            if let Some(version) = protocol.version() {
                ui::dim(&format!("Protocol version {}.{}", version.major, version.minor));
            }
            for warning in &warnings {
                ui::warning(&warning.to_string());
            }
            Ok(())
        }
        Err(e) => {
            ui::nope_header();
            Err(e.into())
        }
    }
}
