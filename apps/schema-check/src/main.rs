use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use runtime::{AppConfig, CliArgs, OutputConfig, OutputFormat};
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use user_schemas::{SchemaError, SchemaKind};

/// schema-check - validate user payloads against the user management schemas
#[derive(Parser)]
#[command(name = "schema-check")]
#[command(about = "schema-check - validate user payloads against the user management schemas")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format (overrides config)
    #[arg(short, long, value_enum)]
    format: Option<FormatArg>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a JSON object against a schema
    Validate {
        /// Schema name, e.g. user-create or UserCreate
        #[arg(short, long, value_parser = parse_schema_kind)]
        schema: SchemaKind,

        /// JSON file to read, stdin when omitted or "-"
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// Print the JSON Schema of a record
    Schema {
        #[arg(short, long, value_parser = parse_schema_kind)]
        schema: SchemaKind,
    },
    /// Check configuration
    Check,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

fn parse_schema_kind(s: &str) -> Result<SchemaKind, String> {
    s.parse::<SchemaKind>().map_err(|e| {
        let known: Vec<_> = SchemaKind::ALL.iter().map(|k| k.cli_name()).collect();
        format!("{e} (expected one of: {})", known.join(", "))
    })
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        print_config: cli.print_config,
        verbose: cli.verbose,
        format: cli.format.map(OutputFormat::from),
    };

    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);

    // Relative log paths are resolved next to the config file, or the cwd.
    let base_dir = cli
        .config
        .as_deref()
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let logging_config = config.logging.as_ref().cloned().unwrap_or_default();
    runtime::logging::init_logging_from_config(&logging_config, &base_dir);
    tracing::debug!(config = ?args.config, "schema-check starting");

    if args.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(ExitCode::SUCCESS);
    }

    match cli.command.unwrap_or(Commands::Check) {
        Commands::Validate { schema, input } => run_validate(&config.output, schema, input),
        Commands::Schema { schema } => {
            print_json(&config.output, &schema.json_schema())?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Check => check_config(&config),
    }
}

fn read_input(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file {}", path.display())),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read input from stdin")?;
            Ok(buf)
        }
    }
}

fn run_validate(
    output: &OutputConfig,
    kind: SchemaKind,
    input: Option<PathBuf>,
) -> Result<ExitCode> {
    let text = read_input(input.as_deref())?;

    match user_schemas::validate_json(kind, &text) {
        Ok(record) => {
            tracing::info!(schema = %kind, "input is valid");
            print_json(output, &record)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(SchemaError::Invalid(err)) => {
            tracing::info!(schema = %kind, violations = err.violations.len(), "input rejected");
            match output.format {
                OutputFormat::Text => println!("{err}"),
                OutputFormat::Json => print_json(output, &err)?,
            }
            Ok(ExitCode::FAILURE)
        }
        Err(other) => Err(other).context("Validation could not run"),
    }
}

fn print_json<T: Serialize>(output: &OutputConfig, value: &T) -> Result<()> {
    let rendered = if output.pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .context("Failed to serialize output")?;
    println!("{rendered}");
    Ok(())
}

fn check_config(config: &AppConfig) -> Result<ExitCode> {
    tracing::info!("Checking configuration...");
    println!("Configuration check passed");
    println!("{}", config.to_yaml()?);
    Ok(ExitCode::SUCCESS)
}
