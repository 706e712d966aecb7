//! Intake CLI - sanitize untrusted text and check tool arguments from the shell

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use intake_core::{
    get_tracker_id, sanitize_workflow_name, validate_required_fields, Intake, IntakeConfig,
    SanitizeOptions, TrackerFormat,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "intake")]
#[command(about = "Intake - sanitize untrusted text before an agentic workflow sees it")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Sanitize stdin and write the result to stdout
    Sanitize {
        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Output budget in bytes
        #[arg(long)]
        max_length: Option<usize>,
        /// Redact this domain and its subdomains (repeatable)
        #[arg(long = "deny", value_name = "DOMAIN")]
        denied: Vec<String>,
        /// Redact URLs to any host not listed (repeatable)
        #[arg(long = "allow", value_name = "DOMAIN")]
        allowed: Vec<String>,
        /// Leave mentions of this handle live (repeatable)
        #[arg(long = "allow-mention", value_name = "HANDLE")]
        allowed_mentions: Vec<String>,
        /// Source label recorded with each redaction
        #[arg(long)]
        context: Option<String>,
        /// Where redaction records are appended
        #[arg(long)]
        audit_log: Option<PathBuf>,
    },
    /// Print the filesystem-safe form of a workflow name
    WorkflowName {
        /// Workflow name as written
        name: String,
    },
    /// Print the tracker ID of this run
    TrackerId {
        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Output format
        #[arg(long, value_enum, default_value_t = FormatArg::Text)]
        format: FormatArg,
    },
    /// List required fields missing from tool arguments
    Validate {
        /// JSON file holding the tool's input schema
        #[arg(long)]
        schema: PathBuf,
        /// JSON file holding the call arguments
        #[arg(long)]
        args: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Text,
    Markdown,
}

impl From<FormatArg> for TrackerFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Text => TrackerFormat::Text,
            FormatArg::Markdown => TrackerFormat::Markdown,
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Commands::Sanitize {
            config,
            max_length,
            denied,
            allowed,
            allowed_mentions,
            context,
            audit_log,
        } => {
            let mut config = load_config(config.as_deref())?;
            if let Some(max_length) = max_length {
                config.sanitizer.max_length = max_length;
            }
            config.sanitizer.domains.denied.extend(denied);
            if !allowed.is_empty() {
                config
                    .sanitizer
                    .domains
                    .allowed
                    .get_or_insert_with(Vec::new)
                    .extend(allowed);
            }
            if let Some(path) = audit_log {
                config.sanitizer.audit_log_path = path;
            }

            let intake = Intake::new(config).context("invalid sanitizer configuration")?;

            let mut raw = Vec::new();
            io::stdin()
                .read_to_end(&mut raw)
                .context("failed to read stdin")?;
            let input = decode_lossy(raw);

            let options = SanitizeOptions {
                allowed_aliases: allowed_mentions,
                source_context: context,
                ..SanitizeOptions::default()
            };
            let output = intake.sanitize_content(&input, &options);

            let mut stdout = io::stdout().lock();
            stdout.write_all(output.as_bytes())?;
            stdout.flush()?;
        }
        Commands::WorkflowName { name } => {
            println!("{}", sanitize_workflow_name(&name));
        }
        Commands::TrackerId { config, format } => {
            let config = load_config(config.as_deref())?;
            print!("{}", get_tracker_id(config.tracker_id.as_deref(), format.into()));
        }
        Commands::Validate { schema, args } => {
            let schema = read_json(&schema)?;
            let args = read_json(&args)?;
            let missing = validate_required_fields(&args, &schema);
            for field in &missing {
                println!("{field}");
            }
            if !missing.is_empty() {
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Config file (or defaults) with environment overrides applied.
fn load_config(path: Option<&Path>) -> anyhow::Result<IntakeConfig> {
    let config = match path {
        Some(path) => IntakeConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => IntakeConfig::default(),
    };
    Ok(config.with_env_overrides())
}

/// Malformed UTF-8 becomes U+FFFD instead of failing the run.
fn decode_lossy(raw: Vec<u8>) -> String {
    String::from_utf8(raw).unwrap_or_else(|err| String::from_utf8_lossy(err.as_bytes()).into_owned())
}

fn read_json(path: &Path) -> anyhow::Result<serde_json::Value> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid JSON in {}", path.display()))
}
