use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use querysight::analyser::{Analyser, QueryResponse};
use querysight::config::{self, AnalysisSettings};
use serde::Serialize;
use std::io::{Read as _, Write as _};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "querysight",
    about = "Pick a visualization for SQL query results",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory for daily rotating log files (defaults to the platform data directory)
    #[arg(long, global = true, env = "QUERYSIGHT_LOG_DIR")]
    pub log_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyse a query response and print the visualization envelope
    Analyse {
        /// JSON file holding `{ data, generated_sql, ... }`. Reads stdin when omitted or `-`.
        input: Option<PathBuf>,

        /// Path to a JSON settings file. Defaults to the user config directory.
        #[arg(long, env = "QUERYSIGHT_CONFIG")]
        config: Option<PathBuf>,

        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,

        /// Print only the persisted record (type, data, chart config)
        #[arg(long)]
        record: bool,
    },
    /// Inspect or create the settings file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective settings
    Show {
        /// Path to a JSON settings file
        #[arg(long, env = "QUERYSIGHT_CONFIG")]
        config: Option<PathBuf>,
    },
    /// Write the default settings to the settings file
    Init {
        /// Path to write. Defaults to the user config directory.
        #[arg(long, env = "QUERYSIGHT_CONFIG")]
        config: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

pub fn run_command(command: Commands) -> Result<()> {
    match command {
        Commands::Analyse {
            input,
            config,
            pretty,
            record,
        } => handle_analyse(input.as_deref(), config.as_deref(), pretty, record),
        Commands::Config { action } => match action {
            ConfigAction::Show { config } => handle_config_show(config.as_deref()),
            ConfigAction::Init { config, force } => handle_config_init(config.as_deref(), force),
        },
    }
}

fn handle_analyse(
    input: Option<&Path>,
    config_path: Option<&Path>,
    pretty: bool,
    record: bool,
) -> Result<()> {
    let settings = load_effective_settings(config_path)?;
    let raw = read_input(input)?;
    let response = QueryResponse::from_json(&raw).context("Failed to parse query response")?;

    tracing::debug!(
        rows = response.rows().len(),
        sql = %response.generated_sql,
        "analysing query response"
    );

    let envelope = Analyser::new(settings).analyse(&response);
    if record {
        write_json(&envelope.to_record(), pretty)
    } else {
        write_json(&envelope, pretty)
    }
}

fn handle_config_show(config_path: Option<&Path>) -> Result<()> {
    let settings = load_effective_settings(config_path)?;
    write_json(&settings, true)
}

fn handle_config_init(config_path: Option<&Path>, force: bool) -> Result<()> {
    let path = resolve_config_path(config_path)?;
    if path.exists() && !force {
        anyhow::bail!(
            "Settings file already exists at {} (use --force to overwrite)",
            path.display()
        );
    }

    config::save_settings(&path, &AnalysisSettings::default())
        .with_context(|| format!("Failed to write settings to {}", path.display()))?;
    tracing::info!("Wrote default settings to {}", path.display());
    Ok(())
}

fn resolve_config_path(config_path: Option<&Path>) -> Result<PathBuf> {
    match config_path {
        Some(path) => Ok(path.to_path_buf()),
        None => config::default_config_path()
            .ok_or_else(|| anyhow::anyhow!("Failed to determine config directory")),
    }
}

fn load_effective_settings(config_path: Option<&Path>) -> Result<AnalysisSettings> {
    let path = match config_path {
        Some(path) => path.to_path_buf(),
        None => match config::default_config_path() {
            Some(path) => path,
            None => return Ok(AnalysisSettings::default()),
        },
    };
    config::load_settings(&path)
        .with_context(|| format!("Failed to load settings from {}", path.display()))
}

fn read_input(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file: {}", path.display())),
        _ => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read query response from stdin")?;
            Ok(buffer)
        }
    }
}

fn write_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    if pretty {
        serde_json::to_writer_pretty(&mut stdout, value)?;
    } else {
        serde_json::to_writer(&mut stdout, value)?;
    }
    writeln!(stdout)?;
    Ok(())
}
