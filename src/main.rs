mod cli;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use cli::{Cli, CodeArgs, Commands, FormatArgs, InspectArgs};
use postalcode::config::{Config, ConfigError};
use postalcode::observability::init_tracing;
use postalcode::{PostalCodeError, PostalCodeManager};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    PostalCode(#[from] PostalCodeError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
}

impl CliError {
    fn exit_code(&self) -> ExitCode {
        match self {
            Self::PostalCode(PostalCodeError::InvalidPostalCode { .. }) => ExitCode::from(1),
            Self::PostalCode(PostalCodeError::UnknownCountry { .. }) => ExitCode::from(2),
            Self::Config(_) => ExitCode::from(3),
            Self::Encode(_) => ExitCode::FAILURE,
        }
    }
}

#[derive(Debug, Serialize)]
struct Inspection {
    original: String,
    normalized: String,
    country: String,
    supported: bool,
    valid: Option<bool>,
    formatted: Option<String>,
    hint: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("error: {error}");
            return CliError::from(error).exit_code();
        }
    };

    init_tracing(&config.logging, cli.verbose);
    tracing::info!(
        path = %config_path(&cli).display(),
        handlers = config.handlers.len(),
        "Configuration loaded"
    );
    let manager = PostalCodeManager::from_config(&config);

    match run(cli.command, &manager, &config) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error}");
            error.exit_code()
        }
    }
}

/// File the configuration is read from; it may not exist
fn config_path(cli: &Cli) -> PathBuf {
    cli.config.clone().unwrap_or_else(Config::default_path)
}

fn load_config(cli: &Cli) -> Result<Config, ConfigError> {
    match &cli.config {
        Some(path) => Config::load_from_path(path.clone()),
        None => Config::load(),
    }
}

fn run(
    command: Commands,
    manager: &PostalCodeManager,
    config: &Config,
) -> Result<ExitCode, CliError> {
    match command {
        Commands::Validate(CodeArgs { code, country }) => {
            if manager.validate(&code, &country)? {
                println!("valid");
                Ok(ExitCode::SUCCESS)
            } else {
                println!("invalid");
                Ok(ExitCode::from(1))
            }
        }
        Commands::Format(FormatArgs { target, fallback }) => {
            let formatted = match fallback {
                Some(fallback) => manager
                    .postal_code(target.code, target.country)
                    .format_or(fallback)?,
                None => manager.format(&target.code, &target.country)?,
            };
            println!("{formatted}");
            Ok(ExitCode::SUCCESS)
        }
        Commands::Hint { country } => {
            println!("{}", manager.hint(&country)?);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Inspect(InspectArgs { target, json }) => {
            let inspection = inspect(manager, target);
            if json {
                println!("{}", serde_json::to_string_pretty(&inspection)?);
            } else {
                print_inspection(&inspection);
            }
            Ok(match inspection.valid {
                Some(true) => ExitCode::SUCCESS,
                Some(false) => ExitCode::from(1),
                None => ExitCode::from(2),
            })
        }
        Commands::Countries => {
            for country in manager.supported_countries() {
                println!("{country}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Config => {
            print!("{}", config.to_toml()?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn inspect(manager: &PostalCodeManager, target: CodeArgs) -> Inspection {
    let postal_code = manager.postal_code(target.code, target.country);

    Inspection {
        original: postal_code.original().to_string(),
        normalized: postal_code.normalized(),
        country: postal_code.country().to_ascii_uppercase(),
        supported: postal_code.is_country_supported(),
        valid: postal_code.is_valid().ok(),
        formatted: postal_code.format_or_none().ok().flatten(),
        hint: postal_code.hint().ok(),
    }
}

fn print_inspection(inspection: &Inspection) {
    let or_dash = |value: Option<&str>| value.unwrap_or("-").to_string();

    println!("original:   {}", inspection.original);
    println!("normalized: {}", inspection.normalized);
    println!("country:    {}", inspection.country);
    println!("supported:  {}", inspection.supported);
    println!(
        "valid:      {}",
        or_dash(inspection.valid.map(|valid| if valid { "yes" } else { "no" }))
    );
    println!("formatted:  {}", or_dash(inspection.formatted.as_deref()));
    println!("hint:       {}", or_dash(inspection.hint.as_deref()));
}
