use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "postalcode")]
#[command(about = "Validate and format postal codes", long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to $POSTALCODE_CONFIG or config/postalcode.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level regardless of configuration
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check a postal code against the rule of a country
    Validate(CodeArgs),
    /// Print the canonical form of a postal code
    Format(FormatArgs),
    /// Print the expected format for a country
    Hint {
        country: String,
    },
    /// Show everything known about a postal code
    Inspect(InspectArgs),
    /// List supported country codes
    Countries,
    /// Print the effective configuration as TOML
    Config,
}

#[derive(clap::Args, Debug)]
pub struct CodeArgs {
    pub code: String,
    pub country: String,
}

#[derive(clap::Args, Debug)]
pub struct FormatArgs {
    #[command(flatten)]
    pub target: CodeArgs,

    /// Print this instead of failing when the code is rejected
    #[arg(long)]
    pub fallback: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct InspectArgs {
    #[command(flatten)]
    pub target: CodeArgs,

    /// Emit JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_format_with_fallback() {
        let cli = Cli::try_parse_from([
            "postalcode",
            "format",
            "12345",
            "pl",
            "--fallback",
            "n/a",
            "-v",
        ])
        .unwrap();

        assert!(cli.verbose);
        match cli.command {
            Commands::Format(args) => {
                assert_eq!(args.target.code, "12345");
                assert_eq!(args.target.country, "pl");
                assert_eq!(args.fallback.as_deref(), Some("n/a"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_global_config_path() {
        let cli =
            Cli::try_parse_from(["postalcode", "--config", "custom.toml", "countries"]).unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        assert!(matches!(cli.command, Commands::Countries));
    }
}
