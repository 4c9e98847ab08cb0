//! polsync - keep IAM customer-managed policies in sync with a repository
//!
//! - `validate`: check repository policies before they are trusted
//! - `plan`: show what `deploy` would change
//! - `deploy`: create, update and delete remote policies

use clap::{Parser, Subcommand};

mod commands;
mod error;
mod logging;
mod output;

use error::CliResult;
use logging::LogLevel;

/// polsync - IAM policy deployment
#[derive(Parser)]
#[command(name = "polsync")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Log per-policy decisions
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    /// Log everything, including remote client internals
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile remote policies with the repository
    Deploy(commands::deploy::DeployArgs),

    /// Show the changes deploy would make
    Plan(commands::plan::PlanArgs),

    /// Validate repository policies
    Validate(commands::validate::ValidateArgs),
}

#[tokio::main]
async fn main() {
    // Load .env if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    logging::init(LogLevel::from_flags(cli.verbose, cli.debug));

    let result = run(cli).await;

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            e.print();
            std::process::exit(e.exit_code());
        }
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    match cli.command {
        Commands::Deploy(args) => commands::deploy::execute(args).await,
        Commands::Plan(args) => commands::plan::execute(args).await,
        Commands::Validate(args) => commands::validate::execute(args).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_validate_default_folder() {
        let cli = Cli::try_parse_from(["polsync", "validate"]).unwrap();
        match cli.command {
            Commands::Validate(args) => {
                assert_eq!(args.policies_folder, PathBuf::from("../templates/policies/"));
                assert!(!args.json);
            }
            _ => panic!("expected validate"),
        }
    }

    #[test]
    fn test_validate_folder_override() {
        let cli =
            Cli::try_parse_from(["polsync", "validate", "--policies-folder", "policies"]).unwrap();
        match cli.command {
            Commands::Validate(args) => {
                assert_eq!(args.policies_folder, PathBuf::from("policies"))
            }
            _ => panic!("expected validate"),
        }
    }

    #[test]
    fn test_deploy_fixed_folder_and_flags() {
        let cli = Cli::try_parse_from(["polsync", "deploy", "--always-update", "--verbose"])
            .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Deploy(args) => {
                assert_eq!(
                    args.policies_folder,
                    PathBuf::from("../../templates/policies/")
                );
                assert!(args.always_update);
            }
            _ => panic!("expected deploy"),
        }
    }

    #[test]
    fn test_plan_json() {
        let cli = Cli::try_parse_from(["polsync", "--debug", "plan", "--json"]).unwrap();
        assert!(cli.debug);
        assert!(matches!(cli.command, Commands::Plan(ref args) if args.json));
    }

    #[test]
    fn test_unknown_subcommand_rejected() {
        assert!(Cli::try_parse_from(["polsync", "destroy"]).is_err());
    }
}
