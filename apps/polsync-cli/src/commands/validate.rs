//! Validate repository policies before deployment

use std::path::PathBuf;

use clap::Args;

use polsync_engine::{Validator, ValidatorConfig};

use super::{connect, load_records, VALIDATE_POLICIES_FOLDER};
use crate::error::CliResult;
use crate::output;

/// Check names, policy grammar and attached policy references
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Folder containing policy files
    #[arg(long, default_value = VALIDATE_POLICIES_FOLDER)]
    pub policies_folder: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Execute the validate command
pub async fn execute(args: ValidateArgs) -> CliResult<()> {
    if !args.json {
        output::banner("validate");
    }

    let records = load_records(&args.policies_folder)?;

    let (config, clients) = connect().await?;
    let advisor = clients.advisor();
    let store = clients.policy_store();
    let validator = Validator::with_config(&advisor, &store, ValidatorConfig::from(&config));

    let report = validator.validate(&records).await?;

    if args.json {
        output::print_json(&report)?;
    } else {
        output::print_report(&report);
    }

    tracing::info!("Policies validated successfully");
    Ok(())
}
