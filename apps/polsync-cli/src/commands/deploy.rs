//! Reconcile remote policies with the repository

use std::path::PathBuf;

use clap::Args;

use polsync_core::PolicySet;
use polsync_engine::{ReconciliationError, ReconciliationOutcome, Reconciler};

use super::{connect, load_records, reconciler_config, DEPLOY_POLICIES_FOLDER};
use crate::error::CliResult;
use crate::output;

/// Create, update and delete remote policies to match the repository
#[derive(Args, Debug)]
pub struct DeployArgs {
    /// Folder containing policy files
    #[arg(long, hide = true, default_value = DEPLOY_POLICIES_FOLDER)]
    pub policies_folder: PathBuf,

    /// Publish a new version for every policy present remotely, even when
    /// its active document already matches
    #[arg(long)]
    pub always_update: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Execute the deploy command
pub async fn execute(args: DeployArgs) -> CliResult<()> {
    if !args.json {
        output::banner("deploy");
    }

    let records = load_records(&args.policies_folder)?;
    let desired = PolicySet::from_records(records).map_err(ReconciliationError::from)?;

    let (_, clients) = connect().await?;
    let store = clients.policy_store();
    let reconciler = Reconciler::with_config(&store, reconciler_config(args.always_update));

    let plan = reconciler.plan(&desired).await?;
    if !args.json {
        output::print_plan(&plan);
    }

    let statistics = reconciler.apply(&plan).await?;

    if args.json {
        output::print_json(&ReconciliationOutcome { plan, statistics })?;
    } else {
        output::print_statistics(&statistics);
    }

    tracing::info!("Policies deployed successfully");
    Ok(())
}
