//! Show the reconciliation plan without applying it

use std::path::PathBuf;

use clap::Args;

use polsync_core::PolicySet;
use polsync_engine::{ReconciliationError, Reconciler};

use super::{connect, load_records, reconciler_config, DEPLOY_POLICIES_FOLDER};
use crate::error::CliResult;
use crate::output;

/// Compute and print the changes deploy would make
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Folder containing policy files
    #[arg(long, hide = true, default_value = DEPLOY_POLICIES_FOLDER)]
    pub policies_folder: PathBuf,

    /// Treat every policy present remotely as changed
    #[arg(long)]
    pub always_update: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Execute the plan command
pub async fn execute(args: PlanArgs) -> CliResult<()> {
    if !args.json {
        output::banner("plan");
    }

    let records = load_records(&args.policies_folder)?;
    let desired = PolicySet::from_records(records).map_err(ReconciliationError::from)?;

    let (_, clients) = connect().await?;
    let store = clients.policy_store();
    let reconciler = Reconciler::with_config(&store, reconciler_config(args.always_update));

    let plan = reconciler.plan(&desired).await?;

    if args.json {
        output::print_json(&plan)?;
    } else {
        output::print_plan(&plan);
    }

    tracing::info!(summary = %plan.summary(), "Plan computed, nothing applied");
    Ok(())
}
