//! Subcommand implementations.

pub mod deploy;
pub mod plan;
pub mod validate;

use std::path::Path;

use tracing::info;

use polsync_core::{PolicyRecord, RepositoryLoader};
use polsync_engine::{ReconcilerConfig, UpdateMode};
use polsync_store::aws::AwsClients;
use polsync_store::StoreConfig;

use crate::error::CliResult;

/// Folder read by `deploy` and `plan`.
pub const DEPLOY_POLICIES_FOLDER: &str = "../../templates/policies/";

/// Default folder for `validate`.
pub const VALIDATE_POLICIES_FOLDER: &str = "../templates/policies/";

/// Load every policy file in `folder`.
pub fn load_records(folder: &Path) -> CliResult<Vec<PolicyRecord>> {
    let records = RepositoryLoader::new(folder).load()?;
    info!(folder = %folder.display(), policies = records.len(), "Loaded repository policies");
    Ok(records)
}

/// Read remote configuration from the environment and build the clients.
pub async fn connect() -> CliResult<(StoreConfig, AwsClients)> {
    let config = StoreConfig::from_env()?;
    let clients = AwsClients::connect(&config).await;
    Ok((config, clients))
}

pub fn reconciler_config(always_update: bool) -> ReconcilerConfig {
    ReconcilerConfig {
        update_mode: if always_update {
            UpdateMode::Always
        } else {
            UpdateMode::ContentAware
        },
    }
}
