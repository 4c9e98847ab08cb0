//! Current state as reported by the remote store.

use std::collections::HashMap;

use tracing::{debug, info};

use polsync_core::{PolicyDocument, PolicySet};
use polsync_store::{
    ListPolicies, Paginator, PolicyScope, RemotePolicy, RemotePolicyStore, StoreError,
};

use crate::error::{ReconciliationError, ReconciliationResult};

/// Customer-managed policies in the account, in listing order.
///
/// Built only from a fully drained listing. Active documents are attached
/// separately for the names that also appear in the desired state.
#[derive(Debug, Clone, Default)]
pub struct CurrentState {
    policies: Vec<RemotePolicy>,
    index: HashMap<String, usize>,
    documents: HashMap<String, PolicyDocument>,
}

impl CurrentState {
    /// Build from a complete listing.
    ///
    /// Policy names are unique within an account, so a name listed twice
    /// means the listing is inconsistent and nothing can be planned from it.
    pub fn from_policies(
        policies: impl IntoIterator<Item = RemotePolicy>,
    ) -> ReconciliationResult<Self> {
        let mut state = Self::default();
        for policy in policies {
            if state.index.contains_key(&policy.name) {
                return Err(ReconciliationError::Listing {
                    source: StoreError::invalid_response(
                        "ListPolicies",
                        format!("policy name {} listed twice", policy.name),
                    ),
                });
            }
            state.index.insert(policy.name.clone(), state.policies.len());
            state.policies.push(policy);
        }
        Ok(state)
    }

    /// Drain the store's listing of local policies.
    ///
    /// Nothing is returned until the final page has been fetched.
    pub async fn load(store: &dyn RemotePolicyStore) -> ReconciliationResult<Self> {
        let mut paginator = Paginator::new(ListPolicies::new(store, PolicyScope::Local, false));
        let mut policies = Vec::new();

        while let Some(page) = paginator
            .next_page()
            .await
            .map_err(|source| ReconciliationError::Listing { source })?
        {
            policies.extend(page);
        }

        info!(
            policies = policies.len(),
            pages = paginator.pages_fetched(),
            "Loaded current state"
        );
        Self::from_policies(policies)
    }

    /// Fetch the active document of every policy that is also desired.
    pub async fn fetch_documents(
        &mut self,
        store: &dyn RemotePolicyStore,
        desired: &PolicySet,
    ) -> ReconciliationResult<()> {
        for record in desired {
            let Some(policy) = self.get(&record.name) else {
                continue;
            };
            let document = store.get_active_document(policy).await.map_err(|source| {
                ReconciliationError::ActiveDocument {
                    name: record.name.clone(),
                    source,
                }
            })?;
            debug!(policy = %record.name, "Fetched active document");
            self.documents.insert(record.name.clone(), document);
        }
        Ok(())
    }

    /// Attach an active document directly.
    pub fn insert_document(&mut self, name: impl Into<String>, document: PolicyDocument) {
        self.documents.insert(name.into(), document);
    }

    pub fn get(&self, name: &str) -> Option<&RemotePolicy> {
        self.index.get(name).map(|&i| &self.policies[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Active document, when it was fetched.
    pub fn document(&self, name: &str) -> Option<&PolicyDocument> {
        self.documents.get(name)
    }

    /// Policies in listing order.
    pub fn policies(&self) -> &[RemotePolicy] {
        &self.policies
    }

    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }
}
