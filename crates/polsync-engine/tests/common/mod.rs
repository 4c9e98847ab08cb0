//! Shared mock collaborators for engine integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, Once};

use async_trait::async_trait;
use serde_json::json;

use polsync_core::{PolicyArn, PolicyDocument, PolicyRecord, VersionId};
use polsync_store::{
    AnalysisRequest, Finding, Page, PolicyAdvisor, PolicyScope, RemotePolicy, RemotePolicyStore,
    StoreError, StoreResult,
};

static INIT: Once = Once::new();

/// Initialize logging for tests (once).
pub fn init_test_logging() {
    INIT.call_once(|| {
        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::fmt()
                .with_test_writer()
                .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
                .try_init()
                .ok();
        }
    });
}

pub fn arn_for(name: &str) -> PolicyArn {
    PolicyArn::new(format!("arn:aws:iam::123456789012:policy/{name}"))
}

/// A small identity policy document, distinguished by its statement id.
pub fn doc(sid: &str) -> PolicyDocument {
    PolicyDocument::new(json!({
        "Version": "2012-10-17",
        "Statement": [{
            "Sid": sid,
            "Effect": "Allow",
            "Action": ["s3:GetObject"],
            "Resource": "*"
        }]
    }))
}

pub fn desired(name: &str, document: PolicyDocument) -> PolicyRecord {
    PolicyRecord::desired(name, document)
}

/// A remote call as observed by [`MockPolicyStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    List { marker: Option<String> },
    Get(String),
    GetDocument(String),
    Create(String),
    CreateVersion { arn: String, set_as_default: bool },
    Delete(String),
}

impl StoreCall {
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            StoreCall::Create(_) | StoreCall::CreateVersion { .. } | StoreCall::Delete(_)
        )
    }
}

struct StoredPolicy {
    remote: RemotePolicy,
    document: PolicyDocument,
    versions: usize,
}

/// In-memory policy store with paged listing, call recording and failure
/// injection. Mutations change the stored state so consecutive runs observe
/// each other.
pub struct MockPolicyStore {
    policies: Mutex<Vec<StoredPolicy>>,
    page_size: usize,
    calls: Mutex<Vec<StoreCall>>,
    failing_names: Mutex<HashSet<String>>,
    denied_arns: Mutex<HashSet<String>>,
    fail_list_at_page: Mutex<Option<usize>>,
    list_calls: AtomicUsize,
}

impl MockPolicyStore {
    pub fn new() -> Self {
        Self::with_page_size(100)
    }

    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            policies: Mutex::new(Vec::new()),
            page_size: page_size.max(1),
            calls: Mutex::new(Vec::new()),
            failing_names: Mutex::new(HashSet::new()),
            denied_arns: Mutex::new(HashSet::new()),
            fail_list_at_page: Mutex::new(None),
            list_calls: AtomicUsize::new(0),
        }
    }

    /// Seed a policy that already exists remotely.
    pub fn seed(self, name: &str, document: PolicyDocument) -> Self {
        self.policies.lock().unwrap().push(StoredPolicy {
            remote: RemotePolicy::new(name, arn_for(name)).with_default_version("v1"),
            document,
            versions: 1,
        });
        self
    }

    /// Make every mutation of `name` fail.
    pub fn fail_mutations_of(&self, name: &str) {
        self.failing_names.lock().unwrap().insert(name.to_string());
    }

    /// Make `get_policy` for `arn` fail with access denied.
    pub fn deny_get(&self, arn: &PolicyArn) {
        self.denied_arns
            .lock()
            .unwrap()
            .insert(arn.as_str().to_string());
    }

    /// Make the listing fail when the given zero-based page is requested.
    pub fn fail_list_at_page(&self, page: usize) {
        *self.fail_list_at_page.lock().unwrap() = Some(page);
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn mutations(&self) -> Vec<StoreCall> {
        self.calls().into_iter().filter(StoreCall::is_mutation).collect()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn names(&self) -> Vec<String> {
        self.policies
            .lock()
            .unwrap()
            .iter()
            .map(|p| p.remote.name.clone())
            .collect()
    }

    pub fn document_of(&self, name: &str) -> Option<PolicyDocument> {
        self.policies
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.remote.name == name)
            .map(|p| p.document.clone())
    }

    pub fn version_count(&self, name: &str) -> usize {
        self.policies
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.remote.name == name)
            .map_or(0, |p| p.versions)
    }

    fn record(&self, call: StoreCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn check_failing(&self, name: &str, operation: &str) -> StoreResult<()> {
        if self.failing_names.lock().unwrap().contains(name) {
            return Err(StoreError::Service {
                operation: operation.to_string(),
                code: Some("ServiceFailure".to_string()),
                message: format!("injected failure for {name}"),
            });
        }
        Ok(())
    }

    fn name_of(&self, arn: &PolicyArn) -> Option<String> {
        self.policies
            .lock()
            .unwrap()
            .iter()
            .find(|p| &p.remote.arn == arn)
            .map(|p| p.remote.name.clone())
    }
}

#[async_trait]
impl RemotePolicyStore for MockPolicyStore {
    async fn list_policies_page(
        &self,
        scope: PolicyScope,
        only_attached: bool,
        marker: Option<String>,
    ) -> StoreResult<Page<RemotePolicy>> {
        assert_eq!(scope, PolicyScope::Local);
        assert!(!only_attached);
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.record(StoreCall::List {
            marker: marker.clone(),
        });

        let offset: usize = match &marker {
            Some(m) => m
                .parse()
                .map_err(|_| StoreError::invalid_response("ListPolicies", "bad marker"))?,
            None => 0,
        };

        if let Some(page) = *self.fail_list_at_page.lock().unwrap() {
            if offset / self.page_size == page {
                return Err(StoreError::Throttled {
                    operation: "ListPolicies".to_string(),
                    message: "Rate exceeded".to_string(),
                });
            }
        }

        let policies = self.policies.lock().unwrap();
        let end = (offset + self.page_size).min(policies.len());
        let items = policies[offset.min(end)..end]
            .iter()
            .map(|p| p.remote.clone())
            .collect();

        Ok(if end < policies.len() {
            Page::with_next(items, end.to_string())
        } else {
            Page::last(items)
        })
    }

    async fn get_policy(&self, arn: &PolicyArn) -> StoreResult<RemotePolicy> {
        self.record(StoreCall::Get(arn.as_str().to_string()));
        if self.denied_arns.lock().unwrap().contains(arn.as_str()) {
            return Err(StoreError::AccessDenied {
                operation: "GetPolicy".to_string(),
                message: "not authorized".to_string(),
            });
        }
        self.policies
            .lock()
            .unwrap()
            .iter()
            .find(|p| &p.remote.arn == arn)
            .map(|p| p.remote.clone())
            .ok_or_else(|| StoreError::not_found(arn.as_str()))
    }

    async fn get_active_document(&self, policy: &RemotePolicy) -> StoreResult<PolicyDocument> {
        self.record(StoreCall::GetDocument(policy.name.clone()));
        self.document_of(&policy.name)
            .ok_or_else(|| StoreError::not_found(policy.arn.as_str()))
    }

    async fn create_policy(
        &self,
        name: &str,
        document: &PolicyDocument,
    ) -> StoreResult<PolicyArn> {
        self.record(StoreCall::Create(name.to_string()));
        self.check_failing(name, "CreatePolicy")?;

        let mut policies = self.policies.lock().unwrap();
        if policies.iter().any(|p| p.remote.name == name) {
            return Err(StoreError::AlreadyExists {
                identifier: name.to_string(),
            });
        }
        let arn = arn_for(name);
        policies.push(StoredPolicy {
            remote: RemotePolicy::new(name, arn.clone()).with_default_version("v1"),
            document: document.clone(),
            versions: 1,
        });
        Ok(arn)
    }

    async fn create_policy_version(
        &self,
        arn: &PolicyArn,
        document: &PolicyDocument,
        set_as_default: bool,
    ) -> StoreResult<VersionId> {
        self.record(StoreCall::CreateVersion {
            arn: arn.as_str().to_string(),
            set_as_default,
        });
        let name = self
            .name_of(arn)
            .ok_or_else(|| StoreError::not_found(arn.as_str()))?;
        self.check_failing(&name, "CreatePolicyVersion")?;

        let mut policies = self.policies.lock().unwrap();
        let stored = policies
            .iter_mut()
            .find(|p| &p.remote.arn == arn)
            .ok_or_else(|| StoreError::not_found(arn.as_str()))?;
        stored.versions += 1;
        let version = VersionId::new(format!("v{}", stored.versions));
        if set_as_default {
            stored.document = document.clone();
            stored.remote.default_version_id = Some(version.clone());
        }
        Ok(version)
    }

    async fn delete_policy(&self, arn: &PolicyArn) -> StoreResult<()> {
        self.record(StoreCall::Delete(arn.as_str().to_string()));
        let name = self
            .name_of(arn)
            .ok_or_else(|| StoreError::not_found(arn.as_str()))?;
        self.check_failing(&name, "DeletePolicy")?;
        self.policies
            .lock()
            .unwrap()
            .retain(|p| &p.remote.arn != arn);
        Ok(())
    }
}

/// Advisor returning canned finding pages keyed by serialized document.
pub struct MockAdvisor {
    responses: Mutex<HashMap<String, Vec<Vec<Finding>>>>,
    failing: Mutex<HashSet<String>>,
    requests: Mutex<Vec<(String, Option<String>)>>,
    call_count: AtomicUsize,
}

impl MockAdvisor {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(HashMap::new()),
            failing: Mutex::new(HashSet::new()),
            requests: Mutex::new(Vec::new()),
            call_count: AtomicUsize::new(0),
        }
    }

    fn key(document: &PolicyDocument) -> String {
        document.to_json_string().unwrap()
    }

    /// Return `pages` of findings for `document`. Unregistered documents get
    /// a single empty page.
    pub fn respond(&self, document: &PolicyDocument, pages: Vec<Vec<Finding>>) {
        self.responses
            .lock()
            .unwrap()
            .insert(Self::key(document), pages);
    }

    /// Make analysis of `document` fail.
    pub fn fail_on(&self, document: &PolicyDocument) {
        self.failing.lock().unwrap().insert(Self::key(document));
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Submitted documents and page tokens, in call order.
    pub fn requests(&self) -> Vec<(String, Option<String>)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PolicyAdvisor for MockAdvisor {
    async fn validate_policy_page(
        &self,
        request: &AnalysisRequest,
        next_token: Option<String>,
    ) -> StoreResult<Page<Finding>> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .unwrap()
            .push((request.document.clone(), next_token.clone()));

        if self.failing.lock().unwrap().contains(&request.document) {
            return Err(StoreError::Unavailable {
                operation: "ValidatePolicy".to_string(),
                message: "service unavailable".to_string(),
            });
        }

        let responses = self.responses.lock().unwrap();
        let Some(pages) = responses.get(&request.document) else {
            return Ok(Page::last(Vec::new()));
        };

        let index = next_token
            .as_deref()
            .map_or(Ok(0), |token| token.parse::<usize>())
            .map_err(|_| StoreError::invalid_response("ValidatePolicy", "bad token"))?;
        let items = pages.get(index).cloned().unwrap_or_default();
        Ok(if index + 1 < pages.len() {
            Page::with_next(items, (index + 1).to_string())
        } else {
            Page::last(items)
        })
    }
}
