//! Lazy pagination over remote listings.
//!
//! A [`PageSource`] knows how to fetch one page given a continuation token.
//! A [`Paginator`] walks a source forward from the first page until the
//! service stops returning a token. It never rewinds; [`Paginator::restart`]
//! starts over from the first page.

use std::collections::HashSet;

use async_trait::async_trait;

use crate::error::{StoreError, StoreResult};
use crate::traits::{PolicyAdvisor, RemotePolicyStore};
use crate::types::{AnalysisRequest, Finding, PolicyScope, RemotePolicy};

/// One page of results.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Continuation token; `None` on the final page.
    pub next_token: Option<String>,
}

impl<T> Page<T> {
    /// A final page.
    pub fn last(items: Vec<T>) -> Self {
        Self {
            items,
            next_token: None,
        }
    }

    /// A page followed by more results.
    pub fn with_next(items: Vec<T>, next_token: impl Into<String>) -> Self {
        Self {
            items,
            next_token: Some(next_token.into()),
        }
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.next_token.is_none()
    }
}

/// Something that can fetch pages by continuation token.
#[async_trait]
pub trait PageSource: Send + Sync {
    type Item: Send;

    /// Operation name used in logs and errors.
    fn operation(&self) -> &'static str;

    /// Fetch the page following `token` (`None` for the first page).
    async fn fetch(&self, token: Option<String>) -> StoreResult<Page<Self::Item>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Cursor {
    Start,
    Next(String),
    Done,
}

/// Forward-only lazy sequence of pages.
pub struct Paginator<S: PageSource> {
    source: S,
    cursor: Cursor,
    pages_fetched: usize,
    /// Continuation tokens already followed since the last restart.
    seen: HashSet<String>,
}

impl<S: PageSource> Paginator<S> {
    /// Create a paginator positioned before the first page.
    pub fn new(source: S) -> Self {
        Self {
            source,
            cursor: Cursor::Start,
            pages_fetched: 0,
            seen: HashSet::new(),
        }
    }

    /// Fetch the next page, or `None` once the listing is exhausted.
    ///
    /// A page whose continuation token was already followed is rejected.
    /// This covers a token that repeats itself and a cycle across pages.
    pub async fn next_page(&mut self) -> StoreResult<Option<Vec<S::Item>>> {
        let token = match &self.cursor {
            Cursor::Done => return Ok(None),
            Cursor::Start => None,
            Cursor::Next(token) => Some(token.clone()),
        };

        let page = self.source.fetch(token.clone()).await?;
        self.pages_fetched += 1;

        tracing::trace!(
            operation = self.source.operation(),
            page = self.pages_fetched,
            items = page.items.len(),
            has_more = page.next_token.is_some(),
            "Fetched page"
        );

        self.cursor = match page.next_token {
            Some(next) if !self.seen.insert(next.clone()) => {
                return Err(StoreError::PaginationStalled {
                    operation: self.source.operation().to_string(),
                    token: next,
                });
            }
            Some(next) => Cursor::Next(next),
            None => Cursor::Done,
        };

        Ok(Some(page.items))
    }

    /// Fetch every remaining page and return all items in order.
    pub async fn drain(mut self) -> StoreResult<Vec<S::Item>> {
        let mut items = Vec::new();
        while let Some(page) = self.next_page().await? {
            items.extend(page);
        }
        Ok(items)
    }

    /// Go back to before the first page. The next call refetches from the
    /// start of the listing.
    pub fn restart(&mut self) {
        self.cursor = Cursor::Start;
        self.pages_fetched = 0;
        self.seen.clear();
    }

    /// Whether the final page has been returned.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.cursor == Cursor::Done
    }

    /// Pages fetched since creation or the last restart.
    #[must_use]
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }
}

/// Page source over a store's managed-policy listing.
pub struct ListPolicies<'a> {
    store: &'a dyn RemotePolicyStore,
    scope: PolicyScope,
    only_attached: bool,
}

impl<'a> ListPolicies<'a> {
    pub fn new(store: &'a dyn RemotePolicyStore, scope: PolicyScope, only_attached: bool) -> Self {
        Self {
            store,
            scope,
            only_attached,
        }
    }
}

#[async_trait]
impl PageSource for ListPolicies<'_> {
    type Item = RemotePolicy;

    fn operation(&self) -> &'static str {
        "ListPolicies"
    }

    async fn fetch(&self, token: Option<String>) -> StoreResult<Page<RemotePolicy>> {
        self.store
            .list_policies_page(self.scope, self.only_attached, token)
            .await
    }
}

/// Page source over the findings for one document.
pub struct AnalyzePolicy<'a> {
    advisor: &'a dyn PolicyAdvisor,
    request: AnalysisRequest,
}

impl<'a> AnalyzePolicy<'a> {
    pub fn new(advisor: &'a dyn PolicyAdvisor, request: AnalysisRequest) -> Self {
        Self { advisor, request }
    }
}

#[async_trait]
impl PageSource for AnalyzePolicy<'_> {
    type Item = Finding;

    fn operation(&self) -> &'static str {
        "ValidatePolicy"
    }

    async fn fetch(&self, token: Option<String>) -> StoreResult<Page<Finding>> {
        self.advisor.validate_policy_page(&self.request, token).await
    }
}
