//! Reconciliation plan types.

use serde::Serialize;

use polsync_core::{PolicyArn, PolicyDocument};

/// Kind of remote mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Create,
    Update,
    Delete,
}

impl OperationKind {
    /// Single-character marker used when printing plans.
    pub fn symbol(&self) -> &'static str {
        match self {
            OperationKind::Create => "+",
            OperationKind::Update => "~",
            OperationKind::Delete => "-",
        }
    }

    /// Human readable label.
    pub fn label(&self) -> &'static str {
        match self {
            OperationKind::Create => "Create",
            OperationKind::Update => "Update",
            OperationKind::Delete => "Delete",
        }
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperationKind::Create => write!(f, "create"),
            OperationKind::Update => write!(f, "update"),
            OperationKind::Delete => write!(f, "delete"),
        }
    }
}

/// One remote mutation the reconciler intends to perform.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum PlannedOperation {
    /// Policy exists only in the repository.
    Create {
        name: String,
        document: PolicyDocument,
    },
    /// Policy exists on both sides; a new default version is published.
    Update {
        name: String,
        arn: PolicyArn,
        document: PolicyDocument,
        /// Top-level document keys that differ from the active version.
        /// Empty when the active version was not compared.
        #[serde(skip_serializing_if = "Vec::is_empty")]
        changed_keys: Vec<String>,
    },
    /// Policy exists only remotely.
    Delete { name: String, arn: PolicyArn },
}

impl PlannedOperation {
    pub fn kind(&self) -> OperationKind {
        match self {
            PlannedOperation::Create { .. } => OperationKind::Create,
            PlannedOperation::Update { .. } => OperationKind::Update,
            PlannedOperation::Delete { .. } => OperationKind::Delete,
        }
    }

    /// Name of the policy this operation targets.
    pub fn name(&self) -> &str {
        match self {
            PlannedOperation::Create { name, .. }
            | PlannedOperation::Update { name, .. }
            | PlannedOperation::Delete { name, .. } => name,
        }
    }

    /// Remote identifier, absent for creations.
    pub fn arn(&self) -> Option<&PolicyArn> {
        match self {
            PlannedOperation::Create { .. } => None,
            PlannedOperation::Update { arn, .. } | PlannedOperation::Delete { arn, .. } => {
                Some(arn)
            }
        }
    }

    /// Payload sent to the remote service, absent for deletions.
    pub fn document(&self) -> Option<&PolicyDocument> {
        match self {
            PlannedOperation::Create { document, .. }
            | PlannedOperation::Update { document, .. } => Some(document),
            PlannedOperation::Delete { .. } => None,
        }
    }

    pub fn changed_keys(&self) -> &[String] {
        match self {
            PlannedOperation::Update { changed_keys, .. } => changed_keys,
            _ => &[],
        }
    }
}

/// Counts per operation kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PlanSummary {
    pub to_create: usize,
    pub to_update: usize,
    pub to_delete: usize,
    pub unchanged: usize,
}

impl PlanSummary {
    pub fn total_changes(&self) -> usize {
        self.to_create + self.to_update + self.to_delete
    }
}

impl std::fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} to create, {} to update, {} to delete, {} unchanged",
            self.to_create, self.to_update, self.to_delete, self.unchanged
        )
    }
}

/// Ordered set of operations that brings the remote scope in line with the
/// repository.
///
/// Creations and updates come first, in desired-state order, followed by
/// deletions in listing order. Policies whose active document already
/// matches are recorded as unchanged and produce no operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReconciliationPlan {
    operations: Vec<PlannedOperation>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    unchanged: Vec<String>,
    summary: PlanSummary,
}

impl ReconciliationPlan {
    /// Build a plan from upserts, deletions, and unchanged names.
    ///
    /// Deletions are always placed after every upsert.
    pub fn new(
        upserts: Vec<PlannedOperation>,
        deletions: Vec<PlannedOperation>,
        unchanged: Vec<String>,
    ) -> Self {
        let mut operations = upserts;
        operations.extend(deletions);
        operations.sort_by_key(|op| op.kind() == OperationKind::Delete);

        let mut summary = PlanSummary {
            unchanged: unchanged.len(),
            ..PlanSummary::default()
        };
        for op in &operations {
            match op.kind() {
                OperationKind::Create => summary.to_create += 1,
                OperationKind::Update => summary.to_update += 1,
                OperationKind::Delete => summary.to_delete += 1,
            }
        }

        Self {
            operations,
            unchanged,
            summary,
        }
    }

    pub fn operations(&self) -> &[PlannedOperation] {
        &self.operations
    }

    /// Names of policies that need no change.
    pub fn unchanged(&self) -> &[String] {
        &self.unchanged
    }

    pub fn summary(&self) -> PlanSummary {
        self.summary
    }

    /// Operations of one kind, in plan order.
    pub fn of_kind(&self, kind: OperationKind) -> impl Iterator<Item = &PlannedOperation> {
        self.operations.iter().filter(move |op| op.kind() == kind)
    }

    /// True when nothing would be changed remotely.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create(name: &str) -> PlannedOperation {
        PlannedOperation::Create {
            name: name.to_string(),
            document: PolicyDocument::new(json!({})),
        }
    }

    fn delete(name: &str) -> PlannedOperation {
        PlannedOperation::Delete {
            name: name.to_string(),
            arn: PolicyArn::new(format!("arn:aws:iam::123456789012:policy/{name}")),
        }
    }

    #[test]
    fn test_deletions_follow_upserts() {
        let plan = ReconciliationPlan::new(
            vec![create("a"), create("b")],
            vec![delete("z")],
            vec![],
        );
        let kinds: Vec<_> = plan.operations().iter().map(PlannedOperation::kind).collect();
        assert_eq!(
            kinds,
            vec![OperationKind::Create, OperationKind::Create, OperationKind::Delete]
        );
    }

    #[test]
    fn test_summary_display() {
        let plan = ReconciliationPlan::new(
            vec![create("a")],
            vec![delete("z"), delete("y")],
            vec!["c".to_string()],
        );
        assert_eq!(
            plan.summary().to_string(),
            "1 to create, 0 to update, 2 to delete, 1 unchanged"
        );
        assert_eq!(plan.summary().total_changes(), 3);
        assert_eq!(plan.len(), 3);
    }

    #[test]
    fn test_operation_accessors() {
        let op = delete("z");
        assert_eq!(op.name(), "z");
        assert!(op.document().is_none());
        assert_eq!(op.kind().symbol(), "-");
        assert!(create("a").arn().is_none());
    }

    #[test]
    fn test_plan_serializes_with_action_tag() {
        let plan = ReconciliationPlan::new(vec![create("a")], vec![], vec![]);
        let value = serde_json::to_value(&plan).unwrap();
        assert_eq!(value["operations"][0]["action"], "create");
        assert_eq!(value["operations"][0]["name"], "a");
        assert_eq!(value["summary"]["to_create"], 1);
    }
}
