//! Name-keyed policy sets.

use std::collections::HashMap;

use crate::record::PolicyRecord;

/// Names that appear more than once in a record list, in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("duplicate policy names: {}", .names.join(", "))]
pub struct DuplicateNames {
    /// Each duplicated name, listed once.
    pub names: Vec<String>,
}

/// Return the names occurring more than once in `records`.
///
/// Each duplicated name is listed once, in the order its second occurrence
/// is encountered.
#[must_use]
pub fn duplicate_names(records: &[PolicyRecord]) -> Vec<String> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    let mut duplicates = Vec::new();

    for record in records {
        let count = seen.entry(record.name.as_str()).or_insert(0);
        *count += 1;
        if *count == 2 {
            duplicates.push(record.name.clone());
        }
    }

    duplicates
}

/// Policy records keyed by name, iterated in insertion order.
#[derive(Debug, Clone, Default)]
pub struct PolicySet {
    records: Vec<PolicyRecord>,
    index: HashMap<String, usize>,
}

impl PolicySet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set, rejecting duplicate names.
    pub fn from_records(records: Vec<PolicyRecord>) -> Result<Self, DuplicateNames> {
        let duplicates = duplicate_names(&records);
        if !duplicates.is_empty() {
            return Err(DuplicateNames { names: duplicates });
        }

        let index = records
            .iter()
            .enumerate()
            .map(|(position, record)| (record.name.clone(), position))
            .collect();

        Ok(Self { records, index })
    }

    /// Insert a record. Returns the record back if its name is taken.
    pub fn insert(&mut self, record: PolicyRecord) -> Result<(), PolicyRecord> {
        if self.index.contains_key(&record.name) {
            return Err(record);
        }
        self.index.insert(record.name.clone(), self.records.len());
        self.records.push(record);
        Ok(())
    }

    /// Look up a record by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PolicyRecord> {
        self.index.get(name).map(|&position| &self.records[position])
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &PolicyRecord> {
        self.records.iter()
    }

    /// Names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|record| record.name.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Borrow the records as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[PolicyRecord] {
        &self.records
    }
}

impl<'a> IntoIterator for &'a PolicySet {
    type Item = &'a PolicyRecord;
    type IntoIter = std::slice::Iter<'a, PolicyRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::PolicyDocument;
    use serde_json::json;

    fn record(name: &str) -> PolicyRecord {
        PolicyRecord::desired(name, PolicyDocument::new(json!({"Version": "2012-10-17"})))
    }

    #[test]
    fn test_from_records_keeps_insertion_order() {
        let set = PolicySet::from_records(vec![record("C"), record("A"), record("B")]).unwrap();
        let names: Vec<&str> = set.names().collect();
        assert_eq!(names, vec!["C", "A", "B"]);
        assert_eq!(set.len(), 3);
        assert!(set.get("A").is_some());
        assert!(set.get("Z").is_none());
    }

    #[test]
    fn test_from_records_rejects_duplicates() {
        let err = PolicySet::from_records(vec![record("A"), record("B"), record("A")]).unwrap_err();
        assert_eq!(err.names, vec!["A".to_string()]);
        assert!(err.to_string().contains("duplicate policy names: A"));
    }

    #[test]
    fn test_duplicate_names_listed_once() {
        let records = vec![record("A"), record("A"), record("B"), record("A"), record("B")];
        assert_eq!(duplicate_names(&records), vec!["A".to_string(), "B".to_string()]);
        assert!(duplicate_names(&[record("A"), record("B")]).is_empty());
    }

    #[test]
    fn test_insert_rejects_taken_name() {
        let mut set = PolicySet::new();
        assert!(set.insert(record("A")).is_ok());
        let rejected = set.insert(record("A")).unwrap_err();
        assert_eq!(rejected.name, "A");
        assert_eq!(set.len(), 1);
    }
}
