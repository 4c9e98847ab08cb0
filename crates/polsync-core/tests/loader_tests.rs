//! Repository loader tests against real folders.

use std::fs;
use std::path::Path;

use polsync_core::{LoadError, PolicySet, RepositoryLoader};
use serde_json::json;
use tempfile::TempDir;

fn write_policy(dir: &Path, file: &str, name: &str, action: &str) {
    let body = json!({
        "PolicyName": name,
        "PolicyDocument": {
            "Version": "2012-10-17",
            "Statement": [{"Effect": "Allow", "Action": action, "Resource": "*"}]
        }
    });
    fs::write(dir.join(file), serde_json::to_string_pretty(&body).unwrap()).unwrap();
}

#[test]
fn test_load_folder_in_file_name_order() {
    let dir = TempDir::new().unwrap();
    write_policy(dir.path(), "b-storage.json", "Storage", "s3:GetObject");
    write_policy(dir.path(), "a-deploy.json", "Deploy", "iam:PassRole");
    write_policy(dir.path(), "c-logs.json", "Logs", "logs:PutLogEvents");

    let records = RepositoryLoader::new(dir.path()).load().unwrap();
    let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Deploy", "Storage", "Logs"]);
}

#[test]
fn test_load_skips_subdirectories() {
    let dir = TempDir::new().unwrap();
    write_policy(dir.path(), "deploy.json", "Deploy", "iam:PassRole");
    fs::create_dir(dir.path().join("drafts")).unwrap();
    write_policy(&dir.path().join("drafts"), "draft.json", "Draft", "s3:*");

    let records = RepositoryLoader::new(dir.path()).load().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "Deploy");
}

#[test]
fn test_load_keeps_duplicate_names() {
    let dir = TempDir::new().unwrap();
    write_policy(dir.path(), "one.json", "Shared", "s3:GetObject");
    write_policy(dir.path(), "two.json", "Shared", "s3:PutObject");

    let records = RepositoryLoader::new(dir.path()).load().unwrap();
    assert_eq!(records.len(), 2);

    let err = PolicySet::from_records(records).unwrap_err();
    assert_eq!(err.names, vec!["Shared".to_string()]);
}

#[test]
fn test_load_fails_on_malformed_file() {
    let dir = TempDir::new().unwrap();
    write_policy(dir.path(), "a.json", "Good", "s3:GetObject");
    fs::write(dir.path().join("b.json"), "{ not json").unwrap();

    let err = RepositoryLoader::new(dir.path()).load().unwrap_err();
    match err {
        LoadError::Parse { path, .. } => assert!(path.ends_with("b.json")),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn test_load_missing_folder() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("does-not-exist");

    let err = RepositoryLoader::new(&missing).load().unwrap_err();
    assert!(matches!(err, LoadError::FolderNotFound { .. }));
    assert!(err.to_string().contains("does-not-exist"));
}

#[test]
fn test_load_empty_folder() {
    let dir = TempDir::new().unwrap();
    let records = RepositoryLoader::new(dir.path()).load().unwrap();
    assert!(records.is_empty());
}
