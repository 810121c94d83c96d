use std::fs;

use workflow_broker::client::{GatewayClient, ProjectSystem};
use workflow_broker::errors::Error;

#[test]
fn test_load_reads_project_name_and_content() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Rota.k2proj");
    fs::write(&path, "<Project ToolsVersion=\"4.0\" />").unwrap();

    let client = GatewayClient::from_url("http://localhost:5555");
    let project = client.load(&path).unwrap();

    assert_eq!(project.name, "Rota");
    assert_eq!(project.content, "<Project ToolsVersion=\"4.0\" />");
    assert_eq!(project.path, path);
}

#[test]
fn test_load_missing_project_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("DoesNotExist.k2proj");

    let client = GatewayClient::from_url("http://localhost:5555");
    let error = client.load(&path).unwrap_err();

    assert!(matches!(error, Error::ProjectLoad { .. }));
}

#[test]
fn test_load_empty_project_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Empty.k2proj");
    fs::write(&path, "   \n").unwrap();

    let client = GatewayClient::from_url("http://localhost:5555");
    let error = client.load(&path).unwrap_err();

    match error {
        Error::ProjectLoad { detail, .. } => assert!(detail.contains("empty")),
        other => panic!("expected a project load error, got {other}"),
    }
}
