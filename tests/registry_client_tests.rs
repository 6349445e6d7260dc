//! Registry client against a mocked HCP Terraform API.

mod common;

use common::*;
use httpmock::prelude::*;
use serde_json::json;
use std::time::Duration;

use hcp_terraform_mcp::registry::{ErrorRecord, RegistryError, ERROR_PREFIX};

#[tokio::test]
async fn test_search_sends_filters_and_maps_results() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path(MODULES_PATH)
                .query_param("page[size]", "5")
                .query_param("q", "vpc")
                .query_param("filter[provider]", "aws")
                .header("authorization", "Bearer test-token")
                .header("content-type", "application/vnd.api+json");
            then.status(200)
                .header("content-type", "application/vnd.api+json")
                .json_body(search_document(vec![
                    module_resource("mod-1", "vpc", "aws", &["2.0.0", "1.9.1"]),
                    module_resource("mod-2", "vpc-endpoints", "aws", &["0.3.0"]),
                ]));
        })
        .await;

    let modules = client(&server)
        .search_modules("vpc", Some("aws"), 5)
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(modules.len(), 2);

    let first = &modules[0];
    assert_eq!(first.id.as_deref(), Some("mod-1"));
    assert_eq!(first.name.as_deref(), Some("vpc"));
    assert_eq!(first.namespace, ORG);
    assert_eq!(first.provider.as_deref(), Some("aws"));
    assert_eq!(first.registry_name.as_deref(), Some("private"));
    assert_eq!(first.status.as_deref(), Some("setup_complete"));
    assert_eq!(
        first.versions,
        vec![Some("2.0.0".to_string()), Some("1.9.1".to_string())]
    );
    assert_eq!(first.created_at.as_deref(), Some("2024-01-10T12:00:00.000Z"));
    assert_eq!(first.updated_at.as_deref(), Some("2024-03-02T08:30:00.000Z"));
    assert_eq!(
        first.self_link.as_deref(),
        Some("/api/v2/organizations/acme/registry-modules/private/acme/vpc/aws")
    );

    assert_eq!(modules[1].id.as_deref(), Some("mod-2"));
    assert_eq!(modules[1].versions, vec![Some("0.3.0".to_string())]);
}

#[tokio::test]
async fn test_search_omits_empty_query_and_missing_provider() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path(MODULES_PATH)
                .query_param("page[size]", "10")
                .query_param_missing("q")
                .query_param_missing("filter[provider]");
            then.status(200).json_body(search_document(vec![]));
        })
        .await;

    let modules = client(&server).search_modules("", None, 10).await.unwrap();

    mock.assert_async().await;
    assert!(modules.is_empty());
}

#[tokio::test]
async fn test_search_namespace_falls_back_to_organization() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(MODULES_PATH);
            then.status(200).json_body(json!({
                "data": [{ "id": "mod-9", "attributes": { "name": "dns", "provider": "google" } }]
            }));
        })
        .await;

    let modules = client(&server).search_modules("dns", None, 10).await.unwrap();

    assert_eq!(modules.len(), 1);
    assert_eq!(modules[0].namespace, ORG);
    assert!(modules[0].versions.is_empty());
    assert_eq!(modules[0].self_link, None);
}

#[tokio::test]
async fn test_search_not_found_is_status_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(MODULES_PATH);
            then.status(404)
                .json_body(json!({ "errors": [{ "status": "404", "title": "not found" }] }));
        })
        .await;

    let err = client(&server)
        .search_modules("vpc", None, 10)
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(reqwest::StatusCode::NOT_FOUND));
    let record = ErrorRecord::from(&err);
    assert!(record.error.starts_with(ERROR_PREFIX));
    assert!(record.error.contains("404"));
}

#[tokio::test]
async fn test_server_error_short_circuits_before_parsing() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(MODULES_PATH);
            then.status(500).body("<html>upstream exploded</html>");
        })
        .await;

    let err = client(&server)
        .search_modules("vpc", None, 10)
        .await
        .unwrap_err();

    assert!(matches!(err, RegistryError::Status { .. }));
    assert_eq!(err.status(), Some(reqwest::StatusCode::INTERNAL_SERVER_ERROR));
}

#[tokio::test]
async fn test_unreadable_success_body_is_decode_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(MODULES_PATH);
            then.status(200).body("not json");
        })
        .await;

    let err = client(&server)
        .search_modules("vpc", None, 10)
        .await
        .unwrap_err();

    assert!(matches!(err, RegistryError::Decode(_)));
}

#[tokio::test]
async fn test_search_timeout() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(MODULES_PATH);
            then.status(200)
                .delay(Duration::from_secs(2))
                .json_body(search_document(vec![]));
        })
        .await;

    let err = client_with_timeout(&server, Duration::from_millis(200))
        .search_modules("vpc", None, 10)
        .await
        .unwrap_err();

    assert!(err.is_timeout());
    assert!(ErrorRecord::from(&err).error.starts_with(ERROR_PREFIX));
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let err = unreachable_client()
        .search_modules("vpc", None, 10)
        .await
        .unwrap_err();

    assert!(matches!(err, RegistryError::Transport(_)));
}

#[tokio::test]
async fn test_get_module_uses_default_namespace() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path(format!("{}/private/acme/vpc/aws", MODULES_PATH))
                .header("authorization", "Bearer test-token");
            then.status(200).json_body(json!({
                "data": {
                    "id": "mod-1",
                    "type": "registry-modules",
                    "attributes": {
                        "name": "vpc",
                        "provider": "aws",
                        "registry-name": "private",
                        "status": "setup_complete",
                        "version-statuses": [{ "version": "1.0.0", "status": "ok" }],
                        "created-at": "2024-01-10T12:00:00.000Z",
                        "updated-at": "2024-01-11T12:00:00.000Z",
                        "vcs-repo": {
                            "branch": "",
                            "identifier": "acme/terraform-aws-vpc",
                            "display-identifier": "acme/terraform-aws-vpc"
                        },
                        "permissions": { "can-delete": true, "can-resync": true, "can-retry": true }
                    },
                    "links": { "self": "/api/v2/registry-modules/mod-1" }
                }
            }));
        })
        .await;

    let module = client(&server)
        .get_module("vpc", "aws", "private", None)
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(module.summary.id.as_deref(), Some("mod-1"));
    assert_eq!(module.summary.namespace, ORG);
    assert_eq!(module.summary.versions, vec![Some("1.0.0".to_string())]);
    assert_eq!(
        module.summary.self_link.as_deref(),
        Some("/api/v2/registry-modules/mod-1")
    );
    assert_eq!(
        module.vcs_repo.unwrap()["identifier"],
        "acme/terraform-aws-vpc"
    );
    assert_eq!(module.permissions.unwrap()["can-delete"], true);
}

#[tokio::test]
async fn test_get_module_with_explicit_registry_and_namespace() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path(format!("{}/public/hashicorp/consul/aws", MODULES_PATH));
            then.status(200).json_body(json!({
                "data": { "id": "mod-pub", "attributes": { "namespace": "hashicorp" } }
            }));
        })
        .await;

    let module = client(&server)
        .get_module("consul", "aws", "public", Some("hashicorp"))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(module.summary.namespace, "hashicorp");
    assert_eq!(module.vcs_repo, None);
    assert_eq!(module.permissions, None);
}

#[tokio::test]
async fn test_get_module_not_found() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path(format!("{}/private/acme/missing/aws", MODULES_PATH));
            then.status(404);
        })
        .await;

    let err = client(&server)
        .get_module("missing", "aws", "private", None)
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(reqwest::StatusCode::NOT_FOUND));
}

#[tokio::test]
async fn test_get_module_timeout() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET);
            then.status(200).delay(Duration::from_secs(2)).json_body(json!({ "data": {} }));
        })
        .await;

    let err = client_with_timeout(&server, Duration::from_millis(200))
        .get_module("vpc", "aws", "private", None)
        .await
        .unwrap_err();

    assert!(err.is_timeout());
}
