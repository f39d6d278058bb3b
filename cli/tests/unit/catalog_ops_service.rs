//! Unit tests for the unary catalog use-cases and deploy.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use catalog_cli::application::services::catalog_ops::{
    change_visibility, info, list, remove, requested_privacy, search, summary,
};
use catalog_cli::application::services::deploy::{DeployTarget, deploy};
use catalog_cli::domain::CatalogError;
use catalog_common::{ApplicationList, ApplicationSummary, OpResponse, SummaryResponse};

use crate::mocks::{Behaviour, MockCatalog, ctx, failed};

// ── remove / info ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_remove_dials_identifier_host_verbatim() {
    let catalog = MockCatalog::new(Behaviour {
        ack: OpResponse::success("application removed"),
        ..Behaviour::default()
    });
    let resp = remove(&catalog, &ctx(), "myhost:9000/team/app:v2").await.unwrap();
    assert_eq!(resp.user_info, "application removed");

    let rec = catalog.recorded();
    assert_eq!(rec.targets[0].address, "myhost:9000");
    assert_eq!(rec.removes[0].application_id, "myhost:9000/team/app:v2");
}

#[tokio::test]
async fn test_remove_rejected_is_remote_error() {
    let catalog = MockCatalog::new(Behaviour {
        ack: failed("application not found"),
        ..Behaviour::default()
    });
    let err = remove(&catalog, &ctx(), "team/app").await.unwrap_err();
    assert_eq!(err.code(), "REMOTE_ERROR");
    assert_eq!(err.to_string(), "application not found");
}

#[tokio::test]
async fn test_info_uses_default_catalog_without_host() {
    let catalog = MockCatalog::new(Behaviour::default());
    info(&catalog, &ctx(), "team/app").await.unwrap();
    let rec = catalog.recorded();
    assert_eq!(rec.targets[0].address, "catalog-manager:7060");
    assert_eq!(rec.infos[0].application_id, "team/app");
}

#[tokio::test]
async fn test_info_invalid_identifier_never_dials() {
    let catalog = MockCatalog::new(Behaviour::default());
    let err = info(&catalog, &ctx(), "team/app:v1:v2").await.unwrap_err();
    assert!(matches!(err, CatalogError::InvalidArgument(_)));
    assert!(catalog.recorded().targets.is_empty());
}

// ── list / search / summary ──────────────────────────────────────────────────

#[tokio::test]
async fn test_list_passes_namespace_and_returns_applications() {
    let catalog = MockCatalog::new(Behaviour {
        list: ApplicationList {
            applications: vec![ApplicationSummary {
                namespace: "team".to_string(),
                application_name: "app".to_string(),
                ..ApplicationSummary::default()
            }],
        },
        ..Behaviour::default()
    });
    let apps = list(&catalog, &ctx(), Some("team")).await.unwrap();
    assert_eq!(apps.applications.len(), 1);

    let rec = catalog.recorded();
    assert_eq!(rec.lists[0].namespace, "team");
    assert!(rec.lists[0].application_name.is_empty());
}

#[tokio::test]
async fn test_list_without_namespace_sends_empty_filter() {
    let catalog = MockCatalog::new(Behaviour::default());
    list(&catalog, &ctx(), None).await.unwrap();
    assert!(catalog.recorded().lists[0].namespace.is_empty());
}

#[tokio::test]
async fn test_search_sends_name_filter() {
    let catalog = MockCatalog::new(Behaviour::default());
    search(&catalog, &ctx(), "web", Some("team")).await.unwrap();
    let rec = catalog.recorded();
    assert_eq!(rec.lists[0].application_name, "web");
    assert_eq!(rec.lists[0].namespace, "team");
}

#[tokio::test]
async fn test_search_empty_name_is_invalid() {
    let catalog = MockCatalog::new(Behaviour::default());
    let err = search(&catalog, &ctx(), "", None).await.unwrap_err();
    assert!(matches!(err, CatalogError::InvalidArgument(_)));
    assert!(catalog.recorded().lists.is_empty());
}

#[tokio::test]
async fn test_summary_returns_counters() {
    let catalog = MockCatalog::new(Behaviour {
        summary: SummaryResponse {
            num_namespaces: 3,
            num_applications: 7,
            num_tags: 12,
        },
        ..Behaviour::default()
    });
    let resp = summary(&catalog, &ctx()).await.unwrap();
    assert_eq!(resp.num_tags, 12);
    assert_eq!(catalog.recorded().summaries, 1);
}

#[tokio::test]
async fn test_summary_unreachable_is_connection_error() {
    let catalog = MockCatalog::new(Behaviour {
        unavailable: true,
        ..Behaviour::default()
    });
    let err = summary(&catalog, &ctx()).await.unwrap_err();
    assert_eq!(err.code(), "CONNECTION_ERROR");
}

// ── change-visibility ────────────────────────────────────────────────────────

#[test]
fn test_requested_privacy_flags() {
    assert!(!requested_privacy(false, false).unwrap());
    assert!(requested_privacy(true, false).unwrap());
    assert!(!requested_privacy(false, true).unwrap());
    assert!(matches!(
        requested_privacy(true, true),
        Err(CatalogError::InvalidArgument(_))
    ));
}

#[tokio::test]
async fn test_change_visibility_sends_update() {
    let catalog = MockCatalog::new(Behaviour::default());
    change_visibility(&catalog, &ctx(), "team/app", true).await.unwrap();
    let rec = catalog.recorded();
    assert_eq!(rec.updates[0].namespace, "team");
    assert_eq!(rec.updates[0].application_name, "app");
    assert!(rec.updates[0].private);
}

#[tokio::test]
async fn test_change_visibility_requires_application_name() {
    let catalog = MockCatalog::new(Behaviour::default());
    let err = change_visibility(&catalog, &ctx(), "team/", false).await.unwrap_err();
    assert!(matches!(err, CatalogError::InvalidArgument(_)));
    assert!(catalog.recorded().updates.is_empty());
}

// ── deploy ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_deploy_sends_target_environment() {
    let catalog = MockCatalog::new(Behaviour::default());
    deploy(
        &catalog,
        &ctx(),
        "team/app:v1",
        DeployTarget {
            environment: "acme/dev",
            playground_api_url: "https://playground.example.com",
        },
    )
    .await
    .unwrap();
    let rec = catalog.recorded();
    assert_eq!(rec.targets[0].address, "catalog-manager:7060");
    assert_eq!(rec.deploys[0].target_environment_qualified_name, "acme/dev");
    assert_eq!(
        rec.deploys[0].target_playground_api_url,
        "https://playground.example.com"
    );
}

#[tokio::test]
async fn test_deploy_passes_environment_name_verbatim() {
    let catalog = MockCatalog::new(Behaviour::default());
    deploy(
        &catalog,
        &ctx(),
        "team/app",
        DeployTarget {
            environment: "dev",
            playground_api_url: "",
        },
    )
    .await
    .unwrap();
    let rec = catalog.recorded();
    assert_eq!(rec.targets.len(), 1);
    assert_eq!(rec.deploys[0].target_environment_qualified_name, "dev");
}

#[tokio::test]
async fn test_deploy_malformed_identifier_never_dials() {
    let catalog = MockCatalog::new(Behaviour::default());
    let err = deploy(
        &catalog,
        &ctx(),
        "a/b/c/d",
        DeployTarget {
            environment: "acme/dev",
            playground_api_url: "",
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, CatalogError::InvalidArgument(_)));
    assert!(catalog.recorded().targets.is_empty());
}

#[tokio::test]
async fn test_deploy_rejected_is_remote_error() {
    let catalog = MockCatalog::new(Behaviour {
        ack: failed("environment not found"),
        ..Behaviour::default()
    });
    let target = DeployTarget {
        environment: "acme/dev",
        playground_api_url: "",
    };
    let err = deploy(&catalog, &ctx(), "team/app", target).await.unwrap_err();
    assert_eq!(err.code(), "REMOTE_ERROR");
}
