//! Unit tests for the pull use-case.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::path::PathBuf;
use std::time::Duration;

use catalog_cli::application::services::download::pull;
use catalog_cli::domain::{CatalogError, PullMode};

use crate::mocks::{Behaviour, MemorySink, MockCatalog, NoopReporter, ctx, ctx_with_timeout, file};

fn serving(files: Vec<catalog_common::FileInfo>) -> MockCatalog {
    MockCatalog::new(Behaviour {
        files,
        ..Behaviour::default()
    })
}

#[tokio::test]
async fn test_pull_single_archive_is_written_verbatim() {
    let catalog = serving(vec![file("./team/app.tgz", b"\x1f\x8bpayload")]);
    let sink = MemorySink::default();

    let outcome = pull(&catalog, &sink, &ctx(), "team/app", PullMode::ServerArchive, &NoopReporter)
        .await
        .unwrap();

    assert_eq!(outcome.saved_path, Some(PathBuf::from("app.tgz")));
    let files = sink.files.lock().unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].0, "app.tgz");
    assert_eq!(files[0].1, b"\x1f\x8bpayload");

    let rec = catalog.recorded();
    assert_eq!(rec.downloads.len(), 1);
    assert!(rec.downloads[0].compressed);
    assert_eq!(rec.downloads[0].application_id, "team/app");
}

#[tokio::test]
async fn test_pull_archive_without_name_uses_app_name() {
    let catalog = serving(vec![file("", b"bytes")]);
    let sink = MemorySink::default();
    pull(&catalog, &sink, &ctx(), "team/web:v2", PullMode::ServerArchive, &NoopReporter)
        .await
        .unwrap();
    assert_eq!(sink.files.lock().unwrap()[0].0, "web.tgz");
}

#[tokio::test]
async fn test_pull_zero_files_writes_nothing() {
    let catalog = serving(Vec::new());
    let sink = MemorySink::default();
    let err = pull(&catalog, &sink, &ctx(), "team/app", PullMode::ServerArchive, &NoopReporter)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "REMOTE_ERROR");
    assert!(sink.is_empty());
}

#[tokio::test]
async fn test_pull_several_files_in_archive_mode_is_rejected() {
    let catalog = serving(vec![file("./a", b"1"), file("./b", b"2")]);
    let sink = MemorySink::default();
    let err = pull(&catalog, &sink, &ctx(), "team/app", PullMode::ServerArchive, &NoopReporter)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("received 2 files"));
    assert!(sink.is_empty());
}

#[tokio::test]
async fn test_pull_local_archive_bundles_all_files_in_order() {
    let catalog = serving(vec![file("./app.yaml", b"kind: App"), file("./sub/readme.md", b"# hi")]);
    let sink = MemorySink::default();

    let outcome = pull(&catalog, &sink, &ctx(), "team/app", PullMode::LocalArchive, &NoopReporter)
        .await
        .unwrap();

    assert_eq!(outcome.saved_path, Some(PathBuf::from("app.tgz")));
    assert!(!catalog.recorded().downloads[0].compressed);
    let archives = sink.archives.lock().unwrap();
    assert_eq!(archives.len(), 1);
    let (base, entries) = &archives[0];
    assert_eq!(base, "app");
    let paths: Vec<&str> = entries.iter().map(|e| e.relative_path.as_str()).collect();
    assert_eq!(paths, vec!["./app.yaml", "./sub/readme.md"]);
}

#[tokio::test]
async fn test_pull_broken_stream_writes_nothing() {
    let catalog = MockCatalog::new(Behaviour {
        files: vec![file("./a", b"1"), file("./b", b"2")],
        break_stream_after: Some(1),
        ..Behaviour::default()
    });
    let sink = MemorySink::default();
    let err = pull(&catalog, &sink, &ctx(), "team/app", PullMode::LocalArchive, &NoopReporter)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("stream broken"));
    assert!(sink.is_empty());
}

#[tokio::test]
async fn test_pull_invalid_identifier() {
    let catalog = serving(Vec::new());
    let sink = MemorySink::default();
    let err = pull(&catalog, &sink, &ctx(), "a/b/c/d", PullMode::ServerArchive, &NoopReporter)
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::InvalidArgument(_)));
    assert!(catalog.recorded().targets.is_empty());
}

#[tokio::test]
async fn test_pull_deadline_exceeded() {
    let catalog = MockCatalog::new(Behaviour {
        delay: Some(Duration::from_secs(30)),
        ..Behaviour::default()
    });
    let sink = MemorySink::default();
    let err = pull(
        &catalog,
        &sink,
        &ctx_with_timeout(Duration::from_millis(20)),
        "team/app",
        PullMode::ServerArchive,
        &NoopReporter,
    )
    .await
    .unwrap_err();
    assert_eq!(err.code(), "DEADLINE_EXCEEDED");
    assert!(sink.is_empty());
}
