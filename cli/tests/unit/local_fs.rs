//! Filesystem adapter tests: tree walking, atomic writes and archive layout.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::fs;
use std::io::Read;
use std::path::Path;

use catalog_cli::application::ports::{ApplicationSource, ArtifactSink};
use catalog_cli::domain::{CatalogError, FileEntry};
use catalog_cli::infra::fs::{LocalApplicationDir, LocalArtifactDir, walk};
use flate2::read::GzDecoder;

fn entry(path: &str, data: &[u8]) -> FileEntry {
    FileEntry {
        relative_path: path.to_string(),
        contents: data.to_vec(),
    }
}

// ── Walker ───────────────────────────────────────────────────────────────────

#[test]
fn test_walk_lists_nested_files_with_dot_prefix() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "a").unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    fs::write(dir.path().join("sub").join("b.txt"), "b").unwrap();

    let files = walk(dir.path(), ".").unwrap();
    assert_eq!(files, vec!["./a.txt", "./sub/b.txt"]);
}

#[test]
fn test_walk_empty_directory_yields_nothing() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("empty")).unwrap();
    assert!(walk(dir.path(), ".").unwrap().is_empty());
}

#[test]
fn test_walk_order_is_by_name_within_directory() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["c", "a", "b"] {
        fs::write(dir.path().join(name), name).unwrap();
    }
    assert_eq!(walk(dir.path(), ".").unwrap(), vec!["./a", "./b", "./c"]);
}

#[test]
fn test_walk_missing_root_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = walk(&dir.path().join("missing"), ".").unwrap_err();
    assert!(matches!(err, CatalogError::Io { .. }));
}

#[test]
fn test_application_dir_reads_listed_files() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    fs::write(dir.path().join("sub").join("b.txt"), b"\x00\x01binary").unwrap();

    let source = LocalApplicationDir::new(dir.path());
    let files = source.list_files().unwrap();
    assert_eq!(files, vec!["./sub/b.txt"]);
    assert_eq!(source.read_file(&files[0]).unwrap(), b"\x00\x01binary");
}

// ── Artifact sink ────────────────────────────────────────────────────────────

#[test]
fn test_write_file_leaves_only_the_target() {
    let dir = tempfile::tempdir().unwrap();
    let sink = LocalArtifactDir::new(dir.path());

    let path = sink.write_file("app.tgz", b"payload").unwrap();
    assert_eq!(path, dir.path().join("app.tgz"));
    assert_eq!(fs::read(&path).unwrap(), b"payload");
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn test_write_file_replaces_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("app.tgz"), b"old").unwrap();
    let sink = LocalArtifactDir::new(dir.path());
    sink.write_file("app.tgz", b"new").unwrap();
    assert_eq!(fs::read(dir.path().join("app.tgz")).unwrap(), b"new");
}

#[test]
fn test_write_into_missing_directory_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let sink = LocalArtifactDir::new(dir.path().join("missing"));
    let err = sink.write_file("app.tgz", b"x").unwrap_err();
    assert_eq!(err.code(), "IO_ERROR");
}

#[test]
fn test_write_archive_contains_every_file_with_owner_only_mode() {
    let dir = tempfile::tempdir().unwrap();
    let sink = LocalArtifactDir::new(dir.path());
    let files = vec![entry("./app.yaml", b"kind: App"), entry("./sub/readme.md", b"# hi")];

    let path = sink.write_archive("app", &files).unwrap();
    assert_eq!(path, dir.path().join("app.tgz"));

    let mut archive = tar::Archive::new(GzDecoder::new(fs::File::open(&path).unwrap()));
    let mut seen = Vec::new();
    for item in archive.entries().unwrap() {
        let mut item = item.unwrap();
        assert_eq!(item.header().mode().unwrap() & 0o777, 0o600);
        let name = item.path().unwrap().into_owned();
        let mut body = Vec::new();
        item.read_to_end(&mut body).unwrap();
        seen.push((name, body));
    }
    assert_eq!(seen.len(), 2);
    assert!(seen[0].0.ends_with(Path::new("app.yaml")));
    assert_eq!(seen[0].1, b"kind: App");
    assert!(seen[1].0.ends_with(Path::new("sub/readme.md")));
    assert_eq!(seen[1].1, b"# hi");
}

#[test]
fn test_write_archive_rejects_escaping_paths() {
    let dir = tempfile::tempdir().unwrap();
    let sink = LocalArtifactDir::new(dir.path());
    let err = sink
        .write_archive("app", &[entry("../outside", b"x")])
        .unwrap_err();
    assert_eq!(err.code(), "IO_ERROR");
    assert!(!dir.path().join("app.tgz").exists());
}
