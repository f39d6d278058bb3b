/// Expose the commit being built as `CATALOG_COMMIT` for `catalog version`.
///
/// An explicit `CATALOG_COMMIT` in the environment wins; otherwise git is
/// asked. Builds outside a checkout report `unknown`.
use std::process::Command;

fn main() {
    println!("cargo::rerun-if-env-changed=CATALOG_COMMIT");
    println!("cargo::rerun-if-changed=../.git/HEAD");

    if std::env::var_os("CATALOG_COMMIT").is_some() {
        return;
    }
    let commit = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    if let Some(commit) = commit {
        println!("cargo::rustc-env=CATALOG_COMMIT={commit}");
    }
}
