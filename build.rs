//! Stamps both binaries with a version string for `--version`.
//!
//! Tagged checkouts report the tag (without its leading `v`), untagged ones
//! the package version. The short commit hash is appended when git can see
//! the tree, plus `-dirty` for uncommitted changes.

use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/index");
    println!("cargo:rerun-if-changed=.git/refs/tags");

    println!("cargo:rustc-env=AKV_RELEASE_VERSION={}", release_version());
}

fn release_version() -> String {
    let base = exact_tag().unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string());
    match head_commit() {
        Some(commit) if is_dirty() => format!("{} ({}-dirty)", base, commit),
        Some(commit) => format!("{} ({})", base, commit),
        None => base,
    }
}

fn exact_tag() -> Option<String> {
    let tag = git(&["describe", "--tags", "--exact-match"])?;
    Some(tag.trim_start_matches('v').to_string())
}

fn head_commit() -> Option<String> {
    git(&["rev-parse", "--short", "HEAD"])
}

fn is_dirty() -> bool {
    git(&["status", "--porcelain", "--untracked-files=no"]).is_some()
}

/// Trimmed stdout of a successful git invocation, `None` when git is missing,
/// fails, or prints nothing.
fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let stdout = String::from_utf8(output.stdout).ok()?;
    let stdout = stdout.trim();
    (!stdout.is_empty()).then(|| stdout.to_string())
}
