//! External build tools: git for the revision, `dotnet publish` for the binary.

use anyhow::{Context, Result, bail};
use log::info;
use std::path::{Path, PathBuf};

use crate::config::PackagerConfig;
use crate::release::ReleaseDescriptor;
use crate::runtime::Runtime;

pub const GIT: &str = "git";
pub const DOTNET: &str = "dotnet";

/// Short hash of the latest commit in `repo`.
#[tracing::instrument(level = "debug", skip(runtime))]
pub fn resolve_revision<R: Runtime>(runtime: &R, repo: &Path) -> Result<String> {
    let args: Vec<String> = ["log", "--pretty=format:%h", "-n", "1"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    let output = runtime
        .command_output(GIT, &args, repo)
        .context("Failed to resolve the current commit hash")?;

    let hash = output.trim();
    if hash.is_empty() {
        bail!("git returned an empty commit hash for {:?}", repo);
    }
    info!("Commit hash: {}", hash);
    Ok(hash.to_string())
}

/// A `dotnet publish` invocation producing a self-contained executable.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishCommand {
    pub project_dir: PathBuf,
    pub output_dir: PathBuf,
    pub runtime: String,
    pub version: String,
    pub commit_hash: String,
    pub enable_aot: bool,
}

impl PublishCommand {
    pub fn new(config: &PackagerConfig, release: &ReleaseDescriptor, commit_hash: &str) -> Self {
        Self {
            project_dir: config.project_dir.clone(),
            output_dir: config.runtime_publish_dir(release),
            runtime: release.runtime.as_str().to_string(),
            version: release.version.clone(),
            commit_hash: commit_hash.to_string(),
            enable_aot: release.enable_aot,
        }
    }

    pub fn args(&self) -> Vec<String> {
        let mut args = vec![
            "publish".to_string(),
            self.project_dir.to_string_lossy().into_owned(),
            "--configuration".to_string(),
            "Release".to_string(),
            "--self-contained".to_string(),
            "true".to_string(),
            format!("-p:CommitHash={}", self.commit_hash),
            format!("-p:Version={}", self.version),
            "-r".to_string(),
            self.runtime.clone(),
            "-o".to_string(),
            self.output_dir.to_string_lossy().into_owned(),
        ];

        if self.enable_aot {
            args.push("-p:PublishAot=true".to_string());
        } else {
            args.push("-p:PublishSingleFile=true".to_string());
        }
        args
    }

    /// Run the publish. A non-zero exit is returned as an error, never retried.
    #[tracing::instrument(level = "debug", skip(self, runtime), fields(runtime_id = %self.runtime, aot = self.enable_aot))]
    pub fn run<R: Runtime>(&self, runtime: &R, cwd: &Path) -> Result<()> {
        info!("Publishing {} for {}...", self.version, self.runtime);
        runtime
            .command_status(DOTNET, &self.args(), cwd)
            .with_context(|| format!("dotnet publish failed for runtime {}", self.runtime))
    }
}
