//! The release packaging pipeline: publish one binary, archive it with the
//! license, drop the archive into the artifacts directory.

use anyhow::{Context, Result};
use log::{debug, info};
use std::path::PathBuf;

use crate::archive::{ArchiveMember, ArchivePacker};
use crate::config::PackagerConfig;
use crate::release::ReleaseDescriptor;
use crate::runtime::Runtime;
use crate::toolchain::{PublishCommand, resolve_revision};

/// Build and archive one release. Returns the path of the written archive.
///
/// Steps run strictly in order and the first failure aborts the rest, so a
/// failed publish never leaves an archive behind.
#[tracing::instrument(level = "debug", skip(runtime, packer, config), fields(version = %release.version, runtime_id = %release.runtime))]
pub fn package<R, P>(
    runtime: &R,
    packer: &P,
    config: &PackagerConfig,
    release: &ReleaseDescriptor,
) -> Result<PathBuf>
where
    R: Runtime + 'static,
    P: ArchivePacker,
{
    for dir in [&config.publish_dir, &config.artifacts_dir] {
        debug!("Ensuring directory {:?}", dir);
        runtime
            .create_dir_all(dir)
            .with_context(|| format!("Failed to create {:?}", dir))?;
    }

    let commit_hash = resolve_revision(runtime, &config.project_root)?;

    PublishCommand::new(config, release, &commit_hash).run(runtime, &config.project_root)?;

    let binary_name = release.runtime.binary_name(&config.project_name);
    let binary_path = config.runtime_publish_dir(release).join(&binary_name);
    let archive_path = config.archive_path(release);
    debug!(
        "Packing {:?} for {} ({})",
        binary_path,
        release.runtime,
        release.runtime.mapped()
    );

    let members = [
        ArchiveMember::executable(binary_path, binary_name),
        ArchiveMember::file(&config.license_file, "LICENSE"),
    ];
    packer
        .pack(runtime, release.runtime.archive_format(), &archive_path, &members)
        .with_context(|| format!("Failed to create artifact {:?}", archive_path))?;

    info!("Artifact: {}", archive_path.display());
    Ok(archive_path)
}
