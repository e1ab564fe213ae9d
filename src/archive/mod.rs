mod tar_gz;
mod zip;

use crate::release::ArchiveFormat;
use crate::runtime::Runtime;
use anyhow::Result;
use log::{debug, warn};
use std::io::Write;
use std::path::{Path, PathBuf};

pub use self::tar_gz::TarGzPacker;
pub use self::zip::ZipPacker;

/// A file on disk and the bare name it gets inside the archive.
#[derive(Debug, Clone, PartialEq)]
pub struct ArchiveMember {
    pub source: PathBuf,
    pub name: String,
    pub executable: bool,
}

impl ArchiveMember {
    pub fn file(source: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            name: name.into(),
            executable: false,
        }
    }

    pub fn executable(source: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            executable: true,
            ..Self::file(source, name)
        }
    }

    /// Unix permission bits recorded for the entry.
    pub fn mode(&self) -> u32 {
        if self.executable { 0o755 } else { 0o644 }
    }
}

/// Writes release archives in any supported format
#[cfg_attr(test, mockall::automock)]
pub trait ArchivePacker: Send + Sync {
    /// Write `members` into a new `format` archive at `archive_path`
    fn pack<R: Runtime + 'static>(
        &self,
        runtime: &R,
        format: ArchiveFormat,
        archive_path: &Path,
        members: &[ArchiveMember],
    ) -> Result<()>;
}

/// Dispatcher holding one packer per format.
pub struct ArchivePackerImpl {
    tar_gz: TarGzPacker,
    zip: ZipPacker,
}

impl Default for ArchivePackerImpl {
    fn default() -> Self {
        Self::new()
    }
}

impl ArchivePackerImpl {
    pub fn new() -> Self {
        Self {
            tar_gz: TarGzPacker,
            zip: ZipPacker,
        }
    }
}

impl ArchivePacker for ArchivePackerImpl {
    #[tracing::instrument(level = "debug", skip(self, runtime, members))]
    fn pack<R: Runtime + 'static>(
        &self,
        runtime: &R,
        format: ArchiveFormat,
        archive_path: &Path,
        members: &[ArchiveMember],
    ) -> Result<()> {
        match format {
            ArchiveFormat::TarGz => self.tar_gz.pack(runtime, archive_path, members),
            ArchiveFormat::Zip => self.zip.pack(runtime, archive_path, members),
        }
    }
}

/// Read every member up front so a missing file fails before the archive exists.
fn read_members<R: Runtime>(
    runtime: &R,
    members: &[ArchiveMember],
) -> Result<Vec<(ArchiveMember, Vec<u8>)>> {
    members
        .iter()
        .map(|member| {
            debug!("Adding {:?} as {}", member.source, member.name);
            let data = runtime.read(&member.source)?;
            Ok((member.clone(), data))
        })
        .collect()
}

/// Write the archive bytes, removing a half-written file if writing fails.
fn write_archive<R: Runtime>(runtime: &R, archive_path: &Path, bytes: &[u8]) -> Result<()> {
    let result = runtime.create_file(archive_path).and_then(|mut file| {
        file.write_all(bytes)?;
        file.flush()?;
        Ok(())
    });

    if result.is_err() && runtime.exists(archive_path) {
        debug!("Removing partial archive {:?}", archive_path);
        if let Err(e) = runtime.remove_file(archive_path) {
            warn!("Failed to remove partial archive {:?}: {}", archive_path, e);
        }
    }
    result
}
