use crate::runtime::Runtime;
use anyhow::{Context, Result};
use log::info;
use std::io::{Cursor, Write};
use std::path::Path;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use super::{ArchiveMember, read_members, write_archive};

/// Packer for .zip archives
pub struct ZipPacker;

impl ZipPacker {
    pub fn pack<R: Runtime + 'static>(
        &self,
        runtime: &R,
        archive_path: &Path,
        members: &[ArchiveMember],
    ) -> Result<()> {
        let contents = read_members(runtime, members)?;

        // ZipWriter needs Seek, so the archive is assembled in memory first
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        for (member, data) in &contents {
            let options = SimpleFileOptions::default()
                .compression_method(CompressionMethod::Deflated)
                .unix_permissions(member.mode());
            zip.start_file(member.name.as_str(), options)
                .with_context(|| format!("Failed to add {} to zip archive", member.name))?;
            zip.write_all(data)
                .with_context(|| format!("Failed to write {} to zip archive", member.name))?;
        }
        let bytes = zip
            .finish()
            .context("Failed to finish zip archive")?
            .into_inner();

        write_archive(runtime, archive_path, &bytes)
            .with_context(|| format!("Failed to write archive {:?}", archive_path))?;

        info!("Created {}", archive_path.display());
        Ok(())
    }
}
