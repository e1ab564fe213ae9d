use crate::runtime::Runtime;
use anyhow::{Context, Result};
use flate2::Compression;
use flate2::write::GzEncoder;
use log::info;
use std::path::Path;
use tar::{Builder, Header};

use super::{ArchiveMember, read_members, write_archive};

/// Packer for .tar.gz archives
pub struct TarGzPacker;

impl TarGzPacker {
    pub fn pack<R: Runtime + 'static>(
        &self,
        runtime: &R,
        archive_path: &Path,
        members: &[ArchiveMember],
    ) -> Result<()> {
        let contents = read_members(runtime, members)?;

        let enc = GzEncoder::new(Vec::new(), Compression::default());
        let mut tar = Builder::new(enc);
        for (member, data) in &contents {
            let mut header = Header::new_gnu();
            header.set_size(data.len() as u64);
            header.set_mode(member.mode());
            tar.append_data(&mut header, &member.name, data.as_slice())
                .with_context(|| format!("Failed to add {} to tar archive", member.name))?;
        }
        let bytes = tar
            .into_inner()
            .and_then(|enc| enc.finish())
            .context("Failed to finish tar.gz archive")?;

        write_archive(runtime, archive_path, &bytes)
            .with_context(|| format!("Failed to write archive {:?}", archive_path))?;

        info!("Created {}", archive_path.display());
        Ok(())
    }
}

#[cfg(test)]
pub(super) mod tests {
    use super::*;
    use crate::archive::tests::write_members;
    use crate::runtime::RealRuntime;
    use flate2::read::GzDecoder;
    use std::fs::File;
    use std::io::Read;
    use tar::Archive;
    use tempfile::tempdir;

    pub(in crate::archive) fn entry_names(path: &Path) -> Result<Vec<String>> {
        let mut archive = Archive::new(GzDecoder::new(File::open(path)?));
        let mut names = Vec::new();
        for entry in archive.entries()? {
            names.push(entry?.path()?.to_string_lossy().into_owned());
        }
        Ok(names)
    }

    #[test]
    fn test_pack_writes_bare_names_modes_and_contents() -> Result<()> {
        let dir = tempdir()?;
        let members = write_members(dir.path())?;
        let archive_path = dir.path().join("notation-azure-kv_2.0.0_linux_arm64.tar.gz");

        TarGzPacker.pack(&RealRuntime, &archive_path, &members)?;

        let mut archive = Archive::new(GzDecoder::new(File::open(&archive_path)?));
        let mut seen = Vec::new();
        for entry in archive.entries()? {
            let mut entry = entry?;
            let name = entry.path()?.to_string_lossy().into_owned();
            let mode = entry.header().mode()?;
            let mut content = String::new();
            entry.read_to_string(&mut content)?;
            seen.push((name, mode, content));
        }

        assert_eq!(
            seen,
            vec![
                (
                    "notation-azure-kv".to_string(),
                    0o755,
                    "#!/bin/sh\necho plugin\n".to_string()
                ),
                ("LICENSE".to_string(), 0o644, "MIT License".to_string()),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_pack_empty_member_list_yields_empty_archive() -> Result<()> {
        let dir = tempdir()?;
        let archive_path = dir.path().join("empty.tar.gz");

        TarGzPacker.pack(&RealRuntime, &archive_path, &[])?;

        assert!(entry_names(&archive_path)?.is_empty());
        Ok(())
    }
}
