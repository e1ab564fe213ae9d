use std::fmt;

/// Archive container chosen for a runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    Zip,
    TarGz,
}

impl ArchiveFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ArchiveFormat::Zip => "zip",
            ArchiveFormat::TarGz => "tar.gz",
        }
    }
}

/// Replacements turning a dotnet runtime identifier into `os_arch` form.
/// Order matters: `x64` must be rewritten before `win` grows into `windows`.
const RUNTIME_MAPPINGS: [(&str, &str); 4] = [
    ("x64", "amd64"),
    ("win", "windows"),
    ("osx", "darwin"),
    ("-", "_"),
];

/// A dotnet runtime identifier such as `linux-x64` or `win-x64`.
///
/// Any string is accepted. Identifiers that are not Windows runtimes are
/// packaged the Unix way, including ones the toolchain would reject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeId(String);

impl RuntimeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_windows(&self) -> bool {
        self.0.starts_with("win")
    }

    pub fn archive_format(&self) -> ArchiveFormat {
        if self.is_windows() {
            ArchiveFormat::Zip
        } else {
            ArchiveFormat::TarGz
        }
    }

    /// File name of the published executable.
    pub fn binary_name(&self, project: &str) -> String {
        if self.is_windows() {
            format!("{}.exe", project)
        } else {
            project.to_string()
        }
    }

    /// Vendor-neutral form used in archive names (`win-x64` -> `windows_amd64`).
    pub fn mapped(&self) -> String {
        map_runtime(&self.0)
    }
}

impl fmt::Display for RuntimeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub(crate) fn map_runtime(id: &str) -> String {
    RUNTIME_MAPPINGS
        .iter()
        .fold(id.to_string(), |acc, (from, to)| acc.replace(from, to))
}

#[cfg(test)]
mod tests {
    use super::*;

    const KNOWN_RUNTIMES: [&str; 5] = [
        "win-x64",
        "linux-x64",
        "osx-x64",
        "linux-arm64",
        "osx-arm64",
    ];

    #[test]
    fn test_mapped_known_runtimes() {
        let cases = [
            ("win-x64", "windows_amd64"),
            ("linux-x64", "linux_amd64"),
            ("osx-x64", "darwin_amd64"),
            ("linux-arm64", "linux_arm64"),
            ("osx-arm64", "darwin_arm64"),
        ];
        for (id, expected) in cases {
            assert_eq!(RuntimeId::new(id).mapped(), expected, "runtime {}", id);
        }
    }

    #[test]
    fn test_windows_runtimes_use_zip_and_exe() {
        for id in ["win-x64", "win-arm64", "win-x86"] {
            let runtime = RuntimeId::new(id);
            assert_eq!(runtime.archive_format(), ArchiveFormat::Zip);
            assert_eq!(runtime.archive_format().extension(), "zip");
            assert_eq!(runtime.binary_name("notation-azure-kv"), "notation-azure-kv.exe");
        }
    }

    #[test]
    fn test_other_runtimes_use_tar_gz_without_suffix() {
        for id in ["linux-x64", "osx-x64", "linux-arm64", "osx-arm64", "linux-musl-x64"] {
            let runtime = RuntimeId::new(id);
            assert_eq!(runtime.archive_format(), ArchiveFormat::TarGz);
            assert_eq!(runtime.archive_format().extension(), "tar.gz");
            assert_eq!(runtime.binary_name("notation-azure-kv"), "notation-azure-kv");
        }
    }

    #[test]
    fn test_unrecognized_runtime_falls_through_to_tar_gz() {
        let runtime = RuntimeId::new("freebsd-x64");
        assert_eq!(runtime.archive_format(), ArchiveFormat::TarGz);
        assert_eq!(runtime.mapped(), "freebsd_amd64");
    }

    #[test]
    fn test_mapping_is_idempotent_on_mapped_output() {
        for id in KNOWN_RUNTIMES {
            let once = map_runtime(id);
            if ["x64", "win", "osx", "-"].iter().all(|s| !once.contains(s)) {
                assert_eq!(map_runtime(&once), once, "runtime {}", id);
            }
        }
        assert_eq!(map_runtime("linux_arm64"), "linux_arm64");
        assert_eq!(map_runtime("linux_amd64"), "linux_amd64");
    }

    #[test]
    fn test_mapping_is_not_idempotent_with_residual_win() {
        // "darwin" still contains "win"
        assert_eq!(map_runtime("darwin_amd64"), "darwindows_amd64");
    }

    #[test]
    fn test_display_shows_raw_identifier() {
        assert_eq!(RuntimeId::new("osx-arm64").to_string(), "osx-arm64");
    }
}
