//! Release naming: version normalization, runtime identifiers and the
//! archive names derived from them.

mod runtime_id;

pub use runtime_id::{ArchiveFormat, RuntimeId};

/// What one packager invocation builds.
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseDescriptor {
    /// Version without the leading `v`.
    pub version: String,
    pub runtime: RuntimeId,
    pub enable_aot: bool,
}

impl ReleaseDescriptor {
    pub fn new(version: &str, runtime: &str, enable_aot: bool) -> Self {
        Self {
            version: normalize_version(version),
            runtime: RuntimeId::new(runtime),
            enable_aot,
        }
    }
}

/// Strip the leading `v` of a version tag (`v1.2.3` -> `1.2.3`).
pub fn normalize_version(raw: &str) -> String {
    raw.trim_start_matches('v').to_string()
}

/// `<project>_<version>_<mapped runtime>.<ext>`
pub fn archive_file_name(project: &str, version: &str, runtime: &RuntimeId) -> String {
    format!(
        "{}_{}_{}.{}",
        project,
        version,
        runtime.mapped(),
        runtime.archive_format().extension()
    )
}
