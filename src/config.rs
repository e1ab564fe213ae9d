use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use crate::release::{ReleaseDescriptor, archive_file_name};

pub const PROJECT_NAME: &str = "notation-azure-kv";
pub const DEFAULT_PORT: u16 = 8000;

/// Settings for the artifact download server.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub bind_addr: IpAddr,
    pub port: u16,
    pub root: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            root: PathBuf::from("./bin/artifacts/"),
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}

/// Filesystem layout the packager reads from and writes to.
#[derive(Debug, Clone, PartialEq)]
pub struct PackagerConfig {
    pub project_name: String,
    /// Repository root; git and dotnet run here.
    pub project_root: PathBuf,
    /// Project passed to `dotnet publish`.
    pub project_dir: PathBuf,
    pub publish_dir: PathBuf,
    pub artifacts_dir: PathBuf,
    pub license_file: PathBuf,
}

impl Default for PackagerConfig {
    fn default() -> Self {
        Self::rooted_at(".")
    }
}

impl PackagerConfig {
    /// Layout with every path placed under `root`.
    pub fn rooted_at(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            project_name: PROJECT_NAME.to_string(),
            project_root: root.to_path_buf(),
            project_dir: root.join("Notation.Plugin.AzureKeyVault"),
            publish_dir: root.join("bin").join("publish"),
            artifacts_dir: root.join("bin").join("artifacts"),
            license_file: root.join("LICENSE"),
        }
    }

    /// Directory `dotnet publish` writes the binary for this release into.
    pub fn runtime_publish_dir(&self, release: &ReleaseDescriptor) -> PathBuf {
        self.publish_dir.join(release.runtime.as_str())
    }

    pub fn archive_path(&self, release: &ReleaseDescriptor) -> PathBuf {
        self.artifacts_dir.join(archive_file_name(
            &self.project_name,
            &release.version,
            &release.runtime,
        ))
    }
}
