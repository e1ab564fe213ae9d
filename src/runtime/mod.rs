//! Runtime abstraction for system operations.
//!
//! Everything the packager does to the outside world goes through the
//! [`Runtime`] trait so the naming and archiving logic can be exercised
//! against a mock.
//!
//! # Structure
//!
//! - `fs` - File system operations (read, write, directory)
//! - `process` - External command execution (git, dotnet)

mod fs;
mod process;

use anyhow::Result;
use std::path::Path;

pub use process::ToolError;

#[cfg_attr(test, mockall::automock)]
pub trait Runtime: Send + Sync {
    // File System
    fn create_dir_all(&self, path: &Path) -> Result<()>;
    fn exists(&self, path: &Path) -> bool;
    fn read(&self, path: &Path) -> Result<Vec<u8>>;
    fn create_file(&self, path: &Path) -> Result<Box<dyn std::io::Write + Send>>;
    fn remove_file(&self, path: &Path) -> Result<()>;

    // Processes
    /// Run `program` in `cwd` and return its captured stdout.
    /// A non-zero exit status is reported as [`ToolError::Failed`].
    fn command_output(&self, program: &str, args: &[String], cwd: &Path) -> Result<String>;

    /// Run `program` in `cwd` with inherited stdio.
    /// A non-zero exit status is reported as [`ToolError::Failed`].
    fn command_status(&self, program: &str, args: &[String], cwd: &Path) -> Result<()>;
}

pub struct RealRuntime;

impl Runtime for RealRuntime {
    fn create_dir_all(&self, path: &Path) -> Result<()> {
        self.create_dir_all_impl(path)
    }

    fn exists(&self, path: &Path) -> bool {
        self.exists_impl(path)
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        self.read_impl(path)
    }

    fn create_file(&self, path: &Path) -> Result<Box<dyn std::io::Write + Send>> {
        self.create_file_impl(path)
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        self.remove_file_impl(path)
    }

    fn command_output(&self, program: &str, args: &[String], cwd: &Path) -> Result<String> {
        self.command_output_impl(program, args, cwd)
    }

    fn command_status(&self, program: &str, args: &[String], cwd: &Path) -> Result<()> {
        self.command_status_impl(program, args, cwd)
    }
}
