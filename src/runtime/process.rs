//! External command execution.

use anyhow::Result;
use log::{debug, error};
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

use super::RealRuntime;

/// Failure of an external tool such as `git` or `dotnet`.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Failed to run `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{program}` exited with {}", describe_code(.code))]
    Failed { program: String, code: Option<i32> },
}

impl ToolError {
    /// Exit code reported by the tool, if it ran and exited normally.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            ToolError::Failed { code, .. } => *code,
            ToolError::Spawn { .. } => None,
        }
    }
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

fn check_status(program: &str, status: ExitStatus) -> Result<(), ToolError> {
    if status.success() {
        return Ok(());
    }
    Err(ToolError::Failed {
        program: program.to_string(),
        code: status.code(),
    })
}

impl RealRuntime {
    #[tracing::instrument(level = "debug", skip(self))]
    pub(crate) fn command_output_impl(
        &self,
        program: &str,
        args: &[String],
        cwd: &Path,
    ) -> Result<String> {
        debug!("Running {} {}", program, args.join(" "));
        let output = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| ToolError::Spawn {
                program: program.to_string(),
                source,
            })?;

        if !output.status.success() {
            error!(
                "{} failed: {}",
                program,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        check_status(program, output.status)?;

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub(crate) fn command_status_impl(
        &self,
        program: &str,
        args: &[String],
        cwd: &Path,
    ) -> Result<()> {
        debug!("Running {} {}", program, args.join(" "));
        let status = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .status()
            .map_err(|source| ToolError::Spawn {
                program: program.to_string(),
                source,
            })?;

        check_status(program, status)?;
        Ok(())
    }
}
