use akv_release::archive::ArchivePackerImpl;
use akv_release::config::PackagerConfig;
use akv_release::package::package;
use akv_release::release::ReleaseDescriptor;
use akv_release::runtime::{RealRuntime, ToolError};
use clap::Parser;
use std::process::ExitCode;

/// akv-package - build and archive the notation-azure-kv plugin
///
/// Runs `dotnet publish` for one runtime and bundles the binary with LICENSE
/// into ./bin/artifacts/. Windows runtimes produce a .zip, all others a .tar.gz.
///
/// Examples:
///   akv-package v1.0.0 linux-x64
///   akv-package v1.0.0 win-x64 --enable-aot
#[derive(Parser, Debug)]
#[command(name = "akv-package", author, version = env!("AKV_RELEASE_VERSION"), about)]
struct Cli {
    /// The version tag, starts with v
    #[arg(value_name = "VERSION")]
    tag: String,

    /// The runtime environment, e.g. win-x64, linux-x64, osx-x64, linux-arm64, osx-arm64
    #[arg(value_name = "RUNTIME")]
    runtime: String,

    /// Enable AOT compilation
    #[arg(long = "enable-aot")]
    enable_aot: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let release = ReleaseDescriptor::new(&cli.tag, &cli.runtime, cli.enable_aot);
    let config = PackagerConfig::default();

    match package(&RealRuntime, &ArchivePackerImpl::new(), &config, &release) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:?}", err);
            ExitCode::from(exit_code_for(&err))
        }
    }
}

/// A failing tool's own exit code is passed through; anything else exits 1.
fn exit_code_for(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<ToolError>()
        .and_then(ToolError::exit_code)
        .and_then(|code| u8::try_from(code).ok())
        .filter(|code| *code != 0)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_version_flag_does_not_clash_with_tag() {
        let err = Cli::try_parse_from(["akv-package", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_cli_positional_parsing() {
        let cli = Cli::try_parse_from(["akv-package", "v1.0.0", "win-x64"]).unwrap();
        assert_eq!(cli.tag, "v1.0.0");
        assert_eq!(cli.runtime, "win-x64");
        assert!(!cli.enable_aot);
    }

    #[test]
    fn test_cli_enable_aot_parsing() {
        let cli =
            Cli::try_parse_from(["akv-package", "2.0.0", "linux-arm64", "--enable-aot"]).unwrap();
        assert_eq!(cli.tag, "2.0.0");
        assert_eq!(cli.runtime, "linux-arm64");
        assert!(cli.enable_aot);
    }

    #[test]
    fn test_cli_requires_runtime() {
        assert!(Cli::try_parse_from(["akv-package", "v1.0.0"]).is_err());
    }

    #[test]
    fn test_cli_rejects_unknown_flags() {
        assert!(Cli::try_parse_from(["akv-package", "v1.0.0", "linux-x64", "--aot"]).is_err());
    }

    #[test]
    fn test_exit_code_passes_tool_code_through() {
        let err: anyhow::Error = ToolError::Failed {
            program: "dotnet".to_string(),
            code: Some(3),
        }
        .into();
        let err = err.context("dotnet publish failed for runtime linux-x64");
        assert_eq!(exit_code_for(&err), 3);
    }

    #[test]
    fn test_exit_code_defaults_to_failure() {
        let err = anyhow::anyhow!("Failed to read file \"LICENSE\"");
        assert_eq!(exit_code_for(&err), 1);

        let signalled: anyhow::Error = ToolError::Failed {
            program: "dotnet".to_string(),
            code: None,
        }
        .into();
        assert_eq!(exit_code_for(&signalled), 1);
    }
}
