use anyhow::Result;
use akv_release::config::ServerConfig;
use akv_release::server;
use clap::Parser;

/// akv-download-server - serve ./bin/artifacts/ on port 8000
///
/// Used by end-to-end tests to download freshly packaged plugin archives.
/// Runs until the process is killed.
#[derive(Parser, Debug)]
#[command(name = "akv-download-server", author, version = env!("AKV_RELEASE_VERSION"), about)]
struct Cli {}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let _cli = Cli::parse();

    let config = ServerConfig::default();
    let listener = server::bind(&config).await?;
    server::serve(listener, &config).await
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
    fn test_cli_takes_no_arguments() {
        assert!(Cli::try_parse_from(["akv-download-server"]).is_ok());
        assert!(Cli::try_parse_from(["akv-download-server", "--port", "9000"]).is_err());
        assert!(Cli::try_parse_from(["akv-download-server", "extra"]).is_err());
    }
}
