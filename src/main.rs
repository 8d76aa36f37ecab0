use anyhow::Result;
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use csb::app::App;
use csb::cli::Cli;
use csb::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load().await?;
    init_logging(cli.verbose, &config.logging.level);

    match cli.command {
        Some(cmd) => {
            let mut app = App::with_config(config).await?;
            app.run_command(cmd).await?;
        }
        None => {
            Cli::command().print_help()?;
        }
    }

    Ok(())
}

/// `-v` flags win over `RUST_LOG`, which wins over the configured level.
fn init_logging(verbose: u8, configured: &str) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(configured)),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
