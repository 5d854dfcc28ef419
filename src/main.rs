use anyhow::Result;
use aoip_bandwidth::cli::{Cli, CalcCommandHandler};
use aoip_bandwidth::config::AppConfig;
use clap::Parser;
use log::debug;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    debug!("Parsed command line: {:?}", cli);

    let config = AppConfig::load(cli.config.as_deref())?;
    let handler = CalcCommandHandler::new(config);

    handler.handle(cli.command).await
}
