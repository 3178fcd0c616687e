use std::process::ExitCode;

use clap::Parser;
use tern_web::{Cli, Server, ServerConfig};
use tracing::{error, info};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder().with_max_level(cli.log_level).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let config = ServerConfig::from(cli);
    info!(directory = %config.directory.display(), "serving files");

    let server = match Server::bind(config).await {
        Ok(server) => server,
        Err(e) => {
            error!(cause = %e, "bind server error");
            return ExitCode::FAILURE;
        }
    };

    server.serve().await;
    ExitCode::SUCCESS
}
