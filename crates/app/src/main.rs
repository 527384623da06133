#![forbid(unsafe_code)]

mod cli;
mod config;
mod render;

use clap::Parser;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();
    let args = cli::Cli::parse();
    if let Err(err) = cli::run(args).await {
        eprintln!("error: {err:#}");
        std::process::exit(2);
    }
}
