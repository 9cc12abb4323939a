//! Crumb Storefront CLI

use std::process;

use crate::{cli::Cli, observability::init_subscriber};

mod cli;
mod config;
mod observability;
mod terminal;

#[tokio::main]
pub async fn main() {
    let cli = Cli::load().unwrap_or_else(|error| error.exit());

    if let Err(error) = init_subscriber(&cli.config.logging) {
        eprintln!("{error}");
        process::exit(1);
    }

    if let Err(error) = cli.run().await {
        eprintln!("{error}");
        process::exit(1);
    }
}
