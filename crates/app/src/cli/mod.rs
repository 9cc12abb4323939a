use clap::{Parser, Subcommand};
use crumb_app::context::AppContext;

use crate::config::AppConfig;

mod cart;
mod checkout;
mod menu;
mod orders;
mod promo;
mod session;

#[derive(Debug, Parser)]
#[command(name = "crumb-app", about = "Crumb storefront CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub config: AppConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Menu(menu::MenuCommand),
    Cart(cart::CartCommand),
    Promo(promo::PromoCommand),
    Checkout(checkout::CheckoutArgs),
    Orders(orders::OrdersCommand),
    Session(session::SessionCommand),
}

impl Cli {
    /// Load configuration from `.env`, the environment and arguments.
    pub(crate) fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    pub(crate) async fn run(self) -> Result<(), String> {
        let settings = self
            .config
            .settings()
            .map_err(|error| format!("invalid configuration: {error}"))?;

        let context = AppContext::from_settings(settings)
            .map_err(|error| format!("failed to start: {error}"))?;

        match self.command {
            Commands::Menu(command) => menu::run(command, &context).await,
            Commands::Cart(command) => cart::run(command, &context).await,
            Commands::Promo(command) => promo::run(command, &context).await,
            Commands::Checkout(args) => checkout::run(args, &context).await,
            Commands::Orders(command) => orders::run(command, &context).await,
            Commands::Session(command) => session::run(command, &context),
        }
    }
}
