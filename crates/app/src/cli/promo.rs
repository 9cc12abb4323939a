use clap::{Args, Subcommand};
use crumb::checkout::CheckoutTotals;
use crumb_app::context::AppContext;

#[derive(Debug, Args)]
pub(crate) struct PromoCommand {
    #[command(subcommand)]
    command: PromoSubcommand,
}

#[derive(Debug, Subcommand)]
enum PromoSubcommand {
    /// Check a promo code against the current cart
    Check {
        /// Promo code
        code: String,
    },
}

pub(crate) async fn run(command: PromoCommand, context: &AppContext) -> Result<(), String> {
    match command.command {
        PromoSubcommand::Check { code } => {
            let descriptor = context
                .promos
                .validate(code.trim())
                .await
                .map_err(|error| format!("promo code not applied: {error}"))?;

            let subtotal = context
                .cart
                .total_price()
                .map_err(|error| error.to_string())?;

            let totals = CheckoutTotals::compute(
                subtotal,
                context.checkout.delivery_fee,
                Some(&descriptor.discount),
            )
            .map_err(|error| error.to_string())?;

            println!("code: {}", descriptor.code);
            println!("discount: {}", descriptor.discount);
            println!("subtotal: {}", totals.subtotal);
            println!("discount amount: {}", totals.discount);
            println!("delivery fee: {}", totals.delivery_fee);
            println!("total: {}", totals.final_amount);
        }
    }

    Ok(())
}
