use std::sync::Arc;

use clap::Args;
use crumb::{checkout::CustomerDetails, promotions::PromoDescriptor};
use crumb_app::{checkout::CheckoutError, context::AppContext};

use crate::terminal::TerminalGateway;

#[derive(Debug, Args)]
pub(crate) struct CheckoutArgs {
    /// Contact email
    #[arg(long)]
    email: String,

    /// Customer name
    #[arg(long)]
    name: String,

    /// Contact phone number
    #[arg(long)]
    phone: String,

    /// Delivery address
    #[arg(long)]
    address: String,

    /// Optional promo code
    #[arg(long)]
    promo: Option<String>,
}

pub(crate) async fn run(args: CheckoutArgs, context: &AppContext) -> Result<(), String> {
    let mut orchestrator = context.checkout(Arc::new(TerminalGateway::stdio()));

    orchestrator
        .submit_details(CustomerDetails {
            email: args.email,
            name: args.name,
            phone: args.phone,
            address: args.address,
        })
        .map_err(|error| describe(&error))?;

    if let Some(code) = args.promo {
        match orchestrator.apply_promo(&code).await {
            Ok(descriptor) => println!("{}", promo_applied(descriptor)),
            Err(error) => return Err(describe(&error)),
        }
    }

    let totals = orchestrator.totals().map_err(|error| describe(&error))?;

    println!("subtotal: {}", totals.subtotal);
    println!("discount: {}", totals.discount);
    println!("delivery fee: {}", totals.delivery_fee);
    println!("total: {}", totals.final_amount);

    let settlement = orchestrator.settle().await.map_err(|error| describe(&error))?;

    println!("{}", settlement.notice);
    println!("order_id: {}", settlement.order_id);
    println!("payment_reference: {}", settlement.reference);

    Ok(())
}

fn promo_applied(descriptor: &PromoDescriptor) -> String {
    format!("Promo code applied! {}", descriptor.discount)
}

fn describe(error: &CheckoutError) -> String {
    let mut message = error.notice().to_string();

    if error.route().is_some() {
        message.push_str(" (returning to your cart)");
    }

    message
}
