use clap::{Args, Subcommand};
use crumb::checkout::OrderId;
use crumb_app::context::AppContext;

#[derive(Debug, Args)]
pub(crate) struct OrdersCommand {
    #[command(subcommand)]
    command: OrdersSubcommand,
}

#[derive(Debug, Subcommand)]
enum OrdersSubcommand {
    /// Show an order's status
    Show {
        /// Order id
        id: String,
    },
}

pub(crate) async fn run(command: OrdersCommand, context: &AppContext) -> Result<(), String> {
    match command.command {
        OrdersSubcommand::Show { id } => {
            let order = context
                .orders
                .get_order(&OrderId::new(id))
                .await
                .map_err(|error| format!("failed to fetch order: {error}"))?;

            println!("order_id: {}", order.id);
            println!("status: {}", order.status);
            println!("paid: {}", order.is_paid);
            println!(
                "payment_reference: {}",
                order.payment_reference.as_deref().unwrap_or("none")
            );
            println!(
                "total: {}",
                order
                    .final_amount
                    .map_or_else(|| "unknown".to_string(), |amount| amount.to_string())
            );
            println!(
                "placed_at: {}",
                order.created_at.as_deref().unwrap_or("unknown")
            );

            for item in order.items {
                println!("  {} x {} @ {}", item.quantity, item.name, item.price);
            }
        }
    }

    Ok(())
}
