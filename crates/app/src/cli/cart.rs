use clap::{Args, Subcommand};
use crumb::products::ProductId;
use crumb_app::context::AppContext;

#[derive(Debug, Args)]
pub(crate) struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Show the cart and its totals
    Show,

    /// Add one unit of a menu item
    Add {
        /// Menu item id
        id: u64,
    },

    /// Set a line's quantity; zero or less removes it
    Update {
        /// Menu item id
        id: u64,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },

    /// Remove a line
    Remove {
        /// Menu item id
        id: u64,
    },

    /// Empty the cart
    Clear,
}

pub(crate) async fn run(command: CartCommand, context: &AppContext) -> Result<(), String> {
    let cart = &context.cart;

    match command.command {
        CartSubcommand::Show => return show(context),
        CartSubcommand::Add { id } => {
            let item = context
                .menu
                .get_item(ProductId::new(id))
                .await
                .map_err(|error| format!("failed to fetch menu item {id}: {error}"))?;

            let product = item
                .to_product(cart.currency())
                .map_err(|error| format!("menu item {id} cannot be added: {error}"))?;

            let quantity = cart
                .add_item(&product)
                .map_err(|error| format!("failed to add item: {error}"))?;

            println!("{} has been added to your cart (quantity {quantity})", product.name);
        }
        CartSubcommand::Update { id, quantity } => {
            cart.update_quantity(ProductId::new(id), quantity)
                .map_err(|error| format!("failed to update item: {error}"))?;
        }
        CartSubcommand::Remove { id } => {
            let removed = cart
                .remove_item(ProductId::new(id))
                .map_err(|error| format!("failed to remove item: {error}"))?;

            match removed {
                Some(line) => println!("{} has been removed from your cart", line.name()),
                None => println!("item {id} is not in your cart"),
            }
        }
        CartSubcommand::Clear => {
            cart.clear()
                .map_err(|error| format!("failed to clear cart: {error}"))?;
        }
    }

    show(context)
}

pub(crate) fn show(context: &AppContext) -> Result<(), String> {
    let cart = context.cart.cart().map_err(|error| error.to_string())?;

    if cart.is_empty() {
        println!("your cart is empty");
        return Ok(());
    }

    for line in cart.lines() {
        let total = line.total().map_err(|error| error.to_string())?;

        println!(
            "{:>4}  {:<32} {:>3} x {:>10} = {:>10}",
            line.product_id(),
            line.name(),
            line.quantity(),
            line.unit_price(),
            total
        );
    }

    let subtotal = cart.total_price().map_err(|error| error.to_string())?;

    println!("items: {}", cart.total_items());
    println!("subtotal: {subtotal}");

    Ok(())
}
