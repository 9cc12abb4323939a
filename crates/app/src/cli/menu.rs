use clap::{Args, Subcommand};
use crumb::products::ProductId;
use crumb_app::context::AppContext;

#[derive(Debug, Args)]
pub(crate) struct MenuCommand {
    #[command(subcommand)]
    command: MenuSubcommand,
}

#[derive(Debug, Subcommand)]
enum MenuSubcommand {
    /// List every menu item
    List,

    /// Show one menu item
    Show {
        /// Menu item id
        id: u64,
    },
}

pub(crate) async fn run(command: MenuCommand, context: &AppContext) -> Result<(), String> {
    match command.command {
        MenuSubcommand::List => {
            let items = context
                .menu
                .list_items()
                .await
                .map_err(|error| format!("failed to list menu: {error}"))?;

            if items.is_empty() {
                println!("the menu is empty");
                return Ok(());
            }

            for item in items {
                println!(
                    "{:>4}  {:<32} {:>10}  {}",
                    item.id,
                    item.name,
                    item.price,
                    item.category_name().unwrap_or("-")
                );
            }
        }
        MenuSubcommand::Show { id } => {
            let item = context
                .menu
                .get_item(ProductId::new(id))
                .await
                .map_err(|error| format!("failed to fetch menu item {id}: {error}"))?;

            println!("id: {}", item.id);
            println!("name: {}", item.name);
            println!("price: {}", item.price);
            println!("image: {}", item.image);
            println!("category: {}", item.category_name().unwrap_or("none"));
            println!(
                "description: {}",
                item.description.as_deref().unwrap_or("none")
            );
        }
    }

    Ok(())
}
