use std::io::Write;

use clap::{Args, Subcommand};
use tracing::info;

use comptoir::{
    accessories::AccessoryKey,
    cart::{Cart, CartChange, CartError, CartObserver, CartSummary},
    catalog::Catalog,
    products::ProductKey,
    receipt::Receipt,
    storage::FileStore,
    weights::Grams,
};

use crate::cli::CliError;

#[derive(Debug, Args)]
pub(crate) struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Print the cart
    Show,

    /// Add a weight of product, on top of any already in the cart
    Add {
        /// Product id
        id: String,

        /// Weight in grams
        #[arg(allow_negative_numbers = true)]
        weight: Grams,
    },

    /// Set the weight of a product in the cart; zero removes it
    Set {
        /// Product id
        id: String,

        /// Weight in grams
        #[arg(allow_negative_numbers = true)]
        weight: Grams,
    },

    /// Remove a product from the cart
    Remove {
        /// Product id
        id: String,
    },

    /// Add units of an accessory
    AddAccessory {
        /// Accessory id
        id: String,

        /// Number of units
        #[arg(default_value_t = 1)]
        quantity: u32,
    },

    /// Set the quantity of an accessory in the cart; zero removes it
    SetAccessory {
        /// Accessory id
        id: String,

        /// Number of units
        quantity: u32,
    },

    /// Remove an accessory from the cart
    RemoveAccessory {
        /// Accessory id
        id: String,
    },

    /// Choose a free 1g sample of a flower
    AddSample {
        /// Product id
        id: String,
    },

    /// Give back a sample
    RemoveSample {
        /// Product id
        id: String,
    },

    /// Empty the cart
    Clear,
}

/// Collects samples dropped by the cart so they can be reported.
#[derive(Debug, Default)]
struct EvictionReport {
    evicted: Vec<ProductKey>,
}

impl CartObserver for EvictionReport {
    fn on_change(&mut self, change: &CartChange, summary: &CartSummary<'_>) {
        info!(
            ?change,
            items = summary.item_count(),
            total = %summary.total(),
            "cart changed"
        );
    }

    fn on_samples_evicted(&mut self, evicted: &[ProductKey]) {
        self.evicted.extend_from_slice(evicted);
    }
}

fn product_key(catalog: &Catalog<'_>, id: &str) -> Result<ProductKey, CliError> {
    catalog
        .product_key(id)
        .ok_or_else(|| CliError::UnknownProduct(id.to_string()))
}

fn accessory_key(catalog: &Catalog<'_>, id: &str) -> Result<AccessoryKey, CliError> {
    catalog
        .accessory_key(id)
        .ok_or_else(|| CliError::UnknownAccessory(id.to_string()))
}

fn removed(was_removed: bool, id: String) -> Result<(), CliError> {
    if was_removed {
        Ok(())
    } else {
        Err(CliError::NotInCart(id))
    }
}

pub(crate) fn run(
    command: CartCommand,
    catalog: &Catalog<'_>,
    store: FileStore,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let mut cart = Cart::restore_with_observer(catalog, store, EvictionReport::default());

    match command.command {
        CartSubcommand::Show => {}
        CartSubcommand::Add { id, weight } => {
            cart.add_flower(product_key(catalog, &id)?, weight)?;
        }
        CartSubcommand::Set { id, weight } => {
            cart.update_flower_weight(product_key(catalog, &id)?, weight)
                .map_err(|err| match err {
                    CartError::NotInCart => CliError::NotInCart(id),
                    other => other.into(),
                })?;
        }
        CartSubcommand::Remove { id } => {
            let key = product_key(catalog, &id)?;

            removed(cart.remove_flower(key), id)?;
        }
        CartSubcommand::AddAccessory { id, quantity } => {
            cart.add_accessory(accessory_key(catalog, &id)?, quantity)?;
        }
        CartSubcommand::SetAccessory { id, quantity } => {
            cart.update_accessory_quantity(accessory_key(catalog, &id)?, quantity)
                .map_err(|err| match err {
                    CartError::NotInCart => CliError::NotInCart(id),
                    other => other.into(),
                })?;
        }
        CartSubcommand::RemoveAccessory { id } => {
            let key = accessory_key(catalog, &id)?;

            removed(cart.remove_accessory(key), id)?;
        }
        CartSubcommand::AddSample { id } => {
            cart.add_sample(product_key(catalog, &id)?)?;
        }
        CartSubcommand::RemoveSample { id } => {
            let key = product_key(catalog, &id)?;

            removed(cart.remove_sample(key), id)?;
        }
        CartSubcommand::Clear => cart.clear(),
    }

    for key in &cart.observer().evicted {
        if let Some(product) = catalog.product(*key) {
            writeln!(
                out,
                " Sample {} removed: the cart now earns {} sample(s).",
                product.name,
                cart.sample_status().allowance()
            )?;
        }
    }

    Receipt::from_cart(&cart).write_to(out)?;

    Ok(())
}
