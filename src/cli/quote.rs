use std::io::Write;

use clap::{Args, Subcommand};
use rust_decimal::Decimal;

use comptoir::{
    accessories::PouchSize,
    catalog::Catalog,
    pricing::{accessory_price_for, price_for},
    promotions::{gifts_for, sample_allowance},
    weights::Grams,
};

use crate::cli::{CliError, heading};

#[derive(Debug, Args)]
pub(crate) struct QuoteCommand {
    #[command(subcommand)]
    command: QuoteSubcommand,
}

#[derive(Debug, Subcommand)]
enum QuoteSubcommand {
    /// Price a weight of flower or resin
    Flower {
        /// Product id, e.g. og-kush
        id: String,

        /// Weight in grams, e.g. 25 or 2.5g
        #[arg(allow_negative_numbers = true)]
        weight: Grams,
    },

    /// Price a quantity of an accessory
    Accessory {
        /// Accessory id, e.g. briquet-hsb
        id: String,

        /// Number of units
        #[arg(allow_negative_numbers = true)]
        quantity: Decimal,
    },
}

pub(crate) fn run(
    command: QuoteCommand,
    catalog: &Catalog<'_>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    match command.command {
        QuoteSubcommand::Flower { id, weight } => {
            let (_, product) = catalog
                .product_by_id(&id)
                .ok_or(CliError::UnknownProduct(id))?;

            let quote = price_for(&product.price, weight);

            heading(out, &format!("{} × {weight}", product.name))?;
            writeln!(out, " Price:    {}", quote.raw_total())?;
            writeln!(out, " Discount: {}", quote.discount_label())?;
            writeln!(out, " Total:    {}", quote.final_total())?;
            writeln!(out, " Savings:  {}", quote.savings())?;

            if weight.is_positive() {
                let pouch = PouchSize::for_weight(weight);

                writeln!(out, " Pouch:    {} ({})", pouch.label(), pouch.accessory_id())?;
            }

            if let Some(gifts) = gifts_for(weight) {
                writeln!(out, " Gifts:    {gifts}")?;
            }

            let samples = sample_allowance(weight);

            if samples > 0 {
                writeln!(out, " Samples:  {samples} free 1g sample(s)")?;
            }

            writeln!(out)?;
        }
        QuoteSubcommand::Accessory { id, quantity } => {
            let (_, accessory) = catalog
                .accessory_by_id(&id)
                .ok_or(CliError::UnknownAccessory(id))?;

            let quote = accessory_price_for(&accessory.price, quantity);

            heading(out, &format!("{} × {quantity}", accessory.name))?;
            writeln!(out, " Price:    {}", quote.raw_total())?;

            if let Some(label) = quote.discount_label() {
                writeln!(out, " Discount: {label}")?;
            }

            writeln!(out, " Total:    {}", quote.final_total())?;
            writeln!(out)?;
        }
    }

    Ok(())
}
