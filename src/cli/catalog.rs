use std::{io::Write, ops::Range};

use clap::{Args, Subcommand};
use rust_decimal::Decimal;
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};

use comptoir::{
    accessories::PouchSize,
    catalog::{Catalog, CatalogQuery, SortOrder},
    pricing::{PRESET_WEIGHTS, price_for},
    products::{Product, ProductCategory, ProductKey},
    recommendations::{Intention, Taste, recommend, recommended_id},
    similarity::{DEFAULT_SIMILAR_COUNT, similar_products},
};

use crate::cli::{CliError, heading};

#[derive(Debug, Args)]
pub(crate) struct CatalogCommand {
    #[command(subcommand)]
    command: CatalogSubcommand,
}

#[derive(Debug, Subcommand)]
enum CatalogSubcommand {
    /// List products
    List(ListArgs),

    /// Show one product with its price grid and similar products
    Show(ShowArgs),

    /// Recommend a product for an intention and a taste
    Recommend(RecommendArgs),

    /// List accessories
    Accessories,
}

#[derive(Debug, Args)]
struct ListArgs {
    /// Only list one product family
    #[arg(long, value_enum)]
    category: Option<ProductCategory>,

    /// Case-insensitive text matched against names and descriptions
    #[arg(long)]
    search: Option<String>,

    /// Ordering of the listing
    #[arg(long, value_enum, default_value_t = SortOrder::Name)]
    sort: SortOrder,

    /// Only list featured products, in featured order
    #[arg(long, conflicts_with_all = ["category", "search"])]
    featured: bool,
}

#[derive(Debug, Args)]
struct ShowArgs {
    /// Product id, e.g. og-kush
    id: String,

    /// Number of similar products to show
    #[arg(long, default_value_t = DEFAULT_SIMILAR_COUNT)]
    similar: usize,
}

#[derive(Debug, Args)]
struct RecommendArgs {
    /// What the moment is for
    #[arg(long, value_enum)]
    intention: Intention,

    /// Preferred aromas
    #[arg(long, value_enum)]
    taste: Taste,

    /// Product family to recommend from
    #[arg(long, value_enum, default_value_t = ProductCategory::Flower)]
    category: ProductCategory,
}

pub(crate) fn run(
    command: CatalogCommand,
    catalog: &Catalog<'_>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    match command.command {
        CatalogSubcommand::List(args) => list(&args, catalog, out),
        CatalogSubcommand::Show(args) => show(&args, catalog, out),
        CatalogSubcommand::Recommend(args) => {
            let (_, product) = recommend(catalog, args.category, args.intention, args.taste)
                .ok_or_else(|| {
                    CliError::UnknownProduct(
                        recommended_id(args.category, args.intention, args.taste).to_string(),
                    )
                })?;

            heading(
                out,
                &format!(
                    "Pour votre {} • {}",
                    args.intention.label().to_lowercase(),
                    args.taste.label()
                ),
            )?;
            writeln!(
                out,
                " {} ({}), {} • {}/g • CBD {}",
                product.name,
                product.id,
                product.subtitle,
                product.price,
                product.cbd
            )?;
            writeln!(out, " {}\n", product.description)?;

            Ok(())
        }
        CatalogSubcommand::Accessories => {
            let mut builder = Builder::default();

            builder.push_record(["Id", "Name", "Price", "Description"]);

            for (_, accessory) in catalog.accessories() {
                builder.push_record([
                    accessory.id.clone(),
                    accessory.name.clone(),
                    accessory.price.to_string(),
                    accessory.description.clone(),
                ]);
            }

            write_table(out, builder, 2..3)
        }
    }
}

fn list(args: &ListArgs, catalog: &Catalog<'_>, out: &mut impl Write) -> Result<(), CliError> {
    let products: Vec<(ProductKey, &Product<'_>)> = if args.featured {
        catalog.featured().collect()
    } else {
        catalog.query(&CatalogQuery {
            category: args.category,
            search: args.search.clone(),
            sort: args.sort,
        })
    };

    if products.is_empty() {
        writeln!(out, "No products match.")?;

        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record(["Id", "Name", "Type", "Price/g", "CBD", "Mood"]);

    for (_, product) in products {
        builder.push_record([
            product.id.clone(),
            product.name.clone(),
            product.category.label().to_string(),
            product.price.to_string(),
            product.cbd.clone(),
            product.mood.clone(),
        ]);
    }

    write_table(out, builder, 3..5)
}

fn show(args: &ShowArgs, catalog: &Catalog<'_>, out: &mut impl Write) -> Result<(), CliError> {
    let (_, product) = catalog
        .product_by_id(&args.id)
        .ok_or_else(|| CliError::UnknownProduct(args.id.clone()))?;

    heading(out, &format!("{} ({})", product.name, product.subtitle))?;
    writeln!(out, " {}", product.description)?;
    writeln!(
        out,
        " {} • CBD {} • {} • {}/g",
        product.category.label(),
        product.cbd,
        product.mood,
        product.price
    )?;

    let terpenes = product.terpenes;
    writeln!(
        out,
        " Terpènes: boisé {} • fruité {} • épicé {} • terreux {}",
        terpenes.woody, terpenes.fruity, terpenes.spicy, terpenes.earthy
    )?;

    let mut builder = Builder::default();

    builder.push_record(["Weight", "Discount", "Price", "Total", "Savings", "Pouch"]);

    for weight in PRESET_WEIGHTS {
        let quote = price_for(&product.price, weight);

        builder.push_record([
            weight.to_string(),
            quote.discount_label().to_string(),
            quote.raw_total().to_string(),
            quote.final_total().to_string(),
            quote.savings().to_string(),
            PouchSize::for_weight(weight).label().to_string(),
        ]);
    }

    write_table(out, builder, 0..5)?;

    let similar = similar_products(product, catalog, args.similar);

    if !similar.is_empty() {
        heading(out, "Vous aimerez aussi")?;

        for (_, other, score) in similar {
            let percent = (score * Decimal::ONE_HUNDRED).round_dp(0);

            writeln!(out, " {} ({}): {percent}% similar", other.name, other.id)?;
        }

        writeln!(out)?;
    }

    Ok(())
}

fn write_table(
    out: &mut impl Write,
    builder: Builder,
    numeric: Range<usize>,
) -> Result<(), CliError> {
    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(numeric), Alignment::right());

    writeln!(out, "\n{table}\n")?;

    Ok(())
}
