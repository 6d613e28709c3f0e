//! Catalog search and sorting

use std::cmp::Ordering;

use clap::ValueEnum;
use rust_decimal::Decimal;

use crate::{
    catalog::Catalog,
    products::{Product, ProductCategory, ProductKey},
};

/// Ordering applied to a catalog listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SortOrder {
    /// Alphabetical by name
    #[default]
    Name,

    /// Cheapest first
    PriceAsc,

    /// Most expensive first
    PriceDesc,

    /// Highest CBD content first
    Cbd,
}

/// Filters for [`Catalog::query`].
#[derive(Debug, Clone, Default)]
pub struct CatalogQuery {
    /// Restrict to one product family
    pub category: Option<ProductCategory>,

    /// Case-insensitive substring matched against name and description
    pub search: Option<String>,

    /// Result ordering
    pub sort: SortOrder,
}

impl CatalogQuery {
    fn matches(&self, product: &Product<'_>, needle: Option<&str>) -> bool {
        if self.category.is_some_and(|category| product.category != category) {
            return false;
        }

        needle.is_none_or(|needle| {
            product.name.to_lowercase().contains(needle)
                || product.description.to_lowercase().contains(needle)
        })
    }
}

impl<'a> Catalog<'a> {
    /// Products matching `query`, in the requested order.
    ///
    /// Sorting is stable, so products that compare equal keep their catalog order.
    pub fn query(&self, query: &CatalogQuery) -> Vec<(ProductKey, &Product<'a>)> {
        let needle = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|needle| !needle.is_empty())
            .map(str::to_lowercase);

        let mut products: Vec<_> = self
            .products()
            .filter(|(_, product)| query.matches(product, needle.as_deref()))
            .collect();

        products.sort_by(|(_, a), (_, b)| compare(query.sort, a, b));

        products
    }
}

fn compare(sort: SortOrder, a: &Product<'_>, b: &Product<'_>) -> Ordering {
    match sort {
        SortOrder::Name => compare_names(&a.name, &b.name),
        SortOrder::PriceAsc => a.price.to_minor_units().cmp(&b.price.to_minor_units()),
        SortOrder::PriceDesc => b.price.to_minor_units().cmp(&a.price.to_minor_units()),
        SortOrder::Cbd => cbd(b).cmp(&cbd(a)),
    }
}

/// Case-insensitive name order, falling back to the raw names so equal keys stay total.
fn compare_names(a: &str, b: &str) -> Ordering {
    let folded = |name: &str| name.chars().flat_map(char::to_lowercase).collect::<String>();

    folded(a).cmp(&folded(b)).then_with(|| a.cmp(b))
}

fn cbd(product: &Product<'_>) -> Decimal {
    product.cbd_percentage().unwrap_or_default()
}
