//! Terpene similarity
//!
//! Scores how close two aromatic profiles are and ranks the catalog against a
//! product. Used for the "you may also like" strip on a product page.

use rust_decimal::Decimal;

use crate::{
    catalog::Catalog,
    products::{Product, ProductKey, TerpeneProfile},
};

/// Number of similar products shown by default.
pub const DEFAULT_SIMILAR_COUNT: usize = 4;

impl TerpeneProfile {
    /// Similarity in `[0, 1]`: one minus the mean absolute difference of the four
    /// intensities, scaled to the 0 to 100 range.
    pub fn similarity(&self, other: &TerpeneProfile) -> Decimal {
        let closeness: u32 = self
            .intensities()
            .into_iter()
            .zip(other.intensities())
            .map(|(a, b)| u32::from(Self::MAX_INTENSITY.saturating_sub(a.abs_diff(b))))
            .sum();

        Decimal::from(closeness) / Decimal::from(4 * u32::from(Self::MAX_INTENSITY))
    }
}

/// The `count` products most similar to `target`, best first.
///
/// The target itself is excluded by id. Ties keep catalog order.
pub fn similar_products<'c, 'a>(
    target: &Product<'_>,
    catalog: &'c Catalog<'a>,
    count: usize,
) -> Vec<(ProductKey, &'c Product<'a>, Decimal)> {
    let mut scored: Vec<_> = catalog
        .products()
        .filter(|(_, product)| product.id != target.id)
        .map(|(key, product)| (key, product, target.terpenes.similarity(&product.terpenes)))
        .collect();

    scored.sort_by(|(_, _, a), (_, _, b)| b.cmp(a));
    scored.truncate(count);

    scored
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn profile(woody: u8, fruity: u8, spicy: u8, earthy: u8) -> TerpeneProfile {
        TerpeneProfile {
            woody,
            fruity,
            spicy,
            earthy,
        }
    }

    #[test]
    fn identical_profiles_are_fully_similar() {
        let a = profile(90, 45, 35, 80);

        assert_eq!(a.similarity(&a), Decimal::ONE);
    }

    #[test]
    fn opposite_profiles_are_not_similar() {
        let a = profile(0, 0, 0, 0);
        let b = profile(100, 100, 100, 100);

        assert_eq!(a.similarity(&b), Decimal::ZERO);
    }

    #[test]
    fn similarity_is_symmetric_mean_closeness() {
        let a = profile(90, 45, 35, 80);
        let b = profile(40, 85, 50, 60);

        // (50 + 60 + 85 + 80) / 400
        assert_eq!(a.similarity(&b), Decimal::new(6875, 4));
        assert_eq!(a.similarity(&b), b.similarity(&a));
    }

    #[test]
    fn similar_products_excludes_target_and_ranks_descending() -> TestResult {
        let catalog = Catalog::builtin()?;
        let (_, og_kush) = catalog.product_by_id("og-kush").ok_or("og-kush missing")?;

        let similar = similar_products(og_kush, &catalog, DEFAULT_SIMILAR_COUNT);

        assert_eq!(DEFAULT_SIMILAR_COUNT, 4);
        assert_eq!(similar.len(), 4);
        assert!(similar.iter().all(|(_, p, _)| p.id != "og-kush"));
        assert!(similar.windows(2).all(|pair| match pair {
            [(_, _, a), (_, _, b)] => a >= b,
            _ => true,
        }));

        Ok(())
    }

    #[test]
    fn similar_products_caps_at_catalog_size() -> TestResult {
        let catalog = Catalog::builtin()?;
        let (_, og_kush) = catalog.product_by_id("og-kush").ok_or("og-kush missing")?;

        assert_eq!(similar_products(og_kush, &catalog, 100).len(), 29);
        assert!(similar_products(og_kush, &catalog, 0).is_empty());

        Ok(())
    }
}
