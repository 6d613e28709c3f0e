//! Weights

use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Sub},
    str::FromStr,
};

use rust_decimal::{Decimal, prelude::FromPrimitive};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while parsing a weight from text.
#[derive(Debug, Error)]
pub enum GramsParseError {
    /// The numeric part was not a valid decimal.
    #[error("invalid weight {0:?}: {1}")]
    Decimal(String, rust_decimal::Error),
}

/// A weight in grams.
///
/// Backed by an exact decimal so that tier breakpoints such as `9.99` and `10`
/// compare exactly.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Grams(Decimal);

impl Grams {
    /// Zero grams.
    pub const ZERO: Grams = Grams(Decimal::ZERO);

    /// One gram, the fixed weight of a sample.
    pub const ONE: Grams = Grams(Decimal::ONE);

    /// Create a weight from a decimal number of grams.
    pub const fn new(value: Decimal) -> Self {
        Grams(value)
    }

    /// Create a weight from a whole number of grams.
    pub const fn whole(value: i32) -> Self {
        Grams(Decimal::from_parts(value.unsigned_abs(), 0, 0, value < 0, 0))
    }

    /// Create a weight from a float.
    ///
    /// `NaN` and infinities have no decimal representation and become zero grams,
    /// which every pricing function treats as "nothing to price".
    pub fn from_f64(value: f64) -> Self {
        Decimal::from_f64(value).map_or(Grams::ZERO, Grams)
    }

    /// The weight as a decimal.
    pub const fn value(self) -> Decimal {
        self.0
    }

    /// Whether the weight is strictly greater than zero.
    pub fn is_positive(self) -> bool {
        self.0 > Decimal::ZERO
    }
}

impl From<Decimal> for Grams {
    fn from(value: Decimal) -> Self {
        Grams(value)
    }
}

impl From<u32> for Grams {
    fn from(value: u32) -> Self {
        Grams(Decimal::from(value))
    }
}

impl Add for Grams {
    type Output = Grams;

    fn add(self, rhs: Grams) -> Self::Output {
        Grams(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Grams {
    fn add_assign(&mut self, rhs: Grams) {
        *self = *self + rhs;
    }
}

impl Sub for Grams {
    type Output = Grams;

    fn sub(self, rhs: Grams) -> Self::Output {
        Grams(self.0.saturating_sub(rhs.0))
    }
}

impl Sum for Grams {
    fn sum<I: Iterator<Item = Grams>>(iter: I) -> Self {
        iter.fold(Grams::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Grams> for Grams {
    fn sum<I: Iterator<Item = &'a Grams>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl FromStr for Grams {
    type Err = GramsParseError;

    /// Parses `"25"`, `"2.5"` or `"2.5g"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let number = trimmed.strip_suffix('g').unwrap_or(trimmed).trim_end();

        number
            .parse::<Decimal>()
            .map(Grams)
            .map_err(|err| GramsParseError::Decimal(s.to_string(), err))
    }
}

impl fmt::Display for Grams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}g", self.0.normalize())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn whole_matches_decimal_construction() {
        assert_eq!(Grams::whole(25), Grams::new(Decimal::from(25)));
        assert_eq!(Grams::whole(-5), Grams::new(Decimal::from(-5)));
        assert_eq!(Grams::whole(0), Grams::ZERO);
        assert_eq!(Grams::whole(i32::MAX), Grams::new(Decimal::from(i32::MAX)));
        assert_eq!(Grams::whole(i32::MIN), Grams::new(Decimal::from(i32::MIN)));
    }

    #[test]
    fn whole_negative_weights_are_not_positive() {
        const NEGATIVE: Grams = Grams::whole(-5);

        assert!(!NEGATIVE.is_positive());
        assert!(NEGATIVE < Grams::ZERO);
        assert_eq!(NEGATIVE.to_string(), "-5g");
    }

    #[test]
    fn from_f64_maps_non_finite_to_zero() {
        assert_eq!(Grams::from_f64(f64::NAN), Grams::ZERO);
        assert_eq!(Grams::from_f64(f64::INFINITY), Grams::ZERO);
        assert_eq!(Grams::from_f64(2.5), Grams::new(Decimal::new(25, 1)));
    }

    #[test]
    fn parses_with_and_without_unit() -> TestResult {
        assert_eq!("2.5".parse::<Grams>()?, Grams::new(Decimal::new(25, 1)));
        assert_eq!(" 10g ".parse::<Grams>()?, Grams::whole(10));
        assert!("ten".parse::<Grams>().is_err());

        Ok(())
    }

    #[test]
    fn displays_normalized_grams() {
        assert_eq!(Grams::new(Decimal::new(2500, 3)).to_string(), "2.5g");
        assert_eq!(Grams::whole(100).to_string(), "100g");
    }

    #[test]
    fn sums_and_subtracts() {
        let total: Grams = [Grams::whole(5), Grams::whole(3)].iter().sum();

        assert_eq!(total, Grams::whole(8));
        assert_eq!(total - Grams::whole(10), Grams::whole(-2));
        assert!(!Grams::ZERO.is_positive());
        assert!(Grams::ONE.is_positive());
    }
}
