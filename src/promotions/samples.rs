//! Free samples
//!
//! Every full 12g of flowers earns one free 1g sample of a different flower.

use rust_decimal::prelude::ToPrimitive;
use tracing::debug;

use crate::weights::Grams;

/// Weight that earns one sample.
pub const SAMPLE_WEIGHT_STEP: Grams = Grams::whole(12);

/// Weight of a single sample.
pub const SAMPLE_WEIGHT: Grams = Grams::ONE;

/// Number of samples earned by `weight` grams of flowers: `floor(weight / 12)`.
pub fn sample_allowance(weight: Grams) -> usize {
    if !weight.is_positive() {
        return 0;
    }

    weight
        .value()
        .checked_div(SAMPLE_WEIGHT_STEP.value())
        .and_then(|steps| steps.floor().to_usize())
        .unwrap_or(usize::MAX)
}

/// Samples earned versus samples chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SampleStatus {
    allowance: usize,
    chosen: usize,
}

impl SampleStatus {
    /// Status for a cart holding `weight` grams of flowers and `chosen` samples.
    pub fn new(weight: Grams, chosen: usize) -> Self {
        SampleStatus {
            allowance: sample_allowance(weight),
            chosen,
        }
    }

    /// Samples earned.
    pub fn allowance(&self) -> usize {
        self.allowance
    }

    /// Samples chosen.
    pub fn chosen(&self) -> usize {
        self.chosen
    }

    /// Samples that may still be chosen.
    pub fn remaining(&self) -> usize {
        self.allowance.saturating_sub(self.chosen)
    }

    /// Whether another sample may be added.
    pub fn can_add(&self) -> bool {
        self.remaining() > 0
    }
}

/// Drop samples beyond `allowance`, most recently added first.
///
/// Returns the evicted samples in the order they were held.
pub fn evict_excess_samples<T>(samples: &mut Vec<T>, allowance: usize) -> Vec<T> {
    if samples.len() <= allowance {
        return Vec::new();
    }

    let evicted = samples.split_off(allowance);

    debug!(
        evicted = evicted.len(),
        allowance, "evicted samples over allowance"
    );

    evicted
}
