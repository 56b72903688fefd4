use std::cmp::Ordering;

use super::types::{Coefficient, CoefficientReport};

/// Number of drivers shown on the insights chart
pub const DEFAULT_TOP_N: usize = 10;

/// Rank named weights for display.
///
/// Zero weights were eliminated by the L1 penalty and are dropped. The sort
/// is stable, so equal magnitudes keep their concatenation order.
pub fn rank_coefficients<'a, N, W>(names: N, weights: W, top_n: usize) -> CoefficientReport
where
    N: IntoIterator<Item = &'a str>,
    W: IntoIterator<Item = f64>,
{
    let mut entries: Vec<Coefficient> = names
        .into_iter()
        .zip(weights)
        .filter(|(_, weight)| *weight != 0.0)
        .map(|(name, weight)| Coefficient {
            feature: name.to_string(),
            weight,
        })
        .collect();

    entries.sort_by(|a, b| {
        b.weight
            .abs()
            .partial_cmp(&a.weight.abs())
            .unwrap_or(Ordering::Equal)
    });
    entries.truncate(top_n);

    CoefficientReport { entries }
}
