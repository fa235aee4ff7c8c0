use serde::Serialize;
use tracing::warn;

use crate::core::Genome;

/// A position where two genomes carry different symbols
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Difference {
    pub position: usize,
    pub left: char,
    pub right: char,
}

/// List every position where `left` and `right` differ, in ascending order.
///
/// Genomes of different length are compared over their common prefix only.
pub fn compare(left: &Genome, right: &Genome) -> Vec<Difference> {
    if left.len() != right.len() {
        warn!(
            "Comparing genomes of different length ({} and {}); only the first {} positions are compared",
            left.len(),
            right.len(),
            left.len().min(right.len())
        );
    }

    left.positions()
        .iter()
        .zip(left.bases().iter().zip(right.bases()))
        .filter(|(_, (l, r))| l != r)
        .map(|(&position, (&l, &r))| Difference {
            position,
            left: char::from(l),
            right: char::from(r),
        })
        .collect()
}
