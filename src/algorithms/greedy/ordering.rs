//! Candidate comparison for satellite selection.

use std::cmp::Ordering;

use super::candidate::Candidate;

/// Compares candidates by satellite name for deterministic tie-breaking.
pub fn compare_by_name(a: &Candidate<'_>, b: &Candidate<'_>) -> Ordering {
    a.name().cmp(b.name())
}

/// Main comparison function for sorting candidates: longest run first, then
/// ascending name.
pub fn compare_candidates(a: &Candidate<'_>, b: &Candidate<'_>) -> Ordering {
    b.run_length()
        .cmp(&a.run_length())
        .then_with(|| compare_by_name(a, b))
}
