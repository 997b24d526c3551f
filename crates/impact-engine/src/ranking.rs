//! Ordering of country results.

use std::cmp::Ordering;

use crate::result::CountryResult;

/// Sort key: NaN ranks below every number.
#[inline]
fn rank_key(change: f64) -> f64 {
    if change.is_nan() {
        f64::NEG_INFINITY
    } else {
        change
    }
}

/// Largest change first, at most `top_n` results.
///
/// NaN changes come after every number, `-inf` included. Equal changes are
/// ordered by country name so the output does not depend on the order the
/// reducer produced them in.
pub fn rank(mut results: Vec<CountryResult>, top_n: usize) -> Vec<CountryResult> {
    results.sort_by(|a, b| {
        rank_key(b.change)
            .partial_cmp(&rank_key(a.change))
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.change.is_nan().cmp(&b.change.is_nan()))
            .then_with(|| a.country.cmp(&b.country))
    });
    results.truncate(top_n);
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(results: &[CountryResult]) -> Vec<&str> {
        results.iter().map(|r| r.country.as_str()).collect()
    }

    #[test]
    fn test_descending_and_truncated() {
        let results = vec![
            CountryResult::new("A", 0.5),
            CountryResult::new("B", 2.0),
            CountryResult::new("C", -1.0),
            CountryResult::new("D", 1.0),
        ];
        let ranked = rank(results, 3);
        assert_eq!(names(&ranked), vec!["B", "D", "A"]);
    }

    #[test]
    fn test_nan_sorts_last() {
        let results = vec![
            CountryResult::new("Missing", f64::NAN),
            CountryResult::new("Cold", -1e300),
            CountryResult::new("Warm", 3.0),
            CountryResult::new("Coldest", f64::NEG_INFINITY),
        ];
        let ranked = rank(results, 10);
        assert_eq!(ranked.last().unwrap().country, "Missing");
        assert_eq!(&names(&ranked)[..2], &["Warm", "Cold"]);
    }

    #[test]
    fn test_nan_after_negative_infinity_regardless_of_name() {
        let results = vec![
            CountryResult::new("Zzz", f64::NEG_INFINITY),
            CountryResult::new("Aaa", f64::NAN),
            CountryResult::new("Mid", 1.0),
        ];
        assert_eq!(names(&rank(results, 3)), vec!["Mid", "Zzz", "Aaa"]);
    }

    #[test]
    fn test_nan_results_ordered_by_name() {
        let results = vec![
            CountryResult::new("Nod", f64::NAN),
            CountryResult::new("Bad", f64::NAN),
            CountryResult::new("Low", f64::NEG_INFINITY),
        ];
        assert_eq!(names(&rank(results, 3)), vec!["Low", "Bad", "Nod"]);
    }

    #[test]
    fn test_ties_broken_by_name() {
        let results = vec![
            CountryResult::new("Zambia", 1.0),
            CountryResult::new("Angola", 1.0),
            CountryResult::new("Mali", 1.0),
        ];
        assert_eq!(names(&rank(results, 3)), vec!["Angola", "Mali", "Zambia"]);
    }

    #[test]
    fn test_top_n_larger_than_input() {
        let results = vec![CountryResult::new("A", 1.0)];
        assert_eq!(rank(results, 5).len(), 1);
        assert!(rank(Vec::new(), 5).is_empty());
    }

    #[test]
    fn test_top_n_zero() {
        assert!(rank(vec![CountryResult::new("A", 1.0)], 0).is_empty());
    }
}
