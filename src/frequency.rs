//! Symbol frequency analysis.
//!
//! A [`FrequencyTable`] remembers the order in which symbols were first seen.
//! The tree builder seeds its queue in that order, so equal-weight symbols are
//! always merged the same way for the same input.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

/// Occurrence counts of the distinct symbols of a sequence.
#[derive(Debug, Clone)]
pub struct FrequencyTable<S> {
    entries: Vec<(S, u64)>,
    index: HashMap<S, usize>,
}

impl<S: PartialEq> PartialEq for FrequencyTable<S> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<S: Eq> Eq for FrequencyTable<S> {}

impl<S: Eq + Hash + Clone> FrequencyTable<S> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Count every symbol of `sequence`.
    pub fn analyze<I>(sequence: I) -> Self
    where
        I: IntoIterator,
        I::Item: Borrow<S>,
    {
        let mut table = Self::new();
        for symbol in sequence {
            table.count(symbol.borrow().clone());
        }
        table
    }

    /// Add one occurrence of `symbol`.
    pub fn count(&mut self, symbol: S) {
        self.add(symbol, 1);
    }

    fn add(&mut self, symbol: S, weight: u64) {
        match self.index.get(&symbol) {
            Some(&i) => {
                let count = &mut self.entries[i].1;
                *count = count.saturating_add(weight);
            }
            None => {
                self.index.insert(symbol.clone(), self.entries.len());
                self.entries.push((symbol, weight));
            }
        }
    }

    /// Number of occurrences of `symbol`, if it was seen at all.
    pub fn get(&self, symbol: &S) -> Option<u64> {
        self.index.get(symbol).map(|&i| self.entries[i].1)
    }
}

impl<S> FrequencyTable<S> {
    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no symbol has been counted.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts, i.e. the length of the analyzed sequence.
    ///
    /// Saturates at `u64::MAX` for pre-counted tables that exceed it.
    pub fn total(&self) -> u64 {
        self.entries
            .iter()
            .fold(0u64, |sum, &(_, w)| sum.saturating_add(w))
    }

    /// Iterate over `(symbol, count)` pairs in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = (&S, u64)> + '_ {
        self.entries.iter().map(|(s, w)| (s, *w))
    }

    /// Shannon entropy of the distribution, in bits per symbol.
    ///
    /// This is the lower bound for [`crate::CodeTable::average_len`].
    pub fn entropy(&self) -> f64 {
        let total = self.total() as f64;
        if total == 0.0 {
            return 0.0;
        }
        -self
            .entries
            .iter()
            .map(|&(_, w)| {
                let p = w as f64 / total;
                p * p.log2()
            })
            .sum::<f64>()
    }
}

impl<S: Eq + Hash + Clone> Default for FrequencyTable<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds a table from pre-computed counts. Zero counts are skipped and
/// repeated symbols are summed, saturating at `u64::MAX`.
impl<S: Eq + Hash + Clone> FromIterator<(S, u64)> for FrequencyTable<S> {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (symbol, weight) in iter {
            if weight > 0 {
                table.add(symbol, weight);
            }
        }
        table
    }
}

/// Count the symbols of `sequence`.
pub fn analyze<S: Eq + Hash + Clone>(sequence: &[S]) -> FrequencyTable<S> {
    FrequencyTable::analyze(sequence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_analyze_counts_in_first_seen_order() {
        let table = analyze(b"abracadabra");
        let pairs: Vec<(u8, u64)> = table.iter().map(|(&s, w)| (s, w)).collect();
        assert_eq!(
            pairs,
            vec![(b'a', 5), (b'b', 2), (b'r', 2), (b'c', 1), (b'd', 1)]
        );
        assert_eq!(table.total(), 11);
        assert_eq!(table.get(&b'z'), None);
    }

    #[test]
    fn test_analyze_empty() {
        let table = analyze::<char>(&[]);
        assert!(table.is_empty());
        assert_eq!(table.total(), 0);
        assert_eq!(table.entropy(), 0.0);
    }

    #[test]
    fn test_from_counts_skips_zero_and_merges() {
        let table: FrequencyTable<u8> = [(1, 3), (2, 0), (1, 2), (7, 1)].into_iter().collect();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(&1), Some(5));
        assert_eq!(table.get(&2), None);
    }

    #[test]
    fn test_from_counts_saturates() {
        let table: FrequencyTable<u8> = [(1, u64::MAX), (1, 5), (2, 1)].into_iter().collect();
        assert_eq!(table.get(&1), Some(u64::MAX));
        assert_eq!(table.total(), u64::MAX);
    }

    #[test]
    fn test_entropy_uniform() {
        let table = analyze(&['a', 'b', 'c', 'd']);
        assert!((table.entropy() - 2.0).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn prop_counts_sum_to_length(data in prop::collection::vec(any::<u8>(), 0..500)) {
            let table = analyze(&data);
            prop_assert_eq!(table.total(), data.len() as u64);
            for (s, w) in table.iter() {
                prop_assert!(w > 0);
                prop_assert_eq!(w, data.iter().filter(|&b| b == s).count() as u64);
            }
        }
    }
}
