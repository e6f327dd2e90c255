use indexmap::IndexMap;

/// Occurrence counts for a sequence of categorical response values
///
/// Values are compared case-sensitively and keyed in first-seen order, so
/// ties between equal counts always resolve to the value observed earliest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: IndexMap<String, usize>,
}

impl FrequencyTable {
    /// Count occurrences over an ordered sequence of values
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut counts = IndexMap::new();
        for value in values {
            *counts.entry(value.into()).or_insert(0) += 1;
        }
        Self { counts }
    }

    /// Total number of counted values
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Number of distinct values
    pub fn unique(&self) -> usize {
        self.counts.len()
    }

    /// True when nothing was counted
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// The most frequent value and its count, or None for an empty table
    ///
    /// Scans in first-seen order and replaces the leader only on a strictly
    /// greater count, so the earliest value wins ties.
    pub fn most_common(&self) -> Option<(&str, usize)> {
        let mut best: Option<(&str, usize)> = None;
        for (value, &count) in &self.counts {
            if best.map_or(true, |(_, leader)| count > leader) {
                best = Some((value.as_str(), count));
            }
        }
        best
    }

    /// Up to `n` values with the highest counts, descending
    ///
    /// The sort is stable, so values with equal counts keep first-seen order.
    pub fn top(&self, n: usize) -> Vec<(&str, usize)> {
        let mut entries: Vec<(&str, usize)> = self.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries.truncate(n);
        entries
    }

    /// Iterate `(value, count)` pairs in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(value, &count)| (value.as_str(), count))
    }
}

#[cfg(test)]
impl FrequencyTable {
    /// Build a table with explicit counts, bypassing counting
    pub(crate) fn from_counts<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, usize)>,
        S: Into<String>,
    {
        Self {
            counts: pairs.into_iter().map(|(v, c)| (v.into(), c)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_repeated_values() {
        let table = FrequencyTable::from_values(vec!["red", "blue", "red", "red", "green"]);
        assert_eq!(table.total(), 5);
        assert_eq!(table.unique(), 3);
        let counts: Vec<(&str, usize)> = table.iter().collect();
        assert_eq!(counts, vec![("red", 3), ("blue", 1), ("green", 1)]);
    }

    #[test]
    fn test_values_are_case_sensitive() {
        let table = FrequencyTable::from_values(vec!["Blue", "blue", "BLUE"]);
        assert_eq!(table.unique(), 3);
        assert_eq!(table.total(), 3);
    }

    #[test]
    fn test_keys_keep_first_seen_order() {
        let table = FrequencyTable::from_values(vec!["zebra", "apple", "zebra", "mango"]);
        let keys: Vec<&str> = table.iter().map(|(value, _)| value).collect();
        assert_eq!(keys, vec!["zebra", "apple", "mango"]);
    }

    #[test]
    fn test_most_common_prefers_first_seen_on_tie() {
        let table = FrequencyTable::from_values(vec!["blue", "red", "red", "blue"]);
        assert_eq!(table.most_common(), Some(("blue", 2)));
    }

    #[test]
    fn test_most_common_empty_table() {
        let table = FrequencyTable::from_values(Vec::<String>::new());
        assert_eq!(table.most_common(), None);
        assert!(table.is_empty());
        assert_eq!(table.total(), 0);
    }

    #[test]
    fn test_top_orders_by_count_then_first_seen() {
        let table = FrequencyTable::from_values(vec![
            "cat", "dog", "dog", "fox", "fox", "owl", "cat", "dog",
        ]);
        let top = table.top(3);
        assert_eq!(top, vec![("dog", 3), ("cat", 2), ("fox", 2)]);
    }

    #[test]
    fn test_top_handles_n_larger_than_unique() {
        let table = FrequencyTable::from_values(vec!["yes", "no"]);
        assert_eq!(table.top(10).len(), 2);
    }
}
