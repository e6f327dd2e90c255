use indexmap::IndexMap;

use crate::models::{MetricsResult, RankingEntry};

/// Rank experiments in descending order of a metric extracted by `metric`
///
/// The sort is stable, so experiments with equal values keep the iteration
/// order of the input mapping. Ranking by a different criterion means
/// passing a different selector; the ordering logic never changes.
pub fn rank_by<F>(results: &IndexMap<String, MetricsResult>, metric: F) -> Vec<RankingEntry>
where
    F: Fn(&MetricsResult) -> f64,
{
    let mut entries: Vec<RankingEntry> = results
        .iter()
        .map(|(experiment, result)| RankingEntry {
            experiment: experiment.clone(),
            value: metric(result),
        })
        .collect();

    entries.sort_by(|a, b| {
        b.value
            .partial_cmp(&a.value)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    entries
}
