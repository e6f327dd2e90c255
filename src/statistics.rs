use crate::error::AnalysisError;
use crate::frequency::FrequencyTable;
use crate::models::MetricsResult;

/// Compute the full set of convergence and diversity metrics for one
/// experiment's frequency table
///
/// The sample size is the table's own total, so the caller cannot hand in a
/// count that disagrees with the distribution. An empty table is rejected
/// before any division happens.
pub fn compute_metrics(table: &FrequencyTable) -> Result<MetricsResult, AnalysisError> {
    let total_models = table.total();
    if total_models == 0 {
        return Err(AnalysisError::EmptyExperiment);
    }

    if let Some((value, _)) = table.iter().find(|&(_, count)| count == 0) {
        return Err(AnalysisError::ZeroCount {
            value: value.to_string(),
        });
    }

    let unique_responses = table.unique();
    let (most_common_response, most_common_count) = table
        .most_common()
        .ok_or(AnalysisError::EmptyExperiment)?;

    let counts: Vec<usize> = table.iter().map(|(_, count)| count).collect();
    let entropy = shannon_entropy(&counts, total_models);
    let normalized_entropy = if unique_responses > 1 {
        entropy / (unique_responses as f64).log2()
    } else {
        0.0
    };

    Ok(MetricsResult {
        total_models,
        unique_responses,
        most_common_response: most_common_response.to_string(),
        most_common_count,
        convergence_rate: 100.0 * most_common_count as f64 / total_models as f64,
        diversity_index: 100.0 * unique_responses as f64 / total_models as f64,
        gini_coefficient: gini_coefficient(&counts),
        entropy,
        normalized_entropy,
    })
}

/// Gini coefficient of a count distribution
///
/// Counts are sorted ascending and weighted by their 1-based rank:
/// 2 * sum(i * c_i) / (n * sum(c_i)) - (n + 1) / n. Equal counts give 0.0
/// and the value grows as a single count dominates. The subtraction can
/// drift a hair below zero, so the result is clamped at 0.0.
pub fn gini_coefficient(counts: &[usize]) -> f64 {
    if counts.len() <= 1 {
        return 0.0;
    }

    let mut sorted = counts.to_vec();
    sorted.sort_unstable();

    let n = sorted.len() as f64;
    let sum: f64 = sorted.iter().map(|&c| c as f64).sum();
    if sum == 0.0 {
        return 0.0;
    }

    let weighted: f64 = sorted
        .iter()
        .enumerate()
        .map(|(i, &c)| (i as f64 + 1.0) * c as f64)
        .sum();

    ((2.0 * weighted) / (n * sum) - (n + 1.0) / n).max(0.0)
}

/// Shannon entropy, in bits, of counts drawn from `total` samples
///
/// A distribution with a single value has zero entropy by definition; the
/// early return keeps the sign positive instead of computing -1 * log2(1).
pub fn shannon_entropy(counts: &[usize], total: usize) -> f64 {
    if total == 0 || counts.len() <= 1 {
        return 0.0;
    }

    counts
        .iter()
        .filter(|&&count| count > 0)
        .map(|&count| {
            let p = count as f64 / total as f64;
            -p * p.log2()
        })
        .sum()
}
