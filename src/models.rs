use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::family::ModelFamily;

/// Header block of a study data file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyMetadata {
    /// Human-readable study title
    pub title: String,
    /// Declared number of experiments; informational only
    #[serde(default)]
    pub total_experiments: Option<usize>,
    /// Date the study was conducted
    #[serde(default)]
    pub date_conducted: Option<String>,
}

/// A single model's answer to an experiment prompt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelResponse {
    /// Model identifier as recorded in the study (e.g. "Claude-3.5-Sonnet")
    pub model: String,
    /// The categorical response value, compared case-sensitively
    pub response: String,
}

/// One experiment: a prompt and the responses it collected
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentRecord {
    /// Prompt shared by every response in this experiment
    pub prompt: String,
    /// Responses in collection order, one per model
    pub responses: Vec<ModelResponse>,
}

/// Parsed study data file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyData {
    /// Study header
    pub study_metadata: StudyMetadata,
    /// Experiments keyed by name, in declaration order
    pub experiments: IndexMap<String, ExperimentRecord>,
}

impl StudyData {
    /// Look up an experiment by name
    pub fn experiment(&self, name: &str) -> Result<&ExperimentRecord, AnalysisError> {
        self.experiments
            .get(name)
            .ok_or_else(|| AnalysisError::UnknownExperiment(name.to_string()))
    }
}

/// Convergence and diversity metrics for a single experiment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsResult {
    /// Number of responses, one per model
    pub total_models: usize,
    /// Number of distinct response values
    pub unique_responses: usize,
    /// The most frequent response; the value seen first wins ties
    pub most_common_response: String,
    /// Occurrence count of the most frequent response
    pub most_common_count: usize,
    /// Percentage of responses matching the most frequent one
    pub convergence_rate: f64,
    /// Percentage of responses that are distinct values
    pub diversity_index: f64,
    /// Inequality of the count distribution; 0.0 means perfectly even
    pub gini_coefficient: f64,
    /// Shannon entropy of the response distribution, in bits
    pub entropy: f64,
    /// Entropy divided by its maximum for the observed number of distinct
    /// values; 0.0 when only one value was observed
    pub normalized_entropy: f64,
}

/// A response value and how many models produced it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseCount {
    /// The response value
    pub value: String,
    /// Number of models that produced it
    pub count: usize,
}

/// Everything the report carries for one successfully analyzed experiment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentReport {
    /// Prompt the experiment posed
    pub prompt: String,
    /// Computed convergence and diversity metrics
    pub metrics: MetricsResult,
    /// Leading response values, highest count first
    pub top_responses: Vec<ResponseCount>,
}

/// One row of a cross-experiment ranking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingEntry {
    /// Experiment name
    pub experiment: String,
    /// Value of the ranked metric
    pub value: f64,
}

/// An experiment whose analysis failed; the run continues without it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentFailure {
    /// Experiment name
    pub experiment: String,
    /// Human-readable failure reason
    pub reason: String,
}

/// Response totals for one model family
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FamilySummary {
    /// Model family label
    pub family: ModelFamily,
    /// Total responses attributed to this family
    pub responses: usize,
    /// Number of distinct response values across the family's responses
    pub unique_values: usize,
    /// Response counts per experiment, in experiment order
    pub by_experiment: IndexMap<String, usize>,
}

/// Complete results of one analysis run
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Study title from the data file
    pub study_title: String,
    /// Per-experiment results keyed by name, in analysis order
    pub experiments: IndexMap<String, ExperimentReport>,
    /// Experiments that could not be analyzed
    pub failures: Vec<ExperimentFailure>,
    /// Experiments ranked by convergence rate, descending
    pub convergence_ranking: Vec<RankingEntry>,
    /// Experiments ranked by diversity index, descending
    pub diversity_ranking: Vec<RankingEntry>,
    /// Response totals grouped by model family
    pub families: Vec<FamilySummary>,
}
