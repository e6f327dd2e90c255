use thiserror::Error;

/// Errors raised while analyzing a single experiment
///
/// Each variant is scoped to one experiment, so the caller can record the
/// failure and keep processing the remaining experiments.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// The experiment contains no responses, so every metric is undefined
    #[error("experiment has no responses")]
    EmptyExperiment,

    /// A zero count reached the statistics engine; counting responses can
    /// never produce one, so this signals a broken frequency table
    #[error("frequency count for '{value}' is zero")]
    ZeroCount { value: String },

    /// A requested experiment name is not present in the study
    #[error("unknown experiment: {0}")]
    UnknownExperiment(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_experiment_message() {
        let err = AnalysisError::EmptyExperiment;
        assert_eq!(err.to_string(), "experiment has no responses");
    }

    #[test]
    fn test_zero_count_message_names_value() {
        let err = AnalysisError::ZeroCount {
            value: "blue".to_string(),
        };
        assert_eq!(err.to_string(), "frequency count for 'blue' is zero");
    }

    #[test]
    fn test_unknown_experiment_message_names_experiment() {
        let err = AnalysisError::UnknownExperiment("color_selection".to_string());
        assert_eq!(err.to_string(), "unknown experiment: color_selection");
    }
}
