use anyhow::{Context, Result};
use std::path::Path;

use crate::models::StudyData;

/// Load and validate a study data file
///
/// Unknown JSON fields are ignored, which covers files carrying precomputed
/// analysis blocks from earlier pipelines; every statistic is recomputed
/// from the raw responses. A file with no experiments at all is rejected
/// here, while an experiment with an empty response list loads fine and
/// fails later during its own analysis.
pub fn load_study(path: &Path) -> Result<StudyData> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read study file: {}", path.display()))?;

    let study: StudyData = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse study JSON: {}", path.display()))?;

    if study.experiments.is_empty() {
        anyhow::bail!("Study file contains no experiments: {}", path.display());
    }

    Ok(study)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const STUDY_JSON: &str = r#"
{
  "study_metadata": {
    "title": "AI Model Convergence Study",
    "total_experiments": 2,
    "date_conducted": "2025-01-15"
  },
  "experiments": {
    "color_selection": {
      "prompt": "Pick a color",
      "total_models": 3,
      "responses": [
        {"model": "Claude-3.5-Sonnet", "response": "blue"},
        {"model": "gpt-4o", "response": "blue"},
        {"model": "Gemini-1.5-Pro", "response": "red"}
      ],
      "analysis": {"convergence_rate": 66.7}
    },
    "number_selection": {
      "prompt": "Pick a number",
      "responses": [
        {"model": "Claude-3.5-Sonnet", "response": "7"}
      ]
    }
  },
  "comparative_analysis": {"note": "stale precomputed block"}
}
"#;

    #[test]
    fn test_load_study_parses_experiments_in_order() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", STUDY_JSON).unwrap();

        let study = load_study(temp_file.path()).unwrap();
        assert_eq!(study.study_metadata.title, "AI Model Convergence Study");
        assert_eq!(study.study_metadata.total_experiments, Some(2));
        assert_eq!(study.experiments.len(), 2);

        let names: Vec<&String> = study.experiments.keys().collect();
        assert_eq!(names, vec!["color_selection", "number_selection"]);

        let colors = &study.experiments["color_selection"];
        assert_eq!(colors.prompt, "Pick a color");
        assert_eq!(colors.responses.len(), 3);
        assert_eq!(colors.responses[0].model, "Claude-3.5-Sonnet");
        assert_eq!(colors.responses[0].response, "blue");
    }

    #[test]
    fn test_load_study_allows_missing_optional_metadata() {
        let json = r#"
{
  "study_metadata": {"title": "Minimal"},
  "experiments": {
    "only": {"prompt": "p", "responses": []}
  }
}
"#;
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", json).unwrap();

        let study = load_study(temp_file.path()).unwrap();
        assert_eq!(study.study_metadata.total_experiments, None);
        assert_eq!(study.study_metadata.date_conducted, None);
        assert!(study.experiments["only"].responses.is_empty());
    }

    #[test]
    fn test_load_study_missing_file() {
        let result = load_study(Path::new("/nonexistent/study.json"));
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Failed to read study file"));
    }

    #[test]
    fn test_load_study_malformed_json() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{{ not valid json").unwrap();

        let err = load_study(temp_file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse study JSON"));
    }

    #[test]
    fn test_load_study_rejects_empty_experiments() {
        let json = r#"{"study_metadata": {"title": "Empty"}, "experiments": {}}"#;
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", json).unwrap();

        let err = load_study(temp_file.path()).unwrap_err();
        assert!(err.to_string().contains("contains no experiments"));
    }
}
