use std::collections::BTreeMap;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::frequency::FrequencyTable;
use crate::models::{ExperimentRecord, FamilySummary, ModelResponse};

/// Coarse provider families inferred from model identifiers
///
/// Variants are declared in classification priority order, which is also the
/// order families appear in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelFamily {
    Claude,
    Gpt,
    Gemini,
    Llama,
    Qwen,
    Other,
}

impl ModelFamily {
    /// Every family, in priority order
    pub const ALL: [ModelFamily; 6] = [
        ModelFamily::Claude,
        ModelFamily::Gpt,
        ModelFamily::Gemini,
        ModelFamily::Llama,
        ModelFamily::Qwen,
        ModelFamily::Other,
    ];

    /// Classify a model identifier by case-insensitive substring match
    ///
    /// Rules are checked in priority order and the first match wins, so an
    /// identifier mentioning several providers lands in the earliest family.
    pub fn classify(model: &str) -> ModelFamily {
        let name = model.to_lowercase();
        if name.contains("claude") {
            ModelFamily::Claude
        } else if name.contains("gpt") || name.contains("chatgpt") {
            ModelFamily::Gpt
        } else if name.contains("gemini") {
            ModelFamily::Gemini
        } else if name.contains("llama") {
            ModelFamily::Llama
        } else if name.contains("qwen") {
            ModelFamily::Qwen
        } else {
            ModelFamily::Other
        }
    }

    /// Lowercase label used in reports and serialized output
    pub fn label(&self) -> &'static str {
        match self {
            ModelFamily::Claude => "claude",
            ModelFamily::Gpt => "gpt",
            ModelFamily::Gemini => "gemini",
            ModelFamily::Llama => "llama",
            ModelFamily::Qwen => "qwen",
            ModelFamily::Other => "other",
        }
    }
}

impl fmt::Display for ModelFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A response cited by a family group, borrowed from its experiment
#[derive(Debug, Clone, Copy)]
pub struct GroupedResponse<'a> {
    /// Name of the experiment the response belongs to
    pub experiment: &'a str,
    /// The response record itself
    pub response: &'a ModelResponse,
}

/// Group every response across the given experiments by model family
///
/// Every family key is present in the result, possibly with an empty list.
/// Within a family, responses keep experiment order and then collection
/// order inside each experiment.
pub fn group_by_family<'a, I>(experiments: I) -> BTreeMap<ModelFamily, Vec<GroupedResponse<'a>>>
where
    I: IntoIterator<Item = (&'a str, &'a ExperimentRecord)>,
{
    let mut groups: BTreeMap<ModelFamily, Vec<GroupedResponse<'a>>> = ModelFamily::ALL
        .iter()
        .map(|&family| (family, Vec::new()))
        .collect();

    for (name, record) in experiments {
        for response in &record.responses {
            let family = ModelFamily::classify(&response.model);
            groups.entry(family).or_default().push(GroupedResponse {
                experiment: name,
                response,
            });
        }
    }

    groups
}

/// Build the per-family report summaries, skipping families with no responses
pub fn summarize_families(
    groups: &BTreeMap<ModelFamily, Vec<GroupedResponse<'_>>>,
) -> Vec<FamilySummary> {
    let mut summaries = Vec::new();

    for (&family, members) in groups {
        if members.is_empty() {
            continue;
        }

        let mut by_experiment: IndexMap<String, usize> = IndexMap::new();
        for member in members {
            *by_experiment.entry(member.experiment.to_string()).or_insert(0) += 1;
        }

        let values =
            FrequencyTable::from_values(members.iter().map(|m| m.response.response.as_str()));

        summaries.push(FamilySummary {
            family,
            responses: members.len(),
            unique_values: values.unique(),
            by_experiment,
        });
    }

    summaries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(prompt: &str, pairs: &[(&str, &str)]) -> ExperimentRecord {
        ExperimentRecord {
            prompt: prompt.to_string(),
            responses: pairs
                .iter()
                .map(|(model, response)| ModelResponse {
                    model: model.to_string(),
                    response: response.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_classify_known_providers() {
        assert_eq!(ModelFamily::classify("Claude-3.5-Sonnet"), ModelFamily::Claude);
        assert_eq!(ModelFamily::classify("gpt-4o-mini"), ModelFamily::Gpt);
        assert_eq!(ModelFamily::classify("ChatGPT-4"), ModelFamily::Gpt);
        assert_eq!(ModelFamily::classify("Gemini-1.5-Pro"), ModelFamily::Gemini);
        assert_eq!(ModelFamily::classify("Llama-3.1-405B"), ModelFamily::Llama);
        assert_eq!(ModelFamily::classify("Qwen-2.5-72B"), ModelFamily::Qwen);
    }

    #[test]
    fn test_classify_is_case_insensitive() {
        assert_eq!(ModelFamily::classify("CLAUDE-3-OPUS"), ModelFamily::Claude);
        assert_eq!(ModelFamily::classify("QWEN-72B"), ModelFamily::Qwen);
        assert_eq!(ModelFamily::classify("gEmInI-flash"), ModelFamily::Gemini);
    }

    #[test]
    fn test_classify_unknown_provider() {
        assert_eq!(ModelFamily::classify("Mistral-Large"), ModelFamily::Other);
        assert_eq!(ModelFamily::classify("DeepSeek-V3"), ModelFamily::Other);
        assert_eq!(ModelFamily::classify(""), ModelFamily::Other);
    }

    #[test]
    fn test_classify_first_rule_wins() {
        assert_eq!(ModelFamily::classify("claude-gpt-bridge"), ModelFamily::Claude);
        assert_eq!(ModelFamily::classify("gpt-gemini-router"), ModelFamily::Gpt);
    }

    #[test]
    fn test_family_labels() {
        assert_eq!(ModelFamily::Claude.to_string(), "claude");
        assert_eq!(ModelFamily::Other.to_string(), "other");
    }

    #[test]
    fn test_group_by_family_has_every_key() {
        let first = record("pick a color", &[("Claude-3.5-Sonnet", "blue")]);
        let groups = group_by_family(vec![("colors", &first)]);

        assert_eq!(groups.len(), ModelFamily::ALL.len());
        assert_eq!(groups[&ModelFamily::Claude].len(), 1);
        assert!(groups[&ModelFamily::Qwen].is_empty());
    }

    #[test]
    fn test_group_by_family_spans_experiments() {
        let colors = record(
            "pick a color",
            &[("Claude-3.5-Sonnet", "blue"), ("gpt-4o", "red")],
        );
        let numbers = record(
            "pick a number",
            &[("claude-3-haiku", "7"), ("Mistral-Large", "4")],
        );
        let groups = group_by_family(vec![("colors", &colors), ("numbers", &numbers)]);

        let claude = &groups[&ModelFamily::Claude];
        assert_eq!(claude.len(), 2);
        assert_eq!(claude[0].experiment, "colors");
        assert_eq!(claude[1].experiment, "numbers");
        assert_eq!(groups[&ModelFamily::Gpt].len(), 1);
        assert_eq!(groups[&ModelFamily::Other].len(), 1);
    }

    #[test]
    fn test_summaries_skip_empty_families() {
        let colors = record(
            "pick a color",
            &[
                ("Claude-3.5-Sonnet", "blue"),
                ("claude-3-haiku", "blue"),
                ("gpt-4o", "red"),
            ],
        );
        let groups = group_by_family(vec![("colors", &colors)]);
        let summaries = summarize_families(&groups);

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].family, ModelFamily::Claude);
        assert_eq!(summaries[0].responses, 2);
        assert_eq!(summaries[0].unique_values, 1);
        assert_eq!(summaries[0].by_experiment["colors"], 2);
        assert_eq!(summaries[1].family, ModelFamily::Gpt);
        assert_eq!(summaries[1].responses, 1);
        assert_eq!(summaries[1].unique_values, 1);
    }
}
