use crate::charts;
use crate::config::AnalysisConfig;
use crate::error::AnalysisError;
use crate::family;
use crate::frequency::FrequencyTable;
use crate::models::{
    AnalysisReport, ExperimentFailure, ExperimentRecord, ExperimentReport, MetricsResult,
    ResponseCount, StudyData,
};
use crate::ranking;
use crate::statistics;
use anyhow::{Context, Result};
use indexmap::IndexMap;
use std::path::Path;

/// Main runner that orchestrates the analysis process
pub struct Runner {
    config: AnalysisConfig,
    verbose: bool,
}

impl Runner {
    /// Create a new runner with the given configuration
    pub fn new(config: AnalysisConfig, verbose: bool) -> Self {
        Self { config, verbose }
    }

    /// Analyze every selected experiment and assemble the report
    ///
    /// A failing experiment never aborts the run; it is recorded as a
    /// failure and the remaining experiments are analyzed as usual. Chart
    /// rendering errors do abort, since they indicate an unusable output
    /// directory rather than bad study data.
    pub fn run(&self, study: &StudyData) -> Result<AnalysisReport> {
        let (selected, mut failures) = self.select_experiments(study);

        let mut metrics: IndexMap<String, MetricsResult> = IndexMap::new();
        let mut tables: Vec<(String, FrequencyTable)> = Vec::new();
        let total = selected.len();

        for (index, (name, record)) in selected.iter().enumerate() {
            self.log_analysis(index + 1, total, name);

            let table =
                FrequencyTable::from_values(record.responses.iter().map(|r| r.response.as_str()));
            match statistics::compute_metrics(&table) {
                Ok(result) => {
                    metrics.insert((*name).to_string(), result);
                    tables.push(((*name).to_string(), table));
                }
                Err(err) => {
                    self.log_failure(name, &err);
                    failures.push(ExperimentFailure {
                        experiment: (*name).to_string(),
                        reason: err.to_string(),
                    });
                }
            }
        }

        let convergence_ranking = ranking::rank_by(&metrics, |m| m.convergence_rate);
        let diversity_ranking = ranking::rank_by(&metrics, |m| m.diversity_index);

        let groups = family::group_by_family(selected.iter().copied());
        let families = family::summarize_families(&groups);

        self.render_charts_if_configured(&metrics, &tables)?;

        let experiments = self.build_experiment_reports(study, &metrics, &tables);

        Ok(AnalysisReport {
            study_title: study.study_metadata.title.clone(),
            experiments,
            failures,
            convergence_ranking,
            diversity_ranking,
            families,
        })
    }

    /// Resolve the configured experiment filter against the study
    ///
    /// Without a filter, every experiment is selected in declaration order.
    /// With one, experiments follow the filter's order and unknown names are
    /// recorded as failures.
    fn select_experiments<'a>(
        &'a self,
        study: &'a StudyData,
    ) -> (Vec<(&'a str, &'a ExperimentRecord)>, Vec<ExperimentFailure>) {
        let mut failures = Vec::new();

        let selected = match &self.config.experiments {
            Some(names) => {
                let mut picked = Vec::new();
                for name in names {
                    match study.experiment(name) {
                        Ok(record) => picked.push((name.as_str(), record)),
                        Err(err) => {
                            self.log_failure(name, &err);
                            failures.push(ExperimentFailure {
                                experiment: name.clone(),
                                reason: err.to_string(),
                            });
                        }
                    }
                }
                picked
            }
            None => study
                .experiments
                .iter()
                .map(|(name, record)| (name.as_str(), record))
                .collect(),
        };

        (selected, failures)
    }

    /// Render charts if an output directory is configured
    fn render_charts_if_configured(
        &self,
        metrics: &IndexMap<String, MetricsResult>,
        tables: &[(String, FrequencyTable)],
    ) -> Result<()> {
        if let Some(plots_dir) = &self.config.plots_dir {
            let dir = Path::new(plots_dir);
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create plots directory: {}", dir.display()))?;

            let convergence_path = dir.join("convergence_analysis.png");
            self.log_chart_rendering(&convergence_path);
            charts::render_convergence_chart(metrics, &convergence_path).map_err(|e| {
                anyhow::anyhow!("Failed to render chart {}: {}", convergence_path.display(), e)
            })?;

            let distribution_path = dir.join("response_distributions.png");
            self.log_chart_rendering(&distribution_path);
            charts::render_distribution_chart(tables, &distribution_path).map_err(|e| {
                anyhow::anyhow!("Failed to render chart {}: {}", distribution_path.display(), e)
            })?;
        }
        Ok(())
    }

    /// Assemble the per-experiment report entries
    fn build_experiment_reports(
        &self,
        study: &StudyData,
        metrics: &IndexMap<String, MetricsResult>,
        tables: &[(String, FrequencyTable)],
    ) -> IndexMap<String, ExperimentReport> {
        let mut experiments = IndexMap::new();

        for (name, table) in tables {
            let result = match metrics.get(name) {
                Some(result) => result.clone(),
                None => continue,
            };
            let prompt = study
                .experiment(name)
                .map(|record| record.prompt.clone())
                .unwrap_or_default();
            let top_responses = table
                .top(self.config.top_responses)
                .into_iter()
                .map(|(value, count)| ResponseCount {
                    value: value.to_string(),
                    count,
                })
                .collect();

            experiments.insert(
                name.clone(),
                ExperimentReport {
                    prompt,
                    metrics: result,
                    top_responses,
                },
            );
        }

        experiments
    }

    /// Log experiment analysis progress if verbose mode is enabled
    fn log_analysis(&self, num: usize, total: usize, name: &str) {
        if self.verbose {
            println!("Analyzing experiment {}/{}: {}", num, total, name);
        }
    }

    /// Log a skipped experiment if verbose mode is enabled
    fn log_failure(&self, name: &str, err: &AnalysisError) {
        if self.verbose {
            println!("  → Skipping {}: {}", name, err);
        }
    }

    /// Log chart rendering if verbose mode is enabled
    fn log_chart_rendering(&self, path: &Path) {
        if self.verbose {
            println!("Rendering chart: {}", path.display());
        }
    }
}
