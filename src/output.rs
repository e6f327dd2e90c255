use crate::models::AnalysisReport;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Output format options
#[derive(Debug, Clone, ValueEnum, Serialize, Deserialize)]
pub enum OutputFormat {
    Plain,
    Json,
}

/// Print the analysis report in the specified format
pub fn print_report(report: &AnalysisReport, format: OutputFormat) {
    match format {
        OutputFormat::Plain => print_plain(report),
        OutputFormat::Json => print_json(report),
    }
}

/// Print the report in plain text format
fn print_plain(report: &AnalysisReport) {
    println!("{}", "=".repeat(80));
    println!("AI MODEL CONVERGENCE ANALYSIS");
    println!("Study: {}", report.study_title);
    println!("{}", "=".repeat(80));
    println!();

    // Print the cross-experiment metrics table
    println!("📊 STATISTICAL METRICS");
    println!("{}", "-".repeat(80));
    print_metrics_table(report);
    println!();

    // Print per-experiment details
    println!("📝 EXPERIMENT DETAILS");
    println!("{}", "-".repeat(80));
    print_experiment_details(report);

    // Print family breakdown
    println!("🤖 MODEL FAMILIES");
    println!("{}", "-".repeat(80));
    print_families(report);
    println!();

    // Print rankings
    println!("🏆 RANKINGS");
    println!("{}", "-".repeat(80));
    print_rankings(report);

    if !report.failures.is_empty() {
        println!();
        println!("⚠ FAILED EXPERIMENTS");
        println!("{}", "-".repeat(80));
        for failure in &report.failures {
            println!("{}: {}", failure.experiment, failure.reason);
        }
    }
}

/// Print one metrics row per experiment
fn print_metrics_table(report: &AnalysisReport) {
    if report.experiments.is_empty() {
        println!("No experiments analyzed.");
        return;
    }

    println!(
        "{:<28} {:<8} {:<8} {:<9} {:<9} {:<8} {:<8}",
        "Experiment", "Models", "Unique", "Conv %", "Div %", "Gini", "NormEnt"
    );

    for (name, experiment) in &report.experiments {
        let m = &experiment.metrics;
        println!(
            "{:<28} {:<8} {:<8} {:<9.1} {:<9.1} {:<8.3} {:<8.3}",
            name,
            m.total_models,
            m.unique_responses,
            m.convergence_rate,
            m.diversity_index,
            m.gini_coefficient,
            m.normalized_entropy
        );
    }
}

/// Print prompt and leading responses for each experiment
fn print_experiment_details(report: &AnalysisReport) {
    for (name, experiment) in &report.experiments {
        println!("{}", display_name(name).to_uppercase());
        println!("Prompt: {}", experiment.prompt);
        println!("Total models: {}", experiment.metrics.total_models);
        println!("Top responses:");
        for (i, top) in experiment.top_responses.iter().enumerate() {
            let share = 100.0 * top.count as f64 / experiment.metrics.total_models as f64;
            println!(
                "  {}. '{}': {} models ({:.1}%)",
                i + 1,
                top.value,
                top.count,
                share
            );
        }
        println!();
    }
}

/// Print response totals per model family
fn print_families(report: &AnalysisReport) {
    if report.families.is_empty() {
        println!("No responses to group.");
        return;
    }

    for summary in &report.families {
        println!(
            "{} models: {} responses, {} distinct values",
            summary.family.to_string().to_uppercase(),
            summary.responses,
            summary.unique_values
        );
        for (experiment, count) in &summary.by_experiment {
            println!("  {}: {}", experiment, count);
        }
    }
}

/// Print the convergence and diversity rankings
fn print_rankings(report: &AnalysisReport) {
    println!("Convergence ranking (highest first):");
    for (i, entry) in report.convergence_ranking.iter().enumerate() {
        match report.experiments.get(&entry.experiment) {
            Some(experiment) => println!(
                "  {}. {}: {:.1}% on '{}'",
                i + 1,
                display_name(&entry.experiment),
                entry.value,
                experiment.metrics.most_common_response
            ),
            None => println!(
                "  {}. {}: {:.1}%",
                i + 1,
                display_name(&entry.experiment),
                entry.value
            ),
        }
    }

    println!();
    println!("Diversity ranking (most diverse first):");
    for (i, entry) in report.diversity_ranking.iter().enumerate() {
        println!(
            "  {}. {}: {:.1}% unique",
            i + 1,
            display_name(&entry.experiment),
            entry.value
        );
    }
}

/// Print the report in JSON format
fn print_json(report: &AnalysisReport) {
    match serde_json::to_string_pretty(report) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing report to JSON: {}", e),
    }
}

/// Turn an experiment key like "color_selection" into "Color Selection"
fn display_name(name: &str) -> String {
    name.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
