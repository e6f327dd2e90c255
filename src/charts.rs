use std::error::Error;
use std::path::Path;

use indexmap::IndexMap;
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::frequency::FrequencyTable;
use crate::models::MetricsResult;

/// Bars shown per experiment in the distribution chart
const TOP_VALUES: usize = 8;

const LABEL_CHARS: usize = 14;
const PANEL_HEIGHT: u32 = 450;

/// Render the side-by-side convergence and diversity bar panels
pub fn render_convergence_chart(
    metrics: &IndexMap<String, MetricsResult>,
    out_path: &Path,
) -> Result<(), Box<dyn Error>> {
    if metrics.is_empty() {
        return Ok(());
    }

    let names: Vec<&str> = metrics.keys().map(String::as_str).collect();
    let convergence: Vec<f64> = metrics.values().map(|m| m.convergence_rate).collect();
    let diversity: Vec<f64> = metrics.values().map(|m| m.diversity_index).collect();

    let root = BitMapBackend::new(out_path, (1500, 600)).into_drawing_area();
    root.fill(&WHITE)?;
    let panels = root.split_evenly((1, 2));

    draw_percentage_panel(
        &panels[0],
        "Convergence Rate by Experiment",
        "convergence rate (%)",
        &names,
        &convergence,
        &BLUE,
    )?;
    draw_percentage_panel(
        &panels[1],
        "Diversity Index by Experiment",
        "diversity index (%)",
        &names,
        &diversity,
        &GREEN,
    )?;

    root.present()?;
    Ok(())
}

/// Render one top-responses bar panel per experiment in a two-column grid
pub fn render_distribution_chart(
    tables: &[(String, FrequencyTable)],
    out_path: &Path,
) -> Result<(), Box<dyn Error>> {
    if tables.is_empty() {
        return Ok(());
    }

    let cols = 2usize;
    let rows = tables.len().div_ceil(cols);
    let height = PANEL_HEIGHT * rows as u32;

    let root = BitMapBackend::new(out_path, (1500, height)).into_drawing_area();
    root.fill(&WHITE)?;
    let panels = root.split_evenly((rows, cols));

    for ((name, table), panel) in tables.iter().zip(panels.iter()) {
        draw_count_panel(panel, name, table)?;
    }

    root.present()?;
    Ok(())
}

fn draw_percentage_panel(
    area: &DrawingArea<BitMapBackend, Shift>,
    caption: &str,
    y_desc: &str,
    names: &[&str],
    values: &[f64],
    color: &RGBColor,
) -> Result<(), Box<dyn Error>> {
    let mut y_max = values.iter().copied().fold(0.0f64, f64::max).max(1e-6);
    y_max *= 1.1;
    let n = names.len();

    let mut chart = ChartBuilder::on(area)
        .caption(caption, ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(55)
        .build_cartesian_2d(-0.5f64..(n as f64 - 0.5), 0f64..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("experiment")
        .y_desc(y_desc)
        .x_labels(n)
        .x_label_formatter(&|x| {
            let idx = x.round() as isize;
            if (0..n as isize).contains(&idx) {
                short_label(names[idx as usize], LABEL_CHARS)
            } else {
                String::new()
            }
        })
        .draw()?;

    for (i, value) in values.iter().enumerate() {
        let center = i as f64;
        chart.draw_series(std::iter::once(Rectangle::new(
            [(center - 0.3, 0.0), (center + 0.3, *value)],
            color.mix(0.6).filled(),
        )))?;
    }
    Ok(())
}

fn draw_count_panel(
    area: &DrawingArea<BitMapBackend, Shift>,
    name: &str,
    table: &FrequencyTable,
) -> Result<(), Box<dyn Error>> {
    if table.is_empty() {
        return Ok(());
    }

    let top = table.top(TOP_VALUES);
    let labels: Vec<&str> = top.iter().map(|(value, _)| *value).collect();
    let counts: Vec<usize> = top.iter().map(|(_, count)| *count).collect();
    let n = labels.len();
    let y_max = counts.iter().copied().max().unwrap_or(1) as f64 * 1.2;

    let mut chart = ChartBuilder::on(area)
        .caption(name, ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(45)
        .build_cartesian_2d(-0.5f64..(n as f64 - 0.5), 0f64..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .y_desc("models")
        .x_labels(n)
        .x_label_formatter(&|x| {
            let idx = x.round() as isize;
            if (0..n as isize).contains(&idx) {
                short_label(labels[idx as usize], LABEL_CHARS)
            } else {
                String::new()
            }
        })
        .draw()?;

    for (i, count) in counts.iter().enumerate() {
        let center = i as f64;
        chart.draw_series(std::iter::once(Rectangle::new(
            [(center - 0.3, 0.0), (center + 0.3, *count as f64)],
            BLUE.mix(0.6).filled(),
        )))?;
    }
    Ok(())
}

fn short_label(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(2)).collect();
        format!("{}..", kept)
    }
}
