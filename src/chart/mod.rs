/// Static chart rendering: one PNG per view of the dataset.
///
/// Every renderer owns its bitmap backend for the length of a single call,
/// so a failure in one chart never leaves a half-open figure behind for the
/// next one.
pub mod bar;
pub mod histogram;
pub mod line;
pub mod scatter;

use std::ops::Range;
use std::path::{Path, PathBuf};

use anyhow::Result;
use plotters::style::{IntoFont, TextStyle};

use crate::data::model::IrisDataset;
use crate::stats::SpeciesMeans;

pub const LINE_CHART_FILE: &str = "iris_line_chart.png";
pub const BAR_CHART_FILE: &str = "iris_bar_chart.png";
pub const HISTOGRAM_FILE: &str = "iris_histogram.png";
pub const SCATTER_PLOT_FILE: &str = "iris_scatter_plot.png";

/// Figure sizes in pixels (inches × 100 dpi).
pub const WIDE_FIGURE: (u32, u32) = (1000, 600);
pub const STANDARD_FIGURE: (u32, u32) = (800, 600);

const MARGIN: u32 = 15;

fn title_font() -> TextStyle<'static> {
    ("sans-serif", 20).into_font().into()
}

fn label_font() -> TextStyle<'static> {
    ("sans-serif", 16).into_font().into()
}

fn legend_font() -> TextStyle<'static> {
    ("sans-serif", 14).into_font().into()
}

/// X range for `n` categories drawn at 0, 1, ..., n - 1.
fn category_range(n: usize) -> Range<f64> {
    -0.5..(n.max(1) as f64 - 0.5)
}

/// Tick label for a categorical axis: the category name at whole positions,
/// nothing in between.
fn category_label(labels: &[&str], x: f64) -> String {
    let idx = x.round();
    if (x - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    labels
        .get(idx as usize)
        .map(|s| s.to_string())
        .unwrap_or_default()
}

/// Range spanning `values` with 5% head-room on both sides.
fn padded_range(values: impl IntoIterator<Item = f64>) -> Range<f64> {
    let (lo, hi) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if !lo.is_finite() {
        return 0.0..1.0;
    }
    let pad = if hi > lo { (hi - lo) * 0.05 } else { 0.5 };
    (lo - pad)..(hi + pad)
}

/// Render the four charts into `output_dir`, in a fixed order.
pub fn render_all(
    dataset: &IrisDataset,
    means: &SpeciesMeans,
    output_dir: &Path,
) -> Result<Vec<PathBuf>> {
    let line_path = output_dir.join(LINE_CHART_FILE);
    line::render(means, &line_path)?;

    let bar_path = output_dir.join(BAR_CHART_FILE);
    bar::render(dataset, &bar_path)?;

    let hist_path = output_dir.join(HISTOGRAM_FILE);
    histogram::render(dataset, &hist_path)?;

    let scatter_path = output_dir.join(SCATTER_PLOT_FILE);
    scatter::render(dataset, &scatter_path)?;

    Ok(vec![line_path, bar_path, hist_path, scatter_path])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatasetSource;
    use crate::data::loader::load_dataset;
    use crate::stats::species_means;

    #[test]
    fn category_labels_only_at_whole_positions() {
        let labels = ["setosa", "versicolor", "virginica"];
        assert_eq!(category_label(&labels, 0.0), "setosa");
        assert_eq!(category_label(&labels, 2.0), "virginica");
        assert_eq!(category_label(&labels, 0.5), "");
        assert_eq!(category_label(&labels, -1.0), "");
        assert_eq!(category_label(&labels, 3.0), "");
    }

    #[test]
    fn padded_range_handles_degenerate_input() {
        assert_eq!(padded_range([2.0, 2.0]), 1.5..2.5);
        assert_eq!(padded_range(std::iter::empty()), 0.0..1.0);
        let r = padded_range([0.0, 10.0, f64::NAN]);
        assert_eq!(r, -0.5..10.5);
    }

    #[test]
    fn render_all_writes_four_fixed_files_with_stable_dimensions() {
        let ds = load_dataset(&DatasetSource::Embedded).unwrap();
        let means = species_means(&ds);
        let dir = tempfile::tempdir().unwrap();

        for _ in 0..2 {
            let paths = render_all(&ds, &means, dir.path()).unwrap();
            let names: Vec<_> = paths
                .iter()
                .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
                .collect();
            assert_eq!(
                names,
                [LINE_CHART_FILE, BAR_CHART_FILE, HISTOGRAM_FILE, SCATTER_PLOT_FILE]
            );
            assert_eq!(image::image_dimensions(&paths[0]).unwrap(), WIDE_FIGURE);
            for p in &paths[1..] {
                assert_eq!(image::image_dimensions(p).unwrap(), STANDARD_FIGURE);
            }
        }
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 4);
    }
}
