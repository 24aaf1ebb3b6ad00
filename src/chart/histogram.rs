use std::path::Path;

use anyhow::{Context, Result};
use plotters::prelude::*;

use super::{label_font, title_font, MARGIN, STANDARD_FIGURE};
use crate::color::{GRID_GREY, SKY_BLUE};
use crate::data::model::{IrisDataset, Measurement};
use crate::stats::Histogram;

pub const BINS: usize = 20;

/// Distribution of sepal length over equal-width bins.
pub fn render(dataset: &IrisDataset, path: &Path) -> Result<()> {
    let hist = Histogram::fixed_width(&dataset.values(Measurement::SepalLength), BINS)
        .context("no sepal length values to bin")?;
    log::debug!("Sepal length histogram bin width {:.3}", hist.bin_width());

    let x_range = hist.edges[0]..hist.edges[BINS];
    let y_top = hist.counts.iter().copied().max().unwrap_or(0) as f64 * 1.1;

    let root = BitMapBackend::new(path, STANDARD_FIGURE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Distribution of Sepal Length", title_font())
        .margin(MARGIN)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range, 0.0..y_top.max(1.0))?;

    chart
        .configure_mesh()
        .bold_line_style(GRID_GREY)
        .light_line_style(WHITE)
        .x_desc(Measurement::SepalLength.axis_label())
        .y_desc("Frequency")
        .axis_desc_style(label_font())
        .draw()?;

    chart.draw_series(
        hist.bins()
            .map(|(l, r, c)| Rectangle::new([(l, 0.0), (r, c as f64)], SKY_BLUE.filled())),
    )?;
    chart.draw_series(
        hist.bins()
            .map(|(l, r, c)| Rectangle::new([(l, 0.0), (r, c as f64)], BLACK.stroke_width(1))),
    )?;

    root.present()
        .with_context(|| format!("writing {}", path.display()))?;
    log::info!("Histogram saved to {}", path.display());
    Ok(())
}
