use std::path::Path;

use anyhow::{Context, Result};
use plotters::prelude::*;

use super::{category_label, category_range, label_font, title_font, MARGIN, STANDARD_FIGURE};
use crate::color::{SpeciesColors, GRID_GREY};
use crate::data::model::{IrisDataset, Measurement, Species};
use crate::stats::mean;

const BAR_HALF_WIDTH: f64 = 0.4;

/// Mean petal length per species as plain bars.
pub fn render(dataset: &IrisDataset, path: &Path) -> Result<()> {
    let bars: Vec<(Species, f64)> = Species::ALL
        .into_iter()
        .filter_map(|sp| Some((sp, mean(&dataset.species_values(sp, Measurement::PetalLength))?)))
        .collect();
    let labels: Vec<&str> = bars.iter().map(|(sp, _)| sp.label()).collect();
    let top = bars.iter().map(|(_, v)| *v).fold(0.0, f64::max) * 1.1;

    let root = BitMapBackend::new(path, STANDARD_FIGURE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Average Petal Length by Species", title_font())
        .margin(MARGIN)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(category_range(bars.len()), 0.0..top.max(1.0))?;

    let x_fmt = |x: &f64| category_label(&labels, *x);
    chart
        .configure_mesh()
        .disable_x_mesh()
        .bold_line_style(GRID_GREY)
        .light_line_style(WHITE)
        .x_labels(labels.len() * 2 + 1)
        .x_label_formatter(&x_fmt)
        .x_desc("Species")
        .y_desc("Petal Length (cm)")
        .axis_desc_style(label_font())
        .draw()?;

    let colors = SpeciesColors::default();
    chart.draw_series(bars.iter().enumerate().map(|(i, &(sp, value))| {
        let x = i as f64;
        Rectangle::new(
            [(x - BAR_HALF_WIDTH, 0.0), (x + BAR_HALF_WIDTH, value)],
            colors.color_for(sp).filled(),
        )
    }))?;

    root.present()
        .with_context(|| format!("writing {}", path.display()))?;
    log::info!("Bar chart saved to {}", path.display());
    Ok(())
}
