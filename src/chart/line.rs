use std::path::Path;

use anyhow::{Context, Result};
use plotters::prelude::*;

use super::{category_label, category_range, label_font, legend_font, padded_range, title_font};
use super::{MARGIN, WIDE_FIGURE};
use crate::color::{generate_palette, GRID_GREY};
use crate::data::model::{Measurement, Species};
use crate::stats::SpeciesMeans;

/// Average of every measurement per species: one line per measurement with
/// a dot at each species.
pub fn render(means: &SpeciesMeans, path: &Path) -> Result<()> {
    let species: Vec<Species> = means.species().collect();
    let labels: Vec<&str> = species.iter().map(|s| s.label()).collect();

    let root = BitMapBackend::new(path, WIDE_FIGURE).into_drawing_area();
    root.fill(&WHITE)?;

    let y_range = padded_range(means.rows.values().flatten().copied());
    let mut chart = ChartBuilder::on(&root)
        .caption("Average Measurements Across Iris Species", title_font())
        .margin(MARGIN)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(category_range(species.len()), y_range)?;

    let x_fmt = |x: &f64| category_label(&labels, *x);
    chart
        .configure_mesh()
        .disable_x_mesh()
        .bold_line_style(GRID_GREY)
        .light_line_style(WHITE)
        .x_labels(labels.len() * 2 + 1)
        .x_label_formatter(&x_fmt)
        .x_desc("Species")
        .y_desc("Measurement (cm)")
        .axis_desc_style(label_font())
        .draw()?;

    // Label-only series acts as the legend title.
    chart
        .draw_series(std::iter::empty::<Circle<(f64, f64), i32>>())?
        .label("Measurement");

    for (m, color) in Measurement::ALL.into_iter().zip(generate_palette(Measurement::ALL.len())) {
        let points: Vec<(f64, f64)> = species
            .iter()
            .enumerate()
            .filter_map(|(i, &sp)| Some((i as f64, means.get(sp, m)?)))
            .collect();

        chart
            .draw_series(LineSeries::new(points.clone(), color.stroke_width(2)))?
            .label(m.column_name())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
        chart.draw_series(points.into_iter().map(|p| Circle::new(p, 5, color.filled())))?;
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .label_font(legend_font())
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()
        .with_context(|| format!("writing {}", path.display()))?;
    log::info!("Line chart saved to {}", path.display());
    Ok(())
}
