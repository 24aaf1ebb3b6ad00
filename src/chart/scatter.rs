use std::path::Path;

use anyhow::{Context, Result};
use plotters::prelude::*;

use super::{label_font, legend_font, padded_range, title_font, MARGIN, STANDARD_FIGURE};
use crate::color::{SpeciesColors, GRID_GREY};
use crate::data::model::{IrisDataset, Measurement, Species};

/// Marker radius per species; species is encoded by size as well as colour.
fn marker_size(species: Species) -> i32 {
    match species {
        Species::Setosa => 7,
        Species::Versicolor => 5,
        Species::Virginica => 3,
    }
}

/// Sepal length against petal length, one colour and size per species.
pub fn render(dataset: &IrisDataset, path: &Path) -> Result<()> {
    let (x_m, y_m) = (Measurement::SepalLength, Measurement::PetalLength);

    let root = BitMapBackend::new(path, STANDARD_FIGURE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Sepal Length vs. Petal Length by Species", title_font())
        .margin(MARGIN)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(padded_range(dataset.values(x_m)), padded_range(dataset.values(y_m)))?;

    chart
        .configure_mesh()
        .bold_line_style(GRID_GREY)
        .light_line_style(WHITE)
        .x_desc(x_m.axis_label())
        .y_desc(y_m.axis_label())
        .axis_desc_style(label_font())
        .draw()?;

    chart
        .draw_series(std::iter::empty::<Circle<(f64, f64), i32>>())?
        .label("Species");

    let colors = SpeciesColors::default();
    for species in Species::ALL {
        let points = dataset.species_pairs(species, x_m, y_m);
        if points.is_empty() {
            continue;
        }
        let color = colors.color_for(species);
        let size = marker_size(species);
        chart
            .draw_series(points.into_iter().map(|p| Circle::new(p, size, color.mix(0.8).filled())))?
            .label(species.label())
            .legend(move |(x, y)| Circle::new((x + 10, y), size, color.filled()));
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
    log::info!("Scatter plot saved to {}", path.display());
    Ok(())
}
