use std::collections::BTreeMap;

use palette::{FromColor, Hsv, Srgb};
use plotters::style::RGBColor;

use crate::data::model::Species;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// First hue of the palette; starts the sequence on a muted blue.
const BASE_HUE: f32 = 210.0;

/// `n` muted colours with hues spread evenly around the wheel, toned down to
/// sit on a white grid background.
pub fn generate_palette(n: usize) -> Vec<RGBColor> {
    let step = 360.0 / n.max(1) as f32;
    (0..n)
        .map(|i| {
            let hsv = Hsv::new(BASE_HUE + step * i as f32, 0.65, 0.80);
            let rgb: Srgb<u8> = Srgb::<f32>::from_color(hsv).into_format();
            RGBColor(rgb.red, rgb.green, rgb.blue)
        })
        .collect()
}

/// Histogram fill.
pub const SKY_BLUE: RGBColor = RGBColor(135, 206, 235);

/// Whitegrid mesh lines.
pub const GRID_GREY: RGBColor = RGBColor(225, 225, 225);

// ---------------------------------------------------------------------------
// Species → colour
// ---------------------------------------------------------------------------

/// Fixed colour per species label, shared by every chart that encodes species.
#[derive(Debug, Clone)]
pub struct SpeciesColors {
    mapping: BTreeMap<Species, RGBColor>,
}

impl Default for SpeciesColors {
    fn default() -> Self {
        let mapping = Species::ALL
            .into_iter()
            .zip(generate_palette(Species::ALL.len()))
            .collect();
        SpeciesColors { mapping }
    }
}

impl SpeciesColors {
    pub fn color_for(&self, species: Species) -> RGBColor {
        self.mapping
            .get(&species)
            .copied()
            .unwrap_or(RGBColor(128, 128, 128))
    }
}
