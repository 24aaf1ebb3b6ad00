use std::collections::BTreeMap;

use anyhow::{Context, Result};

use crate::data::model::{IrisDataset, Measurement, Species};

/// Row labels of the descriptive-statistics table, in print order.
pub const SUMMARY_ROWS: [&str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

/// Arithmetic mean; `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Quantile of pre-sorted values, linearly interpolated between the two
/// closest ranks.
fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    let h = (sorted.len() - 1) as f64 * q;
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(sorted.len() - 1);
    sorted[lo] + (h - lo as f64) * (sorted[hi] - sorted[lo])
}

// ---------------------------------------------------------------------------
// Summary – one column of the describe table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (n − 1); NaN for a single value.
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

impl Summary {
    /// `None` if `values` is empty.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mean = mean(values)?;
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let n = sorted.len();
        let std = if n > 1 {
            let ss: f64 = sorted.iter().map(|v| (v - mean).powi(2)).sum();
            (ss / (n - 1) as f64).sqrt()
        } else {
            f64::NAN
        };

        Some(Summary {
            count: n,
            mean,
            std,
            min: sorted[0],
            q25: quantile_sorted(&sorted, 0.25),
            median: quantile_sorted(&sorted, 0.5),
            q75: quantile_sorted(&sorted, 0.75),
            max: sorted[n - 1],
        })
    }

    /// The eight statistics in [`SUMMARY_ROWS`] order.
    pub fn row_values(&self) -> [f64; 8] {
        [
            self.count as f64,
            self.mean,
            self.std,
            self.min,
            self.q25,
            self.median,
            self.q75,
            self.max,
        ]
    }
}

// ---------------------------------------------------------------------------
// DescribeTable
// ---------------------------------------------------------------------------

/// Descriptive statistics for every numeric column, in column order.
#[derive(Debug, Clone)]
pub struct DescribeTable {
    pub columns: Vec<(Measurement, Summary)>,
}

impl DescribeTable {
    #[cfg(test)]
    pub fn get(&self, m: Measurement) -> Option<&Summary> {
        self.columns.iter().find(|(c, _)| *c == m).map(|(_, s)| s)
    }
}

pub fn describe(dataset: &IrisDataset) -> Result<DescribeTable> {
    let columns = Measurement::ALL
        .into_iter()
        .map(|m| {
            Summary::from_values(&dataset.values(m))
                .map(|s| (m, s))
                .with_context(|| format!("column '{m}' has no values to describe"))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(DescribeTable { columns })
}

// ---------------------------------------------------------------------------
// SpeciesMeans – group-by mean
// ---------------------------------------------------------------------------

/// Mean of each numeric column per species. Only species present in the
/// dataset get a row; rows iterate in alphabetical label order.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeciesMeans {
    pub rows: BTreeMap<Species, [f64; 4]>,
}

impl SpeciesMeans {
    pub fn get(&self, species: Species, m: Measurement) -> Option<f64> {
        self.rows.get(&species).map(|row| row[m.index()])
    }

    pub fn species(&self) -> impl Iterator<Item = Species> + '_ {
        self.rows.keys().copied()
    }
}

pub fn species_means(dataset: &IrisDataset) -> SpeciesMeans {
    let mut rows = BTreeMap::new();
    for species in Species::ALL {
        if !dataset.records.iter().any(|r| r.species == species) {
            continue;
        }
        let mut row = [f64::NAN; 4];
        for m in Measurement::ALL {
            if let Some(v) = mean(&dataset.species_values(species, m)) {
                row[m.index()] = v;
            }
        }
        rows.insert(species, row);
    }
    SpeciesMeans { rows }
}

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

/// Equal-width binning over `[min, max]`; the last bin includes its right edge.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// `bins + 1` ascending edges.
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    pub fn fixed_width(values: &[f64], bins: usize) -> Option<Self> {
        if values.is_empty() || bins == 0 {
            return None;
        }
        let mut lo = values.iter().copied().fold(f64::INFINITY, f64::min);
        let mut hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if (hi - lo).abs() < f64::EPSILON {
            lo -= 0.5;
            hi += 0.5;
        }

        let width = (hi - lo) / bins as f64;
        let mut edges: Vec<f64> = (0..=bins).map(|i| lo + width * i as f64).collect();
        edges[bins] = hi;

        let mut counts = vec![0usize; bins];
        for &v in values {
            let mut idx = (((v - lo) / width) as usize).min(bins - 1);
            // The division can land a value sitting on an edge one bin off;
            // the edges themselves decide.
            if v < edges[idx] {
                idx = idx.saturating_sub(1);
            } else if idx != bins - 1 && v >= edges[idx + 1] {
                idx += 1;
            }
            counts[idx] += 1;
        }

        Some(Histogram { edges, counts })
    }

    pub fn bin_width(&self) -> f64 {
        self.edges[1] - self.edges[0]
    }

    /// `(left edge, right edge, count)` per bin.
    pub fn bins(&self) -> impl Iterator<Item = (f64, f64, usize)> + '_ {
        self.edges
            .windows(2)
            .zip(&self.counts)
            .map(|(w, &c)| (w[0], w[1], c))
    }
}
