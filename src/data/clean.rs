use anyhow::{bail, Result};

use super::model::{IrisDataset, Measurement};
use crate::stats::mean;

/// Missing-cell count per numeric column, indexed by [`Measurement::index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MissingCounts(pub [usize; 4]);

impl MissingCounts {
    pub fn get(&self, m: Measurement) -> usize {
        self.0[m.index()]
    }

    pub fn total(&self) -> usize {
        self.0.iter().sum()
    }
}

/// What the cleaning step decided.
#[derive(Debug, Clone, PartialEq)]
pub enum CleanOutcome {
    /// No numeric cell was missing; nothing was touched.
    AlreadyClean,
    /// Missing cells were replaced by their own column's mean.
    Filled {
        counts: MissingCounts,
        /// Value written into each column; `None` for columns with no gaps.
        fill_values: [Option<f64>; 4],
    },
}

pub fn missing_counts(dataset: &IrisDataset) -> MissingCounts {
    let mut counts = MissingCounts::default();
    for m in Measurement::ALL {
        counts.0[m.index()] = dataset.column(m).filter(Option::is_none).count();
    }
    counts
}

/// Replace every missing measurement with the mean of the non-missing
/// entries of the same column.
///
/// Fails when a column with gaps has no values at all, since its mean is
/// undefined.
pub fn fill_missing_with_means(dataset: &mut IrisDataset) -> Result<CleanOutcome> {
    let counts = missing_counts(dataset);
    if counts.total() == 0 {
        return Ok(CleanOutcome::AlreadyClean);
    }

    let mut fill_values = [None; 4];
    for m in Measurement::ALL {
        if counts.get(m) == 0 {
            continue;
        }
        let Some(fill) = mean(&dataset.values(m)) else {
            bail!("column '{m}' has no values to compute a fill mean from");
        };
        log::debug!("Filling {} missing {m} cells with {fill}", counts.get(m));
        fill_values[m.index()] = Some(fill);
    }

    for record in &mut dataset.records {
        for (cell, fill) in record.values.iter_mut().zip(fill_values) {
            if cell.is_none() {
                *cell = fill;
            }
        }
    }

    Ok(CleanOutcome::Filled {
        counts,
        fill_values,
    })
}
