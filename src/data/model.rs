use std::fmt;
use std::str::FromStr;

use anyhow::bail;

// ---------------------------------------------------------------------------
// Species – the categorical column
// ---------------------------------------------------------------------------

/// Iris species label. `Ord` follows the alphabetical order of the labels,
/// so `BTreeMap<Species, _>` iterates setosa → versicolor → virginica.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Species {
    Setosa,
    Versicolor,
    Virginica,
}

impl Species {
    pub const ALL: [Species; 3] = [Species::Setosa, Species::Versicolor, Species::Virginica];

    pub fn label(self) -> &'static str {
        match self {
            Species::Setosa => "setosa",
            Species::Versicolor => "versicolor",
            Species::Virginica => "virginica",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Species {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "setosa" => Ok(Species::Setosa),
            "versicolor" => Ok(Species::Versicolor),
            "virginica" => Ok(Species::Virginica),
            other => bail!("unknown species label '{other}'"),
        }
    }
}

// ---------------------------------------------------------------------------
// Measurement – the four numeric columns
// ---------------------------------------------------------------------------

/// One of the four numeric columns, all in centimetres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Measurement {
    SepalLength,
    SepalWidth,
    PetalLength,
    PetalWidth,
}

impl Measurement {
    pub const ALL: [Measurement; 4] = [
        Measurement::SepalLength,
        Measurement::SepalWidth,
        Measurement::PetalLength,
        Measurement::PetalWidth,
    ];

    /// Column name as it appears in the CSV header.
    pub fn column_name(self) -> &'static str {
        match self {
            Measurement::SepalLength => "sepal_length",
            Measurement::SepalWidth => "sepal_width",
            Measurement::PetalLength => "petal_length",
            Measurement::PetalWidth => "petal_width",
        }
    }

    /// Human-readable axis label.
    pub fn axis_label(self) -> &'static str {
        match self {
            Measurement::SepalLength => "Sepal Length (cm)",
            Measurement::SepalWidth => "Sepal Width (cm)",
            Measurement::PetalLength => "Petal Length (cm)",
            Measurement::PetalWidth => "Petal Width (cm)",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

// ---------------------------------------------------------------------------
// IrisRecord – one row of the table
// ---------------------------------------------------------------------------

/// A single flower. `None` marks a missing measurement.
#[derive(Debug, Clone, PartialEq)]
pub struct IrisRecord {
    /// Indexed by [`Measurement::index`].
    pub values: [Option<f64>; 4],
    pub species: Species,
}

impl IrisRecord {
    pub fn get(&self, m: Measurement) -> Option<f64> {
        self.values[m.index()]
    }
}

// ---------------------------------------------------------------------------
// IrisDataset – the complete loaded table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct IrisDataset {
    pub records: Vec<IrisRecord>,
}

impl IrisDataset {
    pub fn from_records(records: Vec<IrisRecord>) -> Self {
        IrisDataset { records }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Every cell of one column, missing entries included.
    pub fn column(&self, m: Measurement) -> impl Iterator<Item = Option<f64>> + '_ {
        self.records.iter().map(move |r| r.get(m))
    }

    /// The non-missing values of one column, in record order.
    pub fn values(&self, m: Measurement) -> Vec<f64> {
        self.column(m).flatten().collect()
    }

    /// The non-missing values of one column restricted to one species.
    pub fn species_values(&self, species: Species, m: Measurement) -> Vec<f64> {
        self.records
            .iter()
            .filter(|r| r.species == species)
            .filter_map(|r| r.get(m))
            .collect()
    }

    /// `(x, y)` pairs for one species where both measurements are present.
    pub fn species_pairs(&self, species: Species, x: Measurement, y: Measurement) -> Vec<(f64, f64)> {
        self.records
            .iter()
            .filter(|r| r.species == species)
            .filter_map(|r| Some((r.get(x)?, r.get(y)?)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(values: [Option<f64>; 4], species: Species) -> IrisRecord {
        IrisRecord { values, species }
    }

    #[test]
    fn species_order_is_alphabetical() {
        let mut labels: Vec<&str> = Species::ALL.iter().map(|s| s.label()).collect();
        let sorted = labels.clone();
        labels.sort();
        assert_eq!(labels, sorted);
        assert!(Species::Setosa < Species::Versicolor);
        assert!(Species::Versicolor < Species::Virginica);
    }

    #[test]
    fn species_parses_known_labels_only() {
        assert_eq!("virginica".parse::<Species>().unwrap(), Species::Virginica);
        assert_eq!(" setosa ".parse::<Species>().unwrap(), Species::Setosa);
        assert!("Iris-setosa".parse::<Species>().is_err());
    }

    #[test]
    fn values_skip_missing_cells() {
        let ds = IrisDataset::from_records(vec![
            record([Some(5.0), None, Some(1.0), Some(0.2)], Species::Setosa),
            record([None, Some(3.0), Some(4.0), Some(1.3)], Species::Versicolor),
        ]);
        assert_eq!(ds.values(Measurement::SepalLength), vec![5.0]);
        assert_eq!(ds.column(Measurement::SepalWidth).collect::<Vec<_>>(), vec![None, Some(3.0)]);
        assert_eq!(ds.species_values(Species::Versicolor, Measurement::PetalLength), vec![4.0]);
        assert!(ds
            .species_pairs(Species::Versicolor, Measurement::SepalLength, Measurement::PetalLength)
            .is_empty());
    }
}
