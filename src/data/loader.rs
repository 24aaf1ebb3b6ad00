use std::fs::File;
use std::io::Read;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use super::model::{IrisDataset, IrisRecord};
use crate::config::DatasetSource;
use crate::error::ReportError;

/// The Iris table shipped with the binary.
const EMBEDDED_CSV: &str = include_str!("../../data/iris.csv");

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Obtain the dataset from `source`.
///
/// Only a source that cannot be opened maps to
/// [`ReportError::DataUnavailable`]; malformed content is an ordinary error.
pub fn load_dataset(source: &DatasetSource) -> Result<IrisDataset, ReportError> {
    let dataset = match source {
        DatasetSource::Embedded => {
            parse_csv(EMBEDDED_CSV.as_bytes()).context("parsing embedded Iris CSV")?
        }
        DatasetSource::File(path) => {
            let file = File::open(path).map_err(|source| ReportError::DataUnavailable {
                location: path.display().to_string(),
                source,
            })?;
            parse_csv(file).with_context(|| format!("parsing {}", path.display()))?
        }
    };

    log::info!("Loaded {} records from {source:?}", dataset.len());
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Header: `sepal_length,sepal_width,petal_length,petal_width,species`.
/// An empty or non-numeric measurement (`NA`, `nan`, ...) reads as missing.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(deserialize_with = "csv::invalid_option")]
    sepal_length: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    sepal_width: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    petal_length: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    petal_width: Option<f64>,
    species: String,
}

fn parse_csv<R: Read>(reader: R) -> Result<IrisDataset> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut records = Vec::new();

    for (row_no, result) in reader.deserialize::<CsvRow>().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;
        let species = row
            .species
            .parse()
            .with_context(|| format!("CSV row {row_no}"))?;

        records.push(IrisRecord {
            values: [
                row.sepal_length.filter(|v| v.is_finite()),
                row.sepal_width.filter(|v| v.is_finite()),
                row.petal_length.filter(|v| v.is_finite()),
                row.petal_width.filter(|v| v.is_finite()),
            ],
            species,
        });
    }

    if records.is_empty() {
        bail!("dataset contains no records");
    }
    Ok(IrisDataset::from_records(records))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::data::model::{Measurement, Species};

    fn write_csv(body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    #[test]
    fn embedded_dataset_has_150_complete_records() {
        let ds = load_dataset(&DatasetSource::Embedded).unwrap();
        assert_eq!(ds.len(), 150);
        for m in Measurement::ALL {
            assert_eq!(ds.values(m).len(), 150, "{m} has missing values");
        }
        for species in Species::ALL {
            let n = ds.records.iter().filter(|r| r.species == species).count();
            assert_eq!(n, 50, "{species}");
        }
        assert_eq!(ds.records[0].values, [Some(5.1), Some(3.5), Some(1.4), Some(0.2)]);
    }

    #[test]
    fn missing_file_is_data_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let source = DatasetSource::File(dir.path().join("absent.csv"));
        let err = load_dataset(&source).unwrap_err();
        assert!(matches!(err, ReportError::DataUnavailable { .. }), "{err:?}");
    }

    #[test]
    fn empty_and_na_cells_read_as_missing() {
        let file = write_csv(
            "sepal_length,sepal_width,petal_length,petal_width,species\n\
             5.1,,1.4,0.2,setosa\n\
             NA,2.9,nan,1.3,versicolor\n",
        );
        let ds = load_dataset(&DatasetSource::File(file.path().to_path_buf())).unwrap();
        assert_eq!(ds.records[0].values, [Some(5.1), None, Some(1.4), Some(0.2)]);
        assert_eq!(ds.records[1].values, [None, Some(2.9), None, Some(1.3)]);
    }

    #[test]
    fn unknown_species_is_unexpected() {
        let file = write_csv(
            "sepal_length,sepal_width,petal_length,petal_width,species\n\
             5.1,3.5,1.4,0.2,daisy\n",
        );
        let err = load_dataset(&DatasetSource::File(file.path().to_path_buf())).unwrap_err();
        assert!(matches!(err, ReportError::Unexpected(_)));
        assert!(format!("{err:#}").contains("daisy"));
    }

    #[test]
    fn header_only_file_is_rejected() {
        let file = write_csv("sepal_length,sepal_width,petal_length,petal_width,species\n");
        let err = load_dataset(&DatasetSource::File(file.path().to_path_buf())).unwrap_err();
        assert!(matches!(err, ReportError::Unexpected(_)));
    }
}
