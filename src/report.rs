use std::io::{self, Write};

use crate::data::clean::{CleanOutcome, MissingCounts};
use crate::data::model::{IrisDataset, Measurement, Species};
use crate::stats::{DescribeTable, SpeciesMeans, SUMMARY_ROWS};

pub const FINDINGS: [&str; 4] = [
    "- Setosa has the smallest average petal length and width.",
    "- Virginica has the largest average sepal length and petal measurements.",
    "- Versicolor shows intermediate values, closer to Virginica than Setosa.",
    "- Sepal width is relatively consistent across species compared to other measurements.",
];

pub const OBSERVATIONS: [&str; 4] = [
    "- The scatter plot shows clear separation of Setosa, with smaller petal and sepal lengths.",
    "- Virginica's larger measurements are evident in the bar and line charts.",
    "- The histogram indicates a roughly normal distribution for sepal length with a slight right skew.",
    "- The line chart suggests a trend of increasing measurements from Setosa to Virginica.",
];

// ---------------------------------------------------------------------------
// Table layout
// ---------------------------------------------------------------------------

/// Right-aligned text table: an index column followed by data columns.
fn write_table(
    out: &mut impl Write,
    headers: &[&str],
    rows: &[(String, Vec<String>)],
) -> io::Result<()> {
    let index_width = rows.iter().map(|(idx, _)| idx.len()).max().unwrap_or(0);
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(c, h)| {
            rows.iter()
                .map(|(_, cells)| cells[c].len())
                .fold(h.len(), usize::max)
        })
        .collect();

    write!(out, "{:index_width$}", "")?;
    for (h, &w) in headers.iter().zip(&widths) {
        write!(out, "  {h:>w$}")?;
    }
    writeln!(out)?;

    for (idx, cells) in rows {
        write!(out, "{idx:<index_width$}")?;
        for (cell, &w) in cells.iter().zip(&widths) {
            write!(out, "  {cell:>w$}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn format_cell(value: Option<f64>) -> String {
    match value {
        None => "NaN".to_string(),
        Some(v) if v.fract() == 0.0 => format!("{v:.1}"),
        Some(v) => format!("{v}"),
    }
}

fn measurement_headers() -> Vec<&'static str> {
    Measurement::ALL.iter().map(|m| m.column_name()).collect()
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

pub fn write_preview(out: &mut impl Write, dataset: &IrisDataset, rows: usize) -> io::Result<()> {
    writeln!(out, "First {rows} rows of the Iris dataset:")?;
    let mut headers = measurement_headers();
    headers.push("species");

    let table: Vec<(String, Vec<String>)> = dataset
        .records
        .iter()
        .take(rows)
        .enumerate()
        .map(|(i, r)| {
            let mut cells: Vec<String> = r.values.iter().map(|v| format_cell(*v)).collect();
            cells.push(r.species.to_string());
            (i.to_string(), cells)
        })
        .collect();
    write_table(out, &headers, &table)
}

/// Structural summary: entry count, per-column non-null count and type.
pub fn write_info(out: &mut impl Write, dataset: &IrisDataset) -> io::Result<()> {
    writeln!(out, "\nDataset Info:")?;
    writeln!(
        out,
        "Entries: {} (index 0 to {})",
        dataset.len(),
        dataset.len().saturating_sub(1)
    )?;
    writeln!(out, "Data columns (total {} columns):", Measurement::ALL.len() + 1)?;
    writeln!(out, " #   {:<13} {:<15} Dtype", "Column", "Non-Null Count")?;
    writeln!(out, "---  {:<13} {:<15} -----", "------", "--------------")?;

    for m in Measurement::ALL {
        let non_null = dataset.column(m).flatten().count();
        let count = format!("{non_null} non-null");
        writeln!(out, " {:<3} {:<13} {count:<15} f64", m.index(), m.column_name())?;
    }
    let count = format!("{} non-null", dataset.len());
    writeln!(out, " {:<3} {:<13} {count:<15} category", Measurement::ALL.len(), "species")?;
    writeln!(out, "dtypes: f64({}), category(1)", Measurement::ALL.len())
}

pub fn write_missing(out: &mut impl Write, counts: &MissingCounts) -> io::Result<()> {
    writeln!(out, "\nMissing Values:")?;
    for m in Measurement::ALL {
        writeln!(out, "{:<14}{}", m.column_name(), counts.get(m))?;
    }
    // The species label can never be missing once a record is parsed.
    writeln!(out, "{:<14}0", "species")
}

pub fn write_clean_outcome(out: &mut impl Write, outcome: &CleanOutcome) -> io::Result<()> {
    match outcome {
        CleanOutcome::AlreadyClean => writeln!(out, "\nNo missing values found in the dataset."),
        CleanOutcome::Filled { .. } => {
            writeln!(out, "\nHandling missing values...")?;
            writeln!(out, "Missing values filled with column means.")
        }
    }
}

pub fn write_statistics(out: &mut impl Write, table: &DescribeTable) -> io::Result<()> {
    writeln!(out, "\nBasic Statistics:")?;
    let headers: Vec<&str> = table.columns.iter().map(|(m, _)| m.column_name()).collect();
    let rows: Vec<(String, Vec<String>)> = SUMMARY_ROWS
        .iter()
        .enumerate()
        .map(|(r, name)| {
            let cells = table
                .columns
                .iter()
                .map(|(_, s)| format!("{:.6}", s.row_values()[r]))
                .collect();
            (name.to_string(), cells)
        })
        .collect();
    write_table(out, &headers, &rows)
}

pub fn write_species_means(out: &mut impl Write, means: &SpeciesMeans) -> io::Result<()> {
    writeln!(out, "\nMean Values by Species:")?;
    let rows: Vec<(String, Vec<String>)> = means
        .rows
        .iter()
        .map(|(sp, row)| (sp.to_string(), row.iter().map(|v| format!("{v:.3}")).collect()))
        .collect();
    write_table(out, &measurement_headers(), &rows)
}

/// Prints the fixed findings. Any finding the computed means contradict is
/// reported through the log; the printed text never changes.
pub fn write_findings(out: &mut impl Write, means: &SpeciesMeans) -> io::Result<()> {
    for finding in contradicted_findings(means) {
        log::warn!("Finding not supported by the data: {finding}");
    }
    writeln!(out, "\nAnalysis Findings:")?;
    for line in FINDINGS {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

pub fn write_observations(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "\nVisualization Observations:")?;
    for line in OBSERVATIONS {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Finding cross-checks
// ---------------------------------------------------------------------------

/// The entries of [`FINDINGS`] that `means` contradicts. A finding that
/// refers to a species absent from the data is not checked.
pub fn contradicted_findings(means: &SpeciesMeans) -> Vec<&'static str> {
    let checks = [
        setosa_smallest_petals(means),
        virginica_largest(means),
        versicolor_intermediate(means),
        sepal_width_most_consistent(means),
    ];
    FINDINGS
        .into_iter()
        .zip(checks)
        .filter(|(_, holds)| *holds == Some(false))
        .map(|(finding, _)| finding)
        .collect()
}

fn extreme_is(means: &SpeciesMeans, target: Species, m: Measurement, smallest: bool) -> Option<bool> {
    let value = means.get(target, m)?;
    Some(means.species().filter(|&sp| sp != target).all(|sp| {
        let other = means.get(sp, m).unwrap_or(f64::NAN);
        if smallest {
            value < other
        } else {
            value > other
        }
    }))
}

fn setosa_smallest_petals(means: &SpeciesMeans) -> Option<bool> {
    let length = extreme_is(means, Species::Setosa, Measurement::PetalLength, true)?;
    let width = extreme_is(means, Species::Setosa, Measurement::PetalWidth, true)?;
    Some(length && width)
}

fn virginica_largest(means: &SpeciesMeans) -> Option<bool> {
    [Measurement::SepalLength, Measurement::PetalLength, Measurement::PetalWidth]
        .into_iter()
        .map(|m| extreme_is(means, Species::Virginica, m, false))
        .try_fold(true, |acc, holds| Some(acc && holds?))
}

fn versicolor_intermediate(means: &SpeciesMeans) -> Option<bool> {
    let row = |sp: Species| means.rows.get(&sp);
    let (set, ver, vir) = (row(Species::Setosa)?, row(Species::Versicolor)?, row(Species::Virginica)?);

    let between = [Measurement::SepalLength, Measurement::PetalLength, Measurement::PetalWidth]
        .into_iter()
        .all(|m| {
            let i = m.index();
            set[i].min(vir[i]) < ver[i] && ver[i] < set[i].max(vir[i])
        });
    let dist = |a: &[f64; 4], b: &[f64; 4]| -> f64 {
        a.iter().zip(b).map(|(x, y)| (x - y).powi(2)).sum::<f64>().sqrt()
    };
    Some(between && dist(ver, vir) < dist(ver, set))
}

/// Spread of the species means relative to their average, per measurement.
fn sepal_width_most_consistent(means: &SpeciesMeans) -> Option<bool> {
    if means.rows.len() < 2 {
        return None;
    }
    let spread = |m: Measurement| {
        let vals: Vec<f64> = means.rows.values().map(|row| row[m.index()]).collect();
        let lo = vals.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = vals.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let avg = vals.iter().sum::<f64>() / vals.len() as f64;
        (hi - lo) / avg
    };
    let width = spread(Measurement::SepalWidth);
    Some(
        Measurement::ALL
            .into_iter()
            .filter(|&m| m != Measurement::SepalWidth)
            .all(|m| width < spread(m)),
    )
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::config::DatasetSource;
    use crate::data::clean::missing_counts;
    use crate::data::loader::load_dataset;
    use crate::stats::{describe, species_means};

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn preview_shows_first_rows_with_index() {
        let ds = load_dataset(&DatasetSource::Embedded).unwrap();
        let text = render(|out| write_preview(out, &ds, 5));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "First 5 rows of the Iris dataset:");
        assert_eq!(lines.len(), 7);
        assert!(lines[1].contains("sepal_length") && lines[1].ends_with("species"));
        assert!(lines[2].starts_with('0'));
        assert!(lines[2].contains("5.1") && lines[2].ends_with("setosa"));
        assert!(lines[6].starts_with('4') && lines[6].contains("3.6"));
    }

    #[test]
    fn info_lists_non_null_counts() {
        let mut ds = load_dataset(&DatasetSource::Embedded).unwrap();
        ds.records[0].values[1] = None;
        let text = render(|out| write_info(out, &ds));
        assert!(text.contains("Entries: 150 (index 0 to 149)"));
        assert!(text.contains("sepal_width   149 non-null"));
        assert!(text.contains("species       150 non-null"));
        assert!(text.contains("dtypes: f64(4), category(1)"));
    }

    #[test]
    fn missing_section_lists_every_column() {
        let counts = MissingCounts([0, 2, 0, 1]);
        let text = render(|out| write_missing(out, &counts));
        assert_eq!(
            text,
            "\nMissing Values:\nsepal_length  0\nsepal_width   2\npetal_length  0\npetal_width   1\nspecies       0\n"
        );
    }

    #[test]
    fn clean_outcome_branches() {
        let clean = render(|out| write_clean_outcome(out, &CleanOutcome::AlreadyClean));
        assert_eq!(clean, "\nNo missing values found in the dataset.\n");

        let filled = CleanOutcome::Filled {
            counts: MissingCounts([1, 0, 0, 0]),
            fill_values: [Some(5.8), None, None, None],
        };
        let text = render(|out| write_clean_outcome(out, &filled));
        assert!(text.contains("Handling missing values..."));
        assert!(text.contains("Missing values filled with column means."));
        assert!(!text.contains("No missing values"));
    }

    #[test]
    fn statistics_table_has_eight_labelled_rows() {
        let ds = load_dataset(&DatasetSource::Embedded).unwrap();
        let table = describe(&ds).unwrap();
        let text = render(|out| write_statistics(out, &table));
        let lines: Vec<&str> = text.lines().skip(2).collect();
        assert_eq!(lines.len(), 1 + SUMMARY_ROWS.len());
        for (line, name) in lines[1..].iter().zip(SUMMARY_ROWS) {
            assert!(line.starts_with(name), "{line}");
        }
        assert!(lines[1].contains("150.000000"));
        assert!(lines[2].contains("5.843333"));
    }

    #[test]
    fn species_means_rows_are_alphabetical() {
        let ds = load_dataset(&DatasetSource::Embedded).unwrap();
        let text = render(|out| write_species_means(out, &species_means(&ds)));
        let lines: Vec<&str> = text.lines().skip(3).collect();
        assert!(lines[0].starts_with("setosa") && lines[0].contains("5.006"));
        assert!(lines[1].starts_with("versicolor") && lines[1].contains("4.260"));
        assert!(lines[2].starts_with("virginica") && lines[2].contains("2.026"));
    }

    #[test]
    fn findings_hold_for_the_iris_data() {
        let ds = load_dataset(&DatasetSource::Embedded).unwrap();
        assert_eq!(missing_counts(&ds).total(), 0);
        let means = species_means(&ds);
        assert!(contradicted_findings(&means).is_empty());

        let text = render(|out| write_findings(out, &means));
        for line in FINDINGS {
            assert!(text.contains(line));
        }
    }

    #[test]
    fn swapped_species_contradict_findings_but_text_is_unchanged() {
        let mut rows = BTreeMap::new();
        rows.insert(Species::Setosa, [6.6, 3.0, 5.6, 2.0]);
        rows.insert(Species::Versicolor, [5.9, 2.8, 4.3, 1.3]);
        rows.insert(Species::Virginica, [5.0, 3.4, 1.5, 0.2]);
        let means = SpeciesMeans { rows };

        let contradicted = contradicted_findings(&means);
        assert!(contradicted.contains(&FINDINGS[0]));
        assert!(contradicted.contains(&FINDINGS[1]));
        assert!(!contradicted.contains(&FINDINGS[3]));

        let text = render(|out| write_findings(out, &means));
        assert_eq!(text.lines().count(), 1 + 1 + FINDINGS.len());
    }

    #[test]
    fn observations_are_fixed_text() {
        let text = render(|out| write_observations(out));
        assert!(text.starts_with("\nVisualization Observations:\n"));
        assert!(text.ends_with(&format!("{}\n", OBSERVATIONS[3])));
    }
}
