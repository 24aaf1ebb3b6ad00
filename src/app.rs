use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;

use crate::chart;
use crate::config::ReportConfig;
use crate::data::{clean, loader};
use crate::error::ReportError;
use crate::report;
use crate::stats;

// ---------------------------------------------------------------------------
// Report pipeline
// ---------------------------------------------------------------------------

/// One complete run: load, clean, summarise, print, render.
pub struct IrisReport {
    pub config: ReportConfig,
}

impl IrisReport {
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    /// Write the text report to `out` and the charts to the output directory.
    /// Returns the chart paths. Files written before a failure are kept.
    pub fn run(&self, out: &mut impl Write) -> Result<Vec<PathBuf>, ReportError> {
        let output_dir = &self.config.output_dir;
        fs::create_dir_all(output_dir)
            .with_context(|| format!("creating output directory {}", output_dir.display()))?;

        let mut dataset = loader::load_dataset(&self.config.source)?;

        report::write_preview(out, &dataset, self.config.preview_rows)
            .context("writing dataset preview")?;
        report::write_info(out, &dataset).context("writing dataset info")?;
        report::write_missing(out, &clean::missing_counts(&dataset))
            .context("writing missing-value counts")?;

        let outcome = clean::fill_missing_with_means(&mut dataset)?;
        log::info!("Cleaning outcome: {outcome:?}");
        report::write_clean_outcome(out, &outcome).context("writing cleaning outcome")?;

        let table = stats::describe(&dataset)?;
        report::write_statistics(out, &table).context("writing statistics")?;

        let means = stats::species_means(&dataset);
        report::write_species_means(out, &means).context("writing species means")?;
        report::write_findings(out, &means).context("writing findings")?;

        let paths = chart::render_all(&dataset, &means, output_dir)?;
        report::write_observations(out).context("writing observations")?;

        Ok(paths)
    }
}
