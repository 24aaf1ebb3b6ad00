use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Report configuration
// ---------------------------------------------------------------------------

/// Where the Iris table comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DatasetSource {
    /// The copy compiled into the binary from `data/iris.csv`.
    #[default]
    Embedded,
    /// A CSV file on disk with the same header. Only tests build this one.
    #[allow(dead_code)]
    File(PathBuf),
}

/// Fixed run parameters. The binary never reads these from the outside world;
/// it always runs with [`ReportConfig::default`].
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Directory the four chart images are written into.
    pub output_dir: PathBuf,
    pub source: DatasetSource,
    /// Rows shown in the dataset preview.
    pub preview_rows: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("plots"),
            source: DatasetSource::Embedded,
            preview_rows: 5,
        }
    }
}
