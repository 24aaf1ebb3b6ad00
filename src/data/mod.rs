/// Data layer: core types, loading, and cleaning.
///
/// Architecture:
/// ```text
///  embedded CSV / .csv file
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse rows → IrisDataset
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ IrisDataset │  Vec<IrisRecord>, gaps as None
///   └─────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  clean    │  count gaps, fill with column means
///   └──────────┘
/// ```

pub mod clean;
pub mod loader;
pub mod model;
