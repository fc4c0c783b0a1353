/// Data layer: core types, loading, and the species filter.
///
/// Architecture:
/// ```text
///  bundled csv / .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → PenguinDataset (once, at startup)
///   └──────────┘
///        │
///        ▼
///   ┌────────────────┐
///   │ PenguinDataset │  Vec<PenguinRecord>, immutable, shared via Arc
///   └────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  species membership → derived view
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
