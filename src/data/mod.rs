/// Data layer: loading, derivation, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → RawTable (untyped cells)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  derive   │  schema check, win flag, minutes, tier, mastery bin
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ EnrichedTable │  cached behind an Arc by `cache`
///   └──────────────┘
///        │
///        ▼
///   ┌───────────┐
///   │  filter    │  FilterSelection → matching row indices
///   └───────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  group + mean → AggregateResult / Headline
///   └───────────┘
/// ```

pub mod aggregate;
pub mod bins;
pub mod cache;
pub mod derive;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;

#[cfg(test)]
pub(crate) mod test_support;
