/// Data layer: core types, loading, filtering, and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  parse + validate → OrdersDataset (once per process)
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ OrdersDataset │  Vec<OrderRecord>, unique filter values
///   └───────────────┘
///        │
///        ▼
///   ┌──────────┐      ┌───────────┐
///   │  filter  │ ───▶ │ aggregate │  KPIs + hypothesis views
///   └──────────┘      └───────────┘
/// ```
pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
