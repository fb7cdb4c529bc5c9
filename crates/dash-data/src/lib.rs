//! Data pipeline layer for the sales dashboard.
//!
//! Responsible for loading and cleaning the raw CSV export, aggregating
//! cleaned transactions by the categorical dimensions, computing the KPI
//! set and persisting the intermediate summary files.

pub mod aggregator;
pub mod loader;
pub mod summary;

pub use dash_core as core;
