//! Driver-facing adapters for the dashboard: the MySQL backend and the
//! result-set export helpers.

pub mod export;
pub mod mysql;
