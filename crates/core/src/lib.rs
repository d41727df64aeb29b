//! Domain logic for the gemdash jewellery-business dashboard.
//!
//! Everything that talks to a terminal lives in `gemdash-tui`; everything
//! that talks to a database driver lives in `gemdash-adapters`. This crate
//! owns the report catalog, parameter validation, query execution over a
//! backend trait, result materialization and the action dispatch loop.

pub mod activity_log;
pub mod config;
pub mod connection;
pub mod dispatcher;
pub mod executor;
pub mod materialize;
pub mod presenter;
pub mod report;
pub mod value;
