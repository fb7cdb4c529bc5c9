//! Core domain layer for the sales dashboard pipeline.
//!
//! Holds the transaction model, column configuration, value parsing
//! (day-first dates, BRL-formatted amounts), quarter-label handling,
//! display formatting and the shared error type.

pub mod columns;
pub mod error;
pub mod formatting;
pub mod models;
pub mod parse;
pub mod quarter;
pub mod settings;
