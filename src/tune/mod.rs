//! Tuning-table construction.
//!
//! `builder` holds the single-pass routine that reconciles the model-output
//! tables into one normalized tuning table.

pub mod builder;

pub use builder::*;
