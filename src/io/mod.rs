//! Input/output helpers.
//!
//! - parsed model-output JSON loading (`model`)
//! - `suggested_tuning.ss` writing (`export`)

pub mod export;
pub mod model;

pub use export::*;
pub use model::*;
