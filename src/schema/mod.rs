//! Report-table schemas.
//!
//! - generic named-column tables as emitted by the model-output parser (`table`)
//! - version-dependent column adapters for the fields the builder needs
//!   (`conventions`)

pub mod conventions;
pub mod table;

pub use conventions::*;
pub use table::*;
