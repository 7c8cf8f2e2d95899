//! Error types shared across the placement engine.

mod types;

pub use types::{LayoutError, Result};
