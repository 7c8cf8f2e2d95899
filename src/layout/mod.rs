//! Layout orchestrator: search, then resolve.
//!
//! Downstream renderers import [`layout`] and the [`Layout`] result from here
//! while the implementation lives in the private `core` module.

mod core;

pub use core::{Layout, layout, resolve_single, resolve_two_tier};
