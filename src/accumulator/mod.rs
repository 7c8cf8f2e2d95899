//! Capacity-bounded per-side container used while assigning blocks.

mod core;

pub use core::Accumulator;
