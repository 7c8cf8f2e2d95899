//! Side-assignment engine: distributes children across the four sides of a
//! center block or reports that they cannot fit.

mod core;

pub use core::{align, align_unchecked};
