//! Two-tier search: find a center margin and a set of deferred branch
//! children so that both the inner ring and the outer ring fit.

mod core;

pub use core::{TwoTier, align_with_branches, outer_ring_options};
