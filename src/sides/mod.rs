//! Side vocabulary shared by the engine, the search and the resolver.
//!
//! `Sides<T>` is the four-way record every stage passes around: settings on
//! the way in, accumulators while assigning, frozen groups and anchors on the
//! way out.

mod core;

pub use core::{Side, SideAssignment, SideGroup, Sides};
