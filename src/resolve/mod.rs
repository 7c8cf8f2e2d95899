//! Coordinate resolution: turns side assignments into rectangles, per-side
//! anchors and absolute block positions.
//!
//! The functions are order dependent. The first-layer rect comes first, then
//! side placement against it; a second ring needs the first ring's anchors
//! to size its own rect before it can be placed in turn.

mod core;

pub use core::{
    Placement, Ring, first_layer_rect, place_sides, second_layer_rect, view_box,
};
