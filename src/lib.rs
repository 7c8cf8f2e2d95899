//! Four-side box placement around a central rectangle.
//!
//! Children are distributed across the left, right, top and bottom of a
//! center block under per-side length budgets ([`align`]). Branch children
//! can be deferred to a second ring by the two-tier search
//! ([`align_with_branches`]), and the resulting assignments are resolved to
//! absolute coordinates and a view box ([`layout`]). Rendering is left to the
//! caller.

pub mod accumulator;
pub mod align;
pub mod block;
pub mod config;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod logging;
pub mod mask;
pub mod metrics;
pub mod resolve;
pub mod search;
pub mod sides;

pub use accumulator::Accumulator;
pub use align::align;
pub use block::{Block, Payload};
pub use config::{
    AlignOptions, DEFAULT_MAX_CENTER_MARGIN, MARGIN_STEP, SearchOptions, SideSetting,
};
pub use error::{LayoutError, Result};
pub use geometry::{Axis, Point, Rect, Size};
pub use layout::{Layout, layout, resolve_single, resolve_two_tier};
pub use logging::{
    FileSink, LogEvent, LogFields, LogLevel, LogSink, Logger, LoggingError, LoggingResult,
    MemorySink,
};
pub use mask::outer_mask;
pub use metrics::{MetricSnapshot, SearchMetrics};
pub use resolve::{Placement, Ring, first_layer_rect, place_sides, second_layer_rect, view_box};
pub use search::{TwoTier, align_with_branches, outer_ring_options};
pub use sides::{Side, SideAssignment, SideGroup, Sides};
