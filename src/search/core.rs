use serde::Serialize;
use serde_json::Value;

use crate::align::align_unchecked;
use crate::block::{self, Block};
use crate::config::{AlignOptions, SearchOptions, SideSetting};
use crate::error::{LayoutError, Result};
use crate::logging::{LogLevel, Logger, event_with_fields, json_kv, json_str};
use crate::metrics::SearchMetrics;
use crate::sides::SideAssignment;

const LOG_TARGET: &str = "orbit::search";

/// Successful outcome of [`align_with_branches`].
#[derive(Debug, Clone, Serialize)]
pub struct TwoTier<'a> {
    pub inner: SideAssignment<'a>,
    /// Deferred branch children; `None` when nothing had to be deferred.
    pub outer: Option<SideAssignment<'a>>,
    /// Center margin the placement succeeded at.
    pub center_margin: f64,
    /// Number of leading branch children moved to the outer ring.
    pub deferred: usize,
    #[serde(skip)]
    pub metrics: SearchMetrics,
}

/// Place `children` in up to two rings around `center`.
///
/// For every center margin in the configured range, partitions are tried in
/// order of increasing deferral: nothing deferred, then the first branch,
/// then the first two, and so on. The first partition whose inner ring fits
/// and whose deferred branches fit on the inner ring's leaf-only sides wins.
pub fn align_with_branches<'a>(
    center: &Block,
    children: impl IntoIterator<Item = &'a Block>,
    options: &SearchOptions,
) -> Result<TwoTier<'a>> {
    let children: Vec<&'a Block> = children.into_iter().collect();
    options.validate()?;
    block::validate(center, children.iter().copied())?;

    let partitions = partitions(&children);
    let logger = options.logger.as_ref();
    let mut metrics = SearchMetrics::new();

    for margin in options.margins() {
        metrics.record_margin();
        emit(logger, LogLevel::Trace, "margin_started", [json_kv("center_margin", margin)]);

        let inner_options = options.align_options(margin);

        for (deferred, (inner_set, outer_set)) in partitions.iter().enumerate() {
            let inner = match align_unchecked(center, inner_set, &inner_options) {
                Ok(inner) => inner,
                Err(LayoutError::NoSpace) => {
                    metrics.record_inner(false);
                    emit(
                        logger,
                        LogLevel::Trace,
                        "inner_no_space",
                        [json_kv("center_margin", margin), json_kv("deferred", deferred)],
                    );
                    continue;
                }
                Err(err) => return Err(err),
            };
            metrics.record_inner(true);

            if outer_set.is_empty() {
                return Ok(finish(logger, inner, None, margin, deferred, metrics));
            }

            let outer_options = outer_ring_options(&inner, &inner_options);
            match align_unchecked(center, outer_set, &outer_options) {
                Ok(outer) => {
                    metrics.record_outer(true);
                    return Ok(finish(logger, inner, Some(outer), margin, deferred, metrics));
                }
                Err(LayoutError::NoSpace) => {
                    metrics.record_outer(false);
                    emit(
                        logger,
                        LogLevel::Trace,
                        "outer_no_space",
                        [
                            json_kv("center_margin", margin),
                            json_kv("deferred", deferred),
                            json_str("open_sides", open_sides(&outer_options)),
                        ],
                    );
                }
                Err(err) => return Err(err),
            }
        }
    }

    if let Some(logger) = logger {
        let mut event = metrics.snapshot().to_log_event(LOG_TARGET);
        event.level = LogLevel::Warn;
        event.message = "search_exhausted".to_string();
        let _ = logger.log_event(event);
    }
    Err(LayoutError::MaxCenterMargin)
}

/// Options for the outer ring. A side is usable only when the inner ring
/// occupies it with leaves alone; a branch there owns that direction for its
/// own subtree.
pub fn outer_ring_options(inner: &SideAssignment<'_>, inner_options: &AlignOptions) -> AlignOptions {
    AlignOptions {
        center_margin: inner_options.center_margin,
        children_margin: inner_options.children_margin,
        sides: inner.clone().map(|_, group| {
            SideSetting::enabled(group.length > 0.0 && group.is_all_leaves())
        }),
    }
}

fn open_sides(options: &AlignOptions) -> String {
    options
        .sides
        .iter()
        .filter(|(_, setting)| **setting != SideSetting::Disabled)
        .map(|(side, _)| side.name())
        .collect::<Vec<_>>()
        .join(",")
}

type Partition<'a> = (Vec<&'a Block>, Vec<&'a Block>);

fn partitions<'a>(children: &[&'a Block]) -> Vec<Partition<'a>> {
    let branches: Vec<&'a Block> = children
        .iter()
        .copied()
        .filter(|child| child.is_branch())
        .collect();

    (0..=branches.len())
        .map(|deferred| {
            let outer = branches[..deferred].to_vec();
            let inner = children
                .iter()
                .copied()
                .filter(|child| !outer.iter().any(|branch| std::ptr::eq(*branch, *child)))
                .collect();
            (inner, outer)
        })
        .collect()
}

fn finish<'a>(
    logger: Option<&Logger>,
    inner: SideAssignment<'a>,
    outer: Option<SideAssignment<'a>>,
    center_margin: f64,
    deferred: usize,
    metrics: SearchMetrics,
) -> TwoTier<'a> {
    if let Some(logger) = logger {
        let mut event = metrics.snapshot().to_log_event(LOG_TARGET);
        event.message = "search_succeeded".to_string();
        event.fields.insert("center_margin".to_string(), center_margin.into());
        event.fields.insert("deferred".to_string(), deferred.into());
        let _ = logger.log_event(event);
    }
    TwoTier {
        inner,
        outer,
        center_margin,
        deferred,
        metrics,
    }
}

fn emit<const N: usize>(
    logger: Option<&Logger>,
    level: LogLevel,
    message: &str,
    fields: [(String, Value); N],
) {
    if let Some(logger) = logger.filter(|logger| logger.enabled(level)) {
        let _ = logger.log_event(event_with_fields(level, LOG_TARGET, message, fields));
    }
}
