use thiserror::Error;

/// Unified result type for the orbit layout crate.
pub type Result<T> = std::result::Result<T, LayoutError>;

/// Errors surfaced by the placement engine.
///
/// `NoSpace` and `MaxCenterMargin` are ordinary placement outcomes; the
/// remaining variants reject malformed input before any attempt is made.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("children do not fit on the available sides")]
    NoSpace,
    #[error("center margin range exhausted without a feasible placement")]
    MaxCenterMargin,
    #[error("block #{index} has invalid size {width}x{height}")]
    InvalidBlock { index: usize, width: f64, height: f64 },
    #[error("option `{name}` must be finite and non-negative, got {value}")]
    InvalidOption { name: &'static str, value: f64 },
    #[error("center margin range {min}..={max} is empty or unbounded")]
    InvalidMarginRange { min: f64, max: f64 },
    #[error("outer ({outer}) must be greater or equal to inner ({inner})")]
    MaskOverflow { outer: usize, inner: usize },
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LayoutError {
    /// Wire tag for the two placement outcomes, `None` for input errors.
    pub fn kind(&self) -> Option<&'static str> {
        match self {
            LayoutError::NoSpace => Some("no_space"),
            LayoutError::MaxCenterMargin => Some("max_center_margin"),
            _ => None,
        }
    }

    pub fn is_placement(&self) -> bool {
        self.kind().is_some()
    }
}
