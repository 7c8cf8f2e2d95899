use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};
use crate::logging::Logger;
use crate::sides::{Side, Sides};

/// Increment between center margins tried by the two-tier search.
pub const MARGIN_STEP: f64 = 10.0;

/// Upper end of the margin search when the caller does not bound it.
pub const DEFAULT_MAX_CENTER_MARGIN: f64 = 10_000.0;

/// Per-side capacity rule. Serialized as `true` (auto), `false` (disabled)
/// or a number (explicit capacity).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "RawSideSetting", into = "RawSideSetting")]
pub enum SideSetting {
    /// Center dimension plus the center margin on both ends.
    #[default]
    Auto,
    Disabled,
    Capacity(f64),
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawSideSetting {
    Flag(bool),
    Capacity(f64),
}

impl From<RawSideSetting> for SideSetting {
    fn from(raw: RawSideSetting) -> Self {
        match raw {
            RawSideSetting::Flag(true) => SideSetting::Auto,
            RawSideSetting::Flag(false) => SideSetting::Disabled,
            RawSideSetting::Capacity(value) => SideSetting::Capacity(value),
        }
    }
}

impl From<SideSetting> for RawSideSetting {
    fn from(setting: SideSetting) -> Self {
        match setting {
            SideSetting::Auto => RawSideSetting::Flag(true),
            SideSetting::Disabled => RawSideSetting::Flag(false),
            SideSetting::Capacity(value) => RawSideSetting::Capacity(value),
        }
    }
}

impl SideSetting {
    pub fn enabled(flag: bool) -> Self {
        if flag {
            SideSetting::Auto
        } else {
            SideSetting::Disabled
        }
    }

    /// Capacity for a side whose center dimension is `center_length`.
    pub fn capacity(self, center_length: f64, center_margin: f64) -> f64 {
        match self {
            SideSetting::Auto => center_length + center_margin * 2.0,
            SideSetting::Disabled => 0.0,
            SideSetting::Capacity(value) => value,
        }
    }
}

/// Options for a single side-assignment pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AlignOptions {
    /// Gap between the center and the ring; pads every auto capacity.
    pub center_margin: f64,
    /// Gap between consecutive blocks on a side.
    pub children_margin: f64,
    #[serde(flatten)]
    pub sides: Sides<SideSetting>,
}

impl Default for AlignOptions {
    fn default() -> Self {
        Self {
            center_margin: 0.0,
            children_margin: 0.0,
            sides: Sides::default(),
        }
    }
}

impl AlignOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_center_margin(mut self, margin: f64) -> Self {
        self.center_margin = margin;
        self
    }

    pub fn with_children_margin(mut self, margin: f64) -> Self {
        self.children_margin = margin;
        self
    }

    pub fn with_side(mut self, side: Side, setting: SideSetting) -> Self {
        self.sides[side] = setting;
        self
    }

    pub fn validate(&self) -> Result<()> {
        non_negative("centerMargin", self.center_margin)?;
        non_negative("childrenMargin", self.children_margin)?;
        for (side, setting) in self.sides.iter() {
            if let SideSetting::Capacity(value) = setting {
                non_negative(side.name(), *value)?;
            }
        }
        Ok(())
    }
}

/// Options for the two-tier search.
///
/// `center_margin`, when set, pins the search to that single margin;
/// otherwise every margin from `min_center_margin` to `max_center_margin`
/// in steps of [`MARGIN_STEP`] is tried.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchOptions {
    pub children_margin: f64,
    #[serde(flatten)]
    pub sides: Sides<SideSetting>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center_margin: Option<f64>,
    pub min_center_margin: f64,
    pub max_center_margin: f64,
    #[serde(skip)]
    pub logger: Option<Logger>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            children_margin: 0.0,
            sides: Sides::default(),
            center_margin: None,
            min_center_margin: 0.0,
            max_center_margin: DEFAULT_MAX_CENTER_MARGIN,
            logger: None,
        }
    }
}

impl std::fmt::Debug for SearchOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchOptions")
            .field("children_margin", &self.children_margin)
            .field("sides", &self.sides)
            .field("center_margin", &self.center_margin)
            .field("min_center_margin", &self.min_center_margin)
            .field("max_center_margin", &self.max_center_margin)
            .field("logger", &self.logger.is_some())
            .finish()
    }
}

impl SearchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let options: SearchOptions = serde_json::from_str(raw)?;
        options.validate()?;
        Ok(options)
    }

    pub fn with_children_margin(mut self, margin: f64) -> Self {
        self.children_margin = margin;
        self
    }

    pub fn with_side(mut self, side: Side, setting: SideSetting) -> Self {
        self.sides[side] = setting;
        self
    }

    pub fn with_center_margin(mut self, margin: f64) -> Self {
        self.center_margin = Some(margin);
        self
    }

    pub fn with_margin_range(mut self, min: f64, max: f64) -> Self {
        self.center_margin = None;
        self.min_center_margin = min;
        self.max_center_margin = max;
        self
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn validate(&self) -> Result<()> {
        non_negative("childrenMargin", self.children_margin)?;
        for (side, setting) in self.sides.iter() {
            if let SideSetting::Capacity(value) = setting {
                non_negative(side.name(), *value)?;
            }
        }
        match self.center_margin {
            Some(margin) => non_negative("centerMargin", margin),
            None => {
                let (min, max) = (self.min_center_margin, self.max_center_margin);
                let bounded = min.is_finite() && max.is_finite();
                if !bounded || min < 0.0 || min > max {
                    return Err(LayoutError::InvalidMarginRange { min, max });
                }
                Ok(())
            }
        }
    }

    /// Center margins in the order the search tries them.
    pub fn margins(&self) -> impl Iterator<Item = f64> {
        let (start, end) = match self.center_margin {
            Some(margin) => (margin, margin),
            None => (self.min_center_margin, self.max_center_margin),
        };
        (0u64..)
            .map(move |step| start + step as f64 * MARGIN_STEP)
            .take_while(move |margin| *margin <= end)
    }

    /// Engine options for one attempt at `center_margin`.
    pub fn align_options(&self, center_margin: f64) -> AlignOptions {
        AlignOptions {
            center_margin,
            children_margin: self.children_margin,
            sides: self.sides,
        }
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(LayoutError::InvalidOption { name, value })
    }
}
