use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::{LayoutError, Result};
use crate::geometry::{Axis, Size};

/// Opaque caller data carried alongside a block.
pub type Payload = Map<String, Value>;

/// Rectangular box supplied by the tree-construction collaborator.
///
/// The engine only reads `width`, `height` and whether `children` is empty;
/// everything else rides along in `payload` untouched. A `null` children
/// list marks a leaf, and a missing size reads as zero so bare `{}` markers
/// can flag a branch. Zero-sized blocks are rejected only when they are
/// placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub children: Vec<Block>,
    #[serde(flatten)]
    pub payload: Payload,
}

impl Block {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            children: Vec::new(),
            payload: Payload::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<Block>) -> Self {
        self.children = children;
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.payload.insert(key.into(), value.into());
        self
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn length(&self, axis: Axis) -> f64 {
        axis.of(self.size())
    }

    /// A branch roots a further subtree that needs its own placement pass.
    pub fn is_branch(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn is_valid(&self) -> bool {
        is_positive(self.width) && is_positive(self.height)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<Block>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Block>>::deserialize(deserializer)?.unwrap_or_default())
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Reject blocks with non-finite or non-positive dimensions. The center is
/// reported as index 0 and children from index 1.
pub(crate) fn validate<'a>(
    center: &Block,
    children: impl IntoIterator<Item = &'a Block>,
) -> Result<()> {
    check(0, center)?;
    for (index, block) in children.into_iter().enumerate() {
        check(index + 1, block)?;
    }
    Ok(())
}

fn check(index: usize, block: &Block) -> Result<()> {
    if block.is_valid() {
        return Ok(());
    }
    Err(LayoutError::InvalidBlock {
        index,
        width: block.width,
        height: block.height,
    })
}
