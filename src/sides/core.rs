use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use crate::block::Block;
use crate::geometry::{Axis, Size};

/// One of the four placement zones around the center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

impl Side {
    /// Priority order used when only one side is usable.
    pub const ALL: [Side; 4] = [Side::Left, Side::Right, Side::Top, Side::Bottom];

    /// Left and right stack blocks vertically, top and bottom horizontally.
    pub fn axis(self) -> Axis {
        match self {
            Side::Left | Side::Right => Axis::Height,
            Side::Top | Side::Bottom => Axis::Width,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
            Side::Top => "top",
            Side::Bottom => "bottom",
        }
    }
}

/// Four-way record keyed by [`Side`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Sides<T> {
    #[serde(default)]
    pub left: T,
    #[serde(default)]
    pub right: T,
    #[serde(default)]
    pub top: T,
    #[serde(default)]
    pub bottom: T,
}

impl<T> Sides<T> {
    pub fn from_fn(mut f: impl FnMut(Side) -> T) -> Self {
        Self {
            left: f(Side::Left),
            right: f(Side::Right),
            top: f(Side::Top),
            bottom: f(Side::Bottom),
        }
    }

    pub fn map<U>(self, mut f: impl FnMut(Side, T) -> U) -> Sides<U> {
        Sides {
            left: f(Side::Left, self.left),
            right: f(Side::Right, self.right),
            top: f(Side::Top, self.top),
            bottom: f(Side::Bottom, self.bottom),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Side, &T)> {
        Side::ALL.into_iter().map(move |side| (side, &self[side]))
    }
}

impl<T> Index<Side> for Sides<T> {
    type Output = T;

    fn index(&self, side: Side) -> &T {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
            Side::Top => &self.top,
            Side::Bottom => &self.bottom,
        }
    }
}

impl<T> IndexMut<Side> for Sides<T> {
    fn index_mut(&mut self, side: Side) -> &mut T {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
            Side::Top => &mut self.top,
            Side::Bottom => &mut self.bottom,
        }
    }
}

/// Blocks assigned to one side, in placement order, with the group's
/// measured extent frozen at the end of assignment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SideGroup<'a> {
    pub axis: Axis,
    pub blocks: Vec<&'a Block>,
    /// Primary-axis length consumed, margins between blocks included.
    pub length: f64,
    /// Largest cross-axis dimension among the blocks.
    pub extent: f64,
}

impl<'a> SideGroup<'a> {
    pub fn empty(axis: Axis) -> Self {
        Self {
            axis,
            blocks: Vec::new(),
            length: 0.0,
            extent: 0.0,
        }
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn size(&self) -> Size {
        match self.axis {
            Axis::Width => Size::new(self.length, self.extent),
            Axis::Height => Size::new(self.extent, self.length),
        }
    }

    pub fn width(&self) -> f64 {
        self.size().width
    }

    pub fn height(&self) -> f64 {
        self.size().height
    }

    pub fn first(&self) -> Option<&'a Block> {
        self.blocks.first().copied()
    }

    pub fn last(&self) -> Option<&'a Block> {
        self.blocks.last().copied()
    }

    pub fn contains(&self, block: &Block) -> bool {
        self.blocks.iter().any(|held| std::ptr::eq(*held, block))
    }

    pub fn is_all_leaves(&self) -> bool {
        self.blocks.iter().all(|block| block.is_leaf())
    }
}

/// Complete distribution of children across the four sides.
pub type SideAssignment<'a> = Sides<SideGroup<'a>>;

impl<'a> SideAssignment<'a> {
    pub fn side_of(&self, block: &Block) -> Option<Side> {
        Side::ALL
            .into_iter()
            .find(|side| self[*side].contains(block))
    }

    pub fn block_count(&self) -> usize {
        self.iter().map(|(_, group)| group.len()).sum()
    }

    pub fn used_sides(&self) -> impl Iterator<Item = Side> + '_ {
        self.iter()
            .filter(|(_, group)| !group.is_empty())
            .map(|(side, _)| side)
    }
}
