use serde::Serialize;

use crate::block::Block;
use crate::geometry::{Point, Rect};
use crate::sides::{Side, SideAssignment, SideGroup, Sides};

/// Rectangle the first ring is placed around: the center padded by
/// `margin` on every edge, widened to the broader of the top and bottom
/// groups and kept centered on the center's horizontal midpoint.
///
/// `margin` is the children margin. The center margin only widens side
/// capacities during the search; it never moves the ring outward.
pub fn first_layer_rect(center: &Rect, inner: &SideAssignment<'_>, margin: f64) -> Rect {
    let width = inner.top.width().max(inner.bottom.width()).max(center.width);
    Rect::new(
        center.x + (center.width - width) / 2.0 - margin,
        center.y - margin,
        width + margin * 2.0,
        center.height + margin * 2.0,
    )
}

/// Anchor (top-left corner) of every side group of `sides` around `rect`.
pub fn place_sides(rect: &Rect, center: &Rect, sides: &SideAssignment<'_>) -> Sides<Point> {
    let (left, right, top, bottom) = (&sides.left, &sides.right, &sides.top, &sides.bottom);
    let cx = center.center_x();
    let cy = center.center_y();

    let left_at = Point::new(rect.x - left.width(), beside(rect, cy, left.height()));
    let right_at = Point::new(rect.right(), beside(rect, cy, right.height()));

    let top_y = (left_at.y + first_height(left))
        .min(right_at.y + first_height(right))
        .min(rect.y)
        - top.height();
    let top_at = Point::new(across(rect, cx, top.width()), top_y);

    let bottom_y = if bottom.is_empty() {
        rect.bottom()
    } else {
        (left_at.y + left.height() - last_height(left))
            .max(right_at.y + right.height() - last_height(right))
            .max(rect.bottom())
    };
    let bottom_at = Point::new(across(rect, cx, bottom.width()), bottom_y);

    Sides {
        left: left_at,
        right: right_at,
        top: top_at,
        bottom: bottom_at,
    }
}

// Vertically centered on `rect`; a group taller than `rect` centers on the
// center block instead.
fn beside(rect: &Rect, cy: f64, height: f64) -> f64 {
    let y = rect.y + (rect.height - height) / 2.0;
    if y + height > rect.bottom() {
        cy - height / 2.0
    } else {
        y
    }
}

// Horizontally centered on the center block, clamped into `rect`.
fn across(rect: &Rect, cx: f64, width: f64) -> f64 {
    let x = cx - width / 2.0;
    if x < rect.x {
        rect.x
    } else if x + width > rect.right() {
        rect.right() - width
    } else {
        x
    }
}

fn first_height(group: &SideGroup<'_>) -> f64 {
    group.first().map_or(0.0, |block| block.height)
}

fn last_height(group: &SideGroup<'_>) -> f64 {
    group.last().map_or(0.0, |block| block.height)
}

/// Rectangle the second ring is placed around. It clears the inner ring's
/// left and right groups plus `margin`, starts above the inner ring's
/// highest anchor and ends below its lowest group.
///
/// When the outer top group is narrower than `first`, it can tuck between
/// the first blocks of the inner left and right groups, so their bottoms
/// are used as the upper clearance line instead of their anchors.
pub fn second_layer_rect(
    first: &Rect,
    anchors: &Sides<Point>,
    inner: &SideAssignment<'_>,
    outer: &SideAssignment<'_>,
    margin: f64,
) -> Rect {
    let room = |length: f64| if length > 0.0 { length + margin } else { 0.0 };
    let left_room = room(inner.left.width());
    let right_room = room(inner.right.width());

    let top = if outer.top.width() < first.width {
        (anchors.left.y + first_height(&inner.left))
            .min(anchors.right.y + first_height(&inner.right))
            .min(anchors.top.y)
    } else {
        anchors.left.y.min(anchors.right.y).min(anchors.top.y)
    };
    let y = top - margin;

    let bottom_edge = if inner.bottom.is_empty() {
        first.bottom()
    } else {
        anchors.bottom.y + inner.bottom.height() + margin
    };
    let bottom = (anchors.left.y + inner.left.height() + margin)
        .max(anchors.right.y + inner.right.height() + margin)
        .max(bottom_edge);

    Rect::new(
        first.x - left_room,
        y,
        left_room + first.width + right_room,
        bottom - y,
    )
}

/// Bounding box of every side group of one resolved ring. Empty groups
/// still contribute their anchor point.
pub fn view_box(sides: &SideAssignment<'_>, anchors: &Sides<Point>) -> Rect {
    let mut groups = Side::ALL
        .into_iter()
        .map(|side| Rect::at(anchors[side], sides[side].size()));
    let first = groups.next().unwrap_or_default();
    groups.fold(first, |acc, rect| acc.union(&rect))
}

/// Absolute position of one block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placement<'a> {
    pub side: Side,
    pub rect: Rect,
    pub block: &'a Block,
}

/// One fully resolved ring of blocks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ring<'a> {
    pub assignment: SideAssignment<'a>,
    /// Rectangle the ring is placed around.
    pub rect: Rect,
    pub anchors: Sides<Point>,
    /// Gap between consecutive blocks within a group.
    pub margin: f64,
}

impl<'a> Ring<'a> {
    pub fn new(assignment: SideAssignment<'a>, rect: Rect, center: &Rect, margin: f64) -> Self {
        let anchors = place_sides(&rect, center, &assignment);
        Self {
            assignment,
            rect,
            anchors,
            margin,
        }
    }

    pub fn group_rect(&self, side: Side) -> Rect {
        Rect::at(self.anchors[side], self.assignment[side].size())
    }

    pub fn view_box(&self) -> Rect {
        view_box(&self.assignment, &self.anchors)
    }

    /// Every block's rectangle. Left groups hug the ring rect from outside
    /// (right-aligned), right groups left-aligned, top groups sit on their
    /// bottom edge and bottom groups hang from their top edge.
    pub fn placements(&self) -> Vec<Placement<'a>> {
        let mut out = Vec::with_capacity(self.assignment.block_count());

        for side in Side::ALL {
            let group = &self.assignment[side];
            let anchor = self.anchors[side];
            let mut cursor = 0.0;

            for &block in &group.blocks {
                let (x, y) = match side {
                    Side::Left => (anchor.x + group.width() - block.width, anchor.y + cursor),
                    Side::Right => (anchor.x, anchor.y + cursor),
                    Side::Top => (anchor.x + cursor, anchor.y + group.height() - block.height),
                    Side::Bottom => (anchor.x + cursor, anchor.y),
                };
                out.push(Placement {
                    side,
                    rect: Rect::new(x, y, block.width, block.height),
                    block,
                });
                cursor += block.length(group.axis) + self.margin;
            }
        }

        out
    }
}
