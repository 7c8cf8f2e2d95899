use serde::Serialize;

use crate::block::Block;
use crate::config::SearchOptions;
use crate::error::Result;
use crate::geometry::{Point, Rect};
use crate::resolve::{Placement, Ring, first_layer_rect, second_layer_rect};
use crate::search::{TwoTier, align_with_branches};
use crate::sides::SideAssignment;

/// Fully resolved placement of a center and up to two rings of children.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout<'a> {
    pub center: Rect,
    pub inner: Ring<'a>,
    pub outer: Option<Ring<'a>>,
    /// Box covering the center and every group of both rings.
    pub view_box: Rect,
}

impl<'a> Layout<'a> {
    /// Innermost ring first.
    pub fn rings(&self) -> impl Iterator<Item = &Ring<'a>> {
        std::iter::once(&self.inner).chain(self.outer.as_ref())
    }

    pub fn outermost(&self) -> &Ring<'a> {
        self.outer.as_ref().unwrap_or(&self.inner)
    }

    pub fn placements(&self) -> Vec<Placement<'a>> {
        self.rings().flat_map(|ring| ring.placements()).collect()
    }

    /// Content hash of the resolved layout, stable across identical runs.
    pub fn fingerprint(&self) -> Result<blake3::Hash> {
        let mut hasher = blake3::Hasher::new();
        serde_json::to_writer(&mut hasher, self)?;
        Ok(hasher.finalize())
    }
}

/// Resolve a single side assignment around `center`.
pub fn resolve_single<'a>(center: Rect, inner: SideAssignment<'a>, margin: f64) -> Layout<'a> {
    let rect = first_layer_rect(&center, &inner, margin);
    let inner = Ring::new(inner, rect, &center, margin);
    let view_box = inner.view_box().union(&center);
    Layout {
        center,
        inner,
        outer: None,
        view_box,
    }
}

/// Resolve both rings of a two-tier result around `center`.
pub fn resolve_two_tier<'a>(center: Rect, two_tier: TwoTier<'a>, margin: f64) -> Layout<'a> {
    let TwoTier { inner, outer, .. } = two_tier;
    let mut layout = resolve_single(center, inner, margin);

    if let Some(outer) = outer {
        let first = &layout.inner;
        let rect = second_layer_rect(&first.rect, &first.anchors, &first.assignment, &outer, margin);
        let ring = Ring::new(outer, rect, &center, margin);
        layout.view_box = layout.view_box.union(&ring.view_box());
        layout.outer = Some(ring);
    }

    layout
}

/// Search for a two-ring placement of `children` around `center` positioned
/// at `origin` and resolve it to absolute coordinates.
pub fn layout<'a>(
    center: &Block,
    origin: Point,
    children: impl IntoIterator<Item = &'a Block>,
    options: &SearchOptions,
) -> Result<Layout<'a>> {
    let two_tier = align_with_branches(center, children, options)?;
    let center_rect = Rect::at(origin, center.size());
    Ok(resolve_two_tier(center_rect, two_tier, options.children_margin))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::align;
    use crate::config::{AlignOptions, SideSetting};
    use crate::error::LayoutError;
    use crate::sides::Side;

    fn branch(width: f64, height: f64) -> Block {
        Block::new(width, height).with_children(vec![Block::new(8.0, 8.0)])
    }

    fn assert_contained(layout: &Layout<'_>) {
        assert!(layout.view_box.contains(&layout.center));
        for placed in layout.placements() {
            assert!(
                layout.view_box.contains(&placed.rect),
                "{:?} escapes view box {:?}",
                placed.rect,
                layout.view_box
            );
        }
    }

    #[test]
    fn view_box_contains_every_single_ring_block() {
        let center = Block::new(200.0, 100.0);
        let children: Vec<Block> = (1..=7)
            .map(|i| Block::new(30.0 + 10.0 * i as f64, 20.0 + 5.0 * i as f64))
            .collect();
        let options = AlignOptions::new().with_children_margin(4.0);
        let inner = align(&center, &children, &options).unwrap();

        let layout = resolve_single(Rect::new(0.0, 0.0, 200.0, 100.0), inner, 4.0);

        assert_eq!(layout.placements().len(), children.len());
        assert_contained(&layout);
    }

    #[test]
    fn tall_side_group_stays_inside_view_box() {
        let center = Block::new(100.0, 100.0);
        let children: Vec<Block> = (0..3).map(|_| Block::new(10.0, 100.0)).collect();
        let options = AlignOptions::new()
            .with_side(Side::Left, SideSetting::Capacity(300.0))
            .with_side(Side::Right, SideSetting::Disabled)
            .with_side(Side::Top, SideSetting::Disabled)
            .with_side(Side::Bottom, SideSetting::Disabled);
        let inner = align(&center, &children, &options).unwrap();

        let layout = resolve_single(Rect::new(0.0, 0.0, 100.0, 100.0), inner, 0.0);

        assert_eq!(layout.view_box, Rect::new(-10.0, -100.0, 110.0, 300.0));
        assert_contained(&layout);
    }

    #[test]
    fn two_tier_layout_resolves_both_rings() {
        let center = Block::new(100.0, 100.0);
        let children = [
            Block::new(10.0, 60.0),
            Block::new(10.0, 60.0),
            branch(10.0, 110.0),
        ];
        let options = SearchOptions::new()
            .with_side(Side::Top, SideSetting::Disabled)
            .with_side(Side::Bottom, SideSetting::Disabled)
            .with_margin_range(0.0, 100.0);

        let resolved = layout(&center, Point::new(50.0, 50.0), &children, &options).unwrap();

        let outer = resolved.outer.as_ref().expect("outer ring");
        assert!(outer.rect.contains(&resolved.inner.rect));
        assert_eq!(resolved.outermost(), outer);
        assert_eq!(resolved.placements().len(), 3);
        assert!(
            outer.group_rect(Side::Left).right() <= resolved.inner.group_rect(Side::Left).x
        );
        assert_contained(&resolved);
    }

    #[test]
    fn mixed_children_with_margins_stay_contained() {
        let center = Block::new(240.0, 160.0);
        let children: Vec<Block> = (0..12)
            .map(|i| {
                let block = Block::new(40.0 + (i % 4) as f64 * 15.0, 30.0 + (i % 3) as f64 * 20.0);
                if i % 5 == 0 { block.with_children(vec![Block::new(1.0, 1.0)]) } else { block }
            })
            .collect();
        let options = SearchOptions::new()
            .with_children_margin(8.0)
            .with_margin_range(0.0, 200.0);

        let resolved = layout(&center, Point::default(), &children, &options).unwrap();

        assert_eq!(resolved.placements().len(), children.len());
        assert_contained(&resolved);
    }

    #[test]
    fn identical_inputs_give_identical_layouts() {
        let center = Block::new(150.0, 90.0);
        let children: Vec<Block> = (0..8)
            .map(|i| Block::new(25.0 + i as f64 * 9.0, 40.0).with_field("id", i))
            .collect();
        let options = SearchOptions::new().with_children_margin(6.0);

        let first = layout(&center, Point::default(), &children, &options).unwrap();
        let second = layout(&center, Point::default(), &children, &options).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.fingerprint().unwrap(), second.fingerprint().unwrap());

        let moved = layout(&center, Point::new(1.0, 0.0), &children, &options).unwrap();
        assert_ne!(first.fingerprint().unwrap(), moved.fingerprint().unwrap());
    }

    #[test]
    fn center_margin_widens_capacity_without_moving_ring() {
        let center = Block::new(100.0, 100.0);
        let children = [Block::new(150.0, 20.0)];
        let options = SearchOptions::new()
            .with_center_margin(50.0)
            .with_children_margin(0.0);

        let resolved = layout(&center, Point::default(), &children, &options).unwrap();

        let placed = resolved.placements();
        assert_eq!(placed[0].side, Side::Bottom);
        assert_eq!(placed[0].rect.y, resolved.center.bottom());
        assert_eq!(resolved.inner.rect, Rect::new(-25.0, 0.0, 150.0, 100.0));
    }

    #[test]
    fn search_failures_surface_unchanged() {
        let center = Block::new(10.0, 10.0);
        let children = [Block::new(500.0, 500.0)];
        let options = SearchOptions::new().with_center_margin(0.0);

        let err = layout(&center, Point::default(), &children, &options).unwrap_err();
        assert!(matches!(err, LayoutError::MaxCenterMargin));
    }
}
