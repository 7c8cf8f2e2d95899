use crate::accumulator::Accumulator;
use crate::block::{self, Block};
use crate::config::AlignOptions;
use crate::error::{LayoutError, Result};
use crate::sides::{Side, SideAssignment, Sides};

type Accumulators<'a> = Sides<Accumulator<'a>>;

/// Distribute `children` around `center`.
///
/// Strategies are tried in a fixed order and the first that places every
/// child wins: a lone usable side takes everything, then bottom takes the
/// whole list, then left/right are filled in balance with bottom catching
/// the tail, and finally top is seeded one child at a time before retrying
/// the balanced fill. Either every child is placed or `NoSpace` is returned.
pub fn align<'a>(
    center: &Block,
    children: impl IntoIterator<Item = &'a Block>,
    options: &AlignOptions,
) -> Result<SideAssignment<'a>> {
    let children: Vec<&'a Block> = children.into_iter().collect();
    options.validate()?;
    block::validate(center, children.iter().copied())?;
    align_unchecked(center, &children, options)
}

/// [`align`] without input validation, for callers that already checked.
pub fn align_unchecked<'a>(
    center: &Block,
    children: &[&'a Block],
    options: &AlignOptions,
) -> Result<SideAssignment<'a>> {
    let mut sides = accumulators(center, options);

    let enabled: Vec<Side> = Side::ALL
        .into_iter()
        .filter(|side| sides[*side].is_enabled())
        .collect();

    match enabled.as_slice() {
        [] => return Err(LayoutError::NoSpace),
        [only] => {
            return if sides[*only].try_insert_batch(children) {
                Ok(freeze(sides))
            } else {
                Err(LayoutError::NoSpace)
            };
        }
        _ => {}
    }

    if sides.bottom.try_insert_batch(children) {
        return Ok(freeze(sides));
    }

    if fill_left_right(children, &mut sides, 0) == children.len() {
        return Ok(freeze(sides));
    }

    seed_top(children, &mut sides)?;
    Ok(freeze(sides))
}

fn accumulators<'a>(center: &Block, options: &AlignOptions) -> Accumulators<'a> {
    Sides::from_fn(|side| {
        let axis = side.axis();
        let capacity = options.sides[side].capacity(center.length(axis), options.center_margin);
        Accumulator::new(axis, capacity, options.children_margin)
    })
}

fn freeze(sides: Accumulators<'_>) -> SideAssignment<'_> {
    sides.map(|_, acc| acc.into_group())
}

/// Place children from `start` on whichever of left/right is shorter (left on
/// ties), falling back to the other one. When both refuse, the remaining tail
/// goes to bottom as one batch. Returns the index of the first unplaced child.
fn fill_left_right<'a>(children: &[&'a Block], sides: &mut Accumulators<'a>, start: usize) -> usize {
    let len = children.len();
    let mut index = start;

    while index < len {
        let child = children[index];
        let (first, second) = if sides.left.used() <= sides.right.used() {
            (Side::Left, Side::Right)
        } else {
            (Side::Right, Side::Left)
        };

        if sides[first].try_insert(child) || sides[second].try_insert(child) {
            index += 1;
            continue;
        }
        break;
    }

    if index < len && sides.bottom.try_insert_batch(&children[index..]) {
        index = len;
    }

    index
}

/// Grow top one child at a time, re-running the balanced fill on the rest
/// after each addition. Top is never cleared; everything else is.
fn seed_top<'a>(children: &[&'a Block], sides: &mut Accumulators<'a>) -> Result<()> {
    let len = children.len();

    for (index, &child) in children.iter().enumerate() {
        sides.left.reset();
        sides.right.reset();
        sides.bottom.reset();

        if !sides.top.try_insert(child) {
            return Err(LayoutError::NoSpace);
        }

        let next = index + 1;
        if next == len || fill_left_right(children, sides, next) == len {
            return Ok(());
        }
    }

    Ok(())
}
