use crate::error::{LayoutError, Result};

/// Split `outer` items into the `inner + 1` gaps around `inner` slots.
///
/// When the counts match every outer item pairs with one slot and the
/// trailing gap stays empty. Otherwise each gap gets an equal share and the
/// remainder is handed out from the middle gap outwards, right before left.
pub fn outer_mask(outer: usize, inner: usize) -> Result<Vec<usize>> {
    if inner > outer {
        return Err(LayoutError::MaskOverflow { outer, inner });
    }

    if outer == inner {
        let mut mask = vec![1; outer];
        mask.push(0);
        return Ok(mask);
    }

    let gaps = inner + 1;
    let mut mask = vec![outer / gaps; gaps];
    let remainder = outer % gaps;

    let middle = gaps.div_ceil(2) - 1;
    for step in 0..remainder {
        // middle, middle + 1, middle - 1, middle + 2, ...
        let offset = step.div_ceil(2);
        let index = if step % 2 == 1 {
            middle + offset
        } else {
            middle - offset
        };
        mask[index] += 1;
    }

    Ok(mask)
}
