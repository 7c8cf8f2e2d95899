use crate::block::Block;
use crate::geometry::Axis;
use crate::sides::SideGroup;

/// Blocks held by one side while an assignment is being built.
///
/// Blocks are measured along `axis` and separated by `margin`, so `n` held
/// blocks consume `sum(lengths) + margin * (n - 1)`. Identity is pointer
/// identity: the same borrowed block is never held twice.
#[derive(Debug, Clone)]
pub struct Accumulator<'a> {
    axis: Axis,
    capacity: f64,
    margin: f64,
    blocks: Vec<&'a Block>,
    used: f64,
    extent: f64,
}

impl<'a> Accumulator<'a> {
    pub fn new(axis: Axis, capacity: f64, margin: f64) -> Self {
        Self {
            axis,
            capacity,
            margin,
            blocks: Vec::new(),
            used: 0.0,
            extent: 0.0,
        }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    pub fn set_capacity(&mut self, capacity: f64) {
        self.capacity = capacity;
    }

    /// A side with zero capacity takes no part in the assignment.
    pub fn is_enabled(&self) -> bool {
        self.capacity > 0.0
    }

    pub fn blocks(&self) -> &[&'a Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Primary-axis length consumed so far.
    pub fn used(&self) -> f64 {
        self.used
    }

    /// Largest cross-axis dimension among held blocks.
    pub fn extent(&self) -> f64 {
        self.extent
    }

    pub fn width(&self) -> f64 {
        match self.axis {
            Axis::Width => self.used,
            Axis::Height => self.extent,
        }
    }

    pub fn height(&self) -> f64 {
        match self.axis {
            Axis::Width => self.extent,
            Axis::Height => self.used,
        }
    }

    pub fn contains(&self, block: &Block) -> bool {
        self.blocks.iter().any(|held| std::ptr::eq(*held, block))
    }

    /// Length of `blocks` laid end to end with margins between them.
    pub fn length_of(&self, blocks: &[&Block]) -> f64 {
        if blocks.is_empty() {
            return 0.0;
        }
        let sum: f64 = blocks.iter().map(|block| block.length(self.axis)).sum();
        sum + self.margin * (blocks.len() - 1) as f64
    }

    fn used_with(&self, length: f64) -> f64 {
        if self.blocks.is_empty() {
            length
        } else {
            self.used + self.margin + length
        }
    }

    pub fn can_insert(&self, block: &Block) -> bool {
        self.used_with(block.length(self.axis)) <= self.capacity
    }

    /// The batch is measured as a whole; an empty batch always fits.
    pub fn can_insert_batch(&self, blocks: &[&Block]) -> bool {
        blocks.is_empty() || self.used_with(self.length_of(blocks)) <= self.capacity
    }

    /// Append without a capacity check. Already-held blocks are skipped.
    pub fn insert(&mut self, block: &'a Block) {
        if self.contains(block) {
            return;
        }
        self.used = self.used_with(block.length(self.axis));
        self.extent = self.extent.max(block.length(self.axis.cross()));
        self.blocks.push(block);
    }

    pub fn insert_batch(&mut self, blocks: &[&'a Block]) {
        for &block in blocks {
            self.insert(block);
        }
    }

    pub fn try_insert(&mut self, block: &'a Block) -> bool {
        if !self.can_insert(block) {
            return false;
        }
        self.insert(block);
        true
    }

    /// All-or-nothing: either every block lands or none does.
    pub fn try_insert_batch(&mut self, blocks: &[&'a Block]) -> bool {
        if !self.can_insert_batch(blocks) {
            return false;
        }
        self.insert_batch(blocks);
        true
    }

    pub fn remove(&mut self, block: &Block) -> Option<&'a Block> {
        let index = self
            .blocks
            .iter()
            .position(|held| std::ptr::eq(*held, block))?;
        self.remove_at(index)
    }

    pub fn remove_at(&mut self, index: usize) -> Option<&'a Block> {
        if index >= self.blocks.len() {
            return None;
        }
        let removed = self.blocks.remove(index);
        self.remeasure();
        Some(removed)
    }

    // The cross extent can only be recovered by a full max-reduce.
    fn remeasure(&mut self) {
        let cross = self.axis.cross();
        self.used = self.length_of(&self.blocks);
        self.extent = self
            .blocks
            .iter()
            .map(|block| block.length(cross))
            .fold(0.0, f64::max);
    }

    pub fn reset(&mut self) {
        if self.blocks.is_empty() {
            return;
        }
        self.blocks.clear();
        self.used = 0.0;
        self.extent = 0.0;
    }

    pub fn into_group(self) -> SideGroup<'a> {
        SideGroup {
            axis: self.axis,
            blocks: self.blocks,
            length: self.used,
            extent: self.extent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tall(height: f64) -> Block {
        Block::new(10.0, height)
    }

    #[test]
    fn margin_sits_between_blocks_only() {
        let (a, b, c) = (tall(30.0), tall(20.0), tall(10.0));
        let mut acc = Accumulator::new(Axis::Height, 100.0, 5.0);

        assert!(acc.try_insert(&a));
        assert_eq!(acc.used(), 30.0);
        assert!(acc.try_insert(&b));
        assert_eq!(acc.used(), 55.0);
        assert_eq!(acc.length_of(&[&a, &b, &c]), 70.0);
    }

    #[test]
    fn capacity_is_inclusive() {
        let (a, b) = (tall(50.0), tall(50.0));
        let mut acc = Accumulator::new(Axis::Height, 100.0, 0.0);

        assert!(acc.try_insert(&a));
        assert!(acc.try_insert(&b));
        assert!(!acc.can_insert(&tall(0.5)));
        assert_eq!(acc.used(), acc.capacity());
    }

    #[test]
    fn batch_is_all_or_nothing() {
        let blocks = [tall(40.0), tall(40.0), tall(40.0)];
        let refs: Vec<&Block> = blocks.iter().collect();
        let mut acc = Accumulator::new(Axis::Height, 100.0, 0.0);

        assert!(!acc.try_insert_batch(&refs));
        assert!(acc.is_empty());
        assert!(acc.try_insert_batch(&refs[..2]));
        assert_eq!(acc.len(), 2);
        assert!(acc.try_insert_batch(&[]));
    }

    #[test]
    fn inserting_same_block_twice_is_noop() {
        let a = tall(10.0);
        let mut acc = Accumulator::new(Axis::Height, 100.0, 0.0);

        acc.insert(&a);
        acc.insert(&a);
        assert_eq!(acc.len(), 1);
        assert_eq!(acc.used(), 10.0);
    }

    #[test]
    fn remove_recomputes_extent() {
        let narrow = Block::new(10.0, 20.0);
        let wide = Block::new(60.0, 20.0);
        let mid = Block::new(30.0, 20.0);
        let mut acc = Accumulator::new(Axis::Height, 200.0, 4.0);
        acc.insert_batch(&[&narrow, &wide, &mid]);
        assert_eq!(acc.extent(), 60.0);
        assert_eq!(acc.used(), 68.0);

        let removed = acc.remove(&wide).unwrap();
        assert!(std::ptr::eq(removed, &wide));
        assert_eq!(acc.extent(), 30.0);
        assert_eq!(acc.used(), 44.0);

        assert!(acc.remove_at(5).is_none());
        assert!(acc.remove(&wide).is_none());
        acc.remove_at(0);
        assert_eq!(acc.blocks().len(), 1);
        assert_eq!(acc.width(), 30.0);
    }

    #[test]
    fn reset_matches_fresh_accumulator() {
        let a = tall(10.0);
        let mut acc = Accumulator::new(Axis::Height, 80.0, 2.0);
        acc.reset();
        assert!(acc.is_empty());

        acc.insert(&a);
        acc.reset();
        let fresh = Accumulator::new(Axis::Height, 80.0, 2.0);
        assert_eq!(acc.used(), fresh.used());
        assert_eq!(acc.extent(), fresh.extent());
        assert_eq!(acc.capacity(), fresh.capacity());
        assert!(acc.is_empty());
    }

    #[test]
    fn disabled_side_rejects_everything() {
        let a = Block::new(1.0, 1.0);
        let mut acc = Accumulator::new(Axis::Width, 0.0, 0.0);
        assert!(!acc.is_enabled());
        assert!(!acc.try_insert(&a));
    }

    #[test]
    fn frozen_group_keeps_measurements() {
        let a = Block::new(40.0, 15.0);
        let b = Block::new(20.0, 25.0);
        let mut acc = Accumulator::new(Axis::Width, 100.0, 10.0);
        acc.insert_batch(&[&a, &b]);

        let group = acc.into_group();
        assert_eq!(group.width(), 70.0);
        assert_eq!(group.height(), 25.0);
        assert_eq!(group.len(), 2);
    }
}
