use super::format::{DECIMAL_INDEX, DISPLAY_WIDTH};

/// Number of positions that carry a digit.
pub const DIGIT_COUNT: usize = DISPLAY_WIDTH - 1;

/// Every position except the decimal marker, in display order.
pub fn digit_positions() -> impl Iterator<Item = usize> {
    (0..DISPLAY_WIDTH).filter(|&idx| idx != DECIMAL_INDEX)
}

/// Positions finalized to their target character during one settling
/// episode. Bit `i` set means position `i` is locked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LockSet {
    mask: u16,
}

impl LockSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, index: usize) -> bool {
        index < DISPLAY_WIDTH && self.mask & (1 << index) != 0
    }

    /// Lock a digit position. Returns false for the marker, out-of-range
    /// indices, and positions that are already locked.
    pub fn insert(&mut self, index: usize) -> bool {
        if index >= DISPLAY_WIDTH || index == DECIMAL_INDEX || self.contains(index) {
            return false;
        }
        self.mask |= 1 << index;
        true
    }

    pub fn len(&self) -> usize {
        self.mask.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.mask == 0
    }

    pub fn is_full(&self) -> bool {
        self.len() == DIGIT_COUNT
    }

    /// Digit positions not locked yet, in display order.
    pub fn remaining(&self) -> impl Iterator<Item = usize> + '_ {
        digit_positions().filter(move |&idx| !self.contains(idx))
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        digit_positions().filter(move |&idx| self.contains(idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digit_positions_skip_marker() {
        let positions: Vec<usize> = digit_positions().collect();
        assert_eq!(positions, vec![0, 2, 3, 4, 5, 6, 7]);
        assert_eq!(positions.len(), DIGIT_COUNT);
    }

    #[test]
    fn insert_rejects_marker_and_duplicates() {
        let mut locks = LockSet::new();
        assert!(!locks.insert(DECIMAL_INDEX));
        assert!(!locks.insert(DISPLAY_WIDTH));
        assert!(locks.insert(3));
        assert!(!locks.insert(3));
        assert_eq!(locks.len(), 1);
        assert_eq!(locks.iter().collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn fills_up_after_every_digit_position() {
        let mut locks = LockSet::new();
        for idx in digit_positions() {
            assert!(!locks.is_full());
            locks.insert(idx);
        }
        assert!(locks.is_full());
        assert_eq!(locks.remaining().count(), 0);
    }
}
