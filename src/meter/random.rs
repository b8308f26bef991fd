use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::format::{DECIMAL_INDEX, DECIMAL_MARKER, DISPLAY_WIDTH, PRECISION};

/// Exclusive upper bound of the decorative world-line generator.
pub const WORLD_LINE_RANGE: u32 = 1_000_000;

/// Random characters for the shuffle effect.
pub struct DigitSource<R = StdRng> {
    rng: R,
}

impl DigitSource<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> DigitSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// A uniformly distributed character in `'0'..='9'`.
    pub fn digit(&mut self) -> char {
        char::from(b'0' + self.rng.gen_range(0..10u8))
    }

    /// A fresh digit for every position, with the marker in place.
    pub fn draw_row(&mut self) -> [char; DISPLAY_WIDTH] {
        let mut row = [DECIMAL_MARKER; DISPLAY_WIDTH];
        for (idx, slot) in row.iter_mut().enumerate() {
            if idx != DECIMAL_INDEX {
                *slot = self.digit();
            }
        }
        row
    }

    /// Uniform index in `0..bound`. Draws nothing when `bound` is zero.
    pub fn pick(&mut self, bound: usize) -> usize {
        if bound == 0 {
            return 0;
        }
        self.rng.gen_range(0..bound)
    }

    /// Whole number in `0..WORLD_LINE_RANGE`.
    pub fn whole(&mut self) -> u32 {
        self.rng.gen_range(0..WORLD_LINE_RANGE)
    }

    /// Decorative reading of the form `1.NNNNNN`.
    pub fn world_line(&mut self) -> String {
        format!("1.{:0width$}", self.whole(), width = PRECISION)
    }
}
