use std::fmt;

use super::format::{canonical, DECIMAL_INDEX, DECIMAL_MARKER, DISPLAY_WIDTH, FALLBACK};

/// The characters currently shown on the meter, one per position.
///
/// Length is fixed and the marker at [`DECIMAL_INDEX`] is structural: no
/// mutator on this type can overwrite it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayValue([char; DISPLAY_WIDTH]);

impl DisplayValue {
    /// Builds from text already in canonical form.
    fn from_canonical(text: &str) -> Self {
        let mut cells = ['0'; DISPLAY_WIDTH];
        for (slot, ch) in cells.iter_mut().zip(text.chars()) {
            *slot = ch;
        }
        cells[DECIMAL_INDEX] = DECIMAL_MARKER;
        Self(cells)
    }

    pub fn chars(&self) -> &[char; DISPLAY_WIDTH] {
        &self.0
    }

    pub fn char_at(&self, index: usize) -> Option<char> {
        self.0.get(index).copied()
    }

    /// Overwrite a digit position. Writes to the marker or out of range are
    /// ignored, as are non-digit characters.
    pub(crate) fn set_digit(&mut self, index: usize, ch: char) {
        if index == DECIMAL_INDEX || !ch.is_ascii_digit() {
            return;
        }
        if let Some(slot) = self.0.get_mut(index) {
            *slot = ch;
        }
    }
}

impl Default for DisplayValue {
    fn default() -> Self {
        Self::from_canonical(FALLBACK)
    }
}

impl fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|ch| write!(f, "{ch}"))
    }
}

/// The canonical reading the display converges toward.
///
/// Only constructed through the formatter, so it is always well formed.
/// Replaced wholesale on every announcement, never edited in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TargetValue(DisplayValue);

impl TargetValue {
    pub fn parse(raw: &str) -> Self {
        Self(DisplayValue::from_canonical(&canonical(raw)))
    }

    pub fn char_at(&self, index: usize) -> Option<char> {
        self.0.char_at(index)
    }

    pub fn as_display(&self) -> DisplayValue {
        self.0
    }
}

impl fmt::Display for TargetValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
