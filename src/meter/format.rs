//! Canonical fixed-width rendering of meter readings.

/// Number of fractional digits on the display.
pub const PRECISION: usize = 6;

/// Index of the decimal point marker. Never randomized, never locked.
pub const DECIMAL_INDEX: usize = 1;

/// Total number of display positions: one integer digit, the marker, and
/// the fractional digits.
pub const DISPLAY_WIDTH: usize = 2 + PRECISION;

pub const DECIMAL_MARKER: char = '.';

/// Shown whenever a reading cannot be parsed or does not fit the display.
pub const FALLBACK: &str = "0.000000";

/// Normalize an arbitrary string into the canonical display form.
///
/// Parses `raw` as a float and formats it with [`PRECISION`] fractional
/// digits. Anything that fails to parse, is not finite, or does not fit in
/// [`DISPLAY_WIDTH`] characters (negative values, values of ten or more)
/// becomes [`FALLBACK`]. Never fails.
pub fn canonical(raw: &str) -> String {
    parse_reading(raw).unwrap_or_else(|| FALLBACK.to_string())
}

fn parse_reading(raw: &str) -> Option<String> {
    let value: f64 = raw.trim().parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    let formatted = format!("{:.*}", PRECISION, value);
    fits_display(&formatted).then_some(formatted)
}

fn fits_display(formatted: &str) -> bool {
    formatted.len() == DISPLAY_WIDTH
        && formatted.char_indices().all(|(idx, ch)| {
            if idx == DECIMAL_INDEX {
                ch == DECIMAL_MARKER
            } else {
                ch.is_ascii_digit()
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_keeps_well_formed_reading() {
        assert_eq!(canonical("1.048596"), "1.048596");
    }

    #[test]
    fn canonical_pads_short_fraction() {
        assert_eq!(canonical("0.5"), "0.500000");
        assert_eq!(canonical("3"), "3.000000");
    }

    #[test]
    fn canonical_rounds_long_fraction() {
        assert_eq!(canonical("0.3370187"), "0.337019");
        assert_eq!(canonical("0.1234564"), "0.123456");
    }

    #[test]
    fn canonical_accepts_surrounding_whitespace_and_exponents() {
        assert_eq!(canonical("  2.5 \n"), "2.500000");
        assert_eq!(canonical("1e-3"), "0.001000");
    }

    #[test]
    fn canonical_falls_back_on_garbage() {
        assert_eq!(canonical("abc"), FALLBACK);
        assert_eq!(canonical(""), FALLBACK);
        assert_eq!(canonical("1.2.3"), FALLBACK);
    }

    #[test]
    fn canonical_falls_back_on_non_finite() {
        assert_eq!(canonical("NaN"), FALLBACK);
        assert_eq!(canonical("inf"), FALLBACK);
        assert_eq!(canonical("-infinity"), FALLBACK);
    }

    #[test]
    fn canonical_falls_back_when_too_wide() {
        assert_eq!(canonical("10"), FALLBACK);
        assert_eq!(canonical("9.9999999"), FALLBACK);
        assert_eq!(canonical("-0.5"), FALLBACK);
    }

    #[test]
    fn canonical_output_has_fixed_shape() {
        for raw in ["0", "9.999999", "4.2", "0.0000004", "7.1234565", "x"] {
            let out = canonical(raw);
            assert_eq!(out.len(), DISPLAY_WIDTH, "{raw}");
            assert_eq!(out.chars().nth(DECIMAL_INDEX), Some(DECIMAL_MARKER));
            assert_eq!(out.split('.').nth(1).map(str::len), Some(PRECISION));
        }
    }
}
