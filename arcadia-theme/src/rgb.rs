use std::fmt;

use palette::{FromColor, Hsl, Srgb};
use serde::Serialize;

/// An 8-bit RGB triple. No alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Lowercase `#rrggbb` form, e.g. `(59, 130, 246)` is `"#3b82f6"`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Parse a `#rrggbb` string (the leading `#` may be omitted).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        // Exactly six hex digits; the digit check also keeps multi-byte
        // characters out before the byte slicing below, and rejects the
        // signs from_str_radix would otherwise tolerate.
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Self::new(r, g, b))
    }

    pub(crate) fn to_hsl(self) -> Hsl {
        let srgb: Srgb<f32> = Srgb::from_components((self.r, self.g, self.b)).into_format();
        Hsl::from_color(srgb)
    }

    pub(crate) fn from_hsl(hsl: Hsl) -> Self {
        let (r, g, b) = Srgb::from_color(hsl).into_format::<u8>().into_components();
        Self::new(r, g, b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(channels: [u8; 3]) -> Self {
        Self::new(channels[0], channels[1], channels[2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_is_lowercase_and_zero_padded() {
        assert_eq!(Rgb::new(59, 130, 246).to_hex(), "#3b82f6");
        assert_eq!(Rgb::new(171, 205, 239).to_hex(), "#abcdef");
        assert_eq!(Rgb::new(0, 0, 0).to_hex(), "#000000");
        assert_eq!(Rgb::new(0, 10, 1).to_hex(), "#000a01");
    }

    #[test]
    fn hex_round_trips_exactly() {
        // Every channel position sees all 256 values.
        for v in 0..=255u8 {
            let rgb = Rgb::new(v, 255 - v, v ^ 0x5a);
            assert_eq!(Rgb::from_hex(&rgb.to_hex()), Some(rgb));
        }
    }

    #[test]
    fn from_hex_accepts_a_bare_sextet() {
        assert_eq!(Rgb::from_hex("3b82f6"), Some(Rgb::new(59, 130, 246)));
    }

    #[test]
    fn from_hex_rejects_garbage() {
        assert_eq!(Rgb::from_hex(""), None);
        assert_eq!(Rgb::from_hex("#fff"), None);
        assert_eq!(Rgb::from_hex("#gggggg"), None);
        assert_eq!(Rgb::from_hex("#3b82f6ff"), None);
    }

    #[test]
    fn from_hex_rejects_non_digits_of_the_right_length() {
        // six bytes is not the same as six hex digits
        assert_eq!(Rgb::from_hex("a\u{e9}\u{e9}a"), None);
        assert_eq!(Rgb::from_hex("#+1+2+3"), None);
        assert_eq!(Rgb::from_hex("#3b82f "), None);
    }

    #[test]
    fn display_matches_hex() {
        assert_eq!(Rgb::new(255, 0, 0).to_string(), "#ff0000");
    }

    #[test]
    fn hsl_conversion_round_trips_the_fallback_blue() {
        let rgb = Rgb::new(59, 130, 246);
        assert_eq!(Rgb::from_hsl(rgb.to_hsl()), rgb);
    }
}
