use palette::{Hsl, ShiftHue};
use serde::Serialize;

use crate::Rgb;

/// One slot of a [`ColorScheme`]: the color plus its `#rrggbb` form, ready to
/// drop into markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Swatch {
    pub rgb: Rgb,
    pub hex: String,
}

impl Swatch {
    fn new(rgb: Rgb) -> Self {
        Self {
            hex: rgb.to_hex(),
            rgb,
        }
    }
}

/// Four-slot theme derived from one source color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorScheme {
    pub primary: Swatch,
    pub dark: Swatch,
    pub light: Swatch,
    pub accent: Swatch,
}

const DARK_LIGHTNESS_FACTOR: f32 = 0.4;
const DARK_LIGHTNESS_FLOOR: f32 = 0.1;
const LIGHT_LIGHTNESS_FACTOR: f32 = 1.6;
const LIGHT_LIGHTNESS_CAP: f32 = 0.95;
const LIGHT_SATURATION_FACTOR: f32 = 0.7;
const LIGHT_SATURATION_FLOOR: f32 = 0.3;

/// Derive the page theme for one base color. Pure: the same input always
/// produces the same scheme.
///
/// `dark` keeps hue and saturation with lightness scaled down, floored so it
/// never lands on pure black. `light` scales lightness up and saturation
/// down, floored so it stays visibly colored instead of washing out. `accent`
/// is the hue complement at unchanged saturation and lightness.
pub fn derive_scheme(rgb: Rgb) -> ColorScheme {
    let base = rgb.to_hsl();

    let dark = Hsl::new(
        base.hue,
        base.saturation,
        (base.lightness * DARK_LIGHTNESS_FACTOR).max(DARK_LIGHTNESS_FLOOR),
    );
    let light = Hsl::new(
        base.hue,
        (base.saturation * LIGHT_SATURATION_FACTOR).max(LIGHT_SATURATION_FLOOR),
        (base.lightness * LIGHT_LIGHTNESS_FACTOR).min(LIGHT_LIGHTNESS_CAP),
    );
    let accent = base.shift_hue(180.0);

    ColorScheme {
        primary: Swatch::new(rgb),
        dark: Swatch::new(Rgb::from_hsl(dark)),
        light: Swatch::new(Rgb::from_hsl(light)),
        accent: Swatch::new(Rgb::from_hsl(accent)),
    }
}
