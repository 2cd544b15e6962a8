//! Cover-art color theming.
//!
//! Two steps: pull one dominant color out of an image file, then derive the
//! four-slot page scheme (primary, dark, light, accent) from it. Sampling
//! never fails from the caller's point of view; an unreadable image yields
//! [`FALLBACK_COLOR`]. Scheme derivation is pure arithmetic.

mod quantize;
mod rgb;
mod sample;
mod scheme;

pub use rgb::Rgb;
pub use sample::{
    probe_dominant_color, sample_dominant_color, DominantColor, SampleError, FALLBACK_COLOR,
};
pub use scheme::{derive_scheme, ColorScheme, Swatch};
