use std::path::Path;

use thiserror::Error;

use crate::{quantize, Rgb};

/// Stand-in color whenever sampling fails: `#3b82f6`.
pub const FALLBACK_COLOR: Rgb = Rgb::new(59, 130, 246);

/// Why a sampling attempt failed. Absorbed inside this module; callers of
/// [`sample_dominant_color`] always receive a usable color.
#[derive(Debug, Error)]
pub enum SampleError {
    #[error("could not decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("image has no pixels")]
    Empty,
}

/// Outcome of one sampling attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DominantColor {
    /// Measured from the image.
    Sampled(Rgb),
    /// The image was unreadable; [`FALLBACK_COLOR`] stands in.
    Fallback,
}

impl DominantColor {
    pub fn rgb(self) -> Rgb {
        match self {
            DominantColor::Sampled(rgb) => rgb,
            DominantColor::Fallback => FALLBACK_COLOR,
        }
    }

    pub fn is_fallback(self) -> bool {
        matches!(self, DominantColor::Fallback)
    }
}

/// The dominant color of the image at `path`.
///
/// Never fails: a missing, corrupt or unsupported image yields
/// [`FALLBACK_COLOR`]. Every pixel is fed to the quantizer; covers are small
/// enough that coarse subsampling buys nothing.
pub fn sample_dominant_color<P: AsRef<Path>>(path: P) -> Rgb {
    probe_dominant_color(path).rgb()
}

/// Like [`sample_dominant_color`], but keeps the fallback visible for callers
/// that want to log or assert on it.
pub fn probe_dominant_color<P: AsRef<Path>>(path: P) -> DominantColor {
    let path = path.as_ref();
    match try_sample(path) {
        Ok(rgb) => DominantColor::Sampled(rgb),
        Err(err) => {
            log::warn!(
                "sampling {} failed, using fallback color: {err}",
                path.display()
            );
            DominantColor::Fallback
        }
    }
}

fn try_sample(path: &Path) -> Result<Rgb, SampleError> {
    let img = image::open(path)?;
    let pixels: Vec<[u8; 3]> = img.to_rgb8().pixels().map(|px| px.0).collect();
    let dominant = quantize::dominant(&pixels).ok_or(SampleError::Empty)?;
    Ok(Rgb::from(dominant))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_color_is_the_documented_blue() {
        assert_eq!(FALLBACK_COLOR, Rgb::new(59, 130, 246));
        assert_eq!(FALLBACK_COLOR.to_hex(), "#3b82f6");
    }

    #[test]
    fn outcome_collapses_to_a_usable_color() {
        assert_eq!(DominantColor::Sampled(Rgb::new(1, 2, 3)).rgb(), Rgb::new(1, 2, 3));
        assert_eq!(DominantColor::Fallback.rgb(), FALLBACK_COLOR);
        assert!(DominantColor::Fallback.is_fallback());
        assert!(!DominantColor::Sampled(FALLBACK_COLOR).is_fallback());
    }
}
