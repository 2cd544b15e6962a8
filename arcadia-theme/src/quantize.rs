//! Median-cut quantization: reduce a pixel buffer to one representative color.

const TARGET_BOXES: usize = 16;

/// The most representative color of `pixels`, or `None` for an empty buffer.
///
/// Starts with one box around every pixel, repeatedly splits the most
/// populous splittable box along its widest channel at the median, then
/// reports the mean color of the most populous box. Averaging the real pixel
/// values (not bucket midpoints) means a single-color buffer comes back as
/// exactly that color.
pub(crate) fn dominant(pixels: &[[u8; 3]]) -> Option<[u8; 3]> {
    if pixels.is_empty() {
        return None;
    }

    let mut boxes = vec![ColorBox::new(pixels.to_vec())];
    while boxes.len() < TARGET_BOXES {
        let Some(fullest) = boxes
            .iter()
            .enumerate()
            .filter(|(_, b)| b.splittable())
            .max_by_key(|(_, b)| b.population())
            .map(|(i, _)| i)
        else {
            break;
        };
        let (lower, upper) = boxes.swap_remove(fullest).split();
        boxes.push(lower);
        boxes.push(upper);
    }

    boxes
        .into_iter()
        .max_by_key(ColorBox::population)
        .map(|b| b.average())
}

struct ColorBox {
    pixels: Vec<[u8; 3]>,
}

impl ColorBox {
    fn new(pixels: Vec<[u8; 3]>) -> Self {
        Self { pixels }
    }

    fn population(&self) -> usize {
        self.pixels.len()
    }

    /// Index and spread of the channel with the widest value range.
    fn widest_channel(&self) -> (usize, u8) {
        let mut lo = [u8::MAX; 3];
        let mut hi = [u8::MIN; 3];
        for px in &self.pixels {
            for c in 0..3 {
                lo[c] = lo[c].min(px[c]);
                hi[c] = hi[c].max(px[c]);
            }
        }
        let mut channel = 0;
        let mut spread = hi[0].saturating_sub(lo[0]);
        for c in 1..3 {
            let s = hi[c].saturating_sub(lo[c]);
            if s > spread {
                channel = c;
                spread = s;
            }
        }
        (channel, spread)
    }

    fn splittable(&self) -> bool {
        self.pixels.len() > 1 && self.widest_channel().1 > 0
    }

    /// Cut at the median pixel along the widest channel. Both halves are
    /// non-empty for any splittable box.
    fn split(mut self) -> (ColorBox, ColorBox) {
        let (channel, _) = self.widest_channel();
        self.pixels.sort_unstable_by_key(|px| px[channel]);
        let upper = self.pixels.split_off(self.pixels.len() / 2);
        (ColorBox::new(self.pixels), ColorBox::new(upper))
    }

    /// Mean color over the box.
    fn average(&self) -> [u8; 3] {
        let n = self.pixels.len() as u64;
        let mut sums = [0u64; 3];
        for px in &self.pixels {
            for c in 0..3 {
                sums[c] += u64::from(px[c]);
            }
        }
        [
            (sums[0] / n) as u8,
            (sums[1] / n) as u8,
            (sums[2] / n) as u8,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_buffer_has_no_dominant_color() {
        assert_eq!(dominant(&[]), None);
    }

    #[test]
    fn single_pixel_is_its_own_dominant_color() {
        assert_eq!(dominant(&[[10, 20, 30]]), Some([10, 20, 30]));
    }

    #[test]
    fn uniform_buffer_reports_the_exact_color() {
        let pixels = vec![[200, 64, 7]; 500];
        assert_eq!(dominant(&pixels), Some([200, 64, 7]));
    }

    #[test]
    fn majority_cluster_wins() {
        let mut pixels = vec![[250, 10, 10]; 90];
        pixels.extend(std::iter::repeat([10, 10, 250]).take(10));
        let [r, _, b] = dominant(&pixels).expect("non-empty buffer");
        assert!(r > b, "expected the red cluster to dominate, got r={r} b={b}");
    }

    #[test]
    fn two_even_clusters_stay_unmixed() {
        // 50/50 split: the winner must be one of the two colors, not a blend.
        let mut pixels = vec![[240, 0, 0]; 32];
        pixels.extend(std::iter::repeat([0, 0, 240]).take(32));
        let got = dominant(&pixels).expect("non-empty buffer");
        assert!(
            got == [240, 0, 0] || got == [0, 0, 240],
            "got a blended color {got:?}"
        );
    }
}
