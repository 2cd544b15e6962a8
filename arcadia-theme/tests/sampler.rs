use std::path::{Path, PathBuf};

use arcadia_theme::{
    derive_scheme, probe_dominant_color, sample_dominant_color, Rgb, FALLBACK_COLOR,
};
use image::{Rgb as Pixel, RgbImage};

fn write_solid_png(dir: &Path, name: &str, color: [u8; 3], width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    RgbImage::from_pixel(width, height, Pixel(color))
        .save(&path)
        .expect("writing test image");
    path
}

#[test]
fn single_pixel_image_samples_exactly() {
    let dir = tempfile::tempdir().unwrap();
    let png = write_solid_png(dir.path(), "pixel.png", [10, 20, 30], 1, 1);
    assert_eq!(sample_dominant_color(&png), Rgb::new(10, 20, 30));
}

#[test]
fn solid_image_samples_exactly() {
    let dir = tempfile::tempdir().unwrap();
    let png = write_solid_png(dir.path(), "solid.png", [200, 17, 90], 24, 16);
    assert_eq!(sample_dominant_color(&png), Rgb::new(200, 17, 90));
}

#[test]
fn two_tone_image_prefers_the_larger_area() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("twotone.png");
    // 90 red pixels, one blue row of 10.
    let mut img = RgbImage::from_pixel(10, 10, Pixel([240, 20, 20]));
    for x in 0..10 {
        img.put_pixel(x, 9, Pixel([20, 20, 240]));
    }
    img.save(&path).expect("writing test image");

    let got = sample_dominant_color(&path);
    assert!(
        got.r > 200 && got.b < 60,
        "expected a red-dominated sample, got {got}"
    );
}

#[test]
fn missing_file_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    let gone = dir.path().join("not-there.png");
    assert_eq!(sample_dominant_color(&gone), FALLBACK_COLOR);
    assert_eq!(sample_dominant_color(&gone), Rgb::new(59, 130, 246));
}

#[test]
fn corrupt_file_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.jpg");
    std::fs::write(&path, b"definitely not a jpeg").unwrap();
    assert_eq!(sample_dominant_color(&path), FALLBACK_COLOR);
}

#[test]
fn truncated_image_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    let png = write_solid_png(dir.path(), "whole.png", [64, 64, 64], 16, 16);
    let bytes = std::fs::read(&png).unwrap();
    let path = dir.path().join("truncated.png");
    std::fs::write(&path, &bytes[..bytes.len() / 2]).unwrap();
    assert_eq!(sample_dominant_color(&path), FALLBACK_COLOR);
}

#[test]
fn probe_reports_whether_the_fallback_was_used() {
    let dir = tempfile::tempdir().unwrap();
    let png = write_solid_png(dir.path(), "ok.png", [1, 2, 3], 4, 4);
    assert!(!probe_dominant_color(&png).is_fallback());
    assert!(probe_dominant_color(dir.path().join("nope.png")).is_fallback());
}

#[test]
fn sampling_is_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gradient.png");
    let img = RgbImage::from_fn(32, 32, |x, y| Pixel([(x * 8) as u8, (y * 8) as u8, 128]));
    img.save(&path).expect("writing test image");

    assert_eq!(sample_dominant_color(&path), sample_dominant_color(&path));
}

#[test]
fn sampled_color_feeds_the_scheme() {
    let dir = tempfile::tempdir().unwrap();
    let png = write_solid_png(dir.path(), "cover.png", [59, 130, 246], 8, 8);
    let scheme = derive_scheme(sample_dominant_color(&png));
    assert_eq!(scheme.primary.hex, "#3b82f6");
}
