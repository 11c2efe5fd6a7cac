// Tests for spectrum banding and color helpers.

use morph_core::audio::{split_bands, AudioBands};
use morph_core::color::{hsl_to_rgb, lerp_rgb, parse_hex_color, DEFAULT_COLOR};

#[test]
fn full_scale_spectrum_saturates_every_band() {
    let spectrum = [255u8; 100];
    let bands = split_bands(&spectrum);
    assert!((bands.bass - 1.0).abs() < 1e-6);
    assert!((bands.mid - 1.0).abs() < 1e-6);
    assert!((bands.high - 1.0).abs() < 1e-6);
}

#[test]
fn silence_is_all_zeros() {
    assert_eq!(split_bands(&[0u8; 64]), AudioBands::default());
    assert_eq!(split_bands(&[]), AudioBands::default());
}

#[test]
fn bands_partition_at_ten_and_forty_percent() {
    // With 10 bins the splits land at [0,1), [1,4), [4,10).
    let mut spectrum = [0u8; 10];
    spectrum[0] = 255;
    let bands = split_bands(&spectrum);
    assert!((bands.bass - 1.0).abs() < 1e-6);
    assert_eq!(bands.mid, 0.0);
    assert_eq!(bands.high, 0.0);

    let mut spectrum = [0u8; 10];
    spectrum[1] = 255;
    spectrum[2] = 255;
    spectrum[3] = 255;
    let bands = split_bands(&spectrum);
    assert_eq!(bands.bass, 0.0);
    assert!((bands.mid - 1.0).abs() < 1e-6);
    assert_eq!(bands.high, 0.0);

    let mut spectrum = [0u8; 10];
    for b in &mut spectrum[4..] {
        *b = 255;
    }
    let bands = split_bands(&spectrum);
    assert_eq!(bands.bass, 0.0);
    assert_eq!(bands.mid, 0.0);
    assert!((bands.high - 1.0).abs() < 1e-6);
}

#[test]
fn band_means_are_normalized_by_255() {
    let mut spectrum = [0u8; 100];
    for b in &mut spectrum[..10] {
        *b = 51; // one fifth of full scale across the whole bass band
    }
    let bands = split_bands(&spectrum);
    assert!((bands.bass - 0.2).abs() < 1e-3);
}

#[test]
fn tiny_spectra_do_not_panic() {
    // One bin: bass and mid bands are empty, the whole signal is "high".
    let bands = split_bands(&[255]);
    assert_eq!(bands.bass, 0.0);
    assert_eq!(bands.mid, 0.0);
    assert!((bands.high - 1.0).abs() < 1e-6);
}

#[test]
fn hsl_hits_the_primary_hues() {
    let close = |a: [f32; 3], b: [f32; 3]| a.iter().zip(b).all(|(x, y)| (x - y).abs() < 1e-5);
    assert!(close(hsl_to_rgb(0.0, 1.0, 0.5), [1.0, 0.0, 0.0]));
    assert!(close(hsl_to_rgb(1.0 / 3.0, 1.0, 0.5), [0.0, 1.0, 0.0]));
    assert!(close(hsl_to_rgb(2.0 / 3.0, 1.0, 0.5), [0.0, 0.0, 1.0]));
    assert!(close(hsl_to_rgb(0.5, 1.0, 0.5), [0.0, 1.0, 1.0]));
    // Hue wraps.
    assert!(close(hsl_to_rgb(1.0, 1.0, 0.5), hsl_to_rgb(0.0, 1.0, 0.5)));
    // Zero saturation is grey regardless of hue.
    assert!(close(hsl_to_rgb(0.7, 0.0, 0.5), [0.5, 0.5, 0.5]));
}

#[test]
fn hex_colors_parse_with_or_without_the_hash() {
    assert_eq!(parse_hex_color("#00ffff"), Some(DEFAULT_COLOR));
    assert_eq!(parse_hex_color("00ffff"), Some(DEFAULT_COLOR));
    assert_eq!(parse_hex_color("#FF0000"), Some([1.0, 0.0, 0.0]));
    assert_eq!(parse_hex_color("#000000"), Some([0.0, 0.0, 0.0]));
    assert_eq!(parse_hex_color(""), None);
    assert_eq!(parse_hex_color("#fff"), None);
    assert_eq!(parse_hex_color("#gggggg"), None);
    assert_eq!(parse_hex_color("#00ffff00"), None);
}

#[test]
fn rgb_lerp_interpolates_componentwise() {
    let a = [0.0, 1.0, 0.5];
    let b = [1.0, 0.0, 0.5];
    assert_eq!(lerp_rgb(a, b, 0.0), a);
    assert_eq!(lerp_rgb(a, b, 1.0), b);
    let mid = lerp_rgb(a, b, 0.5);
    assert!((mid[0] - 0.5).abs() < 1e-6);
    assert!((mid[1] - 0.5).abs() < 1e-6);
    assert!((mid[2] - 0.5).abs() < 1e-6);
}
