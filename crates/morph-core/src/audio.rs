//! Frequency-spectrum banding.
//!
//! The web frontend owns the analyser node and the microphone stream; this
//! module only reduces a byte spectrum snapshot into the three scalar band
//! levels the simulation consumes.

use crate::constants::{BASS_BAND_END, MID_BAND_END};

/// Normalized energy per band, each roughly in [0, 1]. Silence is all zeros.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AudioBands {
    pub bass: f32,
    pub mid: f32,
    pub high: f32,
}

/// Partition a byte-valued frequency spectrum into bass/mid/high bands:
/// `[0, 0.1L)`, `[0.1L, 0.4L)`, and `[0.4L, L)`, each averaged and
/// normalized by 255. Empty slices (or empty bands) yield zero.
pub fn split_bands(spectrum: &[u8]) -> AudioBands {
    let len = spectrum.len();
    if len == 0 {
        return AudioBands::default();
    }
    let bass_end = (len as f32 * BASS_BAND_END) as usize;
    let mid_end = (len as f32 * MID_BAND_END) as usize;
    AudioBands {
        bass: band_mean(&spectrum[..bass_end]),
        mid: band_mean(&spectrum[bass_end..mid_end]),
        high: band_mean(&spectrum[mid_end..]),
    }
}

fn band_mean(bytes: &[u8]) -> f32 {
    if bytes.is_empty() {
        return 0.0;
    }
    let sum: u32 = bytes.iter().map(|&b| b as u32).sum();
    sum as f32 / (bytes.len() as f32 * 255.0)
}
