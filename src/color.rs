//! Color utilities for label classes and annotation instances.
//!
//! Label classes get deterministic golden-angle colors so neighboring
//! class ids stay visually distinct; per-instance colors are random with
//! a collision check against everything already on screen.

use crate::constants::COLOR_ALLOC_MAX_ATTEMPTS;

/// Convert HSV to RGB.
///
/// # Arguments
/// * `h` - Hue in degrees (0-360)
/// * `s` - Saturation (0.0-1.0)
/// * `v` - Value/brightness (0.0-1.0)
///
/// # Returns
/// RGB tuple with values in range 0.0-1.0
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> (f64, f64, f64) {
    let c = v * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = if h < 60.0 {
        (c, x, 0.0)
    } else if h < 120.0 {
        (x, c, 0.0)
    } else if h < 180.0 {
        (0.0, c, x)
    } else if h < 240.0 {
        (0.0, x, c)
    } else if h < 300.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    (r + m, g + m, b + m)
}

/// Deterministic default color for a label class, as `#RRGGBB`.
///
/// Golden-angle hue stepping keeps consecutive class indices far apart.
pub fn default_class_color(index: usize) -> String {
    let hue = (index as f64 * 137.5) % 360.0;
    let (r, g, b) = hsv_to_rgb(hue, 0.7, 0.9);
    format!(
        "#{:02X}{:02X}{:02X}",
        (r * 255.0).round() as u8,
        (g * 255.0).round() as u8,
        (b * 255.0).round() as u8
    )
}

/// Allocate a random instance color avoiding the given existing colors.
///
/// Comparison is case-insensitive. Gives up after
/// [`COLOR_ALLOC_MAX_ATTEMPTS`] tries and returns the last candidate, so a
/// collision remains possible when the palette is nearly exhausted; that
/// is accepted rather than treated as an error.
pub fn allocate_unique_color<'a>(existing: impl IntoIterator<Item = &'a str>) -> String {
    let taken: Vec<String> = existing.into_iter().map(str::to_uppercase).collect();

    let mut candidate = random_hex_color();
    for _ in 1..COLOR_ALLOC_MAX_ATTEMPTS {
        if !taken.contains(&candidate) {
            return candidate;
        }
        candidate = random_hex_color();
    }
    candidate
}

/// A random uppercase `#RRGGBB` color.
fn random_hex_color() -> String {
    let mut bytes = [0u8; 3];
    // Entropy failure leaves the buffer zeroed; the allocator still
    // terminates and returns a candidate.
    let _ = getrandom::getrandom(&mut bytes);
    format!("#{:02X}{:02X}{:02X}", bytes[0], bytes[1], bytes[2])
}
