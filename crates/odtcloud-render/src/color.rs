//! Background color parsing and the word colormap

use crate::error::{RenderError, Result};
use image::Rgb;

/// Named colors accepted for the background
const NAMED_COLORS: &[(&str, [u8; 3])] = &[
    ("white", [255, 255, 255]),
    ("black", [0, 0, 0]),
    ("red", [255, 0, 0]),
    ("green", [0, 128, 0]),
    ("blue", [0, 0, 255]),
    ("yellow", [255, 255, 0]),
    ("orange", [255, 165, 0]),
    ("purple", [128, 0, 128]),
    ("gray", [128, 128, 128]),
    ("grey", [128, 128, 128]),
    ("lightgray", [211, 211, 211]),
    ("lightgrey", [211, 211, 211]),
    ("darkgray", [169, 169, 169]),
    ("darkgrey", [169, 169, 169]),
    ("silver", [192, 192, 192]),
    ("navy", [0, 0, 128]),
    ("teal", [0, 128, 128]),
    ("maroon", [128, 0, 0]),
    ("ivory", [255, 255, 240]),
    ("beige", [245, 245, 220]),
];

/// Parse a color name (`white`) or hex value (`#ffffff`, `#fff`)
///
/// # Errors
///
/// Returns [`RenderError::InvalidColor`] for anything else.
pub fn parse_color(value: &str) -> Result<Rgb<u8>> {
    let trimmed = value.trim();
    let lower = trimmed.to_ascii_lowercase();

    if let Some((_, rgb)) = NAMED_COLORS.iter().find(|(name, _)| *name == lower) {
        return Ok(Rgb(*rgb));
    }

    let invalid = || RenderError::InvalidColor(value.to_string());
    let hex = lower.strip_prefix('#').ok_or_else(invalid)?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
    match hex.len() {
        6 => Ok(Rgb([
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        ])),
        3 => {
            let short = |i: usize| channel(&hex[i..=i]).map(|v| v * 17);
            Ok(Rgb([short(0)?, short(1)?, short(2)?]))
        }
        _ => Err(invalid()),
    }
}

/// Viridis anchors at steps of 0.1
const VIRIDIS: [[u8; 3]; 11] = [
    [68, 1, 84],
    [72, 36, 117],
    [65, 68, 135],
    [53, 95, 141],
    [42, 120, 142],
    [33, 145, 140],
    [34, 168, 132],
    [68, 191, 112],
    [122, 209, 81],
    [189, 223, 38],
    [253, 231, 37],
];

/// Sample the viridis colormap at `t` in `[0, 1]`
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)] // interpolated channels stay within 0..=255
pub fn viridis(t: f32) -> Rgb<u8> {
    let t = t.clamp(0.0, 1.0) * (VIRIDIS.len() - 1) as f32;
    let lower = (t.floor() as usize).min(VIRIDIS.len() - 2);
    let frac = t - lower as f32;
    let (a, b) = (VIRIDIS[lower], VIRIDIS[lower + 1]);
    let mix = |i: usize| (f32::from(a[i]) + (f32::from(b[i]) - f32::from(a[i])) * frac).round() as u8;
    Rgb([mix(0), mix(1), mix(2)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_colors() {
        assert_eq!(parse_color("white").unwrap(), Rgb([255, 255, 255]));
        assert_eq!(parse_color(" Black ").unwrap(), Rgb([0, 0, 0]));
    }

    #[test]
    fn test_hex_colors() {
        assert_eq!(parse_color("#1a2B3c").unwrap(), Rgb([0x1a, 0x2b, 0x3c]));
        assert_eq!(parse_color("#fff").unwrap(), Rgb([255, 255, 255]));
        assert_eq!(parse_color("#0f0").unwrap(), Rgb([0, 255, 0]));
    }

    #[test]
    fn test_invalid_colors() {
        for bad in ["", "chartreuse-ish", "#12", "#gggggg", "123456", "#ff00ff00"] {
            assert!(
                matches!(parse_color(bad), Err(RenderError::InvalidColor(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_viridis_endpoints() {
        assert_eq!(viridis(0.0), Rgb([68, 1, 84]));
        assert_eq!(viridis(1.0), Rgb([253, 231, 37]));
        assert_eq!(viridis(-3.0), viridis(0.0));
        assert_eq!(viridis(7.0), viridis(1.0));
    }

    #[test]
    fn test_viridis_interpolates() {
        assert_eq!(viridis(0.5), Rgb([33, 145, 140]));
        let between = viridis(0.55);
        assert!(between.0[1] > 145 && between.0[1] < 168);
    }
}
