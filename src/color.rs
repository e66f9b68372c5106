// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Color-space utilities shared by the analyzers.
//!
//! Hex parsing, WCAG relative luminance and the sRGB -> CIE XYZ (D65) ->
//! CIE Lab conversion used for perceptual distance.
//! <https://www.w3.org/TR/WCAG21/#dfn-relative-luminance>

use crate::error::{BrandbotError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// D65 reference white in XYZ, Y normalized to 1.0
const D65_WHITE: (f64, f64, f64) = (0.950_47, 1.0, 1.088_83);

/// Lab nonlinearity breakpoint, (6/29)^3
const LAB_EPSILON: f64 = (6.0 / 29.0) * (6.0 / 29.0) * (6.0 / 29.0);

/// An 8-bit sRGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
    pub const WHITE: Rgb = Rgb { r: 255, g: 255, b: 255 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from channel values in [0, 1]; out-of-range input is clamped
    pub fn from_unit(r: f64, g: f64, b: f64) -> Self {
        let to_u8 = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::new(to_u8(r), to_u8(g), to_u8(b))
    }

    /// Channels scaled to [0, 1]
    pub fn to_unit(self) -> [f64; 3] {
        [self.r, self.g, self.b].map(|c| f64::from(c) / 255.0)
    }

    /// Canonical `#RRGGBB` form
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// WCAG 2.x relative luminance in [0, 1]
    pub fn relative_luminance(self) -> f64 {
        let [r, g, b] = self.to_unit().map(srgb_to_linear);
        0.2126 * r + 0.7152 * g + 0.0722 * b
    }

    /// Linear interpolation toward `target`; `t` is clamped to [0, 1]
    pub fn mix(self, target: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let [r1, g1, b1] = self.to_unit();
        let [r2, g2, b2] = target.to_unit();
        Rgb::from_unit(
            r1 + (r2 - r1) * t,
            g1 + (g2 - g1) * t,
            b1 + (b2 - b1) * t,
        )
    }

    pub fn to_lab(self) -> Lab {
        let [r, g, b] = self.to_unit().map(srgb_to_linear);

        let x = 0.412_456_4 * r + 0.357_576_1 * g + 0.180_437_5 * b;
        let y = 0.212_672_9 * r + 0.715_152_2 * g + 0.072_175_0 * b;
        let z = 0.019_333_9 * r + 0.119_192_0 * g + 0.950_304_1 * b;

        let fx = lab_f(x / D65_WHITE.0);
        let fy = lab_f(y / D65_WHITE.1);
        let fz = lab_f(z / D65_WHITE.2);

        Lab {
            l: 116.0 * fy - 16.0,
            a: 500.0 * (fx - fy),
            b: 200.0 * (fy - fz),
        }
    }
}

impl FromStr for Rgb {
    type Err = BrandbotError;

    fn from_str(s: &str) -> Result<Self> {
        parse_hex(s)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// A CIE L*a*b* color (D65)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

impl Lab {
    pub const fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }
}

/// Parse a hex color: 3 or 6 hex digits with an optional leading `#`.
///
/// Surrounding whitespace is ignored; anything else fails with
/// [`BrandbotError::InvalidColorFormat`].
pub fn parse_hex(input: &str) -> Result<Rgb> {
    let invalid = || BrandbotError::InvalidColorFormat(input.to_string());

    let trimmed = input.trim();
    let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());

    match hex.len() {
        3 => Ok(Rgb::new(
            channel(&hex[0..1].repeat(2))?,
            channel(&hex[1..2].repeat(2))?,
            channel(&hex[2..3].repeat(2))?,
        )),
        6 => Ok(Rgb::new(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        _ => Err(invalid()),
    }
}

/// Normalize any accepted hex spelling to `#RRGGBB`
pub fn normalize_hex(input: &str) -> Result<String> {
    parse_hex(input).map(Rgb::to_hex)
}

/// WCAG gamma expansion of one sRGB channel in [0, 1].
///
/// Uses the WCAG 2.x breakpoint (0.03928). For 8-bit input this selects the
/// same branch as the IEC 61966-2-1 value of 0.04045.
pub fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.039_28 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Relative luminance of a hex color
pub fn relative_luminance(hex: &str) -> Result<f64> {
    parse_hex(hex).map(Rgb::relative_luminance)
}

/// Convert a hex color to CIE Lab through linear sRGB and XYZ (D65)
pub fn hex_to_lab(hex: &str) -> Result<Lab> {
    parse_hex(hex).map(Rgb::to_lab)
}

fn lab_f(t: f64) -> f64 {
    if t > LAB_EPSILON {
        t.cbrt()
    } else {
        t / (3.0 * (6.0 / 29.0) * (6.0 / 29.0)) + 4.0 / 29.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_forms() {
        assert_eq!(parse_hex("#fff").unwrap(), Rgb::WHITE);
        assert_eq!(parse_hex("000").unwrap(), Rgb::BLACK);
        assert_eq!(parse_hex("#4F46E5").unwrap(), Rgb::new(0x4F, 0x46, 0xE5));
        assert_eq!(parse_hex("  4f46e5 ").unwrap(), Rgb::new(0x4F, 0x46, 0xE5));
        assert_eq!(parse_hex("#abc").unwrap(), Rgb::new(0xAA, 0xBB, 0xCC));
    }

    #[test]
    fn test_parse_hex_rejects_malformed() {
        for bad in ["", "#", "#ff", "#ffff", "#1234567", "#ggg", "#+ff", "##fff", "#ff ff", "#ééé"] {
            let err = parse_hex(bad).unwrap_err();
            assert!(
                matches!(err, BrandbotError::InvalidColorFormat(_)),
                "{:?} should be rejected, got {:?}",
                bad,
                err
            );
        }
    }

    #[test]
    fn test_normalize_hex() {
        assert_eq!(normalize_hex("#abc").unwrap(), "#AABBCC");
        assert_eq!(normalize_hex("4f46e5").unwrap(), "#4F46E5");
    }

    #[test]
    fn test_relative_luminance_extremes() {
        assert!(Rgb::BLACK.relative_luminance().abs() < 1e-12);
        assert!((Rgb::WHITE.relative_luminance() - 1.0).abs() < 1e-12);
        // Pure red contributes only its coefficient
        assert!((relative_luminance("#f00").unwrap() - 0.2126).abs() < 1e-9);
    }

    #[test]
    fn test_mix_endpoints() {
        let c = Rgb::new(10, 120, 200);
        assert_eq!(c.mix(Rgb::WHITE, 0.0), c);
        assert_eq!(c.mix(Rgb::WHITE, 1.0), Rgb::WHITE);
        assert_eq!(c.mix(Rgb::BLACK, 2.0), Rgb::BLACK);
    }

    #[test]
    fn test_lab_reference_points() {
        let white = hex_to_lab("#FFFFFF").unwrap();
        assert!((white.l - 100.0).abs() < 0.01, "white L = {}", white.l);
        assert!(white.a.abs() < 0.01 && white.b.abs() < 0.01, "white = {:?}", white);

        let black = hex_to_lab("#000000").unwrap();
        assert!(black.l.abs() < 1e-9 && black.a.abs() < 1e-9 && black.b.abs() < 1e-9);

        // sRGB red is roughly (53.24, 80.09, 67.20)
        let red = hex_to_lab("#FF0000").unwrap();
        assert!((red.l - 53.24).abs() < 0.05, "red = {:?}", red);
        assert!((red.a - 80.09).abs() < 0.1, "red = {:?}", red);
        assert!((red.b - 67.20).abs() < 0.1, "red = {:?}", red);
    }

    #[test]
    fn test_hex_to_lab_propagates_parse_error() {
        assert!(matches!(
            hex_to_lab("blue"),
            Err(BrandbotError::InvalidColorFormat(_))
        ));
    }
}
