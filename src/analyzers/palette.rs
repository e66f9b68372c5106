// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Brand palette matcher
//!
//! Measures how far a design's dominant colors drift from the approved
//! palette using the CIEDE2000 color difference.
//! <https://hajim.rochester.edu/ece/sites/gsharma/ciede2000/>

use super::{AnalysisResult, Analyzer, DesignInputs, Finding, Severity};
use crate::brand::{BrandPolicy, ColorToken};
use crate::color::{hex_to_lab, normalize_hex, Lab};
use crate::config::Config;
use crate::error::{BrandbotError, Result};
use serde::Serialize;
use tracing::debug;

/// Default ΔE below which two colors count as the same brand color
pub const DEFAULT_MATCH_THRESHOLD: f64 = 2.0;

/// 25^7, the chroma normalizer in the G and R_C terms
const POW25_7: f64 = 6_103_515_625.0;

/// Nearest approved color for one input
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorMatchResult {
    /// Input normalized to `#RRGGBB`
    pub input_hex: String,
    pub nearest_brand_color: ColorToken,
    pub delta_e: f64,
    pub is_match: bool,
}

/// CIEDE2000 color difference with unit weighting factors (kL = kC = kH = 1)
pub fn delta_e_cie2000(lab1: Lab, lab2: Lab) -> f64 {
    let c1 = lab1.a.hypot(lab1.b);
    let c2 = lab2.a.hypot(lab2.b);
    let c_bar7 = ((c1 + c2) / 2.0).powi(7);
    let g = 0.5 * (1.0 - (c_bar7 / (c_bar7 + POW25_7)).sqrt());

    let a1p = (1.0 + g) * lab1.a;
    let a2p = (1.0 + g) * lab2.a;
    let c1p = a1p.hypot(lab1.b);
    let c2p = a2p.hypot(lab2.b);
    let h1p = hue_degrees(a1p, lab1.b);
    let h2p = hue_degrees(a2p, lab2.b);

    let chroma_product = c1p * c2p;

    let delta_l = lab2.l - lab1.l;
    let delta_c = c2p - c1p;
    // Hue is undefined for an achromatic color
    let delta_h_angle = if chroma_product == 0.0 {
        0.0
    } else {
        let diff = h2p - h1p;
        if diff > 180.0 {
            diff - 360.0
        } else if diff < -180.0 {
            diff + 360.0
        } else {
            diff
        }
    };
    let delta_h = 2.0 * chroma_product.sqrt() * (delta_h_angle / 2.0).to_radians().sin();

    let l_bar = (lab1.l + lab2.l) / 2.0;
    let c_bar_p = (c1p + c2p) / 2.0;
    let h_bar_p = if chroma_product == 0.0 {
        h1p + h2p
    } else if (h1p - h2p).abs() <= 180.0 {
        (h1p + h2p) / 2.0
    } else if h1p + h2p < 360.0 {
        (h1p + h2p + 360.0) / 2.0
    } else {
        (h1p + h2p - 360.0) / 2.0
    };

    let t = 1.0 - 0.17 * (h_bar_p - 30.0).to_radians().cos()
        + 0.24 * (2.0 * h_bar_p).to_radians().cos()
        + 0.32 * (3.0 * h_bar_p + 6.0).to_radians().cos()
        - 0.20 * (4.0 * h_bar_p - 63.0).to_radians().cos();

    let delta_theta = 30.0 * (-((h_bar_p - 275.0) / 25.0).powi(2)).exp();
    let c_bar_p7 = c_bar_p.powi(7);
    let r_c = 2.0 * (c_bar_p7 / (c_bar_p7 + POW25_7)).sqrt();
    let l_offset = (l_bar - 50.0).powi(2);
    let s_l = 1.0 + 0.015 * l_offset / (20.0 + l_offset).sqrt();
    let s_c = 1.0 + 0.045 * c_bar_p;
    let s_h = 1.0 + 0.015 * c_bar_p * t;
    let r_t = -(2.0 * delta_theta).to_radians().sin() * r_c;

    let dl = delta_l / s_l;
    let dc = delta_c / s_c;
    let dh = delta_h / s_h;

    (dl * dl + dc * dc + dh * dh + r_t * dc * dh).max(0.0).sqrt()
}

/// Hue angle in [0, 360); zero for the achromatic axis
fn hue_degrees(a: f64, b: f64) -> f64 {
    if a == 0.0 && b == 0.0 {
        return 0.0;
    }
    let h = b.atan2(a).to_degrees();
    if h < 0.0 {
        h + 360.0
    } else {
        h
    }
}

/// Nearest approved color using the default ΔE threshold of 2.0
pub fn find_nearest_brand_color(input_hex: &str, approved_colors: &[ColorToken]) -> Result<ColorMatchResult> {
    find_nearest_brand_color_with(input_hex, approved_colors, DEFAULT_MATCH_THRESHOLD)
}

/// Nearest approved color; ties go to the earliest token in the palette
pub fn find_nearest_brand_color_with(
    input_hex: &str,
    approved_colors: &[ColorToken],
    threshold: f64,
) -> Result<ColorMatchResult> {
    let input = hex_to_lab(input_hex)?;

    let mut best: Option<(&ColorToken, f64)> = None;
    for token in approved_colors {
        let delta_e = delta_e_cie2000(input, token.rgb().to_lab());
        match best {
            Some((_, best_delta)) if delta_e >= best_delta => {}
            _ => best = Some((token, delta_e)),
        }
    }

    let (token, delta_e) = best.ok_or(BrandbotError::EmptyPalette)?;
    debug!(input = input_hex, nearest = token.name(), delta_e, "Palette match");

    Ok(ColorMatchResult {
        input_hex: normalize_hex(input_hex)?,
        nearest_brand_color: token.clone(),
        delta_e,
        is_match: delta_e < threshold,
    })
}

/// Checks every dominant color of a design against the approved palette
pub struct PaletteAnalyzer;

impl Default for PaletteAnalyzer {
    fn default() -> Self {
        Self
    }
}

impl Analyzer for PaletteAnalyzer {
    fn name(&self) -> &str {
        "Brand Palette"
    }

    fn analyze(
        &self,
        design: &DesignInputs,
        policy: &BrandPolicy,
        config: &Config,
    ) -> Result<AnalysisResult> {
        let mut result = AnalysisResult::new();

        for hex in &design.dominant_colors {
            let matched = find_nearest_brand_color_with(
                hex,
                policy.approved_colors(),
                config.palette.match_threshold,
            )?;
            result.checks_run += 1;

            if !matched.is_match {
                let nearest = &matched.nearest_brand_color;
                result.add(
                    Finding::new(
                        "PAL-001",
                        "Off-palette color",
                        Severity::Warning,
                        &format!(
                            "{} is not a brand color: nearest is {} ({}) at ΔE {:.2}",
                            matched.input_hex,
                            nearest.name(),
                            nearest.hex(),
                            matched.delta_e
                        ),
                    )
                    .with_element(&matched.input_hex)
                    .with_suggestion(&format!(
                        "Replace {} with brand color {} ({})",
                        matched.input_hex,
                        nearest.name(),
                        nearest.hex()
                    )),
                );
            }
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brand::ColorRole;

    fn palette() -> Vec<ColorToken> {
        vec![
            ColorToken::new("Primary", "#4F46E5", ColorRole::Primary).unwrap(),
            ColorToken::new("Danger", "#EF4444", ColorRole::Semantic).unwrap(),
            ColorToken::new("Ink", "#0F172A", ColorRole::Neutral).unwrap(),
        ]
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-4,
            "expected ΔE {:.4}, got {:.4}",
            expected,
            actual
        );
    }

    #[test]
    fn test_sharma_reference_pairs() {
        // Published CIEDE2000 test data (Sharma, Wu & Dalal 2005)
        assert_close(
            delta_e_cie2000(Lab::new(50.0, 2.6772, -79.7751), Lab::new(50.0, 0.0, -82.7485)),
            2.0425,
        );
        assert_close(
            delta_e_cie2000(Lab::new(50.0, 0.0, 0.0), Lab::new(50.0, -1.0, 2.0)),
            2.3669,
        );
        // Hue angles straddle 0/360
        assert_close(
            delta_e_cie2000(Lab::new(50.0, 2.49, -0.001), Lab::new(50.0, -2.49, 0.0009)),
            7.1792,
        );
        assert_close(
            delta_e_cie2000(Lab::new(50.0, 2.5, 0.0), Lab::new(73.0, 25.0, -18.0)),
            27.1492,
        );
    }

    #[test]
    fn test_identity_is_zero() {
        let lab = hex_to_lab("#4F46E5").unwrap();
        assert_eq!(delta_e_cie2000(lab, lab), 0.0);
        let gray = hex_to_lab("#808080").unwrap();
        assert_eq!(delta_e_cie2000(gray, gray), 0.0);
    }

    #[test]
    fn test_black_white_far_apart() {
        let d = delta_e_cie2000(hex_to_lab("#000000").unwrap(), hex_to_lab("#FFFFFF").unwrap());
        assert!(d > 50.0, "black/white ΔE = {}", d);
    }

    #[test]
    fn test_achromatic_pair_has_no_hue_term() {
        let d = delta_e_cie2000(Lab::new(40.0, 0.0, 0.0), Lab::new(60.0, 0.0, 0.0));
        assert!(d.is_finite() && d > 0.0);
    }

    #[test]
    fn test_near_match() {
        let result = find_nearest_brand_color("#4F46E6", &palette()).unwrap();
        assert_eq!(result.nearest_brand_color.name(), "Primary");
        assert_eq!(result.input_hex, "#4F46E6");
        assert!(result.delta_e < 0.5, "ΔE = {}", result.delta_e);
        assert!(result.is_match);
    }

    #[test]
    fn test_off_palette_color_is_not_a_match() {
        let result = find_nearest_brand_color("#10B981", &palette()).unwrap();
        assert!(!result.is_match);
        assert!(result.delta_e > DEFAULT_MATCH_THRESHOLD);
    }

    #[test]
    fn test_ties_resolve_to_first_token() {
        let tokens = vec![
            ColorToken::new("First", "#123456", ColorRole::Primary).unwrap(),
            ColorToken::new("Second", "#123456", ColorRole::Secondary).unwrap(),
        ];
        let result = find_nearest_brand_color("#123456", &tokens).unwrap();
        assert_eq!(result.nearest_brand_color.name(), "First");
        assert_eq!(result.delta_e, 0.0);
    }

    #[test]
    fn test_empty_palette_is_an_error() {
        assert!(matches!(
            find_nearest_brand_color("#123456", &[]),
            Err(BrandbotError::EmptyPalette)
        ));
    }

    #[test]
    fn test_invalid_input_wins_over_empty_palette() {
        assert!(matches!(
            find_nearest_brand_color("#12345", &[]),
            Err(BrandbotError::InvalidColorFormat(_))
        ));
    }
}
