// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Color contrast checker - WCAG 1.4.3 (AA) / 1.4.6 (AAA)
//!
//! Computes contrast ratios from WCAG relative luminance and repairs text
//! colors that fall short of a target ratio.
//! - AAA: 7:1 for normal text
//! - AA: 4.5:1 for normal text
//!
//! Large-text thresholds (3:1 / 4.5:1) are not distinguished; every pair is
//! judged as normal text.

use super::{AnalysisResult, Analyzer, DesignInputs, Finding, Severity};
use crate::brand::BrandPolicy;
use crate::color::{parse_hex, Rgb};
use crate::config::{Config, ContrastConfig};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Outcome of a single foreground/background check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContrastResult {
    /// Ratio in [1, 21]
    pub ratio: f64,
    pub passes_aa: bool,
    pub passes_aaa: bool,
    /// Adjusted foreground meeting AA, present only when AA fails
    pub suggested_color: Option<String>,
}

/// Contrast ratio between two colors, independent of argument order
pub fn contrast_ratio(fg: Rgb, bg: Rgb) -> f64 {
    let l1 = fg.relative_luminance();
    let l2 = bg.relative_luminance();
    let (lighter, darker) = if l1 > l2 { (l1, l2) } else { (l2, l1) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Contrast ratio between two hex colors.
/// Returns a ratio >= 1.0 (e.g., 4.5, 7.0, 21.0)
pub fn calculate_contrast_ratio(foreground_hex: &str, background_hex: &str) -> Result<f64> {
    Ok(contrast_ratio(
        parse_hex(foreground_hex)?,
        parse_hex(background_hex)?,
    ))
}

/// Check a pair against the default AA (4.5) and AAA (7.0) thresholds
pub fn check_contrast(foreground_hex: &str, background_hex: &str) -> Result<ContrastResult> {
    check_contrast_with(foreground_hex, background_hex, &ContrastConfig::default())
}

pub fn check_contrast_with(
    foreground_hex: &str,
    background_hex: &str,
    config: &ContrastConfig,
) -> Result<ContrastResult> {
    let ratio = calculate_contrast_ratio(foreground_hex, background_hex)?;
    let passes_aa = ratio >= config.aa_ratio;

    let suggested_color = if passes_aa {
        None
    } else {
        Some(adjust_for_ratio(
            parse_hex(foreground_hex)?,
            parse_hex(background_hex)?,
            config.aa_ratio,
            config.adjust_step,
        ))
    };

    Ok(ContrastResult {
        ratio,
        passes_aa,
        passes_aaa: ratio >= config.aaa_ratio,
        suggested_color,
    })
}

/// Return a text color readable against `background_hex`.
///
/// Colors that already meet `target_ratio` come back untouched. Otherwise
/// the text is moved toward black or white in 2% steps until the target is
/// met; if even the extreme falls short, the better of black and white is
/// returned.
pub fn ensure_readable_text(text_hex: &str, background_hex: &str, target_ratio: f64) -> Result<String> {
    ensure_readable_text_with(
        text_hex,
        background_hex,
        target_ratio,
        ContrastConfig::default().adjust_step,
    )
}

pub fn ensure_readable_text_with(
    text_hex: &str,
    background_hex: &str,
    target_ratio: f64,
    step: f64,
) -> Result<String> {
    let text = parse_hex(text_hex)?;
    let background = parse_hex(background_hex)?;

    if contrast_ratio(text, background) >= target_ratio {
        return Ok(text_hex.to_string());
    }

    Ok(adjust_for_ratio(text, background, target_ratio, step))
}

/// Walk `text` toward whichever of black/white contrasts more with
/// `background`, stopping at the first step that meets `target_ratio`.
fn adjust_for_ratio(text: Rgb, background: Rgb, target_ratio: f64, step: f64) -> String {
    let extreme = if contrast_ratio(Rgb::WHITE, background) >= contrast_ratio(Rgb::BLACK, background) {
        Rgb::WHITE
    } else {
        Rgb::BLACK
    };

    let step = if step > 0.0 && step <= 1.0 { step } else { 0.02 };
    let steps = (1.0 / step).ceil() as u32;

    for k in 1..=steps {
        let candidate = text.mix(extreme, f64::from(k) * step);
        let ratio = contrast_ratio(candidate, background);
        if ratio >= target_ratio {
            debug!(
                from = %text,
                to = %candidate,
                ratio,
                steps = k,
                "Adjusted text color for readability"
            );
            return candidate.to_hex();
        }
    }

    warn!(
        text = %text,
        background = %background,
        target_ratio,
        "Target contrast unreachable, falling back to {}",
        extreme
    );
    extreme.to_hex()
}

/// Runs the contrast check over every text/background pair of a design
pub struct ContrastAnalyzer;

impl Default for ContrastAnalyzer {
    fn default() -> Self {
        Self
    }
}

impl Analyzer for ContrastAnalyzer {
    fn name(&self) -> &str {
        "Color Contrast (WCAG)"
    }

    fn analyze(
        &self,
        design: &DesignInputs,
        _policy: &BrandPolicy,
        config: &Config,
    ) -> Result<AnalysisResult> {
        let mut result = AnalysisResult::new();

        for pair in &design.color_pairs {
            let check = check_contrast_with(&pair.foreground, &pair.background, &config.contrast)?;
            result.checks_run += 1;
            let element = pair.describe();

            if !check.passes_aa {
                let mut finding = Finding::new(
                    "CON-001",
                    "Contrast below WCAG AA",
                    Severity::Error,
                    &format!(
                        "Contrast ratio {:.2}:1 is below WCAG AA minimum ({}:1) for {}",
                        check.ratio, config.contrast.aa_ratio, element
                    ),
                )
                .with_element(&element);
                if let Some(ref suggested) = check.suggested_color {
                    finding = finding.with_suggestion(&format!(
                        "Use {} for the text to reach {}:1",
                        suggested, config.contrast.aa_ratio
                    ));
                }
                result.add(finding);
            } else if !check.passes_aaa {
                result.add(
                    Finding::new(
                        "CON-002",
                        "Contrast below WCAG AAA",
                        Severity::Warning,
                        &format!(
                            "Contrast ratio {:.2}:1 is below WCAG AAA requirement ({}:1) for {}",
                            check.ratio, config.contrast.aaa_ratio, element
                        ),
                    )
                    .with_element(&element)
                    .with_suggestion("Increase contrast between text and background for AAA compliance"),
                );
            }
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::ColorPair;
    use crate::error::BrandbotError;

    #[test]
    fn test_contrast_ratio_black_white() {
        let ratio = calculate_contrast_ratio("#000000", "#FFFFFF").unwrap();
        assert!((ratio - 21.0).abs() < 1e-6, "Black on white should be 21:1, got {:.6}", ratio);
    }

    #[test]
    fn test_contrast_ratio_same_color() {
        let ratio = calculate_contrast_ratio("#808080", "#808080").unwrap();
        assert!((ratio - 1.0).abs() < 1e-12, "Same color should be 1:1, got {:.4}", ratio);
    }

    #[test]
    fn test_contrast_ratio_is_symmetric() {
        let a = calculate_contrast_ratio("#4F46E5", "#FACC15").unwrap();
        let b = calculate_contrast_ratio("#FACC15", "#4F46E5").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_color_is_rejected() {
        assert!(matches!(
            calculate_contrast_ratio("#12345", "#FFFFFF"),
            Err(BrandbotError::InvalidColorFormat(_))
        ));
        assert!(matches!(
            check_contrast("#FFFFFF", "white"),
            Err(BrandbotError::InvalidColorFormat(_))
        ));
    }

    #[test]
    fn test_white_on_indigo_passes_aa_only() {
        let result = check_contrast("#FFFFFF", "#4F46E5").unwrap();
        assert!(result.passes_aa);
        assert!(!result.passes_aaa);
        assert!(result.ratio > 4.5 && result.ratio < 7.0, "ratio = {}", result.ratio);
        assert!(result.suggested_color.is_none());
    }

    #[test]
    fn test_failing_pair_carries_suggestion() {
        let result = check_contrast("#aaa", "#ccc").unwrap();
        assert!(!result.passes_aa);
        let suggested = result.suggested_color.expect("suggestion for failing pair");
        assert!(calculate_contrast_ratio(&suggested, "#ccc").unwrap() >= 4.5);
    }

    #[test]
    fn test_readable_text_is_left_alone() {
        assert_eq!(ensure_readable_text("#fff", "#000", 4.5).unwrap(), "#fff");
    }

    #[test]
    fn test_ensure_readable_text_reaches_target() {
        let fixed = ensure_readable_text("#999999", "#4F46E5", 4.5).unwrap();
        let ratio = calculate_contrast_ratio(&fixed, "#4F46E5").unwrap();
        assert!(ratio >= 4.5, "{} gives {:.2}:1", fixed, ratio);
        // Lightening is the only way out on a dark indigo
        assert!(parse_hex(&fixed).unwrap().relative_luminance() > parse_hex("#999999").unwrap().relative_luminance());
    }

    #[test]
    fn test_ensure_readable_text_darkens_on_light_background() {
        let fixed = ensure_readable_text("#BBBBBB", "#FFFFFF", 4.5).unwrap();
        let ratio = calculate_contrast_ratio(&fixed, "#FFFFFF").unwrap();
        assert!(ratio >= 4.5);
        assert_ne!(fixed, "#000000", "a partial step should suffice");
    }

    #[test]
    fn test_unreachable_target_falls_back_to_extreme() {
        // Against mid gray, black (4.69:1) beats white (4.48:1); neither reaches 21:1
        let fixed = ensure_readable_text("#777777", "#777777", 21.0).unwrap();
        assert_eq!(fixed, "#000000");
        assert_eq!(ensure_readable_text(&fixed, "#777777", 21.0).unwrap(), fixed);
    }

    #[test]
    fn test_analyzer_severity_levels() {
        let policy = BrandPolicy::new(vec![], vec![], vec!["Go".to_string()]).unwrap();
        let design = DesignInputs {
            color_pairs: vec![
                ColorPair::new("#000000", "#FFFFFF"),
                ColorPair::new("#FFFFFF", "#4F46E5"),
                ColorPair::new("#aaaaaa", "#cccccc"),
            ],
            ..DesignInputs::default()
        };
        let result = ContrastAnalyzer.analyze(&design, &policy, &Config::default()).unwrap();
        assert_eq!(result.checks_run, 3);
        assert_eq!(result.findings.len(), 2);
        assert_eq!(result.findings[0].severity, Severity::Warning);
        assert_eq!(result.findings[1].severity, Severity::Error);
        assert!(result.findings[1].suggestion.is_some());
    }
}
