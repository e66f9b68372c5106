// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Design quality scoring
//!
//! Folds contrast, palette and policy results plus caller-supplied layout
//! heuristics into one weighted 0-100 score. Composition and impact are not
//! computed here; they come from whatever layout engine rendered the design.

use super::contrast::calculate_contrast_ratio;
use super::palette::find_nearest_brand_color_with;
use super::policy::{PolicyAnalyzer, ViolationKind};
use super::DesignInputs;
use crate::brand::BrandPolicy;
use crate::config::{Config, ContrastConfig, ScoringConfig};
use crate::error::{BrandbotError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Scored categories, in report order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Readability,
    BrandConsistency,
    Composition,
    Impact,
    Accessibility,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Readability,
        Category::BrandConsistency,
        Category::Composition,
        Category::Impact,
        Category::Accessibility,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Readability => "Readability",
            Category::BrandConsistency => "Brand consistency",
            Category::Composition => "Composition",
            Category::Impact => "Impact",
            Category::Accessibility => "Accessibility",
        }
    }

    fn weight(&self, scoring: &ScoringConfig) -> f64 {
        let w = &scoring.weights;
        match self {
            Category::Readability => w.readability,
            Category::BrandConsistency => w.brand_consistency,
            Category::Composition => w.composition,
            Category::Impact => w.impact,
            Category::Accessibility => w.accessibility,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityScore {
    /// Weighted sum of the category scores, in [0, 100]
    pub overall: u8,
    pub category_scores: BTreeMap<Category, u8>,
    pub issues: Vec<String>,
    pub suggestions: Vec<String>,
}

impl QualityScore {
    pub fn score(&self, category: Category) -> u8 {
        self.category_scores.get(&category).copied().unwrap_or(0)
    }
}

/// Readability from the contrast ratio.
///
/// 100 at AAA or above, 60..100 across [AA, AAA), 0..60 across [1, AA).
pub fn readability_score(ratio: f64, contrast: &ContrastConfig) -> f64 {
    let (aa, aaa) = (contrast.aa_ratio, contrast.aaa_ratio);
    let score = if ratio >= aaa {
        100.0
    } else if ratio >= aa {
        60.0 + 40.0 * (ratio - aa) / (aaa - aa)
    } else if aa > 1.0 {
        60.0 * (ratio - 1.0) / (aa - 1.0)
    } else {
        0.0
    };
    score.clamp(0.0, 100.0)
}

/// Accessibility from the contrast ratio: 0 at or below `floor`, 100 at AAA
pub fn accessibility_score(ratio: f64, contrast: &ContrastConfig, floor: f64) -> f64 {
    let aaa = contrast.aaa_ratio;
    let score = if ratio >= aaa {
        100.0
    } else if ratio <= floor {
        0.0
    } else {
        100.0 * (ratio - floor) / (aaa - floor)
    };
    score.clamp(0.0, 100.0)
}

/// 100 for an exact brand color, 0 once ΔE reaches 100 / `penalty`
pub fn color_match_score(delta_e: f64, penalty: f64) -> f64 {
    100.0 - (delta_e * penalty).clamp(0.0, 100.0)
}

/// 100 with no violations, minus `penalty` per violation, floored at 0
pub fn policy_score(violations: usize, penalty: f64) -> f64 {
    (100.0 - penalty * violations as f64).max(0.0)
}

/// Score a design with the default configuration
pub fn score_design(design: &DesignInputs, policy: &BrandPolicy) -> Result<QualityScore> {
    score_design_with(design, policy, &Config::default())
}

pub fn score_design_with(design: &DesignInputs, policy: &BrandPolicy, config: &Config) -> Result<QualityScore> {
    let scoring = &config.scoring;
    let contrast = &config.contrast;

    if design.color_pairs.is_empty() {
        return Err(BrandbotError::InvalidInput(
            "design has no text/background color pairs".to_string(),
        ));
    }
    if design.dominant_colors.is_empty() {
        return Err(BrandbotError::InvalidInput(
            "design has no dominant colors".to_string(),
        ));
    }
    let composition = heuristic_input("composition", design.composition_score, scoring.default_composition)?;
    let impact = heuristic_input("impact", design.impact_score, scoring.default_impact)?;

    // Worst pair decides readability
    let mut worst_ratio = f64::INFINITY;
    for pair in &design.color_pairs {
        worst_ratio = worst_ratio.min(calculate_contrast_ratio(&pair.foreground, &pair.background)?);
    }

    let mut color_total = 0.0;
    let mut off_palette = 0;
    for hex in &design.dominant_colors {
        let matched = find_nearest_brand_color_with(hex, policy.approved_colors(), config.palette.match_threshold)?;
        if !matched.is_match {
            off_palette += 1;
        }
        color_total += color_match_score(matched.delta_e, scoring.delta_e_penalty);
    }
    let color_score = color_total / design.dominant_colors.len() as f64;

    let violations = PolicyAnalyzer.violations(design, policy)?;
    let forbidden = violations
        .iter()
        .filter(|(_, v)| v.kind == ViolationKind::ForbiddenTerm)
        .count();
    let cta_rejected = violations.len() - forbidden;
    let policy_part = policy_score(violations.len(), scoring.violation_penalty);

    let brand = scoring.color_weight * color_score + (1.0 - scoring.color_weight) * policy_part;

    let mut category_scores = BTreeMap::new();
    category_scores.insert(Category::Readability, to_score(readability_score(worst_ratio, contrast)));
    category_scores.insert(Category::BrandConsistency, to_score(brand));
    category_scores.insert(Category::Composition, to_score(composition));
    category_scores.insert(Category::Impact, to_score(impact));
    category_scores.insert(
        Category::Accessibility,
        to_score(accessibility_score(worst_ratio, contrast, scoring.accessibility_floor)),
    );

    let weighted: f64 = Category::ALL
        .iter()
        .map(|c| c.weight(scoring) * f64::from(category_scores[c]))
        .sum();
    let overall = to_score(weighted);

    let mut issues = Vec::new();
    if worst_ratio < contrast.aa_ratio {
        issues.push(format!(
            "Lowest text contrast is {:.2}:1, below WCAG AA ({}:1)",
            worst_ratio, contrast.aa_ratio
        ));
    } else if worst_ratio < contrast.aaa_ratio {
        issues.push(format!(
            "Lowest text contrast is {:.2}:1, below WCAG AAA ({}:1)",
            worst_ratio, contrast.aaa_ratio
        ));
    }
    if off_palette > 0 {
        issues.push(format!(
            "{} of {} dominant color(s) are off the brand palette",
            off_palette,
            design.dominant_colors.len()
        ));
    }
    if forbidden > 0 {
        issues.push(format!("{} forbidden term occurrence(s) in copy", forbidden));
    }
    if cta_rejected > 0 {
        issues.push("Call to action is not on the brand whitelist".to_string());
    }

    // Every rule is evaluated; no early exit
    let threshold = scoring.suggestion_threshold;
    let below = |c: Category| f64::from(category_scores[&c]) < threshold;
    let mut suggestions = Vec::new();
    if below(Category::Readability) {
        suggestions.push(format!(
            "Increase contrast ratio between text and background (currently {:.2}:1)",
            worst_ratio
        ));
    }
    if below(Category::BrandConsistency) {
        suggestions.push("Adjust colors to match the brand palette".to_string());
    }
    if !violations.is_empty() {
        suggestions.push("Review forbidden terms and use only whitelisted CTAs".to_string());
    }
    if below(Category::Composition) {
        suggestions.push("Rebalance the layout: give key elements more whitespace".to_string());
    }
    if below(Category::Impact) {
        suggestions.push("Strengthen the visual hierarchy so the headline stands out".to_string());
    }
    if below(Category::Accessibility) {
        suggestions.push(format!(
            "Aim for WCAG AAA contrast ({}:1) so low-vision readers can follow the text",
            contrast.aaa_ratio
        ));
    }

    debug!(overall, worst_ratio, violations = violations.len(), "Design scored");

    Ok(QualityScore {
        overall,
        category_scores,
        issues,
        suggestions,
    })
}

fn heuristic_input(name: &str, supplied: Option<f64>, default: f64) -> Result<f64> {
    match supplied {
        None => Ok(default),
        Some(v) if (0.0..=100.0).contains(&v) => Ok(v),
        Some(v) => Err(BrandbotError::InvalidInput(format!(
            "{} score must lie in [0, 100], got {}",
            name, v
        ))),
    }
}

fn to_score(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}
