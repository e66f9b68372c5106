// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Configuration for brandbot
//!
//! Thresholds and scoring weights are tunable defaults rather than constants.

use crate::error::{BrandbotError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub contrast: ContrastConfig,
    #[serde(default)]
    pub palette: PaletteConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContrastConfig {
    /// WCAG AA minimum for normal text
    pub aa_ratio: f64,
    /// WCAG AAA minimum for normal text
    pub aaa_ratio: f64,
    /// Ratio `ensure_readable_text` aims for
    pub target_ratio: f64,
    /// Fraction of the distance to black/white moved per adjustment step
    pub adjust_step: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    /// Largest CIEDE2000 distance still counted as a brand match
    pub match_threshold: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub weights: ScoringWeights,
    /// Share of brand consistency taken by color match; policy gets the rest
    pub color_weight: f64,
    /// Points lost per unit of ΔE
    pub delta_e_penalty: f64,
    /// Points lost per policy violation
    pub violation_penalty: f64,
    /// Accessibility scores 0 at or below this ratio
    pub accessibility_floor: f64,
    /// Categories below this trigger a suggestion
    pub suggestion_threshold: f64,
    /// Used when the caller supplies no composition score
    pub default_composition: f64,
    /// Used when the caller supplies no impact score
    pub default_impact: f64,
    /// Minimum overall score for a design to be accepted
    pub acceptance_score: u8,
}

/// Category weights for the overall score; must sum to 1
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub readability: f64,
    pub brand_consistency: f64,
    pub composition: f64,
    pub impact: f64,
    pub accessibility: f64,
}

impl Default for ContrastConfig {
    fn default() -> Self {
        Self {
            aa_ratio: 4.5,
            aaa_ratio: 7.0,
            target_ratio: 4.5,
            adjust_step: 0.02,
        }
    }
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            match_threshold: 2.0,
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            color_weight: 0.6,
            delta_e_penalty: 10.0,
            violation_penalty: 20.0,
            accessibility_floor: 3.0,
            suggestion_threshold: 80.0,
            default_composition: 70.0,
            default_impact: 70.0,
            acceptance_score: 70,
        }
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            readability: 0.30,
            brand_consistency: 0.25,
            composition: 0.20,
            impact: 0.15,
            accessibility: 0.10,
        }
    }
}

impl ScoringWeights {
    pub fn sum(&self) -> f64 {
        self.readability + self.brand_consistency + self.composition + self.impact + self.accessibility
    }

    fn all_non_negative(&self) -> bool {
        [
            self.readability,
            self.brand_consistency,
            self.composition,
            self.impact,
            self.accessibility,
        ]
        .iter()
        .all(|w| w.is_finite() && *w >= 0.0)
    }
}

impl Config {
    /// Reject settings that would make scores or thresholds meaningless
    pub fn validate(&self) -> Result<()> {
        let c = &self.contrast;
        if !(1.0..=21.0).contains(&c.aa_ratio) || !(1.0..=21.0).contains(&c.aaa_ratio) {
            return Err(BrandbotError::Config(
                "contrast ratios must lie in [1, 21]".to_string(),
            ));
        }
        if c.aa_ratio > c.aaa_ratio {
            return Err(BrandbotError::Config(format!(
                "aa_ratio ({}) must not exceed aaa_ratio ({})",
                c.aa_ratio, c.aaa_ratio
            )));
        }
        if !(1.0..=21.0).contains(&c.target_ratio) {
            return Err(BrandbotError::Config(
                "target_ratio must lie in [1, 21]".to_string(),
            ));
        }
        if !(c.adjust_step > 0.0 && c.adjust_step <= 1.0) {
            return Err(BrandbotError::Config(
                "adjust_step must lie in (0, 1]".to_string(),
            ));
        }

        if !(self.palette.match_threshold.is_finite() && self.palette.match_threshold >= 0.0) {
            return Err(BrandbotError::Config(
                "match_threshold must be a non-negative number".to_string(),
            ));
        }

        let s = &self.scoring;
        if !s.weights.all_non_negative() {
            return Err(BrandbotError::Config(
                "scoring weights must be non-negative".to_string(),
            ));
        }
        if (s.weights.sum() - 1.0).abs() > 1e-6 {
            return Err(BrandbotError::Config(format!(
                "scoring weights must sum to 1.0, got {:.4}",
                s.weights.sum()
            )));
        }
        if !(0.0..=1.0).contains(&s.color_weight) {
            return Err(BrandbotError::Config(
                "color_weight must lie in [0, 1]".to_string(),
            ));
        }
        if !(s.accessibility_floor >= 1.0 && s.accessibility_floor < c.aaa_ratio) {
            return Err(BrandbotError::Config(format!(
                "accessibility_floor must lie in [1, aaa_ratio), got {}",
                s.accessibility_floor
            )));
        }
        if s.delta_e_penalty < 0.0 || s.violation_penalty < 0.0 {
            return Err(BrandbotError::Config(
                "penalties must be non-negative".to_string(),
            ));
        }
        for (name, value) in [
            ("suggestion_threshold", s.suggestion_threshold),
            ("default_composition", s.default_composition),
            ("default_impact", s.default_impact),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(BrandbotError::Config(format!(
                    "{} must lie in [0, 100], got {}",
                    name, value
                )));
            }
        }
        if s.acceptance_score > 100 {
            return Err(BrandbotError::Config(
                "acceptance_score must lie in [0, 100]".to_string(),
            ));
        }

        Ok(())
    }
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("brandbot")
        .join("config.yml")
}

/// Load and validate a config file; a missing file yields the defaults
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        debug!("No config at {}, using defaults", path.display());
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)?;

    let config: Config = if path.extension().and_then(|s| s.to_str()) == Some("toml") {
        toml::from_str(&content)
            .map_err(|e| BrandbotError::Config(format!("TOML parse error: {}", e)))?
    } else {
        serde_yaml::from_str(&content)
            .map_err(|e| BrandbotError::Config(format!("YAML parse error: {}", e)))?
    };

    config.validate()?;
    Ok(config)
}

pub fn write_default_config(path: &Path) -> Result<()> {
    let config = Config::default();

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let content = if path.extension().and_then(|s| s.to_str()) == Some("toml") {
        toml::to_string_pretty(&config)
            .map_err(|e| BrandbotError::Config(format!("TOML serialize error: {}", e)))?
    } else {
        serde_yaml::to_string(&config)?
    };

    std::fs::write(path, content)?;
    Ok(())
}
