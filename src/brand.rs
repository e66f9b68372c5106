// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Brand tokens and the per-brand compliance policy.
//!
//! A [`BrandPolicy`] is built once when a brand kit is loaded and is read-only
//! afterwards. Every field is validated at construction, so the analyzers
//! never re-check hex formats or whitelist presence.

use crate::color::{normalize_hex, parse_hex, Rgb};
use crate::error::{BrandbotError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

/// Role a color plays in the brand palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorRole {
    Primary,
    Secondary,
    Accent,
    Neutral,
    Semantic,
}

impl std::fmt::Display for ColorRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColorRole::Primary => write!(f, "primary"),
            ColorRole::Secondary => write!(f, "secondary"),
            ColorRole::Accent => write!(f, "accent"),
            ColorRole::Neutral => write!(f, "neutral"),
            ColorRole::Semantic => write!(f, "semantic"),
        }
    }
}

/// A named brand color. The hex is always stored as `#RRGGBB`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorToken {
    name: String,
    hex: String,
    role: ColorRole,
}

impl ColorToken {
    /// Create a token, normalizing the hex
    pub fn new(name: &str, hex: &str, role: ColorRole) -> Result<Self> {
        Ok(Self {
            name: name.trim().to_string(),
            hex: normalize_hex(hex)?,
            role,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hex(&self) -> &str {
        &self.hex
    }

    pub fn role(&self) -> ColorRole {
        self.role
    }

    /// Parsed color; infallible because the hex was validated in `new`
    pub fn rgb(&self) -> Rgb {
        parse_hex(&self.hex).unwrap_or(Rgb::BLACK)
    }
}

/// On-disk shape of a brand kit before validation
#[derive(Debug, Deserialize)]
struct RawBrandKit {
    #[serde(default)]
    colors: Vec<RawColorToken>,
    #[serde(default)]
    forbidden_terms: Vec<String>,
    #[serde(default)]
    cta_whitelist: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawColorToken {
    name: String,
    hex: String,
    role: ColorRole,
}

/// Approved palette, forbidden terms and CTA whitelist for one brand
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrandPolicy {
    approved_colors: Vec<ColorToken>,
    forbidden_terms: Vec<String>,
    cta_whitelist: Vec<String>,
}

impl BrandPolicy {
    /// Validate and build a policy.
    ///
    /// Rejects an empty CTA whitelist, blank terms or CTAs, and duplicate
    /// color names. Forbidden terms are de-duplicated case-insensitively,
    /// keeping the first spelling. Palette order is preserved since it
    /// breaks ties when matching.
    pub fn new(
        approved_colors: Vec<ColorToken>,
        forbidden_terms: Vec<String>,
        cta_whitelist: Vec<String>,
    ) -> Result<Self> {
        let mut names = HashSet::new();
        for token in &approved_colors {
            if token.name.is_empty() {
                return Err(BrandbotError::InvalidPolicy(format!(
                    "color {} has an empty name",
                    token.hex
                )));
            }
            if !names.insert(token.name.to_lowercase()) {
                return Err(BrandbotError::InvalidPolicy(format!(
                    "duplicate color name {:?}",
                    token.name
                )));
            }
        }

        let mut seen = HashSet::new();
        let mut terms = Vec::with_capacity(forbidden_terms.len());
        for term in forbidden_terms {
            let term = term.trim();
            if term.is_empty() {
                return Err(BrandbotError::InvalidPolicy(
                    "forbidden term list contains a blank entry".to_string(),
                ));
            }
            if seen.insert(term.to_lowercase()) {
                terms.push(term.to_string());
            }
        }

        if cta_whitelist.is_empty() {
            return Err(BrandbotError::InvalidPolicy(
                "CTA whitelist must not be empty".to_string(),
            ));
        }
        let mut ctas = Vec::with_capacity(cta_whitelist.len());
        for cta in cta_whitelist {
            let cta = cta.trim();
            if cta.is_empty() {
                return Err(BrandbotError::InvalidPolicy(
                    "CTA whitelist contains a blank entry".to_string(),
                ));
            }
            ctas.push(cta.to_string());
        }

        debug!(
            colors = approved_colors.len(),
            forbidden_terms = terms.len(),
            ctas = ctas.len(),
            "Brand policy validated"
        );

        Ok(Self {
            approved_colors,
            forbidden_terms: terms,
            cta_whitelist: ctas,
        })
    }

    /// Load a brand kit from YAML, TOML or JSON (chosen by extension)
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        let raw: RawBrandKit = match path.extension().and_then(|s| s.to_str()) {
            Some("toml") => toml::from_str(&content)
                .map_err(|e| BrandbotError::InvalidPolicy(format!("TOML parse error: {}", e)))?,
            Some("json") => serde_json::from_str(&content)?,
            _ => serde_yaml::from_str(&content)?,
        };

        let colors = raw
            .colors
            .into_iter()
            .map(|c| ColorToken::new(&c.name, &c.hex, c.role))
            .collect::<Result<Vec<_>>>()?;

        Self::new(colors, raw.forbidden_terms, raw.cta_whitelist)
    }

    pub fn approved_colors(&self) -> &[ColorToken] {
        &self.approved_colors
    }

    pub fn forbidden_terms(&self) -> &[String] {
        &self.forbidden_terms
    }

    pub fn cta_whitelist(&self) -> &[String] {
        &self.cta_whitelist
    }

    /// Tokens with the given role, in palette order
    pub fn colors_by_role(&self, role: ColorRole) -> Vec<&ColorToken> {
        self.approved_colors
            .iter()
            .filter(|t| t.role == role)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(name: &str, hex: &str) -> ColorToken {
        ColorToken::new(name, hex, ColorRole::Primary).unwrap()
    }

    #[test]
    fn test_token_normalizes_hex() {
        let t = ColorToken::new(" Indigo ", "4f46e5", ColorRole::Accent).unwrap();
        assert_eq!(t.name(), "Indigo");
        assert_eq!(t.hex(), "#4F46E5");
        assert_eq!(t.rgb(), Rgb::new(0x4F, 0x46, 0xE5));
    }

    #[test]
    fn test_token_rejects_bad_hex() {
        assert!(matches!(
            ColorToken::new("Bad", "#12", ColorRole::Neutral),
            Err(BrandbotError::InvalidColorFormat(_))
        ));
    }

    #[test]
    fn test_policy_requires_whitelist() {
        let err = BrandPolicy::new(vec![token("Primary", "#4F46E5")], vec![], vec![]).unwrap_err();
        assert!(matches!(err, BrandbotError::InvalidPolicy(_)));
    }

    #[test]
    fn test_policy_rejects_duplicate_names() {
        let err = BrandPolicy::new(
            vec![token("Primary", "#4F46E5"), token("primary", "#000000")],
            vec![],
            vec!["Learn More".to_string()],
        )
        .unwrap_err();
        assert!(matches!(err, BrandbotError::InvalidPolicy(_)));
    }

    #[test]
    fn test_policy_rejects_blank_term() {
        let err = BrandPolicy::new(
            vec![],
            vec!["  ".to_string()],
            vec!["Learn More".to_string()],
        )
        .unwrap_err();
        assert!(matches!(err, BrandbotError::InvalidPolicy(_)));
    }

    #[test]
    fn test_policy_dedupes_terms_case_insensitively() {
        let policy = BrandPolicy::new(
            vec![],
            vec!["Cheap".to_string(), "cheap".to_string(), " free ".to_string()],
            vec!["Learn More".to_string()],
        )
        .unwrap();
        assert_eq!(policy.forbidden_terms(), &["Cheap".to_string(), "free".to_string()]);
    }

    #[test]
    fn test_colors_by_role_preserves_order() {
        let policy = BrandPolicy::new(
            vec![
                token("A", "#111111"),
                ColorToken::new("B", "#222222", ColorRole::Neutral).unwrap(),
                token("C", "#333333"),
            ],
            vec![],
            vec!["Shop Now".to_string()],
        )
        .unwrap();
        let names: Vec<_> = policy
            .colors_by_role(ColorRole::Primary)
            .iter()
            .map(|t| t.name())
            .collect();
        assert_eq!(names, vec!["A", "C"]);
    }
}
