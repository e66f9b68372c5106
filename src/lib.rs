// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! brandbot: Brand Compliance Validator
//!
//! Decides whether a generated social-media graphic may ship by checking it
//! against a brand kit:
//!
//! - **Contrast** (WCAG 1.4.3/1.4.6): text/background ratios, AA/AAA, and
//!   repair of unreadable text colors
//! - **Palette**: CIEDE2000 distance from dominant colors to approved brand
//!   colors
//! - **Policy**: whole-word forbidden terms and an exact CTA whitelist
//! - **Quality**: a weighted 0-100 score with suggestions
//!
//! All checks are pure functions of their inputs. Rendering, image
//! generation and persistence belong to the caller.
//!
//! ```rust,ignore
//! use brandbot::{validate_design, BrandPolicy, Config, DesignInputs};
//!
//! let policy = BrandPolicy::load(Path::new("brand.yml"))?;
//! let report = validate_design(&design, &policy, &Config::default())?;
//! if !report.is_compliant() { /* regenerate */ }
//! ```

pub mod analyzers;
pub mod brand;
pub mod color;
pub mod config;
pub mod error;
pub mod report;

pub use analyzers::{
    contrast::{
        calculate_contrast_ratio, check_contrast, ensure_readable_text, ContrastAnalyzer,
        ContrastResult,
    },
    palette::{delta_e_cie2000, find_nearest_brand_color, ColorMatchResult, PaletteAnalyzer},
    policy::{check_cta_whitelist, check_forbidden_terms, PolicyAnalyzer, PolicyViolation, ViolationKind},
    quality::{score_design, Category, QualityScore},
    validate_design, AnalysisResult, Analyzer, ColorPair, ComplianceReport, DesignInputs, Finding,
    Severity,
};
pub use brand::{BrandPolicy, ColorRole, ColorToken};
pub use color::{hex_to_lab, Lab, Rgb};
pub use config::Config;
pub use error::{BrandbotError, Result};
