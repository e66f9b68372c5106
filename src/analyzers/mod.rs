// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Analyzers for brand compliance validation
//!
//! Each analyzer is independent: none reads another's output and none keeps
//! state between calls, so a design can be validated from any thread.

pub mod contrast;
pub mod palette;
pub mod policy;
pub mod quality;

use crate::brand::BrandPolicy;
use crate::config::Config;
use crate::error::Result;
use quality::QualityScore;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Severity levels for findings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Design must not ship
    Error,
    /// Should be addressed
    Warning,
    /// Informational
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Warning => write!(f, "WARNING"),
            Severity::Info => write!(f, "INFO"),
        }
    }
}

/// A single finding from analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    /// Rule identifier, e.g. "CON-001"
    pub id: String,
    /// Human-readable name
    pub name: String,
    pub severity: Severity,
    pub message: String,
    /// Color pair, hex or text fragment involved
    pub element: Option<String>,
    /// Suggested fix
    pub suggestion: Option<String>,
}

impl Finding {
    pub fn new(id: &str, name: &str, severity: Severity, message: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            severity,
            message: message.to_string(),
            element: None,
            suggestion: None,
        }
    }

    pub fn with_element(mut self, element: &str) -> Self {
        self.element = Some(element.to_string());
        self
    }

    pub fn with_suggestion(mut self, suggestion: &str) -> Self {
        self.suggestion = Some(suggestion.to_string());
        self
    }
}

/// Results from running one analyzer
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub findings: Vec<Finding>,
    /// Number of inputs (pairs, colors, copy blocks) examined
    pub checks_run: usize,
}

impl AnalysisResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, finding: Finding) {
        self.findings.push(finding);
    }

    pub fn errors(&self) -> Vec<&Finding> {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Error)
            .collect()
    }

    pub fn warnings(&self) -> Vec<&Finding> {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Warning)
            .collect()
    }

    pub fn has_errors(&self) -> bool {
        self.findings.iter().any(|f| f.severity == Severity::Error)
    }
}

/// Trait for all analyzers
pub trait Analyzer {
    fn name(&self) -> &str;

    /// Check one design against a brand; fails only on malformed input
    fn analyze(&self, design: &DesignInputs, policy: &BrandPolicy, config: &Config) -> Result<AnalysisResult>;
}

/// A text color rendered on a background color
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorPair {
    pub foreground: String,
    pub background: String,
    /// Which element this is, e.g. "headline"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl ColorPair {
    pub fn new(foreground: &str, background: &str) -> Self {
        Self {
            foreground: foreground.to_string(),
            background: background.to_string(),
            label: None,
        }
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    /// "headline (#FFF on #000)" or "#FFF on #000"
    pub fn describe(&self) -> String {
        match self.label {
            Some(ref label) => format!("{} ({} on {})", label, self.foreground, self.background),
            None => format!("{} on {}", self.foreground, self.background),
        }
    }
}

/// Everything known about a rendered design
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DesignInputs {
    #[serde(default)]
    pub color_pairs: Vec<ColorPair>,
    #[serde(default)]
    pub dominant_colors: Vec<String>,
    /// Generated copy blocks (headline, body, ...)
    #[serde(default)]
    pub copy: Vec<String>,
    #[serde(default)]
    pub cta: Option<String>,
    /// Layout heuristic in [0, 100] from the renderer
    #[serde(default)]
    pub composition_score: Option<f64>,
    /// Visual impact heuristic in [0, 100] from the renderer
    #[serde(default)]
    pub impact_score: Option<f64>,
}

/// Combined results for one design
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceReport {
    pub contrast: AnalysisResult,
    pub palette: AnalysisResult,
    pub policy: AnalysisResult,
    pub quality: QualityScore,
    /// Score needed for acceptance when this report was built
    pub acceptance_score: u8,
}

impl ComplianceReport {
    pub fn total_findings(&self) -> usize {
        self.contrast.findings.len() + self.palette.findings.len() + self.policy.findings.len()
    }

    pub fn total_errors(&self) -> usize {
        self.contrast.errors().len() + self.palette.errors().len() + self.policy.errors().len()
    }

    pub fn total_warnings(&self) -> usize {
        self.contrast.warnings().len() + self.palette.warnings().len() + self.policy.warnings().len()
    }

    pub fn all_findings(&self) -> Vec<&Finding> {
        let mut all = Vec::new();
        all.extend(self.contrast.findings.iter());
        all.extend(self.palette.findings.iter());
        all.extend(self.policy.findings.iter());
        all
    }

    /// No error findings and a score at or above the acceptance threshold
    pub fn is_compliant(&self) -> bool {
        self.total_errors() == 0 && self.quality.overall >= self.acceptance_score
    }
}

/// Run every analyzer and the quality score over one design.
///
/// Any malformed input aborts the whole validation; a partial report is
/// never returned.
pub fn validate_design(design: &DesignInputs, policy: &BrandPolicy, config: &Config) -> Result<ComplianceReport> {
    config.validate()?;

    let contrast = contrast::ContrastAnalyzer.analyze(design, policy, config)?;
    let palette = palette::PaletteAnalyzer.analyze(design, policy, config)?;
    let policy_result = policy::PolicyAnalyzer.analyze(design, policy, config)?;
    let quality = quality::score_design_with(design, policy, config)?;

    let report = ComplianceReport {
        contrast,
        palette,
        policy: policy_result,
        quality,
        acceptance_score: config.scoring.acceptance_score,
    };

    info!(
        overall = report.quality.overall,
        errors = report.total_errors(),
        warnings = report.total_warnings(),
        compliant = report.is_compliant(),
        "Design validated"
    );

    Ok(report)
}
