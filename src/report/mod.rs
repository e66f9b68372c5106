// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Report generation for compliance results.
//!
//! - Text: human-readable findings, category scores and suggestions
//! - JSON: the full [`ComplianceReport`] for programmatic consumption

use crate::analyzers::quality::Category;
use crate::analyzers::{AnalysisResult, ComplianceReport};

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "pretty" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

pub fn generate_report(report: &ComplianceReport, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => generate_text_report(report),
        OutputFormat::Json => generate_json_report(report),
    }
}

fn generate_text_report(report: &ComplianceReport) -> String {
    let mut output = String::new();

    output.push_str("=== Brandbot Compliance Report ===\n\n");

    output.push_str(&format!(
        "Overall quality: {}/100 (acceptance at {})\n",
        report.quality.overall, report.acceptance_score
    ));
    for category in Category::ALL {
        output.push_str(&format!(
            "  {:<18} {:>3}\n",
            category.label(),
            report.quality.score(category)
        ));
    }
    output.push('\n');

    push_section(&mut output, "Contrast", &report.contrast);
    push_section(&mut output, "Palette", &report.palette);
    push_section(&mut output, "Policy", &report.policy);

    if !report.quality.issues.is_empty() {
        output.push_str("--- Issues ---\n");
        for issue in &report.quality.issues {
            output.push_str(&format!("  - {}\n", issue));
        }
        output.push('\n');
    }

    if !report.quality.suggestions.is_empty() {
        output.push_str("--- Suggestions ---\n");
        for suggestion in &report.quality.suggestions {
            output.push_str(&format!("  - {}\n", suggestion));
        }
        output.push('\n');
    }

    if report.is_compliant() {
        if report.total_warnings() > 0 {
            output.push_str("RESULT: ACCEPTED WITH WARNINGS\n");
        } else {
            output.push_str("RESULT: ACCEPTED\n");
        }
    } else if report.total_errors() > 0 {
        output.push_str("RESULT: REJECTED (errors found)\n");
    } else {
        output.push_str("RESULT: REJECTED (quality below threshold)\n");
    }

    output
}

fn push_section(output: &mut String, title: &str, result: &AnalysisResult) {
    output.push_str(&format!(
        "--- {} ({} checked, {} finding(s)) ---\n",
        title,
        result.checks_run,
        result.findings.len()
    ));

    for finding in &result.findings {
        output.push_str(&format!(
            "[{}] {}: {}\n",
            finding.id, finding.severity, finding.message
        ));
        if let Some(ref suggestion) = finding.suggestion {
            output.push_str(&format!("  Fix: {}\n", suggestion));
        }
    }
    output.push('\n');
}

fn generate_json_report(report: &ComplianceReport) -> String {
    serde_json::to_string_pretty(report).unwrap_or_else(|e| {
        format!("{{\"error\": \"Failed to serialize report: {}\"}}", e)
    })
}
