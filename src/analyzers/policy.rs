// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Copy policy checker
//!
//! Flags forbidden terms in generated copy and calls-to-action that are not
//! on the brand whitelist. Both comparisons ignore case.

use super::{AnalysisResult, Analyzer, DesignInputs, Finding, Severity};
use crate::brand::BrandPolicy;
use crate::config::Config;
use crate::error::{BrandbotError, Result};
use regex::RegexBuilder;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    ForbiddenTerm,
    UnapprovedCta,
}

impl std::fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViolationKind::ForbiddenTerm => write!(f, "forbidden term"),
            ViolationKind::UnapprovedCta => write!(f, "unapproved CTA"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyViolation {
    pub kind: ViolationKind,
    /// The offending text as it appears in the input
    pub offending_text: String,
    /// Character offset of the match; `None` for CTA violations
    pub position: Option<usize>,
}

/// Find every whole-word occurrence of each forbidden term.
///
/// "cheap" matches "Cheap!" but not "cheaper". Edges of a term that are not
/// word characters (e.g. "100%") need no boundary on that side. Violations
/// are ordered by position in `text`.
pub fn check_forbidden_terms<S: AsRef<str>>(text: &str, forbidden_terms: &[S]) -> Result<Vec<PolicyViolation>> {
    let mut hits: Vec<(usize, PolicyViolation)> = Vec::new();

    for term in forbidden_terms {
        let term = term.as_ref().trim();
        if term.is_empty() {
            continue;
        }

        let re = RegexBuilder::new(&regex::escape(term))
            .case_insensitive(true)
            .build()
            .map_err(|e| BrandbotError::InvalidPolicy(format!("term {:?}: {}", term, e)))?;

        let mut pos = 0;
        while let Some(m) = re.find_at(text, pos) {
            if at_word_boundary(text, m.start(), m.end()) {
                hits.push((
                    m.start(),
                    PolicyViolation {
                        kind: ViolationKind::ForbiddenTerm,
                        offending_text: m.as_str().to_string(),
                        position: Some(text[..m.start()].chars().count()),
                    },
                ));
                pos = m.end();
            } else {
                // Retry one character later; a boundary-failing match may hide a valid one
                pos = m.start() + text[m.start()..].chars().next().map_or(1, char::len_utf8);
            }
            if pos >= text.len() {
                break;
            }
        }
    }

    hits.sort_by_key(|(start, _)| *start);
    debug!(violations = hits.len(), "Forbidden term scan");
    Ok(hits.into_iter().map(|(_, v)| v).collect())
}

/// Exact, case-insensitive whitelist lookup after trimming whitespace.
///
/// Returns `None` when the CTA is approved.
pub fn check_cta_whitelist<S: AsRef<str>>(cta_text: &str, whitelist: &[S]) -> Option<PolicyViolation> {
    let wanted = cta_text.trim().to_lowercase();
    let approved = whitelist
        .iter()
        .any(|entry| entry.as_ref().trim().to_lowercase() == wanted);

    if approved {
        None
    } else {
        Some(PolicyViolation {
            kind: ViolationKind::UnapprovedCta,
            offending_text: cta_text.trim().to_string(),
            position: None,
        })
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn at_word_boundary(text: &str, start: usize, end: usize) -> bool {
    let matched = &text[start..end];
    let first = matched.chars().next();
    let last = matched.chars().next_back();

    let left_ok = match first {
        Some(c) if is_word_char(c) => !text[..start].chars().next_back().is_some_and(is_word_char),
        _ => true,
    };
    let right_ok = match last {
        Some(c) if is_word_char(c) => !text[end..].chars().next().is_some_and(is_word_char),
        _ => true,
    };

    left_ok && right_ok
}

/// Runs both policy checks over a design's copy
pub struct PolicyAnalyzer;

impl Default for PolicyAnalyzer {
    fn default() -> Self {
        Self
    }
}

impl PolicyAnalyzer {
    /// All violations for a design: forbidden terms across the copy, then the CTA
    pub fn violations(&self, design: &DesignInputs, policy: &BrandPolicy) -> Result<Vec<(usize, PolicyViolation)>> {
        let mut violations = Vec::new();

        for (index, text) in design.copy.iter().enumerate() {
            for violation in check_forbidden_terms(text, policy.forbidden_terms())? {
                violations.push((index, violation));
            }
        }

        if let Some(ref cta) = design.cta {
            if let Some(violation) = check_cta_whitelist(cta, policy.cta_whitelist()) {
                violations.push((design.copy.len(), violation));
            }
        }

        Ok(violations)
    }
}

impl Analyzer for PolicyAnalyzer {
    fn name(&self) -> &str {
        "Copy Policy"
    }

    fn analyze(
        &self,
        design: &DesignInputs,
        policy: &BrandPolicy,
        _config: &Config,
    ) -> Result<AnalysisResult> {
        let mut result = AnalysisResult::new();
        result.checks_run = design.copy.len() + usize::from(design.cta.is_some());

        for (index, violation) in self.violations(design, policy)? {
            let finding = match violation.kind {
                ViolationKind::ForbiddenTerm => Finding::new(
                    "POL-001",
                    "Forbidden term",
                    Severity::Error,
                    &format!(
                        "Copy block {} uses forbidden term {:?} at character {}",
                        index + 1,
                        violation.offending_text,
                        violation.position.unwrap_or_default()
                    ),
                )
                .with_element(&violation.offending_text)
                .with_suggestion("Reword the copy without the forbidden term"),
                ViolationKind::UnapprovedCta => Finding::new(
                    "POL-002",
                    "Unapproved call to action",
                    Severity::Error,
                    &format!(
                        "CTA {:?} is not on the brand whitelist",
                        violation.offending_text
                    ),
                )
                .with_element(&violation.offending_text)
                .with_suggestion(&format!(
                    "Use an approved CTA: {}",
                    policy.cta_whitelist().join(", ")
                )),
            };
            result.add(finding);
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_word_only() {
        assert!(check_forbidden_terms("this is cheaper", &["cheap"]).unwrap().is_empty());
        let hits = check_forbidden_terms("this is cheap", &["cheap"]).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].kind, ViolationKind::ForbiddenTerm);
        assert_eq!(hits[0].position, Some(8));
    }

    #[test]
    fn test_case_insensitive_keeps_original_spelling() {
        let hits = check_forbidden_terms("CHEAP deals, Cheap!", &["cheap"]).unwrap();
        let texts: Vec<_> = hits.iter().map(|v| v.offending_text.as_str()).collect();
        assert_eq!(texts, vec!["CHEAP", "Cheap"]);
    }

    #[test]
    fn test_violations_ordered_by_position() {
        let hits = check_forbidden_terms("free stuff, guaranteed, totally free", &["guaranteed", "free"]).unwrap();
        let positions: Vec<_> = hits.iter().map(|v| v.position.unwrap()).collect();
        assert_eq!(positions, vec![0, 12, 32]);
        assert_eq!(hits[1].offending_text, "guaranteed");
    }

    #[test]
    fn test_multi_word_and_symbol_terms() {
        let hits = check_forbidden_terms("Now 100% risk free", &["100%", "risk free"]).unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].offending_text, "100%");
        assert_eq!(hits[1].offending_text, "risk free");
    }

    #[test]
    fn test_term_is_regex_escaped() {
        assert!(check_forbidden_terms("a+b", &["a.b"]).unwrap().is_empty());
        assert_eq!(check_forbidden_terms("a.b", &["a.b"]).unwrap().len(), 1);
    }

    #[test]
    fn test_boundary_retry_finds_later_match() {
        let hits = check_forbidden_terms("xab ab ab", &["ab ab"]).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].position, Some(4));
    }

    #[test]
    fn test_position_counts_characters() {
        let hits = check_forbidden_terms("café cheap", &["cheap"]).unwrap();
        assert_eq!(hits[0].position, Some(5));
    }

    #[test]
    fn test_cta_whitelist() {
        let whitelist = ["Learn More", "Get Started", "Try Free"];
        let violation = check_cta_whitelist("buy now", &whitelist).expect("not whitelisted");
        assert_eq!(violation.kind, ViolationKind::UnapprovedCta);
        assert_eq!(violation.offending_text, "buy now");
        assert!(check_cta_whitelist("Get Started", &whitelist).is_none());
        assert!(check_cta_whitelist("  get started ", &whitelist).is_none());
        // No fuzzy matching
        assert!(check_cta_whitelist("Get Started!", &whitelist).is_some());
    }
}
