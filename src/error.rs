// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Error types for brandbot

use thiserror::Error;

pub type Result<T> = std::result::Result<T, BrandbotError>;

/// Hard failures. Policy findings are returned as data, never as errors.
#[derive(Error, Debug)]
pub enum BrandbotError {
    #[error("Invalid color format: {0:?} (expected #rgb or #rrggbb)")]
    InvalidColorFormat(String),

    #[error("Brand palette is empty: no approved colors to match against")]
    EmptyPalette,

    #[error("Invalid brand policy: {0}")]
    InvalidPolicy(String),

    #[error("Invalid design input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
