// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! brandbot CLI - Brand Compliance Validator

use anyhow::Context;
use brandbot::config::{self, Config};
use brandbot::report::{generate_report, OutputFormat};
use brandbot::analyzers::contrast::{check_contrast_with, ensure_readable_text_with};
use brandbot::analyzers::palette::find_nearest_brand_color_with;
use brandbot::{check_cta_whitelist, check_forbidden_terms, validate_design, BrandPolicy, DesignInputs};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{fmt, EnvFilter};

/// brandbot: Brand Compliance Validator
///
/// Checks generated designs for WCAG contrast, brand palette drift and copy
/// policy, and scores their overall quality.
#[derive(Parser)]
#[command(name = "brandbot")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Contrast ratio and WCAG AA/AAA verdict for a color pair
    Contrast {
        foreground: String,
        background: String,
    },

    /// Adjust a text color until it is readable on a background
    Readable {
        text: String,
        background: String,
        /// Target contrast ratio (defaults to the configured target)
        #[arg(long)]
        target: Option<f64>,
    },

    /// Find the nearest brand color
    Match {
        color: String,
        /// Brand kit (YAML, TOML or JSON)
        #[arg(long)]
        brand: PathBuf,
    },

    /// Check copy against forbidden terms and the CTA whitelist
    Policy {
        /// Copy blocks to scan
        #[arg(required = true)]
        text: Vec<String>,
        #[arg(long)]
        brand: PathBuf,
        /// Call to action to check against the whitelist
        #[arg(long)]
        cta: Option<String>,
    },

    /// Validate a design (JSON) against a brand kit
    Validate {
        design: PathBuf,
        #[arg(long)]
        brand: PathBuf,
        #[arg(long, default_value = "text")]
        format: FormatArg,
        /// Exit with 2 when warnings remain
        #[arg(long)]
        strict: bool,
    },

    /// Initialize configuration file
    Init {
        /// Output format (yaml, toml)
        #[arg(long, default_value = "yaml")]
        format: String,
    },

    /// Show current configuration
    Show,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    /// Human-readable text
    Text,
    /// Structured JSON
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(&cli.log_level);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(config::default_config_path);

    if let Command::Init { ref format } = cli.command {
        return handle_init(&config_path, format);
    }

    let config = config::load_config(&config_path)
        .with_context(|| format!("loading config from {}", config_path.display()))?;

    match cli.command {
        Command::Contrast { foreground, background } => {
            let result = check_contrast_with(&foreground, &background, &config.contrast)?;
            println!("Contrast ratio: {:.2}:1", result.ratio);
            println!("  WCAG AA  ({}:1): {}", config.contrast.aa_ratio, verdict(result.passes_aa));
            println!("  WCAG AAA ({}:1): {}", config.contrast.aaa_ratio, verdict(result.passes_aaa));
            if let Some(suggested) = result.suggested_color {
                println!("  Suggested text color: {}", suggested);
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Readable { text, background, target } => {
            let target = target.unwrap_or(config.contrast.target_ratio);
            let fixed = ensure_readable_text_with(&text, &background, target, config.contrast.adjust_step)?;
            println!("{}", fixed);
            Ok(ExitCode::SUCCESS)
        }
        Command::Match { color, brand } => {
            let policy = load_brand(&brand)?;
            let matched = find_nearest_brand_color_with(
                &color,
                policy.approved_colors(),
                config.palette.match_threshold,
            )?;
            println!(
                "{} -> {} ({}, {}) ΔE {:.2} [{}]",
                matched.input_hex,
                matched.nearest_brand_color.name(),
                matched.nearest_brand_color.hex(),
                matched.nearest_brand_color.role(),
                matched.delta_e,
                if matched.is_match { "match" } else { "no match" }
            );
            Ok(if matched.is_match { ExitCode::SUCCESS } else { ExitCode::FAILURE })
        }
        Command::Policy { text, brand, cta } => {
            let policy = load_brand(&brand)?;
            let mut violations = Vec::new();
            for block in &text {
                violations.extend(check_forbidden_terms(block, policy.forbidden_terms())?);
            }
            if let Some(ref cta) = cta {
                violations.extend(check_cta_whitelist(cta, policy.cta_whitelist()));
            }

            if violations.is_empty() {
                println!("No policy violations.");
                return Ok(ExitCode::SUCCESS);
            }
            for v in &violations {
                match v.position {
                    Some(pos) => println!("{}: {:?} at {}", v.kind, v.offending_text, pos),
                    None => println!("{}: {:?}", v.kind, v.offending_text),
                }
            }
            Ok(ExitCode::FAILURE)
        }
        Command::Validate { design, brand, format, strict } => {
            let policy = load_brand(&brand)?;
            let content = std::fs::read_to_string(&design)
                .with_context(|| format!("reading design {}", design.display()))?;
            let inputs: DesignInputs = serde_json::from_str(&content)
                .with_context(|| format!("parsing design {}", design.display()))?;

            let report = validate_design(&inputs, &policy, &config)?;
            println!("{}", generate_report(&report, format.into()));

            if !report.is_compliant() {
                Ok(ExitCode::FAILURE)
            } else if strict && report.total_warnings() > 0 {
                Ok(ExitCode::from(2))
            } else {
                Ok(ExitCode::SUCCESS)
            }
        }
        Command::Show => {
            handle_show(&config);
            Ok(ExitCode::SUCCESS)
        }
        Command::Init { .. } => Ok(ExitCode::SUCCESS),
    }
}

fn load_brand(path: &Path) -> anyhow::Result<BrandPolicy> {
    BrandPolicy::load(path).with_context(|| format!("loading brand kit {}", path.display()))
}

fn verdict(pass: bool) -> &'static str {
    if pass {
        "pass"
    } else {
        "fail"
    }
}

fn handle_init(config_path: &Path, format: &str) -> anyhow::Result<ExitCode> {
    let path = if format == "toml" {
        config_path.with_extension("toml")
    } else {
        config_path.to_path_buf()
    };

    config::write_default_config(&path)?;
    println!("Created configuration file: {}", path.display());
    Ok(ExitCode::SUCCESS)
}

fn handle_show(config: &Config) {
    println!("\nCurrent Configuration:");
    println!("======================\n");

    println!("Contrast:");
    println!("  AA ratio: {}", config.contrast.aa_ratio);
    println!("  AAA ratio: {}", config.contrast.aaa_ratio);
    println!("  Target ratio: {}", config.contrast.target_ratio);
    println!("  Adjust step: {}", config.contrast.adjust_step);
    println!();

    println!("Palette:");
    println!("  Match threshold (ΔE): {}", config.palette.match_threshold);
    println!();

    let s = &config.scoring;
    println!("Scoring:");
    println!(
        "  Weights: readability {}, brand {}, composition {}, impact {}, accessibility {}",
        s.weights.readability,
        s.weights.brand_consistency,
        s.weights.composition,
        s.weights.impact,
        s.weights.accessibility
    );
    println!("  Suggestion threshold: {}", s.suggestion_threshold);
    println!("  Acceptance score: {}", s.acceptance_score);
}
