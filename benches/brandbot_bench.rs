// SPDX-License-Identifier: PMPL-1.0-or-later
//! Benchmarks for brandbot checks

use brandbot::{
    calculate_contrast_ratio, delta_e_cie2000, ensure_readable_text, find_nearest_brand_color,
    hex_to_lab, validate_design, BrandPolicy, ColorPair, ColorRole, ColorToken, Config,
    DesignInputs,
};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn palette() -> Vec<ColorToken> {
    vec![
        ColorToken::new("Primary", "#4F46E5", ColorRole::Primary).unwrap(),
        ColorToken::new("Secondary", "#0EA5E9", ColorRole::Secondary).unwrap(),
        ColorToken::new("Accent", "#F59E0B", ColorRole::Accent).unwrap(),
        ColorToken::new("Ink", "#0F172A", ColorRole::Neutral).unwrap(),
        ColorToken::new("Paper", "#FFFFFF", ColorRole::Neutral).unwrap(),
        ColorToken::new("Success", "#10B981", ColorRole::Semantic).unwrap(),
    ]
}

fn bench_contrast_ratio(c: &mut Criterion) {
    c.bench_function("contrast_ratio", |b| {
        b.iter(|| calculate_contrast_ratio(black_box("#999999"), black_box("#4F46E5")))
    });
}

fn bench_ensure_readable_text(c: &mut Criterion) {
    c.bench_function("ensure_readable_text", |b| {
        b.iter(|| ensure_readable_text(black_box("#999999"), black_box("#4F46E5"), 4.5))
    });
}

fn bench_delta_e(c: &mut Criterion) {
    let a = hex_to_lab("#4F46E5").unwrap();
    let z = hex_to_lab("#F97316").unwrap();

    c.bench_function("delta_e_cie2000", |b| {
        b.iter(|| delta_e_cie2000(black_box(a), black_box(z)))
    });
}

fn bench_nearest_brand_color(c: &mut Criterion) {
    let palette = palette();

    c.bench_function("nearest_brand_color", |b| {
        b.iter(|| find_nearest_brand_color(black_box("#4F46E6"), black_box(&palette)))
    });
}

fn bench_validate_design(c: &mut Criterion) {
    let policy = BrandPolicy::new(
        palette(),
        vec!["cheap".to_string(), "guaranteed".to_string(), "risk free".to_string()],
        vec!["Learn More".to_string(), "Get Started".to_string()],
    )
    .unwrap();
    let design = DesignInputs {
        color_pairs: vec![
            ColorPair::new("#FFFFFF", "#4F46E5").with_label("headline"),
            ColorPair::new("#0F172A", "#FFFFFF").with_label("body"),
            ColorPair::new("#999999", "#4F46E5").with_label("caption"),
        ],
        dominant_colors: vec!["#4F46E5".to_string(), "#F97316".to_string(), "#FFFFFF".to_string()],
        copy: vec![
            "Plan your week in minutes".to_string(),
            "Guaranteed to cut your meetings in half, risk free".to_string(),
        ],
        cta: Some("Get Started".to_string()),
        composition_score: Some(82.0),
        impact_score: Some(75.0),
    };
    let config = Config::default();

    c.bench_function("validate_design", |b| {
        b.iter(|| validate_design(black_box(&design), black_box(&policy), black_box(&config)))
    });
}

criterion_group!(
    benches,
    bench_contrast_ratio,
    bench_ensure_readable_text,
    bench_delta_e,
    bench_nearest_brand_color,
    bench_validate_design
);
criterion_main!(benches);
