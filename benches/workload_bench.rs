// ABOUTME: Criterion benchmarks for the workload engine
// ABOUTME: Measures store construction, team analysis passes, readiness, and ACWR series
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Criterion benchmarks for the workload engine.
//!
//! Measures session store construction, full team analysis passes, and the
//! per-athlete readiness and ACWR computations they are built from.

#![allow(clippy::missing_docs_in_private_items, missing_docs)]

mod common;

use common::fixtures::{generate_records, generate_store, SquadSize, SEASON_WEEKS};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pierre_core::models::Metric;
use pierre_workload::{
    AcwrCadence, AcwrEngine, AnalysisRequest, Anchors, ReadinessEngine, SessionFilter,
    SessionStore, TeamAnalyzer, WorkloadConfig,
};

/// Benchmark grouping raw records into per-athlete timelines
#[allow(clippy::cast_possible_truncation)]
fn bench_store_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("session_store");

    for size in [SquadSize::Team, SquadSize::Academy] {
        let records = generate_records(size, SEASON_WEEKS);
        group.throughput(Throughput::Elements(records.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("build", size.athletes()),
            &records,
            |b, records| b.iter(|| SessionStore::new(black_box(records.clone()))),
        );
    }

    group.finish();
}

/// Benchmark complete analysis passes with varying squad sizes
#[allow(clippy::cast_possible_truncation)]
fn bench_team_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("team_analysis");
    let config = WorkloadConfig::default();
    let analyzer = TeamAnalyzer::new(&config);

    for size in [SquadSize::Team, SquadSize::Academy] {
        let store = generate_store(size);
        let request = AnalysisRequest::default();
        group.throughput(Throughput::Elements(size.athletes() as u64));
        group.bench_with_input(
            BenchmarkId::new("analyze_all", size.athletes()),
            &store,
            |b, store| b.iter(|| analyzer.analyze(black_box(store), black_box(&request))),
        );
    }

    let academy = generate_store(SquadSize::Academy);
    let request = AnalysisRequest::default().team("U14");
    group.bench_function("analyze_one_team", |b| {
        b.iter(|| analyzer.analyze(black_box(&academy), black_box(&request)));
    });

    group.bench_function("post_match", |b| {
        b.iter(|| analyzer.post_match(black_box(&academy), black_box(&request)));
    });

    group.finish();
}

/// Benchmark the single-athlete weekly readiness assessment
fn bench_readiness(c: &mut Criterion) {
    let config = WorkloadConfig::default();
    let store = generate_store(SquadSize::Team);
    let Some(anchors) = Anchors::resolve(&store, None, None) else {
        return;
    };
    let timeline = store.sessions_of("Player 0", &SessionFilter::all());

    c.bench_function("readiness_assess", |b| {
        let engine = ReadinessEngine::new(&config);
        b.iter(|| engine.assess(black_box("Player 0"), black_box(&timeline), &anchors));
    });
}

/// Benchmark ACWR series under both cadences
fn bench_acwr_series(c: &mut Criterion) {
    let mut group = c.benchmark_group("acwr_series");
    let store = generate_store(SquadSize::Team);
    let timeline = store.sessions_of("Player 0", &SessionFilter::training());

    for cadence in [AcwrCadence::Daily, AcwrCadence::Weekly] {
        let mut config = WorkloadConfig::default();
        config.acwr.cadence = cadence;
        group.bench_function(cadence.to_string(), |b| {
            let engine = AcwrEngine::new(&config);
            b.iter(|| {
                engine.series(
                    black_box("Player 0"),
                    black_box(&timeline),
                    black_box(Metric::Distance),
                    None,
                )
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_store_construction,
    bench_team_analysis,
    bench_readiness,
    bench_acwr_series
);
criterion_main!(benches);
