// ABOUTME: Integration tests for team analysis passes over a mixed-team session store
// ABOUTME: Covers anchor resolution, undefined empty states, athlete selection, and post-match readiness
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{assert_close, config, date, match_session, store, training};
use pierre_core::errors::ErrorCode;
use pierre_core::models::{Metric, WeekKey};
use pierre_workload::{
    AnalysisRequest, Anchors, SessionStore, TeamAnalyzer, TrainingLoadZone, UndefinedReason,
};
use serde_json::json;

/// Two U17 players, one with matches, and a U16 player with a single match
fn squad() -> SessionStore {
    store(vec![
        training("Player 1", date(2025, 2, 24), 3000.0).team("U17"),
        training("Player 1", date(2025, 2, 26), 3000.0).team("U17"),
        match_session("Player 1", date(2025, 3, 1), 90.0, 10_000.0).team("U17"),
        training("Player 1", date(2025, 3, 3), 4000.0).team("U17"),
        training("Player 1", date(2025, 3, 5), 4000.0).team("U17"),
        training("Player 2", date(2025, 2, 25), 5000.0).team("U17"),
        match_session("Player 3", date(2025, 3, 8), 90.0, 9000.0).team("U16"),
    ])
}

// ============================================================================
// Anchors
// ============================================================================

#[test]
fn test_anchors_resolve_to_latest_sessions() {
    let squad = squad();

    let anchors = Anchors::resolve(&squad.for_team("U17"), None, None).unwrap();

    assert_eq!(anchors.match_date, Some(date(2025, 3, 1)));
    assert_eq!(anchors.training_date, date(2025, 3, 5));
}

#[test]
fn test_training_anchor_falls_back_to_match_anchor() {
    let squad = squad();

    let anchors = Anchors::resolve(&squad.for_team("U16"), None, None).unwrap();

    assert_eq!(anchors.match_date, Some(date(2025, 3, 8)));
    assert_eq!(anchors.training_date, date(2025, 3, 8));
}

#[test]
fn test_pinned_anchors_win() {
    let squad = squad();

    let anchors = Anchors::resolve(
        &squad,
        Some(date(2025, 2, 1)),
        Some(date(2025, 2, 26)),
    )
    .unwrap();

    assert_eq!(anchors.match_date, Some(date(2025, 2, 1)));
    assert_eq!(anchors.training_date, date(2025, 2, 26));
}

#[test]
fn test_empty_selection_has_no_anchors() {
    let squad = squad();

    assert_eq!(Anchors::resolve(&squad.for_team("U15"), None, None), None);

    let training_only = squad.for_athlete("Player 2");
    let anchors = Anchors::resolve(&training_only, None, None).unwrap();
    assert_eq!(anchors.match_date, None);
    assert_eq!(anchors.training_date, date(2025, 2, 25));
}

// ============================================================================
// Analysis pass
// ============================================================================

#[test]
fn test_team_pass_assesses_every_athlete_in_the_same_week() {
    let config = config();
    let request = AnalysisRequest::default().team("U17");

    let report = TeamAnalyzer::new(&config)
        .analyze(&squad(), &request)
        .unwrap();

    assert_eq!(report.team.as_deref(), Some("U17"));

    let readiness = report.readiness.available().unwrap();
    let athletes: Vec<_> = readiness.iter().map(|r| r.athlete_id.as_str()).collect();
    assert_eq!(athletes, ["Player 1", "Player 2"]);
    assert!(readiness
        .iter()
        .all(|r| r.week == WeekKey::new(2025, 10).unwrap()));

    let player_1 = readiness[0].result(Metric::Distance).unwrap();
    assert_close(player_1.training_value, 8000.0);
    assert_close(player_1.ratio, 0.8);

    // Player 2 did not train in the evaluated week and has no match
    let player_2 = &readiness[1];
    assert_eq!(player_2.session_count, 0);
    assert_eq!(player_2.benchmark_matches, 0);
    assert!(player_2.results.iter().all(|r| r.ratio == 0.0));
}

#[test]
fn test_team_pass_computes_acwr_up_to_training_anchor() {
    let config = config();
    let request = AnalysisRequest::default()
        .team("U17")
        .acwr_metrics([Metric::Distance]);

    let report = TeamAnalyzer::new(&config)
        .analyze(&squad(), &request)
        .unwrap();

    let acwr = report.acwr.available().unwrap();
    assert_eq!(acwr.len(), 2);

    // W09 6000, W10 8000: acute 8000 over chronic 14000 / 4
    let player_1 = acwr[0].metric(Metric::Distance).unwrap().latest().unwrap();
    assert_eq!(player_1.period_end, date(2025, 3, 5));
    assert_close(player_1.chronic_load, 3500.0);
    assert_eq!(player_1.zone, Some(TrainingLoadZone::Overtrained));

    // Player 2 rested through W10
    let player_2 = acwr[1].metric(Metric::Distance).unwrap().latest().unwrap();
    assert_eq!(player_2.acute_load, 0.0);
    assert_eq!(player_2.zone, Some(TrainingLoadZone::Undertrained));
    assert!(acwr[1].metric(Metric::SprintCount).is_none());
}

#[test]
fn test_default_request_covers_every_load_metric() {
    let config = config();

    let report = TeamAnalyzer::new(&config)
        .analyze(&squad(), &AnalysisRequest::default())
        .unwrap();

    let acwr = report.acwr.available().unwrap();
    assert_eq!(acwr.len(), 3);
    assert!(acwr.iter().all(|a| a.series.len() == Metric::LOAD.len()));
}

#[test]
fn test_team_without_training_has_undefined_acwr() {
    let config = config();

    let report = TeamAnalyzer::new(&config)
        .analyze(&squad(), &AnalysisRequest::default().team("U16"))
        .unwrap();

    assert!(report.readiness.is_available());
    assert_eq!(report.acwr.reason(), Some(UndefinedReason::NoTraining));

    let player_3 = &report.readiness.available().unwrap()[0];
    assert_eq!(
        player_3.result(Metric::Distance).unwrap().benchmark_value,
        Some(9000.0)
    );
}

#[test]
fn test_team_without_matches_has_undefined_readiness() {
    let config = config();
    let store = store(vec![
        training("Player 4", date(2025, 3, 3), 4000.0).team("U15"),
    ]);

    let report = TeamAnalyzer::new(&config)
        .analyze(&store, &AnalysisRequest::default().team("U15"))
        .unwrap();

    assert_eq!(report.readiness.reason(), Some(UndefinedReason::NoMatches));
    assert!(report.acwr.is_available());
}

#[test]
fn test_unknown_team_is_undefined_not_an_error() {
    let config = config();

    let report = TeamAnalyzer::new(&config)
        .analyze(&squad(), &AnalysisRequest::default().team("U15"))
        .unwrap();

    assert_eq!(report.anchors, None);
    assert_eq!(report.readiness.reason(), Some(UndefinedReason::NoMatches));
    assert_eq!(report.acwr.reason(), Some(UndefinedReason::NoTraining));
}

#[test]
fn test_single_athlete_uses_team_level_availability() {
    let config = config();
    let request = AnalysisRequest::default().team("U17").athlete("Player 2");

    let report = TeamAnalyzer::new(&config)
        .analyze(&squad(), &request)
        .unwrap();

    let readiness = report.readiness.available().unwrap();
    assert_eq!(readiness.len(), 1);
    assert_eq!(readiness[0].athlete_id, "Player 2");
    // Anchors still come from the whole team
    assert_eq!(
        report.anchors.unwrap().training_date,
        date(2025, 3, 5)
    );
}

#[test]
fn test_unknown_athlete_is_not_found() {
    let config = config();
    let analyzer = TeamAnalyzer::new(&config);
    let squad = squad();

    let error = analyzer
        .analyze(&squad, &AnalysisRequest::default().athlete("Nobody"))
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::ResourceNotFound);

    // Present in the store but not in the selected team
    let error = analyzer
        .analyze(
            &squad,
            &AnalysisRequest::default().team("U16").athlete("Player 1"),
        )
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::ResourceNotFound);
}

// ============================================================================
// Post-match pass
// ============================================================================

#[test]
fn test_post_match_skips_athletes_without_qualifying_training() {
    let config = config();

    let results = TeamAnalyzer::new(&config)
        .post_match(&squad(), &AnalysisRequest::default().team("U17"))
        .unwrap();

    let results = results.available().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].athlete_id, "Player 1");
    assert_eq!(
        results[0].training_dates,
        vec![date(2025, 3, 3), date(2025, 3, 5)]
    );
}

#[test]
fn test_post_match_undefined_when_nobody_trained_after_a_match() {
    let config = config();

    let results = TeamAnalyzer::new(&config)
        .post_match(&squad(), &AnalysisRequest::default().team("U16"))
        .unwrap();

    assert_eq!(results.reason(), Some(UndefinedReason::NoPostMatchTraining));
}

// ============================================================================
// Serialization
// ============================================================================

#[test]
fn test_undefined_assessment_serializes_with_status_tag() {
    let config = config();

    let report = TeamAnalyzer::new(&config)
        .analyze(&squad(), &AnalysisRequest::default().team("U16"))
        .unwrap();

    assert_eq!(
        serde_json::to_value(&report.acwr).unwrap(),
        json!({ "status": "undefined", "data": "no_training" })
    );

    let readiness = serde_json::to_value(&report.readiness).unwrap();
    assert_eq!(readiness["status"], "available");
    assert_eq!(readiness["data"][0]["athlete_id"], "Player 3");
}
