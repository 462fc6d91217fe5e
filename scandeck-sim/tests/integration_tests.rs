//! Integration tests for scandeck-sim
//!
//! These tests drive the simulator, the sampler and the activity log together
//! the way a dashboard host would.

use scandeck_core::{
    Drawable, FixedClock, LogEntry, LogLevel, ScanState, ScanStatus, ScriptedEntropy, SeededEntropy,
};
use scandeck_sim::*;
use std::time::Duration;

/// Run a simulator to completion with a constant step, returning every snapshot
fn run_with_step(step: f64) -> Vec<ScanState> {
    let mut sim = ScanSimulator::new();
    let mut entropy = ScriptedEntropy::constant(step);
    sim.start();
    let mut states = Vec::new();
    while sim.is_scanning() {
        sim.tick(&mut entropy);
        states.push(sim.state());
    }
    states
}

#[test]
fn test_fixed_step_run_completes_at_fiftieth_tick() {
    let states = run_with_step(2.0);
    assert_eq!(states.len(), 50);

    let last = states.last().unwrap();
    assert_eq!(last.progress, 100.0);
    assert_eq!(last.points_collected, 100_000);
    assert_eq!(last.status, ScanStatus::Complete);
    assert!(!last.is_scanning);

    let cloud = PointCloudSampler::default().sample_state(last, &mut SeededEntropy::from_seed(0));
    assert_eq!(cloud.len(), 50_000);
}

#[test]
fn test_point_count_tracks_progress_every_tick() {
    let mut sim = ScanSimulator::new();
    let mut entropy = SeededEntropy::from_seed(2024);
    sim.start();
    let mut previous = sim.state();
    while sim.is_scanning() {
        sim.tick(&mut entropy);
        let state = sim.state();
        assert_eq!(state.points_collected, ScanState::points_for_progress(state.progress));
        assert!(state.progress >= previous.progress);
        previous = state;
    }
    assert!(previous.is_complete());
}

#[test]
fn test_new_run_starts_from_zero() {
    let mut sim = ScanSimulator::new();
    let mut entropy = ScriptedEntropy::constant(2.0);
    sim.start();
    while sim.is_scanning() {
        sim.tick(&mut entropy);
    }
    assert!(sim.start());
    assert_eq!(sim.state(), ScanState::started());
}

#[test]
fn test_sampled_geometry_grows_with_progress() {
    let sampler = PointCloudSampler::default();
    let mut entropy = SeededEntropy::from_seed(8);
    let states = run_with_step(0.5);

    let mut last_len = 0;
    for state in states.iter().step_by(20) {
        let cloud = sampler.sample_state(state, &mut entropy);
        assert!(cloud.len() >= last_len);
        assert_eq!(cloud.len(), (state.points_collected as usize).min(MAX_SAMPLES));
        last_len = cloud.len();
    }
}

#[test]
fn test_sampled_ring_shape() {
    let cloud = PointCloudSampler::default().sample(40_000, &mut SeededEntropy::from_seed(4));
    let (min, max) = cloud.bounding_box();
    let center = cloud.center();

    // symmetric across x and y, lopsided along z where the radius peaks
    assert!(center.x.abs() < 0.1);
    assert!(center.y.abs() < 0.1);
    assert!(min.z < -2.4 && max.z < 1.85);
    assert!(max.x > 2.2 && max.x < 2.4);
}

#[test]
fn test_log_retains_last_thousand_of_many() {
    let mut feeder = LogFeeder::empty(FixedClock::new("10:00:00"));
    let ids: Vec<_> = (0..1050)
        .map(|i| feeder.append(LogLevel::Info, format!("line {i}")).id)
        .collect();

    assert_eq!(feeder.len(), 1000);
    let retained: Vec<_> = feeder.entries().map(|e| e.id).collect();
    assert_eq!(retained, ids[50..]);
}

#[test]
fn test_export_scenario() {
    let mut feeder = LogFeeder::empty(FixedClock::new("unused"));
    feeder.push(LogEntry::new(LogLevel::Info, "A", "10:00:00"));
    feeder.push(LogEntry::new(LogLevel::Warn, "B", "10:00:01"));
    let before = feeder.len();
    assert_eq!(feeder.export(), "[10:00:00] INFO: A\n[10:00:01] WARN: B");
    assert_eq!(feeder.len(), before);
}

#[tokio::test(start_paused = true)]
async fn test_session_drop_cancels_all_timers() {
    let entropy = SessionEntropy {
        tick: Box::new(ScriptedEntropy::constant(0.5)),
        log: Box::new(ScriptedEntropy::new(vec![1000.0, 0.0, 0.9])),
        view: Box::new(ScriptedEntropy::constant(0.0)),
    };
    let mut session = ScanSession::with_parts(
        SessionConfig::default(),
        LogFeeder::new(FixedClock::new("10:00:00")),
        entropy,
    );
    let updates = session.subscribe();
    let log = session.log();

    session.start();
    tokio::time::sleep(Duration::from_millis(1_550)).await;
    let progress_at_drop = updates.borrow().progress;
    let log_len_at_drop = log.lock().len();
    assert!(progress_at_drop > 0.0);

    drop(session);
    tokio::time::sleep(Duration::from_secs(10)).await;

    assert_eq!(updates.borrow().progress, progress_at_drop);
    assert_eq!(log.lock().len(), log_len_at_drop);
}

#[tokio::test(start_paused = true)]
async fn test_session_observers_see_completion() {
    let entropy = SessionEntropy {
        tick: Box::new(ScriptedEntropy::constant(2.0)),
        log: Box::new(SeededEntropy::from_seed(1)),
        view: Box::new(SeededEntropy::from_seed(2)),
    };
    let mut session = ScanSession::with_parts(
        SessionConfig::default(),
        LogFeeder::new(FixedClock::new("10:00:00")),
        entropy,
    );
    let mut updates = session.subscribe();
    session.start();

    let done = updates
        .wait_for(|state| state.status == ScanStatus::Complete)
        .await
        .map(|state| *state)
        .unwrap();
    assert_eq!(done.points_collected, 100_000);
    assert!(!done.is_scanning);
}
