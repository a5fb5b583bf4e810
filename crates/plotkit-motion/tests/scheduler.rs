use plotkit_core::{Axis, LogicalPosition, PenState, SimulatedPlotter};
use plotkit_motion::{Command, ComplexJob, DrawingJob, Scheduler, SchedulerConfig, TickOutcome};

fn scheduler_with(config: SchedulerConfig) -> Scheduler<SimulatedPlotter> {
    Scheduler::new(SimulatedPlotter::default(), config)
}

fn scheduler() -> Scheduler<SimulatedPlotter> {
    scheduler_with(SchedulerConfig::default())
}

fn count(s: &Scheduler<SimulatedPlotter>, line: &str) -> usize {
    s.hal().status_lines().iter().filter(|l| *l == line).count()
}

#[test]
fn test_busy_start_leaves_active_job_untouched() {
    let mut s = scheduler();
    s.start_line(0.0, 0.0, 30.0, 10.0).unwrap();
    for _ in 0..25 {
        s.tick();
    }
    let job = s.drawing_job().clone();
    let head = s.plotter().logical();

    let err = s.start_circle(50.0, 50.0, 10.0).unwrap_err();
    assert!(err.is_busy());
    assert!(s.start_demo().unwrap_err().is_busy());
    assert!(s.start_hilbert(2).unwrap_err().is_busy());

    assert_eq!(s.drawing_job(), &job);
    assert_eq!(s.complex_job(), &ComplexJob::Idle);
    assert_eq!(s.plotter().logical(), head);
    assert_eq!(
        s.hal().status_lines().last().map(String::as_str),
        Some("Error: Device has not yet finished operation")
    );
}

#[test]
fn test_idle_power_save_fires_once() {
    let mut s = scheduler_with(SchedulerConfig {
        idle_time_ms: 40,
        tick_ms: 4,
        ..SchedulerConfig::default()
    });

    for _ in 0..10 {
        assert_eq!(s.tick(), TickOutcome::Idle);
    }
    assert!(!s.is_power_saving());
    assert!(s.hal().axis(Axis::X).energized);

    assert_eq!(s.tick(), TickOutcome::PowerSave);
    assert!(s.is_power_saving());
    assert!(!s.hal().axis(Axis::X).energized);
    assert!(!s.hal().axis(Axis::Y).energized);
    assert_eq!(s.plotter().pen_state(), PenState::Up);

    for _ in 0..50 {
        assert_eq!(s.tick(), TickOutcome::Idle);
    }
    assert_eq!(count(&s, "Entering idle mode."), 1);
}

#[test]
fn test_finished_job_restarts_idle_window() {
    let mut s = scheduler_with(SchedulerConfig {
        idle_time_ms: 8,
        tick_ms: 4,
        ..SchedulerConfig::default()
    });
    for _ in 0..3 {
        s.tick();
    }
    assert!(s.is_power_saving());

    s.start_cut(1.0, 1.0).unwrap();
    s.run_until_idle(1_000).unwrap();
    assert!(!s.is_power_saving());
    assert_eq!(s.idle_ticks(), 0);
    // the first pulse re-energizes the coils
    assert!(s.hal().axis(Axis::X).energized);

    for _ in 0..3 {
        s.tick();
    }
    assert_eq!(count(&s, "Entering idle mode."), 2);
}

#[test]
fn test_tick_paces_while_inside_bed() {
    let mut s = scheduler_with(SchedulerConfig {
        pen_settle_ms: 0,
        ..SchedulerConfig::default()
    });
    s.tick();
    s.tick();
    assert_eq!(s.hal().elapsed_ms(), 8);
}

#[test]
fn test_no_pacing_when_parked_outside() {
    // both switches asserted from the start
    let sim = SimulatedPlotter::new(100, 100, 0, 0);
    let mut s = Scheduler::new(sim, SchedulerConfig::default());
    s.start_cut(-1.0, -1.0).unwrap();
    s.run_until_idle(100).unwrap();
    let elapsed = s.hal().elapsed_ms();

    s.tick();
    assert_eq!(s.hal().elapsed_ms(), elapsed);
}

#[test]
fn test_hilbert_runs_to_completion() {
    let mut s = scheduler();
    s.start_hilbert(2).unwrap();
    assert!(s.run_until_idle(1_000_000).is_some());

    assert_eq!(s.complex_job(), &ComplexJob::Idle);
    assert_eq!(s.drawing_job(), &DrawingJob::Idle);
    // last point of the order two curve is (3, 0)
    assert_eq!(s.plotter().logical(), LogicalPosition::new(200 + 3 * 375, 200));
    assert_eq!(count(&s, "Drawing Hilbert."), 17);
    assert_eq!(count(&s, "Drawing finished."), 17);
    assert_eq!(count(&s, "Drawing started."), 1);
}

#[test]
fn test_hilbert_resolution_rejected() {
    let mut s = scheduler();
    let err = s.start_hilbert(11).unwrap_err();
    assert!(err.is_job_error());
    assert!(!s.is_busy());
    assert!(s.hal().status_lines()[0].starts_with("Error: Can't draw Hilbert's curve"));
}

#[test]
fn test_demo_runs_to_completion() {
    let mut s = scheduler();
    s.execute(&Command::Demo).unwrap();
    assert!(s.run_until_idle(1_000_000).is_some());

    assert!(!s.is_busy());
    assert_eq!(count(&s, "Drawing finished."), 9);
    assert_eq!(count(&s, "Drawing demo."), 10);
    assert_eq!(s.plotter().logical(), LogicalPosition::new(1200, 200));
}

#[test]
fn test_stop_all_abandons_jobs_in_place() {
    let mut s = scheduler();
    for _ in 0..3 {
        s.tick();
    }
    assert_eq!(s.idle_ticks(), 3);

    s.start_demo().unwrap();
    for _ in 0..50 {
        s.tick();
    }
    let head = s.plotter().logical();
    assert!(s.is_busy());

    s.stop_all();
    assert!(!s.is_busy());
    assert_eq!(s.plotter().logical(), head);
    assert_eq!(s.idle_ticks(), 3);
    assert_eq!(
        s.hal().status_lines().last().map(String::as_str),
        Some("Stopped.")
    );

    // a new job is accepted right away
    s.start_cut(0.0, 0.0).unwrap();
}

#[test]
fn test_config_serializes() {
    let config = SchedulerConfig::default();
    let json = serde_json::to_string(&config).unwrap();
    let back: SchedulerConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back.tick_ms, 4);
    assert_eq!(back.idle_threshold(), config.idle_threshold());
    assert!((back.units.pitch(Axis::Y) - config.units.pitch(Axis::Y)).abs() < 1e-12);
    assert_eq!(back.hilbert, config.hilbert);
}
