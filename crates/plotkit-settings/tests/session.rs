use plotkit_core::{LogicalPosition, PenState, SimulatedPlotter};
use plotkit_motion::{Command, Scheduler, TickOutcome};
use plotkit_settings::Config;
use tempfile::TempDir;

fn scheduler_from(config: &Config) -> Scheduler<SimulatedPlotter> {
    Scheduler::new(config.simulator(), config.scheduler_config())
}

#[test]
fn test_configured_session_draws_and_idles() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("plotkit.toml");
    std::fs::write(
        &path,
        "[timing]\nidle_time_ms = 20\n\n[simulator]\nstart_x = 40\nstart_y = 30\n",
    )
    .unwrap();

    let config = Config::load_or_default(Some(&path)).expect("Failed to load config");
    let mut scheduler = scheduler_from(&config);
    scheduler.home().expect("Homing failed");
    assert_eq!(scheduler.hal().position(), (2, 2));
    scheduler.hal_mut().take_status_lines();

    for line in ["cut 10 0", "LINE 10 0 10 10"] {
        let command = Command::parse(line).unwrap();
        scheduler.execute(&command).unwrap();
        assert!(scheduler.run_until_idle(100_000).is_some());
    }
    assert_eq!(scheduler.plotter().logical(), LogicalPosition::new(100, 100));
    assert_eq!(scheduler.plotter().pen_state(), PenState::Down);

    let outcomes: Vec<_> = (0..7).map(|_| scheduler.tick()).collect();
    assert_eq!(outcomes[5], TickOutcome::PowerSave);
    assert_eq!(scheduler.plotter().pen_state(), PenState::Up);

    let lines = scheduler.hal_mut().take_status_lines();
    let expected = [
        "Drawing started.",
        "Moving into starting position.",
        "Pen down = 1",
        "Drawing finished.",
        "Drawing started.",
        "Moving into starting position.",
        "Drawing finished.",
        "Entering idle mode.",
        "Pen down = 0",
    ];
    assert_eq!(lines, expected);
}

#[test]
fn test_busy_command_is_reported() {
    let mut scheduler = scheduler_from(&Config::new());
    scheduler.execute(&Command::parse("DEMO").unwrap()).unwrap();
    let err = scheduler
        .execute(&Command::parse("CIRCLE 50 50 10").unwrap())
        .unwrap_err();
    assert!(err.is_busy());

    scheduler.execute(&Command::parse("stop").unwrap()).unwrap();
    scheduler
        .execute(&Command::parse("CIRCLE 50 50 10").unwrap())
        .unwrap();
    assert!(scheduler.run_until_idle(100_000).is_some());
}
