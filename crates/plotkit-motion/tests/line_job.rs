use plotkit_core::{JobState, LogicalPosition, SimulatedPlotter, UnitConverter};
use plotkit_motion::{LineJob, PlotterState};
use proptest::prelude::*;

fn cut(start: LogicalPosition, end: LogicalPosition) -> (usize, PlotterState) {
    let mut sim = SimulatedPlotter::default();
    let mut plotter = PlotterState::new(UnitConverter::default(), 0);
    while plotter.logical() != start {
        plotter.move_toward(&mut sim, start, false);
    }

    let mut job = LineJob::new(plotter.logical(), start, end);
    assert_eq!(job.state(), JobState::Cutting);
    let mut calls = 1;
    while !job.step(&mut plotter, &mut sim).is_finished() {
        calls += 1;
    }
    (calls, plotter)
}

proptest! {
    #[test]
    fn prop_line_reaches_end_in_major_axis_steps(
        x1 in -300i32..300,
        y1 in -300i32..300,
        x2 in -300i32..300,
        y2 in -300i32..300,
    ) {
        let start = LogicalPosition::new(x1, y1);
        let end = LogicalPosition::new(x2, y2);
        let (calls, plotter) = cut(start, end);

        let major = (x2 - x1).abs().max((y2 - y1).abs()) as usize;
        prop_assert_eq!(calls, major + 1);
        prop_assert_eq!(plotter.logical(), end);
    }
}

#[test]
fn test_line_travels_to_start_pen_up() {
    let mut sim = SimulatedPlotter::default();
    let mut plotter = PlotterState::new(UnitConverter::default(), 0);
    let start = LogicalPosition::new(10, 4);
    let mut job = LineJob::new(plotter.logical(), start, LogicalPosition::new(20, 4));
    assert_eq!(job.state(), JobState::Moving);

    while job.state() == JobState::Moving {
        job.step(&mut plotter, &mut sim);
        assert!(!sim.pen_down());
    }
    assert_eq!(plotter.logical(), start);
    assert_eq!(sim.take_status_lines(), vec!["Cutting.".to_string()]);

    while !job.step(&mut plotter, &mut sim).is_finished() {
        assert!(sim.pen_down());
    }
    assert_eq!(plotter.logical(), LogicalPosition::new(20, 4));
}
