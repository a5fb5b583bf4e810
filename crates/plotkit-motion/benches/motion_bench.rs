use criterion::{black_box, criterion_group, criterion_main, Criterion};
use plotkit_core::{LogicalPosition, SimulatedPlotter};
use plotkit_motion::{Scheduler, SchedulerConfig};

fn scheduler() -> Scheduler<SimulatedPlotter> {
    Scheduler::new(SimulatedPlotter::default(), SchedulerConfig::default())
}

fn bench_line(c: &mut Criterion) {
    c.bench_function("line 1000 units", |b| {
        b.iter(|| {
            let mut s = scheduler();
            let _ = s.begin_line_logical(
                LogicalPosition::new(0, 0),
                black_box(LogicalPosition::new(1000, 370)),
            );
            s.run_until_idle(10_000)
        })
    });
}

fn bench_circle(c: &mut Criterion) {
    c.bench_function("circle radius 300", |b| {
        b.iter(|| {
            let mut s = scheduler();
            let _ = s.begin_circle_logical(LogicalPosition::new(0, 0), black_box(300));
            s.run_until_idle(10_000)
        })
    });
}

fn bench_hilbert(c: &mut Criterion) {
    c.bench_function("hilbert depth 4", |b| {
        b.iter(|| {
            let mut s = scheduler();
            let _ = s.start_hilbert(black_box(4));
            s.run_until_idle(1_000_000)
        })
    });
}

criterion_group!(benches, bench_line, bench_circle, bench_hilbert);
criterion_main!(benches);
