use anyhow::Context;
use plotkit::terminal::run_reader;
use plotkit::{init_logging, thread_safe, Config, Scheduler, BUILD_DATE, VERSION};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

const USAGE: &str = "Usage: plotkit [CONFIG]

Drives a simulated plotter from commands read on stdin:
  LINE x1 y1 x2 y2   CIRCLE cx cy r   CUT x y
  DEMO               HILBERT depth    STOP
  READ file.dxf      QUIT
Coordinates are whole millimetres. Each drawing command waits for the
previous one to finish. CONFIG is a .toml or .json file.";

fn main() -> anyhow::Result<()> {
    let config_path = match std::env::args().nth(1).as_deref() {
        Some("-h" | "--help") => {
            println!("{}", USAGE);
            return Ok(());
        }
        Some("-V" | "--version") => {
            println!("plotkit {} (built {})", VERSION, BUILD_DATE);
            return Ok(());
        }
        Some(path) => Some(PathBuf::from(path)),
        None => None,
    };

    // Initialize logging
    init_logging()?;

    let config = Config::load_or_default(config_path.as_deref())
        .context("Failed to load configuration")?;
    let realtime = config.simulator.realtime;
    let idle_pause = Duration::from_millis(u64::from(config.timing.tick_ms));

    println!("PlotKit {} (built {})", VERSION, BUILD_DATE);

    let mut scheduler = Scheduler::new(config.simulator(), config.scheduler_config());
    if let Err(err) = scheduler.home() {
        tracing::warn!("Continuing without a homed origin: {}", err);
    }
    for line in scheduler.hal_mut().take_status_lines() {
        println!("{}", line);
    }

    let scheduler = thread_safe(scheduler);
    let input_closed = Arc::new(AtomicBool::new(false));

    let reader = {
        let scheduler = Arc::clone(&scheduler);
        let input_closed = Arc::clone(&input_closed);
        std::thread::Builder::new()
            .name("terminal".to_string())
            .spawn(move || {
                run_reader(std::io::stdin().lock(), &scheduler, idle_pause);
                input_closed.store(true, Ordering::Release);
            })
            .context("Failed to spawn terminal thread")?
    };

    loop {
        let (lines, busy) = {
            let mut scheduler = scheduler.lock();
            scheduler.tick();
            (scheduler.hal_mut().take_status_lines(), scheduler.is_busy())
        };
        for line in lines {
            println!("{}", line);
        }

        if !busy {
            if input_closed.load(Ordering::Acquire) {
                break;
            }
            if !realtime {
                std::thread::sleep(idle_pause);
            }
        }
    }

    if reader.join().is_err() {
        tracing::error!("Terminal thread panicked");
    }
    tracing::info!("Exiting");
    Ok(())
}
