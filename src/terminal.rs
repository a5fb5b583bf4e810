//! Terminal input handling
//!
//! Reads command lines and dispatches them to a shared scheduler. A drawing
//! command waits until the plotter is idle before it is executed, so a piped
//! script draws one shape after another. `STOP` is executed at once.
//! `READ <file.dxf>` expands into the lines and circles of a drawing.

use crate::dxf_import;
use plotkit_core::{CommandError, PlotterHal, StatusSink, ThreadSafe};
use plotkit_motion::{Command, Scheduler};
use std::io::BufRead;
use std::path::PathBuf;
use std::time::Duration;

/// One line of terminal input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalInput {
    /// A plotter command
    Command(Command),
    /// Draw the entities of a DXF file
    Read(PathBuf),
    /// Stop reading input
    Quit,
}

impl TerminalInput {
    /// Parse one input line; blank lines yield `None`
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (keyword, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(keyword, rest)| (keyword, rest.trim()));

        if keyword.eq_ignore_ascii_case("QUIT") {
            if !rest.is_empty() {
                return Err(CommandError::TooManyArguments {
                    command: "QUIT",
                    expected: 0,
                });
            }
            return Ok(Some(TerminalInput::Quit));
        }
        if keyword.eq_ignore_ascii_case("READ") {
            if rest.is_empty() {
                return Err(CommandError::TooFewArguments {
                    command: "READ",
                    expected: 1,
                    found: 0,
                });
            }
            return Ok(Some(TerminalInput::Read(PathBuf::from(rest))));
        }

        Command::parse(line).map(|command| Some(TerminalInput::Command(command)))
    }
}

/// Execute `command`, first waiting for the active job if it needs the slot
///
/// The lock is released between polls so the control loop keeps ticking.
pub fn submit<H: PlotterHal>(
    scheduler: &ThreadSafe<Scheduler<H>>,
    command: &Command,
    poll: Duration,
) -> plotkit_core::Result<()> {
    loop {
        {
            let mut scheduler = scheduler.lock();
            if !command.starts_job() || !scheduler.is_busy() {
                return scheduler.execute(command);
            }
        }
        std::thread::sleep(poll);
    }
}

/// Read lines from `input` until `QUIT` or end of input
///
/// Errors are reported on the status channel; reading continues.
pub fn run_reader<R, H>(input: R, scheduler: &ThreadSafe<Scheduler<H>>, poll: Duration)
where
    R: BufRead,
    H: PlotterHal,
{
    for line in input.lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                tracing::error!("Failed to read terminal input: {}", err);
                break;
            }
        };

        let commands = match TerminalInput::parse(&line) {
            Ok(None) => continue,
            Ok(Some(TerminalInput::Quit)) => break,
            Ok(Some(TerminalInput::Command(command))) => vec![command],
            Ok(Some(TerminalInput::Read(path))) => match dxf_import::load_commands(&path) {
                Ok(commands) => commands,
                Err(err) => {
                    tracing::warn!("{:#}", err);
                    scheduler.lock().hal_mut().emit(&format!("Error: {:#}", err));
                    continue;
                }
            },
            Err(err) => {
                scheduler.lock().hal_mut().emit(&format!("Error: {}", err));
                continue;
            }
        };

        for command in &commands {
            // rejections are reported on the status channel
            let _ = submit(scheduler, command, poll);
        }
    }
}
