//! Terminal command language
//!
//! One command per line: a case-insensitive keyword followed by
//! space-separated base-10 integers. Coordinates are whole millimetres.
//!
//! ```text
//! LINE x1 y1 x2 y2
//! CIRCLE cx cy r
//! CUT x y
//! DEMO
//! HILBERT depth
//! STOP
//! ```

use plotkit_core::CommandError;
use std::fmt;
use std::str::FromStr;

/// A parsed terminal command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Draw a line between two points
    Line { x1: i32, y1: i32, x2: i32, y2: i32 },
    /// Draw a circle
    Circle { cx: i32, cy: i32, r: i32 },
    /// Draw a line from the current head position
    Cut { x: i32, y: i32 },
    /// Replay the built-in demo
    Demo,
    /// Trace a Hilbert curve of the given recursion depth
    Hilbert { depth: i32 },
    /// Abandon every active job
    Stop,
}

impl Command {
    /// Keyword as typed on the terminal
    pub fn keyword(&self) -> &'static str {
        match self {
            Command::Line { .. } => "LINE",
            Command::Circle { .. } => "CIRCLE",
            Command::Cut { .. } => "CUT",
            Command::Demo => "DEMO",
            Command::Hilbert { .. } => "HILBERT",
            Command::Stop => "STOP",
        }
    }

    /// Whether the command needs a free job slot
    pub fn starts_job(&self) -> bool {
        !matches!(self, Command::Stop)
    }

    /// Parse one terminal line
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let mut words = line.split_whitespace();
        let keyword = words.next().ok_or(CommandError::Empty)?;
        let args: Vec<&str> = words.collect();

        match keyword.to_ascii_uppercase().as_str() {
            "LINE" => {
                let [x1, y1, x2, y2] = integers::<4>("LINE", &args)?;
                Ok(Command::Line { x1, y1, x2, y2 })
            }
            "CIRCLE" => {
                let [cx, cy, r] = integers::<3>("CIRCLE", &args)?;
                Ok(Command::Circle { cx, cy, r })
            }
            "CUT" => {
                let [x, y] = integers::<2>("CUT", &args)?;
                Ok(Command::Cut { x, y })
            }
            "DEMO" => {
                integers::<0>("DEMO", &args)?;
                Ok(Command::Demo)
            }
            "HILBERT" => {
                let [depth] = integers::<1>("HILBERT", &args)?;
                Ok(Command::Hilbert { depth })
            }
            "STOP" => {
                integers::<0>("STOP", &args)?;
                Ok(Command::Stop)
            }
            _ => Err(CommandError::UnknownCommand {
                keyword: keyword.to_string(),
            }),
        }
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Command::parse(s)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keyword())?;
        match self {
            Command::Line { x1, y1, x2, y2 } => write!(f, " {} {} {} {}", x1, y1, x2, y2),
            Command::Circle { cx, cy, r } => write!(f, " {} {} {}", cx, cy, r),
            Command::Cut { x, y } => write!(f, " {} {}", x, y),
            Command::Hilbert { depth } => write!(f, " {}", depth),
            Command::Demo | Command::Stop => Ok(()),
        }
    }
}

fn integers<const N: usize>(command: &'static str, args: &[&str]) -> Result<[i32; N], CommandError> {
    if args.len() > N {
        return Err(CommandError::TooManyArguments {
            command,
            expected: N,
        });
    }
    if args.len() < N {
        return Err(CommandError::TooFewArguments {
            command,
            expected: N,
            found: args.len(),
        });
    }

    let mut values = [0; N];
    for (position, (slot, text)) in values.iter_mut().zip(args).enumerate() {
        *slot = text.parse().map_err(|_| CommandError::InvalidArgument {
            command,
            position: position + 1,
            value: text.to_string(),
        })?;
    }
    Ok(values)
}
