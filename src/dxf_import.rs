//! DXF drawing import
//!
//! LINE and CIRCLE entities become plotter commands. Coordinates are
//! truncated to whole millimetres and radii rounded; every other entity
//! type is skipped.

use anyhow::{Context, Result};
use dxf::entities::EntityType;
use dxf::Drawing;
use plotkit_motion::Command;
use std::path::Path;

/// Load a DXF file and convert its entities to commands
pub fn load_commands(path: &Path) -> Result<Vec<Command>> {
    let mut file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open DXF file {}", path.display()))?;

    let drawing = Drawing::load(&mut file).context("Failed to parse DXF file")?;
    let commands = commands_from_drawing(&drawing);
    tracing::info!("Read {} commands from {}", commands.len(), path.display());
    Ok(commands)
}

/// Convert the entities of a drawing to commands, in drawing order
pub fn commands_from_drawing(drawing: &Drawing) -> Vec<Command> {
    let mut commands = Vec::new();
    let mut skipped = 0;

    for entity in drawing.entities() {
        match &entity.specific {
            EntityType::Line(line) => commands.push(Command::Line {
                x1: line.p1.x as i32,
                y1: line.p1.y as i32,
                x2: line.p2.x as i32,
                y2: line.p2.y as i32,
            }),
            EntityType::Circle(circle) => commands.push(Command::Circle {
                cx: circle.center.x as i32,
                cy: circle.center.y as i32,
                r: circle.radius.round() as i32,
            }),
            _ => skipped += 1,
        }
    }

    if skipped > 0 {
        tracing::warn!("Skipped {} unsupported DXF entities", skipped);
    }
    commands
}
