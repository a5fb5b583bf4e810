//! Hilbert curve tracing
//!
//! Walks the curve one grid point per call and hands back a line from the
//! current head position to that point.

use super::line::LineJob;
use crate::hilbert::{cell_size, curve_length, d2xy, depth_to_tiles, image_size, tiles_to_depth};
use plotkit_core::{check_logical, check_position, JobError, LogicalPosition, UnitConverter};

/// Hilbert curve driver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HilbertJob {
    n: i32,
    length: i32,
    start: LogicalPosition,
    steps_per_line: i32,
    idx: i32,
}

impl HilbertJob {
    /// Set up a curve of recursion depth `depth` filling a square of
    /// `image_size_mm` whose lower-left corner is `origin`
    pub fn new(
        depth: i32,
        image_size_mm: f64,
        origin: LogicalPosition,
        units: &UnitConverter,
    ) -> Result<Self, JobError> {
        if depth < 0 {
            return Err(JobError::InvalidDepth { depth });
        }

        // past 2^30 tiles the cell is far below one logical unit anyway
        let Some(n) = depth_to_tiles(depth) else {
            return Err(JobError::ResolutionTooLarge { depth, cell_mm: 0.0 });
        };
        let cell_mm = cell_size(n, image_size_mm);
        let too_fine = JobError::ResolutionTooLarge { depth, cell_mm };

        let steps_per_line = units.mm_to_logical(cell_mm);
        if steps_per_line < 1 {
            return Err(too_fine);
        }
        let length = n.checked_mul(n).ok_or(too_fine)?;
        debug_assert_eq!(length, curve_length(n));

        // the last grid line sits (n - 1) cells from the origin
        check_position(origin)?;
        let far = i64::from(steps_per_line) * i64::from(n - 1);
        check_logical(i64::from(origin.x) + far)?;
        check_logical(i64::from(origin.y) + far)?;

        Ok(Self {
            n,
            length,
            start: origin,
            steps_per_line,
            idx: 0,
        })
    }

    /// Tiles per side
    pub fn tiles(&self) -> i32 {
        self.n
    }

    /// Recursion depth the curve was built from
    pub fn depth(&self) -> i32 {
        tiles_to_depth(self.n)
    }

    /// Edge length of the image actually traced, after cell truncation
    pub fn image_size_mm(&self, units: &UnitConverter) -> f64 {
        image_size(self.n, units.logical_to_mm(self.steps_per_line))
    }

    /// Number of points on the curve
    pub fn length(&self) -> i32 {
        self.length
    }

    /// Logical units between neighbouring grid points
    pub fn steps_per_line(&self) -> i32 {
        self.steps_per_line
    }

    /// Lower-left corner of the image
    pub fn start(&self) -> LogicalPosition {
        self.start
    }

    /// Index of the next curve point
    pub fn index(&self) -> i32 {
        self.idx
    }

    /// Whether every point has been issued
    pub fn is_finished(&self) -> bool {
        self.idx >= self.length
    }

    /// Position of curve point `d` on the bed
    pub fn point(&self, d: i32) -> LogicalPosition {
        let (hx, hy) = d2xy(self.n, d);
        LogicalPosition::new(
            self.start.x + hx * self.steps_per_line,
            self.start.y + hy * self.steps_per_line,
        )
    }

    /// Issue the line to the next curve point, or `None` once finished
    pub fn advance(&mut self, head: LogicalPosition) -> Option<LineJob> {
        if self.is_finished() {
            return None;
        }
        let target = self.point(self.idx);
        self.idx += 1;
        Some(LineJob::new(head, head, target))
    }
}
