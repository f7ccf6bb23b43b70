//! Pixel geometry for the board and the primitive shapes drawn on it.

use std::f32::consts::TAU;

use glam::Vec2;
use snake_core::{BoardConfig, Cell, GridSize};

use crate::RenderingError;

/// Axis-aligned rectangle in surface pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    /// Top-left corner.
    pub origin: Vec2,
    /// Width and height.
    pub size: Vec2,
}

impl Rect {
    /// Creates a rectangle from its top-left corner and extent.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    /// Whether `point` lies inside the rectangle, edges included.
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        let end = self.origin + self.size;
        point.x >= self.origin.x && point.y >= self.origin.y && point.x <= end.x && point.y <= end.y
    }
}

/// Filled circular sector in surface pixels.
///
/// Angles are radians measured clockwise from the positive x axis, since the
/// surface's y axis points down. The sector sweeps from `start_angle` to
/// `end_angle`, which is never smaller than the start.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sector {
    /// Centre of the circle the sector is cut from.
    pub center: Vec2,
    /// Circle radius.
    pub radius: f32,
    /// Angle the sweep begins at.
    pub start_angle: f32,
    /// Angle the sweep ends at.
    pub end_angle: f32,
}

impl Sector {
    /// Creates a sector sweeping clockwise from `start_angle` to `end_angle`.
    #[must_use]
    pub const fn new(center: Vec2, radius: f32, start_angle: f32, end_angle: f32) -> Self {
        Self {
            center,
            radius,
            start_angle,
            end_angle,
        }
    }

    /// Creates a full disc.
    #[must_use]
    pub const fn circle(center: Vec2, radius: f32) -> Self {
        Self::new(center, radius, 0.0, TAU)
    }

    /// Angle covered by the sweep.
    #[must_use]
    pub fn sweep(&self) -> f32 {
        self.end_angle - self.start_angle
    }

    /// Whether `point` lies inside the sector, boundary included.
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        const EPSILON: f32 = 1e-4;

        let offset = point - self.center;
        if offset.length() > self.radius + EPSILON {
            return false;
        }
        if offset.length() <= EPSILON || self.sweep() >= TAU - EPSILON {
            return true;
        }

        let angle = offset.y.atan2(offset.x).rem_euclid(TAU);
        let start = self.start_angle.rem_euclid(TAU);
        let relative = (angle - start).rem_euclid(TAU);
        relative <= self.sweep() + EPSILON || relative >= TAU - EPSILON
    }
}

/// Maps grid cells to surface pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoardGeometry {
    grid: GridSize,
    cell_size: f32,
}

impl BoardGeometry {
    /// Creates geometry for `grid` with square cells of `cell_size` pixels.
    pub fn new(grid: GridSize, cell_size: u32) -> Result<Self, RenderingError> {
        if cell_size == 0 {
            return Err(RenderingError::ZeroCellSize);
        }

        Ok(Self {
            grid,
            cell_size: cell_size as f32,
        })
    }

    /// Derives geometry from a board configuration.
    pub fn from_board(board: &BoardConfig) -> Result<Self, RenderingError> {
        let grid = board
            .grid_size()
            .map_err(|source| RenderingError::InvalidBoard { source })?;
        Self::new(grid, board.cell_size)
    }

    /// Grid the geometry covers.
    #[must_use]
    pub const fn grid_size(&self) -> GridSize {
        self.grid
    }

    /// Side length of one cell in pixels.
    #[must_use]
    pub const fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Pixel size of the whole board.
    #[must_use]
    pub fn surface_size(&self) -> Vec2 {
        Vec2::new(
            self.grid.width() as f32 * self.cell_size,
            self.grid.height() as f32 * self.cell_size,
        )
    }

    /// Top-left corner of `cell`.
    #[must_use]
    pub fn cell_origin(&self, cell: Cell) -> Vec2 {
        Vec2::new(cell.x() as f32, cell.y() as f32) * self.cell_size
    }

    /// Centre point of `cell`.
    #[must_use]
    pub fn cell_center(&self, cell: Cell) -> Vec2 {
        self.cell_origin(cell) + Vec2::splat(self.cell_size / 2.0)
    }

    /// Full square covered by `cell`.
    #[must_use]
    pub fn cell_rect(&self, cell: Cell) -> Rect {
        let origin = self.cell_origin(cell);
        Rect::new(origin.x, origin.y, self.cell_size, self.cell_size)
    }
}
