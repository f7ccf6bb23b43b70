//! Drawing surface abstraction shared by the renderer and its backends.

use crate::{Color, ImageKey, Rect, Sector};

/// Minimal set of drawing operations the game renderer needs.
pub trait Surface {
    /// Fills the whole surface with `color`.
    fn clear(&mut self, color: Color);

    /// Fills an axis-aligned rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Fills a circular sector. See [`Sector`] for the angle convention.
    fn fill_sector(&mut self, sector: Sector, color: Color);

    /// Draws `image` centred on the surface over a backdrop of the image's size.
    fn draw_image_centered(&mut self, image: ImageKey, backdrop: Color);
}

/// Recorded drawing operation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawCommand {
    /// Whole surface cleared.
    Clear {
        /// Fill color.
        color: Color,
    },
    /// Rectangle filled.
    FillRect {
        /// Filled area.
        rect: Rect,
        /// Fill color.
        color: Color,
    },
    /// Sector filled.
    FillSector {
        /// Filled area.
        sector: Sector,
        /// Fill color.
        color: Color,
    },
    /// Image drawn in the middle of the surface.
    DrawImageCentered {
        /// Image drawn.
        image: ImageKey,
        /// Color of the rectangle behind the image.
        backdrop: Color,
    },
}

impl Surface for Vec<DrawCommand> {
    fn clear(&mut self, color: Color) {
        self.push(DrawCommand::Clear { color });
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.push(DrawCommand::FillRect { rect, color });
    }

    fn fill_sector(&mut self, sector: Sector, color: Color) {
        self.push(DrawCommand::FillSector { sector, color });
    }

    fn draw_image_centered(&mut self, image: ImageKey, backdrop: Color) {
        self.push(DrawCommand::DrawImageCentered { image, backdrop });
    }
}
