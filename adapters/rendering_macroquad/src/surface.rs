//! `Surface` implementation drawing with macroquad shapes.

use std::f32::consts::PI;

use glam::Vec2;
use macroquad::{
    color::BLACK,
    shapes::{draw_rectangle, draw_triangle},
    text::{draw_text, measure_text},
    texture::{draw_texture_ex, DrawTextureParams},
};
use snake_rendering::{Color, ImageKey, Rect, Sector, Surface};

use crate::{to_macroquad_color, to_macroquad_vec, ImageAtlas};

/// Largest angle covered by one triangle of a sector fan.
const FAN_STEP: f32 = PI / 16.0;
const FALLBACK_FONT_SIZE: u16 = 48;
const FALLBACK_PADDING: f32 = 16.0;

/// Draws onto the board area of the macroquad window.
pub(crate) struct MacroquadSurface<'a> {
    images: Option<&'a ImageAtlas>,
    size: Vec2,
}

impl<'a> MacroquadSurface<'a> {
    pub(crate) fn new(images: Option<&'a ImageAtlas>, size: Vec2) -> Self {
        Self { images, size }
    }

    fn draw_fallback_banner(&self, image: ImageKey, backdrop: Color) {
        let text = fallback_text(image);
        let dimensions = measure_text(text, None, FALLBACK_FONT_SIZE, 1.0);
        let content = Vec2::new(dimensions.width, dimensions.height) + Vec2::splat(FALLBACK_PADDING);
        let area = centered_rect(self.size, content);
        fill(area, backdrop);
        draw_text(
            text,
            area.origin.x + FALLBACK_PADDING / 2.0,
            area.origin.y + FALLBACK_PADDING / 2.0 + dimensions.offset_y,
            f32::from(FALLBACK_FONT_SIZE),
            BLACK,
        );
    }
}

impl Surface for MacroquadSurface<'_> {
    fn clear(&mut self, color: Color) {
        fill(Rect::new(0.0, 0.0, self.size.x, self.size.y), color);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        fill(rect, color);
    }

    fn fill_sector(&mut self, sector: Sector, color: Color) {
        let color = to_macroquad_color(color);
        for [a, b, c] in sector_fan(sector) {
            draw_triangle(
                to_macroquad_vec(a),
                to_macroquad_vec(b),
                to_macroquad_vec(c),
                color,
            );
        }
    }

    fn draw_image_centered(&mut self, image: ImageKey, backdrop: Color) {
        let Some(texture) = self.images.and_then(|atlas| atlas.texture(image)) else {
            self.draw_fallback_banner(image, backdrop);
            return;
        };

        let area = centered_rect(self.size, Vec2::new(texture.width(), texture.height()));
        fill(area, backdrop);
        draw_texture_ex(
            texture,
            area.origin.x,
            area.origin.y,
            macroquad::color::WHITE,
            DrawTextureParams {
                dest_size: Some(to_macroquad_vec(area.size)),
                ..DrawTextureParams::default()
            },
        );
    }
}

fn fill(rect: Rect, color: Color) {
    draw_rectangle(
        rect.origin.x,
        rect.origin.y,
        rect.size.x,
        rect.size.y,
        to_macroquad_color(color),
    );
}

fn fallback_text(image: ImageKey) -> &'static str {
    match image {
        ImageKey::GameOver => "GAME OVER",
    }
}

/// Rectangle of `content` size centred inside a surface of `surface` size.
fn centered_rect(surface: Vec2, content: Vec2) -> Rect {
    let origin = (surface - content) / 2.0;
    Rect::new(origin.x, origin.y, content.x, content.y)
}

/// Splits a sector into triangles sharing its centre.
fn sector_fan(sector: Sector) -> Vec<[Vec2; 3]> {
    let sweep = sector.sweep().max(0.0);
    let steps = ((sweep / FAN_STEP).ceil() as usize).max(1);
    let point = |angle: f32| sector.center + Vec2::new(angle.cos(), angle.sin()) * sector.radius;

    (0..steps)
        .map(|step| {
            let from = sector.start_angle + sweep * step as f32 / steps as f32;
            let to = sector.start_angle + sweep * (step + 1) as f32 / steps as f32;
            [sector.center, point(from), point(to)]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::f32::consts::{FRAC_PI_2, TAU};

    use super::*;

    #[test]
    fn centered_rect_is_centred() {
        let rect = centered_rect(Vec2::new(600.0, 400.0), Vec2::new(200.0, 100.0));
        assert_eq!(rect, Rect::new(200.0, 150.0, 200.0, 100.0));
    }

    #[test]
    fn full_circle_fan_closes() {
        let fan = sector_fan(Sector::circle(Vec2::new(5.0, 5.0), 3.0));

        assert_eq!(fan.len(), 32);
        let first = fan[0][1];
        let last = fan[fan.len() - 1][2];
        assert!((first - last).length() < 1e-4);
    }

    #[test]
    fn quarter_fan_stays_in_its_quadrant() {
        // Bottom-right quadrant in y-down coordinates.
        let fan = sector_fan(Sector::new(Vec2::ZERO, 10.0, 0.0, FRAC_PI_2));

        assert_eq!(fan.len(), 8);
        for [center, from, to] in fan {
            assert_eq!(center, Vec2::ZERO);
            for point in [from, to] {
                assert!(point.x >= -1e-4 && point.y >= -1e-4, "{point:?}");
                assert!((point.length() - 10.0).abs() < 1e-3);
            }
        }
    }

    #[test]
    fn empty_sweep_still_yields_a_triangle() {
        let fan = sector_fan(Sector::new(Vec2::ZERO, 1.0, TAU, TAU));
        assert_eq!(fan.len(), 1);
    }
}
