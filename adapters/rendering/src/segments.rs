//! Turns a game snapshot into drawing operations.

use std::f32::consts::{FRAC_PI_2, PI};

use glam::Vec2;
use snake_core::{Cell, Direction, GameSnapshot};

use crate::{BoardGeometry, ImageKey, Palette, Rect, Sector, Surface};

/// How a single snake segment is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SegmentShape {
    /// Rounded cap facing the direction of travel.
    Head {
        /// Direction the cap faces.
        facing: Direction,
    },
    /// Last segment, drawn as a full square.
    Tail,
    /// Straight piece joining left and right neighbours.
    Horizontal,
    /// Straight piece joining upper and lower neighbours.
    Vertical,
    /// Turn rounded on its top-left corner.
    TopLeft,
    /// Turn rounded on its top-right corner.
    TopRight,
    /// Turn rounded on its bottom-left corner.
    BottomLeft,
    /// Turn rounded on its bottom-right corner.
    BottomRight,
    /// Fallback for neighbour pairs that form no valid joint.
    Square,
}

impl SegmentShape {
    /// Classifies an interior segment.
    ///
    /// `head_direction` points from the segment toward its neighbour closer to
    /// the head. `tail_direction` is the direction the body travels when moving
    /// from the neighbour closer to the tail into this segment.
    #[must_use]
    pub const fn classify(head_direction: Direction, tail_direction: Direction) -> Self {
        use Direction::{Down, Left, Right, Up};

        match (head_direction, tail_direction) {
            (Left, Left) | (Right, Right) => Self::Horizontal,
            (Up, Up) | (Down, Down) => Self::Vertical,
            (Up, Right) | (Left, Down) => Self::BottomRight,
            (Up, Left) | (Right, Down) => Self::BottomLeft,
            (Right, Up) | (Down, Left) => Self::TopLeft,
            (Down, Right) | (Left, Up) => Self::TopRight,
            _ => Self::Square,
        }
    }
}

/// Shapes for every segment of `snake`, head first.
#[must_use]
pub fn segment_shapes(snake: &[Cell], direction: Direction) -> Vec<SegmentShape> {
    let last = snake.len().saturating_sub(1);
    snake
        .iter()
        .enumerate()
        .map(|(index, cell)| {
            if index == 0 {
                SegmentShape::Head { facing: direction }
            } else if index == last {
                SegmentShape::Tail
            } else {
                let toward_head = cell.direction_to(snake[index - 1]);
                let from_tail = snake[index + 1].direction_to(*cell);
                match (toward_head, from_tail) {
                    (Some(head_direction), Some(tail_direction)) => {
                        SegmentShape::classify(head_direction, tail_direction)
                    }
                    _ => SegmentShape::Square,
                }
            }
        })
        .collect()
}

/// Draws one segment occupying `cell`.
pub fn draw_segment<S>(
    surface: &mut S,
    geometry: &BoardGeometry,
    cell: Cell,
    shape: SegmentShape,
    palette: &Palette,
) where
    S: Surface + ?Sized,
{
    let size = geometry.cell_size();
    let half = size / 2.0;
    let origin = geometry.cell_origin(cell);
    let (x, y) = (origin.x, origin.y);
    let color = palette.snake;

    match shape {
        SegmentShape::Head { facing } => {
            let (start, end, body) = match facing {
                Direction::Right => (1.5 * PI, 2.5 * PI, Rect::new(x, y, half, size)),
                Direction::Left => (0.5 * PI, 1.5 * PI, Rect::new(x + half, y, half, size)),
                Direction::Up => (PI, 2.0 * PI, Rect::new(x, y + half, size, half)),
                Direction::Down => (0.0, PI, Rect::new(x, y, size, half)),
            };
            let cap = Sector::new(geometry.cell_center(cell), half, start, end);
            surface.fill_sector(cap, color);
            surface.fill_rect(body, color);
        }
        SegmentShape::Tail
        | SegmentShape::Horizontal
        | SegmentShape::Vertical
        | SegmentShape::Square => surface.fill_rect(geometry.cell_rect(cell), color),
        SegmentShape::BottomRight => {
            surface.fill_sector(Sector::new(Vec2::new(x, y), size, 0.0, FRAC_PI_2), color);
        }
        SegmentShape::TopRight => {
            let sector = Sector::new(Vec2::new(x, y + size), size, 1.5 * PI, 2.0 * PI);
            surface.fill_sector(sector, color);
        }
        SegmentShape::TopLeft => {
            let sector = Sector::new(Vec2::new(x + size, y + size), size, PI, 1.5 * PI);
            surface.fill_sector(sector, color);
        }
        SegmentShape::BottomLeft => {
            let sector = Sector::new(Vec2::new(x + size, y), size, FRAC_PI_2, PI);
            surface.fill_sector(sector, color);
        }
    }
}

/// Renders a complete frame: background, snake, food, then the game-over overlay.
pub fn render_game<S>(
    surface: &mut S,
    game: &GameSnapshot,
    geometry: &BoardGeometry,
    palette: &Palette,
) where
    S: Surface + ?Sized,
{
    surface.clear(palette.background);

    let shapes = segment_shapes(&game.snake, game.direction);
    for (cell, shape) in game.snake.iter().zip(shapes) {
        draw_segment(surface, geometry, *cell, shape, palette);
    }

    if let Some(food) = game.food {
        let radius = (geometry.cell_size() / 2.0 - 2.0).max(1.0);
        surface.fill_sector(Sector::circle(geometry.cell_center(food), radius), palette.food);
    }

    if game.is_game_over() {
        surface.draw_image_centered(ImageKey::GameOver, palette.game_over_backdrop);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_covers_every_pair() {
        use Direction::{Down, Left, Right, Up};

        let expected = [
            ((Up, Up), SegmentShape::Vertical),
            ((Up, Down), SegmentShape::Square),
            ((Up, Left), SegmentShape::BottomLeft),
            ((Up, Right), SegmentShape::BottomRight),
            ((Down, Up), SegmentShape::Square),
            ((Down, Down), SegmentShape::Vertical),
            ((Down, Left), SegmentShape::TopLeft),
            ((Down, Right), SegmentShape::TopRight),
            ((Left, Up), SegmentShape::TopRight),
            ((Left, Down), SegmentShape::BottomRight),
            ((Left, Left), SegmentShape::Horizontal),
            ((Left, Right), SegmentShape::Square),
            ((Right, Up), SegmentShape::TopLeft),
            ((Right, Down), SegmentShape::BottomLeft),
            ((Right, Left), SegmentShape::Square),
            ((Right, Right), SegmentShape::Horizontal),
        ];

        for ((head, tail), shape) in expected {
            assert_eq!(
                SegmentShape::classify(head, tail),
                shape,
                "({head:?}, {tail:?})"
            );
        }
    }

    #[test]
    fn single_cell_snake_is_only_a_head() {
        let shapes = segment_shapes(&[Cell::new(2, 2)], Direction::Up);
        assert_eq!(
            shapes,
            vec![SegmentShape::Head {
                facing: Direction::Up
            }]
        );
    }

    #[test]
    fn straight_snake_has_head_body_and_tail() {
        let snake = [Cell::new(3, 0), Cell::new(2, 0), Cell::new(1, 0)];
        assert_eq!(
            segment_shapes(&snake, Direction::Right),
            vec![
                SegmentShape::Head {
                    facing: Direction::Right
                },
                SegmentShape::Horizontal,
                SegmentShape::Tail,
            ]
        );
    }

    #[test]
    fn detached_neighbours_fall_back_to_a_square() {
        let snake = [Cell::new(0, 0), Cell::new(3, 3), Cell::new(3, 4)];
        assert_eq!(segment_shapes(&snake, Direction::Left)[1], SegmentShape::Square);
    }
}
