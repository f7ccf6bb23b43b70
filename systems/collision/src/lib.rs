#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure collision checks used by the world before it moves the snake.
//!
//! Every function here inspects an immutable snake snapshot and a candidate
//! head cell; nothing is cached between calls.

use snake_core::{Cell, GridSize};

/// Obstacle the candidate head would run into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Collision {
    /// The candidate lies outside the grid.
    Wall,
    /// The candidate overlaps a body cell that stays occupied after the move.
    SelfIntersection,
}

/// Reports whether `candidate` lies outside the grid.
#[must_use]
pub fn hits_wall(grid: GridSize, candidate: Cell) -> bool {
    !grid.contains(candidate)
}

/// Reports whether `candidate` overlaps the body as it will be after the move.
///
/// `body` is ordered head first. When the snake is not eating, its current
/// tail cell is vacated during the move and is therefore excluded; when it is
/// eating the tail stays put and the whole body is checked.
#[must_use]
pub fn hits_body<'a, I>(body: I, candidate: Cell, eating: bool) -> bool
where
    I: IntoIterator<Item = &'a Cell>,
    I::IntoIter: ExactSizeIterator,
{
    let body = body.into_iter();
    let checked = if eating {
        body.len()
    } else {
        body.len().saturating_sub(1)
    };
    body.take(checked).any(|cell| *cell == candidate)
}

/// Runs the wall check followed by the self-intersection check.
#[must_use]
pub fn detect<'a, I>(grid: GridSize, body: I, candidate: Cell, eating: bool) -> Option<Collision>
where
    I: IntoIterator<Item = &'a Cell>,
    I::IntoIter: ExactSizeIterator,
{
    if hits_wall(grid, candidate) {
        return Some(Collision::Wall);
    }

    if hits_body(body, candidate, eating) {
        return Some(Collision::SelfIntersection);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wall_takes_precedence_over_body() {
        let grid = GridSize::new(2, 2);
        let body = [Cell::new(0, 0)];
        assert_eq!(
            detect(grid, body.iter(), Cell::new(-1, 0), true),
            Some(Collision::Wall)
        );
    }

    #[test]
    fn single_cell_snake_never_hits_itself_when_moving() {
        let body = [Cell::new(4, 4)];
        assert!(!hits_body(body.iter(), Cell::new(4, 4), false));
        assert!(hits_body(body.iter(), Cell::new(4, 4), true));
    }
}
