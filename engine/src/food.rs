use crate::log_debug;
use crate::obstacle::Obstacle;
use crate::session_rng::SessionRng;
use crate::types::{GridSize, Position};

const MAX_SPAWN_ATTEMPTS: usize = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FoodField {
    pub position: Position,
}

impl FoodField {
    pub fn new(position: Position) -> Self {
        Self { position }
    }
}

pub struct FoodSpawner;

impl FoodSpawner {
    /// Picks a uniformly random cell not covered by any obstacle. The snake's
    /// body is not avoided.
    ///
    /// Returns `None` only when obstacles cover the whole grid.
    pub fn spawn(grid: &GridSize, obstacles: &[Obstacle], rng: &mut SessionRng) -> Option<FoodField> {
        for _ in 0..MAX_SPAWN_ATTEMPTS {
            let candidate = Position::new(
                rng.random_range(0..grid.width()),
                rng.random_range(0..grid.height()),
            );
            if !Self::is_blocked(candidate, obstacles) {
                return Some(FoodField::new(candidate));
            }
        }

        log_debug!("food sampling exhausted {} attempts, scanning free cells", MAX_SPAWN_ATTEMPTS);
        let free: Vec<Position> = grid
            .cells()
            .filter(|cell| !Self::is_blocked(*cell, obstacles))
            .collect();
        if free.is_empty() {
            return None;
        }
        Some(FoodField::new(free[rng.random_range(0..free.len())]))
    }

    pub fn is_blocked(position: Position, obstacles: &[Obstacle]) -> bool {
        obstacles.iter().any(|obstacle| obstacle.collides(position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::obstacle::LineObstacle;

    #[test]
    fn test_spawn_stays_in_bounds() {
        let grid = GridSize::new(75, 100).unwrap();
        let mut rng = SessionRng::new(42);
        for _ in 0..500 {
            let food = FoodSpawner::spawn(&grid, &[], &mut rng).unwrap();
            assert!(grid.contains(food.position));
        }
    }

    #[test]
    fn test_spawn_avoids_obstacles() {
        let grid = GridSize::new(10, 3).unwrap();
        let obstacles = vec![
            Obstacle::Line(LineObstacle::new(Position::new(0, 0), 10, true)),
            Obstacle::Line(LineObstacle::new(Position::new(0, 2), 10, true)),
        ];
        let mut rng = SessionRng::new(3);
        for _ in 0..200 {
            let food = FoodSpawner::spawn(&grid, &obstacles, &mut rng).unwrap();
            assert_eq!(food.position.y, 1);
        }
    }

    #[test]
    fn test_single_free_cell_is_found() {
        let grid = GridSize::new(10, 2).unwrap();
        let obstacles = vec![
            Obstacle::Line(LineObstacle::new(Position::new(0, 0), 10, true)),
            Obstacle::Line(LineObstacle::new(Position::new(1, 1), 9, true)),
        ];
        let mut rng = SessionRng::new(11);
        let food = FoodSpawner::spawn(&grid, &obstacles, &mut rng).unwrap();
        assert_eq!(food.position, Position::new(0, 1));
    }

    #[test]
    fn test_fully_covered_grid() {
        let grid = GridSize::new(5, 1).unwrap();
        let obstacles = vec![Obstacle::Line(LineObstacle::new(Position::new(0, 0), 5, true))];
        let mut rng = SessionRng::new(1);
        assert_eq!(FoodSpawner::spawn(&grid, &obstacles, &mut rng), None);
    }
}
