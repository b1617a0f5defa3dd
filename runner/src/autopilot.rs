use snake_engine::{Direction, GridSize, Position, SessionSnapshot};

/// Greedy food seeker: among the moves the direction gate allows, take the
/// safe one closest to the food.
pub struct Autopilot;

impl Autopilot {
    pub fn calculate_move(snapshot: &SessionSnapshot, grid: &GridSize) -> Option<Direction> {
        let head = snapshot.snake.head_position();
        let target = snapshot.food.position;
        let center = grid.center();

        let mut best: Option<(Direction, (u32, u32))> = None;
        for direction in Self::candidate_directions(snapshot.direction) {
            let next = head.step(direction);
            if !Self::is_safe_position(next, snapshot, grid) {
                continue;
            }
            let score = (next.manhattan_distance(target), next.manhattan_distance(center));
            if best.is_none_or(|(_, best_score)| score < best_score) {
                best = Some((direction, score));
            }
        }

        best.map(|(direction, _)| direction)
    }

    fn candidate_directions(current: Direction) -> [Direction; 3] {
        let [first, second] = current.allowed_turns();
        [current, first, second]
    }

    /// The tail cell is free by the time the head arrives, since the body
    /// shifts before the collision check.
    fn is_safe_position(position: Position, snapshot: &SessionSnapshot, grid: &GridSize) -> bool {
        if !grid.contains(position) {
            return false;
        }
        if snapshot.obstacles.iter().any(|obstacle| obstacle.collides(position)) {
            return false;
        }

        let body_len = snapshot.snake.len();
        !snapshot
            .snake
            .positions()
            .take(body_len.saturating_sub(1))
            .skip(1)
            .any(|segment| segment == position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snake_engine::{FoodField, LineObstacle, Obstacle, Snake};

    fn snapshot(snake: Snake, food: Position, obstacles: Vec<Obstacle>) -> SessionSnapshot {
        SessionSnapshot {
            direction: snake.direction(),
            snake,
            food: FoodField::new(food),
            obstacles,
            points: 0,
        }
    }

    #[test]
    fn test_heads_for_food() {
        let grid = GridSize::new(20, 20).unwrap();
        let state = snapshot(Snake::new(Position::new(10, 10)), Position::new(15, 10), vec![]);
        assert_eq!(Autopilot::calculate_move(&state, &grid), Some(Direction::Right));
    }

    #[test]
    fn test_never_reverses() {
        let grid = GridSize::new(20, 20).unwrap();
        let state = snapshot(Snake::new(Position::new(10, 10)), Position::new(10, 15), vec![]);
        let chosen = Autopilot::calculate_move(&state, &grid).unwrap();
        assert_ne!(chosen, Direction::Down);
    }

    #[test]
    fn test_avoids_border() {
        let grid = GridSize::new(20, 20).unwrap();
        let state = snapshot(Snake::new(Position::new(10, 0)), Position::new(10, 0), vec![]);
        let chosen = Autopilot::calculate_move(&state, &grid).unwrap();
        assert_ne!(chosen, Direction::Up);
    }

    #[test]
    fn test_avoids_obstacle() {
        let grid = GridSize::new(20, 20).unwrap();
        let wall = Obstacle::Line(LineObstacle::new(Position::new(5, 9), 10, false));
        let state = snapshot(Snake::new(Position::new(10, 10)), Position::new(10, 2), vec![wall]);
        let chosen = Autopilot::calculate_move(&state, &grid).unwrap();
        assert_ne!(chosen, Direction::Up);
    }

    #[test]
    fn test_avoids_own_body() {
        let grid = GridSize::new(20, 20).unwrap();
        let mut snake = Snake::new(Position::new(10, 10));
        for _ in 0..4 {
            snake.eat();
        }
        snake.step(Direction::Left).unwrap();
        snake.step(Direction::Down).unwrap();
        let state = snapshot(snake, Position::new(15, 11), vec![]);
        let chosen = Autopilot::calculate_move(&state, &grid).unwrap();
        assert_ne!(chosen, Direction::Right);
    }
}
