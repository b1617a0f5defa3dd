use std::sync::Arc;

use crate::collision::{self, CollisionKind};
use crate::direction_gate::DirectionGate;
use crate::event::{EventType, GameEvent, SessionSnapshot};
use crate::food::{FoodField, FoodSpawner};
use crate::identifiers::GameId;
use crate::obstacle::{Obstacle, ObstacleGrowth};
use crate::session_rng::SessionRng;
use crate::snake::Snake;
use crate::types::{Direction, GridSize};
use crate::{log, log_debug};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    Running,
    Terminated,
}

/// Result of one simulation step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Moved,
    Ate,
    Collision(CollisionKind),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ObstacleRules {
    pub threshold: u32,
    pub max_length: u32,
}

/// Mutable state of one playthrough.
pub struct Session {
    game_id: GameId,
    sequence_nr: u64,
    snake: Snake,
    food: FoodField,
    obstacles: Vec<Obstacle>,
    growth: ObstacleGrowth,
    points: u32,
    gate: DirectionGate,
    status: SessionStatus,
}

impl Session {
    pub fn new(game_id: GameId, grid: &GridSize, rules: ObstacleRules, rng: &mut SessionRng) -> Self {
        let snake = Snake::new(grid.center());
        let obstacles = Vec::new();
        // An empty obstacle list always leaves a free cell.
        let food = FoodSpawner::spawn(grid, &obstacles, rng).unwrap_or(FoodField::new(grid.center()));

        Self {
            game_id,
            sequence_nr: 0,
            snake,
            food,
            obstacles,
            growth: ObstacleGrowth::new(rules.threshold, rules.max_length),
            points: 0,
            gate: DirectionGate::new(Direction::Up),
            status: SessionStatus::Running,
        }
    }

    pub fn game_id(&self) -> GameId {
        self.game_id
    }

    pub fn sequence_nr(&self) -> u64 {
        self.sequence_nr
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> FoodField {
        self.food
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn current_direction(&self) -> Direction {
        self.gate.committed()
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == SessionStatus::Running
    }

    pub fn set_direction(&mut self, direction: Direction) -> bool {
        self.is_running() && self.gate.request(direction)
    }

    /// One tick: move, check collisions, then eat, grow obstacles and
    /// respawn food. A collision stops the pipeline and terminates.
    ///
    /// Returns `None` once the session is terminated.
    pub fn advance(&mut self, grid: &GridSize, rng: &mut SessionRng) -> Option<TickOutcome> {
        if !self.is_running() {
            return None;
        }

        let outcome = match self.try_advance(grid, rng) {
            Ok(outcome) => outcome,
            Err(kind) => {
                self.status = SessionStatus::Terminated;
                log!("[game:{}] terminated: {} at {} points", self.game_id, kind, self.points);
                TickOutcome::Collision(kind)
            }
        };
        Some(outcome)
    }

    fn try_advance(&mut self, grid: &GridSize, rng: &mut SessionRng) -> Result<TickOutcome, CollisionKind> {
        let direction = self.gate.take();
        let head = self.snake.step(direction)?;
        if let Some(kind) = collision::detect(head, grid, &self.obstacles) {
            return Err(kind);
        }

        let ate = head == self.food.position;
        if ate {
            self.snake.eat();
            self.points += 1;
            log_debug!("[game:{}] ate food at ({}, {}), points: {}", self.game_id, head.x, head.y, self.points);
        }

        self.growth.advance(self.points, grid, &mut self.obstacles);

        if ate || FoodSpawner::is_blocked(self.food.position, &self.obstacles) {
            self.respawn_food(grid, rng);
        }

        Ok(if ate { TickOutcome::Ate } else { TickOutcome::Moved })
    }

    fn respawn_food(&mut self, grid: &GridSize, rng: &mut SessionRng) {
        match FoodSpawner::spawn(grid, &self.obstacles, rng) {
            Some(food) => self.food = food,
            None => log!("[game:{}] no free cell for food, keeping ({}, {})", self.game_id, self.food.position.x, self.food.position.y),
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            snake: self.snake.clone(),
            food: self.food,
            obstacles: self.obstacles.clone(),
            direction: self.current_direction(),
            points: self.points,
        }
    }

    /// Stamps the next sequence number. START, MOVE and EAT carry a snapshot,
    /// ERROR carries the collision message.
    pub fn next_event(&mut self, event_type: EventType, msg: Option<String>) -> GameEvent {
        let payload = match event_type {
            EventType::Error => None,
            _ => Some(Arc::new(self.snapshot())),
        };
        let event = GameEvent {
            game_id: self.game_id,
            nr: self.sequence_nr,
            event_type,
            msg,
            payload,
        };
        self.sequence_nr += 1;
        event
    }

    #[cfg(test)]
    pub(crate) fn place_food(&mut self, food: FoodField) {
        self.food = food;
    }

    #[cfg(test)]
    pub(crate) fn set_points(&mut self, points: u32) {
        self.points = points;
    }
}
