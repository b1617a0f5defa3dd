use std::fmt;

use crate::obstacle::Obstacle;
use crate::types::{GridSize, Position};

/// Fatal conditions that end a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollisionKind {
    BorderCrossed,
    SelfCollision,
    ObstacleCollision,
}

impl CollisionKind {
    pub fn message(&self) -> &'static str {
        match self {
            CollisionKind::BorderCrossed => "border crossed",
            CollisionKind::SelfCollision => "snake crashed into itself",
            CollisionKind::ObstacleCollision => "snake crashed into obstacle",
        }
    }
}

impl fmt::Display for CollisionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Checks a freshly moved head against the border, then the obstacles.
///
/// Self collision is detected earlier, by [`crate::snake::Snake::step`].
/// Obstacles block regardless of their `solid` flag.
pub fn detect(head: Position, grid: &GridSize, obstacles: &[Obstacle]) -> Option<CollisionKind> {
    if !grid.contains(head) {
        return Some(CollisionKind::BorderCrossed);
    }
    if obstacles.iter().any(|obstacle| obstacle.collides(head)) {
        return Some(CollisionKind::ObstacleCollision);
    }
    None
}
