use crate::log;
use crate::types::{GridSize, Position};

pub const DEFAULT_OBSTACLE_THRESHOLD: u32 = 10;
pub const DEFAULT_MAX_OBSTACLE_LENGTH: u32 = 10;

/// Horizontal run of `length` cells starting at `position`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineObstacle {
    position: Position,
    length: u32,
    solid: bool,
}

impl LineObstacle {
    pub fn new(position: Position, length: u32, solid: bool) -> Self {
        Self { position, length, solid }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn length(&self) -> u32 {
        self.length
    }

    pub fn is_solid(&self) -> bool {
        self.solid
    }

    pub fn collides(&self, position: Position) -> bool {
        position.y == self.position.y
            && position.x >= self.position.x
            && (position.x as i64) < self.position.x as i64 + self.length as i64
    }

    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.length as i32).map(move |dx| self.position.offset((dx, 0)))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Obstacle {
    Line(LineObstacle),
}

impl Obstacle {
    pub fn collides(&self, position: Position) -> bool {
        match self {
            Obstacle::Line(line) => line.collides(position),
        }
    }

    /// Informational only: collisions happen whether or not this is set.
    pub fn is_solid(&self) -> bool {
        match self {
            Obstacle::Line(line) => line.is_solid(),
        }
    }

    pub fn as_line(&self) -> Option<&LineObstacle> {
        match self {
            Obstacle::Line(line) => Some(line),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GrowthPhase {
    Dormant,
    Growing,
    Complete,
}

/// Spawns the two line obstacles once the score threshold is hit and
/// lengthens them by one cell per tick until they reach `max_length`.
///
/// The first line is anchored at the left border and grows rightward, the
/// second is anchored at the right border and grows leftward.
#[derive(Clone, Debug)]
pub struct ObstacleGrowth {
    threshold: u32,
    max_length: u32,
    phase: GrowthPhase,
}

impl ObstacleGrowth {
    pub fn new(threshold: u32, max_length: u32) -> Self {
        Self {
            threshold,
            max_length,
            phase: GrowthPhase::Dormant,
        }
    }

    pub fn phase(&self) -> GrowthPhase {
        self.phase
    }

    /// Runs once per successful tick, after points were updated.
    pub fn advance(&mut self, points: u32, grid: &GridSize, obstacles: &mut Vec<Obstacle>) {
        match self.phase {
            GrowthPhase::Dormant => {
                if points < self.threshold {
                    return;
                }
                obstacles.clear();
                obstacles.push(Obstacle::Line(LineObstacle::new(
                    Position::new(0, grid.height() / 3),
                    1,
                    false,
                )));
                obstacles.push(Obstacle::Line(LineObstacle::new(
                    Position::new(grid.width() - 1, grid.height() / 3 * 2),
                    1,
                    false,
                )));
                log!("obstacles appeared at {} points", points);
                self.phase = GrowthPhase::Growing;
                self.complete_if_full(obstacles);
            }
            GrowthPhase::Growing => {
                for (index, obstacle) in obstacles.iter_mut().enumerate() {
                    let Obstacle::Line(line) = obstacle;
                    line.length = (line.length + 1).min(self.max_length);
                    if index == 1 {
                        line.position.x = grid.width() - line.length as i32;
                    }
                }
                self.complete_if_full(obstacles);
            }
            GrowthPhase::Complete => {}
        }
    }

    fn complete_if_full(&mut self, obstacles: &mut [Obstacle]) {
        let full = obstacles.iter().all(|obstacle| match obstacle {
            Obstacle::Line(line) => line.length >= self.max_length,
        });
        if !full {
            return;
        }

        for obstacle in obstacles.iter_mut() {
            let Obstacle::Line(line) = obstacle;
            line.solid = true;
        }
        log!("obstacles reached full length {}", self.max_length);
        self.phase = GrowthPhase::Complete;
    }
}
