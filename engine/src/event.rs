use std::fmt;
use std::sync::Arc;

use crate::food::FoodField;
use crate::identifiers::GameId;
use crate::obstacle::Obstacle;
use crate::snake::Snake;
use crate::types::Direction;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventType {
    Start,
    Move,
    Eat,
    Error,
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventType::Start => "START",
            EventType::Move => "MOVE",
            EventType::Eat => "EAT",
            EventType::Error => "ERROR",
        };
        f.write_str(name)
    }
}

/// Frozen copy of a session taken when an event is emitted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub snake: Snake,
    pub food: FoodField,
    pub obstacles: Vec<Obstacle>,
    pub direction: Direction,
    pub points: u32,
}

#[derive(Clone, Debug)]
pub struct GameEvent {
    pub game_id: GameId,
    pub nr: u64,
    pub event_type: EventType,
    pub msg: Option<String>,
    pub payload: Option<Arc<SessionSnapshot>>,
}

impl GameEvent {
    pub fn is_terminal(&self) -> bool {
        self.event_type == EventType::Error
    }
}
