pub mod logger;
pub mod config;
pub mod identifiers;
pub mod types;
pub mod session_rng;
pub mod snake;
pub mod direction_gate;
pub mod obstacle;
pub mod food;
pub mod collision;
pub mod event;
pub mod event_bus;
pub mod session;
pub mod game;
pub mod scheduler;

pub use collision::CollisionKind;
pub use config::EngineConfig;
pub use event::{EventType, GameEvent, SessionSnapshot};
pub use food::FoodField;
pub use game::{Game, GameState};
pub use identifiers::{GameId, SubscriptionId};
pub use obstacle::{LineObstacle, Obstacle};
pub use scheduler::{GameDriver, TickScheduler};
pub use session::TickOutcome;
pub use snake::Snake;
pub use types::{Direction, GridSize, Position};
