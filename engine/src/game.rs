use tokio::sync::mpsc;

use crate::config::{EngineConfig, Validate};
use crate::event::{EventType, GameEvent};
use crate::event_bus::{EventBus, EventListener};
use crate::identifiers::{GameId, SubscriptionId};
use crate::session::{ObstacleRules, Session, TickOutcome};
use crate::session_rng::SessionRng;
use crate::types::{Direction, GridSize};
use crate::{log, log_debug};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameState {
    Idle,
    Running,
    Terminated,
}

/// The simulation engine. Owns at most one session at a time and publishes
/// its events. Time does not pass by itself: [`Game::tick`] runs one step,
/// see [`crate::scheduler::GameDriver`] for the timed version.
pub struct Game {
    config: EngineConfig,
    grid: GridSize,
    rules: ObstacleRules,
    game_id: GameId,
    session: Option<Session>,
    bus: EventBus,
    rng: SessionRng,
}

impl Game {
    pub fn new(width: i32, height: i32) -> Result<Self, String> {
        Self::with_config(EngineConfig::with_size(width, height))
    }

    pub fn with_config(config: EngineConfig) -> Result<Self, String> {
        config.validate()?;
        let grid = config.grid()?;
        let rng = SessionRng::from_optional_seed(config.seed);
        log_debug!("engine created for {}x{} grid, seed {}", grid.width(), grid.height(), rng.seed());

        Ok(Self {
            rules: config.obstacle_rules(),
            config,
            grid,
            game_id: GameId::default(),
            session: None,
            bus: EventBus::new(),
            rng,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn grid(&self) -> &GridSize {
        &self.grid
    }

    /// Id of the current or most recently ended session. Bumped by every
    /// `start` and again when a session ends in a collision.
    pub fn game_id(&self) -> GameId {
        self.game_id
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn state(&self) -> GameState {
        match &self.session {
            None => GameState::Idle,
            Some(session) if session.is_running() => GameState::Running,
            Some(_) => GameState::Terminated,
        }
    }

    pub fn is_running(&self) -> bool {
        self.state() == GameState::Running
    }

    /// Replaces whatever session exists with a fresh one and emits START.
    pub fn start(&mut self) -> GameId {
        self.game_id = self.game_id.next();
        let mut session = Session::new(self.game_id, &self.grid, self.rules, &mut self.rng);
        let head = session.snake().head_position();
        let food = session.food().position;
        log!(
            "[game:{}] started, head at ({}, {}), food at ({}, {})",
            self.game_id, head.x, head.y, food.x, food.y
        );

        let event = session.next_event(EventType::Start, None);
        self.session = Some(session);
        self.bus.set_active_game(Some(self.game_id));
        self.bus.publish(event);
        self.game_id
    }

    /// Silently ignored unless the turn is allowed by the direction gate.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        match self.session.as_mut() {
            Some(session) => session.set_direction(direction),
            None => false,
        }
    }

    /// Runs one simulation step and publishes exactly one event for it.
    /// Returns `None` when no session is running.
    pub fn tick(&mut self) -> Option<TickOutcome> {
        let session = self.session.as_mut()?;
        let outcome = session.advance(&self.grid, &mut self.rng)?;

        let event = match outcome {
            TickOutcome::Moved => session.next_event(EventType::Move, None),
            TickOutcome::Ate => session.next_event(EventType::Eat, None),
            TickOutcome::Collision(kind) => {
                session.next_event(EventType::Error, Some(kind.message().to_string()))
            }
        };
        self.bus.publish(event);

        if let TickOutcome::Collision(_) = outcome {
            self.game_id = self.game_id.next();
            self.bus.set_active_game(None);
        }
        Some(outcome)
    }

    pub fn subscribe(&mut self, listener: EventListener) -> SubscriptionId {
        self.bus.subscribe(listener)
    }

    pub fn subscribe_channel(&mut self) -> (SubscriptionId, mpsc::UnboundedReceiver<GameEvent>) {
        self.bus.subscribe_channel()
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    #[cfg(test)]
    pub(crate) fn session_mut(&mut self) -> Option<&mut Session> {
        self.session.as_mut()
    }
}
