use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tokio_stream::wrappers::UnboundedReceiverStream;

use crate::config::EngineConfig;
use crate::event::GameEvent;
use crate::game::{Game, GameState};
use crate::identifiers::{GameId, SubscriptionId};
use crate::log_debug;
use crate::session::TickOutcome;
use crate::types::Direction;

pub type SharedGame = Arc<Mutex<Game>>;

/// Fixed-period timer driving [`Game::tick`]. Holds at most one tick task.
pub struct TickScheduler {
    period: Duration,
    handle: Option<JoinHandle<()>>,
}

impl TickScheduler {
    pub fn new(period: Duration) -> Self {
        Self { period, handle: None }
    }

    /// Cancels any running task, then ticks `game_id` until it ends.
    pub fn arm(&mut self, game: SharedGame, game_id: GameId) {
        self.cancel();
        log_debug!("[game:{}] arming tick scheduler every {:?}", game_id, self.period);
        self.handle = Some(tokio::spawn(run_ticks(game, self.period, game_id)));
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            if !handle.is_finished() {
                log_debug!("cancelling tick scheduler");
            }
            handle.abort();
        }
    }

    pub fn is_armed(&self) -> bool {
        self.handle.as_ref().is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for TickScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}

async fn run_ticks(game: SharedGame, period: Duration, game_id: GameId) {
    let mut timer = interval_at(Instant::now() + period, period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        timer.tick().await;

        let mut game = game.lock().await;
        if game.game_id() != game_id {
            break;
        }
        match game.tick() {
            Some(TickOutcome::Collision(_)) | None => break,
            Some(TickOutcome::Moved | TickOutcome::Ate) => {}
        }
    }
    log_debug!("[game:{}] tick scheduler stopped", game_id);
}

/// Timed facade over [`Game`]: `start` arms the scheduler, collisions
/// disarm it.
pub struct GameDriver {
    game: SharedGame,
    scheduler: TickScheduler,
}

impl GameDriver {
    pub fn new(config: EngineConfig) -> Result<Self, String> {
        let game = Game::with_config(config)?;
        Ok(Self::from_game(game))
    }

    pub fn from_game(game: Game) -> Self {
        let period = game.config().tick_interval();
        Self {
            game: Arc::new(Mutex::new(game)),
            scheduler: TickScheduler::new(period),
        }
    }

    pub async fn start(&mut self) -> GameId {
        self.scheduler.cancel();
        let game_id = self.game.lock().await.start();
        self.scheduler.arm(self.game.clone(), game_id);
        game_id
    }

    pub async fn set_direction(&self, direction: Direction) -> bool {
        self.game.lock().await.set_direction(direction)
    }

    pub async fn observe(&self) -> (SubscriptionId, UnboundedReceiverStream<GameEvent>) {
        let (id, receiver) = self.game.lock().await.subscribe_channel();
        (id, UnboundedReceiverStream::new(receiver))
    }

    pub async fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.game.lock().await.unsubscribe(id)
    }

    pub async fn state(&self) -> GameState {
        self.game.lock().await.state()
    }

    /// Tears the driver down. Only a collision or a restart ends ticking while
    /// the driver is alive; after shutdown the engine is dropped and every
    /// observer stream ends.
    pub fn shutdown(mut self) {
        self.scheduler.cancel();
    }

    pub fn is_ticking(&self) -> bool {
        self.scheduler.is_armed()
    }
}
