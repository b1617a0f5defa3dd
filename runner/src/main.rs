mod autopilot;

use clap::Parser;
use snake_engine::config::{ConfigManager, EngineConfig};
use snake_engine::logger::{self, LogLevel};
use snake_engine::{EventType, GameDriver, GameEvent, GameId, log, log_debug};
use tokio_stream::StreamExt;
use tokio_stream::wrappers::UnboundedReceiverStream;

use autopilot::Autopilot;

#[derive(Parser)]
#[command(name = "snake_runner", about = "Headless snake engine driven by an autopilot")]
struct Args {
    /// YAML engine config. Missing files fall back to defaults.
    #[arg(long)]
    config: Option<String>,

    #[arg(long)]
    width: Option<i32>,

    #[arg(long)]
    height: Option<i32>,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    tick_interval_ms: Option<u64>,

    #[arg(long, default_value_t = 1)]
    games: u32,

    /// Ends a game that is still alive after this many ticks.
    #[arg(long, default_value_t = 5000)]
    max_ticks: u64,

    #[arg(long)]
    use_log_prefix: bool,

    #[arg(long)]
    verbose: bool,
}

#[derive(Debug)]
struct GameSummary {
    game_id: GameId,
    points: u32,
    ticks: u64,
    ending: String,
}

fn load_config(args: &Args) -> Result<EngineConfig, String> {
    let mut config = match &args.config {
        Some(path) => {
            let manager = ConfigManager::from_yaml_file(path);
            manager.get_config()?
        }
        None => EngineConfig::default(),
    };

    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(tick_interval_ms) = args.tick_interval_ms {
        config.tick_interval_ms = tick_interval_ms;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    Ok(config)
}

async fn play(
    driver: &GameDriver,
    events: &mut UnboundedReceiverStream<GameEvent>,
    game_id: GameId,
    max_ticks: u64,
    config: &EngineConfig,
) -> GameSummary {
    let grid = match config.grid() {
        Ok(grid) => grid,
        Err(e) => {
            return GameSummary { game_id, points: 0, ticks: 0, ending: e };
        }
    };
    let mut points = 0;

    while let Some(event) = events.next().await {
        if event.game_id != game_id {
            log_debug!("[game:{}] ignoring stale event #{} from game {}", game_id, event.nr, event.game_id);
            continue;
        }

        if let Some(snapshot) = event.payload.as_deref() {
            points = snapshot.points;
        }

        match event.event_type {
            EventType::Start => log!("[game:{}] started", game_id),
            EventType::Move => {}
            EventType::Eat => {
                log!("[game:{}] ate food at tick {}, points: {}", game_id, event.nr, points);
            }
            EventType::Error => {
                let ending = event.msg.unwrap_or_else(|| "unknown collision".to_string());
                log!("[game:{}] {} at tick {}", game_id, ending, event.nr);
                return GameSummary { game_id, points, ticks: event.nr, ending };
            }
        }

        if event.nr >= max_ticks {
            return GameSummary { game_id, points, ticks: event.nr, ending: "tick limit reached".to_string() };
        }

        let Some(snapshot) = event.payload.as_deref() else {
            continue;
        };
        match Autopilot::calculate_move(snapshot, &grid) {
            Some(direction) if direction != snapshot.direction => {
                let accepted = driver.set_direction(direction).await;
                log_debug!("[game:{}] turn {:?} at tick {}: {}", game_id, direction, event.nr, accepted);
            }
            Some(_) => {}
            None => log_debug!("[game:{}] no safe move at tick {}", game_id, event.nr),
        }
    }

    GameSummary { game_id, points, ticks: 0, ending: "event stream closed".to_string() }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Runner".to_string())
    } else {
        None
    };
    let level = if args.verbose { LogLevel::Debug } else { LogLevel::Info };
    logger::init_logger(prefix, level);

    let config = load_config(&args)?;
    log!(
        "Running {} game(s) on a {}x{} grid, tick every {}ms",
        args.games, config.width, config.height, config.tick_interval_ms
    );

    let mut driver = GameDriver::new(config.clone())?;
    let (_, mut events) = driver.observe().await;
    let mut summaries = Vec::new();

    for _ in 0..args.games {
        let game_id = driver.start().await;
        let finished = tokio::select! {
            summary = play(&driver, &mut events, game_id, args.max_ticks, &config) => Some(summary),
            _ = tokio::signal::ctrl_c() => None,
        };

        let Some(summary) = finished else {
            log!("Shutdown signal received, stopping");
            break;
        };
        log!(
            "[game:{}] finished after {} ticks with {} points ({})",
            summary.game_id, summary.ticks, summary.points, summary.ending
        );
        summaries.push(summary);
    }
    driver.shutdown();

    if let Some(best) = summaries.iter().max_by_key(|summary| summary.points) {
        log!("Played {} game(s), best score {} in game {}", summaries.len(), best.points, best.game_id);
    }

    Ok(())
}
