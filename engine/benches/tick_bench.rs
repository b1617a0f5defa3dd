use criterion::{criterion_group, criterion_main, Criterion};
use snake_engine::{Direction, EngineConfig, Game, GameEvent};

fn create_game() -> Game {
    let config = EngineConfig {
        seed: Some(42),
        obstacle_threshold: u32::MAX,
        ..EngineConfig::with_size(400, 400)
    };
    Game::with_config(config).unwrap()
}

/// Square loop inside the grid, so the session never collides.
fn run_lap(game: &mut Game) {
    for direction in [Direction::Left, Direction::Down, Direction::Right, Direction::Up] {
        game.set_direction(direction);
        for _ in 0..50 {
            game.tick();
        }
    }
}

fn bench_ticks_single_segment(c: &mut Criterion) {
    let mut game = create_game();
    game.start();
    c.bench_function("tick_lap_single_segment", |b| b.iter(|| run_lap(&mut game)));
}

fn bench_ticks_with_subscribers(c: &mut Criterion) {
    let mut game = create_game();
    for _ in 0..4 {
        game.subscribe(Box::new(|event: &GameEvent| {
            std::hint::black_box(event.nr);
        }));
    }
    game.start();
    c.bench_function("tick_lap_four_subscribers", |b| b.iter(|| run_lap(&mut game)));
}

criterion_group!(benches, bench_ticks_single_segment, bench_ticks_with_subscribers);
criterion_main!(benches);
