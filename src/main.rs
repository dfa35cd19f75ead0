//! Brickfall headless demo
//!
//! Runs an auto-playing session at 60 Hz and logs how far it got.
//! Usage: `brickfall [high-score-file] [frames]`

#[cfg(not(target_arch = "wasm32"))]
use brickfall::highscores::{HighScoreStore, JsonFileStore, MemoryStore};

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Brickfall (native) starting...");

    let mut args = std::env::args().skip(1);
    let path = args.next();
    let frames = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(60 * 60 * 5);

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    match path {
        Some(path) => match JsonFileStore::open(&path) {
            Ok(store) => run_demo(seed, frames, store),
            Err(e) => {
                log::error!("Cannot open high score file {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => run_demo(seed, frames, MemoryStore::new()),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn run_demo<S: HighScoreStore>(seed: u64, frames: u64, store: S) {
    use brickfall::consts::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
    use brickfall::renderer::DrawList;
    use brickfall::sim::GameEvent;
    use brickfall::{Session, Tuning};

    let mut session = Session::new(seed, Tuning::default(), DEFAULT_WIDTH, DEFAULT_HEIGHT, store);
    let mut draw_list = DrawList::default();
    let frame_ms = 1000.0 / 60.0;

    for frame in 0..frames {
        // Idle mode: follow the ball with the touch path, serve whenever it rests
        let ball_x = session.state().ball.pos.x;
        if session.state().ball.is_served() {
            session.input().touch_move(ball_x);
        } else {
            session.input().touch_start(ball_x);
        }

        let events = session.frame(frame as f64 * frame_ms);
        draw_list.clear();
        session.draw(&mut draw_list);

        if events.iter().any(|e| matches!(e, GameEvent::GameOver { .. })) {
            break;
        }
    }

    let state = session.state();
    log::info!(
        "Demo finished after {} frames: level {}, score {}, lives {}, best {}",
        state.frames,
        state.stats.level + 1,
        state.stats.score,
        state.stats.lives,
        state.stats.high_score
    );
    println!(
        "level {} score {} best {}",
        state.stats.level + 1,
        state.stats.score,
        state.stats.high_score
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The web build drives `Session` from JavaScript; nothing to run here
}
