// CLI entry point for the chase game.
//
// Builds a session with the chase rules, spawns the default board, and runs
// it on the engine's tick loop with a terminal viewport. Runs until the last
// pellet is eaten or the runner is out of lives.
//
// Usage:
//   chase [OPTIONS]
//     --interval <MS>   Tick interval in milliseconds (default: 100)
//     --max-ms <MS>     Stop the level after this much wall time (optional)

use quadrille_chase::board::{self, ChaseLevel};
use quadrille_chase::render::TerminalViewport;
use quadrille_chase::rules::{ChaseBlocker, ChaseProcessor};
use quadrille_sim::blocking::MoveBlockerChecker;
use quadrille_sim::data::GameData;
use quadrille_sim::game::Game;
use quadrille_sim::level::GameLevel;
use quadrille_sim::overlap::SameTile;
use std::sync::atomic::Ordering;
use std::thread;
use std::time::Duration;

struct Options {
    tick_interval: Duration,
    max_runtime: Option<Duration>,
}

fn main() {
    env_logger::init();
    let options = parse_args();

    let data = GameData::with_rules(
        board::configuration_for(board::DEFAULT_LAYOUT),
        MoveBlockerChecker::new(Box::new(ChaseBlocker)),
        Box::new(SameTile),
        Box::new(ChaseProcessor),
    );
    log::info!(
        "starting chase on a {}x{} board ({}x{} px)",
        data.configuration().nb_columns(),
        data.configuration().nb_rows(),
        data.configuration().pixel_width(),
        data.configuration().pixel_height()
    );

    let mut viewport = TerminalViewport::new(data.configuration());
    let score_mirror = viewport.score_mirror();
    score_mirror.store(data.score.get(), Ordering::SeqCst);
    data.score.add_observer(move |score| {
        score_mirror.store(*score, Ordering::SeqCst);
    });
    let lives_mirror = viewport.lives_mirror();
    lives_mirror.store(data.life.get(), Ordering::SeqCst);
    data.life.add_observer(move |lives| {
        lives_mirror.store(*lives, Ordering::SeqCst);
    });

    let level = GameLevel::with_tick_interval(
        Box::new(ChaseLevel::new(board::DEFAULT_LAYOUT)),
        options.tick_interval,
    );

    // Optional wall-clock cutoff for unattended runs.
    if let Some(max_runtime) = options.max_runtime {
        let handle = level.handle();
        thread::spawn(move || {
            thread::sleep(max_runtime);
            handle.end();
        });
    }

    let mut game = Game::new(data);
    game.add_level(level);
    if let Err(error) = game.start(&mut viewport) {
        eprintln!("chase failed to run: {error}");
        std::process::exit(1);
    }

    println!(
        "game over: score {}, lives left {}",
        game.data.score.get(),
        game.data.life.get()
    );
}

/// Parse command-line arguments. Uses simple `std::env::args()` matching —
/// no clap dependency.
fn parse_args() -> Options {
    let mut options = Options {
        tick_interval: Duration::from_millis(100),
        max_runtime: None,
    };
    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "--interval" => {
                i += 1;
                let millis: u64 = args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("--interval requires a duration in milliseconds");
                    std::process::exit(1);
                });
                options.tick_interval = Duration::from_millis(millis);
            }
            "--max-ms" => {
                i += 1;
                let millis: u64 = args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("--max-ms requires a duration in milliseconds");
                    std::process::exit(1);
                });
                options.max_runtime = Some(Duration::from_millis(millis));
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {other}");
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    options
}

fn print_usage() {
    println!("Usage: chase [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --interval <MS>   Tick interval in milliseconds (default: 100)");
    println!("  --max-ms <MS>     Stop the level after this much wall time");
    println!("  --help, -h        Show this help");
}
