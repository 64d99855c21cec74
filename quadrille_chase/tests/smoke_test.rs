// End-to-end smoke tests for the chase game.
//
// Each test builds a real session with the chase rules and runs a real level
// — dedicated simulation thread, tick loop and all — then asserts on the
// observable outcome. Tick intervals are kept tiny so the suite stays fast.

use quadrille_chase::PELLET_POINTS;
use quadrille_chase::board::{ChaseLevel, configuration_for};
use quadrille_chase::rules::{ChaseBlocker, ChaseProcessor};
use quadrille_sim::blocking::MoveBlockerChecker;
use quadrille_sim::data::GameData;
use quadrille_sim::draw::NullViewport;
use quadrille_sim::game::Game;
use quadrille_sim::level::{GameLevel, LevelState};
use quadrille_sim::overlap::SameTile;
use std::thread;
use std::time::Duration;

fn chase_data(layout: &str) -> GameData {
    GameData::with_rules(
        configuration_for(layout),
        MoveBlockerChecker::new(Box::new(ChaseBlocker)),
        Box::new(SameTile),
        Box::new(ChaseProcessor),
    )
}

fn chase_level(layout: &str) -> GameLevel {
    GameLevel::with_tick_interval(Box::new(ChaseLevel::new(layout)), Duration::from_millis(1))
}

#[test]
fn clearing_every_pellet_finishes_the_game() {
    // A straight corridor: the runner eats both pellets in two ticks.
    let layout = "\
#####
#@..#
#####";
    let mut game = Game::new(chase_data(layout));
    game.add_level(chase_level(layout));

    game.start(&mut NullViewport).unwrap();

    assert!(game.data.end_of_game.get());
    assert_eq!(game.data.score.get(), 2 * PELLET_POINTS);
    // Lives untouched, universe cleared by the default teardown.
    assert_eq!(game.data.life.get(), 2);
    assert!(game.data.universe.is_empty());
}

#[test]
fn drone_contact_drains_lives_and_ends_the_game() {
    // No pellets: the runner stands still while the drone paces the corridor
    // across it, costing one life per pass.
    let layout = "\
######
#d  @#
######";
    let mut game = Game::new(chase_data(layout));
    game.add_level(chase_level(layout));

    game.start(&mut NullViewport).unwrap();

    assert!(game.data.end_of_game.get());
    assert_eq!(game.data.life.get(), 0);
    assert_eq!(game.data.score.get(), 0);
}

#[test]
fn opposite_moves_pass_through_without_contact() {
    // Runner and drone trade cells in the same tick. Overlap is cell
    // equality after movement, so crossing entities never collide: the
    // runner reaches the pellet unharmed.
    let layout = "\
######
#@d.##
######";
    let mut game = Game::new(chase_data(layout));
    game.add_level(chase_level(layout));

    game.start(&mut NullViewport).unwrap();

    assert!(game.data.end_of_game.get());
    assert_eq!(game.data.score.get(), PELLET_POINTS);
    assert_eq!(game.data.life.get(), 2);
}

#[test]
fn default_board_makes_progress_under_a_deadline() {
    // The full default board with a watchdog: whether or not the board gets
    // cleared within the deadline, the runner must have eaten something by
    // then.
    let layout = quadrille_chase::board::DEFAULT_LAYOUT;
    let level = chase_level(layout);
    let watchdog_handle = level.handle();
    let watchdog = thread::spawn(move || {
        thread::sleep(Duration::from_millis(500));
        watchdog_handle.end();
    });

    let mut game = Game::new(chase_data(layout));
    game.add_level(level);
    game.start(&mut NullViewport).unwrap();
    watchdog.join().unwrap();

    assert!(game.data.score.get() >= PELLET_POINTS);
}

#[test]
fn a_running_level_can_be_stopped_externally() {
    // Started directly (no session driver wiring the end-of-game observer),
    // the level keeps ticking even after the board is cleared — until the
    // external handle ends it.
    let layout = "\
#####
#@.d#
#####";
    let mut data = chase_data(layout);
    let mut level = chase_level(layout);

    let handle = level.handle();
    let stopper = thread::spawn(move || {
        thread::sleep(Duration::from_millis(40));
        handle.end();
    });

    level.start(&mut data, &mut NullViewport).unwrap();
    stopper.join().unwrap();

    assert_eq!(level.state(), LevelState::Stopped);
    assert_eq!(data.score.get(), PELLET_POINTS);
    assert!(data.end_of_game.get());
}
