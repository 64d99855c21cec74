// Board layouts and the chase level script.
//
// Boards are plain text: one character per cell, one line per row.
//   '#' wall   '.' pellet   '@' runner   'd' drone   ' ' empty floor
// Unknown characters are treated as empty floor.

use crate::steering::{Patrol, SeekNearest};
use crate::{DRONE, PELLET, RUNNER, WALL};
use quadrille_sim::config::GameConfiguration;
use quadrille_sim::data::GameData;
use quadrille_sim::entity::GameEntity;
use quadrille_sim::level::{LevelHandle, LevelScript};
use quadrille_sim::types::{Direction, GridPoint};

/// The board the `chase` binary plays by default.
pub const DEFAULT_LAYOUT: &str = "\
################
#@.......... ..#
#.##.####.###..#
#....... ......#
#.###.##.###.#.#
#.....d........#
################";

/// A configuration sized for a layout (sprite size and lives are defaults).
pub fn configuration_for(layout: &str) -> GameConfiguration {
    let rows = layout.lines().count() as i32;
    let cols = layout
        .lines()
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0) as i32;
    GameConfiguration::new(rows, cols, 0, 0)
}

/// Spawn the layout's entities into the universe. Returns the pellet count.
pub fn populate(data: &mut GameData, layout: &str) -> usize {
    let mut pellets = 0;
    for (row, line) in layout.lines().enumerate() {
        for (col, glyph) in line.chars().enumerate() {
            let at = GridPoint::new(col as i32, row as i32);
            match glyph {
                '#' => {
                    data.universe
                        .add_entity(GameEntity::fixed(WALL, at, Box::new('#')));
                }
                '.' => {
                    pellets += 1;
                    data.universe
                        .add_entity(GameEntity::fixed(PELLET, at, Box::new('.')));
                }
                '@' => {
                    data.universe.add_entity(GameEntity::movable(
                        RUNNER,
                        at,
                        Box::new('@'),
                        Box::new(SeekNearest::new(PELLET)),
                    ));
                }
                'd' => {
                    data.universe.add_entity(GameEntity::movable(
                        DRONE,
                        at,
                        Box::new('d'),
                        Box::new(Patrol::new(Direction::Right)),
                    ));
                }
                _ => {}
            }
        }
    }
    pellets
}

/// Level script: spawn a layout, let the default teardown clear it.
pub struct ChaseLevel {
    layout: String,
}

impl ChaseLevel {
    pub fn new(layout: &str) -> Self {
        Self {
            layout: layout.to_string(),
        }
    }
}

impl LevelScript for ChaseLevel {
    fn init(&mut self, data: &mut GameData, _handle: &LevelHandle) {
        let pellets = populate(data, &self.layout);
        log::info!(
            "level populated: {} entities, {} pellets to clear",
            data.universe.len(),
            pellets
        );
    }
}
