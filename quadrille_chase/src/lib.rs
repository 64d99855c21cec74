// quadrille_chase — a small terminal chase game on the quadrille engine.
//
// A runner auto-chases pellets across a walled board while patrol drones
// pace their corridors; eating a pellet scores points, touching a drone
// costs a life. The game ends when the last pellet is gone or the lives run
// out. Everything game-specific lives here — the engine crate only knows
// entities, rules, and ticks.
//
// Module overview:
// - `board.rs`:    text-layout parsing, entity spawning, the level script.
// - `steering.rs`: movement strategies (patrolling drones, pellet seeking).
// - `rules.rs`:    blocking rules and the overlap consequence processor.
// - `render.rs`:   terminal viewport (Canvas + Viewport implementation).

use quadrille_sim::types::EntityTag;

pub mod board;
pub mod render;
pub mod rules;
pub mod steering;

/// The player-controlled (well, engine-controlled) pellet eater.
pub const RUNNER: EntityTag = EntityTag(0);
/// Collectible worth `PELLET_POINTS`.
pub const PELLET: EntityTag = EntityTag(1);
/// Patrolling hazard; contact costs a life.
pub const DRONE: EntityTag = EntityTag(2);
/// Immovable blocking scenery.
pub const WALL: EntityTag = EntityTag(3);

/// Score awarded per pellet.
pub const PELLET_POINTS: i64 = 10;
