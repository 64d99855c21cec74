// quadrille_sim — pure Rust tile-game simulation engine.
//
// This crate contains the whole simulation core of quadrille: the entity
// universe, the per-tick movement and overlap pipeline, the pluggable
// blocking/overlap rule seams, and the fixed-tick level loop. It has zero
// rendering dependencies and can be tested, benchmarked, and run headless.
//
// Module overview:
// - `types.rs`:      GridPoint, Direction, entity IDs and tags.
// - `config.rs`:     GameConfiguration — board dimensions, sprite size, lives,
//                    with defaults for non-positive inputs, plus factories for
//                    the default rule collaborators.
// - `observable.rs`: ObservableValue<T> — a mutable cell that notifies its
//                    listeners synchronously on every write.
// - `entity.rs`:     GameEntity — capability record (draw always, movement
//                    optional) plus the Steering trait and EntityView.
// - `draw.rs`:       Canvas / Sprite / Viewport — the seams where rendering
//                    code plugs in. The engine never draws anything itself.
// - `blocking.rs`:   MoveBlockerRules + MoveBlockerChecker — per-move
//                    legality, undecidable means blocked.
// - `overlap.rs`:    OverlapRules + OverlapProcessor + Consequences — pair
//                    detection and deferred consequence application.
// - `universe.rs`:   GameUniverse — the live entity set and the two tick
//                    phases (all_one_step_moves, process_all_overlaps), plus
//                    the pre-tick BoardSnapshot consulted by rules.
// - `data.rs`:       GameData — one game session's state bundle (score, life,
//                    end-of-game cells, universe, rule objects) and the
//                    RuleContext view handed to every rule call.
// - `level.rs`:      GameLevel — level state machine and the cancellable
//                    fixed-tick loop, run on a dedicated simulation thread.
// - `game.rs`:       Game — session driver running levels in order until the
//                    end-of-game flag is raised.
//
// Companion crate `quadrille_chase` wraps this library in a small terminal
// chase game. That boundary is enforced at the compiler level — this crate
// cannot depend on terminal output, frame timing beyond its own tick sleep,
// or any input handling.
//
// **Single-writer discipline.** Within a running level, the universe and the
// rule objects are touched only by the simulation thread. The observable
// cells (score, life, end-of-game) are the only state shared with the
// outside; external listeners read and react, never write back.

pub mod blocking;
pub mod config;
pub mod data;
pub mod draw;
pub mod entity;
pub mod game;
pub mod level;
pub mod observable;
pub mod overlap;
pub mod types;
pub mod universe;
