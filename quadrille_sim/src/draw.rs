// Drawing seams — the only place rendering code touches the engine.
//
// The engine never draws anything itself; it hands entities an abstract
// `Canvas` and calls a `Viewport` once per tick, before movement. Embeddings
// (the terminal chase game, a windowed frontend) implement both.
//
// See also: `entity.rs` for how `Sprite` becomes an entity's draw capability,
// `level.rs` for the tick loop that calls `Viewport::paint`.

use crate::types::GridPoint;
use crate::universe::GameUniverse;

/// Drawing-surface handle passed to entity draw calls.
///
/// One cell is one sprite slot; renderers decide what a glyph looks like
/// (a terminal character, a texture lookup key, ...).
pub trait Canvas {
    fn draw_tile(&mut self, at: GridPoint, glyph: char);
}

/// An entity's draw capability.
pub trait Sprite: Send {
    fn draw(&self, canvas: &mut dyn Canvas, at: GridPoint);
}

/// The trivial sprite: a single glyph.
impl Sprite for char {
    fn draw(&self, canvas: &mut dyn Canvas, at: GridPoint) {
        canvas.draw_tile(at, *self);
    }
}

/// Per-tick render hook. Runs on the simulation thread, once per tick before
/// the movement phase, so it must not block indefinitely.
pub trait Viewport: Send {
    fn paint(&mut self, universe: &GameUniverse);
}

/// Viewport for headless runs (tests, benches, dedicated servers).
pub struct NullViewport;

impl Viewport for NullViewport {
    fn paint(&mut self, _universe: &GameUniverse) {}
}
