// Game entities — capability records tracked by the universe.
//
// An entity is a position, a game-assigned tag, a draw capability (always
// present), and an optional movement capability. "Can this entity move" is
// not a boolean flag but the presence of a `Steering` — a static wall simply
// has none, and the movement phase skips it without asking.
//
// Entities know nothing about the universe they live in; the universe tracks
// membership and owns the records. Rule objects see entities either as full
// `&GameEntity` references (overlap phase) or as copied `EntityView`s
// (blocking phase and the pre-tick board snapshot).

use crate::data::RuleContext;
use crate::draw::{Canvas, Sprite};
use crate::types::{EntityId, EntityTag, GridPoint};

/// Movement capability: produces the candidate one-step target for each tick.
///
/// `at` is the entity's current cell; `ctx` exposes the board configuration
/// and the pre-tick positions of every entity, so strategies can chase, flee,
/// or patrol. Returning `at` means "stand still this tick". The returned cell
/// is only a candidate — the move blocker checker has the final word.
pub trait Steering: Send {
    fn next_step(&mut self, at: GridPoint, ctx: &RuleContext<'_>) -> GridPoint;
}

/// Copied, read-only facts about an entity, safe to hold across mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EntityView {
    pub id: EntityId,
    pub tag: EntityTag,
    pub position: GridPoint,
}

/// A drawable, optionally movable object tracked by the universe.
pub struct GameEntity {
    tag: EntityTag,
    position: GridPoint,
    sprite: Box<dyn Sprite>,
    steering: Option<Box<dyn Steering>>,
}

impl GameEntity {
    /// An entity without a movement capability (walls, pellets, scenery).
    pub fn fixed(tag: EntityTag, position: GridPoint, sprite: Box<dyn Sprite>) -> Self {
        Self {
            tag,
            position,
            sprite,
            steering: None,
        }
    }

    /// An entity that attempts one step per tick, driven by `steering`.
    pub fn movable(
        tag: EntityTag,
        position: GridPoint,
        sprite: Box<dyn Sprite>,
        steering: Box<dyn Steering>,
    ) -> Self {
        Self {
            tag,
            position,
            sprite,
            steering: Some(steering),
        }
    }

    pub fn tag(&self) -> EntityTag {
        self.tag
    }

    pub fn position(&self) -> GridPoint {
        self.position
    }

    pub fn set_position(&mut self, position: GridPoint) {
        self.position = position;
    }

    pub fn is_movable(&self) -> bool {
        self.steering.is_some()
    }

    /// Draw this entity at its current position.
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        self.sprite.draw(canvas, self.position);
    }

    pub fn view(&self, id: EntityId) -> EntityView {
        EntityView {
            id,
            tag: self.tag,
            position: self.position,
        }
    }

    /// Ask the movement capability for this tick's candidate target.
    /// `None` for entities without one.
    pub(crate) fn steer(&mut self, ctx: &RuleContext<'_>) -> Option<GridPoint> {
        let at = self.position;
        let steering = self.steering.as_mut()?;
        Some(steering.next_step(at, ctx))
    }
}
