// Overlap detection and consequences.
//
// After the movement phase the universe scans every unordered entity pair
// once, asks the `OverlapRules` whether the pair overlaps, and hands each
// detected pair to the `OverlapProcessor` exactly once. Consequences that
// would mutate the entity set — removals — are not applied inline: the
// processor queues them on a `Consequences` buffer, and the universe applies
// the whole buffer after the scan. That keeps iteration valid and guarantees
// each pair is evaluated at most once per tick no matter what the processor
// requested for earlier pairs.
//
// Score, life, and end-of-game mutations go through the `RuleContext`
// helpers; those hit the observable cells directly and need no deferral.
//
// See also: `universe.rs` for the scan, `data.rs` for `RuleContext`.

use crate::data::RuleContext;
use crate::entity::GameEntity;
use crate::types::EntityId;
use smallvec::SmallVec;

/// Game-specific definition of "these two entities overlap".
pub trait OverlapRules: Send {
    /// Geometric or logical overlap test. `None` means the rule cannot
    /// decide; the universe treats that as not overlapping.
    fn is_overlapping(
        &self,
        ctx: &RuleContext<'_>,
        a: &GameEntity,
        b: &GameEntity,
    ) -> Option<bool>;
}

/// Applies game consequences to one detected pair.
///
/// Called at most once per unordered pair per tick. Entity removals must go
/// through `Consequences`; the pair's entities are still present while the
/// scan runs even if an earlier pair requested their removal.
pub trait OverlapProcessor: Send {
    fn process(
        &mut self,
        ctx: &RuleContext<'_>,
        consequences: &mut Consequences,
        a: (EntityId, &GameEntity),
        b: (EntityId, &GameEntity),
    );
}

/// Deferred entity-set mutations collected during one overlap scan.
#[derive(Default)]
pub struct Consequences {
    removals: SmallVec<[EntityId; 4]>,
}

impl Consequences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an entity for removal once the scan completes. Queueing the same
    /// id twice is harmless.
    pub fn remove_entity(&mut self, id: EntityId) {
        if !self.removals.contains(&id) {
            self.removals.push(id);
        }
    }

    pub fn removals(&self) -> &[EntityId] {
        &self.removals
    }

    pub fn is_empty(&self) -> bool {
        self.removals.is_empty()
    }
}

/// Default overlap test: two entities overlap when they occupy the same cell.
pub struct SameTile;

impl OverlapRules for SameTile {
    fn is_overlapping(
        &self,
        _ctx: &RuleContext<'_>,
        a: &GameEntity,
        b: &GameEntity,
    ) -> Option<bool> {
        Some(a.position() == b.position())
    }
}

/// Default processor: overlaps have no consequences.
pub struct IgnoreOverlaps;

impl OverlapProcessor for IgnoreOverlaps {
    fn process(
        &mut self,
        _ctx: &RuleContext<'_>,
        _consequences: &mut Consequences,
        _a: (EntityId, &GameEntity),
        _b: (EntityId, &GameEntity),
    ) {
    }
}
