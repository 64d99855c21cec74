// The game universe — the live entity set and the two tick phases.
//
// Entities live in a `BTreeMap<EntityId, GameEntity>`: iteration order is
// ascending id (= insertion order), deterministic, and stable within a call.
// Ids are allocated monotonically at insertion and never reused, and
// `add_entity` takes ownership of the record, so the set cannot hold the same
// identity twice.
//
// Both phases iterate a snapshot of the ids taken at phase start, so rule
// consequences cannot corrupt the traversal:
// - `all_one_step_moves` asks each movable entity's steering for a candidate
//   target, validates it with the `MoveBlockerChecker`, and applies it only
//   if allowed. Blocking decisions read the pre-tick `BoardSnapshot` carried
//   by the context, never half-moved state, so the outcome is independent of
//   processing order.
// - `process_all_overlaps` tests every unordered pair once, hands detected
//   pairs to the processor, and applies queued removals after the scan.
//
// See also: `data.rs` for the wrappers that build the snapshot and context,
// `blocking.rs`/`overlap.rs` for the rule seams.

use crate::blocking::MoveBlockerChecker;
use crate::data::RuleContext;
use crate::entity::{EntityView, GameEntity};
use crate::overlap::{Consequences, OverlapProcessor, OverlapRules};
use crate::types::{EntityId, EntityTag, GridPoint};
use log::debug;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::collections::BTreeMap;

/// Owns every entity of one game session.
#[derive(Default)]
pub struct GameUniverse {
    entities: BTreeMap<EntityId, GameEntity>,
    next_id: u64,
}

impl GameUniverse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entity and return its freshly allocated id.
    pub fn add_entity(&mut self, entity: GameEntity) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.entities.insert(id, entity);
        id
    }

    pub fn entity(&self, id: EntityId) -> Option<&GameEntity> {
        self.entities.get(&id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut GameEntity> {
        self.entities.get_mut(&id)
    }

    /// Remove one entity. Removing an absent id is a no-op returning `None`.
    pub fn remove_entity(&mut self, id: EntityId) -> Option<GameEntity> {
        self.entities.remove(&id)
    }

    /// Remove every listed entity that is present. Order-independent.
    pub fn remove_entities(&mut self, ids: &[EntityId]) {
        for id in ids {
            self.entities.remove(id);
        }
    }

    /// Empty the universe (level teardown). Idempotent.
    pub fn remove_all_entities(&mut self) {
        self.entities.clear();
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Read-only traversal of the current membership, in ascending-id order.
    /// Restartable: each call yields a fresh iterator.
    pub fn entities(&self) -> impl Iterator<Item = (EntityId, &GameEntity)> {
        self.entities.iter().map(|(id, entity)| (*id, entity))
    }

    /// Owned index of every entity's current position, for rule contexts.
    pub fn board_snapshot(&self) -> BoardSnapshot {
        let mut by_tile: FxHashMap<GridPoint, SmallVec<[EntityView; 2]>> = FxHashMap::default();
        for (&id, entity) in &self.entities {
            by_tile.entry(entity.position()).or_default().push(entity.view(id));
        }
        BoardSnapshot { by_tile }
    }

    /// Movement phase: one validated step attempt per movable entity.
    ///
    /// `ctx` must carry a board snapshot taken before this call; steering and
    /// blocking rules see pre-tick positions only.
    pub fn all_one_step_moves(&mut self, checker: &MoveBlockerChecker, ctx: &RuleContext<'_>) {
        let ids: Vec<EntityId> = self.entities.keys().copied().collect();
        for id in ids {
            let Some(entity) = self.entities.get_mut(&id) else {
                continue;
            };
            let Some(candidate) = entity.steer(ctx) else {
                continue;
            };
            if candidate == entity.position() {
                // Standing still needs no validation.
                continue;
            }
            if checker.can_move(ctx, entity.view(id), candidate) {
                entity.set_position(candidate);
            }
        }
    }

    /// Overlap phase: evaluate every unordered pair once, then apply queued
    /// removals.
    pub fn process_all_overlaps(
        &mut self,
        rules: &dyn OverlapRules,
        processor: &mut dyn OverlapProcessor,
        ctx: &RuleContext<'_>,
    ) {
        let ids: Vec<EntityId> = self.entities.keys().copied().collect();
        let mut consequences = Consequences::new();

        for (i, &a_id) in ids.iter().enumerate() {
            for &b_id in &ids[i + 1..] {
                let (Some(a), Some(b)) = (self.entities.get(&a_id), self.entities.get(&b_id))
                else {
                    continue;
                };
                // Undecidable rules count as "not overlapping".
                if rules.is_overlapping(ctx, a, b).unwrap_or(false) {
                    processor.process(ctx, &mut consequences, (a_id, a), (b_id, b));
                }
            }
        }

        if !consequences.is_empty() {
            debug!("overlap phase removing {} entities", consequences.removals().len());
            self.remove_entities(consequences.removals());
        }
    }
}

/// Pre-tick index of entity positions, consulted by steering and rule code.
///
/// Built once per phase by `GameData` and owned by it — the snapshot copies
/// entity views, so nothing in it can reach live entity state.
pub struct BoardSnapshot {
    by_tile: FxHashMap<GridPoint, SmallVec<[EntityView; 2]>>,
}

impl BoardSnapshot {
    /// Every entity recorded at `at` (usually zero or one).
    pub fn entities_at(&self, at: GridPoint) -> &[EntityView] {
        self.by_tile.get(&at).map(|views| views.as_slice()).unwrap_or(&[])
    }

    pub fn is_occupied(&self, at: GridPoint) -> bool {
        !self.entities_at(at).is_empty()
    }

    /// Whether any entity with the given tag was at `at` when the snapshot
    /// was taken.
    pub fn any_with_tag(&self, at: GridPoint, tag: EntityTag) -> bool {
        self.entities_at(at).iter().any(|view| view.tag == tag)
    }

    /// All recorded views, in no particular order. Callers needing a
    /// deterministic pick should order by `(distance, position)` or similar.
    pub fn iter(&self) -> impl Iterator<Item = EntityView> + '_ {
        self.by_tile.values().flat_map(|views| views.iter().copied())
    }
}
