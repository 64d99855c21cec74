// Move blocking — per-move legality.
//
// The universe never decides legality itself: before applying a candidate
// move it asks the `MoveBlockerChecker`, which delegates to the injected
// `MoveBlockerRules`. The checker is a stable seam — games swap rule
// implementations without touching the universe.
//
// Rules that cannot render a decision return `None`; the checker maps that to
// "blocked", the conservative branch. A `can_move` call never mutates world
// state: it takes `&self` everywhere and the context only exposes copied
// pre-tick positions.
//
// See also: `universe.rs` for the movement phase, `data.rs` for the
// `RuleContext` handed to every rule call.

use crate::data::RuleContext;
use crate::entity::EntityView;
use crate::types::GridPoint;
use log::debug;

/// Game-specific legality of a candidate move.
pub trait MoveBlockerRules: Send {
    /// Whether `entity` may occupy `target` this tick. `None` means the rule
    /// cannot decide; the checker treats that as blocked.
    fn move_allowed(
        &self,
        ctx: &RuleContext<'_>,
        entity: EntityView,
        target: GridPoint,
    ) -> Option<bool>;
}

/// The seam between the universe and the game's blocking rules.
pub struct MoveBlockerChecker {
    rules: Box<dyn MoveBlockerRules>,
}

impl MoveBlockerChecker {
    pub fn new(rules: Box<dyn MoveBlockerRules>) -> Self {
        Self { rules }
    }

    /// Validate one candidate move. Undecidable rules block.
    pub fn can_move(&self, ctx: &RuleContext<'_>, entity: EntityView, target: GridPoint) -> bool {
        match self.rules.move_allowed(ctx, entity, target) {
            Some(allowed) => allowed,
            None => {
                debug!("no blocking decision for {} -> {}, treating as blocked", entity.id, target);
                false
            }
        }
    }
}

/// Default rules: a move is legal exactly when the target is on the board.
pub struct BoardBounds;

impl MoveBlockerRules for BoardBounds {
    fn move_allowed(
        &self,
        ctx: &RuleContext<'_>,
        _entity: EntityView,
        target: GridPoint,
    ) -> Option<bool> {
        Some(ctx.configuration.contains(target))
    }
}
