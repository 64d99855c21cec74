// Chase rules: what blocks a move, and what an overlap means.
//
// Blocking: nobody walks off the board or into a wall, and drones refuse to
// stack on each other (decided on pre-tick positions).
//
// Overlaps: the runner eating a pellet removes it and scores; the runner
// touching a drone costs a life. The last pellet and the last life both end
// the game. Everything else overlapping (a drone crossing a pellet cell) is
// ignored.

use crate::{DRONE, PELLET, PELLET_POINTS, RUNNER, WALL};
use quadrille_sim::blocking::MoveBlockerRules;
use quadrille_sim::data::RuleContext;
use quadrille_sim::entity::{EntityView, GameEntity};
use quadrille_sim::overlap::{Consequences, OverlapProcessor};
use quadrille_sim::types::{EntityId, GridPoint};

pub struct ChaseBlocker;

impl MoveBlockerRules for ChaseBlocker {
    fn move_allowed(
        &self,
        ctx: &RuleContext<'_>,
        entity: EntityView,
        target: GridPoint,
    ) -> Option<bool> {
        if !ctx.configuration.contains(target) {
            return Some(false);
        }
        if ctx.board.any_with_tag(target, WALL) {
            return Some(false);
        }
        if entity.tag == DRONE && ctx.board.any_with_tag(target, DRONE) {
            return Some(false);
        }
        Some(true)
    }
}

pub struct ChaseProcessor;

impl OverlapProcessor for ChaseProcessor {
    fn process(
        &mut self,
        ctx: &RuleContext<'_>,
        consequences: &mut Consequences,
        a: (EntityId, &GameEntity),
        b: (EntityId, &GameEntity),
    ) {
        // Only runner overlaps carry consequences; normalize the pair so the
        // runner comes first.
        let (runner, other) = if b.1.tag() == RUNNER { (b, a) } else { (a, b) };
        if runner.1.tag() != RUNNER {
            return;
        }

        match other.1.tag() {
            PELLET => {
                consequences.remove_entity(other.0);
                ctx.add_score(PELLET_POINTS);
                // The snapshot still holds the pellet being eaten, so one
                // remaining pellet means the board just emptied.
                let remaining = ctx.board.iter().filter(|view| view.tag == PELLET).count();
                if remaining <= 1 {
                    ctx.finish_game();
                }
            }
            DRONE => {
                ctx.decrease_life(1);
                if ctx.life.get() == 0 {
                    ctx.finish_game();
                }
            }
            _ => {}
        }
    }
}
