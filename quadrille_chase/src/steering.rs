// Movement strategies for chase entities.
//
// Both strategies read only the pre-tick board snapshot from the rule
// context; the move blocker checker still has the final word on every
// candidate they return.

use crate::WALL;
use quadrille_sim::data::RuleContext;
use quadrille_sim::entity::Steering;
use quadrille_sim::types::{Direction, EntityTag, GridPoint};

/// Walks a fixed heading until a wall or the board edge, then turns around.
pub struct Patrol {
    heading: Direction,
}

impl Patrol {
    pub fn new(heading: Direction) -> Self {
        Self { heading }
    }
}

impl Steering for Patrol {
    fn next_step(&mut self, at: GridPoint, ctx: &RuleContext<'_>) -> GridPoint {
        let ahead = at.step(self.heading);
        if ctx.configuration.contains(ahead) && !ctx.board.any_with_tag(ahead, WALL) {
            return ahead;
        }
        self.heading = self.heading.opposite();
        at.step(self.heading)
    }
}

/// Greedy chase: step toward the nearest entity with the target tag.
///
/// Nearest is by Manhattan distance with position as the tiebreaker, so the
/// choice is deterministic. Stands still when no target exists.
pub struct SeekNearest {
    target: EntityTag,
}

impl SeekNearest {
    pub fn new(target: EntityTag) -> Self {
        Self { target }
    }
}

impl Steering for SeekNearest {
    fn next_step(&mut self, at: GridPoint, ctx: &RuleContext<'_>) -> GridPoint {
        let Some(goal) = ctx
            .board
            .iter()
            .filter(|view| view.tag == self.target)
            .map(|view| view.position)
            .min_by_key(|position| (at.manhattan_distance(*position), *position))
        else {
            return at;
        };

        Direction::ALL
            .iter()
            .map(|direction| at.step(*direction))
            .filter(|candidate| {
                ctx.configuration.contains(*candidate) && !ctx.board.any_with_tag(*candidate, WALL)
            })
            .min_by_key(|candidate| (goal.manhattan_distance(*candidate), *candidate))
            .unwrap_or(at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PELLET;
    use quadrille_sim::config::GameConfiguration;
    use quadrille_sim::data::GameData;
    use quadrille_sim::entity::GameEntity;

    fn data_on_board(cols: i32, rows: i32) -> GameData {
        GameData::new(GameConfiguration::new(rows, cols, 16, 2))
    }

    #[test]
    fn patrol_walks_its_heading() {
        let mut data = data_on_board(8, 3);
        data.universe
            .add_entity(GameEntity::fixed(WALL, GridPoint::new(4, 1), Box::new('#')));
        let board = data.universe.board_snapshot();
        let ctx = data.rule_context(&board);

        let mut patrol = Patrol::new(Direction::Right);
        assert_eq!(
            patrol.next_step(GridPoint::new(1, 1), &ctx),
            GridPoint::new(2, 1)
        );
    }

    #[test]
    fn patrol_reverses_at_walls_and_edges() {
        let mut data = data_on_board(8, 3);
        data.universe
            .add_entity(GameEntity::fixed(WALL, GridPoint::new(4, 1), Box::new('#')));
        let board = data.universe.board_snapshot();
        let ctx = data.rule_context(&board);

        // Wall ahead: turn around.
        let mut patrol = Patrol::new(Direction::Right);
        assert_eq!(
            patrol.next_step(GridPoint::new(3, 1), &ctx),
            GridPoint::new(2, 1)
        );

        // Board edge ahead: turn around.
        let mut edge_patrol = Patrol::new(Direction::Left);
        assert_eq!(
            edge_patrol.next_step(GridPoint::new(0, 1), &ctx),
            GridPoint::new(1, 1)
        );
    }

    #[test]
    fn seek_nearest_steps_toward_the_closest_pellet() {
        let mut data = data_on_board(8, 8);
        data.universe
            .add_entity(GameEntity::fixed(PELLET, GridPoint::new(6, 2), Box::new('.')));
        data.universe
            .add_entity(GameEntity::fixed(PELLET, GridPoint::new(2, 6), Box::new('.')));
        let board = data.universe.board_snapshot();
        let ctx = data.rule_context(&board);

        // (2, 6) is 5 steps away from (2, 1); (6, 2) is also 5 — the position
        // tiebreaker picks (2, 6). First step heads down.
        let mut seek = SeekNearest::new(PELLET);
        assert_eq!(
            seek.next_step(GridPoint::new(2, 1), &ctx),
            GridPoint::new(2, 2)
        );
    }

    #[test]
    fn seek_nearest_stands_still_without_targets() {
        let data = data_on_board(8, 8);
        let board = data.universe.board_snapshot();
        let ctx = data.rule_context(&board);

        let mut seek = SeekNearest::new(PELLET);
        assert_eq!(
            seek.next_step(GridPoint::new(3, 3), &ctx),
            GridPoint::new(3, 3)
        );
    }
}
