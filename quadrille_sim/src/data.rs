// Per-session game state bundle.
//
// `GameData` owns everything one game session needs: the configuration, the
// score/life/end-of-game observable cells, the universe, and the rule
// objects. All of it is wired at construction — `new()` takes the default
// collaborators from the configuration's factories, `with_rules()` injects
// custom ones — so no component ever exists with an unset reference.
//
// Rule objects hold no back-reference to `GameData`. Instead every rule call
// receives a `RuleContext`: a borrowed view of the configuration, a pre-tick
// `BoardSnapshot`, and the three observable cells. The context exposes no
// mutable entity state, which makes the purity requirement on blocking rules
// structural rather than a convention.
//
// See also: `universe.rs` for the phase implementations, `level.rs` for the
// loop that calls the phase wrappers once per tick.

use crate::blocking::MoveBlockerChecker;
use crate::config::GameConfiguration;
use crate::observable::ObservableValue;
use crate::overlap::{OverlapProcessor, OverlapRules};
use crate::universe::{BoardSnapshot, GameUniverse};

/// Borrowed view of session state handed to every rule and steering call.
pub struct RuleContext<'a> {
    pub configuration: &'a GameConfiguration,
    /// Entity positions as they were when the current phase started.
    pub board: &'a BoardSnapshot,
    pub score: &'a ObservableValue<i64>,
    pub life: &'a ObservableValue<i32>,
    pub end_of_game: &'a ObservableValue<bool>,
}

impl RuleContext<'_> {
    pub fn add_score(&self, points: i64) {
        self.score.set(self.score.get() + points);
    }

    pub fn increase_life(&self, lives: i32) {
        self.life.set(self.life.get() + lives);
    }

    /// Take lives away, clamping at zero.
    pub fn decrease_life(&self, lives: i32) {
        let current = self.life.get();
        if lives >= current {
            self.life.set(0);
        } else {
            self.life.set(current - lives);
        }
    }

    /// Raise the end-of-game flag.
    pub fn finish_game(&self) {
        self.end_of_game.set(true);
    }
}

/// One game session's state: configuration, observable cells, universe, and
/// rule objects.
pub struct GameData {
    configuration: GameConfiguration,
    pub score: ObservableValue<i64>,
    pub life: ObservableValue<i32>,
    pub end_of_game: ObservableValue<bool>,
    pub universe: GameUniverse,
    move_blocker_checker: MoveBlockerChecker,
    overlap_rules: Box<dyn OverlapRules>,
    overlap_processor: Box<dyn OverlapProcessor>,
}

impl GameData {
    /// A session wired with the configuration's default collaborators.
    pub fn new(configuration: GameConfiguration) -> Self {
        let move_blocker_checker = configuration.create_move_blocker_checker();
        let overlap_rules = configuration.create_overlap_rules();
        let overlap_processor = configuration.create_overlap_processor();
        Self::with_rules(configuration, move_blocker_checker, overlap_rules, overlap_processor)
    }

    /// A session with game-specific rule objects.
    pub fn with_rules(
        configuration: GameConfiguration,
        move_blocker_checker: MoveBlockerChecker,
        overlap_rules: Box<dyn OverlapRules>,
        overlap_processor: Box<dyn OverlapProcessor>,
    ) -> Self {
        let universe = configuration.create_universe();
        let life = ObservableValue::new(configuration.default_nb_lives());
        Self {
            configuration,
            score: ObservableValue::new(0),
            life,
            end_of_game: ObservableValue::new(false),
            universe,
            move_blocker_checker,
            overlap_rules,
            overlap_processor,
        }
    }

    pub fn configuration(&self) -> &GameConfiguration {
        &self.configuration
    }

    pub fn add_score(&self, points: i64) {
        self.score.set(self.score.get() + points);
    }

    pub fn increase_life(&self, lives: i32) {
        self.life.set(self.life.get() + lives);
    }

    /// Take lives away, clamping at zero.
    pub fn decrease_life(&self, lives: i32) {
        let current = self.life.get();
        if lives >= current {
            self.life.set(0);
        } else {
            self.life.set(current - lives);
        }
    }

    /// Build the context rule calls receive, around a snapshot the caller
    /// took from the universe.
    pub fn rule_context<'a>(&'a self, board: &'a BoardSnapshot) -> RuleContext<'a> {
        RuleContext {
            configuration: &self.configuration,
            board,
            score: &self.score,
            life: &self.life,
            end_of_game: &self.end_of_game,
        }
    }

    /// Movement phase over a pre-tick snapshot.
    pub fn all_one_step_moves(&mut self) {
        let board = self.universe.board_snapshot();
        let ctx = RuleContext {
            configuration: &self.configuration,
            board: &board,
            score: &self.score,
            life: &self.life,
            end_of_game: &self.end_of_game,
        };
        self.universe.all_one_step_moves(&self.move_blocker_checker, &ctx);
    }

    /// Overlap phase over a post-movement snapshot.
    pub fn process_all_overlaps(&mut self) {
        let board = self.universe.board_snapshot();
        let ctx = RuleContext {
            configuration: &self.configuration,
            board: &board,
            score: &self.score,
            life: &self.life,
            end_of_game: &self.end_of_game,
        };
        self.universe
            .process_all_overlaps(self.overlap_rules.as_ref(), self.overlap_processor.as_mut(), &ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::GameEntity;
    use crate::overlap::{Consequences, SameTile};
    use crate::types::{EntityId, EntityTag, GridPoint};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const FOOD: EntityTag = EntityTag(1);
    const EATER: EntityTag = EntityTag(2);

    fn fixed(tag: EntityTag, at: GridPoint) -> GameEntity {
        GameEntity::fixed(tag, at, Box::new('x'))
    }

    #[test]
    fn new_session_starts_with_configured_lives_and_zero_score() {
        let data = GameData::new(GameConfiguration::new(10, 10, 16, 3));
        assert_eq!(data.life.get(), 3);
        assert_eq!(data.score.get(), 0);
        assert!(!data.end_of_game.get());
        assert!(data.universe.is_empty());
    }

    #[test]
    fn decrease_life_clamps_at_zero() {
        let data = GameData::new(GameConfiguration::new(10, 10, 16, 2));
        data.decrease_life(5);
        assert_eq!(data.life.get(), 0);

        data.increase_life(3);
        assert_eq!(data.life.get(), 3);
        data.decrease_life(1);
        assert_eq!(data.life.get(), 2);
    }

    /// Removes the second entity of a same-cell pair and scores a point.
    struct EatSecond;

    impl crate::overlap::OverlapProcessor for EatSecond {
        fn process(
            &mut self,
            ctx: &RuleContext<'_>,
            consequences: &mut Consequences,
            _a: (EntityId, &GameEntity),
            b: (EntityId, &GameEntity),
        ) {
            consequences.remove_entity(b.0);
            ctx.add_score(1);
        }
    }

    #[test]
    fn overlap_consequences_remove_and_score() {
        // Two entities on the same cell, a processor that removes the second
        // and scores one point: afterwards one entity remains and the score
        // went up by exactly one.
        let mut data = GameData::with_rules(
            GameConfiguration::new(5, 5, 16, 2),
            MoveBlockerChecker::new(Box::new(crate::blocking::BoardBounds)),
            Box::new(SameTile),
            Box::new(EatSecond),
        );
        let eater = data.universe.add_entity(fixed(EATER, GridPoint::new(2, 2)));
        data.universe.add_entity(fixed(FOOD, GridPoint::new(2, 2)));
        let before = data.score.get();

        data.process_all_overlaps();

        assert_eq!(data.universe.len(), 1);
        assert!(data.universe.entity(eater).is_some());
        assert_eq!(data.score.get(), before + 1);
    }

    /// Counts how often each pair is handed to the processor.
    struct CountingProcessor {
        calls: Arc<AtomicUsize>,
    }

    impl crate::overlap::OverlapProcessor for CountingProcessor {
        fn process(
            &mut self,
            _ctx: &RuleContext<'_>,
            consequences: &mut Consequences,
            _a: (EntityId, &GameEntity),
            b: (EntityId, &GameEntity),
        ) {
            self.calls.fetch_add(1, Ordering::SeqCst);
            // Request removal — the pair must still not be re-evaluated.
            consequences.remove_entity(b.0);
        }
    }

    #[test]
    fn each_overlapping_pair_is_processed_exactly_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut data = GameData::with_rules(
            GameConfiguration::new(5, 5, 16, 2),
            MoveBlockerChecker::new(Box::new(crate::blocking::BoardBounds)),
            Box::new(SameTile),
            Box::new(CountingProcessor { calls: Arc::clone(&calls) }),
        );
        // Three entities stacked on one cell: exactly three unordered pairs.
        for _ in 0..3 {
            data.universe.add_entity(fixed(FOOD, GridPoint::new(1, 1)));
        }

        data.process_all_overlaps();

        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    /// An overlap rule that never reaches a decision.
    struct Undecided;

    impl crate::overlap::OverlapRules for Undecided {
        fn is_overlapping(
            &self,
            _ctx: &RuleContext<'_>,
            _a: &GameEntity,
            _b: &GameEntity,
        ) -> Option<bool> {
            None
        }
    }

    #[test]
    fn undecidable_overlap_rules_mean_no_overlap() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut data = GameData::with_rules(
            GameConfiguration::new(5, 5, 16, 2),
            MoveBlockerChecker::new(Box::new(crate::blocking::BoardBounds)),
            Box::new(Undecided),
            Box::new(CountingProcessor { calls: Arc::clone(&calls) }),
        );
        data.universe.add_entity(fixed(FOOD, GridPoint::new(1, 1)));
        data.universe.add_entity(fixed(EATER, GridPoint::new(1, 1)));

        data.process_all_overlaps();

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(data.universe.len(), 2);
    }

    #[test]
    fn rule_context_helpers_drive_the_cells() {
        let data = GameData::new(GameConfiguration::new(5, 5, 16, 2));
        let board = data.universe.board_snapshot();
        let ctx = data.rule_context(&board);

        ctx.add_score(25);
        ctx.decrease_life(1);
        ctx.increase_life(2);
        ctx.finish_game();

        assert_eq!(data.score.get(), 25);
        assert_eq!(data.life.get(), 3);
        assert!(data.end_of_game.get());

        data.add_score(5);
        assert_eq!(data.score.get(), 30);
        assert_eq!(data.configuration().nb_rows(), 5);
    }

    #[test]
    fn default_wiring_is_inert() {
        // `new()` uses SameTile + IgnoreOverlaps: overlaps are detected but
        // have no consequences.
        let mut data = GameData::new(GameConfiguration::new(5, 5, 16, 2));
        data.universe.add_entity(fixed(FOOD, GridPoint::new(1, 1)));
        data.universe.add_entity(fixed(EATER, GridPoint::new(1, 1)));

        data.process_all_overlaps();

        assert_eq!(data.universe.len(), 2);
        assert_eq!(data.score.get(), 0);
    }
}
