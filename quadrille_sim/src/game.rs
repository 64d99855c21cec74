// The game session driver.
//
// A `Game` owns one `GameData` and an ordered list of levels, and runs the
// levels one after another until either the list is exhausted or the
// end-of-game flag goes up. Before starting each level it wires an observer
// on the end-of-game cell to that level's handle, so a consequence raising
// the flag (out of lives, final pellet eaten) terminates the running loop.
//
// The driver owns the level list — levels mutate the session state while
// they run, so the list cannot live inside `GameData` itself.

use crate::data::GameData;
use crate::draw::Viewport;
use crate::level::{GameLevel, LevelError};

/// One playable game: session state plus its levels.
pub struct Game {
    pub data: GameData,
    levels: Vec<GameLevel>,
}

impl Game {
    pub fn new(data: GameData) -> Self {
        Self {
            data,
            levels: Vec::new(),
        }
    }

    pub fn add_level(&mut self, level: GameLevel) {
        self.levels.push(level);
    }

    /// Run the levels in order. Each level blocks until it stops; the session
    /// ends early once the end-of-game flag is set.
    pub fn start(&mut self, viewport: &mut dyn Viewport) -> Result<(), LevelError> {
        for level in &mut self.levels {
            if self.data.end_of_game.get() {
                break;
            }
            let handle = level.handle();
            self.data.end_of_game.add_observer(move |finished| {
                if *finished {
                    handle.end();
                }
            });
            level.start(&mut self.data, viewport)?;
        }
        Ok(())
    }
}
