// Terminal rendering for the chase game.
//
// `TerminalViewport` is both the `Canvas` entities draw onto and the
// `Viewport` the tick loop calls: each paint clears the cell buffer, lets
// every entity draw itself, and prints the frame with a status line.
//
// Score and lives are read from atomic mirrors. The caller registers
// observers on the session's observable cells that copy every change into
// the mirrors — the viewport itself never touches `GameData`.

use quadrille_sim::config::GameConfiguration;
use quadrille_sim::draw::{Canvas, Viewport};
use quadrille_sim::types::GridPoint;
use quadrille_sim::universe::GameUniverse;
use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicI32, AtomicI64, Ordering};

pub struct TerminalViewport {
    nb_rows: i32,
    nb_columns: i32,
    cells: Vec<char>,
    score: Arc<AtomicI64>,
    lives: Arc<AtomicI32>,
}

impl TerminalViewport {
    pub fn new(configuration: &GameConfiguration) -> Self {
        let nb_rows = configuration.nb_rows();
        let nb_columns = configuration.nb_columns();
        Self {
            nb_rows,
            nb_columns,
            cells: vec![' '; (nb_rows * nb_columns) as usize],
            score: Arc::new(AtomicI64::new(0)),
            lives: Arc::new(AtomicI32::new(0)),
        }
    }

    /// Mirror for the score cell; register an observer that stores into it.
    pub fn score_mirror(&self) -> Arc<AtomicI64> {
        Arc::clone(&self.score)
    }

    /// Mirror for the life cell; register an observer that stores into it.
    pub fn lives_mirror(&self) -> Arc<AtomicI32> {
        Arc::clone(&self.lives)
    }

    fn index(&self, at: GridPoint) -> Option<usize> {
        if at.col >= 0 && at.col < self.nb_columns && at.row >= 0 && at.row < self.nb_rows {
            Some((at.row * self.nb_columns + at.col) as usize)
        } else {
            None
        }
    }

    /// Render the cell buffer plus the status line.
    fn frame(&self) -> String {
        let mut out = String::with_capacity(self.cells.len() + 2 * self.nb_rows as usize + 32);
        for row in 0..self.nb_rows {
            let start = (row * self.nb_columns) as usize;
            let end = start + self.nb_columns as usize;
            out.extend(&self.cells[start..end]);
            out.push('\n');
        }
        out.push_str(&format!(
            "score {:>6}   lives {}\n",
            self.score.load(Ordering::SeqCst),
            self.lives.load(Ordering::SeqCst)
        ));
        out
    }
}

impl Canvas for TerminalViewport {
    fn draw_tile(&mut self, at: GridPoint, glyph: char) {
        if let Some(index) = self.index(at) {
            self.cells[index] = glyph;
        }
    }
}

impl Viewport for TerminalViewport {
    fn paint(&mut self, universe: &GameUniverse) {
        self.cells.fill(' ');
        for (_, entity) in universe.entities() {
            entity.draw(self);
        }
        // Home the cursor instead of clearing so the frame never flickers.
        print!("\x1b[H\x1b[2J{}", self.frame());
        let _ = std::io::stdout().flush();
    }
}
