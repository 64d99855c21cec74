// Game configuration.
//
// `GameConfiguration` carries the board geometry (rows, columns, sprite size
// in pixels) and the starting life count. Construction never fails: any
// non-positive argument falls back to its default, so a malformed source can
// yield defaults but never an invalid configuration. The same normalization
// runs on deserialization (`#[serde(from = ...)]`), which is how embeddings
// load a configuration from JSON at startup.
//
// The configuration is also the factory for the default rule collaborators
// (`create_move_blocker_checker()` and friends) consumed by `GameData::new`;
// games that need custom rules inject them via `GameData::with_rules`.
//
// See also: `data.rs` which owns the configuration as part of `GameData`,
// `blocking.rs`/`overlap.rs` for the default collaborator implementations.

use crate::blocking::{BoardBounds, MoveBlockerChecker};
use crate::overlap::{IgnoreOverlaps, OverlapProcessor, OverlapRules, SameTile};
use crate::types::GridPoint;
use crate::universe::GameUniverse;
use serde::{Deserialize, Serialize};

pub const DEFAULT_NB_ROWS: i32 = 31;
pub const DEFAULT_NB_COLUMNS: i32 = 28;
pub const DEFAULT_SPRITE_SIZE: i32 = 16;
pub const DEFAULT_NB_LIVES: i32 = 2;

/// Board geometry and session defaults. Immutable once constructed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ConfigParams")]
pub struct GameConfiguration {
    nb_rows: i32,
    nb_columns: i32,
    sprite_size: i32,
    nb_lives: i32,
}

/// Raw deserialization mirror: values route through the normalizing
/// constructor, so absent or non-positive fields become defaults.
#[derive(Deserialize)]
struct ConfigParams {
    #[serde(default)]
    nb_rows: i32,
    #[serde(default)]
    nb_columns: i32,
    #[serde(default)]
    sprite_size: i32,
    #[serde(default)]
    nb_lives: i32,
}

impl From<ConfigParams> for GameConfiguration {
    fn from(params: ConfigParams) -> Self {
        Self::new(
            params.nb_rows,
            params.nb_columns,
            params.sprite_size,
            params.nb_lives,
        )
    }
}

impl Default for GameConfiguration {
    fn default() -> Self {
        Self::new(
            DEFAULT_NB_ROWS,
            DEFAULT_NB_COLUMNS,
            DEFAULT_SPRITE_SIZE,
            DEFAULT_NB_LIVES,
        )
    }
}

impl GameConfiguration {
    /// Create a configuration. Any non-positive argument is replaced by its
    /// default (31 rows, 28 columns, 16 px sprites, 2 lives).
    pub fn new(nb_rows: i32, nb_columns: i32, sprite_size: i32, nb_lives: i32) -> Self {
        Self {
            nb_rows: if nb_rows <= 0 { DEFAULT_NB_ROWS } else { nb_rows },
            nb_columns: if nb_columns <= 0 {
                DEFAULT_NB_COLUMNS
            } else {
                nb_columns
            },
            sprite_size: if sprite_size <= 0 {
                DEFAULT_SPRITE_SIZE
            } else {
                sprite_size
            },
            nb_lives: if nb_lives <= 0 { DEFAULT_NB_LIVES } else { nb_lives },
        }
    }

    pub fn nb_rows(&self) -> i32 {
        self.nb_rows
    }

    pub fn nb_columns(&self) -> i32 {
        self.nb_columns
    }

    pub fn sprite_size(&self) -> i32 {
        self.sprite_size
    }

    pub fn default_nb_lives(&self) -> i32 {
        self.nb_lives
    }

    /// Whether a cell lies on the board.
    pub fn contains(&self, point: GridPoint) -> bool {
        point.col >= 0 && point.col < self.nb_columns && point.row >= 0 && point.row < self.nb_rows
    }

    /// Board width in pixels, for renderers.
    pub fn pixel_width(&self) -> i32 {
        self.nb_columns * self.sprite_size
    }

    /// Board height in pixels, for renderers.
    pub fn pixel_height(&self) -> i32 {
        self.nb_rows * self.sprite_size
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    // -----------------------------------------------------------------------
    // Default collaborator factories, consumed by `GameData::new`.
    // -----------------------------------------------------------------------

    pub fn create_universe(&self) -> GameUniverse {
        GameUniverse::new()
    }

    /// Default move checker: anything inside the board is legal.
    pub fn create_move_blocker_checker(&self) -> MoveBlockerChecker {
        MoveBlockerChecker::new(Box::new(BoardBounds))
    }

    /// Default overlap test: cell equality.
    pub fn create_overlap_rules(&self) -> Box<dyn OverlapRules> {
        Box::new(SameTile)
    }

    /// Default overlap processor: no consequences.
    pub fn create_overlap_processor(&self) -> Box<dyn OverlapProcessor> {
        Box::new(IgnoreOverlaps)
    }
}
