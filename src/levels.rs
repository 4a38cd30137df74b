//! Level definitions and level packs
//!
//! A pack is a JSON document:
//! ```json
//! { "name": "Pack", "levels": [
//!     { "name": "One", "width": 3, "height": 3, "map": "S   0 XX " },
//!     { "name": "Two", "width": 4, "height": 2, "map": ["S00X", "####"] }
//! ] }
//! ```
//! `map` is either one row-major string or a list of rows. Rows shorter
//! than `width` are padded with water, longer rows are cut.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GridError, LevelError};
use crate::sim::TileGrid;

/// Encoded map text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MapText {
    Flat(String),
    Rows(Vec<String>),
}

/// One level as authored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelDef {
    #[serde(default)]
    pub name: String,
    pub width: usize,
    pub height: usize,
    pub map: MapText,
}

impl LevelDef {
    pub fn new(name: &str, width: usize, height: usize, map: &str) -> Self {
        Self {
            name: name.to_string(),
            width,
            height,
            map: MapText::Flat(map.to_string()),
        }
    }

    pub fn from_rows(name: &str, width: usize, rows: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            width,
            height: rows.len(),
            map: MapText::Rows(rows.iter().map(|r| r.to_string()).collect()),
        }
    }

    /// Row-major encoding, one character per cell
    pub fn encoded(&self) -> Result<String, GridError> {
        let count = TileGrid::cell_count(self.width, self.height)?;
        Ok(match &self.map {
            MapText::Flat(s) => s.clone(),
            MapText::Rows(rows) => {
                let mut out = String::with_capacity(count);
                for row in rows.iter().take(self.height) {
                    let mut n = 0;
                    for c in row.chars().take(self.width) {
                        out.push(c);
                        n += 1;
                    }
                    out.extend(std::iter::repeat_n(' ', self.width - n));
                }
                out
            }
        })
    }

    /// Build this level's tile grid
    pub fn decode(&self, tile_size: f32) -> Result<TileGrid, GridError> {
        TileGrid::decode(self.width, self.height, &self.encoded()?, tile_size)
    }
}

/// An ordered set of levels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelPack {
    #[serde(default)]
    pub name: String,
    pub levels: Vec<LevelDef>,
}

impl LevelPack {
    pub fn new(name: &str, levels: Vec<LevelDef>) -> Self {
        Self {
            name: name.to_string(),
            levels,
        }
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Level by index, `InvalidLevel` past the end
    pub fn get(&self, index: usize) -> Result<&LevelDef, LevelError> {
        self.levels.get(index).ok_or(LevelError::InvalidLevel {
            index,
            count: self.levels.len(),
        })
    }

    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let pack: LevelPack = serde_json::from_str(json)?;
        if pack.levels.is_empty() {
            return Err(LevelError::EmptyPack);
        }
        Ok(pack)
    }

    pub fn load(path: &Path) -> Result<Self, LevelError> {
        let json = std::fs::read_to_string(path)?;
        let pack = Self::from_json(&json)?;
        log::info!("Loaded pack '{}' ({} levels) from {}", pack.name, pack.len(), path.display());
        Ok(pack)
    }

    /// Levels shipped with the game (20x15 tiles, fills a 640x480 canvas)
    pub fn builtin() -> Self {
        Self::new(
            "Built-in Floes",
            vec![
                LevelDef::from_rows("Thin Ice", 20, &[
                    "",
                    "",
                    "",
                    "",
                    "",
                    "   ##############   ",
                    "   #S9999999999X#   ",
                    "   ##############   ",
                ]),
                LevelDef::from_rows("Two Cameras", 20, &[
                    "",
                    "",
                    "  ###############   ",
                    "  #X55555555555X#   ",
                    "  #5###########5#   ",
                    "  #5#         #5#   ",
                    "  #5#         #5#   ",
                    "  #5###########5#   ",
                    "  #55555S5555555#   ",
                    "  ###############   ",
                ]),
                LevelDef::from_rows("Melting Crossroads", 20, &[
                    "",
                    "        #####       ",
                    "        #9X9#       ",
                    "        #979#       ",
                    "        ##5##       ",
                    "   ####  #3#  ####  ",
                    "   #X7####2####7X#  ",
                    "   #9322221112239#  ",
                    "   #X7####2####7X#  ",
                    "   ####  #3#  ####  ",
                    "        ##5##       ",
                    "        #979#       ",
                    "        #9S9#       ",
                    "        #####       ",
                ]),
                LevelDef::from_rows("Heavy Penguin", 20, &[
                    "####################",
                    "#S11111111111111111#",
                    "#1################1#",
                    "#1#              #1#",
                    "#1#   ########   #1#",
                    "#1#   #X0000X#   #1#",
                    "#1#   #0####0#   #1#",
                    "#1#   #0#  #0#   #1#",
                    "#1#   #0####0#   #1#",
                    "#1#   #X0000X#   #1#",
                    "#1#   ###00###   #1#",
                    "#1#     #00#     #1#",
                    "#1#######99#######1#",
                    "#111111119911111111#",
                    "####################",
                ]),
            ],
        )
    }
}

impl Default for LevelPack {
    fn default() -> Self {
        Self::builtin()
    }
}
