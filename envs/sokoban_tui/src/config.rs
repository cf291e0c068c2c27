use std::path::PathBuf;

use sokoban_rs::{load_pack, preset_levels, Level, LevelError};

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Binary level pack to play; the built-in levels when unset.
    pub level_file: Option<PathBuf>,
    /// Index of the first level played.
    pub start_level: usize,
    /// Terminal columns per grid cell.
    pub tile_width: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self { level_file: None, start_level: 0, tile_width: 2 }
    }
}

impl Config {
    pub fn load_levels(&self) -> Result<Vec<Level>, LevelError> {
        match &self.level_file {
            Some(path) => load_pack(path),
            None => Ok(preset_levels().to_vec()),
        }
    }
}
