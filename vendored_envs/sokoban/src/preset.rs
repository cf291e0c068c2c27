use crate::level::{Level, LevelError};
use log::warn;
use once_cell::sync::OnceCell;
use serde::Deserialize;

/// The classic 12x12 map, played when no level file is given.
pub const CLASSIC_ROWS: [&str; 12] = [
    "############",
    "######## @##",
    "#  $ $ $ $##",
    "# # .  .  ##",
    "#      #.  #",
    "# $##  .   #",
    "#        ###",
    "##      ####",
    "##      .###",
    "##      ####",
    "##      ####",
    "############",
];

#[derive(Debug, Deserialize)]
struct PresetRow {
    #[allow(dead_code)]
    #[serde(default)]
    name: Option<String>,
    rows: Vec<String>,
}

static PRESETS: OnceCell<Vec<Level>> = OnceCell::new();

pub fn classic_level() -> Result<Level, LevelError> {
    Level::from_rows(&CLASSIC_ROWS)
}

fn load_presets() -> Vec<Level> {
    let mut levels = Vec::new();
    match classic_level() {
        Ok(level) => levels.push(level),
        Err(e) => warn!("classic map is not a valid level: {e}"),
    }
    // Embedded at compile time; malformed lines are skipped.
    let data = include_str!("../data/levels.jsonl");
    for (lineno, line) in data.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() { continue; }
        let row: PresetRow = match serde_json::from_str(line) {
            Ok(r) => r,
            Err(e) => {
                warn!("failed to parse preset line {}: {e}", lineno + 1);
                continue;
            }
        };
        match Level::from_rows(&row.rows) {
            Ok(level) => levels.push(level),
            Err(e) => warn!("preset line {} is not a valid level: {e}", lineno + 1),
        }
    }
    levels
}

/// Built-in levels in play order, the classic map first.
pub fn preset_levels() -> &'static [Level] {
    PRESETS.get_or_init(load_presets)
}

pub fn preset_level(index: usize) -> Option<Level> {
    preset_levels().get(index).cloned()
}
