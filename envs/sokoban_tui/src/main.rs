use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use sokoban_tui::{App, Config};

#[derive(Parser, Debug)]
#[command(author, version, about = "Sokoban in the terminal", long_about = None)]
struct Cli {
    /// Binary level pack (one count byte, then 144 bytes per 12x12 level)
    level_file: Option<PathBuf>,
    /// Zero-based index of the first level to play
    #[arg(long, default_value_t = 0)]
    start_level: usize,
    /// Terminal columns per grid cell
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u16).range(1..=8))]
    tile_width: u16,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Config { level_file: cli.level_file, start_level: cli.start_level, tile_width: cli.tile_width }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let mut app = App::new(Config::from(cli))?;

    let mut terminal = ratatui::try_init().context("failed to initialise terminal")?;
    let result = app.run(&mut terminal);
    ratatui::restore();
    result
}
