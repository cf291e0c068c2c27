use anyhow::{Context, Result};
use log::{info, warn};
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::DefaultTerminal;
use sokoban_rs::{Campaign, Direction, Level};

use crate::config::Config;
use crate::render;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Playing,
    /// Last level solved; the next key press exits.
    Won,
}

/// What a key press asks the game to do.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    Reset,
    Reload,
    Quit,
}

impl Command {
    pub fn from_key(code: KeyCode) -> Option<Command> {
        match code {
            KeyCode::Up => Some(Command::Move(Direction::Up)),
            KeyCode::Right => Some(Command::Move(Direction::Right)),
            KeyCode::Down => Some(Command::Move(Direction::Down)),
            KeyCode::Left => Some(Command::Move(Direction::Left)),
            KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::Reset),
            KeyCode::F(9) => Some(Command::Reload),
            KeyCode::Esc | KeyCode::Char('q') => Some(Command::Quit),
            _ => None,
        }
    }
}

pub struct App {
    config: Config,
    campaign: Campaign,
    phase: Phase,
    /// One-line message shown under the board.
    status: Option<String>,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let levels = config.load_levels().with_context(|| match &config.level_file {
            Some(path) => format!("failed to load levels from {}", path.display()),
            None => "failed to load built-in levels".to_string(),
        })?;
        Self::with_levels(config, levels)
    }

    pub fn with_levels(config: Config, levels: Vec<Level>) -> Result<Self> {
        let campaign = Campaign::new(levels, config.start_level).context("no levels to play")?;
        info!("starting at level {}/{}", campaign.current_index() + 1, campaign.len());
        Ok(Self { config, campaign, phase: Phase::Playing, status: None })
    }

    pub fn config(&self) -> &Config { &self.config }

    pub fn campaign(&self) -> &Campaign { &self.campaign }

    pub fn phase(&self) -> Phase { self.phase }

    pub fn status(&self) -> Option<&str> { self.status.as_deref() }

    /// Blocks on terminal events until the player quits or wins.
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        loop {
            terminal.draw(|frame| render::draw(frame, self))?;
            if let Event::Key(key) = event::read()? {
                if self.handle_key(key) == Control::Quit {
                    return Ok(());
                }
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Control {
        if key.kind != KeyEventKind::Press {
            return Control::Continue;
        }
        if self.phase == Phase::Won {
            return Control::Quit;
        }
        match Command::from_key(key.code) {
            Some(Command::Move(dir)) => self.play(dir),
            Some(Command::Reset) => {
                self.campaign.reset();
                self.status = None;
            }
            Some(Command::Reload) => self.reload(),
            Some(Command::Quit) => return Control::Quit,
            None => {}
        }
        Control::Continue
    }

    fn play(&mut self, dir: Direction) {
        self.status = None;
        if !self.campaign.step(dir).solved {
            return;
        }
        let solved = self.campaign.current_index() + 1;
        if self.campaign.advance() {
            self.status = Some(format!("Level {solved} solved"));
        } else {
            info!("all {} levels solved", self.campaign.len());
            self.phase = Phase::Won;
        }
    }

    /// Re-read the level file. Failures keep the current level running.
    fn reload(&mut self) {
        let Some(path) = self.config.level_file.clone() else {
            self.status = Some("No level file to reload".to_string());
            return;
        };
        let result = self.config.load_levels().and_then(|levels| self.campaign.replace_levels(levels));
        self.status = Some(match result {
            Ok(()) => format!("Reloaded {}", path.display()),
            Err(e) => {
                warn!("reload of {} failed: {e}", path.display());
                format!("Reload failed: {e}")
            }
        });
    }
}
