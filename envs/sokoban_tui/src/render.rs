use ratatui::layout::{Alignment, Constraint, Flex, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Clear, Paragraph};
use ratatui::Frame;
use sokoban_rs::{Board, Cell, Direction, GameState};

use crate::app::{App, Phase};

/// How one cell is drawn: a symbol repeated across the tile, and its style.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Glyph {
    pub symbol: char,
    pub style: Style,
}

/// Pick the sprite for a cell. When several flags share a cell the
/// character wins, then a satisfied crate, then a crate, then an objective.
pub fn cell_glyph(cell: Cell, facing: Direction) -> Option<Glyph> {
    let (symbol, style) = if cell.contains(Cell::CHARACTER) {
        let symbol = match facing {
            Direction::Up => '^',
            Direction::Right => '>',
            Direction::Down => 'v',
            Direction::Left => '<',
        };
        (symbol, Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD))
    } else if cell.is_exactly(Cell::WALL) {
        ('#', Style::new().fg(Color::DarkGray).bg(Color::DarkGray))
    } else if cell.is_exactly(Cell::CRATE_OK) {
        ('*', Style::new().fg(Color::Black).bg(Color::Green))
    } else if cell.is_exactly(Cell::CRATE) {
        ('$', Style::new().fg(Color::Black).bg(Color::Rgb(181, 120, 60)))
    } else if cell.is_exactly(Cell::OBJECTIVE) {
        ('.', Style::new().fg(Color::Red).add_modifier(Modifier::BOLD))
    } else {
        return None;
    };
    Some(Glyph { symbol, style })
}

pub fn board_lines(board: &Board, facing: Direction, tile_width: u16) -> Vec<Line<'static>> {
    let tile_width = usize::from(tile_width.max(1));
    board
        .cells()
        .chunks(board.width)
        .map(|row| {
            let spans: Vec<Span<'static>> = row
                .iter()
                .map(|&cell| match cell_glyph(cell, facing) {
                    Some(g) => Span::styled(g.symbol.to_string().repeat(tile_width), g.style),
                    None => Span::raw(" ".repeat(tile_width)),
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

fn status_line(state: &GameState, index: usize, total: usize) -> String {
    format!(
        "Level {}/{}  moves {}  pushes {}  crates {}/{}",
        index + 1,
        total,
        state.num_moves,
        state.num_pushes,
        state.crates_on_objective(),
        state.num_objectives(),
    )
}

const HELP: &str = "arrows move  r reset  F9 reload  esc quit";

pub fn draw(frame: &mut Frame, app: &App) {
    let campaign = app.campaign();
    let state = campaign.state();
    let tile_width = app.config().tile_width.max(1);

    let board_width = u16::try_from(state.board().width).unwrap_or(u16::MAX).saturating_mul(tile_width).saturating_add(2);
    let board_height = u16::try_from(state.board().height).unwrap_or(u16::MAX).saturating_add(2);

    let [board_area, status_area, message_area, help_area] = Layout::vertical([
        Constraint::Length(board_height),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .flex(Flex::Center)
    .areas(frame.area());
    let [board_area] = Layout::horizontal([Constraint::Length(board_width)])
        .flex(Flex::Center)
        .areas(board_area);

    let block = Block::bordered().border_type(BorderType::Rounded).title(" Sokoban ").title_alignment(Alignment::Center);
    let board = Paragraph::new(board_lines(state.board(), state.facing, tile_width)).block(block);
    frame.render_widget(board, board_area);

    let status = status_line(state, campaign.current_index(), campaign.len());
    frame.render_widget(Paragraph::new(status).alignment(Alignment::Center), status_area);
    if let Some(message) = app.status() {
        frame.render_widget(Paragraph::new(message.to_string()).alignment(Alignment::Center), message_area);
    }
    frame.render_widget(
        Paragraph::new(HELP).alignment(Alignment::Center).style(Style::new().fg(Color::DarkGray)),
        help_area,
    );

    if app.phase() == Phase::Won {
        draw_win_popup(frame);
    }
}

fn draw_win_popup(frame: &mut Frame) {
    let [area] = Layout::vertical([Constraint::Length(4)]).flex(Flex::Center).areas(frame.area());
    let [area] = Layout::horizontal([Constraint::Length(24)]).flex(Flex::Center).areas(area);
    let popup = Paragraph::new(vec![Line::from("Yeah!"), Line::from("press any key")])
        .alignment(Alignment::Center)
        .block(Block::bordered().border_type(BorderType::Double).title(" You won! ").title_alignment(Alignment::Center));
    frame.render_widget(Clear, area);
    frame.render_widget(popup, area);
}
