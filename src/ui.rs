//! Terminal user interface
//!
//! Renders the dungeon, sidebar, and message log with ratatui, and turns
//! keystrokes into `Command`s. All game rules live below this layer.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::actors::Position;
use crate::game::log::MessageCategory;
use crate::game::{Command, Game, GameStatus, TargetChoice};
use crate::save;
use crate::world::TileType;

/// What the next keystroke means
enum Mode {
    Play,
    /// Browsing the pack; `dropping` repurposes the same list for dropping
    Inventory { cursor: usize, dropping: bool },
    /// Moving a cursor to pick a tile. `slot` is the inventory item being
    /// aimed, or None when firing the wielded missile weapon.
    Targeting { slot: Option<usize>, cursor: Position },
    DoorDirection,
}

pub struct App {
    mode: Mode,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

fn key_direction(code: KeyCode) -> Option<(i32, i32)> {
    match code {
        KeyCode::Left | KeyCode::Char('h') => Some((-1, 0)),
        KeyCode::Right | KeyCode::Char('l') => Some((1, 0)),
        KeyCode::Up | KeyCode::Char('k') => Some((0, -1)),
        KeyCode::Down | KeyCode::Char('j') => Some((0, 1)),
        KeyCode::Char('y') => Some((-1, -1)),
        KeyCode::Char('u') => Some((1, -1)),
        KeyCode::Char('b') => Some((-1, 1)),
        KeyCode::Char('n') => Some((1, 1)),
        _ => None,
    }
}

impl App {
    pub fn new() -> Self {
        Self { mode: Mode::Play }
    }

    /// Translate one keystroke into a command for the scheduler
    pub fn handle_key(&mut self, key: KeyEvent, game: &mut Game) -> Command {
        if game.is_over() {
            return match key.code {
                KeyCode::Char('q') | KeyCode::Esc => Command::Quit,
                _ => Command::None,
            };
        }
        match &mut self.mode {
            Mode::Play => self.handle_play_key(key, game),
            Mode::Inventory { cursor, dropping } => {
                let (cursor, dropping) = (*cursor, *dropping);
                self.handle_inventory_key(key, game, cursor, dropping)
            }
            Mode::Targeting { slot, cursor } => {
                let (slot, cursor) = (*slot, *cursor);
                self.handle_targeting_key(key, game, slot, cursor)
            }
            Mode::DoorDirection => {
                self.mode = Mode::Play;
                match key_direction(key.code) {
                    Some((dx, dy)) => Command::ToggleDoor { dx, dy },
                    None => Command::None,
                }
            }
        }
    }

    fn handle_play_key(&mut self, key: KeyEvent, game: &mut Game) -> Command {
        if let Some((dx, dy)) = key_direction(key.code) {
            return Command::Move { dx, dy };
        }
        match key.code {
            KeyCode::Char('.') => Command::Wait,
            KeyCode::Char('g') | KeyCode::Char(',') => Command::Pickup,
            KeyCode::Char('>') => Command::Descend,
            KeyCode::Char('i') => {
                self.mode = Mode::Inventory {
                    cursor: 0,
                    dropping: false,
                };
                Command::None
            }
            KeyCode::Char('d') => {
                self.mode = Mode::Inventory {
                    cursor: 0,
                    dropping: true,
                };
                Command::None
            }
            KeyCode::Char('f') => Command::RangedAttack(TargetChoice::Auto),
            KeyCode::Char('F') => {
                self.mode = Mode::Targeting {
                    slot: None,
                    cursor: game.player_pos(),
                };
                Command::None
            }
            KeyCode::Char('c') => {
                self.mode = Mode::DoorDirection;
                Command::None
            }
            KeyCode::Char('S') => {
                match save::save_game(game) {
                    Ok(()) => game.message("Game saved.", MessageCategory::System),
                    Err(err) => {
                        game.message(format!("Save failed: {err}"), MessageCategory::Warning)
                    }
                }
                Command::None
            }
            KeyCode::Char('q') | KeyCode::Esc => Command::Quit,
            _ => Command::None,
        }
    }

    fn handle_inventory_key(
        &mut self,
        key: KeyEvent,
        game: &Game,
        cursor: usize,
        dropping: bool,
    ) -> Command {
        let len = game
            .player()
            .container
            .as_ref()
            .map_or(0, |c| c.listed_len());
        match key.code {
            KeyCode::Esc | KeyCode::Char('i') => {
                self.mode = Mode::Play;
                Command::None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.mode = Mode::Inventory {
                    cursor: cursor.saturating_sub(1),
                    dropping,
                };
                Command::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.mode = Mode::Inventory {
                    cursor: (cursor + 1).min(len.saturating_sub(1)),
                    dropping,
                };
                Command::None
            }
            KeyCode::Enter => {
                if len == 0 {
                    self.mode = Mode::Play;
                    return Command::None;
                }
                if dropping {
                    self.mode = Mode::Play;
                    return Command::Drop(cursor);
                }
                let needs_tile = game
                    .player()
                    .container
                    .as_ref()
                    .and_then(|c| c.listed_item(cursor))
                    .map_or(false, |item| item.pickable.needs_target_tile());
                if needs_tile {
                    self.mode = Mode::Targeting {
                        slot: Some(cursor),
                        cursor: game.player_pos(),
                    };
                    Command::None
                } else {
                    self.mode = Mode::Play;
                    Command::Use {
                        slot: cursor,
                        target: TargetChoice::Auto,
                    }
                }
            }
            _ => Command::None,
        }
    }

    fn handle_targeting_key(
        &mut self,
        key: KeyEvent,
        game: &Game,
        slot: Option<usize>,
        cursor: Position,
    ) -> Command {
        if let Some((dx, dy)) = key_direction(key.code) {
            let next = cursor.offset(dx, dy);
            if game.map.in_bounds(next.x, next.y) {
                self.mode = Mode::Targeting { slot, cursor: next };
            }
            return Command::None;
        }
        match key.code {
            KeyCode::Esc => {
                // Backing out costs nothing
                self.mode = Mode::Play;
                match slot {
                    Some(slot) => Command::Use {
                        slot,
                        target: TargetChoice::Cancelled,
                    },
                    None => Command::RangedAttack(TargetChoice::Cancelled),
                }
            }
            KeyCode::Enter => {
                self.mode = Mode::Play;
                match slot {
                    Some(slot) => Command::Use {
                        slot,
                        target: TargetChoice::Tile(cursor),
                    },
                    None => Command::RangedAttack(TargetChoice::Tile(cursor)),
                }
            }
            _ => Command::None,
        }
    }

    pub fn render(&self, frame: &mut Frame, game: &Game) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(10), Constraint::Length(8)])
            .split(frame.area());
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(20), Constraint::Length(26)])
            .split(rows[0]);

        self.render_map(frame, columns[0], game);
        self.render_sidebar(frame, columns[1], game);
        self.render_log(frame, rows[1], game);

        if let Mode::Inventory { cursor, dropping } = self.mode {
            self.render_inventory(frame, game, cursor, dropping);
        }
        if game.is_over() {
            self.render_endgame(frame, game);
        }
    }

    fn render_map(&self, frame: &mut Frame, area: Rect, game: &Game) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" Barrow, level {} ", game.depth));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines = Vec::with_capacity(inner.height as usize);
        for row in 0..inner.height as i32 {
            let mut spans = Vec::with_capacity(inner.width as usize);
            for col in 0..inner.width as i32 {
                let (x, y) = (col, row);
                spans.push(self.map_cell(game, x, y));
            }
            lines.push(Line::from(spans));
        }
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn map_cell(&self, game: &Game, x: i32, y: i32) -> Span<'static> {
        let Some(tile) = game.map.get_tile(x, y) else {
            return Span::raw(" ");
        };
        let pos = Position::new(x, y);

        if let Mode::Targeting { cursor, .. } = self.mode {
            if cursor == pos {
                return Span::styled(
                    "X",
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                );
            }
        }

        if tile.visible {
            // Creatures over items over terrain; living over corpses
            if let Some(c) = game
                .creatures
                .iter()
                .filter(|c| c.pos == pos)
                .max_by_key(|c| c.is_alive())
            {
                let (r, g, b) = c.data.color;
                return Span::styled(
                    c.data.glyph.to_string(),
                    Style::default().fg(Color::Rgb(r, g, b)),
                );
            }
            if let Some(item) = game.items.iter().find(|i| i.pos == pos) {
                let (r, g, b) = item.data.color;
                return Span::styled(
                    item.data.glyph.to_string(),
                    Style::default().fg(Color::Rgb(r, g, b)),
                );
            }
            let (r, g, b) = tile.fg_color(true);
            Span::styled(
                tile.glyph().to_string(),
                Style::default().fg(Color::Rgb(r, g, b)),
            )
        } else if tile.explored {
            let (r, g, b) = tile.fg_color(false);
            // Hidden traps read as floor until sprung; remembered map too
            let glyph = match tile.tile_type {
                TileType::Trap => '.',
                other => other.glyph(),
            };
            Span::styled(glyph.to_string(), Style::default().fg(Color::Rgb(r, g, b)))
        } else {
            Span::raw(" ")
        }
    }

    fn render_sidebar(&self, frame: &mut Frame, area: Rect, game: &Game) {
        let block = Block::default().borders(Borders::ALL).title(" Hero ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let player = game.player();
        let mut lines = Vec::new();
        if let Some(d) = player.destructible.as_ref() {
            let hp_color = if d.hp() * 3 < d.hp_max {
                Color::Red
            } else {
                Color::Green
            };
            lines.push(Line::from(vec![
                Span::raw("HP  "),
                Span::styled(
                    format!("{}/{}", d.hp(), d.hp_max),
                    Style::default().fg(hp_color),
                ),
            ]));
            lines.push(Line::from(format!("AC  {}", d.armor_class())));
        }
        lines.push(Line::from(format!("Str {}  Dex {}", player.strength, player.dexterity)));
        lines.push(Line::from(format!("Gold {}", player.gold)));
        lines.push(Line::from(format!("Turn {}", game.turn)));
        let hunger = game.hunger.state().label();
        if !hunger.is_empty() {
            lines.push(Line::from(Span::styled(
                hunger,
                Style::default().fg(Color::Yellow),
            )));
        }
        if let Some(weapon) = player
            .container
            .as_ref()
            .and_then(|c| c.equipment.main_hand())
        {
            lines.push(Line::from(format!("Wielding {}", weapon.name())));
        }
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_log(&self, frame: &mut Frame, area: Rect, game: &Game) {
        let block = Block::default().borders(Borders::ALL).title(" Log ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let visible = inner.height as usize;
        let messages = game.log.messages();
        let start = messages.len().saturating_sub(visible);
        let lines: Vec<Line> = messages[start..]
            .iter()
            .map(|m| {
                let (r, g, b) = m.category.color();
                Line::from(Span::styled(
                    m.text.clone(),
                    Style::default().fg(Color::Rgb(r, g, b)),
                ))
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_inventory(&self, frame: &mut Frame, game: &Game, cursor: usize, dropping: bool) {
        let area = centered_rect(40, 60, frame.area());
        frame.render_widget(Clear, area);
        let title = if dropping { " Drop what? " } else { " Pack " };
        let block = Block::default().borders(Borders::ALL).title(title);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(container) = game.player().container.as_ref() else {
            return;
        };
        let mut lines = Vec::new();
        for idx in 0..container.listed_len() {
            let Some(item) = container.listed_item(idx) else {
                continue;
            };
            let marker = if item.equipped { " (worn)" } else { "" };
            let style = if idx == cursor {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            lines.push(Line::from(Span::styled(
                format!("{} {}{marker}", item.data.glyph, item.name()),
                style,
            )));
        }
        if lines.is_empty() {
            lines.push(Line::from("Your pack is empty."));
        }
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_endgame(&self, frame: &mut Frame, game: &Game) {
        let area = centered_rect(50, 20, frame.area());
        frame.render_widget(Clear, area);
        let (title, text) = match game.status {
            GameStatus::Victory => (" Victory ", "The amulet is yours. Press q to leave."),
            _ => (" Defeat ", "The barrow keeps you. Press q to leave."),
        };
        let block = Block::default().borders(Borders::ALL).title(title);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Paragraph::new(text), inner);
    }
}

/// A centered sub-rectangle, sized in percent of the parent
fn centered_rect(percent_x: u16, percent_y: u16, parent: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(parent);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
