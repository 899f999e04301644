//! # Keypad Component
//!
//! The button grid. Keyboard users move a highlight with the arrow keys and
//! press the highlighted button with Space; mouse users click buttons.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `KeypadState` lives in `TuiState` (the highlighted cell)
//! - `KeypadView` is created each frame with borrowed state and props

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::Mode;
use crate::core::functions::AngleMode;
use crate::core::key::{BASIC_LAYOUT, Key, KeypadKind, SCIENTIFIC_LAYOUT};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

pub type KeyLayout = &'static [&'static [Key]];

/// The grid shown for a mode. The fraction calculator borrows the basic
/// grid for its digits and operators.
pub fn layout_for(mode: Mode) -> KeyLayout {
    match mode {
        Mode::Scientific => SCIENTIFIC_LAYOUT,
        Mode::Basic | Mode::Fraction => BASIC_LAYOUT,
    }
}

/// Whether a button does anything in `mode`.
pub fn is_active(mode: Mode, key: Key) -> bool {
    match mode {
        Mode::Basic => KeypadKind::Basic.supports(key),
        Mode::Scientific => KeypadKind::Scientific.supports(key),
        Mode::Fraction => matches!(
            key,
            Key::Digit(_) | Key::Operator(_) | Key::Clear | Key::Backspace | Key::Equals
        ),
    }
}

/// Split `area` into one rect per button. Rows share the height evenly and
/// each row shares its width evenly, so rows may differ in button count.
pub fn key_cells(area: Rect, layout: KeyLayout) -> Vec<Vec<Rect>> {
    let row_count = layout.len() as u32;
    let rows = Layout::vertical(vec![Constraint::Ratio(1, row_count.max(1)); layout.len()])
        .split(area);
    layout
        .iter()
        .zip(rows.iter())
        .map(|(keys, row_area)| {
            let col_count = keys.len() as u32;
            Layout::horizontal(vec![Constraint::Ratio(1, col_count.max(1)); keys.len()])
                .split(*row_area)
                .to_vec()
        })
        .collect()
}

/// Find the button under a screen position.
pub fn hit_test(area: Rect, layout: KeyLayout, column: u16, row: u16) -> Option<(usize, usize)> {
    let position = Position::new(column, row);
    key_cells(area, layout)
        .iter()
        .enumerate()
        .find_map(|(r, cells)| {
            cells
                .iter()
                .position(|cell| cell.contains(position))
                .map(|c| (r, c))
        })
}

/// Persistent state: which button is highlighted.
pub struct KeypadState {
    layout: KeyLayout,
    pub row: usize,
    pub col: usize,
}

/// Events emitted by the keypad.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeypadEvent {
    Press(Key),
}

impl KeypadState {
    pub fn new(layout: KeyLayout) -> Self {
        Self {
            layout,
            row: 0,
            col: 0,
        }
    }

    /// Swap layouts (mode change), keeping the highlight inside the grid.
    pub fn set_layout(&mut self, layout: KeyLayout) {
        self.layout = layout;
        self.select(self.row, self.col);
    }

    pub fn layout(&self) -> KeyLayout {
        self.layout
    }

    pub fn selected_key(&self) -> Option<Key> {
        self.layout
            .get(self.row)
            .and_then(|keys| keys.get(self.col))
            .copied()
    }

    /// Highlight a cell, clamped to the grid.
    pub fn select(&mut self, row: usize, col: usize) {
        self.row = row.min(self.layout.len().saturating_sub(1));
        let width = self.layout.get(self.row).map_or(0, |keys| keys.len());
        self.col = col.min(width.saturating_sub(1));
    }
}

impl EventHandler for KeypadState {
    type Event = KeypadEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<KeypadEvent> {
        match event {
            TuiEvent::CursorUp => {
                self.select(self.row.saturating_sub(1), self.col);
                None
            }
            TuiEvent::CursorDown => {
                self.select(self.row + 1, self.col);
                None
            }
            TuiEvent::CursorLeft => {
                self.select(self.row, self.col.saturating_sub(1));
                None
            }
            TuiEvent::CursorRight => {
                self.select(self.row, self.col + 1);
                None
            }
            TuiEvent::InputChar(' ') => self.selected_key().map(KeypadEvent::Press),
            _ => None,
        }
    }
}

/// Transient render wrapper for the button grid.
pub struct KeypadView<'a> {
    state: &'a KeypadState,
    mode: Mode,
    angle_mode: AngleMode,
}

impl<'a> KeypadView<'a> {
    pub fn new(state: &'a KeypadState, mode: Mode, angle_mode: AngleMode) -> Self {
        Self {
            state,
            mode,
            angle_mode,
        }
    }

    fn label(&self, key: Key) -> String {
        match key {
            Key::AngleToggle => self.angle_mode.label().to_string(),
            other => other.label(),
        }
    }

    fn style(&self, key: Key, selected: bool) -> Style {
        let base = if !is_active(self.mode, key) {
            Style::default().fg(Color::DarkGray)
        } else {
            match key {
                Key::Equals => Style::default().fg(Color::Black).bg(Color::Green),
                Key::Operator(_) | Key::Power | Key::Root => Style::default().fg(Color::Yellow),
                Key::Clear | Key::Backspace => Style::default().fg(Color::Red),
                Key::Function(_) | Key::Constant(_) | Key::AngleToggle => {
                    Style::default().fg(Color::Cyan)
                }
                _ => Style::default(),
            }
        };
        if selected {
            base.add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            base
        }
    }
}

impl Component for KeypadView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let layout = self.state.layout();
        for (r, (keys, cells)) in layout.iter().zip(key_cells(area, layout)).enumerate() {
            for (c, (key, cell)) in keys.iter().zip(cells).enumerate() {
                let selected = r == self.state.row && c == self.state.col;
                let style = self.style(*key, selected);

                // Bordered buttons need three rows; smaller grids render flat
                let (block, inner) = if cell.height >= 3 {
                    let block = Block::default()
                        .borders(Borders::ALL)
                        .border_style(style.remove_modifier(Modifier::REVERSED));
                    let inner = block.inner(cell);
                    (Some(block), inner)
                } else {
                    (None, cell)
                };
                if let Some(block) = block {
                    frame.render_widget(block, cell);
                }

                let [_, label_area, _] = Layout::vertical([
                    Constraint::Fill(1),
                    Constraint::Length(1),
                    Constraint::Fill(1),
                ])
                .areas(inner);
                let label = Paragraph::new(self.label(*key)).style(style).centered();
                frame.render_widget(label, label_area);
            }
        }
    }
}
