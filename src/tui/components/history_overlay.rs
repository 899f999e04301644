//! # History Overlay Component
//!
//! Full-screen overlay over the result tape: recall, delete or clear
//! entries. Opened with Ctrl+H, dismissed with Esc.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `HistoryOverlayState` lives in `TuiState`
//! - `HistoryOverlay` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::core::history::HistoryEntry;
use crate::tui::component::EventHandler;
use crate::tui::event::TuiEvent;

/// Persistent state for the history overlay.
pub struct HistoryOverlayState {
    pub len: usize,
    pub selected: usize,
    pub confirm_clear: bool,
    pub list_state: ListState,
}

/// Events emitted by the history overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HistoryEvent {
    Recall(usize),
    Delete(usize),
    ClearAll,
    Dismiss,
}

impl HistoryOverlayState {
    /// Opens with the newest entry (bottom of the tape) selected.
    pub fn new(len: usize) -> Self {
        let mut state = Self {
            len,
            selected: 0,
            confirm_clear: false,
            list_state: ListState::default(),
        };
        state.select(len.saturating_sub(1));
        state
    }

    fn select(&mut self, index: usize) {
        if self.len == 0 {
            self.selected = 0;
            self.list_state.select(None);
        } else {
            self.selected = index.min(self.len - 1);
            self.list_state.select(Some(self.selected));
        }
    }

    /// Follow the tape after entries were removed.
    pub fn sync_len(&mut self, len: usize) {
        self.len = len;
        self.select(self.selected);
    }
}

impl EventHandler for HistoryOverlayState {
    type Event = HistoryEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<HistoryEvent> {
        // Reset clear confirmation on any other key
        let is_clear_key = matches!(event, TuiEvent::InputChar('x'));
        if !is_clear_key {
            self.confirm_clear = false;
        }

        match event {
            TuiEvent::Escape => Some(HistoryEvent::Dismiss),
            TuiEvent::CursorUp => {
                self.select(self.selected.saturating_sub(1));
                None
            }
            TuiEvent::CursorDown => {
                self.select(self.selected + 1);
                None
            }
            TuiEvent::Submit => (self.len > 0).then_some(HistoryEvent::Recall(self.selected)),
            TuiEvent::InputChar('d') => (self.len > 0).then_some(HistoryEvent::Delete(self.selected)),
            TuiEvent::InputChar('x') => {
                if self.len == 0 {
                    return None;
                }
                if self.confirm_clear {
                    self.confirm_clear = false;
                    Some(HistoryEvent::ClearAll)
                } else {
                    self.confirm_clear = true;
                    None
                }
            }
            _ => None,
        }
    }
}

/// Transient render wrapper for the history overlay.
pub struct HistoryOverlay<'a> {
    state: &'a mut HistoryOverlayState,
    entries: &'a [HistoryEntry],
}

impl<'a> HistoryOverlay<'a> {
    pub fn new(state: &'a mut HistoryOverlayState, entries: &'a [HistoryEntry]) -> Self {
        Self { state, entries }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(80, 70, area);

        // Clear underlying content
        frame.render_widget(Clear, overlay);

        let help_text = if self.state.confirm_clear {
            " Press x again to clear all | Esc Cancel "
        } else {
            " Enter Recall  d Delete  x Clear  Esc Back "
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" History ")
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(help_text).centered())
            .padding(Padding::horizontal(1));

        if self.entries.is_empty() {
            let empty = Paragraph::new("No calculations yet.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, overlay);
            return;
        }

        let inner_width = overlay.width.saturating_sub(4) as usize; // borders + padding
        let items: Vec<ListItem> = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let time = format_timestamp(entry.timestamp);
                let result = format!("= {}", entry.result);

                // Layout: "<time>  <expression>   = <result>"
                let fixed_width = time.width() + 2 + result.width() + 2;
                let expression_width = inner_width.saturating_sub(fixed_width);
                let expression = truncate_str(&entry.expression, expression_width);
                let padding = " ".repeat(expression_width.saturating_sub(expression.width()));

                let style = if i == self.state.selected {
                    if self.state.confirm_clear {
                        Style::default()
                            .fg(Color::Red)
                            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                    } else {
                        Style::default()
                            .fg(Color::White)
                            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                    }
                } else {
                    Style::default().fg(Color::Gray)
                };

                ListItem::new(Line::from(vec![
                    Span::styled(time, style),
                    Span::styled("  ", style),
                    Span::styled(expression, style),
                    Span::styled(padding, style),
                    Span::styled("  ", style),
                    Span::styled(result, style),
                ]))
            })
            .collect();

        let list = List::new(items).block(block);
        frame.render_stateful_widget(list, overlay, &mut self.state.list_state);
    }
}

/// Format a Unix timestamp as "Jan 15 14:03" in local time.
fn format_timestamp(ts: i64) -> String {
    use chrono::{DateTime, Local, Utc};
    let dt: DateTime<Local> = DateTime::<Utc>::from_timestamp(ts, 0)
        .unwrap_or_default()
        .with_timezone(&Local);
    dt.format("%b %d %H:%M").to_string()
}

/// Truncate a string to fit within `max_width` columns, adding "..." if needed.
fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let mut out = String::new();
    for c in s.chars() {
        if out.width() + c.to_string().width() > max_width - 3 {
            break;
        }
        out.push(c);
    }
    out.push_str("...");
    out
}

/// Compute a centered rect using percentage of the outer rect.
fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn entry(expression: &str, result: &str) -> HistoryEntry {
        HistoryEntry::new(expression.to_string(), result.to_string())
    }

    #[test]
    fn test_opens_on_newest_entry() {
        let state = HistoryOverlayState::new(3);
        assert_eq!(state.selected, 2);
        assert_eq!(state.list_state.selected(), Some(2));

        let empty = HistoryOverlayState::new(0);
        assert_eq!(empty.list_state.selected(), None);
    }

    #[test]
    fn test_navigation_and_recall() {
        let mut state = HistoryOverlayState::new(3);
        state.handle_event(&TuiEvent::CursorUp);
        state.handle_event(&TuiEvent::CursorUp);
        state.handle_event(&TuiEvent::CursorUp);
        assert_eq!(state.handle_event(&TuiEvent::Submit), Some(HistoryEvent::Recall(0)));
        state.handle_event(&TuiEvent::CursorDown);
        assert_eq!(
            state.handle_event(&TuiEvent::InputChar('d')),
            Some(HistoryEvent::Delete(1))
        );
        assert_eq!(state.handle_event(&TuiEvent::Escape), Some(HistoryEvent::Dismiss));
    }

    #[test]
    fn test_clear_needs_confirmation() {
        let mut state = HistoryOverlayState::new(2);
        assert_eq!(state.handle_event(&TuiEvent::InputChar('x')), None);
        assert!(state.confirm_clear);
        // Any other key cancels the confirmation
        state.handle_event(&TuiEvent::CursorUp);
        assert!(!state.confirm_clear);

        state.handle_event(&TuiEvent::InputChar('x'));
        assert_eq!(
            state.handle_event(&TuiEvent::InputChar('x')),
            Some(HistoryEvent::ClearAll)
        );
    }

    #[test]
    fn test_empty_tape_emits_nothing() {
        let mut state = HistoryOverlayState::new(0);
        assert_eq!(state.handle_event(&TuiEvent::Submit), None);
        assert_eq!(state.handle_event(&TuiEvent::InputChar('d')), None);
        assert_eq!(state.handle_event(&TuiEvent::InputChar('x')), None);
    }

    #[test]
    fn test_sync_len_after_delete() {
        let mut state = HistoryOverlayState::new(2);
        state.sync_len(1);
        assert_eq!(state.selected, 0);
        state.sync_len(0);
        assert_eq!(state.list_state.selected(), None);
    }

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("1+2", 10), "1+2");
        assert_eq!(truncate_str("123456789", 6), "123...");
        assert_eq!(truncate_str("123456789", 2), "..");
    }

    #[test]
    fn test_render_lists_entries() {
        let backend = TestBackend::new(80, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        let entries = vec![entry("2+3×4", "14"), entry("(2+3)×4", "20")];
        let mut state = HistoryOverlayState::new(entries.len());
        terminal
            .draw(|f| HistoryOverlay::new(&mut state, &entries).render(f, f.area()))
            .unwrap();

        let text = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();
        assert!(text.contains("History"));
        assert!(text.contains("2+3×4"));
        assert!(text.contains("= 20"));
    }

    #[test]
    fn test_render_empty() {
        let backend = TestBackend::new(80, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut state = HistoryOverlayState::new(0);
        terminal
            .draw(|f| HistoryOverlay::new(&mut state, &[]).render(f, f.area()))
            .unwrap();
        let text = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();
        assert!(text.contains("No calculations yet."));
    }
}
