//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard and mouse events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! Nothing animates, so the loop sleeps up to 500ms waiting for input and
//! only redraws after an event (including terminal resize). All pending
//! events are drained before the next draw.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::time::Duration;

use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use ratatui::layout::Rect;

use crate::Mode;
use crate::core::action::{Action, Effect, FractionInput, update};
use crate::core::config::ResolvedConfig;
use crate::core::history::{self, History};
use crate::core::key::Key;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::keypad::layout_for;
use crate::tui::components::{HistoryEvent, HistoryOverlayState, KeypadEvent, KeypadState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub keypad: KeypadState,
    // History overlay (None = hidden)
    pub history_overlay: Option<HistoryOverlayState>,
}

impl TuiState {
    pub fn new(mode: Mode) -> Self {
        Self {
            keypad: KeypadState::new(layout_for(mode)),
            history_overlay: None,
        }
    }

    pub fn open_history(&mut self, app: &App) {
        self.history_overlay = Some(HistoryOverlayState::new(app.history.len()));
    }

    /// Bring presentation state back in line with the app after an update.
    fn sync(&mut self, app: &App) {
        if self.keypad.layout() != layout_for(app.mode) {
            self.keypad.set_layout(layout_for(app.mode));
        }
        if let Some(overlay) = self.history_overlay.as_mut() {
            overlay.sync_len(app.history.len());
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Disambiguation lets Ctrl+H arrive as Ctrl+H rather than Backspace;
        // terminals without the protocol ignore it
        execute!(
            stdout(),
            EnableMouseCapture,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )?;
        info!("Terminal modes enabled (mouse, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), PopKeyboardEnhancementFlags, DisableMouseCapture);
    }
}

/// Load the tape for a session, falling back to an empty one.
fn load_history(config: &ResolvedConfig) -> History {
    if !config.history_enabled {
        return History::with_limit(config.history_limit);
    }
    history::load(config.history_limit).unwrap_or_else(|e| {
        warn!("Failed to load history: {}", e);
        History::with_limit(config.history_limit)
    })
}

fn save_history(app: &mut App) {
    if let Err(e) = history::save(&app.history) {
        warn!("Failed to save history: {}", e);
        app.status_message = format!("History not saved: {}", e);
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let mut app = App::from_config(&config, load_history(&config));
    let mut tui = TuiState::new(app.mode);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let mut needs_redraw = true; // Force first frame

    loop {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        let first_event = poll_event_timeout(Duration::from_millis(500));
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let frame_area = terminal.get_frame().area();
            let Some(action) = translate(&app, &mut tui, &event, frame_area) else {
                continue;
            };
            match update(&mut app, action) {
                Effect::Quit => should_quit = true,
                Effect::SaveHistory => save_history(&mut app),
                Effect::None => {}
            }
            tui.sync(&app);
            if should_quit {
                break;
            }
        }

        if should_quit {
            break;
        }
    }

    info!("Shutting down");
    ratatui::restore();
    Ok(())
}

/// Map one terminal event to at most one core action. Presentation-only
/// events (highlight moves, overlay open/close) are applied to `tui` here.
fn translate(app: &App, tui: &mut TuiState, event: &TuiEvent, frame_area: Rect) -> Option<Action> {
    // Ctrl+C always quits, even from the overlay
    if matches!(event, TuiEvent::ForceQuit) {
        return Some(Action::Quit);
    }
    if matches!(event, TuiEvent::Resize) {
        return None;
    }

    // When the history overlay is open, route all events to it
    if let Some(overlay) = tui.history_overlay.as_mut() {
        let history_event = overlay.handle_event(event)?;
        debug!("History overlay event: {:?}", history_event);
        return match history_event {
            HistoryEvent::Recall(index) => {
                tui.history_overlay = None;
                Some(Action::RecallHistory(index))
            }
            HistoryEvent::Delete(index) => Some(Action::DeleteHistory(index)),
            HistoryEvent::ClearAll => Some(Action::ClearHistory),
            HistoryEvent::Dismiss => {
                tui.history_overlay = None;
                None
            }
        };
    }

    match event {
        TuiEvent::OpenHistory | TuiEvent::InputChar('h') => {
            tui.open_history(app);
            None
        }
        TuiEvent::InputChar('q') => Some(Action::Quit),
        TuiEvent::Tab => Some(Action::NextMode),
        TuiEvent::Submit => Some(Action::Press(Key::Equals)),
        TuiEvent::Backspace => Some(Action::Press(Key::Backspace)),
        TuiEvent::Escape | TuiEvent::InputChar('c') => Some(Action::Press(Key::Clear)),

        // Fraction fields move sideways; the highlight still moves up/down
        TuiEvent::CursorLeft if app.mode == Mode::Fraction => {
            Some(Action::Fraction(FractionInput::PrevField))
        }
        TuiEvent::CursorRight if app.mode == Mode::Fraction => {
            Some(Action::Fraction(FractionInput::NextField))
        }
        TuiEvent::InputChar('s') if app.mode == Mode::Fraction => {
            Some(Action::Fraction(FractionInput::ToggleSign))
        }

        TuiEvent::MouseMove(column, row) => {
            if let Some((r, c)) = ui::hit_test_key(frame_area, app.mode, *column, *row) {
                tui.keypad.select(r, c);
            }
            None
        }
        TuiEvent::MouseClick(column, row) => {
            let (r, c) = ui::hit_test_key(frame_area, app.mode, *column, *row)?;
            tui.keypad.select(r, c);
            tui.keypad.selected_key().map(Action::Press)
        }

        TuiEvent::InputChar(c) if *c != ' ' => Key::from_char(*c).map(Action::Press),
        _ => match tui.keypad.handle_event(event)? {
            KeypadEvent::Press(key) => Some(Action::Press(key)),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::expr::BinaryOp;
    use crate::test_support::test_app;

    const FRAME: Rect = Rect {
        x: 0,
        y: 0,
        width: 40,
        height: 26,
    };

    /// Translate + update, the way the run loop does.
    fn feed(app: &mut App, tui: &mut TuiState, event: TuiEvent) -> Effect {
        let effect = match translate(app, tui, &event, FRAME) {
            Some(action) => update(app, action),
            None => Effect::None,
        };
        tui.sync(app);
        effect
    }

    fn type_str(app: &mut App, tui: &mut TuiState, input: &str) {
        for c in input.chars() {
            feed(app, tui, TuiEvent::InputChar(c));
        }
    }

    #[test]
    fn test_typing_evaluates() {
        let mut app = test_app();
        let mut tui = TuiState::new(app.mode);
        type_str(&mut app, &mut tui, "12x3");
        assert_eq!(feed(&mut app, &mut tui, TuiEvent::Submit), Effect::SaveHistory);
        assert_eq!(app.basic.operand(), "36");
    }

    #[test]
    fn test_quit_keys() {
        let mut app = test_app();
        let mut tui = TuiState::new(app.mode);
        assert_eq!(feed(&mut app, &mut tui, TuiEvent::InputChar('q')), Effect::Quit);
        tui.open_history(&app);
        assert_eq!(feed(&mut app, &mut tui, TuiEvent::ForceQuit), Effect::Quit);
    }

    #[test]
    fn test_escape_and_c_clear() {
        let mut app = test_app();
        let mut tui = TuiState::new(app.mode);
        type_str(&mut app, &mut tui, "5+");
        feed(&mut app, &mut tui, TuiEvent::Escape);
        assert_eq!(app.basic.expression(), "");
        type_str(&mut app, &mut tui, "7c");
        assert_eq!(app.basic.operand(), "0");
    }

    #[test]
    fn test_arrows_and_space_press_buttons() {
        let mut app = test_app();
        let mut tui = TuiState::new(app.mode);
        // Row 1, column 0 is "7"
        feed(&mut app, &mut tui, TuiEvent::CursorDown);
        feed(&mut app, &mut tui, TuiEvent::InputChar(' '));
        assert_eq!(app.basic.operand(), "7");
    }

    #[test]
    fn test_mouse_click_presses_button() {
        let mut app = test_app();
        let mut tui = TuiState::new(app.mode);
        // Keypad rows start at y = 5, four rows per button row; column 1 of
        // row 3 is "2"
        feed(&mut app, &mut tui, TuiEvent::MouseClick(15, 5 + 3 * 4));
        assert_eq!(app.basic.operand(), "2");
        assert_eq!((tui.keypad.row, tui.keypad.col), (3, 1));
        // Clicks outside the keypad do nothing
        feed(&mut app, &mut tui, TuiEvent::MouseClick(15, 0));
        assert_eq!(app.basic.operand(), "2");
    }

    #[test]
    fn test_tab_switches_layout() {
        let mut app = test_app();
        let mut tui = TuiState::new(app.mode);
        feed(&mut app, &mut tui, TuiEvent::Tab);
        assert_eq!(app.mode, Mode::Scientific);
        assert_eq!(tui.keypad.layout(), layout_for(Mode::Scientific));
    }

    #[test]
    fn test_fraction_mode_keys() {
        let mut app = test_app();
        app.mode = Mode::Fraction;
        let mut tui = TuiState::new(app.mode);
        type_str(&mut app, &mut tui, "3");
        feed(&mut app, &mut tui, TuiEvent::CursorRight);
        feed(&mut app, &mut tui, TuiEvent::Backspace);
        type_str(&mut app, &mut tui, "4s");
        assert_eq!(app.fraction.first.numerator, -3);
        assert_eq!(app.fraction.first.denominator, 4);
        type_str(&mut app, &mut tui, "*");
        assert_eq!(
            app.fraction.operator,
            crate::core::fraction::FractionOp::from_binary(BinaryOp::Multiply).unwrap()
        );
    }

    #[test]
    fn test_history_overlay_recall_flow() {
        let mut app = test_app();
        let mut tui = TuiState::new(app.mode);
        type_str(&mut app, &mut tui, "6x7=");
        type_str(&mut app, &mut tui, "1+");

        feed(&mut app, &mut tui, TuiEvent::OpenHistory);
        assert!(tui.history_overlay.is_some());
        // Keys go to the overlay, not the keypad
        type_str(&mut app, &mut tui, "9");
        assert_eq!(app.basic.expression(), "1+");

        feed(&mut app, &mut tui, TuiEvent::Submit);
        assert!(tui.history_overlay.is_none());
        assert_eq!(app.basic.operand(), "42");
        feed(&mut app, &mut tui, TuiEvent::Submit);
        assert_eq!(app.basic.operand(), "43");
    }

    #[test]
    fn test_history_overlay_delete_tracks_length() {
        let mut app = test_app();
        let mut tui = TuiState::new(app.mode);
        type_str(&mut app, &mut tui, "1+1=2+2=");
        tui.open_history(&app);
        assert_eq!(
            feed(&mut app, &mut tui, TuiEvent::InputChar('d')),
            Effect::SaveHistory
        );
        assert_eq!(app.history.len(), 1);
        assert_eq!(tui.history_overlay.as_ref().map(|o| o.len), Some(1));
        feed(&mut app, &mut tui, TuiEvent::Escape);
        assert!(tui.history_overlay.is_none());
    }
}
