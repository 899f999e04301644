//! # Actions
//!
//! Everything that can happen in calcpad becomes an `Action`.
//! User presses `7`? That's `Action::Press(Key::Digit(7))`.
//! User picks a tape entry? That's `Action::RecallHistory(index)`.
//!
//! The `update()` function takes the current state and an action,
//! then mutates the state. No side effects here. I/O happens elsewhere:
//! when the tape must be written, `update()` returns `Effect::SaveHistory`
//! and the adapter does the write.
//!
//! ```text
//! State + Action  →  update()  →  New State (+ Effect)
//! ```

use log::{debug, info, warn};

use crate::Mode;
use crate::core::fraction::{FractionField, FractionOp};
use crate::core::history::HistoryEntry;
use crate::core::key::Key;
use crate::core::keypad::Outcome;
use crate::core::state::App;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A keypad button, from the keyboard or a mouse click.
    Press(Key),
    /// Fraction-only input with no keypad equivalent.
    Fraction(FractionInput),
    SwitchMode(Mode),
    NextMode,
    RecallHistory(usize),
    DeleteHistory(usize),
    ClearHistory,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FractionInput {
    ToggleSign,
    NextField,
    PrevField,
    SelectField(FractionField),
}

/// Side effect the adapter must carry out after `update()`.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    SaveHistory,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("update: {:?}", action);
    match action {
        Action::Press(key) => match app.mode {
            Mode::Fraction => {
                press_fraction(app, key);
                Effect::None
            }
            Mode::Basic | Mode::Scientific => press_keypad(app, key),
        },
        Action::Fraction(input) => {
            let pad = &mut app.fraction;
            match input {
                FractionInput::ToggleSign => pad.toggle_sign(),
                FractionInput::NextField => pad.next_field(),
                FractionInput::PrevField => pad.prev_field(),
                FractionInput::SelectField(field) => pad.select_field(field),
            }
            Effect::None
        }
        Action::SwitchMode(mode) => {
            switch_mode(app, mode);
            Effect::None
        }
        Action::NextMode => {
            switch_mode(app, app.mode.next());
            Effect::None
        }
        Action::RecallHistory(index) => {
            let Some(entry) = app.history.get(index) else {
                warn!("Recall of missing history entry {}", index);
                return Effect::None;
            };
            let result = entry.result.clone();
            if app.mode == Mode::Fraction {
                switch_mode(app, Mode::Basic);
            }
            if let Some(keypad) = app.active_keypad_mut() {
                keypad.recall(&result);
            }
            app.status_message = format!("Recalled {}", result);
            Effect::None
        }
        Action::DeleteHistory(index) => match app.history.remove(index) {
            Some(entry) => {
                info!("Deleted history entry {} = {}", entry.expression, entry.result);
                save_if_enabled(app)
            }
            None => Effect::None,
        },
        Action::ClearHistory => {
            app.history.clear();
            app.status_message = String::from("History cleared");
            save_if_enabled(app)
        }
        Action::Quit => Effect::Quit,
    }
}

fn switch_mode(app: &mut App, mode: Mode) {
    if app.mode != mode {
        info!("Switching mode {:?} -> {:?}", app.mode, mode);
        app.mode = mode;
        app.status_message = format!("{} calculator", mode.label());
    }
}

fn press_keypad(app: &mut App, key: Key) -> Effect {
    let Some(keypad) = app.active_keypad_mut() else {
        return Effect::None;
    };
    match keypad.press(key) {
        Outcome::Evaluated(evaluation) => {
            app.status_message = format!("{} = {}", evaluation.expression, evaluation.result);
            if !app.history_enabled {
                return Effect::None;
            }
            app.history
                .push(HistoryEntry::new(evaluation.expression, evaluation.result));
            Effect::SaveHistory
        }
        Outcome::Failed(err) => {
            app.status_message = err.to_string();
            Effect::None
        }
        Outcome::Updated | Outcome::Ignored => Effect::None,
    }
}

/// Translate keypad keys into fraction-pad edits.
fn press_fraction(app: &mut App, key: Key) {
    let pad = &mut app.fraction;
    match key {
        Key::Digit(d) => pad.input_digit(d),
        Key::Backspace => pad.backspace(),
        Key::Clear => pad.clear(),
        Key::Operator(op) => match FractionOp::from_binary(op) {
            Some(op) => pad.set_operator(op),
            None => debug!("No fraction operator for {:?}", op),
        },
        Key::Equals => {
            let result = pad.calculate();
            app.status_message = format!("= {} ({})", result, result.to_decimal());
        }
        other => debug!("Fraction pad ignoring {:?}", other),
    }
}

fn save_if_enabled(app: &App) -> Effect {
    if app.history_enabled {
        Effect::SaveHistory
    } else {
        Effect::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fraction::MixedFraction;
    use crate::test_support::test_app;

    fn press_all(app: &mut App, input: &str) -> Effect {
        let mut effect = Effect::None;
        for c in input.chars() {
            if let Some(key) = Key::from_char(c) {
                effect = update(app, Action::Press(key));
            }
        }
        effect
    }

    #[test]
    fn test_quit_returns_quit_effect() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }

    #[test]
    fn test_evaluation_records_history() {
        let mut app = test_app();
        let effect = press_all(&mut app, "2+3×4=");
        assert_eq!(effect, Effect::SaveHistory);
        assert_eq!(app.history.len(), 1);
        let entry = &app.history.entries()[0];
        assert_eq!(entry.expression, "2+3×4");
        assert_eq!(entry.result, "14");
        assert_eq!(app.status_message, "2+3×4 = 14");
    }

    #[test]
    fn test_disabled_history_is_not_recorded() {
        let mut app = test_app();
        app.history_enabled = false;
        assert_eq!(press_all(&mut app, "1+1="), Effect::None);
        assert!(app.history.is_empty());
    }

    #[test]
    fn test_failed_evaluation_sets_status() {
        let mut app = test_app();
        assert_eq!(press_all(&mut app, "1÷0="), Effect::None);
        assert_eq!(app.basic.operand(), "Error");
        assert_eq!(app.status_message, "division by zero");
        assert!(app.history.is_empty());
    }

    #[test]
    fn test_keypads_keep_separate_state() {
        let mut app = test_app();
        press_all(&mut app, "12");
        update(&mut app, Action::NextMode);
        assert_eq!(app.mode, Mode::Scientific);
        press_all(&mut app, "7");
        update(&mut app, Action::SwitchMode(Mode::Basic));
        assert_eq!(app.basic.operand(), "12");
        assert_eq!(app.scientific.operand(), "7");
    }

    #[test]
    fn test_fraction_mode_translates_keys() {
        let mut app = test_app();
        update(&mut app, Action::SwitchMode(Mode::Fraction));
        // 1/2 + 1/3; denominators start at 1
        press_all(&mut app, "1");
        update(&mut app, Action::Fraction(FractionInput::NextField));
        press_all(&mut app, "⌫2+");
        update(
            &mut app,
            Action::Fraction(FractionInput::SelectField(FractionField::Numerator2)),
        );
        press_all(&mut app, "1");
        update(&mut app, Action::Fraction(FractionInput::NextField));
        press_all(&mut app, "⌫3=");

        assert!(app.fraction.has_calculated);
        assert_eq!(app.fraction.result, MixedFraction::new(0, 5, 6));
        assert_eq!(app.status_message, "= 5/6 (0.833333)");
    }

    #[test]
    fn test_recall_history_into_keypad() {
        let mut app = test_app();
        press_all(&mut app, "6×7=");
        update(&mut app, Action::SwitchMode(Mode::Fraction));
        update(&mut app, Action::RecallHistory(0));
        assert_eq!(app.mode, Mode::Basic);
        assert_eq!(app.basic.operand(), "42");
        press_all(&mut app, "+1=");
        assert_eq!(app.basic.operand(), "43");
    }

    #[test]
    fn test_recall_missing_entry_is_noop() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::RecallHistory(5)), Effect::None);
        assert_eq!(app.basic.operand(), "0");
    }

    #[test]
    fn test_delete_and_clear_history() {
        let mut app = test_app();
        press_all(&mut app, "1+1=");
        press_all(&mut app, "2+2=");
        assert_eq!(update(&mut app, Action::DeleteHistory(0)), Effect::SaveHistory);
        assert_eq!(app.history.entries()[0].result, "4");
        assert_eq!(update(&mut app, Action::DeleteHistory(9)), Effect::None);
        assert_eq!(update(&mut app, Action::ClearHistory), Effect::SaveHistory);
        assert!(app.history.is_empty());
    }
}
