//! End-to-end checks against the public library API: keypads driven key by
//! key, the one-shot evaluator, and the history file round trip.

use calcpad::core::expr::{self, BinaryOp, EvalError};
use calcpad::core::functions::{AngleMode, UnaryFunction};
use calcpad::core::history::{self, History, HistoryEntry};
use calcpad::core::key::{Key, KeypadKind};
use calcpad::core::keypad::{ERROR_TOKEN, Keypad, Outcome};

fn press_str(keypad: &mut Keypad, input: &str) -> Outcome {
    let mut outcome = Outcome::Ignored;
    for c in input.chars() {
        let key = Key::from_char(c).unwrap_or_else(|| panic!("no key for {c:?}"));
        outcome = keypad.press(key);
    }
    outcome
}

fn result_of(outcome: Outcome) -> String {
    match outcome {
        Outcome::Evaluated(evaluation) => evaluation.result,
        other => panic!("expected an evaluation, got {other:?}"),
    }
}

#[test]
fn decimal_point_is_idempotent() {
    for digits in ["", "0", "7", "12", "3.5", "0.25"] {
        let mut once = Keypad::new(KeypadKind::Basic);
        press_str(&mut once, digits);
        let mut twice = once.clone();

        once.press(Key::Decimal);
        twice.press(Key::Decimal);
        twice.press(Key::Decimal);
        assert_eq!(once.operand(), twice.operand(), "after {digits:?}");
    }
}

#[test]
fn backspace_undoes_digit() {
    for prefix in ["", "5", "12+3", "(4×", "0.5", "12+", "(", "(4)"] {
        let mut keypad = Keypad::new(KeypadKind::Basic);
        press_str(&mut keypad, prefix);
        let before = keypad.clone();
        keypad.press(Key::Digit(8));
        keypad.press(Key::Backspace);

        assert_eq!(keypad.expression(), before.expression(), "after {prefix:?}");
        assert_eq!(keypad.paren_depth(), before.paren_depth(), "after {prefix:?}");
        assert_eq!(
            keypad.is_waiting_for_operand(),
            before.is_waiting_for_operand(),
            "after {prefix:?}"
        );
        assert_eq!(
            keypad.last_input_was_operator(),
            before.last_input_was_operator(),
            "after {prefix:?}"
        );
        if !before.is_waiting_for_operand() {
            assert_eq!(keypad, before, "after {prefix:?}");
        }
    }
}

#[test]
fn operator_after_erased_operand_overrides() {
    let mut keypad = Keypad::new(KeypadKind::Basic);
    press_str(&mut keypad, "5+3");
    keypad.press(Key::Backspace);
    keypad.press(Key::Operator(BinaryOp::Multiply));
    assert_eq!(keypad.expression(), "5×");
}

#[test]
fn multiplication_binds_tighter() {
    let mut keypad = Keypad::new(KeypadKind::Basic);
    assert_eq!(result_of(press_str(&mut keypad, "2+3×4=")), "14");
}

#[test]
fn parentheses_group() {
    let mut keypad = Keypad::new(KeypadKind::Basic);
    assert_eq!(result_of(press_str(&mut keypad, "(2+3)×4=")), "20");
}

#[test]
fn repeated_operator_overrides() {
    let mut keypad = Keypad::new(KeypadKind::Basic);
    press_str(&mut keypad, "5+");
    keypad.press(Key::Operator(BinaryOp::Add));
    assert_eq!(keypad.expression(), "5+");
    keypad.press(Key::Operator(BinaryOp::Multiply));
    assert_eq!(keypad.expression(), "5×");
}

#[test]
fn toggle_parenthesis_opens_nested() {
    let mut keypad = Keypad::new(KeypadKind::Basic);
    keypad.press(Key::ParenToggle);
    assert_eq!(keypad.paren_depth(), 1);
    keypad.press(Key::ParenToggle);
    assert_eq!(keypad.paren_depth(), 2);
    assert_eq!(keypad.expression(), "((");

    press_str(&mut keypad, "1+");
    keypad.press(Key::ParenToggle);
    assert_eq!(keypad.paren_depth(), 3);
}

#[test]
fn sine_of_ninety_degrees() {
    let mut keypad = Keypad::new(KeypadKind::Scientific);
    press_str(&mut keypad, "90");
    keypad.press(Key::Function(UnaryFunction::Sin));
    let value: f64 = keypad.operand().parse().unwrap();
    assert!((value - 1.0).abs() < 1e-9);
}

#[test]
fn division_by_zero_recovers_on_next_digit() {
    let mut keypad = Keypad::new(KeypadKind::Basic);
    let outcome = press_str(&mut keypad, "5÷0=");
    assert_eq!(outcome, Outcome::Failed(EvalError::DivisionByZero));
    assert_eq!(keypad.operand(), ERROR_TOKEN);

    keypad.press(Key::Digit(7));
    assert_eq!(keypad.operand(), "7");
    assert_eq!(keypad.expression(), "");
    assert!(!keypad.is_errored());
}

#[test]
fn basic_keypad_ignores_scientific_keys() {
    let mut keypad = Keypad::new(KeypadKind::Basic);
    press_str(&mut keypad, "9");
    assert_eq!(keypad.press(Key::Function(UnaryFunction::Sqrt)), Outcome::Ignored);
    assert_eq!(keypad.operand(), "9");
}

#[test]
fn one_shot_evaluator() {
    assert_eq!(expr::evaluate("2+3*4", AngleMode::Degrees), Ok(14.0));
    assert_eq!(expr::evaluate("2^3^2", AngleMode::Degrees), Ok(512.0));
    assert_eq!(expr::evaluate("5!", AngleMode::Degrees), Ok(120.0));
    let cos_pi = expr::evaluate("cos(pi)", AngleMode::Radians).unwrap();
    assert!((cos_pi + 1.0).abs() < 1e-12);
    assert_eq!(
        expr::evaluate("1/0", AngleMode::Degrees),
        Err(EvalError::DivisionByZero)
    );
    assert_eq!(
        expr::evaluate("(1+2", AngleMode::Degrees),
        Err(EvalError::UnbalancedParen)
    );
    assert_eq!(expr::evaluate("", AngleMode::Degrees), Err(EvalError::UnexpectedEnd));
}

#[test]
fn history_file_round_trip() {
    let path = std::env::temp_dir().join(format!(
        "calcpad-integration-{}-history.json",
        std::process::id()
    ));
    let mut tape = History::with_limit(2);
    tape.push(HistoryEntry::new("1+1".to_string(), "2".to_string()));
    tape.push(HistoryEntry::new("2+2".to_string(), "4".to_string()));
    tape.push(HistoryEntry::new("3+3".to_string(), "6".to_string()));

    history::save_to(&tape, &path).unwrap();
    let loaded = history::load_from(&path, 2).unwrap();
    assert_eq!(loaded, tape);
    assert_eq!(loaded.entries()[0].result, "4");

    let _ = std::fs::remove_file(&path);
}
