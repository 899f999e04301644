//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::Mode;
use crate::core::key::{Key, KeypadKind};
use crate::core::keypad::{Keypad, Outcome};
use crate::core::state::App;

pub fn basic_keypad() -> Keypad {
    Keypad::new(KeypadKind::Basic)
}

pub fn scientific_keypad() -> Keypad {
    Keypad::new(KeypadKind::Scientific)
}

/// Press every key spelled out in `input` (see [`Key::from_char`]) and
/// return the outcome of the last one. Unknown characters are skipped.
pub fn press_str(keypad: &mut Keypad, input: &str) -> Outcome {
    let mut outcome = Outcome::Ignored;
    for c in input.chars() {
        if let Some(key) = Key::from_char(c) {
            outcome = keypad.press(key);
        }
    }
    outcome
}

/// Creates a test App in basic mode with an empty tape.
pub fn test_app() -> App {
    App::new(Mode::Basic)
}

/// A unique path under the system temp dir, so parallel tests don't collide.
pub fn scratch_path(name: &str) -> PathBuf {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!("calcpad-{}-{}-{}", std::process::id(), n, name))
}
