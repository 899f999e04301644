//! # Application State
//!
//! Core business state for calcpad. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── mode: Mode                    // which calculator is on screen
//! ├── basic: Keypad                 // basic keypad accumulator
//! ├── scientific: Keypad            // scientific keypad accumulator
//! ├── fraction: FractionPad         // mixed-fraction calculator
//! ├── history: History              // result tape
//! ├── history_enabled: bool         // record + persist the tape
//! └── status_message: String        // status bar text
//! ```
//!
//! Each calculator keeps its own state, so switching mode and back resumes
//! where the user left off.
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use crate::Mode;
use crate::core::config::ResolvedConfig;
use crate::core::fraction::FractionPad;
use crate::core::functions::AngleMode;
use crate::core::history::History;
use crate::core::key::KeypadKind;
use crate::core::keypad::Keypad;

pub struct App {
    pub mode: Mode,
    pub basic: Keypad,
    pub scientific: Keypad,
    pub fraction: FractionPad,
    pub history: History,
    pub history_enabled: bool,
    pub status_message: String,
}

impl App {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            basic: Keypad::new(KeypadKind::Basic),
            scientific: Keypad::new(KeypadKind::Scientific),
            fraction: FractionPad::new(),
            history: History::default(),
            history_enabled: true,
            status_message: String::from("Welcome to calcpad!"),
        }
    }

    /// Build the app from a resolved config and a previously loaded tape.
    pub fn from_config(config: &ResolvedConfig, history: History) -> Self {
        let mut app = Self::new(config.mode);
        app.scientific = Keypad::new(KeypadKind::Scientific).with_angle_mode(config.angle_mode);
        app.history = history;
        app.history_enabled = config.history_enabled;
        app
    }

    /// The keypad behind the current mode (None in fraction mode).
    pub fn active_keypad(&self) -> Option<&Keypad> {
        match self.mode {
            Mode::Basic => Some(&self.basic),
            Mode::Scientific => Some(&self.scientific),
            Mode::Fraction => None,
        }
    }

    pub fn active_keypad_mut(&mut self) -> Option<&mut Keypad> {
        match self.mode {
            Mode::Basic => Some(&mut self.basic),
            Mode::Scientific => Some(&mut self.scientific),
            Mode::Fraction => None,
        }
    }

    pub fn angle_mode(&self) -> AngleMode {
        self.scientific.angle_mode()
    }
}
