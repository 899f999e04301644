//! # TUI Components
//!
//! This module contains all UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! Components in this directory follow two patterns:
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Simple display components that receive all data as parameters:
//! - `TitleBar`: Top status bar showing mode, angle unit and status
//! - `Display`: Expression and operand lines
//! - `FractionPanel`: The two mixed-fraction operands and the result
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that keep persistent state in `TuiState` and emit events:
//! - `KeypadState` / `KeypadView`: Button grid with a highlighted button
//! - `HistoryOverlayState` / `HistoryOverlay`: Result tape browser
//!
//! ### Props-Based Data Flow
//!
//! Components receive external data as "props", not by directly accessing
//! global state. This makes dependencies explicit and components testable.
//!
//! ```rust,ignore
//! // Good: Dependencies are explicit
//! Display::new(keypad.expression(), keypad.operand().to_string(), keypad.is_errored())
//!
//! // Bad: Hidden dependency on global state
//! Display::from_app(&app)
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs              (this file)
//! ├── title_bar.rs        (Top status bar)
//! ├── display.rs          (Expression + operand screen)
//! ├── fraction_panel.rs   (Mixed-fraction operands)
//! ├── keypad.rs           (Button grid, hit testing)
//! └── history_overlay.rs  (Result tape overlay)
//! ```

mod display;
mod fraction_panel;
pub mod history_overlay;
pub mod keypad;
mod title_bar;

pub use display::Display;
pub use fraction_panel::FractionPanel;
pub use history_overlay::{HistoryEvent, HistoryOverlay, HistoryOverlayState};
pub use keypad::{KeypadEvent, KeypadState, KeypadView};
pub use title_bar::TitleBar;
