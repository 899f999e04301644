//! # Core Application Logic
//!
//! This module contains calcpad's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No UI. Pure.           │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┴───────────────────┐
//!            ▼                                       ▼
//!     ┌────────────┐                          ┌────────────┐
//!     │    TUI     │                          │  --eval    │
//!     │  Adapter   │                          │  one-shot  │
//!     │ (ratatui)  │                          │   (main)   │
//!     └────────────┘                          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct: all application state in one place
//! - [`action`]: The `Action` enum: everything that can happen in the app
//! - [`keypad`]: The expression accumulator behind both keypads
//! - [`expr`]: Lexer, parser and evaluator for accumulated expressions
//! - [`fraction`]: Mixed-fraction calculator
//! - [`history`]: Result tape and its JSON persistence
//! - [`config`]: `~/.calcpad/config.toml` loading and resolution

pub mod action;
pub mod config;
pub mod expr;
pub mod fraction;
pub mod functions;
pub mod history;
pub mod key;
pub mod keypad;
pub mod number;
pub mod state;
