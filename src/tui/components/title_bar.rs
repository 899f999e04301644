//! # TitleBar Component
//!
//! Top status bar showing which calculator is active and the latest status.
//!
//! ## Responsibilities
//!
//! - Display the current calculator mode
//! - Display the angle unit while the scientific keypad is on screen
//! - Display status messages (e.g., "2+3 = 5", "division by zero")
//!
//! TitleBar is purely presentational: it receives all data as props and has
//! no internal state.
//!
//! ## Conditional Formatting
//!
//! 1. **Scientific**: `"calcpad | Scientific | DEG | 2+3 = 5"`
//! 2. **Status message**: `"calcpad | Basic | 2+3 = 5"`
//! 3. **Default**: `"calcpad | Basic"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// Top status bar component.
///
/// # Props
///
/// - `mode_label`: The active calculator (e.g., "Basic", "Fraction")
/// - `angle_label`: `Some("DEG" | "RAD")` on the scientific keypad
/// - `status_message`: Transient status (e.g., "Recalled 42")
pub struct TitleBar {
    pub mode_label: String,
    pub angle_label: Option<String>,
    pub status_message: String,
}

impl TitleBar {
    pub fn new(mode_label: String, angle_label: Option<String>, status_message: String) -> Self {
        Self {
            mode_label,
            angle_label,
            status_message,
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let separator = Span::styled(" | ", Style::default().fg(Color::DarkGray));
        let mut spans = vec![
            Span::styled("calcpad", Style::default().add_modifier(Modifier::BOLD)),
            separator.clone(),
            Span::styled(self.mode_label.clone(), Style::default().fg(Color::Cyan)),
        ];
        if let Some(angle) = &self.angle_label {
            spans.push(separator.clone());
            spans.push(Span::styled(angle.clone(), Style::default().fg(Color::Yellow)));
        }
        if !self.status_message.is_empty() {
            spans.push(separator);
            spans.push(Span::raw(self.status_message.clone()));
        }

        frame.render_widget(Line::from(spans), area);
    }
}
