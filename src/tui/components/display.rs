//! # Display Component
//!
//! The calculator screen: the accumulated expression on top, the operand
//! (or result) below, both right-aligned like a hardware calculator.
//! Text wider than the screen keeps its rightmost part, since that is
//! where typing happens.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::tui::component::Component;

pub struct Display {
    pub expression: String,
    pub operand: String,
    pub errored: bool,
}

impl Display {
    pub fn new(expression: String, operand: String, errored: bool) -> Self {
        Self {
            expression,
            operand,
            errored,
        }
    }
}

impl Component for Display {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let width = block.inner(area).width as usize;

        let operand_style = if self.errored {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };

        let lines = vec![
            Line::styled(
                fit_right(&self.expression, width),
                Style::default().fg(Color::Gray),
            ),
            Line::styled(fit_right(&self.operand, width), operand_style),
        ];

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Right)
            .block(block);
        frame.render_widget(paragraph, area);
    }
}

/// Keep the rightmost part of `text` that fits in `width` columns,
/// marking the cut with `…`.
pub fn fit_right(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let budget = width - 1; // room for the ellipsis
    let mut used = 0;
    let mut start = text.len();
    for (idx, c) in text.char_indices().rev() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        start = idx;
    }
    format!("…{}", &text[start..])
}
