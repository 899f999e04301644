//! # Fraction Panel Component
//!
//! Stacked rendering of the two mixed-fraction operands, the operator and
//! the result. The field being edited is highlighted.
//!
//! ```text
//!          1             1
//!      0 ──────  +   0 ──────  =  5/6 ≈ 0.833333
//!          2             3
//! ```

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::core::fraction::{FractionField, FractionPad, MixedFraction};
use crate::tui::component::Component;

const FIELD_WIDTH: usize = 6;

pub struct FractionPanel<'a> {
    pad: &'a FractionPad,
}

impl<'a> FractionPanel<'a> {
    pub fn new(pad: &'a FractionPad) -> Self {
        Self { pad }
    }

    fn field(&self, value: i64, field: FractionField) -> Span<'static> {
        let style = if self.pad.active == field {
            Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default()
        };
        Span::styled(format!("{:^FIELD_WIDTH$}", value), style)
    }

    fn blank(width: usize) -> Span<'static> {
        Span::raw(" ".repeat(width))
    }

    /// Three display lines for one operand: numerator, whole + bar, denominator.
    fn operand(&self, fraction: &MixedFraction, first: bool) -> [Vec<Span<'static>>; 3] {
        let (whole, numerator, denominator) = if first {
            (
                FractionField::Whole1,
                FractionField::Numerator1,
                FractionField::Denominator1,
            )
        } else {
            (
                FractionField::Whole2,
                FractionField::Numerator2,
                FractionField::Denominator2,
            )
        };
        [
            vec![
                Self::blank(FIELD_WIDTH + 1),
                self.field(fraction.numerator, numerator),
            ],
            vec![
                self.field(fraction.whole, whole),
                Span::raw(" "),
                Span::styled("─".repeat(FIELD_WIDTH), Style::default().fg(Color::Gray)),
            ],
            vec![
                Self::blank(FIELD_WIDTH + 1),
                self.field(fraction.denominator, denominator),
            ],
        ]
    }
}

impl Component for FractionPanel<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [top1, mid1, bottom1] = self.operand(&self.pad.first, true);
        let [top2, mid2, bottom2] = self.operand(&self.pad.second, false);

        let operator = Span::styled(
            format!("  {}  ", self.pad.operator.glyph()),
            Style::default().fg(Color::Yellow),
        );
        let result = if self.pad.has_calculated {
            format!("  =  {} ≈ {}", self.pad.result, self.pad.result.to_decimal())
        } else {
            String::from("  =")
        };

        let gap = Self::blank(5);
        let top = [top1, vec![gap.clone()], top2].concat();
        let middle = [
            mid1,
            vec![operator],
            mid2,
            vec![Span::styled(result, Style::default().add_modifier(Modifier::BOLD))],
        ]
        .concat();
        let bottom = [bottom1, vec![gap], bottom2].concat();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let paragraph = Paragraph::new(vec![Line::from(top), Line::from(middle), Line::from(bottom)])
            .block(block);
        frame.render_widget(paragraph, area);
    }
}
