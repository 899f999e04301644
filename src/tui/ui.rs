use crate::Mode;
use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::keypad::{self, layout_for};
use crate::tui::components::{Display, FractionPanel, HistoryOverlay, KeypadView, TitleBar};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;

/// Screen regions, shared by drawing and mouse hit testing.
pub struct ScreenAreas {
    pub title: Rect,
    pub display: Rect,
    pub keypad: Rect,
    pub help: Rect,
}

pub fn screen_areas(frame_area: Rect, mode: Mode) -> ScreenAreas {
    use Constraint::{Length, Min};

    // Borders + expression + operand; the fraction panel needs one more line
    let display_height = match mode {
        Mode::Fraction => 5,
        Mode::Basic | Mode::Scientific => 4,
    };
    let layout = Layout::vertical([Length(1), Length(display_height), Min(0), Length(1)]);
    let [title, display, keypad, help] = layout.areas(frame_area);
    ScreenAreas {
        title,
        display,
        keypad,
        help,
    }
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    let areas = screen_areas(frame.area(), app.mode);

    let angle_label = (app.mode == Mode::Scientific).then(|| app.angle_mode().label().to_string());
    TitleBar::new(
        app.mode.label().to_string(),
        angle_label,
        app.status_message.clone(),
    )
    .render(frame, areas.title);

    match app.active_keypad() {
        Some(keypad) => Display::new(
            keypad.expression(),
            keypad.operand().to_string(),
            keypad.is_errored(),
        )
        .render(frame, areas.display),
        None => FractionPanel::new(&app.fraction).render(frame, areas.display),
    }

    KeypadView::new(&tui.keypad, app.mode, app.angle_mode()).render(frame, areas.keypad);

    let help = match app.mode {
        Mode::Fraction => " ←/→ field  s ±  Enter =  Esc clear  Tab mode  ^H history  q quit ",
        Mode::Basic | Mode::Scientific => {
            " Enter =  ⌫ back  Esc clear  Space press  Tab mode  ^H history  q quit "
        }
    };
    frame.render_widget(
        Line::styled(help, Style::default().fg(Color::DarkGray)),
        areas.help,
    );

    if let Some(ref mut overlay) = tui.history_overlay {
        HistoryOverlay::new(overlay, app.history.entries()).render(frame, frame.area());
    }
}

/// Hit test: given a screen position, find which keypad button (row, col)
/// is under it.
pub fn hit_test_key(frame_area: Rect, mode: Mode, column: u16, row: u16) -> Option<(usize, usize)> {
    let areas = screen_areas(frame_area, mode);
    keypad::hit_test(areas.keypad, layout_for(mode), column, row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::key::Key;
    use crate::test_support::test_app;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_draw_ui_basic() {
        let backend = TestBackend::new(40, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut app = test_app();
        let mut tui = TuiState::new(app.mode);
        for key in [Key::Digit(4), Key::Digit(2)] {
            app.basic.press(key);
        }
        terminal.draw(|f| draw_ui(f, &app, &mut tui)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("calcpad | Basic"));
        assert!(text.contains("42"));
        assert!(text.contains("Tab mode"));
    }

    #[test]
    fn test_draw_ui_fraction_and_history_overlay() {
        let backend = TestBackend::new(80, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut app = test_app();
        app.mode = Mode::Fraction;
        let mut tui = TuiState::new(app.mode);
        tui.open_history(&app);
        terminal.draw(|f| draw_ui(f, &app, &mut tui)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("calcpad | Fraction"));
        assert!(text.contains("No calculations yet."));
    }

    #[test]
    fn test_hit_test_key_below_display() {
        let frame_area = Rect::new(0, 0, 40, 26);
        // Title (1) + display (4) puts the first keypad row at y = 5;
        // 20 rows of keypad over 5 button rows gives 4 rows per button
        assert_eq!(hit_test_key(frame_area, Mode::Basic, 1, 5), Some((0, 0)));
        assert_eq!(hit_test_key(frame_area, Mode::Basic, 39, 24), Some((4, 3)));
        assert_eq!(hit_test_key(frame_area, Mode::Basic, 1, 2), None);
        assert_eq!(hit_test_key(frame_area, Mode::Basic, 1, 25), None);
    }
}
