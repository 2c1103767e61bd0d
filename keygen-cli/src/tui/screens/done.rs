use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::tui::app::App;
use crate::tui::theme::Theme;

pub fn render(frame: &mut Frame, theme: &Theme, app: &App, area: Rect) {
    let public_key = app
        .wizard
        .key()
        .map(|k| k.public_key().as_str())
        .unwrap_or("No key");

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(public_key, theme.primary_style().bold())),
        Line::from(""),
        Line::from(Span::styled("  c  Copy to clipboard", theme.text_primary_style())),
        Line::from(Span::styled("  s  Save to file", theme.text_primary_style())),
        Line::from(Span::styled("  w  View words", theme.text_primary_style())),
        Line::from(Span::styled("  n  Generate new key", theme.text_primary_style())),
        Line::from(Span::styled("  v  Verify other words", theme.text_primary_style())),
    ];

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}
