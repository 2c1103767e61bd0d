use ratatui::prelude::*;
use ratatui::widgets::*;
use tonkeygen::wizard::WizardState;

use crate::tui::app::App;
use crate::tui::theme::Theme;

pub fn render(frame: &mut Frame, theme: &Theme, app: &App, area: Rect) {
    let status = match (app.wizard.fatal_error(), app.wizard.state()) {
        (Some(_), _) => Span::styled("Key library unavailable", Style::default().fg(theme.error)),
        (None, WizardState::Starting) => Span::styled("Starting key library...", Style::default().fg(theme.info)),
        (None, _) => Span::styled("Ready", Style::default().fg(theme.success)),
    };

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled("  g  Generate a new key", theme.text_primary_style())),
        Line::from(Span::styled(
            "  v  Verify the words of an existing key",
            theme.text_primary_style(),
        )),
        Line::from(""),
        Line::from(vec![Span::styled("  Status: ", theme.text_dim_style()), status]),
    ];
    if let Some(key) = app.wizard.key() {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("  Current key: ", theme.text_dim_style()),
            Span::styled(key.public_key().as_str(), theme.text_primary_style()),
        ]));
    }

    frame.render_widget(Paragraph::new(lines), area);
}
