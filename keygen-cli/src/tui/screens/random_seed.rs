use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::tui::app::App;
use crate::tui::theme::Theme;

pub fn render(frame: &mut Frame, theme: &Theme, app: &App, area: Rect) {
    let window = app.wizard.entropy_window();
    let length = app.entropy.len();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3), Constraint::Length(2)])
        .split(area);

    let ratio = (length as f64 / window.min_length as f64).min(1.0);
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).border_style(theme.primary_style()))
        .gauge_style(Style::default().fg(theme.primary))
        .ratio(ratio)
        .label(format!("{} / {}", length.min(window.min_length), window.min_length));
    frame.render_widget(gauge, layout[0]);

    // Only the tail is shown; the buffer itself is capped at max_length
    let typed = Paragraph::new(app.entropy.snapshot())
        .style(theme.text_dim_style())
        .wrap(Wrap { trim: false })
        .block(Block::default().title(" Random input ").borders(Borders::ALL));
    frame.render_widget(typed, layout[1]);

    let hint = if app.entropy.is_ready() {
        Span::styled("Press Enter to generate your key", Style::default().fg(theme.success))
    } else {
        Span::styled("Keep typing random characters", theme.text_dim_style())
    };
    frame.render_widget(Paragraph::new(Line::from(hint)).alignment(Alignment::Center), layout[2]);
}
