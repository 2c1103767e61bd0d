use ratatui::prelude::*;
use ratatui::widgets::*;
use tonkeygen::wizard::Step;

use crate::tui::app::App;
use crate::tui::theme::Theme;

pub fn render(frame: &mut Frame, theme: &Theme, app: &App, area: Rect) {
    let Some(key) = app.wizard.key() else {
        return;
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Public key: ", theme.text_dim_style()),
            Span::styled(key.public_key().as_str(), theme.text_primary_style().bold()),
        ]),
        Line::from(""),
    ];

    if app.step == Step::Words {
        for (i, chunk) in key.words().chunks(4).enumerate() {
            let numbered: Vec<String> = chunk
                .iter()
                .enumerate()
                .map(|(j, w)| format!("{:2}. {:<10}", i * 4 + j + 1, w))
                .collect();
            lines.push(Line::from(Span::styled(
                numbered.join("  "),
                Style::default().fg(theme.warning),
            )));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Press Enter when you have written them down",
            theme.text_dim_style(),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "Press Enter to view your 24 secret words",
            theme.text_dim_style(),
        )));
    }

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}
