use ratatui::prelude::*;
use ratatui::widgets::*;
use tonkeygen::wizard::Step;

use crate::tui::app::App;
use crate::tui::screens;
use crate::tui::theme::Theme;
use crate::tui::widgets::PopupType;

/// Render the current application state
pub fn render(frame: &mut Frame, app: &App) {
    let theme = Theme::default();

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    render_header(frame, &theme, app, main_layout[0]);
    screens::render(frame, &theme, app, main_layout[1]);
    render_footer(frame, &theme, app, main_layout[2]);

    if app.spinner.spinning {
        render_spinner(frame, &theme, app);
    }
    if app.popup.is_some() {
        render_popup(frame, &theme, app);
    }
}

fn render_header(frame: &mut Frame, theme: &Theme, app: &App, area: Rect) {
    let status = if let Some((ref msg, is_error)) = app.status_message {
        let style = if is_error {
            Style::default().fg(theme.error)
        } else {
            Style::default().fg(theme.success)
        };
        Span::styled(format!(" │ {}", msg), style)
    } else {
        Span::raw("")
    };

    let title_line = Line::from(vec![
        Span::styled("TON Key Generator", theme.primary_style().bold()),
        status,
    ]);

    let header = Paragraph::new(title_line)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.primary_style()),
        );

    frame.render_widget(header, area);
}

fn render_footer(frame: &mut Frame, theme: &Theme, app: &App, area: Rect) {
    let help_text = match app.step {
        Step::Intro => "g: Generate | v: Verify | q: Quit",
        Step::RandomSeed => "Type anything | Enter: Generate | Esc: Back",
        Step::Created => "Enter: View words | Esc: Start over",
        Step::Words => "Enter: Check words | q: Quit",
        Step::Check | Step::Verify => {
            "Tab/Space: Accept | ↑/↓: Suggestion | ←/→: Field | Enter: Submit | Esc: Back"
        }
        Step::Done => "c: Copy | s: Save | w: Words | n: New key | v: Verify | q: Quit",
    };

    let mut spans = vec![Span::styled(help_text, theme.text_dim_style())];
    if matches!(app.step, Step::Check | Step::Verify) {
        spans.push(Span::styled(
            format!(" │ {}/24", app.word_entry.filled()),
            theme.text_primary_style(),
        ));
    }

    let footer = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.primary_style()),
        );

    frame.render_widget(footer, area);
}

fn render_spinner(frame: &mut Frame, theme: &Theme, app: &App) {
    let popup_area = centered_rect(40, 3, frame.area());
    frame.render_widget(Clear, popup_area);

    let text = format!("{} {}", app.spinner.glyph(), app.spinner.message);
    let widget = Paragraph::new(text)
        .style(theme.text_primary_style())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.info)),
        );

    frame.render_widget(widget, popup_area);
}

fn render_popup(frame: &mut Frame, theme: &Theme, app: &App) {
    let Some(popup) = &app.popup else {
        return;
    };
    let popup_area = centered_rect(60, 40, frame.area());
    frame.render_widget(Clear, popup_area);

    let buttons: Vec<Span> = popup
        .buttons
        .iter()
        .enumerate()
        .flat_map(|(i, label)| {
            let style = if i == popup.selected_button {
                Style::default().fg(theme.background).bg(theme.primary).bold()
            } else {
                theme.text_primary_style()
            };
            [Span::styled(format!(" {} ", label), style), Span::raw("  ")]
        })
        .collect();

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(popup.content.as_str(), theme.text_primary_style())),
        Line::from(""),
        Line::from(buttons),
    ];

    let border_color = match popup.popup_type {
        PopupType::Error | PopupType::Fatal => theme.error,
        PopupType::CheckFailed | PopupType::ConfirmNewKey => theme.warning,
        PopupType::Info => theme.success,
    };

    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(Span::styled(popup.title.as_str(), Style::default().fg(border_color).bold()))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color)),
        );

    frame.render_widget(widget, popup_area);
}

/// Helper to create a centered rect of given percentage width/height
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
