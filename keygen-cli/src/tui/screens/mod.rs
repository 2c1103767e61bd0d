use ratatui::prelude::*;
use ratatui::widgets::*;
use tonkeygen::wizard::Step;

use crate::tui::app::App;
use crate::tui::theme::Theme;

mod done;
mod intro;
mod random_seed;
mod words;

pub fn render(frame: &mut Frame, theme: &Theme, app: &App, area: Rect) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(1)])
        .split(area);

    let heading = Paragraph::new(vec![
        Line::from(Span::styled(app.step.title(), theme.primary_style().bold())),
        Line::from(Span::styled(app.step.description(), theme.text_dim_style())),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(Block::default().borders(Borders::BOTTOM).border_style(theme.primary_style()));
    frame.render_widget(heading, layout[0]);

    match app.step {
        Step::Intro => intro::render(frame, theme, app, layout[1]),
        Step::RandomSeed => random_seed::render(frame, theme, app, layout[1]),
        Step::Created | Step::Words => words::render(frame, theme, app, layout[1]),
        Step::Check => app
            .word_entry
            .render(frame, theme, layout[1], "Enter your words"),
        Step::Verify => app
            .word_entry
            .render(frame, theme, layout[1], "Enter the words of your key"),
        Step::Done => done::render(frame, theme, app, layout[1]),
    }
}
