use ratatui::prelude::*;
use ratatui::widgets::*;
use tonkeygen::dictionary::{normalize, WordDictionary};
use tonkeygen::key::WORD_COUNT;
use zeroize::Zeroize;

use crate::tui::theme::Theme;

/// Suggestions shown under the active field
const MAX_VISIBLE_SUGGESTIONS: usize = 6;

pub struct WordField {
    pub value: String,
    pub valid: bool,
}

/// Twenty-four word inputs with prefix suggestions for the active one.
pub struct WordEntry {
    pub fields: Vec<WordField>,
    pub active_index: usize,
    pub suggestions: Vec<String>,
    pub selected_suggestion: usize,
}

impl WordEntry {
    pub fn new() -> Self {
        Self {
            fields: (0..WORD_COUNT)
                .map(|_| WordField {
                    value: String::new(),
                    valid: false,
                })
                .collect(),
            active_index: 0,
            suggestions: Vec::new(),
            selected_suggestion: 0,
        }
    }

    pub fn input_char(&mut self, c: char, dict: &WordDictionary) {
        if c.is_whitespace() {
            self.choose(dict);
            return;
        }
        self.fields[self.active_index].value.push(c);
        self.refresh(dict);
    }

    pub fn delete_char(&mut self, dict: &WordDictionary) {
        self.fields[self.active_index].value.pop();
        self.refresh(dict);
    }

    pub fn next_field(&mut self, dict: &WordDictionary) {
        self.active_index = (self.active_index + 1) % self.fields.len();
        self.refresh(dict);
    }

    pub fn prev_field(&mut self, dict: &WordDictionary) {
        self.active_index = if self.active_index == 0 {
            self.fields.len() - 1
        } else {
            self.active_index - 1
        };
        self.refresh(dict);
    }

    pub fn select_up(&mut self) {
        self.selected_suggestion = self.selected_suggestion.saturating_sub(1);
    }

    pub fn select_down(&mut self) {
        if self.selected_suggestion + 1 < self.suggestions.len() {
            self.selected_suggestion += 1;
        }
    }

    /// Put the selected suggestion in the active field and move on.
    /// Without suggestions the field is only advanced past.
    pub fn choose(&mut self, dict: &WordDictionary) {
        if let Some(word) = self.suggestions.get(self.selected_suggestion) {
            self.fields[self.active_index].value = word.clone();
        }
        self.revalidate(self.active_index, dict);
        if self.active_index + 1 < self.fields.len() {
            self.active_index += 1;
        }
        self.refresh(dict);
    }

    /// Recompute suggestions and validity, e.g. after the word list arrived.
    pub fn refresh(&mut self, dict: &WordDictionary) {
        for index in 0..self.fields.len() {
            self.revalidate(index, dict);
        }
        let value = &self.fields[self.active_index].value;
        self.suggestions = if value.is_empty() {
            Vec::new()
        } else {
            dict.words_by_prefix(value)
        };
        self.selected_suggestion = self
            .selected_suggestion
            .min(self.suggestions.len().saturating_sub(1));
    }

    fn revalidate(&mut self, index: usize, dict: &WordDictionary) {
        let field = &mut self.fields[index];
        field.valid = !field.value.is_empty() && dict.is_valid(&field.value);
    }

    /// Every field filled with a known word.
    pub fn is_complete(&self) -> bool {
        self.fields.iter().all(|f| f.valid)
    }

    pub fn filled(&self) -> usize {
        self.fields.iter().filter(|f| !f.value.is_empty()).count()
    }

    pub fn words(&self) -> Vec<String> {
        self.fields.iter().map(|f| normalize(&f.value)).collect()
    }

    pub fn clear(&mut self) {
        for field in &mut self.fields {
            field.value.zeroize();
            field.valid = false;
        }
        self.active_index = 0;
        self.suggestions.clear();
        self.selected_suggestion = 0;
    }

    pub fn render(&self, frame: &mut Frame, theme: &Theme, area: Rect, title: &str) {
        let block = Block::default()
            .title(Span::styled(format!(" {} ", title), theme.primary_style()))
            .borders(Borders::ALL)
            .border_style(theme.primary_style());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(8), Constraint::Min(1)])
            .split(inner);

        // Four columns of six words
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(25); 4])
            .split(layout[0]);

        for (col, column_area) in columns.iter().enumerate() {
            let lines: Vec<Line> = (0..6)
                .map(|row| {
                    let index = col * 6 + row;
                    let field = &self.fields[index];
                    let active = index == self.active_index;
                    let style = if active {
                        theme.primary_style().bold()
                    } else if field.value.is_empty() {
                        theme.text_dim_style()
                    } else if field.valid {
                        theme.text_primary_style()
                    } else {
                        Style::default().fg(theme.error)
                    };
                    let marker = if active { "▸" } else { " " };
                    let value = if field.value.is_empty() && !active {
                        "____"
                    } else {
                        field.value.as_str()
                    };
                    Line::from(Span::styled(
                        format!("{}{:2}. {}", marker, index + 1, value),
                        style,
                    ))
                })
                .collect();
            frame.render_widget(Paragraph::new(lines), *column_area);
        }

        let mut hint_lines = vec![Line::from("")];
        if self.suggestions.is_empty() {
            hint_lines.push(Line::from(Span::styled(
                "Type the first letters of the word",
                theme.text_dim_style(),
            )));
        } else {
            let start = self
                .selected_suggestion
                .saturating_sub(MAX_VISIBLE_SUGGESTIONS - 1);
            for (i, word) in self
                .suggestions
                .iter()
                .enumerate()
                .skip(start)
                .take(MAX_VISIBLE_SUGGESTIONS)
            {
                let style = if i == self.selected_suggestion {
                    Style::default().fg(theme.background).bg(theme.primary)
                } else {
                    theme.text_primary_style()
                };
                hint_lines.push(Line::from(Span::styled(format!("  {}  ", word), style)));
            }
        }
        frame.render_widget(Paragraph::new(hint_lines), layout[1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dict() -> WordDictionary {
        WordDictionary::new(["abandon", "ability", "able", "about", "above", "zoo"])
    }

    fn type_word(entry: &mut WordEntry, word: &str, dict: &WordDictionary) {
        for c in word.chars() {
            entry.input_char(c, dict);
        }
    }

    #[test]
    fn test_suggestions_follow_input() {
        let dict = dict();
        let mut entry = WordEntry::new();
        type_word(&mut entry, "ab", &dict);
        assert!(entry.suggestions.is_empty());
        type_word(&mut entry, "o", &dict);
        assert_eq!(entry.suggestions, vec!["about", "above"]);
    }

    #[test]
    fn test_selection_is_clamped() {
        let dict = dict();
        let mut entry = WordEntry::new();
        type_word(&mut entry, "abo", &dict);
        entry.select_up();
        assert_eq!(entry.selected_suggestion, 0);
        entry.select_down();
        entry.select_down();
        entry.select_down();
        assert_eq!(entry.selected_suggestion, 1);

        // Narrowing the list pulls the selection back inside it
        type_word(&mut entry, "v", &dict);
        assert_eq!(entry.suggestions, vec!["above"]);
        assert_eq!(entry.selected_suggestion, 0);
    }

    #[test]
    fn test_choose_fills_and_advances() {
        let dict = dict();
        let mut entry = WordEntry::new();
        type_word(&mut entry, "abo", &dict);
        entry.select_down();
        entry.choose(&dict);
        assert_eq!(entry.fields[0].value, "above");
        assert!(entry.fields[0].valid);
        assert_eq!(entry.active_index, 1);
        assert!(entry.suggestions.is_empty());
    }

    #[test]
    fn test_space_accepts_suggestion() {
        let dict = dict();
        let mut entry = WordEntry::new();
        type_word(&mut entry, "zoo ", &dict);
        assert_eq!(entry.fields[0].value, "zoo");
        assert_eq!(entry.active_index, 1);
    }

    #[test]
    fn test_field_navigation_wraps() {
        let dict = dict();
        let mut entry = WordEntry::new();
        entry.prev_field(&dict);
        assert_eq!(entry.active_index, WORD_COUNT - 1);
        entry.next_field(&dict);
        assert_eq!(entry.active_index, 0);
        entry.next_field(&dict);
        assert_eq!(entry.active_index, 1);
    }

    #[test]
    fn test_complete_requires_all_valid_words() {
        let dict = dict();
        let mut entry = WordEntry::new();
        for _ in 0..WORD_COUNT - 1 {
            type_word(&mut entry, "able ", &dict);
        }
        assert!(!entry.is_complete());
        type_word(&mut entry, "abl", &dict);
        assert!(!entry.is_complete());
        type_word(&mut entry, "e", &dict);
        assert!(entry.is_complete());
        assert_eq!(entry.words().len(), WORD_COUNT);

        entry.clear();
        assert_eq!(entry.filled(), 0);
        assert_eq!(entry.active_index, 0);
    }
}
