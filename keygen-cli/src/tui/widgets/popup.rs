pub enum PopupType {
    /// Needs a yes/no answer before anything happens
    ConfirmNewKey,
    /// Wrong words in the checking flow: try again or view words
    CheckFailed,
    Error,
    Info,
    /// Startup failure; any key quits
    Fatal,
}

pub struct Popup {
    pub popup_type: PopupType,
    pub title: String,
    pub content: String,
    pub buttons: Vec<String>,
    pub selected_button: usize,
}

impl Popup {
    pub fn new(popup_type: PopupType, title: &str, content: &str) -> Self {
        Self {
            popup_type,
            title: title.to_string(),
            content: content.to_string(),
            buttons: vec!["OK".to_string()],
            selected_button: 0,
        }
    }

    pub fn with_buttons(mut self, buttons: &[&str]) -> Self {
        self.buttons = buttons.iter().map(|b| b.to_string()).collect();
        self.selected_button = 0;
        self
    }

    pub fn next_button(&mut self) {
        if !self.buttons.is_empty() {
            self.selected_button = (self.selected_button + 1) % self.buttons.len();
        }
    }

    pub fn prev_button(&mut self) {
        if !self.buttons.is_empty() {
            self.selected_button = if self.selected_button == 0 {
                self.buttons.len() - 1
            } else {
                self.selected_button - 1
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_selection_wraps() {
        let mut popup =
            Popup::new(PopupType::CheckFailed, "Incorrect words", "").with_buttons(&["Try again", "View words"]);
        popup.prev_button();
        assert_eq!(popup.selected_button, 1);
        popup.next_button();
        assert_eq!(popup.selected_button, 0);
    }
}
