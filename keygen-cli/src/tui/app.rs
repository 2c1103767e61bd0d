use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tonkeygen::entropy::EntropyAccumulator;
use tonkeygen::wizard::{Dispatch, Outcome, Step, WizardController, WizardState};
use tonkeygen::{KeygenConfig, KeygenError};
use tracing::{debug, warn};

use crate::tui::event::AppEvent;
use crate::tui::widgets::{Popup, PopupType, Spinner, WordEntry};

/// Main application state
pub struct App {
    pub wizard: WizardController,
    pub step: Step,
    pub should_quit: bool,

    pub entropy: EntropyAccumulator,
    pub word_entry: WordEntry,

    pub popup: Option<Popup>,
    pub spinner: Spinner,
    pub status_message: Option<(String, bool)>, // (message, is_error)
}

impl App {
    pub fn new(wizard: WizardController, config: &KeygenConfig) -> Self {
        Self {
            wizard,
            step: Step::Intro,
            should_quit: false,
            entropy: EntropyAccumulator::with_window(config.entropy.clone()),
            word_entry: WordEntry::new(),
            popup: None,
            spinner: Spinner::new(),
            status_message: None,
        }
    }

    /// Returns false once the app should exit.
    pub fn handle_event(&mut self, event: AppEvent) -> bool {
        match event {
            AppEvent::Quit => {
                self.should_quit = true;
                false
            }
            AppEvent::Key(key) => {
                // Ctrl-C always quits
                if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                    self.should_quit = true;
                    return false;
                }
                if self.popup.is_some() {
                    self.handle_popup_key(key);
                } else if !self.spinner.spinning {
                    self.handle_key(key);
                }
                !self.should_quit
            }
            AppEvent::Tick => {
                self.spinner.tick();
                true
            }
            AppEvent::Wizard(completion) => {
                if let Some(outcome) = self.wizard.handle_completion(completion) {
                    self.apply_outcome(outcome);
                }
                true
            }
        }
    }

    fn apply_outcome(&mut self, outcome: Outcome) {
        debug!(?outcome, "Wizard outcome");
        match outcome {
            Outcome::Ready => {
                if self.wizard.state() == WizardState::Creating {
                    self.spinner.start("Generating key...");
                }
            }
            Outcome::DictionaryLoaded(_) => {
                self.word_entry.refresh(self.wizard.dictionary());
            }
            Outcome::KeyCreated => {
                self.spinner.stop();
                self.entropy.clear();
                self.step = Step::Created;
            }
            Outcome::CheckPassed => {
                self.spinner.stop();
                self.word_entry.clear();
                self.step = Step::Done;
                self.show_popup(Popup::new(
                    PopupType::Info,
                    "Well done",
                    "You wrote the words down correctly.",
                ));
            }
            Outcome::CheckFailed => {
                self.spinner.stop();
                self.show_popup(
                    Popup::new(
                        PopupType::CheckFailed,
                        "Incorrect words",
                        "The words you entered do not match your key.",
                    )
                    .with_buttons(&["Try again", "View words"]),
                );
            }
            Outcome::VerifyPassed => {
                self.spinner.stop();
                self.word_entry.clear();
                self.step = Step::Done;
                self.status_message = Some(("Key verified".to_string(), false));
            }
            Outcome::VerifyFailed => {
                self.spinner.stop();
                self.show_popup(
                    Popup::new(
                        PopupType::Error,
                        "Incorrect words",
                        "These words do not form a valid key.",
                    )
                    .with_buttons(&["Try again"]),
                );
            }
            Outcome::Error(text) => {
                self.spinner.stop();
                self.show_popup(Popup::new(PopupType::Error, "Error", &text));
            }
            Outcome::Fatal(text) => {
                self.spinner.stop();
                self.show_popup(
                    Popup::new(PopupType::Fatal, "Key library failed", &text)
                        .with_buttons(&["Quit"]),
                );
            }
        }
    }

    fn show_popup(&mut self, popup: Popup) {
        self.popup = Some(popup);
    }

    fn handle_popup_key(&mut self, key: KeyEvent) {
        let Some(popup) = self.popup.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Left | KeyCode::BackTab => {
                popup.prev_button();
                return;
            }
            KeyCode::Right | KeyCode::Tab => {
                popup.next_button();
                return;
            }
            _ => {}
        }

        let Some(popup) = self.popup.take() else {
            return;
        };
        match popup.popup_type {
            PopupType::ConfirmNewKey => {
                let accepted = match key.code {
                    KeyCode::Char('y') => true,
                    KeyCode::Enter => popup.selected_button == 0,
                    _ => false,
                };
                if accepted {
                    self.start_new_key();
                }
            }
            PopupType::CheckFailed => {
                if key.code == KeyCode::Enter && popup.selected_button == 1 {
                    self.word_entry.clear();
                    self.step = Step::Words;
                }
            }
            PopupType::Fatal => {
                self.should_quit = true;
            }
            PopupType::Error | PopupType::Info => {}
        }
    }

    fn confirm_new_key(&mut self) {
        if self.wizard.key().is_none() {
            self.start_new_key();
            return;
        }
        self.show_popup(
            Popup::new(
                PopupType::ConfirmNewKey,
                "Generate new key",
                "The current key will be forgotten. Make sure you wrote its words down.",
            )
            .with_buttons(&["Generate", "Cancel"]),
        );
    }

    fn start_new_key(&mut self) {
        self.wizard.request_new_key();
        self.entropy.clear();
        self.word_entry.clear();
        self.status_message = None;
        self.step = Step::RandomSeed;
    }

    fn go_back(&mut self) {
        match self.step.back() {
            // Leaving a created key means starting over
            Some(Step::RandomSeed) => self.confirm_new_key(),
            Some(step) => {
                if self.step == Step::Verify {
                    self.wizard.cancel_verification();
                }
                self.word_entry.clear();
                self.step = step;
            }
            None => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match self.step {
            Step::Intro => self.handle_intro_key(key),
            Step::RandomSeed => self.handle_random_seed_key(key),
            Step::Created => match key.code {
                KeyCode::Enter => self.step = Step::Words,
                KeyCode::Esc => self.go_back(),
                _ => {}
            },
            Step::Words => match key.code {
                KeyCode::Enter => {
                    self.word_entry.clear();
                    self.step = Step::Check;
                }
                KeyCode::Char('q') => self.should_quit = true,
                _ => {}
            },
            Step::Check | Step::Verify => self.handle_word_entry_key(key),
            Step::Done => self.handle_done_key(key),
        }
    }

    fn handle_intro_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Char('g') => self.confirm_new_key(),
            KeyCode::Char('v') => {
                self.word_entry.clear();
                self.word_entry.refresh(self.wizard.dictionary());
                self.step = Step::Verify;
            }
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_random_seed_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.go_back(),
            KeyCode::Enter => {
                let Some(seed) = self.entropy.seed() else {
                    self.status_message = Some(("Keep typing".to_string(), true));
                    return;
                };
                match self.wizard.submit_random_seed(seed) {
                    Dispatch::Sent => self.spinner.start("Generating key..."),
                    Dispatch::Deferred => self.spinner.start("Waiting for the key library..."),
                    Dispatch::Ignored | Dispatch::Resolved(_) => {}
                }
            }
            KeyCode::Char(c) => {
                self.entropy.append(c.encode_utf8(&mut [0u8; 4]));
            }
            _ => {}
        }
    }

    fn handle_word_entry_key(&mut self, key: KeyEvent) {
        let dict = self.wizard.dictionary();
        match key.code {
            KeyCode::Esc => self.go_back(),
            KeyCode::Char(c) => self.word_entry.input_char(c, dict),
            KeyCode::Backspace => self.word_entry.delete_char(dict),
            KeyCode::Up => self.word_entry.select_up(),
            KeyCode::Down => self.word_entry.select_down(),
            KeyCode::Tab => self.word_entry.choose(dict),
            KeyCode::BackTab | KeyCode::Left => self.word_entry.prev_field(dict),
            KeyCode::Right => self.word_entry.next_field(dict),
            KeyCode::Enter => {
                if self.word_entry.is_complete() {
                    self.submit_words();
                } else {
                    self.word_entry.choose(dict);
                }
            }
            _ => {}
        }
    }

    fn submit_words(&mut self) {
        let words = self.word_entry.words();
        let dispatch = if self.step == Step::Check {
            self.wizard.submit_check_words(words)
        } else {
            self.wizard.submit_verify_words(words)
        };
        match dispatch {
            Dispatch::Sent => self.spinner.start("Checking words..."),
            Dispatch::Resolved(outcome) => self.apply_outcome(outcome),
            Dispatch::Deferred | Dispatch::Ignored => {
                self.status_message = Some(("Busy, try again in a moment".to_string(), true));
            }
        }
    }

    fn handle_done_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('c') => {
                self.status_message = Some(match self.wizard.request_copy_public_key() {
                    Ok(()) => ("Public key copied to clipboard.".to_string(), false),
                    Err(e) => {
                        warn!(error = %e, "Clipboard copy failed");
                        (e.to_string(), true)
                    }
                });
            }
            KeyCode::Char('s') => match self.wizard.request_save_public_key(None) {
                Ok(path) => {
                    self.status_message =
                        Some((format!("Public key saved to {}", path.display()), false));
                }
                Err(KeygenError::NoDataDir) => {
                    self.show_popup(Popup::new(
                        PopupType::Error,
                        "Error",
                        "No data directory to save into.",
                    ));
                }
                Err(e) => {
                    warn!(error = %e, "Saving public key failed");
                    self.show_popup(Popup::new(
                        PopupType::Error,
                        "Error",
                        "Could not write this file :(",
                    ));
                }
            },
            KeyCode::Char('w') => self.step = Step::Words,
            KeyCode::Char('n') => self.confirm_new_key(),
            KeyCode::Char('v') => {
                self.word_entry.clear();
                self.step = Step::Verify;
            }
            KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
    }
}
