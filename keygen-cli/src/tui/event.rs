use crossterm::event::{self, Event as CrosstermEvent, KeyEvent};
use futures::{FutureExt, StreamExt};
use std::time::Duration;
use tokio::sync::mpsc;
use tonkeygen::wizard::Completion;

/// Application events
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Tick,
    Quit,
    /// Answer from the key library, for the wizard controller
    Wizard(Completion),
}

/// Event handler for the TUI
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<AppEvent>,
    tx: mpsc::UnboundedSender<AppEvent>,
}

impl EventHandler {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let tx_clone = tx.clone();

        // Terminal input and ticks
        tokio::spawn(async move {
            let mut reader = event::EventStream::new();
            let mut tick_interval = tokio::time::interval(Duration::from_millis(100));

            loop {
                let tick_delay = tick_interval.tick();
                let event_delay = reader.next().fuse();

                tokio::select! {
                    _ = tick_delay => {
                        if tx_clone.send(AppEvent::Tick).is_err() {
                            break;
                        }
                    }
                    maybe_event = event_delay => {
                        match maybe_event {
                            Some(Ok(CrosstermEvent::Key(key))) => {
                                if key.kind == event::KeyEventKind::Press
                                    && tx_clone.send(AppEvent::Key(key)).is_err()
                                {
                                    break;
                                }
                            }
                            Some(Err(_)) => {
                                if tx_clone.send(AppEvent::Quit).is_err() {
                                    break;
                                }
                            }
                            _ => {}
                        }
                    }
                }
            }
        });

        Self { rx, tx }
    }

    /// Forward wizard completions into the event loop
    pub fn forward_completions(&self, mut completions: mpsc::UnboundedReceiver<Completion>) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            while let Some(completion) = completions.recv().await {
                if tx.send(AppEvent::Wizard(completion)).is_err() {
                    break;
                }
            }
        });
    }

    /// Get the next event
    pub async fn next(&mut self) -> Option<AppEvent> {
        self.rx.recv().await
    }
}
