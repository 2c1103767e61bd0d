//! Scripted collaborator for wizard tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::KeyCollaborator;
use crate::error::CollaboratorError;
use crate::key::{Key, PublicKey};

type CreateFn = Box<dyn Fn(&[u8]) -> Result<Key, CollaboratorError> + Send + Sync>;
type CheckFn = Box<dyn Fn(&[String]) -> Result<PublicKey, CollaboratorError> + Send + Sync>;

pub(crate) const PK1: &str = "PK1";
pub(crate) const PK2: &str = "PK2";

/// The phrase behind `PK1`.
pub(crate) fn phrase() -> Vec<String> {
    (0..24).map(|i| format!("w{:02}", i)).collect()
}

/// The phrase behind `PK2`.
pub(crate) fn other_phrase() -> Vec<String> {
    (0..24).map(|i| format!("x{:02}", i)).collect()
}

pub(crate) struct MockCollaborator {
    pub starts: AtomicUsize,
    pub creates: AtomicUsize,
    pub checks: AtomicUsize,
    pub finishes: AtomicUsize,
    start_result: Result<(), CollaboratorError>,
    words_result: Result<Vec<String>, CollaboratorError>,
    create: CreateFn,
    check: CheckFn,
    /// check_key latency keyed by the first word of the phrase
    check_delays: HashMap<String, Duration>,
}

impl MockCollaborator {
    pub fn new() -> Self {
        Self {
            starts: AtomicUsize::new(0),
            creates: AtomicUsize::new(0),
            checks: AtomicUsize::new(0),
            finishes: AtomicUsize::new(0),
            start_result: Ok(()),
            words_result: Ok(phrase().into_iter().chain(other_phrase()).collect()),
            create: Box::new(|_| Key::new(PublicKey::new(PK1), phrase()).map_err(internal)),
            check: Box::new(|words| {
                if words == phrase().as_slice() {
                    Ok(PublicKey::new(PK1))
                } else if words == other_phrase().as_slice() {
                    Ok(PublicKey::new(PK2))
                } else {
                    Err(CollaboratorError::invalid_mnemonic("unknown phrase"))
                }
            }),
            check_delays: HashMap::new(),
        }
    }

    pub fn failing_start(mut self, err: CollaboratorError) -> Self {
        self.start_result = Err(err);
        self
    }

    pub fn failing_words(mut self, err: CollaboratorError) -> Self {
        self.words_result = Err(err);
        self
    }

    pub fn with_create<F>(mut self, f: F) -> Self
    where
        F: Fn(&[u8]) -> Result<Key, CollaboratorError> + Send + Sync + 'static,
    {
        self.create = Box::new(f);
        self
    }

    pub fn with_check<F>(mut self, f: F) -> Self
    where
        F: Fn(&[String]) -> Result<PublicKey, CollaboratorError> + Send + Sync + 'static,
    {
        self.check = Box::new(f);
        self
    }

    pub fn with_check_delay(mut self, first_word: &str, delay: Duration) -> Self {
        self.check_delays.insert(first_word.to_string(), delay);
        self
    }

    pub fn count(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

fn internal(e: crate::error::KeygenError) -> CollaboratorError {
    CollaboratorError::internal(e.to_string())
}

#[async_trait]
impl KeyCollaborator for MockCollaborator {
    async fn start(&self) -> Result<(), CollaboratorError> {
        self.starts.fetch_add(1, Ordering::SeqCst);
        self.start_result.clone()
    }

    async fn create_key(&self, entropy: Vec<u8>) -> Result<Key, CollaboratorError> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        (self.create)(&entropy)
    }

    async fn check_key(&self, words: Vec<String>) -> Result<PublicKey, CollaboratorError> {
        self.checks.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = words.first().and_then(|w| self.check_delays.get(w)) {
            tokio::time::sleep(*delay).await;
        }
        (self.check)(&words)
    }

    async fn valid_words(&self) -> Result<Vec<String>, CollaboratorError> {
        self.words_result.clone()
    }

    async fn finish(&self) {
        self.finishes.fetch_add(1, Ordering::SeqCst);
    }
}
