use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};
use zeroize::{Zeroize, Zeroizing};

use super::{Completion, Dispatch, Outcome, WizardState, BYPASS_PHRASE};
use crate::collaborator::SharedCollaborator;
use crate::config::{EntropyConfig, KeygenConfig};
use crate::dictionary::{normalize, WordDictionary};
use crate::error::{CollaboratorError, KeygenError, KeygenResult};
use crate::export;
use crate::key::{Key, WORD_COUNT};

/// A verify-existing-key request. Present only while pending; the id ties
/// the collaborator's answer to the submission that caused it.
pub struct VerificationAttempt {
    id: u64,
    words: Vec<String>,
}

impl VerificationAttempt {
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl Drop for VerificationAttempt {
    fn drop(&mut self) {
        for word in &mut self.words {
            word.zeroize();
        }
    }
}

/// Owns the wizard state and the current key. Collaborator calls run as
/// spawned tasks that report back through the completion channel; the owner
/// of the receiving end feeds them to [`WizardController::handle_completion`].
pub struct WizardController {
    collaborator: SharedCollaborator,
    tx: mpsc::UnboundedSender<Completion>,
    entropy: EntropyConfig,
    allow_bypass: bool,
    min_prefix: usize,
    data_dir: Option<PathBuf>,

    state: WizardState,
    fatal: Option<String>,
    key: Option<Key>,
    random_seed: Option<Zeroizing<Vec<u8>>>,
    dictionary: WordDictionary,
    /// Bumped whenever in-flight create/check results stop being relevant
    epoch: u64,
    next_attempt: u64,
    verification: Option<VerificationAttempt>,
}

impl WizardController {
    pub fn new(
        collaborator: SharedCollaborator,
        config: &KeygenConfig,
        tx: mpsc::UnboundedSender<Completion>,
    ) -> Self {
        Self {
            collaborator,
            tx,
            entropy: config.entropy.clone(),
            allow_bypass: config.wizard.allow_bypass_phrase,
            min_prefix: config.dictionary.min_prefix,
            data_dir: config.storage.resolve_data_dir(),
            state: WizardState::Starting,
            fatal: None,
            key: None,
            random_seed: None,
            dictionary: WordDictionary::empty().with_min_prefix(config.dictionary.min_prefix),
            epoch: 0,
            next_attempt: 0,
            verification: None,
        }
    }

    pub fn state(&self) -> WizardState {
        self.state
    }

    pub fn key(&self) -> Option<&Key> {
        self.key.as_ref()
    }

    pub fn dictionary(&self) -> &WordDictionary {
        &self.dictionary
    }

    pub fn entropy_window(&self) -> &EntropyConfig {
        &self.entropy
    }

    /// Startup failure text, once the session is unusable.
    pub fn fatal_error(&self) -> Option<&str> {
        self.fatal.as_deref()
    }

    pub fn is_verifying(&self) -> bool {
        self.verification.is_some()
    }

    pub fn data_dir(&self) -> Option<&Path> {
        self.data_dir.as_deref()
    }

    /// A create, check or verify request is in flight.
    pub fn is_busy(&self) -> bool {
        self.verification.is_some()
            || matches!(self.state, WizardState::Creating | WizardState::Checking)
    }

    fn spawn<F>(&self, request: F)
    where
        F: Future<Output = Completion> + Send + 'static,
    {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            // Receiver gone means the wizard is shutting down
            let _ = tx.send(request.await);
        });
    }

    /// Start the library and load the word list. Both answers arrive as
    /// completions, in either order.
    pub fn start(&mut self) {
        info!("Starting key library");
        let collaborator = Arc::clone(&self.collaborator);
        self.spawn(async move { Completion::Started(collaborator.start().await) });

        let collaborator = Arc::clone(&self.collaborator);
        self.spawn(async move { Completion::WordsLoaded(collaborator.valid_words().await) });
    }

    /// Offer collected entropy for key generation.
    ///
    /// # Panics
    /// Empty entropy is a caller bug.
    pub fn submit_random_seed(&mut self, seed: Vec<u8>) -> Dispatch {
        assert!(!seed.is_empty(), "random seed must not be empty");
        let seed = Zeroizing::new(seed);
        if self.fatal.is_some() {
            return Dispatch::Ignored;
        }
        if self.verification.is_some() {
            debug!("Verification pending, ignoring random seed");
            return Dispatch::Ignored;
        }

        let length = String::from_utf8_lossy(&seed).chars().count();
        if length < self.entropy.min_length {
            debug!(
                length,
                min = self.entropy.min_length,
                "Random seed below minimum, not generating"
            );
            return Dispatch::Ignored;
        }

        match self.state {
            WizardState::Starting => {
                debug!("Library not started yet, holding random seed");
                self.random_seed = Some(seed);
                Dispatch::Deferred
            }
            WizardState::WaitingRandom => {
                self.random_seed = Some(seed);
                self.create_from_seed();
                Dispatch::Sent
            }
            state => {
                debug!(?state, "Ignoring random seed");
                Dispatch::Ignored
            }
        }
    }

    fn create_from_seed(&mut self) {
        let Some(seed) = self.random_seed.take() else {
            return;
        };
        self.state = WizardState::Creating;
        self.epoch += 1;
        let epoch = self.epoch;
        info!(epoch, entropy_len = seed.len(), "Creating key");

        let collaborator = Arc::clone(&self.collaborator);
        let entropy = seed.to_vec();
        self.spawn(async move {
            let result = collaborator.create_key(entropy).await;
            Completion::KeyCreated { epoch, result }
        });
    }

    /// Confirm the user transcribed the current key.
    ///
    /// # Panics
    /// Without a current key, or with anything but 24 words.
    pub fn submit_check_words(&mut self, words: Vec<String>) -> Dispatch {
        assert!(self.key.is_some(), "checking words requires an existing key");
        assert_eq!(words.len(), WORD_COUNT, "checking requires {} words", WORD_COUNT);

        if self.is_busy() {
            debug!(state = ?self.state, "Request already pending, ignoring check");
            return Dispatch::Ignored;
        }
        if self.fatal.is_some() {
            return Dispatch::Ignored;
        }

        if self.allow_bypass && words[0] == BYPASS_PHRASE {
            warn!("Transcription check bypassed by operator phrase");
            return Dispatch::Resolved(Outcome::CheckPassed);
        }

        self.state = WizardState::Checking;
        self.epoch += 1;
        let epoch = self.epoch;
        debug!(epoch, "Checking words");

        let collaborator = Arc::clone(&self.collaborator);
        let words: Vec<String> = words.iter().map(|w| normalize(w)).collect();
        self.spawn(async move {
            let result = collaborator.check_key(words).await;
            Completion::KeyChecked { epoch, result }
        });
        Dispatch::Sent
    }

    /// Derive the key a phrase the user already has belongs to. On success
    /// that key replaces the current one.
    ///
    /// # Panics
    /// With anything but 24 words.
    pub fn submit_verify_words(&mut self, words: Vec<String>) -> Dispatch {
        assert_eq!(words.len(), WORD_COUNT, "verifying requires {} words", WORD_COUNT);

        if self.fatal.is_some() || self.is_busy() {
            return Dispatch::Ignored;
        }
        match self.state {
            WizardState::WaitingRandom | WizardState::Created => {}
            state => {
                debug!(?state, "Ignoring verification");
                return Dispatch::Ignored;
            }
        }

        self.next_attempt += 1;
        let id = self.next_attempt;
        let words: Vec<String> = words.iter().map(|w| normalize(w)).collect();
        self.verification = Some(VerificationAttempt {
            id,
            words: words.clone(),
        });
        debug!(attempt = id, "Verifying words");

        let collaborator = Arc::clone(&self.collaborator);
        self.spawn(async move {
            let result = collaborator.check_key(words).await;
            Completion::KeyVerified { attempt: id, result }
        });
        Dispatch::Sent
    }

    /// Forget the pending verification; its answer will be dropped.
    pub fn cancel_verification(&mut self) {
        if let Some(attempt) = self.verification.take() {
            debug!(attempt = attempt.id, "Verification cancelled");
        }
    }

    /// Drop the current key and go back to collecting entropy.
    pub fn request_new_key(&mut self) {
        info!("New key requested");
        self.key = None;
        self.random_seed = None;
        self.cancel_verification();
        self.epoch += 1;
        if self.state != WizardState::Starting {
            self.state = WizardState::WaitingRandom;
        }
    }

    pub fn request_copy_public_key(&self) -> KeygenResult<()> {
        let key = self.key.as_ref().ok_or(KeygenError::NoKey)?;
        export::copy_to_clipboard(key.public_key())
    }

    /// Save to `path`, or to the default file in the data directory.
    /// Returns where the key was written.
    pub fn request_save_public_key(&self, path: Option<&Path>) -> KeygenResult<PathBuf> {
        let key = self.key.as_ref().ok_or(KeygenError::NoKey)?;
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => export::default_path(self.data_dir.as_deref().ok_or(KeygenError::NoDataDir)?),
        };
        export::save_to_file(key.public_key(), &path)?;
        Ok(path)
    }

    /// Apply a collaborator answer. Answers that no longer match the
    /// request they were issued for are dropped and yield `None`.
    pub fn handle_completion(&mut self, completion: Completion) -> Option<Outcome> {
        match completion {
            Completion::Started(Ok(())) => {
                if self.state != WizardState::Starting {
                    return None;
                }
                info!("Key library ready");
                self.state = WizardState::WaitingRandom;
                if self.random_seed.is_some() {
                    self.create_from_seed();
                }
                Some(Outcome::Ready)
            }
            Completion::Started(Err(e)) => Some(self.fail(e, "Key library failed to start")),
            Completion::WordsLoaded(Ok(words)) => {
                self.dictionary = WordDictionary::new(words).with_min_prefix(self.min_prefix);
                info!(words = self.dictionary.len(), "Word list loaded");
                Some(Outcome::DictionaryLoaded(self.dictionary.len()))
            }
            Completion::WordsLoaded(Err(e)) => Some(self.fail(e, "Word list failed to load")),
            Completion::KeyCreated { epoch, result } => {
                if self.state != WizardState::Creating || epoch != self.epoch {
                    debug!(epoch, current = self.epoch, "Dropping stale key creation");
                    return None;
                }
                match result {
                    Ok(key) => {
                        info!(public_key = %key.public_key(), "Key created");
                        self.key = Some(key);
                        self.state = WizardState::Created;
                        Some(Outcome::KeyCreated)
                    }
                    Err(e) => {
                        warn!(error = %e, "Key creation failed");
                        self.state = WizardState::WaitingRandom;
                        Some(Outcome::Error(e.message))
                    }
                }
            }
            Completion::KeyChecked { epoch, result } => {
                if self.state != WizardState::Checking || epoch != self.epoch {
                    debug!(epoch, current = self.epoch, "Dropping stale check");
                    return None;
                }
                self.state = WizardState::Created;
                let expected = self.key.as_ref()?.public_key();
                match result {
                    Ok(public_key) if &public_key == expected => {
                        info!("Words check passed");
                        Some(Outcome::CheckPassed)
                    }
                    Ok(_) => {
                        info!("Words reproduce a different key");
                        Some(Outcome::CheckFailed)
                    }
                    Err(e) if e.is_bad_mnemonic() => {
                        info!(error = %e, "Words rejected");
                        Some(Outcome::CheckFailed)
                    }
                    Err(e) => {
                        warn!(error = %e, "Words check failed");
                        Some(Outcome::Error(e.message))
                    }
                }
            }
            Completion::KeyVerified { attempt, result } => {
                if self.verification.as_ref().map(VerificationAttempt::id) != Some(attempt) {
                    debug!(attempt, "Dropping stale verification");
                    return None;
                }
                let mut pending = self.verification.take()?;
                match result {
                    Ok(public_key) => match Key::new(public_key, std::mem::take(&mut pending.words)) {
                        Ok(key) => {
                            info!(public_key = %key.public_key(), "Existing key verified");
                            self.key = Some(key);
                            self.random_seed = None;
                            self.epoch += 1;
                            self.state = WizardState::Created;
                            Some(Outcome::VerifyPassed)
                        }
                        Err(e) => Some(Outcome::Error(e.to_string())),
                    },
                    Err(e) if e.is_bad_mnemonic() => {
                        info!(error = %e, "Verification rejected");
                        Some(Outcome::VerifyFailed)
                    }
                    Err(e) => {
                        warn!(error = %e, "Verification failed");
                        Some(Outcome::Error(e.message))
                    }
                }
            }
        }
    }

    fn fail(&mut self, e: CollaboratorError, context: &str) -> Outcome {
        error!(error = %e, "{}", context);
        let text = format!("{}: {}", context, e.message);
        self.fatal = Some(text.clone());
        Outcome::Fatal(text)
    }

    /// Tear the library down. Pending answers are simply never applied.
    pub async fn finish(&mut self) {
        self.cancel_verification();
        self.epoch += 1;
        self.collaborator.finish().await;
    }
}
