//! Key generation wizard: state machine and the UI-facing controller.

mod controller;
mod steps;

pub use controller::{VerificationAttempt, WizardController};
pub use steps::Step;

use crate::error::CollaboratorError;
use crate::key::{Key, PublicKey};

/// First checking-flow word that skips the transcription check.
/// Honoured only while `wizard.allow_bypass_phrase` is set.
pub const BYPASS_PHRASE: &str = "speakfriendandenter";

/// Which operations are currently legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardState {
    /// Key library not ready yet
    Starting,
    /// Collecting keyboard entropy
    WaitingRandom,
    /// Derivation in flight
    Creating,
    /// A key exists
    Created,
    /// Transcription check in flight
    Checking,
}

/// Result of an asynchronous collaborator call, delivered back to the event
/// loop that owns the controller. Tags identify the request it answers.
#[derive(Debug)]
pub enum Completion {
    Started(Result<(), CollaboratorError>),
    WordsLoaded(Result<Vec<String>, CollaboratorError>),
    KeyCreated {
        epoch: u64,
        result: Result<Key, CollaboratorError>,
    },
    KeyChecked {
        epoch: u64,
        result: Result<PublicKey, CollaboratorError>,
    },
    KeyVerified {
        attempt: u64,
        result: Result<PublicKey, CollaboratorError>,
    },
}

/// User-visible result of a completion or submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Library started, entropy is being accepted
    Ready,
    /// Word list arrived with this many words
    DictionaryLoaded(usize),
    /// A new key is available
    KeyCreated,
    /// The words reproduce the current key
    CheckPassed,
    /// Wrong words: user-correctable
    CheckFailed,
    /// Phrase accepted, its key is now the current key
    VerifyPassed,
    /// Phrase rejected: user-correctable
    VerifyFailed,
    /// Collaborator failure, raw detail text
    Error(String),
    /// Startup failure; nothing else will work
    Fatal(String),
}

/// What a submission did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// A collaborator request was issued
    Sent,
    /// Held until the library has started
    Deferred,
    /// Not legal in the current state; nothing happened
    Ignored,
    /// Answered without asking the collaborator
    Resolved(Outcome),
}
