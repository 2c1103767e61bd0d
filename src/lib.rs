pub mod collaborator;
pub mod config;
pub mod dictionary;
pub mod entropy;
pub mod error;
pub mod export;
pub mod key;
pub mod wizard;

pub use collaborator::{KeyCollaborator, SharedCollaborator, TonCollaborator};
pub use config::KeygenConfig;
pub use error::{CollaboratorError, KeygenError, KeygenResult};
pub use key::{Key, PublicKey};
pub use wizard::{Completion, Dispatch, Outcome, WizardController, WizardState};
