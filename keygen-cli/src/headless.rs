//! Non-interactive commands. They drive the same wizard controller as the
//! terminal UI, pumping completions until the wanted outcome arrives.

use anyhow::{anyhow, bail, Context, Result};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::AsyncReadExt;
use tokio::sync::mpsc;
use tonkeygen::dictionary::WordDictionary;
use tonkeygen::entropy::EntropyAccumulator;
use tonkeygen::key::WORD_COUNT;
use tonkeygen::wizard::{Completion, Dispatch, Outcome, WizardController};
use tonkeygen::{KeyCollaborator, KeygenConfig, SharedCollaborator, TonCollaborator};
use tracing::info;
use zeroize::Zeroizing;

struct Session {
    wizard: WizardController,
    rx: mpsc::UnboundedReceiver<Completion>,
}

impl Session {
    fn new(config: &KeygenConfig) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let collaborator: SharedCollaborator = Arc::new(TonCollaborator::from_config(config));
        let wizard = WizardController::new(collaborator, config, tx);
        Self { wizard, rx }
    }

    fn start(config: &KeygenConfig) -> Self {
        let mut session = Self::new(config);
        session.wizard.start();
        session
    }

    /// Hand the words to the wizard; anything but a sent request is an error
    /// since no completion would ever arrive for it.
    fn submit_verify(&mut self, words: Vec<String>) -> Result<()> {
        match self.wizard.submit_verify_words(words) {
            Dispatch::Sent => Ok(()),
            dispatch => bail!("words were not submitted for verification ({:?})", dispatch),
        }
    }

    /// Apply completions until `done` picks an outcome. Errors end the wait.
    async fn wait_for<F>(&mut self, done: F) -> Result<Outcome>
    where
        F: Fn(&Outcome) -> bool,
    {
        loop {
            let completion = self
                .rx
                .recv()
                .await
                .ok_or_else(|| anyhow!("key library stopped responding"))?;
            match self.wizard.handle_completion(completion) {
                Some(Outcome::Fatal(text)) | Some(Outcome::Error(text)) => bail!(text),
                Some(outcome) if done(&outcome) => return Ok(outcome),
                _ => {}
            }
        }
    }
}

async fn read_stdin() -> Result<Zeroizing<String>> {
    let mut input = Zeroizing::new(String::new());
    tokio::io::stdin()
        .read_to_string(&mut *input)
        .await
        .context("failed to read stdin")?;
    Ok(input)
}

#[derive(Serialize)]
struct VerifyReport<'a> {
    valid: bool,
    public_key: Option<&'a str>,
}

pub async fn generate(config: &KeygenConfig, json: bool, save: Option<PathBuf>) -> Result<()> {
    let input = read_stdin().await?;
    let mut entropy = EntropyAccumulator::with_window(config.entropy.clone());
    entropy.append(&input);
    let seed = entropy.seed().ok_or_else(|| {
        anyhow!(
            "need at least {} characters of random input on stdin, got {}",
            config.entropy.min_length,
            entropy.len()
        )
    })?;

    let mut session = Session::start(config);
    if session.wizard.submit_random_seed(seed) == Dispatch::Ignored {
        bail!("random input was rejected");
    }
    session.wait_for(|o| *o == Outcome::KeyCreated).await?;

    let key = session.wizard.key().ok_or_else(|| anyhow!("no key was created"))?;
    if json {
        println!("{}", serde_json::to_string_pretty(key)?);
    } else {
        println!("Public key: {}", key.public_key());
        println!();
        for (i, chunk) in key.words().chunks(4).enumerate() {
            let numbered: Vec<String> = chunk
                .iter()
                .enumerate()
                .map(|(j, w)| format!("{:2}. {:<10}", i * 4 + j + 1, w))
                .collect();
            println!("{}", numbered.join(" "));
        }
    }

    if let Some(path) = save {
        let written = session.wizard.request_save_public_key(Some(&path))?;
        info!(path = %written.display(), "Public key saved");
    }
    session.wizard.finish().await;
    Ok(())
}

pub async fn verify(config: &KeygenConfig, json: bool) -> Result<()> {
    let input = read_stdin().await?;
    let words: Vec<String> = input.split_whitespace().map(str::to_string).collect();
    if words.len() != WORD_COUNT {
        bail!("expected {} words on stdin, got {}", WORD_COUNT, words.len());
    }

    let mut session = Session::start(config);
    session.wait_for(|o| *o == Outcome::Ready).await?;
    session.submit_verify(words)?;
    let outcome = session
        .wait_for(|o| matches!(o, Outcome::VerifyPassed | Outcome::VerifyFailed))
        .await?;

    let public_key = session.wizard.key().map(|k| k.public_key().as_str());
    let valid = outcome == Outcome::VerifyPassed;
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&VerifyReport { valid, public_key })?
        );
    } else if let Some(public_key) = public_key {
        println!("Public key: {}", public_key);
    } else {
        println!("Incorrect words");
    }
    session.wizard.finish().await;

    if !valid {
        std::process::exit(1);
    }
    Ok(())
}

pub async fn suggest(config: &KeygenConfig, prefix: &str) -> Result<()> {
    let words = TonCollaborator::from_config(config).valid_words().await?;
    let dictionary = WordDictionary::new(words).with_min_prefix(config.dictionary.min_prefix);
    let matches = dictionary.words_by_prefix(prefix);
    if matches.is_empty() && prefix.trim().chars().count() < config.dictionary.min_prefix {
        eprintln!(
            "Type at least {} letters to get suggestions",
            config.dictionary.min_prefix
        );
    }
    for word in matches {
        println!("{}", word);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_refused_before_library_is_ready() {
        let mut session = Session::new(&KeygenConfig::default());
        let err = session
            .submit_verify(vec!["abandon".to_string(); WORD_COUNT])
            .unwrap_err();
        assert!(err.to_string().contains("not submitted"));
        assert!(!session.wizard.is_verifying());
    }
}
