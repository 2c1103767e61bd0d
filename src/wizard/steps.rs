/// Screen the wizard is showing. Navigation only: which operations are legal
/// is decided by [`super::WizardState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Intro,
    RandomSeed,
    Created,
    Words,
    Check,
    Verify,
    Done,
}

impl Step {
    /// Where "back" leads, if anywhere.
    pub fn back(self) -> Option<Step> {
        match self {
            Step::RandomSeed => Some(Step::Intro),
            Step::Created => Some(Step::RandomSeed),
            Step::Check => Some(Step::Words),
            Step::Verify => Some(Step::Intro),
            Step::Intro | Step::Words | Step::Done => None,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Step::Intro => "TON Key Generator",
            Step::RandomSeed => "Random seed",
            Step::Created => "Key created",
            Step::Words => "Your 24 secret words",
            Step::Check => "Check your words",
            Step::Verify => "Verify an existing key",
            Step::Done => "Public key",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Step::Intro => {
                "Generate a new key pair, or check that a phrase you already \
                 have reproduces your public key."
            }
            Step::RandomSeed => "Type random characters. They are mixed into the key generator.",
            Step::Created => {
                "Your key is ready. Write down the 24 words on paper and keep \
                 them somewhere safe. Anyone with these words controls the key."
            }
            Step::Words => "Write these words down in order. You will be asked to enter them back.",
            Step::Check => "Enter the 24 words to make sure you wrote them down correctly.",
            Step::Verify => "Enter your 24 words to derive the public key they belong to.",
            Step::Done => "Share this public key. Copy it or save it to a file.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_back_transitions() {
        assert_eq!(Step::RandomSeed.back(), Some(Step::Intro));
        assert_eq!(Step::Created.back(), Some(Step::RandomSeed));
        assert_eq!(Step::Check.back(), Some(Step::Words));
        assert_eq!(Step::Verify.back(), Some(Step::Intro));
        assert_eq!(Step::Intro.back(), None);
        assert_eq!(Step::Done.back(), None);
    }
}
