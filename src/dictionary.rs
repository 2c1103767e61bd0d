//! Sorted mnemonic vocabulary with prefix lookup for suggestions and validation.

/// Input length before suggestions are offered.
pub const DEFAULT_MIN_PREFIX: usize = 3;

/// Lowercase and trim user input the same way for lookup and submission.
pub fn normalize(input: &str) -> String {
    input.trim().to_lowercase()
}

/// Immutable, lexicographically sorted set of valid words.
#[derive(Debug, Clone)]
pub struct WordDictionary {
    words: Vec<String>,
    min_prefix: usize,
}

impl WordDictionary {
    /// Build from any word source; words are normalized, sorted and deduplicated.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut words: Vec<String> = words
            .into_iter()
            .map(|w| normalize(w.as_ref()))
            .filter(|w| !w.is_empty())
            .collect();
        words.sort_unstable();
        words.dedup();
        Self {
            words,
            min_prefix: DEFAULT_MIN_PREFIX,
        }
    }

    /// Dictionary that has not been loaded yet.
    pub fn empty() -> Self {
        Self {
            words: Vec::new(),
            min_prefix: DEFAULT_MIN_PREFIX,
        }
    }

    pub fn with_min_prefix(mut self, min_prefix: usize) -> Self {
        self.min_prefix = min_prefix;
        self
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// All words starting with `input`, in sorted order.
    ///
    /// Inputs shorter than the minimum prefix get no suggestions. Before the
    /// dictionary is loaded the normalized input is echoed back, so that
    /// validation never fails just because the word list has not arrived.
    pub fn words_by_prefix(&self, input: &str) -> Vec<String> {
        let prefix = normalize(input);
        if prefix.is_empty() {
            return Vec::new();
        }
        if self.words.is_empty() {
            return vec![prefix];
        }
        if prefix.chars().count() < self.min_prefix {
            return Vec::new();
        }
        let start = self.words.partition_point(|w| w.as_str() < prefix.as_str());
        self.words[start..]
            .iter()
            .take_while(|w| w.starts_with(&prefix))
            .cloned()
            .collect()
    }

    /// Exact membership, independent of the suggestion threshold. Anything
    /// non-empty passes while the dictionary is not loaded.
    pub fn is_valid(&self, word: &str) -> bool {
        let word = normalize(word);
        if word.is_empty() {
            return false;
        }
        self.words.is_empty() || self.words.binary_search(&word).is_ok()
    }
}

impl Default for WordDictionary {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample() -> WordDictionary {
        WordDictionary::new([
            "absent", "abandon", "ability", "able", "about", "above", "act", "action", "zoo",
        ])
    }

    #[test]
    fn test_new_sorts_and_normalizes() {
        let dict = WordDictionary::new(["Zoo ", "act", "act", " ABLE", ""]);
        assert_eq!(dict.words(), ["able", "act", "zoo"]);
    }

    #[test]
    fn test_prefix_range() {
        let dict = sample();
        assert_eq!(dict.words_by_prefix("abo"), vec!["about", "above"]);
        assert_eq!(dict.words_by_prefix("  ABA "), vec!["abandon"]);
        assert_eq!(dict.words_by_prefix("act"), vec!["act", "action"]);
        assert!(dict.words_by_prefix("xyz").is_empty());
    }

    #[test]
    fn test_short_input_gets_no_suggestions() {
        let dict = sample();
        assert!(dict.words_by_prefix("ab").is_empty());
        assert!(dict.words_by_prefix("").is_empty());
    }

    #[test]
    fn test_unloaded_dictionary_echoes_input() {
        let dict = WordDictionary::empty();
        assert_eq!(dict.words_by_prefix("Hello"), vec!["hello"]);
        assert!(dict.is_valid("anything"));
        assert!(!dict.is_valid("   "));
    }

    #[test]
    fn test_is_valid_requires_exact_match() {
        let dict = sample();
        assert!(dict.is_valid("act"));
        assert!(dict.is_valid("ACTION"));
        assert!(!dict.is_valid("acti"));
        assert!(!dict.is_valid("ab"));
        assert!(!dict.is_valid("actions"));
    }

    #[test]
    fn test_custom_min_prefix() {
        let dict = sample().with_min_prefix(1);
        assert_eq!(dict.words_by_prefix("z"), vec!["zoo"]);
    }

    #[test]
    fn test_short_words_stay_valid_with_long_min_prefix() {
        let dict = WordDictionary::new(["act", "action", "zoo"]).with_min_prefix(4);
        assert!(dict.words_by_prefix("act").is_empty());
        assert!(dict.is_valid("act"));
        assert!(dict.is_valid("zoo"));
        assert!(dict.is_valid("action"));
        assert!(!dict.is_valid("acti"));
    }

    proptest! {
        #[test]
        fn prop_prefix_matches_brute_force(
            words in proptest::collection::vec("[a-e]{1,6}", 1..60),
            input in "[a-e]{0,5}",
        ) {
            let dict = WordDictionary::new(&words);
            let got = dict.words_by_prefix(&input);
            if input.len() < DEFAULT_MIN_PREFIX {
                prop_assert!(got.is_empty());
            } else {
                let mut expected: Vec<String> = words
                    .iter()
                    .filter(|w| w.starts_with(&input))
                    .cloned()
                    .collect();
                expected.sort();
                expected.dedup();
                prop_assert_eq!(got, expected);
            }
        }

        #[test]
        fn prop_is_valid_iff_member(
            words in proptest::collection::vec("[a-c]{1,5}", 1..40),
            candidate in "[a-c]{1,5}",
            min_prefix in 1usize..7,
        ) {
            let dict = WordDictionary::new(&words).with_min_prefix(min_prefix);
            prop_assert_eq!(dict.is_valid(&candidate), words.contains(&candidate));
        }
    }
}
