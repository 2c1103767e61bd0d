//! Keyboard entropy accumulator for the "enter random characters" step.
//!
//! Characters are appended as the user types. Once a cap is active only the
//! most recent `cap` characters are retained, so the buffer always holds the
//! freshest input and never grows without bound.

use tokio::sync::watch;
use tracing::{debug, trace};
use zeroize::Zeroize;

use crate::config::EntropyConfig;

/// Growing buffer of typed characters with an optional trailing-window cap.
pub struct EntropyAccumulator {
    accumulated: String,
    /// Length in characters (not bytes)
    length: usize,
    limit: Option<usize>,
    /// When set, the cap switches on by itself once the minimum is reached
    window: Option<EntropyConfig>,
    length_tx: watch::Sender<usize>,
}

impl EntropyAccumulator {
    /// Accumulator with no cap until `set_limit` is called.
    pub fn new() -> Self {
        let (length_tx, _) = watch::channel(0);
        Self {
            accumulated: String::new(),
            length: 0,
            limit: None,
            window: None,
            length_tx,
        }
    }

    /// Accumulator that caps itself at `max_length` as soon as
    /// `min_length` characters have been collected.
    pub fn with_window(window: EntropyConfig) -> Self {
        let mut accumulator = Self::new();
        accumulator.window = Some(window);
        accumulator
    }

    /// Append a typed fragment. Control characters (Escape, Enter, ...) are
    /// not entropy and are dropped; a fragment with nothing else is ignored.
    /// Returns the new length.
    pub fn append(&mut self, fragment: &str) -> usize {
        let printable: String = fragment.chars().filter(|c| !c.is_control()).collect();
        if printable.is_empty() {
            return self.length;
        }

        self.length += printable.chars().count();
        self.accumulated.push_str(&printable);

        if let Some(window) = &self.window {
            if self.limit.is_none() && self.length >= window.min_length {
                debug!(
                    length = self.length,
                    cap = window.max_length,
                    "Entropy minimum reached, capping buffer"
                );
                self.limit = Some(window.max_length);
            }
        }

        self.truncate_to_limit();
        self.length_tx.send_replace(self.length);
        trace!(length = self.length, "Entropy appended");
        self.length
    }

    /// Activate truncation to the most recent `limit` characters.
    ///
    /// # Panics
    /// A zero limit is a caller bug.
    pub fn set_limit(&mut self, limit: usize) {
        assert!(limit > 0, "entropy limit must be positive");
        self.limit = Some(limit);
        self.truncate_to_limit();
        self.length_tx.send_replace(self.length);
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Current length in characters.
    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Observe the length as it changes (drives progress display and gating).
    pub fn subscribe(&self) -> watch::Receiver<usize> {
        self.length_tx.subscribe()
    }

    /// Current buffer contents.
    pub fn snapshot(&self) -> &str {
        &self.accumulated
    }

    /// Whether the configured minimum has been collected.
    pub fn is_ready(&self) -> bool {
        self.window
            .as_ref()
            .map_or(!self.is_empty(), |window| self.length >= window.min_length)
    }

    /// UTF-8 bytes to submit for key generation, once ready.
    pub fn seed(&self) -> Option<Vec<u8>> {
        self.is_ready().then(|| self.accumulated.as_bytes().to_vec())
    }

    /// Discard everything collected so far; the cap is switched off again.
    pub fn clear(&mut self) {
        self.accumulated.zeroize();
        self.length = 0;
        self.limit = None;
        self.length_tx.send_replace(0);
    }

    fn truncate_to_limit(&mut self) {
        let Some(limit) = self.limit else {
            return;
        };
        if self.length <= limit {
            return;
        }
        let skip = self.length - limit;
        let start = self
            .accumulated
            .char_indices()
            .nth(skip)
            .map_or(self.accumulated.len(), |(index, _)| index);
        let tail = self.accumulated[start..].to_string();
        let mut discarded = std::mem::replace(&mut self.accumulated, tail);
        discarded.zeroize();
        self.length = limit;
    }
}

impl Default for EntropyAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for EntropyAccumulator {
    fn drop(&mut self) {
        self.accumulated.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn window(min_length: usize, max_length: usize) -> EntropyConfig {
        EntropyConfig {
            min_length,
            max_length,
        }
    }

    #[test]
    fn test_append_without_limit_keeps_everything() {
        let mut acc = EntropyAccumulator::new();
        acc.append("abc");
        acc.append("def");
        assert_eq!(acc.snapshot(), "abcdef");
        assert_eq!(acc.len(), 6);
        assert_eq!(acc.limit(), None);
    }

    #[test]
    fn test_limit_keeps_most_recent() {
        let mut acc = EntropyAccumulator::new();
        acc.set_limit(5);
        acc.append("abcdefgh");
        assert_eq!(acc.snapshot(), "defgh");
        acc.append("xy");
        assert_eq!(acc.snapshot(), "fghxy");
        assert_eq!(acc.len(), 5);
    }

    #[test]
    fn test_set_limit_truncates_existing_content() {
        let mut acc = EntropyAccumulator::new();
        acc.append("0123456789");
        acc.set_limit(4);
        assert_eq!(acc.snapshot(), "6789");
    }

    #[test]
    fn test_control_keys_are_not_entropy() {
        let mut acc = EntropyAccumulator::new();
        acc.append("\u{1b}");
        acc.append("\r");
        acc.append("\n");
        acc.append("");
        assert!(acc.is_empty());
        acc.append("a\rb");
        assert_eq!(acc.snapshot(), "ab");
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let mut acc = EntropyAccumulator::new();
        acc.set_limit(3);
        acc.append("жёлтый");
        assert_eq!(acc.len(), 3);
        assert_eq!(acc.snapshot(), "тый");
    }

    #[test]
    #[should_panic(expected = "entropy limit must be positive")]
    fn test_zero_limit_fails_fast() {
        EntropyAccumulator::new().set_limit(0);
    }

    #[test]
    fn test_window_caps_after_minimum() {
        let mut acc = EntropyAccumulator::with_window(window(5, 8));
        acc.append("abcd");
        assert!(!acc.is_ready());
        assert_eq!(acc.limit(), None);
        assert!(acc.seed().is_none());

        acc.append("e");
        assert!(acc.is_ready());
        assert_eq!(acc.limit(), Some(8));

        acc.append("fghijk");
        assert_eq!(acc.snapshot(), "defghijk");
        assert_eq!(acc.seed(), Some(b"defghijk".to_vec()));
    }

    #[test]
    fn test_clear_resets_window() {
        let mut acc = EntropyAccumulator::with_window(window(2, 3));
        acc.append("abcd");
        assert_eq!(acc.limit(), Some(3));
        acc.clear();
        assert!(acc.is_empty());
        assert_eq!(acc.limit(), None);
        assert_eq!(acc.snapshot(), "");
    }

    #[tokio::test]
    async fn test_length_is_observable() {
        let mut acc = EntropyAccumulator::new();
        let mut rx = acc.subscribe();
        acc.append("hello");
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), 5);
    }

    proptest! {
        #[test]
        fn prop_cap_keeps_suffix(
            limit in 1usize..40,
            fragments in proptest::collection::vec("[a-z0-9 ]{0,12}", 0..30),
        ) {
            let mut acc = EntropyAccumulator::new();
            acc.set_limit(limit);
            let mut full = String::new();
            for fragment in &fragments {
                acc.append(fragment);
                full.push_str(fragment);
                prop_assert!(acc.len() <= limit);
                prop_assert_eq!(acc.snapshot().chars().count(), acc.len());
                prop_assert!(full.ends_with(acc.snapshot()));
                let expected = full.chars().count().min(limit);
                prop_assert_eq!(acc.len(), expected);
            }
        }
    }
}
