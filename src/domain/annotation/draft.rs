use crate::domain::errors::{AnnotationError, AnnotationResult};

/// Maximum number of characters accepted for a single annotation request
pub const MAX_INPUT_CHARS: usize = 10_000;

/// Holds the text draft for an annotation widget and validates it
///
/// # Invariants
/// - The draft is stored exactly as typed; no validation happens on keystroke
/// - A text can be submitted only if it is non-blank after trimming and its
///   character count does not exceed `max_chars`
///
/// # Example
/// ```
/// use fanno_annotator::domain::annotation::InputCollector;
///
/// let mut collector = InputCollector::default();
/// collector.set_draft("   ");
/// assert!(!collector.can_submit(collector.draft()));
///
/// collector.set_draft("Hello world");
/// assert!(collector.can_submit(collector.draft()));
/// assert_eq!(collector.remaining(), 10_000 - 11);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputCollector {
    draft: String,
    max_chars: usize,
}

impl InputCollector {
    /// Creates a collector with a custom character cap
    pub fn with_max_chars(max_chars: usize) -> Self {
        Self {
            draft: String::new(),
            max_chars,
        }
    }

    /// Replaces the draft unconditionally
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Returns the current draft
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Returns the character cap
    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    /// Number of characters in the draft
    pub fn char_count(&self) -> usize {
        self.draft.chars().count()
    }

    /// Characters left before the draft reaches the cap
    pub fn remaining(&self) -> usize {
        self.max_chars.saturating_sub(self.char_count())
    }

    /// Checks a text against the submission rules
    ///
    /// # Returns
    /// * `Ok(())` - If the text may be sent
    /// * `Err(AnnotationError::EmptyInput)` - If the text is blank
    /// * `Err(AnnotationError::InputTooLong)` - If the text exceeds the cap
    pub fn validate(&self, text: &str) -> AnnotationResult<()> {
        if text.trim().is_empty() {
            return Err(AnnotationError::EmptyInput);
        }

        let len = text.chars().count();
        if len > self.max_chars {
            return Err(AnnotationError::InputTooLong {
                len,
                max: self.max_chars,
            });
        }

        Ok(())
    }

    /// Returns true if the text may be submitted
    pub fn can_submit(&self, text: &str) -> bool {
        self.validate(text).is_ok()
    }
}

impl Default for InputCollector {
    fn default() -> Self {
        Self::with_max_chars(MAX_INPUT_CHARS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_collector_has_empty_draft() {
        let collector = InputCollector::default();
        assert_eq!(collector.draft(), "");
        assert_eq!(collector.max_chars(), MAX_INPUT_CHARS);
        assert_eq!(collector.remaining(), MAX_INPUT_CHARS);
    }

    #[test]
    fn set_draft_replaces_without_validation() {
        let mut collector = InputCollector::default();
        collector.set_draft("first");
        collector.set_draft("   ");
        assert_eq!(collector.draft(), "   ");
    }

    #[test]
    fn blank_text_cannot_be_submitted() {
        let collector = InputCollector::default();
        assert!(!collector.can_submit(""));
        assert!(!collector.can_submit("   "));
        assert!(!collector.can_submit("\n\t "));
        assert!(matches!(
            collector.validate("  "),
            Err(AnnotationError::EmptyInput)
        ));
    }

    #[test]
    fn text_with_surrounding_whitespace_can_be_submitted() {
        let collector = InputCollector::default();
        assert!(collector.can_submit("  Hello world  "));
    }

    #[test]
    fn text_at_cap_is_accepted() {
        let collector = InputCollector::with_max_chars(5);
        assert!(collector.can_submit("abcde"));
    }

    #[test]
    fn text_over_cap_is_rejected() {
        let collector = InputCollector::with_max_chars(5);
        match collector.validate("abcdef") {
            Err(AnnotationError::InputTooLong { len, max }) => {
                assert_eq!(len, 6);
                assert_eq!(max, 5);
            }
            other => panic!("expected InputTooLong, got {:?}", other),
        }
    }

    #[test]
    fn cap_counts_characters_not_bytes() {
        let collector = InputCollector::with_max_chars(3);
        assert!(collector.can_submit("äöü"));
    }

    #[test]
    fn remaining_saturates_at_zero() {
        let mut collector = InputCollector::with_max_chars(2);
        collector.set_draft("abcd");
        assert_eq!(collector.char_count(), 4);
        assert_eq!(collector.remaining(), 0);
    }
}
