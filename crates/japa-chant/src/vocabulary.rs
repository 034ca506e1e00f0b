use regex::Regex;

/// Built-in list of target sound patterns.
///
/// The list intentionally contains "sounds-like" variants of the same name
/// (e.g. `ram`/`rama`, `hare`/`hari`) so that imperfect recognition output
/// still counts. Patterns are matched as substrings, not whole words, and
/// earlier entries take precedence when two patterns could match at the same
/// position.
pub const DEFAULT_PATTERNS: &[&str] = &[
    "krishna",
    "krsna",
    "ram",
    "rama",
    "hare",
    "hari",
    "govinda",
    "om",
    "shiva",
    "narayana",
];

/// Errors that can occur while building a [`Vocabulary`].
#[derive(Debug, thiserror::Error)]
pub enum VocabularyError {
    /// The pattern list was empty (or contained only blank entries).
    #[error("vocabulary must contain at least one non-empty pattern")]
    Empty,
    /// The combined pattern failed to compile. This should only happen for
    /// pathological inputs (e.g. patterns long enough to exceed the regex
    /// size limit), since individual patterns are escaped literally.
    #[error("failed to compile vocabulary matcher: {0}")]
    Matcher(#[from] regex::Error),
}

/// A fixed set of lowercase sound patterns compiled into a single matcher.
///
/// Matching is case-insensitive (input is lowercased first), substring-based,
/// and globally non-overlapping: once a pattern matches, the matched span is
/// consumed and the search continues after it. All patterns are combined into
/// one alternation, so at a given position the earliest-listed pattern wins.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    matcher: Regex,
}

impl Vocabulary {
    /// Builds a vocabulary from the given patterns. Patterns are trimmed and
    /// lowercased; blank entries are dropped. Returns an error if nothing
    /// usable remains.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, VocabularyError> {
        let normalized: Vec<String> = patterns
            .iter()
            .map(|pattern| pattern.as_ref().trim().to_lowercase())
            .filter(|pattern| !pattern.is_empty())
            .collect();
        if normalized.is_empty() {
            return Err(VocabularyError::Empty);
        }

        let alternation = normalized
            .iter()
            .map(|pattern| regex::escape(pattern))
            .collect::<Vec<_>>()
            .join("|");
        let matcher = Regex::new(&alternation)?;

        Ok(Self { matcher })
    }

    /// Builds the vocabulary from [`DEFAULT_PATTERNS`].
    pub fn defaults() -> Self {
        Self::new(DEFAULT_PATTERNS).expect("built-in patterns always compile")
    }

    /// Counts non-overlapping pattern occurrences in `text`.
    ///
    /// This is a pure function of its input: the same text always yields the
    /// same count regardless of what was matched before.
    pub fn count_matches(&self, text: &str) -> usize {
        self.matcher.find_iter(&text.to_lowercase()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_substring_matches_case_insensitively() {
        let vocabulary = Vocabulary::defaults();
        assert_eq!(vocabulary.count_matches("Hare Krishna Hare"), 3);
        assert_eq!(vocabulary.count_matches("HARE KRISHNA"), 2);
    }

    #[test]
    fn empty_text_counts_zero() {
        let vocabulary = Vocabulary::defaults();
        assert_eq!(vocabulary.count_matches(""), 0);
        assert_eq!(vocabulary.count_matches("   "), 0);
    }

    #[test]
    fn matches_inside_larger_words() {
        // Substring semantics: "rama" contains "ram", matched via the
        // earlier-listed "ram" pattern and consumed once.
        let vocabulary = Vocabulary::new(&["ram", "rama"]).unwrap();
        assert_eq!(vocabulary.count_matches("rama"), 1);
        assert_eq!(vocabulary.count_matches("ram ram"), 2);
    }

    #[test]
    fn earlier_pattern_takes_precedence() {
        // "hare" is listed before "hari" in the defaults; both start with
        // "har" but matching consumes only what the winning pattern covers.
        let vocabulary = Vocabulary::defaults();
        assert_eq!(vocabulary.count_matches("hare hari"), 2);
    }

    #[test]
    fn patterns_are_escaped_literally() {
        let vocabulary = Vocabulary::new(&["a.b"]).unwrap();
        assert_eq!(vocabulary.count_matches("a.b axb"), 1);
    }

    #[test]
    fn rejects_empty_pattern_list() {
        assert!(matches!(
            Vocabulary::new(&[] as &[&str]),
            Err(VocabularyError::Empty)
        ));
        assert!(matches!(
            Vocabulary::new(&["", "  "]),
            Err(VocabularyError::Empty)
        ));
    }
}
