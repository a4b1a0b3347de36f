//! Stopword filtering
//!
//! The effective stopword set is the case-insensitive union of
//! [`DEFAULT_STOPWORDS`] and any caller-supplied words. Filtering works on
//! whitespace-delimited tokens and compares each token's lowercase form as
//! is: punctuation attached to a token is part of the token, so `"Go!"` is
//! not removed by the stopword `"go"`.

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Built-in English stopwords
pub const DEFAULT_STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "aren't", "as", "at", "be", "because", "been", "before", "being", "below", "between",
    "both", "but", "by", "can", "can't", "cannot", "com", "could", "couldn't", "did", "didn't",
    "do", "does", "doesn't", "doing", "don't", "down", "during", "each", "else", "ever", "few",
    "for", "from", "further", "get", "had", "hadn't", "has", "hasn't", "have", "haven't",
    "having", "he", "he'd", "he'll", "he's", "hence", "her", "here", "here's", "hers", "herself",
    "him", "himself", "his", "how", "how's", "however", "http", "i", "i'd", "i'll", "i'm",
    "i've", "if", "in", "into", "is", "isn't", "it", "it's", "its", "itself", "just", "k",
    "let's", "like", "me", "more", "most", "mustn't", "my", "myself", "no", "nor", "not", "of",
    "off", "on", "once", "only", "or", "other", "otherwise", "ought", "our", "ours",
    "ourselves", "out", "over", "own", "r", "same", "shall", "shan't", "she", "she'd", "she'll",
    "she's", "should", "shouldn't", "since", "so", "some", "such", "than", "that", "that's",
    "the", "their", "theirs", "them", "themselves", "then", "there", "there's", "therefore",
    "these", "they", "they'd", "they'll", "they're", "they've", "this", "those", "through", "to",
    "too", "under", "until", "up", "very", "was", "wasn't", "we", "we'd", "we'll", "we're",
    "we've", "were", "weren't", "what", "what's", "when", "when's", "where", "where's", "which",
    "while", "who", "who's", "whom", "why", "why's", "with", "won't", "would", "wouldn't", "www",
    "you", "you'd", "you'll", "you're", "you've", "your", "yours", "yourself", "yourselves",
];

static DEFAULT_SET: Lazy<HashSet<String>> =
    Lazy::new(|| DEFAULT_STOPWORDS.iter().map(|w| (*w).to_string()).collect());

/// A case-insensitive set of words to exclude
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopwordSet {
    /// Lowercased members
    words: HashSet<String>,
}

impl Default for StopwordSet {
    fn default() -> Self {
        Self::new()
    }
}

impl StopwordSet {
    /// The built-in default stopwords
    #[must_use]
    pub fn new() -> Self {
        Self {
            words: DEFAULT_SET.clone(),
        }
    }

    /// An empty set (filters nothing)
    #[must_use]
    pub fn empty() -> Self {
        Self {
            words: HashSet::new(),
        }
    }

    /// Add custom words, consuming and returning the set
    #[must_use]
    pub fn with_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extend(words);
        self
    }

    /// Add one word; returns false if it was already a member
    pub fn insert(&mut self, word: &str) -> bool {
        self.words.insert(word.to_lowercase())
    }

    /// Check membership, ignoring case
    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    /// Number of distinct stopwords
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check if the set filters nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Remove stopword tokens from `text`
    ///
    /// Tokens are whitespace-delimited and keep their original casing;
    /// survivors are joined with single spaces in their original order.
    #[must_use]
    pub fn filter(&self, text: &str) -> String {
        text.split_whitespace()
            .filter(|token| !self.contains(token))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl<S: AsRef<str>> Extend<S> for StopwordSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.words
            .extend(iter.into_iter().map(|w| w.as_ref().to_lowercase()));
    }
}

impl<S: AsRef<str>> FromIterator<S> for StopwordSet {
    /// Collects into a set that holds only the given words, without defaults
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::empty();
        set.extend(iter);
        set
    }
}

/// Remove the default stopwords and `custom_stopwords` from `text`
///
/// See [`StopwordSet::filter`] for the tokenization rules.
#[must_use]
pub fn filter_text<I, S>(text: &str, custom_stopwords: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    StopwordSet::new().with_words(custom_stopwords).filter(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NONE: [&str; 0] = [];

    #[test]
    fn test_default_article_removed() {
        assert_eq!(filter_text("the Quick Brown fox", NONE), "Quick Brown fox");
    }

    #[test]
    fn test_attached_punctuation_is_part_of_token() {
        assert_eq!(filter_text("Go Go Go!", ["go"]), "Go!");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(filter_text("", NONE), "");
        assert_eq!(filter_text("", ["anything"]), "");
        assert_eq!(filter_text("   \n\t ", NONE), "");
    }

    #[test]
    fn test_whitespace_runs_collapse() {
        assert_eq!(
            filter_text("  alpha\n\nbeta\t gamma  ", NONE),
            "alpha beta gamma"
        );
    }

    #[test]
    fn test_case_insensitive_membership_keeps_casing() {
        assert_eq!(filter_text("THE Cat AND The Hat", NONE), "Cat Hat");
        assert_eq!(filter_text("Rust rust RUST ferris", ["RuSt"]), "ferris");
    }

    #[test]
    fn test_custom_words_are_lowercased() {
        let set = StopwordSet::empty().with_words(["Alpha", "BETA"]);
        assert!(set.contains("alpha"));
        assert!(set.contains("Beta"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_defaults_are_lowercase_and_unique() {
        for word in DEFAULT_STOPWORDS {
            assert_eq!(word.to_lowercase(), *word);
        }
        assert_eq!(StopwordSet::new().len(), DEFAULT_STOPWORDS.len());
    }

    #[test]
    fn test_empty_set_filters_nothing_but_normalizes_spacing() {
        let set = StopwordSet::empty();
        assert!(set.is_empty());
        assert_eq!(set.filter("the  a an"), "the a an");
    }

    #[test]
    fn test_from_iter_has_no_defaults() {
        let set: StopwordSet = ["custom"].into_iter().collect();
        assert!(set.contains("CUSTOM"));
        assert!(!set.contains("the"));
    }

    #[test]
    fn test_insert_reports_duplicates() {
        let mut set = StopwordSet::empty();
        assert!(set.insert("Word"));
        assert!(!set.insert("WORD"));
    }
}
