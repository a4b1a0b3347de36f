//! Word frequencies for cloud rendering
//!
//! Tokenization and counting rules:
//! 1. words match `\w[\w']*` (Unicode word characters, inner apostrophes)
//! 2. a trailing `'s` is dropped
//! 3. purely numeric words are dropped unless requested
//! 4. words shorter than `min_word_length` are dropped
//! 5. stopwords are dropped (case-insensitive)
//! 6. counting is case-insensitive; a word is shown in its most common casing
//! 7. plurals fold into their singular when both occur (`cats` -> `cat`)

use crate::stopwords::StopwordSet;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

#[allow(clippy::expect_used)] // constant pattern
static WORD_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\w[\w']*").expect("word pattern is valid"));

/// Options for [`WordFrequencies::from_text`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrequencyOptions {
    /// Keep purely numeric words
    pub include_numbers: bool,
    /// Minimum word length in characters
    pub min_word_length: usize,
    /// Fold `xs` into `x` when both occur
    pub normalize_plurals: bool,
    /// Keep at most this many words
    pub max_words: usize,
}

impl Default for FrequencyOptions {
    #[inline]
    fn default() -> Self {
        Self {
            include_numbers: false,
            min_word_length: 0,
            normalize_plurals: true,
            max_words: 200,
        }
    }
}

/// Words with weights, heaviest first
///
/// Weights are relative to the most frequent word, which has weight `1.0`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WordFrequencies {
    entries: Vec<(String, f32)>,
}

/// Case variants of one lowercase word, in first-seen order
#[derive(Debug)]
struct CaseCounts {
    variants: Vec<(String, usize)>,
    merged: bool,
}

impl CaseCounts {
    fn add(&mut self, word: &str, count: usize) {
        match self.variants.iter_mut().find(|(w, _)| w == word) {
            Some((_, c)) => *c += count,
            None => self.variants.push((word.to_string(), count)),
        }
    }

    fn total(&self) -> usize {
        self.variants.iter().map(|(_, c)| c).sum()
    }

    /// Most common casing; the first seen wins a tie
    fn display(&self) -> &str {
        let mut best: Option<&(String, usize)> = None;
        for variant in &self.variants {
            if best.map_or(true, |(_, c)| variant.1 > *c) {
                best = Some(variant);
            }
        }
        best.map_or("", |(w, _)| w.as_str())
    }
}

impl WordFrequencies {
    /// Count the words of `text`
    #[must_use]
    pub fn from_text(text: &str, stopwords: &StopwordSet, options: &FrequencyOptions) -> Self {
        let words = WORD_PATTERN
            .find_iter(text)
            .map(|m| strip_possessive(m.as_str()))
            .filter(|w| !w.is_empty())
            .filter(|w| options.include_numbers || !is_numeric(w))
            .filter(|w| w.chars().count() >= options.min_word_length)
            .filter(|w| !stopwords.contains(w));

        let mut order: Vec<String> = Vec::new();
        let mut counts: HashMap<String, CaseCounts> = HashMap::new();
        for word in words {
            let lower = word.to_lowercase();
            let entry = counts.entry(lower.clone()).or_insert_with(|| {
                order.push(lower);
                CaseCounts {
                    variants: Vec::new(),
                    merged: false,
                }
            });
            entry.add(word, 1);
        }

        if options.normalize_plurals {
            fold_plurals(&order, &mut counts);
        }

        let totals: Vec<(String, usize)> = order
            .iter()
            .filter_map(|lower| counts.get(lower))
            .filter(|case_counts| !case_counts.merged)
            .map(|case_counts| (case_counts.display().to_string(), case_counts.total()))
            .collect();
        debug!("Counted {} distinct words", totals.len());

        Self::from_counts(totals, options.max_words)
    }

    /// Build from raw counts
    ///
    /// Sorting is stable, so equal counts keep their input order.
    #[must_use]
    pub fn from_counts(mut counts: Vec<(String, usize)>, max_words: usize) -> Self {
        counts.retain(|(_, c)| *c > 0);
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts.truncate(max_words);

        let Some(top) = counts.first().map(|(_, c)| *c) else {
            return Self::default();
        };
        #[allow(clippy::cast_precision_loss)] // word counts are far below 2^24
        let entries = counts
            .into_iter()
            .map(|(word, count)| (word, count as f32 / top as f32))
            .collect();
        Self { entries }
    }

    /// Words and weights, heaviest first
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, f32)> + '_ {
        self.entries.iter().map(|(w, f)| (w.as_str(), *f))
    }

    /// The entries as a slice
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[(String, f32)] {
        &self.entries
    }

    /// Number of distinct words
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no word survived
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Drop a trailing `'s` / `'S`
fn strip_possessive(word: &str) -> &str {
    let bytes = word.as_bytes();
    match bytes {
        [.., b'\'', b's' | b'S'] => &word[..word.len() - 2],
        _ => word,
    }
}

fn is_numeric(word: &str) -> bool {
    word.chars().all(char::is_numeric)
}

/// Move the counts of `xs` into `x` when both were seen
fn fold_plurals(order: &[String], counts: &mut HashMap<String, CaseCounts>) {
    for lower in order {
        if !lower.ends_with('s') || lower.ends_with("ss") {
            continue;
        }
        let singular = &lower[..lower.len() - 1];
        if !counts.get(singular).is_some_and(|c| !c.merged) {
            continue;
        }
        let Some(plural) = counts.get_mut(lower) else {
            continue;
        };
        plural.merged = true;
        let variants = std::mem::take(&mut plural.variants);

        if let Some(target) = counts.get_mut(singular) {
            for (word, count) in variants {
                target.add(drop_last_char(&word), count);
            }
        }
    }
}

fn drop_last_char(word: &str) -> &str {
    word.char_indices().last().map_or(word, |(idx, _)| &word[..idx])
}
