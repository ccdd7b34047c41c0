//! Extraction of distinct noun lemmas from a title.

use crate::morph::{MorphAnalyzer, MorphologicalClassifier};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use tracing::trace;

/// Everything that is not a lowercase Cyrillic letter or a space.
static NON_CYRILLIC: Lazy<Regex> =
    Lazy::new(|| Regex::new("[^а-яё ]").expect("constant pattern compiles"));

/// Split a title into lowercase Cyrillic tokens. Digits, Latin letters
/// and punctuation act as separators.
pub fn tokenize(title: &str) -> Vec<String> {
    NON_CYRILLIC
        .replace_all(&title.to_lowercase(), " ")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Pulls noun lemmas out of free text using a shared classifier.
#[derive(Debug)]
pub struct NounExtractor<'a, A> {
    classifier: &'a MorphologicalClassifier<A>,
}

impl<'a, A: MorphAnalyzer> NounExtractor<'a, A> {
    pub fn new(classifier: &'a MorphologicalClassifier<A>) -> Self {
        Self { classifier }
    }

    /// The distinct noun lemmas of `title`.
    pub fn extract(&self, title: &str) -> HashSet<String> {
        let nouns: HashSet<String> = tokenize(title)
            .into_iter()
            .filter_map(|token| self.classifier.noun_lemma(&token))
            .collect();
        trace!(%title, ?nouns, "Extracted nouns");
        nouns
    }
}
