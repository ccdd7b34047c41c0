//! Morphological analysis of Russian words.
//!
//! The module is split along the same seam a full morphological dictionary
//! would use:
//!
//! - [`MorphAnalyzer`]: produces every grammatical reading ("parse") of a word
//! - [`MorphologicalClassifier`]: decides noun-ness and picks the lemma from
//!   those readings
//! - [`DictionaryAnalyzer`]: the built-in analyzer, backed by a YAML dictionary
//!   and declension [`paradigm`]s, with suffix prediction for unknown words
//!
//! An analyzer is expensive to build (the dictionary is indexed up front) and
//! immutable afterwards. Build one per process and share it by reference.

pub mod analyzer;
pub mod lexicon;
pub mod paradigm;

pub use analyzer::DictionaryAnalyzer;
pub use lexicon::Lexicon;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Grammatical category of a single parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartOfSpeech {
    Noun,
    Adjective,
    Verb,
    Infinitive,
    Preposition,
    Conjunction,
    Particle,
    Pronoun,
    Adverb,
    Numeral,
}

impl PartOfSpeech {
    /// Function words disqualify a token from being counted as a noun.
    pub fn is_function_word(self) -> bool {
        matches!(self, PartOfSpeech::Preposition | PartOfSpeech::Conjunction)
    }
}

/// One reading of a word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parse {
    pub pos: PartOfSpeech,
    /// Lowercase dictionary form for this reading.
    pub normal_form: String,
}

impl Parse {
    pub fn new(pos: PartOfSpeech, normal_form: impl Into<String>) -> Self {
        Self {
            pos,
            normal_form: normal_form.into(),
        }
    }
}

impl fmt::Display for Parse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:?}", self.normal_form, self.pos)
    }
}

/// Source of grammatical readings for a word.
///
/// Implementations must be pure: the same word always yields the same
/// parses in the same order. Parses are ordered most likely first.
pub trait MorphAnalyzer {
    /// All readings of a lowercase word. May be empty for unknown words.
    fn parse(&self, word: &str) -> Vec<Parse>;
}

impl<A: MorphAnalyzer + ?Sized> MorphAnalyzer for &A {
    fn parse(&self, word: &str) -> Vec<Parse> {
        (**self).parse(word)
    }
}

/// Noun classification and lemmatization on top of any [`MorphAnalyzer`].
#[derive(Debug)]
pub struct MorphologicalClassifier<A> {
    analyzer: A,
}

impl<A: MorphAnalyzer> MorphologicalClassifier<A> {
    pub fn new(analyzer: A) -> Self {
        Self { analyzer }
    }

    pub fn analyzer(&self) -> &A {
        &self.analyzer
    }

    /// A token is a noun when some reading is a noun and no reading is a
    /// preposition or conjunction. Homonyms of function words (`раз`,
    /// `путём`) are therefore rejected even though one reading is a noun.
    /// A token without readings is not a noun.
    pub fn is_noun(&self, token: &str) -> bool {
        let parses = self.analyzer.parse(token);
        !has_function_reading(&parses) && first_noun(&parses).is_some()
    }

    /// Normal form of the first noun reading, or the token itself when no
    /// reading is a noun.
    pub fn lemmatize(&self, token: &str) -> String {
        first_noun(&self.analyzer.parse(token))
            .map(|p| p.normal_form.clone())
            .unwrap_or_else(|| token.to_string())
    }

    /// [`is_noun`](Self::is_noun) and [`lemmatize`](Self::lemmatize) over a
    /// single analysis: the lemma when the token is a noun, `None` otherwise.
    pub fn noun_lemma(&self, token: &str) -> Option<String> {
        let parses = self.analyzer.parse(token);
        if has_function_reading(&parses) {
            return None;
        }
        first_noun(&parses).map(|p| p.normal_form.clone())
    }
}

fn has_function_reading(parses: &[Parse]) -> bool {
    parses.iter().any(|p| p.pos.is_function_word())
}

fn first_noun(parses: &[Parse]) -> Option<&Parse> {
    parses.iter().find(|p| p.pos == PartOfSpeech::Noun)
}
