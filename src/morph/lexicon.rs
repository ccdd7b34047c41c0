//! The YAML-backed Russian dictionary.
//!
//! # File Format
//!
//! ```yaml
//! closed_class:
//!   preposition: [в, на, с]
//!   conjunction: [и, а, но]
//! nouns:
//!   masc_hard: [голос, код]
//!   fem_a: [основа]
//! indeclinable: [видео]
//! irregular:
//!   дня: день
//!   статей: статья
//! ```
//!
//! Every section is optional, so a user dictionary can add a handful of
//! nouns without repeating the built-in data. All words are indexed with
//! `ё` folded to `е`; lemmas keep their original spelling.

use super::PartOfSpeech;
use super::paradigm::Declension;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, instrument};

const BUILTIN_LEXICON: &str = include_str!("../../data/ru_lexicon.yaml");

/// Failure to load a dictionary.
#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("failed to read dictionary {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed dictionary {origin}")]
    Yaml {
        origin: String,
        #[source]
        source: serde_yaml::Error,
    },
}

/// The on-disk shape of a dictionary file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LexiconFile {
    closed_class: HashMap<PartOfSpeech, Vec<String>>,
    nouns: HashMap<Declension, Vec<String>>,
    indeclinable: Vec<String>,
    irregular: HashMap<String, String>,
}

/// Fold `ё` into `е` for lookups. Russian print uses both spellings.
pub fn fold(word: &str) -> String {
    word.replace('ё', "е")
}

/// An indexed dictionary.
#[derive(Debug, Default, Clone)]
pub struct Lexicon {
    closed_class: HashMap<String, Vec<PartOfSpeech>>,
    nouns: HashMap<(Declension, String), String>,
    fixed_forms: HashMap<String, Vec<String>>,
}

impl Lexicon {
    /// The dictionary compiled into the binary.
    pub fn builtin() -> Result<Self, LexiconError> {
        Self::from_yaml_str(BUILTIN_LEXICON, "<builtin>")
    }

    /// Parse a dictionary from YAML text. `origin` names the source in errors.
    pub fn from_yaml_str(yaml: &str, origin: &str) -> Result<Self, LexiconError> {
        let file: LexiconFile = serde_yaml::from_str(yaml).map_err(|source| LexiconError::Yaml {
            origin: origin.to_string(),
            source,
        })?;
        let mut lexicon = Self::default();
        lexicon.absorb(file);
        debug!(origin, entries = lexicon.len(), "Indexed dictionary");
        Ok(lexicon)
    }

    /// Load a dictionary file from disk.
    #[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LexiconError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| LexiconError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let lexicon = Self::from_yaml_str(&yaml, &path.display().to_string())?;
        info!(entries = lexicon.len(), "Loaded user dictionary");
        Ok(lexicon)
    }

    /// Add every entry of `other` to this dictionary.
    pub fn merge(&mut self, other: Lexicon) {
        for (word, tags) in other.closed_class {
            let entry = self.closed_class.entry(word).or_default();
            for tag in tags {
                if !entry.contains(&tag) {
                    entry.push(tag);
                }
            }
        }
        self.nouns.extend(other.nouns);
        for (form, lemmas) in other.fixed_forms {
            let entry = self.fixed_forms.entry(form).or_default();
            for lemma in lemmas {
                if !entry.contains(&lemma) {
                    entry.push(lemma);
                }
            }
        }
    }

    fn absorb(&mut self, file: LexiconFile) {
        // A word listed under several tags gets them in declaration order.
        let mut closed: Vec<_> = file.closed_class.into_iter().collect();
        closed.sort_by_key(|(pos, _)| *pos);
        for (pos, words) in closed {
            for word in words {
                let entry = self.closed_class.entry(fold(&word.to_lowercase())).or_default();
                if !entry.contains(&pos) {
                    entry.push(pos);
                }
            }
        }

        for (declension, lemmas) in file.nouns {
            for lemma in lemmas {
                let lemma = lemma.to_lowercase();
                self.nouns.insert((declension, fold(&lemma)), lemma);
            }
        }

        let fixed = file
            .indeclinable
            .into_iter()
            .map(|word| (word.clone(), word))
            .chain(file.irregular);
        for (form, lemma) in fixed {
            let entry = self.fixed_forms.entry(fold(&form.to_lowercase())).or_default();
            let lemma = lemma.to_lowercase();
            if !entry.contains(&lemma) {
                entry.push(lemma);
            }
        }
    }

    /// Closed-class tags of a folded word form, in a stable order.
    pub fn closed_class(&self, folded: &str) -> &[PartOfSpeech] {
        self.closed_class
            .get(folded)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// The dictionary spelling of a candidate lemma, if it is a noun of `declension`.
    pub fn noun_lemma(&self, declension: Declension, folded_candidate: &str) -> Option<&str> {
        self.nouns
            .get(&(declension, folded_candidate.to_string()))
            .map(String::as_str)
    }

    /// Lemmas of forms that no paradigm produces: irregular and indeclinable nouns.
    pub fn fixed_form_lemmas(&self, folded: &str) -> &[String] {
        self.fixed_forms
            .get(folded)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Total number of indexed entries.
    pub fn len(&self) -> usize {
        self.closed_class.len() + self.nouns.len() + self.fixed_forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
