//! Dictionary analyzer with suffix prediction for unknown words.

use super::lexicon::{Lexicon, fold};
use super::paradigm::Declension;
use super::{MorphAnalyzer, Parse, PartOfSpeech};
use itertools::Itertools;
use tracing::trace;

/// A productive noun suffix: words built with it decline by `declension`.
struct NounSuffix {
    /// The derivational part that precedes the case ending (`н` in `-ние`).
    marker: &'static str,
    declension: Declension,
    /// Minimum stem length, in characters, in front of `marker`.
    min_stem: usize,
    /// Case endings too ambiguous with adjectives to trust for this suffix.
    skip_endings: &'static [&'static str],
}

const NOUN_SUFFIXES: &[NounSuffix] = &[
    NounSuffix { marker: "н", declension: Declension::NeutIe, min_stem: 3, skip_endings: &["ий"] },
    NounSuffix { marker: "т", declension: Declension::NeutIe, min_stem: 3, skip_endings: &["ий"] },
    NounSuffix { marker: "ост", declension: Declension::FemSoft, min_stem: 2, skip_endings: &[] },
    NounSuffix { marker: "ц", declension: Declension::FemIya, min_stem: 2, skip_endings: &["ий"] },
    NounSuffix { marker: "с", declension: Declension::FemIya, min_stem: 2, skip_endings: &["ий"] },
    NounSuffix { marker: "з", declension: Declension::FemIya, min_stem: 2, skip_endings: &["ий"] },
    NounSuffix { marker: "г", declension: Declension::FemIya, min_stem: 3, skip_endings: &["ий"] },
    NounSuffix { marker: "ф", declension: Declension::FemIya, min_stem: 3, skip_endings: &["ий"] },
    NounSuffix { marker: "р", declension: Declension::FemIya, min_stem: 3, skip_endings: &["ий"] },
    NounSuffix { marker: "ств", declension: Declension::NeutO, min_stem: 2, skip_endings: &[] },
    NounSuffix { marker: "тор", declension: Declension::MascHard, min_stem: 2, skip_endings: &[] },
    NounSuffix { marker: "изм", declension: Declension::MascHard, min_stem: 2, skip_endings: &[] },
    NounSuffix { marker: "ист", declension: Declension::MascHard, min_stem: 3, skip_endings: &[] },
    NounSuffix { marker: "тел", declension: Declension::MascSoft, min_stem: 3, skip_endings: &[] },
    NounSuffix {
        marker: "к",
        declension: Declension::FemA,
        min_stem: 3,
        skip_endings: &["", "ой", "ою", "ей"],
    },
];

/// Full adjective endings, longest first.
const ADJECTIVE_ENDINGS: &[&str] = &[
    "ыми", "ими", "ого", "его", "ому", "ему", "ых", "их", "ый", "ий", "ой", "ая", "яя", "ое",
    "ее", "ые", "ие", "ую", "юю", "ым", "им",
];

/// Adjective endings of the soft series (`синих`, `последнего`).
const SOFT_ADJECTIVE_ENDINGS: &[&str] = &[
    "ими", "его", "ему", "их", "ий", "яя", "ее", "ие", "юю", "им",
];

const INFINITIVE_ENDINGS: &[&str] = &["ться", "тись", "ть", "ти", "чь"];

const VERB_ENDINGS: &[&str] = &[
    "ется", "ются", "ится", "ятся", "ает", "яет", "ует", "ают", "яют", "уют", "ит", "ят", "ут",
    "ал", "ала", "ало", "али", "ил", "ила", "ило", "или", "ел", "ела", "ело", "ели",
    "лся", "лась", "лось", "лись", "шет", "жет", "чет", "щет",
];

/// Case endings of hard-stem masculine nouns, longest first.
const HARD_NOUN_ENDINGS: &[&str] = &["ами", "ов", "ах", "ам", "ом", "ы", "е", "а", "у"];

const VOWELS: &[char] = &['а', 'е', 'ё', 'и', 'о', 'у', 'ы', 'э', 'ю', 'я'];

/// Velars and sibilants: stems ending in these take `-ий` rather than `-ый`
/// (`русский`, `хороший`) and `-и` rather than `-ы` in the plural.
const VELAR_SIBILANT: &[char] = &['к', 'г', 'х', 'ж', 'ш', 'щ', 'ч'];

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn ends_in_hard_consonant(s: &str) -> bool {
    s.chars()
        .last()
        .is_some_and(|c| !VOWELS.contains(&c) && !matches!(c, 'ь' | 'ъ' | 'й'))
}

/// Read an unknown word as a hard-stem masculine noun (`микросервисов`,
/// `заводах`, `кот`). The stem must keep a vowel and at least three letters.
fn guess_hard_noun(word: &str) -> Option<String> {
    let plausible = |stem: &str| {
        char_len(stem) >= 3 && ends_in_hard_consonant(stem) && stem.contains(VOWELS)
    };

    if plausible(word) {
        return Some(word.to_string());
    }
    if let Some(stem) = word.strip_suffix('и') {
        if stem.ends_with(VELAR_SIBILANT) && plausible(stem) {
            return Some(stem.to_string());
        }
    }
    HARD_NOUN_ENDINGS
        .iter()
        .filter_map(|ending| word.strip_suffix(ending))
        .find(|stem| plausible(stem))
        .map(str::to_string)
}

/// The built-in analyzer.
///
/// Readings come from, in order:
/// 1. closed-class words (prepositions, conjunctions, pronouns, ...);
/// 2. dictionary nouns reachable through a declension paradigm;
/// 3. irregular and indeclinable noun forms.
///
/// Only when none of these match is the word treated as unknown, and its
/// readings are predicted from productive suffixes and inflectional endings.
/// A word that still has no reading but looks like a hard-stem noun is
/// read as a masculine noun.
#[derive(Debug, Clone)]
pub struct DictionaryAnalyzer {
    lexicon: Lexicon,
}

impl DictionaryAnalyzer {
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    fn dictionary_parses(&self, word: &str, folded: &str) -> Vec<Parse> {
        let mut parses: Vec<Parse> = self
            .lexicon
            .closed_class(folded)
            .iter()
            .map(|pos| Parse::new(*pos, word))
            .collect();

        let paradigm_lemmas = Declension::ALL.into_iter().flat_map(|declension| {
            declension
                .candidate_lemmas(folded)
                .filter_map(move |candidate| self.lexicon.noun_lemma(declension, &candidate))
        });
        let fixed_lemmas = self.lexicon.fixed_form_lemmas(folded).iter().map(String::as_str);

        for lemma in paradigm_lemmas.chain(fixed_lemmas) {
            push_unique(&mut parses, Parse::new(PartOfSpeech::Noun, lemma));
        }
        parses
    }

    fn predicted_parses(&self, word: &str) -> Vec<Parse> {
        let mut parses = Vec::new();

        for suffix in NOUN_SUFFIXES {
            for ending in suffix.declension.endings() {
                if suffix.skip_endings.contains(ending) {
                    continue;
                }
                let Some(stem) = word.strip_suffix(ending) else {
                    continue;
                };
                let Some(root) = stem.strip_suffix(suffix.marker) else {
                    continue;
                };
                if char_len(root) >= suffix.min_stem {
                    let lemma = format!("{stem}{}", suffix.declension.lemma_ending());
                    push_unique(&mut parses, Parse::new(PartOfSpeech::Noun, lemma));
                }
            }
        }

        if let Some((stem, ending)) = strip_any(word, ADJECTIVE_ENDINGS, 2) {
            let soft = SOFT_ADJECTIVE_ENDINGS.contains(&ending) || stem.ends_with(VELAR_SIBILANT);
            let lemma = format!("{stem}{}", if soft { "ий" } else { "ый" });
            parses.push(Parse::new(PartOfSpeech::Adjective, lemma));
        }
        if strip_any(word, INFINITIVE_ENDINGS, 2).is_some() {
            parses.push(Parse::new(PartOfSpeech::Infinitive, word));
        }
        if strip_any(word, VERB_ENDINGS, 2).is_some() {
            parses.push(Parse::new(PartOfSpeech::Verb, word));
        }

        if parses.is_empty() {
            if let Some(lemma) = guess_hard_noun(word) {
                parses.push(Parse::new(PartOfSpeech::Noun, lemma));
            }
        }
        parses
    }
}

impl MorphAnalyzer for DictionaryAnalyzer {
    fn parse(&self, word: &str) -> Vec<Parse> {
        let word = word.to_lowercase();
        let folded = fold(&word);

        let parses = self.dictionary_parses(&word, &folded);
        if !parses.is_empty() {
            return parses;
        }
        let parses = self.predicted_parses(&word);
        trace!(%word, readings = %parses.iter().join(", "), "Predicted readings for unknown word");
        parses
    }
}

fn push_unique(parses: &mut Vec<Parse>, parse: Parse) {
    if !parses.contains(&parse) {
        parses.push(parse);
    }
}

/// Strip the first matching ending that leaves at least `min_stem` characters.
fn strip_any<'a, 'e>(
    word: &'a str,
    endings: &[&'e str],
    min_stem: usize,
) -> Option<(&'a str, &'e str)> {
    endings
        .iter()
        .filter_map(|ending| word.strip_suffix(ending).map(|stem| (stem, *ending)))
        .find(|(stem, _)| char_len(stem) >= min_stem)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::morph::MorphologicalClassifier;

    fn analyzer() -> DictionaryAnalyzer {
        DictionaryAnalyzer::new(Lexicon::builtin().unwrap())
    }

    fn nouns(parses: &[Parse]) -> Vec<&str> {
        parses
            .iter()
            .filter(|p| p.pos == PartOfSpeech::Noun)
            .map(|p| p.normal_form.as_str())
            .collect()
    }

    #[test]
    fn test_is_noun() {
        let classifier = MorphologicalClassifier::new(analyzer());
        assert!(classifier.is_noun("голос"));
        assert!(!classifier.is_noun("программировать"));
        assert!(!classifier.is_noun("с"));
        assert!(!classifier.is_noun("по"));
        assert!(!classifier.is_noun("и"));
    }

    #[test]
    fn test_normal_form() {
        let classifier = MorphologicalClassifier::new(analyzer());
        assert_eq!(classifier.lemmatize("голоса"), "голос");
        assert_eq!(classifier.lemmatize("программирования"), "программирование");
        assert_eq!(classifier.lemmatize("основ"), "основа");
        assert_eq!(classifier.lemmatize("языки"), "язык");
    }

    #[test]
    fn test_yo_lemma_from_e_spelling() {
        let classifier = MorphologicalClassifier::new(analyzer());
        assert_eq!(classifier.lemmatize("полетов"), "полёт");
        assert_eq!(classifier.lemmatize("полётов"), "полёт");
    }

    #[test]
    fn test_lemmas_are_fixed_points() {
        let classifier = MorphologicalClassifier::new(analyzer());
        for lemma in ["программирование", "голос", "основа", "полёт", "неделя", "сеть"] {
            assert!(classifier.is_noun(lemma), "{lemma}");
            assert_eq!(classifier.lemmatize(lemma), lemma);
        }
    }

    #[test]
    fn test_irregular_forms() {
        let classifier = MorphologicalClassifier::new(analyzer());
        assert_eq!(classifier.lemmatize("статей"), "статья");
        assert_eq!(classifier.lemmatize("людей"), "человек");
        assert_eq!(classifier.lemmatize("дня"), "день");
    }

    #[test]
    fn test_function_word_homonyms() {
        let a = analyzer();
        let parses = a.parse("раз");
        assert!(parses.iter().any(|p| p.pos == PartOfSpeech::Conjunction));
        assert_eq!(nouns(&parses), vec!["раз"]);

        let classifier = MorphologicalClassifier::new(a);
        assert!(!classifier.is_noun("раз"));
        assert!(!classifier.is_noun("путём"));
        assert!(classifier.is_noun("раза"));
    }

    #[test]
    fn test_adjectives_and_pronouns_are_not_nouns() {
        let classifier = MorphologicalClassifier::new(analyzer());
        assert!(!classifier.is_noun("самых"));
        assert!(!classifier.is_noun("новые"));
        assert!(!classifier.is_noun("этот"));
    }

    #[test]
    fn test_unknown_noun_prediction() {
        let a = analyzer();
        assert_eq!(nouns(&a.parse("перепрошивания")), vec!["перепрошивание"]);
        assert_eq!(nouns(&a.parse("отказоустойчивости")), vec!["отказоустойчивость"]);
        assert_eq!(nouns(&a.parse("токенизации")), vec!["токенизация"]);
        assert_eq!(nouns(&a.parse("микросервисов")), vec!["микросервис"]);
    }

    #[test]
    fn test_unknown_hard_stem_nouns() {
        let a = analyzer();
        for (form, lemma) in [
            ("микросервисы", "микросервис"),
            ("котов", "кот"),
            ("кот", "кот"),
            ("заводах", "завод"),
            ("пулреквестами", "пулреквест"),
            ("фреймворку", "фреймворк"),
            ("дашборды", "дашборд"),
            ("чекпоинтом", "чекпоинт"),
        ] {
            assert_eq!(nouns(&a.parse(form)), vec![lemma], "{form}");
        }
    }

    #[test]
    fn test_guess_needs_a_plausible_stem() {
        let a = analyzer();
        assert!(a.parse("мрк").is_empty());
        assert!(a.parse("ом").is_empty());
        assert!(!a.parse("научилась").iter().any(|p| p.pos == PartOfSpeech::Noun));
        assert!(!a.parse("пишет").iter().any(|p| p.pos == PartOfSpeech::Noun));
    }

    #[test]
    fn test_dictionary_soft_stem_nouns() {
        let classifier = MorphologicalClassifier::new(analyzer());
        assert_eq!(classifier.lemmatize("ядре"), "ядро");
        assert_eq!(classifier.lemmatize("мать"), "мать");
        assert_eq!(classifier.lemmatize("дочери"), "дочь");
        assert!(classifier.is_noun("мать"));
    }

    #[test]
    fn test_adjective_lemma_follows_ending_series() {
        let a = analyzer();
        let adjective = |word: &str| {
            a.parse(word)
                .into_iter()
                .find(|p| p.pos == PartOfSpeech::Adjective)
                .map(|p| p.normal_form)
        };
        assert_eq!(adjective("данных").as_deref(), Some("данный"));
        assert_eq!(adjective("длинных").as_deref(), Some("длинный"));
        assert_eq!(adjective("последних").as_deref(), Some("последний"));
        assert_eq!(adjective("русских").as_deref(), Some("русский"));
    }

    #[test]
    fn test_unknown_adjective_and_verbs() {
        let a = analyzer();
        assert_eq!(a.parse("квантовых"), vec![Parse::new(PartOfSpeech::Adjective, "квантовый")]);
        assert!(a.parse("задеплоить").iter().any(|p| p.pos == PartOfSpeech::Infinitive));
        assert!(a.parse("задеплоили").iter().any(|p| p.pos == PartOfSpeech::Verb));
    }

    #[test]
    fn test_unrecognisable_word_has_no_readings() {
        assert!(analyzer().parse("бзщ").is_empty());
    }
}
