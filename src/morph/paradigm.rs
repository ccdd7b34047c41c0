//! Russian noun declension paradigms.
//!
//! Each paradigm lists the case endings that can follow a stem, together with
//! the ending of the dictionary (nominative singular) form. Splitting a word
//! into `stem + ending` and re-attaching the lemma ending yields a candidate
//! lemma; the dictionary decides whether the candidate is real.

use serde::{Deserialize, Serialize};

/// Declension classes used by the dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Declension {
    /// Masculine, hard consonant stem: `код`, `язык`, `полёт`.
    MascHard,
    /// Masculine, soft sign: `словарь`, `календарь`.
    MascSoft,
    /// Masculine in `-й`: `музей`, `бой`.
    MascYot,
    /// Masculine in `-ий`: `сценарий`, `комментарий`.
    MascIy,
    /// Feminine in `-а`: `основа`, `задача`.
    FemA,
    /// Feminine in `-я`: `неделя`, `статья`.
    FemYa,
    /// Feminine in `-ия`: `функция`, `версия`.
    FemIya,
    /// Feminine, soft sign: `сеть`, `память`.
    FemSoft,
    /// Neuter in `-о`: `место`, `устройство`.
    NeutO,
    /// Neuter in `-е`: `поле`, `море`.
    NeutE,
    /// Neuter in `-ие`: `программирование`, `решение`.
    NeutIe,
}

impl Declension {
    pub const ALL: [Declension; 11] = [
        Declension::MascHard,
        Declension::MascSoft,
        Declension::MascYot,
        Declension::MascIy,
        Declension::FemA,
        Declension::FemYa,
        Declension::FemIya,
        Declension::FemSoft,
        Declension::NeutO,
        Declension::NeutE,
        Declension::NeutIe,
    ];

    /// Ending of the nominative singular.
    pub fn lemma_ending(self) -> &'static str {
        match self {
            Declension::MascHard => "",
            Declension::MascSoft | Declension::FemSoft => "ь",
            Declension::MascYot => "й",
            Declension::MascIy => "ий",
            Declension::FemA => "а",
            Declension::FemYa => "я",
            Declension::FemIya => "ия",
            Declension::NeutO => "о",
            Declension::NeutE => "е",
            Declension::NeutIe => "ие",
        }
    }

    /// Every ending a form of this paradigm can carry, singular and plural.
    ///
    /// Spelling-rule variants (`языки` next to `коды`, `ключом` next to
    /// `ключем`) are listed together; the dictionary filters the overlap.
    /// Words are matched with `ё` folded to `е`, so no ending spells `ё`.
    pub fn endings(self) -> &'static [&'static str] {
        match self {
            Declension::MascHard => &[
                "", "а", "у", "ом", "ем", "е", "ы", "и", "ов", "ей", "ам", "ами", "ах",
            ],
            Declension::MascSoft => &[
                "ь", "я", "ю", "ем", "е", "и", "ей", "ям", "ями", "ях",
            ],
            Declension::MascYot => &["й", "я", "ю", "ем", "е", "и", "ев", "ям", "ями", "ях"],
            Declension::MascIy => &["ий", "ия", "ию", "ием", "ии", "иев", "иям", "иями", "иях"],
            Declension::FemA => &[
                "а", "ы", "и", "е", "у", "ой", "ою", "ей", "", "ам", "ами", "ах",
            ],
            Declension::FemYa => &["я", "и", "е", "ю", "ей", "ь", "ям", "ями", "ях"],
            Declension::FemIya => &["ия", "ии", "ию", "ией", "ий", "иям", "иями", "иях"],
            Declension::FemSoft => &["ь", "и", "ью", "ей", "ям", "ями", "ях"],
            Declension::NeutO => &["о", "а", "у", "ом", "е", "", "ам", "ами", "ах"],
            Declension::NeutE => &["е", "я", "ю", "ем", "ей", "ям", "ями", "ях"],
            Declension::NeutIe => &["ие", "ия", "ию", "ием", "ии", "ий", "иям", "иями", "иях"],
        }
    }

    /// Candidate lemmas for `word`: one per ending that `word` ends with.
    pub fn candidate_lemmas(self, word: &str) -> impl Iterator<Item = String> + '_ {
        let lemma_ending = self.lemma_ending();
        self.endings().iter().filter_map(move |ending| {
            let stem = word.strip_suffix(ending)?;
            (!stem.is_empty()).then(|| format!("{stem}{lemma_ending}"))
        })
    }
}
