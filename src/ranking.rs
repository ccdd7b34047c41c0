//! Frequency ranking of a week's accumulated lemmas.

use crate::models::NounCount;
use std::collections::HashMap;

/// Picks the `top` most frequent lemmas of a bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrequencyRanker {
    top: usize,
}

impl FrequencyRanker {
    pub fn new(top: usize) -> Self {
        Self { top }
    }

    pub fn top(&self) -> usize {
        self.top
    }

    /// Count every distinct lemma and return the `top` most frequent,
    /// highest count first. Equal counts keep the order in which the lemmas
    /// first appeared in `lemmas`.
    pub fn rank<S: AsRef<str>>(&self, lemmas: &[S]) -> Vec<NounCount> {
        if self.top == 0 {
            return Vec::new();
        }

        let mut counts: Vec<NounCount> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();
        for lemma in lemmas {
            let lemma = lemma.as_ref();
            match index.get(lemma) {
                Some(&i) => counts[i].count += 1,
                None => {
                    index.insert(lemma, counts.len());
                    counts.push(NounCount::new(lemma, 1));
                }
            }
        }

        // Stable sort: ties stay in first-occurrence order.
        counts.sort_by(|a, b| b.count.cmp(&a.count));
        counts.truncate(self.top);
        counts
    }
}
