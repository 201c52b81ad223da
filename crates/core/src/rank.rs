//! Word-frequency sentence ranking.
//!
//! Sentences are scored by how often their content words occur across all
//! candidate sentences of the page. Counts are integers kept in an ordered
//! map, so the profile and the scores are identical from run to run.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::segment::Sentence;

/// English function words that carry no salience. Sorted for binary search.
pub const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are", "as", "at", "be",
    "because", "been", "before", "being", "below", "between", "both", "but", "by", "could", "did", "do", "does",
    "doing", "down", "during", "each", "few", "for", "from", "further", "had", "has", "have", "having", "he", "her",
    "here", "hers", "herself", "him", "himself", "his", "how", "i", "if", "in", "into", "is", "it", "its", "itself",
    "just", "me", "more", "most", "my", "myself", "no", "nor", "not", "now", "of", "off", "on", "once", "only", "or",
    "other", "our", "ours", "ourselves", "out", "over", "own", "same", "she", "should", "so", "some", "such", "than",
    "that", "the", "their", "theirs", "them", "themselves", "then", "there", "these", "they", "this", "those",
    "through", "to", "too", "under", "until", "up", "very", "was", "we", "were", "what", "when", "where", "which",
    "while", "who", "whom", "why", "will", "with", "you", "your", "yours", "yourself", "yourselves",
];

static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\p{Alphabetic}+").expect("word pattern"));

/// Whether `word` (already lowercased) is a stopword.
pub fn is_stopword(word: &str) -> bool {
    STOP_WORDS.binary_search(&word).is_ok()
}

/// Lowercased alphabetic tokens of `text`, stopwords removed.
///
/// Digits and punctuation split tokens and never form tokens themselves.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    WORD.find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|word| !is_stopword(word))
        .map(str::to_string)
        .collect()
}

/// How the frequency profile counts a token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Counting {
    /// Once per sentence that contains the token.
    #[default]
    Sentences,
    /// Once per occurrence.
    Occurrences,
}

/// How token frequencies combine into a sentence score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Scoring {
    /// Sum of the frequencies of every token in the sentence.
    #[default]
    Sum,
    /// Sum divided by the number of scoring tokens; favours dense sentences over long ones.
    Mean,
}

/// Configuration for sentence ranking
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RankConfig {
    pub counting: Counting,
    pub scoring: Scoring,
}

/// Token counts over the candidate sentences of one page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyProfile {
    counts: BTreeMap<String, u64>,
}

impl FrequencyProfile {
    /// Builds the profile for `sentences`.
    pub fn build(sentences: &[Sentence], counting: Counting) -> Self {
        let mut counts: BTreeMap<String, u64> = BTreeMap::new();

        for sentence in sentences {
            let mut tokens = tokenize(&sentence.text);
            if counting == Counting::Sentences {
                tokens.sort_unstable();
                tokens.dedup();
            }
            for token in tokens {
                *counts.entry(token).or_default() += 1;
            }
        }

        Self { counts }
    }

    /// Count for `token`, zero if it never occurred.
    pub fn get(&self, token: &str) -> u64 {
        self.counts.get(token).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Tokens in lexical order with their counts.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(token, count)| (token.as_str(), *count))
    }

    /// The `n` most frequent tokens, ties in lexical order.
    pub fn top_terms(&self, n: usize) -> Vec<(&str, u64)> {
        let mut terms: Vec<(&str, u64)> = self.iter().collect();
        terms.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        terms.truncate(n);
        terms
    }

    /// Scores one sentence against this profile.
    pub fn score(&self, sentence: &Sentence, scoring: Scoring) -> f64 {
        let tokens = tokenize(&sentence.text);
        if tokens.is_empty() {
            return 0.0;
        }

        let total: u64 = tokens.iter().map(|token| self.get(token)).sum();
        match scoring {
            Scoring::Sum => total as f64,
            Scoring::Mean => total as f64 / tokens.len() as f64,
        }
    }
}

/// A sentence paired with its salience score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredSentence {
    pub sentence: Sentence,
    pub score: f64,
}

/// Scores every sentence, preserving input order.
pub fn rank(sentences: &[Sentence], config: &RankConfig) -> Vec<ScoredSentence> {
    let profile = FrequencyProfile::build(sentences, config.counting);
    tracing::debug!(terms = profile.len(), top = ?profile.top_terms(5), "built frequency profile");

    rank_with_profile(sentences, &profile, config.scoring)
}

/// Scores every sentence against an existing profile.
pub fn rank_with_profile(sentences: &[Sentence], profile: &FrequencyProfile, scoring: Scoring) -> Vec<ScoredSentence> {
    sentences
        .iter()
        .map(|sentence| ScoredSentence { sentence: sentence.clone(), score: profile.score(sentence, scoring) })
        .collect()
}
