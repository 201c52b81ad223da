//! Sentence segmentation.
//!
//! Splits page text at terminal punctuation and keeps the sentences long
//! enough to be worth ranking. Boundary detection is heuristic: a `.`, `!` or
//! `?` (optionally followed by closing quotes or brackets) ends a sentence
//! when whitespace and a non-lowercase character follow, unless the word
//! before a `.` is a known abbreviation or a single-letter initial.

use serde::Serialize;

/// Default minimum sentence length in characters.
pub const DEFAULT_MIN_CHARS: usize = 40;

/// Lowercased abbreviations (without their final period) that do not end a sentence.
const ABBREVIATIONS: &[&str] = &[
    "approx", "apr", "aug", "ave", "capt", "cf", "co", "col", "corp", "dec", "dept", "dr", "e.g", "est", "etc", "feb",
    "fig", "gen", "gov", "i.e", "inc", "jan", "jr", "jul", "jun", "lt", "ltd", "mar", "mr", "mrs", "ms", "mt", "nov",
    "oct", "p.m", "a.m", "ph.d", "prof", "rep", "rev", "sen", "sep", "sept", "sgt", "sr", "st", "u.k", "u.n", "u.s",
    "u.s.a", "vol", "vs",
];

/// A sentence of the page text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sentence {
    /// Trimmed sentence text.
    pub text: String,
    /// Position among all sentences of the page, before length filtering.
    pub index: usize,
    /// Length of `text` in characters.
    pub length: usize,
}

impl Sentence {
    pub fn new(text: impl Into<String>, index: usize) -> Self {
        let text = text.into();
        let length = text.chars().count();
        Self { text, index, length }
    }
}

/// Splits text into candidate sentences.
///
/// Every sentence is numbered by its position in the unfiltered split, then
/// sentences shorter than `min_chars` characters are dropped. With
/// `min_chars == 0` nothing is dropped on length grounds.
pub fn segment(text: &str, min_chars: usize) -> Vec<Sentence> {
    let sentences: Vec<Sentence> = split_sentences(text)
        .into_iter()
        .enumerate()
        .map(|(index, text)| Sentence::new(text, index))
        .filter(|sentence| sentence.length >= min_chars)
        .collect();

    tracing::debug!(candidates = sentences.len(), min_chars, "segmented text");
    sentences
}

/// Splits text at sentence boundaries, returning trimmed non-empty pieces.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < chars.len() {
        let (pos, c) = chars[i];
        if !is_terminator(c) {
            i += 1;
            continue;
        }

        let mut j = i + 1;
        while j < chars.len() && is_terminator(chars[j].1) {
            j += 1;
        }
        while j < chars.len() && is_closing(chars[j].1) {
            j += 1;
        }

        if j >= chars.len() || !chars[j].1.is_whitespace() {
            i = j;
            continue;
        }

        let end = chars[j].0;
        let mut k = j;
        while k < chars.len() && chars[k].1.is_whitespace() {
            k += 1;
        }

        let next_starts_sentence = k < chars.len() && !chars[k].1.is_lowercase();
        let abbreviated = c == '.' && ends_with_abbreviation(&text[start..pos], chars[k].1);

        if next_starts_sentence && !abbreviated {
            push_trimmed(&mut sentences, &text[start..end]);
            start = chars[k].0;
        }
        i = k;
    }

    push_trimmed(&mut sentences, &text[start..]);
    sentences
}

fn push_trimmed<'a>(sentences: &mut Vec<&'a str>, piece: &'a str) {
    let piece = piece.trim();
    if !piece.is_empty() {
        sentences.push(piece);
    }
}

fn is_terminator(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

fn is_closing(c: char) -> bool {
    matches!(c, '"' | '\'' | ')' | ']' | '\u{201d}' | '\u{2019}' | '\u{bb}')
}

/// Whether the last word of `prefix` (the text before a period) is an
/// abbreviation, given the first character after the period's whitespace.
///
/// `No.` only abbreviates "number" before a digit. Single letters count as
/// initials, except the words `I` and `A`.
fn ends_with_abbreviation(prefix: &str, next: char) -> bool {
    let Some(word) = prefix.split_whitespace().last() else {
        return false;
    };
    let word = word.trim_start_matches(|c: char| !c.is_alphanumeric());

    let mut letters = word.chars();
    if let (Some(first), None) = (letters.next(), letters.next())
        && first.is_alphabetic()
    {
        return !matches!(first, 'I' | 'A');
    }

    let lowered = word.to_lowercase();
    if lowered == "no" {
        return next.is_ascii_digit();
    }
    ABBREVIATIONS.contains(&lowered.as_str())
}
