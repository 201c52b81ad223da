//! Top-N sentence selection.

use std::collections::HashSet;

use crate::rank::ScoredSentence;
use crate::segment::Sentence;

/// Default number of summary sentences.
pub const DEFAULT_SENTENCES: usize = 5;

/// Picks the `n` best sentences and returns them in document order.
///
/// Higher scores win; equal scores prefer the smaller index. A sentence whose
/// index or text was already chosen is skipped, so the result never repeats
/// itself. Returns every candidate when there are fewer than `n`, and nothing
/// when `n == 0`.
pub fn select_top(scored: &[ScoredSentence], n: usize) -> Vec<Sentence> {
    let mut ranked: Vec<&ScoredSentence> = scored.iter().collect();
    ranked.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.sentence.index.cmp(&b.sentence.index))
    });

    let mut seen_index = HashSet::new();
    let mut seen_text = HashSet::new();
    let mut chosen: Vec<Sentence> = Vec::with_capacity(n.min(ranked.len()));

    for candidate in ranked {
        if chosen.len() >= n {
            break;
        }
        let sentence = &candidate.sentence;
        if seen_index.contains(&sentence.index) || seen_text.contains(sentence.text.as_str()) {
            continue;
        }
        seen_index.insert(sentence.index);
        seen_text.insert(sentence.text.as_str());
        chosen.push(sentence.clone());
    }

    chosen.sort_by_key(|sentence| sentence.index);
    chosen
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(items: &[(usize, f64)]) -> Vec<ScoredSentence> {
        items
            .iter()
            .map(|&(index, score)| ScoredSentence {
                sentence: Sentence::new(format!("Sentence number {}.", index), index),
                score,
            })
            .collect()
    }

    fn indices(sentences: &[Sentence]) -> Vec<usize> {
        sentences.iter().map(|s| s.index).collect()
    }

    #[test]
    fn test_tie_prefers_smaller_index() {
        let input = scored(&[(5, 3.0), (2, 3.0)]);
        assert_eq!(indices(&select_top(&input, 1)), vec![2]);
    }

    #[test]
    fn test_output_in_document_order() {
        let input = scored(&[(0, 1.0), (1, 9.0), (2, 3.0), (3, 7.0), (4, 8.0)]);
        assert_eq!(indices(&select_top(&input, 3)), vec![1, 3, 4]);
    }

    #[test]
    fn test_fewer_candidates_than_n() {
        let input = scored(&[(3, 1.0), (1, 2.0)]);
        assert_eq!(indices(&select_top(&input, 5)), vec![1, 3]);
    }

    #[test]
    fn test_zero_and_empty() {
        assert!(select_top(&scored(&[(0, 1.0)]), 0).is_empty());
        assert!(select_top(&[], 3).is_empty());
    }

    #[test]
    fn test_no_duplicates() {
        let mut input = scored(&[(0, 5.0), (1, 4.0), (2, 3.0)]);
        input.push(input[0].clone());
        input.push(ScoredSentence { sentence: Sentence::new("Sentence number 1.", 7), score: 3.5 });

        let result = select_top(&input, 3);
        assert_eq!(indices(&result), vec![0, 1, 2]);
    }

    #[test]
    fn test_properties_hold_for_many_n() {
        let input = scored(&[(0, 2.0), (1, 2.0), (2, 0.0), (3, 5.5), (4, 1.0), (5, 5.5), (6, 2.0)]);
        for n in 0..10 {
            let result = select_top(&input, n);
            assert!(result.len() <= n);
            assert!(result.windows(2).all(|w| w[0].index < w[1].index));
        }
        assert_eq!(indices(&select_top(&input, 3)), vec![0, 3, 5]);
    }
}
