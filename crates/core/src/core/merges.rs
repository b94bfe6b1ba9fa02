//! Merge rule management for BPE.
//!
//! Merge rules are validated against the vocabulary once, then stored in
//! rank order with a secondary index keyed by the token pair.

use crate::core::token::{Token, TokenPair};
use crate::core::vocab::Vocabulary;
use crate::error::{Result, TokenizerError};
use ahash::AHashMap;
use tracing::debug;

/// A validated merge rule.
///
/// `rank` is the rule's position in the merge list as loaded; lower rank
/// means higher priority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeRule {
    pub rank: usize,
    pub pair: TokenPair,
    pub destination: Token,
}

/// Split a merge line such as `"Ġ t"` into its two pieces.
///
/// Fails with [`TokenizerError::BadMerges`] unless the line holds exactly
/// two whitespace-separated pieces.
pub fn parse_merge_line(line: &str, rank: usize) -> Result<(String, String)> {
    let mut pieces = line.split_whitespace();
    match (pieces.next(), pieces.next(), pieces.next()) {
        (Some(left), Some(right), None) => Ok((left.to_string(), right.to_string())),
        _ => Err(TokenizerError::BadMerges {
            rank,
            rule: line.to_string(),
        }),
    }
}

/// Ordered collection of merge rules with lookup by rank and by pair.
#[derive(Debug, Clone, Default)]
pub struct MergeTable {
    /// Rules in rank order; `rules[i].rank == i`
    rules: Vec<MergeRule>,
    /// Pair -> rank of the first rule for that pair
    by_pair: AHashMap<TokenPair, usize>,
}

impl MergeTable {
    /// Validate merge pairs against the vocabulary and build the table.
    ///
    /// Rank is list position. Both pieces must be in the vocabulary, and so
    /// must their concatenation.
    pub fn from_pairs<I, L, R>(pairs: I, vocab: &Vocabulary) -> Result<Self>
    where
        I: IntoIterator<Item = (L, R)>,
        L: AsRef<str>,
        R: AsRef<str>,
    {
        let pairs = pairs.into_iter();
        let mut rules = Vec::with_capacity(pairs.size_hint().0);
        let mut by_pair = AHashMap::with_capacity(pairs.size_hint().0);

        for (rank, (left, right)) in pairs.enumerate() {
            let (left, right) = (left.as_ref(), right.as_ref());
            let piece = |text: &str| {
                vocab
                    .get_id(text)
                    .map(|id| Token::new(id, text))
                    .ok_or_else(|| TokenizerError::MergePieceNotInVocab {
                        rank,
                        piece: text.to_string(),
                    })
            };
            let pair = TokenPair::new(piece(left)?, piece(right)?);

            let merged = format!("{left}{right}");
            let destination = match vocab.get_id(&merged) {
                Some(id) => Token::new(id, merged),
                None => return Err(TokenizerError::MergeNotInVocab { rank, merged }),
            };

            by_pair.entry(pair.clone()).or_insert(rank);
            rules.push(MergeRule {
                rank,
                pair,
                destination,
            });
        }

        debug!(
            rules = rules.len(),
            distinct_pairs = by_pair.len(),
            "built merge table"
        );

        Ok(Self { rules, by_pair })
    }

    /// Parse `"left right"` merge lines, then validate them like [`Self::from_pairs`].
    pub fn from_lines<I, S>(lines: I, vocab: &Vocabulary) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let pairs = lines
            .into_iter()
            .enumerate()
            .map(|(rank, line)| parse_merge_line(line.as_ref(), rank))
            .collect::<Result<Vec<_>>>()?;
        Self::from_pairs(pairs, vocab)
    }

    /// Get the rule at a rank.
    #[inline]
    pub fn by_rank(&self, rank: usize) -> Option<&MergeRule> {
        self.rules.get(rank)
    }

    /// Get the highest-priority rule for a pair.
    #[inline]
    pub fn get(&self, pair: &TokenPair) -> Option<&MergeRule> {
        self.by_pair.get(pair).map(|&rank| &self.rules[rank])
    }

    /// Rank of the highest-priority rule for a pair.
    #[inline]
    pub fn rank_of(&self, pair: &TokenPair) -> Option<usize> {
        self.by_pair.get(pair).copied()
    }

    /// Iterate over the rules in ascending rank.
    pub fn iter(&self) -> std::slice::Iter<'_, MergeRule> {
        self.rules.iter()
    }

    /// Get the number of merge rules.
    #[inline]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if there are no merge rules.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<'a> IntoIterator for &'a MergeTable {
    type Item = &'a MergeRule;
    type IntoIter = std::slice::Iter<'a, MergeRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::vocab::SpecialTokensConfig;

    fn vocab() -> Vocabulary {
        Vocabulary::from_entries(
            [("a", 0), ("b", 1), ("ab", 2), ("c", 3), ("abc", 4)],
            SpecialTokensConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_parse_merge_line() {
        assert_eq!(
            parse_merge_line("Ġ t", 0).unwrap(),
            ("Ġ".to_string(), "t".to_string())
        );
        assert_eq!(
            parse_merge_line("a   b", 0).unwrap(),
            ("a".to_string(), "b".to_string())
        );
    }

    #[test]
    fn test_bad_merge_lines() {
        for line in ["ab", "a b c", "", "   "] {
            let err = parse_merge_line(line, 3).unwrap_err();
            assert!(
                matches!(err, TokenizerError::BadMerges { rank: 3, .. }),
                "{line:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_dual_lookup() {
        let vocab = vocab();
        let table = MergeTable::from_lines(["a b", "ab c"], &vocab).unwrap();

        assert_eq!(table.len(), 2);
        let first = table.by_rank(0).unwrap();
        assert_eq!(first.destination, Token::new(2, "ab"));
        assert_eq!(table.get(&first.pair), Some(first));

        let second = table.by_rank(1).unwrap();
        assert_eq!(second.pair.first, Token::new(2, "ab"));
        assert_eq!(second.pair.second, Token::new(3, "c"));
        assert_eq!(second.destination, Token::new(4, "abc"));
        assert_eq!(table.rank_of(&second.pair), Some(1));
        assert!(table.by_rank(2).is_none());
    }

    #[test]
    fn test_piece_not_in_vocab() {
        let err = MergeTable::from_lines(["a b", "a z"], &vocab()).unwrap_err();
        match err {
            TokenizerError::MergePieceNotInVocab { rank, piece } => {
                assert_eq!(rank, 1);
                assert_eq!(piece, "z");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_merge_not_in_vocab() {
        let err = MergeTable::from_lines(["b a"], &vocab()).unwrap_err();
        match err {
            TokenizerError::MergeNotInVocab { rank, merged } => {
                assert_eq!(rank, 0);
                assert_eq!(merged, "ba");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_bad_merges_reported_before_lookup() {
        // "z" is unknown, but the malformed line must be reported first
        let err = MergeTable::from_lines(["a z", "abc"], &vocab()).unwrap_err();
        assert!(matches!(err, TokenizerError::BadMerges { rank: 1, .. }));
    }

    #[test]
    fn test_duplicate_pair_keeps_first_rank() {
        let table = MergeTable::from_lines(["a b", "ab c", "a b"], &vocab()).unwrap();
        assert_eq!(table.len(), 3);
        let pair = table.by_rank(2).unwrap().pair.clone();
        assert_eq!(table.rank_of(&pair), Some(0));
    }
}
