//! Rank-ordered merge engine.
//!
//! Every rule is applied in ascending rank, and each rule gets exactly one
//! left-to-right sweep over every token group before the next rule runs.
//! This is not an exhaustive best-pair search: a pair that only becomes
//! adjacent after its rule's sweep has finished is never merged. Token ids
//! produced this way must match the reference tokenizer, so the behavior is
//! kept as is.

use crate::core::merges::{MergeRule, MergeTable};
use crate::core::token::Token;

/// Sequence of tokens for one pre-tokenized fragment.
pub type TokenGroup = Vec<Token>;

/// Apply one rule to one group in a single left-to-right sweep.
///
/// At cursor `i` the pair ending at `i` is the anterior pair and the pair
/// starting at `i` is the posterior pair. When both match, the posterior
/// merge wins. After an anterior-only merge the cursor stays put so the
/// merged token is compared with its new right neighbor.
pub fn merge_sweep(group: &mut TokenGroup, rule: &MergeRule) {
    let mut i = 0;
    while group.len() > 1 && i < group.len() {
        let anterior = i > 0 && rule.pair.matches(&group[i - 1], &group[i]);
        let posterior = i + 1 < group.len() && rule.pair.matches(&group[i], &group[i + 1]);

        match (anterior, posterior) {
            (true, false) => {
                group[i - 1] = rule.destination.clone();
                group.remove(i);
            }
            (_, true) => {
                group[i] = rule.destination.clone();
                group.remove(i + 1);
                i += 1;
            }
            _ => i += 1,
        }
    }
}

/// Applies a [`MergeTable`] to token groups.
#[derive(Debug, Clone, Copy)]
pub struct MergeEngine<'a> {
    table: &'a MergeTable,
}

impl<'a> MergeEngine<'a> {
    /// Create an engine over a merge table.
    pub fn new(table: &'a MergeTable) -> Self {
        Self { table }
    }

    /// Run every rule, in rank order, over every group.
    pub fn apply(&self, groups: &mut [TokenGroup]) {
        for rule in self.table {
            for group in groups.iter_mut() {
                // nothing left to merge in single-token groups
                if group.len() > 1 {
                    merge_sweep(group, rule);
                }
            }
        }
    }

    /// Run every rule over the groups and flatten them in fragment order.
    pub fn merge(&self, mut groups: Vec<TokenGroup>) -> Vec<Token> {
        self.apply(&mut groups);
        groups.into_iter().flatten().collect()
    }
}
