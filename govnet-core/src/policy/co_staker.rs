//! Co-staking policy and staker activity counts.
//!
//! The combinatorial shape is identical to aligned co-voting, so the
//! expansion delegates through the [`crate::Ballot`] seam. What is specific
//! to staking lives here: per-staker activity counts for node attributes
//! and the opposing-stakes statistic surfaced by the shared expansion.

use std::collections::HashMap;

use crate::index::NodeIndex;
use crate::policy::{PolicyOutput, co_voter};
use crate::records::StakeRecord;

/// Emits all within-outcome staker pairs per proposal.
pub(crate) fn aligned(stakes: &[StakeRecord], index: &NodeIndex) -> PolicyOutput {
    co_voter::aligned(stakes, index)
}

/// Counts how many stakes each staker placed, across all proposals.
///
/// The count becomes the `stakes` node attribute, for members and
/// non-members alike.
pub(crate) fn stake_counts(stakes: &[StakeRecord]) -> HashMap<&str, u64> {
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for stake in stakes {
        *counts.entry(stake.staker.as_str()).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::Outcome;

    fn stake(staker: &str, proposal: &str, outcome: Outcome) -> StakeRecord {
        StakeRecord {
            staker: staker.to_owned(),
            proposal: proposal.to_owned(),
            outcome,
            timestamp: 0,
        }
    }

    #[test]
    fn stake_counts_tally_every_row() {
        let stakes = vec![
            stake("a", "p1", Outcome::Pass),
            stake("a", "p2", Outcome::Fail),
            stake("b", "p1", Outcome::Pass),
        ];
        let counts = stake_counts(&stakes);
        assert_eq!(counts.get("a"), Some(&2));
        assert_eq!(counts.get("b"), Some(&1));
        assert_eq!(counts.get("c"), None);
    }

    #[test]
    fn opposing_stake_proposals_are_counted() {
        let stakes = vec![
            stake("a", "p1", Outcome::Pass),
            stake("b", "p1", Outcome::Fail),
            stake("a", "p2", Outcome::Pass),
            stake("b", "p2", Outcome::Pass),
        ];
        let index = NodeIndex::with_stakers(&crate::Roster::default(), &stakes);
        let output = aligned(&stakes, &index);
        assert_eq!(output.stats.opposing_outcome_proposals, 1);
    }
}
