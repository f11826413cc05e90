//! Interchangeable edge-derivation policies.
//!
//! Every policy groups event records by proposal and emits per-group
//! candidate edges with implicit weight 1. The quadratic pairwise expansion
//! inside each group models "these participants interacted on the same
//! proposal"; grouping bounds the O(k²) blow-up to within-proposal cohort
//! sizes. With the `parallel` feature, groups expand on a Rayon pool and
//! the downstream accumulator stays the sole serialization point.

pub(crate) mod co_staker;
pub(crate) mod co_voter;
pub(crate) mod proposer_voter;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::aggregate::{EdgeOrientation, GroupCandidates};

/// Interaction model used to derive edges from governance events.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum RelationPolicy {
    /// Directed proposer → voter influence edges.
    ProposerVoter,
    /// Pairs of voters who backed the same outcome on a proposal.
    CoVoteAligned,
    /// Directed Pass-voter → Fail-voter edges across outcome groups.
    CoVoteOpposed,
    /// Pairs of stakers who backed the same outcome on a proposal.
    CoStakeAligned,
}

impl RelationPolicy {
    /// Orientation the policy uses when the caller does not override it.
    #[must_use]
    pub const fn default_orientation(self) -> EdgeOrientation {
        match self {
            Self::ProposerVoter | Self::CoVoteOpposed => EdgeOrientation::Directed,
            Self::CoVoteAligned | Self::CoStakeAligned => EdgeOrientation::Undirected,
        }
    }

    /// Returns whether the policy can build graphs of the given orientation.
    ///
    /// Proposer→voter and opposed co-voting are inherently directed;
    /// co-staking is inherently undirected. Aligned co-voting supports both:
    /// the directed variant keeps each observed orientation as its own edge.
    #[must_use]
    pub const fn supports(self, orientation: EdgeOrientation) -> bool {
        match self {
            Self::ProposerVoter | Self::CoVoteOpposed => {
                matches!(orientation, EdgeOrientation::Directed)
            }
            Self::CoVoteAligned => true,
            Self::CoStakeAligned => matches!(orientation, EdgeOrientation::Undirected),
        }
    }

    /// Stable label used in diagnostics and summaries.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ProposerVoter => "proposer-voter",
            Self::CoVoteAligned => "co-vote-aligned",
            Self::CoVoteOpposed => "co-vote-opposed",
            Self::CoStakeAligned => "co-stake-aligned",
        }
    }
}

impl std::fmt::Display for RelationPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Counters for per-record anomalies filtered during candidate generation.
///
/// These are recoverable conditions: a candidate whose actor is not indexed
/// or that would form a self-loop is skipped and counted, never raised.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PolicyStats {
    /// Candidates dropped because an endpoint was not an indexed participant.
    pub unindexed_actors: u64,
    /// Candidates dropped because both endpoints were the same node.
    pub self_loops: u64,
    /// Proposals where both outcome groups were non-empty. Surfaced as the
    /// "opposing stakes" statistic for staking graphs.
    pub opposing_outcome_proposals: u64,
}

impl PolicyStats {
    pub(crate) fn merge(&mut self, other: Self) {
        self.unindexed_actors += other.unindexed_actors;
        self.self_loops += other.self_loops;
        self.opposing_outcome_proposals += other.opposing_outcome_proposals;
    }
}

/// Candidate edges per context group plus the anomaly counters.
#[derive(Clone, Debug, Default)]
pub(crate) struct PolicyOutput {
    pub(crate) groups: Vec<GroupCandidates>,
    pub(crate) stats: PolicyStats,
}

pub(crate) type GroupExpansion = (GroupCandidates, PolicyStats);

/// Expands every context group through `expand`, sequentially or on the
/// Rayon pool. Group order is preserved either way, so aggregate weights
/// and first-seen orientations are identical across both paths.
pub(crate) fn expand_groups<G, F>(groups: &[G], expand: F) -> PolicyOutput
where
    G: Sync,
    F: Fn(&G) -> GroupExpansion + Sync,
{
    #[cfg(feature = "parallel")]
    let expansions: Vec<GroupExpansion> = groups.par_iter().map(&expand).collect();
    #[cfg(not(feature = "parallel"))]
    let expansions: Vec<GroupExpansion> = groups.iter().map(&expand).collect();

    let mut output = PolicyOutput {
        groups: Vec::with_capacity(expansions.len()),
        stats: PolicyStats::default(),
    };
    for (candidates, stats) in expansions {
        output.stats.merge(stats);
        output.groups.push(candidates);
    }
    output
}
