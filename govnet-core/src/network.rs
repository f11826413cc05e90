//! Graph-construction orchestration.
//!
//! [`Network`] is the runtime entry point: one synchronous batch pass that
//! normalizes reputation, assigns node indices, expands the selected policy's
//! candidate edges, aggregates weights, and assembles the final graph. The
//! core performs no I/O; loaders run before it and writers after it.

use std::collections::HashMap;

use tracing::{debug, instrument, warn};

use crate::aggregate::{EdgeAccumulator, EdgeOrientation};
use crate::error::{GraphError, Result};
use crate::graph::{GovernanceGraph, Node, NodeAttributes};
use crate::index::NodeIndex;
use crate::policy::{PolicyOutput, PolicyStats, RelationPolicy, co_staker, co_voter, proposer_voter};
use crate::records::{ProposalRecord, StakeRecord, VoteRecord};
use crate::roster::{Roster, normalize_reputation};

/// Bundled event tables consumed by [`Network::run`].
///
/// Loaders fill only what the selected policy reads: vote policies ignore
/// `stakes`, the staking policy ignores `votes` and `proposals`.
#[derive(Clone, Debug, Default)]
pub struct GovernanceRecords {
    /// Proposal records, keyed by id from vote records.
    pub proposals: Vec<ProposalRecord>,
    /// Vote records for the organization.
    pub votes: Vec<VoteRecord>,
    /// Stake records for the organization.
    pub stakes: Vec<StakeRecord>,
}

/// Result of one graph-construction run.
#[derive(Clone, Debug)]
pub struct NetworkOutcome {
    graph: GovernanceGraph,
    stats: PolicyStats,
}

impl NetworkOutcome {
    /// Returns the assembled graph.
    #[must_use]
    pub fn graph(&self) -> &GovernanceGraph {
        &self.graph
    }

    /// Returns the per-record anomaly counters of the run.
    #[must_use]
    #[rustfmt::skip]
    pub fn stats(&self) -> PolicyStats { self.stats }

    /// Consumes the outcome, yielding the graph.
    #[must_use]
    pub fn into_graph(self) -> GovernanceGraph {
        self.graph
    }
}

/// Entry point for deriving one weighted relationship graph.
///
/// Construct via [`crate::NetworkBuilder`]. A `Network` is a pure function
/// of its inputs: identical roster and records always produce identical
/// node/edge/weight multisets.
///
/// # Examples
/// ```
/// use govnet_core::{
///     GovernanceRecords, NetworkBuilder, Outcome, Participant, RelationPolicy, Roster,
///     VoteRecord,
/// };
///
/// let roster = Roster::new(vec![
///     Participant { address: "0xa".into(), balance: 10 },
///     Participant { address: "0xb".into(), balance: 20 },
/// ]);
/// let records = GovernanceRecords {
///     votes: vec![
///         VoteRecord {
///             voter: "0xa".into(),
///             proposal: "p1".into(),
///             outcome: Outcome::Pass,
///             timestamp: 0,
///         },
///         VoteRecord {
///             voter: "0xb".into(),
///             proposal: "p1".into(),
///             outcome: Outcome::Pass,
///             timestamp: 1,
///         },
///     ],
///     ..GovernanceRecords::default()
/// };
/// let network = NetworkBuilder::new()
///     .with_policy(RelationPolicy::CoVoteAligned)
///     .build()?;
/// let outcome = network.run(&roster, &records)?;
/// assert_eq!(outcome.graph().node_count(), 2);
/// assert_eq!(outcome.graph().edge_count(), 1);
/// # Ok::<(), govnet_core::GraphError>(())
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Network {
    policy: RelationPolicy,
    orientation: EdgeOrientation,
}

impl Network {
    pub(crate) fn new(policy: RelationPolicy, orientation: EdgeOrientation) -> Self {
        Self {
            policy,
            orientation,
        }
    }

    /// Returns the policy this network derives edges with.
    #[must_use]
    #[rustfmt::skip]
    pub fn policy(&self) -> RelationPolicy { self.policy }

    /// Returns the orientation of graphs this network builds.
    #[must_use]
    #[rustfmt::skip]
    pub fn orientation(&self) -> EdgeOrientation { self.orientation }

    /// Runs the full construction pass: normalize → index → expand →
    /// aggregate → assemble.
    ///
    /// # Errors
    /// Returns [`GraphError::EmptyRoster`] when the roster has no members.
    /// Assembly errors cannot occur for policy-generated edges, but are
    /// propagated rather than swallowed.
    #[instrument(
        name = "core.run",
        err,
        skip(self, roster, records),
        fields(
            policy = %self.policy,
            orientation = %self.orientation,
            participants = roster.len(),
            proposals = records.proposals.len(),
            votes = records.votes.len(),
            stakes = records.stakes.len(),
        ),
    )]
    pub fn run(&self, roster: &Roster, records: &GovernanceRecords) -> Result<NetworkOutcome> {
        if roster.is_empty() {
            warn!("roster is empty, returning error");
            return Err(GraphError::EmptyRoster);
        }

        let (index, nodes) = self.build_nodes(roster, records);
        let output = self.expand(records, &index);

        let mut accumulator = EdgeAccumulator::new(self.orientation);
        for group in &output.groups {
            accumulator.absorb(group);
        }
        let edges = accumulator.into_edges();
        debug!(
            edges = edges.len(),
            unindexed_actors = output.stats.unindexed_actors,
            self_loops = output.stats.self_loops,
            opposing_outcome_proposals = output.stats.opposing_outcome_proposals,
            "aggregated candidate edges"
        );

        let graph = GovernanceGraph::try_new(nodes, edges, self.orientation)?;
        Ok(NetworkOutcome {
            graph,
            stats: output.stats,
        })
    }

    fn expand(&self, records: &GovernanceRecords, index: &NodeIndex) -> PolicyOutput {
        match self.policy {
            RelationPolicy::ProposerVoter => {
                proposer_voter::fanout(&records.votes, &records.proposals, index)
            }
            RelationPolicy::CoVoteAligned => co_voter::aligned(&records.votes, index),
            RelationPolicy::CoVoteOpposed => co_voter::opposed(&records.votes, index),
            RelationPolicy::CoStakeAligned => co_staker::aligned(&records.stakes, index),
        }
    }

    fn build_nodes(&self, roster: &Roster, records: &GovernanceRecords) -> (NodeIndex, Vec<Node>) {
        match self.policy {
            RelationPolicy::CoStakeAligned => {
                let index = NodeIndex::with_stakers(roster, &records.stakes);
                let counts = co_staker::stake_counts(&records.stakes);
                let member_count = index.member_count();
                let nodes = index
                    .addresses()
                    .iter()
                    .enumerate()
                    .map(|(position, address)| {
                        Node::new(
                            position,
                            address.clone(),
                            NodeAttributes::Staking {
                                member: position < member_count,
                                stakes: counts.get(address.as_str()).copied().unwrap_or(0),
                            },
                        )
                    })
                    .collect();
                (index, nodes)
            }
            RelationPolicy::ProposerVoter
            | RelationPolicy::CoVoteAligned
            | RelationPolicy::CoVoteOpposed => {
                let normalized = normalize_reputation(roster);
                let scores: HashMap<&str, f64> = normalized
                    .iter()
                    .map(|row| (row.address.as_str(), row.reputation))
                    .collect();
                let index = NodeIndex::from_roster(roster);
                let nodes = index
                    .addresses()
                    .iter()
                    .enumerate()
                    .map(|(position, address)| {
                        Node::new(
                            position,
                            address.clone(),
                            NodeAttributes::Reputation {
                                reputation: scores.get(address.as_str()).copied().unwrap_or(0.0),
                            },
                        )
                    })
                    .collect();
                (index, nodes)
            }
        }
    }
}
