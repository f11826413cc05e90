//! Governance interaction network construction.
//!
//! Turns unordered governance event records (votes, stakes, proposals) into
//! canonical weighted relationship graphs: deterministic node identity from
//! sorted addresses, symmetric-edge deduplication with first-seen
//! orientation, and incremental weight accumulation across repeated pairwise
//! interactions. Four policies are provided: proposer→voter influence,
//! aligned co-voting, opposed co-voting, and aligned co-staking.
//!
//! The core is a pure batch function `(roster, records, policy) → graph`;
//! table loading, date filtering, and export live in sibling crates.

mod aggregate;
mod assortativity;
mod builder;
mod error;
mod graph;
mod index;
mod network;
mod policy;
mod records;
mod roster;

pub use crate::{
    aggregate::{EdgeAccumulator, EdgeOrientation, GroupCandidates, WeightedEdge},
    assortativity::{AssortativityError, degree_assortativity},
    builder::NetworkBuilder,
    error::{GraphError, GraphErrorCode, Result},
    graph::{GovernanceGraph, Node, NodeAttributes},
    index::NodeIndex,
    network::{GovernanceRecords, Network, NetworkOutcome},
    policy::{PolicyStats, RelationPolicy},
    records::{Ballot, Outcome, ProposalRecord, StakeRecord, VoteRecord},
    roster::{NormalizedBalance, Participant, Roster, normalize_reputation},
};
