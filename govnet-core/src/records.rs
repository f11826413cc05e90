//! Governance event records and proposal grouping.
//!
//! Records are immutable inputs supplied by an external loader, already
//! filtered to a single organization. Grouping by proposal is the explicit
//! multi-map construction step every edge policy starts from.

use std::collections::BTreeMap;

/// The stance an actor took on a proposal.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Outcome {
    /// The actor backed the proposal.
    Pass,
    /// The actor opposed the proposal.
    Fail,
}

impl Outcome {
    /// Parses the wire label used by the upstream tables.
    ///
    /// # Examples
    /// ```
    /// use govnet_core::Outcome;
    ///
    /// assert_eq!(Outcome::parse("Pass"), Some(Outcome::Pass));
    /// assert_eq!(Outcome::parse("Fail"), Some(Outcome::Fail));
    /// assert_eq!(Outcome::parse("Abstain"), None);
    /// ```
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "Pass" => Some(Self::Pass),
            "Fail" => Some(Self::Fail),
            _ => None,
        }
    }

    /// Returns the wire label for this outcome.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pass => "Pass",
            Self::Fail => "Fail",
        }
    }
}

/// A single vote cast on a proposal.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VoteRecord {
    /// Address of the voting participant.
    pub voter: String,
    /// Identifier of the proposal voted on.
    pub proposal: String,
    /// Stance taken by the voter.
    pub outcome: Outcome,
    /// Epoch seconds at which the vote was cast.
    pub timestamp: i64,
}

/// A single stake placed on a proposal's outcome.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeRecord {
    /// Address of the staking actor; not necessarily a reputation holder.
    pub staker: String,
    /// Identifier of the proposal staked on.
    pub proposal: String,
    /// Outcome the stake backs.
    pub outcome: Outcome,
    /// Epoch seconds at which the stake was placed.
    pub timestamp: i64,
}

/// A submitted proposal and its author.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProposalRecord {
    /// Identifier other records reference via their `proposal` field.
    pub id: String,
    /// Address of the proposing participant.
    pub proposer: String,
    /// Epoch seconds at which the proposal was submitted.
    pub timestamp: i64,
}

/// Shared actor/proposal/outcome view over vote and stake records.
///
/// Co-voter and co-staker policies have the same combinatorial shape; this
/// trait is the seam that lets them share one pairwise-expansion core.
pub trait Ballot {
    /// Address of the acting participant.
    fn actor(&self) -> &str;
    /// Proposal the action targets.
    fn proposal(&self) -> &str;
    /// Stance the action backs.
    fn outcome(&self) -> Outcome;
}

impl Ballot for VoteRecord {
    fn actor(&self) -> &str {
        &self.voter
    }

    fn proposal(&self) -> &str {
        &self.proposal
    }

    fn outcome(&self) -> Outcome {
        self.outcome
    }
}

impl Ballot for StakeRecord {
    fn actor(&self) -> &str {
        &self.staker
    }

    fn proposal(&self) -> &str {
        &self.proposal
    }

    fn outcome(&self) -> Outcome {
        self.outcome
    }
}

/// Groups ballots by proposal identifier.
///
/// Group iteration order is sorted by proposal id and rows keep their input
/// order within each group, so candidate generation is fully deterministic.
pub(crate) fn group_by_proposal<B: Ballot>(ballots: &[B]) -> BTreeMap<&str, Vec<&B>> {
    let mut groups: BTreeMap<&str, Vec<&B>> = BTreeMap::new();
    for ballot in ballots {
        groups.entry(ballot.proposal()).or_default().push(ballot);
    }
    groups
}
