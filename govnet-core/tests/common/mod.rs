//! Shared constructors for network construction tests.

use govnet_core::{Outcome, Participant, ProposalRecord, Roster, StakeRecord, VoteRecord};

#[must_use]
pub fn roster_of(entries: &[(&str, u128)]) -> Roster {
    Roster::new(
        entries
            .iter()
            .map(|&(address, balance)| Participant {
                address: address.to_owned(),
                balance,
            })
            .collect(),
    )
}

#[must_use]
pub fn vote(voter: &str, proposal: &str, outcome: Outcome) -> VoteRecord {
    VoteRecord {
        voter: voter.to_owned(),
        proposal: proposal.to_owned(),
        outcome,
        timestamp: 0,
    }
}

#[must_use]
pub fn stake(staker: &str, proposal: &str, outcome: Outcome) -> StakeRecord {
    StakeRecord {
        staker: staker.to_owned(),
        proposal: proposal.to_owned(),
        outcome,
        timestamp: 0,
    }
}

#[must_use]
pub fn proposal(id: &str, proposer: &str) -> ProposalRecord {
    ProposalRecord {
        id: id.to_owned(),
        proposer: proposer.to_owned(),
        timestamp: 0,
    }
}
