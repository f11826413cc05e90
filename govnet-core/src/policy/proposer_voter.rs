//! Proposer → voter influence policy.

use std::collections::HashMap;

use crate::aggregate::GroupCandidates;
use crate::index::NodeIndex;
use crate::policy::{GroupExpansion, PolicyOutput, PolicyStats, expand_groups};
use crate::records::{Ballot, ProposalRecord, VoteRecord, group_by_proposal};

/// For each proposal with an indexed proposer, emits one directed candidate
/// per qualifying vote, proposer → voter.
///
/// Candidates are not deduplicated within a group: if the input carries
/// repeated votes by one voter, each contributes. Proposals without a
/// matching proposal record are skipped whole; an unindexed proposer skips
/// its group and is counted.
pub(crate) fn fanout(
    votes: &[VoteRecord],
    proposals: &[ProposalRecord],
    index: &NodeIndex,
) -> PolicyOutput {
    let proposers: HashMap<&str, &str> = proposals
        .iter()
        .map(|p| (p.id.as_str(), p.proposer.as_str()))
        .collect();

    let mut cohorts: Vec<(usize, Vec<&VoteRecord>)> = Vec::new();
    let mut stats = PolicyStats::default();
    for (proposal, rows) in group_by_proposal(votes) {
        let Some(proposer) = proposers.get(proposal) else {
            continue;
        };
        let Some(source) = index.get(proposer) else {
            stats.unindexed_actors += 1;
            continue;
        };
        cohorts.push((source, rows));
    }

    let mut output = expand_groups(&cohorts, |(source, rows)| fan(*source, rows, index));
    output.stats.merge(stats);
    output
}

fn fan(source: usize, rows: &[&VoteRecord], index: &NodeIndex) -> GroupExpansion {
    let mut candidates = GroupCandidates::new();
    let mut stats = PolicyStats::default();
    for vote in rows {
        let Some(target) = index.get(vote.actor()) else {
            stats.unindexed_actors += 1;
            continue;
        };
        if target == source {
            stats.self_loops += 1;
            continue;
        }
        candidates.push(source, target);
    }
    (candidates, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::Outcome;
    use crate::roster::{Participant, Roster};

    fn index(addresses: &[&str]) -> NodeIndex {
        NodeIndex::from_roster(&Roster::new(
            addresses
                .iter()
                .map(|&address| Participant {
                    address: address.to_owned(),
                    balance: 1,
                })
                .collect(),
        ))
    }

    fn vote(voter: &str, proposal: &str) -> VoteRecord {
        VoteRecord {
            voter: voter.to_owned(),
            proposal: proposal.to_owned(),
            outcome: Outcome::Pass,
            timestamp: 0,
        }
    }

    fn proposal(id: &str, proposer: &str) -> ProposalRecord {
        ProposalRecord {
            id: id.to_owned(),
            proposer: proposer.to_owned(),
            timestamp: 0,
        }
    }

    fn flat(output: &PolicyOutput) -> Vec<(usize, usize)> {
        output.groups.iter().flat_map(GroupCandidates::iter).collect()
    }

    #[test]
    fn fans_out_from_proposer_and_excludes_self_vote() {
        // Proposer "c" (index 2), voters "a"(0), "b"(1), plus a self-vote.
        let votes = vec![vote("a", "p1"), vote("b", "p1"), vote("c", "p1")];
        let proposals = vec![proposal("p1", "c")];
        let output = fanout(&votes, &proposals, &index(&["a", "b", "c"]));
        assert_eq!(flat(&output), vec![(2, 0), (2, 1)]);
        assert_eq!(output.stats.self_loops, 1);
    }

    #[test]
    fn proposals_without_a_record_are_skipped_whole() {
        let votes = vec![vote("a", "orphan")];
        let output = fanout(&votes, &[], &index(&["a"]));
        assert!(flat(&output).is_empty());
        assert_eq!(output.stats, PolicyStats::default());
    }

    #[test]
    fn unindexed_proposer_skips_group_and_is_counted() {
        let votes = vec![vote("a", "p1")];
        let proposals = vec![proposal("p1", "stranger")];
        let output = fanout(&votes, &proposals, &index(&["a"]));
        assert!(flat(&output).is_empty());
        assert_eq!(output.stats.unindexed_actors, 1);
    }

    #[test]
    fn repeated_votes_each_contribute_a_candidate() {
        let votes = vec![vote("a", "p1"), vote("a", "p1")];
        let proposals = vec![proposal("p1", "b")];
        let output = fanout(&votes, &proposals, &index(&["a", "b"]));
        assert_eq!(flat(&output), vec![(1, 0), (1, 0)]);
    }
}
