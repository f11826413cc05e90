//! Co-voting policies: aligned pairs and opposed cross products.

use crate::aggregate::GroupCandidates;
use crate::index::NodeIndex;
use crate::policy::{GroupExpansion, PolicyOutput, PolicyStats, expand_groups};
use crate::records::{Ballot, Outcome, group_by_proposal};

/// Emits all C(k,2) unordered pairs within each outcome group of each
/// proposal. Pairs spanning different outcome groups are never connected.
pub(crate) fn aligned<B: Ballot + Sync>(ballots: &[B], index: &NodeIndex) -> PolicyOutput {
    let mut cohorts: Vec<Vec<&B>> = Vec::new();
    let mut stats = PolicyStats::default();
    for rows in group_by_proposal(ballots).into_values() {
        let (pass, fail) = split_by_outcome(rows);
        if !pass.is_empty() && !fail.is_empty() {
            stats.opposing_outcome_proposals += 1;
        }
        cohorts.push(pass);
        cohorts.push(fail);
    }

    let mut output = expand_groups(&cohorts, |cohort| pairs_within(cohort, index));
    output.stats.merge(stats);
    output
}

/// Emits the full Pass×Fail cross product per proposal, oriented
/// Pass-voter → Fail-voter. A bipartite all-pairs construction, not a
/// combination.
pub(crate) fn opposed<B: Ballot + Sync>(ballots: &[B], index: &NodeIndex) -> PolicyOutput {
    let mut cohorts: Vec<(Vec<&B>, Vec<&B>)> = Vec::new();
    let mut stats = PolicyStats::default();
    for rows in group_by_proposal(ballots).into_values() {
        let (pass, fail) = split_by_outcome(rows);
        if !pass.is_empty() && !fail.is_empty() {
            stats.opposing_outcome_proposals += 1;
        }
        cohorts.push((pass, fail));
    }

    let mut output = expand_groups(&cohorts, |(pass, fail)| cross(pass, fail, index));
    output.stats.merge(stats);
    output
}

fn split_by_outcome<B: Ballot>(rows: Vec<&B>) -> (Vec<&B>, Vec<&B>) {
    rows.into_iter()
        .partition(|ballot| ballot.outcome() == Outcome::Pass)
}

/// All unordered pairs of distinct rows, i < j, in row order.
fn pairs_within<B: Ballot>(cohort: &[&B], index: &NodeIndex) -> GroupExpansion {
    let mut candidates = GroupCandidates::new();
    let mut stats = PolicyStats::default();
    for (position, left) in cohort.iter().enumerate() {
        for right in cohort.iter().skip(position + 1) {
            push_pair(left.actor(), right.actor(), index, &mut candidates, &mut stats);
        }
    }
    (candidates, stats)
}

fn cross<B: Ballot>(pass: &[&B], fail: &[&B], index: &NodeIndex) -> GroupExpansion {
    let mut candidates = GroupCandidates::new();
    let mut stats = PolicyStats::default();
    for backer in pass {
        for opposer in fail {
            push_pair(
                backer.actor(),
                opposer.actor(),
                index,
                &mut candidates,
                &mut stats,
            );
        }
    }
    (candidates, stats)
}

fn push_pair(
    from: &str,
    to: &str,
    index: &NodeIndex,
    candidates: &mut GroupCandidates,
    stats: &mut PolicyStats,
) {
    let (Some(from), Some(to)) = (index.get(from), index.get(to)) else {
        stats.unindexed_actors += 1;
        return;
    };
    if from == to {
        stats.self_loops += 1;
        return;
    }
    candidates.push(from, to);
}
