//! Synthetic governance datasets for benchmarking.
//!
//! Candidate generation is O(k²) in the per-proposal cohort size, so the
//! benches sweep cohort sizes while holding the population fixed. Data is
//! generated from a seeded RNG so runs are comparable.

use govnet_core::{GovernanceRecords, Outcome, Participant, Roster, VoteRecord};
use rand::{Rng, SeedableRng, rngs::SmallRng};

/// Builds a roster of `participants` synthetic addresses.
#[must_use]
pub fn synthetic_roster(participants: usize) -> Roster {
    Roster::new(
        (0..participants)
            .map(|index| Participant {
                address: format!("0x{index:040x}"),
                balance: (index as u128 + 1) * 1_000,
            })
            .collect(),
    )
}

/// Builds `proposals` proposals with `cohort` random voters each.
///
/// Voters are drawn with replacement from the roster population, so large
/// cohorts exercise the self-pair and duplicate-pair filtering paths too.
#[must_use]
pub fn synthetic_votes(
    participants: usize,
    proposals: usize,
    cohort: usize,
    seed: u64,
) -> GovernanceRecords {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut votes = Vec::with_capacity(proposals * cohort);
    for proposal in 0..proposals {
        for _ in 0..cohort {
            let voter = rng.gen_range(0..participants);
            votes.push(VoteRecord {
                voter: format!("0x{voter:040x}"),
                proposal: format!("prop-{proposal}"),
                outcome: if rng.gen_bool(0.5) {
                    Outcome::Pass
                } else {
                    Outcome::Fail
                },
                timestamp: rng.gen_range(1_600_000_000..1_700_000_000),
            });
        }
    }
    GovernanceRecords {
        votes,
        ..GovernanceRecords::default()
    }
}
