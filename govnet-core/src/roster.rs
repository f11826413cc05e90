//! Participant roster and reputation normalization.
//!
//! Balances arrive as raw token-scaled integers; the normalizer rescales
//! them into a bounded `[0, 100]` range so graphs built from different
//! organizations stay comparable.

use tracing::warn;

/// One reputation-holding member of the organization.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Participant {
    /// Opaque address identifying the participant.
    pub address: String,
    /// Raw reputation balance. `u128` because 1e18-scaled balances overflow
    /// `i64` for large holders.
    pub balance: u128,
}

/// The full reputation-holder roster of one organization.
///
/// # Examples
/// ```
/// use govnet_core::{Participant, Roster};
///
/// let roster = Roster::new(vec![
///     Participant { address: "0xa".into(), balance: 10 },
///     Participant { address: "0xb".into(), balance: 30 },
/// ]);
/// assert_eq!(roster.len(), 2);
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Roster {
    participants: Vec<Participant>,
}

impl Roster {
    /// Wraps a loader-supplied participant list.
    #[must_use]
    pub fn new(participants: Vec<Participant>) -> Self {
        Self { participants }
    }

    /// Returns the number of participants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    /// Returns whether the roster is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// Returns the participants in loader order.
    #[must_use]
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }
}

/// One row of the normalized reputation table.
#[derive(Clone, Debug, PartialEq)]
pub struct NormalizedBalance {
    /// Address of the participant the score belongs to.
    pub address: String,
    /// Reputation rescaled into `[0, 100]`.
    pub reputation: f64,
}

/// Rescales raw balances into `[0, 100]` and sorts descending by score.
///
/// Each balance maps to `(balance - min) / (max - min) * 100`. When every
/// balance is equal the range is degenerate and the divide cannot happen;
/// the documented fallback assigns `0.0` to every participant instead of
/// failing, and a warning is emitted. Ties sort by address so the output
/// order is deterministic.
///
/// # Examples
/// ```
/// use govnet_core::{Participant, Roster, normalize_reputation};
///
/// let roster = Roster::new(vec![
///     Participant { address: "0xa".into(), balance: 10 },
///     Participant { address: "0xb".into(), balance: 20 },
///     Participant { address: "0xc".into(), balance: 30 },
/// ]);
/// let rows = normalize_reputation(&roster);
/// let scores: Vec<(&str, f64)> = rows
///     .iter()
///     .map(|row| (row.address.as_str(), row.reputation))
///     .collect();
/// assert_eq!(scores, vec![("0xc", 100.0), ("0xb", 50.0), ("0xa", 0.0)]);
/// ```
#[must_use]
#[expect(
    clippy::cast_precision_loss,
    clippy::float_arithmetic,
    reason = "rescaling into [0, 100] is inherently floating-point"
)]
pub fn normalize_reputation(roster: &Roster) -> Vec<NormalizedBalance> {
    let participants = roster.participants();
    let Some(min_b) = participants.iter().map(|p| p.balance).min() else {
        return Vec::new();
    };
    let max_b = participants
        .iter()
        .map(|p| p.balance)
        .max()
        .unwrap_or(min_b);

    let mut rows: Vec<NormalizedBalance> = if max_b == min_b {
        warn!(
            participants = participants.len(),
            "degenerate balance range, assigning 0.0 to every participant"
        );
        participants
            .iter()
            .map(|p| NormalizedBalance {
                address: p.address.clone(),
                reputation: 0.0,
            })
            .collect()
    } else {
        let divider = (max_b - min_b) as f64;
        participants
            .iter()
            .map(|p| NormalizedBalance {
                address: p.address.clone(),
                reputation: (p.balance - min_b) as f64 / divider * 100.0,
            })
            .collect()
    };

    rows.sort_by(|a, b| {
        b.reputation
            .total_cmp(&a.reputation)
            .then_with(|| a.address.cmp(&b.address))
    });
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn roster(balances: &[(&str, u128)]) -> Roster {
        Roster::new(
            balances
                .iter()
                .map(|&(address, balance)| Participant {
                    address: address.to_owned(),
                    balance,
                })
                .collect(),
        )
    }

    #[rstest]
    #[case(&[("a", 10), ("b", 20), ("c", 30)], &[("c", 100.0), ("b", 50.0), ("a", 0.0)])]
    #[case(&[("a", 0), ("b", 200)], &[("b", 100.0), ("a", 0.0)])]
    fn rescales_into_percentage_range(
        #[case] balances: &[(&str, u128)],
        #[case] expected: &[(&str, f64)],
    ) {
        let rows = normalize_reputation(&roster(balances));
        let got: Vec<(&str, f64)> = rows
            .iter()
            .map(|row| (row.address.as_str(), row.reputation))
            .collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn equal_balances_fall_back_to_zero_instead_of_dividing_by_zero() {
        let rows = normalize_reputation(&roster(&[("a", 5), ("b", 5), ("c", 5)]));
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|row| row.reputation == 0.0));
    }

    #[test]
    fn empty_roster_yields_empty_table() {
        assert!(normalize_reputation(&Roster::default()).is_empty());
    }
}
