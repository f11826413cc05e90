//! Stable address-to-index assignment for graph nodes.
//!
//! Indices are a pure function of the participant set: addresses are sorted
//! ascending before assignment, so a permuted but set-identical input always
//! produces the identical mapping. Staking graphs append non-member stakers
//! after the roster without renumbering existing members.

use std::collections::{BTreeSet, HashMap};

use crate::records::StakeRecord;
use crate::roster::Roster;

/// Dense node-index assignment over participant addresses.
///
/// # Examples
/// ```
/// use govnet_core::{NodeIndex, Participant, Roster};
///
/// let roster = Roster::new(vec![
///     Participant { address: "0xb".into(), balance: 2 },
///     Participant { address: "0xa".into(), balance: 1 },
/// ]);
/// let index = NodeIndex::from_roster(&roster);
/// assert_eq!(index.get("0xa"), Some(0));
/// assert_eq!(index.get("0xb"), Some(1));
/// assert_eq!(index.get("0xc"), None);
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct NodeIndex {
    by_address: HashMap<String, usize>,
    addresses: Vec<String>,
    member_count: usize,
}

impl NodeIndex {
    /// Assigns indices `0..n` to roster members in ascending address order.
    #[must_use]
    pub fn from_roster(roster: &Roster) -> Self {
        let members: BTreeSet<&str> = roster
            .participants()
            .iter()
            .map(|p| p.address.as_str())
            .collect();
        Self::from_sorted(members, BTreeSet::new())
    }

    /// Assigns member indices first, then appends every staker address
    /// absent from the roster, sorted, continuing the sequence.
    ///
    /// # Examples
    /// ```
    /// use govnet_core::{NodeIndex, Outcome, Participant, Roster, StakeRecord};
    ///
    /// let roster = Roster::new(vec![Participant { address: "0xb".into(), balance: 1 }]);
    /// let stakes = vec![StakeRecord {
    ///     staker: "0xz".into(),
    ///     proposal: "p1".into(),
    ///     outcome: Outcome::Pass,
    ///     timestamp: 0,
    /// }];
    /// let index = NodeIndex::with_stakers(&roster, &stakes);
    /// assert_eq!(index.get("0xb"), Some(0));
    /// assert_eq!(index.get("0xz"), Some(1));
    /// assert_eq!(index.member_count(), 1);
    /// ```
    #[must_use]
    pub fn with_stakers(roster: &Roster, stakes: &[StakeRecord]) -> Self {
        let members: BTreeSet<&str> = roster
            .participants()
            .iter()
            .map(|p| p.address.as_str())
            .collect();
        let outsiders: BTreeSet<&str> = stakes
            .iter()
            .map(|s| s.staker.as_str())
            .filter(|staker| !members.contains(staker))
            .collect();
        Self::from_sorted(members, outsiders)
    }

    fn from_sorted(members: BTreeSet<&str>, outsiders: BTreeSet<&str>) -> Self {
        let member_count = members.len();
        let mut by_address = HashMap::with_capacity(member_count + outsiders.len());
        let mut addresses = Vec::with_capacity(member_count + outsiders.len());
        for address in members.into_iter().chain(outsiders) {
            by_address.insert(address.to_owned(), addresses.len());
            addresses.push(address.to_owned());
        }
        Self {
            by_address,
            addresses,
            member_count,
        }
    }

    /// Looks up the index assigned to `address`.
    #[must_use]
    pub fn get(&self, address: &str) -> Option<usize> {
        self.by_address.get(address).copied()
    }

    /// Returns the address assigned to `index`.
    #[must_use]
    pub fn address(&self, index: usize) -> Option<&str> {
        self.addresses.get(index).map(String::as_str)
    }

    /// Returns all indexed addresses in index order.
    #[must_use]
    pub fn addresses(&self) -> &[String] {
        &self.addresses
    }

    /// Number of indexed addresses, members and outsiders included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    /// Returns whether no address has been indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    /// Number of roster members; indices below this bound are members.
    #[must_use]
    pub fn member_count(&self) -> usize {
        self.member_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::Outcome;
    use crate::roster::Participant;

    fn roster(addresses: &[&str]) -> Roster {
        Roster::new(
            addresses
                .iter()
                .map(|&address| Participant {
                    address: address.to_owned(),
                    balance: 1,
                })
                .collect(),
        )
    }

    fn stake(staker: &str) -> StakeRecord {
        StakeRecord {
            staker: staker.to_owned(),
            proposal: "p1".to_owned(),
            outcome: Outcome::Pass,
            timestamp: 0,
        }
    }

    #[test]
    fn assignment_ignores_roster_order() {
        let forward = NodeIndex::from_roster(&roster(&["0xa", "0xb", "0xc"]));
        let shuffled = NodeIndex::from_roster(&roster(&["0xc", "0xa", "0xb"]));
        assert_eq!(forward, shuffled);
        assert_eq!(forward.get("0xa"), Some(0));
        assert_eq!(forward.get("0xc"), Some(2));
    }

    #[test]
    fn stakers_extend_without_renumbering_members() {
        let base = NodeIndex::from_roster(&roster(&["0xm", "0xn"]));
        let extended =
            NodeIndex::with_stakers(&roster(&["0xm", "0xn"]), &[stake("0xa"), stake("0xn")]);

        for address in ["0xm", "0xn"] {
            assert_eq!(extended.get(address), base.get(address));
        }
        // "0xa" sorts before the members but still lands after them.
        assert_eq!(extended.get("0xa"), Some(2));
        assert_eq!(extended.member_count(), 2);
        assert_eq!(extended.len(), 3);
    }

    #[test]
    fn address_lookup_inverts_get() {
        let index = NodeIndex::from_roster(&roster(&["0xa", "0xb"]));
        assert_eq!(index.address(0), Some("0xa"));
        assert_eq!(index.address(1), Some("0xb"));
        assert_eq!(index.address(2), None);
    }
}
