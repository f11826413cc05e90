//! Weight-merging aggregation of candidate edges.
//!
//! Policies emit per-group candidate edges with implicit weight 1; the
//! accumulator folds them into one weighted edge set. Keys are structured
//! index pairs, never concatenated strings: `("1", "23")` and `("12", "3")`
//! would collide as text, which is exactly the hazard structured keys avoid.

use std::collections::HashMap;

/// Whether a reversed pair merges into an existing edge.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum EdgeOrientation {
    /// `a -> b` and `b -> a` are distinct edges with independent weights.
    Directed,
    /// Both orientations of a pair accumulate into one edge, which keeps
    /// the orientation it was first observed with.
    Undirected,
}

impl std::fmt::Display for EdgeOrientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Directed => "directed",
            Self::Undirected => "undirected",
        })
    }
}

/// A weighted interaction edge between two node indices.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct WeightedEdge {
    from: usize,
    to: usize,
    weight: u64,
}

impl WeightedEdge {
    /// Creates a weighted edge.
    #[must_use]
    pub fn new(from: usize, to: usize, weight: u64) -> Self {
        Self { from, to, weight }
    }

    /// Returns the source node index.
    #[must_use]
    #[rustfmt::skip]
    pub fn from(&self) -> usize { self.from }

    /// Returns the target node index.
    #[must_use]
    #[rustfmt::skip]
    pub fn to(&self) -> usize { self.to }

    /// Number of qualifying interaction events behind this edge.
    #[must_use]
    #[rustfmt::skip]
    pub fn weight(&self) -> u64 { self.weight }
}

/// Candidate edges emitted by one context group, each with implicit weight 1.
///
/// Candidates are a multiset: a pair occurring twice within a group
/// contributes two weight increments downstream.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct GroupCandidates(Vec<(usize, usize)>);

impl GroupCandidates {
    /// Creates an empty candidate set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one candidate edge.
    pub fn push(&mut self, from: usize, to: usize) {
        self.0.push((from, to));
    }

    /// Iterates candidates in emission order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.0.iter().copied()
    }

    /// Number of candidates in the group.
    #[must_use]
    #[rustfmt::skip]
    pub fn len(&self) -> usize { self.0.len() }

    /// Returns whether the group emitted no candidates.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_empty(&self) -> bool { self.0.is_empty() }
}

/// Merges candidate edges from all context groups into a weighted edge set.
///
/// An exact-key hit increments the entry. For undirected orientation only,
/// a reversed-key hit increments the existing entry while preserving its
/// first-seen orientation, so each unordered pair keeps a single entry.
/// Directed orientation never consults the reversed key.
///
/// # Examples
/// ```
/// use govnet_core::{EdgeAccumulator, EdgeOrientation};
///
/// let mut acc = EdgeAccumulator::new(EdgeOrientation::Undirected);
/// acc.record(0, 1);
/// acc.record(1, 0);
/// let edges = acc.into_edges();
/// assert_eq!(edges.len(), 1);
/// assert_eq!((edges[0].from(), edges[0].to(), edges[0].weight()), (0, 1, 2));
/// ```
#[derive(Clone, Debug)]
pub struct EdgeAccumulator {
    orientation: EdgeOrientation,
    entries: HashMap<(usize, usize), u64>,
}

impl EdgeAccumulator {
    /// Creates an empty accumulator for the given orientation.
    #[must_use]
    pub fn new(orientation: EdgeOrientation) -> Self {
        Self {
            orientation,
            entries: HashMap::new(),
        }
    }

    /// Records one candidate edge with weight 1.
    ///
    /// Self-pairs are ignored: policies exclude and count them upstream,
    /// and no edge may ever connect a node to itself.
    pub fn record(&mut self, from: usize, to: usize) {
        if from == to {
            return;
        }
        if let Some(weight) = self.entries.get_mut(&(from, to)) {
            *weight += 1;
            return;
        }
        if self.orientation == EdgeOrientation::Undirected {
            if let Some(weight) = self.entries.get_mut(&(to, from)) {
                *weight += 1;
                return;
            }
        }
        self.entries.insert((from, to), 1);
    }

    /// Folds a whole context group into the accumulator.
    pub fn absorb(&mut self, group: &GroupCandidates) {
        for (from, to) in group.iter() {
            self.record(from, to);
        }
    }

    /// Number of distinct edges accumulated so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether no edge has been accumulated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consumes the accumulator, yielding the weighted edges.
    ///
    /// The output order is unspecified; callers needing stable order must
    /// sort explicitly.
    #[must_use]
    pub fn into_edges(self) -> Vec<WeightedEdge> {
        self.entries
            .into_iter()
            .map(|((from, to), weight)| WeightedEdge::new(from, to, weight))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn sorted(mut edges: Vec<WeightedEdge>) -> Vec<(usize, usize, u64)> {
        edges.sort_unstable_by_key(|e| (e.from(), e.to()));
        edges.iter().map(|e| (e.from(), e.to(), e.weight())).collect()
    }

    #[test]
    fn undirected_merges_reversed_pairs_into_first_seen_orientation() {
        let mut acc = EdgeAccumulator::new(EdgeOrientation::Undirected);
        acc.record(2, 1);
        acc.record(1, 2);
        acc.record(2, 1);
        assert_eq!(sorted(acc.into_edges()), vec![(2, 1, 3)]);
    }

    #[test]
    fn directed_keeps_orientations_distinct() {
        let mut acc = EdgeAccumulator::new(EdgeOrientation::Directed);
        acc.record(0, 1);
        acc.record(1, 0);
        acc.record(0, 1);
        assert_eq!(sorted(acc.into_edges()), vec![(0, 1, 2), (1, 0, 1)]);
    }

    #[rstest]
    #[case(EdgeOrientation::Directed)]
    #[case(EdgeOrientation::Undirected)]
    fn self_pairs_are_dropped(#[case] orientation: EdgeOrientation) {
        let mut acc = EdgeAccumulator::new(orientation);
        acc.record(3, 3);
        assert!(acc.is_empty());
    }

    #[test]
    fn absorb_accumulates_across_groups() {
        let mut first = GroupCandidates::new();
        first.push(0, 1);
        first.push(0, 2);
        let mut second = GroupCandidates::new();
        second.push(1, 0);

        let mut acc = EdgeAccumulator::new(EdgeOrientation::Undirected);
        acc.absorb(&first);
        acc.absorb(&second);
        assert_eq!(sorted(acc.into_edges()), vec![(0, 1, 2), (0, 2, 1)]);
    }

    #[test]
    fn structured_keys_do_not_collide_across_digit_boundaries() {
        // "1"+"23" and "12"+"3" collide as strings; (1, 23) and (12, 3) must not.
        let mut acc = EdgeAccumulator::new(EdgeOrientation::Undirected);
        acc.record(1, 23);
        acc.record(12, 3);
        assert_eq!(sorted(acc.into_edges()), vec![(1, 23, 1), (12, 3, 1)]);
    }
}
