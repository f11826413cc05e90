//! Assembled governance graphs.
//!
//! A graph is built once from a complete node set and a complete aggregated
//! edge list, then only read. All weight accumulation happens upstream in
//! the edge list; assembly validates and freezes the result.

use crate::aggregate::{EdgeOrientation, WeightedEdge};
use crate::assortativity::{self, AssortativityError};
use crate::error::GraphError;

/// Attributes attached to a node, depending on the generating policy.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeAttributes {
    /// Vote-derived graphs carry the normalized reputation score.
    Reputation {
        /// Reputation rescaled into `[0, 100]`.
        reputation: f64,
    },
    /// Stake-derived graphs carry membership and stake activity.
    Staking {
        /// Whether the address holds reputation in the organization.
        member: bool,
        /// Number of stakes the address placed.
        stakes: u64,
    },
}

/// An indexed governance participant inside an assembled graph.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    index: usize,
    address: String,
    attributes: NodeAttributes,
}

impl Node {
    /// Creates a node.
    #[must_use]
    pub fn new(index: usize, address: impl Into<String>, attributes: NodeAttributes) -> Self {
        Self {
            index,
            address: address.into(),
            attributes,
        }
    }

    /// Returns the node's stable index.
    #[must_use]
    #[rustfmt::skip]
    pub fn index(&self) -> usize { self.index }

    /// Returns the participant address behind the node.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Returns the policy-specific attributes.
    #[must_use]
    pub fn attributes(&self) -> &NodeAttributes {
        &self.attributes
    }
}

/// A build-once weighted interaction graph.
///
/// # Examples
/// ```
/// use govnet_core::{EdgeOrientation, GovernanceGraph, Node, NodeAttributes, WeightedEdge};
///
/// let nodes = vec![
///     Node::new(0, "0xa", NodeAttributes::Reputation { reputation: 0.0 }),
///     Node::new(1, "0xb", NodeAttributes::Reputation { reputation: 100.0 }),
/// ];
/// let edges = vec![WeightedEdge::new(0, 1, 3)];
/// let graph = GovernanceGraph::try_new(nodes, edges, EdgeOrientation::Undirected)?;
/// assert_eq!(graph.node_count(), 2);
/// assert_eq!(graph.edge_count(), 1);
/// # Ok::<(), govnet_core::GraphError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct GovernanceGraph {
    nodes: Vec<Node>,
    edges: Vec<WeightedEdge>,
    orientation: EdgeOrientation,
}

impl GovernanceGraph {
    /// Assembles a graph, validating nodes and edges.
    ///
    /// Edges are stored sorted by `(from, to)` so output is stable even
    /// though the upstream accumulator enumerates in hash order.
    ///
    /// # Errors
    /// Returns [`GraphError::NodeIndexMismatch`] when a node's index differs
    /// from its position, [`GraphError::InvalidNodeId`] when an edge
    /// references a node outside the set, and [`GraphError::SelfLoopEdge`]
    /// when an edge connects a node to itself.
    pub fn try_new(
        nodes: Vec<Node>,
        mut edges: Vec<WeightedEdge>,
        orientation: EdgeOrientation,
    ) -> Result<Self, GraphError> {
        for (position, node) in nodes.iter().enumerate() {
            if node.index() != position {
                return Err(GraphError::NodeIndexMismatch {
                    position,
                    index: node.index(),
                });
            }
        }
        let node_count = nodes.len();
        for edge in &edges {
            let outside = [edge.from(), edge.to()]
                .into_iter()
                .find(|&node| node >= node_count);
            if let Some(node) = outside {
                return Err(GraphError::InvalidNodeId { node, node_count });
            }
            if edge.from() == edge.to() {
                return Err(GraphError::SelfLoopEdge { node: edge.from() });
            }
        }
        edges.sort_unstable_by_key(|edge| (edge.from(), edge.to()));
        Ok(Self {
            nodes,
            edges,
            orientation,
        })
    }

    /// Returns the nodes in index order.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Returns the edges sorted by `(from, to)`.
    #[must_use]
    pub fn edges(&self) -> &[WeightedEdge] {
        &self.edges
    }

    /// Returns the graph's orientation.
    #[must_use]
    #[rustfmt::skip]
    pub fn orientation(&self) -> EdgeOrientation { self.orientation }

    /// Returns whether the graph is directed.
    #[must_use]
    pub fn is_directed(&self) -> bool {
        self.orientation == EdgeOrientation::Directed
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of distinct weighted edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Degree-weighted assortativity coefficient of the graph.
    ///
    /// # Errors
    /// Returns [`AssortativityError`] when the coefficient is undefined;
    /// see [`assortativity::degree_assortativity`].
    pub fn degree_assortativity(&self) -> Result<f64, AssortativityError> {
        assortativity::degree_assortativity(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reputation_node(index: usize, address: &str) -> Node {
        Node::new(index, address, NodeAttributes::Reputation { reputation: 0.0 })
    }

    #[test]
    fn assembly_sorts_edges_for_stable_output() {
        let nodes = vec![
            reputation_node(0, "a"),
            reputation_node(1, "b"),
            reputation_node(2, "c"),
        ];
        let edges = vec![
            WeightedEdge::new(2, 0, 1),
            WeightedEdge::new(0, 1, 2),
            WeightedEdge::new(0, 2, 1),
        ];
        let graph =
            GovernanceGraph::try_new(nodes, edges, EdgeOrientation::Directed).expect("valid graph");
        let order: Vec<(usize, usize)> = graph
            .edges()
            .iter()
            .map(|edge| (edge.from(), edge.to()))
            .collect();
        assert_eq!(order, vec![(0, 1), (0, 2), (2, 0)]);
    }

    #[test]
    fn edges_outside_the_node_set_are_rejected() {
        let nodes = vec![reputation_node(0, "a")];
        let err = GovernanceGraph::try_new(
            nodes,
            vec![WeightedEdge::new(0, 4, 1)],
            EdgeOrientation::Directed,
        )
        .expect_err("edge endpoint 4 does not exist");
        assert_eq!(err, GraphError::InvalidNodeId { node: 4, node_count: 1 });
    }

    #[test]
    fn self_loops_are_rejected() {
        let nodes = vec![reputation_node(0, "a")];
        let err = GovernanceGraph::try_new(
            nodes,
            vec![WeightedEdge::new(0, 0, 1)],
            EdgeOrientation::Undirected,
        )
        .expect_err("self-loop must be rejected");
        assert_eq!(err, GraphError::SelfLoopEdge { node: 0 });
    }

    #[test]
    fn nodes_must_be_positionally_indexed() {
        let nodes = vec![reputation_node(1, "a")];
        let err = GovernanceGraph::try_new(nodes, Vec::new(), EdgeOrientation::Undirected)
            .expect_err("index 1 at position 0 must be rejected");
        assert_eq!(err, GraphError::NodeIndexMismatch { position: 0, index: 1 });
    }
}
