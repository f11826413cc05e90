//! Degree-weighted assortativity for assembled graphs.
//!
//! The coefficient is the Pearson correlation between the weighted degrees
//! found at the two ends of every edge. Undefined inputs surface as typed
//! errors instead of a silent NaN leaking into exported summaries.

use thiserror::Error;

use crate::aggregate::EdgeOrientation;
use crate::graph::GovernanceGraph;

/// Errors raised when the assortativity coefficient is undefined.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum AssortativityError {
    /// The correlation needs at least two edges.
    #[error("assortativity requires at least 2 edges (graph has {edges})")]
    InsufficientEdges {
        /// Number of edges present in the graph.
        edges: usize,
    },
    /// Every endpoint degree on one side is identical, so the correlation
    /// denominator vanishes.
    #[error("assortativity is undefined when endpoint degrees have zero variance")]
    ZeroDegreeVariance,
}

/// Computes the degree-weighted assortativity coefficient.
///
/// Degrees are weighted: each node's degree is the sum of incident edge
/// weights (out-weight and in-weight separately for directed graphs). Each
/// edge contributes an endpoint-degree sample weighted by its own weight;
/// undirected edges contribute both orientations so the estimate is
/// symmetric. Directed edges pair the source's out-degree with the target's
/// in-degree.
///
/// # Errors
/// Returns [`AssortativityError::InsufficientEdges`] for graphs with fewer
/// than two edges and [`AssortativityError::ZeroDegreeVariance`] when either
/// endpoint-degree series is constant.
///
/// # Examples
/// ```
/// use govnet_core::{
///     EdgeOrientation, GovernanceGraph, Node, NodeAttributes, WeightedEdge, degree_assortativity,
/// };
///
/// let nodes = (0..3)
///     .map(|i| Node::new(i, format!("0x{i}"), NodeAttributes::Reputation { reputation: 0.0 }))
///     .collect();
/// let edges = vec![WeightedEdge::new(0, 1, 1), WeightedEdge::new(1, 2, 1)];
/// let graph = GovernanceGraph::try_new(nodes, edges, EdgeOrientation::Undirected)?;
/// let r = degree_assortativity(&graph)?;
/// assert!((r + 1.0).abs() < 1e-12);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[expect(
    clippy::cast_precision_loss,
    clippy::float_arithmetic,
    clippy::indexing_slicing,
    reason = "Pearson correlation is floating-point; endpoints are validated at assembly"
)]
pub fn degree_assortativity(graph: &GovernanceGraph) -> Result<f64, AssortativityError> {
    let edges = graph.edges();
    if edges.len() < 2 {
        return Err(AssortativityError::InsufficientEdges { edges: edges.len() });
    }

    let node_count = graph.node_count();
    let mut source_degree = vec![0.0_f64; node_count];
    let mut target_degree = vec![0.0_f64; node_count];
    for edge in edges {
        let weight = edge.weight() as f64;
        match graph.orientation() {
            EdgeOrientation::Directed => {
                source_degree[edge.from()] += weight;
                target_degree[edge.to()] += weight;
            }
            EdgeOrientation::Undirected => {
                source_degree[edge.from()] += weight;
                source_degree[edge.to()] += weight;
            }
        }
    }
    if graph.orientation() == EdgeOrientation::Undirected {
        target_degree.clone_from(&source_degree);
    }

    let mut samples: Vec<(f64, f64, f64)> = Vec::with_capacity(edges.len() * 2);
    for edge in edges {
        let weight = edge.weight() as f64;
        let x = source_degree[edge.from()];
        let y = target_degree[edge.to()];
        samples.push((x, y, weight));
        if graph.orientation() == EdgeOrientation::Undirected {
            samples.push((y, x, weight));
        }
    }

    if is_constant(samples.iter().map(|&(x, _, _)| x))
        || is_constant(samples.iter().map(|&(_, y, _)| y))
    {
        return Err(AssortativityError::ZeroDegreeVariance);
    }

    Ok(weighted_pearson(&samples))
}

fn is_constant(mut values: impl Iterator<Item = f64>) -> bool {
    let Some(first) = values.next() else {
        return true;
    };
    values.all(|value| value == first)
}

#[expect(
    clippy::float_arithmetic,
    reason = "Pearson correlation is floating-point by definition"
)]
fn weighted_pearson(samples: &[(f64, f64, f64)]) -> f64 {
    let total: f64 = samples.iter().map(|&(_, _, w)| w).sum();
    let mean_x: f64 = samples.iter().map(|&(x, _, w)| w * x).sum::<f64>() / total;
    let mean_y: f64 = samples.iter().map(|&(_, y, w)| w * y).sum::<f64>() / total;

    let mut covariance = 0.0_f64;
    let mut variance_x = 0.0_f64;
    let mut variance_y = 0.0_f64;
    for &(x, y, w) in samples {
        let dx = x - mean_x;
        let dy = y - mean_y;
        covariance += w * dx * dy;
        variance_x += w * dx * dx;
        variance_y += w * dy * dy;
    }
    covariance / (variance_x.sqrt() * variance_y.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::WeightedEdge;
    use crate::graph::{Node, NodeAttributes};

    fn graph(
        node_count: usize,
        edges: Vec<WeightedEdge>,
        orientation: EdgeOrientation,
    ) -> GovernanceGraph {
        let nodes = (0..node_count)
            .map(|i| {
                Node::new(
                    i,
                    format!("0x{i}"),
                    NodeAttributes::Reputation { reputation: 0.0 },
                )
            })
            .collect();
        GovernanceGraph::try_new(nodes, edges, orientation).expect("test graph must be valid")
    }

    #[test]
    fn single_edge_is_undefined_not_nan() {
        let g = graph(2, vec![WeightedEdge::new(0, 1, 5)], EdgeOrientation::Undirected);
        let err = g.degree_assortativity().expect_err("one edge is undefined");
        assert_eq!(err, AssortativityError::InsufficientEdges { edges: 1 });
    }

    #[test]
    fn path_graph_is_perfectly_disassortative() {
        let g = graph(
            3,
            vec![WeightedEdge::new(0, 1, 1), WeightedEdge::new(1, 2, 1)],
            EdgeOrientation::Undirected,
        );
        let r = g.degree_assortativity().expect("defined");
        assert!((r + 1.0).abs() < 1e-12, "expected -1.0, got {r}");
    }

    #[test]
    fn regular_graph_has_zero_degree_variance() {
        let g = graph(
            3,
            vec![
                WeightedEdge::new(0, 1, 1),
                WeightedEdge::new(1, 2, 1),
                WeightedEdge::new(0, 2, 1),
            ],
            EdgeOrientation::Undirected,
        );
        let err = g.degree_assortativity().expect_err("triangle is regular");
        assert_eq!(err, AssortativityError::ZeroDegreeVariance);
    }

    #[test]
    fn weighted_directed_cycle_correlates_out_with_in_degree() {
        let g = graph(
            3,
            vec![
                WeightedEdge::new(0, 1, 1),
                WeightedEdge::new(1, 2, 1),
                WeightedEdge::new(2, 0, 2),
            ],
            EdgeOrientation::Directed,
        );
        let r = g.degree_assortativity().expect("defined");
        assert!((r - 1.0).abs() < 1e-12, "expected 1.0, got {r}");
    }
}
