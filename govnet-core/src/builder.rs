//! Builder for configuring graph construction runs.

use crate::aggregate::EdgeOrientation;
use crate::error::{GraphError, Result};
use crate::network::Network;
use crate::policy::RelationPolicy;

/// Configures and constructs [`Network`] instances.
///
/// The orientation defaults to the policy's natural one; overriding it is
/// only meaningful for aligned co-voting, which exists in both undirected
/// and directed renditions.
///
/// # Examples
/// ```
/// use govnet_core::{EdgeOrientation, NetworkBuilder, RelationPolicy};
///
/// let network = NetworkBuilder::new()
///     .with_policy(RelationPolicy::CoVoteAligned)
///     .build()
///     .expect("aligned co-voting defaults to undirected");
/// assert_eq!(network.orientation(), EdgeOrientation::Undirected);
/// ```
#[derive(Clone, Debug)]
pub struct NetworkBuilder {
    policy: RelationPolicy,
    orientation: Option<EdgeOrientation>,
}

impl Default for NetworkBuilder {
    fn default() -> Self {
        Self {
            policy: RelationPolicy::CoVoteAligned,
            orientation: None,
        }
    }
}

impl NetworkBuilder {
    /// Creates a builder populated with default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects the relationship policy.
    #[must_use]
    pub fn with_policy(mut self, policy: RelationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the configured policy.
    #[must_use]
    #[rustfmt::skip]
    pub fn policy(&self) -> RelationPolicy { self.policy }

    /// Overrides the orientation the policy would otherwise use.
    #[must_use]
    pub fn with_orientation(mut self, orientation: EdgeOrientation) -> Self {
        self.orientation = Some(orientation);
        self
    }

    /// Returns the orientation the built network will use.
    #[must_use]
    pub fn orientation(&self) -> EdgeOrientation {
        self.orientation
            .unwrap_or_else(|| self.policy.default_orientation())
    }

    /// Validates the configuration and constructs a [`Network`].
    ///
    /// # Errors
    /// Returns [`GraphError::UnsupportedOrientation`] when the requested
    /// orientation is not meaningful for the policy, e.g. an undirected
    /// proposer→voter graph.
    ///
    /// # Examples
    /// ```
    /// use govnet_core::{EdgeOrientation, GraphError, NetworkBuilder, RelationPolicy};
    ///
    /// let err = NetworkBuilder::new()
    ///     .with_policy(RelationPolicy::ProposerVoter)
    ///     .with_orientation(EdgeOrientation::Undirected)
    ///     .build()
    ///     .expect_err("proposer fan-out is inherently directed");
    /// assert!(matches!(err, GraphError::UnsupportedOrientation { .. }));
    /// ```
    pub fn build(self) -> Result<Network> {
        let orientation = self.orientation();
        if !self.policy.supports(orientation) {
            return Err(GraphError::UnsupportedOrientation {
                policy: self.policy,
                orientation,
            });
        }
        Ok(Network::new(self.policy, orientation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(RelationPolicy::ProposerVoter, EdgeOrientation::Directed)]
    #[case(RelationPolicy::CoVoteAligned, EdgeOrientation::Undirected)]
    #[case(RelationPolicy::CoVoteOpposed, EdgeOrientation::Directed)]
    #[case(RelationPolicy::CoStakeAligned, EdgeOrientation::Undirected)]
    fn default_orientation_follows_policy(
        #[case] policy: RelationPolicy,
        #[case] expected: EdgeOrientation,
    ) {
        let network = NetworkBuilder::new()
            .with_policy(policy)
            .build()
            .expect("defaults are always supported");
        assert_eq!(network.orientation(), expected);
    }

    #[test]
    fn directed_aligned_co_voting_is_supported() {
        let network = NetworkBuilder::new()
            .with_policy(RelationPolicy::CoVoteAligned)
            .with_orientation(EdgeOrientation::Directed)
            .build()
            .expect("aligned co-voting supports both orientations");
        assert_eq!(network.orientation(), EdgeOrientation::Directed);
    }

    #[rstest]
    #[case(RelationPolicy::CoVoteOpposed, EdgeOrientation::Undirected)]
    #[case(RelationPolicy::CoStakeAligned, EdgeOrientation::Directed)]
    fn unsupported_combinations_are_rejected(
        #[case] policy: RelationPolicy,
        #[case] orientation: EdgeOrientation,
    ) {
        let err = NetworkBuilder::new()
            .with_policy(policy)
            .with_orientation(orientation)
            .build()
            .expect_err("combination is not meaningful");
        assert_eq!(err, GraphError::UnsupportedOrientation { policy, orientation });
    }
}
