use thiserror::Error;

/// A structural problem found by [`Tree::check_invariants`][crate::balanced::Tree::check_invariants].
///
/// `depth` is the number of edges from the root to the offending node.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    /// A value sits on the wrong side of one of its ancestors.
    #[error("value at depth {depth} is out of order")]
    Unordered {
        /// Depth of the misplaced node.
        depth: usize,
    },

    /// A node's stored height disagrees with the heights of its children.
    #[error("stale height at depth {depth}: stored {stored}, computed {computed}")]
    StaleHeight {
        /// Depth of the node.
        depth: usize,
        /// The height the node carries.
        stored: isize,
        /// The height derived from its children.
        computed: isize,
    },

    /// A node's subtrees differ in height by more than one.
    #[error("node at depth {depth} has balance factor {factor}")]
    Unbalanced {
        /// Depth of the node.
        depth: usize,
        /// `height(left) - height(right)`.
        factor: isize,
    },

    /// The cached length does not match the number of nodes.
    #[error("tree reports {cached} values but holds {counted}")]
    LengthMismatch {
        /// The length the tree reports.
        cached: usize,
        /// The number of nodes actually reachable.
        counted: usize,
    },
}
