use thiserror::Error;

use crate::ir::BlockId;

/// The generic Error type, which provides coverage for all errors this library
/// can potentially return.
///
/// Two groups of failures exist: structural errors raised while building a
/// [`Function`](crate::ir::Function), and analysis-contract violations raised
/// by the fixed-point engine. Contract violations are unrecoverable at the
/// point of detection — they indicate a bug in an analysis implementation, not
/// bad input — and abort the run with a diagnostic naming the broken
/// invariant.
///
/// # Examples
///
/// ```rust
/// use bitflow::analysis::dataflow::{FactVector, MeetOp};
/// use bitflow::Error;
///
/// let lhs = FactVector::new(4);
/// let rhs = FactVector::new(7);
/// match MeetOp::Intersect.combine(&lhs, &rhs) {
///     Err(Error::MeetWidthMismatch { lhs: 4, rhs: 7 }) => {}
///     other => panic!("expected a width mismatch, got {other:?}"),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// A fact vector with the wrong width reached or left a transfer function.
    ///
    /// Every fact vector in an analysis run must have exactly one bit per
    /// domain element; the domain is fully built before the first transfer
    /// call, so a mismatch means an analysis produced or injected a vector of
    /// the wrong width.
    #[error("fact vector width {found} does not match the domain size {expected}")]
    FactWidthMismatch {
        /// The expected width, equal to the size of the analysis domain.
        expected: usize,
        /// The width actually encountered.
        found: usize,
    },

    /// The meet operator was applied to vectors of different widths.
    #[error("meet applied to fact vectors of different widths ({lhs} vs {rhs})")]
    MeetWidthMismatch {
        /// Width of the left operand.
        lhs: usize,
        /// Width of the right operand.
        rhs: usize,
    },

    /// The engine's sweep cap was exceeded without reaching a fixed point.
    ///
    /// A monotone transfer function over the boolean fact lattice always
    /// converges, so hitting the cap signals a non-monotone (buggy) analysis.
    /// The cap is opt-in via
    /// [`Engine::with_sweep_limit`](crate::analysis::dataflow::Engine::with_sweep_limit).
    #[error("analysis did not converge within {limit} sweeps")]
    SweepLimitExceeded {
        /// The configured sweep cap.
        limit: usize,
    },

    /// A function was finished without any basic blocks.
    #[error("function has no basic blocks")]
    EmptyFunction,

    /// A basic block contains no instructions.
    ///
    /// Boundary values are read off the first/last instruction of neighboring
    /// blocks, so empty blocks are rejected at construction time.
    #[error("block {0} has no instructions")]
    EmptyBlock(BlockId),

    /// A basic block does not end with a terminator instruction.
    #[error("block {0} does not end with a terminator")]
    MissingTerminator(BlockId),

    /// A terminator instruction appears before the end of a basic block.
    #[error("block {0} has a terminator before its last instruction")]
    MisplacedTerminator(BlockId),

    /// A branch names a block that does not exist in the function.
    #[error("block {block} branches to undefined block {target}")]
    InvalidBranchTarget {
        /// The block containing the branch.
        block: BlockId,
        /// The missing branch target.
        target: BlockId,
    },
}

/// The result type used throughout bitflow.
pub type Result<T> = std::result::Result<T, Error>;
