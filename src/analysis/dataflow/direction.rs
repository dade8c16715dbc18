//! Analysis direction and direction-polymorphic traversal.
//!
//! The direction determines three things and nothing else: the order blocks
//! are visited in, the order instructions are visited within a block, and
//! which neighboring facts feed a block's boundary value. Each variant maps
//! to a concrete traversal strategy resolved once at engine construction;
//! aside from ordering and neighbor selection, forward and backward runs
//! behave identically.

use crate::ir::{BlockId, Function, InstrId};

/// Direction of a dataflow analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Information flows from entry to exit.
    ///
    /// Blocks are visited in underlying order, instructions in program order,
    /// and a block's boundary is fed by the *last* instruction fact of each
    /// predecessor. Examples: available expressions, will-be-available
    /// expressions.
    Forward,

    /// Information flows from exit to entry.
    ///
    /// Blocks are visited in reverse underlying order, instructions in
    /// reverse program order, and a block's boundary is fed by the *first*
    /// instruction fact of each successor. Examples: anticipated expressions,
    /// live variables.
    Backward,
}

impl Direction {
    /// Returns `true` for [`Direction::Forward`].
    #[must_use]
    pub const fn is_forward(self) -> bool {
        matches!(self, Self::Forward)
    }

    /// Resolves this direction to its traversal strategy.
    pub(crate) fn policy(self) -> &'static dyn TraversalPolicy {
        match self {
            Self::Forward => &ForwardTraversal,
            Self::Backward => &BackwardTraversal,
        }
    }
}

/// The three direction-dependent decisions of a traversal.
pub(crate) trait TraversalPolicy {
    /// The order in which blocks are swept.
    fn block_order(&self, function: &Function) -> Vec<BlockId>;

    /// The order in which a block's instructions are visited.
    fn instruction_order(&self, function: &Function, block: BlockId) -> Vec<InstrId>;

    /// The neighbor instructions whose facts feed this block's boundary.
    fn boundary_sources(&self, function: &Function, block: BlockId) -> Vec<InstrId>;
}

pub(crate) struct ForwardTraversal;

impl TraversalPolicy for ForwardTraversal {
    fn block_order(&self, function: &Function) -> Vec<BlockId> {
        function.blocks().map(|block| block.id()).collect()
    }

    fn instruction_order(&self, function: &Function, block: BlockId) -> Vec<InstrId> {
        function.block(block).instructions().to_vec()
    }

    fn boundary_sources(&self, function: &Function, block: BlockId) -> Vec<InstrId> {
        function
            .block(block)
            .predecessors()
            .iter()
            .map(|&pred| {
                function
                    .block(pred)
                    .last_instruction()
                    .expect("blocks are non-empty by construction")
            })
            .collect()
    }
}

pub(crate) struct BackwardTraversal;

impl TraversalPolicy for BackwardTraversal {
    fn block_order(&self, function: &Function) -> Vec<BlockId> {
        let mut order: Vec<BlockId> = function.blocks().map(|block| block.id()).collect();
        order.reverse();
        order
    }

    fn instruction_order(&self, function: &Function, block: BlockId) -> Vec<InstrId> {
        let mut order = function.block(block).instructions().to_vec();
        order.reverse();
        order
    }

    fn boundary_sources(&self, function: &Function, block: BlockId) -> Vec<InstrId> {
        function
            .block(block)
            .successors()
            .iter()
            .map(|&succ| {
                function
                    .block(succ)
                    .first_instruction()
                    .expect("blocks are non-empty by construction")
            })
            .collect()
    }
}
