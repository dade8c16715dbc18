//! Incremental construction of [`Function`]s.

use crate::{
    ir::{BasicBlock, BinaryOp, BlockId, Function, InstrId, Instruction, InstrKind, ValueRef},
    Error, Result,
};

/// Builds a [`Function`] block by block.
///
/// Blocks are created up front (so branches can name them) and filled through
/// a cursor: value-producing methods append to the currently selected block
/// and return the [`ValueRef`] of the new instruction. [`finish`] validates
/// the structure and wires predecessor/successor edges from the terminators.
///
/// # Example
///
/// ```rust
/// use bitflow::ir::{FunctionBuilder, ValueRef};
///
/// let mut builder = FunctionBuilder::new("max_zero", 1);
/// let entry = builder.create_block();
/// let positive = builder.create_block();
/// let negative = builder.create_block();
///
/// builder.select(entry);
/// builder.cond_branch(ValueRef::Param(0), positive, negative);
///
/// builder.select(positive);
/// builder.ret(Some(ValueRef::Param(0)));
///
/// builder.select(negative);
/// builder.ret(Some(ValueRef::Const(0)));
///
/// let function = builder.finish()?;
/// assert_eq!(function.block_count(), 3);
/// # Ok::<(), bitflow::Error>(())
/// ```
///
/// [`finish`]: FunctionBuilder::finish
#[derive(Debug)]
pub struct FunctionBuilder {
    name: String,
    param_count: usize,
    blocks: Vec<BasicBlock>,
    instructions: Vec<Instruction>,
    current: Option<BlockId>,
}

impl FunctionBuilder {
    /// Creates a builder for a function with the given name and parameter
    /// count.
    #[must_use]
    pub fn new(name: impl Into<String>, param_count: usize) -> Self {
        Self {
            name: name.into(),
            param_count,
            blocks: Vec::new(),
            instructions: Vec::new(),
            current: None,
        }
    }

    /// Creates a new basic block and selects it as the insertion point.
    ///
    /// The first block created becomes the entry block.
    pub fn create_block(&mut self) -> BlockId {
        let id = BlockId::new(self.blocks.len());
        self.blocks.push(BasicBlock::new(id));
        self.current = Some(id);
        id
    }

    /// Moves the insertion point to an existing block.
    ///
    /// # Panics
    ///
    /// Panics if `block` was not created by this builder.
    pub fn select(&mut self, block: BlockId) {
        assert!(
            block.index() < self.blocks.len(),
            "selected block {block} does not exist"
        );
        self.current = Some(block);
    }

    fn push(&mut self, kind: InstrKind) -> InstrId {
        let block = self
            .current
            .expect("no block selected; call create_block first");
        let id = InstrId::new(self.instructions.len());
        self.instructions.push(Instruction::new(id, kind));
        self.blocks[block.index()].push_instruction(id);
        id
    }

    /// Appends a binary computation and returns the value it defines.
    ///
    /// # Panics
    ///
    /// Panics if no block is selected.
    pub fn binary(&mut self, op: BinaryOp, lhs: ValueRef, rhs: ValueRef) -> ValueRef {
        ValueRef::Instr(self.push(InstrKind::Binary { op, lhs, rhs }))
    }

    /// Appends a copy and returns the value it defines.
    ///
    /// # Panics
    ///
    /// Panics if no block is selected.
    pub fn copy(&mut self, src: ValueRef) -> ValueRef {
        ValueRef::Instr(self.push(InstrKind::Copy { src }))
    }

    /// Appends an unconditional branch.
    ///
    /// # Panics
    ///
    /// Panics if no block is selected.
    pub fn branch(&mut self, target: BlockId) {
        self.push(InstrKind::Branch { target });
    }

    /// Appends a conditional branch.
    ///
    /// # Panics
    ///
    /// Panics if no block is selected.
    pub fn cond_branch(&mut self, cond: ValueRef, then_target: BlockId, else_target: BlockId) {
        self.push(InstrKind::CondBranch {
            cond,
            then_target,
            else_target,
        });
    }

    /// Appends a return.
    ///
    /// # Panics
    ///
    /// Panics if no block is selected.
    pub fn ret(&mut self, value: Option<ValueRef>) {
        self.push(InstrKind::Ret { value });
    }

    /// Validates the structure and produces the finished [`Function`].
    ///
    /// # Errors
    ///
    /// Returns an error if the function has no blocks, a block is empty, a
    /// block's terminator is missing or not in final position, or a branch
    /// names a block that does not exist.
    pub fn finish(self) -> Result<Function> {
        if self.blocks.is_empty() {
            return Err(Error::EmptyFunction);
        }

        for block in &self.blocks {
            if block.instructions().is_empty() {
                return Err(Error::EmptyBlock(block.id()));
            }
            for (position, id) in block.instructions().iter().enumerate() {
                let last = position + 1 == block.instructions().len();
                let terminator = self.instructions[id.index()].is_terminator();
                if terminator && !last {
                    return Err(Error::MisplacedTerminator(block.id()));
                }
                if last && !terminator {
                    return Err(Error::MissingTerminator(block.id()));
                }
            }
        }

        let mut edges: Vec<(BlockId, BlockId)> = Vec::new();
        for block in &self.blocks {
            let terminator = block
                .last_instruction()
                .expect("blocks are non-empty at this point");
            let targets: Vec<BlockId> = match *self.instructions[terminator.index()].kind() {
                InstrKind::Branch { target } => vec![target],
                InstrKind::CondBranch {
                    then_target,
                    else_target,
                    ..
                } => vec![then_target, else_target],
                _ => Vec::new(),
            };
            for target in targets {
                if target.index() >= self.blocks.len() {
                    return Err(Error::InvalidBranchTarget {
                        block: block.id(),
                        target,
                    });
                }
                edges.push((block.id(), target));
            }
        }

        let mut blocks = self.blocks;
        for (from, to) in edges {
            blocks[from.index()].add_successor(to);
            blocks[to.index()].add_predecessor(from);
        }

        Ok(Function::from_parts(
            self.name,
            self.param_count,
            blocks,
            self.instructions,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> Function {
        let mut builder = FunctionBuilder::new("diamond", 2);
        let bb0 = builder.create_block();
        let bb1 = builder.create_block();
        let bb2 = builder.create_block();
        let bb3 = builder.create_block();

        builder.select(bb0);
        builder.cond_branch(ValueRef::Param(0), bb1, bb2);

        builder.select(bb1);
        builder.binary(BinaryOp::Add, ValueRef::Param(0), ValueRef::Param(1));
        builder.branch(bb3);

        builder.select(bb2);
        builder.binary(BinaryOp::Sub, ValueRef::Param(0), ValueRef::Param(1));
        builder.branch(bb3);

        builder.select(bb3);
        builder.ret(None);

        builder.finish().unwrap()
    }

    #[test]
    fn test_edges_wired_from_terminators() {
        let function = diamond();
        let bb0 = BlockId::new(0);
        let bb1 = BlockId::new(1);
        let bb2 = BlockId::new(2);
        let bb3 = BlockId::new(3);

        assert_eq!(function.block(bb0).successors(), &[bb1, bb2]);
        assert!(function.block(bb0).predecessors().is_empty());
        assert_eq!(function.block(bb1).predecessors(), &[bb0]);
        assert_eq!(function.block(bb1).successors(), &[bb3]);
        assert_eq!(function.block(bb3).predecessors(), &[bb1, bb2]);
        assert!(function.block(bb3).successors().is_empty());
        assert_eq!(function.entry(), bb0);
    }

    #[test]
    fn test_empty_function_rejected() {
        let builder = FunctionBuilder::new("nothing", 0);
        assert!(matches!(builder.finish(), Err(Error::EmptyFunction)));
    }

    #[test]
    fn test_empty_block_rejected() {
        let mut builder = FunctionBuilder::new("hollow", 0);
        let bb0 = builder.create_block();
        builder.create_block();
        builder.select(bb0);
        builder.ret(None);
        assert!(matches!(
            builder.finish(),
            Err(Error::EmptyBlock(id)) if id == BlockId::new(1)
        ));
    }

    #[test]
    fn test_missing_terminator_rejected() {
        let mut builder = FunctionBuilder::new("open_ended", 1);
        builder.create_block();
        builder.binary(BinaryOp::Add, ValueRef::Param(0), ValueRef::Const(1));
        assert!(matches!(
            builder.finish(),
            Err(Error::MissingTerminator(id)) if id == BlockId::new(0)
        ));
    }

    #[test]
    fn test_misplaced_terminator_rejected() {
        let mut builder = FunctionBuilder::new("early_exit", 1);
        builder.create_block();
        builder.ret(None);
        builder.binary(BinaryOp::Add, ValueRef::Param(0), ValueRef::Const(1));
        assert!(matches!(
            builder.finish(),
            Err(Error::MisplacedTerminator(id)) if id == BlockId::new(0)
        ));
    }

    #[test]
    fn test_invalid_branch_target_rejected() {
        let mut builder = FunctionBuilder::new("dangling", 0);
        builder.create_block();
        builder.branch(BlockId::new(7));
        assert!(matches!(
            builder.finish(),
            Err(Error::InvalidBranchTarget { target, .. }) if target == BlockId::new(7)
        ));
    }

    #[test]
    fn test_cond_branch_to_same_target_single_edge() {
        let mut builder = FunctionBuilder::new("both_ways", 1);
        let bb0 = builder.create_block();
        let bb1 = builder.create_block();
        builder.select(bb0);
        builder.cond_branch(ValueRef::Param(0), bb1, bb1);
        builder.select(bb1);
        builder.ret(None);

        let function = builder.finish().unwrap();
        assert_eq!(function.block(bb0).successors(), &[bb1]);
        assert_eq!(function.block(bb1).predecessors(), &[bb0]);
    }
}
