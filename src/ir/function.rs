//! Functions: the instruction arena and block list the analyses run over.

use crate::ir::{BasicBlock, BlockId, InstrId, Instruction, InstrKind};

/// A function in arena form.
///
/// Blocks are kept in a fixed underlying order with the entry block first;
/// instructions live in a single arena addressed by [`InstrId`]. A `Function`
/// can only be obtained from a [`FunctionBuilder`](crate::ir::FunctionBuilder),
/// which guarantees that every block is non-empty, ends with exactly one
/// terminator, and that predecessor/successor lists match the terminators.
///
/// The structure is read-only during analysis; only the local rewrite passes
/// in [`transform`](crate::transform) mutate instructions, and they never
/// change the block structure.
#[derive(Debug, Clone)]
pub struct Function {
    name: String,
    param_count: usize,
    blocks: Vec<BasicBlock>,
    instructions: Vec<Instruction>,
}

impl Function {
    pub(crate) fn from_parts(
        name: String,
        param_count: usize,
        blocks: Vec<BasicBlock>,
        instructions: Vec<Instruction>,
    ) -> Self {
        Self {
            name,
            param_count,
            blocks,
            instructions,
        }
    }

    /// Returns the function's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of parameters this function declares.
    #[must_use]
    pub const fn param_count(&self) -> usize {
        self.param_count
    }

    /// Returns the id of the entry block.
    #[must_use]
    pub const fn entry(&self) -> BlockId {
        BlockId::new(0)
    }

    /// Returns the block with the given id.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this function.
    #[must_use]
    pub fn block(&self, id: BlockId) -> &BasicBlock {
        &self.blocks[id.index()]
    }

    /// Returns the blocks in their underlying order, entry first.
    pub fn blocks(&self) -> impl Iterator<Item = &BasicBlock> {
        self.blocks.iter()
    }

    /// Returns the number of basic blocks.
    #[must_use]
    pub const fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Returns the instruction with the given id.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this function.
    #[must_use]
    pub fn instruction(&self, id: InstrId) -> &Instruction {
        &self.instructions[id.index()]
    }

    /// Returns the total number of instructions in the arena.
    #[must_use]
    pub const fn instruction_count(&self) -> usize {
        self.instructions.len()
    }

    /// Returns every instruction in program order: blocks in underlying
    /// order, instructions within each block in block order.
    pub fn instructions(&self) -> impl Iterator<Item = &Instruction> {
        self.blocks
            .iter()
            .flat_map(move |block| block.instructions().iter().map(move |id| self.instruction(*id)))
    }

    /// Replaces the operation of an instruction in place.
    ///
    /// Used by the local rewrite passes. The block structure must be
    /// preserved, so a terminator can neither be introduced nor removed.
    pub(crate) fn rewrite(&mut self, id: InstrId, kind: InstrKind) {
        let instr = &mut self.instructions[id.index()];
        let was_terminator = instr.is_terminator();
        instr.set_kind(kind);
        assert_eq!(
            was_terminator,
            instr.is_terminator(),
            "rewrite must not change whether an instruction terminates its block"
        );
    }
}

#[cfg(test)]
mod tests {
    use crate::ir::{BinaryOp, FunctionBuilder, ValueRef};

    #[test]
    fn test_program_order_iteration() {
        let mut builder = FunctionBuilder::new("two_blocks", 1);
        let bb0 = builder.create_block();
        let bb1 = builder.create_block();

        builder.select(bb0);
        builder.binary(BinaryOp::Add, ValueRef::Param(0), ValueRef::Const(1));
        builder.branch(bb1);

        builder.select(bb1);
        let t = builder.binary(BinaryOp::Mul, ValueRef::Param(0), ValueRef::Param(0));
        builder.ret(Some(t));

        let function = builder.finish().unwrap();
        let rendered: Vec<String> = function.instructions().map(|i| i.to_string()).collect();
        assert_eq!(
            rendered,
            vec![
                "i0 = add p0, 1",
                "br bb1",
                "i2 = mul p0, p0",
                "ret i2",
            ]
        );
        assert_eq!(function.instruction_count(), 4);
        assert_eq!(function.block_count(), 2);
        assert_eq!(function.name(), "two_blocks");
        assert_eq!(function.param_count(), 1);
    }
}
