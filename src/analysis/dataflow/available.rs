//! Available expression analysis.
//!
//! An expression is *available* at a program point if it has been computed on
//! the way there and none of its operands changed since. This is the classic
//! forward/intersect analysis:
//!
//! - `GEN`  — the instruction's own binary expression
//! - `KILL` — every domain expression with an operand defined by this
//!   instruction
//!
//! The kill is applied after the gen so that an instruction consuming its own
//! result generates and immediately kills its expression.

use crate::{
    analysis::dataflow::{
        domain::transfer_expressions, Analysis, Direction, Domain, Expression, FactVector, MeetOp,
    },
    ir::Instruction,
    Result,
};

/// Available expression analysis (forward, intersect).
///
/// # Example
///
/// ```rust,ignore
/// use bitflow::prelude::*;
///
/// let snapshot = Engine::new(&function, AvailableExpressions).run()?;
/// let at_entry = snapshot.boundary(function.entry());
/// ```
pub struct AvailableExpressions;

impl Analysis for AvailableExpressions {
    type Element = Expression;
    const DIRECTION: Direction = Direction::Forward;
    const MEET: MeetOp = MeetOp::Intersect;

    fn populate(&self, instr: &Instruction, domain: &mut Domain<Expression>) {
        if let Some(expr) = Expression::from_instruction(instr) {
            domain.insert(expr);
        }
    }

    fn transfer(
        &self,
        instr: &Instruction,
        domain: &Domain<Expression>,
        incoming: &FactVector,
    ) -> Result<FactVector> {
        transfer_expressions(domain, instr, incoming, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        analysis::dataflow::Engine,
        ir::{BinaryOp, FunctionBuilder, InstrId, ValueRef},
    };

    #[test]
    fn test_self_reference_generates_then_kills() {
        // i0 = add i0, p0 — the expression is generated and immediately
        // killed, so it is not available after its own computation.
        let mut builder = FunctionBuilder::new("self_ref", 1);
        builder.create_block();
        let t = builder.binary(
            BinaryOp::Add,
            ValueRef::Instr(InstrId::new(0)),
            ValueRef::Param(0),
        );
        builder.ret(Some(t));
        let function = builder.finish().unwrap();

        let snapshot = Engine::new(&function, AvailableExpressions).run().unwrap();
        assert_eq!(snapshot.domain().len(), 1);
        assert!(!snapshot.fact(InstrId::new(0)).contains(0));
    }

    #[test]
    fn test_redefinition_kills_between_uses() {
        // The expression `add i2, p1` is computed at i1, its operand i2 is
        // defined right after, and the syntactically identical expression is
        // computed again at i3. The loop makes the in-block order meaningful:
        // i1 consumes the value i2 produced on the previous iteration.
        //
        //   bb0: br bb1                      (i0)
        //   bb1: i1 = add i2, p1
        //        i2 = sub p0, p1
        //        i3 = add i2, p1
        //        br_if p0, bb1, bb2          (i4)
        //   bb2: ret p0                      (i5)
        let mut builder = FunctionBuilder::new("redefine", 2);
        let bb0 = builder.create_block();
        let bb1 = builder.create_block();
        let bb2 = builder.create_block();

        builder.select(bb0);
        builder.branch(bb1);

        builder.select(bb1);
        let redefined = ValueRef::Instr(InstrId::new(2));
        builder.binary(BinaryOp::Add, redefined, ValueRef::Param(1));
        builder.binary(BinaryOp::Sub, ValueRef::Param(0), ValueRef::Param(1));
        builder.binary(BinaryOp::Add, redefined, ValueRef::Param(1));
        builder.cond_branch(ValueRef::Param(0), bb1, bb2);

        builder.select(bb2);
        builder.ret(Some(ValueRef::Param(0)));

        let function = builder.finish().unwrap();
        let snapshot = Engine::new(&function, AvailableExpressions).run().unwrap();

        // Two distinct expressions: [add i2, p1] and [sub p0, p1].
        assert_eq!(snapshot.domain().len(), 2);
        let expr = Expression::new(BinaryOp::Add, redefined, ValueRef::Param(1));
        let index = snapshot.domain().index_of(&expr).unwrap();

        // Available right after its first computation at i1 ...
        assert!(snapshot.fact(InstrId::new(1)).contains(index));
        // ... killed by the redefinition of i2, so NOT available where the
        // second occurrence is about to execute, despite the syntactic match.
        assert!(!snapshot.fact(InstrId::new(2)).contains(index));
        // Regenerated by the second computation.
        assert!(snapshot.fact(InstrId::new(3)).contains(index));
    }
}
