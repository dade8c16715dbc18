//! Anticipated expression analysis.
//!
//! An expression is *anticipated* at a program point if it will be computed
//! on every path leaving that point before any of its operands changes. This
//! is the backward dual of available expressions: same domain, same
//! generate/kill rule, direction and neighbor selection reversed. Its
//! per-instruction facts (holding *before* each instruction) are the first
//! input of the lazy code motion pipeline.

use crate::{
    analysis::dataflow::{
        domain::transfer_expressions, Analysis, Direction, Domain, Expression, FactVector, MeetOp,
    },
    ir::Instruction,
    Result,
};

/// Anticipated expression analysis (backward, intersect).
pub struct AnticipatedExpressions;

impl Analysis for AnticipatedExpressions {
    type Element = Expression;
    const DIRECTION: Direction = Direction::Backward;
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
