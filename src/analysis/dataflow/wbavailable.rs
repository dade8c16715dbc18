//! Will-be-available expression analysis.
//!
//! The second stage of the lazy code motion pipeline. An expression *will be
//! available* at a point if it is locally generated there or already
//! anticipated — placement will have inserted it by then — and no operand
//! redefinition invalidates it. Concretely the transfer is the available
//! expression rule with one extra step between generate and kill: union in
//! the anticipated facts at the same instruction.
//!
//! The analysis runs over the *anticipated* domain, copied in at
//! construction together with the anticipated per-instruction facts. It
//! cannot be constructed before the anticipated analysis has converged,
//! because both inputs are taken from its finished
//! [`AnalysisSnapshot`](crate::analysis::dataflow::AnalysisSnapshot).

use crate::{
    analysis::dataflow::{
        domain::transfer_expressions, Analysis, AnalysisSnapshot, Direction, Domain, Expression,
        FactMap, FactVector, MeetOp,
    },
    ir::Instruction,
    Result,
};

/// Will-be-available expression analysis (forward, intersect).
///
/// Constructed from the finished anticipated snapshot; see
/// [`LazyCodeMotion`](crate::analysis::dataflow::LazyCodeMotion) for the
/// full pipeline.
pub struct WillBeAvailable {
    domain: Domain<Expression>,
    anticipated: FactMap,
}

impl WillBeAvailable {
    /// Creates the analysis from the converged anticipated snapshot.
    ///
    /// The snapshot's domain and per-instruction facts are copied, not
    /// aliased; the upstream snapshot stays untouched and reusable.
    #[must_use]
    pub fn new(anticipated: &AnalysisSnapshot<Expression>) -> Self {
        Self {
            domain: anticipated.domain().clone(),
            anticipated: anticipated.facts().clone(),
        }
    }
}

impl Analysis for WillBeAvailable {
    type Element = Expression;
    const DIRECTION: Direction = Direction::Forward;
    const MEET: MeetOp = MeetOp::Intersect;

    fn seed_domain(&self) -> Domain<Expression> {
        self.domain.clone()
    }

    fn populate(&self, _instr: &Instruction, _domain: &mut Domain<Expression>) {
        // The domain is the anticipated analysis's, supplied via seed_domain.
    }

    fn transfer(
        &self,
        instr: &Instruction,
        domain: &Domain<Expression>,
        incoming: &FactVector,
    ) -> Result<FactVector> {
        transfer_expressions(domain, instr, incoming, Some(self.anticipated.get(instr.id())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        analysis::dataflow::{AnticipatedExpressions, AvailableExpressions, Engine},
        ir::{BinaryOp, FunctionBuilder, InstrId, ValueRef},
    };

    #[test]
    fn test_anticipated_union_marks_will_be_available() {
        //   bb0: i0 = sub p0, p1
        //        i1 = mul p0, p0
        //        i2 = add i0, p1
        //        ret i2              (i3)
        //
        // [add i0, p1] dies at i0 (operand definition) and is not computed
        // again until i2. Plainly it is NOT available after i1 — but it IS
        // anticipated there, so the union marks it will-be-available.
        let mut builder = FunctionBuilder::new("resurrection", 2);
        builder.create_block();
        let a = builder.binary(BinaryOp::Sub, ValueRef::Param(0), ValueRef::Param(1));
        builder.binary(BinaryOp::Mul, ValueRef::Param(0), ValueRef::Param(0));
        let t = builder.binary(BinaryOp::Add, a, ValueRef::Param(1));
        builder.ret(Some(t));
        let function = builder.finish().unwrap();

        let anticipated = Engine::new(&function, AnticipatedExpressions).run().unwrap();
        let available = Engine::new(&function, AvailableExpressions).run().unwrap();
        let will_be = Engine::new(&function, WillBeAvailable::new(&anticipated))
            .run()
            .unwrap();

        let expr = Expression::new(BinaryOp::Add, a, ValueRef::Param(1));
        let index = anticipated.domain().index_of(&expr).unwrap();
        assert_eq!(will_be.domain().index_of(&expr), Some(index));

        let after_filler = InstrId::new(1);
        assert!(anticipated.fact(after_filler).contains(index));
        assert!(!available.fact(after_filler).contains(index));
        assert!(will_be.fact(after_filler).contains(index));

        // At the operand definition itself the expression is neither
        // anticipated nor will-be-available: the kill is applied last.
        assert!(!will_be.fact(InstrId::new(0)).contains(index));
    }

    #[test]
    fn test_domain_is_copied_not_extended() {
        // The will-be-available domain is exactly the anticipated one; no
        // population happens during its own run.
        let mut builder = FunctionBuilder::new("copied", 2);
        builder.create_block();
        builder.binary(BinaryOp::Add, ValueRef::Param(0), ValueRef::Param(1));
        let t = builder.binary(BinaryOp::Sub, ValueRef::Param(0), ValueRef::Param(1));
        builder.ret(Some(t));
        let function = builder.finish().unwrap();

        let anticipated = Engine::new(&function, AnticipatedExpressions).run().unwrap();
        let will_be = Engine::new(&function, WillBeAvailable::new(&anticipated))
            .run()
            .unwrap();
        assert_eq!(will_be.domain().len(), anticipated.domain().len());
    }
}
