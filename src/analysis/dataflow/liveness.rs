//! Live variable analysis.
//!
//! A variable is *live* at a program point if its value may still be read on
//! some path from that point before being redefined. This is a backward
//! union analysis over [`Variable`] facts:
//!
//! - `KILL` — the value this instruction defines
//! - `GEN`  — every qualifying operand this instruction reads
//!
//! The kill is applied first: "used after this point" means used by a later
//! instruction, so an instruction's own definition drops out before its
//! operand uses are added back in.

use crate::{
    analysis::dataflow::{Analysis, Direction, Domain, FactVector, MeetOp, Variable},
    ir::Instruction,
    Result,
};

/// Live variable analysis (backward, union).
///
/// Per-instruction facts hold *before* the instruction executes, i.e.
/// `fact(i)` is the set of variables live on entry to `i`.
pub struct LiveVariables;

impl Analysis for LiveVariables {
    type Element = Variable;
    const DIRECTION: Direction = Direction::Backward;
    const MEET: MeetOp = MeetOp::Union;

    fn populate(&self, instr: &Instruction, domain: &mut Domain<Variable>) {
        for operand in instr.operands() {
            if let Some(variable) = Variable::from_ref(operand) {
                domain.insert(variable);
            }
        }
    }

    fn transfer(
        &self,
        instr: &Instruction,
        domain: &Domain<Variable>,
        incoming: &FactVector,
    ) -> Result<FactVector> {
        let mut outgoing = incoming.clone();

        // Kill first: the defined value is not live above its definition.
        if let Some(defined) = instr.result() {
            if let Some(variable) = Variable::from_ref(defined) {
                if let Some(index) = domain.index_of(&variable) {
                    outgoing.clear(index);
                }
            }
        }

        // Then generate every used operand.
        for operand in instr.operands() {
            if let Some(variable) = Variable::from_ref(operand) {
                if let Some(index) = domain.index_of(&variable) {
                    outgoing.set(index);
                }
            }
        }

        Ok(outgoing)
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
    fn test_straight_line_liveness() {
        //   bb0: i0 = add p0, p1     t1 = a + b
        //        i1 = add i0, p2     t2 = t1 + c
        //        ret i1              (i2)
        let mut builder = FunctionBuilder::new("straight", 3);
        builder.create_block();
        let t1 = builder.binary(BinaryOp::Add, ValueRef::Param(0), ValueRef::Param(1));
        let t2 = builder.binary(BinaryOp::Add, t1, ValueRef::Param(2));
        builder.ret(Some(t2));
        let function = builder.finish().unwrap();

        let snapshot = Engine::new(&function, LiveVariables).run().unwrap();
        let domain = snapshot.domain();
        let index = |value: ValueRef| domain.index_of(&Variable::from_ref(value).unwrap()).unwrap();

        // Backward boundary of the block: no successors, so the union
        // identity — nothing is live at exit.
        assert!(snapshot.boundary(function.entry()).is_empty());

        // Before `ret t2` only t2 is live.
        let before_ret = snapshot.fact(InstrId::new(2));
        assert_eq!(before_ret.ones().collect::<Vec<_>>(), vec![index(t2)]);

        // Before `t2 = t1 + c`: {t1, c}.
        let before_t2 = snapshot.fact(InstrId::new(1));
        assert!(before_t2.contains(index(t1)));
        assert!(before_t2.contains(index(ValueRef::Param(2))));
        assert!(!before_t2.contains(index(t2)));
        assert_eq!(before_t2.count(), 2);

        // Before `t1 = a + b`: a and b become live, t1 is killed; c stays
        // live since it is read further down.
        let before_t1 = snapshot.fact(InstrId::new(0));
        assert!(before_t1.contains(index(ValueRef::Param(0))));
        assert!(before_t1.contains(index(ValueRef::Param(1))));
        assert!(before_t1.contains(index(ValueRef::Param(2))));
        assert!(!before_t1.contains(index(t1)));
        assert!(!before_t1.contains(index(t2)));
        assert_eq!(before_t1.count(), 3);
    }

    #[test]
    fn test_loop_keeps_value_live() {
        //   bb0: i0 = add p0, p1
        //        br bb1              (i1)
        //   bb1: i2 = add i0, p2
        //        br_if p0, bb1, bb2  (i3)
        //   bb2: ret i2              (i4)
        //
        // i0 is read on every loop iteration, so it must stay live across
        // the back edge; converging requires more than one computing sweep.
        let mut builder = FunctionBuilder::new("looped", 3);
        let bb0 = builder.create_block();
        let bb1 = builder.create_block();
        let bb2 = builder.create_block();

        builder.select(bb0);
        let t = builder.binary(BinaryOp::Add, ValueRef::Param(0), ValueRef::Param(1));
        builder.branch(bb1);

        builder.select(bb1);
        let u = builder.binary(BinaryOp::Add, t, ValueRef::Param(2));
        builder.cond_branch(ValueRef::Param(0), bb1, bb2);

        builder.select(bb2);
        builder.ret(Some(u));

        let function = builder.finish().unwrap();
        let snapshot = Engine::new(&function, LiveVariables).run().unwrap();
        let domain = snapshot.domain();
        let t_index = domain.index_of(&Variable::from_ref(t).unwrap()).unwrap();

        // Live before the loop branch: the next iteration reads it.
        assert!(snapshot.fact(InstrId::new(3)).contains(t_index));
        // Live at the loop header's entry.
        assert!(snapshot.fact(InstrId::new(2)).contains(t_index));
        // Dead above its own definition.
        assert!(!snapshot.fact(InstrId::new(0)).contains(t_index));

        assert_eq!(snapshot.sweeps(), 3);
    }
}
