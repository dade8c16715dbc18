//! Multi-instruction folding.
//!
//! Folds additions that undo a subtraction: given `a = b - t`, both
//! `c = a + t` and `c = t + a` compute `b`, so `c` becomes a copy of `b`.
//! The pattern is recognized through the operand's defining instruction, one
//! level deep.

use crate::{
    ir::{BinaryOp, Function, InstrId, InstrKind, ValueRef},
    transform::Transform,
};

/// The multi-instruction folding pass.
pub struct OperationFolding;

impl OperationFolding {
    /// If `operand` is defined as `b - t`, returns `b`.
    fn subtraction_base(function: &Function, operand: ValueRef, t: ValueRef) -> Option<ValueRef> {
        let defining = operand.as_instr()?;
        let (op, base, subtrahend) = function.instruction(defining).as_binary()?;
        if op == BinaryOp::Sub && subtrahend == t {
            Some(base)
        } else {
            None
        }
    }
}

impl Transform for OperationFolding {
    fn name(&self) -> &'static str {
        "operation-folding"
    }

    fn run(&self, function: &mut Function) -> bool {
        let mut modified = false;
        for index in 0..function.instruction_count() {
            let id = InstrId::new(index);
            let Some((BinaryOp::Add, lhs, rhs)) = function.instruction(id).as_binary() else {
                continue;
            };
            // c = a + t with a = b - t, then the mirrored c = t + a.
            let folded = Self::subtraction_base(function, lhs, rhs)
                .or_else(|| Self::subtraction_base(function, rhs, lhs));
            if let Some(src) = folded {
                function.rewrite(id, InstrKind::Copy { src });
                modified = true;
            }
        }
        modified
    }
}
