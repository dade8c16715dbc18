//! Strength reduction.
//!
//! Multiplication and division by a constant power of two become shifts:
//! `x * 8` → `x shl 3`, `x / 4` → `x shr 2`. Multiplication commutes, so the
//! constant may sit on either side; division only reduces on the right.
//! Powers below 2 are left to the algebraic identity pass.

use crate::{
    ir::{BinaryOp, Function, InstrId, InstrKind, ValueRef},
    transform::Transform,
};

/// The strength reduction pass.
pub struct StrengthReduction;

/// Returns the exponent if `n` is a power of two greater than one.
fn power_of_two(n: i64) -> Option<u32> {
    if n > 1 && (n & (n - 1)) == 0 {
        Some(n.trailing_zeros())
    } else {
        None
    }
}

impl StrengthReduction {
    fn reduce(op: BinaryOp, lhs: ValueRef, rhs: ValueRef) -> Option<InstrKind> {
        match op {
            BinaryOp::Mul => {
                let (constant, other) = match (lhs, rhs) {
                    (ValueRef::Const(c), other) | (other, ValueRef::Const(c)) => (c, other),
                    _ => return None,
                };
                let shift = power_of_two(constant)?;
                Some(InstrKind::Binary {
                    op: BinaryOp::Shl,
                    lhs: other,
                    rhs: ValueRef::Const(i64::from(shift)),
                })
            }
            BinaryOp::Div => {
                let ValueRef::Const(constant) = rhs else {
                    return None;
                };
                let shift = power_of_two(constant)?;
                Some(InstrKind::Binary {
                    op: BinaryOp::Shr,
                    lhs,
                    rhs: ValueRef::Const(i64::from(shift)),
                })
            }
            _ => None,
        }
    }
}

impl Transform for StrengthReduction {
    fn name(&self) -> &'static str {
        "strength-reduction"
    }

    fn run(&self, function: &mut Function) -> bool {
        let mut modified = false;
        for index in 0..function.instruction_count() {
            let id = InstrId::new(index);
            let Some((op, lhs, rhs)) = function.instruction(id).as_binary() else {
                continue;
            };
            if let Some(kind) = Self::reduce(op, lhs, rhs) {
                function.rewrite(id, kind);
                modified = true;
            }
        }
        modified
    }
}
