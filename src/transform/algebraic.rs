//! Algebraic identity simplification.
//!
//! Rewrites computations whose constant operand makes them trivial:
//!
//! - `x + 0` / `0 + x` → `x`
//! - `x - 0` → `x`
//! - `x * 1` / `1 * x` → `x`
//! - `x * 0` / `0 * x` → `0`
//! - `x / 1` → `x`

use crate::{
    ir::{BinaryOp, Function, InstrId, InstrKind, ValueRef},
    transform::Transform,
};

/// The algebraic identity pass.
pub struct AlgebraicIdentity;

impl AlgebraicIdentity {
    fn simplify(op: BinaryOp, lhs: ValueRef, rhs: ValueRef) -> Option<ValueRef> {
        match op {
            BinaryOp::Add => match (lhs, rhs) {
                (ValueRef::Const(0), other) | (other, ValueRef::Const(0)) => Some(other),
                _ => None,
            },
            BinaryOp::Sub => match rhs {
                ValueRef::Const(0) => Some(lhs),
                _ => None,
            },
            BinaryOp::Mul => match (lhs, rhs) {
                (ValueRef::Const(1), other) | (other, ValueRef::Const(1)) => Some(other),
                (ValueRef::Const(0), _) | (_, ValueRef::Const(0)) => Some(ValueRef::Const(0)),
                _ => None,
            },
            BinaryOp::Div => match rhs {
                ValueRef::Const(1) => Some(lhs),
                _ => None,
            },
            _ => None,
        }
    }
}

impl Transform for AlgebraicIdentity {
    fn name(&self) -> &'static str {
        "algebraic-identity"
    }

    fn run(&self, function: &mut Function) -> bool {
        let mut modified = false;
        for index in 0..function.instruction_count() {
            let id = InstrId::new(index);
            let Some((op, lhs, rhs)) = function.instruction(id).as_binary() else {
                continue;
            };
            if let Some(src) = Self::simplify(op, lhs, rhs) {
                function.rewrite(id, InstrKind::Copy { src });
                modified = true;
            }
        }
        modified
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::FunctionBuilder;

    fn simplified(op: BinaryOp, lhs: ValueRef, rhs: ValueRef) -> InstrKind {
        let mut builder = FunctionBuilder::new("candidate", 1);
        builder.create_block();
        let t = builder.binary(op, lhs, rhs);
        builder.ret(Some(t));
        let mut function = builder.finish().unwrap();

        assert!(AlgebraicIdentity.run(&mut function));
        *function.instruction(InstrId::new(0)).kind()
    }

    #[test]
    fn test_additive_identity() {
        let x = ValueRef::Param(0);
        let zero = ValueRef::Const(0);
        assert_eq!(
            simplified(BinaryOp::Add, x, zero),
            InstrKind::Copy { src: x }
        );
        assert_eq!(
            simplified(BinaryOp::Add, zero, x),
            InstrKind::Copy { src: x }
        );
        assert_eq!(
            simplified(BinaryOp::Sub, x, zero),
            InstrKind::Copy { src: x }
        );
    }

    #[test]
    fn test_multiplicative_identity_and_absorber() {
        let x = ValueRef::Param(0);
        assert_eq!(
            simplified(BinaryOp::Mul, x, ValueRef::Const(1)),
            InstrKind::Copy { src: x }
        );
        assert_eq!(
            simplified(BinaryOp::Mul, ValueRef::Const(1), x),
            InstrKind::Copy { src: x }
        );
        assert_eq!(
            simplified(BinaryOp::Mul, x, ValueRef::Const(0)),
            InstrKind::Copy {
                src: ValueRef::Const(0)
            }
        );
        assert_eq!(
            simplified(BinaryOp::Div, x, ValueRef::Const(1)),
            InstrKind::Copy { src: x }
        );
    }

    #[test]
    fn test_non_trivial_left_alone() {
        let mut builder = FunctionBuilder::new("kept", 2);
        builder.create_block();
        let t = builder.binary(BinaryOp::Add, ValueRef::Param(0), ValueRef::Param(1));
        // 0 - x is not an identity; only the right operand cancels for sub.
        builder.binary(BinaryOp::Sub, ValueRef::Const(0), ValueRef::Param(0));
        builder.ret(Some(t));
        let mut function = builder.finish().unwrap();

        assert!(!AlgebraicIdentity.run(&mut function));
        assert!(function.instruction(InstrId::new(0)).as_binary().is_some());
        assert!(function.instruction(InstrId::new(1)).as_binary().is_some());
    }
}
