//! Binary operators and their algebraic attributes.
//!
//! The analyses in this crate only need to know two things about an operator:
//! its identity (for expression equality) and whether it commutes (so that
//! `a + b` and `b + a` compare equal). Attributes are exposed as a
//! [`bitflags`]-backed set rather than ad-hoc predicates so additional
//! properties can be added without touching call sites.

use strum::{Display, EnumIter};

bitflags::bitflags! {
    /// Algebraic attributes of a [`BinaryOp`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct OpAttributes: u8 {
        /// `a op b == b op a`.
        const COMMUTATIVE = 1;
        /// `(a op b) op c == a op (b op c)`.
        const ASSOCIATIVE = 1 << 1;
    }
}

/// A two-operand arithmetic or bitwise operator.
///
/// The mnemonic rendered by [`Display`](std::fmt::Display) matches the textual
/// IR form, e.g. `i2 = add p0, p1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum BinaryOp {
    /// Integer addition.
    Add,
    /// Integer subtraction.
    Sub,
    /// Integer multiplication.
    Mul,
    /// Integer division.
    Div,
    /// Integer remainder.
    Rem,
    /// Bitwise and.
    And,
    /// Bitwise or.
    Or,
    /// Bitwise exclusive or.
    Xor,
    /// Shift left.
    Shl,
    /// Shift right.
    Shr,
}

impl BinaryOp {
    /// Returns the algebraic attributes of this operator.
    #[must_use]
    pub const fn attributes(self) -> OpAttributes {
        match self {
            Self::Add | Self::Mul | Self::And | Self::Or | Self::Xor => {
                OpAttributes::COMMUTATIVE.union(OpAttributes::ASSOCIATIVE)
            }
            Self::Sub | Self::Div | Self::Rem | Self::Shl | Self::Shr => OpAttributes::empty(),
        }
    }

    /// Returns `true` if operand order does not matter for this operator.
    ///
    /// Commutativity feeds directly into
    /// [`Expression`](crate::analysis::dataflow::Expression) equality: two
    /// expressions with a commutative operator and swapped operands denote the
    /// same computation.
    #[must_use]
    pub const fn is_commutative(self) -> bool {
        self.attributes().contains(OpAttributes::COMMUTATIVE)
    }
}
