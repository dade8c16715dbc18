//! Analysis domains and the elements that populate them.
//!
//! A domain is the ordered, deduplicated universe of facts an analysis
//! tracks; fact vectors are index-aligned to it. Two element types ship with
//! the crate: [`Expression`] (for the expression analyses) and [`Variable`]
//! (for liveness). Anything that is cloneable, printable and comparable can
//! serve as an element, so custom analyses can bring their own.

use std::fmt;

use crate::{
    analysis::dataflow::FactVector,
    ir::{BinaryOp, Instruction, ValueRef},
    Error, Result,
};

/// Requirements on a domain element.
///
/// Blanket-implemented; `PartialEq` carries the analysis's equality rule
/// (e.g. commutative-operand equality for [`Expression`]), `Display` is used
/// by the diagnostic dump.
pub trait DomainElement: Clone + fmt::Debug + fmt::Display + PartialEq {}

impl<T: Clone + fmt::Debug + fmt::Display + PartialEq> DomainElement for T {}

/// An ordered, deduplicated sequence of domain elements.
///
/// Elements keep their insertion order, which fixes the bit layout of every
/// fact vector in the run. No two elements compare equal under the element's
/// equality rule.
#[derive(Debug, Clone)]
pub struct Domain<E> {
    elements: Vec<E>,
}

impl<E: DomainElement> Domain<E> {
    /// Creates an empty domain.
    #[must_use]
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
        }
    }

    /// Inserts an element if no equal element is present, returning its
    /// index either way.
    pub fn insert(&mut self, element: E) -> usize {
        if let Some(index) = self.index_of(&element) {
            return index;
        }
        self.elements.push(element);
        self.elements.len() - 1
    }

    /// Returns the index of the element equal to `element`, if any.
    #[must_use]
    pub fn index_of(&self, element: &E) -> Option<usize> {
        self.elements.iter().position(|existing| existing == element)
    }

    /// Returns the element at the given index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&E> {
        self.elements.get(index)
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the domain has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns the elements in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &E> {
        self.elements.iter()
    }
}

impl<E: DomainElement> Default for Domain<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// A binary expression tracked by the expression analyses.
///
/// Equality is structural, with swapped operands also comparing equal when
/// the operator commutes: `add p0, p1` and `add p1, p0` are the same
/// expression, `sub p0, p1` and `sub p1, p0` are not.
#[derive(Debug, Clone, Copy)]
pub struct Expression {
    op: BinaryOp,
    lhs: ValueRef,
    rhs: ValueRef,
}

impl Expression {
    /// Creates an expression from an operator and its operands.
    #[must_use]
    pub const fn new(op: BinaryOp, lhs: ValueRef, rhs: ValueRef) -> Self {
        Self { op, lhs, rhs }
    }

    /// Extracts the expression an instruction computes, if it is a binary
    /// computation.
    #[must_use]
    pub fn from_instruction(instr: &Instruction) -> Option<Self> {
        instr
            .as_binary()
            .map(|(op, lhs, rhs)| Self::new(op, lhs, rhs))
    }

    /// Returns the operator.
    #[must_use]
    pub const fn op(&self) -> BinaryOp {
        self.op
    }

    /// Returns `true` if either operand is the given value.
    ///
    /// This is the kill test: an expression dies at the instruction defining
    /// one of its operands, because the operand's value changes there.
    #[must_use]
    pub fn references(&self, value: ValueRef) -> bool {
        self.lhs == value || self.rhs == value
    }
}

impl PartialEq for Expression {
    fn eq(&self, other: &Self) -> bool {
        if self.op != other.op {
            return false;
        }
        if self.lhs == other.lhs && self.rhs == other.rhs {
            return true;
        }
        self.op.is_commutative() && self.lhs == other.rhs && self.rhs == other.lhs
    }
}

impl Eq for Expression {}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} {}, {}]", self.op, self.lhs, self.rhs)
    }
}

/// A variable tracked by liveness: an instruction result or a parameter.
///
/// Constants never qualify. Equality is value identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Variable(ValueRef);

impl Variable {
    /// Wraps a value reference, or returns `None` for constants.
    #[must_use]
    pub fn from_ref(value: ValueRef) -> Option<Self> {
        if value.is_const() {
            None
        } else {
            Some(Self(value))
        }
    }

    /// Returns the underlying value reference.
    #[must_use]
    pub const fn value(self) -> ValueRef {
        self.0
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The shared generate/kill step of the expression analyses.
///
/// Starting from `incoming`: set the instruction's own expression, union in
/// the externally supplied facts (the will-be-available analysis passes the
/// anticipated facts here), then clear every expression whose operand is the
/// value this instruction defines. The kill comes last so that an
/// instruction consuming its own result both generates and immediately kills
/// its expression.
pub(crate) fn transfer_expressions(
    domain: &Domain<Expression>,
    instr: &Instruction,
    incoming: &FactVector,
    external: Option<&FactVector>,
) -> Result<FactVector> {
    let mut outgoing = incoming.clone();

    if let Some(expr) = Expression::from_instruction(instr) {
        if let Some(index) = domain.index_of(&expr) {
            outgoing.set(index);
        }
    }

    if let Some(external) = external {
        if external.width() != outgoing.width() {
            return Err(Error::FactWidthMismatch {
                expected: outgoing.width(),
                found: external.width(),
            });
        }
        outgoing.union_with(external);
    }

    if let Some(defined) = instr.result() {
        for (index, expr) in domain.iter().enumerate() {
            if expr.references(defined) {
                outgoing.clear(index);
            }
        }
    }

    Ok(outgoing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::InstrId;

    fn p(index: usize) -> ValueRef {
        ValueRef::Param(index)
    }

    #[test]
    fn test_commutative_equality() {
        let ab = Expression::new(BinaryOp::Add, p(0), p(1));
        let ba = Expression::new(BinaryOp::Add, p(1), p(0));
        assert_eq!(ab, ba);

        let sub_ab = Expression::new(BinaryOp::Sub, p(0), p(1));
        let sub_ba = Expression::new(BinaryOp::Sub, p(1), p(0));
        assert_ne!(sub_ab, sub_ba);
    }

    #[test]
    fn test_operator_distinguishes() {
        let add = Expression::new(BinaryOp::Add, p(0), p(1));
        let mul = Expression::new(BinaryOp::Mul, p(0), p(1));
        assert_ne!(add, mul);
    }

    #[test]
    fn test_domain_deduplicates_commutative_pairs() {
        let mut domain = Domain::new();
        let first = domain.insert(Expression::new(BinaryOp::Add, p(0), p(1)));
        let swapped = domain.insert(Expression::new(BinaryOp::Add, p(1), p(0)));
        let other = domain.insert(Expression::new(BinaryOp::Sub, p(0), p(1)));

        assert_eq!(first, swapped);
        assert_ne!(first, other);
        assert_eq!(domain.len(), 2);
        assert_eq!(
            domain.index_of(&Expression::new(BinaryOp::Add, p(1), p(0))),
            Some(0)
        );
    }

    #[test]
    fn test_variable_rejects_constants() {
        assert!(Variable::from_ref(ValueRef::Const(4)).is_none());
        assert!(Variable::from_ref(p(0)).is_some());
        assert!(Variable::from_ref(ValueRef::Instr(InstrId::new(0))).is_some());
    }

    #[test]
    fn test_display() {
        let expr = Expression::new(BinaryOp::Add, p(0), ValueRef::Instr(InstrId::new(2)));
        assert_eq!(expr.to_string(), "[add p0, i2]");

        let var = Variable::from_ref(p(1)).unwrap();
        assert_eq!(var.to_string(), "p1");
    }

    #[test]
    fn test_external_facts_width_is_checked() {
        use crate::{analysis::dataflow::FactVector, ir::Instruction, ir::InstrKind, Error};

        let mut domain = Domain::new();
        domain.insert(Expression::new(BinaryOp::Add, p(0), p(1)));

        let instr = Instruction::new(
            InstrId::new(0),
            InstrKind::Binary {
                op: BinaryOp::Add,
                lhs: p(0),
                rhs: p(1),
            },
        );
        let incoming = FactVector::new(1);
        let external = FactVector::new(3);
        let result = transfer_expressions(&domain, &instr, &incoming, Some(&external));
        assert!(matches!(
            result,
            Err(Error::FactWidthMismatch {
                expected: 1,
                found: 3
            })
        ));
    }

    #[test]
    fn test_references() {
        let expr = Expression::new(BinaryOp::Add, p(0), ValueRef::Instr(InstrId::new(2)));
        assert!(expr.references(p(0)));
        assert!(expr.references(ValueRef::Instr(InstrId::new(2))));
        assert!(!expr.references(p(1)));
    }
}
