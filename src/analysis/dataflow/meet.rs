//! Meet operators over fact vectors.
//!
//! The meet combines the fact vectors flowing in from multiple control-flow
//! neighbors. Both operators are idempotent (`x ∧ x = x`), commutative and
//! associative, and each has an identity element that acts as the lattice top:
//!
//! - [`MeetOp::Intersect`] — element-wise conjunction; identity is the
//!   all-true vector (the universal set), so meeting with it cannot
//!   spuriously force a fact false before real neighbors are known.
//! - [`MeetOp::Union`] — element-wise disjunction; identity is the all-false
//!   vector (the empty set).
//!
//! The identity is only ever materialized for an *empty* neighbor set. With
//! one or more neighbors, [`MeetOp::combine_all`] folds pairwise starting
//! from the first operand without injecting the identity — seeding the fold
//! with the identity would be an invisible behavior change for any future
//! non-idempotent operator, so the rule is kept explicit here.

use crate::{
    analysis::dataflow::FactVector,
    Error, Result,
};

/// A meet operator, fixed per analysis at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeetOp {
    /// Element-wise conjunction ("must" analyses).
    Intersect,
    /// Element-wise disjunction ("may" analyses).
    Union,
}

impl MeetOp {
    /// Returns the identity ("top") vector of the given width.
    #[must_use]
    pub fn identity(self, width: usize) -> FactVector {
        match self {
            Self::Intersect => FactVector::full(width),
            Self::Union => FactVector::new(width),
        }
    }

    /// Combines two fact vectors.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MeetWidthMismatch`] if the operands have different
    /// widths.
    pub fn combine(self, lhs: &FactVector, rhs: &FactVector) -> Result<FactVector> {
        if lhs.width() != rhs.width() {
            return Err(Error::MeetWidthMismatch {
                lhs: lhs.width(),
                rhs: rhs.width(),
            });
        }
        let mut result = lhs.clone();
        match self {
            Self::Intersect => result.intersect_with(rhs),
            Self::Union => result.union_with(rhs),
        }
        Ok(result)
    }

    /// Combines any number of fact vectors.
    ///
    /// With no operands this returns `identity(width)`; otherwise it folds
    /// pairwise from the first operand (the identity is not folded in).
    ///
    /// # Errors
    ///
    /// Returns [`Error::MeetWidthMismatch`] if two operands have different
    /// widths.
    pub fn combine_all<'a, I>(self, operands: I, width: usize) -> Result<FactVector>
    where
        I: IntoIterator<Item = &'a FactVector>,
    {
        let mut iter = operands.into_iter();
        let Some(first) = iter.next() else {
            return Ok(self.identity(width));
        };
        let mut result = first.clone();
        for operand in iter {
            result = self.combine(&result, operand)?;
        }
        Ok(result)
    }
}
