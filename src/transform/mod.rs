//! Local rewrite passes.
//!
//! Stateless, single-sweep peephole rewrites over a [`Function`]. They are
//! deliberately independent of the dataflow core: each pass inspects one
//! instruction at a time (plus, for folding, the definitions of its
//! operands) and rewrites the instruction in place, never touching the block
//! structure. Simplified instructions become [`Copy`](crate::ir::InstrKind::Copy)
//! instructions so downstream consumers keep a valid value to reference.
//!
//! # Passes
//!
//! - [`AlgebraicIdentity`] — `x + 0`, `x * 1`, `x - 0`, `x / 1`, `x * 0`
//! - [`StrengthReduction`] — multiply/divide by a power of two into shifts
//! - [`OperationFolding`] — `a = b - t; c = a + t` folds to `c = b`
//!
//! # Example
//!
//! ```rust
//! use bitflow::ir::{BinaryOp, FunctionBuilder, ValueRef};
//! use bitflow::transform::run_local_optimizations;
//!
//! let mut builder = FunctionBuilder::new("wasteful", 1);
//! builder.create_block();
//! let t = builder.binary(BinaryOp::Add, ValueRef::Param(0), ValueRef::Const(0));
//! builder.ret(Some(t));
//! let mut function = builder.finish()?;
//!
//! assert!(run_local_optimizations(&mut function));
//! # Ok::<(), bitflow::Error>(())
//! ```

mod algebraic;
mod folding;
mod strength;

pub use algebraic::AlgebraicIdentity;
pub use folding::OperationFolding;
pub use strength::StrengthReduction;

use crate::ir::Function;

/// A local rewrite pass.
pub trait Transform {
    /// A short, stable name for reporting.
    fn name(&self) -> &'static str;

    /// Runs the pass over a function, returning `true` if anything was
    /// rewritten.
    fn run(&self, function: &mut Function) -> bool;
}

/// Runs every local optimization once, in order, returning `true` if any
/// pass rewrote something.
pub fn run_local_optimizations(function: &mut Function) -> bool {
    let passes: [&dyn Transform; 3] = [&AlgebraicIdentity, &StrengthReduction, &OperationFolding];
    let mut modified = false;
    for pass in passes {
        modified |= pass.run(function);
    }
    modified
}
