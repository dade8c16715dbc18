//! # bitflow Prelude
//!
//! Convenient re-exports of the most commonly used types and traits. Import
//! this module to get quick access to everything needed for building IR,
//! running analyses and applying the local rewrite passes.
//!
//! ```rust,no_run
//! use bitflow::prelude::*;
//! ```

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all bitflow operations
pub use crate::Error;

/// The result type used throughout bitflow
pub use crate::Result;

// ================================================================================================
// Intermediate Representation
// ================================================================================================

/// IR construction and inspection
pub use crate::ir::{
    BasicBlock, BinaryOp, BlockId, Function, FunctionBuilder, InstrId, InstrKind, Instruction,
    OpAttributes, ValueRef,
};

// ================================================================================================
// Dataflow Framework
// ================================================================================================

/// The fixed-point engine and its building blocks
pub use crate::analysis::dataflow::{
    Analysis, AnalysisSnapshot, Direction, Domain, DomainElement, Engine, FactMap, FactVector,
    MeetOp,
};

/// Domain elements of the shipped analyses
pub use crate::analysis::dataflow::{Expression, Variable};

/// The concrete analyses and the lazy code motion pipeline
pub use crate::analysis::dataflow::{
    AnticipatedExpressions, AvailableExpressions, LazyCodeMotion, LiveVariables, WillBeAvailable,
};

// ================================================================================================
// Local Rewrites
// ================================================================================================

/// The local rewrite passes
pub use crate::transform::{
    run_local_optimizations, AlgebraicIdentity, OperationFolding, StrengthReduction, Transform,
};
