//! Program analysis infrastructure.
//!
//! Currently a single sub-module: the [`dataflow`] framework and the concrete
//! analyses built on it. The split leaves room for analyses of a different
//! shape (e.g. structural ones over the CFG) without crowding the dataflow
//! namespace.

pub mod dataflow;

// Re-export primary types at module level
pub use dataflow::{
    Analysis, AnalysisSnapshot, AnticipatedExpressions, AvailableExpressions, Direction, Domain,
    DomainElement, Engine, Expression, FactMap, FactVector, LazyCodeMotion, LiveVariables, MeetOp,
    Variable, WillBeAvailable,
};
