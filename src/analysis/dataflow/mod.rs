//! The dataflow analysis framework.
//!
//! A generic, direction-parameterized fixed-point engine over per-instruction
//! boolean fact vectors, plus the concrete analyses built on it.
//!
//! # Architecture
//!
//! The framework separates four concerns:
//!
//! - **Domain** ([`Domain`], [`Expression`], [`Variable`]) — the ordered,
//!   deduplicated universe of facts an analysis tracks
//! - **Meet** ([`MeetOp`]) — how facts from multiple control-flow neighbors
//!   combine, with the identity acting as lattice top
//! - **Traversal** ([`Direction`]) — block order, in-block order and
//!   neighbor selection, fixed per analysis
//! - **Engine** ([`Engine`], [`Analysis`]) — domain construction,
//!   initialization and sweeping to a fixed point
//!
//! # Analyses provided
//!
//! - [`AvailableExpressions`] — forward/intersect
//! - [`AnticipatedExpressions`] — backward/intersect
//! - [`WillBeAvailable`] — forward/intersect, consuming anticipated facts
//! - [`LiveVariables`] — backward/union
//! - [`LazyCodeMotion`] — the staged pipeline ending in earliest placement
//!
//! # Example
//!
//! ```rust
//! use bitflow::prelude::*;
//!
//! let mut builder = FunctionBuilder::new("example", 2);
//! builder.create_block();
//! let t = builder.binary(BinaryOp::Add, ValueRef::Param(0), ValueRef::Param(1));
//! builder.ret(Some(t));
//! let function = builder.finish()?;
//!
//! let snapshot = Engine::new(&function, AvailableExpressions).run()?;
//! assert_eq!(snapshot.domain().len(), 1);
//! # Ok::<(), bitflow::Error>(())
//! ```

mod anticipated;
mod available;
mod direction;
mod domain;
mod engine;
mod facts;
mod lcm;
mod liveness;
mod meet;
mod wbavailable;

pub use anticipated::AnticipatedExpressions;
pub use available::AvailableExpressions;
pub use direction::Direction;
pub use domain::{Domain, DomainElement, Expression, Variable};
pub use engine::{Analysis, AnalysisSnapshot, Engine};
pub use facts::{FactMap, FactVector};
pub use lcm::LazyCodeMotion;
pub use liveness::LiveVariables;
pub use meet::MeetOp;
pub use wbavailable::WillBeAvailable;
