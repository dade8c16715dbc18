#![doc(html_no_source)]
#![deny(missing_docs)]

//! # bitflow
//!
//! A direction-parameterized iterative dataflow-analysis engine for a
//! control-flow-graph IR, together with the staged analyses of Lazy Code
//! Motion. Built in pure Rust with no runtime dependencies beyond error
//! derivation.
//!
//! ## Features
//!
//! - **Generic fixed-point engine** — supply a domain-population rule, a
//!   transfer function, a direction and a meet operator; the engine handles
//!   initialization, boundary values, sweeping and convergence detection
//! - **Word-packed fact vectors** — boolean facts stored 64 to the word,
//!   index-aligned to an insertion-ordered, deduplicated domain
//! - **Four ready-made analyses** — available expressions, anticipated
//!   expressions, will-be-available expressions and live variables
//! - **Staged pipelines** — finished analyses export read-only snapshots
//!   that later stages consume, culminating in earliest-placement sets
//! - **Local rewrites** — algebraic identities, strength reduction and
//!   multi-instruction folding over the same IR
//!
//! ## Quick Start
//!
//! Build a function through the [`ir::FunctionBuilder`], then run an analysis:
//!
//! ```rust
//! use bitflow::prelude::*;
//!
//! // t1 = a + b; t2 = t1 + c; return t2
//! let mut builder = FunctionBuilder::new("sum3", 3);
//! builder.create_block();
//! let t1 = builder.binary(BinaryOp::Add, ValueRef::Param(0), ValueRef::Param(1));
//! let t2 = builder.binary(BinaryOp::Add, t1, ValueRef::Param(2));
//! builder.ret(Some(t2));
//! let function = builder.finish()?;
//!
//! let live = Engine::new(&function, LiveVariables).run()?;
//!
//! // Nothing is live at function exit.
//! assert!(live.boundary(function.entry()).is_empty());
//! # Ok::<(), bitflow::Error>(())
//! ```
//!
//! Or run the whole lazy code motion pipeline:
//!
//! ```rust
//! # use bitflow::prelude::*;
//! # let mut builder = FunctionBuilder::new("sum", 2);
//! # builder.create_block();
//! # let t = builder.binary(BinaryOp::Add, ValueRef::Param(0), ValueRef::Param(1));
//! # builder.ret(Some(t));
//! # let function = builder.finish()?;
//! let lcm = LazyCodeMotion::analyze(&function)?;
//! assert!(lcm.earliest(function.entry()).is_empty());
//! # Ok::<(), bitflow::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`ir`] — a minimal arena-form IR: functions, blocks, instructions and
//!   stable value handles, constructed through a validating builder
//! - [`analysis`] — the dataflow framework (domain, meet, traversal, engine)
//!   and the concrete analyses
//! - [`transform`] — stateless local rewrite passes
//! - [`prelude`] — curated re-exports of the common types
//! - [`Error`] and [`Result`] — crate-wide error handling
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T, Error>`](Result). Structural
//! problems are reported when a function is built; analysis-contract
//! violations (mismatched fact-vector widths, a capped run that fails to
//! converge) abort the run with a diagnostic naming the broken invariant:
//!
//! ```rust
//! use bitflow::{Error, ir::FunctionBuilder};
//!
//! let builder = FunctionBuilder::new("empty", 0);
//! match builder.finish() {
//!     Err(Error::EmptyFunction) => {}
//!     other => panic!("expected EmptyFunction, got {other:?}"),
//! }
//! ```

pub(crate) mod error;

pub mod analysis;
pub mod ir;
pub mod prelude;
pub mod transform;

pub use error::{Error, Result};
