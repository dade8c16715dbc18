//! A minimal arena-form intermediate representation.
//!
//! The analyses in this crate consume a small, read-only IR surface: blocks in
//! a fixed order, instructions in program order, predecessor/successor sets,
//! operand lists, and a classification of which operations are binary and
//! which commute. This module supplies exactly that surface.
//!
//! # Design
//!
//! Everything is addressed by stable index handles:
//!
//! - [`InstrId`] / [`BlockId`] index into arenas owned by the [`Function`]
//! - [`ValueRef`] names the value an operand consumes — an instruction
//!   result, a parameter, or a constant — so equality and hashing are
//!   well-defined without borrowing into the IR
//!
//! Functions are constructed through [`FunctionBuilder`], which validates the
//! block structure and derives CFG edges from the terminators. After
//! `finish()`, every block is non-empty and ends with exactly one terminator,
//! which is what lets boundary values be read off the first/last instruction
//! of neighboring blocks without any special cases.

mod block;
mod builder;
mod function;
mod instruction;
mod opcode;
mod value;

pub use block::{BasicBlock, BlockId};
pub use builder::FunctionBuilder;
pub use function::Function;
pub use instruction::{InstrId, InstrKind, Instruction};
pub use opcode::{BinaryOp, OpAttributes};
pub use value::ValueRef;
