//! Data model for binary-lifted IR.
//!
//! This is the representation the lifting front end produces and the
//! analyses in [`crate::analysis`] and [`crate::optimizer`] consume: a
//! [`Module`] of [`Function`]s, each a set of [`BasicBlock`]s over a flat
//! value table, typed by [`IrType`] under a [`DataLayout`].
//!
//! The register-state structure that every lifted function receives by
//! pointer is described by [`StateStruct`]; its ordered fields define the
//! symbolic register numbering used by the analyses.
//!
//! # Thread Safety
//!
//! All types in this module are `Send` and `Sync`.

mod block;
mod function;
mod instruction;
mod module;
mod types;
mod value;

// Re-export primary types at module level
pub use block::{BasicBlock, BlockId};
pub use function::Function;
pub use instruction::{BinaryOp, IrOp, PhiArg};
pub use module::{FunctionId, Module};
pub use types::{DataLayout, IrType, PointerSize, StateField, StateStruct};
pub use value::{Operand, ValueId};
