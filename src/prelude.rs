//! Common imports for working with liftscope.
//!
//! This module re-exports the most commonly used types from across the
//! library, allowing for convenient glob imports:
//!
//! ```rust
//! use liftscope::prelude::*;
//!
//! let mut state = StateStruct::new();
//! state.add_field("RAX", IrType::I64);
//! let module = Module::new("m", DataLayout::new(PointerSize::Bit64), state);
//! let optimizer = RegStateOptimizer::new(&module, 1, 8);
//! assert_eq!(optimizer.registers().register_count(), 1);
//! ```

pub use crate::analysis::{BlockState, OffsetMap, RegisterId, RegisterLayout};
pub use crate::ir::{
    BasicBlock, BinaryOp, BlockId, DataLayout, Function, FunctionId, IrOp, IrType, Module, Operand,
    PhiArg, PointerSize, StateField, StateStruct, ValueId,
};
pub use crate::optimizer::{CleanupPasses, CleanupPipeline, NoCleanup, RegStateOptimizer};
pub use crate::utils::BitSet;
pub use crate::{Error, Result};
