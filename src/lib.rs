// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![allow(dead_code)]

//! # liftscope
//!
//! Analysis and redundancy elimination for IR produced by binary-lifting
//! front ends. Built in pure Rust, `liftscope` recovers which CPU register
//! each access to the lifted register-state structure touches and removes
//! the redundant traffic lifting inevitably produces: registers reloaded
//! right after being stored, stores overwritten before anything reads
//! them, and values bounced through memory between adjacent instructions.
//!
//! ## Background
//!
//! Lifters model the guest CPU as one flat structure — the register
//! state — passed by pointer into every lifted function. Each guest
//! instruction becomes a handful of loads and stores against that
//! structure, so the raw output is dominated by state traffic that no
//! generic optimizer can clean up without knowing which bytes belong to
//! which register. This crate supplies exactly that knowledge and the
//! local rewrites built on it:
//!
//! - **Register layout tables** ([`analysis::RegisterLayout`]) map every
//!   byte offset inside the state structure to its owning symbolic
//!   register, built once per module.
//! - **Pointer-offset recovery** ([`analysis::OffsetMap`]) runs each
//!   function to a fixed point, labeling pointer-derived values with the
//!   constant state offset they denote — through field arithmetic, casts,
//!   memory operations, and control-flow merges.
//! - **Block-local elimination** removes dead stores and forwards
//!   redundant loads within each basic block, while computing per-block
//!   liveness and kill summaries ([`analysis::BlockState`]) for later
//!   global propagation.
//! - **The driver** ([`optimizer::RegStateOptimizer`]) ties it together
//!   per function, behind a seam ([`optimizer::CleanupPipeline`]) for the
//!   generic cleanup passes expected to run first.
//!
//! Everything is conservative: calls are opaque barriers, unprovable
//! offsets are left alone, and the worst outcome of an analysis
//! limitation is a missed optimization, never a miscompile.
//!
//! ## Quick Start
//!
//! ```rust
//! use liftscope::prelude::*;
//!
//! // The register-state structure, as the front end lifted it.
//! let mut state = StateStruct::new();
//! state.add_field("RAX", IrType::I64);
//! state.add_field("RBX", IrType::I64);
//!
//! let mut module = Module::new("demo", DataLayout::new(PointerSize::Bit64), state);
//!
//! // A lifted function: store RAX twice with nothing reading in between.
//! let mut func = Function::new("sub_401000", &[IrType::Ptr]);
//! let state_ptr = func.param(0).unwrap();
//! let block = func.add_block();
//! let rax = func.append(
//!     block,
//!     IrOp::FieldPtr { base: state_ptr.into(), offset: Operand::Const(0) },
//!     IrType::Ptr,
//! );
//! func.append(
//!     block,
//!     IrOp::Store { value: Operand::Const(1), ty: IrType::I64, ptr: rax.into() },
//!     IrType::Void,
//! );
//! func.append(
//!     block,
//!     IrOp::Store { value: Operand::Const(2), ty: IrType::I64, ptr: rax.into() },
//!     IrType::Void,
//! );
//! let id = module.add_function(func);
//!
//! let optimizer = RegStateOptimizer::new(&module, 1, 8);
//! optimizer.optimize_function(&mut module, id)?;
//!
//! // The first store was dead and is gone.
//! assert_eq!(module.function(id).unwrap().instruction_count(), 2);
//! # Ok::<(), liftscope::Error>(())
//! ```
//!
//! ## Architecture
//!
//! `liftscope` is organized into focused modules:
//!
//! - [`prelude`] - Convenient re-exports of commonly used types
//! - [`ir`] - The lifted-IR data model: modules, functions, blocks,
//!   instructions, types, and the register-state description
//! - [`analysis`] - Read-only analyses: layout tables, offset recovery,
//!   liveness summaries
//! - [`optimizer`] - The mutating passes and their driver
//! - [`Error`] and [`Result`] - Error handling
//!
//! ## Scope
//!
//! The generic optimization pipeline (CFG simplification, slot promotion,
//! reassociation, combining, generic DSE/DCE) is an external collaborator
//! reached through [`optimizer::CleanupPipeline`]; this crate schedules
//! it but does not implement it. Memory outside the register-state
//! structure is never reasoned about, and the per-block summaries are
//! produced for — not yet consumed by — interprocedural liveness.

pub(crate) mod error;

/// Convenient re-exports of the most commonly used types and traits.
pub mod prelude;

/// Data model for binary-lifted IR.
///
/// Defines [`ir::Module`], [`ir::Function`], [`ir::BasicBlock`], the
/// instruction set [`ir::IrOp`], value types and the data layout, and the
/// register-state structure description the analyses are built around.
pub mod ir;

/// Read-only analyses over lifted IR.
///
/// # Key Types
///
/// - [`analysis::RegisterLayout`] - Byte-offset to register lookup tables
/// - [`analysis::OffsetMap`] - Per-function pointer-offset recovery
/// - [`analysis::BlockState`] - Per-block liveness/kill summary
pub mod analysis;

/// Transformation passes and the per-function driver.
///
/// # Key Types
///
/// - [`optimizer::RegStateOptimizer`] - The pass driver
/// - [`optimizer::CleanupPipeline`] - Seam to the generic pass pipeline
/// - [`optimizer::CleanupPasses`] - The standard cleanup set
pub mod optimizer;

/// Support structures shared across analyses and passes.
pub mod utils;

/// `liftscope` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error
/// type is always [`Error`]. Used consistently throughout the crate for
/// all fallible operations.
pub type Result<T> = std::result::Result<T, Error>;

/// `liftscope` Error type
///
/// The main error type for all operations in this crate. See [`Error`]
/// for the individual failure modes; analysis imprecision is not one of
/// them, by design.
pub use error::Error;
