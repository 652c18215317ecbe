//! The register-state optimization driver.
//!
//! [`RegStateOptimizer`] owns everything with a lifetime longer than one
//! function: the byte-level [`RegisterLayout`] built once per module, the
//! generic-pipeline collaborator, and the persistent per-block
//! [`BlockState`] store. Per function it runs, in order:
//!
//! 1. the generic cleanup pipeline, so the analysis sees a canonical
//!    function;
//! 2. pointer-offset recovery ([`OffsetMap::compute`]);
//! 3. the block-local eliminator over every block, persisting each
//!    block's liveness summary.
//!
//! The offset map is function-scoped and dropped afterwards. Summaries
//! accumulate in a concurrent map keyed by `(FunctionId, BlockId)`; the
//! driver itself processes functions one at a time, but the store's shape
//! already fits a future function-parallel driver, which would only need
//! one offset map per function in flight.

use dashmap::DashMap;

use crate::analysis::{BlockState, OffsetMap, RegisterLayout};
use crate::ir::{BlockId, DataLayout, FunctionId, Module};
use crate::optimizer::{local, CleanupPasses, CleanupPipeline, NoCleanup};
use crate::{Error, Result};

/// Driver for register-state redundancy elimination over a module's
/// functions.
pub struct RegStateOptimizer {
    registers: RegisterLayout,
    data_layout: DataLayout,
    pipeline: Box<dyn CleanupPipeline>,
    passes: CleanupPasses,
    block_states: DashMap<(FunctionId, BlockId), BlockState>,
}

impl RegStateOptimizer {
    /// Creates a driver for `module` with no generic cleanup pipeline.
    ///
    /// `estimated_functions` and `estimated_blocks` are preallocation
    /// hints only; they do not bound anything.
    #[must_use]
    pub fn new(module: &Module, estimated_functions: usize, estimated_blocks: usize) -> Self {
        Self::with_pipeline(
            module,
            estimated_functions,
            estimated_blocks,
            Box::new(NoCleanup),
        )
    }

    /// Creates a driver that runs `pipeline` before its own analysis on
    /// every function.
    #[must_use]
    pub fn with_pipeline(
        module: &Module,
        estimated_functions: usize,
        estimated_blocks: usize,
        pipeline: Box<dyn CleanupPipeline>,
    ) -> Self {
        // Every function has at least one block.
        let capacity = estimated_blocks.max(estimated_functions);
        Self {
            registers: RegisterLayout::build(module.state_struct(), module.data_layout()),
            data_layout: *module.data_layout(),
            pipeline,
            passes: CleanupPasses::all(),
            block_states: DashMap::with_capacity(capacity),
        }
    }

    /// Returns the register layout tables built for this module.
    #[must_use]
    pub const fn registers(&self) -> &RegisterLayout {
        &self.registers
    }

    /// Optimizes one function in place and records its blocks' summaries.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownFunction`] if `id` does not name a function
    /// of `module`, and [`Error::MissingStatePointer`] if the function's
    /// first argument is not a pointer.
    pub fn optimize_function(&self, module: &mut Module, id: FunctionId) -> Result<()> {
        let func = module.function_mut(id).ok_or(Error::UnknownFunction(id))?;
        if func.state_pointer().is_none() {
            return Err(Error::MissingStatePointer(func.name().to_owned()));
        }

        self.pipeline.run(func, self.passes);

        let offsets = OffsetMap::compute(func);
        for block in func.block_ids().collect::<Vec<_>>() {
            let summary =
                local::optimize_block(func, block, &offsets, &self.registers, &self.data_layout);
            self.block_states.insert((id, block), summary);
        }
        Ok(())
    }

    /// Optimizes every function of `module` in id order.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered; earlier functions stay
    /// optimized.
    pub fn optimize_module(&self, module: &mut Module) -> Result<()> {
        for id in module.function_ids().collect::<Vec<_>>() {
            self.optimize_function(module, id)?;
        }
        Ok(())
    }

    /// Returns the recorded summary for a block, if that block has been
    /// processed.
    #[must_use]
    pub fn block_state(&self, function: FunctionId, block: BlockId) -> Option<BlockState> {
        self.block_states
            .get(&(function, block))
            .map(|entry| entry.value().clone())
    }

    /// Returns the number of recorded block summaries.
    #[must_use]
    pub fn block_state_count(&self) -> usize {
        self.block_states.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::RegisterId;
    use crate::ir::{Function, IrOp, IrType, Operand, PointerSize, StateStruct};

    fn test_module() -> Module {
        let mut state = StateStruct::new();
        state.add_field("RAX", IrType::I64);
        state.add_field("RBX", IrType::I64);
        Module::new("m", DataLayout::new(PointerSize::Bit64), state)
    }

    fn double_store_function() -> Function {
        let mut func = Function::new("sub_0", &[IrType::Ptr]);
        let state = func.param(0).unwrap();
        let block = func.add_block();
        let ptr = func.append(
            block,
            IrOp::FieldPtr {
                base: Operand::Value(state),
                offset: Operand::Const(0),
            },
            IrType::Ptr,
        );
        for value in [1, 2] {
            func.append(
                block,
                IrOp::Store {
                    value: Operand::Const(value),
                    ty: IrType::I64,
                    ptr: Operand::Value(ptr),
                },
                IrType::Void,
            );
        }
        func.append(block, IrOp::Ret { value: None }, IrType::Void);
        func
    }

    #[test]
    fn test_driver_optimizes_and_records() {
        let mut module = test_module();
        let id = module.add_function(double_store_function());
        let opt = RegStateOptimizer::new(&module, 1, 4);

        opt.optimize_function(&mut module, id).unwrap();

        // One of the two stores is gone.
        let func = module.function(id).unwrap();
        assert_eq!(func.instruction_count(), 3);

        let state = opt.block_state(id, BlockId::new(0)).unwrap();
        assert!(state.is_killed(RegisterId::new(0)));
        assert_eq!(opt.block_state_count(), 1);
    }

    #[test]
    fn test_driver_whole_module() {
        let mut module = test_module();
        let a = module.add_function(double_store_function());
        let b = module.add_function(double_store_function());
        let opt = RegStateOptimizer::new(&module, 2, 8);

        opt.optimize_module(&mut module).unwrap();

        assert_eq!(opt.block_state_count(), 2);
        assert!(opt.block_state(a, BlockId::new(0)).is_some());
        assert!(opt.block_state(b, BlockId::new(0)).is_some());
    }

    #[test]
    fn test_driver_unknown_function() {
        let mut module = test_module();
        let opt = RegStateOptimizer::new(&module, 0, 0);
        let err = opt
            .optimize_function(&mut module, FunctionId::new(3))
            .unwrap_err();
        assert!(matches!(err, Error::UnknownFunction(_)));
    }

    #[test]
    fn test_driver_missing_state_pointer() {
        let mut module = test_module();
        let id = module.add_function(Function::new("broken", &[IrType::I64]));
        let opt = RegStateOptimizer::new(&module, 1, 1);
        let err = opt.optimize_function(&mut module, id).unwrap_err();
        assert!(matches!(err, Error::MissingStatePointer(name) if name == "broken"));
    }

    #[test]
    fn test_driver_runs_pipeline_first() {
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::sync::Arc;

        struct Probe(Arc<AtomicBool>);
        impl CleanupPipeline for Probe {
            fn run(&self, _func: &mut Function, passes: CleanupPasses) {
                assert_eq!(passes, CleanupPasses::all());
                self.0.store(true, Ordering::Relaxed);
            }
        }

        let ran = Arc::new(AtomicBool::new(false));
        let mut module = test_module();
        let id = module.add_function(double_store_function());
        let opt =
            RegStateOptimizer::with_pipeline(&module, 1, 1, Box::new(Probe(Arc::clone(&ran))));

        opt.optimize_function(&mut module, id).unwrap();
        assert!(ran.load(Ordering::Relaxed));
    }
}
