//! Seam to the generic optimization pipeline.
//!
//! Before the register-state analysis looks at a function, a standard
//! battery of target-independent cleanups (control-flow simplification,
//! promotion of stack slots, reassociation, combining, generic dead-store
//! and dead-code elimination) is expected to have run so the function is
//! in a canonical shape. Those passes are an external collaborator: this
//! crate only names them, schedules them through a trait, and depends on
//! the run completing.
//!
//! [`NoCleanup`] is the provided implementation for standalone use and
//! tests, where the input is already canonical.

use bitflags::bitflags;

use crate::ir::Function;

bitflags! {
    /// The standard cleanup passes the driver requests before its own
    /// analysis.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct CleanupPasses: u8 {
        /// Control-flow graph simplification.
        const SIMPLIFY_CFG = 1 << 0;
        /// Promotion of stack slots to direct values.
        const PROMOTE_SLOTS = 1 << 1;
        /// Expression reassociation.
        const REASSOCIATE = 1 << 2;
        /// Instruction combining.
        const COMBINE = 1 << 3;
        /// Generic dead-store elimination.
        const DEAD_STORES = 1 << 4;
        /// Generic dead-code elimination.
        const DEAD_CODE = 1 << 5;
    }
}

/// A generic function-cleanup pipeline.
///
/// Implementations run whichever of the requested `passes` they support,
/// in their own preferred order, mutating `func` in place. The caller
/// depends only on the run completing; it never inspects the pipeline's
/// decisions.
pub trait CleanupPipeline {
    /// Runs the requested passes over `func`.
    fn run(&self, func: &mut Function, passes: CleanupPasses);
}

/// A pipeline that performs no cleanup.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCleanup;

impl CleanupPipeline for NoCleanup {
    fn run(&self, _func: &mut Function, _passes: CleanupPasses) {}
}
