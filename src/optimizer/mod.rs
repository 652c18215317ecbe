//! Transformation passes over lifted functions.
//!
//! The centerpiece is [`RegStateOptimizer`], which drives per-function
//! optimization: generic cleanup through the [`CleanupPipeline`] seam,
//! pointer-offset recovery, then the block-local eliminator that removes
//! redundant register-state traffic and records per-block liveness
//! summaries.
//!
//! The worst outcome of any analysis limitation here is a missed
//! optimization, never a miscompile: accesses the analysis cannot prove
//! things about are left exactly as they were.

mod driver;
pub(crate) mod local;
mod pipeline;

// Re-export primary types at module level
pub use driver::RegStateOptimizer;
pub use pipeline::{CleanupPasses, CleanupPipeline, NoCleanup};
