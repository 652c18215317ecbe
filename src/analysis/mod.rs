//! Analyses over lifted IR.
//!
//! Three read-only building blocks feed the optimizer:
//!
//! - [`RegisterLayout`] — byte-indexed tables mapping any offset inside
//!   the register-state structure to its owning symbolic register, built
//!   once per module
//! - [`OffsetMap`] — per-function fixed-point recovery of which constant
//!   state-structure offset each pointer-derived value denotes
//! - [`BlockState`] — per-block liveness/kill summary produced by the
//!   backward scan and persisted for later global propagation
//!
//! # Thread Safety
//!
//! All types in this module are `Send` and `Sync`. The layout tables are
//! immutable after construction and safe to share across threads.

mod layout;
mod liveness;
mod offsets;

// Re-export primary types at module level
pub use layout::{RegisterId, RegisterLayout};
pub use liveness::BlockState;
pub use offsets::OffsetMap;
