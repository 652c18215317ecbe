//! Support structures shared across analyses and passes.

mod bitset;

pub use bitset::{BitSet, Indices};
