//! Pointer-offset recovery for the register-state structure.
//!
//! Lifted code reaches registers through chains of field pointers, casts,
//! and control-flow merges rooted at the function's state-pointer
//! argument. [`OffsetMap::compute`] runs those chains to a fixed point and
//! records, per value, the constant byte offset into the structure it
//! denotes.
//!
//! The map is a conservative under-approximation: every entry is a true
//! constant offset, but a value whose displacement cannot be proven
//! constant simply stays absent. Absence is not an error; the eliminator
//! treats unmapped accesses as opaque. Loads and stores are entered under
//! their own id as well — a load "is" the value of the register region it
//! reads, and a store's entry serves as a lookup key for its destination.
//!
//! Entries are monotonic: once assigned, an offset never changes, so the
//! sweep terminates after at most one pass per instruction.

use std::collections::HashMap;

use crate::ir::{Function, IrOp, Operand, ValueId};

/// Map from values to their constant byte offsets into the register-state
/// structure.
///
/// Function-scoped; computed per function and discarded once its blocks
/// have been processed.
#[derive(Debug, Clone, Default)]
pub struct OffsetMap {
    offsets: HashMap<ValueId, u32>,
}

impl OffsetMap {
    /// Computes offsets for `func` by iterating to a fixed point.
    ///
    /// The function's state-pointer argument is seeded at offset zero; a
    /// function without one yields an empty map.
    #[must_use]
    pub fn compute(func: &Function) -> Self {
        let mut map = Self::default();
        let Some(state_ptr) = func.state_pointer() else {
            return map;
        };
        map.offsets.insert(state_ptr, 0);

        let mut made_progress = true;
        while made_progress {
            made_progress = false;
            for block in func.blocks() {
                for &inst in block.instructions() {
                    if map.offsets.contains_key(&inst) {
                        continue;
                    }
                    if let Some(offset) = map.transfer(func, inst) {
                        map.offsets.insert(inst, offset);
                        made_progress = true;
                    }
                }
            }
        }
        map
    }

    /// Offset contribution of a single instruction, if derivable from the
    /// entries present so far.
    fn transfer(&self, func: &Function, inst: ValueId) -> Option<u32> {
        match func.op(inst)? {
            IrOp::FieldPtr { base, offset } => {
                let base_offset = self.get(base.as_value()?)?;
                // Only compile-time-constant, in-range displacements are
                // usable; anything else leaves the pointer unmapped for
                // good, since the displacement never changes across
                // sweeps.
                let displacement = u32::try_from(offset.as_const()?).ok()?;
                base_offset.checked_add(displacement)
            }
            IrOp::PtrCast { value } => self.get(value.as_value()?),
            IrOp::Load { ptr } => self.get(ptr.as_value()?),
            IrOp::Store { ptr, .. } => self.get(ptr.as_value()?),
            IrOp::Phi { incoming } => {
                if !func.value_type(inst).is_pointer() {
                    return None;
                }
                let known = incoming
                    .iter()
                    .find_map(|arg| self.get(arg.value().as_value()?))?;
                // The front end guarantees all live incoming pointers at a
                // merge denote the same register region; catch violations
                // in debug builds instead of silently trusting them.
                debug_assert!(
                    incoming
                        .iter()
                        .filter_map(|arg| self.get(arg.value().as_value()?))
                        .all(|offset| offset == known),
                    "divergent register offsets reach a merge in {}",
                    func.name()
                );
                Some(known)
            }
            _ => None,
        }
    }

    /// Returns the offset recorded for `value`, if any.
    #[must_use]
    pub fn get(&self, value: ValueId) -> Option<u32> {
        self.offsets.get(&value).copied()
    }

    /// Returns `true` if `value` has a recorded offset.
    #[must_use]
    pub fn contains(&self, value: ValueId) -> bool {
        self.offsets.contains_key(&value)
    }

    /// Returns the number of mapped values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Returns `true` if no values are mapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Returns an iterator over `(value, offset)` entries, in no
    /// particular order.
    pub fn iter(&self) -> impl Iterator<Item = (ValueId, u32)> + '_ {
        self.offsets.iter().map(|(&v, &o)| (v, o))
    }
}
