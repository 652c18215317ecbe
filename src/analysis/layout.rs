//! Byte-level layout of the register-state structure.
//!
//! The front end models the whole guest register file as one flat
//! aggregate. Lifted code addresses it with raw byte offsets, so the
//! analyses need to answer, for any byte inside the structure: which
//! symbolic register owns it, how wide that register is, and where it
//! starts. [`RegisterLayout`] precomputes exactly that as three parallel
//! byte-indexed tables, built once per module and read-only afterwards.
//!
//! Register ids are dense integers in field declaration order, which is
//! what lets liveness information live in plain bit-sets.

use std::fmt;

use crate::ir::{DataLayout, StateStruct};

/// Identifier of a symbolic register: one field of the register-state
/// structure, independent of its byte offset.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegisterId(usize);

impl RegisterId {
    /// Creates a register identifier from a dense index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the underlying dense index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Debug for RegisterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}

impl fmt::Display for RegisterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}

/// Byte-indexed lookup tables over the register-state structure.
///
/// For every byte offset in `[0, byte_count())` the tables record the
/// owning register, that register's full store size, and the offset at
/// which it begins. Immutable after construction.
#[derive(Debug, Clone)]
pub struct RegisterLayout {
    /// Owning register per byte offset.
    reg_of: Vec<RegisterId>,
    /// Store size of the owning register, per byte offset.
    size_of: Vec<u32>,
    /// Start offset of the owning register, per byte offset.
    start_of: Vec<u32>,
    /// Register names, indexed by dense register id.
    names: Vec<String>,
    /// Register store sizes, indexed by dense register id.
    widths: Vec<u32>,
}

impl RegisterLayout {
    /// Builds the tables from the structure description and data layout.
    ///
    /// Walks the fields in declaration order, emitting one table entry per
    /// byte of each field's store size. An empty description yields empty
    /// tables and a register count of zero.
    #[must_use]
    pub fn build(state: &StateStruct, layout: &DataLayout) -> Self {
        let total = state.total_size(layout) as usize;
        let mut tables = Self {
            reg_of: Vec::with_capacity(total),
            size_of: Vec::with_capacity(total),
            start_of: Vec::with_capacity(total),
            names: Vec::with_capacity(state.field_count()),
            widths: Vec::with_capacity(state.field_count()),
        };

        let mut cursor = 0u32;
        for (index, field) in state.fields().iter().enumerate() {
            let reg = RegisterId::new(index);
            let size = layout.store_size(field.ty());
            for _ in 0..size {
                tables.reg_of.push(reg);
                tables.size_of.push(size);
                tables.start_of.push(cursor);
            }
            tables.names.push(field.name().to_owned());
            tables.widths.push(size);
            cursor += size;
        }
        tables
    }

    /// Returns the number of symbolic registers.
    #[must_use]
    pub fn register_count(&self) -> usize {
        self.names.len()
    }

    /// Returns the total byte size of the structure.
    #[must_use]
    pub fn byte_count(&self) -> usize {
        self.reg_of.len()
    }

    /// Returns the register owning the byte at `offset`, or `None` if the
    /// offset falls outside the structure.
    #[must_use]
    pub fn register_at(&self, offset: usize) -> Option<RegisterId> {
        self.reg_of.get(offset).copied()
    }

    /// Returns the store size of the register owning the byte at `offset`.
    #[must_use]
    pub fn size_at(&self, offset: usize) -> Option<u32> {
        self.size_of.get(offset).copied()
    }

    /// Returns the start offset of the register owning the byte at
    /// `offset`.
    #[must_use]
    pub fn start_at(&self, offset: usize) -> Option<u32> {
        self.start_of.get(offset).copied()
    }

    /// Returns a register's name.
    #[must_use]
    pub fn register_name(&self, reg: RegisterId) -> Option<&str> {
        self.names.get(reg.index()).map(String::as_str)
    }

    /// Returns a register's store size.
    #[must_use]
    pub fn register_size(&self, reg: RegisterId) -> Option<u32> {
        self.widths.get(reg.index()).copied()
    }
}
