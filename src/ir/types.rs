//! Value types, the target data layout, and the register-state structure
//! description.
//!
//! Lifted IR is lightly typed: values are machine integers, floats, or
//! pointers into guest state. The [`DataLayout`] is the single authority for
//! how many bytes a value of a given type occupies in memory; every size
//! comparison in the analyses goes through it so that same-size accesses of
//! different types are still classified as full-width (store sizes, never
//! bit widths).
//!
//! The [`StateStruct`] describes the flat register-state aggregate the
//! front end threads through every lifted function: an ordered list of
//! named fields, one per CPU register. Field order defines the dense
//! symbolic register numbering used everywhere else.

use std::fmt;

/// Width of guest pointers under a [`DataLayout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerSize {
    /// 32-bit pointers.
    Bit32,
    /// 64-bit pointers.
    Bit64,
}

impl PointerSize {
    /// Returns the pointer width in bytes.
    #[must_use]
    pub const fn bytes(self) -> u32 {
        match self {
            Self::Bit32 => 4,
            Self::Bit64 => 8,
        }
    }
}

/// A primitive IR value type.
///
/// `I128` covers 16-byte vector register fields; `Ptr` is an untyped
/// pointer whose width comes from the data layout. `Void` is the result
/// type of instructions that produce no value (stores, branches).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IrType {
    /// No value.
    Void,
    /// 8-bit integer.
    I8,
    /// 16-bit integer.
    I16,
    /// 32-bit integer.
    I32,
    /// 64-bit integer.
    I64,
    /// 128-bit integer (vector register fields).
    I128,
    /// 32-bit float.
    F32,
    /// 64-bit float.
    F64,
    /// Pointer.
    Ptr,
}

impl IrType {
    /// Returns `true` if this is the pointer type.
    #[must_use]
    pub const fn is_pointer(self) -> bool {
        matches!(self, Self::Ptr)
    }

    /// Returns `true` if this is an integer type.
    #[must_use]
    pub const fn is_integer(self) -> bool {
        matches!(self, Self::I8 | Self::I16 | Self::I32 | Self::I64 | Self::I128)
    }

    /// Returns `true` if this is a floating-point type.
    #[must_use]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }
}

impl fmt::Display for IrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Void => "void",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::I128 => "i128",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Ptr => "ptr",
        };
        write!(f, "{name}")
    }
}

/// The target data layout.
///
/// Carried on the [`Module`](crate::ir::Module); consulted wherever an
/// access width matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataLayout {
    pointer: PointerSize,
}

impl DataLayout {
    /// Creates a data layout with the given pointer width.
    #[must_use]
    pub const fn new(pointer: PointerSize) -> Self {
        Self { pointer }
    }

    /// Returns the pointer width.
    #[must_use]
    pub const fn pointer_size(&self) -> PointerSize {
        self.pointer
    }

    /// Returns the number of bytes a stored value of type `ty` occupies.
    ///
    /// `Void` has store size zero.
    #[must_use]
    pub const fn store_size(&self, ty: IrType) -> u32 {
        match ty {
            IrType::Void => 0,
            IrType::I8 => 1,
            IrType::I16 => 2,
            IrType::I32 | IrType::F32 => 4,
            IrType::I64 | IrType::F64 => 8,
            IrType::I128 => 16,
            IrType::Ptr => self.pointer.bytes(),
        }
    }
}

/// One field of the register-state structure: a named CPU register slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateField {
    name: String,
    ty: IrType,
}

impl StateField {
    /// Creates a field with the given register name and storage type.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: IrType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }

    /// Returns the register name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the field's storage type.
    #[must_use]
    pub const fn ty(&self) -> IrType {
        self.ty
    }
}

/// Ordered description of the register-state structure.
///
/// Supplied by the lifting front end. Field declaration order is
/// significant: it fixes both the byte layout of the structure and the
/// dense symbolic register numbering derived from it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateStruct {
    fields: Vec<StateField>,
}

impl StateStruct {
    /// Creates an empty description.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field, keeping declaration order.
    pub fn add_field(&mut self, name: impl Into<String>, ty: IrType) {
        self.fields.push(StateField::new(name, ty));
    }

    /// Returns the fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[StateField] {
        &self.fields
    }

    /// Returns the number of fields.
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if no fields have been declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the total store size of the structure under `layout`.
    #[must_use]
    pub fn total_size(&self, layout: &DataLayout) -> u32 {
        self.fields.iter().map(|f| layout.store_size(f.ty())).sum()
    }
}
