//! Value identities and operands.
//!
//! Every function parameter and every instruction defines a value, named by
//! a [`ValueId`] into the function's value table. Instruction operands are
//! either a value reference or an immediate constant; keeping both in one
//! [`Operand`] type lets a rewrite replace a value use with a constant (or
//! another value) uniformly, which the forwarding transformations rely on.

use std::fmt;

/// Identifier of a value within one function.
///
/// A lightweight index into the function's value table. Not meaningful
/// across functions.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ValueId(usize);

impl ValueId {
    /// Creates a value identifier from a table index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the underlying table index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Debug for ValueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl fmt::Display for ValueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// An instruction operand: a value reference or an immediate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operand {
    /// Reference to a value defined elsewhere in the function.
    Value(ValueId),
    /// Immediate integer constant.
    Const(i64),
}

impl Operand {
    /// Returns `true` if this operand references a value.
    #[must_use]
    pub const fn is_value(self) -> bool {
        matches!(self, Self::Value(_))
    }

    /// Returns `true` if this operand is an immediate constant.
    #[must_use]
    pub const fn is_const(self) -> bool {
        matches!(self, Self::Const(_))
    }

    /// Returns the referenced value, if any.
    #[must_use]
    pub const fn as_value(self) -> Option<ValueId> {
        match self {
            Self::Value(v) => Some(v),
            Self::Const(_) => None,
        }
    }

    /// Returns the immediate constant, if any.
    #[must_use]
    pub const fn as_const(self) -> Option<i64> {
        match self {
            Self::Const(c) => Some(c),
            Self::Value(_) => None,
        }
    }
}

impl From<ValueId> for Operand {
    fn from(value: ValueId) -> Self {
        Self::Value(value)
    }
}

impl From<i64> for Operand {
    fn from(value: i64) -> Self {
        Self::Const(value)
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => write!(f, "{v}"),
            Self::Const(c) => write!(f, "{c}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_id_roundtrip() {
        let id = ValueId::new(12);
        assert_eq!(id.index(), 12);
        assert_eq!(id.to_string(), "v12");
    }

    #[test]
    fn test_operand_accessors() {
        let v = Operand::Value(ValueId::new(3));
        let c = Operand::Const(-8);

        assert!(v.is_value());
        assert_eq!(v.as_value(), Some(ValueId::new(3)));
        assert_eq!(v.as_const(), None);

        assert!(c.is_const());
        assert_eq!(c.as_const(), Some(-8));
        assert_eq!(c.as_value(), None);
    }

    #[test]
    fn test_operand_from() {
        let o: Operand = ValueId::new(1).into();
        assert!(o.is_value());
        let o: Operand = 42i64.into();
        assert_eq!(o.to_string(), "42");
    }
}
