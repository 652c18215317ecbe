//! Modules: the unit a lifting front end hands over for optimization.
//!
//! A module bundles the target [`DataLayout`], the register-state
//! structure description, and the lifted functions. Functions get a
//! [`FunctionId`] on insertion; `(FunctionId, BlockId)` pairs identify
//! blocks uniquely across the whole module, which is what the persistent
//! per-block summaries are keyed by.

use std::fmt;

use crate::ir::{DataLayout, Function, StateStruct};

/// Identifier of a function within one module.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FunctionId(usize);

impl FunctionId {
    /// Creates a function identifier from an index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the underlying index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Debug for FunctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "f{}", self.0)
    }
}

impl fmt::Display for FunctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "f{}", self.0)
    }
}

/// A module of lifted functions plus the context they were lifted against.
#[derive(Debug, Clone)]
pub struct Module {
    name: String,
    data_layout: DataLayout,
    state: StateStruct,
    functions: Vec<Function>,
}

impl Module {
    /// Creates an empty module.
    ///
    /// `state` is the register-state structure description the front end
    /// lifted against; it is fixed for the module's lifetime.
    #[must_use]
    pub fn new(name: impl Into<String>, data_layout: DataLayout, state: StateStruct) -> Self {
        Self {
            name: name.into(),
            data_layout,
            state,
            functions: Vec::new(),
        }
    }

    /// Returns the module name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the target data layout.
    #[must_use]
    pub const fn data_layout(&self) -> &DataLayout {
        &self.data_layout
    }

    /// Returns the register-state structure description.
    #[must_use]
    pub const fn state_struct(&self) -> &StateStruct {
        &self.state
    }

    /// Adds a function and returns its id.
    pub fn add_function(&mut self, function: Function) -> FunctionId {
        let id = FunctionId::new(self.functions.len());
        self.functions.push(function);
        id
    }

    /// Returns a function by id.
    #[must_use]
    pub fn function(&self, id: FunctionId) -> Option<&Function> {
        self.functions.get(id.index())
    }

    /// Returns a mutable function by id.
    pub fn function_mut(&mut self, id: FunctionId) -> Option<&mut Function> {
        self.functions.get_mut(id.index())
    }

    /// Returns all functions in id order.
    #[must_use]
    pub fn functions(&self) -> &[Function] {
        &self.functions
    }

    /// Returns the number of functions.
    #[must_use]
    pub fn function_count(&self) -> usize {
        self.functions.len()
    }

    /// Returns an iterator over all function ids in order.
    pub fn function_ids(&self) -> impl Iterator<Item = FunctionId> + '_ {
        (0..self.functions.len()).map(FunctionId::new)
    }
}
