//! Lifted functions.
//!
//! A [`Function`] owns a value table (parameters first, then instructions
//! in creation order) and a list of basic blocks referencing into that
//! table. The first parameter of a lifted function is, by front-end
//! convention, the pointer to the register-state structure.
//!
//! # Mutation model
//!
//! Passes rewrite a function in two ways:
//!
//! - [`Function::replace_all_uses`] substitutes an operand everywhere,
//!   the moral equivalent of LLVM's `replaceAllUsesWith`
//! - [`Function::remove_instructions`] erases a set of instructions from a
//!   block after a scan completes, so that no iteration is invalidated
//!   mid-scan
//!
//! Erased instructions leave their value-table slots behind as orphans;
//! the table is append-only. Nothing references an orphan once its uses
//! are replaced, and table slots are cheap.

use std::collections::HashSet;
use std::fmt;

use crate::ir::{BasicBlock, BlockId, IrOp, IrType, Operand, ValueId};

/// How a value came to exist.
#[derive(Debug, Clone, PartialEq)]
enum ValueDef {
    /// Function parameter with the given index.
    Param(u16),
    /// Result (or effect) of an instruction.
    Inst(IrOp),
}

/// One entry of the value table.
#[derive(Debug, Clone, PartialEq)]
struct ValueData {
    def: ValueDef,
    ty: IrType,
}

/// A function in lifted IR.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    name: String,
    params: Vec<ValueId>,
    values: Vec<ValueData>,
    blocks: Vec<BasicBlock>,
}

impl Function {
    /// Creates a function with the given parameter types and no blocks.
    ///
    /// Parameters become the first entries of the value table, in order.
    #[must_use]
    pub fn new(name: impl Into<String>, param_types: &[IrType]) -> Self {
        let mut func = Self {
            name: name.into(),
            params: Vec::with_capacity(param_types.len()),
            values: Vec::with_capacity(param_types.len()),
            blocks: Vec::new(),
        };
        for (index, &ty) in param_types.iter().enumerate() {
            let id = ValueId::new(func.values.len());
            func.values.push(ValueData {
                def: ValueDef::Param(index as u16),
                ty,
            });
            func.params.push(id);
        }
        func
    }

    /// Returns the function name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the parameter values, in declaration order.
    #[must_use]
    pub fn params(&self) -> &[ValueId] {
        &self.params
    }

    /// Returns the value of parameter `index`, if it exists.
    #[must_use]
    pub fn param(&self, index: usize) -> Option<ValueId> {
        self.params.get(index).copied()
    }

    /// Returns the register-state pointer: the first parameter, provided
    /// it has pointer type.
    #[must_use]
    pub fn state_pointer(&self) -> Option<ValueId> {
        let first = self.param(0)?;
        self.value_type(first).is_pointer().then_some(first)
    }

    /// Appends a new, empty basic block and returns its id.
    pub fn add_block(&mut self) -> BlockId {
        let id = BlockId::new(self.blocks.len());
        self.blocks.push(BasicBlock::new(id));
        id
    }

    /// Returns a block by id.
    #[must_use]
    pub fn block(&self, id: BlockId) -> Option<&BasicBlock> {
        self.blocks.get(id.index())
    }

    /// Returns all blocks in id order.
    #[must_use]
    pub fn blocks(&self) -> &[BasicBlock] {
        &self.blocks
    }

    /// Returns the number of blocks.
    #[must_use]
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Returns an iterator over all block ids in order.
    pub fn block_ids(&self) -> impl Iterator<Item = BlockId> + '_ {
        (0..self.blocks.len()).map(BlockId::new)
    }

    /// Appends an instruction to `block` and returns the value it defines.
    ///
    /// `ty` is the result type; instructions without a result (stores,
    /// branches) use [`IrType::Void`].
    ///
    /// # Panics
    ///
    /// Panics if `block` does not name a block of this function.
    pub fn append(&mut self, block: BlockId, op: IrOp, ty: IrType) -> ValueId {
        assert!(block.index() < self.blocks.len(), "no such block");
        let id = ValueId::new(self.values.len());
        self.values.push(ValueData {
            def: ValueDef::Inst(op),
            ty,
        });
        self.blocks[block.index()].push(id);
        id
    }

    /// Returns the operation that defines `value`, or `None` for
    /// parameters.
    #[must_use]
    pub fn op(&self, value: ValueId) -> Option<&IrOp> {
        match &self.values.get(value.index())?.def {
            ValueDef::Inst(op) => Some(op),
            ValueDef::Param(_) => None,
        }
    }

    /// Returns the type of `value`.
    ///
    /// # Panics
    ///
    /// Panics if `value` is not part of this function's value table.
    #[must_use]
    pub fn value_type(&self, value: ValueId) -> IrType {
        self.values[value.index()].ty
    }

    /// Returns the number of value-table entries (parameters included).
    #[must_use]
    pub fn value_count(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if `value` is defined by a call instruction.
    #[must_use]
    pub fn is_call(&self, value: ValueId) -> bool {
        self.op(value).is_some_and(IrOp::is_call)
    }

    /// Returns the total instruction count across all blocks.
    #[must_use]
    pub fn instruction_count(&self) -> usize {
        self.blocks.iter().map(BasicBlock::len).sum()
    }

    /// Replaces every use of `from` with the operand `to`, across the
    /// whole function.
    ///
    /// The definition of `from` itself is left in place; pair with
    /// [`Function::remove_instructions`] to erase it.
    pub fn replace_all_uses(&mut self, from: ValueId, to: Operand) {
        for data in &mut self.values {
            if let ValueDef::Inst(op) = &mut data.def {
                op.replace_uses(from, to);
            }
        }
    }

    /// Erases the given instructions from `block`.
    ///
    /// Value-table entries are kept (append-only table); only block
    /// membership is removed. Instructions not belonging to `block` are
    /// ignored.
    ///
    /// # Panics
    ///
    /// Panics if `block` does not name a block of this function.
    pub fn remove_instructions(&mut self, block: BlockId, remove: &HashSet<ValueId>) {
        assert!(block.index() < self.blocks.len(), "no such block");
        self.blocks[block.index()].retain(|v| !remove.contains(&v));
    }

    fn fmt_instruction(&self, f: &mut fmt::Formatter<'_>, value: ValueId) -> fmt::Result {
        let Some(op) = self.op(value) else {
            return Ok(());
        };
        let ty = self.value_type(value);
        if ty == IrType::Void {
            writeln!(f, "  {op}")
        } else {
            writeln!(f, "  {value} = {op} : {ty}")
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "function @{}(", self.name)?;
        for (i, &p) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{p}: {}", self.value_type(p))?;
        }
        writeln!(f, ") {{")?;
        for block in &self.blocks {
            writeln!(f, "{}:", block.id())?;
            for &value in block.instructions() {
                self.fmt_instruction(f, value)?;
            }
        }
        writeln!(f, "}}")
    }
}
