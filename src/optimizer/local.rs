//! Block-local elimination of redundant register-state traffic.
//!
//! One backward pass over a basic block does three rewrites at once while
//! building the block's liveness summary:
//!
//! - **Dead-store elimination**: a full-width store whose register is
//!   overwritten again before any read is erased.
//! - **Load-to-load forwarding**: of two loads of the same register with
//!   identical result type and no intervening write, the later one is
//!   erased and its uses take the earlier load's result.
//! - **Store-to-load forwarding**: a load that follows a full-width store
//!   of the same register takes the stored value directly, provided the
//!   types match exactly.
//!
//! Two rules keep the pass conservative. A call wipes every piece of
//! local knowledge, since without interprocedural information the callee
//! may read or write any register. A store narrower than its register
//! combines with the register's incoming bytes: it revives demand on the
//! incoming value and is itself never a dead-store candidate, even when a
//! full-width store follows.
//!
//! Width classification uses data-layout store sizes, so a same-size
//! access of a different type still counts as full-width; forwarding, by
//! contrast, insists on exact type equality.
//!
//! Instructions are only marked during the scan and physically erased
//! after it completes, so the reverse walk never invalidates itself.

use std::collections::{HashMap, HashSet};

use crate::analysis::{BlockState, OffsetMap, RegisterId, RegisterLayout};
use crate::ir::{BlockId, DataLayout, Function, IrOp, IrType, Operand, ValueId};
use crate::utils::BitSet;

/// A register access the scan acts on.
enum Access {
    Load { ty: IrType },
    Store { value: Operand, ty: IrType },
}

/// Rewrites `block` in place and returns its liveness summary.
///
/// # Panics
///
/// Panics if `block` does not name a block of `func`.
pub(crate) fn optimize_block(
    func: &mut Function,
    block: BlockId,
    offsets: &OffsetMap,
    registers: &RegisterLayout,
    layout: &DataLayout,
) -> BlockState {
    let reg_count = registers.register_count();
    let mut state = BlockState::new(reg_count);

    // Registers whose most recently seen store (in reverse order) has no
    // read between it and the current instruction.
    let mut local_dead = BitSet::new(reg_count);

    // Last-seen load per register, pending as a forwarding target.
    let mut pending_loads: HashMap<RegisterId, ValueId> = HashMap::new();

    let mut to_remove: HashSet<ValueId> = HashSet::new();

    let order: Vec<ValueId> = func
        .block(block)
        .expect("no such block")
        .instructions()
        .to_vec();

    for &inst in order.iter().rev() {
        if func.is_call(inst) {
            state.reset();
            local_dead.clear();
            pending_loads.clear();
        }

        let Some(offset) = offsets.get(inst) else {
            continue;
        };
        let offset = offset as usize;
        let (Some(reg), Some(reg_size)) = (registers.register_at(offset), registers.size_at(offset))
        else {
            // Mapped, but past the end of the structure: not register
            // traffic this analysis understands.
            continue;
        };

        let access = match func.op(inst) {
            Some(IrOp::Load { .. }) => Access::Load {
                ty: func.value_type(inst),
            },
            Some(IrOp::Store { value, ty, .. }) => Access::Store {
                value: *value,
                ty: *ty,
            },
            _ => continue,
        };

        match access {
            Access::Load { ty } => {
                if let Some(&pending) = pending_loads.get(&reg) {
                    if func.value_type(pending) == ty {
                        func.replace_all_uses(pending, Operand::Value(inst));
                        to_remove.insert(pending);
                    }
                }
                pending_loads.insert(reg, inst);
                state.mark_live(reg);
                local_dead.remove(reg.index());
            }
            Access::Store { value, ty } => {
                let store_size = layout.store_size(ty);
                if store_size != reg_size {
                    // Partial write: later reads may combine these bytes
                    // with bytes this store does not cover.
                    state.mark_live(reg);
                    local_dead.remove(reg.index());
                } else if local_dead.contains(reg.index()) {
                    to_remove.insert(inst);
                } else {
                    state.clear_live(reg);
                    state.mark_killed(reg);
                    local_dead.insert(reg.index());

                    if let Some(&pending) = pending_loads.get(&reg) {
                        if func.value_type(pending) == ty {
                            func.replace_all_uses(pending, value);
                            to_remove.insert(pending);
                        }
                    }
                }
                // Any pending load is stale relative to this store.
                pending_loads.remove(&reg);
            }
        }
    }

    func.remove_instructions(block, &to_remove);
    state
}
