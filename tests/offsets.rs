//! Integration tests for pointer-offset recovery.
//!
//! Offset recovery is exercised through the public API on function shapes
//! a lifter actually produces: long field-pointer chains, casts between
//! register views, merges of equivalent pointers, and address arithmetic
//! it must refuse to guess about.

use liftscope::analysis::OffsetMap;
use liftscope::prelude::*;

fn state_function(name: &str) -> Function {
    Function::new(name, &[IrType::Ptr])
}

#[test]
fn test_deep_chain_resolves_in_one_fixed_point() {
    let mut func = state_function("chain");
    let state = func.param(0).unwrap();
    let block = func.add_block();

    // state + 8 -> cast -> +4 -> cast -> +2, then a load through it.
    let mut ptr = func.append(
        block,
        IrOp::FieldPtr {
            base: state.into(),
            offset: Operand::Const(8),
        },
        IrType::Ptr,
    );
    for displacement in [4i64, 2] {
        let cast = func.append(block, IrOp::PtrCast { value: ptr.into() }, IrType::Ptr);
        ptr = func.append(
            block,
            IrOp::FieldPtr {
                base: cast.into(),
                offset: Operand::Const(displacement),
            },
            IrType::Ptr,
        );
    }
    let load = func.append(block, IrOp::Load { ptr: ptr.into() }, IrType::I16);

    let map = OffsetMap::compute(&func);
    assert_eq!(map.get(ptr), Some(14));
    assert_eq!(map.get(load), Some(14));
    assert_eq!(map.get(state), Some(0));
}

#[test]
fn test_backward_phi_requires_iteration() {
    // The merge block precedes, in sweep order, the block that defines
    // its incoming pointer. A single sweep cannot finish; the fixed
    // point must.
    let mut func = state_function("rotated");
    let state = func.param(0).unwrap();
    let entry = func.add_block();
    let merge = func.add_block();
    let source = func.add_block();

    func.append(entry, IrOp::Br { target: source }, IrType::Void);

    let pointer = func.append(
        source,
        IrOp::FieldPtr {
            base: state.into(),
            offset: Operand::Const(16),
        },
        IrType::Ptr,
    );
    func.append(source, IrOp::Br { target: merge }, IrType::Void);

    let phi = func.append(
        merge,
        IrOp::Phi {
            incoming: vec![PhiArg::new(source, pointer.into())],
        },
        IrType::Ptr,
    );
    let view = func.append(merge, IrOp::PtrCast { value: phi.into() }, IrType::Ptr);
    let load = func.append(merge, IrOp::Load { ptr: view.into() }, IrType::I64);
    func.append(merge, IrOp::Ret { value: None }, IrType::Void);

    let map = OffsetMap::compute(&func);
    assert_eq!(map.get(pointer), Some(16));
    assert_eq!(map.get(phi), Some(16));
    assert_eq!(map.get(view), Some(16));
    assert_eq!(map.get(load), Some(16));
}

#[test]
fn test_unrelated_pointers_stay_out_of_the_map() {
    let mut func = Function::new("two_ptrs", &[IrType::Ptr, IrType::Ptr]);
    let other = func.param(1).unwrap();
    let block = func.add_block();

    // Traffic through the second argument is not register-state traffic.
    let ptr = func.append(
        block,
        IrOp::FieldPtr {
            base: other.into(),
            offset: Operand::Const(8),
        },
        IrType::Ptr,
    );
    let load = func.append(block, IrOp::Load { ptr: ptr.into() }, IrType::I64);

    let map = OffsetMap::compute(&func);
    assert!(!map.contains(other));
    assert!(!map.contains(ptr));
    assert!(!map.contains(load));
    assert_eq!(map.len(), 1); // just the state pointer itself
}

#[test]
fn test_runtime_displacement_is_conservatively_skipped() {
    let mut func = state_function("computed");
    let state = func.param(0).unwrap();
    let block = func.add_block();

    let scaled = func.append(
        block,
        IrOp::Binary {
            op: BinaryOp::Mul,
            lhs: Operand::Const(8),
            rhs: Operand::Const(3),
        },
        IrType::I64,
    );
    let ptr = func.append(
        block,
        IrOp::FieldPtr {
            base: state.into(),
            offset: scaled.into(),
        },
        IrType::Ptr,
    );
    // A further constant step from an unknown base stays unknown.
    let next = func.append(
        block,
        IrOp::FieldPtr {
            base: ptr.into(),
            offset: Operand::Const(8),
        },
        IrType::Ptr,
    );

    let map = OffsetMap::compute(&func);
    assert!(!map.contains(ptr));
    assert!(!map.contains(next));
}

#[test]
fn test_recomputation_never_changes_assigned_offsets() {
    let mut func = state_function("stable");
    let state = func.param(0).unwrap();
    let block = func.add_block();
    for i in 0..16 {
        let ptr = func.append(
            block,
            IrOp::FieldPtr {
                base: state.into(),
                offset: Operand::Const(i * 8),
            },
            IrType::Ptr,
        );
        func.append(block, IrOp::Load { ptr: ptr.into() }, IrType::I64);
    }

    let first = OffsetMap::compute(&func);
    let second = OffsetMap::compute(&func);

    assert_eq!(first.len(), second.len());
    for (value, offset) in first.iter() {
        assert_eq!(second.get(value), Some(offset));
    }
}
