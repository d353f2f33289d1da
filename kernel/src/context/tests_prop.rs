//! Property tests for continuation layout.

use super::stack::{overflow_args, EntryFrame, SLOT_SIZE};
use super::switch::start_context_addr;
use super::{make_context, ContextError, ContextStack, ExecutionContext};
use crate::common::TaskId;
use proptest::prelude::*;

extern "C" fn target() {}

proptest! {
    #[test]
    fn entry_rsp_is_call_aligned_and_inside(slots in 4usize..2048, argc in 0usize..16) {
        let stack = ContextStack::new(slots * 8);
        match EntryFrame::plan(&stack, argc) {
            Ok(frame) => {
                prop_assert_eq!(frame.rsp() % 16, 8);
                prop_assert!(frame.rsp() - SLOT_SIZE >= stack.base());
                prop_assert!(frame.end() <= stack.top());
                prop_assert_eq!(frame.end() - frame.rsp(), (overflow_args(argc) as u64 + 2) * SLOT_SIZE);
            }
            Err(err) => {
                let is_too_small = matches!(err, ContextError::StackTooSmall { .. });
                prop_assert!(is_too_small);
                prop_assert!(stack.size() < (overflow_args(argc) + 3) * 8 + 16);
            }
        }
    }

    #[test]
    fn every_argument_is_retrievable(args in proptest::collection::vec(any::<u64>(), 0..14)) {
        let mut ctx = ExecutionContext::new(ContextStack::new(4096));
        make_context(TaskId(0), Some(&mut ctx), target as *const (), &args).unwrap();

        for (idx, &arg) in args.iter().enumerate() {
            let got = match ctx.regs.arg(idx) {
                Some(reg) => reg,
                None => ctx.stack.read_slot(ctx.regs.rsp + 8 * (idx as u64 - 5)).unwrap(),
            };
            prop_assert_eq!(got, arg);
        }
        prop_assert_eq!(ctx.stack.read_slot(ctx.regs.rsp).unwrap(), start_context_addr());
        prop_assert_eq!(ctx.regs.rbx, ctx.regs.rsp + 8 * (overflow_args(args.len()) as u64 + 1));
    }
}
