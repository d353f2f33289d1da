//! Continuation builder.

use super::stack::EntryFrame;
use super::switch::start_context_addr;
use super::{ContextError, ExecutionContext};
use crate::common::TaskId;

/// Integer arguments passed in registers (RDI, RSI, RDX, RCX, R8, R9).
pub const REGISTER_ARGS: usize = 6;

/// Prepares `ctx` so that entering it calls `func` with `args` on behalf of
/// `task`.
///
/// The first six arguments go to the argument registers in order, the rest
/// onto the stack above the return address. `func` returns into the
/// `start_context` trampoline, which continues with `ctx.link`.
///
/// A missing context is ignored. If the stack cannot hold the entry frame
/// the context is left untouched and `StackTooSmall` is returned.
pub fn make_context(
    task: TaskId,
    ctx: Option<&mut ExecutionContext>,
    func: *const (),
    args: &[u64],
) -> Result<(), ContextError> {
    let Some(ctx) = ctx else {
        log::debug!("[{}] make_context: no destination context, func {:p}", task, func);
        return Ok(());
    };

    log::debug!(
        "[{}] make_context {:p}, func {:p}, stack {:#x}+{:#x}, {} args",
        task,
        ctx,
        func,
        ctx.stack.base(),
        ctx.stack.size(),
        args.len()
    );

    let frame = EntryFrame::plan(&ctx.stack, args.len())?;
    let link = ctx.link_addr();

    ctx.stack.write_slot(frame.trampoline_slot(), start_context_addr())?;
    for (n, &arg) in args.iter().skip(REGISTER_ARGS).enumerate() {
        ctx.stack.write_slot(frame.overflow_slot(n), arg)?;
    }
    ctx.stack.write_slot(frame.link_slot(), link)?;

    ctx.regs.rip = func as u64;
    ctx.regs.rbx = frame.link_slot();
    ctx.regs.rsp = frame.rsp();
    for (idx, &arg) in args.iter().take(REGISTER_ARGS).enumerate() {
        if let Some(reg) = ctx.regs.arg_mut(idx) {
            *reg = arg;
        }
    }

    Ok(())
}
