//! Continuation switcher and the low-level entry path of built contexts.

use super::ExecutionContext;
use crate::syscall::Errno;

/// Saves the running context into `save` and resumes `resume`.
///
/// Not implemented: logs both contexts and fails with `ENOSYS` without
/// touching either of them.
pub fn swap_context(save: &mut ExecutionContext, resume: &ExecutionContext) -> Result<(), Errno> {
    // TODO: save callee-saved registers into `save` and jump through `enter_context(resume)`.
    log::warn!(
        "swap_context is currently not implemented: {:p} <=> {:p}",
        save,
        resume
    );
    Err(Errno::NoSys)
}

/// Address stored as the return address of a freshly built context.
pub fn start_context_addr() -> u64 {
    start_context as usize as u64
}

#[cfg(all(target_arch = "x86_64", target_os = "none"))]
pub use self::bare::{enter_context, start_context};

#[cfg(all(target_arch = "x86_64", target_os = "none"))]
mod bare {
    use core::arch::naked_asm;

    use super::ExecutionContext;

    /// Return target of every started function.
    ///
    /// RBX still holds the address of the link slot (callee-saved across the
    /// function), so the link to the next context is read from there.
    #[unsafe(naked)]
    pub unsafe extern "C" fn start_context() -> ! {
        naked_asm!(
            "mov rsp, rbx",
            "mov rdi, [rsp]",
            "and rsp, -16",
            "call {resume}",
            "ud2",
            resume = sym resume_link,
        )
    }

    extern "C" fn resume_link(link: *const ExecutionContext) -> ! {
        match unsafe { link.as_ref() } {
            Some(next) => unsafe { enter_context(next) },
            None => {
                log::error!("context function returned without a linked context");
                loop {
                    x86_64::instructions::hlt();
                }
            }
        }
    }

    /// Loads the registers of `ctx` and jumps to its RIP.
    ///
    /// # Safety
    /// `ctx` must have been built by `make_context` (or saved from a running
    /// thread) and its stack must stay alive while it runs.
    #[unsafe(naked)]
    pub unsafe extern "C" fn enter_context(ctx: *const ExecutionContext) -> ! {
        naked_asm!(
            "mov rbx, [rdi + 0x08]",
            "mov rcx, [rdi + 0x10]",
            "mov rdx, [rdi + 0x18]",
            "mov rsi, [rdi + 0x20]",
            "mov rbp, [rdi + 0x30]",
            "mov r8,  [rdi + 0x40]",
            "mov r9,  [rdi + 0x48]",
            "mov r12, [rdi + 0x60]",
            "mov r13, [rdi + 0x68]",
            "mov r14, [rdi + 0x70]",
            "mov r15, [rdi + 0x78]",
            "mov rsp, [rdi + 0x38]",
            // RFLAGS goes through the new stack, below the return address
            "push qword ptr [rdi + 0x88]",
            "popfq",
            "mov rax, [rdi + 0x80]",
            // RDI last, it addresses the context
            "mov rdi, [rdi + 0x28]",
            "jmp rax",
        )
    }
}

// Hosted builds never enter contexts; this only provides the address.
#[cfg(not(all(target_arch = "x86_64", target_os = "none")))]
extern "C" fn start_context() {
    log::error!("start_context reached on a hosted build");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::TaskId;
    use crate::context::{make_context, ContextStack};
    use crate::test_support::logs;

    extern "C" fn entry(_a: u64) {}

    #[test]
    fn swap_is_not_implemented_and_touches_nothing() {
        logs::capture();
        let mut save = ExecutionContext::new(ContextStack::new(512));
        let mut resume = ExecutionContext::new(ContextStack::new(512));
        make_context(TaskId(1), Some(&mut resume), entry as *const (), &[5]).unwrap();
        let (save_before, resume_before) = (save.snapshot(), resume.snapshot());

        assert_eq!(swap_context(&mut save, &resume), Err(Errno::NoSys));
        assert_eq!(save.snapshot(), save_before);
        assert_eq!(resume.snapshot(), resume_before);
        assert!(logs::contains(log::Level::Warn, "swap_context is currently not implemented"));
    }
}
