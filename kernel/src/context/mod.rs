//! Execution contexts for cooperative threads of control.
//!
//! [`make_context`] prepares a context so that entering it starts a function
//! with given arguments and, when that function returns, continues with the
//! linked context. [`swap_context`] is not implemented yet.

use core::ptr::NonNull;

use static_assertions::{assert_not_impl_any, const_assert_eq};

pub mod make;
pub mod stack;
pub mod switch;

#[cfg(test)]
mod tests_prop;

pub use make::{make_context, REGISTER_ARGS};
pub use stack::{ContextStack, EntryFrame};
pub use switch::swap_context;

/// Register image of a context.
///
/// Offsets are fixed: the first-entry loader in [`switch`] addresses fields
/// by offset.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MachineRegisters {
    pub rax: u64,
    pub rbx: u64,
    pub rcx: u64,
    pub rdx: u64,
    pub rsi: u64,
    pub rdi: u64,
    pub rbp: u64,
    pub rsp: u64,
    pub r8: u64,
    pub r9: u64,
    pub r10: u64,
    pub r11: u64,
    pub r12: u64,
    pub r13: u64,
    pub r14: u64,
    pub r15: u64,
    pub rip: u64,
    pub rflags: u64,
}

const_assert_eq!(core::mem::offset_of!(MachineRegisters, rbx), 0x08);
const_assert_eq!(core::mem::offset_of!(MachineRegisters, rdi), 0x28);
const_assert_eq!(core::mem::offset_of!(MachineRegisters, rsp), 0x38);
const_assert_eq!(core::mem::offset_of!(MachineRegisters, r8), 0x40);
const_assert_eq!(core::mem::offset_of!(MachineRegisters, r15), 0x78);
const_assert_eq!(core::mem::offset_of!(MachineRegisters, rip), 0x80);
const_assert_eq!(core::mem::offset_of!(MachineRegisters, rflags), 0x88);

impl MachineRegisters {
    pub const fn new() -> Self {
        MachineRegisters {
            rax: 0, rbx: 0, rcx: 0, rdx: 0,
            rsi: 0, rdi: 0, rbp: 0, rsp: 0,
            r8: 0, r9: 0, r10: 0, r11: 0,
            r12: 0, r13: 0, r14: 0, r15: 0,
            rip: 0, rflags: 0x202, // IF=1, Reserved=1
        }
    }

    /// Register carrying integer argument `index` (0-based) in the SysV ABI.
    pub fn arg_mut(&mut self, index: usize) -> Option<&mut u64> {
        match index {
            0 => Some(&mut self.rdi),
            1 => Some(&mut self.rsi),
            2 => Some(&mut self.rdx),
            3 => Some(&mut self.rcx),
            4 => Some(&mut self.r8),
            5 => Some(&mut self.r9),
            _ => None,
        }
    }

    pub fn arg(&self, index: usize) -> Option<u64> {
        match index {
            0 => Some(self.rdi),
            1 => Some(self.rsi),
            2 => Some(self.rdx),
            3 => Some(self.rcx),
            4 => Some(self.r8),
            5 => Some(self.r9),
            _ => None,
        }
    }
}

impl Default for MachineRegisters {
    fn default() -> Self {
        Self::new()
    }
}

/// A suspended or not yet started thread of control.
///
/// `link` names the context to continue with when the started function
/// returns. It does not own the target; the owner of both contexts keeps the
/// linked one alive for as long as this one can run.
///
/// Not `Clone`: `regs.rsp` and `regs.rbx` of a built context are absolute
/// addresses inside `stack`, and a copied stack would not match them.
#[repr(C)]
#[derive(Debug)]
pub struct ExecutionContext {
    pub regs: MachineRegisters,
    pub link: Option<NonNull<ExecutionContext>>,
    pub stack: ContextStack,
}

const_assert_eq!(core::mem::offset_of!(ExecutionContext, regs), 0);
assert_not_impl_any!(ExecutionContext: Clone);
assert_not_impl_any!(ContextStack: Clone);

impl ExecutionContext {
    pub fn new(stack: ContextStack) -> Self {
        ExecutionContext {
            regs: MachineRegisters::new(),
            link: None,
            stack,
        }
    }

    /// Sets the context to resume after this one's function returns.
    pub fn set_link(&mut self, next: Option<&ExecutionContext>) {
        self.link = next.map(NonNull::from);
    }

    /// Link as written into the stack: the target's address, or 0.
    pub fn link_addr(&self) -> u64 {
        self.link.map_or(0, |next| next.as_ptr() as u64)
    }

    /// Registers, link and stack contents, for before/after comparisons.
    #[cfg(test)]
    pub(crate) fn snapshot(&self) -> (MachineRegisters, u64, alloc::vec::Vec<u64>) {
        (self.regs, self.link_addr(), self.stack.slots().to_vec())
    }
}

/// Errors from building a context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ContextError {
    #[error("stack of {available} bytes cannot hold a {needed}-byte entry frame")]
    StackTooSmall { needed: usize, available: usize },
    #[error("stack slot {addr:#x} outside the context stack")]
    SlotOutOfBounds { addr: u64 },
    #[error("stack slot {addr:#x} is not 8-byte aligned")]
    MisalignedSlot { addr: u64 },
}

// Contexts move between tasks only through the scheduler, one owner at a time.
unsafe impl Send for ExecutionContext {}
