//! Register snapshot captured by the syscall trampoline.

use static_assertions::{assert_eq_size, const_assert_eq};

/// Registers saved at `syscall` entry.
///
/// The trampoline pushes RAX first and R9 last, so the struct is laid out
/// from the lowest address (where RSP points after the last push) upwards.
/// Field order is part of the trampoline contract and must not change
/// without changing `entry::syscall_entry` as well.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegisterSnapshot {
    pub r9: u64,  // arg 6
    pub r8: u64,  // arg 5
    pub r10: u64, // arg 4
    pub rdx: u64, // arg 3
    pub rsi: u64, // arg 2
    pub rdi: u64, // arg 1
    pub rax: u64, // syscall number / return value
}

assert_eq_size!(RegisterSnapshot, [u64; 7]);
const_assert_eq!(core::mem::offset_of!(RegisterSnapshot, r9), 0x00);
const_assert_eq!(core::mem::offset_of!(RegisterSnapshot, r8), 0x08);
const_assert_eq!(core::mem::offset_of!(RegisterSnapshot, r10), 0x10);
const_assert_eq!(core::mem::offset_of!(RegisterSnapshot, rdx), 0x18);
const_assert_eq!(core::mem::offset_of!(RegisterSnapshot, rsi), 0x20);
const_assert_eq!(core::mem::offset_of!(RegisterSnapshot, rdi), 0x28);
const_assert_eq!(core::mem::offset_of!(RegisterSnapshot, rax), 0x30);

impl RegisterSnapshot {
    /// Syscall number as loaded into RAX by user code.
    #[inline]
    pub fn number(&self) -> u64 {
        self.rax
    }

    /// Arguments in Linux order. Argument 4 comes from R10, not RCX.
    #[inline]
    pub fn args(&self) -> SyscallArgs {
        SyscallArgs::new([self.rdi, self.rsi, self.rdx, self.r10, self.r8, self.r9])
    }

    /// Stores the result into RAX for the return path.
    #[inline]
    pub fn set_return(&mut self, value: u64) {
        self.rax = value;
    }
}

/// Six untyped machine-word syscall arguments.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SyscallArgs {
    regs: [u64; 6],
}

impl SyscallArgs {
    pub const fn new(regs: [u64; 6]) -> Self {
        Self { regs }
    }

    #[inline]
    pub fn arg1(&self) -> u64 {
        self.regs[0]
    }

    #[inline]
    pub fn arg2(&self) -> u64 {
        self.regs[1]
    }

    #[inline]
    pub fn arg3(&self) -> u64 {
        self.regs[2]
    }

    #[inline]
    pub fn arg4(&self) -> u64 {
        self.regs[3]
    }

    #[inline]
    pub fn arg5(&self) -> u64 {
        self.regs[4]
    }

    #[inline]
    pub fn arg6(&self) -> u64 {
        self.regs[5]
    }
}
