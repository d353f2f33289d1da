//! Owned context stacks and the layout of a fresh entry frame.
//!
//! A started context sees its stack like this, growing upwards from RSP:
//!
//! ```text
//! rsp + 8 * (k + 1)   link to the next context     <- RBX
//! rsp + 8 * k         overflow argument k
//! ...
//! rsp + 8             overflow argument 1 (7th argument)
//! rsp                 start_context trampoline      (return address)
//! rsp - 8             scratch, RFLAGS passes through it on first entry
//! ```
//!
//! `k` is the number of arguments beyond the six passed in registers. RSP is
//! 8 below a 16-byte boundary, which is what a callee sees right after `call`.

use alloc::boxed::Box;
use alloc::vec;

use super::make::REGISTER_ARGS;
use super::ContextError;

pub const SLOT_SIZE: u64 = 8;
pub const STACK_ALIGN: u64 = 16;

/// Rounds `addr` down to a multiple of `align` (a power of two).
#[inline]
pub fn align_down(addr: u64, align: u64) -> u64 {
    x86_64::align_down(addr, align)
}

/// Arguments that do not fit in registers and go on the stack.
#[inline]
pub const fn overflow_args(argc: usize) -> usize {
    argc.saturating_sub(REGISTER_ARGS)
}

/// Heap-backed stack region owned by one context.
pub struct ContextStack {
    mem: Box<[u64]>,
}

impl ContextStack {
    /// Allocates a zeroed stack of `size` bytes, rounded down to whole slots.
    pub fn new(size: usize) -> Self {
        ContextStack {
            mem: vec![0u64; size / SLOT_SIZE as usize].into_boxed_slice(),
        }
    }

    /// Lowest address of the region.
    pub fn base(&self) -> u64 {
        self.mem.as_ptr() as u64
    }

    /// Size in bytes.
    pub fn size(&self) -> usize {
        self.mem.len() * SLOT_SIZE as usize
    }

    /// One past the highest address of the region.
    pub fn top(&self) -> u64 {
        self.base() + self.size() as u64
    }

    fn index(&self, addr: u64) -> Result<usize, ContextError> {
        if addr < self.base() || addr.saturating_add(SLOT_SIZE) > self.top() {
            return Err(ContextError::SlotOutOfBounds { addr });
        }
        let offset = addr - self.base();
        if offset % SLOT_SIZE != 0 {
            return Err(ContextError::MisalignedSlot { addr });
        }
        Ok((offset / SLOT_SIZE) as usize)
    }

    pub fn read_slot(&self, addr: u64) -> Result<u64, ContextError> {
        let idx = self.index(addr)?;
        Ok(self.mem[idx])
    }

    pub fn write_slot(&mut self, addr: u64, value: u64) -> Result<(), ContextError> {
        let idx = self.index(addr)?;
        self.mem[idx] = value;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn slots(&self) -> &[u64] {
        &self.mem
    }
}

impl core::fmt::Debug for ContextStack {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ContextStack")
            .field("base", &format_args!("{:#x}", self.base()))
            .field("size", &self.size())
            .finish()
    }
}

/// Slot addresses of an entry frame placed at the top of a stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryFrame {
    rsp: u64,
    overflow: usize,
}

impl EntryFrame {
    /// Places the frame for `argc` arguments below `stack.top()`.
    pub fn plan(stack: &ContextStack, argc: usize) -> Result<Self, ContextError> {
        let overflow = overflow_args(argc);
        // frame slots, the scratch slot below RSP, and worst-case alignment
        let needed = (overflow + 3) * SLOT_SIZE as usize + STACK_ALIGN as usize;
        let too_small = ContextError::StackTooSmall {
            needed,
            available: stack.size(),
        };

        let reserved = (overflow as u64 + 1) * SLOT_SIZE;
        let rsp = stack
            .top()
            .checked_sub(reserved)
            .map(|addr| align_down(addr, STACK_ALIGN))
            .and_then(|addr| addr.checked_sub(SLOT_SIZE))
            .ok_or(too_small)?;
        if rsp < stack.base() + SLOT_SIZE {
            return Err(too_small);
        }

        let frame = EntryFrame { rsp, overflow };
        debug_assert!(frame.end() <= stack.top());
        Ok(frame)
    }

    pub fn rsp(&self) -> u64 {
        self.rsp
    }

    pub fn overflow(&self) -> usize {
        self.overflow
    }

    /// Slot holding the trampoline address the started function returns to.
    pub fn trampoline_slot(&self) -> u64 {
        self.rsp
    }

    /// Slot of overflow argument `n` (0 = the 7th argument).
    pub fn overflow_slot(&self, n: usize) -> u64 {
        self.rsp + (n as u64 + 1) * SLOT_SIZE
    }

    /// Slot holding the link to the next context; loaded into RBX.
    pub fn link_slot(&self) -> u64 {
        self.rsp + (self.overflow as u64 + 1) * SLOT_SIZE
    }

    /// First address above the frame.
    pub fn end(&self) -> u64 {
        self.link_slot() + SLOT_SIZE
    }
}
