//! Linux personality of the unikernel: the syscall trap path and the
//! execution contexts used to start cooperative threads.
#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod common;
pub mod context;
#[cfg(target_arch = "x86_64")]
pub mod drivers;
pub mod syscall;

#[cfg(test)]
mod test_support;

pub use common::TaskId;
pub use context::{make_context, swap_context, ContextError, ContextStack, ExecutionContext};
pub use syscall::{Dispatcher, Errno, LinuxSyscalls, NetStack, RegisterSnapshot, SyscallArgs};
