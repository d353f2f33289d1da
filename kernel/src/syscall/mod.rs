//! Linux x86-64 syscall personality.
//!
//! User code issues `syscall` with Linux numbers; the trampoline in [`entry`]
//! captures a [`RegisterSnapshot`], the [`Dispatcher`] picks one behavior for
//! the number and the result goes back through RAX.
//!
//! Which numbers are answered is decided at build time: one Cargo feature per
//! syscall (`sys-read`, `sys-mmap`, ...) and `net` for every call forwarded to
//! the network stack. A number whose feature is off behaves exactly like a
//! number that was never listed.

pub mod abi;
pub mod dispatcher;
pub mod entry;
pub mod errno;
pub mod frame;
pub mod handlers;
pub mod table;

pub use dispatcher::Dispatcher;
pub use entry::{fast_syscall_handler, handle_fast_syscall, install, kernel_stack, set_kernel_stack, Backend, EntryError};
pub use errno::Errno;
pub use frame::{RegisterSnapshot, SyscallArgs};
pub use handlers::{LinuxSyscalls, NetStack};
