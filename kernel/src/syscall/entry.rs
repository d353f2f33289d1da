//! SYSCALL entry glue: marshals the register snapshot into the dispatcher.
//!
//! Every trap runs on the kernel stack of the task that issued it. The
//! scheduler publishes that stack with [`set_kernel_stack`] whenever it
//! switches tasks, the same way it updates RSP0 in the TSS. The user RSP and
//! the SYSRET state are saved in that task's own trap frame, so a handler may
//! block and let another task trap in the meantime.

use core::sync::atomic::{AtomicU64, Ordering};

use spin::Once;
use x86_64::VirtAddr;

use super::dispatcher::Dispatcher;
use super::errno::Errno;
use super::frame::RegisterSnapshot;
use super::handlers::{LinuxSyscalls, NetStack};
use crate::common::TaskId;

/// Collaborators wired in by the kernel at boot.
pub struct Backend {
    pub syscalls: &'static (dyn LinuxSyscalls + Sync),
    pub net: &'static (dyn NetStack + Sync),
    /// Per-core current task lookup, used for diagnostics only.
    pub current_task: fn() -> TaskId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EntryError {
    #[error("syscall backend already installed")]
    AlreadyInstalled,
    #[error("kernel stack top {top:#x} is not 16-byte aligned")]
    MisalignedKernelStack { top: u64 },
}

static BACKEND: Once<Backend> = Once::new();

/// Kernel stack top of the running task; 0 until the first task is set.
static KERNEL_STACK_TOP: AtomicU64 = AtomicU64::new(0);

/// Registers the syscall backend. Only the first call takes effect.
pub fn install(backend: Backend) -> Result<(), EntryError> {
    install_once(&BACKEND, backend)
}

fn install_once<T>(slot: &Once<T>, value: T) -> Result<(), EntryError> {
    let mut installed = false;
    slot.call_once(|| {
        installed = true;
        value
    });
    if !installed {
        log::warn!("syscall backend already installed, ignoring");
        return Err(EntryError::AlreadyInstalled);
    }
    Ok(())
}

/// Sets the kernel stack used by the next trap (called during context switch).
///
/// Each task that can be inside a syscall needs its own stack here.
pub fn set_kernel_stack(stack_top: VirtAddr) -> Result<(), EntryError> {
    let top = stack_top.as_u64();
    if !stack_top.is_aligned(16u64) {
        return Err(EntryError::MisalignedKernelStack { top });
    }
    KERNEL_STACK_TOP.store(top, Ordering::Release);
    Ok(())
}

/// Kernel stack the next trap will run on, if one was published.
pub fn kernel_stack() -> Option<VirtAddr> {
    match KERNEL_STACK_TOP.load(Ordering::Acquire) {
        0 => None,
        top => Some(VirtAddr::new(top)),
    }
}

/// Runs one trap: reads number and arguments, writes the result into RAX.
pub fn handle_fast_syscall(dispatcher: &Dispatcher<'_>, task: TaskId, state: &mut RegisterSnapshot) {
    let ret = dispatcher.dispatch(task, state.number(), &state.args());
    state.set_return(ret);
}

/// Called by the trampoline with a pointer to the pushed registers.
#[no_mangle]
pub extern "C" fn fast_syscall_handler(state: &mut RegisterSnapshot) {
    match BACKEND.get() {
        Some(backend) => {
            let dispatcher = Dispatcher::new(backend.syscalls, backend.net);
            handle_fast_syscall(&dispatcher, (backend.current_task)(), state);
        }
        None => {
            log::error!("syscall {} before backend installation", state.number());
            state.set_return(Errno::NoSys.to_raw());
        }
    }
}

#[cfg(all(target_arch = "x86_64", target_os = "none"))]
pub use self::trampoline::{init, syscall_entry};

#[cfg(all(target_arch = "x86_64", target_os = "none"))]
mod trampoline {
    use core::arch::naked_asm;
    use core::mem::size_of;

    use static_assertions::const_assert_eq;
    use x86_64::registers::model_specific::{Efer, EferFlags, LStar, Msr, SFMask};
    use x86_64::registers::rflags::RFlags;
    use x86_64::structures::gdt::SegmentSelector;
    use x86_64::VirtAddr;

    use super::super::frame::RegisterSnapshot;
    use super::KERNEL_STACK_TOP;

    const BOOT_STACK_SIZE: usize = 4096 * 4;
    const IA32_STAR: u32 = 0xC000_0081;

    // Snapshot plus RCX, R11 and the user RSP keep the call 16-byte aligned.
    const TRAP_FRAME_SIZE: usize = size_of::<RegisterSnapshot>() + 3 * 8;
    const_assert_eq!(TRAP_FRAME_SIZE % 16, 0);

    #[repr(C, align(16))]
    struct BootStack {
        data: [u8; BOOT_STACK_SIZE],
    }

    /// Used until the scheduler publishes the first task's kernel stack.
    static mut BOOT_STACK: BootStack = BootStack { data: [0; BOOT_STACK_SIZE] };

    /// Holds the user RSP for the two instructions before it is pushed.
    /// Interrupts stay masked by SFMASK until then.
    static mut SCRATCH_USER_RSP: u64 = 0;

    /// Programs STAR/LSTAR/SFMASK and turns on SYSCALL in EFER.
    ///
    /// # Safety
    /// `kernel_code` and `sysret_base` must describe the loaded GDT. Before a
    /// task that may block in a handler runs, the scheduler must publish a
    /// kernel stack for it with [`super::set_kernel_stack`], distinct from the
    /// stack of every other task that can be inside a syscall.
    pub unsafe fn init(kernel_code: SegmentSelector, sysret_base: SegmentSelector) {
        if super::kernel_stack().is_none() {
            let base = VirtAddr::from_ptr(core::ptr::addr_of!(BOOT_STACK));
            let _ = super::set_kernel_stack(base + BOOT_STACK_SIZE as u64);
        }

        // STAR[47:32] = kernel CS, STAR[63:48] = SYSRET selector base
        let mut star = Msr::new(IA32_STAR);
        star.write(((sysret_base.0 as u64) << 48) | ((kernel_code.0 as u64) << 32));

        LStar::write(VirtAddr::new(syscall_entry as usize as u64));
        SFMask::write(RFlags::INTERRUPT_FLAG);
        Efer::update(|flags| *flags |= EferFlags::SYSTEM_CALL_EXTENSIONS);
    }

    /// LSTAR target. Builds the trap frame on the current task's kernel
    /// stack, calls `fast_syscall_handler`, restores and returns to user mode.
    #[unsafe(naked)]
    pub unsafe extern "C" fn syscall_entry() -> ! {
        naked_asm!(
            "mov [rip + {scratch}], rsp",
            "mov rsp, [rip + {kstack}]",
            // SYSRET state, owned by this task's frame
            "push qword ptr [rip + {scratch}]",
            "push r11",
            "push rcx",
            // RegisterSnapshot, highest field first
            "push rax",
            "push rdi",
            "push rsi",
            "push rdx",
            "push r10",
            "push r8",
            "push r9",
            "mov rdi, rsp",
            "call {handler}",
            "pop r9",
            "pop r8",
            "pop r10",
            "pop rdx",
            "pop rsi",
            "pop rdi",
            "pop rax",
            "pop rcx",
            "pop r11",
            "pop rsp",
            "sysretq",
            scratch = sym SCRATCH_USER_RSP,
            kstack = sym KERNEL_STACK_TOP,
            handler = sym super::fast_syscall_handler,
        )
    }
}
