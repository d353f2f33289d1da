//! Linux syscall dispatcher.
//!
//! Maps a syscall number to exactly one behavior: a call into the general
//! syscall layer, a call into the network stack, a fixed stub value, or the
//! termination path. Results are returned untouched; negative-errno values
//! from collaborators pass straight through.

use super::abi::*;
use super::errno::Errno;
use super::frame::SyscallArgs;
use super::handlers::{LinuxSyscalls, NetStack};
use super::table;
use crate::common::TaskId;

/// Routes trapped syscalls to their implementations.
///
/// Holds no state of its own besides the collaborator references, so one
/// instance can serve every trap on a core. It takes no locks.
#[derive(Clone, Copy)]
pub struct Dispatcher<'a> {
    sys: &'a dyn LinuxSyscalls,
    #[cfg_attr(not(feature = "net"), allow(dead_code))]
    net: &'a dyn NetStack,
}

impl<'a> Dispatcher<'a> {
    pub fn new(sys: &'a dyn LinuxSyscalls, net: &'a dyn NetStack) -> Self {
        Dispatcher { sys, net }
    }

    /// Dispatches syscall `nr` issued by `task` and returns the value for RAX.
    ///
    /// Unsupported numbers terminate the caller through `exit(-EFAULT)`;
    /// that call is not expected to return.
    pub fn dispatch(&self, task: TaskId, nr: u64, args: &SyscallArgs) -> u64 {
        let a = args;

        if log::log_enabled!(log::Level::Trace) {
            log::trace!(
                "[{}] {}({:#x}, {:#x}, {:#x}, {:#x}, {:#x}, {:#x})",
                task,
                table::name(nr).unwrap_or("?"),
                a.arg1(),
                a.arg2(),
                a.arg3(),
                a.arg4(),
                a.arg5(),
                a.arg6()
            );
        }

        match nr {
            #[cfg(feature = "sys-read")]
            SYS_READ => self.sys.read(a.arg1() as i32, a.arg2(), a.arg3() as usize) as u64,
            #[cfg(feature = "sys-write")]
            SYS_WRITE => self.sys.write(a.arg1() as i32, a.arg2(), a.arg3() as usize) as u64,
            #[cfg(feature = "sys-open")]
            SYS_OPEN => self.sys.open(a.arg1(), a.arg2() as i32, a.arg3() as u32) as u64,
            #[cfg(feature = "sys-close")]
            SYS_CLOSE => self.sys.close(a.arg1() as i32) as u64,
            #[cfg(feature = "sys-stat")]
            SYS_STAT => self.sys.stat(a.arg1(), a.arg2()) as u64,
            #[cfg(feature = "sys-fstat")]
            SYS_FSTAT => self.sys.fstat(a.arg1() as i32, a.arg2()) as u64,
            #[cfg(feature = "sys-lstat")]
            SYS_LSTAT => self.sys.lstat(a.arg1(), a.arg2()) as u64,
            #[cfg(feature = "sys-lseek")]
            SYS_LSEEK => self.sys.lseek(a.arg1() as i32, a.arg2() as i64, a.arg3() as i32) as u64,
            #[cfg(feature = "sys-mmap")]
            SYS_MMAP => self.sys.mmap(
                a.arg1(),
                a.arg2() as usize,
                a.arg3() as i32,
                a.arg4() as i32,
                a.arg5() as i32,
                a.arg6() as i64,
            ) as u64,
            #[cfg(feature = "sys-mprotect")]
            SYS_MPROTECT => self.sys.mprotect(a.arg1(), a.arg2() as usize, a.arg3() as i32) as u64,
            #[cfg(feature = "sys-munmap")]
            SYS_MUNMAP => self.sys.munmap(a.arg1(), a.arg2() as usize) as u64,
            #[cfg(feature = "sys-brk")]
            SYS_BRK => self.sys.brk(a.arg1()) as u64,
            #[cfg(feature = "sys-rt-sigaction")]
            SYS_RT_SIGACTION => self.sys.rt_sigaction(a.arg1() as i32, a.arg2(), a.arg3()) as u64,
            #[cfg(feature = "sys-rt-sigprocmask")]
            // Not implemented: reports success without touching the mask.
            SYS_RT_SIGPROCMASK => 0,
            #[cfg(feature = "sys-ioctl")]
            SYS_IOCTL => self.sys.ioctl(a.arg1() as i32, a.arg2(), a.arg3()) as u64,
            #[cfg(feature = "sys-readv")]
            SYS_READV => self.sys.readv(a.arg1() as i32, a.arg2(), a.arg3() as i32) as u64,
            #[cfg(feature = "sys-writev")]
            SYS_WRITEV => self.sys.writev(a.arg1() as i32, a.arg2(), a.arg3() as i32) as u64,
            #[cfg(feature = "sys-access")]
            SYS_ACCESS => self.sys.access(a.arg1(), a.arg2() as i32) as u64,
            #[cfg(feature = "sys-sched-yield")]
            SYS_SCHED_YIELD => self.sys.sched_yield() as u64,
            #[cfg(feature = "sys-madvise")]
            SYS_MADVISE => self.sys.madvise(a.arg1(), a.arg2() as usize, a.arg3() as i32) as u64,
            #[cfg(feature = "sys-nanosleep")]
            SYS_NANOSLEEP => self.sys.nanosleep(a.arg1(), a.arg2()) as u64,
            #[cfg(feature = "sys-getpid")]
            SYS_GETPID => self.sys.getpid() as u64,
            #[cfg(feature = "sys-socket")]
            SYS_SOCKET => self.sys.socket(a.arg1() as i32, a.arg2() as i32, a.arg3() as i32) as u64,
            #[cfg(all(feature = "net", feature = "sys-connect"))]
            SYS_CONNECT => self.net.connect(a.arg1() as i32, a.arg2(), a.arg3() as u32) as u64,
            #[cfg(all(feature = "net", feature = "sys-accept"))]
            SYS_ACCEPT => self.net.accept(a.arg1() as i32, a.arg2(), a.arg3()) as u64,
            #[cfg(all(feature = "net", feature = "sys-recvfrom"))]
            SYS_RECVFROM => self.net.recvfrom(
                a.arg1() as i32,
                a.arg2(),
                a.arg3() as usize,
                a.arg4() as i32,
                a.arg5(),
                a.arg6(),
            ) as u64,
            #[cfg(all(feature = "net", feature = "sys-shutdown"))]
            SYS_SHUTDOWN => self.net.shutdown(a.arg1() as i32, a.arg2() as i32) as u64,
            #[cfg(all(feature = "net", feature = "sys-bind"))]
            SYS_BIND => self.net.bind(a.arg1() as i32, a.arg2(), a.arg3() as u32) as u64,
            #[cfg(all(feature = "net", feature = "sys-listen"))]
            SYS_LISTEN => self.net.listen(a.arg1() as i32, a.arg2() as i32) as u64,
            #[cfg(all(feature = "net", feature = "sys-getsockname"))]
            SYS_GETSOCKNAME => self.net.getsockname(a.arg1() as i32, a.arg2(), a.arg3()) as u64,
            #[cfg(feature = "sys-setsockopt")]
            SYS_SETSOCKOPT => self.sys.setsockopt(
                a.arg1() as i32,
                a.arg2() as i32,
                a.arg3() as i32,
                a.arg4(),
                a.arg5() as u32,
            ) as u64,
            #[cfg(feature = "sys-clone")]
            SYS_CLONE => self.sys.clone(a.arg1(), a.arg2(), a.arg3(), a.arg4(), a.arg5()) as u64,
            #[cfg(feature = "sys-exit")]
            SYS_EXIT => {
                self.sys.exit(a.arg1() as i32);
                self.returned_from_exit(task, "exit")
            }
            #[cfg(feature = "sys-uname")]
            SYS_UNAME => self.sys.uname(a.arg1()) as u64,
            #[cfg(feature = "sys-fcntl")]
            SYS_FCNTL => self.sys.fcntl(a.arg1() as i32, a.arg2() as i32, a.arg3()) as u64,
            #[cfg(feature = "sys-getcwd")]
            SYS_GETCWD => self.sys.getcwd(a.arg1(), a.arg2() as usize) as u64,
            #[cfg(feature = "sys-mkdir")]
            SYS_MKDIR => self.sys.mkdir(a.arg1(), a.arg2() as u32) as u64,
            #[cfg(feature = "sys-rmdir")]
            SYS_RMDIR => self.sys.rmdir(a.arg1()) as u64,
            #[cfg(feature = "sys-unlink")]
            SYS_UNLINK => self.sys.unlink(a.arg1()) as u64,
            #[cfg(feature = "sys-readlink")]
            SYS_READLINK => self.sys.readlink(a.arg1(), a.arg2(), a.arg3() as usize) as u64,
            #[cfg(feature = "sys-gettimeofday")]
            SYS_GETTIMEOFDAY => self.sys.gettimeofday(a.arg1(), a.arg2()) as u64,
            #[cfg(feature = "sys-getrlimit")]
            SYS_GETRLIMIT => self.sys.getrlimit(a.arg1() as u32, a.arg2()) as u64,
            #[cfg(feature = "sys-sysinfo")]
            SYS_SYSINFO => self.sys.sysinfo(a.arg1()) as u64,
            #[cfg(feature = "sys-getuid")]
            SYS_GETUID => self.sys.getuid() as u64,
            #[cfg(feature = "sys-getgid")]
            SYS_GETGID => self.sys.getgid() as u64,
            #[cfg(feature = "sys-geteuid")]
            SYS_GETEUID => self.sys.geteuid() as u64,
            #[cfg(feature = "sys-getegid")]
            SYS_GETEGID => self.sys.getegid() as u64,
            #[cfg(feature = "sys-getppid")]
            SYS_GETPPID => self.sys.getppid() as u64,
            #[cfg(feature = "sys-getpriority")]
            SYS_GETPRIORITY => self.sys.getpriority(a.arg1() as i32, a.arg2() as u32) as u64,
            #[cfg(feature = "sys-setpriority")]
            SYS_SETPRIORITY => self.sys.setpriority(a.arg1() as i32, a.arg2() as u32, a.arg3() as i32) as u64,
            #[cfg(feature = "sys-arch-prctl")]
            SYS_ARCH_PRCTL => self.sys.arch_prctl(a.arg1() as i32, a.arg2()) as u64,
            #[cfg(feature = "sys-setrlimit")]
            SYS_SETRLIMIT => self.sys.setrlimit(a.arg1() as u32, a.arg2()) as u64,
            #[cfg(feature = "sys-sethostname")]
            SYS_SETHOSTNAME => self.sys.sethostname(a.arg1(), a.arg2() as usize) as u64,
            #[cfg(feature = "sys-gettid")]
            // One thread per task: the thread id is the task id.
            SYS_GETTID => self.sys.getpid() as u64,
            #[cfg(feature = "sys-tkill")]
            SYS_TKILL => self.sys.tkill(a.arg1() as i32, a.arg2() as i32) as u64,
            #[cfg(feature = "sys-time")]
            SYS_TIME => self.sys.time(a.arg1()) as u64,
            #[cfg(feature = "sys-futex")]
            SYS_FUTEX => self.sys.futex(
                a.arg1(),
                a.arg2() as i32,
                a.arg3() as u32,
                a.arg4(),
                a.arg5(),
                a.arg6() as u32,
            ) as u64,
            #[cfg(feature = "sys-sched-setaffinity")]
            SYS_SCHED_SETAFFINITY => self.sys.sched_setaffinity(a.arg1() as i32, a.arg2() as usize, a.arg3()) as u64,
            #[cfg(feature = "sys-sched-getaffinity")]
            SYS_SCHED_GETAFFINITY => self.sys.sched_getaffinity(a.arg1() as i32, a.arg2() as usize, a.arg3()) as u64,
            #[cfg(feature = "sys-set-tid-address")]
            // Not implemented: the clear-child-tid address is not recorded.
            SYS_SET_TID_ADDRESS => a.arg1(),
            #[cfg(feature = "sys-clock-gettime")]
            SYS_CLOCK_GETTIME => self.sys.clock_gettime(a.arg1() as i32, a.arg2()) as u64,
            #[cfg(feature = "sys-clock-getres")]
            SYS_CLOCK_GETRES => self.sys.clock_getres(a.arg1() as i32, a.arg2()) as u64,
            #[cfg(feature = "sys-exit-group")]
            SYS_EXIT_GROUP => {
                self.sys.exit_group(a.arg1() as i32);
                self.returned_from_exit(task, "exit_group")
            }
            #[cfg(feature = "sys-tgkill")]
            SYS_TGKILL => self.sys.tgkill(a.arg1() as i32, a.arg2() as i32, a.arg3() as i32) as u64,
            #[cfg(feature = "sys-openat")]
            SYS_OPENAT => self.sys.openat(a.arg1() as i32, a.arg2(), a.arg3() as i32, a.arg4() as u32) as u64,
            #[cfg(feature = "sys-set-robust-list")]
            SYS_SET_ROBUST_LIST => self.sys.set_robust_list(a.arg1(), a.arg2() as usize) as u64,
            #[cfg(feature = "sys-get-robust-list")]
            SYS_GET_ROBUST_LIST => self.sys.get_robust_list(a.arg1() as i32, a.arg2(), a.arg3()) as u64,
            #[cfg(feature = "sys-prlimit64")]
            SYS_PRLIMIT64 => self.sys.prlimit64(a.arg1() as i32, a.arg2() as u32, a.arg3(), a.arg4()) as u64,
            _ => self.unsupported(task, nr),
        }
    }

    fn unsupported(&self, task: TaskId, nr: u64) -> u64 {
        log::error!("[{}] unsupported Linux syscall: {}", task, nr);
        self.sys.exit(Errno::Fault.as_status());
        self.returned_from_exit(task, "exit")
    }

    /// Reached only if the termination primitive came back.
    fn returned_from_exit(&self, task: TaskId, call: &str) -> u64 {
        log::error!("[{}] should not reach here after {}", task, call);
        Errno::Fault.to_raw()
    }
}
