//! Compile-time table of the syscalls this build answers.
//!
//! Each entry exists only when its Cargo feature is enabled, mirroring the
//! arms of [`Dispatcher::dispatch`](super::dispatcher::Dispatcher::dispatch).
//! Numbers missing from the table take the unsupported path.

use super::abi::*;

/// One supported syscall number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyscallEntry {
    pub nr: u64,
    pub name: &'static str,
}

impl SyscallEntry {
    pub const fn new(nr: u64, name: &'static str) -> Self {
        SyscallEntry { nr, name }
    }
}

/// Enabled syscalls, sorted by number.
pub static ENABLED: &[SyscallEntry] = &[
    #[cfg(feature = "sys-read")]
    SyscallEntry::new(SYS_READ, "read"),
    #[cfg(feature = "sys-write")]
    SyscallEntry::new(SYS_WRITE, "write"),
    #[cfg(feature = "sys-open")]
    SyscallEntry::new(SYS_OPEN, "open"),
    #[cfg(feature = "sys-close")]
    SyscallEntry::new(SYS_CLOSE, "close"),
    #[cfg(feature = "sys-stat")]
    SyscallEntry::new(SYS_STAT, "stat"),
    #[cfg(feature = "sys-fstat")]
    SyscallEntry::new(SYS_FSTAT, "fstat"),
    #[cfg(feature = "sys-lstat")]
    SyscallEntry::new(SYS_LSTAT, "lstat"),
    #[cfg(feature = "sys-lseek")]
    SyscallEntry::new(SYS_LSEEK, "lseek"),
    #[cfg(feature = "sys-mmap")]
    SyscallEntry::new(SYS_MMAP, "mmap"),
    #[cfg(feature = "sys-mprotect")]
    SyscallEntry::new(SYS_MPROTECT, "mprotect"),
    #[cfg(feature = "sys-munmap")]
    SyscallEntry::new(SYS_MUNMAP, "munmap"),
    #[cfg(feature = "sys-brk")]
    SyscallEntry::new(SYS_BRK, "brk"),
    #[cfg(feature = "sys-rt-sigaction")]
    SyscallEntry::new(SYS_RT_SIGACTION, "rt_sigaction"),
    #[cfg(feature = "sys-rt-sigprocmask")]
    SyscallEntry::new(SYS_RT_SIGPROCMASK, "rt_sigprocmask"),
    #[cfg(feature = "sys-ioctl")]
    SyscallEntry::new(SYS_IOCTL, "ioctl"),
    #[cfg(feature = "sys-readv")]
    SyscallEntry::new(SYS_READV, "readv"),
    #[cfg(feature = "sys-writev")]
    SyscallEntry::new(SYS_WRITEV, "writev"),
    #[cfg(feature = "sys-access")]
    SyscallEntry::new(SYS_ACCESS, "access"),
    #[cfg(feature = "sys-sched-yield")]
    SyscallEntry::new(SYS_SCHED_YIELD, "sched_yield"),
    #[cfg(feature = "sys-madvise")]
    SyscallEntry::new(SYS_MADVISE, "madvise"),
    #[cfg(feature = "sys-nanosleep")]
    SyscallEntry::new(SYS_NANOSLEEP, "nanosleep"),
    #[cfg(feature = "sys-getpid")]
    SyscallEntry::new(SYS_GETPID, "getpid"),
    #[cfg(feature = "sys-socket")]
    SyscallEntry::new(SYS_SOCKET, "socket"),
    #[cfg(all(feature = "net", feature = "sys-connect"))]
    SyscallEntry::new(SYS_CONNECT, "connect"),
    #[cfg(all(feature = "net", feature = "sys-accept"))]
    SyscallEntry::new(SYS_ACCEPT, "accept"),
    #[cfg(all(feature = "net", feature = "sys-recvfrom"))]
    SyscallEntry::new(SYS_RECVFROM, "recvfrom"),
    #[cfg(all(feature = "net", feature = "sys-shutdown"))]
    SyscallEntry::new(SYS_SHUTDOWN, "shutdown"),
    #[cfg(all(feature = "net", feature = "sys-bind"))]
    SyscallEntry::new(SYS_BIND, "bind"),
    #[cfg(all(feature = "net", feature = "sys-listen"))]
    SyscallEntry::new(SYS_LISTEN, "listen"),
    #[cfg(all(feature = "net", feature = "sys-getsockname"))]
    SyscallEntry::new(SYS_GETSOCKNAME, "getsockname"),
    #[cfg(feature = "sys-setsockopt")]
    SyscallEntry::new(SYS_SETSOCKOPT, "setsockopt"),
    #[cfg(feature = "sys-clone")]
    SyscallEntry::new(SYS_CLONE, "clone"),
    #[cfg(feature = "sys-exit")]
    SyscallEntry::new(SYS_EXIT, "exit"),
    #[cfg(feature = "sys-uname")]
    SyscallEntry::new(SYS_UNAME, "uname"),
    #[cfg(feature = "sys-fcntl")]
    SyscallEntry::new(SYS_FCNTL, "fcntl"),
    #[cfg(feature = "sys-getcwd")]
    SyscallEntry::new(SYS_GETCWD, "getcwd"),
    #[cfg(feature = "sys-mkdir")]
    SyscallEntry::new(SYS_MKDIR, "mkdir"),
    #[cfg(feature = "sys-rmdir")]
    SyscallEntry::new(SYS_RMDIR, "rmdir"),
    #[cfg(feature = "sys-unlink")]
    SyscallEntry::new(SYS_UNLINK, "unlink"),
    #[cfg(feature = "sys-readlink")]
    SyscallEntry::new(SYS_READLINK, "readlink"),
    #[cfg(feature = "sys-gettimeofday")]
    SyscallEntry::new(SYS_GETTIMEOFDAY, "gettimeofday"),
    #[cfg(feature = "sys-getrlimit")]
    SyscallEntry::new(SYS_GETRLIMIT, "getrlimit"),
    #[cfg(feature = "sys-sysinfo")]
    SyscallEntry::new(SYS_SYSINFO, "sysinfo"),
    #[cfg(feature = "sys-getuid")]
    SyscallEntry::new(SYS_GETUID, "getuid"),
    #[cfg(feature = "sys-getgid")]
    SyscallEntry::new(SYS_GETGID, "getgid"),
    #[cfg(feature = "sys-geteuid")]
    SyscallEntry::new(SYS_GETEUID, "geteuid"),
    #[cfg(feature = "sys-getegid")]
    SyscallEntry::new(SYS_GETEGID, "getegid"),
    #[cfg(feature = "sys-getppid")]
    SyscallEntry::new(SYS_GETPPID, "getppid"),
    #[cfg(feature = "sys-getpriority")]
    SyscallEntry::new(SYS_GETPRIORITY, "getpriority"),
    #[cfg(feature = "sys-setpriority")]
    SyscallEntry::new(SYS_SETPRIORITY, "setpriority"),
    #[cfg(feature = "sys-arch-prctl")]
    SyscallEntry::new(SYS_ARCH_PRCTL, "arch_prctl"),
    #[cfg(feature = "sys-setrlimit")]
    SyscallEntry::new(SYS_SETRLIMIT, "setrlimit"),
    #[cfg(feature = "sys-sethostname")]
    SyscallEntry::new(SYS_SETHOSTNAME, "sethostname"),
    #[cfg(feature = "sys-gettid")]
    SyscallEntry::new(SYS_GETTID, "gettid"),
    #[cfg(feature = "sys-tkill")]
    SyscallEntry::new(SYS_TKILL, "tkill"),
    #[cfg(feature = "sys-time")]
    SyscallEntry::new(SYS_TIME, "time"),
    #[cfg(feature = "sys-futex")]
    SyscallEntry::new(SYS_FUTEX, "futex"),
    #[cfg(feature = "sys-sched-setaffinity")]
    SyscallEntry::new(SYS_SCHED_SETAFFINITY, "sched_setaffinity"),
    #[cfg(feature = "sys-sched-getaffinity")]
    SyscallEntry::new(SYS_SCHED_GETAFFINITY, "sched_getaffinity"),
    #[cfg(feature = "sys-set-tid-address")]
    SyscallEntry::new(SYS_SET_TID_ADDRESS, "set_tid_address"),
    #[cfg(feature = "sys-clock-gettime")]
    SyscallEntry::new(SYS_CLOCK_GETTIME, "clock_gettime"),
    #[cfg(feature = "sys-clock-getres")]
    SyscallEntry::new(SYS_CLOCK_GETRES, "clock_getres"),
    #[cfg(feature = "sys-exit-group")]
    SyscallEntry::new(SYS_EXIT_GROUP, "exit_group"),
    #[cfg(feature = "sys-tgkill")]
    SyscallEntry::new(SYS_TGKILL, "tgkill"),
    #[cfg(feature = "sys-openat")]
    SyscallEntry::new(SYS_OPENAT, "openat"),
    #[cfg(feature = "sys-set-robust-list")]
    SyscallEntry::new(SYS_SET_ROBUST_LIST, "set_robust_list"),
    #[cfg(feature = "sys-get-robust-list")]
    SyscallEntry::new(SYS_GET_ROBUST_LIST, "get_robust_list"),
    #[cfg(feature = "sys-prlimit64")]
    SyscallEntry::new(SYS_PRLIMIT64, "prlimit64"),
];

/// Finds the table entry for `nr`, if this build supports it.
pub fn lookup(nr: u64) -> Option<&'static SyscallEntry> {
    ENABLED
        .binary_search_by_key(&nr, |entry| entry.nr)
        .ok()
        .map(|idx| &ENABLED[idx])
}

/// Name used in diagnostics; unknown numbers have none.
pub fn name(nr: u64) -> Option<&'static str> {
    lookup(nr).map(|entry| entry.name)
}
