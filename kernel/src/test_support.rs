//! Test doubles shared by the unit tests.

use std::cell::{Cell, RefCell};

use crate::syscall::handlers::{LinuxSyscalls, NetStack};

/// Collaborator double recording every call it receives.
///
/// Returns the same configured value from every handler. `exit` and
/// `exit_group` either return (to exercise the post-exit check) or panic to
/// model a primitive that never comes back.
pub struct Recorder {
    ret: i64,
    diverging_exit: Cell<bool>,
    calls: RefCell<Vec<(&'static str, Vec<u64>, bool)>>,
    exits: RefCell<Vec<(&'static str, i32)>>,
}

impl Recorder {
    pub fn returning(ret: i64) -> Self {
        Recorder {
            ret,
            diverging_exit: Cell::new(false),
            calls: RefCell::new(Vec::new()),
            exits: RefCell::new(Vec::new()),
        }
    }

    pub fn with_diverging_exit(self) -> Self {
        self.diverging_exit.set(true);
        self
    }

    pub fn calls(&self) -> Vec<(&'static str, Vec<u64>)> {
        self.calls
            .borrow()
            .iter()
            .map(|(name, args, _)| (*name, args.clone()))
            .collect()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.calls.borrow().iter().map(|(name, _, _)| *name).collect()
    }

    pub fn is_net_call(&self, idx: usize) -> bool {
        self.calls.borrow()[idx].2
    }

    pub fn exits(&self) -> Vec<(&'static str, i32)> {
        self.exits.borrow().clone()
    }

    fn record(&self, name: &'static str, net: bool, args: &[u64]) -> i64 {
        self.calls.borrow_mut().push((name, args.to_vec(), net));
        self.ret
    }

    fn terminate(&self, name: &'static str, status: i32) {
        self.exits.borrow_mut().push((name, status));
        if self.diverging_exit.get() {
            panic!("{}({}) terminated the task", name, status);
        }
    }
}

impl LinuxSyscalls for Recorder {
    fn read(&self, fd: i32, buf: u64, count: usize) -> i64 {
        self.record("read", false, &[fd as u64, buf, count as u64])
    }

    fn write(&self, fd: i32, buf: u64, count: usize) -> i64 {
        self.record("write", false, &[fd as u64, buf, count as u64])
    }

    fn open(&self, path: u64, flags: i32, mode: u32) -> i64 {
        self.record("open", false, &[path, flags as u64, mode as u64])
    }

    fn close(&self, fd: i32) -> i64 {
        self.record("close", false, &[fd as u64])
    }

    fn stat(&self, path: u64, statbuf: u64) -> i64 {
        self.record("stat", false, &[path, statbuf])
    }

    fn fstat(&self, fd: i32, statbuf: u64) -> i64 {
        self.record("fstat", false, &[fd as u64, statbuf])
    }

    fn lstat(&self, path: u64, statbuf: u64) -> i64 {
        self.record("lstat", false, &[path, statbuf])
    }

    fn lseek(&self, fd: i32, offset: i64, whence: i32) -> i64 {
        self.record("lseek", false, &[fd as u64, offset as u64, whence as u64])
    }

    fn mmap(&self, addr: u64, len: usize, prot: i32, flags: i32, fd: i32, offset: i64) -> i64 {
        self.record("mmap", false, &[addr, len as u64, prot as u64, flags as u64, fd as u64, offset as u64])
    }

    fn mprotect(&self, addr: u64, len: usize, prot: i32) -> i64 {
        self.record("mprotect", false, &[addr, len as u64, prot as u64])
    }

    fn munmap(&self, addr: u64, len: usize) -> i64 {
        self.record("munmap", false, &[addr, len as u64])
    }

    fn brk(&self, addr: u64) -> i64 {
        self.record("brk", false, &[addr])
    }

    fn rt_sigaction(&self, signum: i32, act: u64, oldact: u64) -> i64 {
        self.record("rt_sigaction", false, &[signum as u64, act, oldact])
    }

    fn ioctl(&self, fd: i32, request: u64, arg: u64) -> i64 {
        self.record("ioctl", false, &[fd as u64, request, arg])
    }

    fn readv(&self, fd: i32, iov: u64, iovcnt: i32) -> i64 {
        self.record("readv", false, &[fd as u64, iov, iovcnt as u64])
    }

    fn writev(&self, fd: i32, iov: u64, iovcnt: i32) -> i64 {
        self.record("writev", false, &[fd as u64, iov, iovcnt as u64])
    }

    fn access(&self, path: u64, mode: i32) -> i64 {
        self.record("access", false, &[path, mode as u64])
    }

    fn sched_yield(&self) -> i64 {
        self.record("sched_yield", false, &[])
    }

    fn madvise(&self, addr: u64, len: usize, advice: i32) -> i64 {
        self.record("madvise", false, &[addr, len as u64, advice as u64])
    }

    fn nanosleep(&self, req: u64, rem: u64) -> i64 {
        self.record("nanosleep", false, &[req, rem])
    }

    fn getpid(&self) -> i64 {
        self.record("getpid", false, &[])
    }

    fn socket(&self, domain: i32, ty: i32, protocol: i32) -> i64 {
        self.record("socket", false, &[domain as u64, ty as u64, protocol as u64])
    }

    fn setsockopt(&self, fd: i32, level: i32, optname: i32, optval: u64, optlen: u32) -> i64 {
        self.record("setsockopt", false, &[fd as u64, level as u64, optname as u64, optval, optlen as u64])
    }

    fn clone(&self, flags: u64, stack: u64, parent_tid: u64, child_tid: u64, tls: u64) -> i64 {
        self.record("clone", false, &[flags, stack, parent_tid, child_tid, tls])
    }

    fn exit(&self, status: i32) {
        self.terminate("exit", status);
    }

    fn uname(&self, buf: u64) -> i64 {
        self.record("uname", false, &[buf])
    }

    fn fcntl(&self, fd: i32, cmd: i32, arg: u64) -> i64 {
        self.record("fcntl", false, &[fd as u64, cmd as u64, arg])
    }

    fn getcwd(&self, buf: u64, size: usize) -> i64 {
        self.record("getcwd", false, &[buf, size as u64])
    }

    fn mkdir(&self, path: u64, mode: u32) -> i64 {
        self.record("mkdir", false, &[path, mode as u64])
    }

    fn rmdir(&self, path: u64) -> i64 {
        self.record("rmdir", false, &[path])
    }

    fn unlink(&self, path: u64) -> i64 {
        self.record("unlink", false, &[path])
    }

    fn readlink(&self, path: u64, buf: u64, bufsiz: usize) -> i64 {
        self.record("readlink", false, &[path, buf, bufsiz as u64])
    }

    fn gettimeofday(&self, tv: u64, tz: u64) -> i64 {
        self.record("gettimeofday", false, &[tv, tz])
    }

    fn getrlimit(&self, resource: u32, rlim: u64) -> i64 {
        self.record("getrlimit", false, &[resource as u64, rlim])
    }

    fn sysinfo(&self, info: u64) -> i64 {
        self.record("sysinfo", false, &[info])
    }

    fn getuid(&self) -> i64 {
        self.record("getuid", false, &[])
    }

    fn getgid(&self) -> i64 {
        self.record("getgid", false, &[])
    }

    fn geteuid(&self) -> i64 {
        self.record("geteuid", false, &[])
    }

    fn getegid(&self) -> i64 {
        self.record("getegid", false, &[])
    }

    fn getppid(&self) -> i64 {
        self.record("getppid", false, &[])
    }

    fn getpriority(&self, which: i32, who: u32) -> i64 {
        self.record("getpriority", false, &[which as u64, who as u64])
    }

    fn setpriority(&self, which: i32, who: u32, prio: i32) -> i64 {
        self.record("setpriority", false, &[which as u64, who as u64, prio as u64])
    }

    fn arch_prctl(&self, code: i32, addr: u64) -> i64 {
        self.record("arch_prctl", false, &[code as u64, addr])
    }

    fn setrlimit(&self, resource: u32, rlim: u64) -> i64 {
        self.record("setrlimit", false, &[resource as u64, rlim])
    }

    fn sethostname(&self, name: u64, len: usize) -> i64 {
        self.record("sethostname", false, &[name, len as u64])
    }

    fn tkill(&self, tid: i32, sig: i32) -> i64 {
        self.record("tkill", false, &[tid as u64, sig as u64])
    }

    fn time(&self, tloc: u64) -> i64 {
        self.record("time", false, &[tloc])
    }

    fn futex(&self, uaddr: u64, op: i32, val: u32, timeout: u64, uaddr2: u64, val3: u32) -> i64 {
        self.record("futex", false, &[uaddr, op as u64, val as u64, timeout, uaddr2, val3 as u64])
    }

    fn sched_setaffinity(&self, pid: i32, cpusetsize: usize, mask: u64) -> i64 {
        self.record("sched_setaffinity", false, &[pid as u64, cpusetsize as u64, mask])
    }

    fn sched_getaffinity(&self, pid: i32, cpusetsize: usize, mask: u64) -> i64 {
        self.record("sched_getaffinity", false, &[pid as u64, cpusetsize as u64, mask])
    }

    fn clock_gettime(&self, clockid: i32, tp: u64) -> i64 {
        self.record("clock_gettime", false, &[clockid as u64, tp])
    }

    fn clock_getres(&self, clockid: i32, res: u64) -> i64 {
        self.record("clock_getres", false, &[clockid as u64, res])
    }

    fn exit_group(&self, status: i32) {
        self.terminate("exit_group", status);
    }

    fn tgkill(&self, tgid: i32, tid: i32, sig: i32) -> i64 {
        self.record("tgkill", false, &[tgid as u64, tid as u64, sig as u64])
    }

    fn openat(&self, dirfd: i32, path: u64, flags: i32, mode: u32) -> i64 {
        self.record("openat", false, &[dirfd as u64, path, flags as u64, mode as u64])
    }

    fn set_robust_list(&self, head: u64, len: usize) -> i64 {
        self.record("set_robust_list", false, &[head, len as u64])
    }

    fn get_robust_list(&self, pid: i32, head_ptr: u64, len_ptr: u64) -> i64 {
        self.record("get_robust_list", false, &[pid as u64, head_ptr, len_ptr])
    }

    fn prlimit64(&self, pid: i32, resource: u32, new_limit: u64, old_limit: u64) -> i64 {
        self.record("prlimit64", false, &[pid as u64, resource as u64, new_limit, old_limit])
    }
}

impl NetStack for Recorder {
    fn connect(&self, fd: i32, addr: u64, addrlen: u32) -> i64 {
        self.record("connect", true, &[fd as u64, addr, addrlen as u64])
    }

    fn accept(&self, fd: i32, addr: u64, addrlen: u64) -> i64 {
        self.record("accept", true, &[fd as u64, addr, addrlen])
    }

    fn recvfrom(&self, fd: i32, buf: u64, len: usize, flags: i32, src_addr: u64, addrlen: u64) -> i64 {
        self.record("recvfrom", true, &[fd as u64, buf, len as u64, flags as u64, src_addr, addrlen])
    }

    fn shutdown(&self, fd: i32, how: i32) -> i64 {
        self.record("shutdown", true, &[fd as u64, how as u64])
    }

    fn bind(&self, fd: i32, addr: u64, addrlen: u32) -> i64 {
        self.record("bind", true, &[fd as u64, addr, addrlen as u64])
    }

    fn listen(&self, fd: i32, backlog: i32) -> i64 {
        self.record("listen", true, &[fd as u64, backlog as u64])
    }

    fn getsockname(&self, fd: i32, addr: u64, addrlen: u64) -> i64 {
        self.record("getsockname", true, &[fd as u64, addr, addrlen])
    }
}

/// Thread-local capture of `log` records, so parallel tests do not mix output.
pub mod logs {
    use log::{Level, LevelFilter, Log, Metadata, Record};
    use std::cell::RefCell;
    use std::sync::Once;

    std::thread_local! {
        static RECORDS: RefCell<Vec<(Level, String)>> = RefCell::new(Vec::new());
    }

    struct Capture;

    impl Log for Capture {
        fn enabled(&self, _metadata: &Metadata) -> bool {
            true
        }

        fn log(&self, record: &Record) {
            let line = record.args().to_string();
            RECORDS.with(|records| records.borrow_mut().push((record.level(), line)));
        }

        fn flush(&self) {}
    }

    static CAPTURE: Capture = Capture;
    static INIT: Once = Once::new();

    /// Installs the capturing logger and clears this thread's records.
    pub fn capture() {
        INIT.call_once(|| {
            let _ = log::set_logger(&CAPTURE);
            log::set_max_level(LevelFilter::Trace);
        });
        RECORDS.with(|records| records.borrow_mut().clear());
    }

    pub fn records() -> Vec<(Level, String)> {
        RECORDS.with(|records| records.borrow().clone())
    }

    pub fn contains(level: Level, needle: &str) -> bool {
        records()
            .iter()
            .any(|(lvl, line)| *lvl == level && line.contains(needle))
    }
}
