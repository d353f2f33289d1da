//! Call contracts of the syscall implementations the dispatcher forwards to.
//!
//! Every method takes its arguments in Linux x86-64 order and returns the raw
//! result: zero or a non-negative value on success, a negative errno on
//! failure. User pointers are passed as untranslated addresses; validating
//! them is the implementation's job.

/// General syscall implementations (files, memory, tasks, time, identity).
pub trait LinuxSyscalls {
    fn read(&self, fd: i32, buf: u64, count: usize) -> i64;
    fn write(&self, fd: i32, buf: u64, count: usize) -> i64;
    fn open(&self, path: u64, flags: i32, mode: u32) -> i64;
    fn close(&self, fd: i32) -> i64;
    fn stat(&self, path: u64, statbuf: u64) -> i64;
    fn fstat(&self, fd: i32, statbuf: u64) -> i64;
    fn lstat(&self, path: u64, statbuf: u64) -> i64;
    fn lseek(&self, fd: i32, offset: i64, whence: i32) -> i64;
    fn mmap(&self, addr: u64, len: usize, prot: i32, flags: i32, fd: i32, offset: i64) -> i64;
    fn mprotect(&self, addr: u64, len: usize, prot: i32) -> i64;
    fn munmap(&self, addr: u64, len: usize) -> i64;
    fn brk(&self, addr: u64) -> i64;
    fn rt_sigaction(&self, signum: i32, act: u64, oldact: u64) -> i64;
    fn ioctl(&self, fd: i32, request: u64, arg: u64) -> i64;
    fn readv(&self, fd: i32, iov: u64, iovcnt: i32) -> i64;
    fn writev(&self, fd: i32, iov: u64, iovcnt: i32) -> i64;
    fn access(&self, path: u64, mode: i32) -> i64;
    fn sched_yield(&self) -> i64;
    fn madvise(&self, addr: u64, len: usize, advice: i32) -> i64;
    fn nanosleep(&self, req: u64, rem: u64) -> i64;
    fn getpid(&self) -> i64;
    fn socket(&self, domain: i32, ty: i32, protocol: i32) -> i64;
    fn setsockopt(&self, fd: i32, level: i32, optname: i32, optval: u64, optlen: u32) -> i64;
    fn clone(&self, flags: u64, stack: u64, parent_tid: u64, child_tid: u64, tls: u64) -> i64;

    /// Terminates the calling task. Real implementations never return;
    /// the dispatcher treats a return as a failure of the primitive.
    fn exit(&self, status: i32);

    fn uname(&self, buf: u64) -> i64;
    fn fcntl(&self, fd: i32, cmd: i32, arg: u64) -> i64;
    fn getcwd(&self, buf: u64, size: usize) -> i64;
    fn mkdir(&self, path: u64, mode: u32) -> i64;
    fn rmdir(&self, path: u64) -> i64;
    fn unlink(&self, path: u64) -> i64;
    fn readlink(&self, path: u64, buf: u64, bufsiz: usize) -> i64;
    fn gettimeofday(&self, tv: u64, tz: u64) -> i64;
    fn getrlimit(&self, resource: u32, rlim: u64) -> i64;
    fn sysinfo(&self, info: u64) -> i64;
    fn getuid(&self) -> i64;
    fn getgid(&self) -> i64;
    fn geteuid(&self) -> i64;
    fn getegid(&self) -> i64;
    fn getppid(&self) -> i64;
    fn getpriority(&self, which: i32, who: u32) -> i64;
    fn setpriority(&self, which: i32, who: u32, prio: i32) -> i64;
    fn arch_prctl(&self, code: i32, addr: u64) -> i64;
    fn setrlimit(&self, resource: u32, rlim: u64) -> i64;
    fn sethostname(&self, name: u64, len: usize) -> i64;
    fn tkill(&self, tid: i32, sig: i32) -> i64;
    fn time(&self, tloc: u64) -> i64;
    fn futex(&self, uaddr: u64, op: i32, val: u32, timeout: u64, uaddr2: u64, val3: u32) -> i64;
    fn sched_setaffinity(&self, pid: i32, cpusetsize: usize, mask: u64) -> i64;
    fn sched_getaffinity(&self, pid: i32, cpusetsize: usize, mask: u64) -> i64;
    fn clock_gettime(&self, clockid: i32, tp: u64) -> i64;
    fn clock_getres(&self, clockid: i32, res: u64) -> i64;

    /// Terminates every task of the calling group. Same contract as [`exit`].
    ///
    /// [`exit`]: LinuxSyscalls::exit
    fn exit_group(&self, status: i32);

    fn tgkill(&self, tgid: i32, tid: i32, sig: i32) -> i64;
    fn openat(&self, dirfd: i32, path: u64, flags: i32, mode: u32) -> i64;
    fn set_robust_list(&self, head: u64, len: usize) -> i64;
    fn get_robust_list(&self, pid: i32, head_ptr: u64, len_ptr: u64) -> i64;
    fn prlimit64(&self, pid: i32, resource: u32, new_limit: u64, old_limit: u64) -> i64;
}

/// Socket calls served by the network stack rather than the general layer.
pub trait NetStack {
    fn connect(&self, fd: i32, addr: u64, addrlen: u32) -> i64;
    fn accept(&self, fd: i32, addr: u64, addrlen: u64) -> i64;
    fn recvfrom(&self, fd: i32, buf: u64, len: usize, flags: i32, src_addr: u64, addrlen: u64) -> i64;
    fn shutdown(&self, fd: i32, how: i32) -> i64;
    fn bind(&self, fd: i32, addr: u64, addrlen: u32) -> i64;
    fn listen(&self, fd: i32, backlog: i32) -> i64;
    fn getsockname(&self, fd: i32, addr: u64, addrlen: u64) -> i64;
}
