//! Linux x86-64 syscall ABI.
//!
//! Calling convention of the `syscall` instruction:
//! - RAX: syscall number
//! - RDI: arg1
//! - RSI: arg2
//! - RDX: arg3
//! - R10: arg4 (RCX is clobbered by `syscall`, which stores the user RIP there)
//! - R8:  arg5
//! - R9:  arg6
//!
//! Return: RAX, negative errno on failure.
//!
//! The numbers below are the host Linux numbers and must never be renumbered.

/// read(fd, buf, count)
pub const SYS_READ: u64 = 0;
/// write(fd, buf, count)
pub const SYS_WRITE: u64 = 1;
/// open(pathname, flags, mode)
pub const SYS_OPEN: u64 = 2;
/// close(fd)
pub const SYS_CLOSE: u64 = 3;
/// stat(pathname, statbuf)
pub const SYS_STAT: u64 = 4;
/// fstat(fd, statbuf)
pub const SYS_FSTAT: u64 = 5;
/// lstat(pathname, statbuf)
pub const SYS_LSTAT: u64 = 6;
/// lseek(fd, offset, whence)
pub const SYS_LSEEK: u64 = 8;
/// mmap(addr, length, prot, flags, fd, offset)
pub const SYS_MMAP: u64 = 9;
/// mprotect(addr, len, prot)
pub const SYS_MPROTECT: u64 = 10;
/// munmap(addr, length)
pub const SYS_MUNMAP: u64 = 11;
/// brk(addr)
pub const SYS_BRK: u64 = 12;
/// rt_sigaction(signum, act, oldact)
pub const SYS_RT_SIGACTION: u64 = 13;
/// rt_sigprocmask(how, set, oldset): no-op, always 0
pub const SYS_RT_SIGPROCMASK: u64 = 14;
/// ioctl(fd, request, arg)
pub const SYS_IOCTL: u64 = 16;
/// readv(fd, iov, iovcnt)
pub const SYS_READV: u64 = 19;
/// writev(fd, iov, iovcnt)
pub const SYS_WRITEV: u64 = 20;
/// access(pathname, mode)
pub const SYS_ACCESS: u64 = 21;
/// sched_yield()
pub const SYS_SCHED_YIELD: u64 = 24;
/// madvise(addr, length, advice)
pub const SYS_MADVISE: u64 = 28;
/// nanosleep(req, rem)
pub const SYS_NANOSLEEP: u64 = 35;
/// getpid()
pub const SYS_GETPID: u64 = 39;
/// socket(domain, type, protocol)
pub const SYS_SOCKET: u64 = 41;
/// connect(sockfd, addr, addrlen)
pub const SYS_CONNECT: u64 = 42;
/// accept(sockfd, addr, addrlen)
pub const SYS_ACCEPT: u64 = 43;
/// recvfrom(sockfd, buf, len, flags, src_addr, addrlen)
pub const SYS_RECVFROM: u64 = 45;
/// shutdown(sockfd, how)
pub const SYS_SHUTDOWN: u64 = 48;
/// bind(sockfd, addr, addrlen)
pub const SYS_BIND: u64 = 49;
/// listen(sockfd, backlog)
pub const SYS_LISTEN: u64 = 50;
/// getsockname(sockfd, addr, addrlen)
pub const SYS_GETSOCKNAME: u64 = 51;
/// setsockopt(sockfd, level, optname, optval, optlen)
pub const SYS_SETSOCKOPT: u64 = 54;
/// clone(flags, stack, parent_tid, child_tid, tls)
pub const SYS_CLONE: u64 = 56;
/// exit(status) -> !
pub const SYS_EXIT: u64 = 60;
/// uname(buf)
pub const SYS_UNAME: u64 = 63;
/// fcntl(fd, cmd, arg)
pub const SYS_FCNTL: u64 = 72;
/// getcwd(buf, size)
pub const SYS_GETCWD: u64 = 79;
/// mkdir(pathname, mode)
pub const SYS_MKDIR: u64 = 83;
/// rmdir(pathname)
pub const SYS_RMDIR: u64 = 84;
/// unlink(pathname)
pub const SYS_UNLINK: u64 = 87;
/// readlink(pathname, buf, bufsiz)
pub const SYS_READLINK: u64 = 89;
/// gettimeofday(tv, tz)
pub const SYS_GETTIMEOFDAY: u64 = 96;
/// getrlimit(resource, rlim)
pub const SYS_GETRLIMIT: u64 = 97;
/// sysinfo(info)
pub const SYS_SYSINFO: u64 = 99;
/// getuid()
pub const SYS_GETUID: u64 = 102;
/// getgid()
pub const SYS_GETGID: u64 = 104;
/// geteuid()
pub const SYS_GETEUID: u64 = 107;
/// getegid()
pub const SYS_GETEGID: u64 = 108;
/// getppid()
pub const SYS_GETPPID: u64 = 110;
/// getpriority(which, who)
pub const SYS_GETPRIORITY: u64 = 140;
/// setpriority(which, who, prio)
pub const SYS_SETPRIORITY: u64 = 141;
/// arch_prctl(code, addr)
pub const SYS_ARCH_PRCTL: u64 = 158;
/// setrlimit(resource, rlim)
pub const SYS_SETRLIMIT: u64 = 160;
/// sethostname(name, len)
pub const SYS_SETHOSTNAME: u64 = 170;
/// gettid(): same identity as getpid
pub const SYS_GETTID: u64 = 186;
/// tkill(tid, sig)
pub const SYS_TKILL: u64 = 200;
/// time(tloc)
pub const SYS_TIME: u64 = 201;
/// futex(uaddr, op, val, timeout, uaddr2, val3)
pub const SYS_FUTEX: u64 = 202;
/// sched_setaffinity(pid, cpusetsize, mask)
pub const SYS_SCHED_SETAFFINITY: u64 = 203;
/// sched_getaffinity(pid, cpusetsize, mask)
pub const SYS_SCHED_GETAFFINITY: u64 = 204;
/// set_tid_address(tidptr): echoes tidptr
pub const SYS_SET_TID_ADDRESS: u64 = 218;
/// clock_gettime(clockid, tp)
pub const SYS_CLOCK_GETTIME: u64 = 228;
/// clock_getres(clockid, res)
pub const SYS_CLOCK_GETRES: u64 = 229;
/// exit_group(status) -> !
pub const SYS_EXIT_GROUP: u64 = 231;
/// tgkill(tgid, tid, sig)
pub const SYS_TGKILL: u64 = 234;
/// openat(dirfd, pathname, flags, mode)
pub const SYS_OPENAT: u64 = 257;
/// set_robust_list(head, len)
pub const SYS_SET_ROBUST_LIST: u64 = 273;
/// get_robust_list(pid, head_ptr, len_ptr)
pub const SYS_GET_ROBUST_LIST: u64 = 274;
/// prlimit64(pid, resource, new_limit, old_limit)
pub const SYS_PRLIMIT64: u64 = 302;
