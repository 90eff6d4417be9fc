use crate::domain::ports::ThreadIdentity;

/// Kernel id of the calling thread, the same value a debugger or
/// `/proc/<pid>/task` reports for it.
#[derive(Debug, Clone, Copy, Default)]
pub struct CurrentThread;

impl ThreadIdentity for CurrentThread {
    fn current_thread_id(&self) -> u64 {
        os_thread_id()
    }
}

#[cfg(any(target_os = "linux", target_os = "android"))]
fn os_thread_id() -> u64 {
    // SAFETY: gettid takes no arguments and cannot fail.
    unsafe { libc::syscall(libc::SYS_gettid) as u64 }
}

#[cfg(any(target_os = "macos", target_os = "ios"))]
fn os_thread_id() -> u64 {
    let mut tid: u64 = 0;
    // SAFETY: a null thread handle selects the calling thread; `tid` outlives the call.
    unsafe {
        libc::pthread_threadid_np(0, &mut tid);
    }
    tid
}

#[cfg(not(any(
    target_os = "linux",
    target_os = "android",
    target_os = "macos",
    target_os = "ios"
)))]
fn os_thread_id() -> u64 {
    use std::sync::atomic::{AtomicU64, Ordering};

    // No kernel id available here; hand out stable process-local ids instead.
    static NEXT_THREAD_ID: AtomicU64 = AtomicU64::new(1);
    thread_local! {
        static THREAD_ID: u64 = NEXT_THREAD_ID.fetch_add(1, Ordering::Relaxed);
    }
    THREAD_ID.with(|id| *id)
}
