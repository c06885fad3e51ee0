//! Interrupt state shared between a signal handler and the shell loop.

use std::sync::atomic::{AtomicBool, Ordering};

/// Records interrupt requests and whether the loop is blocked on input.
///
/// A handler calls [`Interrupt::request`] from any thread. The loop checks for
/// a pending request before every read and again after it returns, so a line
/// read while an interrupt was pending is dropped rather than processed.
#[derive(Debug, Default)]
pub struct Interrupt {
    requested: AtomicBool,
    waiting: AtomicBool,
}

impl Interrupt {
    /// Creates an interrupt with nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an interrupt request.
    ///
    /// Returns `true` if the loop is blocked waiting for input at this moment.
    /// A handler that cannot wake the read can end the process itself then.
    pub fn request(&self) -> bool {
        self.requested.store(true, Ordering::SeqCst);
        self.waiting.load(Ordering::SeqCst)
    }

    /// Consumes a pending request.
    pub(crate) fn take(&self) -> bool {
        self.requested.swap(false, Ordering::SeqCst)
    }

    /// Runs a blocking read with the waiting mark set.
    pub(crate) fn wait<T>(&self, read: impl FnOnce() -> T) -> T {
        self.waiting.store(true, Ordering::SeqCst);
        let result = read();
        self.waiting.store(false, Ordering::SeqCst);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_is_consumed_once() {
        let interrupt = Interrupt::new();
        assert!(!interrupt.take());
        assert!(!interrupt.request());
        assert!(interrupt.take());
        assert!(!interrupt.take());
    }

    #[test]
    fn request_reports_a_blocked_read() {
        let interrupt = Interrupt::new();
        let blocked = interrupt.wait(|| interrupt.request());
        assert!(blocked);
        assert!(interrupt.take());
        assert!(!interrupt.request());
    }
}
