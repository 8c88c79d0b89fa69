use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

/// A job source shared by several workers, every job is handed out exactly once.
pub struct JobQueue<I> {
    jobs: Mutex<I>,
    closed: AtomicBool,
}

impl<I: Iterator> JobQueue<I> {
    pub fn new<J: IntoIterator<IntoIter = I>>(jobs: J) -> Self {
        Self {
            jobs: Mutex::new(jobs.into_iter()),
            closed: AtomicBool::new(false),
        }
    }

    /// Takes the next job, or `None` once the queue is exhausted or closed.
    pub fn next(&self) -> Option<I::Item> {
        if self.closed.load(Ordering::Acquire) {
            return None;
        }

        self.jobs.lock().next()
    }

    /// Stops handing out jobs, the ones already taken are unaffected.
    pub fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }
}
