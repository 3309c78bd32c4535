#![forbid(unsafe_code)]

//! Background tasks owned by tab content.
//!
//! A [`BackgroundTask`] wraps a body that runs on its own thread until its
//! [`StopSignal`] fires. Start and stop are idempotent and never block: a
//! stop sets the signal and detaches the thread, so a worker may still be
//! finishing its current tick after `stop` returns.

use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

/// Cooperative stop flag handed to a task body.
///
/// The body should poll [`is_stopped`](Self::is_stopped) or sleep through
/// [`wait_timeout`](Self::wait_timeout) and return once stopped.
#[derive(Clone)]
pub struct StopSignal {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl StopSignal {
    fn new() -> (Self, StopTrigger) {
        let inner = Arc::new((Mutex::new(false), Condvar::new()));
        let signal = Self {
            inner: Arc::clone(&inner),
        };
        (signal, StopTrigger { inner })
    }

    pub fn is_stopped(&self) -> bool {
        let (lock, _) = &*self.inner;
        *lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Wait for the stop signal or a timeout.
    ///
    /// Returns `true` if stopped, `false` if the timeout elapsed.
    pub fn wait_timeout(&self, duration: Duration) -> bool {
        let (lock, cvar) = &*self.inner;
        let mut stopped = lock.lock().unwrap_or_else(PoisonError::into_inner);
        if *stopped {
            return true;
        }

        let start = Instant::now();
        let mut remaining = duration;
        loop {
            let (guard, result) = cvar
                .wait_timeout(stopped, remaining)
                .unwrap_or_else(PoisonError::into_inner);
            stopped = guard;
            if *stopped {
                return true;
            }
            if result.timed_out() {
                return false;
            }
            // spurious wakeup
            let elapsed = start.elapsed();
            if elapsed >= duration {
                return false;
            }
            remaining = duration - elapsed;
        }
    }
}

impl std::fmt::Debug for StopSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StopSignal")
            .field("stopped", &self.is_stopped())
            .finish()
    }
}

struct StopTrigger {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl StopTrigger {
    fn stop(&self) {
        let (lock, cvar) = &*self.inner;
        let mut stopped = lock.lock().unwrap_or_else(PoisonError::into_inner);
        *stopped = true;
        cvar.notify_all();
    }
}

struct RunningTask {
    trigger: StopTrigger,
    thread: thread::JoinHandle<()>,
}

type TaskBody = Arc<dyn Fn(StopSignal) + Send + Sync>;

/// A restartable background worker.
pub struct BackgroundTask {
    name: String,
    body: TaskBody,
    running: Option<RunningTask>,
    launches: u64,
}

impl BackgroundTask {
    /// Create a stopped task. `body` runs once per start.
    pub fn new<F>(name: impl Into<String>, body: F) -> Self
    where
        F: Fn(StopSignal) + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            body: Arc::new(body),
            running: None,
            launches: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Start the worker. A no-op if already started.
    ///
    /// Returns `true` if a new worker thread was launched.
    pub fn start(&mut self) -> bool {
        if self.running.is_some() {
            return false;
        }
        let (signal, trigger) = StopSignal::new();
        let body = Arc::clone(&self.body);
        let spawned = thread::Builder::new()
            .name(format!("crtui-task-{}", self.name))
            .spawn(move || body(signal));
        match spawned {
            Ok(thread) => {
                tracing::debug!(task = %self.name, "starting background task");
                self.launches += 1;
                self.running = Some(RunningTask { trigger, thread });
                true
            }
            Err(err) => {
                tracing::warn!(task = %self.name, error = %err, "background task spawn failed");
                false
            }
        }
    }

    /// Signal the worker to stop without waiting for it. A no-op if not
    /// started.
    pub fn stop(&mut self) -> bool {
        match self.running.take() {
            Some(running) => {
                tracing::debug!(task = %self.name, "stopping background task");
                running.trigger.stop();
                true
            }
            None => false,
        }
    }

    /// Whether the task is in the started state.
    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Whether the current worker thread is still executing.
    pub fn worker_alive(&self) -> bool {
        self.running
            .as_ref()
            .is_some_and(|r| !r.thread.is_finished())
    }

    /// Number of worker threads launched so far.
    pub fn launches(&self) -> u64 {
        self.launches
    }
}

impl Drop for BackgroundTask {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for BackgroundTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackgroundTask")
            .field("name", &self.name)
            .field("running", &self.is_running())
            .field("launches", &self.launches)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    fn wait_until(deadline: Duration, mut cond: impl FnMut() -> bool) -> bool {
        let start = Instant::now();
        while start.elapsed() < deadline {
            if cond() {
                return true;
            }
            thread::sleep(Duration::from_millis(1));
        }
        cond()
    }

    #[test]
    fn wait_timeout_times_out() {
        let (signal, _trigger) = StopSignal::new();
        let start = Instant::now();
        assert!(!signal.wait_timeout(Duration::from_millis(10)));
        assert!(start.elapsed() >= Duration::from_millis(10));
    }

    #[test]
    fn wait_timeout_returns_when_stopped() {
        let (signal, trigger) = StopSignal::new();
        let waiter = thread::spawn(move || signal.wait_timeout(Duration::from_secs(10)));
        thread::sleep(Duration::from_millis(5));
        trigger.stop();
        assert!(waiter.join().unwrap());
    }

    #[test]
    fn start_is_idempotent() {
        let runs = Arc::new(AtomicUsize::new(0));
        let r = Arc::clone(&runs);
        let mut task = BackgroundTask::new("clock", move |stop| {
            r.fetch_add(1, Ordering::SeqCst);
            while !stop.wait_timeout(Duration::from_millis(1)) {}
        });
        assert!(task.start());
        assert!(!task.start());
        assert!(!task.start());
        assert!(task.is_running());
        assert_eq!(task.launches(), 1);
        assert!(wait_until(Duration::from_secs(2), || runs.load(Ordering::SeqCst) == 1));
        task.stop();
    }

    #[test]
    fn stop_is_idempotent_and_ends_worker() {
        let exited = Arc::new(AtomicBool::new(false));
        let e = Arc::clone(&exited);
        let mut task = BackgroundTask::new("radio", move |stop| {
            while !stop.wait_timeout(Duration::from_millis(1)) {}
            e.store(true, Ordering::SeqCst);
        });
        assert!(!task.stop());
        task.start();
        assert!(task.stop());
        assert!(!task.stop());
        assert!(!task.is_running());
        assert!(wait_until(Duration::from_secs(2), || exited.load(Ordering::SeqCst)));
    }

    #[test]
    fn restart_launches_fresh_worker() {
        let runs = Arc::new(AtomicUsize::new(0));
        let r = Arc::clone(&runs);
        let mut task = BackgroundTask::new("data", move |stop| {
            r.fetch_add(1, Ordering::SeqCst);
            while !stop.wait_timeout(Duration::from_millis(1)) {}
        });
        task.start();
        task.stop();
        task.start();
        assert_eq!(task.launches(), 2);
        assert!(wait_until(Duration::from_secs(2), || runs.load(Ordering::SeqCst) == 2));
    }

    #[test]
    fn drop_signals_stop() {
        let exited = Arc::new(AtomicBool::new(false));
        let e = Arc::clone(&exited);
        {
            let mut task = BackgroundTask::new("drop", move |stop| {
                while !stop.wait_timeout(Duration::from_millis(1)) {}
                e.store(true, Ordering::SeqCst);
            });
            task.start();
        }
        assert!(wait_until(Duration::from_secs(2), || exited.load(Ordering::SeqCst)));
    }
}
