#![forbid(unsafe_code)]

//! Glitch sequence: a short burst of vertical-jitter self-copies that runs
//! on its own thread and owns the shared frame while it runs.
//!
//! # Exclusivity
//!
//! At most one sequence is in flight. [`GlitchSequence::try_start`] claims
//! the in-progress flag with a compare-exchange; a request that loses is
//! dropped, never queued. The flag is released when the last jitter frame
//! has been written.
//!
//! # Locking
//!
//! The worker takes the frame lock once per jitter frame and releases it
//! before sleeping, so the presenter can still show each distorted frame.
//! Composition must check [`GlitchSequence::is_running`] and stay off the
//! buffer until the flag clears.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crtui_render::Buffer;

/// Row offset for jitter frame `index`: `round(2 * sin(index * 100))`.
pub fn jitter_offset(index: u32) -> i32 {
    (2.0 * (f64::from(index) * 100.0).sin()).round() as i32
}

/// Handle to the glitch-sequence worker.
#[derive(Debug)]
pub struct GlitchSequence {
    frames: u32,
    interval: Duration,
    running: Arc<AtomicBool>,
    completed: Arc<AtomicU64>,
    thread: Option<JoinHandle<()>>,
}

impl GlitchSequence {
    pub fn new(frames: u32, interval: Duration) -> Self {
        Self {
            frames,
            interval,
            running: Arc::new(AtomicBool::new(false)),
            completed: Arc::new(AtomicU64::new(0)),
            thread: None,
        }
    }

    /// Whether a sequence currently owns the frame.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Sequences that ran to completion.
    #[inline]
    pub fn completed(&self) -> u64 {
        self.completed.load(Ordering::Acquire)
    }

    /// Start a sequence on `frame` unless one is already running.
    ///
    /// Returns `false` when the request was dropped. A failed thread spawn
    /// also drops the request.
    pub fn try_start(&mut self, frame: &Arc<Mutex<Buffer>>) -> bool {
        if self
            .running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("glitch sequence already running; request dropped");
            return false;
        }

        // Reap the previous worker; it has already released the flag.
        if let Some(done) = self.thread.take() {
            let _ = done.join();
        }

        let frame = Arc::clone(frame);
        let running = Arc::clone(&self.running);
        let completed = Arc::clone(&self.completed);
        let (frames, interval) = (self.frames, self.interval);

        let spawned = thread::Builder::new()
            .name("crtui-glitch".into())
            .spawn(move || {
                tracing::debug!(frames, "glitch sequence started");
                for index in 0..frames {
                    {
                        let mut buf = frame.lock().unwrap_or_else(PoisonError::into_inner);
                        buf.shift_rows(-jitter_offset(index));
                    }
                    if !interval.is_zero() {
                        thread::sleep(interval);
                    }
                }
                completed.fetch_add(1, Ordering::AcqRel);
                running.store(false, Ordering::Release);
                tracing::debug!("glitch sequence finished");
            });

        match spawned {
            Ok(handle) => {
                self.thread = Some(handle);
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "glitch sequence thread failed to spawn");
                self.running.store(false, Ordering::Release);
                false
            }
        }
    }

    /// Block until the current sequence, if any, has finished.
    pub fn join(&mut self) {
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}
