//! Frame scheduling
//!
//! The host owns the display-refresh loop. Animations register one-shot
//! callbacks that run before the next repaint and receive the frame timestamp.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// One-shot frame callback; receives the frame timestamp.
pub type FrameCallback = Box<dyn FnOnce(Duration) + Send>;

pub trait FrameScheduler: Send + Sync {
    /// Run `callback` once, before the next repaint.
    fn request_frame(&self, callback: FrameCallback);
}

/// Scheduler driven by explicit time steps.
///
/// Callbacks requested while a frame is running are deferred to the next
/// `advance`, matching how display-refresh hooks behave.
#[derive(Default)]
pub struct ManualScheduler {
    clock: Mutex<Duration>,
    pending: Mutex<Vec<FrameCallback>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        *self.clock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn pending_frames(&self) -> usize {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Move the clock forward by `dt` and run every callback queued before this call.
    ///
    /// Returns the number of callbacks run.
    pub fn advance(&self, dt: Duration) -> usize {
        let now = {
            let mut clock = self.clock.lock().unwrap_or_else(PoisonError::into_inner);
            *clock += dt;
            *clock
        };
        let due = std::mem::take(&mut *self.pending.lock().unwrap_or_else(PoisonError::into_inner));
        let n = due.len();
        for callback in due {
            callback(now);
        }
        n
    }

    /// Step at a fixed interval until no frames are pending or `max_frames` ran.
    pub fn run_until_idle(&self, frame: Duration, max_frames: usize) -> usize {
        let mut frames = 0;
        while frames < max_frames && self.pending_frames() > 0 {
            self.advance(frame);
            frames += 1;
        }
        frames
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&self, callback: FrameCallback) {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(callback);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn callbacks_receive_advanced_clock() {
        let sched = ManualScheduler::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let s = seen.clone();
        sched.request_frame(Box::new(move |t| s.lock().unwrap().push(t)));

        assert_eq!(sched.advance(Duration::from_millis(16)), 1);
        assert_eq!(sched.advance(Duration::from_millis(16)), 0);
        assert_eq!(*seen.lock().unwrap(), vec![Duration::from_millis(16)]);
        assert_eq!(sched.now(), Duration::from_millis(32));
    }

    #[test]
    fn rescheduling_inside_callback_defers_to_next_frame() {
        fn tick(sched: Arc<ManualScheduler>, count: Arc<AtomicUsize>) {
            let s = sched.clone();
            sched.request_frame(Box::new(move |_| {
                if count.fetch_add(1, Ordering::SeqCst) < 2 {
                    tick(s, count);
                }
            }));
        }

        let sched = Arc::new(ManualScheduler::new());
        let count = Arc::new(AtomicUsize::new(0));
        tick(sched.clone(), count.clone());

        assert_eq!(sched.advance(Duration::from_millis(16)), 1);
        assert_eq!(sched.pending_frames(), 1);
        let frames = sched.run_until_idle(Duration::from_millis(16), 10);
        assert_eq!(frames, 2);
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }
}
