use smallvec::SmallVec;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

pub type FrameCallbackId = u64;

type FrameCallback = Box<dyn FnOnce(u64)>;

struct FrameClockInner {
    next_id: FrameCallbackId,
    callbacks: SmallVec<[(FrameCallbackId, FrameCallback); 4]>,
    last_frame_nanos: Option<u64>,
}

/// Frame-scheduling primitive.
///
/// Callbacks registered with [`FrameClock::with_frame_nanos`] run once, on the
/// next call to [`FrameClock::drain_frame_callbacks`]. A callback that wants
/// to keep animating registers itself again for the following frame.
#[derive(Clone)]
pub struct FrameClock {
    inner: Rc<RefCell<FrameClockInner>>,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(FrameClockInner {
                next_id: 1,
                callbacks: SmallVec::new(),
                last_frame_nanos: None,
            })),
        }
    }

    pub fn with_frame_nanos(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> FrameCallbackRegistration {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.callbacks.push((id, Box::new(callback)));
        FrameCallbackRegistration {
            clock: Rc::downgrade(&self.inner),
            id: Some(id),
        }
    }

    pub fn has_pending_callbacks(&self) -> bool {
        !self.inner.borrow().callbacks.is_empty()
    }

    /// Time of the most recently drained frame.
    pub fn last_frame_nanos(&self) -> Option<u64> {
        self.inner.borrow().last_frame_nanos
    }

    /// Runs every callback registered before this call and returns how many ran.
    ///
    /// Callbacks registered while draining are deferred to the next frame.
    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) -> usize {
        let pending = {
            let mut inner = self.inner.borrow_mut();
            inner.last_frame_nanos = Some(frame_time_nanos);
            std::mem::take(&mut inner.callbacks)
        };
        let count = pending.len();
        if count > 0 {
            log::trace!("frame {frame_time_nanos}: running {count} callback(s)");
        }
        for (_, callback) in pending {
            callback(frame_time_nanos);
        }
        count
    }
}

fn cancel_frame_callback(clock: &Weak<RefCell<FrameClockInner>>, id: FrameCallbackId) {
    if let Some(inner) = clock.upgrade() {
        // Cancellation may happen from inside a running callback, after the
        // callback list was already taken for draining.
        if let Ok(mut inner) = inner.try_borrow_mut() {
            inner.callbacks.retain(|(callback_id, _)| *callback_id != id);
        }
    }
}

/// Keeps a frame callback alive. Dropping it cancels the callback if it has
/// not run yet.
pub struct FrameCallbackRegistration {
    clock: Weak<RefCell<FrameClockInner>>,
    id: Option<FrameCallbackId>,
}

impl FrameCallbackRegistration {
    pub fn id(&self) -> Option<FrameCallbackId> {
        self.id
    }

    pub fn cancel(mut self) {
        if let Some(id) = self.id.take() {
            cancel_frame_callback(&self.clock, id);
        }
    }
}

impl Drop for FrameCallbackRegistration {
    fn drop(&mut self) {
        if let Some(id) = self.id.take() {
            cancel_frame_callback(&self.clock, id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn callback_runs_once_with_frame_time() {
        let clock = FrameClock::new();
        let seen = Rc::new(Cell::new(None));
        let seen_in_callback = Rc::clone(&seen);
        let _registration = clock.with_frame_nanos(move |time| seen_in_callback.set(Some(time)));

        assert_eq!(clock.drain_frame_callbacks(16_000_000), 1);
        assert_eq!(seen.get(), Some(16_000_000));
        assert_eq!(clock.drain_frame_callbacks(32_000_000), 0);
        assert_eq!(clock.last_frame_nanos(), Some(32_000_000));
    }

    #[test]
    fn dropping_registration_cancels_callback() {
        let clock = FrameClock::new();
        let fired = Rc::new(Cell::new(false));
        let fired_in_callback = Rc::clone(&fired);
        let registration = clock.with_frame_nanos(move |_| fired_in_callback.set(true));
        drop(registration);

        assert!(!clock.has_pending_callbacks());
        clock.drain_frame_callbacks(0);
        assert!(!fired.get());
    }

    #[test]
    fn callbacks_registered_while_draining_wait_for_next_frame() {
        let clock = FrameClock::new();
        let frames = Rc::new(RefCell::new(Vec::new()));
        let keep_alive: Rc<RefCell<Vec<FrameCallbackRegistration>>> =
            Rc::new(RefCell::new(Vec::new()));

        let nested_clock = clock.clone();
        let nested_frames = Rc::clone(&frames);
        let nested_keep_alive = Rc::clone(&keep_alive);
        let first = clock.with_frame_nanos(move |time| {
            nested_frames.borrow_mut().push(time);
            let frames = Rc::clone(&nested_frames);
            let registration =
                nested_clock.with_frame_nanos(move |time| frames.borrow_mut().push(time));
            nested_keep_alive.borrow_mut().push(registration);
        });
        keep_alive.borrow_mut().push(first);

        clock.drain_frame_callbacks(1);
        assert_eq!(frames.borrow().as_slice(), &[1]);
        clock.drain_frame_callbacks(2);
        assert_eq!(frames.borrow().as_slice(), &[1, 2]);
    }
}
