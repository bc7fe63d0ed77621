//! Frame clock driven host wiring the bar recognizer to the layout.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use indexmap::IndexMap;
use slidekit_core::{FrameCallbackRegistration, FrameClock};
use slidekit_foundation::{PointerEvent, TargetId, TouchGestureRecognizer};

use crate::events::{SlideEvent, SubscriptionId};
use crate::slide_layout::SlideLayout;

/// Outbound work recorded while the layout or the recognizer is borrowed.
enum Effect {
    Event(SlideEvent),
    Refresh { by_pull: bool, slider_expanded: bool },
    Click,
    Finished(Box<dyn FnOnce()>),
}

type Effects = Rc<RefCell<VecDeque<Effect>>>;
type SharedObserver = Rc<RefCell<dyn FnMut(&SlideEvent)>>;
type SharedRefreshListener = Rc<RefCell<dyn FnMut(bool, bool)>>;
type SharedClick = Rc<RefCell<dyn FnMut()>>;

#[derive(Default)]
struct HostCallbacks {
    next_id: SubscriptionId,
    observers: IndexMap<SubscriptionId, SharedObserver>,
    refresh_listener: Option<SharedRefreshListener>,
    on_click: Option<SharedClick>,
}

struct HostInner {
    layout: RefCell<SlideLayout>,
    recognizer: RefCell<TouchGestureRecognizer>,
    clock: FrameClock,
    frame: RefCell<Option<FrameCallbackRegistration>>,
    effects: Effects,
    callbacks: RefCell<HostCallbacks>,
    flushing: Cell<bool>,
}

/// Owns a [`SlideLayout`] and its bar recognizer, feeds them pointer events
/// and keeps a frame callback registered while either one animates.
///
/// Callbacks registered on the host run after it released the layout and
/// the recognizer, so they may call back into the host. The host takes over
/// the layout's refresh listener and the recognizer's click callback. Anything
/// registered directly through [`with_layout`](Self::with_layout) or
/// [`with_recognizer`](Self::with_recognizer) runs inside the borrow and must
/// not touch the host.
///
/// Cloning is cheap and shares the same state.
#[derive(Clone)]
pub struct SlideHost {
    inner: Rc<HostInner>,
}

/// Non-owning handle for callbacks that talk to the host they are
/// registered on.
#[derive(Clone)]
pub struct WeakSlideHost {
    inner: Weak<HostInner>,
}

impl WeakSlideHost {
    pub fn upgrade(&self) -> Option<SlideHost> {
        self.inner.upgrade().map(|inner| SlideHost { inner })
    }
}

impl SlideHost {
    /// Wraps `layout` with a recognizer for the bar target `bar`, built with
    /// the layout's configured density.
    pub fn new(mut layout: SlideLayout, bar: TargetId, clock: FrameClock) -> Self {
        let effects: Effects = Rc::default();
        let mut recognizer = TouchGestureRecognizer::new(bar, layout.config().density);

        let sink = Rc::clone(&effects);
        layout.subscribe(move |event| sink.borrow_mut().push_back(Effect::Event(event.clone())));
        let sink = Rc::clone(&effects);
        layout.set_on_refresh_listener(move |by_pull, slider_expanded| {
            sink.borrow_mut().push_back(Effect::Refresh {
                by_pull,
                slider_expanded,
            });
        });
        let sink = Rc::clone(&effects);
        recognizer.set_on_click(move || sink.borrow_mut().push_back(Effect::Click));

        Self {
            inner: Rc::new(HostInner {
                layout: RefCell::new(layout),
                recognizer: RefCell::new(recognizer),
                clock,
                frame: RefCell::new(None),
                effects,
                callbacks: RefCell::new(HostCallbacks::default()),
                flushing: Cell::new(false),
            }),
        }
    }

    pub fn downgrade(&self) -> WeakSlideHost {
        WeakSlideHost {
            inner: Rc::downgrade(&self.inner),
        }
    }

    pub fn clock(&self) -> &FrameClock {
        &self.inner.clock
    }

    /// Runs `f` against the layout, then schedules a frame if it started
    /// animating and delivers what it queued.
    pub fn with_layout<R>(&self, f: impl FnOnce(&mut SlideLayout) -> R) -> R {
        let result = f(&mut self.inner.layout.borrow_mut());
        settle(&self.inner);
        result
    }

    pub fn with_recognizer<R>(&self, f: impl FnOnce(&mut TouchGestureRecognizer) -> R) -> R {
        let result = f(&mut self.inner.recognizer.borrow_mut());
        settle(&self.inner);
        result
    }

    /// Intercept path of the bar. Returns `true` once the bar owns the
    /// pointer stream.
    pub fn intercept_pointer_event(&self, event: &PointerEvent) -> bool {
        let intercepted = {
            let mut layout = self.inner.layout.borrow_mut();
            self.inner
                .recognizer
                .borrow_mut()
                .on_intercept_touch_event(event, &mut *layout)
        };
        settle(&self.inner);
        intercepted
    }

    /// Touch path of the bar.
    pub fn handle_pointer_event(&self, event: &PointerEvent) -> bool {
        let handled = {
            let mut layout = self.inner.layout.borrow_mut();
            self.inner
                .recognizer
                .borrow_mut()
                .on_touch_event(event, &mut *layout)
        };
        settle(&self.inner);
        handled
    }

    pub fn is_frame_scheduled(&self) -> bool {
        self.inner.frame.borrow().is_some()
    }

    pub fn subscribe(&self, observer: impl FnMut(&SlideEvent) + 'static) -> SubscriptionId {
        let mut callbacks = self.inner.callbacks.borrow_mut();
        callbacks.next_id += 1;
        let id = callbacks.next_id;
        callbacks.observers.insert(id, Rc::new(RefCell::new(observer)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.inner
            .callbacks
            .borrow_mut()
            .observers
            .shift_remove(&id)
            .is_some()
    }

    /// `listener(by_pull, slider_expanded)` runs once per loading start.
    pub fn set_on_refresh_listener(&self, listener: impl FnMut(bool, bool) + 'static) {
        self.inner.callbacks.borrow_mut().refresh_listener = Some(Rc::new(RefCell::new(listener)));
    }

    pub fn set_on_click(&self, on_click: impl FnMut() + 'static) {
        self.inner.callbacks.borrow_mut().on_click = Some(Rc::new(RefCell::new(on_click)));
    }

    /// [`SlideLayout::scroll_around_slider`] with `on_end` delivered outside
    /// the layout borrow.
    pub fn scroll_around_slider(&self, distance: i32, on_end: impl FnOnce() + 'static) {
        let sink = Rc::clone(&self.inner.effects);
        self.with_layout(move |layout| {
            layout.scroll_around_slider(distance, move || {
                sink.borrow_mut().push_back(Effect::Finished(Box::new(on_end)));
            });
        });
    }
}

fn settle(inner: &Rc<HostInner>) {
    schedule_frame(inner);
    flush(inner);
}

fn schedule_frame(inner: &Rc<HostInner>) {
    if inner.frame.borrow().is_some() {
        return;
    }
    let needs_frame =
        inner.layout.borrow().needs_frame() || inner.recognizer.borrow().needs_frame();
    if !needs_frame {
        return;
    }
    let weak: Weak<HostInner> = Rc::downgrade(inner);
    let registration = inner.clock.with_frame_nanos(move |frame_time_nanos| {
        if let Some(inner) = weak.upgrade() {
            run_frame(&inner, frame_time_nanos);
        }
    });
    *inner.frame.borrow_mut() = Some(registration);
}

fn run_frame(inner: &Rc<HostInner>, frame_time_nanos: u64) {
    inner.frame.borrow_mut().take();
    {
        let mut layout = inner.layout.borrow_mut();
        layout.on_frame(frame_time_nanos);
        inner
            .recognizer
            .borrow_mut()
            .on_frame(frame_time_nanos, &mut *layout);
    }
    settle(inner);
}

/// Delivers queued effects in order. Effects queued by a callback that
/// re-entered the host are picked up by the outermost flush.
fn flush(inner: &Rc<HostInner>) {
    if inner.flushing.replace(true) {
        return;
    }
    loop {
        let next = inner.effects.borrow_mut().pop_front();
        let Some(effect) = next else {
            break;
        };
        deliver(inner, effect);
    }
    inner.flushing.set(false);
}

fn deliver(inner: &HostInner, effect: Effect) {
    match effect {
        Effect::Event(event) => {
            let observers: Vec<SharedObserver> =
                inner.callbacks.borrow().observers.values().cloned().collect();
            for observer in observers {
                (&mut *observer.borrow_mut())(&event);
            }
        }
        Effect::Refresh {
            by_pull,
            slider_expanded,
        } => {
            let listener = inner.callbacks.borrow().refresh_listener.clone();
            if let Some(listener) = listener {
                (&mut *listener.borrow_mut())(by_pull, slider_expanded);
            }
        }
        Effect::Click => {
            let on_click = inner.callbacks.borrow().on_click.clone();
            if let Some(on_click) = on_click {
                (&mut *on_click.borrow_mut())();
            }
        }
        Effect::Finished(on_end) => on_end(),
    }
}
