//! Change notifications published by the coordinator.

use std::ops::RangeInclusive;

use indexmap::IndexMap;

pub type SubscriptionId = u64;

/// Something observable changed. Dispatched synchronously, in the order the
/// changes happened, inside the operation that caused them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SlideEvent {
    HeaderTopChanged(i32),
    SliderOffsetChanged(i32),
    SliderExpandChanged(bool),
    /// Visible part of the header, in header coordinates.
    HeaderVisibleRangeChanged(RangeInclusive<i32>),
    HeaderVisibilityChanged(bool),
    /// Layout was suspended and the host should run a layout pass.
    LayoutRequested,
}

type Observer = Box<dyn FnMut(&SlideEvent)>;

/// Ordered observer registry.
#[derive(Default)]
pub struct SlideObservers {
    next_id: SubscriptionId,
    observers: IndexMap<SubscriptionId, Observer>,
}

impl SlideObservers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: impl FnMut(&SlideEvent) + 'static) -> SubscriptionId {
        self.next_id += 1;
        let id = self.next_id;
        self.observers.insert(id, Box::new(observer));
        id
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.shift_remove(&id).is_some()
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    pub fn emit(&mut self, event: SlideEvent) {
        log::trace!("slide event {event:?}");
        for observer in self.observers.values_mut() {
            observer(&event);
        }
    }
}

impl std::fmt::Debug for SlideObservers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlideObservers")
            .field("count", &self.observers.len())
            .finish()
    }
}
