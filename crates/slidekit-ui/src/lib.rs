//! Header, slider and pull-to-refresh coordination for SlideKit
//!
//! [`SlideLayout`] arbitrates one vertical gesture stream between a
//! collapsible header, a slider resting below it and a pull-to-refresh
//! indicator, and negotiates every delta with the scrollables nested inside
//! those regions.

pub mod config;
pub mod events;
pub mod host;
pub mod margin;
pub mod refresh;
pub mod region;
pub mod slide_layout;

pub use config::{ConfigError, SlideConfig};
pub use events::{SlideEvent, SlideObservers, SubscriptionId};
pub use host::{SlideHost, WeakSlideHost};
pub use margin::MinVerticalMargin;
pub use refresh::{RefreshContainer, RefreshIndicator, RefreshPhase, RefreshPresenter};
pub use region::RegionView;
pub use slide_layout::{SlideGesture, SlideLayout};

pub mod prelude {
    pub use crate::config::SlideConfig;
    pub use crate::events::SlideEvent;
    pub use crate::refresh::{RefreshContainer, RefreshIndicator};
    pub use crate::region::RegionView;
    pub use crate::slide_layout::{SlideGesture, SlideLayout};
    pub use slidekit_foundation::prelude::*;
}

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;
