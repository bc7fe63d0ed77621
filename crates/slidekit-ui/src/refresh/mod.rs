//! Pull-to-refresh: the indicator contract, the region hosting it and the
//! presenter driving its height.

mod container;
mod indicator;
mod presenter;

pub use container::RefreshContainer;
pub use indicator::RefreshIndicator;
pub use presenter::{RefreshPhase, RefreshPresenter};
