//! Data models shared across the fetch, store and chart layers

pub mod signal;
pub mod window;

pub use signal::Signal;
pub use window::{SignalSeries, Window};
