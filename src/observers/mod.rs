//! # Event observers.
//!
//! This module provides the [`Observe`] trait and the [`ObserverSet`] the
//! executor uses to deliver retry [`Event`](crate::Event)s.
//!
//! ## Observer types
//! - **Passive observers** - log, count or alert on events
//! - **Built-in** - [`LogWriter`] (feature `logging`), prints events to stdout

mod observer;
mod set;

#[cfg(feature = "logging")]
mod log;

pub use observer::Observe;
pub use set::ObserverSet;

#[cfg(feature = "logging")]
pub use log::LogWriter;
