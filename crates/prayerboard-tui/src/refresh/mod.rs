//! Pull-to-refresh for the prayer list
//!
//! A mouse drag at the top of the list is damped by [`apply_resistance`] and
//! drives [`PullToRefresh`]; crossing the threshold yields a
//! [`RefreshRequest`] that the main loop hands to a [`RefreshRunner`].

pub mod controller;
pub mod indicator;
pub mod resistance;
pub mod runner;

pub use controller::{
    PullPhase, PullState, PullToRefresh, RefreshOutcome, RefreshRequest, RefreshTrigger,
};
pub use indicator::{DashPattern, IndicatorFrame};
pub use resistance::{apply_resistance, progress_for};
pub use runner::{RefreshReport, RefreshRunner, RefreshSource, StoreRefresh};
