//! Simulated air-quality dashboard.
//!
//! A logged-in [`session::Session`] owns the current readings, two rolling
//! chart windows and the alert queue. [`update_loop::UpdateLoop`] ticks it on a
//! fixed period until logout.

pub mod chart;
pub mod classify;
pub mod config;
pub mod device;
pub mod login;
pub mod notification;
pub mod reading;
pub mod render;
pub mod sensor;
pub mod session;
pub mod update_loop;
