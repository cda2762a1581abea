//! Core types and trait definitions for the Rollcall attendance tracker.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! Everything here is either a plain data type, a pure computation over
//! already-fetched data, or the [`store::AttendanceStore`] abstraction that
//! storage backends implement.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod aggregate;
pub mod checkin;
pub mod clock;
pub mod employee;
pub mod error;
pub mod interval;
pub mod policy;
pub mod record;
pub mod settings;
pub mod store;
pub mod view;

pub use error::{Error, Result};
