//! # Domain Models
//!
//! This crate contains pure domain types with minimal dependencies (`serde`, `uuid`).
//! Keep it lean: no I/O, networking, or heavy logic. Just data and simple helpers.

pub mod config;
pub mod constants;
pub mod id;
pub mod spec;
