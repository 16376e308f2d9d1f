//! Shared data types for the Biota genetics and food-web engine.
//!
//! Everything in here is plain data with serde derives. The behaviour lives in
//! `biota_core`, which extends these types through logic traits.

pub mod data;

pub use data::*;
