//! Core types for Waypoint.

pub mod id;

pub use id::*;
