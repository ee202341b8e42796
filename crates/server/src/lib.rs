//! Waypoint server library.
//!
//! This crate provides the address/location API as a library, allowing it to
//! be tested and reused. The binary in `main.rs` wires it to a listener.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod state;
pub mod validation;
