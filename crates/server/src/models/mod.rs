//! Domain model types for addresses and locations.

pub mod address;
pub mod location;

pub use address::{Address, AddressPatch, NewAddress};
pub use location::{Location, LocationPatch, NewLocation};
