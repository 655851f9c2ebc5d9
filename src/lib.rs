// src/lib.rs

#![no_std] // Specify no_std at the crate root

#[cfg(any(feature = "std", test))]
extern crate std;

pub mod common;
pub mod reader;

#[cfg(feature = "impl-bitbang")]
pub mod bitbang;

// Re-export key types for convenience
pub use common::{BatteryVendor, DeviceIdentifier, OneWireBus, ProtocolError, ResistanceCode};
pub use reader::{read_identity, ReaderState};

#[cfg(feature = "std")]
pub use reader::BatteryIdentityReader;
