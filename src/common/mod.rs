// src/common/mod.rs

// --- Declare all public modules within common ---
pub mod commands;
pub mod crc;
pub mod error;
pub mod hal_traits;
pub mod identity;
pub mod record;
pub mod timing;

// --- Re-export key types/traits/functions for easier access ---

// From commands.rs
pub use commands::{ReadMemoryCommand, FAMILY_CODE};

// From crc.rs
pub use crc::{calculate_crc8, verify_crc8, CrcMismatch};

// From error.rs
pub use error::ProtocolError;

// From hal_traits.rs
pub use hal_traits::OneWireBus;

// From identity.rs
pub use identity::{classify, BatteryVendor, DeviceIdentifier, ResistanceCode};

// From record.rs
pub use record::{BatteryRecord, RECORD_LEN};

// From timing.rs (constants - users can access via common::timing::*)
// No re-exports by default; only the bit-banged bus needs them.
