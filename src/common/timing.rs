// src/common/timing.rs

// Standard-speed 1-Wire slot timings, in microseconds. These are the nominal
// values recommended for a master; slaves tolerate a fair margin around them.
// Only a master that drives the line itself (bit-banging) needs these.

// === Reset / presence ===

/// Master holds the line low for at least this long to reset all slaves.
pub const RESET_LOW_US: u32 = 480;
/// Delay after releasing the line before sampling for a presence pulse.
pub const PRESENCE_SAMPLE_US: u32 = 70;
/// Remainder of the reset high time after sampling (480 µs total).
pub const RESET_RECOVERY_US: u32 = 410;

// === Write slots ===

/// Low time for a write-1 slot.
pub const WRITE_ONE_LOW_US: u32 = 6;
/// High time completing a write-1 slot.
pub const WRITE_ONE_HIGH_US: u32 = 64;
/// Low time for a write-0 slot.
pub const WRITE_ZERO_LOW_US: u32 = 60;
/// Recovery after a write-0 slot.
pub const WRITE_ZERO_HIGH_US: u32 = 10;

// === Read slots ===

/// Low time starting a read slot.
pub const READ_INIT_LOW_US: u32 = 6;
/// Delay after release before sampling (sample lands 15 µs into the slot).
pub const READ_SAMPLE_US: u32 = 9;
/// Remainder of the read slot plus recovery.
pub const READ_RECOVERY_US: u32 = 55;
