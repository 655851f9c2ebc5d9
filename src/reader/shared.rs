// src/reader/shared.rs

use super::ReaderState;
use crate::common::{
    commands::FAMILY_CODE,
    error::ProtocolError,
    hal_traits::OneWireBus,
    identity::{DeviceIdentifier, ResistanceCode},
};
use log::info;
use std::sync::{Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Thread-safe battery identity, shared between the bus driver (which attaches
/// and detaches) and whoever queries the classification.
///
/// The bus itself lives behind the bus master's own `Mutex`; `attach` holds it
/// for the full reset/command/read sequence so no other transaction can
/// interleave. The identity is a single scalar behind an `RwLock`, so queries
/// always see either the old or the new value.
#[derive(Debug, Default)]
pub struct BatteryIdentityReader {
    state: RwLock<ReaderState>,
}

static GLOBAL_READER: BatteryIdentityReader = BatteryIdentityReader::new();

/// Process-wide reader, for the single battery slot of a device.
pub fn global() -> &'static BatteryIdentityReader {
    &GLOBAL_READER
}

impl BatteryIdentityReader {
    pub const fn new() -> Self {
        BatteryIdentityReader { state: RwLock::new(ReaderState::new()) }
    }

    // The state is one `Option<u32>`; a panic elsewhere cannot leave it torn.
    fn read_state(&self) -> RwLockReadGuard<'_, ReaderState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, ReaderState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Locks `bus` for the whole handshake and stores the identifier on
    /// success. The bus lock is released on every exit path.
    pub fn attach<B: OneWireBus>(&self, bus: &Mutex<B>) -> Result<DeviceIdentifier, ProtocolError<B::Error>> {
        let mut guard = bus.lock().unwrap_or_else(PoisonError::into_inner);
        self.attach_exclusive(&mut *guard)
    }

    /// Same as `attach`, for callers that already hold the bus exclusively.
    pub fn attach_exclusive<B: OneWireBus>(&self, bus: &mut B) -> Result<DeviceIdentifier, ProtocolError<B::Error>> {
        // Run the bus I/O outside the state lock so queries never wait on it.
        let mut fresh = ReaderState::new();
        let id = fresh.attach(bus)?;
        *self.write_state() = fresh;
        Ok(id)
    }

    pub fn detach(&self) {
        self.write_state().detach();
    }

    pub fn has_identity(&self) -> bool {
        self.read_state().has_identity()
    }

    pub fn identifier(&self) -> Option<DeviceIdentifier> {
        self.read_state().identifier()
    }

    pub fn classification(&self) -> ResistanceCode {
        self.read_state().classification()
    }

    /// Copy of the current state, taken under one lock.
    pub fn snapshot(&self) -> ReaderState {
        *self.read_state()
    }
}

/// Hook-up to a 1-Wire bus core that binds drivers to slaves by family code.
///
/// The bus core calls `add_slave` once per newly discovered device of the
/// matching family and `remove_slave` once when it disappears.
pub trait FamilyDriver {
    const FAMILY_CODE: u8;

    fn add_slave<B: OneWireBus>(&self, bus: &Mutex<B>) -> Result<(), ProtocolError<B::Error>>;

    fn remove_slave(&self);

    /// Whether a slave whose ROM code starts with `family` belongs here.
    fn matches(family: u8) -> bool {
        family == Self::FAMILY_CODE
    }
}

impl FamilyDriver for BatteryIdentityReader {
    const FAMILY_CODE: u8 = FAMILY_CODE;

    fn add_slave<B: OneWireBus>(&self, bus: &Mutex<B>) -> Result<(), ProtocolError<B::Error>> {
        self.attach(bus).map(|_| ())
    }

    fn remove_slave(&self) {
        info!("bq2022: slave removed");
        self.detach();
    }
}
