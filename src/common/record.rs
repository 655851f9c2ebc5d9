// src/common/record.rs

use super::error::ProtocolError;
use super::identity::DeviceIdentifier;

/// Size of the BQ2022 memory field (1024 bits).
pub const RECORD_LEN: usize = 128;

/// Value of the first word of a programmed battery record.
pub const BATTERY_INFO_MAGIC: u32 = 0xE54C_21ED;

// Byte layout of the record. Multi-byte fields are little endian.
//
//   0..4    magic
//   4..8    reserved
//   8       identifier bits 0..8
//   9..60   reserved
//   60      reserved
//   61..64  identifier bits 8..32
//   64..128 reserved
pub const MAGIC_OFFSET: usize = 0;
pub const ID_LOW_OFFSET: usize = 8;
pub const ID_HIGH_OFFSET: usize = 61;
const ID_HIGH_LEN: usize = 3;

/// Raw contents of the BQ2022 memory field.
#[derive(Clone, Eq, PartialEq)]
pub struct BatteryRecord([u8; RECORD_LEN]);

impl BatteryRecord {
    pub const fn from_bytes(bytes: [u8; RECORD_LEN]) -> Self {
        BatteryRecord(bytes)
    }

    /// Builds a record holding `magic` and `id`, all reserved bytes zero.
    pub fn with_identifier(magic: u32, id: DeviceIdentifier) -> Self {
        let mut bytes = [0u8; RECORD_LEN];
        bytes[MAGIC_OFFSET..MAGIC_OFFSET + 4].copy_from_slice(&magic.to_le_bytes());
        let id = id.value().to_le_bytes();
        bytes[ID_LOW_OFFSET] = id[0];
        bytes[ID_HIGH_OFFSET..ID_HIGH_OFFSET + ID_HIGH_LEN].copy_from_slice(&id[1..]);
        BatteryRecord(bytes)
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8; RECORD_LEN] {
        &self.0
    }

    pub fn magic(&self) -> u32 {
        let b = &self.0[MAGIC_OFFSET..MAGIC_OFFSET + 4];
        u32::from_le_bytes([b[0], b[1], b[2], b[3]])
    }

    /// Identifier bits 0..8.
    pub fn id_low(&self) -> u8 {
        self.0[ID_LOW_OFFSET]
    }

    /// Identifier bits 8..32, as a 24-bit value.
    pub fn id_high(&self) -> u32 {
        let b = &self.0[ID_HIGH_OFFSET..ID_HIGH_OFFSET + ID_HIGH_LEN];
        u32::from_le_bytes([b[0], b[1], b[2], 0])
    }

    pub fn identifier(&self) -> DeviceIdentifier {
        DeviceIdentifier::new(u32::from(self.id_low()) | (self.id_high() << 8))
    }

    /// Checks the magic word and decodes the identifier.
    pub fn validate<E: core::fmt::Debug>(&self) -> Result<DeviceIdentifier, ProtocolError<E>> {
        let found = self.magic();
        if found != BATTERY_INFO_MAGIC {
            return Err(ProtocolError::InvalidMagic { found });
        }
        Ok(self.identifier())
    }
}

impl Default for BatteryRecord {
    fn default() -> Self {
        BatteryRecord([0u8; RECORD_LEN])
    }
}

impl core::fmt::Debug for BatteryRecord {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BatteryRecord")
            .field("magic", &format_args!("{:#010x}", self.magic()))
            .field("id_low", &format_args!("{:#04x}", self.id_low()))
            .field("id_high", &format_args!("{:#08x}", self.id_high()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_offsets() {
        let record = BatteryRecord::with_identifier(BATTERY_INFO_MAGIC, DeviceIdentifier::new(0x1013_9465));
        let bytes = record.as_bytes();
        assert_eq!(&bytes[0..4], &[0xED, 0x21, 0x4C, 0xE5]);
        assert_eq!(bytes[8], 0x65);
        assert_eq!(bytes[60], 0x00);
        assert_eq!(&bytes[61..64], &[0x94, 0x13, 0x10]);
        assert!(bytes[64..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_field_decoding() {
        let mut bytes = [0xFFu8; RECORD_LEN];
        bytes[0..4].copy_from_slice(&BATTERY_INFO_MAGIC.to_le_bytes());
        bytes[8] = 0xAA;
        bytes[61] = 0xAC;
        bytes[62] = 0xCA;
        bytes[63] = 0xAA;
        let record = BatteryRecord::from_bytes(bytes);

        assert_eq!(record.magic(), BATTERY_INFO_MAGIC);
        assert_eq!(record.id_low(), 0xAA);
        assert_eq!(record.id_high(), 0x00AA_CAAC);
        assert_eq!(record.identifier(), DeviceIdentifier::new(0xAACA_ACAA));
    }

    #[test]
    fn test_padding_is_ignored() {
        let mut bytes = *BatteryRecord::with_identifier(BATTERY_INFO_MAGIC, DeviceIdentifier::new(0x1013_9462)).as_bytes();
        bytes[4] = 0x55;
        bytes[60] = 0x77;
        bytes[127] = 0x99;
        let record = BatteryRecord::from_bytes(bytes);
        assert_eq!(record.validate::<()>().unwrap(), DeviceIdentifier::new(0x1013_9462));
    }

    #[test]
    fn test_invalid_magic() {
        let record = BatteryRecord::with_identifier(0x1234_5678, DeviceIdentifier::new(0x1013_9462));
        assert!(matches!(
            record.validate::<()>(),
            Err(ProtocolError::InvalidMagic { found: 0x1234_5678 })
        ));

        assert!(matches!(
            BatteryRecord::default().validate::<()>(),
            Err(ProtocolError::InvalidMagic { found: 0 })
        ));
    }
}
