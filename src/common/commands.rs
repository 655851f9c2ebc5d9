// src/common/commands.rs

/// 1-Wire family code reported by the BQ2022 in its serialization ROM.
pub const FAMILY_CODE: u8 = 0x09;

// === ROM commands (command level 1) ===

/// Read the 64-bit serialization ROM and its CRC. Single-drop buses only.
pub const READ_SERIALIZATION_ROM: u8 = 0x33;
/// Address one device by its serialization ROM.
pub const MATCH_SERIALIZATION_ROM: u8 = 0x55;
/// Start the ROM search algorithm.
pub const SEARCH_SERIALIZATION_ROM: u8 = 0xF0;
/// Address every device on the bus without sending a ROM code.
pub const SKIP_SERIALIZATION_ROM: u8 = 0xCC;

// === Memory function commands (command level 2) ===

/// Read memory starting at an address; CRC of command+address, then CRC of the
/// whole field at the end of memory.
pub const READ_MEMORY_FIELD_CRC: u8 = 0xF0;
pub const READ_EPROM_STATUS: u8 = 0xAA;
/// Read memory with a CRC at the end of every 32-byte page.
pub const READ_MEMORY_PAGE_CRC: u8 = 0xC3;
pub const WRITE_MEMORY: u8 = 0x0F;
pub const PROGRAMMING_PROFILE: u8 = 0x99;
pub const WRITE_EPROM_STATUS: u8 = 0x55;

/// Program control byte, only valid in write memory / write status mode.
pub const PROGRAM_CONTROL: u8 = 0x5A;

/// A "skip ROM, read memory field with CRC" request.
///
/// On the wire this is `[SKIP_ROM, READ_MEMORY_FIELD_CRC, addr_lo, addr_hi]`.
/// The chip answers with a CRC over the last three bytes (the level 2 command
/// and the address), then streams memory from `address` to the end of the
/// field, then a CRC over the data it sent.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct ReadMemoryCommand {
    pub address: u16,
}

impl ReadMemoryCommand {
    /// Length of the formatted command.
    pub const LEN: usize = 4;

    /// Read from the start of memory.
    pub const FROM_START: ReadMemoryCommand = ReadMemoryCommand { address: 0 };

    pub const fn new(address: u16) -> Self {
        ReadMemoryCommand { address }
    }

    /// Formats the command into the bytes written to the bus.
    pub const fn to_bytes(&self) -> [u8; Self::LEN] {
        let addr = self.address.to_le_bytes();
        [SKIP_SERIALIZATION_ROM, READ_MEMORY_FIELD_CRC, addr[0], addr[1]]
    }

    /// The part of a formatted command covered by the chip's echo CRC.
    #[inline]
    pub fn crc_covered(bytes: &[u8; Self::LEN]) -> &[u8] {
        &bytes[1..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_from_start_bytes() {
        assert_eq!(
            ReadMemoryCommand::FROM_START.to_bytes(),
            [0xCC, 0xF0, 0x00, 0x00]
        );
    }

    #[test]
    fn test_address_is_little_endian() {
        assert_eq!(ReadMemoryCommand::new(0x0120).to_bytes(), [0xCC, 0xF0, 0x20, 0x01]);
    }

    #[test]
    fn test_crc_covered_skips_rom_command() {
        let bytes = ReadMemoryCommand::new(0x0102).to_bytes();
        assert_eq!(ReadMemoryCommand::crc_covered(&bytes), &[0xF0, 0x02, 0x01]);
    }
}
