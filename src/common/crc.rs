// src/common/crc.rs

use crc::{Crc, CRC_8_MAXIM_DOW};

// 1-Wire CRC-8 ("CRC-8/MAXIM-DOW"): poly 0x31 reflected (0x8C), init 0x00,
// no final XOR. Check value 0xA1 for "123456789".
const CRC_COMPUTER: Crc<u8> = Crc::<u8>::new(&CRC_8_MAXIM_DOW);

/// Calculates the Dallas/Maxim CRC-8 over `data`.
///
/// The chip sends this value after the echoed command/address bytes and again
/// after the memory field, so the same function verifies both.
#[inline]
pub fn calculate_crc8(data: &[u8]) -> u8 {
    CRC_COMPUTER.checksum(data)
}

/// A received CRC byte that does not match the one computed locally.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct CrcMismatch {
    /// The CRC byte read from the bus.
    pub expected: u8,
    /// The CRC computed over the data actually received.
    pub calculated: u8,
}

impl CrcMismatch {
    /// Compares a locally computed CRC with the byte read from the bus.
    #[inline]
    pub fn check(calculated: u8, received: u8) -> Result<(), CrcMismatch> {
        if calculated == received {
            Ok(())
        } else {
            Err(CrcMismatch { expected: received, calculated })
        }
    }
}

/// Verifies `received` against the CRC-8 of `data`.
///
/// # Returns
///
/// * `Ok(())` if the CRC is valid.
/// * `Err(CrcMismatch)` carrying both values otherwise.
pub fn verify_crc8(data: &[u8], received: u8) -> Result<(), CrcMismatch> {
    CrcMismatch::check(calculate_crc8(data), received)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_value() {
        assert_eq!(calculate_crc8(b"123456789"), 0xA1);
    }

    #[test]
    fn test_empty_input_is_init_value() {
        assert_eq!(calculate_crc8(&[]), 0x00);
    }

    #[test]
    fn test_rom_code_example() {
        // Family 0x02, serial 0x000001B81C, CRC 0xA2 (LSB first on the wire).
        let rom = [0x02, 0x1C, 0xB8, 0x01, 0x00, 0x00, 0x00];
        assert_eq!(calculate_crc8(&rom), 0xA2);
    }

    #[test]
    fn test_residue_is_zero() {
        // Appending the CRC to the data yields a zero remainder.
        let data = [0xF0, 0x00, 0x00];
        let crc = calculate_crc8(&data);
        let mut framed = [0u8; 4];
        framed[..3].copy_from_slice(&data);
        framed[3] = crc;
        assert_eq!(calculate_crc8(&framed), 0x00);
    }

    #[test]
    fn test_algorithm_parameters() {
        assert_eq!(CRC_8_MAXIM_DOW.poly, 0x31);
        assert_eq!(CRC_8_MAXIM_DOW.init, 0x00);
        assert!(CRC_8_MAXIM_DOW.refin && CRC_8_MAXIM_DOW.refout);
        assert_eq!(CRC_8_MAXIM_DOW.check, 0xA1);
    }

    #[test]
    fn test_check_reports_both_values() {
        assert!(CrcMismatch::check(0x8D, 0x8D).is_ok());
        assert_eq!(
            CrcMismatch::check(0x8D, 0xFF),
            Err(CrcMismatch { expected: 0xFF, calculated: 0x8D })
        );
    }

    #[test]
    fn test_verify() {
        let data = [0xF0, 0x00, 0x00];
        let crc = calculate_crc8(&data);
        assert!(verify_crc8(&data, crc).is_ok());

        let wrong = crc ^ 0x01;
        assert_eq!(
            verify_crc8(&data, wrong),
            Err(CrcMismatch { expected: wrong, calculated: crc })
        );
    }
}
