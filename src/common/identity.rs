// src/common/identity.rs

use core::fmt;

/// 32-bit battery pack identifier stored in the BQ2022 memory field.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct DeviceIdentifier(u32);

impl DeviceIdentifier {
    #[inline]
    pub const fn new(value: u32) -> Self {
        DeviceIdentifier(value)
    }

    #[inline]
    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl From<u32> for DeviceIdentifier {
    fn from(value: u32) -> Self {
        DeviceIdentifier(value)
    }
}

impl From<DeviceIdentifier> for u32 {
    fn from(value: DeviceIdentifier) -> Self {
        value.0
    }
}

impl fmt::Display for DeviceIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

/// Battery ID resistor bracket, in the encoding the fuel gauge expects.
///
/// The nominal resistance step sits in bits 16..20 of the status word:
/// 12 kΩ is `0x30000`, and every +5 kΩ (roughly) adds one step, up to 38 kΩ
/// at `0x80000`. Zero means "unclassified".
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct ResistanceCode(u32);

// (kΩ, code) pairs, ascending.
const BRACKETS: [(u32, u32); 6] = [
    (12, 0x30000),
    (17, 0x40000),
    (22, 0x50000),
    (28, 0x60000),
    (33, 0x70000),
    (38, 0x80000),
];

impl ResistanceCode {
    pub const UNCLASSIFIED: ResistanceCode = ResistanceCode(0);
    pub const KOHM_12: ResistanceCode = ResistanceCode(0x30000);
    pub const KOHM_17: ResistanceCode = ResistanceCode(0x40000);
    pub const KOHM_22: ResistanceCode = ResistanceCode(0x50000);
    pub const KOHM_28: ResistanceCode = ResistanceCode(0x60000);
    pub const KOHM_33: ResistanceCode = ResistanceCode(0x70000);
    pub const KOHM_38: ResistanceCode = ResistanceCode(0x80000);

    #[inline]
    pub const fn value(&self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_classified(&self) -> bool {
        self.0 != 0
    }

    /// Looks up the code for a nominal resistor value. Only the six known
    /// brackets have a code.
    pub fn from_kohm(kohm: u32) -> Option<Self> {
        BRACKETS
            .iter()
            .find(|(k, _)| *k == kohm)
            .map(|(_, code)| ResistanceCode(*code))
    }

    /// Nominal resistor value in kΩ, `None` for unclassified/unknown codes.
    pub fn kohm(&self) -> Option<u32> {
        BRACKETS
            .iter()
            .find(|(_, code)| *code == self.0)
            .map(|(k, _)| *k)
    }
}

impl From<ResistanceCode> for u32 {
    fn from(value: ResistanceCode) -> Self {
        value.0
    }
}

/// Battery packs known to carry a BQ2022 with a programmed identifier.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BatteryVendor {
    SamsungXwd,
    Guangyu,
    SonyXwd,
    SamsungXwdCostdown,
    LgDesa,
    SonyFmt,
    Ruisheng,
    Delsa,
    Aac,
    Coslight,
    SamsungFmt,
}

impl BatteryVendor {
    pub const ALL: [BatteryVendor; 11] = [
        BatteryVendor::SamsungXwd,
        BatteryVendor::Guangyu,
        BatteryVendor::SonyXwd,
        BatteryVendor::SamsungXwdCostdown,
        BatteryVendor::LgDesa,
        BatteryVendor::SonyFmt,
        BatteryVendor::Ruisheng,
        BatteryVendor::Delsa,
        BatteryVendor::Aac,
        BatteryVendor::Coslight,
        BatteryVendor::SamsungFmt,
    ];

    pub const fn identifier(&self) -> DeviceIdentifier {
        DeviceIdentifier(match self {
            BatteryVendor::SamsungXwd => 0x1013_9461,
            BatteryVendor::Guangyu => 0x1013_9462,
            BatteryVendor::SonyXwd => 0x1013_9463,
            BatteryVendor::SamsungXwdCostdown => 0x1013_9464,
            BatteryVendor::LgDesa => 0x1013_9465,
            BatteryVendor::SonyFmt => 0x1013_9466,
            BatteryVendor::Ruisheng => 0x1013_9467,
            BatteryVendor::Delsa => 0x8412_E562,
            BatteryVendor::Aac => 0xAACA_ACAA,
            BatteryVendor::Coslight => 0xDF0C_7A62,
            BatteryVendor::SamsungFmt => 0xF40E_9762,
        })
    }

    pub const fn from_identifier(id: DeviceIdentifier) -> Option<Self> {
        match id.0 {
            0x1013_9461 => Some(BatteryVendor::SamsungXwd),
            0x1013_9462 => Some(BatteryVendor::Guangyu),
            0x1013_9463 => Some(BatteryVendor::SonyXwd),
            0x1013_9464 => Some(BatteryVendor::SamsungXwdCostdown),
            0x1013_9465 => Some(BatteryVendor::LgDesa),
            0x1013_9466 => Some(BatteryVendor::SonyFmt),
            0x1013_9467 => Some(BatteryVendor::Ruisheng),
            0x8412_E562 => Some(BatteryVendor::Delsa),
            0xAACA_ACAA => Some(BatteryVendor::Aac),
            0xDF0C_7A62 => Some(BatteryVendor::Coslight),
            0xF40E_9762 => Some(BatteryVendor::SamsungFmt),
            _ => None,
        }
    }

    pub const fn resistance_code(&self) -> ResistanceCode {
        match self {
            BatteryVendor::LgDesa | BatteryVendor::Coslight => ResistanceCode::KOHM_12,
            BatteryVendor::SamsungXwd | BatteryVendor::Aac | BatteryVendor::SamsungFmt => {
                ResistanceCode::KOHM_17
            }
            BatteryVendor::SonyXwd | BatteryVendor::SonyFmt | BatteryVendor::Delsa => {
                ResistanceCode::KOHM_22
            }
            BatteryVendor::Guangyu => ResistanceCode::KOHM_28,
            BatteryVendor::Ruisheng => ResistanceCode::KOHM_33,
            BatteryVendor::SamsungXwdCostdown => ResistanceCode::KOHM_38,
        }
    }
}

impl fmt::Display for BatteryVendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BatteryVendor::SamsungXwd => "Samsung (XWD)",
            BatteryVendor::Guangyu => "Guangyu",
            BatteryVendor::SonyXwd => "Sony (XWD)",
            BatteryVendor::SamsungXwdCostdown => "Samsung (XWD, cost-down)",
            BatteryVendor::LgDesa => "LG (Desay)",
            BatteryVendor::SonyFmt => "Sony (FMT)",
            BatteryVendor::Ruisheng => "Ruisheng",
            BatteryVendor::Delsa => "Desay",
            BatteryVendor::Aac => "AAC",
            BatteryVendor::Coslight => "Coslight",
            BatteryVendor::SamsungFmt => "Samsung (FMT)",
        };
        f.write_str(name)
    }
}

/// Maps an identifier to its resistance code; unknown identifiers are
/// unclassified.
pub const fn classify(id: DeviceIdentifier) -> ResistanceCode {
    match BatteryVendor::from_identifier(id) {
        Some(vendor) => vendor.resistance_code(),
        None => ResistanceCode::UNCLASSIFIED,
    }
}
