use core::fmt;

/// A four-character part tag, stored in file byte order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FourCC(pub [u8; 4]);

impl FourCC {
    /// Container magic (`DXBC`).
    pub const CONTAINER: FourCC = FourCC(*b"DXBC");
    /// Shader feature info (`SFI0`).
    pub const FEATURE_INFO: FourCC = FourCC(*b"SFI0");
    /// Legacy input signature (`ISG1`).
    pub const INPUT_SIGNATURE: FourCC = FourCC(*b"ISG1");
    /// Legacy output signature (`OSG1`).
    pub const OUTPUT_SIGNATURE: FourCC = FourCC(*b"OSG1");
    /// Legacy patch-constant signature (`PSG1`).
    pub const PATCH_CONSTANT_SIGNATURE: FourCC = FourCC(*b"PSG1");
    /// Pipeline state validation (`PSV0`).
    pub const PIPELINE_STATE_VALIDATION: FourCC = FourCC(*b"PSV0");
    /// Release DXIL program (`DXIL`).
    pub const DXIL: FourCC = FourCC(*b"DXIL");
    /// DXIL program carrying debug info (`ILDB`).
    pub const SHADER_DEBUG_INFO_DXIL: FourCC = FourCC(*b"ILDB");

    /// Returns the tag as a little-endian `u32`, the way it is stored on disk.
    pub const fn as_u32(self) -> u32 {
        u32::from_le_bytes(self.0)
    }
}

impl From<u32> for FourCC {
    fn from(value: u32) -> Self {
        FourCC(value.to_le_bytes())
    }
}

impl fmt::Display for FourCC {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let printable = self.0.iter().all(|b| b.is_ascii_graphic() || *b == b' ');
        match core::str::from_utf8(&self.0) {
            Ok(s) if printable => f.write_str(s),
            _ => write!(
                f,
                "0x{:02x}{:02x}{:02x}{:02x}",
                self.0[0], self.0[1], self.0[2], self.0[3]
            ),
        }
    }
}

impl fmt::Debug for FourCC {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
