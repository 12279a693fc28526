//! The program header that prefixes the bitcode inside `DXIL`/`ILDB` parts.

use core::fmt;

use crate::error::{read_context, ContainerError};
use crate::reader::{slice_at, ByteReader};

/// Size of the program header including the embedded bitcode header.
pub const PROGRAM_HEADER_LEN: usize = 24;
/// Offset of the bitcode header inside the program header; `bitcode_offset` is relative to it.
pub const BITCODE_HEADER_OFFSET: usize = 8;
/// Bitcode header magic (`DXIL`).
pub const DXIL_MAGIC: u32 = u32::from_le_bytes(*b"DXIL");
/// The only shader model major version accepted.
pub const SHADER_MODEL_MAJOR: u32 = 6;
/// The only DXIL format major version accepted.
pub const DXIL_VERSION_MAJOR: u32 = 1;

/// Pipeline stage a program was compiled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderKind {
    /// Pixel shader.
    Pixel,
    /// Vertex shader.
    Vertex,
    /// Geometry shader.
    Geometry,
    /// Hull shader.
    Hull,
    /// Domain shader.
    Domain,
    /// Compute shader.
    Compute,
    /// Shader library.
    Library,
}

impl ShaderKind {
    /// Decodes the kind field of a program version.
    pub fn from_raw(raw: u32) -> Option<Self> {
        Some(match raw {
            0 => Self::Pixel,
            1 => Self::Vertex,
            2 => Self::Geometry,
            3 => Self::Hull,
            4 => Self::Domain,
            5 => Self::Compute,
            6 => Self::Library,
            _ => return None,
        })
    }

    /// Two-letter profile prefix (`ps`, `vs`, ...).
    pub fn profile_prefix(self) -> &'static str {
        match self {
            Self::Pixel => "ps",
            Self::Vertex => "vs",
            Self::Geometry => "gs",
            Self::Hull => "hs",
            Self::Domain => "ds",
            Self::Compute => "cs",
            Self::Library => "lib",
        }
    }
}

/// A packed program version: kind in bits 16..32, major in 4..8, minor in 0..4.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramVersion(pub u32);

impl ProgramVersion {
    /// Packs a kind and shader model into a version word.
    pub fn new(kind: ShaderKind, major: u32, minor: u32) -> Self {
        Self(((kind as u32) << 16) | ((major & 0xF) << 4) | (minor & 0xF))
    }

    /// Raw shader kind field.
    pub fn kind_raw(self) -> u32 {
        self.0 >> 16
    }

    /// Decoded shader kind, if the field holds a known value.
    pub fn kind(self) -> Option<ShaderKind> {
        ShaderKind::from_raw(self.kind_raw())
    }

    /// Shader model major version.
    pub fn major(self) -> u32 {
        (self.0 >> 4) & 0xF
    }

    /// Shader model minor version.
    pub fn minor(self) -> u32 {
        self.0 & 0xF
    }
}

impl fmt::Debug for ProgramVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            Some(kind) => write!(
                f,
                "{}_{}_{}",
                kind.profile_prefix(),
                self.major(),
                self.minor()
            ),
            None => write!(f, "ProgramVersion(0x{:08x})", self.0),
        }
    }
}

/// A validated program header and the bitcode range it describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramHeader<'a> {
    /// Packed shader kind and model.
    pub version: ProgramVersion,
    /// Declared size of the program in 32-bit words.
    pub size_in_u32: u32,
    /// DXIL format version (major in bits 8..16, minor in 0..8).
    pub dxil_version: u32,
    /// Offset of the bitcode from the bitcode header.
    pub bitcode_offset: u32,
    /// The embedded bitcode.
    pub bitcode: &'a [u8],
    shader_kind: ShaderKind,
}

impl<'a> ProgramHeader<'a> {
    /// Validates the program header at the start of `bytes` (a part payload or a
    /// bare program) and borrows the bitcode it points at.
    pub fn parse(bytes: &'a [u8]) -> Result<Self, ContainerError> {
        if bytes.len() < PROGRAM_HEADER_LEN {
            return Err(ContainerError::malformed_program_header(format!(
                "need at least {PROGRAM_HEADER_LEN} bytes, got {}",
                bytes.len()
            )));
        }

        let ctx = |what: &'static str| read_context(ContainerError::MalformedProgramHeader, what);
        let mut r = ByteReader::new(bytes);
        let version = ProgramVersion(r.read_u32_le().map_err(ctx("program_version"))?);
        let size_in_u32 = r.read_u32_le().map_err(ctx("size_in_u32"))?;
        let magic = r.read_u32_le().map_err(ctx("bitcode magic"))?;
        let dxil_version = r.read_u32_le().map_err(ctx("dxil_version"))?;
        let bitcode_offset = r.read_u32_le().map_err(ctx("bitcode_offset"))?;
        let bitcode_size = r.read_u32_le().map_err(ctx("bitcode_size"))?;

        let declared_len = u64::from(size_in_u32) * 4;
        if declared_len > bytes.len() as u64 {
            return Err(ContainerError::malformed_program_header(format!(
                "declared program size {declared_len} exceeds part length {}",
                bytes.len()
            )));
        }
        if magic != DXIL_MAGIC {
            return Err(ContainerError::malformed_program_header(format!(
                "bad bitcode magic 0x{magic:08x}"
            )));
        }
        let shader_kind = version.kind().ok_or_else(|| {
            ContainerError::malformed_program_header(format!(
                "unknown shader kind {}",
                version.kind_raw()
            ))
        })?;
        if version.major() != SHADER_MODEL_MAJOR {
            return Err(ContainerError::malformed_program_header(format!(
                "unsupported shader model {}.{}",
                version.major(),
                version.minor()
            )));
        }
        if (dxil_version >> 8) & 0xFF != DXIL_VERSION_MAJOR {
            return Err(ContainerError::malformed_program_header(format!(
                "unsupported DXIL version 0x{dxil_version:x}"
            )));
        }
        if bitcode_size == 0 {
            return Err(ContainerError::malformed_program_header(
                "bitcode is empty",
            ));
        }

        let bitcode_area = &bytes[BITCODE_HEADER_OFFSET..];
        let bitcode = slice_at(bitcode_area, bitcode_offset as usize, bitcode_size as usize)
            .map_err(|e| {
                ContainerError::malformed_program_header(format!(
                    "bitcode range does not fit in the part: {e}"
                ))
            })?;

        Ok(Self {
            version,
            size_in_u32,
            dxil_version,
            bitcode_offset,
            bitcode,
            shader_kind,
        })
    }

    /// The validated shader kind.
    pub fn shader_kind(&self) -> ShaderKind {
        self.shader_kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::build_program_header;

    #[test]
    fn version_word_round_trips() {
        let v = ProgramVersion::new(ShaderKind::Hull, 6, 2);
        assert_eq!(v.kind(), Some(ShaderKind::Hull));
        assert_eq!((v.major(), v.minor()), (6, 2));
        assert_eq!(format!("{v:?}"), "hs_6_2");
    }

    #[test]
    fn parses_valid_header() {
        let bytes = build_program_header(ShaderKind::Pixel, b"BC\xC0\xDEpayload");
        let header = ProgramHeader::parse(&bytes).expect("valid header");
        assert_eq!(header.shader_kind(), ShaderKind::Pixel);
        assert_eq!(header.bitcode, b"BC\xC0\xDEpayload");
        assert_eq!(header.bitcode_offset, 16);
    }

    #[test]
    fn rejects_bitcode_past_part_end() {
        let mut bytes = build_program_header(ShaderKind::Vertex, &[0u8; 8]);
        bytes[20..24].copy_from_slice(&9u32.to_le_bytes());
        let err = ProgramHeader::parse(&bytes).unwrap_err();
        assert!(matches!(err, ContainerError::MalformedProgramHeader(_)), "{err}");
    }

    #[test]
    fn rejects_overflowing_bitcode_range() {
        let mut bytes = build_program_header(ShaderKind::Vertex, &[0u8; 8]);
        bytes[16..20].copy_from_slice(&u32::MAX.to_le_bytes());
        assert!(ProgramHeader::parse(&bytes).is_err());
    }

    #[test]
    fn rejects_unknown_kind_and_model() {
        let mut bytes = build_program_header(ShaderKind::Vertex, &[0u8; 4]);
        bytes[0..4].copy_from_slice(&((9u32 << 16) | 0x60).to_le_bytes());
        assert!(ProgramHeader::parse(&bytes).is_err());

        bytes[0..4].copy_from_slice(&ProgramVersion::new(ShaderKind::Vertex, 5, 0).0.to_le_bytes());
        assert!(ProgramHeader::parse(&bytes).is_err());
    }

    #[test]
    fn rejects_truncated_and_oversized_declarations() {
        assert!(ProgramHeader::parse(&[0u8; 23]).is_err());

        let mut bytes = build_program_header(ShaderKind::Vertex, &[0u8; 4]);
        let too_big = (bytes.len() as u32 / 4) + 1;
        bytes[4..8].copy_from_slice(&too_big.to_le_bytes());
        assert!(ProgramHeader::parse(&bytes).is_err());
    }
}
