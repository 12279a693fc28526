use core::fmt;

use crate::error::{read_context, ContainerError};
use crate::fourcc::FourCC;
use crate::reader::{read_u32_le_at, slice_at, ByteReader};

/// Size of the fixed container header: magic + digest + version + size + part count.
pub const CONTAINER_HEADER_LEN: usize = 4 + 16 + 2 + 2 + 4 + 4;
/// Size of a part header: FourCC + payload size.
pub const PART_HEADER_LEN: usize = 4 + 4;
/// The only container major version this parser understands.
pub const CONTAINER_VERSION_MAJOR: u16 = 1;
// Real containers hold a handful of parts. The cap keeps the validation loop and
// offset table bounded on hostile input even when `container_size` is huge.
const MAX_PART_COUNT: u32 = 4096;

/// The fixed header at the start of a DXIL container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerHeader {
    /// Always [`FourCC::CONTAINER`].
    pub magic: FourCC,
    /// The hash digest stored in the header. Not verified.
    pub digest: [u8; 16],
    /// Container format major version.
    pub version_major: u16,
    /// Container format minor version.
    pub version_minor: u16,
    /// Declared size in bytes of the whole container.
    pub container_size: u32,
    /// Number of entries in the part offset table.
    pub part_count: u32,
}

/// A single tagged part, borrowed from the container bytes.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct Part<'a> {
    /// The part tag.
    pub fourcc: FourCC,
    /// Offset of the part header from the start of the container.
    pub offset: u32,
    /// The payload following the part header.
    pub data: &'a [u8],
}

impl fmt::Debug for Part<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Part")
            .field("fourcc", &self.fourcc)
            .field("offset", &self.offset)
            .field("data_len", &self.data.len())
            .finish()
    }
}

/// A validated DXIL container.
///
/// Construction checks every part range against the declared container size,
/// so part lookups afterwards cannot go out of bounds.
#[derive(Debug, Clone)]
pub struct DxilContainer<'a> {
    bytes: &'a [u8],
    header: ContainerHeader,
    part_offsets: &'a [u8],
}

impl<'a> DxilContainer<'a> {
    /// Returns `true` when `bytes` starts with the container magic.
    pub fn is_container_like(bytes: &[u8]) -> bool {
        bytes.get(..4) == Some(&FourCC::CONTAINER.0[..])
    }

    /// Validates `bytes` as a container.
    ///
    /// Returns `Ok(None)` when the magic does not match, so the caller can treat
    /// the input as a bare program instead. Once the magic matches, every
    /// structural problem is a [`ContainerError::MalformedContainer`].
    pub fn validate(bytes: &'a [u8]) -> Result<Option<DxilContainer<'a>>, ContainerError> {
        if !Self::is_container_like(bytes) {
            tracing::debug!(len = bytes.len(), "input does not start with the container magic");
            return Ok(None);
        }
        Self::parse(bytes).map(Some)
    }

    /// Parses `bytes` as a container, failing if the magic is wrong.
    pub fn parse(bytes: &'a [u8]) -> Result<DxilContainer<'a>, ContainerError> {
        if bytes.len() < CONTAINER_HEADER_LEN {
            return Err(ContainerError::malformed_container(format!(
                "need at least {CONTAINER_HEADER_LEN} bytes, got {}",
                bytes.len()
            )));
        }

        let ctx = |what: &'static str| read_context(ContainerError::MalformedContainer, what);
        let mut r = ByteReader::new(bytes);
        let magic = r.read_fourcc().map_err(ctx("magic"))?;
        if magic != FourCC::CONTAINER {
            return Err(ContainerError::malformed_container(format!(
                "bad magic {magic}, expected {}",
                FourCC::CONTAINER
            )));
        }
        let mut digest = [0u8; 16];
        digest.copy_from_slice(r.read_bytes(16).map_err(ctx("digest"))?);
        let version_major = r.read_u16_le().map_err(ctx("version major"))?;
        let version_minor = r.read_u16_le().map_err(ctx("version minor"))?;
        let container_size = r.read_u32_le().map_err(ctx("container_size"))?;
        let part_count = r.read_u32_le().map_err(ctx("part_count"))?;

        if version_major != CONTAINER_VERSION_MAJOR {
            return Err(ContainerError::malformed_container(format!(
                "unsupported container version {version_major}.{version_minor}"
            )));
        }
        if (container_size as usize) < CONTAINER_HEADER_LEN {
            return Err(ContainerError::malformed_container(format!(
                "container_size {container_size} is smaller than header size {CONTAINER_HEADER_LEN}"
            )));
        }
        if container_size as usize > bytes.len() {
            return Err(ContainerError::malformed_container(format!(
                "container_size {container_size} exceeds buffer length {}",
                bytes.len()
            )));
        }
        let bytes = &bytes[..container_size as usize];

        // Each part needs a 4-byte offset slot and an 8-byte part header.
        let max_parts_for_size = (bytes.len() - CONTAINER_HEADER_LEN) / (4 + PART_HEADER_LEN);
        if part_count > MAX_PART_COUNT || part_count as usize > max_parts_for_size {
            return Err(ContainerError::malformed_container(format!(
                "part_count {part_count} cannot fit in {container_size} bytes"
            )));
        }

        let offset_table_len = part_count as usize * 4;
        let offset_table_end = CONTAINER_HEADER_LEN + offset_table_len;
        let part_offsets = slice_at(bytes, CONTAINER_HEADER_LEN, offset_table_len)
            .map_err(ctx("part offset table"))?;

        for index in 0..part_count as usize {
            let part_offset = read_u32_le_at(part_offsets, index * 4)
                .map_err(ctx("part offset"))? as usize;
            if part_offset < offset_table_end {
                return Err(ContainerError::malformed_container(format!(
                    "part {index} offset {part_offset} points into the container header or offset table (need >= {offset_table_end})"
                )));
            }

            let header = slice_at(bytes, part_offset, PART_HEADER_LEN).map_err(|e| {
                ContainerError::malformed_container(format!("part {index} header: {e}"))
            })?;
            let fourcc = FourCC([header[0], header[1], header[2], header[3]]);
            let part_size = u32::from_le_bytes([header[4], header[5], header[6], header[7]]);
            slice_at(bytes, part_offset + PART_HEADER_LEN, part_size as usize).map_err(|e| {
                ContainerError::malformed_container(format!(
                    "part {index} ({fourcc}) payload is outside container_size: {e}"
                ))
            })?;
        }
        tracing::debug!(container_size, part_count, "container structure is valid");

        Ok(DxilContainer {
            bytes,
            header: ContainerHeader {
                magic,
                digest,
                version_major,
                version_minor,
                container_size,
                part_count,
            },
            part_offsets,
        })
    }

    /// The parsed container header.
    pub fn header(&self) -> &ContainerHeader {
        &self.header
    }

    /// The bytes covered by the declared `container_size`.
    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Number of parts in the container.
    pub fn part_count(&self) -> usize {
        self.header.part_count as usize
    }

    /// Returns the part at `index` in offset-table order.
    pub fn part(&self, index: usize) -> Option<Part<'a>> {
        let offset = read_u32_le_at(self.part_offsets, index.checked_mul(4)?).ok()?;
        let header = slice_at(self.bytes, offset as usize, PART_HEADER_LEN).ok()?;
        let fourcc = FourCC([header[0], header[1], header[2], header[3]]);
        let size = u32::from_le_bytes([header[4], header[5], header[6], header[7]]);
        let data = slice_at(
            self.bytes,
            (offset as usize).checked_add(PART_HEADER_LEN)?,
            size as usize,
        )
        .ok()?;
        Some(Part {
            fourcc,
            offset,
            data,
        })
    }

    /// Iterates over all parts in offset-table order.
    pub fn parts(&self) -> impl Iterator<Item = Part<'a>> + '_ {
        (0..self.part_count()).filter_map(move |index| self.part(index))
    }

    /// Returns the first part tagged `fourcc`, if any.
    pub fn find(&self, fourcc: FourCC) -> Option<Part<'a>> {
        self.parts().find(|part| part.fourcc == fourcc)
    }

    /// Returns the first `primary` part if present, otherwise the first `fallback` part.
    ///
    /// Used to prefer the debug-info program (`ILDB`) over the release one (`DXIL`).
    pub fn find_preferring(&self, primary: FourCC, fallback: FourCC) -> Option<Part<'a>> {
        self.find(primary).or_else(|| self.find(fallback))
    }

    /// Returns a human-readable summary of the container and its parts.
    pub fn debug_summary(&self) -> String {
        use core::fmt::Write as _;

        let mut out = String::new();
        let _ = write!(
            &mut out,
            "{} v{}.{} container_size={} part_count={}",
            self.header.magic,
            self.header.version_major,
            self.header.version_minor,
            self.header.container_size,
            self.header.part_count
        );
        for (idx, part) in self.parts().enumerate() {
            let _ = write!(
                &mut out,
                "\n  [{idx:02}] {} {} bytes",
                part.fourcc,
                part.data.len()
            );
        }
        out
    }

    /// Computes an MD5 digest over the container with the digest field zeroed.
    ///
    /// Parsing never checks the digest. Signed containers use a different hash,
    /// so a mismatch is only meaningful for containers produced by tools that
    /// store a plain MD5 here.
    #[cfg(feature = "md5")]
    pub fn compute_md5_digest(&self) -> [u8; 16] {
        let mut ctx = md5::Context::new();
        ctx.consume(&self.bytes[..4]);
        ctx.consume([0u8; 16]);
        ctx.consume(&self.bytes[20..]);
        ctx.compute().0
    }

    /// Returns `true` if [`Self::compute_md5_digest`] matches the header digest.
    #[cfg(feature = "md5")]
    pub fn digest_matches(&self) -> bool {
        self.compute_md5_digest() == self.header.digest
    }
}
