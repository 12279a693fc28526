use crate::program_header::{ProgramVersion, ShaderKind, BITCODE_HEADER_OFFSET, DXIL_MAGIC};
use crate::FourCC;

/// Builds a container holding `parts` in order.
///
/// The header digest is left zeroed; parsing never checks it.
pub fn build_container(parts: &[(FourCC, &[u8])]) -> Vec<u8> {
    // Layout:
    // - magic:          4 bytes ("DXBC")
    // - digest:        16 bytes
    // - version:        2 + 2 bytes (1.0)
    // - container_size: 4 bytes
    // - part_count:     4 bytes
    // - part_offsets:   part_count * 4 bytes
    // - parts: fourcc (4) + size (4) + payload
    let mut out = Vec::new();
    out.extend_from_slice(b"DXBC");
    out.extend_from_slice(&[0u8; 16]);
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes()); // container_size placeholder

    let part_count = u32::try_from(parts.len()).expect("part count does not fit in u32");
    out.extend_from_slice(&part_count.to_le_bytes());

    let offsets_pos = out.len();
    out.resize(out.len() + 4 * parts.len(), 0);

    for (i, (fourcc, data)) in parts.iter().enumerate() {
        let offset = u32::try_from(out.len()).expect("part offset does not fit in u32");
        out[offsets_pos + i * 4..offsets_pos + i * 4 + 4].copy_from_slice(&offset.to_le_bytes());

        let size = u32::try_from(data.len()).expect("part size does not fit in u32");
        out.extend_from_slice(&fourcc.0);
        out.extend_from_slice(&size.to_le_bytes());
        out.extend_from_slice(data);
    }

    let total = u32::try_from(out.len()).expect("container size does not fit in u32");
    out[24..28].copy_from_slice(&total.to_le_bytes());
    out
}

/// Builds a shader model 6.0 program header followed by `bitcode`, padded to a
/// whole number of 32-bit words.
pub fn build_program_header(kind: ShaderKind, bitcode: &[u8]) -> Vec<u8> {
    let padded_len = bitcode.len().div_ceil(4) * 4;
    let total = 24 + padded_len;

    let mut out = Vec::with_capacity(total);
    out.extend_from_slice(&ProgramVersion::new(kind, 6, 0).0.to_le_bytes());
    out.extend_from_slice(&((total / 4) as u32).to_le_bytes());
    out.extend_from_slice(&DXIL_MAGIC.to_le_bytes());
    out.extend_from_slice(&0x100u32.to_le_bytes()); // DXIL 1.0
    out.extend_from_slice(&((24 - BITCODE_HEADER_OFFSET) as u32).to_le_bytes());
    out.extend_from_slice(&(bitcode.len() as u32).to_le_bytes());
    out.extend_from_slice(bitcode);
    out.resize(total, 0);
    out
}

/// Field values for one legacy signature element.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignatureElementDesc<'a> {
    pub stream: u32,
    pub semantic_name: &'a str,
    pub semantic_index: u32,
    pub system_value: u32,
    pub component_type: u32,
    pub register: u32,
    pub mask: u8,
    pub rw_mask: u8,
    pub min_precision: u32,
}

/// Builds a legacy signature payload: header, 32-byte records, then the name table.
pub fn build_signature(elements: &[SignatureElementDesc<'_>]) -> Vec<u8> {
    let table_start = 8usize;
    let strings_start = table_start + elements.len() * 32;

    let mut strings = Vec::new();
    let mut name_offsets = Vec::with_capacity(elements.len());
    for e in elements {
        name_offsets.push((strings_start + strings.len()) as u32);
        strings.extend_from_slice(e.semantic_name.as_bytes());
        strings.push(0);
    }

    let mut out = Vec::new();
    out.extend_from_slice(&(elements.len() as u32).to_le_bytes());
    out.extend_from_slice(&(table_start as u32).to_le_bytes());
    for (e, name_offset) in elements.iter().zip(name_offsets) {
        out.extend_from_slice(&e.stream.to_le_bytes());
        out.extend_from_slice(&name_offset.to_le_bytes());
        out.extend_from_slice(&e.semantic_index.to_le_bytes());
        out.extend_from_slice(&e.system_value.to_le_bytes());
        out.extend_from_slice(&e.component_type.to_le_bytes());
        out.extend_from_slice(&e.register.to_le_bytes());
        out.push(e.mask);
        out.push(e.rw_mask);
        out.extend_from_slice(&0u16.to_le_bytes());
        out.extend_from_slice(&e.min_precision.to_le_bytes());
    }
    out.extend_from_slice(&strings);
    out.resize(out.len().div_ceil(4) * 4, 0);
    out
}

/// Builds a `PSV0` payload whose runtime info record is `info`.
pub fn build_psv(info: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(4 + info.len());
    out.extend_from_slice(&(info.len() as u32).to_le_bytes());
    out.extend_from_slice(info);
    out
}

/// Builds an `SFI0` payload.
pub fn build_feature_info(flags: u64) -> Vec<u8> {
    flags.to_le_bytes().to_vec()
}
