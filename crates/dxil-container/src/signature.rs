//! Decoder for the legacy fixed-layout signature parts (`ISG1`, `OSG1`, `PSG1`).

use crate::error::ContainerError;
use crate::reader::ByteReader;

/// Size of the signature part header: element count + table offset.
pub const SIGNATURE_HEADER_LEN: usize = 8;
/// Size of one element record.
pub const SIGNATURE_ELEMENT_LEN: usize = 32;
/// Register value of elements that live outside the register file (depth, coverage, ...).
pub const NO_REGISTER: u32 = u32::MAX;

/// Signature system-value semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum SystemValue {
    Undefined = 0,
    Position = 1,
    ClipDistance = 2,
    CullDistance = 3,
    RenderTargetArrayIndex = 4,
    ViewportArrayIndex = 5,
    VertexId = 6,
    PrimitiveId = 7,
    InstanceId = 8,
    IsFrontFace = 9,
    SampleIndex = 10,
    FinalQuadEdgeTessFactor = 11,
    FinalQuadInsideTessFactor = 12,
    FinalTriEdgeTessFactor = 13,
    FinalTriInsideTessFactor = 14,
    FinalLineDetailTessFactor = 15,
    FinalLineDensityTessFactor = 16,
    Target = 64,
    Depth = 65,
    Coverage = 66,
    DepthGreaterEqual = 67,
    DepthLessEqual = 68,
    StencilRef = 69,
    InnerCoverage = 70,
}

impl SystemValue {
    /// Decodes a raw system-value code.
    pub fn from_raw(raw: u32) -> Option<Self> {
        use SystemValue::*;
        Some(match raw {
            0 => Undefined,
            1 => Position,
            2 => ClipDistance,
            3 => CullDistance,
            4 => RenderTargetArrayIndex,
            5 => ViewportArrayIndex,
            6 => VertexId,
            7 => PrimitiveId,
            8 => InstanceId,
            9 => IsFrontFace,
            10 => SampleIndex,
            11 => FinalQuadEdgeTessFactor,
            12 => FinalQuadInsideTessFactor,
            13 => FinalTriEdgeTessFactor,
            14 => FinalTriInsideTessFactor,
            15 => FinalLineDetailTessFactor,
            16 => FinalLineDensityTessFactor,
            64 => Target,
            65 => Depth,
            66 => Coverage,
            67 => DepthGreaterEqual,
            68 => DepthLessEqual,
            69 => StencilRef,
            70 => InnerCoverage,
            _ => return None,
        })
    }

    /// Short column name used in signature tables.
    pub fn short_name(self) -> &'static str {
        use SystemValue::*;
        match self {
            Undefined => "NONE",
            Position => "POS",
            ClipDistance => "CLIPDST",
            CullDistance => "CULLDST",
            RenderTargetArrayIndex => "RTINDEX",
            ViewportArrayIndex => "VPINDEX",
            VertexId => "VERTID",
            PrimitiveId => "PRIMID",
            InstanceId => "INSTID",
            IsFrontFace => "FFACE",
            SampleIndex => "SAMPLE",
            FinalQuadEdgeTessFactor => "QUADEDGE",
            FinalQuadInsideTessFactor => "QUADINT",
            FinalTriEdgeTessFactor => "TRIEDGE",
            FinalTriInsideTessFactor => "TRIINT",
            FinalLineDetailTessFactor => "LINEDET",
            FinalLineDensityTessFactor => "LINEDEN",
            Target => "TARGET",
            Depth => "DEPTH",
            Coverage => "COVERAGE",
            DepthGreaterEqual => "DEPTHGE",
            DepthLessEqual => "DEPTHLE",
            StencilRef => "STENCILREF",
            InnerCoverage => "INNERCOV",
        }
    }
}

/// Register component type of a signature element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentType {
    Unknown,
    UInt32,
    SInt32,
    Float32,
    UInt16,
    SInt16,
    Float16,
    UInt64,
    SInt64,
    Float64,
}

impl ComponentType {
    /// Decodes a raw component type code.
    pub fn from_raw(raw: u32) -> Option<Self> {
        use ComponentType::*;
        Some(match raw {
            0 => Unknown,
            1 => UInt32,
            2 => SInt32,
            3 => Float32,
            4 => UInt16,
            5 => SInt16,
            6 => Float16,
            7 => UInt64,
            8 => SInt64,
            9 => Float64,
            _ => return None,
        })
    }

    /// Short column name used in signature tables.
    pub fn short_name(self) -> &'static str {
        use ComponentType::*;
        match self {
            Unknown => "unknown",
            UInt32 => "uint",
            SInt32 => "int",
            Float32 => "float",
            UInt16 => "min16u",
            SInt16 => "min16i",
            Float16 => "min16f",
            UInt64 => "uint64",
            SInt64 => "int64",
            Float64 => "double",
        }
    }
}

/// One element of a legacy signature part. The semantic name borrows the part bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignatureElement<'a> {
    /// Geometry shader output stream.
    pub stream: u32,
    /// Semantic name, e.g. `TEXCOORD`.
    pub semantic_name: &'a str,
    /// Semantic index, e.g. `1` for `TEXCOORD1`.
    pub semantic_index: u32,
    /// Raw system-value code; see [`SystemValue`].
    pub system_value: u32,
    /// Raw component type code; see [`ComponentType`].
    pub component_type: u32,
    /// Register index, or [`NO_REGISTER`].
    pub register: u32,
    /// Components present in the register.
    pub mask: u8,
    /// Always-reads mask for inputs, never-writes mask for outputs.
    pub rw_mask: u8,
    /// Raw minimum precision code.
    pub min_precision: u32,
}

impl SignatureElement<'_> {
    /// Decoded system value, if known.
    pub fn system_value(&self) -> Option<SystemValue> {
        SystemValue::from_raw(self.system_value)
    }

    /// Decoded component type, if known.
    pub fn component_type(&self) -> Option<ComponentType> {
        ComponentType::from_raw(self.component_type)
    }

    /// `false` for elements such as `SV_Depth` that have no register.
    pub fn has_register(&self) -> bool {
        self.register != NO_REGISTER
    }
}

/// A decoded legacy signature part.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgramSignature<'a> {
    /// Elements in table order.
    pub elements: Vec<SignatureElement<'a>>,
}

impl ProgramSignature<'_> {
    /// `true` when any element is assigned to a non-zero output stream.
    pub fn has_streams(&self) -> bool {
        self.elements.iter().any(|e| e.stream != 0)
    }
}

/// Decodes a legacy signature part payload.
pub fn parse_program_signature(bytes: &[u8]) -> Result<ProgramSignature<'_>, ContainerError> {
    let mut r = ByteReader::new(bytes);
    let param_count = r
        .read_u32_le()
        .map_err(|e| ContainerError::malformed_signature(format!("param_count: {e}")))?;
    let param_offset = r
        .read_u32_le()
        .map_err(|e| ContainerError::malformed_signature(format!("param_offset: {e}")))?;

    if param_count == 0 {
        return Ok(ProgramSignature::default());
    }

    let table_len = (param_count as usize)
        .checked_mul(SIGNATURE_ELEMENT_LEN)
        .ok_or_else(|| ContainerError::malformed_signature("param_count overflows table size"))?;
    let table_end = (param_offset as usize)
        .checked_add(table_len)
        .ok_or_else(|| ContainerError::malformed_signature("signature table end overflows"))?;
    if (param_offset as usize) < SIGNATURE_HEADER_LEN || table_end > bytes.len() {
        return Err(ContainerError::malformed_signature(format!(
            "signature table at {param_offset}..{table_end} is outside part length {}",
            bytes.len()
        )));
    }

    let mut elements = Vec::with_capacity(param_count as usize);
    for index in 0..param_count as usize {
        let start = param_offset as usize + index * SIGNATURE_ELEMENT_LEN;
        let element = parse_element(&r, start).map_err(|e| {
            ContainerError::malformed_signature(format!("element {index}: {e}"))
        })?;
        elements.push(element);
    }

    Ok(ProgramSignature { elements })
}

fn parse_element<'a>(
    part: &ByteReader<'a>,
    start: usize,
) -> Result<SignatureElement<'a>, crate::reader::ReadError> {
    let mut r = part.fork(start)?;
    let stream = r.read_u32_le()?;
    let name_offset = r.read_u32_le()?;
    let semantic_index = r.read_u32_le()?;
    let system_value = r.read_u32_le()?;
    let component_type = r.read_u32_le()?;
    let register = r.read_u32_le()?;
    let mask = r.read_u8()?;
    let rw_mask = r.read_u8()?;
    let _pad = r.read_u16_le()?;
    let min_precision = r.read_u32_le()?;
    let semantic_name = part.read_cstring_at(name_offset as usize)?;

    Ok(SignatureElement {
        stream,
        semantic_name,
        semantic_index,
        system_value,
        component_type,
        register,
        mask,
        rw_mask,
        min_precision,
    })
}
