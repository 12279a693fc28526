//! Decoder for the pipeline state validation part (`PSV0`).
//!
//! The part starts with a `u32` holding the size of the runtime info record,
//! followed by that record. The first 16 bytes of the record are a per-stage
//! union; each stage gets its own decode function that reads named fields at
//! fixed offsets.

use crate::error::ContainerError;
use crate::program_header::ShaderKind;
use crate::reader::{ByteReader, ReadError};

/// Geometry shader input primitive names, indexed by the raw field.
pub const INPUT_PRIMITIVE_NAMES: [&str; 40] = [
    "invalid", "point", "line", "triangle", "invalid", "invalid", "lineadj", "triangleadj",
    "patch1", "patch2", "patch3", "patch4", "patch5", "patch6", "patch7", "patch8", "patch9",
    "patch10", "patch11", "patch12", "patch13", "patch14", "patch15", "patch16", "patch17",
    "patch18", "patch19", "patch20", "patch21", "patch22", "patch23", "patch24", "patch25",
    "patch26", "patch27", "patch28", "patch29", "patch30", "patch31", "patch32",
];

/// Geometry shader output topology names, indexed by the raw field.
pub const PRIMITIVE_TOPOLOGY_NAMES: [&str; 6] =
    ["invalid", "point", "invalid", "line", "invalid", "triangle"];

/// Tessellator domain names, indexed by the raw field.
pub const TESSELLATOR_DOMAIN_NAMES: [&str; 4] = ["invalid", "isoline", "tri", "quad"];

/// Tessellator output primitive names, indexed by the raw field.
pub const TESSELLATOR_OUTPUT_PRIMITIVE_NAMES: [&str; 5] =
    ["invalid", "point", "line", "triangle_cw", "triangle_ccw"];

/// Vertex shader runtime info.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexInfo {
    pub output_position_present: bool,
}

/// Pixel shader runtime info.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelInfo {
    pub depth_output: bool,
    pub sample_frequency: bool,
}

/// Geometry shader runtime info. Table fields are validated indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeometryInfo {
    pub input_primitive: u32,
    pub output_topology: u32,
    pub output_stream_mask: u32,
    pub output_position_present: bool,
}

impl GeometryInfo {
    pub fn input_primitive_name(&self) -> &'static str {
        table_name(&INPUT_PRIMITIVE_NAMES, self.input_primitive)
    }

    pub fn output_topology_name(&self) -> &'static str {
        table_name(&PRIMITIVE_TOPOLOGY_NAMES, self.output_topology)
    }
}

/// Hull shader runtime info. Table fields are validated indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HullInfo {
    pub input_control_point_count: u32,
    pub output_control_point_count: u32,
    pub tessellator_domain: u32,
    pub tessellator_output_primitive: u32,
}

impl HullInfo {
    pub fn tessellator_domain_name(&self) -> &'static str {
        table_name(&TESSELLATOR_DOMAIN_NAMES, self.tessellator_domain)
    }

    pub fn tessellator_output_primitive_name(&self) -> &'static str {
        table_name(
            &TESSELLATOR_OUTPUT_PRIMITIVE_NAMES,
            self.tessellator_output_primitive,
        )
    }
}

/// Domain shader runtime info.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomainInfo {
    pub input_control_point_count: u32,
    pub output_position_present: bool,
}

/// Stage-specific runtime facts, selected by the program's shader kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineRuntimeInfo {
    Vertex(VertexInfo),
    Pixel(PixelInfo),
    Geometry(GeometryInfo),
    Hull(HullInfo),
    Domain(DomainInfo),
    /// Compute and library programs carry no stage facts this decoder reports.
    Other(ShaderKind),
}

/// Decodes a `PSV0` payload for a program of the given kind.
///
/// The kind comes from the program header, never from the payload.
pub fn parse_runtime_info(
    bytes: &[u8],
    kind: ShaderKind,
) -> Result<PipelineRuntimeInfo, ContainerError> {
    let mut r = ByteReader::new(bytes);
    let declared = r
        .read_u32_le()
        .map_err(|e| ContainerError::malformed_runtime_info(format!("runtime_info_size: {e}")))?
        as usize;
    let available = r.remaining().min(declared);
    let info = r
        .read_bytes(available)
        .map_err(|e| ContainerError::malformed_runtime_info(e.to_string()))?;

    let decoded = match kind {
        ShaderKind::Vertex => decode_vertex(info).map(PipelineRuntimeInfo::Vertex),
        ShaderKind::Pixel => decode_pixel(info).map(PipelineRuntimeInfo::Pixel),
        ShaderKind::Geometry => decode_geometry(info).map(PipelineRuntimeInfo::Geometry),
        ShaderKind::Hull => decode_hull(info).map(PipelineRuntimeInfo::Hull),
        ShaderKind::Domain => decode_domain(info).map(PipelineRuntimeInfo::Domain),
        ShaderKind::Compute | ShaderKind::Library => Ok(PipelineRuntimeInfo::Other(kind)),
    };
    let decoded = decoded.map_err(|e| {
        ContainerError::malformed_runtime_info(format!(
            "{kind:?} info (declared size {declared}): {e}"
        ))
    })?;
    validate_tables(&decoded)?;
    Ok(decoded)
}

fn decode_vertex(info: &[u8]) -> Result<VertexInfo, ReadError> {
    let mut r = ByteReader::new(info);
    Ok(VertexInfo {
        output_position_present: r.read_u8()? != 0,
    })
}

fn decode_pixel(info: &[u8]) -> Result<PixelInfo, ReadError> {
    let mut r = ByteReader::new(info);
    Ok(PixelInfo {
        depth_output: r.read_u8()? != 0,
        sample_frequency: r.read_u8()? != 0,
    })
}

fn decode_geometry(info: &[u8]) -> Result<GeometryInfo, ReadError> {
    let mut r = ByteReader::new(info);
    Ok(GeometryInfo {
        input_primitive: r.read_u32_le()?,
        output_topology: r.read_u32_le()?,
        output_stream_mask: r.read_u32_le()?,
        output_position_present: r.read_u8()? != 0,
    })
}

fn decode_hull(info: &[u8]) -> Result<HullInfo, ReadError> {
    let mut r = ByteReader::new(info);
    Ok(HullInfo {
        input_control_point_count: r.read_u32_le()?,
        output_control_point_count: r.read_u32_le()?,
        tessellator_domain: r.read_u32_le()?,
        tessellator_output_primitive: r.read_u32_le()?,
    })
}

fn decode_domain(info: &[u8]) -> Result<DomainInfo, ReadError> {
    let mut r = ByteReader::new(info);
    Ok(DomainInfo {
        input_control_point_count: r.read_u32_le()?,
        output_position_present: r.read_u8()? != 0,
    })
}

fn validate_tables(info: &PipelineRuntimeInfo) -> Result<(), ContainerError> {
    let check = |what: &str, value: u32, len: usize| {
        if (value as usize) < len {
            Ok(())
        } else {
            Err(ContainerError::malformed_runtime_info(format!(
                "{what} {value} is out of range (0..{len})"
            )))
        }
    };
    match info {
        PipelineRuntimeInfo::Geometry(gs) => {
            check("input primitive", gs.input_primitive, INPUT_PRIMITIVE_NAMES.len())?;
            check(
                "output topology",
                gs.output_topology,
                PRIMITIVE_TOPOLOGY_NAMES.len(),
            )
        }
        PipelineRuntimeInfo::Hull(hs) => {
            check(
                "tessellator domain",
                hs.tessellator_domain,
                TESSELLATOR_DOMAIN_NAMES.len(),
            )?;
            check(
                "tessellator output primitive",
                hs.tessellator_output_primitive,
                TESSELLATOR_OUTPUT_PRIMITIVE_NAMES.len(),
            )
        }
        _ => Ok(()),
    }
}

fn table_name(table: &[&'static str], index: u32) -> &'static str {
    table.get(index as usize).copied().unwrap_or("invalid")
}
