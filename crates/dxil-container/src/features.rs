//! Decoder for the shader feature info part (`SFI0`).

use bitflags::bitflags;

use crate::error::ContainerError;

bitflags! {
    /// Optional hardware features a shader requires.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ShaderFeatureFlags: u64 {
        /// Double-precision floating point.
        const DOUBLES = 1 << 0;
        /// Raw and structured buffers.
        const COMPUTE_SHADERS_PLUS_RAW_AND_STRUCTURED_BUFFERS = 1 << 1;
        /// UAVs at every shader stage.
        const UAVS_AT_EVERY_STAGE = 1 << 2;
        /// 64 UAV slots.
        const UAVS_64 = 1 << 3;
        /// Minimum-precision data types.
        const MINIMUM_PRECISION = 1 << 4;
        /// Double-precision extensions for 11.1.
        const DOUBLE_EXTENSIONS_11_1 = 1 << 5;
        /// Shader extensions for 11.1.
        const SHADER_EXTENSIONS_11_1 = 1 << 6;
        /// Comparison filtering for feature level 9.
        const LEVEL9_COMPARISON_FILTERING = 1 << 7;
        /// Tiled resources.
        const TILED_RESOURCES = 1 << 8;
        /// Pixel shader stencil reference output.
        const STENCIL_REF = 1 << 9;
        /// Pixel shader inner coverage input.
        const INNER_COVERAGE = 1 << 10;
        /// Typed UAV loads of additional formats.
        const TYPED_UAV_LOAD_ADDITIONAL_FORMATS = 1 << 11;
        /// Rasterizer ordered views.
        const ROVS = 1 << 12;
        /// Viewport/render target array index from any stage feeding the rasterizer.
        const VIEWPORT_AND_RT_ARRAY_INDEX_FROM_ANY_SHADER = 1 << 13;
        /// Wave-level operations.
        const WAVE_OPS = 1 << 14;
        /// 64-bit integers.
        const INT64_OPS = 1 << 15;
    }
}

/// Report names for every known feature bit, in bit order.
pub const FEATURE_NAMES: [(ShaderFeatureFlags, &str); 16] = [
    (ShaderFeatureFlags::DOUBLES, "Double-precision floating point"),
    (
        ShaderFeatureFlags::COMPUTE_SHADERS_PLUS_RAW_AND_STRUCTURED_BUFFERS,
        "Raw and Structured buffers",
    ),
    (ShaderFeatureFlags::UAVS_AT_EVERY_STAGE, "UAVs at every shader stage"),
    (ShaderFeatureFlags::UAVS_64, "64 UAV slots"),
    (ShaderFeatureFlags::MINIMUM_PRECISION, "Minimum-precision data types"),
    (
        ShaderFeatureFlags::DOUBLE_EXTENSIONS_11_1,
        "Double-precision extensions for 11.1",
    ),
    (ShaderFeatureFlags::SHADER_EXTENSIONS_11_1, "Shader extensions for 11.1"),
    (
        ShaderFeatureFlags::LEVEL9_COMPARISON_FILTERING,
        "Comparison filtering for feature level 9",
    ),
    (ShaderFeatureFlags::TILED_RESOURCES, "Tiled resources"),
    (ShaderFeatureFlags::STENCIL_REF, "PS Output Stencil Ref"),
    (ShaderFeatureFlags::INNER_COVERAGE, "PS Inner Coverage"),
    (
        ShaderFeatureFlags::TYPED_UAV_LOAD_ADDITIONAL_FORMATS,
        "Typed UAV Load Additional Formats",
    ),
    (ShaderFeatureFlags::ROVS, "Raster Ordered UAVs"),
    (
        ShaderFeatureFlags::VIEWPORT_AND_RT_ARRAY_INDEX_FROM_ANY_SHADER,
        "SV_RenderTargetArrayIndex or SV_ViewportArrayIndex from any shader feeding rasterizer",
    ),
    (ShaderFeatureFlags::WAVE_OPS, "Wave level operations"),
    (ShaderFeatureFlags::INT64_OPS, "64-Bit integer"),
];

/// Decoded `SFI0` payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureInfo {
    /// The raw flag word, including bits this decoder does not name.
    pub raw: u64,
}

impl FeatureInfo {
    /// Known flags; bits above the named range are dropped.
    pub fn flags(&self) -> ShaderFeatureFlags {
        ShaderFeatureFlags::from_bits_truncate(self.raw)
    }

    /// Report names of the set, known flags in bit order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        let flags = self.flags();
        FEATURE_NAMES
            .iter()
            .filter(move |(flag, _)| flags.contains(*flag))
            .map(|(_, name)| *name)
    }
}

/// Decodes a feature info payload.
pub fn parse_feature_info(bytes: &[u8]) -> Result<FeatureInfo, ContainerError> {
    let Some(raw) = bytes.first_chunk::<8>() else {
        return Err(ContainerError::malformed_feature_info(format!(
            "payload is {} bytes, need 8",
            bytes.len()
        )));
    };
    Ok(FeatureInfo {
        raw: u64::from_le_bytes(*raw),
    })
}
