//! The DXIL view of a module: signatures, resources and annotations.

use crate::annotations::TypeSystem;
use crate::comp_type::CompType;
use crate::module::GlobalId;
use crate::types::TypeId;

/// Range size meaning "every register from the lower bound on".
pub const UNBOUNDED_RANGE: u32 = u32::MAX;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InterpolationMode {
    #[default]
    Undefined,
    Constant,
    Linear,
    LinearCentroid,
    LinearNoperspective,
    LinearNoperspectiveCentroid,
    LinearSample,
    LinearNoperspectiveSample,
    Invalid,
}

impl InterpolationMode {
    pub fn from_raw(raw: u32) -> Self {
        use InterpolationMode::*;
        match raw {
            0 => Undefined,
            1 => Constant,
            2 => Linear,
            3 => LinearCentroid,
            4 => LinearNoperspective,
            5 => LinearNoperspectiveCentroid,
            6 => LinearSample,
            7 => LinearNoperspectiveSample,
            _ => Invalid,
        }
    }

    pub fn name(self) -> &'static str {
        use InterpolationMode::*;
        match self {
            Undefined => "Undefined",
            Constant => "Constant",
            Linear => "Linear",
            LinearCentroid => "LinearCentroid",
            LinearNoperspective => "LinearNoperspective",
            LinearNoperspectiveCentroid => "LinearNoperspectiveCentroid",
            LinearSample => "LinearSample",
            LinearNoperspectiveSample => "LinearNoperspectiveSample",
            Invalid => "Invalid",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SignatureElement {
    pub name: String,
    /// One index per packed row; rendering shows the first.
    pub semantic_indices: Vec<u32>,
    pub interpolation_mode: InterpolationMode,
    pub comp_type: CompType,
    pub rows: u32,
    pub cols: u32,
    pub start_row: Option<u32>,
    pub start_col: Option<u32>,
}

impl SignatureElement {
    pub fn new(name: impl Into<String>, semantic_index: u32, mode: InterpolationMode) -> Self {
        Self {
            name: name.into(),
            semantic_indices: vec![semantic_index],
            interpolation_mode: mode,
            rows: 1,
            cols: 4,
            ..Self::default()
        }
    }

    /// First semantic index, or 0 for an element without any.
    pub fn first_semantic_index(&self) -> u32 {
        self.semantic_indices.first().copied().unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Signature {
    pub elements: Vec<SignatureElement>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceClass {
    Srv,
    Uav,
    CBuffer,
    Sampler,
}

impl ResourceClass {
    pub fn class_name(self) -> &'static str {
        match self {
            ResourceClass::Srv => "texture",
            ResourceClass::Uav => "UAV",
            ResourceClass::CBuffer => "cbuffer",
            ResourceClass::Sampler => "sampler",
        }
    }

    pub fn id_prefix(self) -> &'static str {
        match self {
            ResourceClass::Srv => "T",
            ResourceClass::Uav => "U",
            ResourceClass::CBuffer => "CB",
            ResourceClass::Sampler => "S",
        }
    }

    pub fn bind_prefix(self) -> &'static str {
        match self {
            ResourceClass::Srv => "t",
            ResourceClass::Uav => "u",
            ResourceClass::CBuffer => "cb",
            ResourceClass::Sampler => "s",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResourceKind {
    #[default]
    Invalid,
    Texture1D,
    Texture2D,
    Texture2DMS,
    Texture3D,
    TextureCube,
    Texture1DArray,
    Texture2DArray,
    Texture2DMSArray,
    TextureCubeArray,
    TypedBuffer,
    RawBuffer,
    StructuredBuffer,
    CBuffer,
    Sampler,
    TBuffer,
}

impl ResourceKind {
    pub fn dim_name(self) -> &'static str {
        use ResourceKind::*;
        match self {
            Invalid => "invalid",
            Texture1D => "1d",
            Texture2D => "2d",
            Texture2DMS => "2dMS",
            Texture3D => "3d",
            TextureCube => "cube",
            Texture1DArray => "1darray",
            Texture2DArray => "2darray",
            Texture2DMSArray => "2darrayMS",
            TextureCubeArray => "cubearray",
            TypedBuffer => "buf",
            RawBuffer => "rawbuf",
            StructuredBuffer => "structbuf",
            CBuffer => "cbuffer",
            Sampler => "sampler",
            TBuffer => "tbuffer",
        }
    }
}

/// Binding facts shared by every resource class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceBase {
    pub class: ResourceClass,
    pub kind: ResourceKind,
    pub id: u32,
    pub space: u32,
    pub lower_bound: u32,
    /// Number of registers, or [`UNBOUNDED_RANGE`].
    pub range_size: u32,
    pub global_name: String,
    /// The global whose pointee type describes the resource layout.
    pub global_symbol: Option<GlobalId>,
}

impl ResourceBase {
    pub fn new(class: ResourceClass, kind: ResourceKind, global_name: impl Into<String>) -> Self {
        Self {
            class,
            kind,
            id: 0,
            space: 0,
            lower_bound: 0,
            range_size: 1,
            global_name: global_name.into(),
            global_symbol: None,
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.range_size == UNBOUNDED_RANGE
    }
}

/// Anything listed in the resource binding table.
pub trait BoundResource {
    fn base(&self) -> &ResourceBase;

    /// Texture and buffer details, for SRVs and UAVs.
    fn as_resource(&self) -> Option<&Resource> {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CBuffer {
    pub base: ResourceBase,
    /// Declared size in bytes.
    pub size: u32,
}

impl CBuffer {
    pub fn new(global_name: impl Into<String>, size: u32) -> Self {
        Self {
            base: ResourceBase::new(ResourceClass::CBuffer, ResourceKind::CBuffer, global_name),
            size,
        }
    }
}

impl BoundResource for CBuffer {
    fn base(&self) -> &ResourceBase {
        &self.base
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SamplerKind {
    #[default]
    Default,
    Comparison,
    Mono,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sampler {
    pub base: ResourceBase,
    pub sampler_kind: SamplerKind,
}

impl Sampler {
    pub fn new(global_name: impl Into<String>) -> Self {
        Self {
            base: ResourceBase::new(ResourceClass::Sampler, ResourceKind::Sampler, global_name),
            sampler_kind: SamplerKind::Default,
        }
    }
}

impl BoundResource for Sampler {
    fn base(&self) -> &ResourceBase {
        &self.base
    }
}

/// A shader resource view or unordered access view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    pub base: ResourceBase,
    pub comp_type: CompType,
    pub sample_count: u32,
    pub has_counter: bool,
    pub globally_coherent: bool,
    pub rasterizer_ordered: bool,
    /// Element type, for structured and typed buffers.
    pub ret_type: Option<TypeId>,
    pub element_stride: u32,
}

impl Resource {
    pub fn new(class: ResourceClass, kind: ResourceKind, global_name: impl Into<String>) -> Self {
        Self {
            base: ResourceBase::new(class, kind, global_name),
            comp_type: CompType::Invalid,
            sample_count: 0,
            has_counter: false,
            globally_coherent: false,
            rasterizer_ordered: false,
            ret_type: None,
            element_stride: 0,
        }
    }

    pub fn is_structured_buffer(&self) -> bool {
        self.base.kind == ResourceKind::StructuredBuffer
    }

    pub fn is_raw_buffer(&self) -> bool {
        self.base.kind == ResourceKind::RawBuffer
    }

    pub fn is_tbuffer(&self) -> bool {
        self.base.kind == ResourceKind::TBuffer
    }
}

impl BoundResource for Resource {
    fn base(&self) -> &ResourceBase {
        &self.base
    }

    fn as_resource(&self) -> Option<&Resource> {
        Some(self)
    }
}

/// DXIL-level facts about a module.
#[derive(Debug, Clone, Default)]
pub struct DxilModule {
    pub input_signature: Signature,
    pub output_signature: Signature,
    pub patch_constant_signature: Signature,
    pub cbuffers: Vec<CBuffer>,
    pub samplers: Vec<Sampler>,
    pub srvs: Vec<Resource>,
    pub uavs: Vec<Resource>,
    pub type_system: TypeSystem,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_prefixes() {
        assert_eq!(ResourceClass::CBuffer.id_prefix(), "CB");
        assert_eq!(ResourceClass::Uav.bind_prefix(), "u");
        assert_eq!(ResourceClass::Srv.class_name(), "texture");
    }

    #[test]
    fn first_semantic_index_defaults_to_zero() {
        let mut e = SignatureElement::new("TEXCOORD", 3, InterpolationMode::Linear);
        assert_eq!(e.first_semantic_index(), 3);
        e.semantic_indices.clear();
        assert_eq!(e.first_semantic_index(), 0);
    }

    #[test]
    fn bound_resource_exposes_details_only_for_views() {
        let cb = CBuffer::new("cb", 16);
        let srv = Resource::new(ResourceClass::Srv, ResourceKind::Texture2D, "tex");
        assert!(cb.as_resource().is_none());
        assert_eq!(srv.as_resource().map(|r| r.base.kind), Some(ResourceKind::Texture2D));
        assert!(!cb.base().is_unbounded());
    }
}
