//! A safe, zero-copy reader for DXIL shader containers.
//!
//! The input is treated as **untrusted**: every offset and size is checked
//! before use and no function here panics on malformed data.
//!
//! Besides the container itself (`DXBC` magic, part table, [`FourCC`] tags)
//! this crate decodes the fixed-layout parts a disassembler reports on:
//!
//! - `SFI0` shader feature flags ([`features`])
//! - `ISG1`/`OSG1`/`PSG1` legacy signatures ([`signature`])
//! - `PSV0` pipeline runtime info ([`psv`])
//! - the program header in front of the `DXIL`/`ILDB` bitcode ([`program_header`])

#![forbid(unsafe_code)]

mod container;
mod error;
mod fourcc;
pub mod features;
pub mod program_header;
pub mod psv;
pub mod reader;
pub mod signature;

/// Helpers for building synthetic containers and parts in tests.
///
/// Only available to this crate's tests or with the `test-utils` feature; not
/// part of the stable API.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

#[cfg(test)]
mod tests_container;

pub use crate::container::{
    ContainerHeader, DxilContainer, Part, CONTAINER_HEADER_LEN, PART_HEADER_LEN,
};
pub use crate::error::ContainerError;
pub use crate::features::{parse_feature_info, FeatureInfo, ShaderFeatureFlags};
pub use crate::fourcc::FourCC;
pub use crate::program_header::{ProgramHeader, ProgramVersion, ShaderKind};
pub use crate::psv::{parse_runtime_info, PipelineRuntimeInfo};
pub use crate::reader::{ByteReader, ReadError};
pub use crate::signature::{parse_program_signature, ProgramSignature, SignatureElement};
