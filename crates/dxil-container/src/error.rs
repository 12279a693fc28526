use thiserror::Error;

use crate::reader::ReadError;

/// Errors produced while validating or decoding a DXIL container and its parts.
///
/// Every variant carries a human-readable context string describing which
/// bounds check or field failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContainerError {
    /// The container header, part table or a part range is inconsistent.
    #[error("malformed container: {0}")]
    MalformedContainer(String),
    /// The program header embedded in a bitcode part is invalid.
    #[error("malformed program header: {0}")]
    MalformedProgramHeader(String),
    /// The `SFI0` feature info part is truncated.
    #[error("malformed feature info: {0}")]
    MalformedFeatureInfo(String),
    /// A legacy signature part (`ISG1`/`OSG1`/`PSG1`) is inconsistent.
    #[error("malformed signature: {0}")]
    MalformedSignature(String),
    /// The `PSV0` runtime info is truncated or holds an out-of-range value.
    #[error("malformed pipeline runtime info: {0}")]
    MalformedRuntimeInfo(String),
}

impl ContainerError {
    pub(crate) fn malformed_container(context: impl Into<String>) -> Self {
        Self::MalformedContainer(context.into())
    }

    pub(crate) fn malformed_program_header(context: impl Into<String>) -> Self {
        Self::MalformedProgramHeader(context.into())
    }

    pub(crate) fn malformed_feature_info(context: impl Into<String>) -> Self {
        Self::MalformedFeatureInfo(context.into())
    }

    pub(crate) fn malformed_signature(context: impl Into<String>) -> Self {
        Self::MalformedSignature(context.into())
    }

    pub(crate) fn malformed_runtime_info(context: impl Into<String>) -> Self {
        Self::MalformedRuntimeInfo(context.into())
    }

    /// Returns the context string without the variant prefix.
    pub fn context(&self) -> &str {
        match self {
            Self::MalformedContainer(ctx)
            | Self::MalformedProgramHeader(ctx)
            | Self::MalformedFeatureInfo(ctx)
            | Self::MalformedSignature(ctx)
            | Self::MalformedRuntimeInfo(ctx) => ctx,
        }
    }
}

/// Adds a field description to a [`ReadError`] and wraps it with `wrap`.
pub(crate) fn read_context(
    wrap: fn(String) -> ContainerError,
    what: &'static str,
) -> impl Fn(ReadError) -> ContainerError {
    move |err| wrap(format!("{what}: {err}"))
}
