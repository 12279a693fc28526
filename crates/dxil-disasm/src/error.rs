use dxil_container::{ContainerError, FourCC};
use dxil_ir::IrLoadError;
use thiserror::Error;

/// Failures that abort a whole disassembly.
///
/// Problems confined to one section (a truncated signature, a missing
/// annotation, a malformed call site) never surface here; they are logged and
/// the rest of the report is still produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DisasmError {
    #[error(transparent)]
    Container(#[from] ContainerError),
    #[error("container has no {tag} part")]
    MissingRequiredPart { tag: FourCC },
    #[error("failed to load bitcode: {0}")]
    IrLoad(#[from] IrLoadError),
}
