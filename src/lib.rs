//! DXIL container tooling.
//!
//! - [`dxil_container`]: zero-copy container validation and fixed-layout part decoders.
//! - [`dxil_ir`]: the in-memory module model, annotation store and loaders.
//! - [`dxil_disasm`]: the report renderers and the disassembly pipeline.

pub use dxil_container;
pub use dxil_disasm;
pub use dxil_ir;

pub use dxil_disasm::{disassemble, DisasmConfig, DisasmError, Disassembler};
