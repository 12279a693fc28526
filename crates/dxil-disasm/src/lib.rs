//! Text disassembly of DXIL shader containers.
//!
//! [`Disassembler`] validates the container, renders the parts it understands
//! (feature flags, legacy signatures, pipeline runtime info), loads the
//! program through a [`dxil_ir::ModuleLoader`] and then prints the module's
//! signatures, buffer layouts and resource bindings ahead of the annotated
//! listing. Every report line outside the listing starts with the configured
//! comment character.

#![forbid(unsafe_code)]

mod annotate;
pub mod bindings;
pub mod buffers;
mod config;
mod disassemble;
mod error;
pub mod features;
pub mod layout;
pub mod opcodes;
mod report;
pub mod runtime_info;
pub mod signature;

pub use crate::annotate::OpcodeAnnotator;
pub use crate::config::DisasmConfig;
pub use crate::disassemble::{disassemble, Disassembler};
pub use crate::error::DisasmError;
pub use crate::layout::LayoutPrinter;
pub use crate::report::Report;
