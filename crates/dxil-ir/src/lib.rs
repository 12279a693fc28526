//! The module model a DXIL disassembler reads.
//!
//! This crate holds just enough IR to answer what the report needs:
//! structural type queries with DXIL allocation sizes ([`types`], [`layout`]),
//! functions and call operands ([`module`]), named metadata, an assembly
//! printer with annotation hooks ([`printer`]), the DXIL view of signatures and
//! resources ([`dxil`]) and the annotation store ([`annotations`]).
//!
//! Decoding LLVM bitcode is out of scope: [`BitcodeLoader`] only checks the
//! bitcode signature. Embedders plug their own decoder through [`ModuleLoader`].

#![forbid(unsafe_code)]

pub mod annotations;
mod comp_type;
pub mod dxil;
pub mod layout;
pub mod loader;
pub mod module;
pub mod printer;
pub mod types;

pub use crate::annotations::{
    FieldAnnotation, FunctionAnnotation, InputQualifier, MatrixAnnotation, MatrixOrientation,
    ParameterAnnotation, StructAnnotation, TypeSystem,
};
pub use crate::comp_type::CompType;
pub use crate::dxil::{
    BoundResource, CBuffer, DxilModule, InterpolationMode, Resource, ResourceBase, ResourceClass,
    ResourceKind, Sampler, Signature, SignatureElement, UNBOUNDED_RANGE,
};
pub use crate::layout::DataLayout;
pub use crate::loader::{BitcodeLoader, IrLoadError, ModuleLoader};
pub use crate::module::{
    BasicBlock, Function, FunctionId, GlobalId, Instruction, InstructionKind, Module, Value,
    DXIL_VERSION_METADATA,
};
pub use crate::printer::{AnnotationWriter, NoAnnotations};
pub use crate::types::{Type, TypeId, TypeTable};
