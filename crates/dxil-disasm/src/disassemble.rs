//! Drives a whole disassembly: container sections, the module's own tables, then
//! the annotated listing.

use dxil_container::{
    parse_feature_info, parse_program_signature, parse_runtime_info, ContainerError,
    DxilContainer, FourCC, ProgramHeader,
};
use dxil_ir::{BitcodeLoader, Module, ModuleLoader};
use tracing::{debug, warn};

use crate::annotate::OpcodeAnnotator;
use crate::bindings::render_resource_bindings;
use crate::buffers::render_buffer_definitions;
use crate::config::DisasmConfig;
use crate::error::DisasmError;
use crate::features::render_feature_info;
use crate::report::Report;
use crate::runtime_info::render_runtime_info;
use crate::signature::{render_dxil_signature, render_legacy_signature, SignatureDirection};

const PATCH_CONSTANT: &str = "Patch Constant";

/// Produces the text report for a container, bare program, or raw bitcode.
#[derive(Debug, Clone)]
pub struct Disassembler<L = BitcodeLoader> {
    config: DisasmConfig,
    loader: L,
}

impl Disassembler {
    pub fn new(config: DisasmConfig) -> Self {
        Self::with_loader(config, BitcodeLoader)
    }
}

impl Default for Disassembler {
    fn default() -> Self {
        Self::new(DisasmConfig::default())
    }
}

impl<L: ModuleLoader> Disassembler<L> {
    pub fn with_loader(config: DisasmConfig, loader: L) -> Self {
        Self { config, loader }
    }

    pub fn config(&self) -> &DisasmConfig {
        &self.config
    }

    /// Disassembles `input`.
    ///
    /// Container and program-header validation failures, a container without
    /// a `DXIL` part, and loader failures abort with an error. A part that
    /// fails to decode is logged and left out of the report.
    pub fn disassemble(&self, input: &[u8]) -> Result<String, DisasmError> {
        let mut report = Report::new(self.config.comment);

        let bitcode = match DxilContainer::validate(input)? {
            Some(container) => self.render_container(&mut report, &container)?,
            None => match ProgramHeader::parse(input) {
                Ok(header) => {
                    debug!(len = header.bitcode.len(), "input is a bare program");
                    header.bitcode
                }
                Err(err) => {
                    debug!(%err, "input is not a program; treating it as raw bitcode");
                    input
                }
            },
        };

        let module = self.loader.load(bitcode, "")?;
        if module.is_dxil() {
            render_module_tables(&mut report, &module);
        }
        module.print(report.buffer_mut(), &OpcodeAnnotator);
        Ok(report.into_string())
    }

    /// Renders the container's own parts and returns the bitcode to load.
    fn render_container<'a>(
        &self,
        report: &mut Report,
        container: &DxilContainer<'a>,
    ) -> Result<&'a [u8], DisasmError> {
        debug!(summary = %container.debug_summary(), "validated container");

        if let Some(part) = container.find(FourCC::FEATURE_INFO) {
            match parse_feature_info(part.data) {
                Ok(info) => render_feature_info(report, &info),
                Err(err) => skip_section(part.fourcc, &err),
            }
        }
        let legacy_signatures = [
            (FourCC::INPUT_SIGNATURE, "Input", SignatureDirection::Input),
            (FourCC::OUTPUT_SIGNATURE, "Output", SignatureDirection::Output),
            (FourCC::PATCH_CONSTANT_SIGNATURE, PATCH_CONSTANT, SignatureDirection::Output),
        ];
        for (tag, name, direction) in legacy_signatures {
            let Some(part) = container.find(tag) else {
                continue;
            };
            match parse_program_signature(part.data) {
                Ok(signature) => render_legacy_signature(report, name, &signature, direction),
                Err(err) => skip_section(tag, &err),
            }
        }

        if container.find(FourCC::DXIL).is_none() {
            return Err(DisasmError::MissingRequiredPart { tag: FourCC::DXIL });
        }
        let program = if self.config.prefer_debug_bitcode {
            container.find_preferring(FourCC::SHADER_DEBUG_INFO_DXIL, FourCC::DXIL)
        } else {
            container.find(FourCC::DXIL)
        }
        .ok_or(DisasmError::MissingRequiredPart { tag: FourCC::DXIL })?;
        debug!(part = %program.fourcc, "selected program part");

        let header = ProgramHeader::parse(program.data)?;
        if let Some(part) = container.find(FourCC::PIPELINE_STATE_VALIDATION) {
            match parse_runtime_info(part.data, header.shader_kind()) {
                Ok(info) => render_runtime_info(report, &info),
                Err(err) => skip_section(part.fourcc, &err),
            }
        }
        Ok(header.bitcode)
    }
}

/// The signature, buffer and binding tables of a module carrying DXIL metadata.
fn render_module_tables(report: &mut Report, module: &Module) {
    let dxil = module.dxil();
    render_dxil_signature(report, "Input", &dxil.input_signature);
    render_dxil_signature(report, "Output", &dxil.output_signature);
    render_dxil_signature(report, PATCH_CONSTANT, &dxil.patch_constant_signature);
    render_buffer_definitions(report, module);
    render_resource_bindings(report, module);
}

fn skip_section(tag: FourCC, err: &ContainerError) {
    warn!(%tag, %err, "skipping undecodable part");
}

/// Disassembles `input` with the default configuration and loader.
pub fn disassemble(input: &[u8]) -> Result<String, DisasmError> {
    Disassembler::<BitcodeLoader>::default().disassemble(input)
}
