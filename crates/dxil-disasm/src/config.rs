/// Options for [`crate::Disassembler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisasmConfig {
    /// Character that starts every report line.
    pub comment: char,
    /// Load the `ILDB` debug program instead of `DXIL` when a container has both.
    pub prefer_debug_bitcode: bool,
}

impl Default for DisasmConfig {
    fn default() -> Self {
        Self {
            comment: ';',
            prefer_debug_bitcode: true,
        }
    }
}
