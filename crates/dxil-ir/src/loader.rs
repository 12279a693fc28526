//! Turning bitcode bytes into a [`Module`].

use thiserror::Error;

use crate::module::{Module, UndecodedBitcode};

/// Raw LLVM bitcode magic: `BC` followed by `0x0DEC0` nibbles.
pub const BITCODE_MAGIC: [u8; 4] = [b'B', b'C', 0xC0, 0xDE];
/// Magic of the optional bitcode wrapper header.
pub const BITCODE_WRAPPER_MAGIC: u32 = 0x0B17_C0DE;
const WRAPPER_HEADER_LEN: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IrLoadError {
    #[error("bitcode is empty")]
    Empty,
    #[error("bitcode is {len} bytes, too short for a header")]
    TooShort { len: usize },
    #[error("invalid bitcode signature {found:02x?}")]
    BadMagic { found: [u8; 4] },
    #[error("bitcode wrapper range {offset}+{size} exceeds {len} bytes")]
    WrapperOutOfBounds { offset: u32, size: u32, len: usize },
    #[error("{0}")]
    Malformed(String),
}

/// Produces modules from bitcode.
pub trait ModuleLoader {
    fn load(&self, bitcode: &[u8], name: &str) -> Result<Module, IrLoadError>;
}

impl<F> ModuleLoader for F
where
    F: Fn(&[u8], &str) -> Result<Module, IrLoadError>,
{
    fn load(&self, bitcode: &[u8], name: &str) -> Result<Module, IrLoadError> {
        self(bitcode, name)
    }
}

/// Checks the bitcode signature and yields an opaque module.
///
/// The module records how much bitcode it carries but decodes none of it, so
/// it has no DXIL view and prints only its header.
#[derive(Debug, Default, Clone, Copy)]
pub struct BitcodeLoader;

impl ModuleLoader for BitcodeLoader {
    fn load(&self, bitcode: &[u8], name: &str) -> Result<Module, IrLoadError> {
        let (body, wrapped) = unwrap_bitcode(bitcode)?;
        tracing::debug!(len = body.len(), wrapped, "accepted bitcode without decoding it");
        let mut module = Module::new(name);
        module.undecoded = Some(UndecodedBitcode {
            len: body.len(),
            wrapped,
        });
        Ok(module)
    }
}

/// Strips an optional wrapper header and checks the raw bitcode magic.
///
/// Returns the raw bitcode and whether a wrapper was present.
pub fn unwrap_bitcode(bytes: &[u8]) -> Result<(&[u8], bool), IrLoadError> {
    if bytes.is_empty() {
        return Err(IrLoadError::Empty);
    }
    let Some(head) = bytes.get(..4) else {
        return Err(IrLoadError::TooShort { len: bytes.len() });
    };
    let head = [head[0], head[1], head[2], head[3]];

    if u32::from_le_bytes(head) == BITCODE_WRAPPER_MAGIC {
        let Some(header) = bytes.get(..WRAPPER_HEADER_LEN) else {
            return Err(IrLoadError::TooShort { len: bytes.len() });
        };
        let field = |at: usize| {
            u32::from_le_bytes([header[at], header[at + 1], header[at + 2], header[at + 3]])
        };
        let (offset, size) = (field(8), field(12));
        let body = (offset as usize)
            .checked_add(size as usize)
            .and_then(|end| bytes.get(offset as usize..end))
            .ok_or(IrLoadError::WrapperOutOfBounds {
                offset,
                size,
                len: bytes.len(),
            })?;
        let (body, _) = unwrap_raw(body)?;
        return Ok((body, true));
    }

    unwrap_raw(bytes)
}

fn unwrap_raw(bytes: &[u8]) -> Result<(&[u8], bool), IrLoadError> {
    match bytes.get(..4) {
        Some(head) if head == BITCODE_MAGIC => Ok((bytes, false)),
        Some(head) => Err(IrLoadError::BadMagic {
            found: [head[0], head[1], head[2], head[3]],
        }),
        None => Err(IrLoadError::TooShort { len: bytes.len() }),
    }
}
