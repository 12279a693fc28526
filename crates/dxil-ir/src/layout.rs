//! Allocation sizes under the DXIL data layout.
//!
//! `e-m:e-p:32:32-i1:32-i8:32-i16:32-i32:32-i64:64-f16:32-f32:32-f64:64-n8:16:32:64`:
//! every scalar narrower than 32 bits is padded to a 4-byte slot, 64-bit scalars
//! are 8-byte aligned, pointers are 32 bits, and vectors align to their size
//! rounded up to a power of two.

use crate::types::{Type, TypeId, TypeTable};

/// The data layout string every DXIL module carries.
pub const DXIL_DATA_LAYOUT: &str =
    "e-m:e-p:32:32-i1:32-i8:32-i16:32-i32:32-i64:64-f16:32-f32:32-f64:64-n8:16:32:64";

/// Size and alignment queries over a [`TypeTable`].
#[derive(Debug, Clone, Copy)]
pub struct DataLayout<'a> {
    types: &'a TypeTable,
}

impl<'a> DataLayout<'a> {
    pub fn new(types: &'a TypeTable) -> Self {
        Self { types }
    }

    /// ABI alignment in bytes.
    pub fn abi_align(&self, id: TypeId) -> u64 {
        match self.types.get(id) {
            Type::Integer { bits } if *bits > 32 => 8,
            Type::Integer { .. } | Type::Half | Type::Float | Type::Pointer { .. } => 4,
            Type::Double => 8,
            Type::Vector { .. } => self.store_size(id).next_power_of_two().max(1),
            Type::Array { element, .. } => self.abi_align(*element),
            Type::Struct { fields, .. } => fields
                .iter()
                .map(|field| self.abi_align(*field))
                .max()
                .unwrap_or(1),
            Type::Void | Type::Label | Type::Metadata | Type::Function { .. } => 1,
        }
    }

    /// Bytes written by a store of `id`, without tail padding.
    pub fn store_size(&self, id: TypeId) -> u64 {
        match self.types.get(id) {
            Type::Integer { bits } => u64::from(*bits).div_ceil(8),
            Type::Half => 2,
            Type::Float | Type::Pointer { .. } => 4,
            Type::Double => 8,
            Type::Vector { element, len } => {
                (self.scalar_bits(*element) * u64::from(*len)).div_ceil(8)
            }
            Type::Array { .. } | Type::Struct { .. } => self.alloc_size(id),
            Type::Void | Type::Label | Type::Metadata | Type::Function { .. } => 0,
        }
    }

    /// Bytes between consecutive elements of an array of `id`.
    pub fn alloc_size(&self, id: TypeId) -> u64 {
        match self.types.get(id) {
            Type::Array { element, len } => self.alloc_size(*element).saturating_mul(*len),
            Type::Struct { fields, .. } => {
                let mut offset = 0u64;
                for field in fields {
                    offset = align_to(offset, self.abi_align(*field));
                    offset = offset.saturating_add(self.alloc_size(*field));
                }
                align_to(offset, self.abi_align(id))
            }
            _ => align_to(self.store_size(id), self.abi_align(id)),
        }
    }

    fn scalar_bits(&self, id: TypeId) -> u64 {
        match self.types.get(id) {
            Type::Integer { bits } => u64::from(*bits),
            Type::Half => 16,
            Type::Float | Type::Pointer { .. } => 32,
            Type::Double => 64,
            _ => self.store_size(id) * 8,
        }
    }
}

fn align_to(value: u64, align: u64) -> u64 {
    if align <= 1 {
        return value;
    }
    value.div_ceil(align).saturating_mul(align)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrow_scalars_take_a_dword() {
        let mut t = TypeTable::new();
        let i1 = t.int(1);
        let i16 = t.int(16);
        let h = t.half();
        let i64 = t.int(64);
        let dl = DataLayout::new(&t);
        assert_eq!(dl.alloc_size(i1), 4);
        assert_eq!(dl.alloc_size(i16), 4);
        assert_eq!(dl.alloc_size(h), 4);
        assert_eq!(dl.alloc_size(i64), 8);
    }

    #[test]
    fn vectors_round_to_power_of_two() {
        let mut t = TypeTable::new();
        let f = t.float();
        let v3 = t.vector(f, 3);
        let v4 = t.vector(f, 4);
        let h = t.half();
        let h2 = t.vector(h, 2);
        let dl = DataLayout::new(&t);
        assert_eq!(dl.alloc_size(v3), 16);
        assert_eq!(dl.alloc_size(v4), 16);
        assert_eq!(dl.alloc_size(h2), 4);
    }

    #[test]
    fn structs_pad_fields_and_tail() {
        let mut t = TypeTable::new();
        let f = t.float();
        let d = t.double();
        let v3 = t.vector(f, 3);
        let arr = t.array(f, 5);
        let s = t.named_struct("struct.S", vec![f, d, v3, arr]);
        let dl = DataLayout::new(&t);
        // f @0, d @8, v3 @16 (16 bytes), arr @32 (20 bytes) -> 52, aligned to 16.
        assert_eq!(dl.alloc_size(s), 64);
        let m = t.matrix(f, 4, 4);
        let dl = DataLayout::new(&t);
        assert_eq!(dl.alloc_size(m), 64);
    }
}
