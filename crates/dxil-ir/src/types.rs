//! Interned IR types and the structural queries layout code needs.

use core::fmt;
use std::collections::HashMap;

/// Name prefix of the struct types that represent HLSL matrices.
pub const MATRIX_TYPE_PREFIX: &str = "class.matrix.";

/// Handle to a type in a [`TypeTable`].
///
/// Identity is structural for literal types and nominal for named structs, so
/// two handles compare equal exactly when they denote the same type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(u32);

impl TypeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Void,
    Label,
    Metadata,
    Integer { bits: u32 },
    Half,
    Float,
    Double,
    Vector { element: TypeId, len: u32 },
    Array { element: TypeId, len: u64 },
    /// A named (identified) struct. Literal structs have no name.
    Struct { name: Option<String>, fields: Vec<TypeId> },
    Pointer { pointee: TypeId, address_space: u32 },
    Function { ret: TypeId, params: Vec<TypeId> },
}

/// Owns every type of a module.
#[derive(Debug, Default, Clone)]
pub struct TypeTable {
    types: Vec<Type>,
    interned: HashMap<Type, TypeId>,
    named: HashMap<String, TypeId>,
}

impl TypeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the handle for `ty`, adding it on first use.
    ///
    /// Named structs are keyed by name: interning a second struct with an
    /// existing name returns the first one unchanged.
    pub fn intern(&mut self, ty: Type) -> TypeId {
        if let Type::Struct { name: Some(name), .. } = &ty {
            if let Some(&id) = self.named.get(name) {
                return id;
            }
        } else if let Some(&id) = self.interned.get(&ty) {
            return id;
        }

        let id = TypeId(self.types.len() as u32);
        match &ty {
            Type::Struct { name: Some(name), .. } => {
                self.named.insert(name.clone(), id);
            }
            _ => {
                self.interned.insert(ty.clone(), id);
            }
        }
        self.types.push(ty);
        id
    }

    pub fn void(&mut self) -> TypeId {
        self.intern(Type::Void)
    }

    pub fn int(&mut self, bits: u32) -> TypeId {
        self.intern(Type::Integer { bits })
    }

    pub fn half(&mut self) -> TypeId {
        self.intern(Type::Half)
    }

    pub fn float(&mut self) -> TypeId {
        self.intern(Type::Float)
    }

    pub fn double(&mut self) -> TypeId {
        self.intern(Type::Double)
    }

    pub fn vector(&mut self, element: TypeId, len: u32) -> TypeId {
        self.intern(Type::Vector { element, len })
    }

    pub fn array(&mut self, element: TypeId, len: u64) -> TypeId {
        self.intern(Type::Array { element, len })
    }

    pub fn pointer(&mut self, pointee: TypeId) -> TypeId {
        self.intern(Type::Pointer {
            pointee,
            address_space: 0,
        })
    }

    pub fn named_struct(&mut self, name: impl Into<String>, fields: Vec<TypeId>) -> TypeId {
        self.intern(Type::Struct {
            name: Some(name.into()),
            fields,
        })
    }

    pub fn function(&mut self, ret: TypeId, params: Vec<TypeId>) -> TypeId {
        self.intern(Type::Function { ret, params })
    }

    /// Builds the `class.matrix.<elem>.<rows>.<cols>` struct DXIL uses for a
    /// matrix: one array of `rows` vectors of `cols` elements.
    pub fn matrix(&mut self, element: TypeId, rows: u32, cols: u32) -> TypeId {
        let name = format!(
            "{MATRIX_TYPE_PREFIX}{}.{rows}.{cols}",
            self.display(element)
        );
        let row = self.vector(element, cols);
        let storage = self.array(row, u64::from(rows));
        self.named_struct(name, vec![storage])
    }

    /// Returns the handle of `ty` if it has already been interned.
    pub fn find(&self, ty: &Type) -> Option<TypeId> {
        match ty {
            Type::Struct { name: Some(name), .. } => self.named.get(name).copied(),
            _ => self.interned.get(ty).copied(),
        }
    }

    /// Looks up a named struct.
    pub fn struct_by_name(&self, name: &str) -> Option<TypeId> {
        self.named.get(name).copied()
    }

    pub fn get(&self, id: TypeId) -> &Type {
        &self.types[id.index()]
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Named structs in creation order.
    pub fn named_structs(&self) -> impl Iterator<Item = TypeId> + '_ {
        self.types
            .iter()
            .enumerate()
            .filter(|(_, ty)| matches!(ty, Type::Struct { name: Some(_), .. }))
            .map(|(index, _)| TypeId(index as u32))
    }

    pub fn is_array(&self, id: TypeId) -> bool {
        matches!(self.get(id), Type::Array { .. })
    }

    pub fn is_vector(&self, id: TypeId) -> bool {
        matches!(self.get(id), Type::Vector { .. })
    }

    pub fn is_struct(&self, id: TypeId) -> bool {
        matches!(self.get(id), Type::Struct { .. })
    }

    pub fn is_pointer(&self, id: TypeId) -> bool {
        matches!(self.get(id), Type::Pointer { .. })
    }

    pub fn array_element(&self, id: TypeId) -> Option<TypeId> {
        match self.get(id) {
            Type::Array { element, .. } => Some(*element),
            _ => None,
        }
    }

    pub fn array_len(&self, id: TypeId) -> Option<u64> {
        match self.get(id) {
            Type::Array { len, .. } => Some(*len),
            _ => None,
        }
    }

    pub fn vector_element(&self, id: TypeId) -> Option<TypeId> {
        match self.get(id) {
            Type::Vector { element, .. } => Some(*element),
            _ => None,
        }
    }

    pub fn vector_len(&self, id: TypeId) -> Option<u32> {
        match self.get(id) {
            Type::Vector { len, .. } => Some(*len),
            _ => None,
        }
    }

    pub fn pointee(&self, id: TypeId) -> Option<TypeId> {
        match self.get(id) {
            Type::Pointer { pointee, .. } => Some(*pointee),
            _ => None,
        }
    }

    pub fn struct_name(&self, id: TypeId) -> Option<&str> {
        match self.get(id) {
            Type::Struct { name, .. } => name.as_deref(),
            _ => None,
        }
    }

    pub fn struct_fields(&self, id: TypeId) -> &[TypeId] {
        match self.get(id) {
            Type::Struct { fields, .. } => fields,
            _ => &[],
        }
    }

    /// Whether `id` is one of the `class.matrix.*` structs.
    pub fn is_matrix(&self, id: TypeId) -> bool {
        self.struct_name(id)
            .is_some_and(|name| name.starts_with(MATRIX_TYPE_PREFIX))
    }

    /// Element scalar type of a matrix struct, or `None` if `id` is not a
    /// well-formed matrix (one field holding an array of vectors).
    pub fn matrix_element(&self, id: TypeId) -> Option<TypeId> {
        if !self.is_matrix(id) {
            return None;
        }
        let [storage] = self.struct_fields(id) else {
            return None;
        };
        let row = self.array_element(*storage)?;
        self.vector_element(row)
    }

    /// Strips every array level, returning the innermost element type.
    pub fn strip_arrays(&self, mut id: TypeId) -> TypeId {
        while let Some(element) = self.array_element(id) {
            id = element;
        }
        id
    }

    /// Returns a value that formats `id` in LLVM assembly syntax.
    pub fn display(&self, id: TypeId) -> TypeDisplay<'_> {
        TypeDisplay { table: self, id }
    }
}

/// See [`TypeTable::display`].
pub struct TypeDisplay<'a> {
    table: &'a TypeTable,
    id: TypeId,
}

impl fmt::Display for TypeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let t = self.table;
        match t.get(self.id) {
            Type::Void => f.write_str("void"),
            Type::Label => f.write_str("label"),
            Type::Metadata => f.write_str("metadata"),
            Type::Integer { bits } => write!(f, "i{bits}"),
            Type::Half => f.write_str("half"),
            Type::Float => f.write_str("float"),
            Type::Double => f.write_str("double"),
            Type::Vector { element, len } => write!(f, "<{len} x {}>", t.display(*element)),
            Type::Array { element, len } => write!(f, "[{len} x {}]", t.display(*element)),
            Type::Struct {
                name: Some(name), ..
            } => write!(f, "%{name}"),
            Type::Struct { name: None, fields } => {
                f.write_str("{ ")?;
                write_list(f, t, fields)?;
                f.write_str(" }")
            }
            Type::Pointer {
                pointee,
                address_space,
            } => {
                if *address_space == 0 {
                    write!(f, "{}*", t.display(*pointee))
                } else {
                    write!(f, "{} addrspace({address_space})*", t.display(*pointee))
                }
            }
            Type::Function { ret, params } => {
                write!(f, "{} (", t.display(*ret))?;
                write_list(f, t, params)?;
                f.write_str(")")
            }
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, table: &TypeTable, ids: &[TypeId]) -> fmt::Result {
    for (i, id) in ids.iter().enumerate() {
        if i != 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", table.display(*id))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_types_are_interned_structurally() {
        let mut t = TypeTable::new();
        let f32_a = t.float();
        let f32_b = t.float();
        assert_eq!(f32_a, f32_b);
        let v4 = t.vector(f32_a, 4);
        assert_eq!(t.vector(f32_b, 4), v4);
        assert_ne!(t.vector(f32_a, 3), v4);
    }

    #[test]
    fn named_structs_are_nominal() {
        let mut t = TypeTable::new();
        let f = t.float();
        let i = t.int(32);
        let a = t.named_struct("struct.A", vec![f]);
        let b = t.named_struct("struct.B", vec![f]);
        assert_ne!(a, b);
        assert_eq!(t.named_struct("struct.A", vec![i]), a);
        assert_eq!(t.struct_fields(a), &[f]);
        assert_eq!(t.struct_by_name("struct.B"), Some(b));
    }

    #[test]
    fn matrix_shape() {
        let mut t = TypeTable::new();
        let f = t.float();
        let m = t.matrix(f, 4, 3);
        assert!(t.is_matrix(m));
        assert_eq!(t.struct_name(m), Some("class.matrix.float.4.3"));
        assert_eq!(t.matrix_element(m), Some(f));
        let plain = t.named_struct("struct.S", vec![f]);
        assert!(!t.is_matrix(plain));
        assert_eq!(t.matrix_element(plain), None);
    }

    #[test]
    fn display_uses_assembly_syntax() {
        let mut t = TypeTable::new();
        let f = t.float();
        let v = t.vector(f, 4);
        let arr = t.array(v, 2);
        let s = t.named_struct("struct.S", vec![arr, f]);
        let p = t.pointer(s);
        let i32_ty = t.int(32);
        let void = t.void();
        let func = t.function(void, vec![i32_ty, p]);
        assert_eq!(t.display(arr).to_string(), "[2 x <4 x float>]");
        assert_eq!(t.display(p).to_string(), "%struct.S*");
        assert_eq!(t.display(func).to_string(), "void (i32, %struct.S*)");
        assert_eq!(t.strip_arrays(arr), v);
    }
}
