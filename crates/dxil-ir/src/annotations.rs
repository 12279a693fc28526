//! The annotation store: HLSL layout facts that the IR types alone do not carry.
//!
//! Struct annotations are keyed by [`TypeId`], never by struct name, and
//! lookups never mutate the store.

use std::collections::HashMap;

use crate::comp_type::CompType;
use crate::module::FunctionId;
use crate::types::{TypeId, TypeTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatrixOrientation {
    RowMajor,
    ColumnMajor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MatrixAnnotation {
    pub orientation: MatrixOrientation,
    pub rows: u32,
    pub cols: u32,
}

/// Layout facts for one struct field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldAnnotation {
    pub name: String,
    /// Byte offset of the field inside its enclosing aggregate.
    pub cbuffer_offset: u32,
    pub comp_type: CompType,
    pub matrix: Option<MatrixAnnotation>,
    pub precise: bool,
}

impl FieldAnnotation {
    pub fn new(name: impl Into<String>, cbuffer_offset: u32, comp_type: CompType) -> Self {
        Self {
            name: name.into(),
            cbuffer_offset,
            comp_type,
            ..Self::default()
        }
    }

    pub fn with_matrix(mut self, orientation: MatrixOrientation, rows: u32, cols: u32) -> Self {
        self.matrix = Some(MatrixAnnotation {
            orientation,
            rows,
            cols,
        });
        self
    }
}

/// Layout facts for one struct type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructAnnotation {
    struct_type: TypeId,
    fields: Vec<FieldAnnotation>,
    cbuffer_size: u32,
    empty: bool,
}

impl StructAnnotation {
    pub fn new(struct_type: TypeId, fields: Vec<FieldAnnotation>) -> Self {
        Self {
            struct_type,
            fields,
            cbuffer_size: 0,
            empty: false,
        }
    }

    pub fn struct_type(&self) -> TypeId {
        self.struct_type
    }

    pub fn num_fields(&self) -> usize {
        self.fields.len()
    }

    pub fn field(&self, index: usize) -> Option<&FieldAnnotation> {
        self.fields.get(index)
    }

    pub fn field_mut(&mut self, index: usize) -> Option<&mut FieldAnnotation> {
        self.fields.get_mut(index)
    }

    pub fn fields(&self) -> &[FieldAnnotation] {
        &self.fields
    }

    /// Size of the struct when packed into a constant buffer.
    pub fn cbuffer_size(&self) -> u32 {
        self.cbuffer_size
    }

    pub fn set_cbuffer_size(&mut self, size: u32) {
        self.cbuffer_size = size;
    }

    pub fn with_cbuffer_size(mut self, size: u32) -> Self {
        self.cbuffer_size = size;
        self
    }

    pub fn mark_empty_struct(&mut self) {
        self.empty = true;
    }

    pub fn is_empty_struct(&self) -> bool {
        self.empty
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InputQualifier {
    #[default]
    In,
    Out,
    InOut,
    InputPatch,
    OutputPatch,
    OutStream,
}

/// Layout facts for one function parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterAnnotation {
    pub field: FieldAnnotation,
    pub input_qualifier: InputQualifier,
    pub semantic_string: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionAnnotation {
    function: FunctionId,
    parameters: Vec<ParameterAnnotation>,
}

impl FunctionAnnotation {
    pub fn function(&self) -> FunctionId {
        self.function
    }

    pub fn num_parameters(&self) -> usize {
        self.parameters.len()
    }

    pub fn parameter(&self, index: usize) -> Option<&ParameterAnnotation> {
        self.parameters.get(index)
    }

    pub fn parameter_mut(&mut self, index: usize) -> Option<&mut ParameterAnnotation> {
        self.parameters.get_mut(index)
    }
}

/// Struct and function annotations of one module.
#[derive(Debug, Clone, Default)]
pub struct TypeSystem {
    structs: HashMap<TypeId, StructAnnotation>,
    functions: HashMap<FunctionId, FunctionAnnotation>,
}

impl TypeSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an annotation for `struct_type` with one default field annotation
    /// per struct field. Returns the existing annotation if there is one.
    pub fn add_struct_annotation(
        &mut self,
        types: &TypeTable,
        struct_type: TypeId,
    ) -> &mut StructAnnotation {
        let field_count = types.struct_fields(struct_type).len();
        self.structs.entry(struct_type).or_insert_with(|| {
            StructAnnotation::new(struct_type, vec![FieldAnnotation::default(); field_count])
        })
    }

    /// Stores a fully built annotation, replacing any previous one for its type.
    pub fn insert_struct_annotation(&mut self, annotation: StructAnnotation) {
        self.structs.insert(annotation.struct_type, annotation);
    }

    pub fn struct_annotation(&self, struct_type: TypeId) -> Option<&StructAnnotation> {
        self.structs.get(&struct_type)
    }

    pub fn erase_struct_annotation(&mut self, struct_type: TypeId) -> Option<StructAnnotation> {
        self.structs.remove(&struct_type)
    }

    /// Adds an annotation for `function` with `param_count` default parameter
    /// annotations. Returns the existing annotation if there is one.
    pub fn add_function_annotation(
        &mut self,
        function: FunctionId,
        param_count: usize,
    ) -> &mut FunctionAnnotation {
        self.functions
            .entry(function)
            .or_insert_with(|| FunctionAnnotation {
                function,
                parameters: vec![ParameterAnnotation::default(); param_count],
            })
    }

    pub fn function_annotation(&self, function: FunctionId) -> Option<&FunctionAnnotation> {
        self.functions.get(&function)
    }

    pub fn erase_function_annotation(&mut self, function: FunctionId) -> Option<FunctionAnnotation> {
        self.functions.remove(&function)
    }
}
