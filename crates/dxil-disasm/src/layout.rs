//! Reconstructs HLSL struct layouts from IR types and field annotations.
//!
//! Every field line carries an absolute byte offset: the sum of the offsets of
//! all enclosing fields plus the field's own annotated offset. Matrices are
//! stored as an extra array level in the IR type, so their row (row-major) or
//! column (column-major) count is divided out of the array size before it is
//! printed.

use dxil_ir::{
    DataLayout, FieldAnnotation, MatrixOrientation, Module, StructAnnotation, TypeId, TypeSystem,
    TypeTable,
};

use crate::report::Report;

/// Column where top-level buffer layouts place their offset comments.
pub const OFFSET_COLUMN: usize = 50;
/// Indentation of the outermost layout block.
pub const BLOCK_INDENT: usize = 3;

pub(crate) const ANNOTATION_ABSENT: &str = "(type annotation not present)";

/// Prints struct and field layouts for one module.
#[derive(Clone, Copy)]
pub struct LayoutPrinter<'a> {
    types: &'a TypeTable,
    type_system: &'a TypeSystem,
    data_layout: DataLayout<'a>,
}

impl<'a> LayoutPrinter<'a> {
    pub fn new(module: &'a Module) -> Self {
        Self::with_parts(&module.types, &module.dxil().type_system)
    }

    pub fn with_parts(types: &'a TypeTable, type_system: &'a TypeSystem) -> Self {
        Self {
            types,
            type_system,
            data_layout: DataLayout::new(types),
        }
    }

    pub fn types(&self) -> &'a TypeTable {
        self.types
    }

    pub fn alloc_size(&self, ty: TypeId) -> u64 {
        self.data_layout.alloc_size(ty)
    }

    /// The annotation for `st`, if present and shaped like the struct.
    ///
    /// An annotation whose field count differs from the struct's is treated as
    /// absent.
    pub fn annotation(&self, st: TypeId) -> Option<&'a StructAnnotation> {
        let annotation = self.type_system.struct_annotation(st)?;
        let fields = self.types.struct_fields(st).len();
        if annotation.num_fields() != fields {
            tracing::warn!(
                name = self.types.struct_name(st).unwrap_or(""),
                annotated = annotation.num_fields(),
                fields,
                "struct annotation does not match the struct; ignoring it"
            );
            return None;
        }
        Some(annotation)
    }

    /// Prints the `[N x i8]` line used when a struct has no usable annotation.
    pub fn print_placeholder(&self, report: &mut Report, indent: usize, size: u64) {
        report.line(format_args!(
            "{:indent$}[{size} x i8] {ANNOTATION_ABSENT}",
            ""
        ));
    }

    /// Prints a `struct { ... } var_name` block.
    ///
    /// Fields are indented by 4 more columns than the braces and their offset
    /// column moves 4 columns left, so the offset comments line up at every
    /// depth. `size` is printed on the closing line when nonzero.
    #[allow(clippy::too_many_arguments)]
    pub fn print_struct_layout(
        &self,
        report: &mut Report,
        st: TypeId,
        var_name: &str,
        offset: u64,
        indent: usize,
        offset_indent: usize,
        size: u64,
    ) {
        let Some(annotation) = self.annotation(st) else {
            self.print_placeholder(report, indent, self.alloc_size(st));
            return;
        };

        let c = report.comment();
        let name = self.types.struct_name(st).unwrap_or("");
        report.line(format_args!("{:indent$}struct {name}", ""));
        report.line(format_args!("{:indent$}{{", ""));
        report.blank();

        let field_types = self.types.struct_fields(st);
        for (ty, field) in field_types.iter().zip(annotation.fields()) {
            self.print_field_layout(
                report,
                *ty,
                field,
                offset,
                indent + 4,
                offset_indent.saturating_sub(4),
                0,
            );
        }

        report.line(format_args!("{:indent$}", ""));
        let width = offset_indent.saturating_sub(2);
        let mut closing = format!("{:indent$}}} {var_name:<width$}{c} Offset:{offset:>5}", "");
        if size != 0 {
            closing.push_str(&format!(" Size: {size:>5}"));
        }
        report.line(closing);
        report.blank();
    }

    /// Prints one field: a leaf line, or a nested block for struct fields.
    #[allow(clippy::too_many_arguments)]
    pub fn print_field_layout(
        &self,
        report: &mut Report,
        ty: TypeId,
        annotation: &FieldAnnotation,
        offset: u64,
        indent: usize,
        offset_indent: usize,
        size: u64,
    ) {
        let t = self.types;
        let offset = offset + u64::from(annotation.cbuffer_offset);

        if t.is_struct(ty) && annotation.matrix.is_none() {
            let label = format!("{};", annotation.name);
            self.print_struct_layout(report, ty, &label, offset, indent, offset_indent, 0);
            return;
        }

        let mut element = ty;
        let mut array_size = 0u64;
        let mut array_levels = 0u32;
        if !t.is_matrix(element) && t.is_array(element) {
            array_size = 1;
            while !t.is_matrix(element) {
                let (Some(inner), Some(len)) = (t.array_element(element), t.array_len(element))
                else {
                    break;
                };
                array_size = array_size.saturating_mul(len);
                element = inner;
                array_levels += 1;
            }
        }

        if let Some(matrix) = annotation.matrix {
            let divisor = match matrix.orientation {
                MatrixOrientation::RowMajor => matrix.rows,
                MatrixOrientation::ColumnMajor => matrix.cols,
            };
            if divisor != 0 {
                array_size /= u64::from(divisor);
            }
            if let Some(scalar) = t.vector_element(element) {
                element = scalar;
            } else if let Some(scalar) = t.matrix_element(element) {
                element = scalar;
            }
            if array_levels == 1 {
                array_size = 0;
            }
        }

        if !t.is_matrix(element) && t.is_struct(element) {
            let mut label = annotation.name.clone();
            if array_size != 0 {
                label.push_str(&format!("[{array_size}]"));
            }
            label.push(';');
            self.print_struct_layout(report, element, &label, offset, indent, offset_indent, 0);
            return;
        }

        let c = report.comment();
        let decl = self.type_and_name(ty, annotation, array_size);
        let mut line = format!("{:indent$}{decl:<offset_indent$}{c} Offset:{offset:>5}", "");
        if size != 0 {
            line.push_str(&format!(" Size: {size:>5}"));
        }
        report.line(line);
    }

    /// HLSL declaration of a leaf field, e.g. `row_major float4x4 m[2];`.
    pub fn type_and_name(&self, ty: TypeId, annotation: &FieldAnnotation, array_size: u64) -> String {
        let t = self.types;
        let ty = t.strip_arrays(ty);
        let keyword = annotation.comp_type.hlsl_name();

        let mut decl = match (annotation.matrix, t.vector_len(ty)) {
            (Some(matrix), _) => {
                let orientation = match matrix.orientation {
                    MatrixOrientation::RowMajor => "row_major",
                    MatrixOrientation::ColumnMajor => "column_major",
                };
                format!("{orientation} {keyword}{}x{}", matrix.rows, matrix.cols)
            }
            (None, Some(len)) => format!("{keyword}{len}"),
            (None, None) => keyword.to_owned(),
        };
        decl.push(' ');
        decl.push_str(&annotation.name);
        if array_size != 0 {
            decl.push_str(&format!("[{array_size}]"));
        }
        decl.push(';');
        decl
    }
}
