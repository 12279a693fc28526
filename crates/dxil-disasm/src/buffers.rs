//! The `Buffer Definitions` section.

use dxil_ir::{CBuffer, Module, Resource, ResourceBase, TypeId};

use crate::layout::{LayoutPrinter, ANNOTATION_ABSENT, BLOCK_INDENT, OFFSET_COLUMN};
use crate::report::Report;

/// Prints every cbuffer, then structured buffers and tbuffers among the SRVs,
/// then structured buffers among the UAVs.
pub fn render_buffer_definitions(report: &mut Report, module: &Module) {
    report.blank();
    report.line(" Buffer Definitions:");
    report.blank();

    let printer = LayoutPrinter::new(module);
    let dxil = module.dxil();
    for cbuffer in &dxil.cbuffers {
        render_cbuffer(report, module, &printer, cbuffer);
    }
    for srv in &dxil.srvs {
        if srv.is_structured_buffer() {
            render_structured_buffer(report, module, &printer, srv);
        } else if srv.is_tbuffer() {
            render_tbuffer(report, module, &printer, srv);
        }
    }
    for uav in dxil.uavs.iter().filter(|uav| uav.is_structured_buffer()) {
        render_structured_buffer(report, module, &printer, uav);
    }
}

/// The struct a resource's global points at, looking through one level of
/// resource array.
fn layout_struct(module: &Module, base: &ResourceBase) -> Option<TypeId> {
    let Some(global) = base.global_symbol.and_then(|id| module.global(id)) else {
        tracing::warn!(name = %base.global_name, "resource has no global symbol");
        return None;
    };
    let types = &module.types;
    let ty = types.array_element(global.value_type).unwrap_or(global.value_type);
    types.is_struct(ty).then_some(ty)
}

fn open_block(report: &mut Report, title: impl std::fmt::Display) {
    report.line(title);
    report.line(" {");
    report.blank();
}

fn close_block(report: &mut Report) {
    report.line(" }");
    report.blank();
}

fn render_cbuffer(report: &mut Report, module: &Module, printer: &LayoutPrinter, cbuffer: &CBuffer) {
    let name = &cbuffer.base.global_name;
    open_block(report, format_args!(" cbuffer {name}"));
    match layout_struct(module, &cbuffer.base).filter(|st| printer.annotation(*st).is_some()) {
        Some(st) => printer.print_struct_layout(
            report,
            st,
            name,
            0,
            BLOCK_INDENT,
            OFFSET_COLUMN,
            u64::from(cbuffer.size),
        ),
        None => {
            report.line(format_args!("   [{} x i8] {ANNOTATION_ABSENT}", cbuffer.size));
            report.blank();
        }
    }
    close_block(report);
}

fn render_tbuffer(report: &mut Report, module: &Module, printer: &LayoutPrinter, tbuffer: &Resource) {
    let name = &tbuffer.base.global_name;
    open_block(report, format_args!(" tbuffer {name}"));
    let annotated = layout_struct(module, &tbuffer.base)
        .and_then(|st| printer.annotation(st).map(|annotation| (st, annotation)));
    match annotated {
        Some((st, annotation)) => printer.print_struct_layout(
            report,
            st,
            name,
            0,
            BLOCK_INDENT,
            OFFSET_COLUMN,
            u64::from(annotation.cbuffer_size()),
        ),
        None => {
            report.line(format_args!("   {ANNOTATION_ABSENT}"));
            report.blank();
        }
    }
    close_block(report);
}

fn render_structured_buffer(
    report: &mut Report,
    module: &Module,
    printer: &LayoutPrinter,
    buffer: &Resource,
) {
    open_block(
        report,
        format_args!(" Resource bind info for {}", buffer.base.global_name),
    );
    let types = &module.types;

    let element = buffer.ret_type.filter(|ty| types.is_struct(*ty) && !types.is_matrix(*ty));
    match (element, buffer.ret_type) {
        (Some(st), _) => {
            let size = printer.alloc_size(st);
            if printer.annotation(st).is_some() {
                printer.print_struct_layout(
                    report,
                    st,
                    "$Element;",
                    0,
                    BLOCK_INDENT,
                    OFFSET_COLUMN,
                    size,
                );
            } else {
                printer.print_placeholder(report, BLOCK_INDENT, size);
            }
        }
        (None, ret_type) => {
            // Scalars, vectors and matrices are wrapped in a one-field struct
            // whose only annotation describes the element.
            match layout_struct(module, &buffer.base) {
                Some(wrapper) => {
                    let size = printer.alloc_size(wrapper);
                    let field = printer
                        .annotation(wrapper)
                        .and_then(|annotation| annotation.field(0));
                    match (field, ret_type) {
                        (Some(field), Some(ret_type)) => {
                            let mut field = field.clone();
                            field.name = "$Element".to_owned();
                            printer.print_field_layout(
                                report,
                                ret_type,
                                &field,
                                0,
                                BLOCK_INDENT,
                                OFFSET_COLUMN,
                                size,
                            );
                        }
                        _ => printer.print_placeholder(report, BLOCK_INDENT, size),
                    }
                }
                None => printer.print_placeholder(report, BLOCK_INDENT, 0),
            }
            report.blank();
        }
    }
    close_block(report);
}
