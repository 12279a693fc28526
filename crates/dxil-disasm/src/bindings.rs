//! The `Resource Bindings` table.

use std::borrow::Cow;

use dxil_ir::{BoundResource, Module, ResourceClass, ResourceKind};

use crate::report::Report;

const TABLE_HEADER: &str =
    " Name                                 Type  Format         Dim      ID      HLSL Bind  Count";
const TABLE_RULE: &str =
    " ------------------------------ ---------- ------- ----------- ------- -------------- ------";

/// Prints one row per cbuffer, sampler, SRV and UAV, in that order.
pub fn render_resource_bindings(report: &mut Report, module: &Module) {
    report.blank();
    report.line(" Resource Bindings:");
    report.blank();
    report.line(TABLE_HEADER);
    report.line(TABLE_RULE);

    let dxil = module.dxil();
    let rows = dxil
        .cbuffers
        .iter()
        .map(|r| r as &dyn BoundResource)
        .chain(dxil.samplers.iter().map(|r| r as &dyn BoundResource))
        .chain(dxil.srvs.iter().map(|r| r as &dyn BoundResource))
        .chain(dxil.uavs.iter().map(|r| r as &dyn BoundResource));
    for resource in rows {
        report.line(binding_row(resource));
    }
    report.blank();
}

/// One table row, without the comment marker.
pub fn binding_row(resource: &dyn BoundResource) -> String {
    let base = resource.base();
    let id = format!("{}{}", base.class.id_prefix(), base.id);
    let mut bind = format!("{}{}", base.class.bind_prefix(), base.lower_bound);
    if base.space != 0 {
        bind.push_str(&format!(",space{}", base.space));
    }
    let count: Cow<'static, str> = if base.is_unbounded() {
        Cow::Borrowed("unbounded")
    } else {
        Cow::Owned(base.range_size.to_string())
    };

    format!(
        " {:<31}{:>10}{:>8}{:>12}{id:>8}{bind:>15}{count:>6}",
        base.global_name,
        base.class.class_name(),
        format_column(resource),
        dim_column(resource),
    )
}

fn format_column(resource: &dyn BoundResource) -> &'static str {
    let base = resource.base();
    match (base.class, base.kind) {
        (ResourceClass::CBuffer | ResourceClass::Sampler, _) => "NA",
        (_, ResourceKind::RawBuffer) => "byte",
        (_, ResourceKind::StructuredBuffer) => "struct",
        _ => resource
            .as_resource()
            .map_or("invalid", |r| r.comp_type.name()),
    }
}

fn dim_column(resource: &dyn BoundResource) -> Cow<'static, str> {
    let base = resource.base();
    match (base.class, base.kind) {
        (ResourceClass::CBuffer | ResourceClass::Sampler, _) => Cow::Borrowed("NA"),
        (ResourceClass::Srv, ResourceKind::RawBuffer | ResourceKind::StructuredBuffer) => {
            Cow::Borrowed("r/o")
        }
        (_, ResourceKind::RawBuffer | ResourceKind::StructuredBuffer) => {
            let has_counter = resource.as_resource().is_some_and(|r| r.has_counter);
            Cow::Borrowed(if has_counter { "r/w+cnt" } else { "r/w" })
        }
        (_, ResourceKind::TypedBuffer) => Cow::Borrowed("buf"),
        (_, kind @ (ResourceKind::Texture2DMS | ResourceKind::Texture2DMSArray)) => {
            match resource.as_resource().map_or(0, |r| r.sample_count) {
                0 => Cow::Borrowed(kind.dim_name()),
                samples => Cow::Owned(format!("{}{samples}", kind.dim_name())),
            }
        }
        (_, kind) => Cow::Borrowed(kind.dim_name()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dxil_ir::{CBuffer, CompType, Resource, Sampler, UNBOUNDED_RANGE};
    use pretty_assertions::assert_eq;

    #[test]
    fn cbuffer_row() {
        let mut cb = CBuffer::new("Globals", 64);
        cb.base.space = 2;
        assert_eq!(
            binding_row(&cb),
            format!(
                " {:<31}{:>10}{:>8}{:>12}{:>8}{:>15}{:>6}",
                "Globals", "cbuffer", "NA", "NA", "CB0", "cb0,space2", "1"
            )
        );
    }

    #[test]
    fn unbounded_count_is_not_padded() {
        let mut tex = Resource::new(ResourceClass::Srv, ResourceKind::Texture2D, "textures");
        tex.comp_type = CompType::F32;
        tex.base.id = 3;
        tex.base.lower_bound = 4;
        tex.base.range_size = UNBOUNDED_RANGE;
        let row = binding_row(&tex);
        assert!(row.ends_with("     t4unbounded"), "{row}");
        assert!(row.contains("     f32          2d      T3"), "{row}");
    }

    #[test]
    fn bounded_count_is_decimal() {
        let mut tex = Resource::new(ResourceClass::Srv, ResourceKind::Texture2D, "textures");
        tex.base.range_size = 8;
        assert!(binding_row(&tex).ends_with("     8"));
    }

    #[test]
    fn uav_dimensions() {
        let mut counted = Resource::new(ResourceClass::Uav, ResourceKind::StructuredBuffer, "a");
        counted.has_counter = true;
        assert_eq!(dim_column(&counted), "r/w+cnt");
        assert_eq!(format_column(&counted), "struct");

        let raw = Resource::new(ResourceClass::Uav, ResourceKind::RawBuffer, "b");
        assert_eq!(dim_column(&raw), "r/w");
        assert_eq!(format_column(&raw), "byte");

        let srv = Resource::new(ResourceClass::Srv, ResourceKind::RawBuffer, "c");
        assert_eq!(dim_column(&srv), "r/o");

        let mut ms = Resource::new(ResourceClass::Srv, ResourceKind::Texture2DMS, "d");
        assert_eq!(dim_column(&ms), "2dMS");
        ms.sample_count = 4;
        assert_eq!(dim_column(&ms), "2dMS4");

        let typed = Resource::new(ResourceClass::Srv, ResourceKind::TypedBuffer, "e");
        assert_eq!(dim_column(&typed), "buf");
    }

    #[test]
    fn table_lists_classes_in_order() {
        let mut m = Module::new("m");
        m.dxil_mut()
            .uavs
            .push(Resource::new(ResourceClass::Uav, ResourceKind::TypedBuffer, "out"));
        m.dxil_mut()
            .srvs
            .push(Resource::new(ResourceClass::Srv, ResourceKind::Texture2D, "tex"));
        m.dxil_mut().samplers.push(Sampler::new("samp"));
        m.dxil_mut().cbuffers.push(CBuffer::new("cb", 16));

        let mut report = Report::new(';');
        render_resource_bindings(&mut report, &m);
        let text = report.into_string();
        let names: Vec<&str> = text
            .lines()
            .skip(5)
            .filter_map(|line| line.get(2..).and_then(|l| l.split_whitespace().next()))
            .collect();
        assert_eq!(names, ["cb", "samp", "tex", "out"]);
        assert!(text.starts_with(";\n; Resource Bindings:\n;\n"));
        assert!(text.ends_with("\n;\n"));
    }
}
