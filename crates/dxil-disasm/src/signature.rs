//! Signature tables: the legacy `ISG1`/`OSG1`/`PSG1` parts and the module's own signatures.

use dxil_container::signature::{ComponentType, SystemValue};
use dxil_container::{ProgramSignature, SignatureElement};
use dxil_ir::Signature;

use crate::report::Report;

const LEGACY_HEADER: &str = " Name                 Index   Mask Register SysValue  Format   Used";
const LEGACY_RULE: &str = " -------------------- ----- ------ -------- -------- ------- ------";
const DXIL_HEADER: &str = " Name                 Index             InterpMode";
const DXIL_RULE: &str = " -------------------- ----- ----------------------";

/// Which side of the stage boundary a legacy signature describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureDirection {
    Input,
    Output,
}

/// Renders a legacy signature part.
///
/// `name` is the table title, e.g. `Input`. For outputs the used column shows
/// the complement of the stored never-writes mask.
pub fn render_legacy_signature(
    report: &mut Report,
    name: &str,
    signature: &ProgramSignature<'_>,
    direction: SignatureDirection,
) {
    report.blank();
    report.line(format_args!(" {name} signature:"));
    report.blank();
    report.line(LEGACY_HEADER);
    report.line(LEGACY_RULE);

    if signature.elements.is_empty() {
        report.line(" no parameters");
        return;
    }

    let has_streams = signature.has_streams();
    for element in &signature.elements {
        let row = legacy_row(element, has_streams, direction);
        report.line(row);
    }
    report.blank();
}

fn legacy_row(
    element: &SignatureElement<'_>,
    has_streams: bool,
    direction: SignatureDirection,
) -> String {
    let mut row = String::from(" ");
    if has_streams {
        row.push_str(&format!("m{}:{:<17}", element.stream, element.semantic_name));
    } else {
        row.push_str(&format!("{:<20}", element.semantic_name));
    }
    row.push_str(&format!("{:>6}", element.semantic_index));

    if element.has_register() {
        row.push_str("   ");
        row.push_str(&mask_chars(element.mask));
        row.push_str(&format!("{:>9}", element.register));
    } else {
        row.push_str("    N/A");
        row.push_str(special_register_label(element));
    }

    let system_value = element
        .system_value()
        .map_or("unknown", SystemValue::short_name);
    let component_type = element
        .component_type()
        .map_or("unknown", ComponentType::short_name);
    row.push_str(&format!("{system_value:>9}{component_type:>8}"));

    let used = match direction {
        SignatureDirection::Input => element.rw_mask,
        SignatureDirection::Output => !element.rw_mask,
    };
    if element.has_register() {
        row.push_str("   ");
        row.push_str(&mask_chars(used));
    } else {
        row.push_str(if used != 0 { "    YES" } else { "     NO" });
    }
    row
}

/// Label for an element that has no register, chosen by semantic name.
fn special_register_label(element: &SignatureElement<'_>) -> &'static str {
    const LABELS: [(&str, &str); 5] = [
        ("SV_Depth", "   oDepth"),
        ("SV_DepthGreaterEqual", " oDepthGE"),
        ("SV_DepthLessEqual", " oDepthLE"),
        ("SV_Coverage", "    oMask"),
        ("SV_StencilRef", "    oStencilRef"),
    ];
    let name = element.semantic_name;
    if let Some((_, label)) = LABELS
        .iter()
        .find(|(semantic, _)| semantic.eq_ignore_ascii_case(name))
    {
        return *label;
    }
    if element.system_value() == Some(SystemValue::PrimitiveId) {
        "   primID"
    } else {
        "  special"
    }
}

fn mask_chars(mask: u8) -> String {
    (0..4)
        .map(|i| {
            if mask & (1 << i) != 0 {
                b"xyzw"[i] as char
            } else {
                ' '
            }
        })
        .collect()
}

/// Renders one of the module's own signatures. Empty signatures print nothing.
pub fn render_dxil_signature(report: &mut Report, name: &str, signature: &Signature) {
    if signature.elements.is_empty() {
        return;
    }
    report.blank();
    report.line(format_args!(" {name} signature:"));
    report.blank();
    report.line(DXIL_HEADER);
    report.line(DXIL_RULE);
    for element in &signature.elements {
        report.line(format_args!(
            " {:<20}{:>6}{:>23}",
            element.name,
            element.first_semantic_index(),
            element.interpolation_mode.name()
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dxil_container::parse_program_signature;
    use dxil_container::signature::NO_REGISTER;
    use dxil_container::test_utils::{build_signature, SignatureElementDesc};
    use dxil_ir::{InterpolationMode, SignatureElement as DxilElement};
    use pretty_assertions::assert_eq;

    fn render(descs: &[SignatureElementDesc<'_>], direction: SignatureDirection) -> String {
        let bytes = build_signature(descs);
        let signature = parse_program_signature(&bytes).unwrap();
        let mut report = Report::new(';');
        render_legacy_signature(&mut report, "Output", &signature, direction);
        report.into_string()
    }

    #[test]
    fn empty_signature_says_no_parameters() {
        let out = render(&[], SignatureDirection::Input);
        assert_eq!(out.lines().last(), Some("; no parameters"));
        assert_eq!(out.lines().count(), 6);
    }

    #[test]
    fn output_rows_complement_the_stored_mask() {
        let out = render(
            &[
                SignatureElementDesc {
                    semantic_name: "SV_Target",
                    system_value: 64,
                    component_type: 3,
                    register: 0,
                    mask: 0xF,
                    rw_mask: 0x0,
                    ..Default::default()
                },
                SignatureElementDesc {
                    semantic_name: "sv_depth",
                    system_value: 65,
                    component_type: 3,
                    register: NO_REGISTER,
                    mask: 0x1,
                    rw_mask: 0xFF,
                    ..Default::default()
                },
            ],
            SignatureDirection::Output,
        );
        let rows: Vec<&str> = out.lines().skip(5).collect();
        assert_eq!(
            rows,
            vec![
                "; SV_Target                0   xyzw        0   TARGET   float   xyzw",
                "; sv_depth                 0    N/A   oDepth    DEPTH   float     NO",
                ";",
            ]
        );
    }

    #[test]
    fn streams_prefix_every_row() {
        let out = render(
            &[
                SignatureElementDesc {
                    semantic_name: "SV_Position",
                    system_value: 1,
                    component_type: 3,
                    mask: 0xF,
                    ..Default::default()
                },
                SignatureElementDesc {
                    stream: 1,
                    semantic_name: "TEXCOORD",
                    semantic_index: 2,
                    component_type: 3,
                    register: 1,
                    mask: 0x3,
                    rw_mask: 0xC,
                    ..Default::default()
                },
            ],
            SignatureDirection::Output,
        );
        let rows: Vec<&str> = out.lines().skip(5).take(2).collect();
        assert_eq!(
            rows,
            vec![
                "; m0:SV_Position           0   xyzw        0      POS   float   xyzw",
                "; m1:TEXCOORD              2   xy          1     NONE   float   xy  ",
            ]
        );
    }

    #[test]
    fn primitive_id_and_unknown_specials() {
        let out = render(
            &[
                SignatureElementDesc {
                    semantic_name: "SV_PrimitiveID",
                    system_value: 7,
                    component_type: 1,
                    register: NO_REGISTER,
                    mask: 0x1,
                    rw_mask: 0x1,
                    ..Default::default()
                },
                SignatureElementDesc {
                    semantic_name: "SV_Weird",
                    system_value: 99,
                    component_type: 42,
                    register: NO_REGISTER,
                    ..Default::default()
                },
            ],
            SignatureDirection::Input,
        );
        let rows: Vec<&str> = out.lines().skip(5).take(2).collect();
        assert_eq!(
            rows,
            vec![
                "; SV_PrimitiveID           0    N/A   primID   PRIMID    uint    YES",
                "; SV_Weird                 0    N/A  special  unknown unknown     NO",
            ]
        );
    }

    #[test]
    fn dxil_signature_rows() {
        let signature = Signature {
            elements: vec![
                DxilElement::new("SV_Position", 0, InterpolationMode::LinearNoperspective),
                DxilElement::new("COLOR", 1, InterpolationMode::Linear),
            ],
        };
        let mut report = Report::new(';');
        render_dxil_signature(&mut report, "Input", &signature);
        assert_eq!(
            report.as_str(),
            ";\n\
             ; Input signature:\n\
             ;\n\
             ; Name                 Index             InterpMode\n\
             ; -------------------- ----- ----------------------\n\
             ; SV_Position              0    LinearNoperspective\n\
             ; COLOR                    1                 Linear\n"
        );

        let mut report = Report::new(';');
        render_dxil_signature(&mut report, "Output", &Signature::default());
        assert_eq!(report.as_str(), "");
    }
}
