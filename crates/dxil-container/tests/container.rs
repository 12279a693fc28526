use dxil_container::signature::{ComponentType, SystemValue, NO_REGISTER};
use dxil_container::test_utils::{
    build_container, build_feature_info, build_program_header, build_psv, build_signature,
    SignatureElementDesc,
};
use dxil_container::{
    parse_feature_info, parse_program_signature, parse_runtime_info, DxilContainer, FourCC,
    PipelineRuntimeInfo, ProgramHeader, ShaderFeatureFlags, ShaderKind,
};
use pretty_assertions::assert_eq;

const BITCODE: &[u8] = b"BC\xC0\xDE\x35\x14\x00\x00";

fn build_output_signature() -> Vec<u8> {
    build_signature(&[
        // SV_Position, o0.xyzw
        SignatureElementDesc {
            semantic_name: "SV_Position",
            system_value: 1,
            component_type: 3,
            register: 0,
            mask: 0xF,
            ..Default::default()
        },
        // SV_Depth, no register
        SignatureElementDesc {
            semantic_name: "SV_Depth",
            component_type: 3,
            register: NO_REGISTER,
            mask: 0x1,
            rw_mask: 0xE,
            ..Default::default()
        },
    ])
}

#[test]
fn pixel_shader_container_decodes_every_part() {
    let mut pixel_info = [0u8; 24];
    pixel_info[0] = 1; // depth output

    let features = build_feature_info(0x11);
    let signature = build_output_signature();
    let psv = build_psv(&pixel_info);
    let program = build_program_header(ShaderKind::Pixel, BITCODE);
    let bytes = build_container(&[
        (FourCC::FEATURE_INFO, &features),
        (FourCC::OUTPUT_SIGNATURE, &signature),
        (FourCC::PIPELINE_STATE_VALIDATION, &psv),
        (FourCC::DXIL, &program),
    ]);

    let container = DxilContainer::validate(&bytes)
        .expect("container should validate")
        .expect("magic should match");
    assert_eq!(container.part_count(), 4);

    let features = parse_feature_info(container.find(FourCC::FEATURE_INFO).unwrap().data).unwrap();
    assert_eq!(
        features.flags(),
        ShaderFeatureFlags::DOUBLES | ShaderFeatureFlags::MINIMUM_PRECISION
    );

    let signature =
        parse_program_signature(container.find(FourCC::OUTPUT_SIGNATURE).unwrap().data).unwrap();
    assert_eq!(signature.elements.len(), 2);
    let position = &signature.elements[0];
    assert_eq!(position.semantic_name, "SV_Position");
    assert_eq!(position.system_value(), Some(SystemValue::Position));
    assert_eq!(position.component_type(), Some(ComponentType::Float32));
    assert!(position.has_register());
    let depth = &signature.elements[1];
    assert_eq!(depth.semantic_name, "SV_Depth");
    assert!(!depth.has_register());
    assert_eq!(depth.rw_mask, 0xE);
    assert!(!signature.has_streams());

    let program = container
        .find_preferring(FourCC::SHADER_DEBUG_INFO_DXIL, FourCC::DXIL)
        .unwrap();
    let header = ProgramHeader::parse(program.data).unwrap();
    assert_eq!(header.shader_kind(), ShaderKind::Pixel);
    assert_eq!(header.version.major(), 6);
    assert_eq!(header.version.minor(), 0);
    assert_eq!(&header.bitcode[..4], b"BC\xC0\xDE");

    let info = parse_runtime_info(
        container.find(FourCC::PIPELINE_STATE_VALIDATION).unwrap().data,
        header.shader_kind(),
    )
    .unwrap();
    match info {
        PipelineRuntimeInfo::Pixel(pixel) => {
            assert!(pixel.depth_output);
            assert!(!pixel.sample_frequency);
        }
        other => panic!("expected pixel runtime info, got {other:?}"),
    }
}

#[test]
fn bitcode_range_past_part_is_rejected() {
    let mut program = build_program_header(ShaderKind::Vertex, BITCODE);
    program[20..24].copy_from_slice(&64u32.to_le_bytes());
    let bytes = build_container(&[(FourCC::DXIL, &program)]);

    let container = DxilContainer::parse(&bytes).unwrap();
    let err = ProgramHeader::parse(container.find(FourCC::DXIL).unwrap().data).unwrap_err();
    assert!(err.to_string().starts_with("malformed program header"), "{err}");
}

#[test]
fn raw_bitcode_is_not_a_container() {
    let program = build_program_header(ShaderKind::Compute, BITCODE);
    assert!(DxilContainer::validate(&program).unwrap().is_none());
    assert!(DxilContainer::validate(&program[24..]).unwrap().is_none());
}

#[test]
fn truncated_feature_info_part_is_rejected() {
    let features = build_feature_info(0x11);
    let bytes = build_container(&[(FourCC::FEATURE_INFO, &features[..4])]);

    let container = DxilContainer::parse(&bytes).unwrap();
    let err = parse_feature_info(container.find(FourCC::FEATURE_INFO).unwrap().data).unwrap_err();
    assert_eq!(err.to_string(), "malformed feature info: payload is 4 bytes, need 8");
}
