use proptest::prelude::*;

use crate::test_utils::build_container;
use crate::{ContainerError, DxilContainer, FourCC};

fn patch_u32(bytes: &mut [u8], offset: usize, value: u32) {
    bytes[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}

#[test]
fn non_container_input_is_not_an_error() {
    assert!(DxilContainer::validate(b"BC\xC0\xDE....").unwrap().is_none());
    assert!(DxilContainer::validate(b"DX").unwrap().is_none());
    assert!(DxilContainer::validate(&[]).unwrap().is_none());
}

#[test]
fn magic_with_short_header_is_malformed() {
    let err = DxilContainer::validate(b"DXBC\0\0\0\0").unwrap_err();
    assert!(matches!(err, ContainerError::MalformedContainer(_)), "{err}");
}

#[test]
fn container_size_larger_than_buffer_is_malformed() {
    let mut bytes = build_container(&[(FourCC::DXIL, &[0u8; 4])]);
    let len = bytes.len() as u32;
    patch_u32(&mut bytes, 24, len + 1);
    assert!(DxilContainer::parse(&bytes).is_err());
}

#[test]
fn container_size_smaller_than_buffer_truncates_view() {
    let mut bytes = build_container(&[(FourCC::DXIL, &[7u8; 4])]);
    bytes.extend_from_slice(&[0xAA; 16]);
    let container = DxilContainer::parse(&bytes).unwrap();
    assert_eq!(container.bytes().len(), bytes.len() - 16);
}

#[test]
fn part_count_that_cannot_fit_is_malformed() {
    let mut bytes = build_container(&[(FourCC::DXIL, &[0u8; 4])]);
    patch_u32(&mut bytes, 28, 1000);
    let err = DxilContainer::parse(&bytes).unwrap_err();
    assert!(err.context().contains("part_count"), "{err}");
}

#[test]
fn part_offset_into_header_is_malformed() {
    let mut bytes = build_container(&[(FourCC::DXIL, &[0u8; 4])]);
    patch_u32(&mut bytes, 32, 8);
    assert!(DxilContainer::parse(&bytes).is_err());
}

#[test]
fn part_payload_past_end_is_malformed() {
    let mut bytes = build_container(&[(FourCC::DXIL, &[0u8; 4]), (FourCC::FEATURE_INFO, &[0u8; 8])]);
    let second = u32::from_le_bytes(bytes[36..40].try_into().unwrap()) as usize;
    patch_u32(&mut bytes, second + 4, 9);
    let err = DxilContainer::parse(&bytes).unwrap_err();
    assert!(err.context().contains("SFI0"), "{err}");
}

#[test]
fn unsupported_version_is_malformed() {
    let mut bytes = build_container(&[]);
    bytes[20..22].copy_from_slice(&2u16.to_le_bytes());
    assert!(DxilContainer::parse(&bytes).is_err());
}

#[test]
fn find_returns_first_match_in_table_order() {
    let bytes = build_container(&[
        (FourCC::FEATURE_INFO, &[1u8; 8]),
        (FourCC::DXIL, &[2u8; 4]),
        (FourCC::FEATURE_INFO, &[3u8; 8]),
    ]);
    let container = DxilContainer::parse(&bytes).unwrap();
    assert_eq!(container.find(FourCC::FEATURE_INFO).unwrap().data, &[1u8; 8]);
    assert!(container.find(FourCC::PIPELINE_STATE_VALIDATION).is_none());
}

#[test]
fn find_preferring_picks_primary_even_when_later() {
    let bytes = build_container(&[(FourCC::DXIL, &[1u8; 4]), (FourCC::SHADER_DEBUG_INFO_DXIL, &[2u8; 4])]);
    let container = DxilContainer::parse(&bytes).unwrap();
    let part = container
        .find_preferring(FourCC::SHADER_DEBUG_INFO_DXIL, FourCC::DXIL)
        .unwrap();
    assert_eq!(part.fourcc, FourCC::SHADER_DEBUG_INFO_DXIL);

    let bytes = build_container(&[(FourCC::DXIL, &[1u8; 4])]);
    let container = DxilContainer::parse(&bytes).unwrap();
    let part = container
        .find_preferring(FourCC::SHADER_DEBUG_INFO_DXIL, FourCC::DXIL)
        .unwrap();
    assert_eq!(part.fourcc, FourCC::DXIL);
}

#[test]
fn debug_summary_lists_parts() {
    let bytes = build_container(&[(FourCC::DXIL, &[0u8; 4])]);
    let container = DxilContainer::parse(&bytes).unwrap();
    let summary = container.debug_summary();
    assert!(summary.starts_with("DXBC v1.0"), "{summary}");
    assert!(summary.contains("[00] DXIL 4 bytes"), "{summary}");
}

#[cfg(feature = "md5")]
#[test]
fn md5_digest_matches_after_stamping() {
    let mut bytes = build_container(&[(FourCC::DXIL, &[5u8; 12])]);
    let digest = DxilContainer::parse(&bytes).unwrap().compute_md5_digest();
    bytes[4..20].copy_from_slice(&digest);
    assert!(DxilContainer::parse(&bytes).unwrap().digest_matches());

    let last = bytes.len() - 1;
    bytes[last] ^= 0xFF;
    assert!(!DxilContainer::parse(&bytes).unwrap().digest_matches());
}

fn arb_parts() -> impl Strategy<Value = Vec<([u8; 4], Vec<u8>)>> {
    prop::collection::vec(
        (
            prop::array::uniform4(b'A'..=b'Z'),
            prop::collection::vec(any::<u8>(), 0..64),
        ),
        0..8,
    )
}

proptest! {
    #[test]
    fn well_formed_containers_round_trip(parts in arb_parts()) {
        let refs: Vec<(FourCC, &[u8])> =
            parts.iter().map(|(tag, data)| (FourCC(*tag), data.as_slice())).collect();
        let bytes = build_container(&refs);
        let container = DxilContainer::parse(&bytes).expect("well-formed container");

        prop_assert_eq!(container.part_count(), parts.len());
        let total = container.header().container_size as usize;
        for (part, (tag, data)) in container.parts().zip(&parts) {
            prop_assert_eq!(part.fourcc, FourCC(*tag));
            prop_assert_eq!(part.data, data.as_slice());
            prop_assert!(part.offset as usize + 8 + part.data.len() <= total);
        }
    }

    #[test]
    fn oversized_part_is_always_rejected(
        parts in arb_parts().prop_filter("need a part", |p| !p.is_empty()),
        pick in any::<prop::sample::Index>(),
        extra in 1u32..1024,
    ) {
        let refs: Vec<(FourCC, &[u8])> =
            parts.iter().map(|(tag, data)| (FourCC(*tag), data.as_slice())).collect();
        let mut bytes = build_container(&refs);
        let index = pick.index(parts.len());
        let offset_pos = 32 + index * 4;
        let part_offset = u32::from_le_bytes(bytes[offset_pos..offset_pos + 4].try_into().unwrap()) as usize;
        let remaining = (bytes.len() - part_offset - 8) as u32;
        patch_u32(&mut bytes, part_offset + 4, remaining + extra);

        prop_assert!(DxilContainer::parse(&bytes).is_err());
    }

    #[test]
    fn arbitrary_bytes_never_panic(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        let mut with_magic = b"DXBC".to_vec();
        with_magic.extend_from_slice(&bytes);
        let _ = DxilContainer::validate(&bytes);
        if let Ok(Some(container)) = DxilContainer::validate(&with_magic) {
            for part in container.parts() {
                let _ = part.data.len();
            }
        }
    }
}
