use dxil_disasm::layout::{LayoutPrinter, BLOCK_INDENT, OFFSET_COLUMN};
use dxil_disasm::Report;
use dxil_ir::{CompType, FieldAnnotation, StructAnnotation, TypeId, TypeSystem, TypeTable};
use proptest::prelude::*;

/// Builds `S0 { float pad; S1 next; }`, ..., `Sd { float leaf; }` where each
/// `next` field sits at the given offset.
fn nested_chain(next_offsets: &[u32], leaf_offset: u32) -> (TypeTable, TypeSystem, TypeId) {
    let mut types = TypeTable::new();
    let mut ts = TypeSystem::new();
    let f = types.float();

    let depth = next_offsets.len();
    let mut inner = types.named_struct(format!("struct.S{depth}"), vec![f]);
    ts.insert_struct_annotation(StructAnnotation::new(
        inner,
        vec![FieldAnnotation::new("leaf", leaf_offset, CompType::F32)],
    ));
    for (level, offset) in next_offsets.iter().enumerate().rev() {
        let outer = types.named_struct(format!("struct.S{level}"), vec![f, inner]);
        ts.insert_struct_annotation(StructAnnotation::new(
            outer,
            vec![
                FieldAnnotation::new("pad", 0, CompType::F32),
                FieldAnnotation::new("next", *offset, CompType::Invalid),
            ],
        ));
        inner = outer;
    }
    (types, ts, inner)
}

fn printed_offset(line: &str) -> u64 {
    let (_, tail) = line.split_once("Offset:").expect("offset column");
    tail.split_whitespace()
        .next()
        .and_then(|n| n.parse().ok())
        .expect("offset value")
}

proptest! {
    #[test]
    fn nested_offsets_add_up(
        next_offsets in proptest::collection::vec(0u32..4096, 0..=5),
        leaf_offset in 0u32..4096,
    ) {
        let (types, ts, root) = nested_chain(&next_offsets, leaf_offset);
        let printer = LayoutPrinter::with_parts(&types, &ts);
        let mut report = Report::new(';');
        printer.print_struct_layout(&mut report, root, "cb", 0, BLOCK_INDENT, OFFSET_COLUMN, 0);
        let text = report.into_string();

        let expected: u64 = next_offsets.iter().map(|o| u64::from(*o)).sum::<u64>()
            + u64::from(leaf_offset);
        let leaf = text.lines().find(|l| l.contains("float leaf;")).expect("leaf line");
        prop_assert_eq!(printed_offset(leaf), expected);

        // Offset comments share one column at every depth.
        let depth = next_offsets.len();
        let leaf_prefix = format!(";{}float leaf;", " ".repeat(BLOCK_INDENT + 4 * (depth + 1)));
        prop_assert!(leaf.starts_with(&leaf_prefix));
        for line in text.lines().filter(|l| l.contains("; Offset:")) {
            prop_assert_eq!(line.find("; Offset:"), Some(1 + BLOCK_INDENT + OFFSET_COLUMN));
        }

        // Closing lines of nested blocks carry the running prefix sums.
        let mut running = 0u64;
        for offset in &next_offsets {
            running += u64::from(*offset);
            let closing = text
                .lines()
                .find(|l| l.contains("} next;") && printed_offset(l) == running);
            prop_assert!(closing.is_some(), "no closing line at {}:\n{}", running, text);
        }
    }
}
