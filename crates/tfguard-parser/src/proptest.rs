//! Property-based tests for the parser.
//!
//! - arbitrary text never panics the parser or the ignore scanner
//! - generated blocks keep their labels and ranges nest inside the file

use crate::{parse_file, scan_ignores};
use proptest::prelude::*;
use tfguard_types::SourcePath;

fn arb_ident() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z0-9_]{0,11}")
        .unwrap()
        .prop_filter("keywords are not attribute names", |s| {
            !matches!(s.as_str(), "true" | "false" | "null" | "for" | "in" | "if")
        })
}

fn arb_block() -> impl Strategy<Value = (String, String, Vec<(String, String)>)> {
    (
        arb_ident(),
        arb_ident(),
        prop::collection::btree_map(arb_ident(), "[a-zA-Z0-9 ./-]{0,12}", 0..5),
    )
        .prop_map(|(t, n, attrs)| (t, n, attrs.into_iter().collect()))
}

fn render(blocks: &[(String, String, Vec<(String, String)>)]) -> String {
    let mut out = String::new();
    for (t, n, attrs) in blocks {
        out.push_str(&format!("resource \"{t}\" \"{n}\" {{\n"));
        for (k, v) in attrs {
            out.push_str(&format!("  {k} = \"{v}\"\n"));
        }
        out.push_str("}\n\n");
    }
    out
}

proptest! {
    #[test]
    fn parser_never_panics(text in ".{0,256}") {
        let path = SourcePath::new("fuzz.tf");
        let _ = parse_file(&path, &text);
        let _ = scan_ignores(&path, &text);
    }

    #[test]
    fn generated_blocks_round_trip(blocks in prop::collection::vec(arb_block(), 0..5)) {
        let text = render(&blocks);
        let total_lines = text.lines().count() as u32;
        let parsed = parse_file(&SourcePath::new("gen.tf"), &text).expect("generated HCL parses");
        prop_assert_eq!(parsed.blocks.len(), blocks.len());
        for (b, (t, n, attrs)) in parsed.blocks.iter().zip(&blocks) {
            prop_assert_eq!(b.labels(), [t.clone(), n.clone()]);
            prop_assert_eq!(b.attributes().len(), attrs.len());
            prop_assert!(b.range().end_line <= total_lines);
            for a in b.attributes() {
                prop_assert!(b.range().encloses(a.range()));
            }
        }
    }
}
