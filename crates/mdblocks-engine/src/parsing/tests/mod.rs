//! Scanner tests.
//!
//! Partitions are asserted as inline snapshots of one line per block:
//! `Kind [start+count] "content"`.


use std::fmt::Write;

use insta::assert_snapshot;
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::parsing::{BlockKind, ScannedBlock, classify, normalize, scan};

fn format_blocks(blocks: &[ScannedBlock]) -> String {
    let mut out = String::new();
    for b in blocks {
        writeln!(
            out,
            "{:?} [{}+{}] {:?}",
            b.kind, b.start_line, b.line_count, b.content
        )
        .unwrap();
    }
    out
}

fn scan_checked(md: &str) -> Vec<ScannedBlock> {
    let blocks = scan(md);
    invariants::check(md, &blocks);
    blocks
}

#[test]
fn every_block_kind_in_one_document() {
    let md = "---\ntitle: Demo\n---\n\n# Heading\nParagraph line one\nline two\n- item a\n- item b\n\n```rust\nfn main() {}\n```\n> quote\n\n> more quote\n| a | b |\n|---|---|\n<div>\nhtml\n\n    indented code\n$$\nx^2\n$$";
    assert_snapshot!(format_blocks(&scan_checked(md)), @r###"
    FrontMatter [0+3] "---\ntitle: Demo\n---"
    Heading [4+1] "# Heading"
    Paragraph [5+2] "Paragraph line one\nline two"
    List [7+2] "- item a\n- item b"
    FencedCode [10+3] "```rust\nfn main() {}\n```"
    BlockQuote [13+3] "> quote\n\n> more quote"
    Table [16+2] "| a | b |\n|---|---|"
    Html [18+3] "<div>\nhtml\n"
    IndentedCode [21+1] "    indented code"
    MathBlock [22+3] "$$\nx^2\n$$"
    "###);
}

#[test]
fn title_and_paragraph() {
    let blocks = scan_checked("# Title\n\nParagraph");
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].start_line, 0);
    assert_eq!(blocks[0].content, "# Title");
    assert_eq!(blocks[1].start_line, 2);
    assert_eq!(blocks[1].content, "Paragraph");
}

#[test]
fn leading_blank_lines_are_skipped() {
    let blocks = scan_checked("\n\n\nText");
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].start_line, 3);
}

#[test]
fn front_matter_after_blank_line_is_not_front_matter() {
    let blocks = scan_checked("\n---\na: 1\n---");
    assert!(blocks.iter().all(|b| b.kind != BlockKind::FrontMatter));
}

#[test]
fn unclosed_fence_swallows_rest_of_document() {
    assert_snapshot!(format_blocks(&scan_checked("Intro\n\n```\ncode\n\n# Not a heading")), @r###"
    Paragraph [0+1] "Intro"
    FencedCode [2+4] "```\ncode\n\n# Not a heading"
    "###);
}

#[test]
fn fence_beats_indented_code() {
    let blocks = scan_checked("    ```\n    code\n    ```");
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].kind, BlockKind::FencedCode);
}

#[test]
fn heading_interrupts_paragraph() {
    assert_snapshot!(format_blocks(&scan_checked("line one\n## Sub\nline two")), @r###"
    Paragraph [0+1] "line one"
    Heading [1+1] "## Sub"
    Paragraph [2+1] "line two"
    "###);
}

#[test]
fn thematic_break_lines_stay_in_paragraph() {
    assert_snapshot!(format_blocks(&scan_checked("Text\n---\n\n---")), @r###"
    Paragraph [0+2] "Text\n---"
    Paragraph [3+1] "---"
    "###);
}

#[test]
fn loose_list_with_descriptions() {
    let md = "1. First\nExplains first\n\n2. Second\n   indented note\n\nAfter the list";
    assert_snapshot!(format_blocks(&scan_checked(md)), @r###"
    List [0+5] "1. First\nExplains first\n\n2. Second\n   indented note"
    Paragraph [6+1] "After the list"
    "###);
}

#[test]
fn html_block_includes_terminating_blank_line() {
    let blocks = scan_checked("<details>\n<summary>x</summary>\n\nafter");
    assert_eq!(blocks[0].kind, BlockKind::Html);
    assert_eq!(blocks[0].line_count, 3);
    assert_eq!(blocks[1].content, "after");
}

#[test]
fn empty_document() {
    assert!(scan_checked("").is_empty());
}

#[test]
fn blank_lines_only() {
    assert!(scan_checked("\n  \n\t\n").is_empty());
}

#[test]
fn scanning_is_deterministic() {
    let md = "# A\n\n- x\n- y\n\n> q\n\ntext";
    assert_eq!(scan(md), scan(md));
}

#[test]
fn extremely_long_line_is_one_paragraph() {
    let md = "word ".repeat(20_000);
    let blocks = scan_checked(&md);
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].kind, BlockKind::Paragraph);
}

#[test]
fn crlf_input_tiles_like_lf() {
    let lf = scan("# A\n\nbody");
    let crlf = scan("# A\r\n\r\nbody");
    assert_eq!(lf, crlf);
}

#[rstest]
#[case("# A\n\nPara\n\n- a\n- b\n")]
#[case("```\nunclosed")]
#[case(">\n>\n\n\n>")]
#[case("    a\n\n    b\n\n\n    c")]
#[case("| a\n|\n\n| b")]
#[case("$$\n$$\n$$")]
#[case("<!-- c -->\n\n<div>\n")]
#[case("- a\ntext\n- b\ntext\ntext\n- c")]
#[case("\t\n \n- \n-\n1.\n1. x")]
fn tiling_holds_for_awkward_input(#[case] md: &str) {
    scan_checked(md);
}

#[test]
fn normalized_inline_math_scans_as_math_block() {
    let n = normalize("Before\n\n$$a^2 + b^2$$\n\nAfter");
    let blocks = scan_checked(&n.text);
    assert_eq!(blocks[1].kind, BlockKind::MathBlock);
    assert_eq!(blocks[1].content, "$$\na^2 + b^2\n$$");
}

#[rstest]
#[case("---\na: 1\n---", 0, BlockKind::FrontMatter)]
#[case("---", 4, BlockKind::Paragraph)]
#[case("- a\n- b", 3, BlockKind::List)]
#[case("# T", 9, BlockKind::Heading)]
#[case("plain", 0, BlockKind::Paragraph)]
fn classify_matches_scanner(
    #[case] content: &str,
    #[case] start_line: usize,
    #[case] expected: BlockKind,
) {
    assert_eq!(classify(content, start_line), expected);
}
