// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_markdown_content(size: usize) -> String {
    let base = "# Title\n\n## Section\n\nParagraph with some content.\n\n- Bullet point\n  - Nested item\n- Another item\n\n```rust\nfn example() {\n    println!(\"Hello\");\n}\n```\n\n$$e^{i\\pi} + 1 = 0$$\n\n> quoted\n> text\n\n| a | b |\n|---|---|\n\n";
    base.repeat(size)
}

/// A notes-style document with `sections` sections, each mixing the block
/// kinds the scanner distinguishes.
#[allow(dead_code)]
pub fn generate_notes_document(sections: usize) -> String {
    let mut content = String::from("---\ntitle: Benchmark\ntags: [bench]\n---\n\n");

    for n in 0..sections {
        content.push_str(&format!("## Section {n}\n\n"));
        content.push_str(&format!(
            "Section {n} opens with a paragraph\nthat wraps onto a second line.\n\n"
        ));
        content.push_str(&format!(
            "1. First point of {n}\nWhy it matters.\n2. Second point\n   continued\n\n"
        ));
        content.push_str(&format!("$$x_{{{n}}} = x_{{{n}}}^2$$\n\n"));
        content.push_str(&format!("> Quoted note {n}\n>\n> with a second paragraph\n\n"));
        content.push_str(&format!("| key | value |\n|-----|-------|\n| n | {n} |\n\n"));

        match n % 4 {
            0 => content.push_str("```mermaid\ngraph TD\n  A --> B\n```\n\n"),
            1 => content.push_str("<details>\n<summary>More</summary>\nHidden text\n</details>\n\n"),
            2 => content.push_str("    indented code\n    second line\n\n"),
            _ => content.push_str("$$\n\\int_0^1 f(x)\\,dx\n$$\n\n"),
        }
    }

    content
}

#[allow(dead_code)]
pub fn generate_large_document() -> String {
    generate_notes_document(200)
}

/// `base` with one character typed at roughly `fraction` of the way through.
#[allow(dead_code)]
pub fn with_keystroke(base: &str, fraction: f64) -> String {
    let mut at = ((base.len() as f64) * fraction) as usize;
    while !base.is_char_boundary(at) {
        at -= 1;
    }
    let mut edited = String::with_capacity(base.len() + 1);
    edited.push_str(&base[..at]);
    edited.push('x');
    edited.push_str(&base[at..]);
    edited
}
