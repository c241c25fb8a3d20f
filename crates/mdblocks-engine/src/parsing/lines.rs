//! Line-level helpers shared by the scanner and the normalizer.

/// Splits `text` into lines on `\n`, dropping a trailing `\r` from each.
///
/// Every `\n` produces a line boundary, so `"a\n"` yields `["a", ""]` and the
/// empty string yields a single empty line. Line indices are therefore the
/// 0-based source line numbers.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

/// Whether the line contains only whitespace.
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Whether the line is indented by at least `spaces` spaces or a tab.
pub fn is_indented(line: &str, spaces: usize) -> bool {
    if line.starts_with('\t') {
        return true;
    }
    line.bytes().take_while(|b| *b == b' ').count() >= spaces
}
