use crate::parsing::lines::{is_blank, is_indented};

/// Code indented by four spaces or a tab.
pub struct IndentedCode;

impl IndentedCode {
    pub const INDENT: usize = 4;

    fn is_code_line(line: &str) -> bool {
        !is_blank(line) && is_indented(line, Self::INDENT)
    }

    pub fn is_start(lines: &[&str], i: usize) -> bool {
        Self::is_code_line(lines[i])
    }

    /// Continues over indented lines, bridging one blank line when the line
    /// after it is indented as well.
    pub fn find_end(lines: &[&str], i: usize) -> usize {
        let mut end = i;
        let mut j = i + 1;
        while j < lines.len() {
            if Self::is_code_line(lines[j]) {
                end = j;
                j += 1;
            } else if is_blank(lines[j])
                && j + 1 < lines.len()
                && Self::is_code_line(lines[j + 1])
            {
                end = j + 1;
                j += 2;
            } else {
                break;
            }
        }
        end
    }
}
