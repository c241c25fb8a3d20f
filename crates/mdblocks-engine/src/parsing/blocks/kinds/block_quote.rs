use crate::parsing::lines::is_blank;

/// Blockquote block type with owned delimiter constant.
pub struct BlockQuote;

impl BlockQuote {
    /// The blockquote prefix character.
    pub const PREFIX: char = '>';

    fn is_quote_line(line: &str) -> bool {
        line.trim_start().starts_with(Self::PREFIX)
    }

    pub fn is_start(lines: &[&str], i: usize) -> bool {
        Self::is_quote_line(lines[i])
    }

    /// Follows `>` lines, bridging a single blank line when the next line is
    /// quoted again (lazy continuation). The bridged blank line is part of the
    /// block.
    pub fn find_end(lines: &[&str], i: usize) -> usize {
        let mut end = i;
        let mut j = i + 1;
        while j < lines.len() {
            if Self::is_quote_line(lines[j]) {
                end = j;
                j += 1;
            } else if is_blank(lines[j])
                && j + 1 < lines.len()
                && Self::is_quote_line(lines[j + 1])
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
