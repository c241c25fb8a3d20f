/// Pipe table: consecutive lines starting with `|`.
pub struct Table;

impl Table {
    pub const PIPE: char = '|';

    fn is_row(line: &str) -> bool {
        line.trim().starts_with(Self::PIPE)
    }

    pub fn is_start(lines: &[&str], i: usize) -> bool {
        Self::is_row(lines[i])
    }

    pub fn find_end(lines: &[&str], i: usize) -> usize {
        let mut end = i;
        while end + 1 < lines.len() && Self::is_row(lines[end + 1]) {
            end += 1;
        }
        end
    }
}
