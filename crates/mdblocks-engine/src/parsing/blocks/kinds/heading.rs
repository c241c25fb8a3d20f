/// ATX heading; always a single line.
pub struct Heading;

impl Heading {
    pub const MARKER: char = '#';

    pub fn is_start(lines: &[&str], i: usize) -> bool {
        lines[i].trim().starts_with(Self::MARKER)
    }

    pub fn find_end(_lines: &[&str], i: usize) -> usize {
        i
    }
}
