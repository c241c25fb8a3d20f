/// YAML front matter delimited by `---` lines at the very top of a document.
pub struct FrontMatter;

impl FrontMatter {
    pub const DELIMITER: &'static str = "---";

    pub fn is_start(lines: &[&str], i: usize) -> bool {
        i == 0 && lines[0] == Self::DELIMITER
    }

    pub fn find_end(lines: &[&str], i: usize) -> usize {
        (i + 1..lines.len())
            .find(|&j| lines[j] == Self::DELIMITER)
            .unwrap_or(lines.len() - 1)
    }
}
