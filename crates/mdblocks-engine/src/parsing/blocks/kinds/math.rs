/// Display math delimited by `$$` lines.
pub struct MathBlock;

impl MathBlock {
    pub const DELIMITER: &'static str = "$$";

    fn is_delimiter(line: &str) -> bool {
        line.trim() == Self::DELIMITER
    }

    pub fn is_start(lines: &[&str], i: usize) -> bool {
        Self::is_delimiter(lines[i])
    }

    pub fn find_end(lines: &[&str], i: usize) -> usize {
        (i + 1..lines.len())
            .find(|&j| Self::is_delimiter(lines[j]))
            .unwrap_or(lines.len() - 1)
    }

    /// Splits a one-line `$$formula$$` into its formula, if the line is one.
    ///
    /// The formula must be non-empty and free of `$$`, so the three expanded
    /// lines always scan as one closed math block.
    pub fn inline_formula(line: &str) -> Option<&str> {
        let formula = line
            .trim()
            .strip_prefix(Self::DELIMITER)?
            .strip_suffix(Self::DELIMITER)?
            .trim();
        (!formula.is_empty() && !formula.contains(Self::DELIMITER)).then_some(formula)
    }
}
