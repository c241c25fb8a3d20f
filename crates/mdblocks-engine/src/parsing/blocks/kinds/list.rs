use std::sync::OnceLock;

use regex::Regex;

use crate::parsing::blocks::detect::starts_block;
use crate::parsing::lines::{is_blank, is_indented};

/// Bullet or ordered list, including loose items and description lines.
pub struct List;

fn item_regex() -> &'static Regex {
    static ITEM: OnceLock<Regex> = OnceLock::new();
    ITEM.get_or_init(|| {
        Regex::new(r"^[ \t]*(?:[-*+•◦▪‣⁃]|[0-9]+\.)[ \t]").expect("Invalid list item regex")
    })
}

impl List {
    /// How far a plain line may sit from list items on either side and still
    /// count as part of the list.
    pub const LOOSE_WINDOW: usize = 2;

    /// Minimum indentation of a continuation line.
    pub const CONTINUATION_INDENT: usize = 2;

    pub fn is_item(line: &str) -> bool {
        item_regex().is_match(line)
    }

    fn is_continuation(line: &str) -> bool {
        !is_blank(line) && is_indented(line, Self::CONTINUATION_INDENT)
    }

    fn continues(line: &str) -> bool {
        Self::is_item(line) || Self::is_continuation(line)
    }

    pub fn is_start(lines: &[&str], i: usize) -> bool {
        Self::is_item(lines[i])
    }

    pub fn find_end(lines: &[&str], i: usize) -> usize {
        let mut end = i;
        let mut j = i + 1;
        while j < lines.len() {
            let line = lines[j];
            if Self::continues(line) {
                end = j;
                j += 1;
            } else if is_blank(line) {
                if j + 1 < lines.len() && Self::continues(lines[j + 1]) {
                    end = j + 1;
                    j += 2;
                } else {
                    break;
                }
            } else if Self::is_description_line(lines, i, j) {
                end = j;
                j += 1;
            } else {
                break;
            }
        }
        end
    }

    /// A plain line between list items, e.g. a description under a loose item.
    ///
    /// Looks back at most [`Self::LOOSE_WINDOW`] lines (not before the list's
    /// first line) and ahead the same distance for list items.
    fn is_description_line(lines: &[&str], list_start: usize, j: usize) -> bool {
        if starts_block(lines, j) {
            return false;
        }
        let back = j.saturating_sub(Self::LOOSE_WINDOW).max(list_start);
        let ahead = (j + Self::LOOSE_WINDOW).min(lines.len() - 1);
        lines[back..j].iter().any(|l| Self::is_item(l))
            && lines[j + 1..=ahead].iter().any(|l| Self::is_item(l))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("- item")]
    #[case("* item")]
    #[case("+ item")]
    #[case("• item")]
    #[case("12. item")]
    #[case("  - nested")]
    #[case("\t- tabbed")]
    fn recognizes_items(#[case] line: &str) {
        assert!(List::is_item(line));
    }

    #[rstest]
    #[case("-item")]
    #[case("---")]
    #[case("1) item")]
    #[case("**bold**")]
    #[case("text - dash")]
    fn rejects_non_items(#[case] line: &str) {
        assert!(!List::is_item(line));
    }

    #[test]
    fn consecutive_items_and_continuations() {
        let lines = ["- a", "  more a", "- b", "\tmore b", "para"];
        assert_eq!(List::find_end(&lines, 0), 3);
    }

    #[test]
    fn blank_line_between_items_is_included() {
        let lines = ["- a", "", "- b", "", "after"];
        assert_eq!(List::find_end(&lines, 0), 2);
    }

    #[test]
    fn description_line_between_items() {
        let lines = ["1. First", "Explains first", "2. Second"];
        assert_eq!(List::find_end(&lines, 0), 2);
    }

    #[test]
    fn plain_line_after_last_item_ends_list() {
        let lines = ["- a", "- b", "Not part of it"];
        assert_eq!(List::find_end(&lines, 0), 1);
    }

    #[test]
    fn heading_between_items_ends_list() {
        let lines = ["- a", "# Heading", "- b"];
        assert_eq!(List::find_end(&lines, 0), 0);
    }

    #[test]
    fn description_reaches_item_across_blank_line() {
        let lines = ["- a", "desc", "", "- b"];
        assert_eq!(List::find_end(&lines, 0), 3);
    }
}
