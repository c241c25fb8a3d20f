use std::sync::OnceLock;

use regex::Regex;

use crate::parsing::lines::is_blank;

/// Raw HTML block, running up to and including the next blank line.
pub struct HtmlBlock;

const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "audio", "blockquote", "canvas", "center", "details",
    "dialog", "dd", "div", "dl", "dt", "fieldset", "figcaption", "figure", "footer", "form",
    "h1", "h2", "h3", "h4", "h5", "h6", "header", "hgroup", "hr", "iframe", "li", "main", "nav",
    "ol", "p", "picture", "pre", "script", "section", "style", "summary", "svg", "table",
    "tbody", "td", "textarea", "tfoot", "th", "thead", "tr", "ul", "video",
];

fn opener_regex() -> &'static Regex {
    static OPENER: OnceLock<Regex> = OnceLock::new();
    OPENER.get_or_init(|| {
        let pattern = format!(
            r"(?i)^(?:<(?:!--|\?|!\[CDATA\[|![a-z])|</?(?:{})(?:[\s/>]|$))",
            BLOCK_TAGS.join("|")
        );
        Regex::new(&pattern).expect("Invalid HTML block regex")
    })
}

impl HtmlBlock {
    pub fn is_start(lines: &[&str], i: usize) -> bool {
        opener_regex().is_match(lines[i].trim())
    }

    pub fn find_end(lines: &[&str], i: usize) -> usize {
        (i + 1..lines.len())
            .find(|&j| is_blank(lines[j]))
            .unwrap_or(lines.len() - 1)
    }
}
