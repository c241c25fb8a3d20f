use crate::parsing::lines::is_blank;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceKind {
    Backticks,
    Tildes,
}

impl FenceKind {
    fn marker(self) -> char {
        match self {
            FenceKind::Backticks => '`',
            FenceKind::Tildes => '~',
        }
    }
}

/// Opening or closing fence run found at the start of a trimmed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FenceSig {
    pub kind: FenceKind,
    /// Length of the marker run (3 or more).
    pub len: usize,
}

pub struct CodeFence;

impl CodeFence {
    pub const MIN_LEN: usize = 3;

    pub fn sig(line: &str) -> Option<FenceSig> {
        let t = line.trim();
        let kind = match t.chars().next()? {
            '`' => FenceKind::Backticks,
            '~' => FenceKind::Tildes,
            _ => return None,
        };
        let len = t.chars().take_while(|c| *c == kind.marker()).count();
        (len >= Self::MIN_LEN).then_some(FenceSig { kind, len })
    }

    /// A closing fence uses the opener's character and is at least as long.
    pub fn closes(open: FenceSig, sig: Option<FenceSig>) -> bool {
        matches!(sig, Some(s) if s.kind == open.kind && s.len >= open.len)
    }

    pub fn is_start(lines: &[&str], i: usize) -> bool {
        !is_blank(lines[i]) && Self::sig(lines[i]).is_some()
    }

    /// Index of the closing fence, or the last line when unclosed.
    pub fn find_end(lines: &[&str], i: usize) -> usize {
        let Some(open) = Self::sig(lines[i]) else {
            return i;
        };
        (i + 1..lines.len())
            .find(|&j| Self::closes(open, Self::sig(lines[j])))
            .unwrap_or(lines.len() - 1)
    }
}
