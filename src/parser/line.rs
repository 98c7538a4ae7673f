//! Per-line preprocessing: comment/blank filtering and whitespace tokenizing.

pub const COMMENT_MARKER: char = '#';
pub const OPEN_MARKER: &str = "{";
pub const CLOSE_MARKER: &str = "}";
pub const VERBATIM_MARKER: char = '&';
pub const DEFAULT_MARKER: char = '%';

/// A significant (non-comment, non-blank) line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line<'a> {
    pub number: usize,       // 1-based
    pub text: &'a str,       // trimmed
    pub tokens: Vec<&'a str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Open,
    Close,
    Content,
}

impl<'a> Line<'a> {
    /// Returns `None` for lines the parser never sees.
    pub fn parse(number: usize, raw: &'a str) -> Option<Self> {
        let text = raw.trim();
        if text.is_empty() || text.starts_with(COMMENT_MARKER) {
            return None;
        }
        let tokens = text.split_whitespace().collect();
        Some(Self { number, text, tokens })
    }

    /// Classified by the last token only.
    pub fn kind(&self) -> LineKind {
        match self.tokens.last().copied() {
            Some(OPEN_MARKER) => LineKind::Open,
            Some(CLOSE_MARKER) => LineKind::Close,
            _ => LineKind::Content,
        }
    }

    /// Name in front of a `{`; `None` when the marker stands alone.
    pub fn block_name(&self) -> Option<&'a str> {
        match self.tokens.as_slice() {
            [name, .., _open] => Some(*name),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comments_and_blanks_are_dropped() {
        assert!(Line::parse(1, "").is_none());
        assert!(Line::parse(2, "    \t ").is_none());
        assert!(Line::parse(3, "# a comment").is_none());
        assert!(Line::parse(4, "   # indented comment {").is_none());
    }

    #[test]
    fn tokens_split_on_any_whitespace() {
        let line = Line::parse(5, "  int\t\tcount  ").unwrap();
        assert_eq!(line.number, 5);
        assert_eq!(line.text, "int\t\tcount");
        assert_eq!(line.tokens, ["int", "count"]);
        assert_eq!(line.kind(), LineKind::Content);
    }

    #[test]
    fn kind_follows_last_token() {
        assert_eq!(Line::parse(1, "Shape {").unwrap().kind(), LineKind::Open);
        assert_eq!(Line::parse(1, "}").unwrap().kind(), LineKind::Close);
        assert_eq!(Line::parse(1, "Shape{").unwrap().kind(), LineKind::Content);
        assert_eq!(Line::parse(1, "{ Shape").unwrap().kind(), LineKind::Content);
    }

    #[test]
    fn block_name_needs_a_token_before_the_marker() {
        assert_eq!(Line::parse(1, "Circle {").unwrap().block_name(), Some("Circle"));
        assert_eq!(Line::parse(1, "Circle extra {").unwrap().block_name(), Some("Circle"));
        assert_eq!(Line::parse(1, "{").unwrap().block_name(), None);
    }
}
