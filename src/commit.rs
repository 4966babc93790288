//! Parsing the conformance CLI's commit-stream format.
//!
//! Mirrors `test-graph`'s input: a `commit <id>` header line (`commit
//! -<id>` marks a boundary commit) with the commit's parents space-separated
//! on the same line, followed later by a four-space-indented title line.
//! Width validation lives here rather than in the engine, per `SPEC_FULL.md`
//! §6: the engine accepts any `&str` id, the CLI/parsing layer is the one
//! that rejects malformed input.

use thiserror::Error;

/// Hex object names never exceed this width in the streams this CLI reads
/// (room for a SHA-256 hex digest).
pub const MAX_ID_LEN: usize = 64;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("commit id '{0}' exceeds the maximum identifier width")]
    IdentifierTooWide(String),
    #[error("empty commit id")]
    EmptyIdentifier,
}

/// One `commit ...` header line, split into id / parents / boundary flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub id: String,
    pub parents: String,
    pub is_boundary: bool,
}

impl CommitRecord {
    /// Parse the portion of a line following the `commit ` prefix — the
    /// caller strips that prefix before calling this.
    pub fn parse(rest: &str) -> Result<Self, ParseError> {
        let (is_boundary, rest) = match rest.strip_prefix('-') {
            Some(r) => (true, r),
            None => (false, rest),
        };

        let mut parts = rest.splitn(2, char::is_whitespace);
        let id = parts.next().unwrap_or("");
        if id.is_empty() {
            return Err(ParseError::EmptyIdentifier);
        }
        if id.len() > MAX_ID_LEN {
            return Err(ParseError::IdentifierTooWide(id.to_string()));
        }

        let parents = parts.next().unwrap_or("").trim_start().to_string();

        Ok(CommitRecord {
            id: id.to_string(),
            parents,
            is_boundary,
        })
    }
}

/// Strip the four-space title indent `test-graph`'s format uses, if present.
pub fn parse_title(line: &str) -> Option<&str> {
    line.strip_prefix("    ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_boundary_and_parents() {
        let record = CommitRecord::parse("-abc123 def456 ghi789").unwrap();
        assert!(record.is_boundary);
        assert_eq!(record.id, "abc123");
        assert_eq!(record.parents, "def456 ghi789");
    }

    #[test]
    fn parses_root_commit_with_no_parents() {
        let record = CommitRecord::parse("abc123").unwrap();
        assert!(!record.is_boundary);
        assert_eq!(record.parents, "");
    }

    #[test]
    fn rejects_overwide_identifier() {
        let wide = "a".repeat(MAX_ID_LEN + 1);
        assert_eq!(
            CommitRecord::parse(&wide),
            Err(ParseError::IdentifierTooWide(wide))
        );
    }

    #[test]
    fn rejects_empty_identifier() {
        assert_eq!(CommitRecord::parse(""), Err(ParseError::EmptyIdentifier));
        assert_eq!(CommitRecord::parse("-"), Err(ParseError::EmptyIdentifier));
    }

    #[test]
    fn strips_title_indent() {
        assert_eq!(parse_title("    Initial commit"), Some("Initial commit"));
        assert_eq!(parse_title("not indented"), None);
    }
}
