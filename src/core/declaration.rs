//! Transition declaration parser.
//!
//! A declaration has the form `<origins> => <destinations>`, where each side
//! is a single state name or a comma-separated list, optionally wrapped in
//! `{}` or `()`. The wrapping is cosmetic: `a, b`, `{a, b}` and `(a, b)` are
//! the same group.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const ARROW: &str = "=>";
const DELIMITERS: [char; 4] = ['{', '}', '(', ')'];

/// Which side of the arrow a group sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Origin,
    Destination,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Origin => f.write_str("origin"),
            Self::Destination => f.write_str("destination"),
        }
    }
}

/// What is wrong with a malformed declaration.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DeclarationErrorKind {
    #[error("missing '=>' separator")]
    MissingArrow,

    #[error("'=>' separator appears more than once")]
    RepeatedArrow,

    #[error("{0} group names no states")]
    EmptyGroup(Side),

    #[error("empty state name in {0} group")]
    EmptyToken(Side),

    #[error("unbalanced '{1}' in {0} group")]
    UnbalancedDelimiter(Side, char),

    #[error("unexpected '{1}' inside {0} group")]
    UnexpectedDelimiter(Side, char),
}

/// A declaration that could not be parsed.
///
/// `position` is the byte offset into `declaration` where the problem was found.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("Malformed transition '{declaration}' at offset {position}: {kind}")]
pub struct DeclarationError {
    pub declaration: String,
    pub position: usize,
    pub kind: DeclarationErrorKind,
}

/// Parsed form of a transition declaration.
///
/// Describes the cross product of `origins` and `destinations`. Both lists keep
/// the order in which names appeared in the source text.
///
/// # Example
///
/// ```rust
/// use relay::core::Declaration;
///
/// let declaration = Declaration::parse("{ready, paused} => playing").unwrap();
/// assert_eq!(declaration.origins, vec!["ready", "paused"]);
/// assert_eq!(declaration.destinations, vec!["playing"]);
///
/// let pairs: Vec<_> = declaration.pairs().collect();
/// assert_eq!(pairs, vec![("ready", "playing"), ("paused", "playing")]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    pub origins: Vec<String>,
    pub destinations: Vec<String>,
}

impl Declaration {
    /// Parse a declaration string.
    pub fn parse(declaration: &str) -> Result<Self, DeclarationError> {
        let lexer = Lexer { source: declaration };

        let mut arrows = declaration.match_indices(ARROW).map(|(at, _)| at);
        let Some(arrow) = arrows.next() else {
            return Err(lexer.error(declaration.len(), DeclarationErrorKind::MissingArrow));
        };
        if let Some(extra) = arrows.next() {
            return Err(lexer.error(extra, DeclarationErrorKind::RepeatedArrow));
        }

        let origins = lexer.group(0, arrow, Side::Origin)?;
        let destinations = lexer.group(arrow + ARROW.len(), declaration.len(), Side::Destination)?;

        Ok(Self {
            origins,
            destinations,
        })
    }

    /// Every (origin, destination) pair, origins outer and destinations inner.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.origins.iter().flat_map(move |origin| {
            self.destinations
                .iter()
                .map(move |destination| (origin.as_str(), destination.as_str()))
        })
    }
}

impl FromStr for Declaration {
    type Err = DeclarationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_group(f, &self.origins)?;
        write!(f, " {} ", ARROW)?;
        write_group(f, &self.destinations)
    }
}

fn write_group(f: &mut fmt::Formatter<'_>, names: &[String]) -> fmt::Result {
    match names {
        [single] => f.write_str(single),
        _ => write!(f, "{{{}}}", names.join(", ")),
    }
}

/// Parse one side of a declaration on its own.
///
/// ```rust
/// use relay::core::parse_group;
///
/// assert_eq!(parse_group("( a, b, three )").unwrap(), vec!["a", "b", "three"]);
/// ```
pub fn parse_group(group: &str) -> Result<Vec<String>, DeclarationError> {
    Lexer { source: group }.group(0, group.len(), Side::Origin)
}

struct Lexer<'a> {
    source: &'a str,
}

impl Lexer<'_> {
    fn error(&self, position: usize, kind: DeclarationErrorKind) -> DeclarationError {
        DeclarationError {
            declaration: self.source.to_string(),
            position,
            kind,
        }
    }

    fn group(&self, start: usize, end: usize, side: Side) -> Result<Vec<String>, DeclarationError> {
        let segment = &self.source[start..end];
        let body = segment.trim();
        let body_start = start + (segment.len() - segment.trim_start().len());

        if body.is_empty() {
            return Err(self.error(body_start, DeclarationErrorKind::EmptyGroup(side)));
        }

        let (inner, inner_start) = match body.chars().next() {
            Some(open @ ('{' | '(')) => {
                let close = if open == '{' { '}' } else { ')' };
                if body.len() < 2 || !body.ends_with(close) {
                    return Err(self.error(
                        body_start,
                        DeclarationErrorKind::UnbalancedDelimiter(side, open),
                    ));
                }
                (&body[1..body.len() - 1], body_start + 1)
            }
            _ => (body, body_start),
        };

        if inner.trim().is_empty() {
            return Err(self.error(inner_start, DeclarationErrorKind::EmptyGroup(side)));
        }

        let mut tokens = Vec::new();
        let mut offset = inner_start;
        for piece in inner.split(',') {
            if let Some((at, found)) = piece.char_indices().find(|(_, c)| DELIMITERS.contains(c)) {
                return Err(self.error(
                    offset + at,
                    DeclarationErrorKind::UnexpectedDelimiter(side, found),
                ));
            }
            let token = piece.trim();
            if token.is_empty() {
                return Err(self.error(offset, DeclarationErrorKind::EmptyToken(side)));
            }
            tokens.push(token.to_string());
            offset += piece.len() + 1;
        }

        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind_of(declaration: &str) -> DeclarationErrorKind {
        Declaration::parse(declaration).unwrap_err().kind
    }

    #[test]
    fn parses_single_states() {
        let declaration = Declaration::parse("start => ready").unwrap();
        assert_eq!(declaration.origins, vec!["start"]);
        assert_eq!(declaration.destinations, vec!["ready"]);
    }

    #[test]
    fn wrapping_delimiters_are_cosmetic() {
        let expected = vec!["a", "b", "three"];
        assert_eq!(parse_group("{ a, b, three }").unwrap(), expected);
        assert_eq!(parse_group("( a, b, three )").unwrap(), expected);
        assert_eq!(parse_group("a, b, three").unwrap(), expected);
        assert_eq!(parse_group("{ a,b,three }").unwrap(), expected);
    }

    #[test]
    fn parses_groups_on_both_sides() {
        let declaration = Declaration::parse("{start, epoch} => (ready, waiting)").unwrap();
        assert_eq!(declaration.origins, vec!["start", "epoch"]);
        assert_eq!(declaration.destinations, vec!["ready", "waiting"]);
    }

    #[test]
    fn pairs_iterate_origins_outer() {
        let declaration = Declaration::parse("a, b => c, d").unwrap();
        let pairs: Vec<_> = declaration.pairs().collect();
        assert_eq!(pairs, vec![("a", "c"), ("a", "d"), ("b", "c"), ("b", "d")]);
    }

    #[test]
    fn repeated_names_are_kept() {
        let declaration = Declaration::parse("{a, a} => c").unwrap();
        assert_eq!(declaration.origins, vec!["a", "a"]);
    }

    #[test]
    fn missing_sides_are_rejected() {
        assert_eq!(
            kind_of(" => nope"),
            DeclarationErrorKind::EmptyGroup(Side::Origin)
        );
        assert_eq!(
            kind_of("yep => "),
            DeclarationErrorKind::EmptyGroup(Side::Destination)
        );
        assert_eq!(
            kind_of("{ } => nope"),
            DeclarationErrorKind::EmptyGroup(Side::Origin)
        );
    }

    #[test]
    fn dangling_commas_are_rejected() {
        assert_eq!(
            kind_of(", => nope"),
            DeclarationErrorKind::EmptyToken(Side::Origin)
        );
        assert_eq!(
            kind_of("yep => ,"),
            DeclarationErrorKind::EmptyToken(Side::Destination)
        );
        assert_eq!(
            kind_of("yep => a,"),
            DeclarationErrorKind::EmptyToken(Side::Destination)
        );
        assert_eq!(
            kind_of("a,,b => c"),
            DeclarationErrorKind::EmptyToken(Side::Origin)
        );
    }

    #[test]
    fn arrow_must_appear_exactly_once() {
        assert_eq!(kind_of("a, b"), DeclarationErrorKind::MissingArrow);
        assert_eq!(kind_of("a => b => c"), DeclarationErrorKind::RepeatedArrow);
    }

    #[test]
    fn delimiters_must_wrap_the_whole_group() {
        assert_eq!(
            kind_of("{a, b => c"),
            DeclarationErrorKind::UnbalancedDelimiter(Side::Origin, '{')
        );
        assert_eq!(
            kind_of("a => (b, c}"),
            DeclarationErrorKind::UnbalancedDelimiter(Side::Destination, '(')
        );
        assert_eq!(
            kind_of("a{b} => c"),
            DeclarationErrorKind::UnexpectedDelimiter(Side::Origin, '{')
        );
    }

    #[test]
    fn errors_point_at_the_offending_offset() {
        let err = Declaration::parse("a => b => c").unwrap_err();
        assert_eq!(err.position, 7);

        let err = Declaration::parse("a => b,,c").unwrap_err();
        assert_eq!(err.position, 7);

        let err = Declaration::parse("a => {b, c)").unwrap_err();
        assert_eq!(err.position, 5);

        let err = Declaration::parse("a, b(x) => c").unwrap_err();
        assert_eq!(err.position, 4);
    }

    #[test]
    fn error_message_names_declaration() {
        let err = Declaration::parse("yep => ").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Malformed transition 'yep => ' at offset 7: destination group names no states"
        );
    }

    #[test]
    fn display_produces_parseable_canonical_form() {
        let declaration: Declaration = "( a,b ) =>c".parse().unwrap();
        assert_eq!(declaration.to_string(), "{a, b} => c");
        assert_eq!(Declaration::parse(&declaration.to_string()).unwrap(), declaration);
    }

    #[test]
    fn declaration_serializes_correctly() {
        let declaration = Declaration::parse("a => b, c").unwrap();
        let json = serde_json::to_string(&declaration).unwrap();
        let deserialized: Declaration = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, declaration);
    }
}
