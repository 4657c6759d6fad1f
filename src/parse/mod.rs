mod error;
mod grammar;

pub use error::ParseError;

use crate::Expr;

/// Parse a condition string into an [`Expr`].
///
/// Parsing is independent of any table: identifiers become column
/// references and are resolved only at evaluation time.
///
/// # Errors
///
/// Returns [`ParseError`] if the condition is empty or not valid syntax.
pub fn parse(condition: &str) -> Result<Expr, ParseError> {
    use winnow::Parser;

    if condition.trim().is_empty() {
        return Err(ParseError::new(0..condition.len(), "empty condition"));
    }

    grammar::condition.parse(condition).map_err(|e| {
        let offset = e.offset();
        let rest = &condition[offset..];
        let token = match rest.chars().next() {
            Some(first) => {
                let end = rest
                    .find(|c: char| c.is_ascii_whitespace())
                    .unwrap_or(rest.len())
                    .max(first.len_utf8());
                &rest[..end]
            }
            None => "",
        };
        let found = if rest.is_empty() {
            "unexpected end of condition".to_owned()
        } else {
            format!("unexpected `{token}`")
        };
        let expected = e.inner().to_string();
        let message = if expected.is_empty() {
            found
        } else {
            format!("{found}, {expected}")
        };
        ParseError::new(offset..offset + token.len(), message)
    })
}

/// Whether `word` is reserved and cannot be used as a bare column name.
pub(crate) fn is_keyword(word: &str) -> bool {
    grammar::KEYWORDS
        .iter()
        .any(|kw| word.eq_ignore_ascii_case(kw))
}
