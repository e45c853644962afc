//! Fully-qualified name handling.
//!
//! Segments are joined with `.`; a segment that itself contains `.` is
//! wrapped in double quotes, e.g. `Glossary."Net.Revenue".Monthly`.

use crate::domain::error::DomainError;

pub const FQN_SEPARATOR: char = '.';
pub const QUOTE: char = '"';

/// Split an FQN into its segments.
///
/// Quoted segments keep their quotes so joining them with the separator
/// reproduces the input. An unterminated quote runs to the end of the input.
pub fn split(fqn: &str) -> Vec<String> {
    if fqn.is_empty() {
        return Vec::new();
    }
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in fqn.chars() {
        match ch {
            QUOTE => {
                in_quotes = !in_quotes;
                current.push(ch);
            }
            FQN_SEPARATOR if !in_quotes => segments.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    segments.push(current);
    segments
}

/// Normalize the quoting of a single name.
///
/// Quotes are kept only when the name contains the separator. A name with a
/// stray quote character is rejected.
pub fn quote_name(name: &str) -> Result<String, DomainError> {
    if let Some(inner) = name
        .strip_prefix(QUOTE)
        .and_then(|rest| rest.strip_suffix(QUOTE))
    {
        if !inner.is_empty() && !inner.contains(QUOTE) {
            return Ok(if inner.contains(FQN_SEPARATOR) {
                name.to_string()
            } else {
                inner.to_string()
            });
        }
    }
    if name.contains(QUOTE) {
        return Err(DomainError::InvalidName(name.to_string()));
    }
    if name.contains(FQN_SEPARATOR) {
        Ok(format!("{QUOTE}{name}{QUOTE}"))
    } else {
        Ok(name.to_string())
    }
}

/// Strip one pair of surrounding quotes, if present.
pub fn unquote_name(name: &str) -> &str {
    name.strip_prefix(QUOTE)
        .and_then(|rest| rest.strip_suffix(QUOTE))
        .unwrap_or(name)
}

/// Join names into an FQN, quoting where needed.
pub fn build<S: AsRef<str>>(names: &[S]) -> Result<String, DomainError> {
    let quoted = names
        .iter()
        .map(|name| quote_name(name.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(quoted.join(&FQN_SEPARATOR.to_string()))
}

/// Re-quote every segment of an FQN.
///
/// `"ab".c` becomes `ab.c`; a segment with a stray quote is rejected.
pub fn normalize(fqn: &str) -> Result<String, DomainError> {
    let names: Vec<String> = split(fqn)
        .iter()
        .map(|segment| unquote_name(segment).to_string())
        .collect();
    build(&names)
}
