//! Instruction parser: a single `name(args)` call token into an [`Instruction`].

use std::ops::Range;

use crate::ast::Instruction;
use crate::error::ParseError;

/// Parse one call token such as `XIC(Start)` or `GE(Level, 50)`.
///
/// Name and arguments are trimmed; the argument text is otherwise kept
/// verbatim, embedded commas included.
///
/// # Errors
///
/// Returns [`ParseError::MalformedInstruction`] when the token is empty, has
/// no parenthesised argument list, or has an empty or non-word name.
pub fn parse_instruction(token: &str) -> Result<Instruction, ParseError> {
    let malformed = || ParseError::MalformedInstruction { token: token.to_owned() };

    let trimmed = token.trim();
    let (name, rest) = trimmed.split_once('(').ok_or_else(malformed)?;
    let args = rest.strip_suffix(')').ok_or_else(malformed)?;

    let name = name.trim();
    if name.is_empty() || !name.bytes().all(is_word_byte) || args.contains(')') {
        return Err(malformed());
    }

    Ok(Instruction::new(name, args.trim()))
}

/// Byte ranges of every call-shaped token (`word+ '(' [^)]* ')'`) in `text`, in order.
///
/// A word run not followed by `(`, or a `(` that never closes, is skipped.
#[must_use]
pub fn call_tokens(text: &str) -> Vec<Range<usize>> {
    let bytes = text.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        if !is_word_byte(bytes[i]) {
            i += 1;
            continue;
        }

        let start = i;
        while i < bytes.len() && is_word_byte(bytes[i]) {
            i += 1;
        }
        if bytes.get(i) != Some(&b'(') {
            continue;
        }
        match bytes[i..].iter().position(|&b| b == b')') {
            Some(offset) => {
                let end = i + offset + 1;
                tokens.push(start..end);
                i = end;
            }
            None => i += 1,
        }
    }

    tokens
}

/// Parse every call token in `text`, in order.
///
/// # Errors
///
/// Propagates [`ParseError::MalformedInstruction`] from [`parse_instruction`].
pub fn parse_calls(text: &str) -> Result<Vec<Instruction>, ParseError> {
    call_tokens(text).into_iter().map(|range| parse_instruction(&text[range])).collect()
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

#[cfg(test)]
#[path = "instruction_test.rs"]
mod tests;
