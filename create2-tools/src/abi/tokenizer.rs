// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use super::AbiError;

/// Splits raw constructor arguments into exactly one token per parameter.
///
/// `raw` is either already split (one entry per parameter, as handed over by the shell) or a
/// delimited string holding several arguments. Delimited input splits on whitespace at nesting
/// depth zero and outside quotes, so `'[0x11, 0x22]'` or `"(Alice,25)"` stay single tokens.
/// Quotes at depth zero are removed, quotes inside brackets are kept for the encoder.
pub fn tokenize(raw: &[String], expected: usize) -> Result<Vec<String>, AbiError> {
    if raw.len() == expected {
        return Ok(raw.iter().map(|arg| unquote(arg.trim()).to_string()).collect());
    }

    let mut tokens = Vec::new();
    for arg in raw {
        tokens.extend(split_whitespace(arg)?);
    }
    if tokens.len() != expected {
        return Err(AbiError::ArgumentCountMismatch {
            expected,
            actual: tokens.len(),
        });
    }
    Ok(tokens)
}

fn split_whitespace(input: &str) -> Result<Vec<String>, AbiError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    // whether `current` holds a token, even an empty quoted one
    let mut started = false;
    let mut depth = 0usize;
    let mut quote: Option<char> = None;

    for c in input.chars() {
        if let Some(q) = quote {
            if c == q {
                quote = None;
                if depth > 0 {
                    current.push(c);
                }
            } else {
                current.push(c);
            }
            continue;
        }
        match c {
            '\'' | '"' => {
                quote = Some(c);
                started = true;
                if depth > 0 {
                    current.push(c);
                }
            }
            '[' | '(' => {
                depth += 1;
                started = true;
                current.push(c);
            }
            ']' | ')' => {
                depth = depth.checked_sub(1).ok_or_else(|| {
                    AbiError::MalformedArguments(format!("unbalanced `{c}` in `{input}`"))
                })?;
                current.push(c);
            }
            c if c.is_whitespace() && depth == 0 => {
                if started {
                    tokens.push(std::mem::take(&mut current));
                    started = false;
                }
            }
            c => {
                started = true;
                current.push(c);
            }
        }
    }

    if let Some(q) = quote {
        return Err(AbiError::MalformedArguments(format!(
            "unterminated {q} quote in `{input}`"
        )));
    }
    if depth != 0 {
        return Err(AbiError::MalformedArguments(format!(
            "unclosed bracket in `{input}`"
        )));
    }
    if started {
        tokens.push(current);
    }
    Ok(tokens)
}

/// Splits the inside of an array or tuple literal on top-level commas.
///
/// Elements keep their own brackets and quotes; wholly quoted elements are unquoted.
pub(super) fn split_literal(
    literal: &str,
    open: char,
    close: char,
) -> Result<Vec<String>, String> {
    let literal = literal.trim();
    let inner = literal
        .strip_prefix(open)
        .and_then(|s| s.strip_suffix(close))
        .ok_or_else(|| format!("expected a `{open}...{close}` literal, got `{literal}`"))?;
    if inner.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut elements = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;

    for c in inner.chars() {
        if let Some(q) = quote {
            if c == q {
                quote = None;
            }
            current.push(c);
            continue;
        }
        match c {
            '\'' | '"' => quote = Some(c),
            '[' | '(' => depth += 1,
            ']' | ')' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| format!("unbalanced `{c}` in `{literal}`"))?;
            }
            ',' if depth == 0 => {
                elements.push(unquote(current.trim()).to_string());
                current.clear();
                continue;
            }
            _ => {}
        }
        current.push(c);
    }
    if quote.is_some() || depth != 0 {
        return Err(format!("unbalanced literal `{literal}`"));
    }
    elements.push(unquote(current.trim()).to_string());
    Ok(elements)
}

fn unquote(token: &str) -> &str {
    for q in ['"', '\''] {
        if token.len() >= 2 && token.starts_with(q) && token.ends_with(q) {
            return &token[1..token.len() - 1];
        }
    }
    token
}
