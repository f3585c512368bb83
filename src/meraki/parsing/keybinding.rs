//! Keybinding statements
//!
//!     combination ["-" key | "-" key_group | "+" key_group] attribute* ":" payload
//!
//!     combination:  identifier ("+" identifier)*
//!     key_group:    "{" key ("," key)* "}"
//!     attribute:    "[" <n>ms "]" | "~" flag
//!
//!     A combination followed by `+ {` is a key group, not another combination part. Timeout
//!     and flags may come in either order. A binding without a key needs at least one flag.

use super::cursor::TokenCursor;
use super::payload::{parse_command_group, parse_payload};
use crate::meraki::ast::{ActivationFlag, Key, Keybinding, ParseError, Payload};
use crate::meraki::options::ParserOptions;
use crate::meraki::token::Token;
use std::collections::BTreeSet;

pub fn parse_keybinding(
    cursor: &mut TokenCursor<'_>,
    options: &ParserOptions,
) -> Result<Keybinding, ParseError> {
    let line = cursor.line();
    let key_combination = parse_combination(cursor).ok_or_else(|| {
        ParseError::malformed_keybinding(
            line,
            format!(
                "expected a modifier combination, found {}",
                cursor.describe_next()
            ),
        )
    })?;
    let key = parse_key(cursor)?;

    let mut timeout = None;
    let mut flags = BTreeSet::new();
    loop {
        match cursor.peek_kind() {
            Some(Token::LBracket) => {
                let (value, timeout_line) = parse_timeout(cursor)?;
                if timeout.is_some() {
                    return Err(ParseError::invalid_timeout(
                        timeout_line,
                        "a binding takes at most one timeout",
                    ));
                }
                timeout = Some((value, timeout_line));
            }
            Some(Token::Tilde) => {
                flags.insert(parse_flag(cursor)?);
            }
            _ => break,
        }
    }

    if cursor.eat(Token::Colon).is_none() {
        let message = match cursor.peek() {
            Some(t) if key.is_none() && t.token.is_key_literal() => {
                format!("expected '-' before key {}", cursor.describe_next())
            }
            _ => format!(
                "expected ':' before the command, found {}",
                cursor.describe_next()
            ),
        };
        return Err(ParseError::malformed_keybinding(cursor.line(), message));
    }

    if key.is_none() && flags.is_empty() {
        return Err(ParseError::malformed_keybinding(
            line,
            format!(
                "binding for '{}' has no key; use '- key' or an activation flag such as ~down",
                key_combination
            ),
        ));
    }

    let payload = match &key {
        Some(Key::Group(keys)) => Payload::Group(parse_command_group(cursor, keys.clone(), line)?),
        _ => parse_payload(cursor, 0, line)?,
    };

    let timeout_ms = match (&payload, timeout) {
        (Payload::Nested(_), Some((value, _))) => Some(value),
        (Payload::Nested(_), None) => Some(options.default_timeout_ms.get()),
        (_, Some((_, timeout_line))) => {
            return Err(ParseError::invalid_timeout(
                timeout_line,
                "a timeout is only allowed on a binding that opens a '{' block",
            ))
        }
        (_, None) => None,
    };

    Ok(Keybinding {
        key_combination,
        key,
        timeout_ms,
        activation_flags: flags,
        payload,
        comments: Vec::new(),
        line_number: line,
    })
}

/// `identifier ("+" identifier)*`, parts joined with `" + "`
///
/// A `+` not followed by an identifier is left for the caller.
pub fn parse_combination(cursor: &mut TokenCursor<'_>) -> Option<String> {
    let first = cursor.eat(Token::Identifier)?;
    let mut parts = vec![cursor.text(first)];
    while cursor.check(Token::Plus)
        && cursor.peek_nth(1).map(|t| t.token) == Some(Token::Identifier)
    {
        cursor.advance();
        if let Some(part) = cursor.advance() {
            parts.push(cursor.text(part));
        }
    }
    Some(parts.join(" + "))
}

fn parse_key(cursor: &mut TokenCursor<'_>) -> Result<Option<Key>, ParseError> {
    match cursor.peek_kind() {
        Some(Token::Dash) => {
            cursor.advance();
            match cursor.peek() {
                Some(t) if t.token == Token::LBrace => Ok(Some(Key::Group(parse_key_group(cursor)?))),
                Some(t) if t.token.is_key_literal() => {
                    cursor.advance();
                    Ok(Some(Key::Single(cursor.text(t).to_string())))
                }
                _ => Err(ParseError::malformed_keybinding(
                    cursor.line(),
                    format!("expected a key after '-', found {}", cursor.describe_next()),
                )),
            }
        }
        Some(Token::Plus) => {
            cursor.advance();
            if cursor.check(Token::LBrace) {
                Ok(Some(Key::Group(parse_key_group(cursor)?)))
            } else {
                Err(ParseError::malformed_keybinding(
                    cursor.line(),
                    format!(
                        "expected a modifier or a '{{' key group after '+', found {}",
                        cursor.describe_next()
                    ),
                ))
            }
        }
        _ => Ok(None),
    }
}

/// `{ k, k, ... }` on a single line
fn parse_key_group(cursor: &mut TokenCursor<'_>) -> Result<Vec<String>, ParseError> {
    let Some(open) = cursor.eat(Token::LBrace) else {
        return Err(ParseError::malformed_keybinding(
            cursor.line(),
            format!("expected '{{', found {}", cursor.describe_next()),
        ));
    };
    let unclosed = || ParseError::unbalanced_block(open.line, "key group is missing its closing '}'");

    let mut keys = Vec::new();
    loop {
        match cursor.peek() {
            Some(t) if t.token.is_key_literal() => {
                cursor.advance();
                keys.push(cursor.text(t).to_string());
            }
            Some(t) if t.token == Token::RBrace && keys.is_empty() => {
                return Err(ParseError::group_arity_mismatch(open.line, "key group is empty"));
            }
            Some(t) if matches!(t.token, Token::RBrace | Token::Comma) => {
                return Err(ParseError::group_arity_mismatch(
                    open.line,
                    "key group has an empty element (trailing ',')",
                ));
            }
            None => return Err(unclosed()),
            Some(t) if t.token == Token::Newline => return Err(unclosed()),
            Some(_) => {
                return Err(ParseError::malformed_keybinding(
                    open.line,
                    format!("expected a key in key group, found {}", cursor.describe_next()),
                ))
            }
        }

        match cursor.peek_kind() {
            Some(Token::Comma) => {
                cursor.advance();
            }
            Some(Token::RBrace) => {
                cursor.advance();
                return Ok(keys);
            }
            None | Some(Token::Newline) => return Err(unclosed()),
            Some(_) => {
                return Err(ParseError::malformed_keybinding(
                    open.line,
                    format!(
                        "key group elements are single keys separated by ',', found {}",
                        cursor.describe_next()
                    ),
                ))
            }
        }
    }
}

/// `[ <n>ms ]`, returning the value and the line of `[`
fn parse_timeout(cursor: &mut TokenCursor<'_>) -> Result<(u64, usize), ParseError> {
    let Some(open) = cursor.eat(Token::LBracket) else {
        return Err(ParseError::invalid_timeout(cursor.line(), "expected '['"));
    };
    let line = open.line;
    let close = loop {
        match cursor.peek() {
            Some(t) if t.token == Token::RBracket => {
                cursor.advance();
                break t;
            }
            Some(t) if t.token != Token::Newline => {
                cursor.advance();
            }
            _ => {
                return Err(ParseError::invalid_timeout(
                    line,
                    "timeout is missing its closing ']'",
                ))
            }
        }
    };

    let inner = cursor.source_range(open.span.end, close.span.start);
    let raw = inner.trim();
    let digits = raw.strip_suffix("ms").ok_or_else(|| {
        ParseError::invalid_timeout(line, format!("timeout '{}' must be written as <n>ms", raw))
    })?;
    let value: i64 = digits.trim().parse().map_err(|_| {
        ParseError::invalid_timeout(line, format!("'{}' is not a valid timeout", raw))
    })?;
    if value <= 0 {
        return Err(ParseError::invalid_timeout(
            line,
            format!("timeout must be positive, got {}ms", value),
        ));
    }
    Ok((value as u64, line))
}

fn parse_flag(cursor: &mut TokenCursor<'_>) -> Result<ActivationFlag, ParseError> {
    let line = cursor.line();
    cursor.eat(Token::Tilde);
    let Some(name) = cursor.eat(Token::Identifier) else {
        return Err(ParseError::malformed_keybinding(
            line,
            format!("expected a flag name after '~', found {}", cursor.describe_next()),
        ));
    };
    let name = cursor.text(name);
    ActivationFlag::parse(name).ok_or_else(|| {
        ParseError::malformed_keybinding(
            line,
            format!("unknown activation flag '~{}' (expected ~down, ~up or ~repeat)", name),
        )
    })
}
