//! Payloads
//!
//!     Everything after the `:` of a binding. Decided by lookahead:
//!
//!         "{" at the start                → leader block of `key ":" payload` entries
//!         key group on the statement      → command group `prefix { c, c } suffix`
//!         ";"-separated commands           → action chain
//!         anything else                    → single action
//!
//!     Commands are sliced out of the source between their first and last token, so spacing
//!     and quotes survive exactly as written. Comment text never lands in a command (see
//!     [TokenCursor::slice]). A trailing `;` terminates a command rather than starting an
//!     empty one.
//!
//! Nesting
//!
//!     The parser tracks one piece of state: the nesting depth, 0 for top-level statements and
//!     1 inside a leader block. A `{` payload at depth [MAX_NESTING_DEPTH] is rejected with
//!     `UnsupportedNesting`.

use super::cursor::TokenCursor;
use crate::meraki::ast::{GroupExpansion, Key, Keybinding, ParseError, Payload};
use crate::meraki::token::{LocatedToken, Token};
use indexmap::IndexMap;
use tracing::debug;

/// Leader blocks may not open further blocks
pub const MAX_NESTING_DEPTH: usize = 1;

/// Parse the payload following `:` at `depth`
pub fn parse_payload(
    cursor: &mut TokenCursor<'_>,
    depth: usize,
    line: usize,
) -> Result<Payload, ParseError> {
    if let Some(open) = cursor.peek().filter(|t| t.token == Token::LBrace) {
        if depth >= MAX_NESTING_DEPTH {
            return Err(ParseError::unsupported_nesting(
                open.line,
                "leader keys nest one level; an entry inside a '{' block cannot open another block",
            ));
        }
        let entries = parse_block(cursor, depth + 1)?;
        if !cursor.at_line_end() {
            return Err(ParseError::malformed_keybinding(
                cursor.line(),
                format!("unexpected {} after closing '}}'", cursor.describe_next()),
            ));
        }
        return Ok(Payload::Nested(entries));
    }
    parse_commands(cursor, depth, line)
}

/// `{ entry* }` where entries are separated by newlines
fn parse_block(
    cursor: &mut TokenCursor<'_>,
    depth: usize,
) -> Result<IndexMap<String, Keybinding>, ParseError> {
    let Some(open) = cursor.eat(Token::LBrace) else {
        return Err(ParseError::malformed_keybinding(
            cursor.line(),
            format!("expected '{{', found {}", cursor.describe_next()),
        ));
    };

    let mut entries = IndexMap::new();
    loop {
        cursor.skip_newlines();
        match cursor.peek() {
            None => {
                return Err(ParseError::unbalanced_block(
                    open.line,
                    "'{' opened here is never closed",
                ))
            }
            Some(t) if t.token == Token::RBrace => {
                cursor.advance();
                break;
            }
            Some(_) => {
                let (key, entry) = parse_block_entry(cursor, depth)?;
                entries.insert(key, entry);
            }
        }
    }

    debug!(line = open.line, entries = entries.len(), "parsed leader block");
    Ok(entries)
}

/// `key ":" payload` inside a leader block
fn parse_block_entry(
    cursor: &mut TokenCursor<'_>,
    depth: usize,
) -> Result<(String, Keybinding), ParseError> {
    let line = cursor.line();
    let key = match cursor.peek() {
        Some(t) if t.token.is_key_literal() => {
            cursor.advance();
            cursor.text(t).to_string()
        }
        _ => {
            return Err(ParseError::malformed_keybinding(
                line,
                format!(
                    "expected a key in leader block, found {}",
                    cursor.describe_next()
                ),
            ))
        }
    };
    if cursor.eat(Token::Colon).is_none() {
        return Err(ParseError::malformed_keybinding(
            line,
            format!(
                "expected ':' after key '{}', found {}",
                key,
                cursor.describe_next()
            ),
        ));
    }
    let payload = parse_payload(cursor, depth, line)?;
    let entry = Keybinding::new("", Some(Key::Single(key.clone())), payload, line);
    Ok((key, entry))
}

/// `command (";" command)* [";"]` up to the end of the line, or up to the block's `}`
fn parse_commands(
    cursor: &mut TokenCursor<'_>,
    depth: usize,
    line: usize,
) -> Result<Payload, ParseError> {
    let mut segments = Vec::new();
    let mut current: Option<(&LocatedToken, &LocatedToken)> = None;

    while let Some(t) = cursor.peek() {
        match t.token {
            Token::Newline => break,
            Token::RBrace if depth > 0 => break,
            Token::RBrace => {
                return Err(ParseError::unbalanced_block(
                    t.line,
                    "'}' without a matching '{'",
                ))
            }
            Token::LBrace => {
                return Err(ParseError::malformed_keybinding(
                    t.line,
                    "unexpected '{' in command; '{' opens a leader block only right after ':', and command groups need a key group",
                ))
            }
            Token::Semicolon => {
                cursor.advance();
                let Some((first, last)) = current.take() else {
                    return Err(ParseError::malformed_keybinding(
                        t.line,
                        "empty command before ';'",
                    ));
                };
                segments.push(cursor.slice(first, last).into_owned());
            }
            _ => {
                cursor.advance();
                current = Some(match current {
                    Some((first, _)) => (first, t),
                    None => (t, t),
                });
            }
        }
    }
    if let Some((first, last)) = current {
        segments.push(cursor.slice(first, last).into_owned());
    }

    match segments.len() {
        0 => Err(ParseError::malformed_keybinding(
            line,
            "expected a command after ':'",
        )),
        1 => Ok(Payload::Action(segments.remove(0))),
        _ => Ok(Payload::Actions(segments)),
    }
}

/// The payload of a key group binding: exactly one `{ c, c, ... }` with optional text around it
pub fn parse_command_group(
    cursor: &mut TokenCursor<'_>,
    keys: Vec<String>,
    line: usize,
) -> Result<GroupExpansion, ParseError> {
    let mut first: Option<&LocatedToken> = None;
    let mut last: Option<&LocatedToken> = None;
    let mut group: Option<(usize, usize, Vec<String>)> = None;

    while let Some(t) = cursor.peek() {
        match t.token {
            Token::Newline => break,
            Token::LBrace => {
                if group.is_some() {
                    return Err(ParseError::malformed_keybinding(
                        t.line,
                        "a command takes a single '{ ... }' group",
                    ));
                }
                let (commands, close) = parse_group_elements(cursor)?;
                group = Some((t.span.start, close.span.end, commands));
                if first.is_none() {
                    first = Some(t);
                }
                last = Some(close);
            }
            Token::RBrace => {
                return Err(ParseError::unbalanced_block(
                    t.line,
                    "'}' without a matching '{'",
                ))
            }
            _ => {
                cursor.advance();
                if first.is_none() {
                    first = Some(t);
                }
                last = Some(t);
            }
        }
    }

    let (Some(first), Some(last)) = (first, last) else {
        return Err(ParseError::malformed_keybinding(
            line,
            "expected a command after ':'",
        ));
    };
    let Some((open_start, close_end, commands)) = group else {
        return Err(ParseError::group_arity_mismatch(
            line,
            format!(
                "key group has {} keys but the command has no '{{ ... }}' group",
                keys.len()
            ),
        ));
    };
    if keys.len() != commands.len() {
        return Err(ParseError::group_arity_mismatch(
            line,
            format!(
                "key group has {} keys but command group has {} commands",
                keys.len(),
                commands.len()
            ),
        ));
    }

    let prefix = cursor.source_range(first.span.start, open_start);
    let suffix = cursor.source_range(close_end, last.span.end);
    Ok(GroupExpansion::new(keys, commands).with_template(prefix, suffix))
}

/// Elements of a command group, returning them with the closing `}`
fn parse_group_elements<'a>(
    cursor: &mut TokenCursor<'a>,
) -> Result<(Vec<String>, &'a LocatedToken), ParseError> {
    let Some(open) = cursor.eat(Token::LBrace) else {
        return Err(ParseError::malformed_keybinding(
            cursor.line(),
            format!("expected '{{', found {}", cursor.describe_next()),
        ));
    };

    let mut elements = Vec::new();
    let mut current: Option<(&LocatedToken, &LocatedToken)> = None;
    loop {
        let Some(t) = cursor.peek().filter(|t| t.token != Token::Newline) else {
            return Err(ParseError::unbalanced_block(
                open.line,
                "command group is missing its closing '}'",
            ));
        };
        cursor.advance();
        match t.token {
            Token::Comma | Token::RBrace => {
                match current.take() {
                    Some((first, last)) => elements.push(element_text(cursor, first, last)),
                    None if t.token == Token::RBrace && elements.is_empty() => {
                        return Err(ParseError::group_arity_mismatch(
                            open.line,
                            "command group is empty",
                        ))
                    }
                    None => {
                        return Err(ParseError::group_arity_mismatch(
                            open.line,
                            "command group has an empty element (trailing ',')",
                        ))
                    }
                }
                if t.token == Token::RBrace {
                    return Ok((elements, t));
                }
            }
            Token::LBrace => {
                return Err(ParseError::malformed_keybinding(
                    t.line,
                    "command groups cannot be nested",
                ))
            }
            _ => {
                current = Some(match current {
                    Some((first, _)) => (first, t),
                    None => (t, t),
                });
            }
        }
    }
}

/// A group element as written, with a lone quoted string unquoted
fn element_text(cursor: &TokenCursor<'_>, first: &LocatedToken, last: &LocatedToken) -> String {
    let raw = cursor.slice(first, last);
    match first.token {
        Token::QuotedString(_) if first.span == last.span => unquote(&raw),
        _ => raw.into_owned(),
    }
}

fn unquote(raw: &str) -> String {
    let inner = raw.strip_prefix('"').unwrap_or(raw);
    let inner = inner.strip_suffix('"').unwrap_or(inner);
    let mut text = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => match chars.next() {
                Some(next @ ('"' | '\\')) => text.push(next),
                Some(other) => {
                    text.push('\\');
                    text.push(other);
                }
                None => text.push('\\'),
            },
            _ => text.push(ch),
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meraki::ast::ErrorKind;
    use crate::meraki::lexing::tokenize;
    use rstest::rstest;

    fn payload(source: &str) -> Result<Payload, ParseError> {
        let tokens = tokenize(source).unwrap();
        let mut cursor = TokenCursor::new(&tokens, source);
        parse_payload(&mut cursor, 0, 1)
    }

    fn group(keys: &[&str], source: &str) -> Result<GroupExpansion, ParseError> {
        let tokens = tokenize(source).unwrap();
        let mut cursor = TokenCursor::new(&tokens, source);
        let keys = keys.iter().map(|k| k.to_string()).collect();
        parse_command_group(&mut cursor, keys, 1)
    }

    #[test]
    fn test_single_action_is_verbatim() {
        assert_eq!(
            payload("open   -a \"Sublime Text\"").unwrap(),
            Payload::Action("open   -a \"Sublime Text\"".into())
        );
    }

    #[test]
    fn test_trailing_semicolon_terminates() {
        assert_eq!(
            payload("open -a Safari;").unwrap(),
            Payload::Action("open -a Safari".into())
        );
    }

    #[test]
    fn test_action_chain() {
        assert_eq!(
            payload("open -a Slack; open -a Discord").unwrap(),
            Payload::Actions(vec!["open -a Slack".into(), "open -a Discord".into()])
        );
    }

    #[test]
    fn test_block_entries_on_brace_lines() {
        let Payload::Nested(entries) = payload("{ h : open -a Safari\n t : open -a Terminal }").unwrap()
        else {
            panic!("expected a leader block");
        };
        let keys: Vec<&str> = entries.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["h", "t"]);
        assert_eq!(entries["t"].line_number, 2);
        assert_eq!(entries["t"].key_combination, "");
    }

    #[test]
    fn test_group_with_template() {
        let expansion = group(&["c", "f"], "open -a { \"Chrome\", Finder } --new").unwrap();
        assert_eq!(expansion.commands, vec!["Chrome", "Finder"]);
        assert_eq!(expansion.prefix, "open -a ");
        assert_eq!(expansion.suffix, " --new");
    }

    #[test]
    fn test_group_keeps_multi_token_elements() {
        let expansion = group(&["a"], "{ open -a \"Sublime Text\" }").unwrap();
        assert_eq!(expansion.commands, vec!["open -a \"Sublime Text\""]);
        assert_eq!(expansion.prefix, "");
    }

    #[test]
    fn test_unquote_escapes() {
        assert_eq!(unquote(r#""say \"hi\"""#), "say \"hi\"");
        assert_eq!(unquote(r#""C:\path""#), r"C:\path");
    }

    #[rstest]
    #[case::empty_payload("", ErrorKind::MalformedKeybinding)]
    #[case::empty_chain_element("a;; b", ErrorKind::MalformedKeybinding)]
    #[case::stray_close("open }", ErrorKind::UnbalancedBlock)]
    #[case::unclosed_block("{\n h : x\n", ErrorKind::UnbalancedBlock)]
    #[case::nested_block("{\n h : {\n g : x\n }\n}", ErrorKind::UnsupportedNesting)]
    #[case::entry_without_colon("{\n h x\n}", ErrorKind::MalformedKeybinding)]
    #[case::text_after_block("{\n h : x\n} y", ErrorKind::MalformedKeybinding)]
    #[case::group_without_key_group("open -a { A, B }", ErrorKind::MalformedKeybinding)]
    fn test_payload_errors(#[case] source: &str, #[case] kind: ErrorKind) {
        assert_eq!(payload(source).unwrap_err().kind, kind);
    }

    #[rstest]
    #[case::fewer_commands(&["c", "f"], "open -a { Chrome }")]
    #[case::more_commands(&["c"], "open -a { Chrome, Finder }")]
    #[case::empty_group(&["c"], "open -a { }")]
    #[case::trailing_comma(&["c", "f"], "open -a { Chrome, Finder, }")]
    #[case::no_group(&["c", "f"], "open -a Chrome")]
    fn test_group_arity(#[case] keys: &[&str], #[case] source: &str) {
        assert_eq!(
            group(keys, source).unwrap_err().kind,
            ErrorKind::GroupArityMismatch
        );
    }

    #[test]
    fn test_nesting_error_points_at_inner_brace() {
        let err = payload("{\n h : {\n g : x\n }\n}").unwrap_err();
        assert_eq!(err.line, 2);
    }
}
