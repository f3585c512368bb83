//! Modifier definitions
//!
//!     name ("+" name)* "=" key ("+" key)*
//!
//!     Every key on the right-hand side must be a recognized modifier key literal. Anything
//!     else on that side, including a missing key, is an invalid modifier key.

use super::cursor::TokenCursor;
use super::keybinding::parse_combination;
use crate::meraki::ast::{ModifierDef, ParseError};
use crate::meraki::options::ParserOptions;
use crate::meraki::token::Token;

pub fn parse_modifier_definition(
    cursor: &mut TokenCursor<'_>,
    options: &ParserOptions,
) -> Result<ModifierDef, ParseError> {
    let line = cursor.line();
    let name = parse_combination(cursor).ok_or_else(|| {
        ParseError::invalid_modifier_key(
            line,
            format!("expected a modifier name, found {}", cursor.describe_next()),
        )
    })?;
    if cursor.eat(Token::Equals).is_none() {
        return Err(ParseError::invalid_modifier_key(
            line,
            format!(
                "expected '=' after modifier name '{}', found {}",
                name,
                cursor.describe_next()
            ),
        ));
    }

    let mut keys = Vec::new();
    loop {
        let key = match cursor.peek() {
            Some(t) if t.token.is_key_literal() => cursor.text(t),
            _ => {
                return Err(ParseError::invalid_modifier_key(
                    line,
                    format!("expected a modifier key, found {}", cursor.describe_next()),
                ))
            }
        };
        if !options.is_modifier_key(key) {
            return Err(ParseError::invalid_modifier_key(
                line,
                format!("'{}' is not a modifier key (expected one of cmd, alt, shift, ctrl, lcmd, lalt, ...)", key),
            ));
        }
        cursor.advance();
        keys.push(key.to_string());

        if cursor.eat(Token::Plus).is_none() {
            break;
        }
    }

    if !cursor.at_line_end() {
        return Err(ParseError::invalid_modifier_key(
            line,
            format!(
                "expected '+' or end of line after modifier key, found {}",
                cursor.describe_next()
            ),
        ));
    }

    Ok(ModifierDef::new(name, keys, line))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meraki::ast::ErrorKind;
    use crate::meraki::lexing::tokenize;

    fn parse(source: &str) -> Result<ModifierDef, ParseError> {
        let tokens = tokenize(source).unwrap();
        let mut cursor = TokenCursor::new(&tokens, source);
        parse_modifier_definition(&mut cursor, &ParserOptions::default())
    }

    #[test]
    fn test_basic_definition() {
        let modifier = parse("mod1 = lcmd + lalt").unwrap();
        assert_eq!(modifier.name, "mod1");
        assert_eq!(modifier.keys, vec!["lcmd", "lalt"]);
        assert_eq!(modifier.line_number, 1);
    }

    #[test]
    fn test_compound_name_is_opaque() {
        let modifier = parse("mod2 + shift = lcmd + lshift").unwrap();
        assert_eq!(modifier.name, "mod2 + shift");
    }

    #[test]
    fn test_repeated_keys_are_kept() {
        assert_eq!(parse("m = cmd + cmd").unwrap().keys, vec!["cmd", "cmd"]);
    }

    #[test]
    fn test_errors() {
        for source in [
            "mod1 = invalid + modifier",
            "mod1 =",
            "mod1 = lcmd +",
            "mod1 = lcmd lalt",
            "mod1 = Lcmd",
        ] {
            let err = parse(source).unwrap_err();
            assert_eq!(err.kind, ErrorKind::InvalidModifierKey, "{}", source);
            assert_eq!(err.line, 1);
        }
    }

    #[test]
    fn test_extra_modifier_keys() {
        let source = "mod1 = capslock";
        let tokens = tokenize(source).unwrap();
        let mut cursor = TokenCursor::new(&tokens, source);
        let options = ParserOptions::default().with_modifier_key("capslock");
        let modifier = parse_modifier_definition(&mut cursor, &options).unwrap();
        assert_eq!(modifier.keys, vec!["capslock"]);
    }
}
