//! Core tokenization implementation
//!
//! Raw tokenization is handled entirely by logos. This module walks the logos lexer, tags
//! every token with the line it starts on, and turns unterminated strings and unmatched
//! input into [LexError]s.

use crate::meraki::lexing::common::{LexError, Lexed, MAX_IDENTIFIER_LENGTH};
use crate::meraki::token::{LocatedToken, Termination, Token, TokenStream};
use logos::Logos;
use tracing::debug;

/// Tokenize source code with location information
///
/// Lines are 1-based. Tokens that span lines (block comments) carry the line they start on.
pub fn tokenize(source: &str) -> Result<TokenStream, LexError> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();
    let mut line = 1;

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let token = match result {
            Ok(token) => token,
            Err(()) => {
                let ch = source[span.start..].chars().next().unwrap_or('\u{fffd}');
                return Err(LexError::UnexpectedCharacter { ch, line });
            }
        };

        if token == Token::QuotedString(Termination::Unclosed) {
            return Err(LexError::UnterminatedString { line });
        }
        if token == Token::Identifier && span.len() > MAX_IDENTIFIER_LENGTH {
            return Err(LexError::IdentifierTooLong {
                length: span.len(),
                line,
            });
        }

        let newlines = lexer.slice().bytes().filter(|b| *b == b'\n').count();
        tokens.push(LocatedToken::new(token, span, line));
        line += newlines;
    }

    debug!(tokens = tokens.len(), lines = line, "tokenized source");
    Ok(tokens)
}

/// Tokenize and keep the source alongside the tokens
pub fn lex(source: String) -> Result<Lexed, LexError> {
    let tokens = tokenize(&source)?;
    Ok(Lexed { source, tokens })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds_and_lines(source: &str) -> Vec<(Token, usize)> {
        tokenize(source)
            .expect("tokenize failed")
            .into_iter()
            .map(|t| (t.token, t.line))
            .collect()
    }

    #[test]
    fn test_tokenize_with_lines() {
        let tokens = kinds_and_lines("mod1 = lcmd\n    mod2 = lalt");
        assert_eq!(
            tokens,
            vec![
                (Token::Identifier, 1),
                (Token::Equals, 1),
                (Token::Identifier, 1),
                (Token::Newline, 1),
                (Token::Identifier, 2),
                (Token::Equals, 2),
                (Token::Identifier, 2),
            ]
        );
    }

    #[test]
    fn test_spans_point_into_source() {
        let source = "mod1 - m : open -a Mail.app";
        let tokens = tokenize(source).unwrap();
        let texts: Vec<&str> = tokens.iter().map(|t| t.text(source)).collect();
        assert_eq!(
            texts,
            vec!["mod1", "-", "m", ":", "open", "-", "a", "Mail.app"]
        );
    }

    #[test]
    fn test_block_comment_advances_line_count() {
        let tokens = kinds_and_lines("@END\nnote\nEND\nmod1");
        assert_eq!(
            tokens,
            vec![
                (Token::BlockComment(Termination::Closed), 1),
                (Token::Newline, 3),
                (Token::Identifier, 4),
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(tokenize("").unwrap(), vec![]);
    }

    #[test]
    fn test_whitespace_is_insignificant() {
        let tokens = kinds_and_lines("mod1    =     lcmd");
        assert_eq!(
            tokens,
            vec![
                (Token::Identifier, 1),
                (Token::Equals, 1),
                (Token::Identifier, 1)
            ]
        );
    }

    #[test]
    fn test_unterminated_string_reports_start_line() {
        let err = tokenize("mod1 - m : x\nmod1 - s : open -a \"Sublime").unwrap_err();
        assert_eq!(err, LexError::UnterminatedString { line: 2 });
        assert_eq!(err.line(), 2);
    }

    #[test]
    fn test_identifier_length_limit() {
        let longest = "a".repeat(MAX_IDENTIFIER_LENGTH);
        assert!(tokenize(&format!("{} = lcmd", longest)).is_ok());

        let too_long = "b".repeat(MAX_IDENTIFIER_LENGTH + 1);
        let err = tokenize(&format!("mod1 = lcmd\n{} - x : y", too_long)).unwrap_err();
        assert_eq!(
            err,
            LexError::IdentifierTooLong {
                length: MAX_IDENTIFIER_LENGTH + 1,
                line: 2
            }
        );
        assert_eq!(
            err.to_string(),
            "identifier on line 2 is 51 characters long (max 50)"
        );
    }

    #[test]
    fn test_unexpected_character() {
        let err = tokenize("mod1\u{00a0}- m : x").unwrap_err();
        assert_eq!(
            err,
            LexError::UnexpectedCharacter {
                ch: '\u{00a0}',
                line: 1
            }
        );
    }
}
