//! Core token types shared across the lexer, the comment extractor and the parser.
//!
//!     Tokens are produced by the logos lexer. Horizontal whitespace is skipped by the lexer
//!     itself; newlines survive as [Token::Newline] because they terminate statements.
//!
//!     Each token is paired with the byte range of its source text and the 1-based line it
//!     starts on (see [LocatedToken]). Commands are never rebuilt from token values: the
//!     parser slices the source between the first and last token of a command, so the byte
//!     ranges have to be left exactly as logos produced them.
//!
//! Token Classes
//!
//!     Words:        Identifier, Number, Text, QuotedString
//!     Operators:    Plus, Dash, Colon, Tilde, Comma, Equals, Semicolon
//!     Delimiters:   LBrace, RBrace, LBracket, RBracket
//!     Comments:     LineComment (`#` to end of line), BlockComment (`@END` through `END`)
//!     Structure:    Newline
//!
//!     `Identifier` and `Number` win over `Text` when both match the same input, but a longer
//!     `Text` match wins over a shorter identifier prefix, so `Mail.app` and `750ms` are
//!     single `Text` tokens.

use logos::{Lexer, Logos};
use std::fmt;
use std::ops::Range;

/// Whether a quoted string or block comment found its closing delimiter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Termination {
    Closed,
    Unclosed,
}

/// All possible tokens in the meraki format
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[logos(skip r"[ \t\r\f]+")]
pub enum Token {
    #[token("\n")]
    Newline,

    // Comments
    #[regex(r"#[^\n]*")]
    LineComment,
    #[token("@END", block_comment)]
    BlockComment(Termination),

    // Operators
    #[token("+")]
    Plus,
    #[token("-")]
    Dash,
    #[token(":")]
    Colon,
    #[token("~")]
    Tilde,
    #[token(",")]
    Comma,
    #[token("=")]
    Equals,
    #[token(";")]
    Semicolon,

    // Delimiters
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,

    // Words
    #[token("\"", quoted_string)]
    QuotedString(Termination),
    #[regex(r"[a-z][a-z0-9_]*", priority = 3)]
    Identifier,
    #[regex(r"[0-9]+", priority = 3)]
    Number,
    #[regex(r##"[^\s"#{}\[\]~;:=+,\-]+"##, priority = 1)]
    Text,
}

impl Token {
    /// Tokens that can stand for a key: `m`, `1`, `Mail.app`
    pub fn is_key_literal(&self) -> bool {
        matches!(self, Token::Identifier | Token::Number | Token::Text)
    }

    /// Check if this token is a comment of either form
    pub fn is_comment(&self) -> bool {
        matches!(self, Token::LineComment | Token::BlockComment(_))
    }

    /// Short human-readable name used in error messages
    pub fn describe(&self) -> &'static str {
        match self {
            Token::Newline => "end of line",
            Token::LineComment => "comment",
            Token::BlockComment(_) => "block comment",
            Token::Plus => "'+'",
            Token::Dash => "'-'",
            Token::Colon => "':'",
            Token::Tilde => "'~'",
            Token::Comma => "','",
            Token::Equals => "'='",
            Token::Semicolon => "';'",
            Token::LBrace => "'{'",
            Token::RBrace => "'}'",
            Token::LBracket => "'['",
            Token::RBracket => "']'",
            Token::QuotedString(_) => "quoted string",
            Token::Identifier => "identifier",
            Token::Number => "number",
            Token::Text => "text",
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// A token with its byte range in the source and the 1-based line it starts on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedToken {
    pub token: Token,
    pub span: Range<usize>,
    pub line: usize,
}

impl LocatedToken {
    pub fn new(token: Token, span: Range<usize>, line: usize) -> Self {
        LocatedToken { token, span, line }
    }

    /// The source text this token covers
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        &source[self.span.clone()]
    }
}

/// Type alias for a located token sequence
pub type TokenStream = Vec<LocatedToken>;

/// Consumes a double-quoted string after its opening quote.
///
/// `\"` and `\\` are escapes. Strings never cross a newline: reaching one (or the end of
/// input) leaves the string unclosed and the newline untouched.
fn quoted_string(lex: &mut Lexer<Token>) -> Termination {
    let rest = lex.remainder();
    let mut escaped = false;
    for (idx, ch) in rest.char_indices() {
        if ch == '\n' {
            lex.bump(idx);
            return Termination::Unclosed;
        }
        if escaped {
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if ch == '"' {
            lex.bump(idx + ch.len_utf8());
            return Termination::Closed;
        }
    }
    lex.bump(rest.len());
    Termination::Unclosed
}

/// Consumes an `@END` block through the next `END` that closes a line, or to end of input.
fn block_comment(lex: &mut Lexer<Token>) -> Termination {
    let rest = lex.remainder();
    match find_end_marker(rest) {
        Some(end) => {
            lex.bump(end);
            Termination::Closed
        }
        None => {
            lex.bump(rest.len());
            Termination::Unclosed
        }
    }
}

/// Byte offset just past the first closing `END`.
///
/// `END` closes a block only as the last word on its line: it must not be part of a longer
/// word, and only horizontal whitespace may follow it before the newline. Prose such as
/// "press the END key" stays inside the comment.
fn find_end_marker(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut from = 0;
    while let Some(offset) = text[from..].find("END") {
        let start = from + offset;
        let end = start + 3;
        let open_before = start == 0 || !is_word_byte(bytes[start - 1]);
        if open_before && closes_line(&bytes[end..]) {
            return Some(end);
        }
        from = end;
    }
    None
}

fn closes_line(rest: &[u8]) -> bool {
    rest.iter()
        .find(|&&b| !matches!(b, b' ' | b'\t' | b'\r' | b'\x0c'))
        .map_or(true, |&b| b == b'\n')
}

fn is_word_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'@'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<Token> {
        Token::lexer(source).map(|t| t.expect("lex failed")).collect()
    }

    #[test]
    fn test_modifier_definition_tokens() {
        assert_eq!(
            kinds("mod1 = lcmd + lalt"),
            vec![
                Token::Identifier,
                Token::Equals,
                Token::Identifier,
                Token::Plus,
                Token::Identifier
            ]
        );
    }

    #[test]
    fn test_operators_and_delimiters() {
        assert_eq!(
            kinds("+ - : ~ , = ; { } [ ]"),
            vec![
                Token::Plus,
                Token::Dash,
                Token::Colon,
                Token::Tilde,
                Token::Comma,
                Token::Equals,
                Token::Semicolon,
                Token::LBrace,
                Token::RBrace,
                Token::LBracket,
                Token::RBracket,
            ]
        );
    }

    #[test]
    fn test_text_beats_identifier_prefix() {
        let mut lexer = Token::lexer("Mail.app 750ms lcmd 42");
        assert_eq!(lexer.next(), Some(Ok(Token::Text)));
        assert_eq!(lexer.slice(), "Mail.app");
        assert_eq!(lexer.next(), Some(Ok(Token::Text)));
        assert_eq!(lexer.slice(), "750ms");
        assert_eq!(lexer.next(), Some(Ok(Token::Identifier)));
        assert_eq!(lexer.next(), Some(Ok(Token::Number)));
        assert_eq!(lexer.next(), None);
    }

    #[test]
    fn test_quoted_string_with_escapes() {
        let mut lexer = Token::lexer(r#""string with \"quote\" and #" x"#);
        assert_eq!(
            lexer.next(),
            Some(Ok(Token::QuotedString(Termination::Closed)))
        );
        assert_eq!(lexer.slice(), r#""string with \"quote\" and #""#);
        assert_eq!(lexer.next(), Some(Ok(Token::Identifier)));
    }

    #[test]
    fn test_quoted_string_stops_at_newline() {
        let mut lexer = Token::lexer("\"open\nmod1");
        assert_eq!(
            lexer.next(),
            Some(Ok(Token::QuotedString(Termination::Unclosed)))
        );
        assert_eq!(lexer.slice(), "\"open");
        assert_eq!(lexer.next(), Some(Ok(Token::Newline)));
    }

    #[test]
    fn test_line_comment_runs_to_end_of_line() {
        let mut lexer = Token::lexer("mod1 # comment with # inside\n");
        assert_eq!(lexer.next(), Some(Ok(Token::Identifier)));
        assert_eq!(lexer.next(), Some(Ok(Token::LineComment)));
        assert_eq!(lexer.slice(), "# comment with # inside");
        assert_eq!(lexer.next(), Some(Ok(Token::Newline)));
    }

    #[test]
    fn test_block_comment_spans_lines() {
        let mut lexer = Token::lexer("@END note\nmore text END\nmod1");
        assert_eq!(
            lexer.next(),
            Some(Ok(Token::BlockComment(Termination::Closed)))
        );
        assert_eq!(lexer.slice(), "@END note\nmore text END");
        assert_eq!(lexer.next(), Some(Ok(Token::Newline)));
        assert_eq!(lexer.next(), Some(Ok(Token::Identifier)));
    }

    #[test]
    fn test_block_comment_ignores_end_inside_words() {
        let mut lexer = Token::lexer("@END the ENDING of @END things\nEND");
        assert_eq!(
            lexer.next(),
            Some(Ok(Token::BlockComment(Termination::Closed)))
        );
        assert_eq!(lexer.slice(), "@END the ENDING of @END things\nEND");
        assert_eq!(lexer.next(), None);
    }

    #[test]
    fn test_end_inside_a_line_does_not_close() {
        let mut lexer = Token::lexer("@END\nPress the END key\nEND\nmod1");
        assert_eq!(
            lexer.next(),
            Some(Ok(Token::BlockComment(Termination::Closed)))
        );
        assert_eq!(lexer.slice(), "@END\nPress the END key\nEND");
        assert_eq!(lexer.next(), Some(Ok(Token::Newline)));
    }

    #[test]
    fn test_end_followed_by_spaces_closes() {
        let mut lexer = Token::lexer("@END note END  \t\r\nmod1");
        assert_eq!(
            lexer.next(),
            Some(Ok(Token::BlockComment(Termination::Closed)))
        );
        assert_eq!(lexer.slice(), "@END note END");
    }

    #[test]
    fn test_unclosed_block_comment_takes_remainder() {
        let mut lexer = Token::lexer("@END never closed\nmod1 - m : x");
        assert_eq!(
            lexer.next(),
            Some(Ok(Token::BlockComment(Termination::Unclosed)))
        );
        assert_eq!(lexer.next(), None);
    }

    #[test]
    fn test_key_literal_predicate() {
        assert!(Token::Identifier.is_key_literal());
        assert!(Token::Number.is_key_literal());
        assert!(Token::Text.is_key_literal());
        assert!(!Token::QuotedString(Termination::Closed).is_key_literal());
        assert!(!Token::Colon.is_key_literal());
    }
}
