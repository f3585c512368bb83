//! Token cursor
//!
//!     A read position over the clean token stream. Tokens are borrowed from the stream, so a
//!     parser can hold on to earlier tokens (to slice commands out of the source) while it keeps
//!     advancing.
//!
//!     Source slices only keep what the clean stream accounts for: the tokens themselves and
//!     the whitespace between them. A gap that held anything else held a comment, and is
//!     written as a single space.

use crate::meraki::token::{LocatedToken, Token};
use std::borrow::Cow;

pub struct TokenCursor<'a> {
    tokens: &'a [LocatedToken],
    source: &'a str,
    pos: usize,
}

impl<'a> TokenCursor<'a> {
    pub fn new(tokens: &'a [LocatedToken], source: &'a str) -> Self {
        TokenCursor {
            tokens,
            source,
            pos: 0,
        }
    }

    pub fn peek(&self) -> Option<&'a LocatedToken> {
        self.tokens.get(self.pos)
    }

    pub fn peek_kind(&self) -> Option<Token> {
        self.peek().map(|t| t.token)
    }

    /// The token `n` positions ahead of the next one
    pub fn peek_nth(&self, n: usize) -> Option<&'a LocatedToken> {
        self.tokens.get(self.pos + n)
    }

    pub fn advance(&mut self) -> Option<&'a LocatedToken> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(token)
    }

    pub fn check(&self, token: Token) -> bool {
        self.peek_kind() == Some(token)
    }

    /// Consume the next token if it is `token`
    pub fn eat(&mut self, token: Token) -> Option<&'a LocatedToken> {
        if self.check(token) {
            self.advance()
        } else {
            None
        }
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// True at a newline or at end of input
    pub fn at_line_end(&self) -> bool {
        matches!(self.peek_kind(), None | Some(Token::Newline))
    }

    pub fn skip_newlines(&mut self) {
        while self.eat(Token::Newline).is_some() {}
    }

    pub fn text(&self, token: &LocatedToken) -> &'a str {
        token.text(self.source)
    }

    /// Source text from the start of `first` to the end of `last`, verbatim
    pub fn slice(&self, first: &LocatedToken, last: &LocatedToken) -> Cow<'a, str> {
        self.source_range(first.span.start, last.span.end)
    }

    /// Source text in `start..end` with any comment in it dropped
    pub fn source_range(&self, start: usize, end: usize) -> Cow<'a, str> {
        let from = self.tokens.partition_point(|t| t.span.start < start);
        let inside: Vec<&'a LocatedToken> = self.tokens[from..]
            .iter()
            .take_while(|t| t.span.end <= end)
            .collect();

        let mut gaps = Vec::with_capacity(inside.len() + 1);
        let mut at = start;
        for token in &inside {
            gaps.push(at..token.span.start);
            at = token.span.end;
        }
        gaps.push(at..end);

        let has_comment = gaps
            .iter()
            .any(|gap| !self.source[gap.clone()].chars().all(char::is_whitespace));
        if !has_comment {
            return Cow::Borrowed(&self.source[start..end]);
        }

        let mut text = String::with_capacity(end - start);
        for (gap, token) in gaps.iter().zip(inside.iter().map(Some).chain([None])) {
            push_gap(&mut text, &self.source[gap.clone()]);
            if let Some(token) = token {
                text.push_str(self.text(token));
            }
        }
        Cow::Owned(text)
    }

    /// Line of the next token, or of the last token once input is exhausted
    pub fn line(&self) -> usize {
        self.peek()
            .or_else(|| self.tokens.last())
            .map(|t| t.line)
            .unwrap_or(1)
    }

    /// How the next token reads in an error message
    pub fn describe_next(&self) -> String {
        match self.peek() {
            None => "end of input".to_string(),
            Some(t) if t.token.is_key_literal() || matches!(t.token, Token::QuotedString(_)) => {
                format!("'{}'", self.text(t))
            }
            Some(t) => t.token.describe().to_string(),
        }
    }

    /// Whether the statement starting here defines a modifier: `=` before any `:` on the line
    pub fn is_modifier_definition(&self) -> bool {
        for located in &self.tokens[self.pos.min(self.tokens.len())..] {
            match located.token {
                Token::Equals => return true,
                Token::Colon | Token::Newline => return false,
                _ => {}
            }
        }
        false
    }
}

fn push_gap(text: &mut String, gap: &str) {
    if gap.chars().all(char::is_whitespace) {
        text.push_str(gap);
    } else {
        text.push(' ');
    }
}
