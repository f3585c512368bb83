//! Comment extraction
//!
//!     First pass over the token stream. All three comment forms are lifted out into a side
//!     list tagged with line ranges, and everything else is passed through untouched as the
//!     clean token stream the structural parser consumes.
//!
//!     Line:       `#` with no code before it on the same line.
//!     Inline:     `#` after code on the same line. Associated with that line.
//!     Multiline:  `@END` ... `END`, spanning one or more lines.
//!
//!     A block that opens after code keeps that code line as its `associated_line`, so
//!     attachment knows the line is not comment-only.
//!
//! Recovery
//!
//!     Extraction never fails. An `@END` without a closing `END` is recorded as a
//!     `MalformedComment` warning, and the rest of the input becomes one trailing multiline
//!     comment. The tokens before it are still parsed.

use crate::meraki::ast::{Comment, Diagnostics, Warning};
use crate::meraki::lexing::common::Lexed;
use crate::meraki::token::{Termination, Token, TokenStream};
use tracing::debug;

/// Output of comment extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    pub source: String,
    /// Token stream with every comment token removed. Newlines are kept.
    pub tokens: TokenStream,
    /// Comments in source order
    pub comments: Vec<Comment>,
    pub diagnostics: Diagnostics,
}

/// Split a located token stream into clean tokens and comments
pub fn extract_comments(lexed: Lexed) -> Extracted {
    let Lexed { source, tokens } = lexed;
    let mut clean = Vec::with_capacity(tokens.len());
    let mut comments = Vec::new();
    let mut diagnostics = Diagnostics::new();
    let mut last_code_line = None;

    for located in tokens {
        match located.token {
            Token::LineComment => {
                let text = line_comment_text(located.text(&source));
                let comment = if last_code_line == Some(located.line) {
                    Comment::inline(text, located.line)
                } else {
                    Comment::line(text, located.line)
                };
                comments.push(comment);
            }
            Token::BlockComment(termination) => {
                let raw = located.text(&source);
                let end_line = located.line + raw.trim_end().matches('\n').count();
                if termination == Termination::Unclosed {
                    diagnostics.push(Warning::malformed_comment(
                        located.line,
                        "'@END' block is never closed by 'END'; the rest of the file is treated as a comment",
                    ));
                }
                let mut comment =
                    Comment::multiline(block_comment_text(raw, termination), located.line, end_line);
                if last_code_line == Some(located.line) {
                    comment.associated_line = Some(located.line);
                }
                comments.push(comment);
            }
            Token::Newline => clean.push(located),
            _ => {
                last_code_line = Some(located.line);
                clean.push(located);
            }
        }
    }

    debug!(
        tokens = clean.len(),
        comments = comments.len(),
        warnings = diagnostics.len(),
        "extracted comments"
    );

    Extracted {
        source,
        tokens: clean,
        comments,
        diagnostics,
    }
}

/// Text after the first `#`, trimmed
fn line_comment_text(raw: &str) -> String {
    raw.strip_prefix('#').unwrap_or(raw).trim().to_string()
}

/// Text between `@END` and `END`, each line trimmed, surrounding blank lines dropped
fn block_comment_text(raw: &str, termination: Termination) -> String {
    let body = raw.strip_prefix("@END").unwrap_or(raw);
    let body = match termination {
        Termination::Closed => body.strip_suffix("END").unwrap_or(body),
        Termination::Unclosed => body,
    };
    let lines: Vec<&str> = body.lines().map(str::trim).collect();
    let first = lines.iter().position(|l| !l.is_empty());
    let last = lines.iter().rposition(|l| !l.is_empty());
    match (first, last) {
        (Some(first), Some(last)) => lines[first..=last].join("\n"),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meraki::ast::{CommentKind, WarningKind};
    use crate::meraki::lexing::base_tokenization::lex;

    fn extract(source: &str) -> Extracted {
        extract_comments(lex(source.to_string()).expect("lex failed"))
    }

    #[test]
    fn test_line_comment() {
        let extracted = extract("# Basic comment");
        assert_eq!(extracted.comments, vec![Comment::line("Basic comment", 1)]);
        assert!(extracted.tokens.is_empty());
    }

    #[test]
    fn test_indented_line_comment_is_not_inline() {
        let extracted = extract("    # Comment with space\nmod1 = lcmd");
        assert_eq!(extracted.comments[0].kind, CommentKind::Line);
        assert_eq!(extracted.comments[0].text, "Comment with space");
    }

    #[test]
    fn test_inline_comment_keeps_code() {
        let extracted = extract("mod1 = lcmd + lalt  # Inline comment");
        assert_eq!(
            extracted.comments,
            vec![Comment::inline("Inline comment", 1)]
        );
        let kinds: Vec<Token> = extracted.tokens.iter().map(|t| t.token).collect();
        assert_eq!(
            kinds,
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
    fn test_empty_and_double_hash_comments() {
        let extracted = extract("#\n## Double hash comment");
        assert_eq!(extracted.comments[0].text, "");
        assert_eq!(extracted.comments[1].text, "# Double hash comment");
    }

    #[test]
    fn test_multiline_comment_bounds_and_text() {
        let extracted = extract("@END\n  This is a multi-line comment\n  describing the next binding\nEND\nmod1 = lcmd + lalt");
        assert_eq!(
            extracted.comments,
            vec![Comment::multiline(
                "This is a multi-line comment\ndescribing the next binding",
                1,
                4
            )]
        );
        assert!(extracted.diagnostics.is_empty());
        assert_eq!(extracted.tokens.last().map(|t| t.line), Some(5));
    }

    #[test]
    fn test_multiline_comment_on_marker_lines() {
        let extracted = extract("@END This is a note about\nthe following keybindings. END");
        assert_eq!(
            extracted.comments,
            vec![Comment::multiline(
                "This is a note about\nthe following keybindings.",
                1,
                2
            )]
        );
    }

    #[test]
    fn test_unclosed_block_is_warning_not_error() {
        let extracted = extract("mod1 = lcmd + lalt\n@END\nnever closed\nmod1 - m : x\n");
        assert_eq!(extracted.diagnostics.len(), 1);
        let warning = &extracted.diagnostics.warnings()[0];
        assert_eq!(warning.kind, WarningKind::MalformedComment);
        assert_eq!(warning.line, 2);

        assert_eq!(
            extracted.comments,
            vec![Comment::multiline("never closed\nmod1 - m : x", 2, 4)]
        );
        // Only the modifier definition survives as code
        assert!(extracted.tokens.iter().all(|t| t.line == 1));
    }

    #[test]
    fn test_block_after_code_keeps_its_code_line() {
        let extracted = extract("mod1 - a : x @END\nnote\nEND\n@END\nstandalone\nEND");
        assert_eq!(extracted.comments[0].associated_line, Some(1));
        assert_eq!((extracted.comments[0].start_line, extracted.comments[0].end_line), (1, 3));
        assert_eq!(extracted.comments[1].associated_line, None);
    }

    #[test]
    fn test_end_word_in_prose_stays_in_comment() {
        let extracted = extract("@END\nPress the END key\nEND\nmod1 - a : x");
        assert_eq!(
            extracted.comments,
            vec![Comment::multiline("Press the END key", 1, 3)]
        );
        assert!(extracted.diagnostics.is_empty());
    }

    #[test]
    fn test_hash_inside_quoted_string_is_not_a_comment() {
        let extracted = extract("mod1 - s : echo \"string with #\"");
        assert!(extracted.comments.is_empty());
    }
}
