//! Parser engine
//!
//!     Walks the clean token stream statement by statement. Blank lines are skipped; a line with
//!     `=` before any `:` is a modifier definition, anything else is a keybinding. The first
//!     structural error ends the parse.

use super::cursor::TokenCursor;
use super::keybinding::parse_keybinding;
use super::modifier::parse_modifier_definition;
use crate::meraki::ast::{Ast, ParseError};
use crate::meraki::options::ParserOptions;
use crate::meraki::token::{LocatedToken, Token};
use tracing::debug;

/// Build the provisional AST (no comments attached) from a comment-free token stream
pub fn parse_from_clean_tokens(
    tokens: &[LocatedToken],
    source: &str,
    options: &ParserOptions,
) -> Result<Ast, ParseError> {
    let mut cursor = TokenCursor::new(tokens, source);
    let mut ast = Ast::new();

    loop {
        cursor.skip_newlines();
        let Some(next) = cursor.peek() else {
            break;
        };
        if next.token == Token::RBrace {
            return Err(ParseError::unbalanced_block(
                next.line,
                "'}' without a matching '{'",
            ));
        }
        if cursor.is_modifier_definition() {
            ast.define_modifier(parse_modifier_definition(&mut cursor, options)?);
        } else {
            ast.keybindings.push(parse_keybinding(&mut cursor, options)?);
        }
    }

    debug!(
        modifiers = ast.modifiers.len(),
        keybindings = ast.keybindings.len(),
        "parsed statements"
    );
    Ok(ast)
}
