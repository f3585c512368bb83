//! Normalized meraki text
//!
//! Writes an AST back out in canonical form:
//!
//!     - modifiers first, then keybindings, separated by a blank line
//!     - leading comments directly above their statement, `#` or `@END` ... `END`
//!     - inline comments after their statement
//!     - leader block entries indented four spaces, one per line
//!     - explicit timeouts on every leader
//!     - orphan comments last, after a blank line
//!
//! Parsing the output gives back the same modifiers, bindings, timeouts, flags and comment
//! texts; only line numbers change.

use crate::meraki::ast::{Ast, Comment, CommentKind, Key, Keybinding, ModifierDef, Payload};
use crate::meraki::lexing::tokenize;
use crate::meraki::token::Token;

const INDENT: &str = "    ";

/// Conversion of an AST node to meraki source text
pub trait ToMerakiString {
    fn to_meraki_string(&self) -> String;
}

impl ToMerakiString for ModifierDef {
    fn to_meraki_string(&self) -> String {
        self.to_string()
    }
}

impl ToMerakiString for Key {
    fn to_meraki_string(&self) -> String {
        match self {
            Key::Single(key) => format!("- {}", key),
            Key::Group(keys) => format!("+ {{ {} }}", keys.join(", ")),
        }
    }
}

impl ToMerakiString for Payload {
    fn to_meraki_string(&self) -> String {
        match self {
            Payload::Action(action) => action.clone(),
            Payload::Actions(actions) => actions.join("; "),
            Payload::Group(group) => {
                let elements: Vec<String> = group.commands.iter().map(|c| group_element(c)).collect();
                format!("{}{{ {} }}{}", group.prefix, elements.join(", "), group.suffix)
            }
            Payload::Nested(_) => "{".to_string(),
        }
    }
}

/// The statement line of a binding, without comments or block entries
impl ToMerakiString for Keybinding {
    fn to_meraki_string(&self) -> String {
        let mut head = self.key_combination.clone();
        if let Some(key) = &self.key {
            match key {
                Key::Single(key) if head.is_empty() => head.push_str(key),
                _ => {
                    head.push(' ');
                    head.push_str(&key.to_meraki_string());
                }
            }
        }
        if let Some(timeout) = self.timeout_ms {
            head.push_str(&format!(" [{}ms]", timeout));
        }
        for flag in &self.activation_flags {
            head.push(' ');
            head.push_str(&flag.to_string());
        }
        format!("{} : {}", head, self.payload.to_meraki_string())
    }
}

impl ToMerakiString for Ast {
    fn to_meraki_string(&self) -> String {
        to_normalized_string(self)
    }
}

/// Render `ast` as normalized meraki source
pub fn to_normalized_string(ast: &Ast) -> String {
    let mut out = String::new();

    for modifier in ast.modifiers.values() {
        write_statement(&mut out, "", &modifier.to_meraki_string(), &modifier.comments);
    }
    if !ast.modifiers.is_empty() && !ast.keybindings.is_empty() {
        out.push('\n');
    }

    for binding in &ast.keybindings {
        write_statement(&mut out, "", &binding.to_meraki_string(), &binding.comments);
        if let Some(entries) = binding.nested_bindings() {
            for entry in entries.values() {
                write_statement(&mut out, INDENT, &entry.to_meraki_string(), &entry.comments);
            }
            out.push_str("}\n");
        }
    }

    if !ast.orphan_comments.is_empty() {
        if !out.is_empty() {
            out.push('\n');
        }
        for comment in &ast.orphan_comments {
            write_leading_comment(&mut out, "", comment);
        }
    }
    out
}

fn write_statement(out: &mut String, indent: &str, statement: &str, comments: &[Comment]) {
    for comment in comments.iter().filter(|c| !c.is_inline()) {
        write_leading_comment(out, indent, comment);
    }
    out.push_str(indent);
    out.push_str(statement);
    for comment in comments.iter().filter(|c| c.is_inline()) {
        out.push_str(" #");
        if !comment.text.is_empty() {
            out.push(' ');
            out.push_str(&comment.text);
        }
    }
    out.push('\n');
}

fn write_leading_comment(out: &mut String, indent: &str, comment: &Comment) {
    match comment.kind {
        CommentKind::Multiline => {
            out.push_str(indent);
            out.push_str("@END\n");
            for line in comment.text.lines() {
                out.push_str(indent);
                out.push_str(line);
                out.push('\n');
            }
            out.push_str(indent);
            out.push_str("END\n");
        }
        CommentKind::Line | CommentKind::Inline => {
            out.push_str(indent);
            out.push_str(&Comment::line(comment.text.clone(), comment.start_line).to_string());
            out.push('\n');
        }
    }
}

/// A command group element, quoted when writing it bare would read back differently
fn group_element(element: &str) -> String {
    if reads_back_bare(element) {
        element.to_string()
    } else {
        let escaped = element.replace('\\', "\\\\").replace('"', "\\\"");
        format!("\"{}\"", escaped)
    }
}

fn reads_back_bare(element: &str) -> bool {
    if element.trim() != element {
        return false;
    }
    let Ok(tokens) = tokenize(element) else {
        return false;
    };
    let lone_string = tokens.len() == 1 && matches!(tokens[0].token, Token::QuotedString(_));
    !tokens.is_empty()
        && !lone_string
        && !tokens.iter().any(|t| {
            matches!(
                t.token,
                Token::Comma
                    | Token::LBrace
                    | Token::RBrace
                    | Token::Newline
                    | Token::LineComment
                    | Token::BlockComment(_)
            )
        })
}
