//! Comment attachment stage
//!
//! Matches extracted comments to AST nodes by line adjacency.
//!
//! # Attachment Rules
//!
//! 1. **Inline**: attaches to the node declared on the comment's own line.
//! 2. **Line**: attaches to the node on the line right after the comment.
//! 3. **Multiline**: attaches to the node on the line right after its `END`.
//! 4. **Runs**: consecutive `Line`/`Multiline` comments all document the statement below the
//!    last of them. A blank line breaks the run.
//! 5. **Orphans**: a comment with no node at its target line goes to the root's orphan list
//!    and is reported as an `OrphanedComment` warning.
//!
//! When several nodes share a line (a leader and an entry on its `{` line), the first one in
//! walk order owns it: modifiers, then each binding followed by its entries.
//!
//! Every comment list is cleared before attaching, so running the stage twice with the same
//! comments gives the same tree.

use crate::meraki::ast::{Ast, Comment, CommentKind, Diagnostics, ParseError, Warning};
use crate::meraki::parsing::Provisional;
use crate::meraki::transforms::Runnable;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Result of a successful parse
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parsed {
    pub ast: Ast,
    pub warnings: Vec<Warning>,
}

/// Comment attachment stage
///
/// # Input
/// - `Provisional` - AST without comments, the extracted comments, warnings so far
///
/// # Output
/// - `Parsed` - AST with comments attached, all warnings
pub struct AttachComments;

impl AttachComments {
    pub fn new() -> Self {
        AttachComments
    }
}

impl Default for AttachComments {
    fn default() -> Self {
        Self::new()
    }
}

impl Runnable<Provisional, Parsed> for AttachComments {
    fn run(&self, input: Provisional) -> Result<Parsed, ParseError> {
        let Provisional {
            ast,
            comments,
            mut diagnostics,
        } = input;
        let ast = attach_comments(ast, &comments, &mut diagnostics);
        Ok(Parsed {
            ast,
            warnings: diagnostics.into_warnings(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeRef {
    Modifier(usize),
    Binding(usize),
    Nested(usize, usize),
}

/// Attach `comments` to the nodes of `ast`, recording orphans in `diagnostics`
pub fn attach_comments(mut ast: Ast, comments: &[Comment], diagnostics: &mut Diagnostics) -> Ast {
    clear_comments(&mut ast);
    let index = index_node_lines(&ast);
    let comment_lines: HashSet<usize> = comments
        .iter()
        .filter(|c| c.kind != CommentKind::Inline)
        .flat_map(comment_only_lines)
        .collect();

    let mut attached = 0;
    for comment in comments {
        let target = match comment.kind {
            CommentKind::Inline => comment.associated_line.unwrap_or(comment.start_line),
            CommentKind::Line | CommentKind::Multiline => {
                let mut line = comment.end_line + 1;
                while comment_lines.contains(&line) {
                    line += 1;
                }
                line
            }
        };

        match index
            .get(&target)
            .and_then(|node| comments_mut(&mut ast, *node))
        {
            Some(owner) => {
                owner.push(comment.clone());
                attached += 1;
            }
            None => {
                diagnostics.push(Warning::orphaned_comment(
                    comment.start_line,
                    orphan_message(comment, target),
                ));
                ast.orphan_comments.push(comment.clone());
            }
        }
    }

    debug!(
        attached,
        orphaned = ast.orphan_comments.len(),
        "attached comments"
    );
    ast
}

/// Lines a leading comment covers with no code on them. A block opened after code does not
/// claim its first line.
fn comment_only_lines(comment: &Comment) -> std::ops::RangeInclusive<usize> {
    let first = match comment.associated_line {
        Some(line) if line == comment.start_line => line + 1,
        _ => comment.start_line,
    };
    first..=comment.end_line
}

fn orphan_message(comment: &Comment, target: usize) -> String {
    match comment.kind {
        CommentKind::Inline => format!("no statement on line {} for the inline comment", target),
        _ => format!(
            "comment is not directly followed by a statement (nothing on line {})",
            target
        ),
    }
}

fn clear_comments(ast: &mut Ast) {
    for modifier in ast.modifiers.values_mut() {
        modifier.comments.clear();
    }
    for binding in &mut ast.keybindings {
        binding.comments.clear();
        if let Some(nested) = binding.nested_bindings_mut() {
            for entry in nested.values_mut() {
                entry.comments.clear();
            }
        }
    }
    ast.orphan_comments.clear();
}

fn index_node_lines(ast: &Ast) -> HashMap<usize, NodeRef> {
    let mut index = HashMap::new();
    for (i, modifier) in ast.modifiers.values().enumerate() {
        index
            .entry(modifier.line_number)
            .or_insert(NodeRef::Modifier(i));
    }
    for (i, binding) in ast.keybindings.iter().enumerate() {
        index
            .entry(binding.line_number)
            .or_insert(NodeRef::Binding(i));
        if let Some(nested) = binding.nested_bindings() {
            for (j, entry) in nested.values().enumerate() {
                index
                    .entry(entry.line_number)
                    .or_insert(NodeRef::Nested(i, j));
            }
        }
    }
    index
}

fn comments_mut(ast: &mut Ast, node: NodeRef) -> Option<&mut Vec<Comment>> {
    match node {
        NodeRef::Modifier(i) => ast.modifiers.get_index_mut(i).map(|(_, m)| &mut m.comments),
        NodeRef::Binding(i) => ast.keybindings.get_mut(i).map(|b| &mut b.comments),
        NodeRef::Nested(i, j) => ast
            .keybindings
            .get_mut(i)?
            .nested_bindings_mut()?
            .get_index_mut(j)
            .map(|(_, b)| &mut b.comments),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meraki::ast::WarningKind;
    use crate::meraki::lexing::base_tokenization::lex;
    use crate::meraki::lexing::transformations::extract_comments;
    use crate::meraki::options::ParserOptions;
    use crate::meraki::parsing::parse_from_clean_tokens;

    fn provisional(source: &str) -> (Ast, Vec<Comment>) {
        let extracted = extract_comments(lex(source.to_string()).unwrap());
        let ast = parse_from_clean_tokens(
            &extracted.tokens,
            &extracted.source,
            &ParserOptions::default(),
        )
        .unwrap();
        (ast, extracted.comments)
    }

    fn attach(source: &str) -> (Ast, Diagnostics) {
        let (ast, comments) = provisional(source);
        let mut diagnostics = Diagnostics::new();
        let ast = attach_comments(ast, &comments, &mut diagnostics);
        (ast, diagnostics)
    }

    #[test]
    fn test_leading_line_comment() {
        let (ast, diagnostics) = attach("# Basic comment\nmod1 = lcmd + lalt");
        assert_eq!(
            ast.modifiers["mod1"].comments,
            vec![Comment::line("Basic comment", 1)]
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_inline_comment() {
        let (ast, _) = attach("mod1 = lcmd\nmod1 - m : open -a Mail.app # mail");
        assert_eq!(
            ast.keybindings[0].comments,
            vec![Comment::inline("mail", 2)]
        );
    }

    #[test]
    fn test_comment_run_documents_next_statement() {
        let (ast, _) = attach("# first\n@END\nsecond\nEND\n# third\nmod1 - a : x");
        let texts: Vec<&str> = ast.keybindings[0]
            .comments
            .iter()
            .map(|c| c.text.as_str())
            .collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_block_after_code_does_not_hide_its_line() {
        let (ast, diagnostics) = attach("# doc for a\nmod1 - a : x @END\nnote\nEND\nmod1 - b : y");
        let texts = |i: usize| -> Vec<String> {
            ast.keybindings[i].comments.iter().map(|c| c.text.clone()).collect()
        };
        assert_eq!(texts(0), vec!["doc for a"]);
        assert_eq!(texts(1), vec!["note"]);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_blank_line_orphans_comment() {
        let (ast, diagnostics) = attach("# dangling\n\nmod1 - a : x");
        assert!(ast.keybindings[0].comments.is_empty());
        assert_eq!(ast.orphan_comments, vec![Comment::line("dangling", 1)]);
        assert_eq!(diagnostics.warnings()[0].kind, WarningKind::OrphanedComment);
        assert_eq!(diagnostics.warnings()[0].line, 1);
    }

    #[test]
    fn test_trailing_comment_is_orphaned() {
        let (ast, diagnostics) = attach("mod1 - a : x\n# the end");
        assert_eq!(ast.orphan_comments.len(), 1);
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_comment_inside_leader_block() {
        let (ast, _) = attach("mod1 - l : { # leader\n    # safari\n    h : open -a Safari\n}");
        let leader = &ast.keybindings[0];
        assert_eq!(leader.comments, vec![Comment::inline("leader", 1)]);
        let entry = &leader.nested_bindings().unwrap()["h"];
        assert_eq!(entry.comments, vec![Comment::line("safari", 2)]);
    }

    #[test]
    fn test_first_node_on_shared_line_wins() {
        let (ast, _) = attach("# note\nmod1 - l : { h : x\n}");
        let leader = &ast.keybindings[0];
        assert_eq!(leader.comments.len(), 1);
        assert!(leader.nested_bindings().unwrap()["h"].comments.is_empty());
    }

    #[test]
    fn test_reattachment_is_idempotent() {
        let source = "# a\nmod1 = lcmd\n\n# b\nmod1 - l : {\n  h : x # c\n}\n# d";
        let (ast, comments) = provisional(source);
        let mut diagnostics = Diagnostics::new();
        let once = attach_comments(ast, &comments, &mut diagnostics);
        let twice = attach_comments(once.clone(), &comments, &mut Diagnostics::new());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_stage_collects_warnings() {
        let extracted = extract_comments(lex("# orphan\n\nmod1 - a : x".to_string()).unwrap());
        let ast = parse_from_clean_tokens(
            &extracted.tokens,
            &extracted.source,
            &ParserOptions::default(),
        )
        .unwrap();
        let parsed = AttachComments::new()
            .run(Provisional {
                ast,
                comments: extracted.comments,
                diagnostics: extracted.diagnostics,
            })
            .unwrap();
        assert_eq!(parsed.warnings.len(), 1);
        assert_eq!(parsed.ast.orphan_comments.len(), 1);
    }
}
