//! Token types produced by the dialogue script tokenizer.

use serde::{Deserialize, Serialize};

/// Classification of a command parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParamKind {
    /// Double-quoted literal, quotes included in the token text
    String,
    /// Integer or decimal literal
    Number,
    /// Bare identifier referring to a game variable
    Variable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TokenKind {
    /// Leading run of tab characters
    Indent,
    /// `- ` branch line; children hold the marker and the scanned body
    ResponseOption,
    /// `\name` or `\name(args)`; children hold the name and parameters
    Command,
    CommandName,
    CommandParam(ParamKind),
    /// `{tag}` substitution
    CurlyTag,
    PlainText,
    /// Structural text inside a composite token: the `- ` marker, parentheses,
    /// argument separators
    Punctuation,
    /// `\n`, `\r\n` or `\r`
    LineBreak,
}

/// A span of dialogue script text.
///
/// `start` and `end` are byte offsets into the tokenized input. When a token
/// has children, their texts concatenate to exactly the parent's text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub start: usize,
    pub end: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Token>,
}

impl Token {
    pub fn leaf(kind: TokenKind, text: &str, start: usize) -> Self {
        Self {
            kind,
            text: text.to_string(),
            start,
            end: start + text.len(),
            children: Vec::new(),
        }
    }

    pub fn branch(kind: TokenKind, text: &str, start: usize, children: Vec<Token>) -> Self {
        Self {
            children,
            ..Self::leaf(kind, text, start)
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Depth-first iteration over the tokens that have no children.
    pub fn leaves(&self) -> Vec<&Token> {
        let mut out = Vec::new();
        collect_leaves(self, &mut out);
        out
    }

    /// First direct child of the given kind.
    pub fn child(&self, kind: TokenKind) -> Option<&Token> {
        self.children.iter().find(|c| c.kind == kind)
    }

    /// Direct children that are command parameters, with their classification.
    pub fn params(&self) -> impl Iterator<Item = (ParamKind, &str)> {
        self.children.iter().filter_map(|c| match c.kind {
            TokenKind::CommandParam(kind) => Some((kind, c.text.as_str())),
            _ => None,
        })
    }
}

fn collect_leaves<'a>(token: &'a Token, out: &mut Vec<&'a Token>) {
    if token.is_leaf() {
        out.push(token);
    } else {
        for child in &token.children {
            collect_leaves(child, out);
        }
    }
}

/// Leaf tokens of a whole token sequence, in source order.
pub fn leaves(tokens: &[Token]) -> Vec<&Token> {
    tokens.iter().flat_map(Token::leaves).collect()
}

/// Rebuilds the tokenized source from top-level tokens.
pub fn reconstruct(tokens: &[Token]) -> String {
    tokens.iter().map(|t| t.text.as_str()).collect()
}
