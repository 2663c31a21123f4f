//! Token streams for selector names.
//!
//! The preprocessor permits interpolation inside selector names
//! (`.item-#{$i}`), so every name-like field in the selector model is a
//! stream of tokens rather than a plain string: literal text interleaved
//! with opaque script expressions. Script evaluation belongs to the
//! script engine; the selector core only needs value equality and the
//! source text for rendering.

use std::fmt;

/// An opaque script expression embedded in a selector via `#{...}`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ScriptNode {
    source: String,
}

impl ScriptNode {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// The source text of the expression, without the `#{` `}` delimiters.
    pub fn to_source_string(&self) -> String {
        self.source.clone()
    }
}

impl fmt::Display for ScriptNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{{{}}}", self.source)
    }
}

/// One element of a token stream.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Token {
    Literal(String),
    Script(ScriptNode),
}

/// Renders a token stream, interpolation as `#{<source>}`.
pub fn tokens_to_string(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        match token {
            Token::Literal(text) => out.push_str(text),
            Token::Script(script) => out.push_str(&script.to_string()),
        }
    }
    out
}

/// Trims whitespace from the outer edges of a token stream: the start of
/// the first literal and the end of the last. Script tokens are opaque
/// and never trimmed.
pub(crate) fn strip_tokens(tokens: &[Token]) -> Vec<Token> {
    let mut out = tokens.to_vec();
    if let Some(Token::Literal(first)) = out.first_mut() {
        *first = first.trim_start().to_string();
    }
    if let Some(Token::Literal(last)) = out.last_mut() {
        *last = last.trim_end().to_string();
    }
    out
}
