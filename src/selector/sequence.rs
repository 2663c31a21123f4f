//! Combinator sequences: simple sequences joined by combinators.

use std::fmt;
use std::hash::{Hash, Hasher};

use log::trace;

use crate::error::Result;
use crate::selector::extend::ExtendMap;
use crate::selector::simple::SimpleSelector;
use crate::selector::simple_sequence::SimpleSequence;
use crate::selector::weave::{paths, weave};
use crate::tokens::{tokens_to_string, Token};

/// A non-descendant combinator between two simple sequences.
///
/// The descendant relation is implicit: two adjacent [`Member::Simple`]
/// elements are separated by it, and it renders as a single space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Combinator {
    Child,
    AdjacentSibling,
    GeneralSibling,
}

impl Combinator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Combinator::Child => ">",
            Combinator::AdjacentSibling => "+",
            Combinator::GeneralSibling => "~",
        }
    }
}

/// One element of a combinator sequence.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Member {
    Simple(SimpleSequence),
    Combinator(Combinator),
    /// Formatting-only marker for a line break in the source selector.
    /// Ignored by equality and hashing.
    Newline,
}

impl Member {
    /// Combinator tokens and newline markers, as opposed to compounds.
    pub(crate) fn is_op(&self) -> bool {
        matches!(self, Member::Combinator(_) | Member::Newline)
    }
}

/// Simple sequences joined by combinators; matches a descent path in the
/// document (`a > b c`).
#[derive(Clone, Debug)]
pub struct Sequence {
    pub members: Vec<Member>,
}

impl Sequence {
    pub fn new(members: Vec<Member>) -> Self {
        Self { members }
    }

    fn significant(&self) -> impl Iterator<Item = &Member> {
        self.members
            .iter()
            .filter(|m| !matches!(m, Member::Newline))
    }

    pub fn set_line(&mut self, line: usize) {
        for member in &mut self.members {
            if let Member::Simple(sseq) = member {
                sseq.set_line(line);
            }
        }
    }

    pub fn set_filename(&mut self, filename: &str) {
        for member in &mut self.members {
            if let Member::Simple(sseq) = member {
                sseq.set_filename(filename);
            }
        }
    }

    /// The first compound containing a `&`, if any.
    pub(crate) fn parent_ref(&self) -> Option<&SimpleSequence> {
        self.members.iter().find_map(|m| match m {
            Member::Simple(sseq) if sseq.contains_parent_ref() => Some(sseq),
            _ => None,
        })
    }

    /// Rewrites `&` references against `parent`. A sequence without any
    /// `&` nests beneath the parent as a descendant.
    pub(crate) fn resolve_parent_refs(&self, parent: &Sequence) -> Result<Sequence> {
        let mut members = self.members.clone();
        let leading_newline = matches!(members.first(), Some(Member::Newline));
        if leading_newline {
            members.remove(0);
        }

        let starts_with_parent = |m: &Member| {
            matches!(m, Member::Simple(sseq)
                if matches!(sseq.members.first(), Some(SimpleSelector::Parent)))
        };
        if !members.iter().any(starts_with_parent) {
            members.insert(0, Member::Simple(SimpleSequence::new(vec![SimpleSelector::Parent])));
        }
        if leading_newline {
            members.insert(0, Member::Newline);
        }

        let mut resolved = Vec::with_capacity(members.len() + parent.members.len());
        for member in members {
            match member {
                Member::Simple(sseq) => resolved.extend(sseq.resolve_parent_refs(parent)?),
                other => resolved.push(other),
            }
        }
        Ok(Sequence::new(resolved))
    }

    /// Expands this sequence against the registered `@extend`s. The
    /// first returned alternative is always the sequence itself.
    pub fn extend(&self, map: &ExtendMap) -> Result<Vec<Sequence>> {
        self.extend_with_trail(map, &mut Vec::new())
    }

    pub(crate) fn extend_with_trail(
        &self,
        map: &ExtendMap,
        trail: &mut Vec<SimpleSequence>,
    ) -> Result<Vec<Sequence>> {
        let mut choices: Vec<Vec<Vec<Member>>> = Vec::with_capacity(self.members.len());
        for member in &self.members {
            match member {
                Member::Simple(sseq) => {
                    let mut alternatives = vec![vec![member.clone()]];
                    for alt in sseq.extend_with_trail(map, trail)? {
                        alternatives.push(alt.members);
                    }
                    choices.push(alternatives);
                }
                other => choices.push(vec![vec![other.clone()]]),
            }
        }

        let mut out = Vec::new();
        for path in paths(&choices) {
            for woven in weave(path)? {
                out.push(Sequence::new(woven));
            }
        }
        trace!("extended {} into {} alternatives", self, out.len());
        Ok(out)
    }

    pub fn to_tokens(&self) -> Vec<Token> {
        let mut tokens: Vec<Token> = Vec::new();
        for (i, member) in self.members.iter().enumerate() {
            if i > 0 {
                tokens.push(Token::Literal(" ".to_string()));
            }
            match member {
                Member::Simple(sseq) => tokens.extend(sseq.to_tokens()),
                Member::Combinator(c) => tokens.push(Token::Literal(c.as_str().to_string())),
                Member::Newline => tokens.push(Token::Literal("\n".to_string())),
            }
        }
        collapse_newline_spaces(tokens)
    }
}

/// Drops the single spaces the descendant relation contributes on either
/// side of a newline marker, so a line break renders as `"\n"` alone.
fn collapse_newline_spaces(tokens: Vec<Token>) -> Vec<Token> {
    let is = |t: &Token, text: &str| matches!(t, Token::Literal(s) if s == text);
    let mut out: Vec<Token> = Vec::with_capacity(tokens.len());
    for token in tokens {
        if is(&token, "\n") {
            if out.last().map_or(false, |t| is(t, " ")) {
                out.pop();
            }
            out.push(token);
        } else if is(&token, " ") && out.last().map_or(false, |t| is(t, "\n")) {
            // swallowed by the newline
        } else {
            out.push(token);
        }
    }
    out
}

impl PartialEq for Sequence {
    fn eq(&self, other: &Self) -> bool {
        self.significant().eq(other.significant())
    }
}

impl Eq for Sequence {}

impl Hash for Sequence {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for member in self.significant() {
            member.hash(state);
        }
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&tokens_to_string(&self.to_tokens()))
    }
}
