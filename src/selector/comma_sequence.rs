//! Selector groups: comma-separated combinator sequences.

use std::fmt;

use log::trace;

use crate::error::{PcssError, Result};
use crate::selector::extend::ExtendMap;
use crate::selector::sequence::Sequence;

/// A selector group (`a, b, c`). Order-sensitive.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CommaSequence {
    pub members: Vec<Sequence>,
}

impl CommaSequence {
    pub fn new(members: Vec<Sequence>) -> Self {
        Self { members }
    }

    pub fn set_line(&mut self, line: usize) {
        for member in &mut self.members {
            member.set_line(line);
        }
    }

    pub fn set_filename(&mut self, filename: &str) {
        for member in &mut self.members {
            member.set_filename(filename);
        }
    }

    /// Rewrites every `&` against `parent`, distributing over the
    /// commas of both: each parent sequence is combined with each of
    /// our sequences, parents outermost.
    ///
    /// Without a parent this is the identity, except that any `&` is a
    /// syntax error: there is nothing for it to refer to.
    pub fn resolve_parent_refs(&self, parent: Option<&CommaSequence>) -> Result<CommaSequence> {
        let Some(parent) = parent else {
            if let Some(sseq) = self.members.iter().find_map(|seq| seq.parent_ref()) {
                return Err(PcssError::syntax(
                    "base-level rules cannot contain '&'",
                    sseq.line(),
                    sseq.filename().map(String::from),
                ));
            }
            return Ok(self.clone());
        };

        let mut resolved = Vec::with_capacity(parent.members.len() * self.members.len());
        for parent_seq in &parent.members {
            for seq in &self.members {
                resolved.push(seq.resolve_parent_refs(parent_seq)?);
            }
        }
        Ok(CommaSequence::new(resolved))
    }

    /// Expands the group against the registered `@extend`s. Sequences
    /// no entry applies to pass through unchanged.
    pub fn extend(&self, map: &ExtendMap) -> Result<CommaSequence> {
        let mut expanded = Vec::with_capacity(self.members.len());
        for seq in &self.members {
            expanded.extend(seq.extend(map)?);
        }
        trace!(
            "extended {} sequences into {}",
            self.members.len(),
            expanded.len()
        );
        Ok(CommaSequence::new(expanded))
    }
}

impl fmt::Display for CommaSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .members
            .iter()
            .map(|seq| seq.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        f.write_str(&joined.replace(", \n", ",\n"))
    }
}
