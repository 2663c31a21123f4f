//! Compound selectors: simple selectors targeting one element.

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::{PcssError, Result};
use crate::selector::extend::{extend_loop_error, members_minus, ExtendMap, MAX_EXTEND_DEPTH};
use crate::selector::sequence::{Member, Sequence};
use crate::selector::simple::SimpleSelector;
use crate::tokens::{tokens_to_string, Token};

/// Simple selectors concatenated without combinators (`a.foo#bar`).
///
/// Equality and hashing treat the members after the base element as an
/// unordered set: `a.foo.bar` equals `a.bar.foo`. Source locations are
/// ignored by both.
#[derive(Clone, Debug)]
pub struct SimpleSequence {
    pub members: Vec<SimpleSelector>,
    line: usize,
    filename: Option<String>,
}

impl SimpleSequence {
    pub fn new(members: Vec<SimpleSelector>) -> Self {
        debug_assert!(!members.is_empty(), "a simple sequence has at least one member");
        Self {
            members,
            line: 0,
            filename: None,
        }
    }

    /// 1-based source line, 0 when unset.
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    pub fn set_line(&mut self, line: usize) {
        self.line = line;
    }

    pub fn set_filename(&mut self, filename: &str) {
        self.filename = Some(filename.to_string());
    }

    /// The leading element or universal selector, if any.
    pub fn base(&self) -> Option<&SimpleSelector> {
        self.members.first().filter(|m| {
            matches!(
                m,
                SimpleSelector::Element { .. } | SimpleSelector::Universal { .. }
            )
        })
    }

    /// Members after the base, deduplicated, in first-seen order.
    fn rest_set(&self) -> Vec<&SimpleSelector> {
        let skip = usize::from(self.base().is_some());
        let mut out: Vec<&SimpleSelector> = Vec::new();
        for member in self.members.iter().skip(skip) {
            if !out.contains(&member) {
                out.push(member);
            }
        }
        out
    }

    pub(crate) fn contains_parent_ref(&self) -> bool {
        self.members
            .iter()
            .any(|m| matches!(m, SimpleSelector::Parent))
    }

    /// Folds every member of `self` into `others`, producing the fused
    /// member list as a new sequence at `self`'s location, or `None`
    /// when the two cannot target the same element.
    pub fn unify(&self, others: &[SimpleSelector]) -> Result<Option<SimpleSequence>> {
        let mut members = others.to_vec();
        for member in &self.members {
            match member.unify(&members)? {
                Some(unified) => members = unified,
                None => return Ok(None),
            }
        }
        let mut out = SimpleSequence::new(members);
        out.line = self.line;
        out.filename = self.filename.clone();
        Ok(Some(out))
    }

    /// Replaces a leading `&` with the parent sequence, returning the
    /// members to splice in its place.
    pub(crate) fn resolve_parent_refs(&self, parent: &Sequence) -> Result<Vec<Member>> {
        if !matches!(self.members.first(), Some(SimpleSelector::Parent)) {
            return Ok(vec![Member::Simple(self.clone())]);
        }
        if self.members.len() == 1 {
            return Ok(parent.members.clone());
        }

        // `&.foo` attaches the trailing simples to the parent's last
        // compound, which therefore has to exist.
        let Some(Member::Simple(last)) = parent.members.last() else {
            return Err(PcssError::syntax(
                format!("Invalid parent selector: \"{parent}\""),
                self.line,
                self.filename.clone(),
            ));
        };
        let mut merged = last.members.clone();
        merged.extend(self.members[1..].iter().cloned());
        let mut fused = SimpleSequence::new(merged);
        fused.line = self.line;
        fused.filename = self.filename.clone();

        let mut out = parent.members[..parent.members.len() - 1].to_vec();
        out.push(Member::Simple(fused));
        Ok(out)
    }

    /// All ways the registered `@extend`s rewrite this compound, direct
    /// extensions first, then their recursive expansions.
    pub fn extend(&self, map: &ExtendMap) -> Result<Vec<Sequence>> {
        self.extend_with_trail(map, &mut Vec::new())
    }

    pub(crate) fn extend_with_trail(
        &self,
        map: &ExtendMap,
        trail: &mut Vec<SimpleSequence>,
    ) -> Result<Vec<Sequence>> {
        let mut direct = Vec::new();
        for entry in map.get(&self.members) {
            let remainder = members_minus(&self.members, entry.target());
            let Some(unified) = entry.last().unify(&remainder)? else {
                continue;
            };
            let mut members = entry.prefix().to_vec();
            members.push(Member::Simple(unified));
            direct.push(Sequence::new(members));
        }
        if direct.is_empty() {
            return Ok(direct);
        }

        if trail.iter().any(|seen| seen == self) {
            return Err(extend_loop_error(trail, self));
        }
        if trail.len() >= MAX_EXTEND_DEPTH {
            return Err(PcssError::internal(
                "An @extend loop exists, but the exact loop couldn't be found.",
            ));
        }

        trail.push(self.clone());
        let mut recursive: Vec<Sequence> = Vec::new();
        let walked: Result<()> = direct.iter().try_for_each(|seq| {
            // The first alternative of the recursive expansion is the
            // sequence itself; only the genuinely new ones accumulate.
            for alt in seq.extend_with_trail(map, trail)?.into_iter().skip(1) {
                if !recursive.contains(&alt) {
                    recursive.push(alt);
                }
            }
            Ok(())
        });
        trail.pop();
        walked?;

        direct.extend(recursive);
        Ok(direct)
    }

    pub fn to_tokens(&self) -> Vec<Token> {
        self.members.iter().flat_map(|m| m.to_tokens()).collect()
    }
}

impl PartialEq for SimpleSequence {
    fn eq(&self, other: &Self) -> bool {
        if self.base() != other.base() {
            return false;
        }
        let (ours, theirs) = (self.rest_set(), other.rest_set());
        ours.len() == theirs.len() && ours.iter().all(|m| theirs.contains(m))
    }
}

impl Eq for SimpleSequence {}

impl Hash for SimpleSequence {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.base().hash(state);
        // Order-independent digest over the rest set.
        let mut digest = 0u64;
        for member in self.rest_set() {
            let mut hasher = DefaultHasher::new();
            member.hash(&mut hasher);
            digest = digest.wrapping_add(hasher.finish());
        }
        state.write_u64(digest);
    }
}

impl fmt::Display for SimpleSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&tokens_to_string(&self.to_tokens()))
    }
}
