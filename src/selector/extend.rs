//! The extension map: registered `@extend` directives and their lookup.

use crate::error::{PcssError, Result};
use crate::selector::sequence::{Member, Sequence};
use crate::selector::simple::SimpleSelector;
use crate::selector::simple_sequence::SimpleSequence;

/// Extension chains deeper than this with no exact repetition are
/// reported as an undiagnosable loop.
pub(crate) const MAX_EXTEND_DEPTH: usize = 100;

/// One registered `@extend`: the target members being extended and the
/// extending sequence, pre-split into its prefix and trailing compound
/// so the expansion never has to re-validate it.
#[derive(Clone, Debug)]
pub(crate) struct Entry {
    target: Vec<SimpleSelector>,
    prefix: Vec<Member>,
    last: SimpleSequence,
}

impl Entry {
    pub(crate) fn target(&self) -> &[SimpleSelector] {
        &self.target
    }

    pub(crate) fn prefix(&self) -> &[Member] {
        &self.prefix
    }

    pub(crate) fn last(&self) -> &SimpleSequence {
        &self.last
    }
}

/// Maps extension targets (sets of simple selectors) to the sequences
/// that extend them. Lookup is by subset, in insertion order.
#[derive(Clone, Debug, Default)]
pub struct ExtendMap {
    entries: Vec<Entry>,
}

impl ExtendMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `extender` as extending the compound described by
    /// `target`. The extender has to end in a compound for the target's
    /// remainder to fuse into.
    pub fn insert(&mut self, target: Vec<SimpleSelector>, extender: Sequence) -> Result<()> {
        let Some(Member::Simple(last)) = extender.members.last() else {
            let line = extender.members.iter().rev().find_map(|m| match m {
                Member::Simple(sseq) => Some(sseq.line()),
                _ => None,
            });
            return Err(PcssError::syntax(
                format!("Invalid extender: \"{extender}\""),
                line.unwrap_or(0),
                None,
            ));
        };
        let last = last.clone();
        let prefix = extender.members[..extender.members.len() - 1].to_vec();
        self.entries.push(Entry {
            target,
            prefix,
            last,
        });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every entry whose target is a subset of `members`.
    pub(crate) fn get<'a>(
        &'a self,
        members: &'a [SimpleSelector],
    ) -> impl Iterator<Item = &'a Entry> {
        self.entries
            .iter()
            .filter(move |entry| entry.target.iter().all(|t| members.contains(t)))
    }
}

/// Multiset difference preserving order: removes one occurrence of each
/// element of `remove` from `members`.
pub(crate) fn members_minus(
    members: &[SimpleSelector],
    remove: &[SimpleSelector],
) -> Vec<SimpleSelector> {
    let mut pool = remove.to_vec();
    let mut out = Vec::with_capacity(members.len());
    for member in members {
        if let Some(i) = pool.iter().position(|r| r == member) {
            pool.remove(i);
        } else {
            out.push(member.clone());
        }
    }
    out
}

/// Formats the `@extend` loop diagnostic from the extension trail once
/// `repeated` shows up on it a second time.
pub(crate) fn extend_loop_error(trail: &[SimpleSequence], repeated: &SimpleSequence) -> PcssError {
    let Some(start) = trail.iter().position(|sseq| sseq == repeated) else {
        return PcssError::internal("An @extend loop exists, but the exact loop couldn't be found.");
    };
    let cycle = &trail[start..];

    // Consecutive pairs around the cycle; each child was produced by
    // extending its parent and carries the line of the extending rule.
    let mut pairs: Vec<(&SimpleSequence, &SimpleSequence)> = (0..cycle.len())
        .map(|i| (&cycle[i], &cycle[(i + 1) % cycle.len()]))
        .collect();
    if let Some(highest) = pairs
        .iter()
        .enumerate()
        .max_by_key(|(_, (_, child))| child.line())
        .map(|(i, _)| i)
    {
        pairs.rotate_left(highest);
    }

    let lines: Vec<String> = pairs
        .iter()
        .map(|(parent, child)| {
            let mut line = format!("{} extends {} on line {}", child, parent, child.line());
            if let Some(filename) = child.filename() {
                line.push_str(&format!(" of {filename}"));
            }
            line
        })
        .collect();

    let (line, filename) = pairs
        .first()
        .map(|(_, child)| (child.line(), child.filename().map(String::from)))
        .unwrap_or((0, None));
    PcssError::syntax(
        format!("An @extend loop was found:\n{}", lines.join(",\n")),
        line,
        filename,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minus_removes_one_occurrence() {
        let members = vec![
            SimpleSelector::class("a"),
            SimpleSelector::class("b"),
            SimpleSelector::class("a"),
        ];
        let out = members_minus(&members, &[SimpleSelector::class("a")]);
        assert_eq!(
            out,
            vec![SimpleSelector::class("b"), SimpleSelector::class("a")]
        );
    }

    #[test]
    fn test_subset_lookup() {
        let mut map = ExtendMap::new();
        map.insert(
            vec![SimpleSelector::class("foo")],
            Sequence::new(vec![Member::Simple(SimpleSequence::new(vec![
                SimpleSelector::class("bar"),
            ]))]),
        )
        .unwrap();

        let members = vec![SimpleSelector::element("a"), SimpleSelector::class("foo")];
        assert_eq!(map.get(&members).count(), 1);

        let others = vec![SimpleSelector::class("bar")];
        assert_eq!(map.get(&others).count(), 0);
    }

    #[test]
    fn test_extender_ending_in_combinator_is_rejected() {
        use crate::selector::sequence::Combinator;

        let mut map = ExtendMap::new();
        let err = map
            .insert(
                vec![SimpleSelector::class("foo")],
                Sequence::new(vec![
                    Member::Simple(SimpleSequence::new(vec![SimpleSelector::class("bar")])),
                    Member::Combinator(Combinator::Child),
                ]),
            )
            .unwrap_err();
        assert!(err.to_string().starts_with("Invalid extender"));
    }
}
