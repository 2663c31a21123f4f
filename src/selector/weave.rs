//! The `weave`/`subweave` interleaving algorithm.
//!
//! Extending `.a .b` with `.x .y` must produce every selector in which
//! the ancestors `.a` and `.x` appear in an order consistent with both
//! sources. `subweave` computes those interleavings for two sequences,
//! optionally fusing heads that can target the same element; `weave`
//! folds it across the parenthesized mini-sequences of an extension
//! path, keeping each extension target in final position.

use std::collections::HashMap;

use log::trace;

use crate::error::Result;
use crate::selector::sequence::Member;
use crate::selector::simple_sequence::SimpleSequence;

type Cache = HashMap<(Vec<Member>, Vec<Member>), Vec<Vec<Member>>>;

/// Interleaves the mini-sequences of an extension path into all member
/// orderings consistent with their relative order.
pub fn weave(path: Vec<Vec<Member>>) -> Result<Vec<Vec<Member>>> {
    // The memo cache lives for one weave call; inputs of separate calls
    // never share it.
    let mut cache = Cache::new();
    let mut befores: Vec<Vec<Member>> = vec![Vec::new()];

    for current in path {
        let (prefix, tail) = split_tail(current);
        let mut next = Vec::new();
        for before in &befores {
            for mut woven in subweave_cached(before, &prefix, &mut cache)? {
                woven.extend(tail.iter().cloned());
                next.push(woven);
            }
        }
        befores = next;
    }
    trace!("weave produced {} interleavings", befores.len());
    Ok(befores)
}

/// All interleavings of `seq1` and `seq2` that preserve the relative
/// order within each, including the head-unified variants.
pub fn subweave(seq1: &[Member], seq2: &[Member]) -> Result<Vec<Vec<Member>>> {
    let mut cache = Cache::new();
    subweave_cached(seq1, seq2, &mut cache)
}

fn subweave_cached(seq1: &[Member], seq2: &[Member], cache: &mut Cache) -> Result<Vec<Vec<Member>>> {
    if seq1.is_empty() {
        return Ok(vec![seq2.to_vec()]);
    }
    if seq2.is_empty() {
        return Ok(vec![seq1.to_vec()]);
    }

    let key = (seq1.to_vec(), seq2.to_vec());
    if let Some(hit) = cache.get(&key) {
        return Ok(hit.clone());
    }

    let (head1, rest1) = split_head(seq1);
    let (head2, rest2) = split_head(seq2);
    let unified_head = unify_heads(&head1, &head2)?;

    let mut results = Vec::new();
    for sub in subweave_cached(&rest1, seq2, cache)? {
        results.push(concat(&head1, sub));
    }
    if let Some(unified) = unified_head {
        for sub in subweave_cached(&rest1, &rest2, cache)? {
            results.push(concat(&unified, sub));
        }
    }
    for sub in subweave_cached(seq1, &rest2, cache)? {
        results.push(concat(&head2, sub));
    }

    cache.insert(key, results.clone());
    Ok(results)
}

fn concat(head: &[Member], rest: Vec<Member>) -> Vec<Member> {
    let mut out = head.to_vec();
    out.extend(rest);
    out
}

/// Splits off the leading head: one compound together with the
/// combinator run that follows it (and any stray leading operators), so
/// a head is never split through a combinator. The remainder starts
/// with a compound or is empty.
fn split_head(seq: &[Member]) -> (Vec<Member>, Vec<Member>) {
    let mut i = 0;
    while i < seq.len() && seq[i].is_op() {
        i += 1;
    }
    if i < seq.len() {
        i += 1; // the compound itself
    }
    while i < seq.len() && seq[i].is_op() {
        i += 1;
    }
    (seq[..i].to_vec(), seq[i..].to_vec())
}

/// Splits off the trailing tail of a woven mini-sequence: the last
/// compound plus every combinator adjacent to it, pulling in preceding
/// compounds while an operator would otherwise float at the boundary.
fn split_tail(mut seq: Vec<Member>) -> (Vec<Member>, Vec<Member>) {
    let mut tail = match seq.pop() {
        Some(member) => vec![member],
        None => return (seq, Vec::new()),
    };
    while (!seq.is_empty() && tail[0].is_op()) || seq.last().map_or(false, Member::is_op) {
        if let Some(member) = seq.pop() {
            tail.insert(0, member);
        }
    }
    (seq, tail)
}

/// Fuses two heads when their compounds can target the same element and
/// their trailing combinator runs are compatible (equal, or one empty).
fn unify_heads(head1: &[Member], head2: &[Member]) -> Result<Option<Vec<Member>>> {
    let Some((sseq1, ops1)) = head_parts(head1) else {
        return Ok(None);
    };
    let Some((sseq2, ops2)) = head_parts(head2) else {
        return Ok(None);
    };

    let ops = if ops1 == ops2 {
        ops1
    } else if ops1.is_empty() {
        ops2
    } else if ops2.is_empty() {
        ops1
    } else {
        return Ok(None);
    };

    let unified = match sseq1.unify(&sseq2.members)? {
        Some(unified) => unified,
        None => match sseq2.unify(&sseq1.members)? {
            Some(unified) => unified,
            None => return Ok(None),
        },
    };

    let mut out = vec![Member::Simple(unified)];
    out.extend(ops.iter().cloned());
    Ok(Some(out))
}

/// The compound of a head and the combinator run after it, or `None`
/// for a head of bare operators.
fn head_parts(head: &[Member]) -> Option<(&SimpleSequence, &[Member])> {
    head.iter().position(|m| !m.is_op()).map(|i| {
        let Member::Simple(sseq) = &head[i] else {
            unreachable!("non-operator members are compounds");
        };
        (sseq, &head[i + 1..])
    })
}

/// Cartesian product of per-position alternatives; the last position
/// varies slowest, so the all-first-choice path comes first.
pub(crate) fn paths(choices: &[Vec<Vec<Member>>]) -> Vec<Vec<Vec<Member>>> {
    let mut acc: Vec<Vec<Vec<Member>>> = vec![Vec::new()];
    for position in choices {
        let mut next = Vec::with_capacity(acc.len() * position.len());
        for alternative in position {
            for path in &acc {
                let mut extended = path.clone();
                extended.push(alternative.clone());
                next.push(extended);
            }
        }
        acc = next;
    }
    acc
}
