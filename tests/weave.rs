//! Integration tests for the `weave`/`subweave` interleaving algorithm.

use pcss::{parse_selector, subweave, weave, Member};

fn members(source: &str) -> Vec<Member> {
    parse_selector(source).unwrap().members.remove(0).members
}

// ============================================================================
// SUBWEAVE
// ============================================================================

#[test]
fn test_empty_sides_pass_through() {
    let seq = members(".a .b");
    assert_eq!(subweave(&[], &seq).unwrap(), vec![seq.clone()]);
    assert_eq!(subweave(&seq, &[]).unwrap(), vec![seq.clone()]);
}

#[test]
fn test_single_compounds_interleave_and_unify() {
    let results = subweave(&members(".x"), &members(".a")).unwrap();
    assert!(results.contains(&members(".x .a")));
    assert!(results.contains(&members(".x.a")));
    assert!(results.contains(&members(".a .x")));
    assert_eq!(results.len(), 3);
}

#[test]
fn test_inputs_survive_as_extremes() {
    let cases = [
        (".a", ".x"),
        (".a .b", ".x"),
        (".a .b", ".x .y"),
        (".a > .b", ".x .y .z"),
    ];
    for (left, right) in cases {
        let (a, b) = (members(left), members(right));
        let results = subweave(&a, &b).unwrap();

        let mut a_then_b = a.clone();
        a_then_b.extend(b.iter().cloned());
        let mut b_then_a = b.clone();
        b_then_a.extend(a.iter().cloned());

        assert!(results.contains(&a_then_b), "{left} ++ {right} missing");
        assert!(results.contains(&b_then_a), "{right} ++ {left} missing");
    }
}

#[test]
fn test_relative_order_is_preserved() {
    let results = subweave(&members(".a .b"), &members(".x")).unwrap();
    for woven in &results {
        let positions: Vec<usize> = [".a", ".b"]
            .iter()
            .map(|name| {
                let target = &members(name)[0];
                woven
                    .iter()
                    .position(|m| m == target)
                    .unwrap_or(usize::MAX)
            })
            .collect();
        // .a stays before .b wherever both appear unmerged
        if positions.iter().all(|&p| p != usize::MAX) {
            assert!(positions[0] < positions[1], "order broken in {woven:?}");
        }
    }
}

#[test]
fn test_child_groups_are_not_split() {
    // `.a > .b` can only absorb `.x` around the group or fused into a
    // compound, never between `.a` and `>`.
    let results = subweave(&members(".a > .b"), &members(".x")).unwrap();
    for woven in &results {
        if let Some(pos) = woven
            .iter()
            .position(|m| matches!(m, Member::Combinator(_)))
        {
            assert!(matches!(woven[pos - 1], Member::Simple(_)));
            assert!(matches!(woven[pos + 1], Member::Simple(_)));
        }
    }
}

// ============================================================================
// WEAVE
// ============================================================================

#[test]
fn test_weave_of_singletons_concatenates() {
    let path = vec![members(".a"), members(".b")];
    assert_eq!(weave(path).unwrap(), vec![members(".a .b")]);
}

#[test]
fn test_weave_interleaves_prefixes_keeping_tails_last() {
    let path = vec![members(".a .b"), members(".x .y")];
    let results = weave(path).unwrap();

    assert!(results.contains(&members(".a .b .x .y")));
    assert!(results.contains(&members(".x .a .b .y")));
    // Every ordering ends with the last mini-sequence's target.
    let target = &members(".y")[0];
    for woven in &results {
        assert_eq!(woven.last().unwrap(), target);
    }
}
