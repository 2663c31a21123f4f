//! Integration tests for `&` parent-reference resolution.

use pcss::{
    parse_selector, Combinator, CommaSequence, Member, PcssError, Sequence, SimpleSelector,
    SimpleSequence,
};

fn resolve(selector: &str, parent: &str) -> String {
    let child = parse_selector(selector).unwrap();
    let parent = parse_selector(parent).unwrap();
    child.resolve_parent_refs(Some(&parent)).unwrap().to_string()
}

// ============================================================================
// NESTING WITHOUT AN EXPLICIT `&`
// ============================================================================

#[test]
fn test_plain_nesting_is_descendant() {
    assert_eq!(resolve(".foo", ".bar"), ".bar .foo");
}

#[test]
fn test_nesting_under_a_sequence_parent() {
    assert_eq!(resolve(".foo", "nav > ul"), "nav > ul .foo");
}

// ============================================================================
// EXPLICIT `&`
// ============================================================================

#[test]
fn test_parent_alone_is_replaced_wholesale() {
    assert_eq!(resolve("&", "a b"), "a b");
}

#[test]
fn test_parent_with_suffix_merges_into_last_compound() {
    assert_eq!(resolve("&.foo", ".bar"), ".bar.foo");
    assert_eq!(resolve("&:hover", "a b"), "a b:hover");
}

#[test]
fn test_parent_mid_sequence() {
    assert_eq!(resolve(".a & .b", ".p"), ".a .p .b");
}

#[test]
fn test_parent_twice() {
    assert_eq!(resolve("& + &", ".p"), ".p + .p");
}

#[test]
fn test_parent_keeps_child_combinator() {
    assert_eq!(resolve("& > .foo", ".p"), ".p > .foo");
}

// ============================================================================
// COMMA DISTRIBUTION
// ============================================================================

#[test]
fn test_distributes_over_parent_commas() {
    assert_eq!(resolve("&.foo", ".bar, .baz"), ".bar.foo, .baz.foo");
}

#[test]
fn test_distributes_over_both_comma_lists() {
    // Parents iterate outermost, own sequences innermost.
    assert_eq!(
        resolve(".x, .y", ".p, .q"),
        ".p .x, .p .y, .q .x, .q .y"
    );
}

#[test]
fn test_resolved_group_size_is_the_product() {
    let child = parse_selector("a, b").unwrap();
    let parent = parse_selector(".p, .q, .r").unwrap();
    let resolved = child.resolve_parent_refs(Some(&parent)).unwrap();
    assert_eq!(resolved.members.len(), 6);
}

// ============================================================================
// WITHOUT A PARENT
// ============================================================================

#[test]
fn test_no_parent_is_identity_for_plain_selectors() {
    let group = parse_selector("a.foo, #bar > .baz").unwrap();
    let resolved = group.resolve_parent_refs(None).unwrap();
    assert_eq!(resolved, group);
}

#[test]
fn test_no_parent_rejects_parent_refs() {
    let group = parse_selector("a, &.foo").unwrap();
    let err = group.resolve_parent_refs(None).unwrap_err();
    match err {
        PcssError::Syntax { message, line, .. } => {
            assert_eq!(message, "base-level rules cannot contain '&'");
            assert_eq!(line, 1);
        }
        other => panic!("expected a syntax error, got {other:?}"),
    }
}

// ============================================================================
// INVALID PARENT COMPOSITION
// ============================================================================

#[test]
fn test_suffixed_parent_needs_a_trailing_compound() {
    // A parent ending in a combinator cannot take `&.foo`; such a parent
    // only arises programmatically, so it is built by hand here.
    let parent = CommaSequence::new(vec![Sequence::new(vec![
        Member::Simple(SimpleSequence::new(vec![SimpleSelector::class("p")])),
        Member::Combinator(Combinator::Child),
    ])]);
    let child = parse_selector("&.foo").unwrap();
    let err = child.resolve_parent_refs(Some(&parent)).unwrap_err();
    assert!(err.to_string().starts_with("Invalid parent selector"));
}

// ============================================================================
// FORMATTING MARKERS
// ============================================================================

#[test]
fn test_leading_newline_survives_resolution() {
    let child = parse_selector(".a,\n.b").unwrap();
    let parent = parse_selector(".p").unwrap();
    let resolved = child.resolve_parent_refs(Some(&parent)).unwrap();
    assert_eq!(resolved.to_string(), ".p .a,\n.p .b");
}
