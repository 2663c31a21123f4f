//! Integration tests for `@extend` expansion.

use pcss::{parse_selector, ExtendMap, PcssError, Sequence, SimpleSelector};

fn sequence(source: &str) -> Sequence {
    parse_selector(source).unwrap().members.remove(0)
}

/// Builds an extend map from `(target class, extender selector)` pairs.
fn map_of(entries: &[(&str, &str)]) -> ExtendMap {
    let mut map = ExtendMap::new();
    for (target, extender) in entries {
        map.insert(vec![SimpleSelector::class(target)], sequence(extender))
            .unwrap();
    }
    map
}

fn extend(selector: &str, entries: &[(&str, &str)]) -> String {
    parse_selector(selector)
        .unwrap()
        .extend(&map_of(entries))
        .unwrap()
        .to_string()
}

// ============================================================================
// DIRECT EXTENSION
// ============================================================================

#[test]
fn test_extending_a_class() {
    assert_eq!(extend(".foo", &[("foo", ".bar")]), ".foo, .bar");
}

#[test]
fn test_extension_fuses_with_the_remainder() {
    assert_eq!(extend("a.foo", &[("foo", ".bar")]), "a.foo, a.bar");
}

#[test]
fn test_extension_applies_per_matching_compound() {
    assert_eq!(
        extend(".foo .foo", &[("foo", ".bar")]),
        ".foo .foo, .bar .foo, .foo .bar, .bar .bar"
    );
}

#[test]
fn test_multiple_extenders_apply_in_registration_order() {
    assert_eq!(
        extend(".foo", &[("foo", ".bar"), ("foo", ".baz")]),
        ".foo, .bar, .baz"
    );
}

#[test]
fn test_conflicting_unification_drops_the_candidate() {
    // #a cannot also be #b, so only the identity survives.
    assert_eq!(extend("#a.foo", &[("foo", "#b")]), "#a.foo");
}

#[test]
fn test_extension_distributes_over_commas() {
    assert_eq!(
        extend(".foo, .qux", &[("foo", ".bar")]),
        ".foo, .bar, .qux"
    );
}

// ============================================================================
// NO MATCH: IDENTITY
// ============================================================================

#[test]
fn test_unmatched_selectors_pass_through_unchanged() {
    let group = parse_selector("a.foo, #bar > .baz").unwrap();
    let extended = group.extend(&map_of(&[("missing", ".x")])).unwrap();
    assert_eq!(extended, group);
}

#[test]
fn test_target_must_be_a_subset_of_the_compound() {
    // `.foo` alone does not match the target set {.foo, .qux}.
    let mut map = ExtendMap::new();
    map.insert(
        vec![SimpleSelector::class("foo"), SimpleSelector::class("qux")],
        sequence(".bar"),
    )
    .unwrap();
    let group = parse_selector(".foo").unwrap();
    assert_eq!(group.extend(&map).unwrap(), group);

    let both = parse_selector(".foo.qux").unwrap();
    assert_eq!(both.extend(&map).unwrap().to_string(), ".foo.qux, .bar");
}

// ============================================================================
// RECURSIVE EXTENSION
// ============================================================================

#[test]
fn test_chained_extends_expand_transitively() {
    assert_eq!(
        extend(".foo", &[("foo", ".bar"), ("bar", ".baz")]),
        ".foo, .bar, .baz"
    );
}

#[test]
fn test_ancestor_paths_are_woven() {
    assert_eq!(
        extend(".a .b .c", &[("c", ".x .y")]),
        ".a .b .c, .a .b .x .y, .a .x.b .y, .a .x .b .y, .x.a .b .y, .x .a .b .y"
    );
}

// ============================================================================
// LOOP DETECTION
// ============================================================================

#[test]
fn test_mutual_extension_is_reported_as_a_loop() {
    let err = parse_selector(".a")
        .unwrap()
        .extend(&map_of(&[("a", ".b"), ("b", ".a")]))
        .unwrap_err();
    match err {
        PcssError::Syntax { message, .. } => {
            assert!(message.starts_with("An @extend loop was found:"));
        }
        other => panic!("expected a syntax error, got {other:?}"),
    }
}

#[test]
fn test_loop_diagnostic_lists_the_cycle_highest_line_first() {
    let mut map = ExtendMap::new();
    let mut extender_b = sequence(".b");
    extender_b.set_line(2);
    map.insert(vec![SimpleSelector::class("a")], extender_b)
        .unwrap();
    let mut extender_a = sequence(".a");
    extender_a.set_line(4);
    map.insert(vec![SimpleSelector::class("b")], extender_a)
        .unwrap();

    let err = parse_selector(".a").unwrap().extend(&map).unwrap_err();
    match err {
        PcssError::Syntax { message, line, .. } => {
            assert_eq!(
                message,
                "An @extend loop was found:\n\
                 .b extends .a on line 2,\n\
                 .a extends .b on line 1"
            );
            assert_eq!(line, 2);
        }
        other => panic!("expected a syntax error, got {other:?}"),
    }
}

#[test]
fn test_loop_diagnostic_names_the_file() {
    let mut map = ExtendMap::new();
    let mut extender = sequence(".b");
    extender.set_line(3);
    extender.set_filename("theme.pcss");
    map.insert(vec![SimpleSelector::class("a")], extender)
        .unwrap();
    map.insert(vec![SimpleSelector::class("b")], sequence(".a"))
        .unwrap();

    let err = parse_selector(".a").unwrap().extend(&map).unwrap_err();
    assert!(err
        .to_string()
        .contains(".b extends .a on line 3 of theme.pcss"));
}

#[test]
fn test_self_extension_is_a_loop() {
    let err = parse_selector(".a")
        .unwrap()
        .extend(&map_of(&[("a", ".a.b")]))
        .unwrap_err();
    assert!(err
        .to_string()
        .starts_with("An @extend loop was found:"));
}
