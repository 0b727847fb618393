use crate::document::tests::build;
use crate::test_utils::doubled_fragment_chain;
use std::time::Duration;
use std::time::Instant;

#[test]
fn depth_without_fragments() {
    let document = build("{ user(id: 1) { bestFriend { bestFriend { name } } } hello }");
    assert_eq!(document.max_depth(), 4);
}

#[test]
fn depth_counts_through_chained_spreads() {
    let document = build(r#"
        { user(id: 1) { ...A } }
        fragment A on User { bestFriend { ...B } }
        fragment B on User { bestFriend { ...C } }
        fragment C on User { posts { author { name } } }
    "#);

    // user > bestFriend > bestFriend > posts > author > name
    assert!(document.is_valid());
    assert_eq!(document.max_depth(), 6);
}

#[test]
fn inline_fragments_add_no_depth() {
    let document = build(r#"
        { node(id: 1) { ... on User { ...F } } }
        fragment F on User { ... on User { name } }
    "#);
    assert_eq!(document.max_depth(), 2);
}

#[test]
fn cyclic_spreads_terminate() {
    let document = build(r#"
        { user(id: 1) { ...A } }
        fragment A on User { bestFriend { ...B } }
        fragment B on User { bestFriend { ...A } }
    "#);

    // user > bestFriend (A) > bestFriend (B); the spread back into A adds 0.
    assert_eq!(document.max_depth(), 3);
}

#[test]
fn self_referencing_fragment_terminates() {
    let document = build(r#"
        { user(id: 1) { ...A } }
        fragment A on User { name friends { ...A } }
    "#);

    assert_eq!(document.max_depth(), 2);
}

#[test]
fn unused_deep_fragment_does_not_raise_depth() {
    let document = build(r#"
        { hello }
        fragment Deep on User { bestFriend { bestFriend { bestFriend { name } } } }
    "#);

    assert_eq!(document.max_depth(), 1);
}

#[test]
fn repeated_spreads_are_walked_once_per_fragment() {
    let started = Instant::now();
    let document = build(&doubled_fragment_chain(30));

    // user > 30 x bestFriend > name
    assert!(document.is_valid());
    assert_eq!(document.max_depth(), 32);
    assert!(started.elapsed() < Duration::from_secs(5));
}
