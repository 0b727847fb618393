use crate::validation::tests::assert_valid;
use crate::validation::tests::validate;

#[test]
fn fragment_type_must_exist() {
    let validated = validate("{ user(id: 1) { ... on Nope { id } } }");
    assert_eq!(validated.rules(), vec!["5.5.1.2"]);
}

#[test]
fn named_fragment_type_must_exist() {
    let validated = validate(r#"
        { user(id: 1) { ...Bits } }
        fragment Bits on Nope { id }
    "#);
    assert_eq!(validated.rules(), vec!["5.5.1.2"]);
}

#[test]
fn fragments_must_be_on_composite_types() {
    let validated = validate("{ user(id: 1) { ... on Role { id } } }");
    assert_eq!(validated.rules(), vec!["5.5.1.3"]);
}

#[test]
fn impossible_inline_fragment() {
    let validated = validate("{ user(id: 1) { ... on Post { title } } }");
    assert_eq!(validated.rules(), vec!["5.5.2.3"]);
}

#[test]
fn impossible_fragment_spread() {
    let validated = validate(r#"
        { user(id: 1) { ...PostBits } }
        fragment PostBits on Post { title }
    "#);
    assert_eq!(validated.rules(), vec!["5.5.2.3"]);
}

#[test]
fn abstract_spreads_are_possible() {
    assert_valid(r#"
        {
            node(id: 1) {
                ... on Post { title }
                ...UserBits
            }
            search(term: "x") {
                ... on Node { id }
                ... on Named { name }
            }
        }
        fragment UserBits on User { name }
    "#);
}

#[test]
fn dangling_spread_fails_validation() {
    let validated = validate("{ user(id: 1) { ...someFragment } }");
    assert!(!validated.passed);
    assert_eq!(validated.rules(), vec!["5.5.2.1"]);
}
