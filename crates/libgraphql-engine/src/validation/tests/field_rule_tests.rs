use crate::validation::tests::assert_valid;
use crate::validation::tests::validate;

#[test]
fn unknown_fields() {
    let validated = validate("{ user(id: 1) { nope } }");
    assert_eq!(validated.rules(), vec!["5.3.1"]);
}

#[test]
fn failing_fields_are_marked_invalid() {
    let validated = validate("{ user(id: 1) { nope } }");
    let invalid: Vec<_> = validated.document.parts()
        .iter()
        .filter(|part| part.is_invalid())
        .filter_map(|part| part.kind().as_field())
        .map(|field| field.name())
        .collect();
    assert_eq!(invalid, vec!["nope"]);
}

#[test]
fn typename_is_selectable_on_any_composite_type() {
    assert_valid("{ __typename search(term: \"x\") { __typename } }");
}

#[test]
fn leaf_fields_must_not_have_selections() {
    let validated = validate("{ hello { length } }");
    assert_eq!(validated.rules(), vec!["5.3.3"]);
}

#[test]
fn composite_fields_must_have_selections() {
    let validated = validate("{ user(id: 1) }");
    assert_eq!(validated.rules(), vec!["5.3.3"]);
}

mod selection_merging {
    use super::*;

    #[test]
    fn same_response_name_for_different_fields() {
        let validated = validate("{ user(id: 1) { name name: id } }");
        assert_eq!(validated.rules(), vec!["5.3.2"]);
    }

    #[test]
    fn same_response_name_with_different_arguments() {
        let validated = validate("{ a: user(id: 1) { id } a: user(id: 2) { id } }");
        assert_eq!(validated.rules(), vec!["5.3.2"]);
    }

    #[test]
    fn conflicts_through_fragments() {
        let validated = validate(r#"
            { user(id: 1) { name ...Bits } }
            fragment Bits on User { name: role }
        "#);
        assert_eq!(validated.rules(), vec!["5.3.2"]);
    }

    #[test]
    fn identical_selections_merge() {
        assert_valid("{ user(id: 1) { name ... on User { name } } }");
    }

    #[test]
    fn disjoint_object_types_may_reuse_a_response_name() {
        assert_valid(r#"{
            search(term: "x") {
                ... on User { label: name }
                ... on Post { label: summary }
            }
        }"#);
    }

    #[test]
    fn disjoint_object_types_still_need_compatible_shapes() {
        let validated = validate(r#"{
            search(term: "x") {
                ... on User { value: name }
                ... on Post { value: author { id } }
            }
        }"#);
        assert_eq!(validated.rules(), vec!["5.3.2"]);
    }
}
