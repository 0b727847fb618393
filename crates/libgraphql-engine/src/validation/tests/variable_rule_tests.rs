use crate::validation::tests::assert_valid;
use crate::validation::tests::validate;

#[test]
fn duplicate_variables() {
    let validated = validate("query Q($id: ID!, $id: ID!) { user(id: $id) { id } }");
    assert_eq!(validated.rules(), vec!["5.8.1"]);
}

#[test]
fn variables_must_be_input_types() {
    let validated = validate("query Q($u: User) { hello }");
    assert_eq!(validated.rules(), vec!["5.8.4", "5.8.2"]);
}

#[test]
fn undefined_variables() {
    let validated = validate("query Q { user(id: $id) { id } }");
    assert_eq!(validated.rules(), vec!["5.8.3"]);
}

#[test]
fn undefined_variables_in_fragments() {
    let validated = validate(r#"
        query Q { user(id: 1) { ...Friends } }
        fragment Friends on User { friends(first: $count) { id } }
    "#);
    assert_eq!(validated.rules(), vec!["5.8.3"]);
}

#[test]
fn unused_variables() {
    let validated = validate("query Q($id: ID!) { hello }");
    assert_eq!(validated.rules(), vec!["5.8.4"]);
}

#[test]
fn variables_used_through_fragments() {
    assert_valid(r#"
        query Q($count: Int) { user(id: 1) { ...Friends } }
        fragment Friends on User { friends(first: $count) { id } }
    "#);
}

#[test]
fn invalid_default_values() {
    let validated = validate("query Q($id: ID = true) { user(id: $id) { id } }");
    assert_eq!(validated.rules(), vec!["5.6.1"]);
}

mod usages {
    use super::*;

    #[test]
    fn nullable_variable_in_non_null_position() {
        let validated = validate("query Q($id: ID) { user(id: $id) { id } }");
        assert_eq!(validated.rules(), vec!["5.8.5"]);
    }

    #[test]
    fn non_null_default_allows_nullable_variable() {
        assert_valid("query Q($id: ID = 1) { user(id: $id) { id } }");
    }

    #[test]
    fn mismatched_named_types() {
        let validated = validate(r#"
            query Q($n: String) { user(id: 1) { friends(first: $n) { id } } }
        "#);
        assert_eq!(validated.rules(), vec!["5.8.5"]);
    }

    #[test]
    fn usages_nested_in_input_objects() {
        let validated = validate("query Q($r: Role) { users(filter: { role: $r }) { id } }");
        assert_eq!(validated.rules(), vec!["5.8.5"]);

        assert_valid("query Q($r: Role!, $l: Int) { users(filter: { role: $r, limit: $l }) { id } }");
    }

    #[test]
    fn usages_in_lists() {
        assert_valid("query Q($a: ID!, $b: ID!) { users(ids: [$a, $b]) { id } }");

        let validated = validate("query Q($a: ID) { users(ids: [$a]) { id } }");
        assert_eq!(validated.rules(), vec!["5.8.5"]);
    }
}
