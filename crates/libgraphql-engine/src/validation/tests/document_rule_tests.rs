use crate::messages::codes;
use crate::validation::tests::assert_valid;
use crate::validation::tests::validate;

#[test]
fn well_formed_document_passes() {
    assert_valid(r#"
        query GetUser($id: ID!) {
            user(id: $id) {
                id
                name
                ...Friends
            }
        }
        fragment Friends on User {
            friends(first: 2) { name }
        }
    "#);
}

#[test]
fn failures_are_critical_invalid_document_messages() {
    let validated = validate("{ user(id: 1) { nope } }");

    assert!(!validated.passed);
    assert!(!validated.document.is_valid());
    let message = validated.document.messages().iter().next().expect("one message");
    assert!(message.is_critical());
    assert_eq!(message.code(), codes::INVALID_DOCUMENT);
    assert!(message.location().is_some());
}

#[test]
fn duplicate_operation_names() {
    let validated = validate("query A { hello } query A { hello }");
    assert_eq!(validated.rules(), vec!["5.2.1.1"]);
}

#[test]
fn anonymous_operation_must_be_alone() {
    let validated = validate("{ hello } query B { hello }");
    assert_eq!(validated.rules(), vec!["5.2.2.1"]);
}

#[test]
fn subscriptions_select_a_single_root_field() {
    let validated = validate("subscription { userAdded { id } userRemoved { id } }");
    assert_eq!(validated.rules(), vec!["5.2.3.1"]);

    assert_valid("subscription { userAdded { id } }");
}

#[test]
fn duplicate_fragment_names() {
    let validated = validate(r#"
        { user(id: 1) { ...A } }
        fragment A on User { id }
        fragment A on User { name }
    "#);
    assert_eq!(validated.rules(), vec!["5.5.1.1"]);
}

#[test]
fn unused_fragments() {
    let validated = validate(r#"
        { hello }
        fragment Unused on User { name }
    "#);
    assert_eq!(validated.rules(), vec!["5.5.1.4"]);
}

#[test]
fn fragment_cycles_are_reported_per_fragment() {
    let validated = validate(r#"
        { user(id: 1) { ...A } }
        fragment A on User { bestFriend { ...B } }
        fragment B on User { bestFriend { ...A } }
    "#);
    assert_eq!(validated.rules(), vec!["5.5.2.2", "5.5.2.2"]);
}
