use crate::InputValue;
use crate::plan::tests::plan;
use crate::plan::tests::response_names;
use crate::test_utils::test_schema;

#[test]
fn fragments_expand_in_place() {
    let plan = plan(r#"
        { user(id: 1) { id ...Bits role } }
        fragment Bits on User { name }
    "#, &test_schema());

    let operation = &plan.operations()[0];
    let user = &operation.fields()[0];
    assert_eq!(response_names(user.children()), vec!["id", "name", "role"]);
    assert!(user.children().iter().all(|child| child.type_restriction().is_none()));
}

#[test]
fn identical_selections_are_merged() {
    let plan = plan(r#"
        {
            user(id: 1) {
                name
                bestFriend { id }
                ... on User { name bestFriend { name } }
            }
        }
    "#, &test_schema());

    let user = &plan.operations()[0].fields()[0];
    assert_eq!(response_names(user.children()), vec!["name", "bestFriend"]);
    let best_friend = &user.children()[1];
    assert_eq!(response_names(best_friend.children()), vec!["id", "name"]);
}

#[test]
fn aliases_produce_separate_contexts() {
    let plan = plan("{ a: user(id: 1) { id } b: user(id: 2) { id } }", &test_schema());

    let fields = plan.operations()[0].fields();
    assert_eq!(response_names(fields), vec!["a", "b"]);
    assert_eq!(fields[0].field().name(), "user");
    assert_eq!(fields[1].arguments()["id"], InputValue::Literal(2.into()));
}

#[test]
fn type_conditions_restrict_contexts() {
    let plan = plan(r#"{
        search(term: "x") {
            __typename
            ... on User { name }
            ... on Post { title }
            ... on Node { id }
        }
    }"#, &test_schema());

    let search = &plan.operations()[0].fields()[0];
    let children = search.children();
    assert_eq!(response_names(children), vec!["__typename", "name", "title", "id"]);

    assert!(children[0].type_restriction().is_none());
    assert!(children[1].applies_to("User"));
    assert!(!children[1].applies_to("Post"));
    assert!(children[2].applies_to("Post"));
    assert!(!children[2].applies_to("User"));
    // Every member of the union implements Node.
    assert!(children[3].type_restriction().is_none());
}

#[test]
fn nested_type_conditions_intersect() {
    let plan = plan(r#"{
        search(term: "x") {
            ... on Node { ... on Named { name } }
        }
    }"#, &test_schema());

    let name = &plan.operations()[0].fields()[0].children()[0];
    assert_eq!(
        name.type_restriction().map(|types| types.iter().cloned().collect::<Vec<_>>()),
        Some(vec!["User".to_string()]),
    );
}

#[test]
fn fragment_directives_precede_field_directives() {
    let plan = plan(r#"
        query Q($withName: Boolean!) {
            user(id: 1) {
                ... on User @include(if: $withName) { name @upper }
                ...Bits @skip(if: false)
            }
        }
        fragment Bits on User { id }
    "#, &test_schema());

    let user = &plan.operations()[0].fields()[0];
    let name = &user.children()[0];
    let directive_names: Vec<_> = name.directives().iter().map(|d| d.name()).collect();
    assert_eq!(directive_names, vec!["include", "upper"]);
    assert_eq!(
        name.directives()[0].arguments()["if"],
        InputValue::Variable("withName".to_string()),
    );

    let id = &user.children()[1];
    let directive_names: Vec<_> = id.directives().iter().map(|d| d.name()).collect();
    assert_eq!(directive_names, vec!["skip"]);
}

#[test]
fn variables_stay_symbolic() {
    let plan = plan("query Q($id: ID!) { user(id: $id) { id } }", &test_schema());

    let operation = &plan.operations()[0];
    assert_eq!(operation.name(), Some("Q"));
    assert_eq!(operation.variables().len(), 1);
    assert_eq!(operation.variables()[0].name(), "id");
    assert_eq!(
        operation.fields()[0].arguments()["id"],
        InputValue::Variable("id".to_string()),
    );
}

#[test]
fn every_operation_is_generated() {
    let plan = plan(r#"
        query A { hello }
        mutation B { renameUser(id: 1, name: "x") { id } }
    "#, &test_schema());

    assert_eq!(plan.operations().len(), 2);
    assert!(plan.operations().iter().all(|op| op.is_valid()));
    assert_eq!(plan.operation(Some("B")).map(|op| op.root_type()), Some(Some("Mutation")));
    assert!(plan.operation(None).is_none());
}
