use crate::execution::AuthorizationResult;
use crate::execution::FieldAuthorizer;
use crate::execution::GraphQueryExecutionContext;
use crate::execution::GraphQueryRequest;
use crate::execution::QueryExecutionResult;
use crate::execution::RoleAuthorizer;
use crate::execution::SecurityContext;
use crate::execution::UserPrincipal;
use crate::execution::tests::data;
use crate::execution::tests::message_codes;
use crate::messages::ResponsePath;
use crate::messages::codes;
use crate::runtime::GraphQueryRuntime;
use crate::schema::FieldDefinition;
use crate::schema::Schema;
use crate::schema::resolver_fn;
use crate::test_utils::test_schema_builder;
use serde_json::json;
use std::sync::Arc;

const QUERY: &str = "{ hello user(id: 1) { id name } }";

fn guarded_schema() -> Arc<Schema> {
    Arc::new(
        test_schema_builder()
            .authorize_field("User", "name", "admin")
            .field_resolver("Query", "hello", resolver_fn(|ctx| async move {
                Ok(json!(ctx.user().map(UserPrincipal::name).unwrap_or("anonymous")))
            }))
            .authorize_field("Query", "hello", "greeter")
            .build()
            .unwrap(),
    )
}

async fn run(
    authorizer: Option<Arc<dyn FieldAuthorizer>>,
    user: Option<UserPrincipal>,
) -> QueryExecutionResult {
    let mut runtime = GraphQueryRuntime::new(guarded_schema());
    if let Some(authorizer) = authorizer {
        runtime = runtime.with_authorizer(authorizer);
    }
    let mut security_context = SecurityContext::new();
    if let Some(user) = user {
        security_context = security_context.with_user(user);
    }
    let context = GraphQueryExecutionContext::new(GraphQueryRequest::new(QUERY))
        .with_root_value(json!({ "user": { "id": "1", "name": "Ann" } }))
        .with_security_context(security_context);
    runtime.execute(context).await
}

/// Passes every challenge and vouches for a fixed service account.
struct ServiceAccountAuthorizer;

#[async_trait::async_trait]
impl FieldAuthorizer for ServiceAccountAuthorizer {
    async fn authorize(
        &self,
        _security_context: &SecurityContext,
        _field: &FieldDefinition,
        _path: &ResponsePath,
        _policies: &[String],
    ) -> AuthorizationResult {
        AuthorizationResult::allow(Some(UserPrincipal::new("service-account")))
    }
}

#[tokio::test]
async fn guarded_fields_are_denied_without_an_authorizer() {
    let result = run(None, Some(UserPrincipal::new("ann").with_role("admin"))).await;

    assert_eq!(data(&result), &json!({ "hello": null, "user": { "id": "1", "name": null } }));
    assert_eq!(message_codes(&result), vec![codes::ACCESS_DENIED, codes::ACCESS_DENIED]);
    let paths: Vec<_> = result.messages()
        .iter()
        .filter_map(|message| message.path().map(ToString::to_string))
        .collect();
    assert!(paths.contains(&"hello".to_string()));
    assert!(paths.contains(&"user.name".to_string()));
}

#[tokio::test]
async fn role_authorizer_passes_users_holding_every_role() {
    let user = UserPrincipal::new("ann").with_role("admin").with_role("greeter");

    let result = run(Some(Arc::new(RoleAuthorizer)), Some(user)).await;

    assert!(result.messages().is_empty());
    assert_eq!(data(&result), &json!({ "hello": "ann", "user": { "id": "1", "name": "Ann" } }));
}

#[tokio::test]
async fn role_authorizer_denies_missing_roles() {
    let user = UserPrincipal::new("ann").with_role("greeter");

    let result = run(Some(Arc::new(RoleAuthorizer)), Some(user)).await;

    assert_eq!(data(&result), &json!({ "hello": "ann", "user": { "id": "1", "name": null } }));
    assert_eq!(message_codes(&result), vec![codes::ACCESS_DENIED]);
}

#[tokio::test]
async fn anonymous_requests_are_denied() {
    let result = run(Some(Arc::new(RoleAuthorizer)), None).await;

    assert_eq!(message_codes(&result), vec![codes::ACCESS_DENIED, codes::ACCESS_DENIED]);
}

#[tokio::test]
async fn authorizer_principals_reach_the_resolver() {
    let result = run(Some(Arc::new(ServiceAccountAuthorizer)), Some(UserPrincipal::new("ann"))).await;

    assert!(result.messages().is_empty());
    assert_eq!(data(&result)["hello"], json!("service-account"));
}
