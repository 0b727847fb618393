use crate::messages::ResponsePath;
use crate::schema::FieldDefinition;

/// The authenticated user a request runs on behalf of.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UserPrincipal {
    pub(crate) name: String,
    pub(crate) roles: Vec<String>,
}
impl UserPrincipal {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            roles: vec![],
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.roles.push(role.into());
        self
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn roles(&self) -> &[String] {
        self.roles.as_slice()
    }
}

#[derive(Clone, Debug, Default)]
pub struct SecurityContext {
    pub(crate) user: Option<UserPrincipal>,
}
impl SecurityContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, user: UserPrincipal) -> Self {
        self.user = Some(user);
        self
    }

    pub fn user(&self) -> Option<&UserPrincipal> {
        self.user.as_ref()
    }
}

/// The outcome of challenging one field. A passing result may carry the
/// principal the challenge established, which is then handed to the field's
/// resolver in place of the request's user.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuthorizationResult {
    pub passed: bool,
    pub user: Option<UserPrincipal>,
}
impl AuthorizationResult {
    pub fn allow(user: Option<UserPrincipal>) -> Self {
        Self {
            passed: true,
            user,
        }
    }

    pub fn deny() -> Self {
        Self {
            passed: false,
            user: None,
        }
    }
}

/// Evaluates the authorization policies declared on a field. Fields without
/// policies are never challenged.
#[async_trait::async_trait]
pub trait FieldAuthorizer: Send + Sync {
    async fn authorize(
        &self,
        security_context: &SecurityContext,
        field: &FieldDefinition,
        path: &ResponsePath,
        policies: &[String],
    ) -> AuthorizationResult;
}

/// Passes a field when the request's user holds every role named by the
/// field's policies.
#[derive(Clone, Copy, Debug, Default)]
pub struct RoleAuthorizer;

#[async_trait::async_trait]
impl FieldAuthorizer for RoleAuthorizer {
    async fn authorize(
        &self,
        security_context: &SecurityContext,
        _field: &FieldDefinition,
        _path: &ResponsePath,
        policies: &[String],
    ) -> AuthorizationResult {
        match security_context.user() {
            Some(user) if policies.iter().all(|policy| user.has_role(policy)) =>
                AuthorizationResult::allow(Some(user.clone())),
            _ => AuthorizationResult::deny(),
        }
    }
}
