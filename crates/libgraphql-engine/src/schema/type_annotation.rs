use crate::ast;

/// Represents the annotated type of a field, argument, input field or
/// variable (e.g. `[User!]!`).
#[derive(Clone, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
pub enum TypeAnnotation {
    List(ListTypeAnnotation),
    Named(NamedTypeAnnotation),
}

#[derive(Clone, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct ListTypeAnnotation {
    pub(crate) inner: Box<TypeAnnotation>,
    pub(crate) nullable: bool,
}
impl ListTypeAnnotation {
    pub fn inner_type_annotation(&self) -> &TypeAnnotation {
        &self.inner
    }
}

#[derive(Clone, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct NamedTypeAnnotation {
    pub(crate) name: String,
    pub(crate) nullable: bool,
}
impl NamedTypeAnnotation {
    pub fn graphql_type_name(&self) -> &str {
        self.name.as_str()
    }
}

impl TypeAnnotation {
    pub fn named(name: impl Into<String>, nullable: bool) -> Self {
        Self::Named(NamedTypeAnnotation {
            name: name.into(),
            nullable,
        })
    }

    pub fn list(inner: TypeAnnotation, nullable: bool) -> Self {
        Self::List(ListTypeAnnotation {
            inner: Box::new(inner),
            nullable,
        })
    }

    pub(crate) fn from_ast_type(ast_type: &ast::Type) -> Self {
        Self::from_ast_type_impl(ast_type, /* nullable = */ true)
    }

    fn from_ast_type_impl(ast_type: &ast::Type, nullable: bool) -> Self {
        match ast_type {
            ast::Type::ListType(inner) =>
                Self::list(Self::from_ast_type_impl(inner, true), nullable),

            ast::Type::NamedType(name) =>
                Self::named(name.as_str(), nullable),

            ast::Type::NonNullType(inner) =>
                Self::from_ast_type_impl(inner, false),
        }
    }

    pub fn as_list_annotation(&self) -> Option<&ListTypeAnnotation> {
        if let Self::List(annot) = self {
            Some(annot)
        } else {
            None
        }
    }

    /// Recursively unwrap any list wrappers and return the name of the
    /// innermost named type.
    pub fn innermost_type_name(&self) -> &str {
        match self {
            Self::List(list) => list.inner.innermost_type_name(),
            Self::Named(named) => named.name.as_str(),
        }
    }

    /// Indicates if this annotation is a list at its outermost level.
    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// Indicates if this [`TypeAnnotation`] is [nullable or
    /// non-nullable](https://spec.graphql.org/October2021/#sec-Non-Null).
    pub fn nullable(&self) -> bool {
        match self {
            Self::List(list) => list.nullable,
            Self::Named(named) => named.nullable,
        }
    }

    /// A copy of this annotation with the outermost non-null wrapper removed.
    pub fn as_nullable(&self) -> Self {
        let mut annot = self.clone();
        match &mut annot {
            Self::List(list) => list.nullable = true,
            Self::Named(named) => named.nullable = true,
        }
        annot
    }

    /// Whether a variable declared with type `self` may be used in a position
    /// expecting `location_type`.
    ///
    /// https://spec.graphql.org/October2021/#AreTypesCompatible()
    pub fn is_compatible_with(&self, location_type: &TypeAnnotation) -> bool {
        if !location_type.nullable() {
            if self.nullable() {
                return false;
            }
            return self.as_nullable().is_compatible_with(&location_type.as_nullable());
        }
        if !self.nullable() {
            return self.as_nullable().is_compatible_with(location_type);
        }
        match (self, location_type) {
            (Self::List(var_list), Self::List(loc_list))
                => var_list.inner.is_compatible_with(&loc_list.inner),
            (Self::Named(var_named), Self::Named(loc_named))
                => var_named.name == loc_named.name,
            _ => false,
        }
    }
}
impl std::fmt::Display for TypeAnnotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::List(list) => write!(
                f,
                "[{}]{}",
                list.inner,
                if list.nullable { "" } else { "!" },
            ),

            Self::Named(named) => write!(
                f,
                "{}{}",
                named.name,
                if named.nullable { "" } else { "!" },
            ),
        }
    }
}
