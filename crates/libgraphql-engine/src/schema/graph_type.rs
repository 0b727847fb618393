use crate::schema::FieldDefinition;
use crate::schema::InputValueDefinition;
use indexmap::IndexMap;
use indexmap::IndexSet;
use std::sync::Arc;

/// Similar to [`GraphType`], except without the corresponding metadata.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum GraphTypeKind {
    Enum,
    InputObject,
    Interface,
    Object,
    Scalar,
    Union,
}
impl std::fmt::Display for GraphTypeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Enum => "enum",
            Self::InputObject => "input object",
            Self::Interface => "interface",
            Self::Object => "object",
            Self::Scalar => "scalar",
            Self::Union => "union",
        })
    }
}

/// A named type defined within a [`Schema`](crate::schema::Schema).
#[derive(Clone, Debug)]
pub enum GraphType {
    Enum(EnumType),
    InputObject(InputObjectType),
    Interface(InterfaceType),
    Object(ObjectType),
    Scalar(ScalarType),
    Union(UnionType),
}
impl GraphType {
    pub fn as_object(&self) -> Option<&ObjectType> {
        if let Self::Object(obj) = self {
            Some(obj)
        } else {
            None
        }
    }

    /// The fields selectable on this type. Only object and interface types
    /// have fields.
    pub fn fields(&self) -> Option<&IndexMap<String, Arc<FieldDefinition>>> {
        match self {
            Self::Interface(iface) => Some(&iface.fields),
            Self::Object(obj) => Some(&obj.fields),
            _ => None,
        }
    }

    pub fn field(&self, name: &str) -> Option<&Arc<FieldDefinition>> {
        self.fields().and_then(|fields| fields.get(name))
    }

    /// Object, interface and union types: the types a selection set may be
    /// evaluated against.
    pub fn is_composite(&self) -> bool {
        matches!(self, Self::Interface(_) | Self::Object(_) | Self::Union(_))
    }

    /// Interface and union types, whose concrete object type is only known
    /// once a value has been resolved.
    pub fn is_abstract(&self) -> bool {
        matches!(self, Self::Interface(_) | Self::Union(_))
    }

    pub fn is_input_type(&self) -> bool {
        matches!(self, Self::Enum(_) | Self::InputObject(_) | Self::Scalar(_))
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Enum(_) | Self::Scalar(_))
    }

    pub fn kind(&self) -> GraphTypeKind {
        match self {
            Self::Enum(_) => GraphTypeKind::Enum,
            Self::InputObject(_) => GraphTypeKind::InputObject,
            Self::Interface(_) => GraphTypeKind::Interface,
            Self::Object(_) => GraphTypeKind::Object,
            Self::Scalar(_) => GraphTypeKind::Scalar,
            Self::Union(_) => GraphTypeKind::Union,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Enum(t) => t.name.as_str(),
            Self::InputObject(t) => t.name.as_str(),
            Self::Interface(t) => t.name.as_str(),
            Self::Object(t) => t.name.as_str(),
            Self::Scalar(t) => t.name.as_str(),
            Self::Union(t) => t.name.as_str(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct EnumType {
    pub(crate) name: String,
    pub(crate) values: IndexSet<String>,
}
impl EnumType {
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn values(&self) -> &IndexSet<String> {
        &self.values
    }
}

#[derive(Clone, Debug)]
pub struct InputObjectType {
    pub(crate) fields: IndexMap<String, InputValueDefinition>,
    pub(crate) name: String,
}
impl InputObjectType {
    pub fn fields(&self) -> &IndexMap<String, InputValueDefinition> {
        &self.fields
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}

#[derive(Clone, Debug)]
pub struct InterfaceType {
    pub(crate) fields: IndexMap<String, Arc<FieldDefinition>>,
    pub(crate) interfaces: Vec<String>,
    pub(crate) name: String,
}
impl InterfaceType {
    pub fn fields(&self) -> &IndexMap<String, Arc<FieldDefinition>> {
        &self.fields
    }

    pub fn interfaces(&self) -> &[String] {
        self.interfaces.as_slice()
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}

#[derive(Clone, Debug)]
pub struct ObjectType {
    pub(crate) fields: IndexMap<String, Arc<FieldDefinition>>,
    pub(crate) interfaces: Vec<String>,
    pub(crate) name: String,
}
impl ObjectType {
    pub fn fields(&self) -> &IndexMap<String, Arc<FieldDefinition>> {
        &self.fields
    }

    /// Names of the interfaces this object type declares it implements.
    pub fn interfaces(&self) -> &[String] {
        self.interfaces.as_slice()
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}

#[derive(Clone, Debug)]
pub struct ScalarType {
    pub(crate) builtin: bool,
    pub(crate) name: String,
}
impl ScalarType {
    pub fn is_builtin(&self) -> bool {
        self.builtin
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}

#[derive(Clone, Debug)]
pub struct UnionType {
    pub(crate) members: Vec<String>,
    pub(crate) name: String,
}
impl UnionType {
    pub fn members(&self) -> &[String] {
        self.members.as_slice()
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}
