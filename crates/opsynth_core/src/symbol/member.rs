//! Interface and member symbols.

use crate::symbol::{Annotation, TypeRef};
use serde::{Deserialize, Serialize};

/// Method parameter. Only `ty` takes part in contract identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// Method member of an interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodSymbol {
    pub name: String,
    /// `System.Void` when the method returns nothing.
    #[serde(default = "TypeRef::void")]
    pub return_type: TypeRef,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl MethodSymbol {
    pub fn new(name: impl Into<String>, return_type: TypeRef) -> Self {
        Self {
            name: name.into(),
            return_type,
            parameters: Vec::new(),
            annotations: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn returns_void(&self) -> bool {
        self.return_type.is_void()
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Returns the first annotation of type `marker`.
    pub fn annotation(&self, marker: &TypeRef) -> Option<&Annotation> {
        self.annotations.iter().find(|attr| attr.is_of_type(marker))
    }
}

/// Property member of an interface. Never a contract operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySymbol {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

/// Interface member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Member {
    Method(MethodSymbol),
    Property(PropertySymbol),
}

impl Member {
    pub fn name(&self) -> &str {
        match self {
            Self::Method(method) => &method.name,
            Self::Property(property) => &property.name,
        }
    }

    pub fn as_method(&self) -> Option<&MethodSymbol> {
        match self {
            Self::Method(method) => Some(method),
            Self::Property(_) => None,
        }
    }
}

/// Interface declaration as loaded by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceSymbol {
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
    #[serde(default)]
    pub base_interfaces: Vec<TypeRef>,
    #[serde(default)]
    pub members: Vec<Member>,
}

impl InterfaceSymbol {
    pub fn new(type_ref: TypeRef) -> Self {
        Self {
            type_ref,
            base_interfaces: Vec::new(),
            members: Vec::new(),
        }
    }

    pub fn with_base(mut self, base: TypeRef) -> Self {
        self.base_interfaces.push(base);
        self
    }

    pub fn with_member(mut self, member: Member) -> Self {
        self.members.push(member);
        self
    }
}
