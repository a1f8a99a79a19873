//! Annotation records.
//!
//! Annotations are plain values: a type, positional arguments and named
//! arguments. Transformations return new records and never mutate the source.

use crate::symbol::TypeRef;
use serde::{Deserialize, Serialize};

/// Literal argument value carried by an annotation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum AnnotationValue {
    Bool(bool),
    Int(i64),
    Str(String),
    Type(TypeRef),
    Array(Vec<AnnotationValue>),
}

/// `name = value` argument of an annotation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NamedArgument {
    pub name: String,
    pub value: AnnotationValue,
}

/// One annotation instance attached to a member.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Annotation {
    #[serde(rename = "type")]
    pub annotation_type: TypeRef,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub positional: Vec<AnnotationValue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub named: Vec<NamedArgument>,
}

impl Annotation {
    /// Creates an annotation without arguments.
    pub fn new(annotation_type: TypeRef) -> Self {
        Self {
            annotation_type,
            positional: Vec::new(),
            named: Vec::new(),
        }
    }

    pub fn with_positional(mut self, value: AnnotationValue) -> Self {
        self.positional.push(value);
        self
    }

    pub fn is_of_type(&self, annotation_type: &TypeRef) -> bool {
        &self.annotation_type == annotation_type
    }

    /// Returns the value of named argument `name`.
    pub fn named_value(&self, name: &str) -> Option<&AnnotationValue> {
        self.named
            .iter()
            .find(|arg| arg.name == name)
            .map(|arg| &arg.value)
    }

    /// Returns a copy without named argument `name`.
    ///
    /// Type and positional arguments are shared with the source unchanged.
    pub fn without_named(&self, name: &str) -> Self {
        Self {
            annotation_type: self.annotation_type.clone(),
            positional: self.positional.clone(),
            named: self
                .named
                .iter()
                .filter(|arg| arg.name != name)
                .cloned()
                .collect(),
        }
    }

    /// Returns a copy with named argument `name` set to `value`.
    ///
    /// An existing argument with the same name is replaced in place; otherwise
    /// the argument is appended.
    pub fn with_named(&self, name: &str, value: AnnotationValue) -> Self {
        let mut copy = self.clone();
        match copy.named.iter_mut().find(|arg| arg.name == name) {
            Some(existing) => existing.value = value,
            None => copy.named.push(NamedArgument {
                name: name.to_string(),
                value,
            }),
        }
        copy
    }
}
