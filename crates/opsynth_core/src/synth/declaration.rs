//! Synthesized declaration records handed to the rendering side.

use crate::symbol::{Annotation, AnnotationValue, Parameter, TypeRef};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Synchrony of a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Face {
    Synchronous,
    Asynchronous,
}

impl Face {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Synchronous => "sync",
            Self::Asynchronous => "async",
        }
    }
}

impl Display for Face {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Generator name and version for the provenance annotation.
///
/// Both values come from the host; core never interprets them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    pub generator_name: String,
    pub generator_version: String,
}

impl Provenance {
    pub fn new(generator_name: impl Into<String>, generator_version: impl Into<String>) -> Self {
        Self {
            generator_name: generator_name.into(),
            generator_version: generator_version.into(),
        }
    }

    /// Builds `marker(generator_name, generator_version)`.
    pub fn annotation(&self, marker: &TypeRef) -> Annotation {
        Annotation::new(marker.clone())
            .with_positional(AnnotationValue::Str(self.generator_name.clone()))
            .with_positional(AnnotationValue::Str(self.generator_version.clone()))
    }
}

/// One emitted method declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SynthesizedDeclaration {
    pub name: String,
    pub return_type: TypeRef,
    /// Copied from the source descriptor, order preserved.
    pub parameters: Vec<Parameter>,
    /// Annotations to attach, in render order. Empty when annotations are off.
    pub annotations: Vec<Annotation>,
    pub face: Face,
    pub provenance: Provenance,
}

impl SynthesizedDeclaration {
    pub fn is_asynchronous(&self) -> bool {
        self.face == Face::Asynchronous
    }

    pub fn parameter_types(&self) -> impl Iterator<Item = &TypeRef> {
        self.parameters.iter().map(|parameter| &parameter.ty)
    }
}
