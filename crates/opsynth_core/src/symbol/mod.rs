//! Symbol model consumed by contract extraction.
//!
//! # Responsibility
//! - Describe types, annotations and members of an already-loaded interface.
//! - Define the `SymbolModel` seam that extraction queries.
//! - Provide `InterfaceCatalog`, an in-memory model for hosts and tests.
//!
//! # Invariants
//! - Every symbol value is immutable once handed to core.
//! - Type equality is structural over name and type arguments.
//! - `all_members` lists declared members before inherited ones.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod annotation;
pub mod catalog;
pub mod member;
pub mod type_ref;

pub use annotation::{Annotation, AnnotationValue, NamedArgument};
pub use catalog::InterfaceCatalog;
pub use member::{InterfaceSymbol, Member, MethodSymbol, Parameter, PropertySymbol};
pub use type_ref::TypeRef;

pub type SymbolResult<T> = Result<T, SymbolError>;

/// Errors raised by symbol construction and lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolError {
    /// Type text or metadata name does not parse.
    InvalidTypeName(String),
    /// Generic type constructed with the wrong number of arguments.
    TypeArityMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },
    /// Member or parameter name is not a valid identifier.
    InvalidIdentifier(String),
    /// Well-known type is not part of the loaded model.
    UnresolvedType(String),
    /// Type is not an interface known to the model.
    UnknownType(String),
    /// Two interfaces share one metadata name.
    DuplicateType(String),
    /// Interface inherits from itself, directly or transitively.
    InheritanceCycle(String),
}

impl Display for SymbolError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTypeName(value) => write!(f, "invalid type name: `{value}`"),
            Self::TypeArityMismatch {
                name,
                expected,
                actual,
            } => write!(
                f,
                "type `{name}` expects {expected} type argument(s), got {actual}"
            ),
            Self::InvalidIdentifier(value) => write!(f, "invalid identifier: `{value}`"),
            Self::UnresolvedType(value) => {
                write!(f, "required type is not available in the model: {value}")
            }
            Self::UnknownType(value) => write!(f, "unknown interface type: {value}"),
            Self::DuplicateType(value) => write!(f, "interface declared twice: {value}"),
            Self::InheritanceCycle(value) => {
                write!(f, "interface inheritance cycle through: {value}")
            }
        }
    }
}

impl Error for SymbolError {}

/// Query surface over a loaded symbol model.
///
/// Implementations are in-memory; none of these calls may block on I/O.
pub trait SymbolModel {
    /// Returns all members of `ty`, including inherited ones.
    fn all_members(&self, ty: &TypeRef) -> SymbolResult<Vec<Member>>;

    /// Resolves a well-known type by fully-qualified metadata name.
    fn resolve_type(&self, metadata_name: &str) -> Option<TypeRef>;

    /// Same as `resolve_type`, failing when the type is absent.
    fn require_type(&self, metadata_name: &str) -> SymbolResult<TypeRef> {
        self.resolve_type(metadata_name)
            .ok_or_else(|| SymbolError::UnresolvedType(metadata_name.to_string()))
    }
}
