//! Contract extraction.
//!
//! # Responsibility
//! - Select the contract-annotated methods of a service interface.
//! - Normalize each one into a `MethodDescriptor`.
//!
//! # Invariants
//! - Descriptors keep the member order reported by the symbol model.
//! - One failing member fails the whole batch; no partial results.

use crate::symbol::SymbolError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod conventions;
pub mod descriptor;
pub mod extractor;

pub use conventions::{WellKnownTypeNames, WellKnownTypes};
pub use descriptor::{ContractIdentity, MethodDescriptor};
pub use extractor::ContractExtractor;

pub type ExtractResult<T> = Result<T, ExtractError>;

/// Configuration errors found while describing contract members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// A selected method is not decorated with the contract marker.
    MissingContractMarker { method: String, marker: String },
    /// A future-of-T return type does not carry exactly one non-void argument.
    MalformedFutureType { method: String, return_type: String },
    /// An asynchronous method is named only by the async suffix.
    EmptyLogicalName { method: String },
    /// Symbol-model lookup or type construction failure.
    Symbol(SymbolError),
}

impl Display for ExtractError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingContractMarker { method, marker } => {
                write!(f, "the method {method} is not decorated with {marker}")
            }
            Self::MalformedFutureType {
                method,
                return_type,
            } => write!(
                f,
                "the method {method} returns malformed future type {return_type}"
            ),
            Self::EmptyLogicalName { method } => write!(
                f,
                "the asynchronous method {method} has no name left once the async suffix is removed"
            ),
            Self::Symbol(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ExtractError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Symbol(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SymbolError> for ExtractError {
    fn from(value: SymbolError) -> Self {
        Self::Symbol(value)
    }
}
