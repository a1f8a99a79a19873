//! Declaration synthesis.
//!
//! # Responsibility
//! - Group descriptors into logical operations by contract identity.
//! - Emit one synchronous and, unless excluded, one asynchronous declaration
//!   per logical operation, with merged annotations.
//!
//! # Invariants
//! - Output order is deterministic for a given input.
//! - Synthesis either returns the full declaration list or an error.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod declaration;
pub mod options;
pub mod synthesizer;

pub use declaration::{Face, Provenance, SynthesizedDeclaration};
pub use options::SynthesisOptions;
pub use synthesizer::DeclarationSynthesizer;

pub type SynthesisResult<T> = Result<T, SynthesisError>;

/// Invalid descriptor sets rejected before emission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SynthesisError {
    /// Two descriptors share one contract identity on the same face.
    AmbiguousOperation {
        logical_name: String,
        face: Face,
        first: String,
        second: String,
    },
}

impl Display for SynthesisError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AmbiguousOperation {
                logical_name,
                face,
                first,
                second,
            } => write!(
                f,
                "operation {logical_name} has two {face} members with one contract identity: {first}, {second}"
            ),
        }
    }
}

impl Error for SynthesisError {}
