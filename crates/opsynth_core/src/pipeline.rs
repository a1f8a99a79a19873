//! End-to-end generation for one service interface.
//!
//! # Responsibility
//! - Resolve well-known types, extract descriptors, synthesize declarations.
//! - Attach the host-supplied provenance annotation to the result.
//!
//! # Invariants
//! - The pipeline is pure over its inputs; repeated runs yield equal output.

use crate::contract::{ContractExtractor, ExtractError, WellKnownTypeNames, WellKnownTypes};
use crate::symbol::{Annotation, SymbolError, SymbolModel, TypeRef};
use crate::synth::{
    DeclarationSynthesizer, Provenance, SynthesisError, SynthesisOptions, SynthesizedDeclaration,
};
use log::error;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Generation output for one interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedContract {
    pub interface: TypeRef,
    pub declarations: Vec<SynthesizedDeclaration>,
    /// Provenance annotation for the rendered interface.
    pub provenance_annotation: Annotation,
}

/// Any failure along the generation pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    Symbol(SymbolError),
    Extract(ExtractError),
    Synthesis(SynthesisError),
}

impl Display for GenerationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Symbol(err) => write!(f, "{err}"),
            Self::Extract(err) => write!(f, "{err}"),
            Self::Synthesis(err) => write!(f, "{err}"),
        }
    }
}

impl Error for GenerationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Symbol(err) => Some(err),
            Self::Extract(err) => Some(err),
            Self::Synthesis(err) => Some(err),
        }
    }
}

impl From<SymbolError> for GenerationError {
    fn from(value: SymbolError) -> Self {
        Self::Symbol(value)
    }
}

impl From<ExtractError> for GenerationError {
    fn from(value: ExtractError) -> Self {
        Self::Extract(value)
    }
}

impl From<SynthesisError> for GenerationError {
    fn from(value: SynthesisError) -> Self {
        Self::Synthesis(value)
    }
}

/// Generates the normalized declaration set of `interface`.
///
/// # Errors
/// - `Symbol` when a well-known type or the interface is unknown to `model`.
/// - `Extract` when a contract member is malformed.
/// - `Synthesis` when the descriptor set is ambiguous.
pub fn generate<M>(
    model: &M,
    interface: &TypeRef,
    names: &WellKnownTypeNames,
    options: SynthesisOptions,
    provenance: Provenance,
) -> Result<GeneratedContract, GenerationError>
where
    M: SymbolModel + ?Sized,
{
    let result = run(model, interface, names, options, provenance);
    if let Err(err) = &result {
        error!(
            "event=generate module=pipeline status=error interface={} error={}",
            interface, err
        );
    }
    result
}

fn run<M>(
    model: &M,
    interface: &TypeRef,
    names: &WellKnownTypeNames,
    options: SynthesisOptions,
    provenance: Provenance,
) -> Result<GeneratedContract, GenerationError>
where
    M: SymbolModel + ?Sized,
{
    let types = WellKnownTypes::resolve(model, names)?;
    let descriptors = ContractExtractor::new(&types).extract(model, interface)?;
    let provenance_annotation = provenance.annotation(&types.provenance_marker);
    let declarations = DeclarationSynthesizer::new(options, provenance).synthesize(&descriptors)?;

    Ok(GeneratedContract {
        interface: interface.clone(),
        declarations,
        provenance_annotation,
    })
}
