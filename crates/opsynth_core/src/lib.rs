//! Core synthesis logic for opsynth.
//! Normalizes a service interface into one synchronous and one asynchronous
//! declaration per logical operation.

pub mod contract;
pub mod logging;
pub mod pipeline;
pub mod symbol;
pub mod synth;

pub use contract::{
    ContractExtractor, ContractIdentity, ExtractError, ExtractResult, MethodDescriptor,
    WellKnownTypeNames, WellKnownTypes,
};
pub use logging::{
    default_log_level, init_logging, logging_status, LogTarget, LoggingConfig, LoggingError,
};
pub use pipeline::{generate, GeneratedContract, GenerationError};
pub use symbol::{
    Annotation, AnnotationValue, InterfaceCatalog, InterfaceSymbol, Member, MethodSymbol,
    NamedArgument, Parameter, PropertySymbol, SymbolError, SymbolModel, TypeRef,
};
pub use synth::{
    DeclarationSynthesizer, Face, Provenance, SynthesisError, SynthesisOptions,
    SynthesizedDeclaration,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
