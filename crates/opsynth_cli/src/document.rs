//! Catalog document loading.
//!
//! # Invariants
//! - `references` defaults to the standard well-known names; documents that
//!   override `well_known` must list the overriding names themselves.

use opsynth_core::{
    GenerationError, InterfaceCatalog, InterfaceSymbol, SymbolError, SynthesisOptions, TypeRef,
    WellKnownTypeNames,
};
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// JSON input accepted by the CLI.
#[derive(Debug, Deserialize)]
pub struct CatalogDocument {
    /// Interface to generate for, unless overridden on the command line.
    #[serde(default)]
    pub target: Option<TypeRef>,
    pub interfaces: Vec<InterfaceSymbol>,
    /// Metadata names resolvable besides the interfaces themselves.
    #[serde(default = "standard_references")]
    pub references: Vec<String>,
    #[serde(default)]
    pub options: SynthesisOptions,
    #[serde(default)]
    pub well_known: WellKnownTypeNames,
}

impl CatalogDocument {
    /// Validates the interfaces and splits off the target and settings.
    pub fn into_catalog(
        self,
    ) -> Result<(InterfaceCatalog, Option<TypeRef>, DocumentSettings), CliError> {
        let catalog = InterfaceCatalog::new(self.interfaces, self.references)?;
        Ok((
            catalog,
            self.target,
            DocumentSettings {
                options: self.options,
                well_known: self.well_known,
            },
        ))
    }
}

/// Document-level settings that command-line switches may override.
#[derive(Debug, Clone)]
pub struct DocumentSettings {
    pub options: SynthesisOptions,
    pub well_known: WellKnownTypeNames,
}

fn standard_references() -> Vec<String> {
    WellKnownTypeNames::default()
        .all()
        .iter()
        .map(|name| name.to_string())
        .collect()
}

/// Reads and parses the document at `path`.
pub fn load_document(path: &Path) -> Result<CatalogDocument, CliError> {
    let raw = std::fs::read_to_string(path).map_err(|err| CliError::Io {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    serde_json::from_str(&raw).map_err(|err| CliError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

/// CLI failure, mapped to a non-zero exit code.
#[derive(Debug)]
pub enum CliError {
    Io { path: PathBuf, message: String },
    Parse { path: PathBuf, message: String },
    MissingTarget { available: Vec<String> },
    Symbol(SymbolError),
    Generation(GenerationError),
    Output(String),
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, message } => {
                write!(f, "failed to read `{}`: {message}", path.display())
            }
            Self::Parse { path, message } => {
                write!(f, "invalid catalog document `{}`: {message}", path.display())
            }
            Self::MissingTarget { available } => write!(
                f,
                "no target interface; pass --interface or set `target` in the document (available: {})",
                available.join(", ")
            ),
            Self::Symbol(err) => write!(f, "{err}"),
            Self::Generation(err) => write!(f, "{err}"),
            Self::Output(message) => write!(f, "failed to write output: {message}"),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Symbol(err) => Some(err),
            Self::Generation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SymbolError> for CliError {
    fn from(value: SymbolError) -> Self {
        Self::Symbol(value)
    }
}

impl From<GenerationError> for CliError {
    fn from(value: GenerationError) -> Self {
        Self::Generation(value)
    }
}

#[cfg(test)]
mod tests {
    use super::CatalogDocument;

    #[test]
    fn minimal_document_uses_defaults() {
        let document: CatalogDocument = serde_json::from_str(
            r#"{ "interfaces": [{ "type": "Acme.IService" }] }"#,
        )
        .expect("minimal document should parse");

        assert!(document.target.is_none());
        assert!(document.options.include_annotations);
        assert_eq!(document.references.len(), 5);

        let (catalog, _, _) = document.into_catalog().expect("catalog");
        assert_eq!(catalog.len(), 1);
    }
}
