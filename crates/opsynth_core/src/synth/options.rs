//! Synthesis switches.

use serde::{Deserialize, Serialize};

/// Switches controlling which declarations are emitted and how.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisOptions {
    /// Attach merged annotations to every declaration.
    pub include_annotations: bool,
    /// Reserved; native synchronous declarations are always emitted.
    pub include_source_synchronous_declarations: bool,
    /// Skip every asynchronous declaration.
    pub exclude_asynchronous_declarations: bool,
}

impl Default for SynthesisOptions {
    fn default() -> Self {
        Self {
            include_annotations: true,
            include_source_synchronous_declarations: true,
            exclude_asynchronous_declarations: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SynthesisOptions;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let options: SynthesisOptions =
            serde_json::from_str(r#"{"exclude_asynchronous_declarations": true}"#)
                .expect("partial options should deserialize");
        assert!(options.include_annotations);
        assert!(options.include_source_synchronous_declarations);
        assert!(options.exclude_asynchronous_declarations);
    }
}
