//! Well-known metadata names and their resolved types.

use crate::symbol::{SymbolModel, SymbolResult, TypeRef};
use serde::{Deserialize, Serialize};

/// Default metadata name of the contract-marker annotation.
pub const CONTRACT_MARKER_NAME: &str = "System.ServiceModel.OperationContractAttribute";
/// Default metadata name of the declared-failure-mode annotation.
pub const FAULT_MARKER_NAME: &str = "System.ServiceModel.FaultContractAttribute";
/// Default metadata name of the no-result future.
pub const NO_RESULT_FUTURE_NAME: &str = "System.Threading.Tasks.Task";
/// Default metadata name of the future-of-T generic definition.
pub const FUTURE_OF_T_NAME: &str = "System.Threading.Tasks.Task`1";
/// Default metadata name of the code-generation provenance annotation.
pub const PROVENANCE_MARKER_NAME: &str = "System.CodeDom.Compiler.GeneratedCodeAttribute";

/// Naming suffix of asynchronous operations.
pub const ASYNC_SUFFIX: &str = "Async";
/// Contract-marker property flagging the asynchronous face of an operation.
pub const PAIRING_MODE_PROPERTY: &str = "AsyncPattern";

/// Metadata names the pipeline resolves before extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WellKnownTypeNames {
    pub contract_marker: String,
    pub fault_marker: String,
    pub no_result_future: String,
    pub future_of_t: String,
    pub provenance_marker: String,
}

impl Default for WellKnownTypeNames {
    fn default() -> Self {
        Self {
            contract_marker: CONTRACT_MARKER_NAME.to_string(),
            fault_marker: FAULT_MARKER_NAME.to_string(),
            no_result_future: NO_RESULT_FUTURE_NAME.to_string(),
            future_of_t: FUTURE_OF_T_NAME.to_string(),
            provenance_marker: PROVENANCE_MARKER_NAME.to_string(),
        }
    }
}

impl WellKnownTypeNames {
    /// Returns every configured name, in resolution order.
    pub fn all(&self) -> [&str; 5] {
        [
            self.contract_marker.as_str(),
            self.fault_marker.as_str(),
            self.no_result_future.as_str(),
            self.future_of_t.as_str(),
            self.provenance_marker.as_str(),
        ]
    }
}

/// Well-known types resolved against one symbol model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WellKnownTypes {
    pub contract_marker: TypeRef,
    pub fault_marker: TypeRef,
    pub no_result_future: TypeRef,
    pub future_of_t: TypeRef,
    pub provenance_marker: TypeRef,
}

impl WellKnownTypes {
    /// Resolves every name in `names`; the first missing one fails.
    pub fn resolve<M>(model: &M, names: &WellKnownTypeNames) -> SymbolResult<Self>
    where
        M: SymbolModel + ?Sized,
    {
        Ok(Self {
            contract_marker: model.require_type(&names.contract_marker)?,
            fault_marker: model.require_type(&names.fault_marker)?,
            no_result_future: model.require_type(&names.no_result_future)?,
            future_of_t: model.require_type(&names.future_of_t)?,
            provenance_marker: model.require_type(&names.provenance_marker)?,
        })
    }

    /// Default names, taken as-is without a symbol model.
    pub fn standard() -> Self {
        let names = WellKnownTypeNames::default();
        Self {
            contract_marker: TypeRef::named(names.contract_marker),
            fault_marker: TypeRef::named(names.fault_marker),
            no_result_future: TypeRef::named(names.no_result_future),
            future_of_t: TypeRef::named(names.future_of_t),
            provenance_marker: TypeRef::named(names.provenance_marker),
        }
    }

    /// Exactly the no-result future, or any construction of future-of-T.
    pub fn is_asynchronous(&self, ty: &TypeRef) -> bool {
        ty == &self.no_result_future
            || (ty.is_generic() && ty.unbound() == self.future_of_t.unbound())
    }

    pub fn is_no_result_future(&self, ty: &TypeRef) -> bool {
        ty == &self.no_result_future
    }
}
