//! Normalized view of one contract operation member.
//!
//! # Invariants
//! - A descriptor is immutable after construction.
//! - `contract_annotation` never carries the pairing-mode property.
//! - `logical_return_type` is `System.Void` iff `returns_void_logically`.

use crate::contract::conventions::{WellKnownTypes, ASYNC_SUFFIX, PAIRING_MODE_PROPERTY};
use crate::contract::{ExtractError, ExtractResult};
use crate::symbol::{Annotation, MethodSymbol, Parameter, TypeRef};
use serde::Serialize;

/// Identity shared by the synchronous and asynchronous face of an operation.
///
/// Parameter names do not take part; parameter types do, in order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ContractIdentity {
    pub logical_name: String,
    pub logical_return_type: TypeRef,
    pub parameter_types: Vec<TypeRef>,
}

/// One contract-annotated method, normalized for synthesis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodDescriptor {
    declared_name: String,
    logical_name: String,
    is_asynchronous: bool,
    returns_void_logically: bool,
    logical_return_type: TypeRef,
    async_return_type: TypeRef,
    parameters: Vec<Parameter>,
    contract_annotation: Annotation,
    fault_annotations: Vec<Annotation>,
    other_annotations: Vec<Annotation>,
}

impl MethodDescriptor {
    /// Builds the descriptor for `method`.
    ///
    /// # Errors
    /// - `MissingContractMarker` when `method` lacks the contract marker.
    /// - `MalformedFutureType` when a future-of-T return has no single argument
    ///   or its argument is `System.Void`.
    /// - `EmptyLogicalName` when stripping the async suffix leaves no name.
    /// - `Symbol` when the future-of-T definition cannot be constructed.
    pub fn from_method(method: &MethodSymbol, types: &WellKnownTypes) -> ExtractResult<Self> {
        let marker = method.annotation(&types.contract_marker).ok_or_else(|| {
            ExtractError::MissingContractMarker {
                method: method.name.clone(),
                marker: types.contract_marker.to_string(),
            }
        })?;

        let return_type = &method.return_type;
        let is_asynchronous = types.is_asynchronous(return_type);
        let returns_void_logically =
            method.returns_void() || types.is_no_result_future(return_type);

        let logical_return_type = if !is_asynchronous {
            return_type.clone()
        } else if returns_void_logically {
            TypeRef::void()
        } else {
            match return_type.single_type_argument() {
                Some(result) if !result.is_void() => result.clone(),
                _ => {
                    return Err(ExtractError::MalformedFutureType {
                        method: method.name.clone(),
                        return_type: return_type.to_string(),
                    })
                }
            }
        };

        let async_return_type = if returns_void_logically {
            types.no_result_future.clone()
        } else {
            types
                .future_of_t
                .construct(vec![logical_return_type.clone()])?
        };

        let logical_name = if is_asynchronous {
            strip_async_suffix(&method.name)
        } else {
            method.name.as_str()
        };
        if logical_name.is_empty() {
            return Err(ExtractError::EmptyLogicalName {
                method: method.name.clone(),
            });
        }

        let fault_annotations = method
            .annotations()
            .iter()
            .filter(|attr| attr.is_of_type(&types.fault_marker))
            .cloned()
            .collect();
        let other_annotations = method
            .annotations()
            .iter()
            .filter(|attr| {
                !attr.is_of_type(&types.contract_marker) && !attr.is_of_type(&types.fault_marker)
            })
            .cloned()
            .collect();

        Ok(Self {
            declared_name: method.name.clone(),
            logical_name: logical_name.to_string(),
            is_asynchronous,
            returns_void_logically,
            logical_return_type,
            async_return_type,
            parameters: method.parameters.clone(),
            contract_annotation: marker.without_named(PAIRING_MODE_PROPERTY),
            fault_annotations,
            other_annotations,
        })
    }

    pub fn declared_name(&self) -> &str {
        &self.declared_name
    }

    pub fn logical_name(&self) -> &str {
        &self.logical_name
    }

    pub fn is_asynchronous(&self) -> bool {
        self.is_asynchronous
    }

    pub fn returns_void_logically(&self) -> bool {
        self.returns_void_logically
    }

    pub fn logical_return_type(&self) -> &TypeRef {
        &self.logical_return_type
    }

    pub fn async_return_type(&self) -> &TypeRef {
        &self.async_return_type
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn contract_annotation(&self) -> &Annotation {
        &self.contract_annotation
    }

    pub fn fault_annotations(&self) -> &[Annotation] {
        &self.fault_annotations
    }

    pub fn other_annotations(&self) -> &[Annotation] {
        &self.other_annotations
    }

    /// Other annotations, then fault annotations, then the contract marker.
    pub fn all_annotations(&self) -> impl Iterator<Item = &Annotation> {
        self.other_annotations
            .iter()
            .chain(self.fault_annotations.iter())
            .chain(std::iter::once(&self.contract_annotation))
    }

    pub fn contract_identity(&self) -> ContractIdentity {
        ContractIdentity {
            logical_name: self.logical_name.clone(),
            logical_return_type: self.logical_return_type.clone(),
            parameter_types: self.parameters.iter().map(|p| p.ty.clone()).collect(),
        }
    }

    /// Whether both descriptors describe the same logical operation.
    pub fn contract_matches(&self, other: &MethodDescriptor) -> bool {
        self.logical_name == other.logical_name
            && self.logical_return_type == other.logical_return_type
            && self.parameters.len() == other.parameters.len()
            && self
                .parameters
                .iter()
                .zip(&other.parameters)
                .all(|(left, right)| left.ty == right.ty)
    }
}

fn strip_async_suffix(name: &str) -> &str {
    name.strip_suffix(ASYNC_SUFFIX).unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::{strip_async_suffix, MethodDescriptor};
    use crate::contract::conventions::WellKnownTypes;
    use crate::contract::ExtractError;
    use crate::symbol::{Annotation, AnnotationValue, MethodSymbol, Parameter, TypeRef};

    fn contract_marker() -> Annotation {
        Annotation::new(TypeRef::named(
            "System.ServiceModel.OperationContractAttribute",
        ))
    }

    fn fault(detail: &str) -> Annotation {
        Annotation::new(TypeRef::named("System.ServiceModel.FaultContractAttribute"))
            .with_positional(AnnotationValue::Type(TypeRef::named(detail)))
    }

    #[test]
    fn strips_trailing_async_suffix() {
        assert_eq!(strip_async_suffix("GetAsync"), "Get");
        assert_eq!(strip_async_suffix("Get"), "Get");
        assert_eq!(strip_async_suffix("Async"), "");
    }

    #[test]
    fn bare_async_future_method_has_no_logical_name() {
        let types = WellKnownTypes::standard();
        let asynchronous =
            MethodSymbol::new("Async", TypeRef::named("System.Threading.Tasks.Task"))
                .with_annotation(contract_marker());
        let err = MethodDescriptor::from_method(&asynchronous, &types)
            .expect_err("empty logical name must be rejected");
        assert_eq!(
            err,
            ExtractError::EmptyLogicalName {
                method: "Async".to_string()
            }
        );

        let synchronous =
            MethodSymbol::new("Async", TypeRef::void()).with_annotation(contract_marker());
        let descriptor = MethodDescriptor::from_method(&synchronous, &types).expect("describe");
        assert_eq!(descriptor.logical_name(), "Async");
    }

    #[test]
    fn future_of_void_is_malformed() {
        let future: TypeRef = "System.Threading.Tasks.Task`1<System.Void>"
            .parse()
            .expect("parse");
        let method = MethodSymbol::new("GetAsync", future).with_annotation(contract_marker());
        let err = MethodDescriptor::from_method(&method, &WellKnownTypes::standard())
            .expect_err("future of void must be rejected");
        assert!(matches!(
            err,
            ExtractError::MalformedFutureType { ref method, .. } if method == "GetAsync"
        ));
    }

    #[test]
    fn synchronous_name_with_async_suffix_is_kept() {
        let method =
            MethodSymbol::new("LoadAsync", TypeRef::void()).with_annotation(contract_marker());
        let descriptor =
            MethodDescriptor::from_method(&method, &WellKnownTypes::standard()).expect("describe");

        assert!(!descriptor.is_asynchronous());
        assert_eq!(descriptor.logical_name(), "LoadAsync");
    }

    #[test]
    fn partitions_annotations_and_filters_pairing_mode() {
        let obsolete = Annotation::new(TypeRef::named("System.ObsoleteAttribute"));
        let method = MethodSymbol::new("Get", TypeRef::named("System.String"))
            .with_annotation(obsolete.clone())
            .with_annotation(
                contract_marker()
                    .with_named("AsyncPattern", AnnotationValue::Bool(false))
                    .with_named("IsOneWay", AnnotationValue::Bool(false)),
            )
            .with_annotation(fault("Acme.NotFound"));
        let descriptor =
            MethodDescriptor::from_method(&method, &WellKnownTypes::standard()).expect("describe");

        assert_eq!(descriptor.contract_annotation().named_value("AsyncPattern"), None);
        assert!(descriptor.contract_annotation().named_value("IsOneWay").is_some());
        assert_eq!(descriptor.fault_annotations(), &[fault("Acme.NotFound")]);
        assert_eq!(descriptor.other_annotations(), &[obsolete]);
        assert_eq!(descriptor.all_annotations().count(), 3);
    }

    #[test]
    fn malformed_future_is_a_configuration_error() {
        let method = MethodSymbol::new("GetAsync", TypeRef::named("System.Threading.Tasks.Task`1"))
            .with_annotation(contract_marker());
        let err = MethodDescriptor::from_method(&method, &WellKnownTypes::standard())
            .expect_err("unbound future must be rejected");
        assert!(matches!(err, ExtractError::MalformedFutureType { .. }));
    }

    #[test]
    fn contract_identity_ignores_parameter_names() {
        let types = WellKnownTypes::standard();
        let sync = MethodSymbol::new("Find", TypeRef::named("System.String"))
            .with_parameter(Parameter::new("id", TypeRef::named("System.Int32")))
            .with_annotation(contract_marker());
        let future: TypeRef = "System.Threading.Tasks.Task`1<System.String>"
            .parse()
            .expect("parse");
        let asynchronous = MethodSymbol::new("FindAsync", future)
            .with_parameter(Parameter::new("key", TypeRef::named("System.Int32")))
            .with_annotation(contract_marker());

        let left = MethodDescriptor::from_method(&sync, &types).expect("describe");
        let right = MethodDescriptor::from_method(&asynchronous, &types).expect("describe");
        assert!(left.contract_matches(&right));
        assert_eq!(left.contract_identity(), right.contract_identity());
    }
}
