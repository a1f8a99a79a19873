use opsynth_core::{
    generate, AnnotationValue, ExtractError, Face, GenerationError, InterfaceCatalog,
    InterfaceSymbol, Provenance, SymbolError, SynthesisError, SynthesisOptions, TypeRef,
    WellKnownTypeNames,
};
use serde_json::json;

fn interfaces() -> Vec<InterfaceSymbol> {
    let value = json!([
        {
            "type": "Acme.Contracts.IAuditable",
            "members": [
                {
                    "kind": "method",
                    "name": "GetAuditTrailAsync",
                    "return_type": "System.Threading.Tasks.Task`1<System.Collections.Generic.List`1<System.String>>",
                    "parameters": [{ "name": "orderId", "type": "System.Guid" }],
                    "annotations": [
                        { "type": "System.ServiceModel.OperationContractAttribute" }
                    ]
                }
            ]
        },
        {
            "type": "Acme.Contracts.IOrderService",
            "base_interfaces": ["Acme.Contracts.IAuditable"],
            "members": [
                {
                    "kind": "property",
                    "name": "Endpoint",
                    "type": "System.String"
                },
                {
                    "kind": "method",
                    "name": "PlaceOrder",
                    "return_type": "System.Guid",
                    "parameters": [{ "name": "order", "type": "Acme.Contracts.Order" }],
                    "annotations": [
                        {
                            "type": "System.ServiceModel.OperationContractAttribute",
                            "named": [
                                { "name": "Action", "value": { "kind": "str", "value": "urn:place" } }
                            ]
                        },
                        {
                            "type": "System.ServiceModel.FaultContractAttribute",
                            "positional": [{ "kind": "type", "value": "Acme.Contracts.ValidationFault" }]
                        }
                    ]
                },
                {
                    "kind": "method",
                    "name": "PlaceOrderAsync",
                    "return_type": "System.Threading.Tasks.Task`1<System.Guid>",
                    "parameters": [{ "name": "order", "type": "Acme.Contracts.Order" }],
                    "annotations": [
                        {
                            "type": "System.ServiceModel.OperationContractAttribute",
                            "named": [
                                { "name": "AsyncPattern", "value": { "kind": "bool", "value": true } }
                            ]
                        }
                    ]
                },
                {
                    "kind": "method",
                    "name": "Dispose",
                    "return_type": "System.Void"
                }
            ]
        }
    ]);
    serde_json::from_value(value).expect("catalog fixture should deserialize")
}

fn catalog() -> InterfaceCatalog {
    InterfaceCatalog::new(interfaces(), WellKnownTypeNames::default().all())
        .expect("catalog should validate")
}

#[test]
fn generates_declarations_for_declared_and_inherited_operations() {
    let contract = generate(
        &catalog(),
        &TypeRef::named("Acme.Contracts.IOrderService"),
        &WellKnownTypeNames::default(),
        SynthesisOptions::default(),
        Provenance::new("opsynth", "0.1.0"),
    )
    .expect("generation should succeed");

    let names: Vec<&str> = contract
        .declarations
        .iter()
        .map(|d| d.name.as_str())
        .collect();
    assert_eq!(
        names,
        vec![
            "GetAuditTrail",
            "GetAuditTrailAsync",
            "PlaceOrder",
            "PlaceOrderAsync"
        ]
    );

    let audit = &contract.declarations[0];
    assert_eq!(
        audit.return_type.to_string(),
        "System.Collections.Generic.List`1<System.String>"
    );
    assert_eq!(audit.face, Face::Synchronous);

    let place_async = &contract.declarations[3];
    let marker = place_async
        .annotations
        .last()
        .expect("async declaration carries the contract marker");
    assert_eq!(
        marker.named_value("AsyncPattern"),
        Some(&AnnotationValue::Bool(true))
    );
    assert!(marker.named_value("Action").is_none());

    assert_eq!(
        contract.provenance_annotation.annotation_type,
        TypeRef::named("System.CodeDom.Compiler.GeneratedCodeAttribute")
    );
    assert_eq!(
        contract.provenance_annotation.positional,
        vec![
            AnnotationValue::Str("opsynth".to_string()),
            AnnotationValue::Str("0.1.0".to_string()),
        ]
    );
}

#[test]
fn missing_well_known_type_fails_before_extraction() {
    let catalog = InterfaceCatalog::new(
        interfaces(),
        [
            "System.ServiceModel.OperationContractAttribute",
            "System.Threading.Tasks.Task",
            "System.Threading.Tasks.Task`1",
        ],
    )
    .expect("catalog should validate");

    let err = generate(
        &catalog,
        &TypeRef::named("Acme.Contracts.IOrderService"),
        &WellKnownTypeNames::default(),
        SynthesisOptions::default(),
        Provenance::new("opsynth", "0.1.0"),
    )
    .expect_err("unresolved fault marker must fail");
    assert_eq!(
        err,
        GenerationError::Symbol(SymbolError::UnresolvedType(
            "System.ServiceModel.FaultContractAttribute".to_string()
        ))
    );
}

#[test]
fn malformed_future_aborts_the_batch() {
    let mut interfaces = interfaces();
    let broken: InterfaceSymbol = serde_json::from_value(json!({
        "type": "Acme.Contracts.IBroken",
        "members": [
            {
                "kind": "method",
                "name": "Good",
                "annotations": [{ "type": "System.ServiceModel.OperationContractAttribute" }]
            },
            {
                "kind": "method",
                "name": "BadAsync",
                "return_type": "System.Threading.Tasks.Task`1",
                "annotations": [{ "type": "System.ServiceModel.OperationContractAttribute" }]
            }
        ]
    }))
    .expect("broken fixture should deserialize");
    interfaces.push(broken);
    let catalog = InterfaceCatalog::new(interfaces, WellKnownTypeNames::default().all())
        .expect("catalog should validate");

    let err = generate(
        &catalog,
        &TypeRef::named("Acme.Contracts.IBroken"),
        &WellKnownTypeNames::default(),
        SynthesisOptions::default(),
        Provenance::new("opsynth", "0.1.0"),
    )
    .expect_err("malformed future must fail");
    assert!(matches!(
        err,
        GenerationError::Extract(ExtractError::MalformedFutureType { .. })
    ));
}

#[test]
fn duplicate_faces_surface_as_synthesis_error() {
    let mut interfaces = interfaces();
    let duplicated: InterfaceSymbol = serde_json::from_value(json!({
        "type": "Acme.Contracts.IDuplicated",
        "base_interfaces": ["Acme.Contracts.IAuditable"],
        "members": [
            {
                "kind": "method",
                "name": "GetAuditTrailAsync",
                "return_type": "System.Threading.Tasks.Task`1<System.Collections.Generic.List`1<System.String>>",
                "parameters": [{ "name": "id", "type": "System.Guid" }],
                "annotations": [{ "type": "System.ServiceModel.OperationContractAttribute" }]
            }
        ]
    }))
    .expect("duplicated fixture should deserialize");
    interfaces.push(duplicated);
    let catalog = InterfaceCatalog::new(interfaces, WellKnownTypeNames::default().all())
        .expect("catalog should validate");

    let err = generate(
        &catalog,
        &TypeRef::named("Acme.Contracts.IDuplicated"),
        &WellKnownTypeNames::default(),
        SynthesisOptions::default(),
        Provenance::new("opsynth", "0.1.0"),
    )
    .expect_err("duplicate async faces must fail");
    assert!(matches!(
        err,
        GenerationError::Synthesis(SynthesisError::AmbiguousOperation {
            face: Face::Asynchronous,
            ..
        })
    ));
}

#[test]
fn generated_contract_serializes_with_stable_field_names() {
    let contract = generate(
        &catalog(),
        &TypeRef::named("Acme.Contracts.IAuditable"),
        &WellKnownTypeNames::default(),
        SynthesisOptions::default(),
        Provenance::new("opsynth", "0.1.0"),
    )
    .expect("generation should succeed");

    let json = serde_json::to_value(&contract).expect("serialize");
    assert_eq!(json["interface"], "Acme.Contracts.IAuditable");
    assert_eq!(json["declarations"][0]["name"], "GetAuditTrail");
    assert_eq!(json["declarations"][0]["face"], "synchronous");
    assert_eq!(
        json["declarations"][1]["return_type"],
        "System.Threading.Tasks.Task`1<System.Collections.Generic.List`1<System.String>>"
    );
    assert_eq!(json["declarations"][1]["parameters"][0]["type"], "System.Guid");
}
