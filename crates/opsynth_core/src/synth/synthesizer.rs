//! Declaration synthesis over a descriptor set.
//!
//! # Contract
//! - Traversal order is `logical_name` ordinal, synchronous before asynchronous.
//! - Per contract identity at most one synchronous and one asynchronous
//!   declaration is emitted, guarded by existence checks over the full set.
//! - Fault annotations of the paired face are merged into the synchronous
//!   declaration only.

use crate::contract::conventions::{ASYNC_SUFFIX, PAIRING_MODE_PROPERTY};
use crate::contract::{ContractIdentity, MethodDescriptor};
use crate::symbol::{Annotation, AnnotationValue};
use crate::synth::declaration::{Face, Provenance, SynthesizedDeclaration};
use crate::synth::options::SynthesisOptions;
use crate::synth::{SynthesisError, SynthesisResult};
use log::{debug, info, trace};
use std::collections::BTreeMap;

/// Turns descriptors into the canonical sync/async declaration set.
pub struct DeclarationSynthesizer {
    options: SynthesisOptions,
    provenance: Provenance,
}

impl DeclarationSynthesizer {
    pub fn new(options: SynthesisOptions, provenance: Provenance) -> Self {
        Self {
            options,
            provenance,
        }
    }

    pub fn options(&self) -> &SynthesisOptions {
        &self.options
    }

    /// Synthesizes the ordered declaration list for `descriptors`.
    ///
    /// # Errors
    /// - `AmbiguousOperation` when two descriptors share both contract
    ///   identity and face. Nothing is emitted in that case.
    pub fn synthesize(
        &self,
        descriptors: &[MethodDescriptor],
    ) -> SynthesisResult<Vec<SynthesizedDeclaration>> {
        reject_ambiguous_faces(descriptors)?;
        trace!(
            "event=synthesize_start module=synthesizer include_source_sync={} descriptors={}",
            self.options.include_source_synchronous_declarations,
            descriptors.len()
        );

        let mut ordered: Vec<&MethodDescriptor> = descriptors.iter().collect();
        ordered.sort_by(|left, right| {
            left.logical_name()
                .cmp(right.logical_name())
                .then(left.is_asynchronous().cmp(&right.is_asynchronous()))
        });

        let mut declarations = Vec::new();
        for descriptor in ordered {
            let has_native = |asynchronous: bool| {
                descriptors.iter().any(|other| {
                    other.contract_matches(descriptor) && other.is_asynchronous() == asynchronous
                })
            };

            if !descriptor.is_asynchronous() || !has_native(false) {
                declarations.push(self.synchronous_declaration(descriptor, descriptors));
            }

            if self.options.exclude_asynchronous_declarations {
                continue;
            }
            if descriptor.is_asynchronous() || !has_native(true) {
                declarations.push(self.asynchronous_declaration(descriptor));
            }
        }

        info!(
            "event=synthesize module=synthesizer status=ok descriptors={} declarations={} annotations={} exclude_async={}",
            descriptors.len(),
            declarations.len(),
            self.options.include_annotations,
            self.options.exclude_asynchronous_declarations
        );
        Ok(declarations)
    }

    fn synchronous_declaration(
        &self,
        descriptor: &MethodDescriptor,
        descriptors: &[MethodDescriptor],
    ) -> SynthesizedDeclaration {
        let mut annotations = Vec::new();
        if self.options.include_annotations {
            annotations.extend(descriptor.all_annotations().cloned());
            let paired = descriptors.iter().find(|other| {
                other.contract_matches(descriptor)
                    && other.is_asynchronous() != descriptor.is_asynchronous()
            });
            if let Some(paired) = paired {
                merge_missing(&mut annotations, paired.fault_annotations());
            }
        }

        debug!(
            "event=declaration_emit module=synthesizer face=sync name={} source={}",
            descriptor.logical_name(),
            descriptor.declared_name()
        );
        SynthesizedDeclaration {
            name: descriptor.logical_name().to_string(),
            return_type: descriptor.logical_return_type().clone(),
            parameters: descriptor.parameters().to_vec(),
            annotations,
            face: Face::Synchronous,
            provenance: self.provenance.clone(),
        }
    }

    fn asynchronous_declaration(&self, descriptor: &MethodDescriptor) -> SynthesizedDeclaration {
        let mut annotations = Vec::new();
        if self.options.include_annotations {
            annotations.extend(descriptor.other_annotations().iter().cloned());
            annotations.push(
                descriptor
                    .contract_annotation()
                    .with_named(PAIRING_MODE_PROPERTY, AnnotationValue::Bool(true)),
            );
        }

        let name = format!("{}{}", descriptor.logical_name(), ASYNC_SUFFIX);
        debug!(
            "event=declaration_emit module=synthesizer face=async name={} source={}",
            name,
            descriptor.declared_name()
        );
        SynthesizedDeclaration {
            name,
            return_type: descriptor.async_return_type().clone(),
            parameters: descriptor.parameters().to_vec(),
            annotations,
            face: Face::Asynchronous,
            provenance: self.provenance.clone(),
        }
    }
}

/// Appends each of `extra` not already present in `annotations`.
fn merge_missing(annotations: &mut Vec<Annotation>, extra: &[Annotation]) {
    for annotation in extra {
        if !annotations.contains(annotation) {
            annotations.push(annotation.clone());
        }
    }
}

fn reject_ambiguous_faces(descriptors: &[MethodDescriptor]) -> SynthesisResult<()> {
    let mut seen = BTreeMap::<(ContractIdentity, bool), &str>::new();
    for descriptor in descriptors {
        let key = (descriptor.contract_identity(), descriptor.is_asynchronous());
        if let Some(first) = seen.insert(key, descriptor.declared_name()) {
            return Err(SynthesisError::AmbiguousOperation {
                logical_name: descriptor.logical_name().to_string(),
                face: if descriptor.is_asynchronous() {
                    Face::Asynchronous
                } else {
                    Face::Synchronous
                },
                first: first.to_string(),
                second: descriptor.declared_name().to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{merge_missing, DeclarationSynthesizer};
    use crate::contract::conventions::WellKnownTypes;
    use crate::contract::MethodDescriptor;
    use crate::symbol::{Annotation, AnnotationValue, MethodSymbol, TypeRef};
    use crate::synth::{Face, Provenance, SynthesisError, SynthesisOptions};

    fn describe(name: &str, return_type: &str) -> MethodDescriptor {
        let method = MethodSymbol::new(name, return_type.parse().expect("type"))
            .with_annotation(Annotation::new(TypeRef::named(
                "System.ServiceModel.OperationContractAttribute",
            )));
        MethodDescriptor::from_method(&method, &WellKnownTypes::standard()).expect("describe")
    }

    fn synthesizer(options: SynthesisOptions) -> DeclarationSynthesizer {
        DeclarationSynthesizer::new(options, Provenance::new("opsynth", "0.1.0"))
    }

    #[test]
    fn merge_missing_skips_structural_duplicates() {
        let fault = Annotation::new(TypeRef::named("System.ServiceModel.FaultContractAttribute"))
            .with_positional(AnnotationValue::Type(TypeRef::named("Acme.Fault")));
        let mut annotations = vec![fault.clone()];
        merge_missing(&mut annotations, &[fault.clone(), fault]);
        assert_eq!(annotations.len(), 1);
    }

    #[test]
    fn sorts_by_logical_name_then_sync_first() {
        let descriptors = vec![
            describe("PutAsync", "System.Threading.Tasks.Task"),
            describe("Get", "System.String"),
            describe("Put", "System.Void"),
            describe("GetAsync", "System.Threading.Tasks.Task`1<System.String>"),
        ];
        let declarations = synthesizer(SynthesisOptions::default())
            .synthesize(&descriptors)
            .expect("synthesize");

        let names: Vec<&str> = declarations.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Get", "GetAsync", "Put", "PutAsync"]);
        assert_eq!(declarations[1].face, Face::Asynchronous);
    }

    #[test]
    fn rejects_two_descriptors_on_one_face() {
        let descriptors = vec![
            describe("Get", "System.String"),
            describe("Get", "System.String"),
        ];
        let err = synthesizer(SynthesisOptions::default())
            .synthesize(&descriptors)
            .expect_err("duplicate face must be rejected");
        assert_eq!(
            err,
            SynthesisError::AmbiguousOperation {
                logical_name: "Get".to_string(),
                face: Face::Synchronous,
                first: "Get".to_string(),
                second: "Get".to_string(),
            }
        );
    }

    #[test]
    fn annotations_off_yields_bare_declarations() {
        let options = SynthesisOptions {
            include_annotations: false,
            ..SynthesisOptions::default()
        };
        let declarations = synthesizer(options)
            .synthesize(&[describe("Ping", "System.Void")])
            .expect("synthesize");
        assert_eq!(declarations.len(), 2);
        assert!(declarations.iter().all(|d| d.annotations.is_empty()));
    }
}
