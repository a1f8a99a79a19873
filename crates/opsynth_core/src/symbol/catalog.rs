//! In-memory symbol model.
//!
//! # Invariants
//! - Interface names are unique within one catalog.
//! - Every base interface is itself part of the catalog.
//! - The inheritance graph is acyclic.

use crate::symbol::{
    Annotation, InterfaceSymbol, Member, SymbolError, SymbolModel, SymbolResult, TypeRef,
};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};

static IDENTIFIER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^@?[A-Za-z_][A-Za-z0-9_]*$").expect("valid identifier regex"));

/// Validated set of interfaces plus the other type names the host knows.
#[derive(Debug, Clone, Default)]
pub struct InterfaceCatalog {
    interfaces: BTreeMap<String, InterfaceSymbol>,
    known_types: BTreeSet<String>,
}

impl InterfaceCatalog {
    /// Builds a catalog after validating names and the inheritance graph.
    ///
    /// # Errors
    /// - `InvalidTypeName` / `TypeArityMismatch` for malformed type references.
    /// - `InvalidIdentifier` for malformed member or parameter names.
    /// - `DuplicateType` when two interfaces share a name.
    /// - `UnknownType` when a base interface is missing.
    /// - `InheritanceCycle` when an interface inherits from itself.
    pub fn new<I, S>(interfaces: Vec<InterfaceSymbol>, known_types: I) -> SymbolResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut by_name = BTreeMap::new();
        for interface in interfaces {
            validate_interface(&interface)?;
            let key = interface.type_ref.to_string();
            if by_name.contains_key(&key) {
                return Err(SymbolError::DuplicateType(key));
            }
            by_name.insert(key, interface);
        }

        for interface in by_name.values() {
            for base in &interface.base_interfaces {
                let key = base.to_string();
                if !by_name.contains_key(&key) {
                    return Err(SymbolError::UnknownType(key));
                }
            }
        }

        let catalog = Self {
            interfaces: by_name,
            known_types: known_types.into_iter().map(Into::into).collect(),
        };
        catalog.reject_cycles()?;

        debug!(
            "event=catalog_load module=symbol status=ok interfaces={} known_types={}",
            catalog.interfaces.len(),
            catalog.known_types.len()
        );
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.interfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interfaces.is_empty()
    }

    /// Returns interface names in ordinal order.
    pub fn interface_names(&self) -> Vec<String> {
        self.interfaces.keys().cloned().collect()
    }

    fn reject_cycles(&self) -> SymbolResult<()> {
        // 0 = unvisited, 1 = on stack, 2 = done
        let mut state = BTreeMap::<&str, u8>::new();
        for name in self.interfaces.keys() {
            self.visit_for_cycle(name, &mut state)?;
        }
        Ok(())
    }

    fn visit_for_cycle<'a>(
        &'a self,
        name: &'a str,
        state: &mut BTreeMap<&'a str, u8>,
    ) -> SymbolResult<()> {
        match state.get(name).copied().unwrap_or(0) {
            1 => return Err(SymbolError::InheritanceCycle(name.to_string())),
            2 => return Ok(()),
            _ => {}
        }
        state.insert(name, 1);
        if let Some((_, interface)) = self.interfaces.get_key_value(name) {
            for base in &interface.base_interfaces {
                if let Some((base_key, _)) = self.interfaces.get_key_value(&base.to_string()) {
                    self.visit_for_cycle(base_key, state)?;
                }
            }
        }
        state.insert(name, 2);
        Ok(())
    }

    fn collect_members(
        &self,
        interface: &InterfaceSymbol,
        visited: &mut BTreeSet<String>,
        out: &mut Vec<Member>,
    ) {
        out.extend(interface.members.iter().cloned());
        for base in &interface.base_interfaces {
            let key = base.to_string();
            if !visited.insert(key.clone()) {
                continue;
            }
            if let Some(base_interface) = self.interfaces.get(&key) {
                self.collect_members(base_interface, visited, out);
            }
        }
    }
}

impl SymbolModel for InterfaceCatalog {
    fn all_members(&self, ty: &TypeRef) -> SymbolResult<Vec<Member>> {
        let key = ty.to_string();
        let interface = self
            .interfaces
            .get(&key)
            .ok_or_else(|| SymbolError::UnknownType(key.clone()))?;

        let mut visited = BTreeSet::from([key]);
        let mut members = Vec::new();
        self.collect_members(interface, &mut visited, &mut members);
        Ok(members)
    }

    fn resolve_type(&self, metadata_name: &str) -> Option<TypeRef> {
        if self.known_types.contains(metadata_name) || self.interfaces.contains_key(metadata_name)
        {
            return Some(TypeRef::named(metadata_name));
        }
        None
    }
}

fn validate_interface(interface: &InterfaceSymbol) -> SymbolResult<()> {
    interface.type_ref.validate()?;
    for base in &interface.base_interfaces {
        base.validate()?;
    }
    for member in &interface.members {
        require_identifier(member.name())?;
        match member {
            Member::Method(method) => {
                method.return_type.validate()?;
                for parameter in &method.parameters {
                    require_identifier(&parameter.name)?;
                    parameter.ty.validate()?;
                }
                validate_annotations(&method.annotations)?;
            }
            Member::Property(property) => {
                property.ty.validate()?;
                validate_annotations(&property.annotations)?;
            }
        }
    }
    Ok(())
}

fn validate_annotations(annotations: &[Annotation]) -> SymbolResult<()> {
    annotations
        .iter()
        .try_for_each(|annotation| annotation.annotation_type.validate())
}

fn require_identifier(value: &str) -> SymbolResult<()> {
    if IDENTIFIER_RE.is_match(value) {
        Ok(())
    } else {
        Err(SymbolError::InvalidIdentifier(value.to_string()))
    }
}
