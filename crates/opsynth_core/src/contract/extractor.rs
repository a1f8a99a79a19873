//! Contract member selection and batch description.

use crate::contract::conventions::WellKnownTypes;
use crate::contract::descriptor::MethodDescriptor;
use crate::contract::ExtractResult;
use crate::symbol::{Member, MethodSymbol, SymbolModel, TypeRef};
use log::{error, info};

/// Builds descriptors for the contract operations of one interface.
pub struct ContractExtractor<'t> {
    types: &'t WellKnownTypes,
}

impl<'t> ContractExtractor<'t> {
    pub fn new(types: &'t WellKnownTypes) -> Self {
        Self { types }
    }

    /// Methods of `members` carrying the contract marker, in member order.
    pub fn select_contract_methods<'m>(
        &self,
        members: &'m [Member],
    ) -> impl Iterator<Item = &'m MethodSymbol> + 'm
    where
        't: 'm,
    {
        let marker: &'m TypeRef = &self.types.contract_marker;
        members
            .iter()
            .filter_map(Member::as_method)
            .filter(move |method| method.annotation(marker).is_some())
    }

    /// Describes every contract operation of `interface`, inherited ones included.
    pub fn extract<M>(&self, model: &M, interface: &TypeRef) -> ExtractResult<Vec<MethodDescriptor>>
    where
        M: SymbolModel + ?Sized,
    {
        let members = model.all_members(interface)?;
        let result = self.describe_methods(self.select_contract_methods(&members));
        match &result {
            Ok(descriptors) => info!(
                "event=contract_extract module=extractor status=ok interface={} members={} operations={}",
                interface,
                members.len(),
                descriptors.len()
            ),
            Err(err) => error!(
                "event=contract_extract module=extractor status=error interface={} error={}",
                interface, err
            ),
        }
        result
    }

    /// Describes `methods` in order; the first failure aborts the batch.
    pub fn describe_methods<'m>(
        &self,
        methods: impl IntoIterator<Item = &'m MethodSymbol>,
    ) -> ExtractResult<Vec<MethodDescriptor>> {
        methods
            .into_iter()
            .map(|method| MethodDescriptor::from_method(method, self.types))
            .collect()
    }
}
