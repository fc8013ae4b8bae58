//! Category filtering combined with search ranking.

use mhhs_model::{CategoryFilter, Interface, SupplierType};

use crate::index::SearchIndex;

/// Returns true if an interface with `supplier` passes `filter`.
///
/// Two-way interfaces satisfy either directional filter.
pub fn matches_category(filter: CategoryFilter, supplier: SupplierType) -> bool {
    match filter {
        CategoryFilter::All => true,
        CategoryFilter::Supplier(wanted) => {
            supplier == wanted
                || (supplier == SupplierType::Both
                    && matches!(wanted, SupplierType::Send | SupplierType::Receive))
        }
    }
}

/// Category filter first, then rank the survivors by `query`.
pub fn apply<'a>(
    index: &SearchIndex,
    interfaces: &'a [Interface],
    filter: CategoryFilter,
    query: &str,
) -> Vec<&'a Interface> {
    let candidates = interfaces
        .iter()
        .filter(|interface| matches_category(filter, interface.supplier_type));
    index.rank(candidates, query)
}
