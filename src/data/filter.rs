use std::collections::BTreeSet;

use super::model::OrdersDataset;

// ---------------------------------------------------------------------------
// Filter selection: which values are included per dimension
// ---------------------------------------------------------------------------

/// The three multiselect states: an order is visible only when its segment,
/// category and order-date year are all in the corresponding set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSelection {
    pub segments: BTreeSet<String>,
    pub categories: BTreeSet<String>,
    pub years: BTreeSet<i32>,
}

impl FilterSelection {
    /// Selection with every observed value included (the initial UI state).
    pub fn all(dataset: &OrdersDataset) -> Self {
        FilterSelection {
            segments: dataset.segments.clone(),
            categories: dataset.categories.clone(),
            years: dataset.years.clone(),
        }
    }
}

/// Indices of orders passing all three inclusion filters, in file order.
///
/// An empty set on any dimension matches nothing: deselecting every value in
/// a multiselect is a valid state that hides all rows, not an implicit
/// "select all".
pub fn filtered_indices(dataset: &OrdersDataset, selection: &FilterSelection) -> Vec<usize> {
    dataset
        .orders
        .iter()
        .enumerate()
        .filter(|(_, order)| {
            selection.segments.contains(&order.segment)
                && selection.categories.contains(&order.category)
                && selection.years.contains(&order.year())
        })
        .map(|(i, _)| i)
        .collect()
}
