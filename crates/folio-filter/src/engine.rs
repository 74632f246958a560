//! The narrowing passes and the derived year list.

use crate::criteria::{matches_search, FilterCriteria};
use folio_model::Publication;
use std::collections::BTreeSet;

/// Publications passing every predicate in `criteria`, in input order.
pub fn filter_publications(
    publications: &[Publication],
    criteria: &FilterCriteria,
) -> Vec<Publication> {
    if criteria.is_unfiltered() {
        return publications.to_vec();
    }

    let needle = criteria.search_term.to_lowercase();
    publications
        .iter()
        .filter(|p| matches_search(p, &needle))
        .filter(|p| criteria.year.matches(p.year))
        .filter(|p| criteria.kind.matches(p.kind))
        .cloned()
        .collect()
}

/// Filter by raw selector values, with `"all"` as the no-restriction sentinel.
pub fn filter(
    publications: &[Publication],
    search_term: &str,
    year_filter: &str,
    type_filter: &str,
) -> Vec<Publication> {
    filter_publications(publications, &FilterCriteria::new(search_term, year_filter, type_filter))
}

/// Distinct years present in the collection, newest first.
pub fn available_years(publications: &[Publication]) -> Vec<i32> {
    publications
        .iter()
        .map(|p| p.year)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .rev()
        .collect()
}
