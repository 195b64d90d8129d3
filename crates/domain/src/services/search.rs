//! Merging of per-predicate search results.
//!
//! A search runs one query per supplied predicate. The row sets are pooled,
//! de-duplicated and then narrowed by every predicate in turn, so a row
//! survives only if it satisfies all of them.

use std::collections::HashSet;

use crate::models::{ClientPhoneRow, SearchPredicate};

/// Union the per-predicate batches, drop duplicate rows and keep only rows
/// matching every predicate.
///
/// The result is ordered by client id, then phone number.
pub fn merge_search_results(
    predicates: &[SearchPredicate],
    batches: Vec<Vec<ClientPhoneRow>>,
) -> Vec<ClientPhoneRow> {
    let mut seen = HashSet::new();
    let mut pool: Vec<ClientPhoneRow> = batches
        .into_iter()
        .flatten()
        .filter(|row| seen.insert(row.clone()))
        .collect();

    for predicate in predicates {
        pool.retain(|row| predicate.matches(row));
    }

    pool.sort_by(|a, b| (a.client_id, a.phone_number).cmp(&(b.client_id, b.phone_number)));
    pool
}
