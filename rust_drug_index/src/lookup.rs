//! Lookups for the presentation layer
//!
//! The index returns whole nodes; the form only shows who ordered
//! the drug, for what, and when. The functions here do that
//! narrowing and report blank queries and misses as typed errors.
//!

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::drug_index::{title_case, DrugIndex};
use crate::error::{DrugIndexError, Result};
use crate::record::{OrderRecord, RawOrderRow};

/// Selector entry meaning "nothing chosen"
pub const PLACEHOLDER: &str = "-";

/// One line of a lookup result
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LookupRow {
    pub orderer: String,
    pub disease_category: String,
    pub order_date: String,
}

impl From<&OrderRecord> for LookupRow {
    fn from(record: &OrderRecord) -> Self {
        Self {
            orderer: String::from(record.orderer()),
            disease_category: String::from(record.disease_category()),
            order_date: String::from(record.order_date()),
        }
    }
}

/// Orders for a drug, in the order they were placed
///
/// A blank query (or the selector placeholder) is EmptyKey,
/// and a name with no node is NotFound, carrying the name as
/// displayed (trimmed and title-cased).
pub fn lookup(index: &DrugIndex, raw_query: &str) -> Result<Vec<LookupRow>> {
    let query = raw_query.trim();
    if query.is_empty() || query == PLACEHOLDER {
        return Err(DrugIndexError::EmptyKey);
    }
    match index.search(query) {
        Some(node) => Ok(node.records().iter().map(LookupRow::from).collect()),
        None => Err(DrugIndexError::NotFound {
            query: title_case(query),
        }),
    }
}

/// Choices for the drug selector: the placeholder followed by
/// every distinct drug name, trimmed, title-cased and sorted
pub fn selector_choices<'a, I>(rows: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a RawOrderRow>,
{
    let names: BTreeSet<String> = rows
        .into_iter()
        .filter_map(|row| row.drug_name.as_deref())
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(title_case)
        .collect();
    std::iter::once(String::from(PLACEHOLDER))
        .chain(names)
        .collect()
}

#[cfg(test)]
mod tests {

    use super::*;

    fn example_rows() -> Vec<RawOrderRow> {
        vec![
            RawOrderRow::new("Paracetamol", "Ana", "Flu", "2024-01-01"),
            RawOrderRow::new("paracetamol", "Budi", "Demam", "2024-01-02"),
            RawOrderRow::new("Amoxicillin", "Citra", "Infeksi", "2024-01-03"),
            RawOrderRow {
                drug_name: Some(String::from("   ")),
                orderer: Some(String::from("Dewi")),
                ..Default::default()
            },
        ]
    }

    #[test]
    fn found_drug_lists_orders_in_order() {
        let index = DrugIndex::from_rows(example_rows());
        let rows = lookup(&index, " PARACETAMOL").unwrap();
        assert_eq!(
            rows,
            vec![
                LookupRow {
                    orderer: String::from("Ana"),
                    disease_category: String::from("Flu"),
                    order_date: String::from("2024-01-01"),
                },
                LookupRow {
                    orderer: String::from("Budi"),
                    disease_category: String::from("Demam"),
                    order_date: String::from("2024-01-02"),
                },
            ]
        );
    }

    #[test]
    fn blank_and_placeholder_queries_are_empty_key() {
        let index = DrugIndex::from_rows(example_rows());
        assert!(matches!(lookup(&index, ""), Err(DrugIndexError::EmptyKey)));
        assert!(matches!(lookup(&index, "  "), Err(DrugIndexError::EmptyKey)));
        assert!(matches!(lookup(&index, " - "), Err(DrugIndexError::EmptyKey)));
    }

    #[test]
    fn unknown_drug_is_not_found() {
        let index = DrugIndex::from_rows(example_rows());
        match lookup(&index, "  ibuprofen ") {
            Err(DrugIndexError::NotFound { query }) => assert_eq!(query, "Ibuprofen"),
            other => panic!("expected NotFound, got {:?}", other),
        }
        let empty = DrugIndex::new();
        assert!(matches!(
            lookup(&empty, "paracetamol"),
            Err(DrugIndexError::NotFound { .. })
        ));
    }

    #[test]
    fn selector_choices_are_distinct_and_sorted() {
        let mut rows = example_rows();
        rows.push(RawOrderRow::new("  asam mefenamat", "Eko", "Nyeri", "2024-01-05"));
        let choices = selector_choices(&rows);
        assert_eq!(
            choices,
            vec!["-", "Amoxicillin", "Asam Mefenamat", "Paracetamol"]
        );
    }

    #[test]
    fn selector_of_empty_table_is_just_the_placeholder() {
        assert_eq!(selector_choices(&Vec::<RawOrderRow>::new()), vec!["-"]);
    }
}
