//! Order records
//!
//! A RawOrderRow is what the data source hands over: every
//! field may be missing. An OrderRecord is the snapshot kept
//! inside the index once the row has been accepted.
//!

use serde::{Deserialize, Serialize};

/// One row of the order table, as read from the data source.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct RawOrderRow {
    /// Drug name as typed in the source (any case, any padding)
    pub drug_name: Option<String>,
    /// Name of the person who placed the order
    pub orderer: Option<String>,
    /// Disease category the drug was ordered for
    pub disease_category: Option<String>,
    /// Order date, kept as the source text
    pub order_date: Option<String>,
}

impl RawOrderRow {
    pub fn new(drug_name: &str, orderer: &str, disease_category: &str, order_date: &str) -> Self {
        Self {
            drug_name: Some(String::from(drug_name)),
            orderer: Some(String::from(orderer)),
            disease_category: Some(String::from(disease_category)),
            order_date: Some(String::from(order_date)),
        }
    }
}

/// An accepted order, stored in the node for its drug.
///
/// Missing fields from the source row become empty
/// strings. The record is never modified after it has been
/// added to the index.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct OrderRecord {
    drug_name: String,
    orderer: String,
    disease_category: String,
    order_date: String,
}

impl OrderRecord {
    /// Snapshot a raw row. The drug name is the original
    /// spelling, not the normalized key.
    pub fn from_row(row: RawOrderRow) -> Self {
        Self {
            drug_name: row.drug_name.unwrap_or_default(),
            orderer: row.orderer.unwrap_or_default(),
            disease_category: row.disease_category.unwrap_or_default(),
            order_date: row.order_date.unwrap_or_default(),
        }
    }

    pub fn drug_name(&self) -> &str {
        &self.drug_name
    }

    pub fn orderer(&self) -> &str {
        &self.orderer
    }

    pub fn disease_category(&self) -> &str {
        &self.disease_category
    }

    pub fn order_date(&self) -> &str {
        &self.order_date
    }
}
