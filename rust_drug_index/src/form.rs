//! The drug search form
//!
//! The form has a free-text drug name, a selector of known drug
//! names that fills in the text, a search trigger and a results
//! table. Each event is a plain function from input to output, so
//! any front end (terminal, GUI, web) can wire them up.
//!

use polars::prelude::*;

use crate::drug_index::DrugIndex;
use crate::error::{DrugIndexError, Result};
use crate::lookup::{lookup, LookupRow, PLACEHOLDER};

pub const ORDERER_COLUMN: &str = "Orderer";
pub const CATEGORY_COLUMN: &str = "Disease Category";
pub const DATE_COLUMN: &str = "Order Date";

/// Shown when the search is triggered with nothing to search for
pub const PROMPT_MESSAGE: &str = "Choose or type a drug name to search.";

/// What the results area shows after a search
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Orders(Vec<LookupRow>),
    Message(String),
}

impl SearchOutcome {
    /// The results table. A message is shown as a single row
    /// with the message in the first column.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let (orderer, category, date): (Vec<&str>, Vec<&str>, Vec<&str>) = match self {
            Self::Orders(rows) => (
                rows.iter().map(|r| r.orderer.as_str()).collect(),
                rows.iter().map(|r| r.disease_category.as_str()).collect(),
                rows.iter().map(|r| r.order_date.as_str()).collect(),
            ),
            Self::Message(message) => (vec![message.as_str()], vec![""], vec![""]),
        };
        let df = DataFrame::new(vec![
            Series::new(ORDERER_COLUMN, orderer),
            Series::new(CATEGORY_COLUMN, category),
            Series::new(DATE_COLUMN, date),
        ])?;
        Ok(df)
    }
}

/// Selector changed: the placeholder clears the text box,
/// anything else is copied into it
pub fn handle_dropdown_change(selection: &str) -> String {
    if selection == PLACEHOLDER {
        String::new()
    } else {
        String::from(selection)
    }
}

/// Search button pressed with the current text
pub fn handle_search_click(index: &DrugIndex, text: &str) -> SearchOutcome {
    match lookup(index, text) {
        Ok(rows) => SearchOutcome::Orders(rows),
        Err(DrugIndexError::EmptyKey) => SearchOutcome::Message(String::from(PROMPT_MESSAGE)),
        Err(e) => SearchOutcome::Message(format!("{e}.")),
    }
}

/// State of one open form
#[derive(Debug, Clone)]
pub struct FormState {
    choices: Vec<String>,
    text: String,
}

impl FormState {
    pub fn new(choices: Vec<String>) -> Self {
        Self {
            choices,
            text: String::new(),
        }
    }

    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: &str) {
        self.text = String::from(text);
    }

    /// Pick selector entry n; returns the new text, or None
    /// (text unchanged) if there is no such entry
    pub fn select(&mut self, n: usize) -> Option<&str> {
        let selection = self.choices.get(n)?;
        self.text = handle_dropdown_change(selection);
        Some(&self.text)
    }

    pub fn submit(&self, index: &DrugIndex) -> SearchOutcome {
        handle_search_click(index, &self.text)
    }
}
