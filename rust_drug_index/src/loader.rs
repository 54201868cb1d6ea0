//! Reading and writing the order table
//!
//! The order table is a CSV file with a header row. It is read
//! with polars, with every column kept as a string (dates and
//! names are stored as typed). Rows are handed to the index as
//! RawOrderRows; a column missing from the file just leaves that
//! field empty in every row.
//!

use std::path::Path;

use polars::prelude::*;

use crate::config::ColumnNames;
use crate::error::Result;
use crate::record::RawOrderRow;

/// Read the order table into a dataframe of string columns
pub fn read_order_table(path: &Path) -> Result<DataFrame> {
    let df = CsvReader::from_path(path)?
        .has_header(true)
        .infer_schema(Some(0))
        .finish()?;
    Ok(df)
}

/// Get a string column from a polars dataframe, or None (with
/// a warning) if the table has no column with that name
fn optional_utf8_column<'a>(df: &'a DataFrame, column_name: &str) -> Result<Option<&'a Utf8Chunked>> {
    match df.column(column_name) {
        Ok(series) => Ok(Some(series.utf8()?)),
        Err(_) => {
            log::warn!("Order table has no column '{}'", column_name);
            Ok(None)
        }
    }
}

fn value_at(column: Option<&Utf8Chunked>, n: usize) -> Option<String> {
    column.and_then(|c| c.get(n)).map(String::from)
}

/// Convert the order table into rows, in table order
pub fn rows_from_dataframe(df: &DataFrame, columns: &ColumnNames) -> Result<Vec<RawOrderRow>> {
    let drug_name = optional_utf8_column(df, &columns.drug_name)?;
    let orderer = optional_utf8_column(df, &columns.orderer)?;
    let disease_category = optional_utf8_column(df, &columns.disease_category)?;
    let order_date = optional_utf8_column(df, &columns.order_date)?;

    Ok((0..df.height())
        .map(|n| RawOrderRow {
            drug_name: value_at(drug_name, n),
            orderer: value_at(orderer, n),
            disease_category: value_at(disease_category, n),
            order_date: value_at(order_date, n),
        })
        .collect())
}

/// Read all order rows from a CSV file
pub fn load_orders(path: &Path, columns: &ColumnNames) -> Result<Vec<RawOrderRow>> {
    let df = read_order_table(path)?;
    let rows = rows_from_dataframe(&df, columns)?;
    log::info!("Read {} order rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Put rows back into a dataframe with the configured column names
pub fn orders_to_dataframe(rows: &[RawOrderRow], columns: &ColumnNames) -> Result<DataFrame> {
    let drug_name: Vec<Option<&str>> = rows.iter().map(|r| r.drug_name.as_deref()).collect();
    let orderer: Vec<Option<&str>> = rows.iter().map(|r| r.orderer.as_deref()).collect();
    let disease_category: Vec<Option<&str>> =
        rows.iter().map(|r| r.disease_category.as_deref()).collect();
    let order_date: Vec<Option<&str>> = rows.iter().map(|r| r.order_date.as_deref()).collect();

    let df = DataFrame::new(vec![
        Series::new(&columns.drug_name, drug_name),
        Series::new(&columns.orderer, orderer),
        Series::new(&columns.disease_category, disease_category),
        Series::new(&columns.order_date, order_date),
    ])?;
    Ok(df)
}

/// Write rows as a CSV order table
pub fn save_orders(path: &Path, rows: &[RawOrderRow], columns: &ColumnNames) -> Result<()> {
    let mut df = orders_to_dataframe(rows, columns)?;
    let mut file = std::fs::File::create(path)?;
    CsvWriter::new(&mut file).has_header(true).finish(&mut df)?;
    log::info!("Wrote {} order rows to {}", rows.len(), path.display());
    Ok(())
}
