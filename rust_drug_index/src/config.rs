//! Application configuration
//!
//! The configuration is a YAML file; every field has a default,
//! so an empty file (or no file) gives a working setup for the
//! pharmacy order table ("Data SDA.csv", Indonesian headers).
//!
//! ```yaml
//! data_path: orders.csv
//! columns:
//!   drug_name: Drug
//!   orderer: Ordered By
//! layout:
//!   x_spacing: 2.0
//! render:
//!   output_dir: diagrams
//! ```
//!

use std::io::Read;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::drug_index::LayoutConfig;
use crate::error::Result;

/// Names of the order table columns in the data source
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ColumnNames {
    pub drug_name: String,
    pub orderer: String,
    pub disease_category: String,
    pub order_date: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            drug_name: String::from("Nama Obat"),
            orderer: String::from("Nama Pemesan"),
            disease_category: String::from("Kategori Penyakit"),
            order_date: String::from("Tanggal Pesan"),
        }
    }
}

/// Settings for the tree diagrams
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    /// Directory diagrams are written to when no explicit
    /// destination is given
    pub output_dir: PathBuf,
    /// File name of the whole-tree diagram
    pub overview_file: String,
    /// Size of one layout unit in the image
    pub pixels_per_unit: f64,
    /// Drug whose subtree is drawn by the overview command
    pub sample_drug: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            overview_file: String::from("drug_index_overview.svg"),
            pixels_per_unit: 80.0,
            sample_drug: String::from("Paracetamol"),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// CSV file holding the order table
    pub data_path: PathBuf,
    pub columns: ColumnNames,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("Data SDA.csv"),
            columns: ColumnNames::default(),
            layout: LayoutConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

impl Config {
    /// Read the configuration from a byte source (e.g. the
    /// result of std::fs::File::open() on a yaml file)
    pub fn from_reader<R>(reader: R) -> Result<Self>
    where
        R: Read,
    {
        Ok(serde_yaml::from_reader(reader)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }
}
