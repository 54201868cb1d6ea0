//! Synthetic pharmacy orders
//!
//! Generates order rows in the shape of the pharmacy order
//! table, for tests and demos. The data is reproducible from a
//! global seed, and every column is drawn from its own generator
//! (see seeded_rng), so that changing how one column is made does
//! not change the others.
//!
//! The drug name column is deliberately dirty: names come in
//! mixed case, with stray surrounding whitespace, and a small
//! fraction are blank or missing.
//!

use chrono::{Days, NaiveDate};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::record::RawOrderRow;
use crate::seeded_rng::make_rng;

const DRUG_NAMES: &[&str] = &[
    "Paracetamol",
    "Amoxicillin",
    "Ibuprofen",
    "Cetirizine",
    "Omeprazole",
    "Metformin",
    "Amlodipine",
    "Salbutamol",
    "Asam Mefenamat",
    "Ambroxol",
    "Loratadine",
    "Dexamethasone",
    "Ciprofloxacin",
    "Vitamin C",
    "Antasida Doen",
    "Captopril",
];

const ORDERERS: &[&str] = &[
    "Ana", "Budi", "Citra", "Dewi", "Eko", "Fajar", "Gita", "Hadi", "Indah", "Joko", "Kartika",
    "Lestari",
];

const DISEASE_CATEGORIES: &[&str] = &[
    "Flu",
    "Demam",
    "Infeksi",
    "Nyeri",
    "Alergi",
    "Maag",
    "Diabetes",
    "Hipertensi",
    "Asma",
];

/// Pick a drug name and spell it the way a person filling in
/// the order form might (None or blank roughly one time in 25)
fn make_drug_name(rng: &mut ChaCha8Rng) -> Option<String> {
    if rng.gen_range(0..25) == 0 {
        return if rng.gen() { None } else { Some(String::from("  ")) };
    }
    let name = DRUG_NAMES[rng.gen_range(0..DRUG_NAMES.len())];
    let spelled = match rng.gen_range(0..4) {
        0 => name.to_lowercase(),
        1 => name.to_uppercase(),
        _ => String::from(name),
    };
    if rng.gen_range(0..5) == 0 {
        Some(format!(" {spelled}  "))
    } else {
        Some(spelled)
    }
}

fn pick(rng: &mut ChaCha8Rng, choices: &[&str]) -> Option<String> {
    choices.choose(rng).map(|s| String::from(*s))
}

/// Order date at any point in 2024, formatted YYYY-MM-DD
fn make_order_date(rng: &mut ChaCha8Rng) -> Option<String> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1)?;
    let date = start.checked_add_days(Days::new(rng.gen_range(0..366)))?;
    Some(date.format("%Y-%m-%d").to_string())
}

/// Make num_rows synthetic order rows from a global seed
pub fn make_orders(global_seed: u64, num_rows: usize) -> Vec<RawOrderRow> {
    let mut drug_rng = make_rng(global_seed, "drug_name");
    let mut orderer_rng = make_rng(global_seed, "orderer");
    let mut category_rng = make_rng(global_seed, "disease_category");
    let mut date_rng = make_rng(global_seed, "order_date");

    (0..num_rows)
        .map(|_| RawOrderRow {
            drug_name: make_drug_name(&mut drug_rng),
            orderer: pick(&mut orderer_rng, ORDERERS),
            disease_category: pick(&mut category_rng, DISEASE_CATEGORIES),
            order_date: make_order_date(&mut date_rng),
        })
        .collect()
}
