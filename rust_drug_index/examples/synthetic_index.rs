//! Example building the drug index from synthetic orders,
//! printing it as a text tree and drawing it as an SVG file
//!
use rust_drug_index::drug_index::descending_lines;
use rust_drug_index::form::handle_search_click;
use rust_drug_index::render::TreeRenderer;
use rust_drug_index::synth_orders::make_orders;
use rust_drug_index::{Config, DrugIndex};

fn main() -> Result<(), anyhow::Error> {
    let rows = make_orders(0, 200);
    let index = DrugIndex::from_rows(rows);

    for line in descending_lines(&index, index.root()) {
        println!("{line}");
    }

    let outcome = handle_search_click(&index, "  paracetamol ");
    println!("{}", outcome.to_dataframe()?);

    let config = Config::default();
    TreeRenderer::from_config(&config).render(
        &index,
        index.root(),
        std::path::Path::new("synthetic_index.svg"),
        "Synthetic drug index",
    )?;

    Ok(())
}
