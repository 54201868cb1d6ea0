//! Command line front end for the drug order index
//!
//! Loads the order table, builds the index once, and then runs
//! one command against it: a lookup, the list of drug names, the
//! text tree, an SVG diagram, or the interactive search form.
//!

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};

use rust_drug_index::drug_index::{descending_lines, title_case};
use rust_drug_index::error::DrugIndexError;
use rust_drug_index::form::{handle_search_click, FormState, SearchOutcome};
use rust_drug_index::loader::{load_orders, save_orders};
use rust_drug_index::lookup::selector_choices;
use rust_drug_index::render::TreeRenderer;
use rust_drug_index::synth_orders::make_orders;
use rust_drug_index::{Config, DrugIndex, NodeId, RawOrderRow};

#[derive(Parser)]
#[command(name = "drug_search", version, about = "Search pharmacy orders by drug name")]
struct Cli {
    /// YAML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Order table (CSV); overrides data_path from the configuration
    #[arg(long)]
    data: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the orders for one drug
    Lookup { name: String },
    /// List the drug names offered by the form selector
    Drugs,
    /// Print the index as a text tree, greatest name first
    Tree {
        /// Only print the subtree rooted at this drug
        #[arg(long)]
        subtree: Option<String>,
    },
    /// Draw the index as an SVG diagram
    Render {
        /// Only draw the subtree rooted at this drug
        #[arg(long)]
        subtree: Option<String>,
        #[arg(long)]
        out: Option<PathBuf>,
        #[arg(long)]
        title: Option<String>,
    },
    /// Interactive search form on the terminal
    Form,
    /// Print the tree, draw the whole tree, and draw the subtree
    /// of the configured sample drug
    Overview,
    /// Write a synthetic order table
    Synth {
        #[arg(long, default_value_t = 200)]
        rows: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value = "synthetic_orders.csv")]
        out: PathBuf,
    },
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_path(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(data) = &cli.data {
        config.data_path = data.clone();
    }
    Ok(config)
}

/// Read the order table. A table that cannot be read gives an
/// empty index rather than stopping the program.
fn load_rows(config: &Config) -> Vec<RawOrderRow> {
    match load_orders(&config.data_path, &config.columns) {
        Ok(rows) => rows,
        Err(e) => {
            log::error!(
                "Could not read order table {}: {}; continuing with an empty index",
                config.data_path.display(),
                e
            );
            Vec::new()
        }
    }
}

/// File name for the diagram of a drug's subtree
fn subtree_file_name(drug: &str) -> String {
    format!("subtree_{}.svg", drug.trim().to_lowercase().replace(' ', "_"))
}

/// Resolve --subtree: no name means the whole tree, and a name
/// missing from the index is NotFound
fn resolve_subtree(index: &DrugIndex, subtree: Option<&str>) -> Result<Option<NodeId>, DrugIndexError> {
    match subtree {
        None => Ok(index.root()),
        Some(name) => index
            .search_id(name)
            .map(Some)
            .ok_or_else(|| DrugIndexError::NotFound {
                query: title_case(name.trim()),
            }),
    }
}

fn print_tree(index: &DrugIndex, subtree: Option<NodeId>) {
    let lines = descending_lines(index, subtree);
    if lines.is_empty() {
        println!("The drug index is empty.");
    }
    for line in lines {
        println!("{line}");
    }
}

/// Draw a diagram; a failure is logged and does not stop the program
fn render_and_log(renderer: &TreeRenderer, index: &DrugIndex, subtree: Option<NodeId>, out: &Path, title: &str) {
    if let Err(e) = renderer.render(index, subtree, out, title) {
        log::error!("Could not draw '{}': {}", title, e);
    }
}

fn print_outcome(outcome: &SearchOutcome) -> anyhow::Result<()> {
    let df = outcome
        .to_dataframe()
        .context("Failed to build results table")?;
    println!("{df}");
    Ok(())
}

fn print_choices(form: &FormState) {
    for (n, choice) in form.choices().iter().enumerate() {
        println!("  {n:>3}  {choice}");
    }
}

/// The search form, driven from stdin:
/// * `:pick N` picks selector entry N into the text box
/// * `:list` shows the selector entries
/// * an empty line searches for the text in the box
/// * any other line is typed into the box and searched
/// * `:quit` leaves
fn run_form(index: &DrugIndex, choices: Vec<String>) -> anyhow::Result<()> {
    let mut form = FormState::new(choices);
    println!("Drug order search. Type a drug name, or :pick N to choose from the list.");
    print_choices(&form);

    let stdin = io::stdin();
    loop {
        print!("drug [{}]> ", form.text());
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();

        if input == ":quit" || input == ":q" {
            break;
        } else if input == ":list" {
            print_choices(&form);
        } else if let Some(n) = input.strip_prefix(":pick") {
            match n.trim().parse::<usize>().ok().and_then(|n| form.select(n)) {
                Some(text) => println!("Drug name: {text}"),
                None => println!("No such entry: {}", n.trim()),
            }
        } else {
            if !input.is_empty() {
                form.set_text(input);
            }
            print_outcome(&form.submit(index))?;
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    if let Command::Synth { rows, seed, out } = &cli.command {
        let orders = make_orders(*seed, *rows);
        save_orders(out, &orders, &config.columns)
            .with_context(|| format!("Failed to write synthetic orders to {}", out.display()))?;
        return Ok(());
    }

    let rows = load_rows(&config);
    let choices = selector_choices(&rows);
    let index = DrugIndex::from_rows(rows);
    let renderer = TreeRenderer::from_config(&config);

    match &cli.command {
        Command::Lookup { name } => print_outcome(&handle_search_click(&index, name))?,
        Command::Drugs => {
            for choice in choices.iter().skip(1) {
                println!("{choice}");
            }
        }
        Command::Tree { subtree } => match resolve_subtree(&index, subtree.as_deref()) {
            Ok(id) => print_tree(&index, id),
            Err(e) => println!("{e}."),
        },
        Command::Render { subtree, out, title } => match resolve_subtree(&index, subtree.as_deref()) {
            Ok(id) => {
                let (default_file, default_title) = match subtree {
                    Some(name) => (subtree_file_name(name), format!("Subtree: {}", title_case(name.trim()))),
                    None => (config.render.overview_file.clone(), String::from("Drug index")),
                };
                let out = out
                    .clone()
                    .unwrap_or_else(|| config.render.output_dir.join(default_file));
                let title = title.clone().unwrap_or(default_title);
                render_and_log(&renderer, &index, id, &out, &title);
            }
            Err(e) => println!("{e}."),
        },
        Command::Form => run_form(&index, choices)?,
        Command::Overview => {
            println!("--- Drug index (greatest name first) ---");
            print_tree(&index, index.root());

            let out = config.render.output_dir.join(&config.render.overview_file);
            render_and_log(&renderer, &index, index.root(), &out, "Drug index");

            let sample = &config.render.sample_drug;
            match index.search_id(sample) {
                Some(id) => {
                    println!("\n--- Subtree of '{}' ---", title_case(sample.trim()));
                    print_tree(&index, Some(id));
                    let out = config.render.output_dir.join(subtree_file_name(sample));
                    let title = format!("Subtree: {}", title_case(sample.trim()));
                    render_and_log(&renderer, &index, Some(id), &out, &title);
                }
                None => println!("Drug '{}' not found in the index.", title_case(sample.trim())),
            }
        }
        Command::Synth { .. } => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn subtree_file_names_are_lowercase_with_underscores() {
        assert_eq!(subtree_file_name(" Asam Mefenamat "), "subtree_asam_mefenamat.svg");
    }

    #[test]
    fn resolve_subtree_reports_unknown_drugs() {
        let index = DrugIndex::from_rows(vec![RawOrderRow::new("Paracetamol", "Ana", "Flu", "2024-01-01")]);
        assert_eq!(resolve_subtree(&index, None).unwrap(), index.root());
        assert_eq!(resolve_subtree(&index, Some("PARACETAMOL")).unwrap(), index.root());
        match resolve_subtree(&index, Some(" ibuprofen ")) {
            Err(e @ DrugIndexError::NotFound { .. }) => {
                assert_eq!(e.to_string(), "Drug 'Ibuprofen' not found")
            }
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn cli_parses_render_options() {
        let cli = Cli::parse_from([
            "drug_search",
            "--data",
            "orders.csv",
            "render",
            "--subtree",
            "Paracetamol",
            "--out",
            "tree.svg",
        ]);
        let config = load_config(&cli).unwrap();
        assert_eq!(config.data_path, PathBuf::from("orders.csv"));
        match cli.command {
            Command::Render { subtree, out, title } => {
                assert_eq!(subtree.as_deref(), Some("Paracetamol"));
                assert_eq!(out, Some(PathBuf::from("tree.svg")));
                assert_eq!(title, None);
            }
            _ => panic!("expected render command"),
        }
    }
}
