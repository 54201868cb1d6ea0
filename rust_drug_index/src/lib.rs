//! Index of pharmacy orders by drug name
//!
//! The core is the DrugIndex, a binary search tree keyed by the
//! normalized drug name, where each node holds every order for
//! that drug. Around it are the pieces needed to use it: loading
//! the order table, the search form handlers, a terminal text tree
//! and an SVG tree diagram.
//!

pub mod config;
pub mod drug_index;
pub mod error;
pub mod form;
pub mod loader;
pub mod lookup;
pub mod record;
pub mod render;
pub mod seeded_rng;
pub mod synth_orders;

pub use config::Config;
pub use drug_index::{DrugIndex, DrugKey, IndexNode, NodeId};
pub use error::{DrugIndexError, Result};
pub use record::{OrderRecord, RawOrderRow};
