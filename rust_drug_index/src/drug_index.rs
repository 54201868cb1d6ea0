//! Binary search tree of pharmacy orders keyed by drug name
//!
//! Each node holds one normalized drug name and every order
//! placed for that drug, in the order the orders were inserted.
//! The tree is never rebalanced and nothing is ever removed
//! from it, so its shape depends only on the order in which
//! each distinct drug name first appears in the input.
//!
//! Nodes live in an arena (a Vec) and refer to their children
//! by NodeId. Insertion, search and both traversals use explicit
//! loops/stacks, so a degenerate tree (sorted input) cannot
//! exhaust the call stack.
//!

use std::cmp::Ordering;

pub use key::{title_case, DrugKey};
pub use layout::{Bounds, Layout, LayoutConfig, Point};
pub use text_tree::descending_lines;

use crate::record::{OrderRecord, RawOrderRow};

mod key;
mod layout;
mod text_tree;

/// Reference to a node in a DrugIndex
#[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Clone, Copy, Hash)]
pub struct NodeId(usize);

/// One node of the index: a drug and all of its orders
#[derive(Debug)]
pub struct IndexNode {
    /// Normalized drug name; unique in the tree
    key: DrugKey,
    /// Orders for this drug, in insertion order
    records: Vec<OrderRecord>,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

impl IndexNode {
    fn new(key: DrugKey, record: OrderRecord) -> Self {
        Self {
            key,
            records: vec![record],
            left: None,
            right: None,
        }
    }

    pub fn key(&self) -> &DrugKey {
        &self.key
    }

    pub fn records(&self) -> &[OrderRecord] {
        &self.records
    }

    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    pub fn right(&self) -> Option<NodeId> {
        self.right
    }
}

/// The drug index
///
/// Build it once from the full record source with
/// from_rows (or repeated insert), then pass it by
/// reference to whatever needs to look things up or
/// draw it.
#[derive(Debug, Default)]
pub struct DrugIndex {
    nodes: Vec<IndexNode>,
    root: Option<NodeId>,
}

impl DrugIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index by inserting every row in order
    ///
    /// Rows without a usable drug name are skipped; they
    /// never stop the build.
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = RawOrderRow>,
    {
        let mut index = Self::new();
        let mut seen = 0usize;
        let mut skipped = 0usize;
        for row in rows {
            seen += 1;
            if index.insert(row).is_none() {
                skipped += 1;
            }
        }
        log::info!(
            "Built drug index: {} rows, {} skipped, {} drugs, height {}",
            seen,
            skipped,
            index.len(),
            index.height(index.root)
        );
        index
    }

    /// Insert one row, returning the node that now holds it
    ///
    /// If the drug name is missing or blank the row is
    /// skipped and None is returned. If a node with the same
    /// normalized name exists, the record is appended to it;
    /// otherwise a new leaf is created in the ordered position.
    pub fn insert(&mut self, row: RawOrderRow) -> Option<NodeId> {
        let key = match row.drug_name.as_deref().map(DrugKey::normalize) {
            Some(Ok(key)) => key,
            _ => {
                log::debug!("Skipping order row with blank drug name: {:?}", row);
                return None;
            }
        };
        let record = OrderRecord::from_row(row);

        let Some(mut current) = self.root else {
            let id = NodeId(self.nodes.len());
            self.nodes.push(IndexNode::new(key, record));
            self.root = Some(id);
            return Some(id);
        };

        loop {
            let next = NodeId(self.nodes.len());
            let node = &mut self.nodes[current.0];
            let child = match key.cmp(&node.key) {
                Ordering::Less => &mut node.left,
                Ordering::Greater => &mut node.right,
                Ordering::Equal => {
                    node.records.push(record);
                    return Some(current);
                }
            };
            match *child {
                Some(id) => current = id,
                None => {
                    *child = Some(next);
                    self.nodes.push(IndexNode::new(key, record));
                    return Some(next);
                }
            }
        }
    }

    /// Find the node for a drug name
    ///
    /// The name is normalized the same way as on insertion.
    /// A blank name returns None without visiting the tree.
    pub fn search(&self, raw_name: &str) -> Option<&IndexNode> {
        self.search_id(raw_name).map(|id| self.node(id))
    }

    /// Same as search, but returns the NodeId (e.g. to draw
    /// the subtree rooted at the match)
    pub fn search_id(&self, raw_name: &str) -> Option<NodeId> {
        let key = DrugKey::normalize(raw_name).ok()?;
        let mut current = self.root;
        while let Some(id) = current {
            let node = self.node(id);
            current = match key.cmp(&node.key) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Some(id),
            };
        }
        None
    }

    /// Get a node by id
    ///
    /// A NodeId is only valid for the index that issued it. Panics
    /// on an id from another (larger) index; use get() when the id
    /// may not come from this index.
    pub fn node(&self, id: NodeId) -> &IndexNode {
        &self.nodes[id.0]
    }

    /// Get a node by id, or None if this index has no such node
    pub fn get(&self, id: NodeId) -> Option<&IndexNode> {
        self.nodes.get(id.0)
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Number of distinct drugs (nodes)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Total number of orders across all drugs
    pub fn record_count(&self) -> usize {
        self.nodes.iter().map(|node| node.records.len()).sum()
    }

    /// Number of levels in the subtree (0 for an absent subtree,
    /// 1 for a single node)
    pub fn height(&self, subtree: Option<NodeId>) -> usize {
        let mut height = 0;
        let mut stack: Vec<(NodeId, usize)> = subtree.map(|id| (id, 1)).into_iter().collect();
        while let Some((id, depth)) = stack.pop() {
            height = height.max(depth);
            let node = self.node(id);
            stack.extend(node.left.map(|child| (child, depth + 1)));
            stack.extend(node.right.map(|child| (child, depth + 1)));
        }
        height
    }

    /// Visit the whole tree in ascending key order
    pub fn iter(&self) -> InOrder<'_> {
        self.iter_subtree(self.root)
    }

    /// Visit a subtree in ascending key order
    pub fn iter_subtree(&self, subtree: Option<NodeId>) -> InOrder<'_> {
        InOrder {
            index: self,
            stack: Vec::new(),
            current: subtree,
        }
    }

    /// All keys in ascending order
    pub fn keys(&self) -> Vec<&DrugKey> {
        self.iter().map(|(_, node)| node.key()).collect()
    }

    /// All node ids of a subtree, parent before children
    /// (left subtree before right subtree)
    pub fn preorder(&self, subtree: Option<NodeId>) -> Vec<NodeId> {
        let mut ids = Vec::new();
        let mut stack: Vec<NodeId> = subtree.into_iter().collect();
        while let Some(id) = stack.pop() {
            ids.push(id);
            let node = self.node(id);
            stack.extend(node.right);
            stack.extend(node.left);
        }
        ids
    }
}

/// In-order (ascending key) iterator over a subtree
pub struct InOrder<'a> {
    index: &'a DrugIndex,
    stack: Vec<NodeId>,
    current: Option<NodeId>,
}

impl<'a> Iterator for InOrder<'a> {
    type Item = (NodeId, &'a IndexNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.current {
            self.stack.push(id);
            self.current = self.index.node(id).left;
        }
        let id = self.stack.pop()?;
        let node = self.index.node(id);
        self.current = node.right;
        Some((id, node))
    }
}

/// Tests for the drug index
///
/// The following things need checking:
/// * records end up in the node for their normalized name, in order
/// * case/whitespace variants find the same node
/// * rows with a blank or missing name are skipped
/// * the in-order traversal is strictly ascending
/// * searches on an empty tree or with a blank name find nothing
///
#[cfg(test)]
mod tests {

    use super::*;
    use crate::synth_orders::make_orders;

    fn example_rows() -> Vec<RawOrderRow> {
        vec![
            RawOrderRow::new("Paracetamol", "Ana", "Flu", "2024-01-01"),
            RawOrderRow::new("paracetamol", "Budi", "Demam", "2024-01-02"),
            RawOrderRow::new("Amoxicillin", "Citra", "Infeksi", "2024-01-03"),
        ]
    }

    fn orderers(node: &IndexNode) -> Vec<&str> {
        node.records().iter().map(|r| r.orderer()).collect()
    }

    #[test]
    fn example_rows_make_two_nodes() {
        let index = DrugIndex::from_rows(example_rows());

        assert_eq!(index.len(), 2);
        assert_eq!(index.record_count(), 3);
        let keys: Vec<&str> = index.keys().iter().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["amoxicillin", "paracetamol"]);

        let node = index.search("Paracetamol").expect("paracetamol was inserted");
        assert_eq!(orderers(node), vec!["Ana", "Budi"]);
        assert_eq!(node.records()[1].drug_name(), "paracetamol");

        assert!(index.search("ibuprofen").is_none());
    }

    #[test]
    fn first_key_becomes_root() {
        let index = DrugIndex::from_rows(example_rows());
        let root = index.node(index.root().unwrap());
        assert_eq!(root.key().as_str(), "paracetamol");
        let left = index.node(root.left().unwrap());
        assert_eq!(left.key().as_str(), "amoxicillin");
        assert!(root.right().is_none());
    }

    #[test]
    fn search_ignores_case_and_padding() {
        let index = DrugIndex::from_rows(example_rows());
        let a = index.search_id("  ParaceTamol ");
        let b = index.search_id("paracetamol");
        assert!(a.is_some());
        assert_eq!(a, b);
    }

    #[test]
    fn blank_names_never_create_nodes() {
        let mut index = DrugIndex::new();
        assert!(index.insert(RawOrderRow::new("   ", "Ana", "Flu", "2024-01-01")).is_none());
        assert!(index.insert(RawOrderRow::default()).is_none());
        assert!(index.is_empty());

        index.insert(RawOrderRow::new("Ibuprofen", "Dewi", "Nyeri", "2024-02-01"));
        index.insert(RawOrderRow::new("", "Eko", "Nyeri", "2024-02-02"));
        assert_eq!(index.len(), 1);
        assert_eq!(orderers(index.search("ibuprofen").unwrap()), vec!["Dewi"]);
    }

    #[test]
    fn empty_tree_and_blank_queries_find_nothing() {
        let empty = DrugIndex::new();
        assert!(empty.search("paracetamol").is_none());
        assert!(empty.root().is_none());
        assert_eq!(empty.height(empty.root()), 0);

        let index = DrugIndex::from_rows(example_rows());
        assert!(index.search("").is_none());
        assert!(index.search(" \t").is_none());
    }

    #[test]
    fn in_order_keys_are_strictly_ascending() {
        let index = DrugIndex::from_rows(make_orders(7, 500));
        let keys = index.keys();
        assert!(!keys.is_empty());
        assert!(keys.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn every_row_is_found_under_its_key_in_insertion_order() {
        let rows = make_orders(11, 300);
        let index = DrugIndex::from_rows(rows.clone());

        for node_id in index.preorder(index.root()) {
            let node = index.node(node_id);
            let expected: Vec<OrderRecord> = rows
                .iter()
                .filter(|row| {
                    row.drug_name
                        .as_deref()
                        .and_then(|name| DrugKey::normalize(name).ok())
                        .as_ref()
                        == Some(node.key())
                })
                .cloned()
                .map(OrderRecord::from_row)
                .collect();
            assert_eq!(node.records(), expected.as_slice());
        }

        let accepted = rows
            .iter()
            .filter(|row| row.drug_name.as_deref().map_or(false, |n| !n.trim().is_empty()))
            .count();
        assert_eq!(index.record_count(), accepted);
    }

    #[test]
    fn sorted_input_makes_a_chain() {
        let names = ["a", "b", "c", "d", "e"];
        let index = DrugIndex::from_rows(
            names.iter().map(|name| RawOrderRow::new(name, "x", "y", "z")),
        );
        assert_eq!(index.height(index.root()), names.len());
        assert_eq!(index.preorder(index.root()).len(), names.len());
    }

    #[test]
    fn deep_chain_does_not_overflow() {
        let index = DrugIndex::from_rows(
            (0..5_000).map(|n| RawOrderRow::new(&format!("drug{n:06}"), "x", "y", "z")),
        );
        assert_eq!(index.height(index.root()), 5_000);
        assert!(index.search("DRUG004999").is_some());
        assert_eq!(index.iter().count(), 5_000);
    }

    #[test]
    fn subtree_iteration_stays_inside_the_subtree() {
        let index = DrugIndex::from_rows(
            ["m", "f", "t", "c", "h", "p", "x"]
                .iter()
                .map(|name| RawOrderRow::new(name, "x", "y", "z")),
        );
        let f = index.search_id("f");
        let keys: Vec<&str> = index
            .iter_subtree(f)
            .map(|(_, node)| node.key().as_str())
            .collect();
        assert_eq!(keys, vec!["c", "f", "h"]);
        assert_eq!(index.height(f), 2);
    }

    #[test]
    fn foreign_node_ids_are_not_found_by_get() {
        let big = DrugIndex::from_rows(
            ["m", "f", "t"]
                .iter()
                .map(|name| RawOrderRow::new(name, "x", "y", "z")),
        );
        let small = DrugIndex::from_rows(example_rows());
        let t = big.search_id("t").unwrap();

        assert_eq!(big.get(t).map(|node| node.key().as_str()), Some("t"));
        assert!(small.get(t).is_none());
        assert!(DrugIndex::new().get(t).is_none());
    }
}
