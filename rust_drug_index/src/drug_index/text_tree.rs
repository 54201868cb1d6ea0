//! Text drawing of the index for terminal output
//!
//! The walk is right subtree, node, left subtree, so reading the
//! lines top to bottom gives the drugs from greatest to least key.
//! Every line starts with the accumulated prefix and a connector:
//! "L-- " when the node is the last thing its parent emits (the
//! left child, or the subtree root itself) and "|-- " otherwise.
//!

use super::{DrugIndex, NodeId};

const LAST: &str = "L-- ";
const CONTINUED: &str = "|-- ";

enum Step {
    Visit { id: NodeId, prefix: String, is_last: bool },
    Emit { id: NodeId, prefix: String, is_last: bool },
}

/// Lines of the text tree for a subtree (empty for an absent
/// subtree). Each line reads e.g. "L-- Paracetamol (records: 2)".
pub fn descending_lines(index: &DrugIndex, subtree: Option<NodeId>) -> Vec<String> {
    let mut lines = Vec::new();
    let mut stack: Vec<Step> = subtree
        .map(|id| Step::Visit {
            id,
            prefix: String::new(),
            is_last: true,
        })
        .into_iter()
        .collect();

    while let Some(step) = stack.pop() {
        match step {
            Step::Visit { id, prefix, is_last } => {
                let node = index.node(id);
                let child_prefix = format!("{prefix}{}", if is_last { "    " } else { "|   " });

                // Pushed in reverse: right is emitted first, left last
                if let Some(left) = node.left() {
                    stack.push(Step::Visit {
                        id: left,
                        prefix: child_prefix.clone(),
                        is_last: true,
                    });
                }
                stack.push(Step::Emit { id, prefix, is_last });
                if let Some(right) = node.right() {
                    stack.push(Step::Visit {
                        id: right,
                        prefix: child_prefix,
                        is_last: false,
                    });
                }
            }
            Step::Emit { id, prefix, is_last } => {
                let node = index.node(id);
                let connector = if is_last { LAST } else { CONTINUED };
                lines.push(format!(
                    "{prefix}{connector}{} (records: {})",
                    node.key().display_name(),
                    node.records().len()
                ));
            }
        }
    }
    lines
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::record::RawOrderRow;
    use crate::synth_orders::make_orders;

    fn index_from_names(names: &[&str]) -> DrugIndex {
        DrugIndex::from_rows(
            names
                .iter()
                .map(|name| RawOrderRow::new(name, "Ana", "Flu", "2024-01-01")),
        )
    }

    #[test]
    fn empty_tree_prints_nothing() {
        let index = DrugIndex::new();
        assert!(descending_lines(&index, index.root()).is_empty());
    }

    #[test]
    fn three_node_tree() {
        let index = index_from_names(&["m", "f", "t", "m"]);
        let lines = descending_lines(&index, index.root());
        assert_eq!(
            lines,
            vec![
                "    |-- T (records: 1)",
                "L-- M (records: 2)",
                "    L-- F (records: 1)",
            ]
        );
    }

    #[test]
    fn prefixes_continue_under_right_children() {
        let index = index_from_names(&["m", "t", "p", "x"]);
        let lines = descending_lines(&index, index.root());
        assert_eq!(
            lines,
            vec![
                "    |   |-- X (records: 1)",
                "    |-- T (records: 1)",
                "    |   L-- P (records: 1)",
                "L-- M (records: 1)",
            ]
        );
    }

    #[test]
    fn lines_are_in_descending_key_order() {
        let index = DrugIndex::from_rows(make_orders(9, 300));
        let lines = descending_lines(&index, index.root());
        assert_eq!(lines.len(), index.len());

        let mut expected: Vec<String> = index
            .iter()
            .map(|(_, node)| node.key().display_name())
            .collect();
        expected.reverse();
        let names: Vec<String> = lines
            .iter()
            .map(|line| {
                let start = line.find("-- ").unwrap() + 3;
                let end = line.rfind(" (records:").unwrap();
                String::from(&line[start..end])
            })
            .collect();
        assert_eq!(names, expected);
    }
}
