//! Node positions for drawing the index as a diagram
//!
//! Positions are computed fresh for every drawing and kept in
//! a Layout, separate from the index itself.
//!
//! x comes from an in-order (ascending key) walk, so a node is
//! always to the right of everything in its left subtree and to
//! the left of everything in its right subtree. y is minus the
//! depth, so the subtree root is at the top. On top of the
//! in-order cursor, the last x used at every depth is tracked and
//! a node is placed at least half a spacing to the right of it.
//!

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{DrugIndex, NodeId};

/// Extra space around the extreme node positions
const BOUNDS_PADDING: f64 = 1.0;

/// Spacing between nodes, in plot units
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct LayoutConfig {
    /// Horizontal step between consecutive in-order nodes
    pub x_spacing: f64,
    /// Vertical step between depths
    pub y_spacing: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            x_spacing: 1.5,
            y_spacing: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Plot area covering every node, padded by one unit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn contains(&self, point: Point) -> bool {
        (self.min_x..=self.max_x).contains(&point.x) && (self.min_y..=self.max_y).contains(&point.y)
    }
}

/// Positions and edges for one subtree
#[derive(Debug, Clone)]
pub struct Layout {
    /// Node positions, in in-order sequence
    positions: Vec<(NodeId, Point)>,
    lookup: HashMap<NodeId, usize>,
    /// (parent, child) pairs
    edges: Vec<(NodeId, NodeId)>,
    bounds: Option<Bounds>,
}

impl Layout {
    /// Lay out the subtree rooted at subtree (or nothing, for
    /// an absent subtree)
    pub fn compute(index: &DrugIndex, subtree: Option<NodeId>, config: &LayoutConfig) -> Self {
        let mut positions = Vec::new();
        let mut last_x_at_depth: HashMap<usize, f64> = HashMap::new();
        let mut cursor = 0.0;

        let mut stack: Vec<(NodeId, usize)> = Vec::new();
        let mut current = subtree.map(|id| (id, 0));
        loop {
            while let Some((id, depth)) = current {
                stack.push((id, depth));
                current = index.node(id).left().map(|child| (child, depth + 1));
            }
            let Some((id, depth)) = stack.pop() else {
                break;
            };

            let min_x = last_x_at_depth
                .get(&depth)
                .map_or(f64::NEG_INFINITY, |last| last + 0.5 * config.x_spacing);
            let x = f64::max(cursor, min_x);
            cursor = x + config.x_spacing;
            last_x_at_depth.insert(depth, x);
            let y = -(depth as f64) * config.y_spacing;
            positions.push((id, Point { x, y }));

            current = index.node(id).right().map(|child| (child, depth + 1));
        }

        let lookup = positions
            .iter()
            .enumerate()
            .map(|(n, (id, _))| (*id, n))
            .collect();

        let edges = positions
            .iter()
            .flat_map(|(id, _)| {
                let node = index.node(*id);
                node.left()
                    .into_iter()
                    .chain(node.right())
                    .map(move |child| (*id, child))
            })
            .collect();

        let bounds = padded_bounds(positions.iter().map(|(_, point)| *point));

        Self {
            positions,
            lookup,
            edges,
            bounds,
        }
    }

    pub fn positions(&self) -> &[(NodeId, Point)] {
        &self.positions
    }

    pub fn position(&self, id: NodeId) -> Option<Point> {
        self.lookup.get(&id).map(|n| self.positions[*n].1)
    }

    pub fn edges(&self) -> &[(NodeId, NodeId)] {
        &self.edges
    }

    /// None when there is nothing to draw
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

fn padded_bounds<I>(points: I) -> Option<Bounds>
where
    I: IntoIterator<Item = Point>,
{
    points
        .into_iter()
        .fold(None, |bounds: Option<Bounds>, p| {
            Some(match bounds {
                None => Bounds {
                    min_x: p.x,
                    max_x: p.x,
                    min_y: p.y,
                    max_y: p.y,
                },
                Some(b) => Bounds {
                    min_x: b.min_x.min(p.x),
                    max_x: b.max_x.max(p.x),
                    min_y: b.min_y.min(p.y),
                    max_y: b.max_y.max(p.y),
                },
            })
        })
        .map(|b| Bounds {
            min_x: b.min_x - BOUNDS_PADDING,
            max_x: b.max_x + BOUNDS_PADDING,
            min_y: b.min_y - BOUNDS_PADDING,
            max_y: b.max_y + BOUNDS_PADDING,
        })
}
