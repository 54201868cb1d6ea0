//! Tree diagram generator
//!
//! Draws a subtree of the index as an SVG image: one labelled box
//! per drug (name and number of orders) and one line per
//! parent/child link, placed with the in-order layout. The image
//! covers the layout bounds, which already include one unit of
//! padding around the outermost nodes.
//!

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::drug_index::{Bounds, DrugIndex, Layout, LayoutConfig, NodeId, Point};
use crate::error::{DrugIndexError, Result};

/// Space above the plot area for the title, in pixels
const TITLE_HEIGHT: f64 = 40.0;
/// Canvas used when there is nothing to draw
const EMPTY_WIDTH: f64 = 480.0;
const EMPTY_HEIGHT: f64 = 300.0;
/// Rough width of one label character, in pixels
const CHAR_WIDTH: f64 = 7.0;
const BOX_HEIGHT: f64 = 34.0;

/// Diagram generator
pub struct TreeRenderer {
    layout: LayoutConfig,
    pixels_per_unit: f64,
}

impl TreeRenderer {
    pub fn new(layout: LayoutConfig, pixels_per_unit: f64) -> Self {
        Self {
            layout,
            pixels_per_unit,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.layout, config.render.pixels_per_unit)
    }

    /// Draw the subtree rooted at subtree and write it to
    /// destination. An absent subtree still produces an image,
    /// labelled as empty.
    pub fn render(
        &self,
        index: &DrugIndex,
        subtree: Option<NodeId>,
        destination: &Path,
        title: &str,
    ) -> Result<PathBuf> {
        let svg = self.build_svg(index, subtree, title);
        fs::write(destination, svg).map_err(|source| DrugIndexError::RenderFailure {
            path: destination.to_path_buf(),
            source,
        })?;
        log::info!("Tree diagram '{}' saved as {}", title, destination.display());
        Ok(destination.to_path_buf())
    }

    /// Build the SVG document
    pub fn build_svg(&self, index: &DrugIndex, subtree: Option<NodeId>, title: &str) -> String {
        let layout = Layout::compute(index, subtree, &self.layout);
        match layout.bounds() {
            None => {
                log::info!("Tree '{}' is empty, drawing placeholder", title);
                empty_svg(title)
            }
            Some(bounds) => self.tree_svg(index, &layout, bounds, title),
        }
    }

    fn tree_svg(&self, index: &DrugIndex, layout: &Layout, bounds: Bounds, title: &str) -> String {
        let width = bounds.width() * self.pixels_per_unit;
        let height = bounds.height() * self.pixels_per_unit + TITLE_HEIGHT;
        let to_pixels = |p: Point| {
            (
                (p.x - bounds.min_x) * self.pixels_per_unit,
                TITLE_HEIGHT + (bounds.max_y - p.y) * self.pixels_per_unit,
            )
        };

        let mut svg = svg_header(width, height, title);

        svg.push_str("  <g class=\"edges\" stroke=\"gray\" stroke-width=\"1.5\">\n");
        for (parent, child) in layout.edges() {
            if let (Some(from), Some(to)) = (layout.position(*parent), layout.position(*child)) {
                let (x1, y1) = to_pixels(from);
                let (x2, y2) = to_pixels(to);
                svg.push_str(&format!(
                    "    <line x1=\"{x1:.1}\" y1=\"{y1:.1}\" x2=\"{x2:.1}\" y2=\"{y2:.1}\"/>\n"
                ));
            }
        }
        svg.push_str("  </g>\n");

        svg.push_str("  <g class=\"nodes\" font-family=\"sans-serif\" font-size=\"12\">\n");
        for (id, point) in layout.positions() {
            let node = index.node(*id);
            let display_name = node.key().display_name();
            let count = format!("(records: {})", node.records().len());
            let box_width = CHAR_WIDTH * display_name.chars().count().max(count.len()) as f64 + 16.0;
            let name = escape_xml(&display_name);
            let (x, y) = to_pixels(*point);
            svg.push_str(&format!(
                "    <rect class=\"node\" x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" rx=\"8\" fill=\"skyblue\" fill-opacity=\"0.7\" stroke=\"black\"/>\n",
                x - box_width / 2.0,
                y - BOX_HEIGHT / 2.0,
                box_width,
                BOX_HEIGHT
            ));
            svg.push_str(&format!(
                "    <text x=\"{x:.1}\" y=\"{:.1}\" text-anchor=\"middle\"><tspan x=\"{x:.1}\">{name}</tspan><tspan x=\"{x:.1}\" dy=\"14\">{count}</tspan></text>\n",
                y - 3.0
            ));
        }
        svg.push_str("  </g>\n");
        svg.push_str("</svg>\n");
        svg
    }
}

fn svg_header(width: f64, height: f64, title: &str) -> String {
    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width:.0}\" height=\"{height:.0}\" viewBox=\"0 0 {width:.1} {height:.1}\">\n"
    ));
    svg.push_str(&format!("  <title>{}</title>\n", escape_xml(title)));
    svg.push_str(&format!(
        "  <text class=\"title\" x=\"{:.1}\" y=\"26\" text-anchor=\"middle\" font-family=\"sans-serif\" font-size=\"16\">{}</text>\n",
        width / 2.0,
        escape_xml(title)
    ));
    svg
}

fn empty_svg(title: &str) -> String {
    let mut svg = svg_header(EMPTY_WIDTH, EMPTY_HEIGHT, title);
    svg.push_str(&format!(
        "  <text class=\"empty\" x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\" font-family=\"sans-serif\" font-size=\"14\" fill=\"gray\">{} (empty)</text>\n",
        EMPTY_WIDTH / 2.0,
        EMPTY_HEIGHT / 2.0,
        escape_xml(title)
    ));
    svg.push_str("</svg>\n");
    svg
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
