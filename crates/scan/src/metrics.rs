// ABOUTME: Structural metrics computed per element: subtree char/tag counts and height.
// ABOUTME: Single post-order pass storing results in a NodeId-keyed map, never on the tree.

use std::collections::HashMap;

use ego_tree::NodeId;
use scraper::{ElementRef, Node};

use crate::exclude::is_excluded_tag;

/// Metric storage using NodeId as key.
pub type MetricsMap = HashMap<NodeId, NodeMetrics>;

/// Derived structural metrics for one element's subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeMetrics {
    /// Trimmed characters in the element's own text runs plus all counted
    /// descendants, never below 1.
    pub char_count: u32,
    /// 1 for the element itself plus all counted descendants.
    pub tag_count: u32,
    /// 0 for an element with no element children, else 1 + the tallest child.
    pub height: u32,
}

impl NodeMetrics {
    /// Fallback record for nodes that were never measured.
    pub const NEUTRAL: NodeMetrics = NodeMetrics {
        char_count: 1,
        tag_count: 1,
        height: 0,
    };

    /// Characters per tag, a content-richness signal. A zero tag count is
    /// treated as 1 so the ratio is always defined.
    pub fn density(&self) -> f64 {
        self.char_count as f64 / self.tag_count.max(1) as f64
    }
}

/// Annotate every element under `root` (inclusive) with its metrics, in a
/// single children-before-parent pass.
///
/// Subtrees rooted at excluded tags are still measured (their own entries
/// exist so sibling height lookups stay defined) but contribute nothing to
/// their ancestors' char and tag counts.
pub fn compute_metrics(root: ElementRef<'_>) -> MetricsMap {
    let mut map = MetricsMap::new();
    measure(root, &mut map);
    map
}

fn measure(element: ElementRef<'_>, map: &mut MetricsMap) -> NodeMetrics {
    let mut chars = 0u32;
    let mut tags = 1u32;
    let mut height = 0u32;

    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                chars += (**text).trim().chars().count() as u32;
            }
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    let child_metrics = measure(child_el, map);
                    height = height.max(child_metrics.height + 1);
                    if !is_excluded_tag(child_el.value().name()) {
                        chars += child_metrics.char_count;
                        tags += child_metrics.tag_count;
                    }
                }
            }
            _ => {}
        }
    }

    let metrics = NodeMetrics {
        char_count: chars.max(1),
        tag_count: tags,
        height,
    };
    map.insert(element.id(), metrics);
    metrics
}
