// ABOUTME: Small DOM navigation helpers shared by the scan pipeline.
// ABOUTME: Resolves NodeIds back to elements and walks forward element siblings.

use ego_tree::NodeId;
use scraper::{ElementRef, Html};

/// Resolve a `NodeId` back to an element in `doc`.
///
/// Returns `None` when the id does not exist in this tree or does not
/// refer to an element node.
pub fn element_for(doc: &Html, id: NodeId) -> Option<ElementRef<'_>> {
    doc.tree.get(id).and_then(ElementRef::wrap)
}

/// The next sibling of `element` that is itself an element, skipping
/// text, comment, and other non-element nodes.
pub fn next_element_sibling<'a>(element: &ElementRef<'a>) -> Option<ElementRef<'a>> {
    let mut node = element.next_sibling();
    while let Some(current) = node {
        if let Some(sibling) = ElementRef::wrap(current) {
            return Some(sibling);
        }
        node = current.next_sibling();
    }
    None
}
