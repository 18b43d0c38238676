// ABOUTME: Title classifier walking the tree with an explicit work list.
// ABOUTME: Applies tag/class semantics plus a next-sibling locality heuristic.

use ego_tree::NodeId;
use scraper::ElementRef;

use crate::dom::next_element_sibling;
use crate::exclude::is_excluded;
use crate::metrics::{MetricsMap, NodeMetrics};
use crate::options::{ClassifierPolicy, ScanOptions};

/// Heading tags accepted as title anchors.
const TITLE_TAGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];

/// Class-name parts accepted as title indicators.
const TITLE_KEYWORDS: &[&str] = &["headline", "title"];

/// Whether an element looks like a title by tag or class semantics alone.
pub fn matches_title_semantics(element: &ElementRef) -> bool {
    let tag = element.value().name();
    if TITLE_TAGS.iter().any(|t| tag.eq_ignore_ascii_case(t)) {
        return true;
    }
    element.value().classes().any(|class| {
        class
            .split('-')
            .any(|part| TITLE_KEYWORDS.iter().any(|kw| part.eq_ignore_ascii_case(kw)))
    })
}

/// Walk the subtree under `root` and collect title candidates in document
/// order, visiting each element exactly once.
///
/// Excluded elements are skipped without descending, so nothing inside a
/// `<nav>` or a byline block can ever become a candidate. A semantic match
/// is only accepted when the locality heuristic passes: no next element
/// sibling, or a next sibling whose structure is small enough that the
/// match reads as a heading over prose rather than one entry in an index.
pub fn find_title_candidates(
    root: ElementRef<'_>,
    metrics: &MetricsMap,
    options: &ScanOptions,
) -> Vec<NodeId> {
    let baseline = metrics
        .get(&root.id())
        .copied()
        .unwrap_or(NodeMetrics::NEUTRAL)
        .density();

    let mut candidates = Vec::new();
    let mut stack = vec![root];

    while let Some(element) = stack.pop() {
        if is_excluded(&element) {
            continue;
        }

        if matches_title_semantics(&element) && passes_locality(&element, metrics, baseline, options)
        {
            log::debug!(
                "title candidate: <{}> {:?}",
                element.value().name(),
                element.value().attr("class").unwrap_or("")
            );
            candidates.push(element.id());
        }

        // Children pushed in reverse so the pop order is document order.
        let children: Vec<ElementRef<'_>> =
            element.children().filter_map(ElementRef::wrap).collect();
        for child in children.into_iter().rev() {
            stack.push(child);
        }
    }

    candidates
}

fn passes_locality(
    element: &ElementRef,
    metrics: &MetricsMap,
    baseline: f64,
    options: &ScanOptions,
) -> bool {
    let Some(next) = next_element_sibling(element) else {
        return true;
    };
    let next_metrics = metrics
        .get(&next.id())
        .copied()
        .unwrap_or(NodeMetrics::NEUTRAL);

    match options.policy {
        ClassifierPolicy::Semantic => next_metrics.height <= options.height_threshold,
        ClassifierPolicy::Density => next_metrics.density() >= baseline + options.density_margin,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::compute_metrics;
    use scraper::{Html, Selector};

    fn candidates_for(html: &str, options: &ScanOptions) -> (Html, Vec<NodeId>) {
        let doc = Html::parse_document(html);
        let body = doc
            .select(&Selector::parse("body").unwrap())
            .next()
            .unwrap();
        let metrics = compute_metrics(body);
        let found = find_title_candidates(body, &metrics, options);
        (doc, found)
    }

    fn tag_of(doc: &Html, id: NodeId) -> String {
        ElementRef::wrap(doc.tree.get(id).unwrap())
            .unwrap()
            .value()
            .name()
            .to_string()
    }

    #[test]
    fn heading_with_shallow_sibling_is_candidate() {
        let (_, found) = candidates_for(
            "<body><h2>Title</h2><p>prose</p></body>",
            &ScanOptions::default(),
        );
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn heading_with_no_sibling_is_candidate() {
        let (_, found) = candidates_for("<body><div><h3>End</h3></div></body>", &ScanOptions::default());
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn heading_before_tall_sibling_is_rejected() {
        // next sibling has height 4, above the default threshold of 3
        let html = "<body><h2>Index</h2>\
                    <div><div><div><div><p>deep</p></div></div></div></div></body>";
        let (_, found) = candidates_for(html, &ScanOptions::default());
        assert!(found.is_empty());
    }

    #[test]
    fn threshold_is_configurable() {
        let html = "<body><h2>Index</h2>\
                    <div><div><div><div><p>deep</p></div></div></div></div></body>";
        let options = ScanOptions {
            height_threshold: 4,
            ..ScanOptions::default()
        };
        let (_, found) = candidates_for(html, &options);
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn title_class_part_matches() {
        let (doc, found) = candidates_for(
            r#"<body><div class="entry-title">A headline</div><p>prose</p></body>"#,
            &ScanOptions::default(),
        );
        assert_eq!(found.len(), 1);
        assert_eq!(tag_of(&doc, found[0]), "div");
    }

    #[test]
    fn excluded_subtree_is_never_descended() {
        let (_, found) = candidates_for(
            "<body><nav><h2>Menu</h2></nav></body>",
            &ScanOptions::default(),
        );
        assert!(found.is_empty());
    }

    #[test]
    fn output_is_document_order_without_duplicates() {
        let html = "<body>\
                    <h2>First</h2><p>a</p>\
                    <div><h3>Second</h3><p>b</p></div>\
                    <h2>Third</h2>\
                    </body>";
        let (doc, found) = candidates_for(html, &ScanOptions::default());
        let tags: Vec<String> = found.iter().map(|&id| tag_of(&doc, id)).collect();
        assert_eq!(tags, vec!["h2", "h3", "h2"]);
        let mut unique = found.clone();
        unique.dedup();
        assert_eq!(unique.len(), found.len());
    }

    #[test]
    fn density_policy_accepts_content_rich_sibling() {
        // The paragraph sibling is much denser than the document baseline.
        let html = "<body><div><a>x</a><a>y</a><a>z</a></div>\
                    <h2>Story</h2><p>A long paragraph of readable prose, dense in characters.</p>\
                    </body>";
        let options = ScanOptions {
            policy: ClassifierPolicy::Density,
            ..ScanOptions::default()
        };
        let (_, found) = candidates_for(html, &options);
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn density_policy_rejects_sparse_sibling() {
        let html = "<body><p>Plenty of baseline text lives here to raise the document density \
                    well above the sparse list that follows the heading.</p>\
                    <h2>Links</h2><div><a>a</a><a>b</a><a>c</a><a>d</a></div></body>";
        let options = ScanOptions {
            policy: ClassifierPolicy::Density,
            ..ScanOptions::default()
        };
        let (_, found) = candidates_for(html, &options);
        assert!(found.is_empty());
    }
}
